//! End-to-end tests against a live server.
//!
//! Each test binds the full application (router plus middleware) to an
//! ephemeral local port and drives it over HTTP with reqwest.

use notes_server::{AppState, ServerConfig, SessionMode, build_app};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use tokio::net::TcpListener;

// ============================================================================
// Helpers
// ============================================================================

struct TestServer {
    base_url: String,
    client: Client,
}

impl TestServer {
    async fn start(config: ServerConfig) -> Self {
        let app = build_app(AppState::new(config)).expect("app should build");
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server crashed");
        });

        Self {
            base_url: format!("http://{}", addr),
            client: Client::new(),
        }
    }

    async fn plain() -> Self {
        Self::start(ServerConfig::default()).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let response = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .expect("request failed");
        read(response).await
    }

    async fn delete(&self, body: Value) -> (StatusCode, Value) {
        let response = self
            .client
            .delete(self.url("/notes"))
            .json(&body)
            .send()
            .await
            .expect("request failed");
        read(response).await
    }

    async fn list(&self, sid: Option<&str>) -> (StatusCode, Value) {
        let mut request = self.client.get(self.url("/notes"));
        if let Some(sid) = sid {
            request = request.query(&[("sid", sid)]);
        }
        let response = request.send().await.expect("request failed");
        read(response).await
    }

    async fn signup(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.post(
            "/signup",
            json!({"name": "A", "email": email, "password": password}),
        )
        .await
    }

    async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.post("/login", json!({"email": email, "password": password}))
            .await
    }
}

async fn read(response: reqwest::Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = response.json::<Value>().await.expect("json body");
    (status, body)
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn full_scenario() {
    let server = TestServer::plain().await;

    let (status, body) = server.signup("a@x.com", "p").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "User registered successfully"}));

    let (status, body) = server.signup("a@x.com", "p").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Email already registered"}));

    let (status, body) = server.login("a@x.com", "p").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"sid": "1"}));

    let (status, body) = server.post("/notes", json!({"sid": "1", "note": "hi"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1}));

    let (status, body) = server.list(Some("1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"notes": [{"id": 1, "note": "hi"}]}));

    let (status, body) = server.delete(json!({"sid": "1", "id": 1})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Note deleted successfully"}));

    let (status, body) = server.delete(json!({"sid": "1", "id": 1})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Note with ID 1 not found"}));

    let (_, body) = server.list(Some("1")).await;
    assert_eq!(body, json!({"notes": []}));
}

#[tokio::test]
async fn login_rejects_wrong_or_unknown_credentials() {
    let server = TestServer::plain().await;
    server.signup("a@x.com", "Secret").await;

    for (email, password) in [("a@x.com", "secret"), ("a@x.com", "Secret "), ("b@x.com", "Secret")] {
        let (status, body) = server.login(email, password).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"error": "Invalid email or password"}));
    }
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
    let server = TestServer::plain().await;

    for path in ["/signup", "/login", "/notes"] {
        let response = server
            .client
            .post(server.url(path))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();
        let (status, body) = read(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "path {}", path);
        assert_eq!(body, json!({"error": "Invalid request format"}));
    }

    let (status, _) = server.post("/signup", json!({"email": "a@x.com"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = server.delete(json!({"sid": "1", "id": "one"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn body_without_content_type_is_accepted() {
    let server = TestServer::plain().await;

    let response = server
        .client
        .post(server.url("/notes"))
        .body(r#"{"sid": "1", "note": "raw"}"#)
        .send()
        .await
        .unwrap();
    let (status, body) = read(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1}));
}

#[tokio::test]
async fn list_requires_non_empty_sid() {
    let server = TestServer::plain().await;
    server.post("/notes", json!({"sid": "1", "note": "hi"})).await;

    for sid in [None, Some("")] {
        let (status, body) = server.list(sid).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Missing session ID"}));
    }

    let (status, body) = server.list(Some("whatever")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notes"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn list_takes_first_of_repeated_sids() {
    let server = TestServer::plain().await;
    server.post("/notes", json!({"sid": "1", "note": "hi"})).await;

    for query in ["sid=1&sid=2", "sid=1&sid=", "other=x&sid=1"] {
        let response = server
            .client
            .get(format!("{}?{}", server.url("/notes"), query))
            .send()
            .await
            .unwrap();
        let (status, body) = read(response).await;
        assert_eq!(status, StatusCode::OK, "query {}", query);
        assert_eq!(body, json!({"notes": [{"id": 1, "note": "hi"}]}));
    }

    let response = server
        .client
        .get(format!("{}?sid=&sid=1", server.url("/notes")))
        .send()
        .await
        .unwrap();
    let (status, body) = read(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Missing session ID"}));
}

#[tokio::test]
async fn note_ids_are_not_reused_after_delete() {
    let server = TestServer::plain().await;

    server.post("/notes", json!({"sid": "1", "note": "one"})).await;
    server.post("/notes", json!({"sid": "1", "note": "two"})).await;
    server.delete(json!({"sid": "1", "id": 1})).await;

    let (_, body) = server.post("/notes", json!({"sid": "1", "note": "three"})).await;
    assert_eq!(body, json!({"id": 3}));

    let (_, body) = server.list(Some("1")).await;
    let mut ids: Vec<u64> = body["notes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_u64().unwrap())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![2, 3]);
}

#[tokio::test]
async fn concurrent_creates_get_distinct_ids() {
    let server = TestServer::plain().await;

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..32 {
        let client = server.client.clone();
        let url = server.url("/notes");
        tasks.spawn(async move {
            let response = client
                .post(url)
                .json(&json!({"sid": "1", "note": format!("note {}", i)}))
                .send()
                .await
                .unwrap();
            response.json::<Value>().await.unwrap()["id"].as_u64().unwrap()
        });
    }

    let mut ids = tasks.join_all().await;
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 32);
}

#[tokio::test]
async fn responses_carry_request_id() {
    let server = TestServer::plain().await;

    let response = server.client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let response = server
        .client
        .get(server.url("/health"))
        .header("x-request-id", "client-chosen")
        .send()
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "client-chosen");
}

#[tokio::test]
async fn signed_sessions_are_verified() {
    let server = TestServer::start(ServerConfig {
        session_mode: SessionMode::Signed {
            secret: "integration-secret".to_string(),
            expiry_hours: 1,
        },
        ..ServerConfig::default()
    })
    .await;

    server.signup("a@x.com", "p").await;
    let (status, body) = server.login("a@x.com", "p").await;
    assert_eq!(status, StatusCode::OK);
    let sid = body["sid"].as_str().unwrap().to_string();
    assert_ne!(sid, "1");

    // the bare user id is no longer a usable session
    let (status, body) = server.post("/notes", json!({"sid": "1", "note": "hi"})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"error": "Invalid session"}));

    let (status, _) = server.list(Some("1")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = server.post("/notes", json!({"sid": sid, "note": "hi"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1}));

    let (status, body) = server.list(Some(&sid)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"notes": [{"id": 1, "note": "hi"}]}));

    let (status, _) = server.delete(json!({"sid": sid, "id": 1})).await;
    assert_eq!(status, StatusCode::OK);
}
