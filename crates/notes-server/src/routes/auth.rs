//! Account routes: signup and login.

use axum::{Json, Router, extract::State, routing::post};
use notes_core::NewUser;
use serde::{Deserialize, Serialize};

use crate::auth;
use crate::error::{ApiError, ApiResult};
use crate::extract::JsonBody;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Plain acknowledgement body shared by signup and note deletion.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub sid: String,
}

fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized("Invalid email or password".to_string())
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /signup
pub(crate) async fn signup(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SignupRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let password_hash = auth::hash_password(&request.password)?;

    let user = state
        .users()
        .create_user(NewUser::new(request.name, request.email, password_hash))?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok(Json(MessageResponse::new("User registered successfully")))
}

/// POST /login
pub(crate) async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = state
        .users()
        .get_user_by_email(&request.email)?
        .ok_or_else(invalid_credentials)?;

    if !auth::verify_password(&request.password, &user.password_hash)? {
        return Err(invalid_credentials());
    }

    let sid = state.sessions().issue(user.id)?;

    tracing::info!(user_id = %user.id, mode = state.sessions().name(), "User logged in");

    Ok(Json(LoginResponse { sid }))
}

/// Build account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}
