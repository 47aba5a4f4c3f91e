//! notes-server: HTTP API server for the notes service
//!
//! This crate provides:
//! - Account endpoints (signup, login)
//! - Note endpoints (list, create, delete)
//! - Session identifiers, either plain user ids or signed tokens
//!
//! # Architecture
//!
//! The server is built on Axum with a middleware stack for:
//! - Panic recovery
//! - CORS handling
//! - Request ID generation
//! - Request tracing and logging
//! - JSON error responses
//!
//! # Usage
//!
//! ```rust,ignore
//! use notes_server::{build_app, AppState, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::from_env()?;
//!     let addr = config.socket_addr();
//!     let app = build_app(AppState::new(config))?;
//!     let listener = tokio::net::TcpListener::bind(addr).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod state;

use std::any::Any;

use axum::{Router, response::IntoResponse, response::Response};
use http::HeaderValue;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as CorsAny, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::middleware::request_id::{propagate_request_id, request_id_layer, request_span};

// Re-exports for convenience
pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use session::SessionMode;
pub use state::AppState;

// Re-export dependent crates
pub use notes_core;
pub use notes_store;

/// Build the router with the full middleware stack.
///
/// Fails only if `cors_allowed_origins` holds an unparseable origin.
pub fn build_app(state: AppState) -> Result<Router, ConfigError> {
    let cors = build_cors_layer(&state.config().cors_allowed_origins)?;
    Ok(with_middleware(routes::build_router(state), cors))
}

/// Wrap a router in the middleware stack, innermost layer first.
///
/// Panics are caught inside the request-id propagation so a 500 from a
/// panicking handler still carries `x-request-id` and shows in the access log.
fn with_middleware(router: Router, cors: CorsLayer) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(axum::middleware::from_fn(propagate_request_id))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(request_id_layer())
        .layer(cors)
}

/// Build CORS layer from configuration.
fn build_cors_layer(allowed_origins: &str) -> Result<CorsLayer, ConfigError> {
    let layer = CorsLayer::new()
        .allow_methods(CorsAny)
        .allow_headers(CorsAny);

    if allowed_origins.trim() == "*" {
        return Ok(layer.allow_origin(CorsAny));
    }

    let origins = allowed_origins
        .split(',')
        .map(|s| {
            s.trim()
                .parse::<HeaderValue>()
                .map_err(|e| ConfigError::InvalidValue {
                    name: "CORS_ALLOWED_ORIGINS".to_string(),
                    reason: format!("{:?}: {}", s.trim(), e),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(layer.allow_origin(origins))
}

/// Turn a handler panic into a 500 JSON response.
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    ApiError::Internal(format!("handler panicked: {}", detail)).into_response()
}
