//! API error types with JSON responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use notes_store::StoreError;
use serde::Serialize;

/// Message for any request body that fails to decode.
pub const INVALID_REQUEST_FORMAT: &str = "Invalid request format";

/// API error that can be returned from handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Unauthorized (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server error (500).
    #[error("internal error: {0}")]
    Internal(String),

    /// Store error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Get the error code string for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Store(StoreError::DuplicateEmail(_)) => "EMAIL_EXISTS",
            Self::Store(StoreError::NoteNotFound(_)) => "NOTE_NOT_FOUND",
            Self::Store(_) => "STORAGE_ERROR",
        }
    }

    /// Get the HTTP status code for this error.
    ///
    /// Business-rule failures (duplicate email, unknown note) share 400 with
    /// malformed input; only bad credentials and bad sessions get 401.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Store(e) => match e {
                StoreError::DuplicateEmail(_) => StatusCode::BAD_REQUEST,
                StoreError::NoteNotFound(_) => StatusCode::BAD_REQUEST,
                StoreError::IdSpaceExhausted(_) | StoreError::LockPoisoned(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    /// Message exposed to the client.
    pub fn message(&self) -> String {
        match self {
            Self::BadRequest(msg) | Self::Unauthorized(msg) => msg.clone(),
            Self::Internal(_) => "Internal server error".to_string(),
            Self::Store(e) => match e {
                StoreError::DuplicateEmail(_) => "Email already registered".to_string(),
                StoreError::NoteNotFound(_) => e.to_string(),
                _ => "Internal server error".to_string(),
            },
        }
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "Request failed");
        } else {
            tracing::debug!(code = self.code(), error = %self, "Request rejected");
        }

        let body = ErrorResponse {
            error: self.message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
