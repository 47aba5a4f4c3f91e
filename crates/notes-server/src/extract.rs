//! Request body and query extraction.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
};
use http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, INVALID_REQUEST_FORMAT};

/// JSON request body that rejects with a 400 `{"error": "Invalid request format"}`.
///
/// Unlike `axum::Json` the `Content-Type` header is not inspected: any body
/// that parses as the target type is accepted. Syntax errors, missing fields and
/// wrongly typed fields all produce the same rejection.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e, "Failed to read request body");
            ApiError::BadRequest(INVALID_REQUEST_FORMAT.to_string())
        })?;

        decode(&bytes).map(Self)
    }
}

/// Decode a JSON body, mapping any failure to the request-format error.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(bytes).map_err(|e| {
        tracing::debug!(error = %e, "Malformed JSON body");
        ApiError::BadRequest(INVALID_REQUEST_FORMAT.to_string())
    })
}

/// The `sid` query parameter, empty when absent.
///
/// The query is read as a list of pairs, so repeated or unknown keys never
/// reject the request. The first `sid` wins.
#[derive(Debug, Clone, Default)]
pub struct SidQuery(pub String);

impl<S> FromRequestParts<S> for SidQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri).map_err(|e| {
            tracing::debug!(error = %e, "Malformed query string");
            ApiError::BadRequest(INVALID_REQUEST_FORMAT.to_string())
        })?;

        let sid = pairs
            .into_iter()
            .find_map(|(key, value)| (key == "sid").then_some(value))
            .unwrap_or_default();

        Ok(Self(sid))
    }
}
