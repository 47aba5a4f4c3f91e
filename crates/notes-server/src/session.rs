//! Session identifiers handed out at login and presented on note routes.
//!
//! Two modes exist:
//! - `Plain`: the sid is the user id in decimal. Nothing is verified; the note
//!   routes only require the list query to carry a non-empty sid.
//! - `Signed`: the sid is an HS256 JWT whose subject is the user id. Every note
//!   route rejects a sid that fails signature or expiry validation.

use std::fmt;

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use notes_core::UserId;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// JWT claims carried by a signed sid.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id in decimal.
    pub sub: String,
    /// Expiration time (unix timestamp).
    pub exp: usize,
    /// Issued at (unix timestamp).
    pub iat: usize,
}

/// How sids are issued and checked.
#[derive(Clone)]
pub enum SessionMode {
    Plain,
    Signed { secret: String, expiry_hours: u64 },
}

impl fmt::Debug for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => f.write_str("Plain"),
            Self::Signed { expiry_hours, .. } => f
                .debug_struct("Signed")
                .field("secret", &"<redacted>")
                .field("expiry_hours", expiry_hours)
                .finish(),
        }
    }
}

impl SessionMode {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Signed { .. } => "signed",
        }
    }

    /// Issue a sid for a user who just logged in.
    pub fn issue(&self, user_id: UserId) -> Result<String, ApiError> {
        match self {
            Self::Plain => Ok(user_id.to_string()),
            Self::Signed {
                secret,
                expiry_hours,
            } => create_token(user_id, secret, *expiry_hours),
        }
    }

    /// Check a presented sid.
    ///
    /// Returns the user id the sid names, if one can be read from it. In plain
    /// mode that id is whatever the caller claims and is only fit for logging.
    pub fn verify(&self, sid: &str) -> Result<Option<UserId>, ApiError> {
        match self {
            Self::Plain => Ok(sid.parse().ok()),
            Self::Signed { secret, .. } => validate_token(sid, secret).map(Some),
        }
    }
}

/// Create a signed sid for a user.
fn create_token(user_id: UserId, secret: &str, expiry_hours: u64) -> Result<String, ApiError> {
    let now = chrono::Utc::now();
    let exp = i64::try_from(expiry_hours)
        .ok()
        .and_then(chrono::TimeDelta::try_hours)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| {
            ApiError::Internal(format!("Session lifetime of {} hours is out of range", expiry_hours))
        })?
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        exp,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("Failed to create session token: {}", e)))
}

/// Validate a signed sid and return the user id it was issued for.
fn validate_token(token: &str, secret: &str) -> Result<UserId, ApiError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!(error = %e, "Session token rejected");
        ApiError::Unauthorized("Invalid session".to_string())
    })?;

    token_data
        .claims
        .sub
        .parse()
        .map_err(|_| ApiError::Unauthorized("Invalid session".to_string()))
}
