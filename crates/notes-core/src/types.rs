//! Core data types for the notes service.
//!
//! - Users are keyed by email and carry a server-assigned numeric id
//! - Notes are keyed by a server-assigned numeric id and hold free text
//!
//! Ids are plain `u32` values on the wire. The newtypes keep user ids and note
//! ids from being mixed up inside the code base.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

// ============================================================================
// ID Types
// ============================================================================

/// Identifier of a registered user.
///
/// Serialized as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u32);

impl UserId {
    /// Returns the inner value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Identifier of a stored note.
///
/// Serialized as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub u32);

impl NoteId {
    /// Returns the inner value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Error returned when an id string is not a decimal `u32`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdParseError(ParseIntError);

impl From<ParseIntError> for IdParseError {
    fn from(err: ParseIntError) -> Self {
        Self(err)
    }
}

impl fmt::Display for IdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid id: {}", self.0)
    }
}

impl std::error::Error for IdParseError {}

// ============================================================================
// Records
// ============================================================================

/// A registered user.
///
/// `password_hash` is an encoded password hash, never the clear text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// A user about to be registered. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    /// Creates a new user record awaiting an id.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }

    /// Attaches the id assigned by the store.
    #[must_use]
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
        }
    }
}

/// A stored note. Serializes as `{"id": 1, "note": "text"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub note: String,
}

impl Note {
    pub fn new(id: NoteId, note: impl Into<String>) -> Self {
        Self {
            id,
            note: note.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_wire_shape() {
        let note = Note::new(NoteId(1), "hi");
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "note": "hi"}));
    }

    #[test]
    fn note_deserializes_from_wire_shape() {
        let note: Note = serde_json::from_str(r#"{"id": 7, "note": "text"}"#).unwrap();
        assert_eq!(note.id, NoteId(7));
        assert_eq!(note.note, "text");
    }

    #[test]
    fn user_id_display_fromstr() {
        let id = UserId(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!("42".parse::<UserId>().unwrap(), id);
    }

    #[test]
    fn user_id_rejects_non_numeric() {
        assert!("abc".parse::<UserId>().is_err());
        assert!("-1".parse::<UserId>().is_err());
        assert!("".parse::<UserId>().is_err());
    }

    #[test]
    fn note_id_fromstr() {
        assert_eq!("3".parse::<NoteId>().unwrap(), NoteId(3));
        assert!("4294967296".parse::<NoteId>().is_err());
    }

    #[test]
    fn new_user_with_id() {
        let user = NewUser::new("A", "a@x.com", "hash").with_id(UserId(1));
        assert_eq!(user.id, UserId(1));
        assert_eq!(user.name, "A");
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.password_hash, "hash");
    }
}
