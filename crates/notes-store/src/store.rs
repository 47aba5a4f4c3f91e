//! Storage interfaces.
//!
//! The server only sees these traits, so a persistent backend can replace
//! `MemoryStore` without touching any handler.

use notes_core::{NewUser, Note, NoteId, User};

use crate::error::StoreResult;

/// Users keyed by email.
pub trait UserStore: Send + Sync {
    /// Register a new user and assign it the next user id.
    ///
    /// Fails with `StoreError::DuplicateEmail` if the email is taken. A failed
    /// registration consumes no id.
    fn create_user(&self, user: NewUser) -> StoreResult<User>;

    /// Look up a user by exact (byte-equal) email.
    fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
}

/// Notes keyed by id.
pub trait NoteStore: Send + Sync {
    /// Store a note and assign it the next note id. Ids are never reused.
    fn create_note(&self, text: String) -> StoreResult<Note>;

    /// Every note currently stored. Callers must not rely on the order.
    fn list_notes(&self) -> StoreResult<Vec<Note>>;

    /// Remove a note. Fails with `StoreError::NoteNotFound` if absent.
    fn delete_note(&self, id: NoteId) -> StoreResult<()>;
}
