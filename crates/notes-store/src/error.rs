//! Error types for the storage layer.

use notes_core::NoteId;
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A user with this email is already registered.
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// Note not found.
    #[error("Note with ID {0} not found")]
    NoteNotFound(NoteId),

    /// Every id in the `u32` range has been handed out.
    #[error("{0} id space exhausted")]
    IdSpaceExhausted(&'static str),

    /// A thread panicked while holding a table lock.
    #[error("{0} table lock poisoned")]
    LockPoisoned(&'static str),
}
