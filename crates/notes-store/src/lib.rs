//! notes-store: storage layer for the notes service.
//!
//! This crate provides:
//! - `UserStore` and `NoteStore`, the interfaces the server is written against
//! - `MemoryStore`, a process-local implementation of both
//!
//! # Usage
//!
//! ```rust
//! use notes_store::{MemoryStore, NoteStore};
//!
//! let store = MemoryStore::new();
//! let note = store.create_note("hi".to_string()).unwrap();
//! assert_eq!(note.id.get(), 1);
//! assert_eq!(store.list_notes().unwrap(), vec![note]);
//! ```

pub mod error;
pub mod memory;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use store::{NoteStore, UserStore};

// Re-export notes-core for downstream crates
pub use notes_core;
