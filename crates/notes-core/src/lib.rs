//! notes-core: domain types shared by the store, the server and the CLI.
//!
//! The types here carry no storage or transport concerns. `Note` is also the
//! wire shape returned by `GET /notes`, so its serde representation is part of
//! the public HTTP contract.

pub mod types;

pub use types::{IdParseError, NewUser, Note, NoteId, User, UserId};
