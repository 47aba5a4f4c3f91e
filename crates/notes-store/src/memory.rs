//! In-memory implementation of the storage interfaces.
//!
//! Each table sits behind its own mutex, held for exactly one map operation.
//! Ids come from per-table atomic counters rather than the table size, so a
//! delete can never cause an id to be handed out twice.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard};

use notes_core::{NewUser, Note, NoteId, User, UserId};

use crate::error::{StoreError, StoreResult};
use crate::store::{NoteStore, UserStore};

/// Monotonic id source. The first id is 1.
#[derive(Debug, Default)]
struct IdCounter(AtomicU32);

impl IdCounter {
    fn next(&self, table: &'static str) -> StoreResult<u32> {
        self.0
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1))
            .map(|prev| prev + 1)
            .map_err(|_| StoreError::IdSpaceExhausted(table))
    }
}

/// Process-local store for users and notes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<String, User>>,
    notes: Mutex<BTreeMap<NoteId, Note>>,
    user_ids: IdCounter,
    note_ids: IdCounter,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn users(&self) -> StoreResult<MutexGuard<'_, HashMap<String, User>>> {
        self.users
            .lock()
            .map_err(|_| StoreError::LockPoisoned("users"))
    }

    fn notes(&self) -> StoreResult<MutexGuard<'_, BTreeMap<NoteId, Note>>> {
        self.notes
            .lock()
            .map_err(|_| StoreError::LockPoisoned("notes"))
    }
}

impl UserStore for MemoryStore {
    fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let mut users = self.users()?;

        if users.contains_key(&user.email) {
            return Err(StoreError::DuplicateEmail(user.email));
        }

        let id = UserId(self.user_ids.next("users")?);
        let user = user.with_id(id);
        users.insert(user.email.clone(), user.clone());

        tracing::debug!(user_id = %id, "Stored user");
        Ok(user)
    }

    fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self.users()?.get(email).cloned())
    }
}

impl NoteStore for MemoryStore {
    fn create_note(&self, text: String) -> StoreResult<Note> {
        let mut notes = self.notes()?;

        let id = NoteId(self.note_ids.next("notes")?);
        let note = Note::new(id, text);
        notes.insert(id, note.clone());

        tracing::debug!(note_id = %id, "Stored note");
        Ok(note)
    }

    fn list_notes(&self) -> StoreResult<Vec<Note>> {
        Ok(self.notes()?.values().cloned().collect())
    }

    fn delete_note(&self, id: NoteId) -> StoreResult<()> {
        self.notes()?
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NoteNotFound(id))
    }
}
