//! Application state shared across handlers.

use std::sync::Arc;

use notes_store::{MemoryStore, NoteStore, UserStore};

use crate::config::ServerConfig;
use crate::session::SessionMode;

/// Application state shared across all handlers.
///
/// This is cloneable and can be extracted in handlers using `State<AppState>`.
/// The stores are trait objects so tests and alternative backends can inject
/// their own.
#[derive(Clone)]
pub struct AppState {
    /// User table.
    users: Arc<dyn UserStore>,
    /// Note table.
    notes: Arc<dyn NoteStore>,
    /// Server configuration.
    config: Arc<ServerConfig>,
}

impl AppState {
    /// Create application state backed by a fresh in-memory store.
    pub fn new(config: ServerConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::with_stores(store.clone(), store, config)
    }

    /// Create application state over explicit stores.
    pub fn with_stores(
        users: Arc<dyn UserStore>,
        notes: Arc<dyn NoteStore>,
        config: ServerConfig,
    ) -> Self {
        Self {
            users,
            notes,
            config: Arc::new(config),
        }
    }

    /// Get the user store.
    pub fn users(&self) -> &dyn UserStore {
        self.users.as_ref()
    }

    /// Get the note store.
    pub fn notes(&self) -> &dyn NoteStore {
        self.notes.as_ref()
    }

    /// Get a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get the configured session mode.
    pub fn sessions(&self) -> &SessionMode {
        &self.config.session_mode
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
