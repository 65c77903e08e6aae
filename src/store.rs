//! Persistence port for assistant state.
//!
//! Exactly two things survive a restart: the chat transcript and the
//! first-visit flag, stored as JSON under fixed keys. Unreadable stored data
//! is discarded with a warning, never an error; the caller falls back to a
//! fresh default transcript.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

use crate::config;
use crate::models::Message;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Cannot access storage: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot encode state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Assistant state persistence port. Injected into the chat controller; no
/// ambient global storage.
pub trait SessionStore {
    /// Load the saved transcript. `None` when nothing readable is stored.
    fn load_history(&self) -> Option<Vec<Message>>;
    fn save_history(&self, messages: &[Message]) -> Result<(), StoreError>;
    fn clear_history(&self) -> Result<(), StoreError>;
    /// Defaults to true when the flag was never saved.
    fn load_first_visit(&self) -> bool;
    fn save_first_visit(&self, first_visit: bool) -> Result<(), StoreError>;
}

// ─── File-backed store ────────────────────────────────────────────────────────

/// JSON files under a storage directory, one file per key.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// The store under the app data directory.
    pub fn default_location() -> Self {
        Self::new(config::storage_dir())
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SessionStore for FileStore {
    fn load_history(&self) -> Option<Vec<Message>> {
        let path = self.key_path(config::CHAT_HISTORY_KEY);
        let raw = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(messages) => Some(messages),
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "discarding unreadable chat history");
                None
            }
        }
    }

    fn save_history(&self, messages: &[Message]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string(messages)?;
        fs::write(self.key_path(config::CHAT_HISTORY_KEY), json)?;
        Ok(())
    }

    fn clear_history(&self) -> Result<(), StoreError> {
        match fs::remove_file(self.key_path(config::CHAT_HISTORY_KEY)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn load_first_visit(&self) -> bool {
        let path = self.key_path(config::FIRST_VISIT_KEY);
        let Ok(raw) = fs::read_to_string(&path) else {
            return true;
        };
        match serde_json::from_str(&raw) {
            Ok(flag) => flag,
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable first-visit flag");
                true
            }
        }
    }

    fn save_first_visit(&self, first_visit: bool) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string(&first_visit)?;
        fs::write(self.key_path(config::FIRST_VISIT_KEY), json)?;
        Ok(())
    }
}

// ─── In-memory store ──────────────────────────────────────────────────────────

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    history: Mutex<Option<Vec<Message>>>,
    first_visit: Mutex<Option<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn load_history(&self) -> Option<Vec<Message>> {
        self.history.lock().unwrap().clone()
    }

    fn save_history(&self, messages: &[Message]) -> Result<(), StoreError> {
        *self.history.lock().unwrap() = Some(messages.to_vec());
        Ok(())
    }

    fn clear_history(&self) -> Result<(), StoreError> {
        *self.history.lock().unwrap() = None;
        Ok(())
    }

    fn load_first_visit(&self) -> bool {
        self.first_visit.lock().unwrap().unwrap_or(true)
    }

    fn save_first_visit(&self, first_visit: bool) -> Result<(), StoreError> {
        *self.first_visit.lock().unwrap() = Some(first_visit);
        Ok(())
    }
}
