//! Saved-progress storage
//!
//! The progression engine persists after every mutation through the
//! `ProgressStore` seam: LocalStorage in the browser, an in-memory map for
//! native runs and tests. Stores only save, load and clear - they never
//! mutate progress on their own. Failures are recoverable by design; the
//! engine logs them and keeps playing in memory.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::AttemptRecord;

/// Recoverable storage problems. Logged, never fatal to gameplay.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage backend unavailable")]
    Unavailable,
    #[error("storage rejected the write: {0}")]
    WriteRejected(String),
    #[error("saved progress is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Wire format of a saved session, keyed by `game_<sanitized_title>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProgress {
    pub game_id: String,
    pub position: usize,
    pub attempts: Vec<AttemptRecord>,
    /// Unix milliseconds of the last write
    pub timestamp: f64,
}

/// Save/load/clear surface for session progress.
pub trait ProgressStore {
    fn save(&mut self, key: &str, progress: &SavedProgress) -> Result<(), PersistenceError>;
    fn load(&self, key: &str) -> Result<Option<SavedProgress>, PersistenceError>;
    fn clear(&mut self, key: &str) -> Result<(), PersistenceError>;
}

/// In-memory store backed by a map of JSON strings.
///
/// Serializes through the same wire format as LocalStorage so round-trip
/// tests cover real (de)serialization, not just a clone.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: std::collections::HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw JSON for a key, mostly for test assertions.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl ProgressStore for MemoryStore {
    fn save(&mut self, key: &str, progress: &SavedProgress) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(progress)?;
        self.entries.insert(key.to_string(), json);
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<SavedProgress>, PersistenceError> {
        match self.entries.get(key) {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn clear(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Browser LocalStorage store (WASM only).
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, PersistenceError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PersistenceError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl ProgressStore for LocalStorageStore {
    fn save(&mut self, key: &str, progress: &SavedProgress) -> Result<(), PersistenceError> {
        let storage = Self::storage()?;
        let json = serde_json::to_string(progress)?;
        storage
            .set_item(key, &json)
            .map_err(|e| PersistenceError::WriteRejected(format!("{e:?}")))?;
        log::info!("Progress saved ({key})");
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<SavedProgress>, PersistenceError> {
        let storage = Self::storage()?;
        match storage.get_item(key).ok().flatten() {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn clear(&mut self, key: &str) -> Result<(), PersistenceError> {
        let storage = Self::storage()?;
        storage
            .remove_item(key)
            .map_err(|e| PersistenceError::WriteRejected(format!("{e:?}")))?;
        Ok(())
    }
}
