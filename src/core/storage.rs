//! Key-value persistence for conversations and preferences
//!
//! Values are plain strings keyed by name. [`FileStore`] keeps one file per
//! key under the application data directory; [`MemoryStore`] lives only as
//! long as the process and backs tests and `--ephemeral` runs.

use crate::core::error::{ChatError, ChatResult};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;
use tracing::warn;

pub const CONVERSATIONS_KEY: &str = "codeface-conversations";
pub const ACTIVE_CONVERSATION_KEY: &str = "codeface-active-conversation";
pub const THEME_KEY: &str = "codeface-theme";

pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` when the key was never written.
    fn load(&self, key: &str) -> Option<String>;

    /// Writes `value`; a subsequent `load` of the same key observes it.
    fn save(&self, key: &str, value: &str) -> ChatResult<()>;
}

pub type SharedStore = Arc<dyn KeyValueStore>;

/// Decode a JSON value stored under `key`.
///
/// Absent keys yield `Ok(None)`; present but undecodable values yield
/// [`ChatError::StorageParse`] so callers can choose their fallback.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> ChatResult<Option<T>> {
    let Some(raw) = store.load(key) else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|err| ChatError::StorageParse {
            key: key.to_string(),
            reason: err.to_string(),
        })
}

/// Write a value and log instead of failing; persistence is best-effort.
pub fn save_or_warn(store: &dyn KeyValueStore, key: &str, value: &str) {
    if let Err(err) = store.save(key, value) {
        warn!(key, error = %err, "failed to persist value");
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedStore {
        Arc::new(Self::new())
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> ChatResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| ChatError::Storage("memory store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Platform data directory, e.g. `~/.local/share/codeface` on Linux.
    pub fn default_dir() -> Option<PathBuf> {
        ProjectDirs::from("org", "codeface", "codeface").map(|dirs| dirs.data_dir().to_path_buf())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read stored value");
                None
            }
        }
    }

    fn save(&self, key: &str, value: &str) -> ChatResult<()> {
        fs::create_dir_all(&self.dir)?;

        let mut temp_file = NamedTempFile::new_in(&self.dir)?;
        temp_file.write_all(value.as_bytes())?;
        temp_file.as_file_mut().sync_all()?;
        temp_file
            .persist(self.path_for(key))
            .map_err(|err| ChatError::Storage(err.to_string()))?;
        Ok(())
    }
}
