//! Key-value persistence substrate.
//!
//! The planner's local data model is a flat set of string keys (the web
//! original lives in `localStorage`). [`KvStore`] is that substrate at its
//! interface boundary; [`FileStore`] is the on-disk implementation and
//! [`MemoryStore`] backs tests and ephemeral use.
//!
//! Mutations never surface errors to callers -- a failed persist is logged
//! and the in-memory state stays authoritative, matching localStorage's
//! non-throwing contract.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{error, warn};

use crate::error::StorageError;

/// String-keyed, string-valued storage.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// HashMap-backed store for tests and ephemeral sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    map: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.map.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.map.remove(key);
    }
}

/// JSON-file-backed store, persisted on every mutation.
#[derive(Debug)]
pub struct FileStore {
    map: HashMap<String, String>,
    path: PathBuf,
}

impl FileStore {
    /// Open the store at `path`, loading existing contents.
    ///
    /// A missing file yields an empty store. A malformed file also yields an
    /// empty store (with a warning) rather than an error -- stored data is
    /// never allowed to wedge the application.
    ///
    /// # Errors
    /// Returns an error only when an existing file cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let map = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(map) => map,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "malformed store file, starting empty");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(source) => return Err(StorageError::ReadFailed { path, source }),
        };
        Ok(Self { map, path })
    }

    /// Write the current contents to disk.
    ///
    /// # Errors
    /// Returns an error if serialization output cannot be written.
    pub fn persist(&self) -> Result<(), StorageError> {
        let data = serde_json::to_string_pretty(&self.map).unwrap_or_default();
        std::fs::write(&self.path, data).map_err(|source| StorageError::PersistFailed {
            path: self.path.clone(),
            source,
        })
    }

    fn persist_logged(&self) {
        if let Err(e) = self.persist() {
            error!(error = %e, "failed to persist local store");
        }
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.map.insert(key.to_string(), value.to_string());
        self.persist_logged();
    }

    fn remove(&mut self, key: &str) {
        if self.map.remove(key).is_some() {
            self.persist_logged();
        }
    }
}
