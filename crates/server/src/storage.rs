//! File-backed JSON stores.
//!
//! `JsonStore` is the server-side rendition of the browser storage contract
//! the credential and cart layers were specified against: a synchronous
//! string-keyed map, loaded once, rewritten in full on every mutation, last
//! write wins. Missing or unreadable files load as an empty map.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur reading or writing a store file.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    /// Store contents could not be serialized.
    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A mutex-guarded `HashMap<String, T>` persisted to a JSON file.
///
/// Cheaply cloneable via `Arc`; every clone shares the same in-memory map and
/// backing file.
#[derive(Debug)]
pub struct JsonStore<T> {
    inner: Arc<JsonStoreInner<T>>,
}

#[derive(Debug)]
struct JsonStoreInner<T> {
    path: PathBuf,
    entries: Mutex<HashMap<String, T>>,
}

impl<T> Clone for JsonStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Serialize + DeserializeOwned> JsonStore<T> {
    /// Open a store, loading existing contents from `path`.
    ///
    /// A missing file starts empty. A file that fails to parse is logged and
    /// treated as empty (the next mutation overwrites it), matching the
    /// storage contract's parse-failure behavior.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        let entries = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            match serde_json::from_str(&raw) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Store file is corrupt, starting empty"
                    );
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        Ok(Self {
            inner: Arc::new(JsonStoreInner {
                path,
                entries: Mutex::new(entries),
            }),
        })
    }

    /// Get a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<T> {
        self.lock().get(key).cloned()
    }

    /// Whether a key is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    /// Insert or replace a value, persisting the whole map.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store file cannot be written.
    pub fn insert(&self, key: &str, value: T) -> Result<(), StorageError> {
        let mut entries = self.lock();
        entries.insert(key.to_owned(), value);
        Self::persist(&self.inner.path, &entries)
    }

    /// Remove a value, persisting the whole map.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store file cannot be written.
    pub fn remove(&self, key: &str) -> Result<Option<T>, StorageError> {
        let mut entries = self.lock();
        let removed = entries.remove(key);
        if removed.is_some() {
            Self::persist(&self.inner.path, &entries)?;
        }
        Ok(removed)
    }

    /// Snapshot of all values.
    #[must_use]
    pub fn values(&self) -> Vec<T> {
        self.lock().values().cloned().collect()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, T>> {
        // A poisoned lock only means another writer panicked mid-mutation;
        // the map itself is still a coherent snapshot
        self.inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(path: &std::path::Path, entries: &HashMap<String, T>) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(entries)?;
        std::fs::write(path, raw)?;
        Ok(())
    }
}
