//! # Key-Value Storage
//!
//! The string-valued key-value store the cart and auth stores persist into,
//! standing in for browser local storage.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    KeyValueStorage implementations                      │
//! │                                                                         │
//! │  ┌──────────────────────────┐   ┌───────────────────────────────────┐  │
//! │  │     MemoryStorage        │   │         FileStorage               │  │
//! │  │                          │   │                                   │  │
//! │  │  Arc<Mutex<HashMap>>     │   │  <data_dir>/<key>.json            │  │
//! │  │  clones share one map    │   │  one file per key                 │  │
//! │  │  tests, embedding        │   │  shopper-cli                      │  │
//! │  └──────────────────────────┘   └───────────────────────────────────┘  │
//! │                                                                         │
//! │  Missing key  → Ok(None)                                                │
//! │  Remove missing key → Ok(())                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{StorageError, StorageResult};

// =============================================================================
// Trait
// =============================================================================

/// A string-valued key-value store.
///
/// Methods take `&self`; backends that mutate shared state use interior
/// mutability.
pub trait KeyValueStorage {
    /// Returns the value for `key`, or `None` when absent.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Deletes `key`. Deleting an absent key succeeds.
    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Arc<S> {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        (**self).remove_item(key)
    }
}

/// Reads and decodes a JSON value.
pub fn read_json<T, S>(storage: &S, key: &str) -> StorageResult<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStorage + ?Sized,
{
    match storage.get_item(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encodes and writes a JSON value.
pub fn write_json<T, S>(storage: &S, key: &str, value: &T) -> StorageResult<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStorage + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    storage.set_item(key, &raw)
}

// =============================================================================
// In-Memory Backend
// =============================================================================

/// Process-local storage.
///
/// Clones share the same map, so two stores built from clones of one
/// `MemoryStorage` see each other's writes (like two tabs on one origin).
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let items = self.items.lock().map_err(|_| StorageError::LockPoisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut items = self.items.lock().map_err(|_| StorageError::LockPoisoned)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        let mut items = self.items.lock().map_err(|_| StorageError::LockPoisoned)?;
        items.remove(key);
        Ok(())
    }
}

// =============================================================================
// File Backend
// =============================================================================

/// Storage backed by one JSON file per key inside a directory.
///
/// ## Example
/// ```rust,no_run
/// use ateliux_store::{FileStorage, KeyValueStorage};
///
/// let storage = FileStorage::new("/tmp/ateliux");
/// storage.set_item("greeting", "\"hello\"").unwrap();
/// assert_eq!(storage.get_item("greeting").unwrap().as_deref(), Some("\"hello\""));
/// ```
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a backend rooted at `dir`. The directory is created lazily
    /// on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::Unavailable(format!("invalid storage key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(&path, value)?;
        debug!(?path, bytes = value.len(), "Storage item written");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
