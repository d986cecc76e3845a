//! Local photo cache.
//!
//! Mirrors the last known album in a single string-keyed slot so the book can
//! be drawn before the remote listing arrives. Corrupt or missing data reads
//! as an empty album; it is never fatal.

use std::collections::HashMap;

use crate::model::PhotoRecord;

/// Errors from a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// I/O error on the file backend
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Storage error (localStorage in WASM)
    #[error("Storage error: {0}")]
    Storage(String),
}

/// A string-keyed persistent slot store.
pub trait StorageBackend {
    /// Read a slot. `Ok(None)` means the slot has never been written.
    fn read(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Overwrite a slot.
    fn write(&mut self, key: &str, value: &str) -> Result<(), CacheError>;
}

impl<S: StorageBackend + ?Sized> StorageBackend for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>, CacheError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), CacheError> {
        (**self).write(key, value)
    }
}

/// In-memory backend, used in tests and when no persistent store is available.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
    writes: usize,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), CacheError> {
        self.slots.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// File backend: one `<key>.json` file per slot inside a directory.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStorage {
    /// Store slots under `dir` (created on first write).
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default cache directory (`<cache dir>/flipalbum`).
    pub fn default_dir() -> Option<std::path::PathBuf> {
        dirs::cache_dir().map(|dir| dir.join("flipalbum"))
    }

    fn slot_path(&self, key: &str) -> std::path::PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl StorageBackend for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, CacheError> {
        match std::fs::read_to_string(self.slot_path(key)) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), CacheError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.slot_path(key), value)?;
        Ok(())
    }
}

/// Browser localStorage backend (WASM only).
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, CacheError> {
        let window = web_sys::window()
            .ok_or_else(|| CacheError::Storage("No window object available".to_string()))?;
        window
            .local_storage()
            .map_err(|e| CacheError::Storage(format!("localStorage access error: {:?}", e)))?
            .ok_or_else(|| CacheError::Storage("localStorage not available".to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl StorageBackend for LocalStorage {
    fn read(&self, key: &str) -> Result<Option<String>, CacheError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| CacheError::Storage(format!("Failed to read localStorage: {:?}", e)))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), CacheError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| CacheError::Storage(format!("Failed to save to localStorage: {:?}", e)))
    }
}

/// Album cache over a storage backend.
pub struct LocalCache<S> {
    backend: S,
    key: String,
}

impl<S: StorageBackend> LocalCache<S> {
    /// Create a cache bound to one slot.
    pub fn new(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Slot name.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Access the backend.
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Read the cached album. Missing or corrupt data yields an empty list.
    pub fn load(&self) -> Vec<PhotoRecord> {
        let json = match self.backend.read(&self.key) {
            Ok(Some(json)) => json,
            Ok(None) => {
                log::debug!("No cached album under '{}'", self.key);
                return Vec::new();
            }
            Err(e) => {
                log::warn!("Failed to read album cache '{}': {}", self.key, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Option<Vec<PhotoRecord>>>(&json) {
            Ok(photos) => {
                let photos = photos.unwrap_or_default();
                log::debug!("Loaded {} cached photos", photos.len());
                photos
            }
            Err(e) => {
                log::warn!("Ignoring corrupt album cache '{}': {}", self.key, e);
                Vec::new()
            }
        }
    }

    /// Persist the album.
    pub fn store(&mut self, photos: &[PhotoRecord]) -> Result<(), CacheError> {
        let json = serde_json::to_string(photos)?;
        self.backend.write(&self.key, &json)?;
        log::debug!("Cached {} photos under '{}'", photos.len(), self.key);
        Ok(())
    }
}
