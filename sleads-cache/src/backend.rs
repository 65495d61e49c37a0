//! Cache backends.
//!
//! A backend is a plain string key-value medium. It knows nothing about
//! TTLs or envelopes; that logic lives in [`CacheStore`](crate::CacheStore).

use crate::error::CacheResult;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::{debug, warn};

/// Abstract key-value medium behind the cache.
pub trait CacheBackend: Send + Sync {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`. Returns false when the medium refused
    /// the write (quota, IO); callers treat that as a soft failure.
    fn set(&self, key: &str, value: &str) -> bool;

    /// Removes the entry for `key`, if present.
    fn remove(&self, key: &str);
}

/// In-memory backend. The default for server contexts and tests.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Creates an empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().expect("cache lock poisoned").get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .write()
            .expect("cache lock poisoned")
            .insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&self, key: &str) {
        self.entries.write().expect("cache lock poisoned").remove(key);
    }
}

/// File-backed backend: one file per key under a root directory.
#[derive(Debug)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Creates a file backend rooted at `root`, creating the directory if
    /// needed.
    pub fn new(root: impl Into<PathBuf>) -> CacheResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Maps a cache key to a file path. Keys contain page paths, so the
    /// readable part is sanitized and a hash keeps distinct keys distinct.
    fn path_for(&self, key: &str) -> PathBuf {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        let readable: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .take(80)
            .collect();
        self.root.join(format!("{readable}-{:x}.json", hasher.finish()))
    }
}

impl CacheBackend for FileBackend {
    fn get(&self, key: &str) -> Option<String> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("cache read failed for {key}: {e}");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> bool {
        if let Err(e) = std::fs::write(self.path_for(key), value) {
            warn!("cache write failed for {key}: {e}");
            return false;
        }
        true
    }

    fn remove(&self, key: &str) {
        let path = self.path_for(key);
        if let Err(e) = std::fs::remove_file(&path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                debug!("cache remove failed for {key}: {e}");
            }
        }
    }
}
