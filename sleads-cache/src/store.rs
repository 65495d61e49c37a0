//! The TTL cache store.

use crate::backend::CacheBackend;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// How long a cached entry stays valid.
pub const CACHE_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// The `{ data, timestamp }` envelope every entry is stored in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// The cached payload.
    pub data: T,
    /// Write time, milliseconds since Unix epoch.
    pub timestamp: u64,
}

/// Time-expiring cache over a pluggable backend.
///
/// Both directions fail soft: a corrupt, missing or expired entry reads as
/// absent, a refused write is logged and dropped. The rendering path never
/// sees a cache error.
#[derive(Clone)]
pub struct CacheStore {
    backend: Arc<dyn CacheBackend>,
    ttl: Duration,
}

impl CacheStore {
    /// Creates a store with the standard 30-day TTL.
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self::with_ttl(backend, CACHE_TTL)
    }

    /// Creates a store with an explicit TTL.
    pub fn with_ttl(backend: Arc<dyn CacheBackend>, ttl: Duration) -> Self {
        Self { backend, ttl }
    }

    /// Reads and unwraps the entry for `key`.
    ///
    /// Returns `None` on a missing key, a deserialization failure or an
    /// expired entry; expired entries are deleted from the backend on the
    /// spot.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.backend.get(key)?;
        let entry: CacheEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("discarding unreadable cache entry {key}: {e}");
                return None;
            }
        };
        let age = now_millis().saturating_sub(entry.timestamp);
        if age > self.ttl.as_millis() as u64 {
            debug!("cache entry {key} expired ({age} ms old), deleting");
            self.backend.remove(key);
            return None;
        }
        Some(entry.data)
    }

    /// Writes `data` under `key` with the current timestamp.
    pub fn write<T: Serialize>(&self, key: &str, data: &T) {
        let entry = CacheEntry {
            data,
            timestamp: now_millis(),
        };
        let raw = match serde_json::to_string(&entry) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("failed to serialize cache entry {key}: {e}");
                return;
            }
        };
        if !self.backend.set(key, &raw) {
            warn!("cache backend refused write for {key}");
        }
    }

    /// Removes the entry for `key`.
    pub fn remove(&self, key: &str) {
        self.backend.remove(key);
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before Unix epoch")
        .as_millis() as u64
}
