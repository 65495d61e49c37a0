//! Time-expiring local cache for the Sleads CMS client.
//!
//! Persists the last-known raw field set per page so a revisit renders
//! CMS content before the network refresh lands.
//!
//! # Architecture
//!
//! - [`CacheBackend`] abstracts the key-value medium (in-memory, files)
//! - [`CacheStore`] wraps a backend with the `{ data, timestamp }`
//!   envelope and the 30-day TTL
//! - Reads and writes fail soft: errors are logged and treated as a miss,
//!   never propagated to the rendering path
//! - Expired entries are deleted eagerly on read; there is no eviction
//!   beyond the TTL and no capacity bound of its own

mod backend;
mod error;
mod keys;
mod store;

pub use backend::{CacheBackend, FileBackend, MemoryBackend};
pub use error::{CacheError, CacheResult};
pub use keys::{fields_key, languages_key};
pub use store::{CacheEntry, CacheStore, CACHE_TTL};
