//! Error types for the cache layer.

use thiserror::Error;

/// Result type for cache setup operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors that can occur while setting up a cache backend.
///
/// Runtime read/write failures never surface here; the store recovers
/// from them locally and reports a miss.
#[derive(Debug, Error)]
pub enum CacheError {
    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
