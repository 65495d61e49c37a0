//! Error types for the CMS client.

use thiserror::Error;

/// Result type for CMS operations.
pub type CmsResult<T> = Result<T, CmsError>;

/// Errors that can occur in CMS operations.
#[derive(Debug, Error)]
pub enum CmsError {
    /// Network error talking to the CMS service.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration, raised at construction.
    #[error("configuration error: {0}")]
    Configuration(String),
}
