//! Fetch key derivation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Deterministic key scoping one page path plus an optional split variant.
///
/// The same key strings both the fields cache entry and the refresh
/// de-duplication state, so deriving it in one place keeps them aligned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FetchKey(String);

impl FetchKey {
    /// Derives the key for a page path and optional split id.
    ///
    /// A missing or empty split id collapses to the `"default"` variant.
    #[must_use]
    pub fn new(page: &str, split_id: Option<&str>) -> Self {
        let split = match split_id {
            Some(s) if !s.is_empty() => s,
            _ => "default",
        };
        Self(format!("{page}-{split}"))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FetchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
