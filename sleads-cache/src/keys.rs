//! Cache key derivation.
//!
//! Key strings follow the persistence contract of the CMS backend, so a
//! host migrating from another client keeps its warm cache.

use sleads_types::FetchKey;

/// Key for the raw field set of one page + split variant.
#[must_use]
pub fn fields_key(project_id: &str, fetch_key: &FetchKey) -> String {
    format!("sleads_cms_fields_{project_id}_{fetch_key}")
}

/// Key for the project's language list.
#[must_use]
pub fn languages_key(project_id: &str) -> String {
    format!("sleads_cms_languages_{project_id}")
}
