//! Field transformation.

use sleads_types::{FetchedField, Field};

/// Language used when the caller has no selection yet.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Resolves fetched fields into display-ready records for `language`.
///
/// The resolved value is the localized variant when one is present and
/// non-null, otherwise the authored default. An empty `language` falls
/// back to [`DEFAULT_LANGUAGE`].
#[must_use]
pub fn transform(fetched: &[FetchedField], language: &str) -> Vec<Field> {
    let language = if language.is_empty() {
        DEFAULT_LANGUAGE
    } else {
        language
    };
    fetched
        .iter()
        .map(|field| {
            let value = match field.values.get(language) {
                Some(Some(v)) => serde_json::Value::String(v.clone()),
                _ => serde_json::Value::String(field.default_value.clone()),
            };
            Field {
                id: field.key.clone(),
                value,
                default_value: Some(field.default_value.clone()),
                values: Some(field.values.clone()),
            }
        })
        .collect()
}
