//! CMS field records.
//!
//! `FetchedField` is the wire shape returned by the CMS; `Field` is the
//! display-ready record after language resolution.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The resolved display value of a field.
///
/// CMS content is loosely typed (string, number, boolean or null), so the
/// open JSON value type is used rather than a closed enum.
pub type FieldValue = serde_json::Value;

/// Localized content variants, keyed by language code.
pub type LanguageValues = HashMap<String, Option<String>>;

/// A single piece of CMS-managed content, resolved for display.
///
/// Identity is `id`; a field collection never holds two fields with the
/// same id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Stable identifier UI call sites look the field up by.
    pub id: String,
    /// Resolved display value for the active language.
    pub value: FieldValue,
    /// Fallback shown when no localized variant applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// All localized variants, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<LanguageValues>,
}

impl Field {
    /// Creates a placeholder for a field the CMS has not delivered yet,
    /// carrying only a caller-supplied default.
    ///
    /// `default_value` is recorded only when the default is textual.
    #[must_use]
    pub fn placeholder(id: impl Into<String>, value: FieldValue) -> Self {
        let default_value = value.as_str().map(str::to_owned);
        Self {
            id: id.into(),
            value,
            default_value,
            values: None,
        }
    }

    /// Returns the localized variant for `language`, if present and non-null.
    #[must_use]
    pub fn localized(&self, language: &str) -> Option<&str> {
        self.values.as_ref()?.get(language)?.as_deref()
    }
}

/// A field as returned by the CMS fields endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchedField {
    /// Backend record identifier.
    pub field_id: String,
    /// Lookup key; becomes `Field::id` after transformation.
    pub key: String,
    /// Fallback value authored in the CMS.
    pub default_value: String,
    /// Localized variants keyed by language code.
    pub values: LanguageValues,
}
