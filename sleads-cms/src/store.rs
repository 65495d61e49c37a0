//! Live field collection state.
//!
//! Tracks the fields currently backing the page, which ids UI call sites
//! have requested, and where the refresh and registration cycles stand.
//! Mutation arrives from async completion callbacks; the session
//! serializes access behind a lock.

use crate::api::RegisteredField;
use sleads_fields::merge;
use sleads_types::{FetchKey, Field, FieldValue};
use std::collections::HashSet;

/// Progress of the per-page registration check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistrationPhase {
    /// No check has run for the current page.
    #[default]
    Idle,
    /// The delayed check is armed.
    Scheduled,
    /// The check ran; any POST it made did not complete.
    Attempted,
    /// The backend acknowledged the field list.
    Completed,
}

/// Holds the current field collection and its bookkeeping.
#[derive(Debug, Default)]
pub struct FieldStore {
    /// `None` until the first merge or lookup, mirroring a page with no
    /// content yet.
    fields: Option<Vec<Field>>,
    /// Ids that have been requested by a lookup at least once.
    initialized: HashSet<String>,
    /// Key of the page whose refresh cycle is in flight or most recent.
    current_key: Option<FetchKey>,
    /// Page path backing `current_key`, kept for registration.
    current_page: String,
    /// Key whose network refresh completed; the de-duplication anchor.
    last_completed_key: Option<FetchKey>,
    registration: RegistrationPhase,
}

impl FieldStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current collection, if any field has been seen.
    #[must_use]
    pub fn fields(&self) -> Option<&[Field]> {
        self.fields.as_deref()
    }

    /// Returns true while no field has been seen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.as_ref().is_none_or(|f| f.is_empty())
    }

    /// Ids currently in the collection, in first-seen order.
    #[must_use]
    pub fn field_ids(&self) -> Vec<String> {
        self.fields
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|f| f.id.clone())
            .collect()
    }

    /// Returns true when a lookup has requested `id` at least once.
    #[must_use]
    pub fn is_initialized(&self, id: &str) -> bool {
        self.initialized.contains(id)
    }

    /// The page path of the current refresh cycle.
    #[must_use]
    pub fn current_page(&self) -> &str {
        &self.current_page
    }

    /// The `{id, value}` list reported during registration.
    #[must_use]
    pub fn registered_fields(&self) -> Vec<RegisteredField> {
        self.fields
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|f| RegisteredField {
                id: f.id.clone(),
                value: f.value.clone(),
            })
            .collect()
    }

    // ── Refresh cycle ────────────────────────────────────────────

    /// Starts a refresh cycle for `key`.
    ///
    /// Returns false when the key's refresh already completed and nothing
    /// needs to run. A page-identity change re-arms registration.
    pub fn begin_refresh(&mut self, key: &FetchKey, page: &str) -> bool {
        if self.last_completed_key.as_ref() == Some(key) {
            return false;
        }
        if self.current_key.as_ref() != Some(key) {
            self.registration = RegistrationPhase::Idle;
        }
        self.current_key = Some(key.clone());
        self.current_page = page.to_string();
        true
    }

    /// Returns true while `key` is the cycle a network response may merge
    /// into. Responses for superseded keys are dropped by the caller.
    #[must_use]
    pub fn is_current(&self, key: &FetchKey) -> bool {
        self.current_key.as_ref() == Some(key)
    }

    /// Records that `key`'s network refresh completed.
    pub fn complete_refresh(&mut self, key: &FetchKey) {
        self.last_completed_key = Some(key.clone());
    }

    /// Reconciles freshly transformed fields into the collection.
    pub fn merge_incoming(&mut self, incoming: Vec<Field>) {
        self.fields = Some(merge(self.fields.take(), incoming));
    }

    // ── Registration ─────────────────────────────────────────────

    /// Where the registration check stands for the current page.
    #[must_use]
    pub fn registration_phase(&self) -> RegistrationPhase {
        self.registration
    }

    /// Moves the registration check to `phase`.
    pub fn set_registration(&mut self, phase: RegistrationPhase) {
        self.registration = phase;
    }

    // ── Lookup ───────────────────────────────────────────────────

    /// Resolves the display value for `id`, synthesizing a placeholder
    /// when the collection has no entry yet.
    ///
    /// Resolution order for a known field: non-empty localized variant for
    /// `language`, then the field's own default, then the caller's.
    /// Unknown ids append a placeholder (never a duplicate) and return the
    /// caller's default unchanged.
    pub fn lookup(&mut self, id: &str, default: FieldValue, language: &str) -> FieldValue {
        self.initialized.insert(id.to_string());

        let existing = self
            .fields
            .as_ref()
            .and_then(|fields| fields.iter().find(|f| f.id == id));
        if let Some(existing) = existing {
            if !language.is_empty() {
                if let Some(localized) = existing.localized(language) {
                    if !localized.is_empty() {
                        return FieldValue::String(localized.to_string());
                    }
                }
            }
            return existing
                .default_value
                .clone()
                .map(FieldValue::String)
                .unwrap_or(default);
        }

        let placeholder = Field::placeholder(id, default.clone());
        match self.fields.as_mut() {
            None => self.fields = Some(vec![placeholder]),
            // an async merge may have raced the placeholder in already
            Some(fields) => {
                if !fields.iter().any(|f| f.id == id) {
                    fields.push(placeholder);
                }
            }
        }
        default
    }
}
