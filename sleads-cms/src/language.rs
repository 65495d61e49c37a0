//! Language selection collaborator.

use std::sync::RwLock;

/// Contract the host's language context fulfills.
///
/// The session takes a provider at construction, so an integration cannot
/// exist without one.
pub trait LanguageProvider: Send + Sync {
    /// Language codes available to the project.
    fn languages(&self) -> Vec<String>;

    /// The currently selected language code.
    fn selected_language(&self) -> String;

    /// Whether the language list is still being loaded.
    fn is_loading(&self) -> bool;

    /// Switches the active language.
    fn set_language(&self, language: &str);
}

/// Fixed-list provider for hosts without a language context of their own.
pub struct StaticLanguages {
    languages: Vec<String>,
    selected: RwLock<String>,
}

impl StaticLanguages {
    /// Creates a provider over `languages`, selecting the first entry.
    #[must_use]
    pub fn new(languages: Vec<String>) -> Self {
        let selected = languages
            .first()
            .cloned()
            .unwrap_or_else(|| "en".to_string());
        Self {
            languages,
            selected: RwLock::new(selected),
        }
    }
}

impl Default for StaticLanguages {
    fn default() -> Self {
        Self::new(vec!["en".to_string()])
    }
}

impl LanguageProvider for StaticLanguages {
    fn languages(&self) -> Vec<String> {
        self.languages.clone()
    }

    fn selected_language(&self) -> String {
        self.selected.read().expect("language lock poisoned").clone()
    }

    fn is_loading(&self) -> bool {
        false
    }

    fn set_language(&self, language: &str) {
        if self.languages.iter().any(|l| l == language) {
            *self.selected.write().expect("language lock poisoned") = language.to_string();
        }
    }
}
