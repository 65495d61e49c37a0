//! The CMS session: orchestration over cache, network and store.

use crate::api::CmsApi;
use crate::config::CmsConfig;
use crate::error::CmsResult;
use crate::language::LanguageProvider;
use crate::notify::{Notice, Notifier, TracingNotifier};
use crate::store::{FieldStore, RegistrationPhase};
use sleads_cache::{fields_key, CacheStore, MemoryBackend};
use sleads_fields::transform;
use sleads_types::{FetchKey, FetchedField, FieldValue};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use tracing::{debug, warn};

/// One CMS integration: fetches per-page fields, caches them, merges
/// refreshes and answers lookups.
///
/// Cloning is cheap and every clone shares the same state, so a clone can
/// be handed to background tasks or other parts of the host.
#[derive(Clone)]
pub struct CmsSession {
    config: CmsConfig,
    api: CmsApi,
    cache: CacheStore,
    languages: Arc<dyn LanguageProvider>,
    notifier: Arc<dyn Notifier>,
    store: Arc<RwLock<FieldStore>>,
}

impl CmsSession {
    /// Creates a session with an in-memory cache and the logging notifier.
    pub fn new(config: CmsConfig, languages: Arc<dyn LanguageProvider>) -> CmsResult<Self> {
        Self::with_parts(
            config,
            CacheStore::new(Arc::new(MemoryBackend::new())),
            languages,
            Arc::new(TracingNotifier),
        )
    }

    /// Creates a session with explicit cache and notifier collaborators.
    pub fn with_parts(
        config: CmsConfig,
        cache: CacheStore,
        languages: Arc<dyn LanguageProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> CmsResult<Self> {
        config.validate()?;
        let api = CmsApi::new(&config);
        Ok(Self {
            config,
            api,
            cache,
            languages,
            notifier,
            store: Arc::new(RwLock::new(FieldStore::new())),
        })
    }

    // ── Refresh cycle ────────────────────────────────────────────

    /// Drives one fetch cycle for a page + optional split variant.
    ///
    /// Cached content for the page is applied immediately when present,
    /// then the network refresh is merged on top. Calling again for an
    /// already-completed key is a no-op. A network failure leaves the
    /// collection as it was and the key retriable; nothing is surfaced to
    /// end users beyond the returned error.
    pub async fn refresh(&self, page: &str, split_id: Option<&str>) -> CmsResult<()> {
        let fetch_key = FetchKey::new(page, split_id);
        if !self.store_mut().begin_refresh(&fetch_key, page) {
            debug!("fetch key {fetch_key} already completed, skipping");
            return Ok(());
        }

        let cache_key = fields_key(&self.config.project_id, &fetch_key);
        if self.config.context.is_client() {
            if let Some(cached) = self.cache.read::<Vec<FetchedField>>(&cache_key) {
                if !cached.is_empty() {
                    debug!("applying {} cached fields for {fetch_key}", cached.len());
                    self.apply(&cached);
                }
            }
        }

        let fetched = match self.api.get_fields(page, split_id).await {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!("field refresh failed for {fetch_key}: {e}");
                return Err(e);
            }
        };

        // a later navigation owns the store now; this response is stale
        if !self.store_ref().is_current(&fetch_key) {
            debug!("discarding response for superseded key {fetch_key}");
            return Ok(());
        }

        if !fetched.is_empty() {
            if self.config.context.is_client() {
                self.cache.write(&cache_key, &fetched);
            }
            self.apply(&fetched);
        }
        self.store_mut().complete_refresh(&fetch_key);

        self.schedule_registration();
        Ok(())
    }

    /// Transforms raw fields with the active language and merges them in.
    fn apply(&self, fetched: &[FetchedField]) {
        let language = self.languages.selected_language();
        let transformed = transform(fetched, &language);
        self.store_mut().merge_incoming(transformed);
    }

    // ── Lookup ───────────────────────────────────────────────────

    /// Looks up the display value for `id`, falling back to `default`.
    ///
    /// Unknown ids are recorded as placeholders so an authoring session
    /// can register every field the page actually renders.
    pub fn c(&self, id: &str, default: impl Into<FieldValue>) -> FieldValue {
        let language = self.languages.selected_language();
        self.store_mut().lookup(id, default.into(), &language)
    }

    /// Ids currently in the collection, in first-seen order.
    #[must_use]
    pub fn field_ids(&self) -> Vec<String> {
        self.store_ref().field_ids()
    }

    /// Emits a debug snapshot of the ids currently in the collection.
    pub fn show_fields(&self) {
        self.notifier.notify(Notice::FieldsSnapshot {
            ids: self.field_ids(),
        });
    }

    // ── Registration ─────────────────────────────────────────────

    /// Asks the backend whether an authoring session is listening.
    ///
    /// Emits [`Notice::ListeningModeActive`] when it is.
    pub async fn listening_mode(&self) -> CmsResult<bool> {
        let listening = self.api.listening_mode().await?;
        if listening {
            self.notifier.notify(Notice::ListeningModeActive);
        }
        Ok(listening)
    }

    /// Where the registration check stands for the current page.
    #[must_use]
    pub fn registration_phase(&self) -> RegistrationPhase {
        self.store_ref().registration_phase()
    }

    /// Arms the one-shot registration check for the current page.
    ///
    /// Inert outside authoring client sessions, while the collection is
    /// empty, and once a check has already run for this page identity.
    fn schedule_registration(&self) {
        if !self.config.authoring || !self.config.context.is_client() {
            return;
        }
        {
            let mut store = self.store_mut();
            if store.is_empty() || store.registration_phase() != RegistrationPhase::Idle {
                return;
            }
            store.set_registration(RegistrationPhase::Scheduled);
        }
        let session = self.clone();
        let delay = Duration::from_millis(self.config.registration_delay_ms);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            session.run_registration().await;
        });
    }

    /// The delayed registration check: probe listening mode, then report
    /// the rendered fields when the backend wants them.
    ///
    /// A probe failure re-arms the check; everything else consumes the
    /// page's single attempt.
    async fn run_registration(&self) {
        let listening = match self.listening_mode().await {
            Ok(listening) => listening,
            Err(e) => {
                warn!("listening-mode probe failed: {e}");
                self.store_mut().set_registration(RegistrationPhase::Idle);
                return;
            }
        };

        let Some(api_key) = self.config.api_key.clone() else {
            self.store_mut().set_registration(RegistrationPhase::Attempted);
            return;
        };
        if !listening {
            self.store_mut().set_registration(RegistrationPhase::Attempted);
            return;
        }

        let (page, fields) = {
            let mut store = self.store_mut();
            if store.is_empty() {
                store.set_registration(RegistrationPhase::Attempted);
                return;
            }
            store.set_registration(RegistrationPhase::Attempted);
            (store.current_page().to_string(), store.registered_fields())
        };

        match self.api.register_fields(&page, &fields, &api_key).await {
            Ok(true) => {
                self.store_mut().set_registration(RegistrationPhase::Completed);
                self.notifier.notify(Notice::FieldsRegistered);
            }
            Ok(false) => self.notifier.notify(Notice::RegistrationFailed {
                reason: "backend rejected the field list".to_string(),
            }),
            Err(e) => self.notifier.notify(Notice::RegistrationFailed {
                reason: e.to_string(),
            }),
        }
    }

    // ── Language pass-through ────────────────────────────────────

    /// Language codes available to the project.
    #[must_use]
    pub fn languages(&self) -> Vec<String> {
        self.languages.languages()
    }

    /// The currently selected language code.
    #[must_use]
    pub fn selected_language(&self) -> String {
        self.languages.selected_language()
    }

    /// Whether the language list is still being loaded.
    #[must_use]
    pub fn is_loading_languages(&self) -> bool {
        self.languages.is_loading()
    }

    /// Switches the active language.
    pub fn set_language(&self, language: &str) {
        self.languages.set_language(language);
    }

    // ── Locking helpers ──────────────────────────────────────────

    fn store_ref(&self) -> RwLockReadGuard<'_, FieldStore> {
        self.store.read().expect("field store lock poisoned")
    }

    fn store_mut(&self) -> RwLockWriteGuard<'_, FieldStore> {
        self.store.write().expect("field store lock poisoned")
    }
}
