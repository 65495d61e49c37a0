mod common;

use common::RecordingNotifier;
use pretty_assertions::assert_eq;
use serde_json::json;
use sleads_cache::{fields_key, CacheEntry, CacheStore, MemoryBackend};
use sleads_cms::{CmsConfig, CmsSession, Notice, RuntimeContext, StaticLanguages};
use sleads_types::FetchKey;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> CmsConfig {
    CmsConfig {
        base_url: server.uri(),
        project_id: "proj_1".to_string(),
        ..Default::default()
    }
}

fn session(server: &MockServer) -> CmsSession {
    CmsSession::new(config(server), Arc::new(StaticLanguages::default())).unwrap()
}

fn title_body() -> serde_json::Value {
    json!({
        "fields": [{
            "fieldId": "f_1",
            "key": "title",
            "defaultValue": "Hi",
            "values": { "en": "Hello", "de": "Hallo" }
        }]
    })
}

// ── Construction ──────────────────────────────────────────────────

#[test]
fn empty_project_id_is_a_configuration_error() {
    let config = CmsConfig::default();
    let result = CmsSession::new(config, Arc::new(StaticLanguages::default()));
    assert!(matches!(
        result,
        Err(sleads_cms::CmsError::Configuration(_))
    ));
}

#[test]
fn empty_base_url_is_a_configuration_error() {
    let config = CmsConfig {
        base_url: String::new(),
        project_id: "proj_1".to_string(),
        ..Default::default()
    };
    assert!(CmsSession::new(config, Arc::new(StaticLanguages::default())).is_err());
}

// ── First access ──────────────────────────────────────────────────

#[tokio::test]
async fn first_access_resolves_localized_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cms/get-fields/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(title_body()))
        .mount(&server)
        .await;

    let session = session(&server);
    session.refresh("/home", None).await.unwrap();
    assert_eq!(session.c("title", "Hi"), "Hello");
}

#[tokio::test]
async fn lookup_before_any_refresh_returns_default() {
    let server = MockServer::start().await;
    let session = session(&server);
    assert_eq!(session.c("title", "Hi"), "Hi");
    assert_eq!(session.field_ids(), vec!["title"]);
}

// ── De-duplication ────────────────────────────────────────────────

#[tokio::test]
async fn completed_key_is_not_refetched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cms/get-fields/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(title_body()))
        .expect(1)
        .mount(&server)
        .await;

    let session = session(&server);
    session.refresh("/home", None).await.unwrap();
    session.refresh("/home", None).await.unwrap();
}

#[tokio::test]
async fn empty_success_still_records_completion() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cms/get-fields/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "fields": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let session = session(&server);
    session.refresh("/home", None).await.unwrap();
    session.refresh("/home", None).await.unwrap();
}

#[tokio::test]
async fn different_split_is_a_separate_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cms/get-fields/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(title_body()))
        .expect(2)
        .mount(&server)
        .await;

    let session = session(&server);
    session.refresh("/home", None).await.unwrap();
    session.refresh("/home", Some("b")).await.unwrap();
}

// ── Cache interplay ───────────────────────────────────────────────

#[tokio::test]
async fn refresh_persists_fields_to_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cms/get-fields/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(title_body()))
        .mount(&server)
        .await;

    let cache = CacheStore::new(Arc::new(MemoryBackend::new()));
    let session = CmsSession::with_parts(
        config(&server),
        cache.clone(),
        Arc::new(StaticLanguages::default()),
        Arc::new(RecordingNotifier::new()),
    )
    .unwrap();

    session.refresh("/home", None).await.unwrap();

    let key = fields_key("proj_1", &FetchKey::new("/home", None));
    let cached: Option<Vec<sleads_types::FetchedField>> = cache.read(&key);
    assert_eq!(cached.unwrap()[0].key, "title");
}

#[tokio::test]
async fn cached_fields_survive_a_failing_network_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cms/get-fields/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let backend = Arc::new(MemoryBackend::new());
    let cache = CacheStore::new(backend.clone());
    let key = fields_key("proj_1", &FetchKey::new("/home", None));
    let fetched: Vec<sleads_types::FetchedField> =
        serde_json::from_value(title_body()["fields"].clone()).unwrap();
    cache.write(&key, &fetched);

    let session = CmsSession::with_parts(
        config(&server),
        cache,
        Arc::new(StaticLanguages::default()),
        Arc::new(RecordingNotifier::new()),
    )
    .unwrap();

    let result = session.refresh("/home", None).await;
    assert!(result.is_err());
    // cache-derived content still renders
    assert_eq!(session.c("title", "Hi"), "Hello");
}

#[tokio::test]
async fn failed_refresh_stays_retriable() {
    let server = MockServer::start().await;
    {
        let _failing = Mock::given(method("GET"))
            .and(path("/cms/get-fields/"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .up_to_n_times(1)
            .expect(1)
            .mount_as_scoped(&server)
            .await;

        let session = session(&server);
        assert!(session.refresh("/home", None).await.is_err());

        Mock::given(method("GET"))
            .and(path("/cms/get-fields/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(title_body()))
            .expect(1)
            .mount(&server)
            .await;

        session.refresh("/home", None).await.unwrap();
        assert_eq!(session.c("title", "Hi"), "Hello");
    }
}

#[tokio::test]
async fn server_context_skips_the_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cms/get-fields/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "fields": [] })))
        .mount(&server)
        .await;

    let backend = Arc::new(MemoryBackend::new());
    let cache = CacheStore::new(backend.clone());
    let key = fields_key("proj_1", &FetchKey::new("/home", None));
    let fetched: Vec<sleads_types::FetchedField> =
        serde_json::from_value(title_body()["fields"].clone()).unwrap();
    cache.write(&key, &fetched);

    let config = CmsConfig {
        context: RuntimeContext::Server,
        ..config(&server)
    };
    let session = CmsSession::with_parts(
        config,
        cache,
        Arc::new(StaticLanguages::default()),
        Arc::new(RecordingNotifier::new()),
    )
    .unwrap();

    session.refresh("/home", None).await.unwrap();
    // the warm cache was never applied
    assert_eq!(session.c("title", "Hi"), "Hi");
}

#[tokio::test]
async fn expired_cache_entry_is_ignored_and_deleted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cms/get-fields/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "fields": [] })))
        .mount(&server)
        .await;

    let backend = Arc::new(MemoryBackend::new());
    let key = fields_key("proj_1", &FetchKey::new("/home", None));
    let thirty_one_days_ago = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
        - Duration::from_secs(31 * 24 * 60 * 60).as_millis() as u64;
    let entry = CacheEntry {
        data: serde_json::from_value::<Vec<sleads_types::FetchedField>>(
            title_body()["fields"].clone(),
        )
        .unwrap(),
        timestamp: thirty_one_days_ago,
    };
    use sleads_cache::CacheBackend;
    backend.set(&key, &serde_json::to_string(&entry).unwrap());

    let session = CmsSession::with_parts(
        config(&server),
        CacheStore::new(backend.clone()),
        Arc::new(StaticLanguages::default()),
        Arc::new(RecordingNotifier::new()),
    )
    .unwrap();

    session.refresh("/home", None).await.unwrap();
    assert_eq!(session.c("title", "Hi"), "Hi");
    assert!(backend.get(&key).is_none());
}

// ── Stale responses ───────────────────────────────────────────────

#[tokio::test]
async fn slow_response_for_superseded_key_is_discarded() {
    common::init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cms/get-fields/"))
        .and(query_param("pageId", "/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "fields": [{
                        "fieldId": "f_s",
                        "key": "slow_field",
                        "defaultValue": "stale",
                        "values": { "en": "stale" }
                    }]
                }))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cms/get-fields/"))
        .and(query_param("pageId", "/fast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(title_body()))
        .mount(&server)
        .await;

    let session = session(&server);
    let slow = session.refresh("/slow", None);
    let fast = session.refresh("/fast", None);
    let (slow_result, fast_result) = tokio::join!(slow, fast);
    slow_result.unwrap();
    fast_result.unwrap();

    // the stale /slow payload never reached the collection
    assert_eq!(session.c("slow_field", "fresh"), "fresh");
    assert_eq!(session.c("title", "Hi"), "Hello");
}

// ── Language handling ─────────────────────────────────────────────

#[tokio::test]
async fn language_switch_changes_lookup_resolution() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cms/get-fields/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(title_body()))
        .mount(&server)
        .await;

    let languages = Arc::new(StaticLanguages::new(vec![
        "en".to_string(),
        "de".to_string(),
    ]));
    let session = CmsSession::with_parts(
        config(&server),
        CacheStore::new(Arc::new(MemoryBackend::new())),
        languages,
        Arc::new(RecordingNotifier::new()),
    )
    .unwrap();

    session.refresh("/home", None).await.unwrap();
    assert_eq!(session.c("title", "Hi"), "Hello");
    session.set_language("de");
    assert_eq!(session.c("title", "Hi"), "Hallo");
}

#[test]
fn language_controls_pass_through() {
    let languages = Arc::new(StaticLanguages::new(vec![
        "en".to_string(),
        "de".to_string(),
    ]));
    let config = CmsConfig {
        project_id: "proj_1".to_string(),
        ..Default::default()
    };
    let session = CmsSession::new(config, languages).unwrap();

    assert_eq!(session.languages(), vec!["en", "de"]);
    assert_eq!(session.selected_language(), "en");
    assert!(!session.is_loading_languages());
    session.set_language("de");
    assert_eq!(session.selected_language(), "de");
    // unknown codes are ignored
    session.set_language("fr");
    assert_eq!(session.selected_language(), "de");
}

// ── Debug surface ─────────────────────────────────────────────────

#[tokio::test]
async fn show_fields_snapshots_current_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cms/get-fields/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(title_body()))
        .mount(&server)
        .await;

    let notifier = Arc::new(RecordingNotifier::new());
    let session = CmsSession::with_parts(
        config(&server),
        CacheStore::new(Arc::new(MemoryBackend::new())),
        Arc::new(StaticLanguages::default()),
        notifier.clone(),
    )
    .unwrap();

    session.refresh("/home", None).await.unwrap();
    session.show_fields();

    assert_eq!(
        notifier.notices(),
        vec![Notice::FieldsSnapshot {
            ids: vec!["title".to_string()]
        }]
    );
}
