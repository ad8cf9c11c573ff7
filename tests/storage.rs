//! Persistence tests over real temporary files.

use chrono::Utc;
use sleepbunny::storage::{JsonStore, PersistedDocument, FEED_HISTORY_CAP};

fn store_in(dir: &tempfile::TempDir) -> JsonStore {
    JsonStore::open(dir.path().join("sleepbunny.json")).unwrap()
}

#[test]
fn load_returns_none_before_the_first_save() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    assert!(store.load().is_none());
    assert_eq!(store.storage_size(), 0);
}

#[test]
fn saved_documents_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let mut doc = PersistedDocument::default();
    doc.user_profile.name = "지민".to_string();
    doc.record_feed("carrot", Utc::now());
    store.save(&doc).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded, doc);
    assert!(store.storage_size() > 0);
}

#[test]
fn malformed_files_load_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    std::fs::write(store.path(), "{not json at all").unwrap();
    assert!(store.load().is_none());

    // A save recovers the file.
    store.save(&PersistedDocument::default()).unwrap();
    assert!(store.load().is_some());
}

#[test]
fn feed_statistics_accumulate_across_updates() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    for food in ["carrot", "carrot", "apple"] {
        store
            .update(|doc| doc.record_feed(food, Utc::now()))
            .unwrap();
    }

    let doc = store.load().unwrap();
    assert_eq!(doc.statistics.total_feeds, 3);
    assert_eq!(doc.statistics.feed_details["carrot"], 2);
    assert_eq!(doc.statistics.feed_details["apple"], 1);
    assert_eq!(doc.feed_history.len(), 3);
}

#[test]
fn feed_history_cap_survives_persistence() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    for i in 0..40 {
        store
            .update(|doc| doc.record_feed(&format!("food-{i}"), Utc::now()))
            .unwrap();
    }

    let doc = store.load().unwrap();
    assert_eq!(doc.feed_history.len(), FEED_HISTORY_CAP);
    assert_eq!(doc.feed_history[0].food, "food-10");
    assert_eq!(doc.feed_history.last().unwrap().food, "food-39");
    assert_eq!(doc.statistics.total_feeds, 40);
}

#[test]
fn import_of_a_malformed_backup_leaves_the_document_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store
        .update(|doc| doc.user_profile.name = "지민".to_string())
        .unwrap();

    assert!(store.import("{\"version\": \"not a number\"}").is_err());
    assert!(store.import("garbage").is_err());

    let doc = store.load().unwrap();
    assert_eq!(doc.user_profile.name, "지민");
}

#[test]
fn export_then_import_restores_the_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store
        .update(|doc| {
            doc.user_profile.name = "지민".to_string();
            doc.record_feed("carrot", Utc::now());
            doc.record_sound_play("빗소리", Utc::now());
        })
        .unwrap();
    let backup = store.export().unwrap();
    let original = store.load().unwrap();

    store.reset().unwrap();
    assert!(store.load().is_none());

    store.import(&backup).unwrap();
    assert_eq!(store.load().unwrap(), original);
}

#[test]
fn reset_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store.reset().unwrap();
    store.save(&PersistedDocument::default()).unwrap();
    store.reset().unwrap();
    store.reset().unwrap();
    assert!(store.load().is_none());
}

#[test]
fn documents_from_older_builds_fill_in_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    // A minimal document missing most sections.
    std::fs::write(
        store.path(),
        r#"{"userProfile": {"name": "지민"}, "statistics": {"totalFeeds": 7}}"#,
    )
    .unwrap();

    let doc = store.load().unwrap();
    assert_eq!(doc.user_profile.name, "지민");
    assert_eq!(doc.statistics.total_feeds, 7);
    assert_eq!(doc.settings.volume, 0.7);
    assert_eq!(doc.sound_settings.preferred_timer, 30);
    assert!(doc.feed_history.is_empty());
}

#[test]
fn initialize_session_counts_app_opens() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store.initialize_session().unwrap();
    let doc = store.initialize_session().unwrap();
    assert_eq!(doc.statistics.app_open_count, 2);
}
