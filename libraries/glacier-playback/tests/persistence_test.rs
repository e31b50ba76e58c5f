//! Persistence tests: write-through and restore across sessions

use async_trait::async_trait;
use glacier_core::{
    DownloadQuality, GlacierError, KeyValueStore, NotificationSettings, PrivacySettings, Track,
};
use glacier_playback::{PlayerConfig, PlayerSession, StoreKey};
use glacier_storage::{MemoryStore, SqliteStore, StaticCatalog};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn create_test_track(id: &str) -> Track {
    Track::new(id, format!("Track {id}"))
        .with_artist("Test Artist")
        .with_duration("3:00")
}

fn session_over(store: Arc<dyn KeyValueStore>) -> PlayerSession {
    PlayerSession::new(PlayerConfig::default(), store, Arc::new(StaticCatalog::new())).unwrap()
}

/// Store that fails every call
#[derive(Default)]
struct FailingStore {
    calls: AtomicUsize,
}

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> glacier_core::Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GlacierError::storage("unavailable"))
    }

    async fn set(&self, _key: &str, _value: String) -> glacier_core::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GlacierError::storage("unavailable"))
    }
}

/// Populate every persisted key through the public surface
fn exercise(session: &PlayerSession) {
    session.toggle_favorite(&create_test_track("fav"));
    session.play_track(create_test_track("played"), None);
    session.add_to_downloads(create_test_track("dl")).unwrap();
    let playlist = session.create_playlist("Evening", vec![create_test_track("p1")]);
    session.add_to_playlist(&playlist.id, create_test_track("p2"));
    session.set_download_quality(DownloadQuality::High);
    session.activate_premium();
    session.set_notifications(NotificationSettings {
        new_releases: false,
        recommendations: true,
        reminders: true,
    });
    session.set_privacy_settings(PrivacySettings {
        analytics: false,
        save_history: true,
    });
}

#[tokio::test]
async fn changes_are_written_under_namespaced_keys() {
    let store = Arc::new(MemoryStore::new());
    let session = session_over(store.clone());
    exercise(&session);
    session.flush().await;

    let favorites: serde_json::Value =
        serde_json::from_str(&store.value("@glacier_favorites").unwrap()).unwrap();
    assert_eq!(favorites[0]["id"], "fav");
    assert_eq!(favorites[0]["artist"], "Test Artist");

    let history: serde_json::Value =
        serde_json::from_str(&store.value("@glacier_history").unwrap()).unwrap();
    assert_eq!(history[0]["id"], "played");
    assert!(history[0]["playedAt"].is_i64());

    let downloads: serde_json::Value =
        serde_json::from_str(&store.value("@glacier_downloads").unwrap()).unwrap();
    assert!(downloads[0]["downloadedAt"].is_i64());

    let playlists: serde_json::Value =
        serde_json::from_str(&store.value("@glacier_user_playlists").unwrap()).unwrap();
    assert_eq!(playlists[0]["title"], "Evening");
    assert_eq!(playlists[0]["tracks"], 2);
    assert_eq!(playlists[0]["trackList"].as_array().unwrap().len(), 2);

    assert_eq!(store.value("@glacier_download_quality").as_deref(), Some("\"high\""));
    assert_eq!(store.value("@glacier_is_premium").as_deref(), Some("true"));
    assert_eq!(
        store.value("@glacier_notifications").as_deref(),
        Some(r#"{"newReleases":false,"recommendations":true,"reminders":true}"#)
    );
    assert_eq!(
        store.value("@glacier_privacy_settings").as_deref(),
        Some(r#"{"analytics":false,"saveHistory":true}"#)
    );
}

#[tokio::test]
async fn state_round_trips_into_fresh_session() {
    let store = Arc::new(MemoryStore::new());
    let first = session_over(store.clone());
    exercise(&first);
    first.flush().await;

    let second = session_over(store.clone());
    second.hydrate().await;

    second.with(|c| {
        assert!(c.is_favorite(&"fav".into()));
        assert_eq!(c.history()[0].track.id.as_str(), "played");
        assert!(c.is_downloaded(&"dl".into()));
        assert_eq!(c.user_playlists()[0].tracks, 2);
        assert_eq!(c.download_quality(), DownloadQuality::High);
        assert!(c.is_premium());
        assert!(!c.notifications().new_releases);
        assert!(!c.privacy_settings().analytics);

        // Transport state is never persisted
        assert!(c.current_track().is_none());
        assert_eq!(c.sleep_timer(), None);
    });
}

#[tokio::test]
async fn writes_for_one_key_land_in_order() {
    let store = Arc::new(MemoryStore::new());
    let session = session_over(store.clone());

    session.activate_premium();
    session.deactivate_premium();
    session.activate_premium();
    session.deactivate_premium();
    session.flush().await;

    assert_eq!(store.value("@glacier_is_premium").as_deref(), Some("false"));
}

#[tokio::test]
async fn unchanged_values_are_not_rewritten() {
    let store = Arc::new(MemoryStore::new());
    let session = session_over(store.clone());

    session.deactivate_premium();
    session.set_download_quality(DownloadQuality::Medium);
    session.remove_from_downloads(&"missing".into());
    session.flush().await;

    assert!(store.is_empty());
}

#[tokio::test]
async fn bare_word_download_quality_is_accepted() {
    let store = Arc::new(MemoryStore::with_entries([
        ("@glacier_download_quality", "low"),
        ("@glacier_is_premium", "true"),
    ]));
    let session = session_over(store);
    session.hydrate().await;

    assert_eq!(session.with(|c| c.download_quality()), DownloadQuality::Low);
    assert!(session.with(|c| c.is_premium()));
}

#[tokio::test]
async fn corrupt_keys_fall_back_to_defaults() {
    let store = Arc::new(MemoryStore::with_entries([
        ("@glacier_favorites", "{not json"),
        ("@glacier_history", "42"),
        ("@glacier_privacy_settings", r#"{"analytics":false}"#),
    ]));
    let session = session_over(store);
    session.hydrate().await;

    session.with(|c| {
        assert!(c.favorites().is_empty());
        assert!(c.history().is_empty());
        // Missing members take their defaults
        assert!(!c.privacy_settings().analytics);
        assert!(c.privacy_settings().save_history);
    });
}

#[tokio::test]
async fn failing_store_never_reaches_callers() {
    let store = Arc::new(FailingStore::default());
    let session = session_over(store.clone());
    session.hydrate().await;

    exercise(&session);
    session.flush().await;

    session.with(|c| {
        assert!(c.is_favorite(&"fav".into()));
        assert!(c.is_premium());
    });
    assert!(store.calls.load(Ordering::SeqCst) >= StoreKey::ALL.len());
}

#[tokio::test]
async fn namespace_prefixes_keys() {
    let store = Arc::new(MemoryStore::new());
    let config = PlayerConfig {
        namespace: "test".to_string(),
        ..PlayerConfig::default()
    };
    let session =
        PlayerSession::new(config, store.clone(), Arc::new(StaticCatalog::new())).unwrap();
    session.activate_premium();
    session.flush().await;

    assert_eq!(store.value("@test_is_premium").as_deref(), Some("true"));
    assert_eq!(store.value("@glacier_is_premium"), None);
}

#[tokio::test]
async fn sqlite_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("glacier.db").display());

    {
        let store = Arc::new(SqliteStore::open(&url).await.unwrap());
        let session = session_over(store.clone());
        session.toggle_favorite(&create_test_track("fav"));
        session.set_download_quality(DownloadQuality::Low);
        session.flush().await;
        store.pool().close().await;
    }

    let store = Arc::new(SqliteStore::open(&url).await.unwrap());
    let session = session_over(store);
    session.hydrate().await;

    assert!(session.is_favorite(&"fav".into()));
    assert_eq!(session.with(|c| c.download_quality()), DownloadQuality::Low);
}
