//! Write-through persistence of library state
//!
//! Mutators never await. Each change is encoded on the caller's thread and
//! pushed onto an ordered channel; a single writer task drains it into the
//! [`KeyValueStore`]. Store failures are logged and dropped.

use glacier_core::{
    CatalogPlaylist, DownloadQuality, DownloadedTrack, KeyValueStore, NotificationSettings,
    PlayedTrack, PrivacySettings, Track, UserPlaylist,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// The persisted keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Favorites,
    History,
    Playlists,
    Notifications,
    UserPlaylists,
    DownloadQuality,
    Downloads,
    IsPremium,
    PrivacySettings,
}

impl StoreKey {
    pub const ALL: [StoreKey; 9] = [
        StoreKey::Favorites,
        StoreKey::History,
        StoreKey::Playlists,
        StoreKey::Notifications,
        StoreKey::UserPlaylists,
        StoreKey::DownloadQuality,
        StoreKey::Downloads,
        StoreKey::IsPremium,
        StoreKey::PrivacySettings,
    ];

    fn suffix(&self) -> &'static str {
        match self {
            Self::Favorites => "favorites",
            Self::History => "history",
            Self::Playlists => "playlists",
            Self::Notifications => "notifications",
            Self::UserPlaylists => "user_playlists",
            Self::DownloadQuality => "download_quality",
            Self::Downloads => "downloads",
            Self::IsPremium => "is_premium",
            Self::PrivacySettings => "privacy_settings",
        }
    }

    /// Full store key, e.g. `@glacier_favorites`
    pub fn storage_key(&self, namespace: &str) -> String {
        format!("@{namespace}_{}", self.suffix())
    }
}

enum PersistCommand {
    Set { key: String, value: String },
    Flush(oneshot::Sender<()>),
}

/// Handle used by the controller to enqueue writes
///
/// A disabled handle (no writer) accepts and discards writes, which keeps
/// the controller usable outside a runtime.
#[derive(Debug, Clone)]
pub struct Persistence {
    namespace: String,
    tx: Option<mpsc::UnboundedSender<PersistCommand>>,
}

impl Persistence {
    /// Handle that drops every write
    pub fn disabled(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            tx: None,
        }
    }

    /// Spawn the writer task on the current tokio runtime
    ///
    /// The task ends once every handle has been dropped and the queue is
    /// drained.
    pub fn spawn(store: Arc<dyn KeyValueStore>, namespace: impl Into<String>) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let writer = tokio::spawn(run_writer(store, rx));
        let handle = Self {
            namespace: namespace.into(),
            tx: Some(tx),
        };
        (handle, writer)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Encode `value` as JSON and enqueue it under `key`
    pub fn write<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) {
        let Some(tx) = &self.tx else {
            return;
        };

        let value = match serde_json::to_string(value) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = ?key, error = %e, "Failed to encode persisted value");
                return;
            }
        };

        let command = PersistCommand::Set {
            key: key.storage_key(&self.namespace),
            value,
        };
        if tx.send(command).is_err() {
            tracing::warn!(key = ?key, "Persistence writer stopped; dropping write");
        }
    }

    /// Wait until every write enqueued before this call has been attempted
    pub async fn flush(&self) {
        let Some(tx) = &self.tx else {
            return;
        };
        let (done_tx, done_rx) = oneshot::channel();
        if tx.send(PersistCommand::Flush(done_tx)).is_ok() {
            let _ = done_rx.await;
        }
    }
}

async fn run_writer(
    store: Arc<dyn KeyValueStore>,
    mut rx: mpsc::UnboundedReceiver<PersistCommand>,
) {
    while let Some(command) = rx.recv().await {
        match command {
            PersistCommand::Set { key, value } => {
                if let Err(e) = store.set(&key, value).await {
                    tracing::warn!(key = %key, error = %e, "Failed to persist value");
                }
            }
            PersistCommand::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    tracing::debug!("Persistence writer finished");
}

/// Values read back from the store at startup
///
/// `None` means the key was absent or could not be decoded; either way the
/// controller keeps its default for it.
#[derive(Debug, Clone, Default)]
pub struct PersistedState {
    pub favorites: Option<Vec<Track>>,
    pub history: Option<Vec<PlayedTrack>>,
    pub playlists: Option<Vec<CatalogPlaylist>>,
    pub notifications: Option<NotificationSettings>,
    pub user_playlists: Option<Vec<UserPlaylist>>,
    pub download_quality: Option<DownloadQuality>,
    pub downloads: Option<Vec<DownloadedTrack>>,
    pub is_premium: Option<bool>,
    pub privacy_settings: Option<PrivacySettings>,
}

impl PersistedState {
    /// Fetch every key concurrently and decode what can be decoded
    pub async fn load(store: &dyn KeyValueStore, namespace: &str) -> Self {
        let keys = StoreKey::ALL.map(|key| key.storage_key(namespace));
        let (fav, hist, pls, notif, user_pls, quality, dls, premium, privacy) = tokio::join!(
            store.get(&keys[0]),
            store.get(&keys[1]),
            store.get(&keys[2]),
            store.get(&keys[3]),
            store.get(&keys[4]),
            store.get(&keys[5]),
            store.get(&keys[6]),
            store.get(&keys[7]),
            store.get(&keys[8]),
        );

        Self {
            favorites: decode(StoreKey::Favorites, fav),
            history: decode(StoreKey::History, hist),
            playlists: decode(StoreKey::Playlists, pls),
            notifications: decode(StoreKey::Notifications, notif),
            user_playlists: decode(StoreKey::UserPlaylists, user_pls),
            download_quality: decode_quality(quality),
            downloads: decode(StoreKey::Downloads, dls),
            is_premium: decode(StoreKey::IsPremium, premium),
            privacy_settings: decode(StoreKey::PrivacySettings, privacy),
        }
    }

    /// Number of keys that held a usable value
    pub fn loaded_keys(&self) -> usize {
        [
            self.favorites.is_some(),
            self.history.is_some(),
            self.playlists.is_some(),
            self.notifications.is_some(),
            self.user_playlists.is_some(),
            self.download_quality.is_some(),
            self.downloads.is_some(),
            self.is_premium.is_some(),
            self.privacy_settings.is_some(),
        ]
        .into_iter()
        .filter(|loaded| *loaded)
        .count()
    }
}

fn fetched(key: StoreKey, raw: glacier_core::Result<Option<String>>) -> Option<String> {
    match raw {
        Ok(value) => value.filter(|v| !v.is_empty()),
        Err(e) => {
            tracing::warn!(key = ?key, error = %e, "Failed to read persisted value");
            None
        }
    }
}

fn decode<T: DeserializeOwned>(
    key: StoreKey,
    raw: glacier_core::Result<Option<String>>,
) -> Option<T> {
    let raw = fetched(key, raw)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key = ?key, error = %e, "Ignoring undecodable persisted value");
            None
        }
    }
}

/// Download quality also accepts the bare word (`medium`)
fn decode_quality(raw: glacier_core::Result<Option<String>>) -> Option<DownloadQuality> {
    let raw = fetched(StoreKey::DownloadQuality, raw)?;
    serde_json::from_str(&raw)
        .ok()
        .or_else(|| raw.trim().parse().ok())
        .or_else(|| {
            tracing::warn!(value = %raw, "Ignoring unknown download quality");
            None
        })
}
