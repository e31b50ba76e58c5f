//! Shared player session
//!
//! [`PlayerSession`] is the handle screens hold. It owns the controller
//! behind a mutex, keeps the ticker in sync after every operation and runs
//! the persistence writer. Clones share the same session.

use crate::{
    config::PlayerConfig,
    controller::PlayerController,
    error::{DownloadRejection, PlaybackError, Result},
    persistence::{PersistedState, Persistence},
    ticker::Ticker,
    types::{PlaybackStatus, TickOutcome},
};
use glacier_core::{
    CatalogPlaylist, CatalogProvider, DownloadQuality, KeyValueStore, NotificationSettings,
    PlaylistId, PrivacySettings, Track, TrackId, UserPlaylist,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

struct SessionState {
    controller: PlayerController,
    ticker: Ticker,
}

impl SessionState {
    /// Re-arm or tear down the ticker if its key moved
    fn sync_ticker(&mut self, shared: &Arc<Mutex<SessionState>>, runtime: &Handle) {
        let key = self.controller.ticker_key();
        let state = Arc::downgrade(shared);
        self.ticker.sync(key, |generation, period| {
            runtime.spawn(run_ticker(state, generation, period))
        });
    }
}

fn lock(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn run_ticker(state: Weak<Mutex<SessionState>>, generation: u64, period: Duration) {
    let mut interval = time::interval_at(Instant::now() + period, period);

    loop {
        interval.tick().await;

        let Some(shared) = state.upgrade() else {
            break;
        };
        let mut guard = lock(&shared);
        if !guard.ticker.is_current(generation) {
            break;
        }

        if guard.controller.tick() == TickOutcome::TrackEnded {
            tracing::debug!(generation, "Track end handled by ticker");
        }
        guard.sync_ticker(&shared, &Handle::current());
    }
}

/// Handle to the one player of an app session
#[derive(Clone)]
pub struct PlayerSession {
    state: Arc<Mutex<SessionState>>,
    persistence: Persistence,
    store: Arc<dyn KeyValueStore>,
    catalog: Arc<dyn CatalogProvider>,
    runtime: Handle,
}

impl std::fmt::Debug for PlayerSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerSession")
            .field("namespace", &self.persistence.namespace())
            .finish_non_exhaustive()
    }
}

impl PlayerSession {
    /// Create a session at default state
    ///
    /// Must be called from within a tokio runtime; the ticker and the
    /// persistence writer run on it. Nothing is loaded yet, see
    /// [`PlayerSession::hydrate`].
    pub fn new(
        config: PlayerConfig,
        store: Arc<dyn KeyValueStore>,
        catalog: Arc<dyn CatalogProvider>,
    ) -> Result<Self> {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|e| PlaybackError::Runtime(e.to_string()))?;

        let (persistence, _writer) = Persistence::spawn(Arc::clone(&store), config.namespace.clone());
        let ticker = Ticker::new(config.tick_interval());
        let controller = PlayerController::with_persistence(config, persistence.clone());

        Ok(Self {
            state: Arc::new(Mutex::new(SessionState { controller, ticker })),
            persistence,
            store,
            catalog,
            runtime,
        })
    }

    /// Create a session and load persisted and catalog state in the background
    ///
    /// Callers may observe default state until the returned task finishes.
    pub fn start(
        config: PlayerConfig,
        store: Arc<dyn KeyValueStore>,
        catalog: Arc<dyn CatalogProvider>,
    ) -> Result<(Self, JoinHandle<()>)> {
        let session = Self::new(config, store, catalog)?;
        let loader = session.clone();
        let hydration = session.runtime.spawn(async move { loader.hydrate().await });
        Ok((session, hydration))
    }

    /// Load every persisted key and the catalog defaults
    ///
    /// Failures are logged and leave the affected state at its default.
    pub async fn hydrate(&self) {
        let namespace = self.persistence.namespace().to_owned();
        let (persisted, tracks, sessions, playlists) = tokio::join!(
            PersistedState::load(self.store.as_ref(), &namespace),
            self.catalog.list_tracks(),
            self.catalog.list_sessions(),
            self.catalog.list_playlists(),
        );
        let loaded_keys = persisted.loaded_keys();

        self.update(|controller| {
            controller.apply_persisted(persisted);

            match tracks {
                Ok(tracks) => controller.set_default_queue(tracks),
                Err(e) => tracing::warn!(error = %e, "Failed to load default queue"),
            }
            match sessions {
                Ok(sessions) => controller.set_sessions(sessions),
                Err(e) => tracing::warn!(error = %e, "Failed to load sessions"),
            }
            match playlists {
                Ok(playlists) => controller.set_playlists(playlists),
                Err(e) => tracing::warn!(error = %e, "Failed to load curated playlists"),
            }
        });

        tracing::info!(namespace = %namespace, loaded_keys, "Player state restored");
    }

    /// Read from the controller
    pub fn with<R>(&self, f: impl FnOnce(&PlayerController) -> R) -> R {
        f(&lock(&self.state).controller)
    }

    /// Mutate the controller, then bring the ticker in line
    pub fn update<R>(&self, f: impl FnOnce(&mut PlayerController) -> R) -> R {
        let mut guard = lock(&self.state);
        let result = f(&mut guard.controller);
        guard.sync_ticker(&self.state, &self.runtime);
        result
    }

    /// Wait until every write issued so far has reached the store
    pub async fn flush(&self) {
        self.persistence.flush().await;
    }

    pub fn status(&self) -> PlaybackStatus {
        self.with(PlayerController::status)
    }

    pub fn ticker_armed(&self) -> bool {
        lock(&self.state).ticker.is_armed()
    }

    pub fn ticker_generation(&self) -> u64 {
        lock(&self.state).ticker.generation()
    }

    // ===== Transport =====

    pub fn play_track(&self, track: Track, queue: Option<Vec<Track>>) {
        self.update(|c| c.play_track(track, queue));
    }

    pub fn pause(&self) {
        self.update(PlayerController::pause);
    }

    pub fn resume(&self) {
        self.update(PlayerController::resume);
    }

    pub fn toggle_play_pause(&self) {
        self.update(PlayerController::toggle_play_pause);
    }

    pub fn clear_track(&self) {
        self.update(PlayerController::clear_track);
    }

    pub fn play_next(&self) {
        self.update(PlayerController::play_next);
    }

    pub fn play_previous(&self) {
        self.update(PlayerController::play_previous);
    }

    pub fn set_play_queue(&self, tracks: Vec<Track>) {
        self.update(|c| c.set_play_queue(tracks));
    }

    pub fn start_seeking(&self) {
        self.update(PlayerController::start_seeking);
    }

    pub fn seek_to(&self, percentage: f64) {
        self.update(|c| c.seek_to(percentage));
    }

    pub fn seek_to_time(&self, seconds: f64) {
        self.update(|c| c.seek_to_time(seconds));
    }

    pub fn toggle_repeat(&self) {
        self.update(PlayerController::toggle_repeat);
    }

    pub fn toggle_shuffle(&self) {
        self.update(PlayerController::toggle_shuffle);
    }

    // ===== Library =====

    pub fn toggle_favorite(&self, track: &Track) {
        self.update(|c| c.toggle_favorite(track));
    }

    pub fn is_favorite(&self, id: &TrackId) -> bool {
        self.with(|c| c.is_favorite(id))
    }

    pub fn clear_history(&self) {
        self.update(PlayerController::clear_history);
    }

    pub fn create_playlist(&self, name: impl Into<String>, tracks: Vec<Track>) -> UserPlaylist {
        self.update(|c| c.create_playlist(name, tracks))
    }

    pub fn delete_playlist(&self, id: &PlaylistId) {
        self.update(|c| c.delete_playlist(id));
    }

    pub fn add_to_playlist(&self, id: &PlaylistId, track: Track) {
        self.update(|c| c.add_to_playlist(id, track));
    }

    pub fn add_to_downloads(&self, track: Track) -> std::result::Result<(), DownloadRejection> {
        self.update(|c| c.add_to_downloads(track))
    }

    pub fn remove_from_downloads(&self, id: &TrackId) {
        self.update(|c| c.remove_from_downloads(id));
    }

    pub fn is_downloaded(&self, id: &TrackId) -> bool {
        self.with(|c| c.is_downloaded(id))
    }

    pub fn can_download(&self) -> bool {
        self.with(PlayerController::can_download)
    }

    pub fn activate_premium(&self) {
        self.update(PlayerController::activate_premium);
    }

    pub fn deactivate_premium(&self) {
        self.update(PlayerController::deactivate_premium);
    }

    // ===== Settings =====

    pub fn set_notifications(&self, settings: NotificationSettings) {
        self.update(|c| c.set_notifications(settings));
    }

    pub fn set_privacy_settings(&self, settings: PrivacySettings) {
        self.update(|c| c.set_privacy_settings(settings));
    }

    pub fn set_download_quality(&self, quality: DownloadQuality) {
        self.update(|c| c.set_download_quality(quality));
    }

    pub fn set_playlists(&self, playlists: Vec<CatalogPlaylist>) {
        self.update(|c| c.set_playlists(playlists));
    }

    pub fn set_sleep_timer_value(&self, minutes: u32) {
        self.update(|c| c.set_sleep_timer_value(minutes));
    }

    pub fn cancel_sleep_timer(&self) {
        self.update(PlayerController::cancel_sleep_timer);
    }
}
