//! Player controller - core state machine
//!
//! Owns transport state, the queue, history and the library. Every
//! operation is synchronous and applies in call order; library changes are
//! handed to [`Persistence`] as they happen. Time only moves through
//! [`PlayerController::tick`], driven by the session's ticker.

use crate::{
    config::PlayerConfig,
    error::DownloadRejection,
    history::History,
    library::Library,
    persistence::{PersistedState, Persistence, StoreKey},
    queue::Queue,
    types::{PlaybackStatus, RepeatMode, TickOutcome, TickerKey},
};
use glacier_core::{
    now_millis, parse_duration, CatalogPlaylist, DownloadQuality, DownloadedTrack,
    NotificationSettings, PlayedTrack, PlaylistId, PrivacySettings, Track, TrackId, UserPlaylist,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Main playback controller
///
/// One per app session. Screens read its getters and call its operations;
/// invalid preconditions (no current track, empty queue) make operations
/// silent no-ops.
#[derive(Debug)]
pub struct PlayerController {
    config: PlayerConfig,

    // Transport
    current_track: Option<Track>,
    is_playing: bool,
    current_time: u32,
    duration: u32,
    is_seeking: bool,
    repeat_mode: RepeatMode,
    shuffle_enabled: bool,

    queue: Queue,

    /// Sessions catalog; replaces the queue when a session is played
    sessions: Vec<Track>,

    history: History,
    library: Library,

    // Sleep timer (display only)
    sleep_timer: Option<u32>,
    sleep_timer_active: bool,

    persistence: Persistence,
    rng: StdRng,
}

impl PlayerController {
    /// Create a controller whose writes go nowhere
    pub fn new(config: PlayerConfig) -> Self {
        let persistence = Persistence::disabled(config.namespace.clone());
        Self::with_persistence(config, persistence)
    }

    /// Create a controller writing through `persistence`
    pub fn with_persistence(config: PlayerConfig, persistence: Persistence) -> Self {
        Self {
            history: History::new(config.history_limit),
            library: Library::new(config.free_download_limit),
            config,
            current_track: None,
            is_playing: false,
            current_time: 0,
            duration: 0,
            is_seeking: false,
            repeat_mode: RepeatMode::Off,
            shuffle_enabled: false,
            queue: Queue::new(),
            sessions: Vec::new(),
            sleep_timer: None,
            sleep_timer_active: false,
            persistence,
            rng: StdRng::from_entropy(),
        }
    }

    /// Use a deterministic shuffle sequence
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    // ===== Initialization =====

    /// Adopt values loaded from the store; absent keys keep their defaults
    pub fn apply_persisted(&mut self, state: PersistedState) {
        if let Some(favorites) = state.favorites {
            self.library.set_favorites(favorites);
        }
        if let Some(history) = state.history {
            self.history.replace(history);
        }
        if let Some(playlists) = state.playlists {
            self.library.set_playlists(playlists);
        }
        if let Some(notifications) = state.notifications {
            self.library.set_notifications(notifications);
        }
        if let Some(user_playlists) = state.user_playlists {
            self.library.set_user_playlists(user_playlists);
        }
        if let Some(quality) = state.download_quality {
            self.library.set_download_quality(quality);
        }
        if let Some(downloads) = state.downloads {
            self.library.set_downloads(downloads);
        }
        if let Some(premium) = state.is_premium {
            self.library.set_premium(premium);
        }
        if let Some(privacy) = state.privacy_settings {
            self.library.set_privacy_settings(privacy);
        }
    }

    /// Install the default queue unless something already set one
    pub fn set_default_queue(&mut self, tracks: Vec<Track>) {
        if self.queue.is_empty() {
            self.queue.replace(tracks);
        }
    }

    /// Cache the sessions catalog
    pub fn set_sessions(&mut self, sessions: Vec<Track>) {
        self.sessions = sessions;
    }

    pub fn sessions(&self) -> &[Track] {
        &self.sessions
    }

    // ===== Transport =====

    /// Start `track` from the beginning
    ///
    /// The queue becomes `queue` when given; otherwise a session track
    /// switches the queue to the sessions catalog once it is loaded, and
    /// anything else leaves it alone.
    pub fn play_track(&mut self, track: Track, queue: Option<Vec<Track>>) {
        match queue {
            Some(tracks) => self.queue.replace(tracks),
            None if track.is_session() && !self.sessions.is_empty() => {
                self.queue.replace(self.sessions.clone());
            }
            None => {}
        }
        self.load_track(track);
    }

    /// Make `track` current and playing from 0, recording it in history
    fn load_track(&mut self, track: Track) {
        tracing::debug!(track_id = %track.id, title = %track.title, "Loading track");

        self.duration = parse_duration(track.duration.as_deref(), self.config.fallback_duration_secs);
        self.current_time = 0;
        self.is_seeking = false;
        self.is_playing = true;

        if self.library.privacy_settings().save_history {
            self.history.record(track.clone(), now_millis());
            self.persistence.write(StoreKey::History, self.history.entries());
        }

        self.current_track = Some(track);
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    /// Resume playback; no-op without a current track
    pub fn resume(&mut self) {
        if self.current_track.is_some() {
            self.is_playing = true;
        }
    }

    pub fn toggle_play_pause(&mut self) {
        if self.is_playing {
            self.pause();
        } else {
            self.resume();
        }
    }

    /// Return transport to rest; the queue is kept
    pub fn clear_track(&mut self) {
        self.current_track = None;
        self.is_playing = false;
        self.current_time = 0;
        self.duration = 0;
        self.is_seeking = false;
    }

    pub fn set_play_queue(&mut self, tracks: Vec<Track>) {
        self.queue.replace(tracks);
    }

    // ===== Progress =====

    /// Advance simulated time by one second
    ///
    /// Reaching the end resets time to 0 and runs track-end handling.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.ticker_key().should_run() {
            return TickOutcome::Idle;
        }

        if self.current_time.saturating_add(1) >= self.duration {
            self.current_time = 0;
            self.handle_track_end();
            TickOutcome::TrackEnded
        } else {
            self.current_time += 1;
            TickOutcome::Advanced
        }
    }

    fn handle_track_end(&mut self) {
        tracing::debug!(repeat = ?self.repeat_mode, "Track ended");
        match self.repeat_mode {
            RepeatMode::One => {
                self.current_time = 0;
                self.is_playing = true;
            }
            RepeatMode::All => self.advance(true),
            RepeatMode::Off => self.advance(false),
        }
    }

    // ===== Seeking =====

    /// Suspend ticking while the user drags the scrubber
    pub fn start_seeking(&mut self) {
        self.is_seeking = true;
    }

    /// Seek to `percentage` (0-100) of the track and resume ticking
    pub fn seek_to(&mut self, percentage: f64) {
        let target = (percentage / 100.0 * f64::from(self.duration)).round();
        self.current_time = self.clamp_time(target);
        self.is_seeking = false;
    }

    /// Seek to an absolute position in seconds and resume ticking
    pub fn seek_to_time(&mut self, seconds: f64) {
        self.current_time = self.clamp_time(seconds.floor());
        self.is_seeking = false;
    }

    fn clamp_time(&self, seconds: f64) -> u32 {
        if seconds.is_nan() || seconds <= 0.0 {
            0
        } else if seconds >= f64::from(self.duration) {
            self.duration
        } else {
            seconds as u32
        }
    }

    // ===== Navigation =====

    /// Skip forward; wraps to the start of the queue regardless of repeat
    pub fn play_next(&mut self) {
        self.advance(true);
    }

    /// Step to the next track
    ///
    /// With shuffle a random other track is picked. Otherwise the successor
    /// plays; at the end of the queue (or when the current track is not in
    /// it) the first track plays only if `wrap` is set.
    fn advance(&mut self, wrap: bool) {
        let Some(current) = self.current_track.as_ref() else {
            return;
        };
        if self.queue.is_empty() {
            return;
        }

        let next = if self.shuffle_enabled {
            self.queue.random_other(&current.id, &mut self.rng).cloned()
        } else {
            match self.queue.successor(&current.id) {
                Some(track) => Some(track.clone()),
                None if wrap => self.queue.first().cloned(),
                None => None,
            }
        };

        match next {
            Some(track) => self.load_track(track),
            None => tracing::debug!("No next track"),
        }
    }

    /// Skip back, or restart the current track past the restart threshold
    pub fn play_previous(&mut self) {
        let Some(current) = self.current_track.as_ref() else {
            return;
        };
        if self.queue.is_empty() {
            return;
        }

        if self.current_time > self.config.restart_threshold_secs {
            self.current_time = 0;
            return;
        }

        if let Some(track) = self.queue.predecessor_or_last(&current.id).cloned() {
            self.load_track(track);
        }
    }

    // ===== Repeat & Shuffle =====

    /// Cycle `off → all → one → off`
    pub fn toggle_repeat(&mut self) {
        self.repeat_mode = self.repeat_mode.cycle();
    }

    /// Flip shuffle; the queue order is never touched
    pub fn toggle_shuffle(&mut self) {
        self.shuffle_enabled = !self.shuffle_enabled;
    }

    // ===== Favorites & History =====

    pub fn toggle_favorite(&mut self, track: &Track) {
        self.library.toggle_favorite(track);
        self.persistence.write(StoreKey::Favorites, self.library.favorites());
    }

    pub fn is_favorite(&self, id: &TrackId) -> bool {
        self.library.is_favorite(id)
    }

    pub fn clear_history(&mut self) {
        if self.history.is_empty() {
            return;
        }
        self.history.clear();
        self.persistence.write(StoreKey::History, self.history.entries());
    }

    // ===== Downloads =====

    pub fn add_to_downloads(&mut self, track: Track) -> Result<(), DownloadRejection> {
        self.library.add_download(track, now_millis())?;
        self.persistence.write(StoreKey::Downloads, self.library.downloads());
        Ok(())
    }

    pub fn remove_from_downloads(&mut self, id: &TrackId) {
        if self.library.remove_download(id) {
            self.persistence.write(StoreKey::Downloads, self.library.downloads());
        }
    }

    pub fn is_downloaded(&self, id: &TrackId) -> bool {
        self.library.is_downloaded(id)
    }

    /// Whether the allowance has room; does not check for duplicates
    pub fn can_download(&self) -> bool {
        self.library.can_download()
    }

    // ===== Premium =====

    pub fn activate_premium(&mut self) {
        self.set_premium(true);
    }

    pub fn deactivate_premium(&mut self) {
        self.set_premium(false);
    }

    fn set_premium(&mut self, premium: bool) {
        if self.library.set_premium(premium) {
            tracing::info!(premium, "Premium status changed");
            self.persistence.write(StoreKey::IsPremium, &premium);
        }
    }

    // ===== User playlists =====

    pub fn create_playlist(&mut self, name: impl Into<String>, tracks: Vec<Track>) -> UserPlaylist {
        let playlist = self.library.create_playlist(name, tracks, now_millis());
        self.persistence.write(StoreKey::UserPlaylists, self.library.user_playlists());
        playlist
    }

    pub fn delete_playlist(&mut self, id: &PlaylistId) {
        if self.library.delete_playlist(id) {
            self.persistence.write(StoreKey::UserPlaylists, self.library.user_playlists());
        }
    }

    /// Append `track`; unknown ids are ignored
    pub fn add_to_playlist(&mut self, id: &PlaylistId, track: Track) {
        if self.library.add_to_playlist(id, track) {
            self.persistence.write(StoreKey::UserPlaylists, self.library.user_playlists());
        }
    }

    // ===== Settings =====

    pub fn set_notifications(&mut self, settings: NotificationSettings) {
        if self.library.set_notifications(settings) {
            self.persistence.write(StoreKey::Notifications, &settings);
        }
    }

    pub fn set_privacy_settings(&mut self, settings: PrivacySettings) {
        if self.library.set_privacy_settings(settings) {
            self.persistence.write(StoreKey::PrivacySettings, &settings);
        }
    }

    pub fn set_download_quality(&mut self, quality: DownloadQuality) {
        if self.library.set_download_quality(quality) {
            self.persistence.write(StoreKey::DownloadQuality, &quality);
        }
    }

    /// Replace the cached curated playlists
    pub fn set_playlists(&mut self, playlists: Vec<CatalogPlaylist>) {
        if self.library.set_playlists(playlists) {
            self.persistence.write(StoreKey::Playlists, self.library.playlists());
        }
    }

    // ===== Sleep timer =====

    pub fn set_sleep_timer_value(&mut self, minutes: u32) {
        self.sleep_timer = Some(minutes);
        self.sleep_timer_active = true;
    }

    pub fn cancel_sleep_timer(&mut self) {
        self.sleep_timer = None;
        self.sleep_timer_active = false;
    }

    // ===== State Queries =====

    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn current_time(&self) -> u32 {
        self.current_time
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Elapsed percentage, 0 when duration is 0
    pub fn progress(&self) -> f64 {
        if self.duration == 0 {
            0.0
        } else {
            f64::from(self.current_time) / f64::from(self.duration) * 100.0
        }
    }

    pub fn is_seeking(&self) -> bool {
        self.is_seeking
    }

    pub fn queue(&self) -> &[Track] {
        self.queue.tracks()
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat_mode
    }

    pub fn shuffle_enabled(&self) -> bool {
        self.shuffle_enabled
    }

    pub fn favorites(&self) -> &[Track] {
        self.library.favorites()
    }

    pub fn history(&self) -> &[PlayedTrack] {
        self.history.entries()
    }

    pub fn playlists(&self) -> &[CatalogPlaylist] {
        self.library.playlists()
    }

    pub fn user_playlists(&self) -> &[UserPlaylist] {
        self.library.user_playlists()
    }

    pub fn downloads(&self) -> &[DownloadedTrack] {
        self.library.downloads()
    }

    pub fn is_premium(&self) -> bool {
        self.library.is_premium()
    }

    pub fn notifications(&self) -> NotificationSettings {
        self.library.notifications()
    }

    pub fn privacy_settings(&self) -> PrivacySettings {
        self.library.privacy_settings()
    }

    pub fn download_quality(&self) -> DownloadQuality {
        self.library.download_quality()
    }

    pub fn sleep_timer(&self) -> Option<u32> {
        self.sleep_timer
    }

    pub fn sleep_timer_active(&self) -> bool {
        self.sleep_timer_active
    }

    /// The fields the ticker depends on
    pub fn ticker_key(&self) -> TickerKey {
        TickerKey {
            is_playing: self.is_playing,
            track_id: self.current_track.as_ref().map(|t| t.id.clone()),
            duration: self.duration,
            is_seeking: self.is_seeking,
            repeat: self.repeat_mode,
            shuffle_enabled: self.shuffle_enabled,
        }
    }

    /// Snapshot of transport state
    pub fn status(&self) -> PlaybackStatus {
        PlaybackStatus {
            current_track: self.current_track.clone(),
            is_playing: self.is_playing,
            current_time: self.current_time,
            duration: self.duration,
            progress: self.progress(),
            is_seeking: self.is_seeking,
            repeat_mode: self.repeat_mode,
            shuffle_enabled: self.shuffle_enabled,
        }
    }
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new(PlayerConfig::default())
    }
}
