//! Per-user library: favorites, downloads, playlists and settings
//!
//! Every mutator reports whether anything actually changed, so the
//! controller only writes keys whose value moved.

use crate::error::DownloadRejection;
use glacier_core::{
    CatalogPlaylist, DownloadQuality, DownloadedTrack, NotificationSettings, PlaylistId,
    PrivacySettings, Track, TrackId, UserPlaylist,
};

/// Library state owned by the controller
#[derive(Debug, Clone)]
pub struct Library {
    favorites: Vec<Track>,
    downloads: Vec<DownloadedTrack>,
    user_playlists: Vec<UserPlaylist>,
    playlists: Vec<CatalogPlaylist>,
    notifications: NotificationSettings,
    privacy_settings: PrivacySettings,
    download_quality: DownloadQuality,
    is_premium: bool,

    /// Download allowance when not premium
    free_download_limit: usize,
}

impl Library {
    pub fn new(free_download_limit: usize) -> Self {
        Self {
            favorites: Vec::new(),
            downloads: Vec::new(),
            user_playlists: Vec::new(),
            playlists: Vec::new(),
            notifications: NotificationSettings::default(),
            privacy_settings: PrivacySettings::default(),
            download_quality: DownloadQuality::default(),
            is_premium: false,
            free_download_limit,
        }
    }

    // ===== Favorites =====

    /// Add the track if absent, otherwise remove every entry with its id
    ///
    /// Returns whether the track is a favorite afterwards.
    pub fn toggle_favorite(&mut self, track: &Track) -> bool {
        if self.is_favorite(&track.id) {
            self.favorites.retain(|t| t.id != track.id);
            false
        } else {
            self.favorites.push(track.clone());
            true
        }
    }

    pub fn is_favorite(&self, id: &TrackId) -> bool {
        self.favorites.iter().any(|t| &t.id == id)
    }

    pub fn favorites(&self) -> &[Track] {
        &self.favorites
    }

    pub fn set_favorites(&mut self, favorites: Vec<Track>) {
        self.favorites = favorites;
    }

    // ===== Downloads =====

    pub fn is_downloaded(&self, id: &TrackId) -> bool {
        self.downloads.iter().any(|d| &d.track.id == id)
    }

    /// Whether another download fits the allowance
    pub fn can_download(&self) -> bool {
        self.is_premium || self.downloads.len() < self.free_download_limit
    }

    /// Append a download stamped with `downloaded_at`
    pub fn add_download(
        &mut self,
        track: Track,
        downloaded_at: i64,
    ) -> Result<(), DownloadRejection> {
        if self.is_downloaded(&track.id) {
            return Err(DownloadRejection::AlreadyDownloaded);
        }
        if !self.can_download() {
            return Err(DownloadRejection::LimitReached);
        }
        self.downloads.push(DownloadedTrack::new(track, downloaded_at));
        Ok(())
    }

    /// Remove every download with `id`; returns whether any was removed
    pub fn remove_download(&mut self, id: &TrackId) -> bool {
        let before = self.downloads.len();
        self.downloads.retain(|d| &d.track.id != id);
        self.downloads.len() != before
    }

    pub fn downloads(&self) -> &[DownloadedTrack] {
        &self.downloads
    }

    pub fn set_downloads(&mut self, downloads: Vec<DownloadedTrack>) {
        self.downloads = downloads;
    }

    // ===== User playlists =====

    /// Create a playlist, stamping its id from `now_ms`
    ///
    /// If the id is already taken (two playlists in the same millisecond)
    /// the stamp is bumped until it is free.
    pub fn create_playlist(
        &mut self,
        name: impl Into<String>,
        tracks: Vec<Track>,
        now_ms: i64,
    ) -> UserPlaylist {
        let mut stamp = now_ms;
        while self.find_playlist(&PlaylistId::from_timestamp(stamp)).is_some() {
            stamp += 1;
        }
        let playlist = UserPlaylist::new(PlaylistId::from_timestamp(stamp), name, tracks, now_ms);
        self.user_playlists.push(playlist.clone());
        playlist
    }

    /// Remove the playlist; returns whether it existed
    pub fn delete_playlist(&mut self, id: &PlaylistId) -> bool {
        let before = self.user_playlists.len();
        self.user_playlists.retain(|p| &p.id != id);
        self.user_playlists.len() != before
    }

    /// Append `track` to the playlist; returns false for an unknown id
    pub fn add_to_playlist(&mut self, id: &PlaylistId, track: Track) -> bool {
        match self.user_playlists.iter_mut().find(|p| &p.id == id) {
            Some(playlist) => {
                playlist.push(track);
                true
            }
            None => false,
        }
    }

    pub fn find_playlist(&self, id: &PlaylistId) -> Option<&UserPlaylist> {
        self.user_playlists.iter().find(|p| &p.id == id)
    }

    pub fn user_playlists(&self) -> &[UserPlaylist] {
        &self.user_playlists
    }

    pub fn set_user_playlists(&mut self, playlists: Vec<UserPlaylist>) {
        self.user_playlists = playlists;
    }

    // ===== Curated playlists =====

    pub fn playlists(&self) -> &[CatalogPlaylist] {
        &self.playlists
    }

    pub fn set_playlists(&mut self, playlists: Vec<CatalogPlaylist>) -> bool {
        if self.playlists == playlists {
            return false;
        }
        self.playlists = playlists;
        true
    }

    // ===== Settings =====

    pub fn notifications(&self) -> NotificationSettings {
        self.notifications
    }

    pub fn set_notifications(&mut self, settings: NotificationSettings) -> bool {
        let changed = self.notifications != settings;
        self.notifications = settings;
        changed
    }

    pub fn privacy_settings(&self) -> PrivacySettings {
        self.privacy_settings
    }

    pub fn set_privacy_settings(&mut self, settings: PrivacySettings) -> bool {
        let changed = self.privacy_settings != settings;
        self.privacy_settings = settings;
        changed
    }

    pub fn download_quality(&self) -> DownloadQuality {
        self.download_quality
    }

    pub fn set_download_quality(&mut self, quality: DownloadQuality) -> bool {
        let changed = self.download_quality != quality;
        self.download_quality = quality;
        changed
    }

    pub fn is_premium(&self) -> bool {
        self.is_premium
    }

    pub fn set_premium(&mut self, premium: bool) -> bool {
        let changed = self.is_premium != premium;
        self.is_premium = premium;
        changed
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::new(3)
    }
}
