/// User playlist domain type
use crate::types::{PlaylistId, Track};
use serde::{Deserialize, Serialize};

/// Playlist created by the user on this device
///
/// `tracks` is the derived track count; it is kept alongside `track_list`
/// because screens list playlists without loading their tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPlaylist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name
    pub title: String,

    /// Number of entries in `track_list`
    #[serde(default)]
    pub tracks: usize,

    /// Ordered tracks; duplicates allowed
    #[serde(default)]
    pub track_list: Vec<Track>,

    /// Creation stamp, epoch milliseconds
    pub created_at: i64,
}

impl UserPlaylist {
    /// Create a playlist stamped at `created_at`
    pub fn new(id: PlaylistId, title: impl Into<String>, tracks: Vec<Track>, created_at: i64) -> Self {
        Self {
            id,
            title: title.into(),
            tracks: tracks.len(),
            track_list: tracks,
            created_at,
        }
    }

    /// Append a track and refresh the derived count
    pub fn push(&mut self, track: Track) {
        self.track_list.push(track);
        self.tracks = self.track_list.len();
    }
}
