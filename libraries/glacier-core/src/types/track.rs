/// Track domain types
use crate::duration::parse_duration;
use crate::types::{AlbumId, TrackId};
use serde::{Deserialize, Serialize};

/// What kind of catalog item a track is
///
/// Sessions get special queue treatment: playing one without an explicit
/// queue loads the whole sessions catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrackKind {
    /// Music track (`"track"`)
    Track,
    /// Guided/ambient session (`"session"`)
    Session,
    /// Podcast episode (`"podcast episode"`)
    PodcastEpisode,
    /// Any other tag the catalog may carry
    Other(String),
}

impl TrackKind {
    /// Catalog string for this kind
    pub fn as_str(&self) -> &str {
        match self {
            Self::Track => "track",
            Self::Session => "session",
            Self::PodcastEpisode => "podcast episode",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for TrackKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "track" => Self::Track,
            "session" => Self::Session,
            "podcast episode" => Self::PodcastEpisode,
            _ => Self::Other(tag),
        }
    }
}

impl From<TrackKind> for String {
    fn from(kind: TrackKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Catalog item: music track, session or podcast episode
///
/// Immutable once loaded. The player copies tracks into its queue and
/// library, annotating the copies (see [`PlayedTrack`], [`DownloadedTrack`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name (sessions have none)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,

    /// Album name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,

    /// Album reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_id: Option<AlbumId>,

    /// Human duration string (`"4:32"`, `"45 min"`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    /// Item type tag
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TrackKind>,

    /// Position within the album
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_number: Option<u32>,

    /// Category id (`"sleep"`, `"focus"`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Artwork key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Track {
    /// Create a track with only identity and title
    pub fn new(id: impl Into<TrackId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: None,
            album: None,
            album_id: None,
            duration: None,
            kind: None,
            track_number: None,
            category: None,
            description: None,
            image: None,
        }
    }

    /// Set the duration string
    #[must_use]
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    /// Set the artist
    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    /// Set the album name and reference
    #[must_use]
    pub fn with_album(mut self, album_id: impl Into<AlbumId>, album: impl Into<String>) -> Self {
        self.album_id = Some(album_id.into());
        self.album = Some(album.into());
        self
    }

    /// Set the type tag
    #[must_use]
    pub fn with_kind(mut self, kind: TrackKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Set the category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Whether this item is a session
    pub fn is_session(&self) -> bool {
        self.kind == Some(TrackKind::Session)
    }

    /// Duration in whole seconds, `fallback` if the string is unparseable
    pub fn duration_secs(&self, fallback: u32) -> u32 {
        parse_duration(self.duration.as_deref(), fallback)
    }
}

/// History entry: a track plus when it was played
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayedTrack {
    #[serde(flatten)]
    pub track: Track,

    /// Epoch milliseconds
    pub played_at: i64,
}

impl PlayedTrack {
    pub fn new(track: Track, played_at: i64) -> Self {
        Self { track, played_at }
    }
}

/// Download entry: a track plus when it was downloaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadedTrack {
    #[serde(flatten)]
    pub track: Track,

    /// Epoch milliseconds
    pub downloaded_at: i64,
}

impl DownloadedTrack {
    pub fn new(track: Track, downloaded_at: i64) -> Self {
        Self {
            track,
            downloaded_at,
        }
    }
}
