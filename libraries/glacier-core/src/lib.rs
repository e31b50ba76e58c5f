//! Glacier Player Core
//!
//! Platform-agnostic domain types, collaborator traits, and error handling
//! shared by the Glacier player crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `PlayedTrack`, `DownloadedTrack`, `UserPlaylist`,
//!   settings objects and catalog records
//! - **Collaborator Traits**: `CatalogProvider` (read-only content source) and
//!   `KeyValueStore` (string-keyed persistence)
//! - **Error Handling**: Unified `GlacierError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use glacier_core::{parse_duration, Track, TrackKind};
//!
//! let track = Track::new("1", "Frozen Lake").with_duration("4:32");
//! assert_eq!(parse_duration(track.duration.as_deref(), 270), 272);
//!
//! let session = Track::new("s1", "Deep Rest")
//!     .with_duration("45 min")
//!     .with_kind(TrackKind::Session);
//! assert!(session.is_session());
//! ```

#![forbid(unsafe_code)]

pub mod catalog;
pub mod duration;
pub mod error;
pub mod storage;
pub mod types;

pub use catalog::CatalogProvider;
pub use duration::{parse_duration, DEFAULT_DURATION_SECS};
pub use error::{GlacierError, Result};
pub use storage::KeyValueStore;

pub use types::{
    // Identifiers
    AlbumId, PlaylistId, TrackId,
    // Catalog records
    Category, CatalogPlaylist, FeaturedItem, Podcast,
    // Tracks
    DownloadedTrack, PlayedTrack, Track, TrackKind,
    // Library
    DownloadQuality, NotificationSettings, PrivacySettings, UserPlaylist,
};

/// Current wall-clock time as epoch milliseconds
///
/// Used for `playedAt`, `downloadedAt` and playlist creation stamps.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
