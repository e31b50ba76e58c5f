mod content;
mod ids;
mod playlist;
mod settings;
mod track;

pub use content::{CatalogPlaylist, Category, FeaturedItem, Podcast};
pub use ids::{AlbumId, PlaylistId, TrackId};
pub use playlist::UserPlaylist;
pub use settings::{DownloadQuality, NotificationSettings, PrivacySettings};
pub use track::{DownloadedTrack, PlayedTrack, Track, TrackKind};
