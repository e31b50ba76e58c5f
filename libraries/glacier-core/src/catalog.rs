//! Content catalog provider trait
//!
//! The catalog is the read-only source of tracks, sessions, playlists and
//! podcasts. The player only reads from it; a failed query leaves existing
//! player state untouched.

use crate::error::Result;
use crate::types::{AlbumId, CatalogPlaylist, Category, FeaturedItem, Podcast, Track};
use async_trait::async_trait;

/// Read-only content source
///
/// Implementations may be backed by a remote document store or by bundled
/// data (see `glacier_storage::StaticCatalog`).
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// List all tracks
    async fn list_tracks(&self) -> Result<Vec<Track>>;

    /// List tracks of one album, in album order
    async fn tracks_by_album(&self, album_id: &AlbumId) -> Result<Vec<Track>>;

    /// List all sessions
    async fn list_sessions(&self) -> Result<Vec<Track>>;

    /// List sessions in one category
    async fn sessions_by_category(&self, category: &str) -> Result<Vec<Track>>;

    /// List curated playlists
    async fn list_playlists(&self) -> Result<Vec<CatalogPlaylist>>;

    /// List podcasts
    async fn list_podcasts(&self) -> Result<Vec<Podcast>>;

    /// List browsing categories
    async fn list_categories(&self) -> Result<Vec<Category>>;

    /// Item currently promoted on the home screen, if any
    async fn featured(&self) -> Result<Option<FeaturedItem>>;
}
