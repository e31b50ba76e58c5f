//! In-memory catalog provider
//!
//! Serves tracks, sessions and browse content from memory. The bundled
//! sample catalog mirrors the content the app ships with before the remote
//! catalog is reachable.

use async_trait::async_trait;
use glacier_core::{
    AlbumId, CatalogPlaylist, CatalogProvider, Category, FeaturedItem, Podcast, Track,
};
use serde::Deserialize;

use crate::error::Result;

const SAMPLE_CATALOG: &str = include_str!("../../data/sample_catalog.json");

/// [`CatalogProvider`] over in-memory content
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StaticCatalog {
    tracks: Vec<Track>,
    sessions: Vec<Track>,
    playlists: Vec<CatalogPlaylist>,
    podcasts: Vec<Podcast>,
    categories: Vec<Category>,
    featured: Option<FeaturedItem>,
}

impl StaticCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog bundled with the crate
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled JSON does not parse
    pub fn sample() -> Result<Self> {
        Self::from_json(SAMPLE_CATALOG)
    }

    /// Parse a catalog document
    ///
    /// The document is an object with optional `tracks`, `sessions`,
    /// `playlists`, `podcasts`, `categories` and `featured` members.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a valid catalog document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_tracks(mut self, tracks: Vec<Track>) -> Self {
        self.tracks = tracks;
        self
    }

    #[must_use]
    pub fn with_sessions(mut self, sessions: Vec<Track>) -> Self {
        self.sessions = sessions;
        self
    }

    #[must_use]
    pub fn with_playlists(mut self, playlists: Vec<CatalogPlaylist>) -> Self {
        self.playlists = playlists;
        self
    }

    #[must_use]
    pub fn with_featured(mut self, featured: FeaturedItem) -> Self {
        self.featured = Some(featured);
        self
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalog {
    async fn list_tracks(&self) -> glacier_core::Result<Vec<Track>> {
        Ok(self.tracks.clone())
    }

    async fn tracks_by_album(&self, album_id: &AlbumId) -> glacier_core::Result<Vec<Track>> {
        let mut tracks: Vec<Track> = self
            .tracks
            .iter()
            .filter(|t| t.album_id.as_ref() == Some(album_id))
            .cloned()
            .collect();
        // Unnumbered tracks go last, keeping catalog order among themselves.
        tracks.sort_by_key(|t| t.track_number.unwrap_or(u32::MAX));
        Ok(tracks)
    }

    async fn list_sessions(&self) -> glacier_core::Result<Vec<Track>> {
        Ok(self.sessions.clone())
    }

    async fn sessions_by_category(&self, category: &str) -> glacier_core::Result<Vec<Track>> {
        Ok(self
            .sessions
            .iter()
            .filter(|s| s.category.as_deref() == Some(category))
            .cloned()
            .collect())
    }

    async fn list_playlists(&self) -> glacier_core::Result<Vec<CatalogPlaylist>> {
        Ok(self.playlists.clone())
    }

    async fn list_podcasts(&self) -> glacier_core::Result<Vec<Podcast>> {
        Ok(self.podcasts.clone())
    }

    async fn list_categories(&self) -> glacier_core::Result<Vec<Category>> {
        Ok(self.categories.clone())
    }

    async fn featured(&self) -> glacier_core::Result<Option<FeaturedItem>> {
        Ok(self.featured.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glacier_core::TrackKind;

    #[test]
    fn sample_catalog_parses() {
        let catalog = StaticCatalog::sample().unwrap();
        assert!(!catalog.tracks.is_empty());
        assert!(catalog.sessions.iter().all(|s| s.kind == Some(TrackKind::Session)));
        assert!(catalog.featured.is_some());
    }

    #[test]
    fn partial_documents_default_missing_sections() {
        let catalog = StaticCatalog::from_json(r#"{ "tracks": [{ "id": 1, "title": "A" }] }"#)
            .unwrap();
        assert_eq!(catalog.tracks.len(), 1);
        assert!(catalog.sessions.is_empty());
        assert!(catalog.featured.is_none());
    }

    #[test]
    fn malformed_documents_are_rejected() {
        assert!(StaticCatalog::from_json("{ \"tracks\": 5 }").is_err());
    }
}
