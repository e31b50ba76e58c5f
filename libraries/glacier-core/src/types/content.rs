/// Read-only catalog records other than tracks
use crate::types::ids::string_or_number;
use crate::types::PlaylistId;
use serde::{Deserialize, Serialize};

/// Curated playlist published in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPlaylist {
    pub id: PlaylistId,
    pub title: String,

    /// Advertised track count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracks: Option<u32>,

    /// Human total length (`"2h 15m"`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Podcast show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Podcast {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,

    /// Number of published episodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episodes: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Browsing category (`sleep`, `focus`, `relax`, `meditation`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Item promoted on the home screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
