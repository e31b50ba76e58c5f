use glacier_core::{AlbumId, CatalogProvider, Track, TrackKind};
use glacier_storage::StaticCatalog;

#[tokio::test]
async fn test_sample_catalog_lists_everything() {
    let catalog = StaticCatalog::sample().unwrap();

    assert!(!catalog.list_tracks().await.unwrap().is_empty());
    assert!(!catalog.list_sessions().await.unwrap().is_empty());
    assert!(!catalog.list_playlists().await.unwrap().is_empty());
    assert_eq!(catalog.list_podcasts().await.unwrap().len(), 4);
    assert_eq!(catalog.list_categories().await.unwrap().len(), 4);
    assert!(catalog.featured().await.unwrap().is_some());
}

#[tokio::test]
async fn test_tracks_by_album_in_track_number_order() {
    let catalog = StaticCatalog::sample().unwrap();

    let tracks = catalog
        .tracks_by_album(&AlbumId::new("focus_flow"))
        .await
        .unwrap();

    let numbers: Vec<_> = tracks.iter().map(|t| t.track_number).collect();
    assert_eq!(numbers, vec![Some(1), Some(2), Some(3)]);
    assert!(tracks.iter().all(|t| t.album.as_deref() == Some("Focus Flow")));
}

#[tokio::test]
async fn test_tracks_by_unknown_album_is_empty() {
    let catalog = StaticCatalog::sample().unwrap();
    let tracks = catalog.tracks_by_album(&AlbumId::new("nope")).await.unwrap();
    assert!(tracks.is_empty());
}

#[tokio::test]
async fn test_sessions_by_category() {
    let catalog = StaticCatalog::sample().unwrap();

    let sleep = catalog.sessions_by_category("sleep").await.unwrap();
    assert!(!sleep.is_empty());
    assert!(sleep.iter().all(|s| s.category.as_deref() == Some("sleep")));
    assert!(sleep.iter().all(|s| s.kind == Some(TrackKind::Session)));
}

#[tokio::test]
async fn test_builder_catalog() {
    let catalog = StaticCatalog::new()
        .with_tracks(vec![Track::new("a", "A"), Track::new("b", "B")])
        .with_sessions(vec![Track::new("s", "S").with_kind(TrackKind::Session)]);

    assert_eq!(catalog.list_tracks().await.unwrap().len(), 2);
    assert_eq!(catalog.list_sessions().await.unwrap().len(), 1);
    assert!(catalog.list_playlists().await.unwrap().is_empty());
    assert!(catalog.featured().await.unwrap().is_none());
}
