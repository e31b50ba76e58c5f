use glacier_core::KeyValueStore;
use glacier_storage::{create_pool, kv, run_migrations, SqliteStore};

#[tokio::test]
async fn test_set_and_get_value() {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();

    kv::set_value(&pool, "@glacier_favorites", "[]").await.unwrap();

    let result = kv::get_value(&pool, "@glacier_favorites").await.unwrap();
    assert_eq!(result.as_deref(), Some("[]"));
}

#[tokio::test]
async fn test_get_missing_value() {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();

    let result = kv::get_value(&pool, "@glacier_history").await.unwrap();
    assert_eq!(result, None);
}

#[tokio::test]
async fn test_overwrite_existing_value() {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();

    kv::set_value(&pool, "@glacier_is_premium", "false").await.unwrap();
    kv::set_value(&pool, "@glacier_is_premium", "true").await.unwrap();

    let result = kv::get_value(&pool, "@glacier_is_premium").await.unwrap();
    assert_eq!(result.as_deref(), Some("true"));
    assert_eq!(kv::list_keys(&pool).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_value() {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();

    kv::set_value(&pool, "a", "1").await.unwrap();

    assert!(kv::delete_value(&pool, "a").await.unwrap());
    assert!(!kv::delete_value(&pool, "a").await.unwrap());
    assert_eq!(kv::get_value(&pool, "a").await.unwrap(), None);
}

#[tokio::test]
async fn test_list_keys_sorted() {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();

    for key in ["@glacier_history", "@glacier_downloads", "@glacier_favorites"] {
        kv::set_value(&pool, key, "[]").await.unwrap();
    }

    let keys = kv::list_keys(&pool).await.unwrap();
    assert_eq!(
        keys,
        vec!["@glacier_downloads", "@glacier_favorites", "@glacier_history"]
    );
}

#[tokio::test]
async fn test_store_survives_reopen() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_url = format!("sqlite://{}", temp_dir.path().join("glacier.db").display());

    {
        let store = SqliteStore::open(&db_url).await.unwrap();
        store
            .set("@glacier_download_quality", "\"high\"".to_string())
            .await
            .unwrap();
        store.pool().close().await;
    }

    let store = SqliteStore::open(&db_url).await.unwrap();
    let value = store.get("@glacier_download_quality").await.unwrap();
    assert_eq!(value.as_deref(), Some("\"high\""));
}

#[tokio::test]
async fn test_trait_object_usage() {
    let store: Box<dyn KeyValueStore> =
        Box::new(SqliteStore::open("sqlite::memory:").await.unwrap());

    store.set("k", "v".to_string()).await.unwrap();
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
}
