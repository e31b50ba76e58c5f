//! `SQLite` key-value store
//!
//! Persisted player state lives in a single `key_value` table: one row per
//! key, JSON text values, last write wins.
//!
//! # Example
//!
//! ```rust,no_run
//! use glacier_storage::{create_pool, run_migrations, kv};
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite::memory:").await?;
//! run_migrations(&pool).await?;
//!
//! kv::set_value(&pool, "@glacier_favorites", "[]").await?;
//! let favorites = kv::get_value(&pool, "@glacier_favorites").await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use glacier_core::KeyValueStore;
use sqlx::{Row, SqlitePool};

use crate::error::{Result, StorageError};

/// Get the value stored under `key`
///
/// # Returns
///
/// Returns `Ok(Some(value))` if the key exists, `Ok(None)` if not found
///
/// # Errors
///
/// Returns an error if the database query fails
pub async fn get_value(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
    let row = sqlx::query("SELECT value FROM key_value WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => Ok(Some(row.try_get("value")?)),
        None => Ok(None),
    }
}

/// Store `value` under `key`, replacing any previous value
///
/// # Errors
///
/// Returns an error if the database query fails
pub async fn set_value(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        "INSERT INTO key_value (key, value, updated_at)
         VALUES (?, ?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
    )
    .bind(key)
    .bind(value)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete `key`
///
/// # Returns
///
/// Returns `Ok(true)` if a value was deleted, `Ok(false)` if the key was absent
///
/// # Errors
///
/// Returns an error if the database query fails
pub async fn delete_value(pool: &SqlitePool, key: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM key_value WHERE key = ?")
        .bind(key)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// List all stored keys in lexical order
///
/// # Errors
///
/// Returns an error if the database query fails
pub async fn list_keys(pool: &SqlitePool) -> Result<Vec<String>> {
    let rows = sqlx::query("SELECT key FROM key_value ORDER BY key")
        .fetch_all(pool)
        .await?;

    rows.into_iter()
        .map(|row| row.try_get::<String, _>("key").map_err(StorageError::from))
        .collect()
}

/// [`KeyValueStore`] backed by a `SQLite` pool
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Wrap an existing pool; migrations must already have run
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` and apply migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn open(database_url: &str) -> Result<Self> {
        let pool = crate::create_pool(database_url).await?;
        crate::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Get the pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> glacier_core::Result<Option<String>> {
        Ok(get_value(&self.pool, key).await?)
    }

    async fn set(&self, key: &str, value: String) -> glacier_core::Result<()> {
        Ok(set_value(&self.pool, key, &value).await?)
    }
}
