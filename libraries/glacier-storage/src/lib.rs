//! Glacier Player Storage
//!
//! Concrete collaborators for the Glacier player core:
//!
//! - [`SqliteStore`]: `SQLite`-backed [`KeyValueStore`], one row per key
//! - [`MemoryStore`]: in-process [`KeyValueStore`] for tests and previews
//! - [`StaticCatalog`]: [`CatalogProvider`] over in-memory content, with the
//!   bundled sample catalog
//!
//! # Example
//!
//! ```rust,no_run
//! use glacier_core::KeyValueStore;
//! use glacier_storage::SqliteStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteStore::open("sqlite://glacier.db").await?;
//! store.set("@glacier_is_premium", "true".to_string()).await?;
//! assert_eq!(store.get("@glacier_is_premium").await?.as_deref(), Some("true"));
//! # Ok(())
//! # }
//! ```
//!
//! [`KeyValueStore`]: glacier_core::KeyValueStore
//! [`CatalogProvider`]: glacier_core::CatalogProvider

mod error;

pub mod catalog;
pub mod kv;
pub mod memory;

pub use catalog::StaticCatalog;
pub use error::{Result, StorageError};
pub use kv::SqliteStore;
pub use memory::MemoryStore;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `sqlite://glacier.db`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(url = database_url, "creating sqlite pool");

    let in_memory = database_url.contains(":memory:");

    let mut options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .create_if_missing(true)
        .busy_timeout(std::time::Duration::from_secs(30));
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    // An in-memory database lives and dies with its connection, so keep
    // exactly one and never recycle it.
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    let pool = pool_options.connect_with(options).await?;

    Ok(pool)
}
