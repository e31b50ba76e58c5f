//! Key-value persistence trait

use crate::error::Result;
use async_trait::async_trait;

/// String-keyed store of JSON blobs
///
/// The player mirrors each piece of library state into its own key. The
/// store is passive: it never evicts and never calls back.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if absent
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: String) -> Result<()>;
}
