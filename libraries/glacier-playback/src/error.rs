//! Error types for playback management

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Playback errors
///
/// Transport and queue operations never fail; these cover setup only.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Store or catalog collaborator failure
    #[error(transparent)]
    Store(#[from] glacier_core::GlacierError),

    /// No tokio runtime to run the ticker and writer on
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// JSON encoding/decoding error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<config::ConfigError> for PlaybackError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

/// Why a download was refused
///
/// Returned as a value so callers can branch on it, e.g. show an upgrade
/// prompt on [`DownloadRejection::LimitReached`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadRejection {
    /// A track with the same id is already downloaded
    #[error("track is already downloaded")]
    AlreadyDownloaded,

    /// Free tier allowance used up
    #[error("free download limit reached")]
    LimitReached,
}

impl DownloadRejection {
    /// Stable reason code (`already_downloaded`, `limit_reached`)
    pub fn reason(&self) -> &'static str {
        match self {
            Self::AlreadyDownloaded => "already_downloaded",
            Self::LimitReached => "limit_reached",
        }
    }
}
