//! Player configuration

use crate::error::{PlaybackError, Result};
use glacier_core::DEFAULT_DURATION_SECS;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Tunables for the player, with the app's defaults
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlayerConfig {
    /// Maximum history entries kept (oldest dropped first)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Downloads allowed without premium
    #[serde(default = "default_free_download_limit")]
    pub free_download_limit: usize,

    /// Duration used when a track's duration string does not parse
    #[serde(default = "default_fallback_duration_secs")]
    pub fallback_duration_secs: u32,

    /// Past this many seconds, "previous" restarts the current track
    #[serde(default = "default_restart_threshold_secs")]
    pub restart_threshold_secs: u32,

    /// Ticker period; one tick advances playback by one second
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Prefix of persisted keys: `@<namespace>_favorites`, ...
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            free_download_limit: default_free_download_limit(),
            fallback_duration_secs: default_fallback_duration_secs(),
            restart_threshold_secs: default_restart_threshold_secs(),
            tick_interval_ms: default_tick_interval_ms(),
            namespace: default_namespace(),
        }
    }
}

impl PlayerConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// Environment variables prefixed `GLACIER_` override file values, e.g.
    /// `GLACIER_HISTORY_LIMIT=50`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if path.exists() {
                settings = settings.add_source(config::File::from(path));
            }
        }

        settings = settings.add_source(config::Environment::with_prefix("GLACIER").try_parsing(true));

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text, without environment overrides
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config: Self = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(PlaybackError::Config(
                "tick_interval_ms must be greater than zero".to_string(),
            ));
        }

        if self.history_limit == 0 {
            return Err(PlaybackError::Config(
                "history_limit must be greater than zero".to_string(),
            ));
        }

        if self.namespace.trim().is_empty() {
            return Err(PlaybackError::Config("namespace must not be empty".to_string()));
        }

        Ok(())
    }

    /// Ticker period as a `Duration`
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

// Default values
fn default_history_limit() -> usize {
    100
}

fn default_free_download_limit() -> usize {
    3
}

fn default_fallback_duration_secs() -> u32 {
    DEFAULT_DURATION_SECS
}

fn default_restart_threshold_secs() -> u32 {
    3
}

fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_namespace() -> String {
    "glacier".to_string()
}
