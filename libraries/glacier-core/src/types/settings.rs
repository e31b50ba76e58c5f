//! Flat settings objects persisted by the player
//!
//! Each object has a fixed set of keys with defaults; a stored object that
//! lacks a key gets that key's default.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Push notification preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    pub new_releases: bool,
    pub recommendations: bool,
    pub reminders: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            new_releases: true,
            recommendations: true,
            reminders: false,
        }
    }
}

/// Privacy preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrivacySettings {
    pub analytics: bool,

    /// When false, `play_track` leaves history untouched
    pub save_history: bool,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            analytics: true,
            save_history: true,
        }
    }
}

/// Offline download quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadQuality {
    Low,
    #[default]
    Medium,
    High,
}

impl DownloadQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for DownloadQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DownloadQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown download quality: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults() {
        let notifications = NotificationSettings::default();
        assert!(notifications.new_releases);
        assert!(notifications.recommendations);
        assert!(!notifications.reminders);

        let privacy = PrivacySettings::default();
        assert!(privacy.analytics);
        assert!(privacy.save_history);

        assert_eq!(DownloadQuality::default(), DownloadQuality::Medium);
    }

    #[test]
    fn partial_objects_fill_defaults() {
        let privacy: PrivacySettings = serde_json::from_value(json!({ "saveHistory": false })).unwrap();
        assert!(!privacy.save_history);
        assert!(privacy.analytics);
    }

    #[test]
    fn quality_parses_bare_words() {
        assert_eq!("high".parse::<DownloadQuality>(), Ok(DownloadQuality::High));
        assert!("ultra".parse::<DownloadQuality>().is_err());
        assert_eq!(serde_json::to_string(&DownloadQuality::Low).unwrap(), "\"low\"");
    }
}
