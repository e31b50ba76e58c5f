//! Core types for playback management

use glacier_core::TrackId;
use serde::{Deserialize, Serialize};

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop advancing at the end of the queue
    #[default]
    Off,

    /// Loop entire queue
    All,

    /// Loop current track only
    One,
}

impl RepeatMode {
    /// Next mode in the `off → all → one → off` cycle
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }
}

/// Result of a single ticker step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Ticking conditions do not hold; nothing changed
    Idle,

    /// `current_time` advanced by one second
    Advanced,

    /// The track reached its end and track-end handling ran
    TrackEnded,
}

/// The fields the ticker depends on
///
/// Whenever this changes the ticker is torn down and, if
/// [`TickerKey::should_run`] holds, armed again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerKey {
    pub is_playing: bool,
    pub track_id: Option<TrackId>,
    pub duration: u32,
    pub is_seeking: bool,
    pub repeat: RepeatMode,
    pub shuffle_enabled: bool,
}

impl TickerKey {
    /// Whether a ticker should be running for this state
    pub fn should_run(&self) -> bool {
        self.is_playing && self.track_id.is_some() && self.duration > 0 && !self.is_seeking
    }
}

/// Snapshot of transport state, for screens that render the player
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackStatus {
    pub current_track: Option<glacier_core::Track>,
    pub is_playing: bool,
    pub current_time: u32,
    pub duration: u32,
    /// `current_time / duration × 100`, 0 when duration is 0
    pub progress: f64,
    pub is_seeking: bool,
    pub repeat_mode: RepeatMode,
    pub shuffle_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_cycles_through_all_modes() {
        let mut mode = RepeatMode::default();
        assert_eq!(mode, RepeatMode::Off);
        mode = mode.cycle();
        assert_eq!(mode, RepeatMode::All);
        mode = mode.cycle();
        assert_eq!(mode, RepeatMode::One);
        mode = mode.cycle();
        assert_eq!(mode, RepeatMode::Off);
    }

    #[test]
    fn ticker_key_requires_every_condition() {
        let running = TickerKey {
            is_playing: true,
            track_id: Some(TrackId::new("1")),
            duration: 10,
            is_seeking: false,
            repeat: RepeatMode::Off,
            shuffle_enabled: false,
        };
        assert!(running.should_run());

        assert!(!TickerKey { is_playing: false, ..running.clone() }.should_run());
        assert!(!TickerKey { track_id: None, ..running.clone() }.should_run());
        assert!(!TickerKey { duration: 0, ..running.clone() }.should_run());
        assert!(!TickerKey { is_seeking: true, ..running }.should_run());
    }
}
