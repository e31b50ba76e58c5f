//! Listening history
//!
//! Most-recent-first, one entry per track id, bounded size.

use glacier_core::{PlayedTrack, Track};

/// Bounded, deduplicated listening history
///
/// Replaying a track moves its entry to the front; when the history is
/// full the oldest entry is discarded.
#[derive(Debug, Clone)]
pub struct History {
    /// Entries, most recent first
    entries: Vec<PlayedTrack>,

    /// Maximum history size
    max_size: usize,
}

impl History {
    /// Create new history with specified maximum size
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_size,
        }
    }

    /// Record a play at `played_at` (epoch ms)
    pub fn record(&mut self, track: Track, played_at: i64) {
        self.entries.retain(|entry| entry.track.id != track.id);
        self.entries.insert(0, PlayedTrack::new(track, played_at));
        self.entries.truncate(self.max_size);
    }

    /// Replace all entries, e.g. with a persisted copy
    ///
    /// Entries are trusted to be most-recent-first; anything past the
    /// maximum size is dropped.
    pub fn replace(&mut self, mut entries: Vec<PlayedTrack>) {
        entries.truncate(self.max_size);
        self.entries = entries;
    }

    /// All entries, most recent first
    pub fn entries(&self) -> &[PlayedTrack] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Get maximum history size
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(100)
    }
}
