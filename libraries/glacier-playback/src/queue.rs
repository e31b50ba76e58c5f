//! Play queue
//!
//! An ordered list of tracks that next/previous traverse. Position is not
//! stored: the current track is located by id on every step, so the queue
//! can be replaced or reordered freely while something is playing.

use glacier_core::{Track, TrackId};
use rand::seq::SliceRandom;
use rand::Rng;

/// Ordered play queue; duplicates allowed
#[derive(Debug, Clone, Default)]
pub struct Queue {
    tracks: Vec<Track>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole queue
    pub fn replace(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
    }

    /// All tracks in play order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Index of the first track with `id`
    pub fn position_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    /// Track after the one with `id`, if it is in the queue and not last
    pub fn successor(&self, id: &TrackId) -> Option<&Track> {
        self.position_of(id).and_then(|i| self.tracks.get(i + 1))
    }

    /// Track before the one with `id`, wrapping to the last track
    ///
    /// Wraps when `id` is first or not in the queue at all.
    pub fn predecessor_or_last(&self, id: &TrackId) -> Option<&Track> {
        match self.position_of(id) {
            Some(i) if i > 0 => self.tracks.get(i - 1),
            _ => self.tracks.last(),
        }
    }

    pub fn first(&self) -> Option<&Track> {
        self.tracks.first()
    }

    /// Uniformly random track whose id differs from `id`
    pub fn random_other<R: Rng + ?Sized>(&self, id: &TrackId, rng: &mut R) -> Option<&Track> {
        let candidates: Vec<&Track> = self.tracks.iter().filter(|t| &t.id != id).collect();
        candidates.choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn create_test_queue(ids: &[&str]) -> Queue {
        let mut queue = Queue::new();
        queue.replace(ids.iter().map(|id| Track::new(*id, *id)).collect());
        queue
    }

    #[test]
    fn successor_stops_at_end() {
        let queue = create_test_queue(&["a", "b", "c"]);
        assert_eq!(queue.successor(&"a".into()).unwrap().id.as_str(), "b");
        assert!(queue.successor(&"c".into()).is_none());
        assert!(queue.successor(&"zz".into()).is_none());
    }

    #[test]
    fn predecessor_wraps_to_last() {
        let queue = create_test_queue(&["a", "b", "c"]);
        assert_eq!(queue.predecessor_or_last(&"b".into()).unwrap().id.as_str(), "a");
        assert_eq!(queue.predecessor_or_last(&"a".into()).unwrap().id.as_str(), "c");
        assert_eq!(queue.predecessor_or_last(&"zz".into()).unwrap().id.as_str(), "c");
    }

    #[test]
    fn duplicates_resolve_to_first_occurrence() {
        let queue = create_test_queue(&["a", "b", "a", "c"]);
        assert_eq!(queue.position_of(&"a".into()), Some(0));
        assert_eq!(queue.successor(&"a".into()).unwrap().id.as_str(), "b");
    }

    #[test]
    fn random_other_never_returns_excluded_id() {
        let queue = create_test_queue(&["a", "b", "a", "c"]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let pick = queue.random_other(&"a".into(), &mut rng).unwrap();
            assert_ne!(pick.id.as_str(), "a");
        }
    }

    #[test]
    fn random_other_with_only_excluded_is_none() {
        let queue = create_test_queue(&["a", "a"]);
        let mut rng = StdRng::seed_from_u64(7);
        assert!(queue.random_other(&"a".into(), &mut rng).is_none());
        assert!(Queue::new().random_other(&"a".into(), &mut rng).is_none());
    }
}
