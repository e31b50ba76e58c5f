//! Property-based tests for the player controller
//!
//! Uses proptest to verify invariants across many random inputs.

use glacier_core::Track;
use glacier_playback::{History, PlayerController, TickOutcome};
use proptest::prelude::*;
use std::collections::HashSet;

// ===== Helpers =====

fn track_with_secs(id: &str, secs: u32) -> Track {
    Track::new(id, format!("Track {id}")).with_duration(format!("{}:{:02}", secs / 60, secs % 60))
}

fn arbitrary_ids() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-e]", 1..200)
}

// ===== Property Tests =====

proptest! {
    /// Property: seek_to lands on round(p/100 × duration), within bounds
    #[test]
    fn seek_to_matches_rounded_fraction(
        duration in 1u32..36_000,
        percentage in 0.0f64..=100.0
    ) {
        let mut controller = PlayerController::default();
        controller.play_track(track_with_secs("a", duration), None);
        prop_assert_eq!(controller.duration(), duration);

        controller.start_seeking();
        controller.seek_to(percentage);

        let expected = (percentage / 100.0 * f64::from(duration)).round() as u32;
        prop_assert_eq!(controller.current_time(), expected.min(duration));
        prop_assert!(controller.current_time() <= controller.duration());
        prop_assert!(!controller.is_seeking());
    }

    /// Property: current_time never exceeds duration, whatever is seeked
    #[test]
    fn time_stays_within_duration(
        duration in 1u32..600,
        seeks in prop::collection::vec(-1_000.0f64..1_000.0, 1..20),
        ticks in 0usize..1_500
    ) {
        let mut controller = PlayerController::default();
        controller.play_track(track_with_secs("a", duration), None);

        for seconds in seeks {
            controller.seek_to_time(seconds);
            prop_assert!(controller.current_time() <= duration);
        }
        for _ in 0..ticks {
            controller.tick();
            prop_assert!(controller.current_time() < duration.max(1));
        }
        prop_assert!(controller.progress() <= 100.0);
    }

    /// Property: history is deduplicated, bounded, newest first
    #[test]
    fn history_dedup_and_bound(ids in arbitrary_ids(), limit in 1usize..10) {
        let mut history = History::new(limit);
        for (played_at, id) in ids.iter().enumerate() {
            history.record(Track::new(id.as_str(), "t"), played_at as i64);
        }

        let entries = history.entries();
        prop_assert!(entries.len() <= limit);

        let unique: HashSet<_> = entries.iter().map(|e| e.track.id.clone()).collect();
        prop_assert_eq!(unique.len(), entries.len());

        prop_assert!(entries.windows(2).all(|w| w[0].played_at > w[1].played_at));

        let last = ids.last().unwrap();
        prop_assert_eq!(entries[0].track.id.as_str(), last.as_str());
    }

    /// Property: next never leaves the queue once playing from it
    #[test]
    fn next_stays_in_queue(len in 1usize..20, start in 0usize..20, steps in 1usize..50, shuffle: bool) {
        let queue: Vec<Track> = (0..len).map(|i| track_with_secs(&i.to_string(), 60)).collect();
        let start = start % len;

        let mut controller = PlayerController::default().with_seed(7);
        controller.play_track(queue[start].clone(), Some(queue.clone()));
        if shuffle {
            controller.toggle_shuffle();
        }

        for _ in 0..steps {
            controller.play_next();
            let current = controller.current_track().unwrap();
            prop_assert!(queue.iter().any(|t| t.id == current.id));
            prop_assert_eq!(controller.current_time(), 0);
        }
    }

    /// Property: ticking while paused never changes anything
    #[test]
    fn paused_ticks_are_idle(secs in 1u32..600, at in 0.0f64..=100.0, ticks in 1usize..100) {
        let mut controller = PlayerController::default();
        controller.play_track(track_with_secs("a", secs), None);
        controller.seek_to(at);
        controller.pause();
        let before = controller.current_time();

        for _ in 0..ticks {
            prop_assert_eq!(controller.tick(), TickOutcome::Idle);
        }
        prop_assert_eq!(controller.current_time(), before);
    }
}
