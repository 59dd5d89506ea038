//! Fallback destroyed-state tracking.
//!
//! Entity types whose primary store does not report "this instance has been
//! removed" embed a `DestroyedTracker` and are registered with
//! `DestroyedStateSource::Tracked`. The removal path marks the tracker before the
//! store finalizes deletion, so later notifications for the same instance see it
//! as destroyed even while the store's record still exists.

use std::sync::atomic::{AtomicBool, Ordering};

/// Per-instance destroyed flag. Starts unset; once set it never clears.
#[derive(Debug, Default)]
pub struct DestroyedTracker {
    destroyed: AtomicBool,
}

impl DestroyedTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the instance destroyed.
    ///
    /// Returns `true` only for the call that performed the transition.
    pub fn mark_destroyed(&self) -> bool {
        !self.destroyed.swap(true, Ordering::AcqRel)
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::Acquire)
    }
}

impl Clone for DestroyedTracker {
    /// A cloned instance is a distinct value; it starts with the source's current state.
    fn clone(&self) -> Self {
        Self {
            destroyed: AtomicBool::new(self.is_destroyed()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_defaults_to_not_destroyed() {
        assert!(!DestroyedTracker::new().is_destroyed());
    }

    #[test]
    fn test_mark_is_idempotent() {
        let tracker = DestroyedTracker::new();

        assert!(tracker.mark_destroyed());
        assert!(!tracker.mark_destroyed());
        assert!(tracker.is_destroyed());
    }

    #[test]
    fn test_clone_copies_state() {
        let tracker = DestroyedTracker::new();
        tracker.mark_destroyed();

        let copy = tracker.clone();
        assert!(copy.is_destroyed());
    }

    #[test]
    fn test_single_transition_under_contention() {
        let tracker = Arc::new(DestroyedTracker::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let tracker = Arc::clone(&tracker);
                thread::spawn(move || tracker.mark_destroyed())
            })
            .collect();

        let transitions = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|marked| *marked)
            .count();

        assert_eq!(transitions, 1);
        assert!(tracker.is_destroyed());
    }
}
