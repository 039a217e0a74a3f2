//! Debounce filter for repeated tag reads
//!
//! A tag resting on the reader produces a stream of identical reads; only
//! the first one within the window should trigger playback. The filter is a
//! pure function over an explicit state value: the dispatch loop passes the
//! current state in and carries the returned state forward, so there is no
//! module-level mutability and the policy is testable without hardware.

use std::time::{Duration, Instant};

/// Default debounce window: repeated reads of the same tag within this
/// window are suppressed
pub const DEBOUNCE_DELAY: Duration = Duration::from_secs(2);

/// The last accepted read, carried between loop iterations
///
/// Empty at process start; never persisted across restarts. `last_read_at`
/// is monotonically non-decreasing across accepted reads (`Instant` is a
/// monotonic clock).
#[derive(Debug, Clone, Default)]
pub struct DebounceState {
    last_tag_id: Option<String>,
    last_read_at: Option<Instant>,
}

/// Suppresses same-tag repeats inside a fixed time window
#[derive(Debug, Clone)]
pub struct DebounceFilter {
    window: Duration,
}

impl DebounceFilter {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    /// Decide whether a read is a duplicate of the previous accepted read.
    ///
    /// Rejects iff the tag matches the previous accepted tag and the elapsed
    /// time is strictly less than the window; a delta exactly equal to the
    /// window is accepted. On accept, the returned state records this read.
    /// On reject, the state is returned unchanged: a tag left on the reader
    /// re-triggers once per window expiry instead of being suppressed
    /// indefinitely.
    pub fn accept(
        &self,
        state: DebounceState,
        tag_id: &str,
        now: Instant,
    ) -> (bool, DebounceState) {
        if let (Some(last_id), Some(last_at)) = (&state.last_tag_id, state.last_read_at) {
            if last_id == tag_id && now.duration_since(last_at) < self.window {
                return (false, state);
            }
        }

        let next = DebounceState {
            last_tag_id: Some(tag_id.to_string()),
            last_read_at: Some(now),
        };
        (true, next)
    }
}

impl Default for DebounceFilter {
    fn default() -> Self {
        Self::new(DEBOUNCE_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> DebounceFilter {
        DebounceFilter::new(Duration::from_secs(2))
    }

    #[test]
    fn test_first_read_always_accepted() {
        let t0 = Instant::now();
        let (accepted, _) = filter().accept(DebounceState::default(), "A", t0);
        assert!(accepted);
    }

    #[test]
    fn test_same_tag_within_window_rejected() {
        let f = filter();
        let t0 = Instant::now();
        let (_, state) = f.accept(DebounceState::default(), "A", t0);
        let (accepted, _) = f.accept(state, "A", t0 + Duration::from_millis(500));
        assert!(!accepted);
    }

    #[test]
    fn test_same_tag_at_exact_window_boundary_accepted() {
        // Rejection uses strict less-than, so delta == window accepts
        let f = filter();
        let t0 = Instant::now();
        let (_, state) = f.accept(DebounceState::default(), "A", t0);
        let (accepted, _) = f.accept(state, "A", t0 + Duration::from_secs(2));
        assert!(accepted);
    }

    #[test]
    fn test_same_tag_after_window_accepted() {
        let f = filter();
        let t0 = Instant::now();
        let (_, state) = f.accept(DebounceState::default(), "A", t0);
        let (accepted, _) = f.accept(state, "A", t0 + Duration::from_secs(3));
        assert!(accepted);
    }

    #[test]
    fn test_distinct_tags_at_zero_delta_both_accepted() {
        let f = filter();
        let t0 = Instant::now();
        let (first, state) = f.accept(DebounceState::default(), "A", t0);
        let (second, _) = f.accept(state, "B", t0);
        assert!(first);
        assert!(second);
    }

    #[test]
    fn test_rejected_read_does_not_refresh_window() {
        // A tag held on the reader: rejected reads keep the original
        // timestamp, so the repeat at t0+2.5s falls outside the window
        let f = filter();
        let t0 = Instant::now();
        let (_, state) = f.accept(DebounceState::default(), "A", t0);
        let (accepted, state) = f.accept(state, "A", t0 + Duration::from_millis(1900));
        assert!(!accepted);
        let (accepted, _) = f.accept(state, "A", t0 + Duration::from_millis(2500));
        assert!(accepted);
    }

    #[test]
    fn test_acceptance_pattern_for_read_sequence() {
        // [("A", 0s), ("A", 1s), ("A", 3s), ("B", 3.1s)] → [T, F, T, T]
        let f = filter();
        let t0 = Instant::now();
        let reads = [
            ("A", Duration::ZERO),
            ("A", Duration::from_secs(1)),
            ("A", Duration::from_secs(3)),
            ("B", Duration::from_millis(3100)),
        ];

        let mut state = DebounceState::default();
        let mut pattern = Vec::new();
        for (tag, offset) in reads {
            let (accepted, next) = f.accept(state, tag, t0 + offset);
            pattern.push(accepted);
            state = next;
        }

        assert_eq!(pattern, vec![true, false, true, true]);
    }
}
