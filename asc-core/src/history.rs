//! Attempt history and per-track state derivation.
//!
//! `History` is the sole source of truth for a session. Every derived quantity
//! is recomputed by replaying it from scratch.

use serde::{Deserialize, Serialize};

use crate::track::{Attempt, Outcome, Track};

/// Per-track projection of the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackState {
    /// Attempts still available on this track (starts at `n`).
    pub remaining_attempts: i32,
    /// Goal minus successes. Goes negative once successes exceed the goal.
    pub remaining_goal: i32,
    pub successes: i32,
}

/// Replay `history` restricted to `track`.
pub fn derive_track_state(history: &[Attempt], track: Track, num_attempts: usize, goal: i32) -> TrackState {
    let mut state = TrackState {
        remaining_attempts: num_attempts as i32,
        remaining_goal: goal,
        successes: 0,
    };
    for attempt in history.iter().filter(|a| a.track == track) {
        state.remaining_attempts -= 1;
        if attempt.outcome.is_success() {
            state.remaining_goal -= 1;
            state.successes += 1;
        }
    }
    state
}

/// Number of attempts already recorded on `track`.
pub fn recorded_attempts(history: &[Attempt], track: Track) -> usize {
    history.iter().filter(|a| a.track == track).count()
}

/// Ordered, append-only attempt log with a per-track cap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    attempts: Vec<Attempt>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `attempt` unless its track already holds `cap` attempts.
    ///
    /// Returns whether the attempt was recorded. A capped track is a silent no-op.
    pub fn record(&mut self, attempt: Attempt, cap: usize) -> bool {
        if recorded_attempts(&self.attempts, attempt.track) >= cap {
            return false;
        }
        self.attempts.push(attempt);
        true
    }

    /// Remove the most recent attempt, if any.
    pub fn undo(&mut self) -> Option<Attempt> {
        self.attempts.pop()
    }

    pub fn clear(&mut self) {
        self.attempts.clear();
    }

    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    pub fn count(&self, track: Track) -> usize {
        recorded_attempts(&self.attempts, track)
    }

    /// Outcomes of `track` in recording order.
    pub fn outcomes(&self, track: Track) -> impl Iterator<Item = Outcome> + '_ {
        self.attempts
            .iter()
            .filter(move |a| a.track == track)
            .map(|a| a.outcome)
    }
}

impl From<Vec<Attempt>> for History {
    /// Wraps an already-ordered attempt list as-is; caps are not re-applied.
    fn from(attempts: Vec<Attempt>) -> Self {
        Self { attempts }
    }
}
