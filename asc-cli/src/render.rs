//! Plain-text views of snapshots and goal matrices.

use std::fmt::Write as _;

use asc_core::{GoalCells, History, Track};
use asc_session::Snapshot;

const GOAL: char = '■';
const NOT_GOAL: char = '·';
const HERE: char = '★';

/// Header line plus one row per track: label, strip, probability, recommendation mark.
pub fn render_snapshot(s: &Snapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "preset {}  |  pity tier {}  |  success rate {}",
        s.preset, s.pity_tier, s.headline_probability
    );
    for track in Track::ALL {
        let i = track.slot();
        let mark = if s.recommended[i] { "  <- recommended" } else { "" };
        let _ = writeln!(
            out,
            "  {} {:<9} {}  {:>7}{}",
            track.number(),
            track.label(),
            s.strips[i],
            s.per_track_probability[i],
            mark
        );
    }
    out
}

/// Successes so far on the two positive tracks.
pub fn position(history: &History) -> (usize, usize) {
    let successes = |t| history.outcomes(t).filter(|o| o.is_success()).count();
    (successes(Track::FirstPositive), successes(Track::SecondPositive))
}

/// Goal matrix, rows = first-track successes, columns = second-track successes.
///
/// `here` marks the current position with a star.
pub fn render_grid(goals: &GoalCells, here: Option<(usize, usize)>) -> String {
    let n = goals.n();
    let mut out = String::from("     ");
    for j in 0..=n {
        let _ = write!(out, "{j:>3}");
    }
    out.push('\n');
    for i in 0..=n {
        let _ = write!(out, "  {i:>2} ");
        for j in 0..=n {
            let glyph = if here == Some((i, j)) {
                HERE
            } else if goals.is_goal(i, j) {
                GOAL
            } else {
                NOT_GOAL
            };
            let _ = write!(out, "  {glyph}");
        }
        out.push('\n');
    }
    out
}
