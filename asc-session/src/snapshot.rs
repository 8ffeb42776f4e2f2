//! Display snapshot: the engine's whole output for one history.

use serde::Serialize;

use asc_core::{
    decoded_pity, format_headline, format_track_probability, pity_tier, History, Outcome, Preset, Track,
    NUM_TRACKS,
};
use asc_dp::{best_track, recommended_flags, Params};
use asc_oracle::PresetTables;

pub const GLYPH_SUCCESS: char = '◆';
pub const GLYPH_FAIL: char = '◈';
pub const GLYPH_EMPTY: char = '◇';

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub preset: Preset,
    pub pity_tier: usize,
    /// Success rate of the current pity tier.
    pub headline_probability: String,
    pub per_track_probability: [String; NUM_TRACKS],
    /// Raw values behind `per_track_probability`.
    pub probabilities: [f64; NUM_TRACKS],
    pub recommended: [bool; NUM_TRACKS],
    /// One glyph per attempt slot, in recording order.
    pub strips: [String; NUM_TRACKS],
}

impl Snapshot {
    /// Recompute everything from `history` against one preset's table.
    pub fn compute(tables: &PresetTables, history: &History) -> Self {
        let dims = tables.dims();
        let attempts = history.attempts();
        let p = pity_tier(attempts, dims.pmax);

        let probabilities = match Params::from_history(attempts, &tables.config, dims) {
            Some(s) => tables.table.evaluator().all(s),
            None => [0.0; NUM_TRACKS],
        };

        Self {
            preset: tables.preset,
            pity_tier: p,
            headline_probability: format_headline(decoded_pity(p)),
            per_track_probability: probabilities.map(format_track_probability),
            probabilities,
            recommended: recommended_flags(&probabilities),
            strips: Track::ALL.map(|t| strip(history, t, dims.n)),
        }
    }

    /// The single track to try next (first of any tie), if any track can still win.
    pub fn recommended_track(&self) -> Option<Track> {
        best_track(&self.probabilities)
    }
}

/// `slots` glyphs: recorded outcomes first, then empty slots.
pub fn strip(history: &History, track: Track, slots: usize) -> String {
    let mut out: String = history
        .outcomes(track)
        .map(|o| match o {
            Outcome::Success => GLYPH_SUCCESS,
            Outcome::Fail => GLYPH_FAIL,
        })
        .collect();
    let used = history.count(track);
    out.extend(std::iter::repeat(GLYPH_EMPTY).take(slots.saturating_sub(used)));
    out
}
