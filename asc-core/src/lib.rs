//! asc-core: tracks, attempt history, pity tiers, goal matrix and configuration.
//!
//! Everything here is a pure function of `(History, EngineConfig)`; the DP table
//! and the session controller live in `asc-dp` and `asc-session`.

pub mod config;
pub mod format;
pub mod goal;
pub mod history;
pub mod pity;
pub mod track;

pub use config::{ConfigError, EngineConfig, LoggingConfig, Preset, PresetConfig, PresetTable};
pub use format::{format_headline, format_percent, format_track_probability};
pub use goal::GoalCells;
pub use history::{derive_track_state, recorded_attempts, History, TrackState};
pub use pity::{decoded_pity, pity_tier};
pub use track::{Attempt, Outcome, ParseAttemptError, Track, NUM_TRACKS};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Attempts per track (`n`). Fixed by the game; not configurable.
pub const NUM_ATTEMPTS: usize = 10;

/// Number of discrete pity tiers (`pmax`): 25%..75% in 10% steps.
pub const PITY_TIERS: usize = 6;
