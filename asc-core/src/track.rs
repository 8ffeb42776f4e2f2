//! Track and attempt definitions.
//!
//! Tracks are numbered 1..=3 in the textual notation (`"1s"`, `"2f"`, `"3s"`),
//! and 0..=2 as array slots (`Track::slot`). The DP axis layout is hard-coded to
//! exactly these three tracks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const NUM_TRACKS: usize = 3;

/// One of the three attempt categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Track {
    FirstPositive,
    SecondPositive,
    Negative,
}

impl Track {
    /// All tracks in evaluation (and tie-break) order.
    pub const ALL: [Track; NUM_TRACKS] = [Track::FirstPositive, Track::SecondPositive, Track::Negative];

    /// Array slot 0..=2.
    pub fn slot(self) -> usize {
        match self {
            Track::FirstPositive => 0,
            Track::SecondPositive => 1,
            Track::Negative => 2,
        }
    }

    /// Track number 1..=3 as used by the textual notation.
    pub fn number(self) -> u8 {
        self.slot() as u8 + 1
    }

    /// Inverse of [`Track::number`].
    pub fn from_number(n: u8) -> Option<Track> {
        match n {
            1 => Some(Track::FirstPositive),
            2 => Some(Track::SecondPositive),
            3 => Some(Track::Negative),
            _ => None,
        }
    }

    pub fn is_positive(self) -> bool {
        !matches!(self, Track::Negative)
    }

    pub fn label(self) -> &'static str {
        match self {
            Track::FirstPositive => "first+",
            Track::SecondPositive => "second+",
            Track::Negative => "negative",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Fail,
}

impl Outcome {
    pub fn is_success(self) -> bool {
        matches!(self, Outcome::Success)
    }
}

/// A single recorded attempt. Immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attempt {
    pub track: Track,
    pub outcome: Outcome,
}

impl Attempt {
    pub fn new(track: Track, outcome: Outcome) -> Self {
        Self { track, outcome }
    }

    pub fn success(track: Track) -> Self {
        Self::new(track, Outcome::Success)
    }

    pub fn fail(track: Track) -> Self {
        Self::new(track, Outcome::Fail)
    }

    /// Parse a whitespace- or comma-separated list such as `"1s 2f,3f"`.
    pub fn parse_list(s: &str) -> Result<Vec<Attempt>, ParseAttemptError> {
        s.split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .map(str::parse)
            .collect()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseAttemptError {
    #[error("attempt token must look like `1s` or `3f`, got {0:?}")]
    Malformed(String),
    #[error("track must be 1, 2 or 3, got {0:?}")]
    UnknownTrack(String),
    #[error("outcome must be `s` or `f`, got {0:?}")]
    UnknownOutcome(String),
}

impl FromStr for Attempt {
    type Err = ParseAttemptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let mut chars = t.chars();
        let (Some(track_ch), Some(outcome_ch), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(ParseAttemptError::Malformed(t.to_string()));
        };
        let track = track_ch
            .to_digit(10)
            .and_then(|d| Track::from_number(d as u8))
            .ok_or_else(|| ParseAttemptError::UnknownTrack(t.to_string()))?;
        let outcome = match outcome_ch.to_ascii_lowercase() {
            's' => Outcome::Success,
            'f' => Outcome::Fail,
            _ => return Err(ParseAttemptError::UnknownOutcome(t.to_string())),
        };
        Ok(Attempt { track, outcome })
    }
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = if self.outcome.is_success() { 's' } else { 'f' };
        write!(f, "{}{}", self.track.number(), o)
    }
}
