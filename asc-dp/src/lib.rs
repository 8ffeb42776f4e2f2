//! Optimal-play probability table for the three-track ability stone.
//!
//! ## State axes
//! - `a`, `b`: attempts left on the first / second positive track (`0..=n`).
//! - `c`: attempts left on the negative track (`0..=n`).
//! - `p`: pity tier (`0..pmax`), success rate [`asc_core::decoded_pity`].
//! - `d`, `e`: successes so far on the first / second positive track.
//! - `f`: negative successes still tolerated before the stone fails.
//!
//! The table stores, per state, the probability of eventually landing on a goal
//! cell when the best track is chosen at every remaining step. See
//! [`table::DpTable::build`] for the (load-bearing) iteration order.

#![allow(clippy::needless_range_loop)]

pub mod recursion;
pub mod sim;
pub mod table;

pub use recursion::{best_track, recommended_flags, Evaluator};
pub use sim::{simulate, SimulationReport};
pub use table::{Dims, DpTable, Params};
