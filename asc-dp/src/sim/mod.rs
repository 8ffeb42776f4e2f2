//! Monte Carlo play-out of the table's policy.
//!
//! Each game follows [`best_track`] from a start state and rolls outcomes at the
//! decoded pity rate. The observed win rate should converge on `table.get(start)`.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;
use rayon::prelude::*;

use asc_core::{decoded_pity, GoalCells, Track};

use crate::recursion::best_track;
use crate::table::{DpTable, Params};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationReport {
    pub games: u64,
    pub successes: u64,
    /// Table value at the start state.
    pub expected: f64,
}

impl SimulationReport {
    pub fn success_rate(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.successes as f64 / self.games as f64
    }

    /// Binomial standard error of the observed rate around `expected`.
    pub fn std_error(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        (self.expected * (1.0 - self.expected) / self.games as f64).sqrt()
    }
}

/// Play `games` independent games from `start`.
///
/// Game `i` draws from ChaCha8 stream `i` of `seed`, so results do not depend on
/// how rayon splits the range.
pub fn simulate(table: &DpTable, goals: &GoalCells, start: Params, games: u64, seed: u64) -> SimulationReport {
    let successes = (0..games)
        .into_par_iter()
        .map(|i| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            rng.set_stream(i);
            u64::from(play_once(table, goals, start, &mut rng))
        })
        .sum::<u64>();
    SimulationReport {
        games,
        successes,
        expected: table.get(start),
    }
}

/// One game. Returns whether it ended on a goal cell.
pub fn play_once<R: Rng + ?Sized>(table: &DpTable, goals: &GoalCells, start: Params, rng: &mut R) -> bool {
    let dims = table.dims();
    let ev = table.evaluator();
    let top = dims.pmax - 1;
    let mut s = start;

    loop {
        let track = match best_track(&ev.all(s)) {
            Some(t) => t,
            // Lost position: keep spending attempts so the stone still completes.
            None => match Track::ALL.into_iter().find(|&t| remaining(s, t) > 0) {
                Some(t) => t,
                None => break,
            },
        };

        let success = rng.gen_bool(decoded_pity(s.p));
        s.p = if success { s.p.saturating_sub(1) } else { (s.p + 1).min(top) };
        match track {
            Track::FirstPositive => {
                s.a -= 1;
                if success {
                    s.d += 1;
                }
            }
            Track::SecondPositive => {
                s.b -= 1;
                if success {
                    s.e += 1;
                }
            }
            Track::Negative => {
                s.c -= 1;
                if success {
                    if s.f == 0 {
                        return false;
                    }
                    s.f -= 1;
                }
            }
        }
    }

    goals.is_goal(s.d, s.e)
}

fn remaining(s: Params, track: Track) -> usize {
    match track {
        Track::FirstPositive => s.a,
        Track::SecondPositive => s.b,
        Track::Negative => s.c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Dims;

    fn small() -> (DpTable, GoalCells, Params) {
        let dims = Dims::new(4, 6);
        let goals = GoalCells::from_goals(4, 0, 0, 5);
        let table = DpTable::build(dims, &goals);
        (table, goals, Params::start(dims, 2))
    }

    #[test]
    fn observed_rate_tracks_table_value() {
        let (table, goals, start) = small();
        let report = simulate(&table, &goals, start, 20_000, 42);
        assert_eq!(report.games, 20_000);
        assert!(report.expected > 0.0 && report.expected < 1.0);
        let diff = (report.success_rate() - report.expected).abs();
        assert!(
            diff <= 5.0 * report.std_error() + 1e-3,
            "observed {} vs expected {} (se {})",
            report.success_rate(),
            report.expected,
            report.std_error()
        );
    }

    #[test]
    fn same_seed_same_result() {
        let (table, goals, start) = small();
        let a = simulate(&table, &goals, start, 2_000, 7);
        let b = simulate(&table, &goals, start, 2_000, 7);
        assert_eq!(a, b);
    }

    #[test]
    fn unreachable_goal_never_wins() {
        let dims = Dims::new(4, 6);
        let goals = GoalCells::from_goals(4, 0, 0, 9);
        let table = DpTable::build(dims, &goals);
        let report = simulate(&table, &goals, Params::start(dims, 2), 500, 1);
        assert_eq!(report.expected, 0.0);
        assert_eq!(report.successes, 0);
    }

    #[test]
    fn empty_run_reports_zero() {
        let (table, goals, start) = small();
        let report = simulate(&table, &goals, start, 0, 0);
        assert_eq!(report.success_rate(), 0.0);
        assert_eq!(report.std_error(), 0.0);
    }
}
