//! Track recursions: "probability of reaching the goal if this track is tried next".
//!
//! The same code serves the build pass (reading a partially filled array whose
//! needed cells are already final) and live queries (reading a finished table).

use asc_core::{decoded_pity, Track, NUM_TRACKS};

use crate::table::{Dims, Params};

/// Read-only view of a (possibly partially built) value array.
#[derive(Clone, Copy)]
pub struct Evaluator<'a> {
    dims: Dims,
    values: &'a [f64],
}

impl<'a> Evaluator<'a> {
    pub fn new(dims: Dims, values: &'a [f64]) -> Self {
        debug_assert_eq!(values.len(), dims.len());
        Self { dims, values }
    }

    #[inline(always)]
    fn at(&self, s: Params) -> f64 {
        self.values[self.dims.index(s)]
    }

    #[inline(always)]
    fn stepped_down(&self, p: usize) -> usize {
        p.saturating_sub(1)
    }

    #[inline(always)]
    fn stepped_up(&self, p: usize) -> usize {
        (p + 1).min(self.dims.pmax - 1)
    }

    /// Try the first positive track next. Zero when it has no attempts left.
    ///
    /// A success past `n` successes is impossible and contributes nothing.
    pub fn first(&self, s: Params) -> f64 {
        if s.a == 0 {
            return 0.0;
        }
        let rate = decoded_pity(s.p);
        let succ = if s.d < self.dims.n {
            rate * self.at(Params {
                a: s.a - 1,
                p: self.stepped_down(s.p),
                d: s.d + 1,
                ..s
            })
        } else {
            0.0
        };
        let fail = (1.0 - rate)
            * self.at(Params {
                a: s.a - 1,
                p: self.stepped_up(s.p),
                ..s
            });
        succ + fail
    }

    /// Mirror of [`Evaluator::first`] on `(b, e)`.
    pub fn second(&self, s: Params) -> f64 {
        if s.b == 0 {
            return 0.0;
        }
        let rate = decoded_pity(s.p);
        let succ = if s.e < self.dims.n {
            rate * self.at(Params {
                b: s.b - 1,
                p: self.stepped_down(s.p),
                e: s.e + 1,
                ..s
            })
        } else {
            0.0
        };
        let fail = (1.0 - rate)
            * self.at(Params {
                b: s.b - 1,
                p: self.stepped_up(s.p),
                ..s
            });
        succ + fail
    }

    /// Try the negative track next. A success with no budget left (`f == 0`) loses.
    pub fn negative(&self, s: Params) -> f64 {
        if s.c == 0 {
            return 0.0;
        }
        let rate = decoded_pity(s.p);
        let succ = if s.f > 0 {
            rate * self.at(Params {
                c: s.c - 1,
                p: self.stepped_down(s.p),
                f: s.f - 1,
                ..s
            })
        } else {
            0.0
        };
        let fail = (1.0 - rate)
            * self.at(Params {
                c: s.c - 1,
                p: self.stepped_up(s.p),
                ..s
            });
        succ + fail
    }

    pub fn track(&self, track: Track, s: Params) -> f64 {
        match track {
            Track::FirstPositive => self.first(s),
            Track::SecondPositive => self.second(s),
            Track::Negative => self.negative(s),
        }
    }

    /// `[first, second, negative]`.
    pub fn all(&self, s: Params) -> [f64; NUM_TRACKS] {
        [self.first(s), self.second(s), self.negative(s)]
    }

    /// Value of the best next track (zero if none helps).
    pub fn best(&self, s: Params) -> f64 {
        0.0f64
            .max(self.first(s))
            .max(self.second(s))
            .max(self.negative(s))
    }
}

/// True for every track tied at the maximum, provided the maximum is nonzero.
pub fn recommended_flags(probs: &[f64; NUM_TRACKS]) -> [bool; NUM_TRACKS] {
    let max = probs.iter().copied().fold(0.0f64, f64::max);
    if max == 0.0 {
        return [false; NUM_TRACKS];
    }
    probs.map(|x| x == max)
}

/// First track (in evaluation order) at the nonzero maximum.
pub fn best_track(probs: &[f64; NUM_TRACKS]) -> Option<Track> {
    let flags = recommended_flags(probs);
    Track::ALL.into_iter().find(|t| flags[t.slot()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_mark_every_tie_at_nonzero_max() {
        assert_eq!(recommended_flags(&[0.2, 0.2, 0.1]), [true, true, false]);
        assert_eq!(recommended_flags(&[0.1, 0.2, 0.3]), [false, false, true]);
        assert_eq!(recommended_flags(&[0.0, 0.0, 0.0]), [false; 3]);
    }

    #[test]
    fn best_track_breaks_ties_in_evaluation_order() {
        assert_eq!(best_track(&[0.2, 0.2, 0.2]), Some(Track::FirstPositive));
        assert_eq!(best_track(&[0.1, 0.3, 0.3]), Some(Track::SecondPositive));
        assert_eq!(best_track(&[0.0, 0.0, 0.0]), None);
    }

    #[test]
    fn exhausted_tracks_are_worth_zero() {
        let dims = Dims::new(2, 3);
        let values = vec![1.0; dims.len()];
        let ev = Evaluator::new(dims, &values);
        let s = Params {
            a: 0,
            b: 0,
            c: 0,
            p: 1,
            d: 0,
            e: 0,
            f: 1,
        };
        assert_eq!(ev.all(s), [0.0, 0.0, 0.0]);
        assert_eq!(ev.best(s), 0.0);
    }

    #[test]
    fn branches_weight_by_decoded_tier() {
        // All-ones table: succ + fail = rate + (1 - rate) = 1 whenever both branches exist.
        let dims = Dims::new(2, 3);
        let values = vec![1.0; dims.len()];
        let ev = Evaluator::new(dims, &values);
        let s = Params {
            a: 1,
            b: 1,
            c: 1,
            p: 2,
            d: 0,
            e: 0,
            f: 0,
        };
        assert!((ev.first(s) - 1.0).abs() < 1e-12);
        assert!((ev.second(s) - 1.0).abs() < 1e-12);
        // f == 0: only the fail branch survives.
        assert!((ev.negative(s) - (1.0 - decoded_pity(2))).abs() < 1e-12);
        // d == n: the success branch is impossible.
        let capped = Params { d: 2, a: 1, ..s };
        assert!((ev.first(capped) - (1.0 - decoded_pity(2))).abs() < 1e-12);
    }
}
