//! Dense DP table over `(a, b, c, p, d, e, f)`.

use asc_core::{
    derive_track_state, pity_tier, recorded_attempts, Attempt, GoalCells, PresetConfig, Track,
};
use asc_core::{NUM_ATTEMPTS, PITY_TIERS};

use crate::recursion::Evaluator;

/// Table extents: `n` attempts per track, `pmax` pity tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dims {
    pub n: usize,
    pub pmax: usize,
}

impl Dims {
    /// The game's dimensions (10 attempts, 6 tiers).
    pub const STANDARD: Dims = Dims {
        n: NUM_ATTEMPTS,
        pmax: PITY_TIERS,
    };

    pub const fn new(n: usize, pmax: usize) -> Self {
        Self { n, pmax }
    }

    /// Total slots: `(n+1)^6 * pmax`.
    pub fn len(&self) -> usize {
        (self.n + 1).pow(6) * self.pmax
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cells written by the build pass (`a <= n-d`, `b <= n-e`); the rest stay zero.
    pub fn visited_cells(&self) -> usize {
        let n1 = self.n + 1;
        let tri = n1 * (n1 + 1) / 2;
        tri * tri * n1 * n1 * self.pmax
    }

    /// Mixed-radix index, `f` fastest:
    /// `(((((a·(n+1)+b)·(n+1)+c)·pmax+p)·(n+1)+d)·(n+1)+e)·(n+1)+f`.
    #[inline(always)]
    pub fn index(&self, s: Params) -> usize {
        let n1 = self.n + 1;
        (((((s.a * n1 + s.b) * n1 + s.c) * self.pmax + s.p) * n1 + s.d) * n1 + s.e) * n1 + s.f
    }
}

/// One state of the DP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Params {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub p: usize,
    pub d: usize,
    pub e: usize,
    pub f: usize,
}

impl Params {
    /// Fresh stone: every attempt left, top pity tier, full negative budget.
    pub fn start(dims: Dims, negative_goal: usize) -> Self {
        Self {
            a: dims.n,
            b: dims.n,
            c: dims.n,
            p: dims.pmax - 1,
            d: 0,
            e: 0,
            f: negative_goal,
        }
    }

    /// Project a full history into DP coordinates.
    ///
    /// Returns `None` once the negative track has more successes than the preset
    /// tolerates; no table cell describes that state and every track is worth zero.
    /// Also `None` for a history holding more than `dims.n` attempts on one track,
    /// which `History::record` never produces.
    pub fn from_history(history: &[Attempt], preset: &PresetConfig, dims: Dims) -> Option<Self> {
        if Track::ALL
            .iter()
            .any(|&t| recorded_attempts(history, t) > dims.n)
        {
            return None;
        }
        let first = derive_track_state(
            history,
            Track::FirstPositive,
            dims.n,
            preset.first_positive_goal as i32,
        );
        let second = derive_track_state(
            history,
            Track::SecondPositive,
            dims.n,
            preset.second_positive_goal as i32,
        );
        let negative = derive_track_state(history, Track::Negative, dims.n, preset.negative_goal as i32);
        if negative.remaining_goal < 0 {
            return None;
        }
        Some(Self {
            a: first.remaining_attempts as usize,
            b: second.remaining_attempts as usize,
            c: negative.remaining_attempts as usize,
            p: pity_tier(history, dims.pmax),
            d: first.successes as usize,
            e: second.successes as usize,
            f: (negative.remaining_goal as usize).min(dims.n),
        })
    }
}

/// Immutable probability table for one preset.
pub struct DpTable {
    dims: Dims,
    values: Box<[f64]>,
}

impl DpTable {
    /// Fill the table in dependency order.
    ///
    /// Loop nest (outer to inner): `d` n..=0, `a` 0..=n-d, `e` n..=0, `b` 0..=n-e,
    /// `c` 0..=n, `f` 0..=n, `p` 0..pmax. Every read made by a cell (`d+1`, `e+1`,
    /// `a-1`, `b-1`, `c-1`, or `f := c < f`) lands on a cell finalized earlier in
    /// this order. Changing the nest or dropping the `c < f` alias breaks that.
    ///
    /// # Panics
    /// Panics if `goals` was built for a different `n`.
    pub fn build(dims: Dims, goals: &GoalCells) -> Self {
        assert_eq!(goals.n(), dims.n, "goal matrix size does not match table dims");
        let n = dims.n;
        let mut values = vec![0.0f64; dims.len()];

        for d in (0..=n).rev() {
            for a in 0..=(n - d) {
                for e in (0..=n).rev() {
                    for b in 0..=(n - e) {
                        for c in 0..=n {
                            for f in 0..=n {
                                for p in 0..dims.pmax {
                                    let s = Params { a, b, c, p, d, e, f };
                                    let value = if goals.is_goal(d, e) && a == 0 && b == 0 && c <= f {
                                        1.0
                                    } else if c < f {
                                        values[dims.index(Params { f: c, ..s })]
                                    } else {
                                        Evaluator::new(dims, &values).best(s)
                                    };
                                    values[dims.index(s)] = value;
                                }
                            }
                        }
                    }
                }
            }
        }

        Self {
            dims,
            values: values.into_boxed_slice(),
        }
    }

    #[inline(always)]
    pub fn get(&self, s: Params) -> f64 {
        self.values[self.dims.index(s)]
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Track recursions reading this (finished) table.
    pub fn evaluator(&self) -> Evaluator<'_> {
        Evaluator::new(self.dims, &self.values)
    }
}

impl std::fmt::Debug for DpTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DpTable")
            .field("dims", &self.dims)
            .field("len", &self.values.len())
            .finish()
    }
}
