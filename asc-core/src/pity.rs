//! Pity tiers.
//!
//! Tier index `p` runs 0..pmax. A higher index is a *higher* success rate:
//! failing escalates toward the ceiling, succeeding steps back down.

use crate::track::Attempt;

/// Success probability of tier `p`: 25%, 35%, .., 75%.
#[inline(always)]
pub fn decoded_pity(p: usize) -> f64 {
    0.25 + p as f64 * 0.1
}

/// Fold the full history into the current tier, starting at `pmax - 1`.
///
/// Order-dependent; every attempt (any track) moves the tier by one step.
pub fn pity_tier(history: &[Attempt], pmax: usize) -> usize {
    debug_assert!(pmax > 0);
    let top = pmax - 1;
    history.iter().fold(top, |p, attempt| {
        if attempt.outcome.is_success() {
            p.saturating_sub(1)
        } else {
            (p + 1).min(top)
        }
    })
}
