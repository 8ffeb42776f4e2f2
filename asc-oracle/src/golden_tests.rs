//! Golden values for the two shipped presets on the full-size tables.
//!
//! Each probe is `(a, b, c, p, d, e, f)` with the per-track values
//! `[first, second, negative]` expected at that state.

use crate::tables;
use asc_core::Preset;
use asc_dp::{Dims, Params};

const TOL: f64 = 1e-12;

fn params(a: usize, b: usize, c: usize, p: usize, d: usize, e: usize, f: usize) -> Params {
    Params { a, b, c, p, d, e, f }
}

fn assert_tracks(preset: Preset, s: Params, expected: [f64; 3]) {
    let t = tables().get(preset).unwrap();
    let got = t.table.evaluator().all(s);
    for (slot, (g, e)) in got.iter().zip(expected.iter()).enumerate() {
        assert!(
            (g - e).abs() < TOL,
            "{preset} {s:?} slot {slot}: got {g}, expected {e}"
        );
    }
}

// =============================================================================
// Fresh stone
// =============================================================================

#[test]
fn total_fourteen_fresh_stone() {
    let s = params(10, 10, 10, 5, 0, 0, 4);
    assert_tracks(
        Preset::TotalFourteen,
        s,
        [0.05919555623216688, 0.05919555623216688, 0.035396335823418536],
    );
    let t = tables().get(Preset::TotalFourteen).unwrap();
    assert_eq!(t.start(), s);
    assert!((t.start_value() - 0.05919555623216688).abs() < TOL);
}

#[test]
fn total_sixteen_fresh_stone() {
    assert_tracks(
        Preset::TotalSixteen,
        params(10, 10, 10, 5, 0, 0, 4),
        [0.0013562623527156427, 0.0013562623527156427, 0.0005796945705558102],
    );
}

// =============================================================================
// After a few attempts
// =============================================================================

#[test]
fn four_negative_fails() {
    assert_tracks(
        Preset::TotalFourteen,
        params(10, 10, 6, 5, 0, 0, 4),
        [0.03268194678253322, 0.03268194678253322, 0.016474718004272332],
    );
    assert_tracks(
        Preset::TotalSixteen,
        params(10, 10, 6, 5, 0, 0, 4),
        [0.00037494775614242795, 0.00037494775614242795, 0.00013838015920998673],
    );
}

#[test]
fn first_track_success() {
    assert_tracks(
        Preset::TotalFourteen,
        params(9, 10, 10, 4, 1, 0, 4),
        [0.07083629875688045, 0.07067828837397616, 0.057298592357464914],
    );
    assert_tracks(
        Preset::TotalSixteen,
        params(9, 10, 10, 4, 1, 0, 4),
        [0.0017105658699742821, 0.0017078605646532097, 0.0013663235607362127],
    );
}

#[test]
fn first_track_fail() {
    assert_tracks(
        Preset::TotalFourteen,
        params(9, 10, 10, 5, 0, 0, 4),
        [0.02421339343213549, 0.02427332865802617, 0.013290620300724884],
    );
    assert_tracks(
        Preset::TotalSixteen,
        params(9, 10, 10, 5, 0, 0, 4),
        [0.0002789781438172705, 0.0002933518009397248, 0.00011238690331945165],
    );
}

// =============================================================================
// Table shape
// =============================================================================

#[test]
fn full_tables_use_standard_dims() {
    for preset in Preset::ALL {
        let t = tables().get(preset).unwrap();
        assert_eq!(t.dims(), Dims::STANDARD);
        assert_eq!(t.table.values().len(), 10_629_366);
        assert_eq!(t.goals.n(), 10);
    }
}

#[test]
fn carve_outs_are_not_goals() {
    let sixteen = &tables().get(Preset::TotalSixteen).unwrap().goals;
    assert!(!sixteen.is_goal(8, 8));
    assert!(sixteen.is_goal(7, 9));
    let fourteen = &tables().get(Preset::TotalFourteen).unwrap().goals;
    assert!(!fourteen.is_goal(8, 6));
    assert!(!fourteen.is_goal(6, 8));
    assert!(fourteen.is_goal(7, 7));
}

#[test]
fn terminal_cells_are_exactly_one() {
    for preset in Preset::ALL {
        let t = tables().get(preset).unwrap();
        let n = t.dims().n;
        for d in 0..=n {
            for e in 0..=n {
                if !t.goals.is_goal(d, e) {
                    continue;
                }
                for c in 0..=n {
                    for f in c..=n {
                        for p in 0..t.dims().pmax {
                            let s = params(0, 0, c, p, d, e, f);
                            assert_eq!(t.table.get(s), 1.0, "{preset} {s:?}");
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn every_value_is_a_probability() {
    for preset in Preset::ALL {
        let t = tables().get(preset).unwrap();
        assert!(t
            .table
            .values()
            .iter()
            .all(|&v| (0.0..=1.0 + 1e-12).contains(&v)));
    }
}
