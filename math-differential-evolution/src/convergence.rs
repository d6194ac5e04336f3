//! Population spread metrics and the two tolerance-based stopping rules.

use std::fmt;

use ndarray::{Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

/// Why `evolve` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Domain spread fell below `xtol`.
    Xtol,
    /// Objective spread fell below `ftol`.
    Ftol,
    /// The generation budget was exhausted.
    MaxGenerations,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Xtol => f.write_str("Exit condition -- xtol"),
            StopReason::Ftol => f.write_str("Exit condition -- ftol"),
            StopReason::MaxGenerations => f.write_str("Exit condition -- generations"),
        }
    }
}

/// How spread out a population is, in decision space and in objective space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spread {
    /// Largest per-dimension range (max - min) across individuals.
    pub dx: f64,
    /// Largest objective difference across individuals.
    pub df: f64,
}

/// Spread of `x` (one row per individual) and its objective values.
///
/// A NaN anywhere makes the matching spread infinite, so a population with
/// unevaluable members never counts as collapsed. An empty population has
/// zero spread.
pub fn population_spread(x: &Array2<f64>, objective: ArrayView1<f64>) -> Spread {
    let dx = x
        .axis_iter(Axis(1))
        .map(|column| range(column.iter().copied()))
        .fold(0.0, f64::max);
    let df = range(objective.iter().copied());
    Spread { dx, df }
}

fn range(values: impl Iterator<Item = f64>) -> f64 {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    let mut seen = false;
    for v in values {
        if v.is_nan() {
            return f64::INFINITY;
        }
        lo = lo.min(v);
        hi = hi.max(v);
        seen = true;
    }
    if seen { hi - lo } else { 0.0 }
}

/// The stopping rule: domain spread is checked first, then objective spread.
pub(crate) fn check_tolerances(spread: Spread, xtol: f64, ftol: f64) -> Option<StopReason> {
    if spread.dx < xtol {
        Some(StopReason::Xtol)
    } else if spread.df < ftol {
        Some(StopReason::Ftol)
    } else {
        None
    }
}
