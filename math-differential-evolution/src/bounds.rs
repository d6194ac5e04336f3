//! Out-of-bounds handling for trial vectors.
//!
//! Components outside the box are folded back by reflection at the bounds,
//! repeatedly if needed, so the result is a deterministic function of the
//! value and the interval.

use ndarray::{Array1, Zip};

/// Reflects `x` into `[lo, hi]`.
///
/// Values inside the interval are returned unchanged. A degenerate interval
/// (`lo == hi`) maps everything to `lo`; NaN maps to `lo` and infinities to
/// the bound on their side. An interval with a NaN or infinite end also maps
/// out-of-range values to `lo`.
pub(crate) fn reflect_into_range(x: f64, lo: f64, hi: f64) -> f64 {
    if x >= lo && x <= hi {
        return x;
    }
    if x.is_nan() {
        return lo;
    }
    if x.is_infinite() {
        return if x > 0.0 { hi } else { lo };
    }
    let width = hi - lo;
    if !(width.is_finite() && width > 0.0) {
        return lo;
    }
    let t = (x - lo).rem_euclid(2.0 * width);
    let folded = if t > width { 2.0 * width - t } else { t };
    (lo + folded).clamp(lo, hi)
}

/// Reflects every component of `trial` into its box.
pub(crate) fn reflect_into_bounds(
    trial: &mut Array1<f64>,
    lower: &Array1<f64>,
    upper: &Array1<f64>,
) {
    Zip::from(trial)
        .and(lower)
        .and(upper)
        .for_each(|x, &lo, &hi| *x = reflect_into_range(*x, lo, hi));
}
