use ndarray::ArrayView1;

/// Index and value of the smallest entry; the first one wins ties and NaN
/// never beats a number. `v` must be non-empty.
pub(crate) fn argmin(v: ArrayView1<f64>) -> (usize, f64) {
    let mut best_i = 0usize;
    let mut best_v = v[0];
    for (i, &val) in v.iter().enumerate() {
        if val < best_v || (best_v.is_nan() && !val.is_nan()) {
            best_v = val;
            best_i = i;
        }
    }
    (best_i, best_v)
}

/// Index and value of the largest entry; NaN counts as largest.
pub(crate) fn argmax(v: ArrayView1<f64>) -> (usize, f64) {
    let mut worst_i = 0usize;
    let mut worst_v = v[0];
    for (i, &val) in v.iter().enumerate() {
        if worst_v.is_nan() {
            break;
        }
        if val > worst_v || val.is_nan() {
            worst_v = val;
            worst_i = i;
        }
    }
    (worst_i, worst_v)
}
