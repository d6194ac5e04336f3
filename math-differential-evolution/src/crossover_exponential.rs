use ndarray::{Array1, ArrayView1};

use crate::rng::DeRng;

/// Copies a run of consecutive mutant components, wrapping around, starting
/// at a uniformly chosen dimension. The run always holds at least one
/// component and grows while draws stay below `cr`.
pub(crate) fn exponential_crossover(
    target: ArrayView1<f64>,
    mutant: &Array1<f64>,
    cr: f64,
    rng: &mut DeRng,
) -> Array1<f64> {
    let n = target.len();
    let mut trial = target.to_owned();
    let mut j = rng.index(n);
    let mut copied = 0usize;
    loop {
        trial[j] = mutant[j];
        copied += 1;
        j = (j + 1) % n;
        if copied >= n || rng.uniform() >= cr {
            break;
        }
    }
    trial
}
