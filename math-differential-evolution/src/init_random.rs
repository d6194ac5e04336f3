use ndarray::{Array1, Array2};
use rand::Rng;

/// `npop` points drawn uniformly inside the box `[lower, upper]`, row by row.
pub(crate) fn init_random<R: Rng + ?Sized>(
    npop: usize,
    lower: &Array1<f64>,
    upper: &Array1<f64>,
    rng: &mut R,
) -> Array2<f64> {
    let n = lower.len();
    let mut pop = Array2::<f64>::zeros((npop, n));
    for mut row in pop.rows_mut() {
        for j in 0..n {
            let u: f64 = rng.random::<f64>();
            row[j] = lower[j] + u * (upper[j] - lower[j]);
        }
    }
    pop
}
