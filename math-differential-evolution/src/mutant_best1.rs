use ndarray::{Array1, Array2, Zip};

/// best/1: x_best + F * (x_r0 - x_r1)
pub(crate) fn mutant_best1(
    pop: &Array2<f64>,
    best_idx: usize,
    r: [usize; 2],
    f: f64,
) -> Array1<f64> {
    Zip::from(pop.row(best_idx))
        .and(pop.row(r[0]))
        .and(pop.row(r[1]))
        .map_collect(|&best, &x0, &x1| best + f * (x0 - x1))
}
