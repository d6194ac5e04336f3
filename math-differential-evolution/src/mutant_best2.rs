use ndarray::{Array1, Array2, Zip};

/// best/2: x_best + F * (x_r0 + x_r1 - x_r2 - x_r3)
pub(crate) fn mutant_best2(
    pop: &Array2<f64>,
    best_idx: usize,
    r: [usize; 4],
    f: f64,
) -> Array1<f64> {
    let mut m = Zip::from(pop.row(best_idx))
        .and(pop.row(r[0]))
        .and(pop.row(r[1]))
        .map_collect(|&best, &x0, &x1| best + f * (x0 + x1));
    Zip::from(&mut m)
        .and(pop.row(r[2]))
        .and(pop.row(r[3]))
        .for_each(|m, &x2, &x3| *m -= f * (x2 + x3));
    m
}
