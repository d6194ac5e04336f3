use ndarray::{Array1, Array2, Zip};

/// rand-to-best/1: x_r0 + F * (x_best - x_r0) + F * (x_r1 - x_r2)
pub(crate) fn mutant_rand_to_best1(
    pop: &Array2<f64>,
    best_idx: usize,
    r: [usize; 3],
    f: f64,
) -> Array1<f64> {
    let mut m = Zip::from(pop.row(r[0]))
        .and(pop.row(best_idx))
        .map_collect(|&x0, &best| x0 + f * (best - x0));
    Zip::from(&mut m)
        .and(pop.row(r[1]))
        .and(pop.row(r[2]))
        .for_each(|m, &x1, &x2| *m += f * (x1 - x2));
    m
}
