use ndarray::{Array1, Array2, Zip};

/// rand/1: x_r0 + F * (x_r1 - x_r2)
pub(crate) fn mutant_rand1(pop: &Array2<f64>, r: [usize; 3], f: f64) -> Array1<f64> {
    Zip::from(pop.row(r[0]))
        .and(pop.row(r[1]))
        .and(pop.row(r[2]))
        .map_collect(|&x0, &x1, &x2| x0 + f * (x1 - x2))
}
