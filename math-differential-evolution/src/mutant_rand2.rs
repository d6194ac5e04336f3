use ndarray::{Array1, Array2, Zip};

/// rand/2: x_r0 + F * (x_r1 - x_r2) + F * (x_r3 - x_r4)
pub(crate) fn mutant_rand2(pop: &Array2<f64>, r: [usize; 5], f: f64) -> Array1<f64> {
    let mut m = Zip::from(pop.row(r[0]))
        .and(pop.row(r[1]))
        .and(pop.row(r[2]))
        .map_collect(|&x0, &x1, &x2| x0 + f * (x1 - x2));
    Zip::from(&mut m)
        .and(pop.row(r[3]))
        .and(pop.row(r[4]))
        .for_each(|m, &x3, &x4| *m += f * (x3 - x4));
    m
}
