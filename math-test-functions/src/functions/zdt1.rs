//! ZDT1 bi-objective test function

use ndarray::Array1;

/// ZDT1 - two objectives, convex Pareto front
/// Pareto-optimal for x_1..x_{n-1} = 0, f2 = 1 - sqrt(f1)
/// Bounds: x_i in [0, 1]
pub fn zdt1(x: &Array1<f64>) -> [f64; 2] {
    let n = x.len();
    let f1 = x[0];
    let g = if n > 1 {
        1.0 + 9.0 * x.iter().skip(1).sum::<f64>() / (n - 1) as f64
    } else {
        1.0
    };
    let f2 = g * (1.0 - (f1 / g).sqrt());
    [f1, f2]
}
