//! Hock-Schittkowsky problem 71 (constrained)

use ndarray::Array1;

/// Objective of HS71: x0 * x3 * (x0 + x1 + x2) + x2
/// Constrained minimum: f ~= 17.0140173 at (1, 4.7429994, 3.8211503, 1.3794082)
/// Bounds: x_i in [1, 5]
pub fn hock_schittkowsky_71(x: &Array1<f64>) -> f64 {
    x[0] * x[3] * (x[0] + x[1] + x[2]) + x[2]
}

/// HS71 equality constraint: sum(x_i^2) - 40 = 0
pub fn hock_schittkowsky_71_eq(x: &Array1<f64>) -> f64 {
    x.dot(x) - 40.0
}

/// HS71 inequality constraint: 25 - prod(x_i) <= 0
pub fn hock_schittkowsky_71_ineq(x: &Array1<f64>) -> f64 {
    25.0 - x.product()
}
