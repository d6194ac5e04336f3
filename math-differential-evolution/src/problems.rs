//! Ready-made [`Problem`] implementations over the benchmark functions.

use ndarray::{Array1, Array2, array};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use math_optim_test_functions::{
    hock_schittkowsky_71, hock_schittkowsky_71_eq, hock_schittkowsky_71_ineq, inventory_cost,
    rosenbrock, zdt1,
};

use crate::problem::Problem;

fn split_bounds(bounds: &[(f64, f64)]) -> (Array1<f64>, Array1<f64>) {
    (
        bounds.iter().map(|&(lo, _)| lo).collect(),
        bounds.iter().map(|&(_, hi)| hi).collect(),
    )
}

/// A single-objective problem defined by a closure and a box.
pub struct FnProblem<F> {
    func: F,
    bounds: Vec<(f64, f64)>,
    name: String,
}

impl<F> FnProblem<F>
where
    F: Fn(&Array1<f64>) -> f64,
{
    /// Wraps `func` on the box given as `(lower, upper)` pairs.
    pub fn new(func: F, bounds: Vec<(f64, f64)>) -> Self {
        Self {
            func,
            bounds,
            name: "function".to_string(),
        }
    }

    /// Sets the name reported by [`Problem::name`].
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl<F> Problem for FnProblem<F>
where
    F: Fn(&Array1<f64>) -> f64,
{
    fn fitness(&self, x: &Array1<f64>) -> Array1<f64> {
        array![(self.func)(x)]
    }

    fn bounds(&self) -> (Array1<f64>, Array1<f64>) {
        split_bounds(&self.bounds)
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

/// Rosenbrock's valley on `[-5, 10]^dim`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rosenbrock {
    /// Number of decision variables.
    pub dim: usize,
}

impl Rosenbrock {
    /// Rosenbrock in `dim` dimensions.
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl Default for Rosenbrock {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Problem for Rosenbrock {
    fn fitness(&self, x: &Array1<f64>) -> Array1<f64> {
        array![rosenbrock(x)]
    }

    fn bounds(&self) -> (Array1<f64>, Array1<f64>) {
        (
            Array1::from_elem(self.dim, -5.0),
            Array1::from_elem(self.dim, 10.0),
        )
    }

    fn name(&self) -> String {
        "Multidimensional Rosenbrock Function".to_string()
    }
}

/// ZDT1, a two-objective problem on `[0, 1]^dim`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zdt1 {
    /// Number of decision variables.
    pub dim: usize,
}

impl Zdt1 {
    /// ZDT1 in `dim` dimensions.
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl Default for Zdt1 {
    fn default() -> Self {
        Self::new(30)
    }
}

impl Problem for Zdt1 {
    fn fitness(&self, x: &Array1<f64>) -> Array1<f64> {
        Array1::from(zdt1(x).to_vec())
    }

    fn bounds(&self) -> (Array1<f64>, Array1<f64>) {
        (Array1::zeros(self.dim), Array1::ones(self.dim))
    }

    fn nobj(&self) -> usize {
        2
    }

    fn name(&self) -> String {
        "ZDT1".to_string()
    }
}

/// Hock-Schittkowsky problem #71: four variables, one equality and one
/// inequality constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HockSchittkowsky71;

impl Problem for HockSchittkowsky71 {
    fn fitness(&self, x: &Array1<f64>) -> Array1<f64> {
        array![
            hock_schittkowsky_71(x),
            hock_schittkowsky_71_eq(x),
            hock_schittkowsky_71_ineq(x)
        ]
    }

    fn bounds(&self) -> (Array1<f64>, Array1<f64>) {
        (Array1::from_elem(4, 1.0), Array1::from_elem(4, 5.0))
    }

    fn nec(&self) -> usize {
        1
    }

    fn nic(&self) -> usize {
        1
    }

    fn name(&self) -> String {
        "Hock Schittkowsky 71".to_string()
    }
}

/// Weekly ordering policy evaluated against randomly sampled demand.
///
/// The demand scenarios are drawn once from `seed`, uniformly in
/// `[0, MAX_DEMAND)`. The problem still reports itself as stochastic since
/// its value depends on the sample.
#[derive(Debug, Clone)]
pub struct Inventory {
    weeks: usize,
    seed: u64,
    demands: Array2<f64>,
}

impl Inventory {
    /// Largest weekly demand.
    pub const MAX_DEMAND: f64 = 100.0;

    /// `weeks` decision variables, `sample_size` demand scenarios.
    pub fn new(weeks: usize, sample_size: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let demands = Array2::from_shape_simple_fn((sample_size, weeks), || {
            rng.random::<f64>() * Self::MAX_DEMAND
        });
        Self {
            weeks,
            seed,
            demands,
        }
    }

    /// Seed of the current demand sample.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(4, 10, 0)
    }
}

impl Problem for Inventory {
    fn fitness(&self, x: &Array1<f64>) -> Array1<f64> {
        array![inventory_cost(x, &self.demands)]
    }

    fn bounds(&self) -> (Array1<f64>, Array1<f64>) {
        (
            Array1::zeros(self.weeks),
            Array1::from_elem(self.weeks, 2.0 * Self::MAX_DEMAND),
        )
    }

    fn is_stochastic(&self) -> bool {
        true
    }

    fn name(&self) -> String {
        "Inventory problem".to_string()
    }
}
