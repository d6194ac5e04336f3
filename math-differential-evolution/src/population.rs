//! Candidate-solution container consumed and produced by the engine.

use ndarray::{Array1, Array2, ArrayView1, Axis};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::argmin::{argmax, argmin};
use crate::error::{DEError, Result};
use crate::init_random::init_random;
use crate::problem::{Problem, ProblemHandle};

/// A set of decision vectors and their fitness vectors, bound to one problem.
///
/// Row `i` of [`x`](Self::x) is individual `i`; row `i` of [`f`](Self::f)
/// is its fitness vector. Best and worst are ranked on the first fitness
/// component.
#[derive(Debug)]
pub struct Population {
    problem: ProblemHandle,
    x: Array2<f64>,
    f: Array2<f64>,
    seed: u64,
}

impl Population {
    /// Creates `size` individuals drawn uniformly inside the problem bounds
    /// from a `StdRng` seeded with `seed`, evaluating each one.
    ///
    /// # Errors
    ///
    /// Propagates bound validation errors from [`ProblemHandle::new`] and
    /// fitness dimension errors from the first evaluations.
    pub fn new<P: Problem + 'static>(problem: P, size: usize, seed: u64) -> Result<Self> {
        Self::from_handle(ProblemHandle::new(problem)?, size, seed)
    }

    /// Same as [`new`](Self::new) for an already wrapped problem.
    pub fn from_handle(problem: ProblemHandle, size: usize, seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let xs = init_random(size, problem.lower(), problem.upper(), &mut rng);
        let mut pop = Self {
            x: Array2::zeros((0, problem.dim())),
            f: Array2::zeros((0, problem.nf())),
            problem,
            seed,
        };
        for row in xs.rows() {
            pop.push(row.to_owned())?;
        }
        Ok(pop)
    }

    /// Evaluates `x` and appends it.
    ///
    /// # Errors
    ///
    /// Returns `DEError::DimensionMismatch` if `x` does not match the problem
    /// dimension.
    pub fn push(&mut self, x: Array1<f64>) -> Result<()> {
        let f = self.problem.fitness(&x)?;
        self.x.push_row(x.view()).map_err(|_| DEError::DimensionMismatch {
            expected: self.x.ncols(),
            got: x.len(),
        })?;
        self.f.push_row(f.view()).map_err(|_| DEError::FitnessDimensionMismatch {
            expected: self.f.ncols(),
            got: f.len(),
        })?;
        Ok(())
    }

    /// Replaces individual `i` with `x` and its already computed fitness `f`.
    ///
    /// # Errors
    ///
    /// Returns `DEError::IndexOutOfRange` or a dimension error without
    /// modifying the population.
    pub fn set_xf(&mut self, i: usize, x: &Array1<f64>, f: &Array1<f64>) -> Result<()> {
        if i >= self.len() {
            return Err(DEError::IndexOutOfRange {
                index: i,
                size: self.len(),
            });
        }
        if x.len() != self.x.ncols() {
            return Err(DEError::DimensionMismatch {
                expected: self.x.ncols(),
                got: x.len(),
            });
        }
        if f.len() != self.f.ncols() {
            return Err(DEError::FitnessDimensionMismatch {
                expected: self.f.ncols(),
                got: f.len(),
            });
        }
        self.x.row_mut(i).assign(x);
        self.f.row_mut(i).assign(f);
        Ok(())
    }

    /// Swaps in a whole generation at once. Shapes are the engine's invariant.
    pub(crate) fn replace_generation(&mut self, x: Array2<f64>, objective: Array1<f64>) {
        debug_assert_eq!(x.dim(), self.x.dim());
        debug_assert_eq!(self.f.ncols(), 1);
        self.x = x;
        self.f = objective.insert_axis(Axis(1));
    }

    /// Number of individuals.
    pub fn len(&self) -> usize {
        self.x.nrows()
    }

    /// Whether the population holds no individuals.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decision vectors, one row per individual.
    pub fn x(&self) -> &Array2<f64> {
        &self.x
    }

    /// Fitness vectors, one row per individual.
    pub fn f(&self) -> &Array2<f64> {
        &self.f
    }

    /// Decision vector of individual `i`, if it exists.
    pub fn get_x(&self, i: usize) -> Option<ArrayView1<'_, f64>> {
        (i < self.len()).then(|| self.x.row(i))
    }

    /// Fitness vector of individual `i`, if it exists.
    pub fn get_f(&self, i: usize) -> Option<ArrayView1<'_, f64>> {
        (i < self.len()).then(|| self.f.row(i))
    }

    /// Index of the individual with the lowest first fitness component.
    pub fn best_idx(&self) -> Option<usize> {
        (!self.is_empty()).then(|| argmin(self.f.column(0)).0)
    }

    /// Index of the individual with the highest first fitness component.
    pub fn worst_idx(&self) -> Option<usize> {
        (!self.is_empty()).then(|| argmax(self.f.column(0)).0)
    }

    /// Decision vector of the best individual.
    pub fn champion_x(&self) -> Option<Array1<f64>> {
        self.best_idx().map(|i| self.x.row(i).to_owned())
    }

    /// Fitness vector of the best individual.
    pub fn champion_f(&self) -> Option<Array1<f64>> {
        self.best_idx().map(|i| self.f.row(i).to_owned())
    }

    /// The problem this population belongs to.
    pub fn problem(&self) -> &ProblemHandle {
        &self.problem
    }

    /// Mutable access to the problem, for evaluating new points.
    pub fn problem_mut(&mut self) -> &mut ProblemHandle {
        &mut self.problem
    }

    /// Fitness evaluations performed on this population's problem.
    pub fn fevals(&self) -> u64 {
        self.problem.fevals()
    }

    /// Seed used for the initial individuals.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
