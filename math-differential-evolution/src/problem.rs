//! The optimization problem interface consumed by the engine.

use std::fmt;

use ndarray::Array1;

use crate::error::{DEError, Result};

/// A box-bounded optimization problem.
///
/// Only [`fitness`](Problem::fitness) and [`bounds`](Problem::bounds) are
/// required. The remaining methods describe the problem's shape and default
/// to a deterministic, unconstrained, single-objective, continuous problem.
pub trait Problem {
    /// Fitness vector of `x`: objectives first, then equality and inequality
    /// constraints. Its length must be `nobj() + nec() + nic()`.
    fn fitness(&self, x: &Array1<f64>) -> Array1<f64>;

    /// Lower and upper box bounds, one entry per decision variable.
    fn bounds(&self) -> (Array1<f64>, Array1<f64>);

    /// Number of objectives.
    fn nobj(&self) -> usize {
        1
    }

    /// Number of equality constraints.
    fn nec(&self) -> usize {
        0
    }

    /// Number of inequality constraints.
    fn nic(&self) -> usize {
        0
    }

    /// Number of integer decision variables (the trailing ones).
    fn nix(&self) -> usize {
        0
    }

    /// Whether repeated evaluations of the same `x` may differ.
    fn is_stochastic(&self) -> bool {
        false
    }

    /// Human-readable name.
    fn name(&self) -> String {
        "unnamed problem".to_string()
    }
}

/// A validated problem together with its evaluation counter.
pub struct ProblemHandle {
    inner: Box<dyn Problem>,
    lower: Array1<f64>,
    upper: Array1<f64>,
    nobj: usize,
    nec: usize,
    nic: usize,
    nix: usize,
    stochastic: bool,
    name: String,
    fevals: u64,
}

impl ProblemHandle {
    /// Wraps `problem` after validating its bounds.
    ///
    /// # Errors
    ///
    /// Returns `DEError::BoundsMismatch` if the bound vectors differ in length,
    /// `DEError::ZeroDimension` if they are empty, and
    /// `DEError::InvalidBounds` if a bound is not finite or lower exceeds upper.
    pub fn new<P: Problem + 'static>(problem: P) -> Result<Self> {
        let (lower, upper) = problem.bounds();
        if lower.len() != upper.len() {
            return Err(DEError::BoundsMismatch {
                lower_len: lower.len(),
                upper_len: upper.len(),
            });
        }
        if lower.is_empty() {
            return Err(DEError::ZeroDimension);
        }
        for (index, (&lo, &hi)) in lower.iter().zip(upper.iter()).enumerate() {
            if !lo.is_finite() || !hi.is_finite() || lo > hi {
                return Err(DEError::InvalidBounds {
                    index,
                    lower: lo,
                    upper: hi,
                });
            }
        }

        Ok(Self {
            nobj: problem.nobj(),
            nec: problem.nec(),
            nic: problem.nic(),
            nix: problem.nix(),
            stochastic: problem.is_stochastic(),
            name: problem.name(),
            inner: Box::new(problem),
            lower,
            upper,
            fevals: 0,
        })
    }

    /// Evaluates `x`, counting the call.
    ///
    /// # Errors
    ///
    /// Returns `DEError::DimensionMismatch` if `x` has the wrong length and
    /// `DEError::FitnessDimensionMismatch` if the problem returns a fitness
    /// vector of the wrong length.
    pub fn fitness(&mut self, x: &Array1<f64>) -> Result<Array1<f64>> {
        if x.len() != self.dim() {
            return Err(DEError::DimensionMismatch {
                expected: self.dim(),
                got: x.len(),
            });
        }
        let f = self.inner.fitness(x);
        self.fevals += 1;
        if f.len() != self.nf() {
            return Err(DEError::FitnessDimensionMismatch {
                expected: self.nf(),
                got: f.len(),
            });
        }
        Ok(f)
    }

    /// Number of decision variables.
    pub fn dim(&self) -> usize {
        self.lower.len()
    }

    /// Length of the fitness vector.
    pub fn nf(&self) -> usize {
        self.nobj + self.nec + self.nic
    }

    /// Lower bounds.
    pub fn lower(&self) -> &Array1<f64> {
        &self.lower
    }

    /// Upper bounds.
    pub fn upper(&self) -> &Array1<f64> {
        &self.upper
    }

    /// Number of objectives.
    pub fn nobj(&self) -> usize {
        self.nobj
    }

    /// Number of equality constraints.
    pub fn nec(&self) -> usize {
        self.nec
    }

    /// Number of inequality constraints.
    pub fn nic(&self) -> usize {
        self.nic
    }

    /// Number of integer decision variables.
    pub fn nix(&self) -> usize {
        self.nix
    }

    /// Whether the problem is stochastic.
    pub fn is_stochastic(&self) -> bool {
        self.stochastic
    }

    /// Problem name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of fitness evaluations performed so far.
    pub fn fevals(&self) -> u64 {
        self.fevals
    }
}

impl fmt::Debug for ProblemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProblemHandle")
            .field("name", &self.name)
            .field("dim", &self.dim())
            .field("nobj", &self.nobj)
            .field("nec", &self.nec)
            .field("nic", &self.nic)
            .field("nix", &self.nix)
            .field("stochastic", &self.stochastic)
            .field("fevals", &self.fevals)
            .finish()
    }
}
