//! Error types for the Differential Evolution engine.
//!
//! Configuration errors are raised eagerly by the config builder and the
//! engine setters. Problem-shape errors are raised at the start of
//! `evolve`, before the population is touched.

use thiserror::Error;

/// Errors that can occur while configuring or running Differential Evolution.
#[derive(Debug, Error)]
pub enum DEError {
    /// Lower and upper bounds have different lengths.
    #[error("bounds mismatch: lower has {lower_len} elements, upper has {upper_len}")]
    BoundsMismatch {
        /// Length of the lower bounds array
        lower_len: usize,
        /// Length of the upper bounds array
        upper_len: usize,
    },

    /// A lower bound exceeds its corresponding upper bound, or a bound is not finite.
    #[error("invalid bounds at index {index}: lower ({lower}) > upper ({upper})")]
    InvalidBounds {
        /// Index of the invalid bound pair
        index: usize,
        /// The lower bound value
        lower: f64,
        /// The upper bound value
        upper: f64,
    },

    /// The problem has no decision variables.
    #[error("problem dimension must be at least 1")]
    ZeroDimension,

    /// Population size is too small (must be >= 5).
    #[error("population size ({pop_size}) must be >= 5")]
    PopulationTooSmall {
        /// The invalid population size
        pop_size: usize,
    },

    /// Mutation factor is out of valid range [0, 2].
    #[error("invalid mutation factor: {factor} (must be in [0, 2])")]
    InvalidMutationFactor {
        /// The invalid mutation factor
        factor: f64,
    },

    /// Crossover rate is out of valid range [0, 1].
    #[error("invalid crossover rate: {rate} (must be in [0, 1])")]
    InvalidCrossoverRate {
        /// The invalid crossover rate
        rate: f64,
    },

    /// Variant code is not one of 1..=10.
    #[error("invalid variant: {code} (must be in [1, 10])")]
    InvalidVariant {
        /// The invalid variant code
        code: u32,
    },

    /// Strategy name could not be parsed.
    #[error("unknown strategy: {name}")]
    UnknownStrategy {
        /// The unparsed name
        name: String,
    },

    /// A stopping tolerance is negative or NaN.
    #[error("invalid {name}: {value} (must be >= 0)")]
    InvalidTolerance {
        /// Which tolerance (`xtol` or `ftol`)
        name: &'static str,
        /// The invalid value
        value: f64,
    },

    /// The problem has more than one objective.
    #[error("multiple objectives detected in {problem} instance; DE cannot deal with them")]
    MultiObjective {
        /// Problem name
        problem: String,
        /// Number of objectives
        nobj: usize,
    },

    /// The problem has equality or inequality constraints.
    #[error("non linear constraints detected in {problem} instance; DE cannot deal with them")]
    Constrained {
        /// Problem name
        problem: String,
        /// Number of equality constraints
        nec: usize,
        /// Number of inequality constraints
        nic: usize,
    },

    /// The problem is stochastic.
    #[error("the problem {problem} appears to be stochastic; DE cannot deal with it")]
    Stochastic {
        /// Problem name
        problem: String,
    },

    /// The problem has integer decision variables.
    #[error("{nix} integer variables detected in {problem} instance; DE cannot deal with them")]
    IntegerDimensions {
        /// Problem name
        problem: String,
        /// Number of integer dimensions
        nix: usize,
    },

    /// A decision vector has the wrong length.
    #[error("decision vector dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension provided
        got: usize,
    },

    /// A fitness vector has the wrong length.
    #[error("fitness dimension mismatch: expected {expected}, got {got}")]
    FitnessDimensionMismatch {
        /// Expected length (nobj + nec + nic)
        expected: usize,
        /// Actual length returned or provided
        got: usize,
    },

    /// Individual index out of range.
    #[error("individual index {index} out of range for population of size {size}")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Population size
        size: usize,
    },

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A specialized `Result` type for DE operations.
pub type Result<T> = std::result::Result<T, DEError>;

impl DEError {
    /// Returns `true` if this is a bounds-related error.
    pub fn is_bounds_error(&self) -> bool {
        matches!(
            self,
            DEError::BoundsMismatch { .. } | DEError::InvalidBounds { .. } | DEError::ZeroDimension
        )
    }

    /// Returns `true` if this is an algorithm configuration error.
    ///
    /// These are detected at construction or by setters, never by `evolve`.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            DEError::InvalidMutationFactor { .. }
                | DEError::InvalidCrossoverRate { .. }
                | DEError::InvalidVariant { .. }
                | DEError::UnknownStrategy { .. }
                | DEError::InvalidTolerance { .. }
        )
    }

    /// Returns `true` if the problem or population is unsuitable for DE.
    pub fn is_problem_error(&self) -> bool {
        matches!(
            self,
            DEError::PopulationTooSmall { .. }
                | DEError::MultiObjective { .. }
                | DEError::Constrained { .. }
                | DEError::Stochastic { .. }
                | DEError::IntegerDimensions { .. }
        )
    }

    /// Returns `true` if this is a dimension mismatch error.
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            DEError::DimensionMismatch { .. }
                | DEError::FitnessDimensionMismatch { .. }
                | DEError::IndexOutOfRange { .. }
        )
    }
}
