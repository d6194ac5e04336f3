//! Differential Evolution optimization library.
//!
//! A seeded, reproducible implementation of classical Differential Evolution
//! (DE) for box-bounded, single-objective, unconstrained continuous problems.
//! Ten mutation/crossover variants are available, numbered 1 to 10. A run
//! stops after a fixed number of generations or earlier, as soon as the
//! population has collapsed in decision space (`xtol`) or in objective space
//! (`ftol`).
//!
//! # Features
//!
//! - rand/1, best/1, rand/2, rand-to-best/1 and best/2 mutation
//! - Binomial and exponential crossover
//! - Bit-for-bit reproducible runs for a given seed
//! - Per-generation evolution log, serializable to JSON with the configuration
//!
//! # Example
//!
//! ```rust
//! use math_optim_differential_evolution::{DEConfigBuilder, DifferentialEvolution, Population};
//! use math_optim_differential_evolution::problems::FnProblem;
//! use ndarray::Array1;
//!
//! let sphere = FnProblem::new(|x: &Array1<f64>| x.dot(x), vec![(-5.0, 5.0); 2]);
//! let mut pop = Population::new(sphere, 20, 42).expect("valid bounds");
//!
//! let config = DEConfigBuilder::new()
//!     .generations(500)
//!     .seed(42)
//!     .build()
//!     .expect("invalid config");
//! let mut de = DifferentialEvolution::new(config).expect("invalid config");
//! de.evolve(&mut pop).expect("sphere is a plain box-bounded problem");
//!
//! assert!(pop.champion_f().unwrap()[0] < 1e-4);
//! ```
#![warn(missing_docs)]

pub mod error;
pub use error::{DEError, Result};

use std::fmt;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

mod argmin;
mod bounds;
/// Spread metrics and stopping rules.
pub mod convergence;
mod crossover_binomial;
mod crossover_exponential;
mod distinct_indices;
/// Per-generation log records.
pub mod evolution_log;
mod evolve;
mod init_random;
mod mutant_best1;
mod mutant_best2;
mod mutant_rand1;
mod mutant_rand2;
mod mutant_rand_to_best1;
/// Candidate-solution container.
pub mod population;
/// The problem interface.
pub mod problem;
/// Ready-made problems.
pub mod problems;
mod rng;
/// Mutation/crossover strategies.
pub mod strategy;

/// Convenience entry point over a plain function.
pub mod differential_evolution;

pub use convergence::{Spread, StopReason, population_spread};
pub use differential_evolution::differential_evolution;
pub use evolution_log::{EvolutionLog, LOG_HEADER, LogEntry};
pub use population::Population;
pub use problem::{Problem, ProblemHandle};
pub use strategy::{Crossover, Strategy};

use rng::DeRng;

/// Full configuration of a DE run.
///
/// Construct with [`DEConfigBuilder`] to get validation at build time; an
/// engine built with [`DifferentialEvolution::new`] validates again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DEConfig {
    /// Number of generations to run.
    pub generations: u64,
    /// Mutation weight F in [0, 2].
    pub mutation_factor: f64,
    /// Crossover probability CR in [0, 1].
    pub recombination: f64,
    /// Mutation/crossover variant, serialized as its code 1..=10.
    #[serde(rename = "variant")]
    pub strategy: Strategy,
    /// Objective-spread stopping tolerance.
    pub ftol: f64,
    /// Domain-spread stopping tolerance.
    pub xtol: f64,
    /// Seed of both random streams.
    pub seed: u64,
    /// Log every `verbosity` generations; 0 is silent.
    pub verbosity: u32,
}

impl Default for DEConfig {
    /// One generation, F = 0.8, CR = 0.9, variant 2, both tolerances 1e-6
    /// and a random seed.
    fn default() -> Self {
        Self {
            generations: 1,
            mutation_factor: 0.8,
            recombination: 0.9,
            strategy: Strategy::default(),
            ftol: 1e-6,
            xtol: 1e-6,
            seed: rand::random(),
            verbosity: 0,
        }
    }
}

fn check_mutation_factor(factor: f64) -> Result<()> {
    if (0.0..=2.0).contains(&factor) {
        Ok(())
    } else {
        Err(DEError::InvalidMutationFactor { factor })
    }
}

fn check_recombination(rate: f64) -> Result<()> {
    if (0.0..=1.0).contains(&rate) {
        Ok(())
    } else {
        Err(DEError::InvalidCrossoverRate { rate })
    }
}

fn check_tolerance(name: &'static str, value: f64) -> Result<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(DEError::InvalidTolerance { name, value })
    }
}

impl DEConfig {
    /// Checks every parameter range.
    ///
    /// # Errors
    ///
    /// Returns the configuration error for the first parameter out of range.
    pub fn validate(&self) -> Result<()> {
        check_mutation_factor(self.mutation_factor)?;
        check_recombination(self.recombination)?;
        check_tolerance("xtol", self.xtol)?;
        check_tolerance("ftol", self.ftol)?;
        Ok(())
    }
}

/// Fluent builder for [`DEConfig`].
#[derive(Debug, Clone)]
pub struct DEConfigBuilder {
    cfg: DEConfig,
    variant: Option<u32>,
}

impl Default for DEConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DEConfigBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            cfg: DEConfig::default(),
            variant: None,
        }
    }
    /// Sets the number of generations.
    pub fn generations(mut self, v: u64) -> Self {
        self.cfg.generations = v;
        self
    }
    /// Sets the mutation factor F.
    pub fn mutation_factor(mut self, v: f64) -> Self {
        self.cfg.mutation_factor = v;
        self
    }
    /// Sets the crossover probability (CR).
    pub fn recombination(mut self, v: f64) -> Self {
        self.cfg.recombination = v;
        self
    }
    /// Sets the variant by code; checked by [`build`](Self::build).
    pub fn variant(mut self, code: u32) -> Self {
        self.variant = Some(code);
        self
    }
    /// Sets the mutation/crossover strategy.
    pub fn strategy(mut self, v: Strategy) -> Self {
        self.cfg.strategy = v;
        self.variant = None;
        self
    }
    /// Sets the objective-spread tolerance.
    pub fn ftol(mut self, v: f64) -> Self {
        self.cfg.ftol = v;
        self
    }
    /// Sets the domain-spread tolerance.
    pub fn xtol(mut self, v: f64) -> Self {
        self.cfg.xtol = v;
        self
    }
    /// Sets the random seed for reproducibility.
    pub fn seed(mut self, v: u64) -> Self {
        self.cfg.seed = v;
        self
    }
    /// Sets the logging period in generations.
    pub fn verbosity(mut self, v: u32) -> Self {
        self.cfg.verbosity = v;
        self
    }
    /// Builds and returns the configuration.
    ///
    /// # Errors
    ///
    /// Returns `DEError::InvalidMutationFactor`, `DEError::InvalidCrossoverRate`,
    /// `DEError::InvalidVariant` or `DEError::InvalidTolerance` for values out
    /// of range.
    pub fn build(mut self) -> Result<DEConfig> {
        if let Some(code) = self.variant {
            self.cfg.strategy = Strategy::from_code(code)?;
        }
        self.cfg.validate()?;
        Ok(self.cfg)
    }
}

/// The Differential Evolution algorithm.
///
/// Owns its configuration, its two random streams and the log of the last
/// [`evolve`](Self::evolve) call. Two engines with the same configuration
/// evolve identically seeded populations identically.
///
/// Serialization stores the configuration and the log. The random streams
/// are not stored: a deserialized engine restarts them from its seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "EngineState", into = "EngineState")]
pub struct DifferentialEvolution {
    config: DEConfig,
    rng: DeRng,
    log: EvolutionLog,
}

#[derive(Serialize, Deserialize)]
struct EngineState {
    config: DEConfig,
    log: EvolutionLog,
}

impl TryFrom<EngineState> for DifferentialEvolution {
    type Error = DEError;
    fn try_from(state: EngineState) -> Result<Self> {
        let mut de = Self::new(state.config)?;
        de.log = state.log;
        Ok(de)
    }
}

impl From<DifferentialEvolution> for EngineState {
    fn from(de: DifferentialEvolution) -> Self {
        Self {
            config: de.config,
            log: de.log,
        }
    }
}

impl Default for DifferentialEvolution {
    fn default() -> Self {
        Self::from_valid(DEConfig::default())
    }
}

impl DifferentialEvolution {
    /// Creates an engine from a configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` fails [`DEConfig::validate`].
    pub fn new(config: DEConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: DEConfig) -> Self {
        Self {
            rng: DeRng::new(config.seed),
            config,
            log: EvolutionLog::new(),
        }
    }

    /// Algorithm name.
    pub fn name(&self) -> &'static str {
        "DE: Differential Evolution"
    }

    /// One `\tKey: value` line per parameter.
    pub fn extra_info(&self) -> String {
        let c = &self.config;
        format!(
            "\tGenerations: {}\n\tParameter F: {}\n\tParameter CR: {}\n\tVariant: {}\n\
             \tStopping xtol: {}\n\tStopping ftol: {}\n\tVerbosity: {}\n\tSeed: {}",
            c.generations,
            c.mutation_factor,
            c.recombination,
            c.strategy.code(),
            c.xtol,
            c.ftol,
            c.verbosity,
            c.seed
        )
    }

    /// Current configuration.
    pub fn config(&self) -> &DEConfig {
        &self.config
    }

    /// Entries recorded by the last `evolve` call.
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// Number of generations per `evolve` call.
    pub fn generations(&self) -> u64 {
        self.config.generations
    }

    /// Mutation factor F.
    pub fn mutation_factor(&self) -> f64 {
        self.config.mutation_factor
    }

    /// Crossover probability CR.
    pub fn recombination(&self) -> f64 {
        self.config.recombination
    }

    /// Variant code in 1..=10.
    pub fn variant(&self) -> u32 {
        self.config.strategy.code()
    }

    /// Mutation/crossover strategy.
    pub fn strategy(&self) -> Strategy {
        self.config.strategy
    }

    /// Objective-spread tolerance.
    pub fn ftol(&self) -> f64 {
        self.config.ftol
    }

    /// Domain-spread tolerance.
    pub fn xtol(&self) -> f64 {
        self.config.xtol
    }

    /// Seed of the random streams.
    pub fn seed(&self) -> u64 {
        self.config.seed
    }

    /// Logging period in generations.
    pub fn verbosity(&self) -> u32 {
        self.config.verbosity
    }

    /// Sets the seed and restarts both random streams from it.
    pub fn set_seed(&mut self, seed: u64) {
        self.config.seed = seed;
        self.rng = DeRng::new(seed);
    }

    /// Sets the logging period; 0 disables logging.
    pub fn set_verbosity(&mut self, verbosity: u32) {
        self.config.verbosity = verbosity;
    }

    /// Sets the number of generations per `evolve` call.
    pub fn set_generations(&mut self, generations: u64) {
        self.config.generations = generations;
    }

    /// Sets F.
    ///
    /// # Errors
    ///
    /// Returns `DEError::InvalidMutationFactor` outside [0, 2].
    pub fn set_mutation_factor(&mut self, factor: f64) -> Result<()> {
        check_mutation_factor(factor)?;
        self.config.mutation_factor = factor;
        Ok(())
    }

    /// Sets CR.
    ///
    /// # Errors
    ///
    /// Returns `DEError::InvalidCrossoverRate` outside [0, 1].
    pub fn set_recombination(&mut self, rate: f64) -> Result<()> {
        check_recombination(rate)?;
        self.config.recombination = rate;
        Ok(())
    }

    /// Sets the variant by code.
    ///
    /// # Errors
    ///
    /// Returns `DEError::InvalidVariant` outside 1..=10.
    pub fn set_variant(&mut self, code: u32) -> Result<()> {
        self.config.strategy = Strategy::from_code(code)?;
        Ok(())
    }

    /// Sets the strategy.
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.config.strategy = strategy;
    }

    /// Sets the domain-spread tolerance.
    ///
    /// # Errors
    ///
    /// Returns `DEError::InvalidTolerance` if negative or NaN.
    pub fn set_xtol(&mut self, xtol: f64) -> Result<()> {
        check_tolerance("xtol", xtol)?;
        self.config.xtol = xtol;
        Ok(())
    }

    /// Sets the objective-spread tolerance.
    ///
    /// # Errors
    ///
    /// Returns `DEError::InvalidTolerance` if negative or NaN.
    pub fn set_ftol(&mut self, ftol: f64) -> Result<()> {
        check_tolerance("ftol", ftol)?;
        self.config.ftol = ftol;
        Ok(())
    }

    /// Serializes the configuration and the log.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restores an engine written by [`to_json`](Self::to_json).
    ///
    /// # Errors
    ///
    /// Returns `DEError::Serialization` for malformed input (an unknown
    /// variant code included), or the matching configuration error if the
    /// stored F, CR or tolerances are out of range.
    pub fn from_json(json: &str) -> Result<Self> {
        let state: EngineState = serde_json::from_str(json)?;
        Self::try_from(state)
    }
}

impl fmt::Display for DifferentialEvolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Algorithm name: {}", self.name())?;
        writeln!(f)?;
        writeln!(f, "Extra info:")?;
        write!(f, "{}", self.extra_info())
    }
}

/// Result of [`differential_evolution`].
#[derive(Clone)]
pub struct DEReport {
    /// The best solution vector.
    pub x: Array1<f64>,
    /// The objective value at `x`.
    pub fun: f64,
    /// Why the run stopped.
    pub stop_reason: StopReason,
    /// Whether a tolerance was met before the generation budget ran out.
    pub success: bool,
    /// Human-readable status message.
    pub message: String,
    /// Number of generations performed.
    pub nit: u64,
    /// Number of function evaluations, initial population included.
    pub nfev: u64,
    /// Final population matrix (NP x n).
    pub population: Array2<f64>,
    /// Objective values of the final population.
    pub population_energies: Array1<f64>,
    /// Evolution log of the run.
    pub log: EvolutionLog,
}

impl fmt::Debug for DEReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DEReport")
            .field("x", &format!("len={}", self.x.len()))
            .field("fun", &self.fun)
            .field("stop_reason", &self.stop_reason)
            .field("success", &self.success)
            .field("message", &self.message)
            .field("nit", &self.nit)
            .field("nfev", &self.nfev)
            .field(
                "population",
                &format!("{}x{}", self.population.nrows(), self.population.ncols()),
            )
            .field(
                "population_energies",
                &format!("len={}", self.population_energies.len()),
            )
            .field("log", &format!("len={}", self.log.len()))
            .finish()
    }
}
