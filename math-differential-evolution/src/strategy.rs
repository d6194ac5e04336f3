//! Mutation/crossover strategies, numbered 1 to 10.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::crossover_binomial::binomial_crossover;
use crate::crossover_exponential::exponential_crossover;
use crate::distinct_indices::distinct_indices;
use crate::error::{DEError, Result};
use crate::mutant_best1::mutant_best1;
use crate::mutant_best2::mutant_best2;
use crate::mutant_rand_to_best1::mutant_rand_to_best1;
use crate::mutant_rand1::mutant_rand1;
use crate::mutant_rand2::mutant_rand2;
use crate::rng::DeRng;

/// Crossover type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossover {
    /// Binomial (uniform) crossover
    Binomial,
    /// Exponential crossover
    Exponential,
}

/// Differential Evolution mutation/crossover strategy.
///
/// The strategy name follows the pattern `{mutation}{n}{crossover}` where:
/// - `mutation`: Base vector selection (Rand, Best, RandToBest)
/// - `n`: Number of difference vectors (1 or 2)
/// - `crossover`: Crossover type (Bin = binomial, Exp = exponential)
///
/// Each variant also has a stable integer code, which is how it is
/// configured and serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Strategy {
    /// 1 - Rand/1/Exp
    Rand1Exp,
    /// 2 - Rand/1/Bin
    #[default]
    Rand1Bin,
    /// 3 - Best/1/Exp
    Best1Exp,
    /// 4 - Best/1/Bin
    Best1Bin,
    /// 5 - Rand/2/Exp
    Rand2Exp,
    /// 6 - Rand/2/Bin
    Rand2Bin,
    /// 7 - Rand-to-best/1/Exp
    RandToBest1Exp,
    /// 8 - Rand-to-best/1/Bin
    RandToBest1Bin,
    /// 9 - Best/2/Exp
    Best2Exp,
    /// 10 - Best/2/Bin
    Best2Bin,
}

impl Strategy {
    /// Every strategy, ordered by code.
    pub const ALL: [Strategy; 10] = [
        Strategy::Rand1Exp,
        Strategy::Rand1Bin,
        Strategy::Best1Exp,
        Strategy::Best1Bin,
        Strategy::Rand2Exp,
        Strategy::Rand2Bin,
        Strategy::RandToBest1Exp,
        Strategy::RandToBest1Bin,
        Strategy::Best2Exp,
        Strategy::Best2Bin,
    ];

    /// Strategy for a variant code in 1..=10.
    ///
    /// # Errors
    ///
    /// Returns `DEError::InvalidVariant` for any other code.
    pub fn from_code(code: u32) -> Result<Self> {
        match code {
            1..=10 => Ok(Self::ALL[(code - 1) as usize]),
            _ => Err(DEError::InvalidVariant { code }),
        }
    }

    /// Variant code in 1..=10.
    pub fn code(self) -> u32 {
        self as u32 + 1
    }

    /// Crossover applied after mutation.
    pub fn crossover(self) -> Crossover {
        if self.code() % 2 == 1 {
            Crossover::Exponential
        } else {
            Crossover::Binomial
        }
    }

    /// Number of non-target individuals drawn to build the mutant.
    pub fn donors(self) -> usize {
        match self {
            Strategy::Best1Exp | Strategy::Best1Bin => 2,
            Strategy::Rand1Exp
            | Strategy::Rand1Bin
            | Strategy::RandToBest1Exp
            | Strategy::RandToBest1Bin => 3,
            Strategy::Best2Exp | Strategy::Best2Bin => 4,
            Strategy::Rand2Exp | Strategy::Rand2Bin => 5,
        }
    }

    /// Whether the mutant is anchored on or pulled toward the best individual.
    pub fn uses_best(self) -> bool {
        !matches!(
            self,
            Strategy::Rand1Exp | Strategy::Rand1Bin | Strategy::Rand2Exp | Strategy::Rand2Bin
        )
    }

    /// Canonical lower-case name, e.g. `"rand1bin"`.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Rand1Exp => "rand1exp",
            Strategy::Rand1Bin => "rand1bin",
            Strategy::Best1Exp => "best1exp",
            Strategy::Best1Bin => "best1bin",
            Strategy::Rand2Exp => "rand2exp",
            Strategy::Rand2Bin => "rand2bin",
            Strategy::RandToBest1Exp => "randtobest1exp",
            Strategy::RandToBest1Bin => "randtobest1bin",
            Strategy::Best2Exp => "best2exp",
            Strategy::Best2Bin => "best2bin",
        }
    }

    /// Builds the trial vector competing against individual `i`.
    ///
    /// Donors are drawn from the index stream, crossover decisions from the
    /// real stream. `pop` is the parent generation and is never modified.
    pub(crate) fn trial(
        self,
        pop: &Array2<f64>,
        i: usize,
        best_idx: usize,
        f: f64,
        cr: f64,
        rng: &mut DeRng,
    ) -> Array1<f64> {
        let np = pop.nrows();
        let mutant = match self {
            Strategy::Rand1Exp | Strategy::Rand1Bin => {
                mutant_rand1(pop, distinct_indices(i, np, rng), f)
            }
            Strategy::Best1Exp | Strategy::Best1Bin => {
                mutant_best1(pop, best_idx, distinct_indices(i, np, rng), f)
            }
            Strategy::Rand2Exp | Strategy::Rand2Bin => {
                mutant_rand2(pop, distinct_indices(i, np, rng), f)
            }
            Strategy::RandToBest1Exp | Strategy::RandToBest1Bin => {
                mutant_rand_to_best1(pop, best_idx, distinct_indices(i, np, rng), f)
            }
            Strategy::Best2Exp | Strategy::Best2Bin => {
                mutant_best2(pop, best_idx, distinct_indices(i, np, rng), f)
            }
        };
        match self.crossover() {
            Crossover::Binomial => binomial_crossover(pop.row(i), &mutant, cr, rng),
            Crossover::Exponential => exponential_crossover(pop.row(i), &mutant, cr, rng),
        }
    }
}

impl TryFrom<u32> for Strategy {
    type Error = DEError;
    fn try_from(code: u32) -> Result<Self> {
        Strategy::from_code(code)
    }
}

impl From<Strategy> for u32 {
    fn from(s: Strategy) -> u32 {
        s.code()
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = DEError;
    fn from_str(s: &str) -> Result<Self> {
        let t = s.trim().to_lowercase();
        if let Ok(code) = t.parse::<u32>() {
            return Strategy::from_code(code);
        }
        match t.as_str() {
            "rand1exp" => Ok(Strategy::Rand1Exp),
            "rand1bin" | "rand1" => Ok(Strategy::Rand1Bin),
            "best1exp" => Ok(Strategy::Best1Exp),
            "best1bin" | "best1" => Ok(Strategy::Best1Bin),
            "rand2exp" => Ok(Strategy::Rand2Exp),
            "rand2bin" | "rand2" => Ok(Strategy::Rand2Bin),
            "randtobest1exp" | "rand-to-best1exp" | "rand_to_best1exp" => {
                Ok(Strategy::RandToBest1Exp)
            }
            "randtobest1bin" | "rand-to-best1bin" | "rand_to_best1bin" => {
                Ok(Strategy::RandToBest1Bin)
            }
            "best2exp" => Ok(Strategy::Best2Exp),
            "best2bin" | "best2" => Ok(Strategy::Best2Bin),
            _ => Err(DEError::UnknownStrategy {
                name: s.to_string(),
            }),
        }
    }
}
