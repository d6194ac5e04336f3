//! Per-generation statistics recorded by `evolve`.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Column header matching the [`LogEntry`] `Display` row.
pub const LOG_HEADER: &str =
    "  Gen:         Fevals:           Best:             dx:             df:";

/// Rows printed between two headers.
pub(crate) const HEADER_EVERY: usize = 50;

/// One logged generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// 1-based generation index.
    pub generation: u64,
    /// Fitness evaluations since the start of the `evolve` call.
    pub fevals: u64,
    /// Best objective value in the population.
    #[serde(deserialize_with = "nan_from_null")]
    pub best: f64,
    /// Domain spread.
    #[serde(deserialize_with = "nan_from_null")]
    pub dx: f64,
    /// Objective spread.
    #[serde(deserialize_with = "nan_from_null")]
    pub df: f64,
}

// serde_json writes non-finite floats as `null`.
fn nan_from_null<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(d)?.unwrap_or(f64::NAN))
}

/// Ordered log of one `evolve` call.
pub type EvolutionLog = Vec<LogEntry>;

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>6} {:>15} {:>15.6e} {:>15.6e} {:>15.6e}",
            self.generation, self.fevals, self.best, self.dx, self.df
        )
    }
}
