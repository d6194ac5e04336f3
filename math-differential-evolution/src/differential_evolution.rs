use crate::problems::FnProblem;
use crate::{DEConfig, DEError, DEReport, DifferentialEvolution, Population, Result, StopReason};
use ndarray::Array1;

/// Runs Differential Evolution on a function.
///
/// Builds a random population of `pop_size` individuals inside `bounds`
/// (seeded with `config.seed`), evolves it with `config` and reports the
/// best individual found.
///
/// # Arguments
///
/// * `func` - The objective function to minimize, mapping `&Array1<f64>` to `f64`
/// * `bounds` - Vector of (lower, upper) bound pairs for each dimension
/// * `pop_size` - Number of individuals, at least 5
/// * `config` - DE configuration (use `DEConfigBuilder` to construct)
///
/// # Errors
///
/// Returns `DEError::InvalidBounds` if any bound pair has upper < lower, a
/// configuration error if `config` is out of range, and
/// `DEError::PopulationTooSmall` if `pop_size < 5`.
///
/// # Example
///
/// ```rust
/// use math_optim_differential_evolution::{differential_evolution, DEConfigBuilder};
///
/// let config = DEConfigBuilder::new().generations(300).seed(42).build().unwrap();
/// let result = differential_evolution(
///     |x| x[0].powi(2) + x[1].powi(2),
///     &[(-5.0, 5.0), (-5.0, 5.0)],
///     20,
///     config,
/// )
/// .expect("optimization failed");
///
/// assert!(result.fun < 0.01);
/// ```
pub fn differential_evolution<F>(
    func: F,
    bounds: &[(f64, f64)],
    pop_size: usize,
    config: DEConfig,
) -> Result<DEReport>
where
    F: Fn(&Array1<f64>) -> f64 + 'static,
{
    if pop_size < 5 {
        return Err(DEError::PopulationTooSmall { pop_size });
    }
    let mut de = DifferentialEvolution::new(config)?;
    let mut pop = Population::new(FnProblem::new(func, bounds.to_vec()), pop_size, de.seed())?;
    let fevals_start = pop.fevals();

    let stop_reason = de.evolve(&mut pop)?;

    let best = pop.best_idx().ok_or(DEError::PopulationTooSmall { pop_size: 0 })?;
    let nit = if de.generations() == 0 {
        0
    } else {
        (pop.fevals() - fevals_start) / pop_size as u64
    };
    let message = match stop_reason {
        StopReason::MaxGenerations => "Maximum number of generations reached".to_string(),
        StopReason::Xtol => "Population collapsed in decision space (xtol)".to_string(),
        StopReason::Ftol => "Population collapsed in objective space (ftol)".to_string(),
    };

    Ok(DEReport {
        x: pop.x().row(best).to_owned(),
        fun: pop.f()[[best, 0]],
        stop_reason,
        success: stop_reason != StopReason::MaxGenerations,
        message,
        nit,
        nfev: pop.fevals(),
        population: pop.x().clone(),
        population_energies: pop.f().column(0).to_owned(),
        log: de.log().to_vec(),
    })
}
