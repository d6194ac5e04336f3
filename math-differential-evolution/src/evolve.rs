use ndarray::Array1;

use crate::argmin::argmin;
use crate::bounds::reflect_into_bounds;
use crate::convergence::{StopReason, check_tolerances, population_spread};
use crate::error::{DEError, Result};
use crate::evolution_log::{HEADER_EVERY, LOG_HEADER, LogEntry};
use crate::population::Population;
use crate::{DifferentialEvolution, ProblemHandle};

/// Rejects problems and populations DE cannot work on.
fn check_problem(problem: &ProblemHandle) -> Result<()> {
    if problem.nec() + problem.nic() > 0 {
        return Err(DEError::Constrained {
            problem: problem.name().to_string(),
            nec: problem.nec(),
            nic: problem.nic(),
        });
    }
    if problem.nobj() != 1 {
        return Err(DEError::MultiObjective {
            problem: problem.name().to_string(),
            nobj: problem.nobj(),
        });
    }
    if problem.nix() > 0 {
        return Err(DEError::IntegerDimensions {
            problem: problem.name().to_string(),
            nix: problem.nix(),
        });
    }
    if problem.is_stochastic() {
        return Err(DEError::Stochastic {
            problem: problem.name().to_string(),
        });
    }
    Ok(())
}

impl DifferentialEvolution {
    /// Evolves `pop` for at most [`generations`](Self::generations)
    /// generations and returns why it stopped.
    ///
    /// Every generation builds one trial per individual from the parent
    /// generation, reflects it into the box and keeps it when its objective
    /// is not worse than the target's. The log is cleared first and then
    /// receives one entry every `verbosity` generations.
    ///
    /// # Errors
    ///
    /// Fails before touching `pop` if the problem is constrained,
    /// multi-objective, integer or stochastic, or if the population holds
    /// fewer than 5 individuals. Fitness dimension errors raised by the
    /// problem abort the run: `pop` keeps the individuals it had before the
    /// call and the log keeps its previous entries, but the evaluations made
    /// so far still count in `pop.fevals()`.
    pub fn evolve(&mut self, pop: &mut Population) -> Result<StopReason> {
        check_problem(pop.problem())?;
        let np = pop.len();
        if np < 5 {
            return Err(DEError::PopulationTooSmall { pop_size: np });
        }
        let previous_log = std::mem::take(&mut self.log);
        if self.config.generations == 0 {
            return Ok(StopReason::MaxGenerations);
        }

        let lower = pop.problem().lower().clone();
        let upper = pop.problem().upper().clone();
        let fevals_start = pop.fevals();
        let strategy = self.config.strategy;
        let (f, cr) = (self.config.mutation_factor, self.config.recombination);
        let verbosity = u64::from(self.config.verbosity);

        let mut x = pop.x().clone();
        let mut fit: Array1<f64> = pop.f().column(0).to_owned();
        let mut next_x = x.clone();
        let mut next_fit = fit.clone();
        let mut best_idx = argmin(fit.view()).0;
        let mut stop = StopReason::MaxGenerations;

        for generation in 1..=self.config.generations {
            let mut accepted = 0usize;
            for i in 0..np {
                let mut trial = strategy.trial(&x, i, best_idx, f, cr, &mut self.rng);
                reflect_into_bounds(&mut trial, &lower, &upper);
                let f_trial = match pop.problem_mut().fitness(&trial) {
                    Ok(fitness) => fitness[0],
                    Err(e) => {
                        self.log = previous_log;
                        return Err(e);
                    }
                };
                if f_trial <= fit[i] || (fit[i].is_nan() && !f_trial.is_nan()) {
                    next_x.row_mut(i).assign(&trial);
                    next_fit[i] = f_trial;
                    accepted += 1;
                } else {
                    next_x.row_mut(i).assign(&x.row(i));
                    next_fit[i] = fit[i];
                }
            }
            std::mem::swap(&mut x, &mut next_x);
            std::mem::swap(&mut fit, &mut next_fit);
            best_idx = argmin(fit.view()).0;

            let spread = population_spread(&x, fit.view());
            log::debug!(
                "DE gen {generation}: {accepted}/{np} trials accepted, best {:.6e}",
                fit[best_idx]
            );

            if verbosity > 0 && (generation - 1) % verbosity == 0 {
                let entry = LogEntry {
                    generation,
                    fevals: pop.fevals() - fevals_start,
                    best: fit[best_idx],
                    dx: spread.dx,
                    df: spread.df,
                };
                if self.log.len() % HEADER_EVERY == 0 {
                    log::info!("{LOG_HEADER}");
                }
                log::info!("{entry}");
                self.log.push(entry);
            }

            if let Some(reason) = check_tolerances(spread, self.config.xtol, self.config.ftol) {
                stop = reason;
                break;
            }
        }

        pop.replace_generation(x, fit);
        if verbosity > 0 {
            log::info!("{stop}");
        }
        Ok(stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problems::{FnProblem, HockSchittkowsky71, Inventory, Rosenbrock, Zdt1};
    use crate::rng::DeRng;
    use crate::{DEConfigBuilder, Problem, Strategy};
    use ndarray::{Array2, array};
    use std::cell::Cell;

    fn engine(generations: u64, verbosity: u32) -> DifferentialEvolution {
        let config = DEConfigBuilder::new()
            .generations(generations)
            .seed(23)
            .verbosity(verbosity)
            .build()
            .unwrap();
        DifferentialEvolution::new(config).unwrap()
    }

    #[test]
    fn test_rejects_unsuitable_problems() {
        let mut de = engine(10, 1);
        let mut zdt = Population::new(Zdt1::default(), 20, 1).unwrap();
        assert!(matches!(de.evolve(&mut zdt), Err(DEError::MultiObjective { nobj: 2, .. })));

        let mut hs = Population::new(HockSchittkowsky71, 20, 1).unwrap();
        assert!(matches!(de.evolve(&mut hs), Err(DEError::Constrained { .. })));

        let mut inv = Population::new(Inventory::default(), 20, 1).unwrap();
        assert!(matches!(de.evolve(&mut inv), Err(DEError::Stochastic { .. })));

        let mut small = Population::new(Rosenbrock::new(3), 4, 1).unwrap();
        let before = small.x().clone();
        assert!(matches!(
            de.evolve(&mut small),
            Err(DEError::PopulationTooSmall { pop_size: 4 })
        ));
        assert_eq!(small.x(), &before);
        assert_eq!(small.fevals(), 4);
    }

    #[test]
    fn test_zero_generations_is_a_no_op() {
        let mut de = engine(0, 1);
        let mut pop = Population::new(Rosenbrock::new(3), 6, 1).unwrap();
        let before = pop.x().clone();
        assert_eq!(de.evolve(&mut pop).unwrap(), StopReason::MaxGenerations);
        assert_eq!(pop.x(), &before);
        assert_eq!(pop.fevals(), 6);
        assert!(de.log().is_empty());

        let mut small = Population::new(Rosenbrock::new(3), 3, 1).unwrap();
        assert!(de.evolve(&mut small).is_err());
    }

    #[test]
    fn test_log_spacing_and_fevals() {
        let mut de = engine(10, 3);
        de.set_xtol(0.0).unwrap();
        de.set_ftol(0.0).unwrap();
        let mut pop = Population::new(Rosenbrock::new(4), 8, 5).unwrap();
        assert_eq!(de.evolve(&mut pop).unwrap(), StopReason::MaxGenerations);
        let gens: Vec<u64> = de.log().iter().map(|e| e.generation).collect();
        assert_eq!(gens, vec![1, 4, 7, 10]);
        let fevals: Vec<u64> = de.log().iter().map(|e| e.fevals).collect();
        assert_eq!(fevals, vec![8, 32, 56, 80]);
        assert_eq!(pop.fevals(), 8 + 80);
    }

    #[test]
    fn test_population_stays_in_bounds_and_improves() {
        let mut de = engine(50, 0);
        let mut pop = Population::new(Rosenbrock::new(5), 10, 9).unwrap();
        let initial_best = pop.champion_f().unwrap()[0];
        de.evolve(&mut pop).unwrap();
        assert!(de.log().is_empty());
        assert!(pop.champion_f().unwrap()[0] <= initial_best);
        for row in pop.x().rows() {
            assert!(row.iter().all(|&v| (-5.0..=10.0).contains(&v)));
        }
        for (row, f) in pop.x().rows().into_iter().zip(pop.f().column(0)) {
            assert_eq!(*f, math_optim_test_functions::rosenbrock(&row.to_owned()));
        }
    }

    #[test]
    fn test_nan_target_is_replaced() {
        // NaN everywhere except near the origin.
        let f = |x: &Array1<f64>| if x[0].abs() < 0.5 { x[0].abs() } else { f64::NAN };
        let mut pop = Population::new(FnProblem::new(f, vec![(-1.0, 1.0); 2]), 10, 4).unwrap();
        pop.set_xf(0, &array![0.9, 0.0], &array![f64::NAN]).unwrap();
        let mut de = engine(200, 0);
        de.evolve(&mut pop).unwrap();
        assert!(pop.f().column(0).iter().all(|v| !v.is_nan()));
    }

    #[test]
    fn test_nan_members_do_not_stop_the_run() {
        // Finite only in a unit box around (1, 1).
        let f = |x: &Array1<f64>| {
            if (x[0] - 1.0).abs() < 0.5 && (x[1] - 1.0).abs() < 0.5 {
                (x[0] - 1.0).powi(2) + (x[1] - 1.0).powi(2)
            } else {
                f64::NAN
            }
        };
        let mut pop = Population::new(FnProblem::new(f, vec![(-5.0, 5.0); 2]), 10, 4).unwrap();
        pop.set_xf(0, &array![1.2, 1.0], &array![0.04]).unwrap();
        for i in 1..pop.len() {
            let xi = pop.x().row(i).to_owned();
            pop.set_xf(i, &xi, &array![f64::NAN]).unwrap();
        }

        let mut de = engine(5, 1);
        assert_eq!(de.ftol(), 1e-6);
        assert_eq!(de.evolve(&mut pop).unwrap(), StopReason::MaxGenerations);
        assert_eq!(de.log().len(), 5);
        assert_eq!(de.log()[0].df, f64::INFINITY);
    }

    #[test]
    fn test_generation_is_built_from_parents() {
        let config = DEConfigBuilder::new()
            .generations(1)
            .strategy(Strategy::Best1Bin)
            .seed(9)
            .xtol(0.0)
            .ftol(0.0)
            .verbosity(0)
            .build()
            .unwrap();
        let mut de = DifferentialEvolution::new(config).unwrap();
        let mut pop = Population::new(Rosenbrock::new(4), 8, 9).unwrap();
        let parents = pop.x().clone();
        let parent_f = pop.f().column(0).to_owned();
        let lower = pop.problem().lower().clone();
        let upper = pop.problem().upper().clone();
        de.evolve(&mut pop).unwrap();

        // Replay the generation with every trial drawn from the untouched parents.
        let mut rng = DeRng::new(9);
        let best = argmin(parent_f.view()).0;
        let (f, cr) = (de.mutation_factor(), de.recombination());
        let mut expected_x: Array2<f64> = parents.clone();
        let mut expected_f = parent_f.clone();
        for i in 0..parents.nrows() {
            let mut trial = Strategy::Best1Bin.trial(&parents, i, best, f, cr, &mut rng);
            reflect_into_bounds(&mut trial, &lower, &upper);
            let f_trial = math_optim_test_functions::rosenbrock(&trial);
            if f_trial <= parent_f[i] {
                expected_x.row_mut(i).assign(&trial);
                expected_f[i] = f_trial;
            }
        }
        assert_ne!(expected_x, parents);
        assert_eq!(pop.x(), &expected_x);
        assert_eq!(pop.f().column(0), expected_f);
    }

    /// Returns a malformed fitness vector once `good_calls` evaluations are used up.
    struct FailsAfter {
        calls: Cell<usize>,
        good_calls: usize,
    }

    impl Problem for FailsAfter {
        fn fitness(&self, x: &Array1<f64>) -> Array1<f64> {
            let n = self.calls.get() + 1;
            self.calls.set(n);
            if n > self.good_calls { array![x.sum(), 0.0] } else { array![x.sum()] }
        }

        fn bounds(&self) -> (Array1<f64>, Array1<f64>) {
            (Array1::zeros(2), Array1::ones(2))
        }
    }

    #[test]
    fn test_fitness_error_keeps_population_and_log() {
        // 6 initial evaluations, a clean 3-generation run, then one full
        // generation and one evaluation before the bad call.
        let problem = FailsAfter { calls: Cell::new(0), good_calls: 6 + 18 + 6 + 1 };
        let mut pop = Population::new(problem, 6, 2).unwrap();
        let mut de = engine(3, 1);
        de.set_xtol(0.0).unwrap();
        de.set_ftol(0.0).unwrap();
        de.evolve(&mut pop).unwrap();
        let log_before = de.log().to_vec();
        let x_before = pop.x().clone();
        assert_eq!(log_before.len(), 3);
        assert_eq!(pop.fevals(), 24);

        assert!(matches!(
            de.evolve(&mut pop),
            Err(DEError::FitnessDimensionMismatch { expected: 1, got: 2 })
        ));
        assert_eq!(de.log(), log_before.as_slice());
        assert_eq!(pop.x(), &x_before);
        assert_eq!(pop.fevals(), 24 + 8);
    }
}
