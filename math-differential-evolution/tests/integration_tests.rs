//! Integration tests for the Differential Evolution engine
//!
//! Determinism across variants, configuration bounds, rejection of problems
//! DE cannot handle, early termination, log monotonicity and JSON round trips.

use approx::assert_relative_eq;
use math_optim_differential_evolution::problems::{HockSchittkowsky71, Inventory, Rosenbrock, Zdt1};
use math_optim_differential_evolution::{
    DEConfig, DEConfigBuilder, DEError, DifferentialEvolution, Population, Problem, StopReason,
};

fn config(variant: u32) -> DEConfig {
    DEConfigBuilder::new()
        .generations(10)
        .mutation_factor(0.7)
        .recombination(0.5)
        .variant(variant)
        .ftol(1e-6)
        .xtol(1e-6)
        .seed(23)
        .verbosity(1)
        .build()
        .expect("valid configuration")
}

#[test]
fn test_identical_seeds_give_identical_runs() {
    for variant in 1..=10u32 {
        let mut pop1 = Population::new(Rosenbrock::new(25), 5, 23).unwrap();
        let mut pop2 = Population::new(Rosenbrock::new(25), 5, 23).unwrap();
        let mut de1 = DifferentialEvolution::new(config(variant)).unwrap();
        let mut de2 = DifferentialEvolution::new(config(variant)).unwrap();

        let stop1 = de1.evolve(&mut pop1).unwrap();
        let stop2 = de2.evolve(&mut pop2).unwrap();

        assert_eq!(stop1, stop2, "variant {variant}");
        assert!(!de1.log().is_empty(), "variant {variant}");
        assert_eq!(de1.log(), de2.log(), "variant {variant}");
        assert_eq!(pop1.x(), pop2.x(), "variant {variant}");
        assert_eq!(pop1.f(), pop2.f(), "variant {variant}");
    }
}

#[test]
fn test_configuration_bounds() {
    let build = |f: f64, cr: f64, variant: u32| {
        DEConfigBuilder::new()
            .mutation_factor(f)
            .recombination(cr)
            .variant(variant)
            .build()
    };
    assert!(build(0.0, 0.0, 1).is_ok());
    assert!(build(2.0, 1.0, 10).is_ok());
    assert!(matches!(build(-0.1, 0.5, 2), Err(DEError::InvalidMutationFactor { .. })));
    assert!(matches!(build(2.1, 0.5, 2), Err(DEError::InvalidMutationFactor { .. })));
    assert!(matches!(build(0.5, 1.1, 2), Err(DEError::InvalidCrossoverRate { .. })));
    assert!(matches!(build(0.5, -0.1, 2), Err(DEError::InvalidCrossoverRate { .. })));
    assert!(matches!(build(0.5, 0.5, 0), Err(DEError::InvalidVariant { code: 0 })));
    assert!(matches!(build(0.5, 0.5, 11), Err(DEError::InvalidVariant { code: 11 })));

    let mut raw = DEConfig::default();
    raw.recombination = 3.0;
    assert!(DifferentialEvolution::new(raw).unwrap_err().is_config_error());
}

fn assert_rejected_untouched<P: Problem + 'static>(problem: P, size: usize) -> DEError {
    let mut pop = Population::new(problem, size, 23).unwrap();
    let x = pop.x().clone();
    let f = pop.f().clone();
    let fevals = pop.fevals();

    let mut de = DifferentialEvolution::new(config(2)).unwrap();
    let err = de.evolve(&mut pop).unwrap_err();

    assert_eq!(pop.x(), &x);
    assert_eq!(pop.f(), &f);
    assert_eq!(pop.fevals(), fevals);
    err
}

#[test]
fn test_unsuitable_problems_leave_population_unmodified() {
    assert!(matches!(
        assert_rejected_untouched(Rosenbrock::new(2), 4),
        DEError::PopulationTooSmall { pop_size: 4 }
    ));
    assert!(matches!(
        assert_rejected_untouched(Zdt1::new(30), 10),
        DEError::MultiObjective { .. }
    ));
    assert!(matches!(
        assert_rejected_untouched(HockSchittkowsky71, 10),
        DEError::Constrained { nec: 1, nic: 1, .. }
    ));
    assert!(matches!(
        assert_rejected_untouched(Inventory::default(), 10),
        DEError::Stochastic { .. }
    ));
}

fn early_stop(xtol: f64, ftol: f64) -> (StopReason, usize) {
    let cfg = DEConfigBuilder::new()
        .generations(1_000_000)
        .mutation_factor(0.8)
        .recombination(0.9)
        .variant(2)
        .xtol(xtol)
        .ftol(ftol)
        .seed(23)
        .verbosity(1)
        .build()
        .unwrap();
    let mut de = DifferentialEvolution::new(cfg).unwrap();
    let mut pop = Population::new(Rosenbrock::new(2), 20, 23).unwrap();
    let stop = de.evolve(&mut pop).unwrap();
    (stop, de.log().len())
}

#[test]
fn test_tolerances_terminate_early() {
    let (stop, logged) = early_stop(1e-50, 1e-3);
    assert_eq!(stop, StopReason::Ftol);
    assert!(logged < 5000, "logged {logged} generations");

    let (stop, logged) = early_stop(1e-3, 1e-50);
    assert_eq!(stop, StopReason::Xtol);
    assert!(logged < 5000, "logged {logged} generations");
}

#[test]
fn test_logged_best_never_increases() {
    for variant in 1..=10u32 {
        let cfg = DEConfigBuilder::new()
            .generations(200)
            .variant(variant)
            .xtol(0.0)
            .ftol(0.0)
            .seed(5)
            .verbosity(1)
            .build()
            .unwrap();
        let mut de = DifferentialEvolution::new(cfg).unwrap();
        let mut pop = Population::new(Rosenbrock::new(5), 12, 5).unwrap();
        de.evolve(&mut pop).unwrap();

        assert_eq!(de.log().len(), 200);
        for pair in de.log().windows(2) {
            assert!(pair[1].best <= pair[0].best, "variant {variant}: {pair:?}");
            assert!(pair[1].fevals > pair[0].fevals);
        }
    }
}

#[test]
fn test_json_round_trip() {
    let mut de = DifferentialEvolution::new(config(8)).unwrap();
    let mut pop = Population::new(Rosenbrock::new(25), 5, 23).unwrap();
    de.evolve(&mut pop).unwrap();
    assert!(!de.log().is_empty());

    let json = de.to_json().unwrap();
    let restored = DifferentialEvolution::from_json(&json).unwrap();

    assert_eq!(restored.to_string(), de.to_string());
    assert_eq!(restored.config(), de.config());
    assert_eq!(restored.log().len(), de.log().len());
    for (a, b) in de.log().iter().zip(restored.log()) {
        assert_eq!(a.generation, b.generation);
        assert_eq!(a.fevals, b.fevals);
        assert_relative_eq!(a.best, b.best, max_relative = 1e-10);
        assert_relative_eq!(a.dx, b.dx, max_relative = 1e-10);
        assert_relative_eq!(a.df, b.df, max_relative = 1e-10);
    }
}

#[test]
fn test_restored_engine_replays_from_seed() {
    let mut de = DifferentialEvolution::new(config(4)).unwrap();
    let restored = DifferentialEvolution::from_json(&de.to_json().unwrap()).unwrap();
    let mut restored = restored;

    let mut pop1 = Population::new(Rosenbrock::new(10), 8, 1).unwrap();
    let mut pop2 = Population::new(Rosenbrock::new(10), 8, 1).unwrap();
    de.evolve(&mut pop1).unwrap();
    restored.evolve(&mut pop2).unwrap();
    assert_eq!(de.log(), restored.log());
    assert_eq!(pop1.x(), pop2.x());
}

#[test]
fn test_malformed_json_is_rejected() {
    assert!(matches!(
        DifferentialEvolution::from_json("{\"config\": 3}"),
        Err(DEError::Serialization(_))
    ));
    let bad_variant = DifferentialEvolution::new(config(2))
        .unwrap()
        .to_json()
        .unwrap()
        .replace("\"variant\": 2", "\"variant\": 42");
    assert!(matches!(
        DifferentialEvolution::from_json(&bad_variant),
        Err(DEError::Serialization(_))
    ));
}

#[test]
fn test_out_of_range_json_config_is_a_config_error() {
    let json = DifferentialEvolution::new(config(2)).unwrap().to_json().unwrap();
    let bad_factor = json.replace("\"mutation_factor\": 0.7", "\"mutation_factor\": 5.0");
    assert_ne!(bad_factor, json);
    let err = DifferentialEvolution::from_json(&bad_factor).unwrap_err();
    assert!(err.is_config_error());
    assert!(matches!(err, DEError::InvalidMutationFactor { .. }));

    let bad_tol = json.replace("\"xtol\": 1e-6", "\"xtol\": -1.0");
    assert_ne!(bad_tol, json);
    assert!(DifferentialEvolution::from_json(&bad_tol).unwrap_err().is_config_error());
}
