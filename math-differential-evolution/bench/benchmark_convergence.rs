use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use math_optim_differential_evolution::problems::{FnProblem, Rosenbrock};
use math_optim_differential_evolution::{
    DEConfigBuilder, DifferentialEvolution, Population, Strategy,
};
use math_optim_test_functions::ackley;

fn engine(strategy: Strategy, generations: u64) -> DifferentialEvolution {
    let config = DEConfigBuilder::new()
        .generations(generations)
        .strategy(strategy)
        .xtol(0.0)
        .ftol(0.0)
        .seed(23)
        .build()
        .expect("valid configuration");
    DifferentialEvolution::new(config).expect("valid configuration")
}

fn bench_strategies(c: &mut Criterion) {
    // 100 generations on 10-D Rosenbrock, population 30
    let mut group = c.benchmark_group("rosenbrock_10d_100gen");
    for strategy in Strategy::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(strategy),
            &strategy,
            |b, &strategy| {
                b.iter(|| {
                    let mut de = engine(strategy, 100);
                    let mut pop = Population::new(Rosenbrock::new(10), 30, 23)
                        .expect("valid bounds");
                    de.evolve(&mut pop).expect("rosenbrock is unconstrained");
                    black_box(pop.champion_f());
                })
            },
        );
    }
    group.finish();
}

fn bench_dimension_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("ackley_rand1bin_50gen");
    for dim in [2usize, 10, 30] {
        group.bench_with_input(BenchmarkId::from_parameter(dim), &dim, |b, &dim| {
            b.iter(|| {
                let problem = FnProblem::new(ackley, vec![(-32.768, 32.768); dim]);
                let mut de = engine(Strategy::Rand1Bin, 50);
                let mut pop = Population::new(problem, 10 * dim, 23).expect("valid bounds");
                de.evolve(&mut pop).expect("ackley is unconstrained");
                black_box(pop.champion_f());
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_strategies, bench_dimension_scaling);
criterion_main!(benches);
