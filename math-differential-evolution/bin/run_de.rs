use clap::Parser;
use math_optim_differential_evolution::problems::FnProblem;
use math_optim_differential_evolution::{
    DEConfigBuilder, DifferentialEvolution, Population, StopReason, Strategy,
};
use math_optim_test_functions::{
    FunctionMetadata, get_function, get_function_bounds_vec, get_function_metadata,
};
use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::PathBuf;
use std::process;
use std::str::FromStr;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    name = "run_de",
    about = "Run seeded Differential Evolution on a selected benchmark function"
)]
struct Cli {
    /// Name of the benchmark function to optimize (use --list-functions to see available options)
    #[arg(long)]
    function: Option<String>,

    /// Dimensionality of the problem (defaults to the function's recommended dimension)
    #[arg(long)]
    dim: Option<usize>,

    /// Number of individuals (at least 5)
    #[arg(long, default_value_t = 20)]
    population: usize,

    /// Number of generations
    #[arg(long, default_value_t = 1000)]
    generations: u64,

    /// Mutation factor F in [0, 2]
    #[arg(long, default_value_t = 0.8)]
    mutation_factor: f64,

    /// Crossover probability CR in [0, 1]
    #[arg(long, default_value_t = 0.9)]
    recombination: f64,

    /// Variant code 1..=10 or strategy name (e.g. rand1bin, best2exp)
    #[arg(long, default_value = "2")]
    variant: String,

    /// Stop when the objective spread falls below this value
    #[arg(long, default_value_t = 1e-6)]
    ftol: f64,

    /// Stop when the domain spread falls below this value
    #[arg(long, default_value_t = 1e-6)]
    xtol: f64,

    /// Random seed for reproducibility (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Log every N generations (0 = silent); rows are printed at info level
    #[arg(long, default_value_t = 10)]
    verbosity: u32,

    /// Write the evolved engine (configuration and log) to this JSON file
    #[arg(long)]
    json: Option<PathBuf>,

    /// List all available functions and exit
    #[arg(long)]
    list_functions: bool,

    /// Show metadata for the selected function before running optimization
    #[arg(long)]
    show_metadata: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Cli::parse();

    let metadata_map = get_function_metadata();

    if args.list_functions {
        let mut names: Vec<&String> = metadata_map.keys().collect();
        names.sort();
        println!("Available test functions ({}):", names.len());
        for name in names {
            println!("- {name}");
        }
        return;
    }

    let function_name = match &args.function {
        Some(name) => name.trim().to_lowercase(),
        None => {
            eprintln!("Error: --function must be provided unless --list-functions is used.");
            process::exit(2);
        }
    };

    let Some(function) = get_function(&function_name) else {
        eprintln!(
            "Error: function '{function_name}' not found. \
             Use --list-functions to inspect available names."
        );
        process::exit(2);
    };

    let metadata = metadata_map.get(&function_name);
    if args.show_metadata {
        if let Some(meta) = metadata {
            print_metadata(meta);
        } else {
            eprintln!("Warning: no metadata available for '{function_name}'.");
        }
    }

    let dimension = args
        .dim
        .or_else(|| metadata.and_then(|m| m.dimensions.first().copied()))
        .unwrap_or(2);
    let bounds = get_function_bounds_vec(&function_name, dimension, (-5.0, 5.0));

    let strategy = Strategy::from_str(&args.variant).unwrap_or_else(|err| {
        eprintln!("Error parsing variant '{}': {}", args.variant, err);
        process::exit(2);
    });

    let mut builder = DEConfigBuilder::new()
        .generations(args.generations)
        .mutation_factor(args.mutation_factor)
        .recombination(args.recombination)
        .strategy(strategy)
        .ftol(args.ftol)
        .xtol(args.xtol)
        .verbosity(args.verbosity);
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }

    let mut de = builder
        .build()
        .and_then(DifferentialEvolution::new)
        .unwrap_or_else(|err| {
            eprintln!("Error: {err}");
            process::exit(2);
        });

    let problem = FnProblem::new(function, bounds).with_name(function_name.clone());
    let mut pop = Population::new(problem, args.population, de.seed()).unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        process::exit(2);
    });

    println!(
        "Running DE on '{}' ({}D) with {} (variant {}), seed {}...",
        function_name,
        dimension,
        strategy,
        strategy.code(),
        de.seed()
    );

    let start = Instant::now();
    let stop = match de.evolve(&mut pop) {
        Ok(stop) => stop,
        Err(e) => {
            eprintln!("Error: optimization failed: {e}");
            process::exit(2);
        }
    };

    println!("\nOptimization completed in {:.2?}", start.elapsed());
    println!("Status: {stop}");
    println!("Evaluations: {}", pop.fevals());

    if let (Some(x), Some(f)) = (pop.champion_x(), pop.champion_f()) {
        println!("Best objective: {:.6e}", f[0]);
        let mut best_vector = String::new();
        for (idx, value) in x.iter().enumerate() {
            if idx > 0 {
                best_vector.push_str(", ");
            }
            let _ = write!(&mut best_vector, "{value:.6}");
        }
        println!("Best parameters: [{}]", best_vector);
    }

    if let Some(path) = &args.json {
        let written = de.to_json().map_err(|e| e.to_string()).and_then(|json| {
            fs::write(path, json).map_err(|e| e.to_string())
        });
        match written {
            Ok(()) => println!("Engine saved to: {}", path.display()),
            Err(e) => {
                eprintln!("Error: could not save engine: {e}");
                process::exit(2);
            }
        }
    }

    if stop == StopReason::MaxGenerations {
        process::exit(1);
    }
}

fn print_metadata(meta: &FunctionMetadata) {
    println!("Function metadata:");
    println!("  Name: {}", meta.name);
    println!("  Description: {}", meta.description);
    println!("  Typical dimensions: {:?}", meta.dimensions);
    if !meta.bounds.is_empty() {
        let bounds: Vec<String> = meta
            .bounds
            .iter()
            .map(|(lo, hi)| format!("[{lo}, {hi}]"))
            .collect();
        println!("  Bounds: {}", bounds.join(", "));
    }
    println!("  Multimodal: {}", meta.multimodal);
    if !meta.global_minima.is_empty() {
        println!("  Known global minima:");
        for (coords, value) in &meta.global_minima {
            println!("    f({coords:?}) = {value}");
        }
    }
}
