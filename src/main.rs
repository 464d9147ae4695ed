use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};

use aco_tsp::aco::{
    params::{
        DEFAULT_ANTS, DEFAULT_DEPOSIT, DEFAULT_EVAPORATION_RATE, DEFAULT_ITERATIONS,
        DEFAULT_SELECTION_PROBABILITY,
    },
    utils::{format_edges, format_tour},
};
use aco_tsp::{Colony, DesirabilityMode, Outcome, Params, Problem};

/// Approximates the shortest closed tour with an ant colony. Without an
/// input file the built-in 8 node rectangle is solved.
#[derive(Parser, Debug)]
#[clap(about, version, author)]
struct Args {
    /// Comma separated distance matrix, one row per line
    #[clap(short, long, conflicts_with = "coords")]
    distances: Option<PathBuf>,

    /// Node coordinates, one `x y` pair per line
    #[clap(short, long)]
    coords: Option<PathBuf>,

    /// Also write the distance matrix in use to this CSV file
    #[clap(long)]
    write_distances: Option<PathBuf>,

    #[clap(short, long, default_value_t = DEFAULT_ANTS)]
    ants: usize,

    #[clap(short, long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,

    #[clap(short, long, default_value_t = DEFAULT_EVAPORATION_RATE)]
    evaporation_rate: f64,

    /// Pheromone each ant spreads, divided by its tour length
    #[clap(short = 'q', long, default_value_t = DEFAULT_DEPOSIT)]
    deposit: f64,

    /// Chance of choosing the next node by pheromone rather than at random
    #[clap(short = 'p', long, default_value_t = DEFAULT_SELECTION_PROBABILITY)]
    selection_probability: f64,

    #[clap(long, default_value_t = 1.0)]
    pheromone_weight: f64,

    #[clap(long, default_value_t = 1.0)]
    heuristic_weight: f64,

    #[clap(short, long, default_value_t = 0)]
    seed: u64,

    /// `as-stored` or `symmetric`
    #[clap(long, default_value = "as-stored")]
    desirability: DesirabilityMode,

    /// List the pheromone of every edge after the matrix
    #[clap(long)]
    edges: bool,

    /// More output on stderr, repeat for more
    #[clap(short, long, parse(from_occurrences))]
    verbose: usize,
}

impl Args {
    fn params(&self) -> Params {
        Params {
            ants: self.ants,
            iterations: self.iterations,
            evaporation_rate: self.evaporation_rate,
            deposit: self.deposit,
            selection_probability: self.selection_probability,
            pheromone_weight: self.pheromone_weight,
            heuristic_weight: self.heuristic_weight,
            seed: self.seed,
            desirability: self.desirability,
        }
    }

    fn problem(&self) -> Result<Problem> {
        if let Some(path) = &self.distances {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            Problem::try_from_csv(file)
        } else if let Some(path) = &self.coords {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            Problem::try_from_coordinates(file)
        } else {
            Problem::sample()
        }
    }
}

fn init_logging(verbose: usize) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn report(outcome: &Outcome, edges: bool) {
    println!("Final pheromone on each edge:");
    print!("{}", outcome.pheromones.matrix());

    if edges {
        println!();
        println!("{}", format_edges(outcome.pheromones.matrix()));
    }

    if let Some(best) = &outcome.best {
        println!();
        println!(
            "Best tour of length {} (iteration {}):",
            best.length, best.iteration
        );
        println!("{}", format_tour(&best.tour));
    }
    println!("Took {:?}", outcome.elapsed);
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let problem = args.problem()?;
    info!(nodes = problem.num_nodes(), "Loaded problem");

    if let Some(path) = &args.write_distances {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        problem.write_csv(&mut writer)?;
        writer.flush()?;
        info!("Wrote distances to {}", path.display());
    }

    let outcome = Colony::on(problem, args.params())?.run();
    report(&outcome, args.edges);

    Ok(())
}
