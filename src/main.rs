use std::{path::PathBuf, time::Duration};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use regina::{
    board,
    experiment::{self, report, ExperimentConfig, Method},
    solver::Solver as _,
};

#[derive(Parser)]
#[command(name = "regina", version, about = "Comparative N-Queens solvers")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a single board with one method and print the result.
    Solve {
        /// Board size (number of queens).
        #[arg(short, long)]
        n: usize,
        #[arg(long, value_enum, default_value = "csp-dynamic")]
        method: Method,
        /// Wall-clock budget in seconds.
        #[arg(long, default_value_t = 5.0)]
        time_limit: f64,
        /// RNG seed; ignored by the deterministic CSP variants.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run the comparative sweep and persist the results as CSV.
    Experiment {
        /// JSON experiment configuration; defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value = "results/results.csv")]
        out: PathBuf,
    },
}

fn main() -> regina::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Solve {
            n,
            method,
            time_limit,
            seed,
        } => {
            let config = ExperimentConfig::default();
            let solver = method.solver(&config);
            let solution = solver.solve(n, Duration::from_secs_f64(time_limit), seed)?;
            match solution {
                Some(assignment) => {
                    println!("{}", board::render(&assignment));
                    println!("\ncolumns: {assignment:?}");
                }
                None => println!("No solution found within the time limit."),
            }
        }
        Command::Experiment { config, out } => {
            let config = match config {
                Some(path) => ExperimentConfig::from_json_file(&path)?,
                None => ExperimentConfig::default(),
            };
            let rows = experiment::run(&config)?;
            println!("{}", report::render_summary_table(&rows));
            report::write_csv(&out, &rows)?;
            println!("Saved CSV -> {}", out.display());
        }
    }
    Ok(())
}
