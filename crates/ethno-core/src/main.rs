//! Ethnocentrism Simulation Runner
//!
//! Runs the Axelrod–Hammond model for a number of generations and streams
//! one JSON line per generation to stdout. Logs go to stderr.

use clap::Parser;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ethno_core::config::DEFAULT_CONFIG_PATH;
use ethno_core::{SimConfig, Simulation};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "ethnocentrism")]
#[command(about = "Axelrod-Hammond ethnocentrism simulation")]
struct Args {
    /// TOML configuration file (defaults to ./ethnocentrism.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Number of generations to simulate
    #[arg(long)]
    generations: Option<u64>,

    /// Side length of the grid
    #[arg(long)]
    size: Option<usize>,

    /// Interval between progress log lines (in generations)
    #[arg(long, default_value_t = 100)]
    progress_interval: u64,

    /// Print the final grid snapshot as a JSON line after the run
    #[arg(long)]
    snapshot: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::load_or_default(DEFAULT_CONFIG_PATH),
    };
    if let Some(seed) = args.seed {
        config.run.seed = Some(seed);
    }
    if let Some(generations) = args.generations {
        config.run.generations = generations;
    }
    if let Some(size) = args.size {
        config.world.size = size;
    }

    let mut simulation = Simulation::from_config(&config)?;
    let generations = config.run.generations;
    tracing::info!(generations, "Starting simulation");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for _ in 0..generations {
        let record = simulation.step();
        writeln!(out, "{}", record.to_jsonl()?)?;

        if args.progress_interval > 0 && record.generation % args.progress_interval == 0 {
            let [ethnocentric, samaritan, traitor, selfish] = record.counts.as_array();
            tracing::info!(
                generation = record.generation,
                ethnocentric,
                samaritan,
                traitor,
                selfish,
                "Generation {} / {}",
                record.generation,
                generations
            );
        }
    }

    if args.snapshot {
        writeln!(out, "{}", serde_json::to_string(&simulation.snapshot())?)?;
    }
    out.flush()?;

    let summary = simulation.summary();
    tracing::info!(
        generations = summary.generations,
        population = summary.final_counts.total(),
        births = summary.total_births,
        deaths = summary.total_deaths,
        "Simulation complete"
    );
    for (&strategy, share) in ethno_events::Strategy::all()
        .iter()
        .zip(summary.mean_shares.iter())
    {
        tracing::info!(
            %strategy,
            final_count = summary.final_counts.get(strategy),
            peak = summary.peak_counts.get(strategy),
            mean_share = *share,
            "Strategy summary"
        );
    }
    Ok(())
}
