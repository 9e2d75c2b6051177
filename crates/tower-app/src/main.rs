use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tower_app::control;
use tower_app::observer::{JsonLinesSink, LogSink, SnapshotSink, Sinks};
use tower_app::state::AppState;
use tower_app::{AppError, Settings};

/// Headless TOWER session runner
#[derive(Parser, Debug)]
#[command(name = "tower")]
#[command(about = "Run a headless air traffic control session and print its counters as JSON")]
struct Args {
    /// TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to run
    #[arg(long)]
    ticks: Option<u64>,

    /// Run ticks back to back instead of in real time
    #[arg(long)]
    fast: bool,

    /// Write every snapshot as a JSON line to this file
    #[arg(long)]
    snapshots: Option<PathBuf>,
}

fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tower_sim=info,tower_app=info")),
        )
        .init();

    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.simulation.seed = seed;
    }
    if let Some(ticks) = args.ticks {
        settings.game_loop.max_ticks = Some(ticks);
    }
    if args.fast {
        settings.game_loop.realtime = false;
    }

    let mut sinks: Vec<Box<dyn SnapshotSink>> =
        vec![Box::new(LogSink::new(settings.game_loop.log_every_ticks))];
    if let Some(path) = &args.snapshots {
        sinks.push(Box::new(JsonLinesSink::new(BufWriter::new(File::create(path)?))));
    }

    let state = AppState::new();
    let handle = control::start_simulation(&state, &settings, Box::new(Sinks(sinks)))?;
    let summary = handle.join().map_err(|_| AppError::LoopPanicked)?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
