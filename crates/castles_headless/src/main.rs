//! Headless castle-game runner.
//!
//! Runs the simulation core without any rendering, for balance sweeps and
//! determinism checks.
//!
//! # Usage
//!
//! ```bash
//! # One game, 200 ticks, idle player
//! cargo run -p castles_headless -- run --ticks 200
//!
//! # One game with the scripted expanding player, snapshots on stdout
//! cargo run -p castles_headless -- run --strategy expand --json
//!
//! # A thousand-seed balance sweep
//! cargo run -p castles_headless -- batch --count 1000 --ticks 300
//! ```
//!
//! Reports and snapshots go to stdout as JSON; logs go to stderr.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use castles_core::config::EngineConfig;
use castles_headless::batch::{run_batch, BatchConfig};
use castles_headless::strategies::PlayerStrategy;
use castles_headless::{run_game, HeadlessError, RunConfig};

#[derive(Parser)]
#[command(name = "castles_headless")]
#[command(about = "Headless castle-game runner for balance testing and CI")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single game
    Run {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "100")]
        ticks: u64,

        /// Random seed
        #[arg(short, long, default_value = "0")]
        seed: u64,

        /// RON configuration file overriding the built-in defaults
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Scripted player behaviour
        #[arg(long, value_enum, default_value_t = PlayerStrategy::Idle)]
        strategy: PlayerStrategy,

        /// Emit a JSON snapshot line after every tick
        #[arg(long)]
        json: bool,
    },

    /// Run a batch of games in parallel
    Batch {
        /// Number of games to run
        #[arg(short, long, default_value = "100")]
        count: u64,

        /// Seed of the first game; game i uses seed_start + i
        #[arg(long, default_value = "0")]
        seed_start: u64,

        /// Ticks per game
        #[arg(short, long, default_value = "200")]
        ticks: u64,

        /// RON configuration file overriding the built-in defaults
        #[arg(long)]
        config: Option<PathBuf>,

        /// Scripted player behaviour
        #[arg(long, value_enum, default_value_t = PlayerStrategy::Expand)]
        strategy: PlayerStrategy,

        /// Print every per-game report, not just the summary
        #[arg(long)]
        reports: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Logs to stderr; stdout carries reports and snapshots.
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    if let Err(err) = run(cli.command) {
        tracing::error!(%err, "run failed");
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), HeadlessError> {
    match command {
        Commands::Run {
            ticks,
            seed,
            config,
            strategy,
            json,
        } => {
            let engine_config = load_config(config.as_deref())?.with_seed(seed);
            let run = RunConfig {
                ticks,
                strategy,
                emit_snapshots: json,
            };
            let mut stdout = std::io::stdout().lock();
            let report = run_game(engine_config, &run, &mut stdout)?;
            serde_json::to_writer_pretty(&mut stdout, &report)?;
            use std::io::Write;
            writeln!(stdout)?;
        }
        Commands::Batch {
            count,
            seed_start,
            ticks,
            config,
            strategy,
            reports,
        } => {
            let engine_config = load_config(config.as_deref())?;
            let batch = BatchConfig {
                count,
                seed_start,
                ticks,
                strategy,
            };
            let (game_reports, summary) = run_batch(engine_config, &batch)?;

            let mut stdout = std::io::stdout().lock();
            use std::io::Write;
            if reports {
                for report in &game_reports {
                    serde_json::to_writer(&mut stdout, report)?;
                    writeln!(stdout)?;
                }
            }
            serde_json::to_writer_pretty(&mut stdout, &summary)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

/// Load an [`EngineConfig`] from a RON file, or fall back to defaults.
fn load_config(path: Option<&std::path::Path>) -> Result<EngineConfig, HeadlessError> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            let config = ron::from_str(&text)?;
            tracing::debug!(path = %path.display(), "loaded engine config");
            Ok(config)
        }
        None => Ok(EngineConfig::default()),
    }
}
