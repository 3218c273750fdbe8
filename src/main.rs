//! Arctic wargame CLI - run, play and batch-simulate Arctic wargames.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Arctic wargame - a seeded three-actor geopolitical wargame
#[derive(Parser, Debug)]
#[command(name = "arctic-wargame")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single headless game with the United States on autopilot
    Run {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// JSON config file (default: standard rules)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Save an engine snapshot of the finished game
        #[arg(long)]
        save: Option<PathBuf>,

        /// Print only the result
        #[arg(short, long)]
        quiet: bool,
    },

    /// Play as the United States on stdin/stdout
    Play {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// JSON config file (default: standard rules)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Run many headless games in parallel and aggregate statistics
    Batch {
        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// JSON config file (default: standard rules)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Turn ceiling override
        #[arg(short = 't', long)]
        max_turns: Option<u32>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::BatchFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match args.command {
        Commands::Run {
            seed,
            config,
            format,
            save,
            quiet,
        } => cli::run::execute(seed, config, format, save, quiet),

        Commands::Play { seed, config } => cli::play::execute(seed, config),

        Commands::Batch {
            games,
            seed,
            threads,
            config,
            max_turns,
            format,
            progress,
        } => cli::batch::execute(games, seed, threads, config, max_turns, format, progress),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
