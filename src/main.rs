//! capquiz CLI - play the capital quiz and inspect its data.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use capquiz::GeoPoint;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// capquiz - find the world's capitals before your kilometres run out
#[derive(Parser, Debug)]
#[command(name = "capquiz")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play the quiz in an interactive TUI
    Play {
        /// Custom city dataset (JSON, default: bundled capitals)
        #[arg(long)]
        cities: Option<PathBuf>,

        /// Config file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Starting distance budget in kilometres (default: 1500)
        #[arg(short, long)]
        budget: Option<u32>,

        /// Guesses closer than this many kilometres are correct (default: 50)
        #[arg(short, long)]
        threshold: Option<u32>,

        /// Save the session summary to a JSON file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Write logs to this file (filter with CAPQUIZ_LOG)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// List and validate a city dataset
    Cities {
        /// Dataset to check (default: bundled capitals)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Great-circle distance between two points, scored like a guess
    Distance {
        /// First point as LAT,LNG
        #[arg(long, allow_hyphen_values = true)]
        from: GeoPoint,

        /// Second point as LAT,LNG
        #[arg(long, allow_hyphen_values = true)]
        to: GeoPoint,

        /// Correct-guess threshold in kilometres (default: 50)
        #[arg(short, long)]
        threshold: Option<u32>,

        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: cli::OutputFormat,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Play {
            cities,
            config,
            budget,
            threshold,
            save,
            log_file,
        } => {
            let logging = match &log_file {
                Some(path) => cli::logging::to_file(path),
                None => Ok(()),
            };
            logging.and_then(|()| {
                cli::play::execute(cli::play::PlayOptions {
                    cities,
                    config,
                    budget,
                    threshold,
                    save,
                })
            })
        }

        Commands::Cities { file, format } => {
            cli::logging::to_stderr().and_then(|()| cli::cities::execute(file, format))
        }

        Commands::Distance {
            from,
            to,
            threshold,
            format,
        } => cli::logging::to_stderr()
            .and_then(|()| cli::distance::execute(from, to, threshold, format)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
