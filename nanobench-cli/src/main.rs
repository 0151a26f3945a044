// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! nanobench CLI
//!
//! Command-line interface for running compiled-in scenario suites.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod suites;

/// nanobench - calibrated micro-benchmarks with rate comparison
#[derive(Parser)]
#[command(name = "nanobench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (defaults are used when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a scenario suite and print the score and comparison chart
    Run {
        /// Name of the suite (see `nanobench list`)
        suite: String,

        /// CPU time budget per scenario, in seconds
        #[arg(short, long)]
        time: Option<f64>,

        /// Run a fixed number of iterations instead of a time budget
        #[arg(short = 'n', long, conflicts_with = "time")]
        iterations: Option<u64>,

        /// Warm-up iterations per scenario before measuring
        #[arg(short, long)]
        warmup: Option<u64>,

        /// Print the results as JSON instead of text tables
        #[arg(long)]
        json: bool,
    },

    /// List available suites and their scenarios
    List,

    /// Validate a configuration file
    Validate {
        /// Path to the configuration file
        file: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the reports.
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            suite,
            time,
            iterations,
            warmup,
            json,
        } => commands::run::execute(
            cli.config.as_deref(),
            commands::run::RunOptions {
                suite,
                time,
                iterations,
                warmup,
                json,
            },
        ),
        Commands::List => commands::list::execute(),
        Commands::Validate { file } => commands::validate::execute(&file),
    }
}
