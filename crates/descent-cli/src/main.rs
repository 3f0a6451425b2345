//! Descent CLI - linear systems and numerical minimization.
//!
//! # Usage
//!
//! ```bash
//! # Solve a linear system stored in text files
//! descent linsys solve --matrix A.txt --rhs b.txt --method lup
//!
//! # Minimize a reference problem
//! descent minimize --problem rosenbrock --algorithm nelder-mead --start -1.9,2
//!
//! # Run the scenario tables of a lab
//! descent lab 2 --seed 42
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod error;
mod output;
mod settings;

use cli::{Cli, Commands};
use commands::Context;
use settings::Settings;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Settings file, then command-line overrides
    let mut settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    let format = cli.format.or(settings.format).unwrap_or_default();
    let ctx = Context { format, settings };

    match cli.command {
        Commands::Linsys(args) => commands::linsys::execute(args, &ctx)?,
        Commands::Minimize(args) => commands::minimize::execute(args, &ctx)?,
        Commands::Lab(args) => commands::lab::execute(args, &ctx)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
