//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::commands::{LabArgs, LinsysArgs, MinimizeArgs};

/// Descent - linear systems and numerical minimization from the command line
#[derive(Parser)]
#[command(name = "descent")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format [default: table]
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Log algorithm progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file (TOML)
    #[arg(short, long, global = true, env = "DESCENT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Seed for randomized algorithms
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Solve, invert or take the determinant of matrices read from files
    Linsys(LinsysArgs),

    /// Minimize a reference problem with one algorithm
    Minimize(MinimizeArgs),

    /// Run the scenario tables of a lab exercise
    Lab(LabArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}
