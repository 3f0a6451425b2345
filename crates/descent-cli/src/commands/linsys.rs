//! Linear system command implementation.
//!
//! Solves `A·X = B`, inverts `A` or takes its determinant, with matrices read
//! from whitespace-separated text files.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use descent_math::linear_algebra::{Factorization, Matrix};

use crate::commands::{read_matrix, Context};
use crate::error::{CliError, CliResult};
use crate::output::{matrix_rows, print_header, print_output, KeyValue};

/// Arguments for the linsys command.
#[derive(Args, Debug)]
pub struct LinsysArgs {
    /// Operation to perform
    #[arg(value_enum)]
    pub action: LinsysAction,

    /// File holding the matrix A
    #[arg(short, long)]
    pub matrix: PathBuf,

    /// File holding the right-hand side B (one column per system)
    #[arg(short, long)]
    pub rhs: Option<PathBuf>,

    /// Decomposition used for solve and inverse
    #[arg(long, value_enum, default_value = "lup")]
    pub method: Method,

    /// Pivot threshold; overrides the settings file
    #[arg(short, long)]
    pub epsilon: Option<f64>,
}

/// Linear system operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LinsysAction {
    /// Solve A·X = B
    Solve,
    /// Invert A
    Inverse,
    /// Determinant of A
    Det,
}

/// Decomposition method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Method {
    /// Doolittle LU without pivoting
    Lu,
    /// LU with partial pivoting
    Lup,
}

impl Method {
    /// Decomposes `a` with this method.
    pub fn decompose(self, a: &Matrix, epsilon: f64) -> CliResult<Factorization> {
        let factorization = match self {
            Self::Lu => a.lu(epsilon)?,
            Self::Lup => a.lup(epsilon)?,
        };
        Ok(factorization)
    }
}

/// Execute the linsys command.
pub fn execute(args: LinsysArgs, ctx: &Context) -> Result<()> {
    let epsilon = args.epsilon.unwrap_or(ctx.settings.epsilon);
    if !(epsilon > 0.0) {
        return Err(
            CliError::InvalidArgument(format!("epsilon must be positive, got {}", epsilon)).into(),
        );
    }

    let a = read_matrix(&args.matrix)?;
    tracing::debug!("read {}x{} matrix from {}", a.rows(), a.cols(), args.matrix.display());

    match args.action {
        LinsysAction::Solve => {
            let path = args
                .rhs
                .as_ref()
                .ok_or_else(|| CliError::InvalidArgument("solve needs --rhs".into()))?;
            let b = read_matrix(path)?;
            let x = args.method.decompose(&a, epsilon)?.solve_matrix(&b)?;
            print_header("Solution X", ctx.format);
            print_output(&matrix_rows(&x), ctx.format)?;
        }
        LinsysAction::Inverse => {
            let inverse = args.method.decompose(&a, epsilon)?.inverse()?;
            print_header("Inverse", ctx.format);
            print_output(&matrix_rows(&inverse), ctx.format)?;
        }
        LinsysAction::Det => {
            let factorization = args.method.decompose(&a, epsilon)?;
            let results = vec![
                KeyValue::number("Determinant", factorization.determinant()),
                KeyValue::new("Row switches", factorization.switches().to_string()),
            ];
            print_header("Determinant", ctx.format);
            print_output(&results, ctx.format)?;
        }
    }

    Ok(())
}
