//! CLI error types.

use std::path::PathBuf;

use descent_math::MathError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A file could not be read.
    #[error("Cannot read {}: {source}", path.display())]
    Read {
        /// The file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A matrix file was malformed.
    #[error("{}: {source}", path.display())]
    MatrixFile {
        /// The file.
        path: PathBuf,
        /// Parse failure.
        source: MathError,
    },

    /// A numerical routine failed.
    #[error(transparent)]
    Math(#[from] MathError),

    /// Invalid command-line value.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
