//! CLI command implementations.

pub mod lab;
pub mod linsys;
pub mod minimize;

pub use lab::LabArgs;
pub use linsys::LinsysArgs;
pub use minimize::MinimizeArgs;

use std::fmt::Display;
use std::path::Path;

use descent_math::linear_algebra::{Matrix, Vector};
use descent_math::optimization::OptimizationResult;
use descent_math::MathError;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::{format_point, PRECISION};
use crate::settings::Settings;

/// Resolved output format and settings shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output format.
    pub format: OutputFormat,
    /// Settings after command-line overrides.
    pub settings: Settings,
}

/// One optimizer run, or the error that aborted it.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct RunRecord {
    #[tabled(rename = "Problem")]
    pub problem: String,
    #[tabled(rename = "Algorithm")]
    pub algorithm: String,
    #[tabled(rename = "Start")]
    pub start: String,
    #[tabled(rename = "Iterations", display_with = "display_option")]
    pub iterations: Option<u32>,
    #[tabled(rename = "Evaluations", display_with = "display_option")]
    pub evaluations: Option<u64>,
    #[tabled(rename = "Optimum")]
    pub point: String,
    #[tabled(rename = "f(Optimum)", display_with = "display_value")]
    pub value: Option<f64>,
    #[tabled(rename = "Outcome")]
    pub outcome: String,
}

impl RunRecord {
    /// Record of a run that finished.
    pub fn finished(
        problem: impl Into<String>,
        algorithm: impl Into<String>,
        start: &Vector,
        result: &OptimizationResult,
    ) -> Self {
        Self {
            problem: problem.into(),
            algorithm: algorithm.into(),
            start: start.to_string(),
            iterations: Some(result.iterations),
            evaluations: Some(result.evaluations),
            point: format_point(&result.point),
            value: Some(result.value),
            outcome: result.termination.to_string(),
        }
    }

    /// Record of a run that failed.
    pub fn failed(
        problem: impl Into<String>,
        algorithm: impl Into<String>,
        start: &Vector,
        error: &MathError,
    ) -> Self {
        Self {
            problem: problem.into(),
            algorithm: algorithm.into(),
            start: start.to_string(),
            iterations: None,
            evaluations: None,
            point: String::new(),
            value: None,
            outcome: error.to_string(),
        }
    }

    /// Record from either outcome of a run.
    pub fn from_outcome(
        problem: impl Into<String>,
        algorithm: impl Into<String>,
        start: &Vector,
        outcome: Result<OptimizationResult, MathError>,
    ) -> Self {
        match outcome {
            Ok(result) => Self::finished(problem, algorithm, start, &result),
            Err(e) => {
                tracing::debug!("run from {} failed: {}", start, e);
                Self::failed(problem, algorithm, start, &e)
            }
        }
    }
}

pub(crate) fn display_option<T: Display>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

pub(crate) fn display_value(value: &Option<f64>) -> String {
    value
        .map(|v| format!("{:.prec$e}", v, prec = PRECISION))
        .unwrap_or_default()
}

/// Parses a point given as comma-separated coordinates, e.g. `-1.9,2`.
pub fn parse_point(s: &str) -> CliResult<Vector> {
    let values = s
        .split(',')
        .map(|tok| tok.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| CliError::InvalidArgument(format!("point '{}': {}", s, e)))?;
    Ok(Vector::new(values))
}

/// Reads a matrix in the whitespace-separated text format.
pub fn read_matrix(path: &Path) -> CliResult<Matrix> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    text.parse().map_err(|source| CliError::MatrixFile {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        let x = parse_point("-1.9, 2").unwrap();
        assert_eq!(x.as_slice(), &[-1.9, 2.0]);
    }

    #[test]
    fn test_parse_point_rejects_garbage() {
        assert!(matches!(
            parse_point("1,x"),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_failed_record_keeps_message() {
        let start = Vector::from([1.0]);
        let record = RunRecord::from_outcome(
            "p",
            "a",
            &start,
            Err(MathError::invalid_input("bad")),
        );
        assert!(record.iterations.is_none());
        assert!(record.outcome.contains("bad"));
    }
}
