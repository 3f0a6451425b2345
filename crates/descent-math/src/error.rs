//! Error types for linear algebra and optimization.

use thiserror::Error;

use crate::objective::Capability;

/// A specialized Result type for numerical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during numerical operations.
///
/// Soft stopping conditions of the optimizers (stalling, divergence) are not
/// errors; they are reported through [`Termination`](crate::optimization::Termination).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Operand shapes are incompatible with the requested operation.
    #[error("Incompatible dimensions for {operation}: ({rows1}x{cols1}) and ({rows2}x{cols2})")]
    DimensionMismatch {
        /// The operation that was attempted.
        operation: &'static str,
        /// Rows in the first operand.
        rows1: usize,
        /// Columns in the first operand.
        cols1: usize,
        /// Rows in the second operand.
        rows2: usize,
        /// Columns in the second operand.
        cols2: usize,
    },

    /// A pivot or diagonal entry fell below the configured epsilon.
    #[error("Singular matrix in {operation}: |{value:.2e}| below epsilon at index {index}")]
    SingularMatrix {
        /// The operation that encountered the near-zero entry.
        operation: &'static str,
        /// Diagonal index of the offending entry.
        index: usize,
        /// The near-zero value.
        value: f64,
    },

    /// Operation requires a square matrix.
    #[error("Matrix must be square for {operation}, got ({rows}x{cols})")]
    NotSquare {
        /// The operation that was attempted.
        operation: &'static str,
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// Starting point violates constraints and cannot be restored.
    #[error("Infeasible starting point: {reason}")]
    InfeasibleStart {
        /// Description of the violated constraint.
        reason: String,
    },

    /// The objective does not provide a derivative the algorithm needs.
    #[error("Objective does not support {capability}")]
    UnsupportedCapability {
        /// The missing capability.
        capability: Capability,
    },

    /// Division by zero.
    #[error("Division by zero or near-zero value: {value:.2e}")]
    DivisionByZero {
        /// The near-zero value.
        value: f64,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },

    /// Malformed matrix text.
    #[error("Parse error on line {line}: {reason}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// Description of the problem.
        reason: String,
    },
}

impl MathError {
    /// Creates a dimension mismatch error from two shapes.
    #[must_use]
    pub fn dimension_mismatch(
        operation: &'static str,
        (rows1, cols1): (usize, usize),
        (rows2, cols2): (usize, usize),
    ) -> Self {
        Self::DimensionMismatch {
            operation,
            rows1,
            cols1,
            rows2,
            cols2,
        }
    }

    /// Creates a singular matrix error.
    #[must_use]
    pub fn singular(operation: &'static str, index: usize, value: f64) -> Self {
        Self::SingularMatrix {
            operation,
            index,
            value,
        }
    }

    /// Creates an infeasible start error.
    #[must_use]
    pub fn infeasible(reason: impl Into<String>) -> Self {
        Self::InfeasibleStart {
            reason: reason.into(),
        }
    }

    /// Creates an unsupported capability error.
    #[must_use]
    pub fn unsupported(capability: Capability) -> Self {
        Self::UnsupportedCapability { capability }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::dimension_mismatch("addition", (2, 3), (3, 2));
        let msg = err.to_string();
        assert!(msg.contains("addition"));
        assert!(msg.contains("(2x3)"));
        assert!(msg.contains("(3x2)"));
    }

    #[test]
    fn test_unsupported_display() {
        let err = MathError::unsupported(Capability::Hessian);
        assert_eq!(err.to_string(), "Objective does not support hessian");
    }
}
