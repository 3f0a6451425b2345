//! Dense linear algebra.
//!
//! This module provides the [`Matrix`] and [`Vector`] value types and the
//! LU/LUP machinery the second-order optimizers rely on:
//!
//! - [`Matrix::lu`]: Doolittle decomposition without pivoting
//! - [`Matrix::lup`]: decomposition with partial pivoting
//! - [`Factorization::solve`]: forward then backward substitution
//! - [`Factorization::inverse`] and [`Factorization::determinant`]
//!
//! # Example
//!
//! ```rust
//! use descent_math::linear_algebra::{Matrix, Vector};
//!
//! let a = Matrix::from_rows(vec![vec![2.0, 1.0], vec![1.0, 3.0]]).unwrap();
//! let lup = a.lup(1e-8).unwrap();
//!
//! let x = lup.solve(&Vector::from([5.0, 5.0])).unwrap();
//! assert!((x[0] - 2.0).abs() < 1e-12);
//! assert!((lup.determinant() - 5.0).abs() < 1e-12);
//! ```

mod decomposition;
mod matrix;
mod vector;

pub use decomposition::Factorization;
pub use matrix::Matrix;
pub use vector::Vector;

/// Default pivot tolerance for decompositions and substitutions.
pub const DEFAULT_EPSILON: f64 = 1e-8;
