//! Unconstrained optimization algorithms.
//!
//! This module provides minimizers for scalar functions of several variables:
//!
//! - [`line_search`]: golden-section search along a single direction
//! - [`direct`]: derivative-free methods (coordinate search, Hooke-Jeeves,
//!   Nelder-Mead)
//! - [`gradient`]: gradient descent, Newton-Raphson and Gauss-Newton
//!
//! # Choosing an Optimizer
//!
//! | Method | Requires | Notes |
//! |--------|----------|-------|
//! | Coordinate search | Value | One golden-section search per axis |
//! | Hooke-Jeeves | Value | Robust pattern search, default inner solver |
//! | Nelder-Mead | Value | Simplex; sensitive to the initial step |
//! | Gradient descent | Gradient | Linear convergence |
//! | Newton-Raphson | Gradient + Hessian | Quadratic near the optimum |
//! | Gauss-Newton | Residuals + Jacobian | Least-squares problems |
//!
//! Every optimizer copies the starting point and returns an
//! [`OptimizationResult`]. Running out of progress is not an error: the
//! result carries a [`Termination`] describing why the iteration stopped.

pub mod direct;
pub mod gradient;
pub mod line_search;

use std::cell::Cell;
use std::fmt;

use crate::error::{MathError, MathResult};
use crate::linear_algebra::{Matrix, Vector};
use crate::objective::{Capability, Objective};

/// Default convergence tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Why an optimizer stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The convergence criterion was met.
    Converged,
    /// The objective stopped improving for the configured number of
    /// consecutive iterations.
    Stalled,
    /// The iterates moved away from a minimum for too long.
    Diverged,
    /// The iteration cap was reached.
    MaxIterations,
}

impl Termination {
    /// Returns true for [`Termination::Converged`].
    pub fn is_converged(self) -> bool {
        self == Self::Converged
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Converged => write!(f, "converged"),
            Self::Stalled => write!(f, "stalled"),
            Self::Diverged => write!(f, "diverged"),
            Self::MaxIterations => write!(f, "max iterations"),
        }
    }
}

/// Result of an optimization run.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Final point.
    pub point: Vector,
    /// Objective value at `point`.
    pub value: f64,
    /// Number of outer iterations performed.
    pub iterations: u32,
    /// Number of objective evaluations performed by the algorithm.
    pub evaluations: u64,
    /// Why the run stopped.
    pub termination: Termination,
}

impl OptimizationResult {
    /// Whether the convergence criterion was met.
    pub fn converged(&self) -> bool {
        self.termination.is_converged()
    }
}

/// A per-axis setting: one value for every axis, or one value per axis.
#[derive(Debug, Clone, PartialEq)]
pub enum PerAxis {
    /// The same value on every axis.
    Uniform(f64),
    /// An explicit value for each axis.
    Each(Vec<f64>),
}

impl PerAxis {
    /// Expands to exactly `dim` values.
    pub fn resolve(&self, dim: usize) -> MathResult<Vec<f64>> {
        match self {
            Self::Uniform(v) => Ok(vec![*v; dim]),
            Self::Each(values) if values.len() == 1 => Ok(vec![values[0]; dim]),
            Self::Each(values) if values.len() == dim => Ok(values.clone()),
            Self::Each(values) => Err(MathError::invalid_input(format!(
                "{} per-axis values given for a {}-dimensional point",
                values.len(),
                dim
            ))),
        }
    }
}

impl From<f64> for PerAxis {
    fn from(v: f64) -> Self {
        Self::Uniform(v)
    }
}

impl From<Vec<f64>> for PerAxis {
    fn from(values: Vec<f64>) -> Self {
        Self::Each(values)
    }
}

/// Counts objective evaluations made on behalf of one optimizer run.
pub(crate) struct Evaluations<'a, O: ?Sized> {
    f: &'a O,
    count: Cell<u64>,
}

impl<'a, O: Objective + ?Sized> Evaluations<'a, O> {
    pub(crate) fn new(f: &'a O) -> Self {
        Self {
            f,
            count: Cell::new(0),
        }
    }

    pub(crate) fn count(&self) -> u64 {
        self.count.get()
    }
}

impl<O: Objective + ?Sized> Objective for Evaluations<'_, O> {
    fn value(&self, x: &Vector) -> f64 {
        self.count.set(self.count.get() + 1);
        self.f.value(x)
    }

    fn supports(&self, capability: Capability) -> bool {
        self.f.supports(capability)
    }

    fn gradient(&self, x: &Vector) -> MathResult<Vector> {
        self.f.gradient(x)
    }

    fn hessian(&self, x: &Vector) -> MathResult<Matrix> {
        self.f.hessian(x)
    }

    fn residuals(&self, x: &Vector) -> MathResult<Vector> {
        self.f.residuals(x)
    }

    fn jacobian(&self, x: &Vector) -> MathResult<Matrix> {
        self.f.jacobian(x)
    }
}

/// Tracks the best objective value and counts consecutive iterations
/// without improvement.
#[derive(Debug, Clone)]
pub(crate) struct StallGuard {
    best: f64,
    misses: u32,
    limit: u32,
}

impl StallGuard {
    pub(crate) fn new(initial: f64, limit: u32) -> Self {
        Self {
            best: initial,
            misses: 0,
            limit,
        }
    }

    /// Records a new value; returns true once the limit is reached.
    pub(crate) fn record(&mut self, value: f64) -> bool {
        if value < self.best {
            self.best = value;
            self.misses = 0;
            false
        } else {
            self.misses += 1;
            self.misses >= self.limit
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_axis_resolve() {
        assert_eq!(PerAxis::from(0.5).resolve(3).unwrap(), vec![0.5; 3]);
        assert_eq!(PerAxis::from(vec![1e-3]).resolve(2).unwrap(), vec![1e-3; 2]);
        assert_eq!(
            PerAxis::from(vec![1.0, 2.0]).resolve(2).unwrap(),
            vec![1.0, 2.0]
        );
        assert!(PerAxis::from(vec![1.0, 2.0]).resolve(3).is_err());
    }

    #[test]
    fn test_stall_guard() {
        let mut guard = StallGuard::new(10.0, 3);
        assert!(!guard.record(9.0));
        assert!(!guard.record(9.0));
        assert!(!guard.record(9.5));
        assert!(guard.record(9.0));

        let mut guard = StallGuard::new(10.0, 2);
        assert!(!guard.record(11.0));
        assert!(!guard.record(5.0));
        assert!(!guard.record(6.0));
        assert!(guard.record(6.0));
    }
}
