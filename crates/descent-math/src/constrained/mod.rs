//! Constrained minimization.
//!
//! Two families of methods are provided:
//!
//! - [`box_method`]: a complex of feasible points inside explicit [`Bounds`],
//!   reflected through its centroid like a Nelder-Mead simplex. It needs a
//!   feasible start and only handles inequality constraints.
//! - [`transformation_method`]: turns the problem into a sequence of
//!   unconstrained ones, adding a log barrier for inequalities and a quadratic
//!   penalty for equalities, each solved by Hooke-Jeeves. An infeasible start is
//!   first repaired by [`inner_point`].
//!
//! Inequality constraints are satisfied when `c(x) > 0`, equality constraints
//! when `h(x) = 0`.
//!
//! # Example
//!
//! ```rust
//! use descent_math::constrained::{transformation_method, Constraints, TransformationConfig};
//! use descent_math::linear_algebra::Vector;
//!
//! let f = |x: &Vector| (x[0] - 4.0).powi(2) + 4.0 * (x[1] - 2.0).powi(2);
//! let constraints = Constraints::new()
//!     .with_inequality(|x: &Vector| x[1] - x[0])
//!     .with_inequality(|x: &Vector| 2.0 - x[0]);
//!
//! let result = transformation_method(
//!     &f,
//!     &Vector::from([0.1, 0.3]),
//!     &constraints,
//!     &TransformationConfig::default(),
//! )
//! .unwrap();
//! assert!((result.point[0] - 2.0).abs() < 1e-2);
//! assert!((result.point[1] - 2.0).abs() < 1e-2);
//! ```

mod box_method;
mod inner_point;
mod transformation;

pub use box_method::{box_method, BoxConfig};
pub use inner_point::{inner_point, InnerPointConfig};
pub use transformation::{transformation_method, BarrierObjective, TransformationConfig};

use std::fmt;

use rand::Rng;

use crate::error::{MathError, MathResult};
use crate::linear_algebra::Vector;

/// A boxed constraint function.
pub type ConstraintFn = Box<dyn Fn(&Vector) -> f64>;

/// Explicit per-coordinate bounds `lower ≤ x ≤ upper`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    lower: Vector,
    upper: Vector,
}

impl Bounds {
    /// Creates bounds from lower and upper corners.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the corners differ in length, `InvalidInput` if
    /// some `lower[i] > upper[i]` or the box is not finite.
    pub fn new(lower: Vector, upper: Vector) -> MathResult<Self> {
        if lower.dim() != upper.dim() {
            return Err(MathError::dimension_mismatch(
                "bounds",
                (lower.dim(), 1),
                (upper.dim(), 1),
            ));
        }
        if lower.iter().zip(upper.iter()).any(|(l, u)| !(l <= u)) {
            return Err(MathError::invalid_input(format!(
                "lower bound {} exceeds upper bound {}",
                lower, upper
            )));
        }
        // Sampling needs every width to be a finite float.
        if lower.iter().zip(upper.iter()).any(|(l, u)| !(u - l).is_finite()) {
            return Err(MathError::invalid_input(format!(
                "bounds {} to {} are not finite",
                lower, upper
            )));
        }
        Ok(Self { lower, upper })
    }

    /// The same interval `[lower, upper]` on every axis.
    pub fn uniform(dim: usize, lower: f64, upper: f64) -> MathResult<Self> {
        Self::new(Vector::new(vec![lower; dim]), Vector::new(vec![upper; dim]))
    }

    /// Number of coordinates.
    pub fn dim(&self) -> usize {
        self.lower.dim()
    }

    /// Lower corner.
    pub fn lower(&self) -> &Vector {
        &self.lower
    }

    /// Upper corner.
    pub fn upper(&self) -> &Vector {
        &self.upper
    }

    /// Whether `x` lies inside the box, boundary included.
    pub fn contains(&self, x: &Vector) -> bool {
        x.dim() == self.dim()
            && (0..self.dim()).all(|i| self.lower[i] <= x[i] && x[i] <= self.upper[i])
    }

    /// Projects `x` onto the box coordinate by coordinate.
    pub fn clamp(&self, x: &Vector) -> Vector {
        Vector::new(
            x.iter()
                .enumerate()
                .map(|(i, &v)| v.clamp(self.lower[i], self.upper[i]))
                .collect(),
        )
    }

    /// Draws a point uniformly from the box.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vector {
        Vector::new(
            (0..self.dim())
                .map(|i| rng.gen_range(self.lower[i]..=self.upper[i]))
                .collect(),
        )
    }
}

/// Inequality (`c(x) > 0`) and equality (`h(x) = 0`) constraints.
#[derive(Default)]
pub struct Constraints {
    inequality: Vec<ConstraintFn>,
    equality: Vec<ConstraintFn>,
}

impl Constraints {
    /// An empty constraint set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an inequality constraint `c(x) > 0`.
    #[must_use]
    pub fn with_inequality(mut self, c: impl Fn(&Vector) -> f64 + 'static) -> Self {
        self.inequality.push(Box::new(c));
        self
    }

    /// Adds an equality constraint `h(x) = 0`.
    #[must_use]
    pub fn with_equality(mut self, h: impl Fn(&Vector) -> f64 + 'static) -> Self {
        self.equality.push(Box::new(h));
        self
    }

    /// The inequality constraints.
    pub fn inequality(&self) -> &[ConstraintFn] {
        &self.inequality
    }

    /// The equality constraints.
    pub fn equality(&self) -> &[ConstraintFn] {
        &self.equality
    }

    /// Whether every inequality constraint holds strictly at `x`.
    pub fn is_feasible(&self, x: &Vector) -> bool {
        self.inequality.iter().all(|c| c(x) > 0.0)
    }

    /// Total shortfall `Σ max(0, margin − c(x))` of the inequality constraints.
    ///
    /// Zero exactly when every constraint is at least `margin`.
    pub fn violation(&self, x: &Vector, margin: f64) -> f64 {
        self.inequality
            .iter()
            .map(|c| (margin - c(x)).max(0.0))
            .sum()
    }
}

impl fmt::Debug for Constraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraints")
            .field("inequality", &self.inequality.len())
            .field("equality", &self.equality.len())
            .finish()
    }
}
