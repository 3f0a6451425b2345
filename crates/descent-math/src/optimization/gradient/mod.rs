//! Derivative-based optimizers.
//!
//! | Method | Direction | Stops when |
//! |--------|-----------|------------|
//! | [`gradient_descent`] | `∇f(x)` with a negative step | `‖∇f(x)‖ < tolerance` |
//! | [`newton_raphson`] | `−H⁻¹∇f` | `‖Δx‖ < tolerance` |
//! | [`gauss_newton`] | `−(JᵀJ)⁻¹Jᵀg`, or `−J⁻¹g` for square `J` | `‖Δx‖ < tolerance` |
//!
//! The step length comes from a golden-section search along the direction, or
//! is fixed when [`GradientConfig::use_line_search`] is off. Each method checks
//! the [`Capability`](crate::objective::Capability) it needs before the first
//! iteration.
//!
//! A run whose objective has not improved for
//! [`GradientConfig::stall_limit`] consecutive iterations stops with
//! [`Termination::Stalled`](crate::optimization::Termination::Stalled) and
//! returns the current iterate. A singular Hessian or normal matrix aborts the
//! run with [`MathError::SingularMatrix`](crate::error::MathError::SingularMatrix).

mod gauss_newton;
mod gradient_descent;
mod newton;

pub use gauss_newton::gauss_newton;
pub use gradient_descent::gradient_descent;
pub use newton::newton_raphson;

use crate::error::{MathError, MathResult};
use crate::linear_algebra::DEFAULT_EPSILON;
use crate::optimization::line_search::LineSearchConfig;
use crate::optimization::DEFAULT_TOLERANCE;

/// Configuration shared by the derivative-based optimizers.
#[derive(Debug, Clone, Copy)]
pub struct GradientConfig {
    /// Convergence threshold on the gradient or step norm.
    pub tolerance: f64,
    /// Pick the step length by golden-section search instead of a fixed step.
    pub use_line_search: bool,
    /// Settings of the step-length search.
    pub line_search: LineSearchConfig,
    /// Maximum number of iterations.
    pub max_iterations: u32,
    /// Consecutive non-improving iterations before giving up.
    pub stall_limit: u32,
    /// Pivot threshold for the LUP solve of each step.
    pub pivot_epsilon: f64,
}

impl Default for GradientConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            use_line_search: true,
            line_search: LineSearchConfig::default(),
            max_iterations: 10_000,
            stall_limit: 10,
            pivot_epsilon: DEFAULT_EPSILON,
        }
    }
}

impl GradientConfig {
    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Enables or disables the golden-section step search.
    #[must_use]
    pub fn with_line_search(mut self, enabled: bool) -> Self {
        self.use_line_search = enabled;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the stall limit.
    #[must_use]
    pub fn with_stall_limit(mut self, stall_limit: u32) -> Self {
        self.stall_limit = stall_limit;
        self
    }

    fn validate(&self) -> MathResult<()> {
        if !(self.tolerance > 0.0) {
            return Err(MathError::invalid_input("tolerance must be positive"));
        }
        if self.stall_limit == 0 {
            return Err(MathError::invalid_input("stall limit must be at least one"));
        }
        Ok(())
    }
}
