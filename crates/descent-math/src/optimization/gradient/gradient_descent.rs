//! Steepest descent.

use super::GradientConfig;
use crate::error::{MathError, MathResult};
use crate::linear_algebra::Vector;
use crate::objective::{Capability, Objective};
use crate::optimization::line_search::line_minimum;
use crate::optimization::{Evaluations, OptimizationResult, StallGuard, Termination};

/// Minimizes `f` by stepping along the gradient.
///
/// The update is `x ← x + λ·∇f(x)`. With the line search enabled `λ` is the
/// golden-section minimizer of `f(x + λ·∇f(x))` searched from zero, which
/// comes out negative; otherwise `λ = −1`.
///
/// # Errors
///
/// `UnsupportedCapability` if `f` has no gradient, `DimensionMismatch` if the
/// gradient length differs from the point.
///
/// # Example
///
/// ```rust
/// use descent_math::optimization::gradient::{gradient_descent, GradientConfig};
/// use descent_math::test_functions::OffsetParaboloid;
/// use descent_math::linear_algebra::Vector;
///
/// let result = gradient_descent(
///     &OffsetParaboloid,
///     &Vector::from([0.0, 0.0]),
///     &GradientConfig::default(),
/// )
/// .unwrap();
/// assert!((result.point[0] - 2.0).abs() < 1e-5);
/// assert!((result.point[1] + 3.0).abs() < 1e-5);
/// ```
pub fn gradient_descent<O>(
    f: &O,
    x0: &Vector,
    config: &GradientConfig,
) -> MathResult<OptimizationResult>
where
    O: Objective + ?Sized,
{
    config.validate()?;
    f.require(Capability::Gradient)?;

    let f = Evaluations::new(f);
    let mut x = x0.clone();
    let mut value = f.value(&x);
    let mut guard = StallGuard::new(value, config.stall_limit);
    let mut termination = Termination::MaxIterations;
    let mut iterations = 0;

    while iterations < config.max_iterations {
        let grad = f.gradient(&x)?;
        if grad.dim() != x.dim() {
            return Err(MathError::dimension_mismatch(
                "gradient step",
                (x.dim(), 1),
                (grad.dim(), 1),
            ));
        }
        if grad.norm() < config.tolerance {
            termination = Termination::Converged;
            break;
        }

        iterations += 1;
        let lambda = if config.use_line_search {
            line_minimum(&f, &x, &grad, &config.line_search)?.minimum
        } else {
            -1.0
        };
        x = x.offset(&grad, lambda)?;
        value = f.value(&x);
        log::trace!("gradient descent {}: λ = {}, f = {}", iterations, lambda, value);

        if guard.record(value) {
            log::warn!(
                "gradient descent: objective has not decreased for {} iterations",
                config.stall_limit
            );
            termination = Termination::Stalled;
            break;
        }
    }

    if termination == Termination::MaxIterations {
        log::warn!(
            "gradient descent stopped after {} iterations without converging",
            iterations
        );
    }

    Ok(OptimizationResult {
        point: x,
        value,
        iterations,
        evaluations: f.count(),
        termination,
    })
}
