//! Newton-Raphson for multivariate minimization.

use super::GradientConfig;
use crate::error::{MathError, MathResult};
use crate::linear_algebra::{Matrix, Vector};
use crate::objective::{Capability, Objective};
use crate::optimization::line_search::line_minimum;
use crate::optimization::{Evaluations, OptimizationResult, StallGuard, Termination};

/// Minimizes `f` with Newton steps `Δx = −H⁻¹∇f`.
///
/// `H·Δx = −∇f` is solved through an LUP factorization of the Hessian. The
/// iterate moves by `λ·Δx`, with `λ` from a golden-section search or `λ = 1`.
/// Converges when `‖Δx‖` drops below the tolerance.
///
/// # Errors
///
/// `UnsupportedCapability` if `f` lacks a gradient or Hessian;
/// `SingularMatrix` if a Hessian cannot be factorized.
pub fn newton_raphson<O>(f: &O, x0: &Vector, config: &GradientConfig) -> MathResult<OptimizationResult>
where
    O: Objective + ?Sized,
{
    f.require(Capability::Gradient)?;
    f.require(Capability::Hessian)?;
    newton_iterate(f, x0, config, "Newton-Raphson", |f, x| {
        Ok((f.hessian(x)?, f.gradient(x)?))
    })
}

/// Shared Newton-type iteration.
///
/// `system` returns `(A, g)` at `x`; each step solves `A·Δx = −g`.
pub(super) fn newton_iterate<O, S>(
    f: &O,
    x0: &Vector,
    config: &GradientConfig,
    method: &str,
    system: S,
) -> MathResult<OptimizationResult>
where
    O: Objective + ?Sized,
    S: Fn(&Evaluations<'_, O>, &Vector) -> MathResult<(Matrix, Vector)>,
{
    config.validate()?;
    let f = Evaluations::new(f);
    let mut x = x0.clone();
    let mut value = f.value(&x);
    let mut guard = StallGuard::new(value, config.stall_limit);
    let mut termination = Termination::MaxIterations;
    let mut iterations = 0;

    while iterations < config.max_iterations {
        iterations += 1;
        let (a, g) = system(&f, &x)?;
        let delta = a.lup(config.pivot_epsilon)?.solve(&g.scale(-1.0))?;
        if delta.dim() != x.dim() {
            return Err(MathError::dimension_mismatch(
                "Newton step",
                (x.dim(), 1),
                (delta.dim(), 1),
            ));
        }

        let lambda = if config.use_line_search {
            line_minimum(&f, &x, &delta, &config.line_search)?.minimum
        } else {
            1.0
        };
        x = x.offset(&delta, lambda)?;
        value = f.value(&x);
        log::trace!("{} {}: λ = {}, f = {}", method, iterations, lambda, value);

        if guard.record(value) {
            log::warn!(
                "{}: objective has not decreased for {} iterations",
                method,
                config.stall_limit
            );
            termination = Termination::Stalled;
            break;
        }
        if delta.norm() < config.tolerance {
            termination = Termination::Converged;
            break;
        }
    }

    if termination == Termination::MaxIterations {
        log::warn!(
            "{} stopped after {} iterations without converging",
            method,
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
