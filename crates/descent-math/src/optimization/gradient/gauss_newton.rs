//! Gauss-Newton for nonlinear least squares.

use super::newton::newton_iterate;
use super::GradientConfig;
use crate::error::{MathError, MathResult};
use crate::linear_algebra::Vector;
use crate::objective::{Capability, Objective};
use crate::optimization::OptimizationResult;

/// Minimizes `Σ gᵢ(x)²` for the residual vector `g` of `f`.
///
/// With Jacobian `J`, each step solves the normal equations
/// `JᵀJ·Δx = −Jᵀg`. A square `J` is solved directly, `J·Δx = −g`, which is
/// Newton's method for the root of `g`. Step length and stopping follow
/// [`newton_raphson`](super::newton_raphson); the stall guard watches
/// [`Objective::value`].
///
/// # Errors
///
/// `UnsupportedCapability` if `f` provides no residuals, `DimensionMismatch`
/// if the Jacobian and residual shapes disagree, `SingularMatrix` if the
/// system cannot be solved.
pub fn gauss_newton<O>(f: &O, x0: &Vector, config: &GradientConfig) -> MathResult<OptimizationResult>
where
    O: Objective + ?Sized,
{
    f.require(Capability::Residuals)?;
    newton_iterate(f, x0, config, "Gauss-Newton", |f, x| {
        let jacobian = f.jacobian(x)?;
        let residuals = f.residuals(x)?;
        if jacobian.rows() != residuals.dim() || jacobian.cols() != x.dim() {
            return Err(MathError::dimension_mismatch(
                "Gauss-Newton system",
                jacobian.shape(),
                (residuals.dim(), x.dim()),
            ));
        }
        if jacobian.is_square() {
            Ok((jacobian, residuals))
        } else {
            let jt = jacobian.transpose();
            let normal = jt.matmul(&jacobian)?;
            let rhs = jt.mul_vector(&residuals)?;
            Ok((normal, rhs))
        }
    })
}
