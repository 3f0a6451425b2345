//! Objective function contract.
//!
//! Every optimizer minimizes an [`Objective`]. Derivative information is
//! optional: an objective advertises what it provides through
//! [`Objective::supports`], and gradient-based methods check the
//! [`Capability`] they need before the first iteration, failing with
//! [`MathError::UnsupportedCapability`] instead of calling a missing method.
//!
//! Plain closures `Fn(&Vector) -> f64` are value-only objectives.

use std::cell::Cell;
use std::fmt;

use crate::error::{MathError, MathResult};
use crate::linear_algebra::{Matrix, Vector};

/// Optional evaluators an objective may provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// First derivative, `∇f(x)`.
    Gradient,
    /// Second derivative, `∇²f(x)`.
    Hessian,
    /// Residual vector `g(x)` and its Jacobian, for least squares.
    Residuals,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gradient => write!(f, "gradient"),
            Self::Hessian => write!(f, "hessian"),
            Self::Residuals => write!(f, "residuals"),
        }
    }
}

/// A scalar function of several variables.
pub trait Objective {
    /// Evaluates `f(x)`.
    fn value(&self, x: &Vector) -> f64;

    /// Whether the objective provides the given evaluator.
    fn supports(&self, _capability: Capability) -> bool {
        false
    }

    /// Gradient at `x`.
    fn gradient(&self, _x: &Vector) -> MathResult<Vector> {
        Err(MathError::unsupported(Capability::Gradient))
    }

    /// Hessian at `x`.
    fn hessian(&self, _x: &Vector) -> MathResult<Matrix> {
        Err(MathError::unsupported(Capability::Hessian))
    }

    /// Residual vector `g(x)`.
    fn residuals(&self, _x: &Vector) -> MathResult<Vector> {
        Err(MathError::unsupported(Capability::Residuals))
    }

    /// Jacobian of the residuals at `x`, one row per residual.
    fn jacobian(&self, _x: &Vector) -> MathResult<Matrix> {
        Err(MathError::unsupported(Capability::Residuals))
    }

    /// Evaluates `f(x + lambda * direction)`.
    fn value_along(&self, x: &Vector, direction: &Vector, lambda: f64) -> MathResult<f64> {
        Ok(self.value(&x.offset(direction, lambda)?))
    }

    /// Fails fast when a capability is missing.
    fn require(&self, capability: Capability) -> MathResult<()> {
        if self.supports(capability) {
            Ok(())
        } else {
            Err(MathError::unsupported(capability))
        }
    }
}

impl<F> Objective for F
where
    F: Fn(&Vector) -> f64,
{
    fn value(&self, x: &Vector) -> f64 {
        self(x)
    }
}

/// Call counts recorded by [`Counted`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    /// Objective evaluations.
    pub value: u64,
    /// Gradient evaluations.
    pub gradient: u64,
    /// Hessian evaluations.
    pub hessian: u64,
    /// Jacobian evaluations.
    pub jacobian: u64,
}

/// Wraps an objective and counts calls to each evaluator.
///
/// The counters are diagnostics only; no optimizer reads them.
#[derive(Debug, Default)]
pub struct Counted<O> {
    inner: O,
    value: Cell<u64>,
    gradient: Cell<u64>,
    hessian: Cell<u64>,
    jacobian: Cell<u64>,
}

impl<O> Counted<O> {
    /// Wraps `inner` with all counters at zero.
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            value: Cell::new(0),
            gradient: Cell::new(0),
            hessian: Cell::new(0),
            jacobian: Cell::new(0),
        }
    }

    /// Current counter values.
    pub fn counts(&self) -> CallCounts {
        CallCounts {
            value: self.value.get(),
            gradient: self.gradient.get(),
            hessian: self.hessian.get(),
            jacobian: self.jacobian.get(),
        }
    }

    /// Resets every counter to zero.
    pub fn reset_counters(&self) {
        self.value.set(0);
        self.gradient.set(0);
        self.hessian.set(0);
        self.jacobian.set(0);
    }

    /// The wrapped objective.
    pub fn inner(&self) -> &O {
        &self.inner
    }
}

fn bump(counter: &Cell<u64>) {
    counter.set(counter.get() + 1);
}

impl<O: Objective> Objective for Counted<O> {
    fn value(&self, x: &Vector) -> f64 {
        bump(&self.value);
        self.inner.value(x)
    }

    fn supports(&self, capability: Capability) -> bool {
        self.inner.supports(capability)
    }

    fn gradient(&self, x: &Vector) -> MathResult<Vector> {
        bump(&self.gradient);
        self.inner.gradient(x)
    }

    fn hessian(&self, x: &Vector) -> MathResult<Matrix> {
        bump(&self.hessian);
        self.inner.hessian(x)
    }

    // Residual evaluations are not counted separately.
    fn residuals(&self, x: &Vector) -> MathResult<Vector> {
        self.inner.residuals(x)
    }

    fn jacobian(&self, x: &Vector) -> MathResult<Matrix> {
        bump(&self.jacobian);
        self.inner.jacobian(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_closure_is_value_only() {
        let f = |x: &Vector| x[0] * x[0];
        let x = Vector::from([3.0]);

        assert_relative_eq!(f.value(&x), 9.0);
        assert!(!f.supports(Capability::Gradient));
        assert!(matches!(
            f.gradient(&x),
            Err(MathError::UnsupportedCapability {
                capability: Capability::Gradient
            })
        ));
        assert!(f.require(Capability::Hessian).is_err());
    }

    #[test]
    fn test_value_along() {
        let f = |x: &Vector| x[0] + 2.0 * x[1];
        let x = Vector::from([1.0, 1.0]);
        let d = Vector::from([1.0, -1.0]);
        assert_relative_eq!(f.value_along(&x, &d, 2.0).unwrap(), 1.0);
    }

    #[test]
    fn test_counters() {
        let f = Counted::new(|x: &Vector| x.norm());
        let x = Vector::from([3.0, 4.0]);

        f.value(&x);
        f.value(&x);
        let _ = f.gradient(&x);
        assert_eq!(
            f.counts(),
            CallCounts {
                value: 2,
                gradient: 1,
                hessian: 0,
                jacobian: 0,
            }
        );

        f.reset_counters();
        assert_eq!(f.counts(), CallCounts::default());
    }
}
