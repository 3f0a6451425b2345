//! Feasibility restoration.

use super::Constraints;
use crate::error::{MathError, MathResult};
use crate::linear_algebra::Vector;
use crate::optimization::direct::{hooke_jeeves, HookeJeevesConfig};

/// Configuration for [`inner_point`].
#[derive(Debug, Clone)]
pub struct InnerPointConfig {
    /// Maximum number of Hooke-Jeeves restarts.
    pub max_iterations: u32,
    /// Amount by which each constraint should exceed zero.
    pub margin: f64,
    /// Settings of the inner Hooke-Jeeves runs.
    pub hooke_jeeves: HookeJeevesConfig,
}

impl Default for InnerPointConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            margin: 1e-6,
            hooke_jeeves: HookeJeevesConfig::default(),
        }
    }
}

/// Finds a point strictly satisfying every inequality constraint, starting
/// from `x0`.
///
/// Minimizes the shortfall `Σ max(0, margin − c(x))` with Hooke-Jeeves,
/// restarting from the last result until the point is feasible. Equality
/// constraints are ignored.
///
/// # Errors
///
/// `InfeasibleStart` if no feasible point is reached, either because the
/// restart budget ran out or because a restart made no progress.
pub fn inner_point(
    x0: &Vector,
    constraints: &Constraints,
    config: &InnerPointConfig,
) -> MathResult<Vector> {
    if constraints.is_feasible(x0) {
        return Ok(x0.clone());
    }
    if !(config.margin > 0.0) {
        return Err(MathError::invalid_input("restoration margin must be positive"));
    }

    let shortfall = |x: &Vector| constraints.violation(x, config.margin);
    let mut x = x0.clone();

    for round in 1..=config.max_iterations {
        let next = hooke_jeeves(&shortfall, &x, &config.hooke_jeeves)?.point;
        if constraints.is_feasible(&next) {
            log::debug!("feasible point {} found after {} rounds", next, round);
            return Ok(next);
        }
        if next == x {
            break;
        }
        x = next;
    }

    Err(MathError::infeasible(format!(
        "no feasible point found from {}; remaining violation {:.3e} at {}",
        x0,
        constraints.violation(&x, 0.0),
        x
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restores_feasibility() {
        let constraints = Constraints::new()
            .with_inequality(|x: &Vector| 3.0 - x[0] - x[1])
            .with_inequality(|x: &Vector| 3.0 + 1.5 * x[0] - x[1]);
        let x0 = Vector::from([5.0, 5.0]);
        assert!(!constraints.is_feasible(&x0));

        let x = inner_point(&x0, &constraints, &InnerPointConfig::default()).unwrap();
        assert!(constraints.is_feasible(&x));
    }

    #[test]
    fn test_feasible_start_is_returned() {
        let constraints = Constraints::new().with_inequality(|x: &Vector| 1.0 - x[0]);
        let x0 = Vector::from([0.0]);
        assert_eq!(
            inner_point(&x0, &constraints, &InnerPointConfig::default()).unwrap(),
            x0
        );
    }

    #[test]
    fn test_contradictory_constraints_fail() {
        let constraints = Constraints::new()
            .with_inequality(|x: &Vector| x[0] - 1.0)
            .with_inequality(|x: &Vector| -1.0 - x[0]);
        let err = inner_point(&Vector::from([0.0]), &constraints, &InnerPointConfig::default())
            .unwrap_err();
        assert!(matches!(err, MathError::InfeasibleStart { .. }));
    }
}
