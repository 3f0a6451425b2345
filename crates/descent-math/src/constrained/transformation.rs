//! Barrier and penalty transformation.

use super::inner_point::{inner_point, InnerPointConfig};
use super::Constraints;
use crate::error::{MathError, MathResult};
use crate::linear_algebra::Vector;
use crate::objective::Objective;
use crate::optimization::direct::{hooke_jeeves, HookeJeevesConfig};
use crate::optimization::{Evaluations, OptimizationResult, StallGuard, Termination, DEFAULT_TOLERANCE};

/// Configuration for [`transformation_method`].
#[derive(Debug, Clone)]
pub struct TransformationConfig {
    /// Initial weight `t`.
    pub initial_weight: f64,
    /// Factor applied to `t` after every round.
    pub growth: f64,
    /// Change in `f` between rounds below which the run converges.
    pub tolerance: f64,
    /// Maximum number of rounds.
    pub max_iterations: u32,
    /// Rounds without improvement before reporting divergence.
    pub divergence_limit: u32,
    /// Settings of the unconstrained subproblem solver.
    pub hooke_jeeves: HookeJeevesConfig,
    /// Settings of the feasibility restoration.
    pub inner_point: InnerPointConfig,
}

impl Default for TransformationConfig {
    fn default() -> Self {
        Self {
            initial_weight: 1.0,
            growth: 10.0,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: 10_000,
            divergence_limit: 100,
            hooke_jeeves: HookeJeevesConfig::default(),
            inner_point: InnerPointConfig::default(),
        }
    }
}

impl TransformationConfig {
    /// Sets the initial weight.
    #[must_use]
    pub fn with_initial_weight(mut self, t: f64) -> Self {
        self.initial_weight = t;
        self
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum number of rounds.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// `f(x) − (1/t)·Σ ln cᵢ(x) + t·Σ hⱼ(x)²`.
///
/// Infinite wherever an inequality constraint is not strictly satisfied.
pub struct BarrierObjective<'a, O: ?Sized> {
    f: &'a O,
    constraints: &'a Constraints,
    t: f64,
}

impl<'a, O: Objective + ?Sized> BarrierObjective<'a, O> {
    /// Wraps `f` with barrier and penalty terms of weight `t`.
    pub fn new(f: &'a O, constraints: &'a Constraints, t: f64) -> Self {
        Self { f, constraints, t }
    }

    /// Current weight.
    pub fn weight(&self) -> f64 {
        self.t
    }
}

impl<O: Objective + ?Sized> Objective for BarrierObjective<'_, O> {
    fn value(&self, x: &Vector) -> f64 {
        let mut barrier = 0.0;
        for c in self.constraints.inequality() {
            let v = c(x);
            if v <= 0.0 {
                return f64::INFINITY;
            }
            barrier -= v.ln() / self.t;
        }
        let penalty: f64 = self
            .constraints
            .equality()
            .iter()
            .map(|h| self.t * h(x).powi(2))
            .sum();
        self.f.value(x) + barrier + penalty
    }
}

/// Minimizes `f` under inequality and equality constraints by a sequence of
/// barrier/penalty subproblems.
///
/// Each round minimizes a [`BarrierObjective`] with Hooke-Jeeves from the
/// previous solution, then multiplies `t` by `growth`. A start violating an
/// inequality constraint is first moved into the feasible region with
/// [`inner_point`]. The run converges when `f` changes by less than the
/// tolerance between rounds; `divergence_limit` consecutive rounds without
/// a decrease of `f` end it with [`Termination::Diverged`].
///
/// # Errors
///
/// `InfeasibleStart` if the start cannot be made feasible.
pub fn transformation_method<O>(
    f: &O,
    x0: &Vector,
    constraints: &Constraints,
    config: &TransformationConfig,
) -> MathResult<OptimizationResult>
where
    O: Objective + ?Sized,
{
    if !(config.initial_weight > 0.0) || !(config.growth > 1.0) {
        return Err(MathError::invalid_input(
            "barrier weight must be positive and grow by a factor above one",
        ));
    }

    let mut x = if constraints.is_feasible(x0) {
        x0.clone()
    } else {
        log::info!("{} violates an inequality constraint; restoring feasibility", x0);
        let restored = inner_point(x0, constraints, &config.inner_point)?;
        log::info!("restored starting point {}", restored);
        restored
    };

    let f = Evaluations::new(f);
    let mut value = f.value(&x);
    let mut guard = StallGuard::new(value, config.divergence_limit);
    let mut t = config.initial_weight;
    let mut termination = Termination::MaxIterations;
    let mut iterations = 0;

    while iterations < config.max_iterations {
        iterations += 1;
        let previous = value;
        x = hooke_jeeves(&BarrierObjective::new(&f, constraints, t), &x, &config.hooke_jeeves)?.point;
        value = f.value(&x);
        log::debug!("transformation round {}: t = {}, f = {}", iterations, t, value);
        t *= config.growth;

        if (value - previous).abs() < config.tolerance {
            termination = Termination::Converged;
            break;
        }
        if guard.record(value) {
            log::warn!(
                "transformation method: objective has not decreased for {} rounds",
                config.divergence_limit
            );
            termination = Termination::Diverged;
            break;
        }
    }

    if termination == Termination::MaxIterations {
        log::warn!(
            "transformation method stopped after {} rounds without converging",
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_barrier_value() {
        let f = |x: &Vector| x[0];
        let constraints = Constraints::new()
            .with_inequality(|x: &Vector| x[0])
            .with_equality(|x: &Vector| x[1] - 1.0);
        let barrier = BarrierObjective::new(&f, &constraints, 2.0);

        // 1 − ln(1)/2 + 2·(3 − 1)²
        assert_abs_diff_eq!(barrier.value(&Vector::from([1.0, 3.0])), 9.0);
        assert_eq!(barrier.value(&Vector::from([0.0, 1.0])), f64::INFINITY);
        assert_eq!(barrier.value(&Vector::from([-1.0, 1.0])), f64::INFINITY);
    }

    #[test]
    fn test_equality_and_restoration() {
        let f = |x: &Vector| (x[0] - 3.0).powi(2) + x[1].powi(2);
        let constraints = Constraints::new()
            .with_inequality(|x: &Vector| 3.0 - x[0] - x[1])
            .with_inequality(|x: &Vector| 3.0 + 1.5 * x[0] - x[1])
            .with_equality(|x: &Vector| x[1] - 1.0);

        let result = transformation_method(
            &f,
            &Vector::from([5.0, 5.0]),
            &constraints,
            &TransformationConfig::default(),
        )
        .unwrap();

        assert!(constraints.is_feasible(&result.point));
        assert_abs_diff_eq!(result.point[0], 2.0, epsilon = 1e-2);
        assert_abs_diff_eq!(result.point[1], 1.0, epsilon = 1e-2);
    }

    #[test]
    fn test_invalid_growth() {
        let f = |x: &Vector| x.norm();
        let config = TransformationConfig {
            growth: 1.0,
            ..TransformationConfig::default()
        };
        assert!(transformation_method(&f, &Vector::zeros(1), &Constraints::new(), &config).is_err());
    }

    #[test]
    fn test_stalled_objective_reports_divergence() {
        let flat = |_x: &Vector| 1.0;
        let disc = Constraints::new().with_inequality(|x: &Vector| 1.0 - x.dot(x).unwrap());
        // Zero tolerance so an unchanged value is not taken as convergence.
        let config = TransformationConfig {
            tolerance: 0.0,
            divergence_limit: 2,
            ..TransformationConfig::default()
        };

        let result = transformation_method(&flat, &Vector::zeros(2), &disc, &config).unwrap();

        assert_eq!(result.termination, Termination::Diverged);
        assert_eq!(result.iterations, 2);
        assert_eq!(result.value, 1.0);
        assert!(disc.is_feasible(&result.point));
    }
}
