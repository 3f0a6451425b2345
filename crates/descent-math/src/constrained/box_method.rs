//! Box complex method.

use rand::Rng;

use super::{Bounds, Constraints};
use crate::error::{MathError, MathResult};
use crate::linear_algebra::Vector;
use crate::objective::Objective;
use crate::optimization::{Evaluations, OptimizationResult, StallGuard, Termination, DEFAULT_TOLERANCE};

/// Configuration for [`box_method`].
#[derive(Debug, Clone, Copy)]
pub struct BoxConfig {
    /// Reflection coefficient.
    pub alpha: f64,
    /// Threshold on the spread of complex values around the centroid value.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
    /// Iterations without a better best point before reporting divergence.
    pub divergence_limit: u32,
    /// Halvings toward the centroid tried before a point is declared
    /// unrecoverable.
    pub max_retractions: u32,
}

impl Default for BoxConfig {
    fn default() -> Self {
        Self {
            alpha: 1.3,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: 10_000,
            divergence_limit: 100,
            max_retractions: 200,
        }
    }
}

impl BoxConfig {
    /// Sets the reflection coefficient.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Moves `x` halfway to `centroid` until every inequality constraint holds.
fn retract(
    mut x: Vector,
    centroid: &Vector,
    constraints: &Constraints,
    max_retractions: u32,
) -> MathResult<Vector> {
    let mut retractions = 0;
    while !constraints.is_feasible(&x) {
        if retractions == max_retractions {
            return Err(MathError::infeasible(format!(
                "point {} stayed infeasible after {} moves toward the centroid",
                x, max_retractions
            )));
        }
        x = x.add(centroid)?.scale(0.5);
        retractions += 1;
    }
    Ok(x)
}

fn sort_complex(complex: &mut [(Vector, f64)]) {
    complex.sort_by(|a, b| a.1.total_cmp(&b.1));
}

fn centroid_without_worst(complex: &[(Vector, f64)]) -> MathResult<Vector> {
    Vector::centroid(complex[..complex.len() - 1].iter().map(|(p, _)| p))
}

/// Minimizes `f` over `bounds` subject to the inequality constraints with
/// Box's complex method.
///
/// The complex starts as `x0` plus `2·dim` points drawn uniformly from the
/// bounds with `rng`, each pulled toward the running centroid until feasible.
/// Every iteration reflects the worst point through the centroid of the
/// others by `1 + alpha`, clamps it to the bounds, pulls it toward the
/// centroid until feasible and halves the move once more if it is still worse
/// than the second-worst point.
///
/// The run converges when `sqrt(½·Σ(f(xᵢ) − f(x_c))²)` is below the tolerance.
/// A best point that has not improved for `divergence_limit` iterations ends
/// the run with [`Termination::Diverged`]. The best point is returned.
///
/// # Errors
///
/// `InfeasibleStart` if `x0` lies outside the bounds or violates a
/// constraint, `InvalidInput` if equality constraints are given.
pub fn box_method<O, R>(
    f: &O,
    x0: &Vector,
    bounds: &Bounds,
    constraints: &Constraints,
    config: &BoxConfig,
    rng: &mut R,
) -> MathResult<OptimizationResult>
where
    O: Objective + ?Sized,
    R: Rng,
{
    let dim = x0.dim();
    if bounds.dim() != dim {
        return Err(MathError::dimension_mismatch(
            "Box method bounds",
            (dim, 1),
            (bounds.dim(), 1),
        ));
    }
    if !constraints.equality().is_empty() {
        return Err(MathError::invalid_input(
            "the Box method does not handle equality constraints",
        ));
    }
    if !bounds.contains(x0) {
        return Err(MathError::infeasible(format!(
            "{} lies outside the explicit bounds",
            x0
        )));
    }
    if !constraints.is_feasible(x0) {
        return Err(MathError::infeasible(format!(
            "{} violates an implicit constraint",
            x0
        )));
    }

    let f = Evaluations::new(f);
    let mut complex = vec![(x0.clone(), f.value(x0))];
    let mut centroid = x0.clone();

    for _ in 0..2 * dim {
        let x = retract(bounds.sample(rng), &centroid, constraints, config.max_retractions)?;
        let value = f.value(&x);
        complex.push((x, value));
        sort_complex(&mut complex);
        centroid = centroid_without_worst(&complex)?;
    }

    let worst = complex.len() - 1;
    let mut guard = StallGuard::new(complex[0].1, config.divergence_limit);
    let mut termination = Termination::MaxIterations;
    let mut iterations = 0;

    while iterations < config.max_iterations {
        iterations += 1;
        sort_complex(&mut complex);
        let second_worst = complex[worst - 1].1;
        centroid = centroid_without_worst(&complex)?;

        let reflected = centroid
            .scale(1.0 + config.alpha)
            .sub(&complex[worst].0.scale(config.alpha))?;
        let mut xr = retract(bounds.clamp(&reflected), &centroid, constraints, config.max_retractions)?;
        let mut fr = f.value(&xr);
        if fr > second_worst {
            xr = xr.add(&centroid)?.scale(0.5);
            fr = f.value(&xr);
        }
        complex[worst] = (xr, fr);

        let best = complex.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
        if guard.record(best) {
            log::warn!(
                "Box method: best value has not improved for {} iterations",
                config.divergence_limit
            );
            termination = Termination::Diverged;
            break;
        }

        let f_centroid = f.value(&centroid);
        let spread = (0.5
            * complex
                .iter()
                .map(|(_, v)| (v - f_centroid).powi(2))
                .sum::<f64>())
        .sqrt();
        log::trace!("Box method {}: best = {}, spread = {}", iterations, best, spread);
        if spread < config.tolerance {
            termination = Termination::Converged;
            break;
        }
    }

    if termination == Termination::MaxIterations {
        log::warn!(
            "Box method stopped after {} iterations without converging",
            iterations
        );
    }

    sort_complex(&mut complex);
    let (point, value) = complex.swap_remove(0);
    Ok(OptimizationResult {
        point,
        value,
        iterations,
        evaluations: f.count(),
        termination,
    })
}
