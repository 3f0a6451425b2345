//! Hooke-Jeeves pattern search.

use crate::error::{MathError, MathResult};
use crate::linear_algebra::Vector;
use crate::objective::Objective;
use crate::optimization::{Evaluations, OptimizationResult, PerAxis, Termination, DEFAULT_TOLERANCE};

/// Configuration for [`hooke_jeeves`].
#[derive(Debug, Clone)]
pub struct HookeJeevesConfig {
    /// Per-axis step size below which the search stops.
    pub tolerance: PerAxis,
    /// Initial per-axis exploration step.
    pub initial_step: PerAxis,
    /// Maximum number of explore/extrapolate cycles.
    pub max_iterations: u32,
}

impl Default for HookeJeevesConfig {
    fn default() -> Self {
        Self {
            tolerance: PerAxis::Uniform(DEFAULT_TOLERANCE),
            initial_step: PerAxis::Uniform(0.5),
            max_iterations: 1000,
        }
    }
}

impl HookeJeevesConfig {
    /// Sets the per-axis tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: impl Into<PerAxis>) -> Self {
        self.tolerance = tolerance.into();
        self
    }

    /// Sets the initial per-axis step.
    #[must_use]
    pub fn with_initial_step(mut self, step: impl Into<PerAxis>) -> Self {
        self.initial_step = step.into();
        self
    }

    /// Sets the maximum number of cycles.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Exploratory move around `base`.
///
/// Each axis is tried at `+step[i]`, then at `-step[i]`; a trial is kept
/// only if it does not increase the objective.
pub fn explore<O>(f: &O, base: &Vector, step: &[f64]) -> MathResult<Vector>
where
    O: Objective + ?Sized,
{
    if step.len() != base.dim() {
        return Err(MathError::dimension_mismatch(
            "exploratory move",
            (base.dim(), 1),
            (step.len(), 1),
        ));
    }
    let mut x = base.clone();
    for (i, &dx) in step.iter().enumerate() {
        let p = f.value(&x);
        x[i] += dx;
        let mut n = f.value(&x);
        if n > p {
            x[i] -= 2.0 * dx;
            n = f.value(&x);
            if n > p {
                x[i] += dx;
            }
        }
    }
    Ok(x)
}

/// Minimizes `f` with the Hooke-Jeeves pattern search.
///
/// Exploration around the pattern point `xp` yields `xn`. If `xn` improves
/// on the base point `xb`, the pattern is extrapolated to `2·xn − xb` and
/// `xn` becomes the new base; otherwise every step is halved and the search
/// restarts from the base. The run converges once every step is at or below
/// its tolerance.
pub fn hooke_jeeves<O>(
    f: &O,
    x0: &Vector,
    config: &HookeJeevesConfig,
) -> MathResult<OptimizationResult>
where
    O: Objective + ?Sized,
{
    let n = x0.dim();
    let tolerance = config.tolerance.resolve(n)?;
    let mut step = config.initial_step.resolve(n)?;
    if step.iter().any(|&s| !(s > 0.0)) {
        return Err(MathError::invalid_input("Hooke-Jeeves steps must be positive"));
    }

    let f = Evaluations::new(f);
    let mut xb = x0.clone();
    let mut xp = x0.clone();
    let mut fb = f.value(&xb);
    let mut termination = Termination::MaxIterations;
    let mut iterations = 0;

    while iterations < config.max_iterations {
        iterations += 1;
        let xn = explore(&f, &xp, &step)?;
        let fn_ = f.value(&xn);

        if fn_ < fb {
            xp = xn.scale(2.0).sub(&xb)?;
            xb = xn;
            fb = fn_;
        } else {
            for s in &mut step {
                *s /= 2.0;
            }
            xp = xb.clone();
        }
        log::trace!("hooke-jeeves {}: f(xb) = {}", iterations, fb);

        if step.iter().zip(&tolerance).all(|(s, e)| s <= e) {
            termination = Termination::Converged;
            break;
        }
    }

    if termination == Termination::MaxIterations {
        log::warn!(
            "Hooke-Jeeves stopped after {} iterations without converging",
            iterations
        );
    }

    Ok(OptimizationResult {
        point: xb,
        value: fb,
        iterations,
        evaluations: f.count(),
        termination,
    })
}
