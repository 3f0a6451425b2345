//! Coordinate (axis-aligned) search.

use crate::error::MathResult;
use crate::linear_algebra::Vector;
use crate::objective::Objective;
use crate::optimization::line_search::{line_minimum, LineSearchConfig};
use crate::optimization::{Evaluations, OptimizationResult, PerAxis, Termination, DEFAULT_TOLERANCE};

/// Configuration for [`coordinate_search`].
#[derive(Debug, Clone)]
pub struct CoordinateSearchConfig {
    /// Largest per-axis move that still counts as converged.
    pub tolerance: PerAxis,
    /// Maximum number of full sweeps over the axes.
    pub max_iterations: u32,
    /// Line search used on each axis.
    pub line_search: LineSearchConfig,
}

impl Default for CoordinateSearchConfig {
    fn default() -> Self {
        Self {
            tolerance: PerAxis::Uniform(DEFAULT_TOLERANCE),
            max_iterations: 1000,
            line_search: LineSearchConfig::default(),
        }
    }
}

impl CoordinateSearchConfig {
    /// Sets the per-axis tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: impl Into<PerAxis>) -> Self {
        self.tolerance = tolerance.into();
        self
    }

    /// Sets the maximum number of sweeps.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Minimizes `f` by cycling golden-section searches over the coordinate axes.
///
/// Each sweep minimizes along `e_0, e_1, …` in turn. The run converges when
/// no coordinate moved by more than its tolerance during a sweep.
pub fn coordinate_search<O>(
    f: &O,
    x0: &Vector,
    config: &CoordinateSearchConfig,
) -> MathResult<OptimizationResult>
where
    O: Objective + ?Sized,
{
    let n = x0.dim();
    let tolerance = config.tolerance.resolve(n)?;
    let f = Evaluations::new(f);
    let mut x = x0.clone();
    let mut termination = Termination::MaxIterations;
    let mut iterations = 0;

    while iterations < config.max_iterations {
        iterations += 1;
        let x_prev = x.clone();

        for axis in 0..n {
            let direction = Vector::unit(n, axis);
            let step = line_minimum(&f, &x, &direction, &config.line_search)?;
            x[axis] += step.minimum;
        }

        let settled = (0..n).all(|k| (x[k] - x_prev[k]).abs() <= tolerance[k]);
        if settled {
            termination = Termination::Converged;
            break;
        }
    }

    if termination == Termination::MaxIterations {
        log::warn!(
            "coordinate search stopped after {} sweeps without converging",
            iterations
        );
    }

    let value = f.value(&x);
    Ok(OptimizationResult {
        point: x,
        value,
        iterations,
        evaluations: f.count(),
        termination,
    })
}
