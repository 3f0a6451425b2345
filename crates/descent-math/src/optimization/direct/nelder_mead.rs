//! Nelder-Mead simplex search.

use crate::error::{MathError, MathResult};
use crate::linear_algebra::Vector;
use crate::objective::Objective;
use crate::optimization::{Evaluations, OptimizationResult, Termination, DEFAULT_TOLERANCE};

/// Convergence test applied to the simplex after every iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimplexStopping {
    /// Population standard deviation of the vertex values below tolerance.
    #[default]
    ValueStdDev,
    /// Largest distance from the best vertex to any other below tolerance.
    VertexDistance,
}

/// Configuration for [`nelder_mead`].
#[derive(Debug, Clone, Copy)]
pub struct NelderMeadConfig {
    /// Offset of the initial vertices along each axis.
    pub step: f64,
    /// Reflection coefficient.
    pub alpha: f64,
    /// Contraction coefficient.
    pub beta: f64,
    /// Expansion coefficient.
    pub gamma: f64,
    /// Shrink coefficient.
    pub sigma: f64,
    /// Threshold for the stopping rule.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
    /// Stopping rule.
    pub stopping: SimplexStopping,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            step: 1.0,
            alpha: 1.0,
            beta: 0.5,
            gamma: 2.0,
            sigma: 0.5,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: 1000,
            stopping: SimplexStopping::ValueStdDev,
        }
    }
}

impl NelderMeadConfig {
    /// Sets the initial simplex step.
    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
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

    /// Sets the stopping rule.
    #[must_use]
    pub fn with_stopping(mut self, stopping: SimplexStopping) -> Self {
        self.stopping = stopping;
        self
    }

    fn validate(&self) -> MathResult<()> {
        if self.step == 0.0 {
            return Err(MathError::invalid_input("simplex step must be non-zero"));
        }
        if !(self.alpha > 0.0) || !(self.gamma > 1.0) {
            return Err(MathError::invalid_input(
                "reflection must be positive and expansion greater than one",
            ));
        }
        if !(self.beta > 0.0 && self.beta < 1.0) || !(self.sigma > 0.0 && self.sigma < 1.0) {
            return Err(MathError::invalid_input(
                "contraction and shrink coefficients must lie in (0, 1)",
            ));
        }
        Ok(())
    }
}

/// `x0` followed by one copy of `x0` offset by `step` along each axis.
pub fn initial_simplex(x0: &Vector, step: f64) -> Vec<Vector> {
    let mut simplex = Vec::with_capacity(x0.dim() + 1);
    simplex.push(x0.clone());
    for i in 0..x0.dim() {
        let mut vertex = x0.clone();
        vertex[i] += step;
        simplex.push(vertex);
    }
    simplex
}

/// `(1 - t)·a + t·b`.
fn blend(a: &Vector, b: &Vector, t: f64) -> MathResult<Vector> {
    a.scale(1.0 - t).add(&b.scale(t))
}

fn value_std_dev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt()
}

/// Minimizes `f` with the Nelder-Mead simplex method.
///
/// Each iteration sorts the vertices by value and reflects the worst one
/// through the centroid of the others. A reflection better than the best
/// vertex is tried with expansion; one worse than the second-worst leads to
/// contraction, or to shrinking the whole simplex toward the best vertex
/// when contraction fails.
pub fn nelder_mead<O>(f: &O, x0: &Vector, config: &NelderMeadConfig) -> MathResult<OptimizationResult>
where
    O: Objective + ?Sized,
{
    config.validate()?;
    if x0.dim() == 0 {
        return Err(MathError::invalid_input("cannot build a simplex in zero dimensions"));
    }

    let f = Evaluations::new(f);
    let mut simplex: Vec<(Vector, f64)> = initial_simplex(x0, config.step)
        .into_iter()
        .map(|p| {
            let v = f.value(&p);
            (p, v)
        })
        .collect();
    let h = simplex.len() - 1;
    let mut termination = Termination::MaxIterations;
    let mut iterations = 0;

    while iterations < config.max_iterations {
        iterations += 1;
        simplex.sort_by(|a, b| a.1.total_cmp(&b.1));

        let f_best = simplex[0].1;
        let f_second_worst = simplex[h - 1].1;
        let centroid = Vector::centroid(simplex[..h].iter().map(|(p, _)| p))?;

        let xr = blend(&centroid, &simplex[h].0, -config.alpha)?;
        let fr = f.value(&xr);

        if fr < f_best {
            let xe = blend(&centroid, &xr, config.gamma)?;
            let fe = f.value(&xe);
            simplex[h] = if fe < f_best { (xe, fe) } else { (xr, fr) };
        } else if fr > f_second_worst {
            if fr < simplex[h].1 {
                simplex[h] = (xr, fr);
            }
            let xk = blend(&centroid, &simplex[h].0, config.beta)?;
            let fk = f.value(&xk);
            if fk < simplex[h].1 {
                simplex[h] = (xk, fk);
            } else {
                let best = simplex[0].0.clone();
                for vertex in simplex.iter_mut().skip(1) {
                    let p = best.offset(&vertex.0.sub(&best)?, config.sigma)?;
                    let v = f.value(&p);
                    *vertex = (p, v);
                }
            }
        } else {
            simplex[h] = (xr, fr);
        }

        let spread = match config.stopping {
            SimplexStopping::ValueStdDev => {
                let values: Vec<f64> = simplex.iter().map(|(_, v)| *v).collect();
                value_std_dev(&values)
            }
            SimplexStopping::VertexDistance => {
                let best = simplex
                    .iter()
                    .min_by(|a, b| a.1.total_cmp(&b.1))
                    .map(|(p, _)| p)
                    .ok_or_else(|| MathError::invalid_input("empty simplex"))?;
                let mut largest = 0.0_f64;
                for (p, _) in &simplex {
                    largest = largest.max(p.distance(best)?);
                }
                largest
            }
        };
        if spread < config.tolerance {
            termination = Termination::Converged;
            break;
        }
    }

    if termination == Termination::MaxIterations {
        log::warn!(
            "Nelder-Mead stopped after {} iterations without converging",
            iterations
        );
    }

    simplex.sort_by(|a, b| a.1.total_cmp(&b.1));
    let (point, value) = simplex.swap_remove(0);
    Ok(OptimizationResult {
        point,
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
    fn test_initial_simplex() {
        let s = initial_simplex(&Vector::from([1.0, 2.0]), 0.5);
        assert_eq!(s.len(), 3);
        assert_eq!(s[0], Vector::from([1.0, 2.0]));
        assert_eq!(s[1], Vector::from([1.5, 2.0]));
        assert_eq!(s[2], Vector::from([1.0, 2.5]));
    }

    #[test]
    fn test_std_dev() {
        assert_abs_diff_eq!(value_std_dev(&[1.0, 1.0, 1.0]), 0.0);
        assert_abs_diff_eq!(value_std_dev(&[0.0, 2.0]), 1.0);
    }

    #[test]
    fn test_quadratic() {
        let f = |x: &Vector| (x[0] - 4.0).powi(2) + 4.0 * (x[1] - 2.0).powi(2);
        let config = NelderMeadConfig::default().with_tolerance(1e-10);
        let result = nelder_mead(&f, &Vector::from([0.1, 0.3]), &config).unwrap();

        assert!(result.converged());
        assert_abs_diff_eq!(result.point[0], 4.0, epsilon = 1e-3);
        assert_abs_diff_eq!(result.point[1], 2.0, epsilon = 1e-3);
    }

    #[test]
    fn test_vertex_distance_rule() {
        let f = |x: &Vector| (x[0] + 1.0).powi(2) + (x[1] - 1.0).powi(2);
        let config = NelderMeadConfig::default()
            .with_tolerance(1e-6)
            .with_stopping(SimplexStopping::VertexDistance)
            .with_max_iterations(5000);
        let result = nelder_mead(&f, &Vector::from([5.0, 5.0]), &config).unwrap();

        assert!(result.converged());
        assert_abs_diff_eq!(result.point[0], -1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(result.point[1], 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_invalid_coefficients() {
        let f = |x: &Vector| x.norm();
        let config = NelderMeadConfig {
            beta: 1.5,
            ..NelderMeadConfig::default()
        };
        assert!(nelder_mead(&f, &Vector::zeros(2), &config).is_err());
        assert!(nelder_mead(&f, &Vector::zeros(0), &NelderMeadConfig::default()).is_err());
    }
}
