//! Reference problems for the optimizers.
//!
//! | Problem | `f(x)` | Minimum |
//! |---------|--------|---------|
//! | [`Rosenbrock`] | `100(x₁ − x₀²)² + (1 − x₀)²` | `(1, 1)` |
//! | [`ShiftedQuadratic`] | `(x₀ − 4)² + 4(x₁ − 2)²` | `(4, 2)` |
//! | [`OffsetParaboloid`] | `(x₀ − 2)² + (x₁ + 3)²` | `(2, −3)` |
//! | [`Quartic`] | `¼x₀⁴ − x₀² + 2x₀ + (x₁ − 1)²` | `x₀³ − 2x₀ + 2 = 0`, `x₁ = 1` |
//! | [`IndexedParaboloid`] | `Σ (xᵢ − i)²` | `(0, 1, 2, …)` |
//! | [`AbsDifference`] | `|x₀² − x₁²| + ‖x‖` | origin |
//! | [`Schaffer`] | `½ + (sin²‖x‖ − ½) / (1 + 0.001‖x‖²)²` | origin |
//! | [`CircleParabola`] | residuals `(x₀² + x₁² − 1, x₁ − x₀²)` | circle ∩ parabola |
//! | [`ExponentialFit`] | residuals `x₀e^{x₁tᵢ} + x₂ − yᵢ` | least squares |
//!
//! Problems that know their derivatives advertise them through
//! [`Objective::supports`]; the rest are value-only.

use std::fmt;
use std::str::FromStr;

use crate::error::{MathError, MathResult};
use crate::linear_algebra::{Matrix, Vector};
use crate::objective::{Capability, Objective};

fn check_dim(x: &Vector, dim: usize) -> MathResult<()> {
    if x.dim() == dim {
        Ok(())
    } else {
        Err(MathError::dimension_mismatch(
            "objective evaluation",
            (x.dim(), 1),
            (dim, 1),
        ))
    }
}

/// Rosenbrock's banana function, also posed as two residuals
/// `(10(x₁ − x₀²), 1 − x₀)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rosenbrock;

impl Objective for Rosenbrock {
    fn value(&self, x: &Vector) -> f64 {
        100.0 * (x[1] - x[0].powi(2)).powi(2) + (1.0 - x[0]).powi(2)
    }

    fn supports(&self, _capability: Capability) -> bool {
        true
    }

    fn gradient(&self, x: &Vector) -> MathResult<Vector> {
        check_dim(x, 2)?;
        let valley = x[1] - x[0].powi(2);
        Ok(Vector::from([
            -400.0 * x[0] * valley - 2.0 * (1.0 - x[0]),
            200.0 * valley,
        ]))
    }

    fn hessian(&self, x: &Vector) -> MathResult<Matrix> {
        check_dim(x, 2)?;
        Matrix::from_rows(vec![
            vec![1200.0 * x[0].powi(2) - 400.0 * x[1] + 2.0, -400.0 * x[0]],
            vec![-400.0 * x[0], 200.0],
        ])
    }

    fn residuals(&self, x: &Vector) -> MathResult<Vector> {
        check_dim(x, 2)?;
        Ok(Vector::from([10.0 * (x[1] - x[0].powi(2)), 1.0 - x[0]]))
    }

    fn jacobian(&self, x: &Vector) -> MathResult<Matrix> {
        check_dim(x, 2)?;
        Matrix::from_rows(vec![vec![-20.0 * x[0], 10.0], vec![-1.0, 0.0]])
    }
}

/// `(x₀ − 4)² + 4(x₁ − 2)²`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShiftedQuadratic;

impl Objective for ShiftedQuadratic {
    fn value(&self, x: &Vector) -> f64 {
        (x[0] - 4.0).powi(2) + 4.0 * (x[1] - 2.0).powi(2)
    }

    fn supports(&self, capability: Capability) -> bool {
        matches!(capability, Capability::Gradient | Capability::Hessian)
    }

    fn gradient(&self, x: &Vector) -> MathResult<Vector> {
        check_dim(x, 2)?;
        Ok(Vector::from([2.0 * (x[0] - 4.0), 8.0 * (x[1] - 2.0)]))
    }

    fn hessian(&self, x: &Vector) -> MathResult<Matrix> {
        check_dim(x, 2)?;
        Matrix::from_rows(vec![vec![2.0, 0.0], vec![0.0, 8.0]])
    }
}

/// `(x₀ − 2)² + (x₁ + 3)²`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OffsetParaboloid;

impl Objective for OffsetParaboloid {
    fn value(&self, x: &Vector) -> f64 {
        (x[0] - 2.0).powi(2) + (x[1] + 3.0).powi(2)
    }

    fn supports(&self, capability: Capability) -> bool {
        matches!(capability, Capability::Gradient | Capability::Hessian)
    }

    fn gradient(&self, x: &Vector) -> MathResult<Vector> {
        check_dim(x, 2)?;
        Ok(Vector::from([2.0 * (x[0] - 2.0), 2.0 * (x[1] + 3.0)]))
    }

    fn hessian(&self, x: &Vector) -> MathResult<Matrix> {
        check_dim(x, 2)?;
        Ok(Matrix::identity(2).scale(2.0))
    }
}

/// `¼x₀⁴ − x₀² + 2x₀ + (x₁ − 1)²`, whose Hessian changes sign in `x₀`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quartic;

impl Objective for Quartic {
    fn value(&self, x: &Vector) -> f64 {
        0.25 * x[0].powi(4) - x[0].powi(2) + 2.0 * x[0] + (x[1] - 1.0).powi(2)
    }

    fn supports(&self, capability: Capability) -> bool {
        matches!(capability, Capability::Gradient | Capability::Hessian)
    }

    fn gradient(&self, x: &Vector) -> MathResult<Vector> {
        check_dim(x, 2)?;
        Ok(Vector::from([
            x[0].powi(3) - 2.0 * x[0] + 2.0,
            2.0 * (x[1] - 1.0),
        ]))
    }

    fn hessian(&self, x: &Vector) -> MathResult<Matrix> {
        check_dim(x, 2)?;
        Matrix::from_rows(vec![vec![3.0 * x[0].powi(2) - 2.0, 0.0], vec![0.0, 2.0]])
    }
}

/// `Σ (xᵢ − i)²` in any dimension.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexedParaboloid;

impl Objective for IndexedParaboloid {
    fn value(&self, x: &Vector) -> f64 {
        x.iter()
            .enumerate()
            .map(|(i, v)| (v - i as f64).powi(2))
            .sum()
    }

    fn supports(&self, capability: Capability) -> bool {
        capability == Capability::Gradient
    }

    fn gradient(&self, x: &Vector) -> MathResult<Vector> {
        Ok(Vector::new(
            x.iter()
                .enumerate()
                .map(|(i, v)| 2.0 * (v - i as f64))
                .collect(),
        ))
    }
}

/// `|(x₀ − x₁)(x₀ + x₁)| + ‖x‖`, non-smooth along `|x₀| = |x₁|`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbsDifference;

impl Objective for AbsDifference {
    fn value(&self, x: &Vector) -> f64 {
        ((x[0] - x[1]) * (x[0] + x[1])).abs() + (x[0].powi(2) + x[1].powi(2)).sqrt()
    }
}

/// Schaffer's F6, with rings of local minima around the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct Schaffer;

impl Objective for Schaffer {
    fn value(&self, x: &Vector) -> f64 {
        let r2: f64 = x.iter().map(|v| v * v).sum();
        0.5 + (r2.sqrt().sin().powi(2) - 0.5) / (1.0 + 0.001 * r2).powi(2)
    }
}

/// Intersection of the unit circle with the parabola `x₁ = x₀²`, posed as a
/// square residual system.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircleParabola;

impl Objective for CircleParabola {
    fn value(&self, x: &Vector) -> f64 {
        (x[0].powi(2) + x[1].powi(2) - 1.0).powi(2) + (x[1] - x[0].powi(2)).powi(2)
    }

    fn supports(&self, capability: Capability) -> bool {
        capability == Capability::Residuals
    }

    fn residuals(&self, x: &Vector) -> MathResult<Vector> {
        check_dim(x, 2)?;
        Ok(Vector::from([
            x[0].powi(2) + x[1].powi(2) - 1.0,
            x[1] - x[0].powi(2),
        ]))
    }

    fn jacobian(&self, x: &Vector) -> MathResult<Matrix> {
        check_dim(x, 2)?;
        Matrix::from_rows(vec![
            vec![2.0 * x[0], 2.0 * x[1]],
            vec![-2.0 * x[0], 1.0],
        ])
    }
}

/// Least-squares fit of `y ≈ x₀·e^{x₁t} + x₂` to `(t, y)` measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct ExponentialFit {
    measurements: Vec<(f64, f64)>,
}

impl ExponentialFit {
    /// Fit to the given `(t, y)` pairs.
    pub fn new(measurements: Vec<(f64, f64)>) -> Self {
        Self { measurements }
    }

    /// The `(t, y)` pairs.
    pub fn measurements(&self) -> &[(f64, f64)] {
        &self.measurements
    }

    fn model(x: &Vector, t: f64) -> f64 {
        x[0] * (x[1] * t).exp() + x[2]
    }
}

impl Default for ExponentialFit {
    fn default() -> Self {
        Self::new(vec![
            (1.0, 3.0),
            (2.0, 4.0),
            (3.0, 4.0),
            (5.0, 5.0),
            (6.0, 6.0),
            (7.0, 8.0),
        ])
    }
}

impl Objective for ExponentialFit {
    fn value(&self, x: &Vector) -> f64 {
        self.measurements
            .iter()
            .map(|&(t, y)| (Self::model(x, t) - y).powi(2))
            .sum()
    }

    fn supports(&self, capability: Capability) -> bool {
        capability == Capability::Residuals
    }

    fn residuals(&self, x: &Vector) -> MathResult<Vector> {
        check_dim(x, 3)?;
        Ok(Vector::new(
            self.measurements
                .iter()
                .map(|&(t, y)| Self::model(x, t) - y)
                .collect(),
        ))
    }

    fn jacobian(&self, x: &Vector) -> MathResult<Matrix> {
        check_dim(x, 3)?;
        let rows = self
            .measurements
            .iter()
            .map(|&(t, _)| {
                let e = (x[1] * t).exp();
                vec![e, x[0] * t * e, 1.0]
            })
            .collect();
        Matrix::from_rows(rows)
    }
}

/// Named reference problems, for selecting one at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Problem {
    /// [`Rosenbrock`].
    Rosenbrock,
    /// [`ShiftedQuadratic`].
    ShiftedQuadratic,
    /// [`OffsetParaboloid`].
    OffsetParaboloid,
    /// [`Quartic`].
    Quartic,
    /// [`IndexedParaboloid`].
    IndexedParaboloid,
    /// [`AbsDifference`].
    AbsDifference,
    /// [`Schaffer`].
    Schaffer,
    /// [`CircleParabola`].
    CircleParabola,
    /// [`ExponentialFit`] with its default measurements.
    ExponentialFit,
}

impl Problem {
    /// Every problem, in table order.
    pub const ALL: [Problem; 9] = [
        Problem::Rosenbrock,
        Problem::ShiftedQuadratic,
        Problem::OffsetParaboloid,
        Problem::Quartic,
        Problem::IndexedParaboloid,
        Problem::AbsDifference,
        Problem::Schaffer,
        Problem::CircleParabola,
        Problem::ExponentialFit,
    ];

    /// Kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Rosenbrock => "rosenbrock",
            Self::ShiftedQuadratic => "shifted-quadratic",
            Self::OffsetParaboloid => "offset-paraboloid",
            Self::Quartic => "quartic",
            Self::IndexedParaboloid => "indexed-paraboloid",
            Self::AbsDifference => "abs-difference",
            Self::Schaffer => "schaffer",
            Self::CircleParabola => "circle-parabola",
            Self::ExponentialFit => "exponential-fit",
        }
    }

    /// The objective.
    pub fn objective(self) -> Box<dyn Objective> {
        match self {
            Self::Rosenbrock => Box::new(Rosenbrock),
            Self::ShiftedQuadratic => Box::new(ShiftedQuadratic),
            Self::OffsetParaboloid => Box::new(OffsetParaboloid),
            Self::Quartic => Box::new(Quartic),
            Self::IndexedParaboloid => Box::new(IndexedParaboloid),
            Self::AbsDifference => Box::new(AbsDifference),
            Self::Schaffer => Box::new(Schaffer),
            Self::CircleParabola => Box::new(CircleParabola),
            Self::ExponentialFit => Box::new(ExponentialFit::default()),
        }
    }

    /// Dimension the objective expects, or `None` when any works.
    pub fn dim(self) -> Option<usize> {
        match self {
            Self::IndexedParaboloid => None,
            Self::ExponentialFit => Some(3),
            _ => Some(2),
        }
    }

    /// The customary starting point.
    pub fn start(self) -> Vector {
        match self {
            Self::Rosenbrock => Vector::from([-1.9, 2.0]),
            Self::ShiftedQuadratic => Vector::from([0.1, 0.3]),
            Self::OffsetParaboloid => Vector::from([0.0, 0.0]),
            Self::Quartic => Vector::from([3.0, 3.0]),
            Self::IndexedParaboloid => Vector::zeros(5),
            Self::AbsDifference => Vector::from([5.1, 1.1]),
            Self::Schaffer => Vector::from([10.0, 10.0]),
            Self::CircleParabola => Vector::from([-2.0, 2.0]),
            Self::ExponentialFit => Vector::from([1.0, 1.0, 1.0]),
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Problem {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MathError::invalid_input(format!("unknown problem '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Central-difference check of an analytic gradient.
    fn assert_gradient_matches(f: &dyn Objective, x: &Vector) {
        let grad = f.gradient(x).unwrap();
        let h = 1e-6;
        for i in 0..x.dim() {
            let mut plus = x.clone();
            let mut minus = x.clone();
            plus[i] += h;
            minus[i] -= h;
            let numeric = (f.value(&plus) - f.value(&minus)) / (2.0 * h);
            assert_relative_eq!(grad[i], numeric, epsilon = 1e-4, max_relative = 1e-5);
        }
    }

    #[test]
    fn test_gradients() {
        let x = Vector::from([-1.9, 2.0]);
        for f in [
            Problem::Rosenbrock,
            Problem::ShiftedQuadratic,
            Problem::OffsetParaboloid,
            Problem::Quartic,
        ] {
            assert_gradient_matches(f.objective().as_ref(), &x);
        }
        assert_gradient_matches(&IndexedParaboloid, &Vector::from([0.5, -1.0, 4.0]));
    }

    #[test]
    fn test_residuals_match_value() {
        let x = Vector::from([0.3, -0.7]);
        for f in [Problem::Rosenbrock, Problem::CircleParabola] {
            let f = f.objective();
            let r = f.residuals(&x).unwrap();
            assert_relative_eq!(r.dot(&r).unwrap(), f.value(&x), max_relative = 1e-12);
        }

        let fit = ExponentialFit::default();
        let x = Vector::from([0.5, 0.2, 1.0]);
        let r = fit.residuals(&x).unwrap();
        assert_eq!(r.dim(), 6);
        assert_relative_eq!(r.dot(&r).unwrap(), fit.value(&x), max_relative = 1e-12);
        assert_eq!(fit.jacobian(&x).unwrap().shape(), (6, 3));
    }

    #[test]
    fn test_known_minima() {
        assert_relative_eq!(Rosenbrock.value(&Vector::from([1.0, 1.0])), 0.0);
        assert_relative_eq!(ShiftedQuadratic.value(&Vector::from([4.0, 2.0])), 0.0);
        assert_relative_eq!(
            IndexedParaboloid.value(&Vector::from([0.0, 1.0, 2.0, 3.0, 4.0])),
            0.0
        );
        assert_relative_eq!(AbsDifference.value(&Vector::zeros(2)), 0.0);
        assert_relative_eq!(Schaffer.value(&Vector::zeros(2)), 0.0);
    }

    #[test]
    fn test_capabilities() {
        assert!(Rosenbrock.supports(Capability::Residuals));
        assert!(!ShiftedQuadratic.supports(Capability::Residuals));
        assert!(!AbsDifference.supports(Capability::Gradient));
        assert!(Schaffer.gradient(&Vector::zeros(2)).is_err());
    }

    #[test]
    fn test_problem_names() {
        for p in Problem::ALL {
            assert_eq!(p.name().parse::<Problem>().unwrap(), p);
            assert!(p.objective().value(&p.start()).is_finite());
        }
        assert!("nope".parse::<Problem>().is_err());
    }

    #[test]
    fn test_customary_starts_fit_the_dimension() {
        for p in Problem::ALL {
            if let Some(dim) = p.dim() {
                assert_eq!(p.start().dim(), dim, "{}", p);
            }
        }
        assert_eq!(Problem::IndexedParaboloid.dim(), None);
        assert_eq!(Problem::ExponentialFit.dim(), Some(3));
    }
}
