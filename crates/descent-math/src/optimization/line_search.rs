//! Golden-section line search.
//!
//! A one-dimensional minimum is located in two phases:
//!
//! 1. [`find_unimodal_interval`] brackets the minimum by stepping away from
//!    the start point, doubling the step until the middle of three samples is
//!    the lowest.
//! 2. [`golden_section`] shrinks the bracket by the golden ratio
//!    `k = (√5 − 1) / 2` until it is narrower than the tolerance, and returns
//!    its midpoint.
//!
//! [`line_minimum`] applies both to `λ ↦ f(x + λ·d)` to choose a step length
//! along a search direction.

use crate::error::{MathError, MathResult};
use crate::linear_algebra::Vector;
use crate::objective::Objective;
use crate::optimization::DEFAULT_TOLERANCE;

/// Golden ratio conjugate, `(√5 − 1) / 2`.
pub const GOLDEN_RATIO: f64 = 0.618_033_988_749_894_8;

/// Configuration for the golden-section search.
#[derive(Debug, Clone, Copy)]
pub struct LineSearchConfig {
    /// Width below which the bracket is accepted.
    pub tolerance: f64,
    /// First step of the bracketing phase.
    pub initial_step: f64,
    /// Cap on step doublings while bracketing.
    pub max_expansions: u32,
    /// Cap on bracket reductions.
    pub max_iterations: u32,
}

impl Default for LineSearchConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            initial_step: 1.0,
            max_expansions: 200,
            max_iterations: 1000,
        }
    }
}

impl LineSearchConfig {
    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the initial bracketing step.
    #[must_use]
    pub fn with_initial_step(mut self, step: f64) -> Self {
        self.initial_step = step;
        self
    }

    fn validate(&self) -> MathResult<()> {
        if !(self.tolerance > 0.0) {
            return Err(MathError::invalid_input("line search tolerance must be positive"));
        }
        if !(self.initial_step > 0.0) {
            return Err(MathError::invalid_input("line search step must be positive"));
        }
        Ok(())
    }
}

/// A closed interval `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    /// Left end.
    pub lower: f64,
    /// Right end.
    pub upper: f64,
}

impl Bracket {
    /// Interval width.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Interval midpoint.
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.lower + self.upper)
    }
}

/// Result of a line search.
#[derive(Debug, Clone, Copy)]
pub struct LineSearchResult {
    /// Estimated minimizer.
    pub minimum: f64,
    /// Final bracket around the minimizer.
    pub bracket: Bracket,
    /// Function evaluations spent, bracketing included.
    pub evaluations: u64,
}

/// Brackets a minimum of `f` around `start`.
///
/// Returns the bracket and the number of evaluations used.
pub fn find_unimodal_interval<F>(
    mut f: F,
    start: f64,
    config: &LineSearchConfig,
) -> MathResult<(Bracket, u64)>
where
    F: FnMut(f64) -> f64,
{
    config.validate()?;
    let mut step = config.initial_step;
    let mut left = start - step;
    let mut middle = start;
    let mut right = start + step;
    let mut f_left = f(left);
    let mut f_middle = f(middle);
    let mut f_right = f(right);
    let mut evaluations = 3;
    let mut expansions = 0;

    if f_middle < f_left && f_middle < f_right {
        return Ok((Bracket { lower: left, upper: right }, evaluations));
    }

    if f_middle > f_left {
        while f_middle > f_left && expansions < config.max_expansions {
            right = middle;
            middle = left;
            left = middle - step;
            f_middle = f_left;
            f_left = f(left);
            evaluations += 1;
            expansions += 1;
            step *= 2.0;
        }
    } else {
        while f_middle > f_right && expansions < config.max_expansions {
            left = middle;
            middle = right;
            right = middle + step;
            f_middle = f_right;
            f_right = f(right);
            evaluations += 1;
            expansions += 1;
            step *= 2.0;
        }
    }

    if expansions == config.max_expansions {
        log::warn!(
            "unimodal interval search hit {} expansions; function may be unbounded below",
            expansions
        );
    }

    Ok((Bracket { lower: left, upper: right }, evaluations))
}

/// Golden-section search on an explicit bracket `[a, b]`.
pub fn golden_section<F>(mut f: F, a: f64, b: f64, config: &LineSearchConfig) -> MathResult<LineSearchResult>
where
    F: FnMut(f64) -> f64,
{
    config.validate()?;
    if !(a < b) || !a.is_finite() || !b.is_finite() {
        return Err(MathError::invalid_input(format!(
            "golden section needs a finite interval with a < b, got [{}, {}]",
            a, b
        )));
    }

    let k = GOLDEN_RATIO;
    let (mut a, mut b) = (a, b);
    let mut c = b - k * (b - a);
    let mut d = a + k * (b - a);
    let mut fc = f(c);
    let mut fd = f(d);
    let mut evaluations = 2;
    let mut iterations = 0;

    // Far from the origin adjacent floats are wider than the tolerance.
    let width_floor =
        |a: f64, b: f64| config.tolerance.max(4.0 * f64::EPSILON * a.abs().max(b.abs()));

    while b - a >= width_floor(a, b) {
        if iterations == config.max_iterations {
            log::warn!(
                "golden section stopped after {} reductions with bracket [{}, {}]",
                iterations,
                a,
                b
            );
            break;
        }
        iterations += 1;
        if fc < fd {
            b = d;
            d = c;
            c = b - k * (b - a);
            fd = fc;
            fc = f(c);
        } else {
            a = c;
            c = d;
            d = a + k * (b - a);
            fc = fd;
            fd = f(d);
        }
        evaluations += 1;
        log::trace!("golden section: [{}, {}]", a, b);
    }

    let bracket = Bracket { lower: a, upper: b };
    Ok(LineSearchResult {
        minimum: bracket.midpoint(),
        bracket,
        evaluations,
    })
}

/// Golden-section search starting from a point; the bracket is found first.
pub fn golden_section_search<F>(
    mut f: F,
    start: f64,
    config: &LineSearchConfig,
) -> MathResult<LineSearchResult>
where
    F: FnMut(f64) -> f64,
{
    let (bracket, bracket_evals) = find_unimodal_interval(&mut f, start, config)?;
    let mut result = golden_section(f, bracket.lower, bracket.upper, config)?;
    result.evaluations += bracket_evals;
    Ok(result)
}

/// Step length `λ` minimizing `f(x + λ·direction)`, searched from `λ = 0`.
pub fn line_minimum<O>(
    f: &O,
    x: &Vector,
    direction: &Vector,
    config: &LineSearchConfig,
) -> MathResult<LineSearchResult>
where
    O: Objective + ?Sized,
{
    if x.dim() != direction.dim() {
        return Err(MathError::dimension_mismatch(
            "line search",
            (x.dim(), 1),
            (direction.dim(), 1),
        ));
    }
    golden_section_search(
        |lambda| f.value(&x.zip_map(direction, |a, d| a + lambda * d)),
        0.0,
        config,
    )
}
