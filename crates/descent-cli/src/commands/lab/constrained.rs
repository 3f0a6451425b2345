//! Lab 4: Box method and the barrier/penalty transformation.

use anyhow::Result;
use descent_math::constrained::{
    box_method, transformation_method, BoxConfig, Bounds, Constraints, TransformationConfig,
};
use descent_math::linear_algebra::Vector;
use descent_math::test_functions::Problem;

use crate::commands::{Context, RunRecord};
use crate::output::{print_header, print_output};

/// `x₁ ≥ x₀` and `x₀ ≤ 2`.
fn wedge() -> Constraints {
    Constraints::new()
        .with_inequality(|x: &Vector| x[1] - x[0])
        .with_inequality(|x: &Vector| 2.0 - x[0])
}

/// Triangle cut by the line `x₁ = 1`.
fn triangle_on_line() -> Constraints {
    Constraints::new()
        .with_inequality(|x: &Vector| 3.0 - x[0] - x[1])
        .with_inequality(|x: &Vector| 3.0 + 1.5 * x[0] - x[1])
        .with_equality(|x: &Vector| x[1] - 1.0)
}

pub(super) fn run(ctx: &Context) -> Result<()> {
    let tolerance = ctx.settings.tolerance;
    let problems = [Problem::Rosenbrock, Problem::ShiftedQuadratic];

    let mut rng = ctx.settings.rng();
    let bounds = Bounds::uniform(2, -100.0, 100.0)?;
    let constraints = wedge();
    let config = BoxConfig::default().with_tolerance(tolerance);
    let records: Vec<RunRecord> = problems
        .iter()
        .map(|problem| {
            let start = problem.start();
            let outcome = box_method(
                &*problem.objective(),
                &start,
                &bounds,
                &constraints,
                &config,
                &mut rng,
            );
            RunRecord::from_outcome(problem.name(), "Box", &start, outcome)
        })
        .collect();
    print_header("Task 1: Box method, x₁ ≥ x₀, x₀ ≤ 2, |xᵢ| ≤ 100", ctx.format);
    print_output(&records, ctx.format)?;

    let config = TransformationConfig::default().with_tolerance(tolerance);
    let records: Vec<RunRecord> = problems
        .iter()
        .map(|problem| {
            let start = problem.start();
            let outcome =
                transformation_method(&*problem.objective(), &start, &constraints, &config);
            RunRecord::from_outcome(problem.name(), "transformation", &start, outcome)
        })
        .collect();
    print_header("Task 2: transformation method, x₁ ≥ x₀, x₀ ≤ 2", ctx.format);
    print_output(&records, ctx.format)?;

    let f = |x: &Vector| (x[0] - 3.0).powi(2) + x[1].powi(2);
    let start = Vector::from([5.0, 5.0]);
    let outcome = transformation_method(&f, &start, &triangle_on_line(), &config);
    let records = vec![RunRecord::from_outcome(
        "(x₀ - 3)² + x₁²",
        "transformation",
        &start,
        outcome,
    )];
    print_header(
        "Task 3: infeasible start, x₀ + x₁ ≤ 3, x₁ ≤ 3 + 1.5·x₀, x₁ = 1",
        ctx.format,
    );
    print_output(&records, ctx.format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customary_starts_are_inside_the_wedge() {
        let constraints = wedge();
        assert!(constraints.is_feasible(&Problem::Rosenbrock.start()));
        assert!(constraints.is_feasible(&Problem::ShiftedQuadratic.start()));
    }

    #[test]
    fn test_task3_start_needs_restoration() {
        assert!(!triangle_on_line().is_feasible(&Vector::from([5.0, 5.0])));
    }
}
