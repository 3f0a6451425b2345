//! Lab 2: golden-section search, coordinate search, Hooke-Jeeves and
//! Nelder-Mead.

use anyhow::Result;
use descent_math::constrained::Bounds;
use descent_math::linear_algebra::Vector;
use descent_math::objective::Objective;
use descent_math::optimization::direct::{
    coordinate_search, hooke_jeeves, nelder_mead, CoordinateSearchConfig, HookeJeevesConfig,
    NelderMeadConfig,
};
use descent_math::optimization::line_search::{golden_section_search, LineSearchConfig};
use descent_math::optimization::OptimizationResult;
use descent_math::test_functions::{AbsDifference, Problem, Rosenbrock, Schaffer};
use descent_math::MathResult;

use crate::commands::{Context, RunRecord};
use crate::output::{format_point, print_header, print_output, KeyValue};

/// A global minimum of Schaffer's function counts as found below this value.
const SCHAFFER_SUCCESS: f64 = 1e-4;
const SCHAFFER_TRIALS: u32 = 100;

type Minimizer = fn(&dyn Objective, &Vector, f64) -> MathResult<OptimizationResult>;

fn by_coordinates(
    f: &dyn Objective,
    x0: &Vector,
    tolerance: f64,
) -> MathResult<OptimizationResult> {
    let config = CoordinateSearchConfig::default().with_tolerance(tolerance);
    coordinate_search(f, x0, &config)
}

fn by_hooke_jeeves(
    f: &dyn Objective,
    x0: &Vector,
    tolerance: f64,
) -> MathResult<OptimizationResult> {
    hooke_jeeves(f, x0, &HookeJeevesConfig::default().with_tolerance(tolerance))
}

fn by_nelder_mead(
    f: &dyn Objective,
    x0: &Vector,
    tolerance: f64,
) -> MathResult<OptimizationResult> {
    nelder_mead(f, x0, &NelderMeadConfig::default().with_tolerance(tolerance))
}

const MINIMIZERS: [(&str, Minimizer); 3] = [
    ("Nelder-Mead", by_nelder_mead),
    ("Hooke-Jeeves", by_hooke_jeeves),
    ("coordinate search", by_coordinates),
];

pub(super) fn run(ctx: &Context) -> Result<()> {
    let tolerance = ctx.settings.tolerance;

    print_header("Task 1: (x - 3)² from distant starts", ctx.format);
    print_output(&one_dimensional(tolerance), ctx.format)?;

    print_header("Task 2: reference problems", ctx.format);
    let mut records = Vec::new();
    for problem in [
        Problem::Rosenbrock,
        Problem::ShiftedQuadratic,
        Problem::IndexedParaboloid,
        Problem::AbsDifference,
    ] {
        let f = problem.objective();
        let start = problem.start();
        for (name, minimize) in MINIMIZERS {
            let outcome = minimize(&*f, &start, tolerance);
            records.push(RunRecord::from_outcome(problem.name(), name, &start, outcome));
        }
    }
    print_output(&records, ctx.format)?;

    print_header("Task 3: abs-difference from (5, 5)", ctx.format);
    let start = Vector::from([5.0, 5.0]);
    let records: Vec<RunRecord> = MINIMIZERS[..2]
        .iter()
        .map(|(name, minimize)| {
            RunRecord::from_outcome(
                Problem::AbsDifference.name(),
                *name,
                &start,
                minimize(&AbsDifference, &start, tolerance),
            )
        })
        .collect();
    print_output(&records, ctx.format)?;

    print_header("Task 4: Nelder-Mead simplex step on Rosenbrock", ctx.format);
    let mut records = Vec::new();
    for start in [Vector::from([0.5, 0.5]), Vector::from([20.0, 20.0])] {
        for step in 1..=20 {
            let step = f64::from(step);
            let config = NelderMeadConfig::default()
                .with_tolerance(tolerance)
                .with_step(step);
            let outcome = nelder_mead(&Rosenbrock, &start, &config);
            records.push(RunRecord::from_outcome(
                Problem::Rosenbrock.name(),
                format!("Nelder-Mead, step {}", step),
                &start,
                outcome,
            ));
        }
    }
    print_output(&records, ctx.format)?;

    print_header("Task 5: Nelder-Mead on Schaffer from random starts", ctx.format);
    let mut rng = ctx.settings.rng();
    let region = Bounds::uniform(2, -50.0, 50.0)?;
    let config = NelderMeadConfig::default().with_tolerance(tolerance);
    let mut successes: u32 = 0;
    for _ in 0..SCHAFFER_TRIALS {
        let start = region.sample(&mut rng);
        match nelder_mead(&Schaffer, &start, &config) {
            Ok(result) if result.value.abs() < SCHAFFER_SUCCESS => successes += 1,
            Ok(result) => tracing::debug!("local minimum {} from {}", result.value, start),
            Err(e) => tracing::debug!("run from {} failed: {}", start, e),
        }
    }
    let results = vec![
        KeyValue::new("Trials", SCHAFFER_TRIALS.to_string()),
        KeyValue::new("Global minimum found", successes.to_string()),
        KeyValue::number("Probability", f64::from(successes) / f64::from(SCHAFFER_TRIALS)),
    ];
    print_output(&results, ctx.format)
}

const PARABOLA: &str = "(x - 3)²";

/// Task 1: every method on `(x - 3)²` from 10, 100 and 1000.
fn one_dimensional(tolerance: f64) -> Vec<RunRecord> {
    let f = |x: &Vector| (x[0] - 3.0).powi(2);
    let line_config = LineSearchConfig::default().with_tolerance(tolerance);
    let mut records = Vec::new();

    for s in [10.0, 100.0, 1000.0] {
        let start = Vector::from([s]);

        let record = match golden_section_search(|x| (x - 3.0).powi(2), s, &line_config) {
            Ok(search) => {
                let point = Vector::from([search.minimum]);
                RunRecord {
                    problem: PARABOLA.into(),
                    algorithm: "golden section".into(),
                    start: start.to_string(),
                    iterations: None,
                    evaluations: Some(search.evaluations),
                    value: Some(f(&point)),
                    point: format_point(&point),
                    outcome: format!("interval width {:.1e}", search.bracket.width()),
                }
            }
            Err(e) => RunRecord::failed(PARABOLA, "golden section", &start, &e),
        };
        records.push(record);

        for (name, minimize) in MINIMIZERS {
            let outcome = minimize(&f, &start, tolerance);
            records.push(RunRecord::from_outcome(PARABOLA, name, &start, outcome));
        }
    }
    records
}
