//! Lab 3: gradient descent, Newton-Raphson and Gauss-Newton, with and
//! without golden-section step search.

use anyhow::Result;
use descent_math::linear_algebra::Vector;
use descent_math::objective::{Counted, Objective};
use descent_math::optimization::gradient::{
    gauss_newton, gradient_descent, newton_raphson, GradientConfig,
};
use descent_math::optimization::OptimizationResult;
use descent_math::test_functions::{
    CircleParabola, ExponentialFit, OffsetParaboloid, Problem, Quartic, Rosenbrock,
    ShiftedQuadratic,
};
use descent_math::MathResult;
use serde::Serialize;
use tabled::Tabled;

use crate::commands::{display_option, display_value, Context};
use crate::output::{format_point, print_header, print_output};

#[derive(Debug, Clone, Copy)]
enum Method {
    Descent,
    Newton,
    GaussNewton,
}

impl Method {
    fn name(self) -> &'static str {
        match self {
            Self::Descent => "gradient descent",
            Self::Newton => "Newton-Raphson",
            Self::GaussNewton => "Gauss-Newton",
        }
    }

    fn run<O: Objective + ?Sized>(
        self,
        f: &O,
        x0: &Vector,
        config: &GradientConfig,
    ) -> MathResult<OptimizationResult> {
        match self {
            Self::Descent => gradient_descent(f, x0, config),
            Self::Newton => newton_raphson(f, x0, config),
            Self::GaussNewton => gauss_newton(f, x0, config),
        }
    }
}

/// One run with the evaluator call counts it caused.
#[derive(Debug, Clone, Serialize, Tabled)]
struct GradientRecord {
    #[tabled(rename = "Problem")]
    problem: &'static str,
    #[tabled(rename = "Algorithm")]
    algorithm: &'static str,
    #[tabled(rename = "Step")]
    step: &'static str,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "Iterations", display_with = "display_option")]
    iterations: Option<u32>,
    #[tabled(rename = "Optimum")]
    point: String,
    #[tabled(rename = "f(Optimum)", display_with = "display_value")]
    value: Option<f64>,
    #[tabled(rename = "f calls")]
    value_calls: u64,
    #[tabled(rename = "∇ calls")]
    gradient_calls: u64,
    #[tabled(rename = "H calls")]
    hessian_calls: u64,
    #[tabled(rename = "J calls")]
    jacobian_calls: u64,
    #[tabled(rename = "Outcome")]
    outcome: String,
}

struct Runner {
    tolerance: f64,
    records: Vec<GradientRecord>,
}

impl Runner {
    fn run<O: Objective>(
        &mut self,
        problem: Problem,
        f: &Counted<O>,
        method: Method,
        start: &Vector,
        line_search: bool,
    ) {
        f.reset_counters();
        let config = GradientConfig::default()
            .with_tolerance(self.tolerance)
            .with_line_search(line_search);
        let outcome = method.run(f, start, &config);
        let counts = f.counts();

        let (iterations, point, value, outcome) = match outcome {
            Ok(result) => (
                Some(result.iterations),
                format_point(&result.point),
                Some(result.value),
                result.termination.to_string(),
            ),
            Err(e) => (None, String::new(), None, e.to_string()),
        };
        self.records.push(GradientRecord {
            problem: problem.name(),
            algorithm: method.name(),
            step: if line_search { "golden section" } else { "fixed" },
            start: start.to_string(),
            iterations,
            point,
            value,
            value_calls: counts.value,
            gradient_calls: counts.gradient,
            hessian_calls: counts.hessian,
            jacobian_calls: counts.jacobian,
            outcome,
        });
    }

    fn flush(&mut self, title: &str, ctx: &Context) -> Result<()> {
        print_header(title, ctx.format);
        print_output(&self.records, ctx.format)?;
        self.records.clear();
        Ok(())
    }
}

pub(super) fn run(ctx: &Context) -> Result<()> {
    let mut runner = Runner {
        tolerance: ctx.settings.tolerance,
        records: Vec::new(),
    };

    let f = Counted::new(OffsetParaboloid);
    let start = Vector::from([0.0, 0.0]);
    for line_search in [false, true] {
        runner.run(Problem::OffsetParaboloid, &f, Method::Descent, &start, line_search);
    }
    runner.flush("Task 1: gradient descent with and without line search", ctx)?;

    let rosenbrock = Counted::new(Rosenbrock);
    let quadratic = Counted::new(ShiftedQuadratic);
    for method in [Method::Descent, Method::Newton] {
        runner.run(
            Problem::Rosenbrock,
            &rosenbrock,
            method,
            &Problem::Rosenbrock.start(),
            true,
        );
        runner.run(
            Problem::ShiftedQuadratic,
            &quadratic,
            method,
            &Problem::ShiftedQuadratic.start(),
            true,
        );
    }
    runner.flush("Task 2: gradient descent against Newton-Raphson", ctx)?;

    let quartic = Counted::new(Quartic);
    for start in [Vector::from([3.0, 3.0]), Vector::from([1.0, 2.0])] {
        for line_search in [false, true] {
            runner.run(Problem::Quartic, &quartic, Method::Newton, &start, line_search);
        }
    }
    runner.flush("Task 3: Newton-Raphson on the quartic", ctx)?;

    for line_search in [false, true] {
        runner.run(
            Problem::Rosenbrock,
            &rosenbrock,
            Method::GaussNewton,
            &Problem::Rosenbrock.start(),
            line_search,
        );
    }
    runner.flush("Task 4: Gauss-Newton on Rosenbrock", ctx)?;

    let system = Counted::new(CircleParabola);
    for start in [
        Vector::from([-2.0, 2.0]),
        Vector::from([2.0, 2.0]),
        Vector::from([2.0, -2.0]),
    ] {
        runner.run(Problem::CircleParabola, &system, Method::GaussNewton, &start, true);
    }
    runner.flush("Task 5: Gauss-Newton on a nonlinear system", ctx)?;

    let fit = Counted::new(ExponentialFit::default());
    runner.run(
        Problem::ExponentialFit,
        &fit,
        Method::GaussNewton,
        &Problem::ExponentialFit.start(),
        true,
    );
    runner.flush("Task 6: Gauss-Newton model fit", ctx)
}
