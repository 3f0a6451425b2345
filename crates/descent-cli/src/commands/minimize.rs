//! Minimize command implementation.
//!
//! Runs one optimizer on one reference problem.

use anyhow::Result;
use clap::{Args, ValueEnum};
use descent_math::linear_algebra::Vector;
use descent_math::objective::Objective;
use descent_math::optimization::direct::{
    coordinate_search, hooke_jeeves, nelder_mead, CoordinateSearchConfig, HookeJeevesConfig,
    NelderMeadConfig, SimplexStopping,
};
use descent_math::optimization::gradient::{
    gauss_newton, gradient_descent, newton_raphson, GradientConfig,
};
use descent_math::optimization::OptimizationResult;
use descent_math::test_functions::Problem;
use descent_math::MathResult;

use crate::commands::{parse_point, Context, RunRecord};
use crate::error::CliError;
use crate::output::{print_header, print_output};
use crate::settings::Settings;

/// Arguments for the minimize command.
#[derive(Args, Debug)]
pub struct MinimizeArgs {
    /// Reference problem (rosenbrock, shifted-quadratic, offset-paraboloid,
    /// quartic, indexed-paraboloid, abs-difference, schaffer, circle-parabola,
    /// exponential-fit)
    #[arg(short, long, value_parser = parse_problem)]
    pub problem: Problem,

    /// Optimization algorithm
    #[arg(short, long, value_enum, default_value = "hooke-jeeves")]
    pub algorithm: Algorithm,

    /// Starting point, comma-separated; the problem's customary start if omitted
    #[arg(short, long, allow_hyphen_values = true)]
    pub start: Option<String>,

    /// Use a fixed unit step instead of golden-section search (gradient methods)
    #[arg(long)]
    pub no_line_search: bool,

    /// Initial step (Hooke-Jeeves exploration, Nelder-Mead simplex edge)
    #[arg(long)]
    pub step: Option<f64>,

    /// Stop Nelder-Mead on vertex distance instead of value spread
    #[arg(long)]
    pub vertex_distance: bool,
}

/// Optimization algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    /// Cyclic golden-section search along the axes
    Coordinate,
    /// Hooke-Jeeves pattern search
    HookeJeeves,
    /// Nelder-Mead simplex
    NelderMead,
    /// Steepest descent
    GradientDescent,
    /// Newton-Raphson
    Newton,
    /// Gauss-Newton least squares
    GaussNewton,
}

impl Algorithm {
    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Coordinate => "coordinate search",
            Self::HookeJeeves => "Hooke-Jeeves",
            Self::NelderMead => "Nelder-Mead",
            Self::GradientDescent => "gradient descent",
            Self::Newton => "Newton-Raphson",
            Self::GaussNewton => "Gauss-Newton",
        }
    }
}

fn parse_problem(s: &str) -> Result<Problem, String> {
    s.parse().map_err(|e: descent_math::MathError| e.to_string())
}

/// Execute the minimize command.
pub fn execute(args: MinimizeArgs, ctx: &Context) -> Result<()> {
    let start = match &args.start {
        Some(s) => parse_point(s)?,
        None => args.problem.start(),
    };
    if let Some(dim) = args.problem.dim() {
        if start.dim() != dim {
            return Err(CliError::InvalidArgument(format!(
                "{} takes a {}-dimensional start, got {}",
                args.problem,
                dim,
                start.dim()
            ))
            .into());
        }
    }
    if let Some(step) = args.step {
        if !(step > 0.0) {
            return Err(
                CliError::InvalidArgument(format!("step must be positive, got {}", step)).into(),
            );
        }
    }

    let objective = args.problem.objective();
    tracing::debug!("minimizing {} with {} from {}", args.problem, args.algorithm.name(), start);
    let outcome = run(&*objective, &start, &args, &ctx.settings);
    let record =
        RunRecord::from_outcome(args.problem.name(), args.algorithm.name(), &start, outcome);

    print_header(&format!("{} on {}", args.algorithm.name(), args.problem), ctx.format);
    print_output(&[record], ctx.format)?;
    Ok(())
}

fn run(
    f: &dyn Objective,
    start: &Vector,
    args: &MinimizeArgs,
    settings: &Settings,
) -> MathResult<OptimizationResult> {
    let tolerance = settings.tolerance;
    match args.algorithm {
        Algorithm::Coordinate => {
            let mut config = CoordinateSearchConfig::default().with_tolerance(tolerance);
            if let Some(n) = settings.max_iterations {
                config = config.with_max_iterations(n);
            }
            coordinate_search(f, start, &config)
        }
        Algorithm::HookeJeeves => {
            let mut config = HookeJeevesConfig::default().with_tolerance(tolerance);
            if let Some(step) = args.step {
                config = config.with_initial_step(step);
            }
            if let Some(n) = settings.max_iterations {
                config = config.with_max_iterations(n);
            }
            hooke_jeeves(f, start, &config)
        }
        Algorithm::NelderMead => {
            let mut config = NelderMeadConfig::default().with_tolerance(tolerance);
            if let Some(step) = args.step {
                config = config.with_step(step);
            }
            if let Some(n) = settings.max_iterations {
                config = config.with_max_iterations(n);
            }
            if args.vertex_distance {
                config = config.with_stopping(SimplexStopping::VertexDistance);
            }
            nelder_mead(f, start, &config)
        }
        Algorithm::GradientDescent | Algorithm::Newton | Algorithm::GaussNewton => {
            let mut config = GradientConfig::default()
                .with_tolerance(tolerance)
                .with_line_search(!args.no_line_search);
            if let Some(n) = settings.max_iterations {
                config = config.with_max_iterations(n);
            }
            match args.algorithm {
                Algorithm::GradientDescent => gradient_descent(f, start, &config),
                Algorithm::Newton => newton_raphson(f, start, &config),
                _ => gauss_newton(f, start, &config),
            }
        }
    }
}
