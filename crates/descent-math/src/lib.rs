//! # Descent Math
//!
//! Dense linear algebra and numerical minimization of scalar functions of
//! several variables.
//!
//! This crate provides:
//!
//! - **Linear Algebra**: row-major matrices, LU/LUP factorization, linear
//!   solve, inverse and determinant
//! - **Objectives**: the [`Objective`](objective::Objective) contract with
//!   optional gradient, Hessian and residual evaluators
//! - **Optimization**: golden-section line search, coordinate search,
//!   Hooke-Jeeves, Nelder-Mead, gradient descent, Newton-Raphson, Gauss-Newton
//! - **Constrained**: Box complex method and the barrier/penalty
//!   transformation method with feasibility restoration
//! - **Test Functions**: reference problems such as Rosenbrock
//!
//! ## Example
//!
//! ```rust
//! use descent_math::prelude::*;
//!
//! let a = Matrix::from_rows(vec![vec![4.0, 1.0], vec![2.0, 3.0]]).unwrap();
//! let x = a.solve(&Vector::from([1.0, 2.0]), DEFAULT_EPSILON).unwrap();
//! assert!((x[0] - 0.1).abs() < 1e-12);
//!
//! let result = nelder_mead(&ShiftedQuadratic, &Vector::from([0.1, 0.3]), &NelderMeadConfig::default()).unwrap();
//! assert!((result.point[0] - 4.0).abs() < 1e-2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::if_not_else)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::single_match_else)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::derivable_impls)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]

pub mod constrained;
pub mod error;
pub mod linear_algebra;
pub mod objective;
pub mod optimization;
pub mod test_functions;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::constrained::{
        box_method, inner_point, transformation_method, BoxConfig, Bounds, Constraints,
        InnerPointConfig, TransformationConfig,
    };
    pub use crate::error::{MathError, MathResult};
    pub use crate::linear_algebra::{Factorization, Matrix, Vector, DEFAULT_EPSILON};
    pub use crate::objective::{Capability, Counted, Objective};
    pub use crate::optimization::direct::{
        coordinate_search, hooke_jeeves, nelder_mead, CoordinateSearchConfig, HookeJeevesConfig,
        NelderMeadConfig, SimplexStopping,
    };
    pub use crate::optimization::gradient::{
        gauss_newton, gradient_descent, newton_raphson, GradientConfig,
    };
    pub use crate::optimization::line_search::{golden_section_search, LineSearchConfig};
    pub use crate::optimization::{OptimizationResult, PerAxis, Termination};
    pub use crate::test_functions::{Problem, Rosenbrock, ShiftedQuadratic};
}

pub use error::{MathError, MathResult};
