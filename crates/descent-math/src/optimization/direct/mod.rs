//! Derivative-free optimizers.
//!
//! - [`coordinate_search`]: cyclic line minimization along each axis
//! - [`hooke_jeeves`]: exploratory moves plus pattern extrapolation
//! - [`nelder_mead`]: reflection, expansion, contraction and shrink of a simplex
//!
//! These only evaluate [`Objective::value`](crate::objective::Objective::value),
//! so any closure `Fn(&Vector) -> f64` can be minimized directly.
//!
//! # Example
//!
//! ```rust
//! use descent_math::linear_algebra::Vector;
//! use descent_math::optimization::direct::{hooke_jeeves, HookeJeevesConfig};
//!
//! let f = |x: &Vector| (x[0] - 4.0).powi(2) + 4.0 * (x[1] - 2.0).powi(2);
//! let result = hooke_jeeves(&f, &Vector::from([0.1, 0.3]), &HookeJeevesConfig::default()).unwrap();
//!
//! assert!(result.converged());
//! assert!((result.point[0] - 4.0).abs() < 1e-4);
//! assert!((result.point[1] - 2.0).abs() < 1e-4);
//! ```

mod coordinate;
mod hooke_jeeves;
mod nelder_mead;

pub use coordinate::{coordinate_search, CoordinateSearchConfig};
pub use hooke_jeeves::{explore, hooke_jeeves, HookeJeevesConfig};
pub use nelder_mead::{initial_simplex, nelder_mead, NelderMeadConfig, SimplexStopping};
