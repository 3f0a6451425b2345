//! Property-based tests for the LU/LUP machinery.
//!
//! Fixtures are strictly diagonally dominant, so every matrix is invertible
//! and well conditioned.

use descent_math::linear_algebra::{Matrix, Vector, DEFAULT_EPSILON};
use descent_math::MathError;
use proptest::prelude::*;

// =============================================================================
// GENERATORS
// =============================================================================

/// Square, strictly diagonally dominant matrix of size 1..=6.
fn dominant_matrix() -> impl Strategy<Value = Matrix> {
    (1usize..=6).prop_flat_map(|n| {
        (
            prop::collection::vec(-10.0f64..10.0, n * n),
            prop::collection::vec(prop::bool::ANY, n),
        )
            .prop_map(move |(mut values, negative)| {
                for i in 0..n {
                    let off: f64 = (0..n)
                        .filter(|&j| j != i)
                        .map(|j| values[i * n + j].abs())
                        .sum();
                    let diag = off + 1.0 + values[i * n + i].abs();
                    values[i * n + i] = if negative[i] { -diag } else { diag };
                }
                Matrix::from_row_slice(n, n, &values).unwrap()
            })
    })
}

fn matrix_and_rhs() -> impl Strategy<Value = (Matrix, Vector)> {
    dominant_matrix().prop_flat_map(|a| {
        let n = a.rows();
        (
            Just(a),
            prop::collection::vec(-100.0f64..100.0, n).prop_map(Vector::new),
        )
    })
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn inverse_times_matrix_is_identity(a in dominant_matrix()) {
        let inv = a.inverse(DEFAULT_EPSILON).unwrap();
        let product = a.matmul(&inv).unwrap();
        prop_assert!(product.approx_eq(&Matrix::identity(a.rows()), 1e-6));
    }

    #[test]
    fn determinant_of_inverse_is_reciprocal(a in dominant_matrix()) {
        let inv = a.inverse(DEFAULT_EPSILON).unwrap();
        let product = a.determinant().unwrap() * inv.determinant().unwrap();
        prop_assert!((product - 1.0).abs() < 1e-6, "det(A)·det(A⁻¹) = {}", product);
    }

    #[test]
    fn lu_and_lup_solve_agree((a, b) in matrix_and_rhs()) {
        let x_lu = a.lu(DEFAULT_EPSILON).unwrap().solve(&b).unwrap();
        let x_lup = a.lup(DEFAULT_EPSILON).unwrap().solve(&b).unwrap();
        for i in 0..b.dim() {
            prop_assert!((x_lu[i] - x_lup[i]).abs() < 1e-8);
        }
        let residual = a.mul_vector(&x_lup).unwrap().sub(&b).unwrap();
        prop_assert!(residual.norm() < 1e-8 * (1.0 + b.norm()));
    }

    #[test]
    fn decomposition_leaves_source_untouched(a in dominant_matrix()) {
        let before = a.clone();
        let first = a.lup(DEFAULT_EPSILON).unwrap();
        let second = a.lup(DEFAULT_EPSILON).unwrap();
        prop_assert_eq!(&a, &before);
        prop_assert_eq!(first.switches() % 2, second.switches() % 2);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn text_format_round_trips(a in dominant_matrix()) {
        let parsed: Matrix = a.to_string().parse().unwrap();
        prop_assert_eq!(parsed, a);
    }
}

#[test]
fn mismatched_addition_leaves_operands_intact() {
    let mut a = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
    let b = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
    let (a0, b0) = (a.clone(), b.clone());

    assert!(matches!(a.add(&b), Err(MathError::DimensionMismatch { .. })));
    assert!(matches!(
        a.add_in_place(&b),
        Err(MathError::DimensionMismatch { .. })
    ));
    assert_eq!(a, a0);
    assert_eq!(b, b0);
}

#[test]
fn hand_constructed_systems_solve_exactly() {
    let a = Matrix::from_rows(vec![
        vec![3.0, 9.0, 6.0],
        vec![4.0, 12.0, 12.0],
        vec![1.0, -1.0, 1.0],
    ])
    .unwrap();
    let b = Vector::from([12.0, 12.0, 1.0]);

    // The unpivoted elimination hits a zero pivot, LUP does not.
    assert!(matches!(
        a.lu(DEFAULT_EPSILON),
        Err(MathError::SingularMatrix { .. })
    ));
    let x = a.lup(DEFAULT_EPSILON).unwrap().solve(&b).unwrap();
    for (got, want) in x.iter().zip([3.0, 1.0, -1.0]) {
        assert!((got - want).abs() < 1e-8, "{} != {}", got, want);
    }
}
