//! LU and LUP factorizations.
//!
//! Decomposition never touches the source matrix: [`Matrix::lu`] and
//! [`Matrix::lup`] return a [`Factorization`] that owns the packed factors,
//! the row permutation and the swap count. Decomposing the same matrix twice
//! therefore yields identical factorizations.
//!
//! The packed layout follows Doolittle: the upper factor occupies the
//! diagonal and above, the strictly lower part holds the multipliers of the
//! unit lower factor, whose diagonal of ones is implicit.

use crate::error::{MathError, MathResult};
use crate::linear_algebra::{Matrix, Vector, DEFAULT_EPSILON};

/// Result of an LU or LUP decomposition.
#[derive(Debug, Clone, PartialEq)]
pub struct Factorization {
    packed: Matrix,
    /// `permutation[i]` is the source row now stored at row `i`.
    permutation: Option<Vec<usize>>,
    switches: usize,
    epsilon: f64,
}

impl Matrix {
    /// Doolittle decomposition without pivoting.
    ///
    /// Fails with [`MathError::SingularMatrix`] when a pivot needed for
    /// elimination has magnitude below `epsilon`. The final diagonal entry
    /// is not a divisor here; it is checked during back substitution.
    pub fn lu(&self, epsilon: f64) -> MathResult<Factorization> {
        self.require_square("LU decomposition")?;
        let n = self.rows();
        let mut a = self.clone();

        for i in 0..n.saturating_sub(1) {
            let pivot = a[(i, i)];
            if pivot.abs() < epsilon {
                return Err(MathError::singular("LU decomposition", i, pivot));
            }
            eliminate(&mut a, i);
        }

        Ok(Factorization {
            packed: a,
            permutation: None,
            switches: 0,
            epsilon,
        })
    }

    /// Decomposition with partial pivoting.
    ///
    /// Before eliminating column `i`, the row with the largest magnitude in
    /// that column (rows `i..n`) is swapped into place. If even the best
    /// pivot is below `epsilon` the column is left uneliminated; the
    /// degeneracy surfaces later as a near-zero diagonal entry (a zero
    /// determinant, or a singular error from [`Factorization::solve`]).
    pub fn lup(&self, epsilon: f64) -> MathResult<Factorization> {
        self.require_square("LUP decomposition")?;
        let n = self.rows();
        let mut a = self.clone();
        let mut permutation: Vec<usize> = (0..n).collect();
        let mut switches = 0;

        for i in 0..n.saturating_sub(1) {
            let mut best = i;
            for j in i + 1..n {
                if a[(j, i)].abs() > a[(best, i)].abs() {
                    best = j;
                }
            }
            if best != i {
                a.swap_rows(i, best);
                permutation.swap(i, best);
                switches += 1;
            }
            if a[(i, i)].abs() < epsilon {
                log::debug!("LUP: pivot {} below epsilon, skipping elimination", i);
                continue;
            }
            eliminate(&mut a, i);
        }

        Ok(Factorization {
            packed: a,
            permutation: Some(permutation),
            switches,
            epsilon,
        })
    }

    /// Solves `self * x = b` through an LUP decomposition.
    pub fn solve(&self, b: &Vector, epsilon: f64) -> MathResult<Vector> {
        self.lup(epsilon)?.solve(b)
    }

    /// Inverse through an LUP decomposition.
    pub fn inverse(&self, epsilon: f64) -> MathResult<Matrix> {
        self.lup(epsilon)?.inverse()
    }

    /// Determinant through an LUP decomposition.
    pub fn determinant(&self) -> MathResult<f64> {
        Ok(self.lup(DEFAULT_EPSILON)?.determinant())
    }

    fn require_square(&self, operation: &'static str) -> MathResult<()> {
        if self.is_square() {
            Ok(())
        } else {
            Err(MathError::NotSquare {
                operation,
                rows: self.rows(),
                cols: self.cols(),
            })
        }
    }
}

fn eliminate(a: &mut Matrix, i: usize) {
    let n = a.rows();
    let pivot = a[(i, i)];
    for j in i + 1..n {
        a[(j, i)] /= pivot;
        let factor = a[(j, i)];
        for k in i + 1..n {
            a[(j, k)] -= factor * a[(i, k)];
        }
    }
}

impl Factorization {
    /// Dimension of the factorized matrix.
    pub fn dim(&self) -> usize {
        self.packed.rows()
    }

    /// Packed factors as stored.
    pub fn packed(&self) -> &Matrix {
        &self.packed
    }

    /// Number of row swaps performed.
    pub fn switches(&self) -> usize {
        self.switches
    }

    /// Whether the decomposition used pivoting.
    pub fn is_pivoted(&self) -> bool {
        self.permutation.is_some()
    }

    /// Unit lower triangular factor.
    pub fn lower(&self) -> Matrix {
        let n = self.dim();
        let mut l = Matrix::identity(n);
        for i in 1..n {
            for j in 0..i {
                l[(i, j)] = self.packed[(i, j)];
            }
        }
        l
    }

    /// Upper triangular factor.
    pub fn upper(&self) -> Matrix {
        let n = self.dim();
        let mut u = Matrix::zeros(n, n);
        for i in 0..n {
            for j in i..n {
                u[(i, j)] = self.packed[(i, j)];
            }
        }
        u
    }

    /// Permutation matrix `P` with `P * A = L * U`.
    ///
    /// The identity for an unpivoted decomposition.
    pub fn permutation_matrix(&self) -> Matrix {
        let n = self.dim();
        let mut p = Matrix::zeros(n, n);
        match &self.permutation {
            Some(perm) => {
                for (i, &src) in perm.iter().enumerate() {
                    p[(i, src)] = 1.0;
                }
            }
            None => {
                for i in 0..n {
                    p[(i, i)] = 1.0;
                }
            }
        }
        p
    }

    fn check_rhs(&self, len: usize, operation: &'static str) -> MathResult<()> {
        if len == self.dim() {
            Ok(())
        } else {
            Err(MathError::dimension_mismatch(
                operation,
                self.packed.shape(),
                (len, 1),
            ))
        }
    }

    /// Solves `L * y = P * b`. No division: `L` has a unit diagonal.
    pub fn forward_substitution(&self, b: &Vector) -> MathResult<Vector> {
        self.check_rhs(b.dim(), "forward substitution")?;
        let n = self.dim();
        let mut y = match &self.permutation {
            Some(perm) => Vector::new(perm.iter().map(|&src| b[src]).collect()),
            None => b.clone(),
        };
        for i in 0..n {
            for j in i + 1..n {
                y[j] -= self.packed[(j, i)] * y[i];
            }
        }
        Ok(y)
    }

    /// Solves `U * x = y`.
    pub fn backward_substitution(&self, y: &Vector) -> MathResult<Vector> {
        self.check_rhs(y.dim(), "backward substitution")?;
        let n = self.dim();
        let mut x = y.clone();
        for i in (0..n).rev() {
            let diag = self.packed[(i, i)];
            if diag.abs() < self.epsilon {
                return Err(MathError::singular("backward substitution", i, diag));
            }
            x[i] /= diag;
            for j in 0..i {
                x[j] -= self.packed[(j, i)] * x[i];
            }
        }
        Ok(x)
    }

    /// Solves `A * x = b` for the factorized `A`.
    pub fn solve(&self, b: &Vector) -> MathResult<Vector> {
        let y = self.forward_substitution(b)?;
        self.backward_substitution(&y)
    }

    /// Solves `A * X = B` column by column.
    pub fn solve_matrix(&self, b: &Matrix) -> MathResult<Matrix> {
        if b.rows() != self.dim() {
            return Err(MathError::dimension_mismatch(
                "solve",
                self.packed.shape(),
                b.shape(),
            ));
        }
        let mut x = Matrix::zeros(b.rows(), b.cols());
        for j in 0..b.cols() {
            let col = self.solve(&b.column(j))?;
            for i in 0..b.rows() {
                x[(i, j)] = col[i];
            }
        }
        Ok(x)
    }

    /// Inverse of the factorized matrix, assembled column by column from
    /// solves against the identity.
    pub fn inverse(&self) -> MathResult<Matrix> {
        self.solve_matrix(&Matrix::identity(self.dim()))
    }

    /// `(-1)^switches * prod(diag(U))`.
    pub fn determinant(&self) -> f64 {
        let sign = if self.switches % 2 == 0 { 1.0 } else { -1.0 };
        (0..self.dim()).fold(sign, |det, i| det * self.packed[(i, i)])
    }
}
