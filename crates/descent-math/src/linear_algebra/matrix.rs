//! Dense row-major matrix.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use nalgebra::DMatrix;

use crate::error::{MathError, MathResult};
use crate::linear_algebra::Vector;

/// A dense `rows x cols` matrix of `f64` stored row-major.
///
/// Every row has exactly `cols` entries. Binary operations return
/// [`MathError::DimensionMismatch`] carrying both shapes when the operands
/// do not fit, and never modify either operand in that case.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Creates a zero-filled matrix.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Creates the `n x n` identity matrix.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        m
    }

    /// Creates a matrix from a table of rows.
    ///
    /// Fails if the rows do not all have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> MathResult<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(MathError::invalid_input(format!(
                    "row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    cols
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Creates a matrix from a row-major slice.
    pub fn from_row_slice(rows: usize, cols: usize, values: &[f64]) -> MathResult<Self> {
        if values.len() != rows * cols {
            return Err(MathError::invalid_input(format!(
                "{} values cannot fill a {}x{} matrix",
                values.len(),
                rows,
                cols
            )));
        }
        Ok(Self {
            rows,
            cols,
            data: values.to_vec(),
        })
    }

    /// Creates a single-column matrix from a vector.
    #[must_use]
    pub fn column_vector(v: &Vector) -> Self {
        Self {
            rows: v.dim(),
            cols: 1,
            data: v.as_slice().to_vec(),
        }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns true for square matrices.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Returns the entry at `(row, col)` if it exists.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        (row < self.rows && col < self.cols).then(|| self.data[row * self.cols + col])
    }

    /// Returns a row as a slice.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Returns a column as a vector.
    pub fn column(&self, j: usize) -> Vector {
        Vector::new((0..self.rows).map(|i| self[(i, j)]).collect())
    }

    /// Appends a row, which must have `cols` entries.
    ///
    /// A `0 x 0` matrix adopts the length of its first row.
    pub fn add_row(&mut self, row: &[f64]) -> MathResult<()> {
        if self.rows == 0 && self.cols == 0 {
            self.cols = row.len();
        }
        if row.len() != self.cols {
            return Err(MathError::dimension_mismatch(
                "row append",
                self.shape(),
                (1, row.len()),
            ));
        }
        self.data.extend_from_slice(row);
        self.rows += 1;
        Ok(())
    }

    /// Converts a single-column matrix into a vector.
    pub fn to_vector(&self) -> MathResult<Vector> {
        if self.cols != 1 {
            return Err(MathError::invalid_input(format!(
                "a {}x{} matrix cannot be viewed as a vector",
                self.rows, self.cols
            )));
        }
        Ok(Vector::new(self.data.clone()))
    }

    pub(crate) fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for j in 0..self.cols {
            self.data.swap(a * self.cols + j, b * self.cols + j);
        }
    }

    fn check_same_shape(&self, other: &Self, operation: &'static str) -> MathResult<()> {
        if self.shape() == other.shape() {
            Ok(())
        } else {
            Err(MathError::dimension_mismatch(
                operation,
                self.shape(),
                other.shape(),
            ))
        }
    }

    /// Elementwise sum.
    pub fn add(&self, other: &Self) -> MathResult<Self> {
        let mut result = self.clone();
        result.add_in_place(other)?;
        Ok(result)
    }

    /// Elementwise difference.
    pub fn sub(&self, other: &Self) -> MathResult<Self> {
        let mut result = self.clone();
        result.sub_in_place(other)?;
        Ok(result)
    }

    /// Multiplies every entry by `factor`.
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        let mut result = self.clone();
        result.scale_in_place(factor);
        result
    }

    /// Divides every entry by `divisor`.
    pub fn div_scalar(&self, divisor: f64) -> MathResult<Self> {
        let mut result = self.clone();
        result.div_scalar_in_place(divisor)?;
        Ok(result)
    }

    /// Matrix product `self * other`.
    pub fn matmul(&self, other: &Self) -> MathResult<Self> {
        if self.cols != other.rows {
            return Err(MathError::dimension_mismatch(
                "matrix multiplication",
                self.shape(),
                other.shape(),
            ));
        }
        let mut result = Self::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self[(i, k)];
                if a == 0.0 {
                    continue;
                }
                for j in 0..other.cols {
                    result.data[i * other.cols + j] += a * other[(k, j)];
                }
            }
        }
        Ok(result)
    }

    /// Matrix-vector product.
    pub fn mul_vector(&self, v: &Vector) -> MathResult<Vector> {
        if self.cols != v.dim() {
            return Err(MathError::dimension_mismatch(
                "matrix-vector multiplication",
                self.shape(),
                (v.dim(), 1),
            ));
        }
        Ok(Vector::new(
            (0..self.rows)
                .map(|i| self.row(i).iter().zip(v).map(|(a, b)| a * b).sum())
                .collect(),
        ))
    }

    /// Returns the transpose.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut result = Self::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                result[(j, i)] = self[(i, j)];
            }
        }
        result
    }

    /// In-place elementwise sum.
    pub fn add_in_place(&mut self, other: &Self) -> MathResult<()> {
        self.check_same_shape(other, "addition")?;
        for (a, b) in self.data.iter_mut().zip(&other.data) {
            *a += b;
        }
        Ok(())
    }

    /// In-place elementwise difference.
    pub fn sub_in_place(&mut self, other: &Self) -> MathResult<()> {
        self.check_same_shape(other, "subtraction")?;
        for (a, b) in self.data.iter_mut().zip(&other.data) {
            *a -= b;
        }
        Ok(())
    }

    /// In-place scaling.
    pub fn scale_in_place(&mut self, factor: f64) {
        for a in &mut self.data {
            *a *= factor;
        }
    }

    /// In-place division by a scalar.
    pub fn div_scalar_in_place(&mut self, divisor: f64) -> MathResult<()> {
        if divisor == 0.0 {
            return Err(MathError::DivisionByZero { value: divisor });
        }
        for a in &mut self.data {
            *a /= divisor;
        }
        Ok(())
    }

    /// Replaces `self` with `self * other`.
    pub fn matmul_in_place(&mut self, other: &Self) -> MathResult<()> {
        *self = self.matmul(other)?;
        Ok(())
    }

    /// Compares entries within an absolute tolerance.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        debug_assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of {}x{}",
            row,
            col,
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        debug_assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of {}x{}",
            row,
            col,
            self.rows,
            self.cols
        );
        &mut self.data[row * self.cols + col]
    }
}

impl From<&DMatrix<f64>> for Matrix {
    fn from(m: &DMatrix<f64>) -> Self {
        let (rows, cols) = m.shape();
        let mut result = Self::zeros(rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                result[(i, j)] = m[(i, j)];
            }
        }
        result
    }
}

impl From<&Matrix> for DMatrix<f64> {
    fn from(m: &Matrix) -> Self {
        DMatrix::from_row_slice(m.rows, m.cols, &m.data)
    }
}

/// Parses whitespace-separated rows, one matrix row per line.
///
/// Blank lines are skipped.
impl FromStr for Matrix {
    type Err = MathError;

    fn from_str(s: &str) -> MathResult<Self> {
        let mut matrix = Self::zeros(0, 0);
        for (n, line) in s.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .split_whitespace()
                .map(|tok| {
                    tok.parse::<f64>().map_err(|e| MathError::Parse {
                        line: n + 1,
                        reason: format!("'{}': {}", tok, e),
                    })
                })
                .collect::<MathResult<Vec<f64>>>()?;
            matrix.add_row(&row).map_err(|_| MathError::Parse {
                line: n + 1,
                reason: format!("expected {} columns, found {}", matrix.cols, row.len()),
            })?;
        }
        Ok(matrix)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, x) in self.row(i).iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                match f.precision() {
                    Some(p) => write!(f, "{:.*}", p, x)?,
                    None => write!(f, "{}", x)?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn m(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let result = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(result, Err(MathError::InvalidInput { .. })));
    }

    #[test]
    fn test_add_row() {
        let mut grown = Matrix::zeros(0, 0);
        grown.add_row(&[1.0, 2.0]).unwrap();
        grown.add_row(&[3.0, 4.0]).unwrap();
        assert_eq!(grown, m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]));
        assert!(grown.add_row(&[5.0]).is_err());

        // A shaped matrix keeps its width even with no rows yet.
        let mut shaped = Matrix::zeros(0, 5);
        let err = shaped.add_row(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, MathError::DimensionMismatch { .. }));
        assert_eq!(shaped.shape(), (0, 5));
        shaped.add_row(&[1.0; 5]).unwrap();
        assert_eq!(shaped.shape(), (1, 5));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of 2x2")]
    fn test_column_index_past_width_panics() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let _ = a[(0, 2)];
    }

    #[test]
    fn test_add_sub() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = m(vec![vec![4.0, 3.0], vec![2.0, 1.0]]);

        assert_eq!(a.add(&b).unwrap(), m(vec![vec![5.0, 5.0], vec![5.0, 5.0]]));
        assert_eq!(
            a.sub(&b).unwrap(),
            m(vec![vec![-3.0, -1.0], vec![1.0, 3.0]])
        );
    }

    #[test]
    fn test_mismatch_does_not_mutate() {
        let mut a = Matrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let b = Matrix::from_row_slice(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let a_before = a.clone();
        let b_before = b.clone();

        let err = a.add(&b).unwrap_err();
        assert_eq!(
            err,
            MathError::DimensionMismatch {
                operation: "addition",
                rows1: 2,
                cols1: 3,
                rows2: 3,
                cols2: 2,
            }
        );
        assert!(a.sub_in_place(&b).is_err());
        assert!(a.matmul_in_place(&a_before).is_err());
        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }

    #[test]
    fn test_matmul_and_transpose() {
        let a = Matrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let at = a.transpose();
        assert_eq!(at.shape(), (3, 2));
        assert_relative_eq!(at[(2, 1)], 6.0);

        let p = a.matmul(&at).unwrap();
        assert_eq!(p, m(vec![vec![14.0, 32.0], vec![32.0, 77.0]]));

        let v = a.mul_vector(&Vector::from([1.0, 0.0, -1.0])).unwrap();
        assert_eq!(v, Vector::from([-2.0, -2.0]));
    }

    #[test]
    fn test_scale_then_divide_round_trips() {
        let a = m(vec![vec![1.5, -2.25], vec![3.0, 0.125]]);
        let n = 30.576_385_364_59;
        let b = a.scale(n).div_scalar(n).unwrap();
        assert!(a.approx_eq(&b, 1e-12));
        assert!(a.div_scalar(0.0).is_err());
    }

    #[test]
    fn test_parse_and_display() {
        let text = "1 2 3\n4.5 -5 6\n\n";
        let a: Matrix = text.parse().unwrap();
        assert_eq!(a.shape(), (2, 3));
        assert_relative_eq!(a[(1, 0)], 4.5);
        assert_eq!(a.to_string(), "1 2 3\n4.5 -5 6");

        let back: Matrix = a.to_string().parse().unwrap();
        assert_eq!(a, back);
    }

    #[test]
    fn test_parse_errors() {
        let err = "1 2\n3".parse::<Matrix>().unwrap_err();
        assert!(matches!(err, MathError::Parse { line: 2, .. }));

        let err = "1 x".parse::<Matrix>().unwrap_err();
        assert!(matches!(err, MathError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_to_vector() {
        let c = Matrix::column_vector(&Vector::from([1.0, 2.0]));
        assert_eq!(c.to_vector().unwrap(), Vector::from([1.0, 2.0]));
        assert!(Matrix::identity(2).to_vector().is_err());
    }

    #[test]
    fn test_nalgebra_round_trip() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let d: DMatrix<f64> = (&a).into();
        assert_relative_eq!(d[(1, 0)], 3.0);
        assert_eq!(Matrix::from(&d), a);
    }
}
