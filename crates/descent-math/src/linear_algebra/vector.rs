//! Dense real vector used as the point type of every optimizer.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::{MathError, MathResult};

/// A point in `R^n`.
///
/// Arithmetic is exposed through named methods. Methods taking another
/// vector check that the dimensions agree and return
/// [`MathError::DimensionMismatch`] otherwise; the `*_in_place` variants
/// leave the receiver untouched when they fail.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vector {
    data: Vec<f64>,
}

impl Vector {
    /// Creates a vector from its coordinates.
    #[must_use]
    pub fn new(data: Vec<f64>) -> Self {
        Self { data }
    }

    /// Creates the zero vector of dimension `dim`.
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self {
            data: vec![0.0; dim],
        }
    }

    /// Creates the unit vector along `axis`.
    #[must_use]
    pub fn unit(dim: usize, axis: usize) -> Self {
        let mut v = Self::zeros(dim);
        v.data[axis] = 1.0;
        v
    }

    /// Number of coordinates.
    #[inline]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    /// Returns the coordinates as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Iterates over the coordinates.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.data.iter()
    }

    /// Consumes the vector and returns its coordinates.
    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    fn check_dim(&self, other: &Self, operation: &'static str) -> MathResult<()> {
        if self.dim() == other.dim() {
            Ok(())
        } else {
            Err(MathError::dimension_mismatch(
                operation,
                (self.dim(), 1),
                (other.dim(), 1),
            ))
        }
    }

    // Callers guarantee equal dimensions.
    pub(crate) fn zip_map(&self, other: &Self, op: impl Fn(f64, f64) -> f64) -> Self {
        Self {
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| op(a, b))
                .collect(),
        }
    }

    fn map(&self, op: impl Fn(f64) -> f64) -> Self {
        Self {
            data: self.data.iter().map(|&a| op(a)).collect(),
        }
    }

    /// Componentwise sum.
    pub fn add(&self, other: &Self) -> MathResult<Self> {
        self.check_dim(other, "vector addition")?;
        Ok(self.zip_map(other, |a, b| a + b))
    }

    /// Componentwise difference.
    pub fn sub(&self, other: &Self) -> MathResult<Self> {
        self.check_dim(other, "vector subtraction")?;
        Ok(self.zip_map(other, |a, b| a - b))
    }

    /// Returns `self + lambda * direction`.
    pub fn offset(&self, direction: &Self, lambda: f64) -> MathResult<Self> {
        self.check_dim(direction, "vector offset")?;
        Ok(self.zip_map(direction, |a, d| a + lambda * d))
    }

    /// Multiplies every coordinate by `factor`.
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        self.map(|a| a * factor)
    }

    /// Divides every coordinate by `divisor`.
    pub fn div_scalar(&self, divisor: f64) -> MathResult<Self> {
        if divisor == 0.0 {
            return Err(MathError::DivisionByZero { value: divisor });
        }
        Ok(self.map(|a| a / divisor))
    }

    /// Adds `shift` to every coordinate.
    #[must_use]
    pub fn add_scalar(&self, shift: f64) -> Self {
        self.map(|a| a + shift)
    }

    /// Raises every coordinate to an integer power.
    #[must_use]
    pub fn powi(&self, exponent: i32) -> Self {
        self.map(|a| a.powi(exponent))
    }

    /// Raises every coordinate to a real power.
    #[must_use]
    pub fn powf(&self, exponent: f64) -> Self {
        self.map(|a| a.powf(exponent))
    }

    /// In-place componentwise sum.
    pub fn add_in_place(&mut self, other: &Self) -> MathResult<()> {
        self.check_dim(other, "vector addition")?;
        for (a, b) in self.data.iter_mut().zip(&other.data) {
            *a += b;
        }
        Ok(())
    }

    /// In-place componentwise difference.
    pub fn sub_in_place(&mut self, other: &Self) -> MathResult<()> {
        self.check_dim(other, "vector subtraction")?;
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

    /// Dot product.
    pub fn dot(&self, other: &Self) -> MathResult<f64> {
        self.check_dim(other, "dot product")?;
        Ok(self.data.iter().zip(&other.data).map(|(a, b)| a * b).sum())
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.data.iter().map(|a| a * a).sum::<f64>().sqrt()
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Self) -> MathResult<f64> {
        Ok(self.sub(other)?.norm())
    }

    /// Arithmetic mean of a non-empty set of points of equal dimension.
    pub fn centroid<'a, I>(points: I) -> MathResult<Self>
    where
        I: IntoIterator<Item = &'a Self>,
    {
        let mut iter = points.into_iter();
        let first = iter
            .next()
            .ok_or_else(|| MathError::invalid_input("centroid of an empty point set"))?;
        let mut sum = first.clone();
        let mut count = 1usize;
        for p in iter {
            sum.add_in_place(p)?;
            count += 1;
        }
        sum.div_scalar(count as f64)
    }
}

impl From<Vec<f64>> for Vector {
    fn from(data: Vec<f64>) -> Self {
        Self::new(data)
    }
}

impl From<&[f64]> for Vector {
    fn from(data: &[f64]) -> Self {
        Self::new(data.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Vector {
    fn from(data: [f64; N]) -> Self {
        Self::new(data.to_vec())
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.data[index]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.data[index]
    }
}

impl<'a> IntoIterator for &'a Vector {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, x) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match f.precision() {
                Some(p) => write!(f, "{:.*}", p, x)?,
                None => write!(f, "{}", x)?,
            }
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_arithmetic() {
        let a = Vector::from([1.0, 2.0, 3.0]);
        let b = Vector::from([4.0, 5.0, 6.0]);

        assert_eq!(a.add(&b).unwrap(), Vector::from([5.0, 7.0, 9.0]));
        assert_eq!(b.sub(&a).unwrap(), Vector::from([3.0, 3.0, 3.0]));
        assert_eq!(a.scale(2.0), Vector::from([2.0, 4.0, 6.0]));
        assert_eq!(a.powi(2), Vector::from([1.0, 4.0, 9.0]));
        assert_eq!(a.offset(&b, 0.5).unwrap(), Vector::from([3.0, 4.5, 6.0]));
        assert_relative_eq!(a.dot(&b).unwrap(), 32.0);
    }

    #[test]
    fn test_norm() {
        let v = Vector::from([3.0, 4.0]);
        assert_relative_eq!(v.norm(), 5.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut a = Vector::from([1.0, 2.0]);
        let b = Vector::from([1.0, 2.0, 3.0]);

        assert!(matches!(
            a.add(&b),
            Err(MathError::DimensionMismatch { .. })
        ));
        assert!(a.add_in_place(&b).is_err());
        assert_eq!(a, Vector::from([1.0, 2.0]));
    }

    #[test]
    fn test_div_by_zero() {
        let v = Vector::from([1.0]);
        assert!(matches!(
            v.div_scalar(0.0),
            Err(MathError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_centroid() {
        let points = [
            Vector::from([0.0, 0.0]),
            Vector::from([2.0, 0.0]),
            Vector::from([1.0, 3.0]),
        ];
        let c = Vector::centroid(&points).unwrap();
        assert_relative_eq!(c[0], 1.0);
        assert_relative_eq!(c[1], 1.0);

        let empty: [Vector; 0] = [];
        assert!(Vector::centroid(&empty).is_err());
    }

    #[test]
    fn test_display() {
        let v = Vector::from([1.0, -2.5]);
        assert_eq!(v.to_string(), "(1, -2.5)");
        assert_eq!(format!("{:.2}", v), "(1.00, -2.50)");
    }
}
