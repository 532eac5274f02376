//! Dense vector type over real or complex scalars

use std::fmt;

use num_complex::Complex64;

use crate::{EigenError, Result, Scalar};

/// Owned dense vector
///
/// # Examples
///
/// ```
/// use eigenbasis::Vector;
///
/// let v = Vector::from_slice(&[3.0, 4.0]);
/// assert_eq!(v.norm(), 5.0);
///
/// let unit = v.normalized().unwrap();
/// assert!((unit.as_slice()[0] - 0.6).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<T> {
    data: Vec<T>,
}

impl<T: Scalar> Vector<T> {
    /// Create vector by copying a slice
    pub fn from_slice(data: &[T]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// Create vector taking ownership of `data`
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Zero vector of length `n`
    pub fn zeros(n: usize) -> Self {
        Self {
            data: vec![T::zero(); n],
        }
    }

    /// Get underlying data as slice
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume the vector, returning its storage
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get vector length
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if vector is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element at `i`, or `None` when out of bounds
    pub fn get(&self, i: usize) -> Option<&T> {
        self.data.get(i)
    }

    /// Iterate over elements
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Euclidean norm `sqrt(Σ|xᵢ|²)`
    ///
    /// Scaled by the largest modulus first so that tiny or huge entries do
    /// not underflow/overflow when squared.
    pub fn norm(&self) -> f64 {
        let scale = self.max_modulus();
        if scale == 0.0 || !scale.is_finite() {
            return scale;
        }
        let sum_sq: f64 = self
            .data
            .iter()
            .map(|x| {
                let m = x.modulus() / scale;
                m * m
            })
            .sum();
        scale * sum_sq.sqrt()
    }

    /// Largest element modulus
    pub fn max_modulus(&self) -> f64 {
        self.data.iter().map(|x| x.modulus()).fold(0.0, f64::max)
    }

    /// Unit-norm copy of this vector
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` if the vector has zero norm
    pub fn normalized(&self) -> Result<Self> {
        let norm = self.norm();
        if norm == 0.0 {
            return Err(EigenError::DivisionByZero);
        }
        let inv = T::from_real(1.0 / norm);
        Ok(self.scale(inv))
    }

    /// Multiply every element by `factor`
    pub fn scale(&self, factor: T) -> Self {
        Self {
            data: self.data.iter().map(|&x| x * factor).collect(),
        }
    }

    /// Elementwise difference `self − other`
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` if lengths differ
    pub fn sub(&self, other: &Self) -> Result<Self> {
        if self.len() != other.len() {
            return Err(EigenError::SizeMismatch {
                expected: self.len(),
                actual: other.len(),
            });
        }
        Ok(Self {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| a - b)
                .collect(),
        })
    }

    /// Inner product `Σ conj(selfᵢ)·otherᵢ`
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` if lengths differ
    pub fn dot(&self, other: &Self) -> Result<T> {
        if self.len() != other.len() {
            return Err(EigenError::SizeMismatch {
                expected: self.len(),
                actual: other.len(),
            });
        }
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .fold(T::zero(), |acc, (&a, &b)| acc + a.conjugate() * b))
    }

    /// Elementwise complex conjugate
    pub fn conj(&self) -> Self {
        Self {
            data: self.data.iter().map(|x| x.conjugate()).collect(),
        }
    }

    /// Widen to a complex vector
    pub fn to_complex(&self) -> Vector<Complex64> {
        Vector {
            data: self.data.iter().map(|x| x.to_complex()).collect(),
        }
    }
}

impl Vector<Complex64> {
    /// Real components
    pub fn re(&self) -> Vector<f64> {
        Vector {
            data: self.data.iter().map(|z| z.re).collect(),
        }
    }

    /// Imaginary components
    pub fn im(&self) -> Vector<f64> {
        Vector {
            data: self.data.iter().map(|z| z.im).collect(),
        }
    }
}

impl<T: Scalar> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match f.precision() {
                Some(p) => write!(f, "{:.*}", p, x)?,
                None => write!(f, "{}", x)?,
            }
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice_and_len() {
        let v = Vector::from_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(v.len(), 3);
        assert!(!v.is_empty());
        assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(v.get(1), Some(&2.0));
        assert_eq!(v.get(3), None);
    }

    #[test]
    fn test_norm_real() {
        let v = Vector::from_slice(&[3.0, 4.0]);
        assert_eq!(v.norm(), 5.0);
        assert_eq!(Vector::<f64>::zeros(4).norm(), 0.0);
    }

    #[test]
    fn test_norm_does_not_overflow() {
        let v = Vector::from_slice(&[3e200, 4e200]);
        let norm = v.norm();
        assert!((norm / 5e200 - 1.0).abs() < 1e-12, "got {}", norm);
    }

    #[test]
    fn test_norm_complex() {
        let v = Vector::from_slice(&[Complex64::new(1.0, 1.0), Complex64::new(1.0, -1.0)]);
        assert!((v.norm() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalized() {
        let v = Vector::from_slice(&[0.0, 2.0, 0.0]);
        let unit = v.normalized().expect("non-zero vector");
        assert_eq!(unit.as_slice(), &[0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_normalized_zero_vector() {
        let v = Vector::<f64>::zeros(2);
        assert_eq!(v.normalized(), Err(EigenError::DivisionByZero));
    }

    #[test]
    fn test_sub_and_dot() {
        let a = Vector::from_slice(&[1.0, 2.0]);
        let b = Vector::from_slice(&[3.0, 5.0]);
        assert_eq!(b.sub(&a).unwrap().as_slice(), &[2.0, 3.0]);
        assert_eq!(a.dot(&b).unwrap(), 13.0);
    }

    #[test]
    fn test_size_mismatch() {
        let a = Vector::from_slice(&[1.0, 2.0]);
        let b = Vector::from_slice(&[1.0]);
        assert_eq!(
            a.sub(&b),
            Err(EigenError::SizeMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert!(a.dot(&b).is_err());
    }

    #[test]
    fn test_complex_dot_is_conjugate_linear() {
        let v = Vector::from_slice(&[Complex64::new(0.0, 1.0)]);
        // <i, i> = conj(i)·i = 1
        assert_eq!(v.dot(&v).unwrap(), Complex64::new(1.0, 0.0));
    }

    #[test]
    fn test_conj_re_im() {
        let v = Vector::from_slice(&[Complex64::new(1.0, 2.0), Complex64::new(-3.0, 0.5)]);
        assert_eq!(v.conj().im().as_slice(), &[-2.0, -0.5]);
        assert_eq!(v.re().as_slice(), &[1.0, -3.0]);
        assert_eq!(
            Vector::from_slice(&[2.0]).to_complex().as_slice(),
            &[Complex64::new(2.0, 0.0)]
        );
    }

    #[test]
    fn test_display() {
        let v = Vector::from_slice(&[1.0, 0.5]);
        assert_eq!(format!("{}", v), "[1, 0.5]");
        assert_eq!(format!("{:.2}", v), "[1.00, 0.50]");
    }
}
