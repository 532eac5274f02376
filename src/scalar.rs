//! Element types for matrices and vectors
//!
//! Real eigenpairs stay in `f64` arithmetic; complex eigenpairs use
//! [`Complex64`]. The [`Scalar`] trait lets matrix, vector and null-space code
//! be written once for both.

use std::fmt::{Debug, Display};
use std::ops::Neg;

use num_complex::Complex64;
use num_traits::Num;

/// Field element usable in [`Matrix`](crate::Matrix) and [`Vector`](crate::Vector)
pub trait Scalar:
    Copy + Debug + Display + PartialEq + Num + Neg<Output = Self> + Send + Sync + 'static
{
    /// Absolute value / complex modulus
    fn modulus(self) -> f64;

    /// Complex conjugate (identity for reals)
    fn conjugate(self) -> Self;

    /// Embed a real number
    fn from_real(x: f64) -> Self;

    /// Widen to a complex number
    fn to_complex(self) -> Complex64;

    /// True when every component is finite
    fn is_finite_value(self) -> bool;
}

impl Scalar for f64 {
    #[inline]
    fn modulus(self) -> f64 {
        self.abs()
    }

    #[inline]
    fn conjugate(self) -> Self {
        self
    }

    #[inline]
    fn from_real(x: f64) -> Self {
        x
    }

    #[inline]
    fn to_complex(self) -> Complex64 {
        Complex64::new(self, 0.0)
    }

    #[inline]
    fn is_finite_value(self) -> bool {
        self.is_finite()
    }
}

impl Scalar for Complex64 {
    #[inline]
    fn modulus(self) -> f64 {
        self.norm()
    }

    #[inline]
    fn conjugate(self) -> Self {
        self.conj()
    }

    #[inline]
    fn from_real(x: f64) -> Self {
        Complex64::new(x, 0.0)
    }

    #[inline]
    fn to_complex(self) -> Complex64 {
        self
    }

    #[inline]
    fn is_finite_value(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}
