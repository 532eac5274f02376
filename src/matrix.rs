//! Dense matrix type for eigen computations
//!
//! Provides the small set of 2D operations diagonalization needs: products,
//! determinant, inverse and comparisons, over real or complex scalars.
//!
//! # Example
//!
//! ```
//! use eigenbasis::Matrix;
//!
//! let m = Matrix::from_rows(&[[4.0, 2.0], [1.0, 3.0]]).unwrap();
//! assert_eq!(m.shape(), (2, 2));
//! assert_eq!(m.trace().unwrap(), 7.0);
//! assert!((m.determinant().unwrap() - 10.0).abs() < 1e-12);
//! ```

use std::fmt;

use num_complex::Complex64;

use crate::{EigenError, Result, Scalar, Vector};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// A 2D matrix with row-major storage
///
/// Data is stored in row-major format (C-style), where consecutive elements
/// in memory belong to the same row.
///
/// # Storage Layout
///
/// For a 2x3 matrix:
/// ```text
/// [[a, b, c],
///  [d, e, f]]
/// ```
/// Data is stored as: [a, b, c, d, e, f]
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Scalar> Matrix<T> {
    /// Creates a matrix filled with zeros
    ///
    /// # Example
    ///
    /// ```
    /// use eigenbasis::Matrix;
    ///
    /// let m = Matrix::<f64>::zeros(3, 3);
    /// assert_eq!(m.get(1, 1), Some(&0.0));
    /// ```
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            rows,
            cols,
            data: vec![T::zero(); rows * cols],
        }
    }

    /// Creates a matrix from a vector of data in row-major order
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `data.len() != rows * cols`
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(EigenError::InvalidInput(format!(
                "Data length {} does not match matrix dimensions {}x{} (expected {})",
                data.len(),
                rows,
                cols,
                rows * cols
            )));
        }

        Ok(Matrix { rows, cols, data })
    }

    /// Creates a matrix from a slice by copying the data
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `data.len() != rows * cols`
    pub fn from_slice(rows: usize, cols: usize, data: &[T]) -> Result<Self> {
        Self::from_vec(rows, cols, data.to_vec())
    }

    /// Creates a matrix from a list of rows
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the rows are ragged
    ///
    /// # Example
    ///
    /// ```
    /// use eigenbasis::Matrix;
    ///
    /// let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// assert_eq!(m.get(1, 0), Some(&3.0));
    ///
    /// let ragged: &[&[f64]] = &[&[1.0, 2.0], &[3.0]];
    /// assert!(Matrix::from_rows(ragged).is_err());
    /// ```
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(EigenError::InvalidInput(format!(
                    "Row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    cols
                )));
            }
            data.extend_from_slice(row);
        }
        Self::from_vec(rows.len(), cols, data)
    }

    /// Creates an identity matrix (square matrix with 1s on diagonal)
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = T::one();
        }
        m
    }

    /// Creates a square diagonal matrix
    pub fn from_diagonal(diagonal: &[T]) -> Self {
        let n = diagonal.len();
        let mut m = Self::zeros(n, n);
        for (i, &d) in diagonal.iter().enumerate() {
            m.data[i * n + i] = d;
        }
        m
    }

    /// Creates a square matrix whose columns are `columns`
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` if any column length differs from the column count
    pub fn from_columns(columns: &[Vector<T>]) -> Result<Self> {
        let n = columns.len();
        let mut m = Self::zeros(n, n);
        for (j, column) in columns.iter().enumerate() {
            if column.len() != n {
                return Err(EigenError::SizeMismatch {
                    expected: n,
                    actual: column.len(),
                });
            }
            for (i, &x) in column.iter().enumerate() {
                m.data[i * n + j] = x;
            }
        }
        Ok(m)
    }

    /// Returns the number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the shape as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns true for square matrices
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Gets a reference to an element at (row, col)
    ///
    /// Returns `None` if indices are out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row >= self.rows || col >= self.cols {
            None
        } else {
            self.data.get(row * self.cols + col)
        }
    }

    /// Gets a mutable reference to an element at (row, col)
    ///
    /// Returns `None` if indices are out of bounds
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if row >= self.rows || col >= self.cols {
            None
        } else {
            let idx = row * self.cols + col;
            self.data.get_mut(idx)
        }
    }

    /// Returns a reference to the underlying data
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Copies column `j` out as a vector
    pub fn column(&self, j: usize) -> Option<Vector<T>> {
        if j >= self.cols {
            return None;
        }
        Some(Vector::from_vec(
            (0..self.rows).map(|i| self.data[i * self.cols + j]).collect(),
        ))
    }

    /// True when every entry is finite
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|x| x.is_finite_value())
    }

    /// Largest entry modulus
    pub fn max_modulus(&self) -> f64 {
        self.data.iter().map(|x| x.modulus()).fold(0.0, f64::max)
    }

    /// Matrix multiplication (matmul)
    ///
    /// Computes `C = A × B` where A is `m×n`, B is `n×p`, and C is `m×p`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if matrix dimensions are incompatible
    /// (i.e., `self.cols != other.rows`)
    ///
    /// # Example
    ///
    /// ```
    /// use eigenbasis::Matrix;
    ///
    /// let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// let b = Matrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]).unwrap();
    /// let c = a.matmul(&b).unwrap();
    ///
    /// assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
    /// ```
    #[cfg_attr(feature = "tracing", instrument(skip(self, other), fields(dims = %format!("{}x{} @ {}x{}", self.rows, self.cols, other.rows, other.cols))))]
    pub fn matmul(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        if self.cols != other.rows {
            return Err(EigenError::InvalidInput(format!(
                "Matrix dimension mismatch for multiplication: {}×{} × {}×{} (inner dimensions {} and {} must match)",
                self.rows, self.cols, other.rows, other.cols, self.cols, other.rows
            )));
        }

        let mut result = Matrix::zeros(self.rows, other.cols);

        // i-k-j order: row k of B is contiguous
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a_ik = self.data[i * self.cols + k];
                if a_ik == T::zero() {
                    continue;
                }
                let b_row = &other.data[k * other.cols..(k + 1) * other.cols];
                let c_row = &mut result.data[i * other.cols..(i + 1) * other.cols];
                for (c, &b) in c_row.iter_mut().zip(b_row) {
                    *c = *c + a_ik * b;
                }
            }
        }

        Ok(result)
    }

    /// Matrix-vector product `A × v`
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` if `v.len() != self.cols`
    pub fn matvec(&self, v: &Vector<T>) -> Result<Vector<T>> {
        if v.len() != self.cols {
            return Err(EigenError::SizeMismatch {
                expected: self.cols,
                actual: v.len(),
            });
        }

        let x = v.as_slice();
        let out = (0..self.rows)
            .map(|i| {
                self.data[i * self.cols..(i + 1) * self.cols]
                    .iter()
                    .zip(x)
                    .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
            })
            .collect();
        Ok(Vector::from_vec(out))
    }

    /// Transpose (no conjugation)
    pub fn transpose(&self) -> Matrix<T> {
        let mut result = Matrix::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                result.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        result
    }

    /// Multiply every entry by `factor`
    pub fn scale(&self, factor: T) -> Matrix<T> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&x| x * factor).collect(),
        }
    }

    /// `A − shift·I`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for non-square matrices
    pub fn shifted(&self, shift: T) -> Result<Matrix<T>> {
        self.require_square("shift")?;
        let mut result = self.clone();
        for i in 0..self.rows {
            let idx = i * self.cols + i;
            result.data[idx] = result.data[idx] - shift;
        }
        Ok(result)
    }

    /// Sum of the diagonal
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for non-square matrices
    pub fn trace(&self) -> Result<T> {
        self.require_square("trace")?;
        Ok((0..self.rows).fold(T::zero(), |acc, i| acc + self.data[i * self.cols + i]))
    }

    /// Determinant via LU factorization with partial pivoting
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for non-square matrices
    pub fn determinant(&self) -> Result<T> {
        self.require_square("determinant")?;
        let n = self.rows;
        let mut a = self.data.clone();
        let mut det = T::one();

        for col in 0..n {
            let pivot = pivot_row(&a, n, col);
            if a[pivot * n + col] == T::zero() {
                return Ok(T::zero());
            }
            if pivot != col {
                swap_rows(&mut a, n, pivot, col);
                det = -det;
            }
            let p = a[col * n + col];
            det = det * p;
            for row in (col + 1)..n {
                let factor = a[row * n + col] / p;
                if factor == T::zero() {
                    continue;
                }
                for k in col..n {
                    a[row * n + k] = a[row * n + k] - factor * a[col * n + k];
                }
            }
        }

        Ok(det)
    }

    /// Inverse via Gauss-Jordan elimination with partial pivoting
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for non-square matrices
    /// - `DivisionByZero` when a pivot is exactly zero (singular matrix)
    ///
    /// # Example
    ///
    /// ```
    /// use eigenbasis::Matrix;
    ///
    /// let m = Matrix::from_rows(&[[4.0, 7.0], [2.0, 6.0]]).unwrap();
    /// let inv = m.inverse().unwrap();
    /// let product = m.matmul(&inv).unwrap();
    /// assert!(product.approx_eq(&Matrix::identity(2), 1e-12));
    /// ```
    pub fn inverse(&self) -> Result<Matrix<T>> {
        self.require_square("inverse")?;
        let n = self.rows;
        let mut a = self.data.clone();
        let mut inv = Matrix::<T>::identity(n).data;

        for col in 0..n {
            let pivot = pivot_row(&a, n, col);
            if a[pivot * n + col] == T::zero() {
                return Err(EigenError::DivisionByZero);
            }
            if pivot != col {
                swap_rows(&mut a, n, pivot, col);
                swap_rows(&mut inv, n, pivot, col);
            }

            let p = a[col * n + col];
            for k in 0..n {
                a[col * n + k] = a[col * n + k] / p;
                inv[col * n + k] = inv[col * n + k] / p;
            }

            for row in 0..n {
                if row == col {
                    continue;
                }
                let factor = a[row * n + col];
                if factor == T::zero() {
                    continue;
                }
                for k in 0..n {
                    a[row * n + k] = a[row * n + k] - factor * a[col * n + k];
                    inv[row * n + k] = inv[row * n + k] - factor * inv[col * n + k];
                }
            }
        }

        Matrix::from_vec(n, n, inv)
    }

    /// `Aⁿ` by `n − 1` repeated multiplications (`A⁰ = I`)
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for non-square matrices
    pub fn powi_by_multiplication(&self, n: u32) -> Result<Matrix<T>> {
        self.require_square("power")?;
        if n == 0 {
            return Ok(Matrix::identity(self.rows));
        }
        let mut result = self.clone();
        for _ in 1..n {
            result = result.matmul(self)?;
        }
        Ok(result)
    }

    /// Largest elementwise difference `max|aᵢⱼ − bᵢⱼ|`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if shapes differ
    pub fn max_abs_diff(&self, other: &Matrix<T>) -> Result<f64> {
        if self.shape() != other.shape() {
            return Err(EigenError::InvalidInput(format!(
                "Cannot compare {}x{} with {}x{}",
                self.rows, self.cols, other.rows, other.cols
            )));
        }
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| (a - b).modulus())
            .fold(0.0, f64::max))
    }

    /// Elementwise equality within `tolerance` (false when shapes differ)
    pub fn approx_eq(&self, other: &Matrix<T>, tolerance: f64) -> bool {
        self.max_abs_diff(other)
            .map(|diff| diff <= tolerance)
            .unwrap_or(false)
    }

    /// Widen to a complex matrix
    pub fn to_complex(&self) -> Matrix<Complex64> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|x| x.to_complex()).collect(),
        }
    }

    fn require_square(&self, op: &str) -> Result<()> {
        if self.is_square() {
            Ok(())
        } else {
            Err(EigenError::InvalidInput(format!(
                "Matrix must be square for {}, got {}x{}",
                op, self.rows, self.cols
            )))
        }
    }
}

impl Matrix<Complex64> {
    /// Real parts
    pub fn re(&self) -> Matrix<f64> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|z| z.re).collect(),
        }
    }

    /// Imaginary parts
    pub fn im(&self) -> Matrix<f64> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|z| z.im).collect(),
        }
    }
}

/// Row index in `col..n` holding the largest-modulus entry of column `col`
fn pivot_row<T: Scalar>(a: &[T], n: usize, col: usize) -> usize {
    let mut best = col;
    let mut best_mod = a[col * n + col].modulus();
    for row in (col + 1)..n {
        let m = a[row * n + col].modulus();
        if m > best_mod {
            best = row;
            best_mod = m;
        }
    }
    best
}

fn swap_rows<T>(a: &mut [T], n: usize, r1: usize, r2: usize) {
    for k in 0..n {
        a.swap(r1 * n + k, r2 * n + k);
    }
}

impl<T: Scalar> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for i in 0..self.rows {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for j in 0..self.cols {
                if j > 0 {
                    write!(f, ", ")?;
                }
                let x = self.data[i * self.cols + j];
                match f.precision() {
                    Some(p) => write!(f, "{:.*}", p, x)?,
                    None => write!(f, "{}", x)?,
                }
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}
