//! Eigendecomposition and diagonalization of real square matrices
//!
//! Computes every eigenvalue of a real `n×n` matrix together with a unit
//! eigenvector, then uses the factorization `A = P·D·P⁻¹` to rebuild the
//! matrix or raise it to integer powers.
//!
//! # Algorithm
//!
//! 1. Eigenvalues: closed-form quadratic/cubic roots for 2×2 and 3×3, and
//!    balancing + Hessenberg reduction + Francis double-shift QR above that
//!    (selectable through [`Strategy`]).
//! 2. Eigenvalues are ordered by real part, then imaginary part, both
//!    descending. Values within the rank tolerance of each other form a
//!    cluster sharing one eigenspace.
//! 3. Eigenvectors: an orthonormal basis of the null space of `A − λI` per
//!    cluster. Defective clusters (fewer vectors than the multiplicity) repeat
//!    their vectors, which leaves `P` singular.
//! 4. Each eigenvector is rotated so its largest entry is real and positive,
//!    then checked against `‖A·v − λ·v‖`.
//!
//! # Example
//!
//! ```
//! use eigenbasis::{decompose, Matrix};
//!
//! let a = Matrix::from_rows(&[[4.0, 2.0], [1.0, 3.0]]).unwrap();
//! let eigen = decompose(&a).unwrap();
//!
//! // Eigenvalues in descending order
//! let values = eigen.eigenvalues();
//! assert!((values[0].re - 5.0).abs() < 1e-12);
//! assert!((values[1].re - 2.0).abs() < 1e-12);
//!
//! // P·D·P⁻¹ gives the input back
//! let rebuilt = eigen.reconstruct().unwrap();
//! assert!(rebuilt.approx_eq(&a, 1e-10));
//! ```

use std::cmp::Ordering;

use num_complex::Complex64;

use crate::config::{DecomposerConfig, Strategy};
use crate::nullspace::{self, normalize_phase};
use crate::poly::{self, Root, Roots};
use crate::{hessenberg, EigenError, Matrix, Result, Scalar, Vector};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Inverse-iteration sweeps used to repair an eigenvector that fails the self-check
const REFINEMENT_STEPS: usize = 3;

/// How the eigenvalues of a decomposition were obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// 1×1 matrix, the eigenvalue is the single entry
    Trivial,
    /// Quadratic formula on the 2×2 characteristic polynomial
    Quadratic,
    /// Trigonometric/Cardano solution of the 3×3 characteristic cubic
    Cubic,
    /// Hessenberg reduction followed by Francis double-shift QR
    ShiftedQr,
}

/// One eigenvalue with its unit eigenvector
///
/// Real eigenvalues carry real eigenvectors. Complex eigenvalues of a real
/// matrix come in conjugate pairs with conjugate eigenvectors.
#[derive(Debug, Clone, PartialEq)]
pub enum Eigenpair {
    Real {
        value: f64,
        vector: Vector<f64>,
    },
    Complex {
        value: Complex64,
        vector: Vector<Complex64>,
    },
}

impl Eigenpair {
    /// Eigenvalue as a complex number (zero imaginary part when real)
    pub fn value(&self) -> Complex64 {
        match self {
            Eigenpair::Real { value, .. } => Complex64::new(*value, 0.0),
            Eigenpair::Complex { value, .. } => *value,
        }
    }

    /// Real part of the eigenvalue
    pub fn real_value(&self) -> f64 {
        self.value().re
    }

    /// Imaginary part of the eigenvalue
    pub fn imag(&self) -> f64 {
        self.value().im
    }

    /// Eigenvector with complex entries
    pub fn vector(&self) -> Vector<Complex64> {
        match self {
            Eigenpair::Real { vector, .. } => vector.to_complex(),
            Eigenpair::Complex { vector, .. } => vector.clone(),
        }
    }

    /// Real part of the eigenvector
    ///
    /// This is what a plotting layer draws as an arrow from the origin.
    pub fn real_vector(&self) -> Vector<f64> {
        match self {
            Eigenpair::Real { vector, .. } => vector.clone(),
            Eigenpair::Complex { vector, .. } => vector.re(),
        }
    }

    /// Returns true for a real eigenvalue
    pub fn is_real(&self) -> bool {
        matches!(self, Eigenpair::Real { .. })
    }

    /// Borrow the real eigenvalue and eigenvector, if this pair is real
    pub fn as_real(&self) -> Option<(f64, &Vector<f64>)> {
        match self {
            Eigenpair::Real { value, vector } => Some((*value, vector)),
            Eigenpair::Complex { .. } => None,
        }
    }

    /// Check `‖A·v − λ·v‖ / max(1, ‖v‖) ≤ tolerance` for this pair
    pub fn verify(&self, matrix: &Matrix<f64>, tolerance: f64) -> bool {
        match self {
            Eigenpair::Real { value, vector } => {
                verify_eigenpair(matrix, *value, vector, tolerance)
            }
            Eigenpair::Complex { value, vector } => {
                verify_eigenpair(matrix, *value, vector, tolerance)
            }
        }
    }
}

/// Result of [`EigenDecomposer::decompose`]
///
/// Holds the eigenpairs in a deterministic order. Column `i` of
/// [`eigenvector_matrix`](Self::eigenvector_matrix) belongs to entry `i` of
/// [`eigenvalues`](Self::eigenvalues).
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    pairs: Vec<Eigenpair>,
    method: Method,
    near_degenerate: bool,
    iterations: usize,
    singularity_tolerance: f64,
}

impl Decomposition {
    /// Eigenpairs in order
    pub fn pairs(&self) -> &[Eigenpair] {
        &self.pairs
    }

    /// Iterate over the eigenpairs
    ///
    /// # Example
    ///
    /// ```
    /// use eigenbasis::{decompose, Matrix};
    ///
    /// let a = Matrix::from_rows(&[[2.0, 0.0], [0.0, 1.0]]).unwrap();
    /// for pair in decompose(&a).unwrap().iter() {
    ///     println!("λ = {}, v = {}", pair.value(), pair.vector());
    /// }
    /// ```
    pub fn iter(&self) -> std::slice::Iter<'_, Eigenpair> {
        self.pairs.iter()
    }

    /// Number of eigenpairs (the matrix dimension)
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if there are no eigenpairs
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Eigenvalues in order
    pub fn eigenvalues(&self) -> Vec<Complex64> {
        self.pairs.iter().map(Eigenpair::value).collect()
    }

    /// Eigenvalues as reals, or `None` if any of them is complex
    pub fn real_eigenvalues(&self) -> Option<Vec<f64>> {
        self.pairs
            .iter()
            .map(|p| p.as_real().map(|(value, _)| value))
            .collect()
    }

    /// Eigenvector `i`, or `None` if out of bounds
    pub fn eigenvector(&self, i: usize) -> Option<Vector<Complex64>> {
        self.pairs.get(i).map(Eigenpair::vector)
    }

    /// Eigenvector matrix `P` (columns are eigenvectors)
    ///
    /// # Errors
    ///
    /// `SizeMismatch` if an eigenvector length differs from the dimension.
    pub fn eigenvector_matrix(&self) -> Result<Matrix<Complex64>> {
        let columns: Vec<_> = self.pairs.iter().map(Eigenpair::vector).collect();
        Matrix::from_columns(&columns)
    }

    /// Real eigenvector matrix, or `None` if any eigenpair is complex
    pub fn real_eigenvector_matrix(&self) -> Option<Matrix<f64>> {
        let columns = self
            .pairs
            .iter()
            .map(|p| p.as_real().map(|(_, v)| v.clone()))
            .collect::<Option<Vec<_>>>()?;
        Matrix::from_columns(&columns).ok()
    }

    /// Diagonal matrix `D` of eigenvalues
    pub fn diagonal(&self) -> Matrix<Complex64> {
        Matrix::from_diagonal(&self.eigenvalues())
    }

    /// Sum of the eigenvalues (equals the trace of the input)
    pub fn eigenvalue_sum(&self) -> Complex64 {
        self.pairs.iter().map(Eigenpair::value).sum()
    }

    /// Product of the eigenvalues (equals the determinant of the input)
    pub fn eigenvalue_product(&self) -> Complex64 {
        self.pairs
            .iter()
            .map(Eigenpair::value)
            .fold(Complex64::new(1.0, 0.0), |acc, z| acc * z)
    }

    /// `|det(P)|`
    pub fn eigenvector_determinant(&self) -> f64 {
        self.eigenvector_matrix()
            .and_then(|p| p.determinant())
            .map(Scalar::modulus)
            .unwrap_or(0.0)
    }

    /// Returns true if `P` is invertible, i.e. `|det(P)|` exceeds the singularity tolerance
    pub fn is_diagonalizable(&self) -> bool {
        self.eigenvector_determinant() > self.singularity_tolerance
    }

    /// Solver that produced the eigenvalues
    pub fn method(&self) -> Method {
        self.method
    }

    /// QR iterations spent (zero for closed forms)
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Returns true if some eigenvalues were nearly repeated
    ///
    /// Eigenvectors of nearly repeated eigenvalues are poorly conditioned.
    pub fn is_near_degenerate(&self) -> bool {
        self.near_degenerate
    }

    /// Rebuild the input as `P·D·P⁻¹`
    ///
    /// Real spectra are rebuilt in real arithmetic. Otherwise the product is
    /// formed in complex arithmetic and the (round-off sized) imaginary part
    /// is dropped.
    ///
    /// # Errors
    ///
    /// `NonDiagonalizable` if `P` is singular.
    ///
    /// # Example
    ///
    /// ```
    /// use eigenbasis::{decompose, EigenError, Matrix};
    ///
    /// let jordan = Matrix::from_rows(&[[1.0, 1.0], [0.0, 1.0]]).unwrap();
    /// let eigen = decompose(&jordan).unwrap();
    /// assert!(matches!(
    ///     eigen.reconstruct(),
    ///     Err(EigenError::NonDiagonalizable { .. })
    /// ));
    /// ```
    pub fn reconstruct(&self) -> Result<Matrix<f64>> {
        self.require_diagonalizable()?;
        match (self.real_eigenvector_matrix(), self.real_eigenvalues()) {
            (Some(p), Some(values)) => similarity(&p, &values),
            _ => Ok(similarity(&self.eigenvector_matrix()?, &self.eigenvalues())?.re()),
        }
    }

    /// Rebuild the input as `P·D·P⁻¹` keeping the complex result
    ///
    /// # Errors
    ///
    /// `NonDiagonalizable` if `P` is singular.
    pub fn reconstruct_complex(&self) -> Result<Matrix<Complex64>> {
        self.require_diagonalizable()?;
        similarity(&self.eigenvector_matrix()?, &self.eigenvalues())
    }

    /// `Aⁿ` computed as `P·Dⁿ·P⁻¹`
    ///
    /// `n = 0` gives the identity. Negative `n` raises each eigenvalue to a
    /// negative power, giving powers of `A⁻¹`.
    ///
    /// # Errors
    ///
    /// - `NonDiagonalizable` if `P` is singular
    /// - `DivisionByZero` if `n < 0` and an eigenvalue is exactly zero
    ///
    /// # Example
    ///
    /// ```
    /// use eigenbasis::{decompose, Matrix};
    ///
    /// let a = Matrix::from_rows(&[[4.0, 2.0], [1.0, 3.0]]).unwrap();
    /// let cube = decompose(&a).unwrap().matrix_power(3).unwrap();
    /// let expected = a.powi_by_multiplication(3).unwrap();
    /// assert!(cube.approx_eq(&expected, 1e-9));
    /// ```
    pub fn matrix_power(&self, n: i32) -> Result<Matrix<f64>> {
        self.require_diagonalizable()?;

        if n < 0 && self.pairs.iter().any(|p| p.value() == Complex64::new(0.0, 0.0)) {
            return Err(EigenError::DivisionByZero);
        }
        if n == 0 {
            return Ok(Matrix::identity(self.len()));
        }

        match (self.real_eigenvector_matrix(), self.real_eigenvalues()) {
            (Some(p), Some(values)) => {
                let powered: Vec<f64> = values.iter().map(|v| v.powi(n)).collect();
                similarity(&p, &powered)
            }
            _ => {
                let powered: Vec<Complex64> =
                    self.eigenvalues().iter().map(|z| z.powi(n)).collect();
                Ok(similarity(&self.eigenvector_matrix()?, &powered)?.re())
            }
        }
    }

    fn require_diagonalizable(&self) -> Result<()> {
        let determinant = self.eigenvector_determinant();
        if determinant > self.singularity_tolerance {
            Ok(())
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!(determinant, "eigenvector matrix is singular");
            Err(EigenError::NonDiagonalizable { determinant })
        }
    }
}

impl<'a> IntoIterator for &'a Decomposition {
    type Item = &'a Eigenpair;
    type IntoIter = std::slice::Iter<'a, Eigenpair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

/// Eigendecomposition driver holding the tolerances to use
///
/// # Example
///
/// ```
/// use eigenbasis::{DecomposerConfig, EigenDecomposer, Matrix, Method, Strategy};
///
/// let decomposer = EigenDecomposer::with_config(
///     DecomposerConfig::strict().with_strategy(Strategy::Iterative),
/// );
/// let a = Matrix::from_rows(&[[4.0, 2.0], [1.0, 3.0]]).unwrap();
/// let eigen = decomposer.decompose(&a).unwrap();
/// assert_eq!(eigen.method(), Method::ShiftedQr);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EigenDecomposer {
    config: DecomposerConfig,
}

impl EigenDecomposer {
    /// Decomposer with default tolerances
    pub fn new() -> Self {
        Self::default()
    }

    /// Decomposer with explicit tolerances
    pub fn with_config(config: DecomposerConfig) -> Self {
        Self { config }
    }

    /// Tolerances in use
    pub fn config(&self) -> &DecomposerConfig {
        &self.config
    }

    /// Compute all eigenpairs of `matrix`
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the matrix is empty, not square, or has non-finite
    ///   entries, or if `Strategy::ClosedForm` is forced above 3×3
    /// - `NumericalFailure` if the QR iteration does not converge, or an
    ///   eigenvector cannot be made to satisfy `A·v ≈ λ·v`
    #[cfg_attr(
        feature = "tracing",
        instrument(skip(self, matrix), fields(n = matrix.rows()))
    )]
    pub fn decompose(&self, matrix: &Matrix<f64>) -> Result<Decomposition> {
        validate(matrix)?;
        let cfg = &self.config;

        let (method, roots) = self.solve(matrix)?;

        let scale = matrix.max_modulus().max(1.0);
        let rank_tol = cfg.rank_tolerance * scale;

        let mut sorted = roots.roots.clone();
        sorted.sort_by(|a, b| descending(a.value(), b.value()));
        let (clusters, merged) = cluster(&sorted, rank_tol);
        let near_degenerate = roots.near_degenerate || merged;

        let residual_tol = if near_degenerate {
            cfg.residual_tolerance
                .max(cfg.discriminant_tolerance.sqrt())
        } else {
            cfg.residual_tolerance
        };
        let check_tol = residual_tol * scale;

        let complex_matrix = matrix.to_complex();
        let mut pairs = Vec::with_capacity(sorted.len());

        for (root, multiplicity) in clusters {
            match root {
                Root::Real(lambda) => {
                    let basis = eigenspace(matrix, lambda, method, rank_tol, roots.iterations)?;
                    for v in fill(basis, multiplicity) {
                        let vector =
                            self_check(matrix, matrix, lambda, v, check_tol, roots.iterations)?;
                        pairs.push(Eigenpair::Real {
                            value: lambda,
                            vector,
                        });
                    }
                }
                Root::Complex(lambda) => {
                    // Lower half-plane eigenvectors are conjugates of the upper ones
                    let basis = if lambda.im >= 0.0 {
                        fill(
                            eigenspace(&complex_matrix, lambda, method, rank_tol, roots.iterations)?,
                            multiplicity,
                        )
                    } else {
                        fill(
                            eigenspace(
                                &complex_matrix,
                                lambda.conj(),
                                method,
                                rank_tol,
                                roots.iterations,
                            )?,
                            multiplicity,
                        )
                        .iter()
                        .map(Vector::conj)
                        .collect()
                    };
                    for v in basis {
                        let vector = self_check(
                            matrix,
                            &complex_matrix,
                            lambda,
                            v,
                            check_tol,
                            roots.iterations,
                        )?;
                        pairs.push(Eigenpair::Complex {
                            value: lambda,
                            vector,
                        });
                    }
                }
            }
        }

        pairs.sort_by(|a, b| descending(a.value(), b.value()));

        #[cfg(feature = "tracing")]
        tracing::debug!(
            ?method,
            near_degenerate,
            "decomposition complete"
        );

        Ok(Decomposition {
            pairs,
            method,
            near_degenerate,
            iterations: roots.iterations,
            singularity_tolerance: cfg.singularity_tolerance,
        })
    }

    /// Check one eigenpair against `matrix` with the configured residual tolerance
    pub fn verify(&self, matrix: &Matrix<f64>, pair: &Eigenpair) -> bool {
        let scale = matrix.max_modulus().max(1.0);
        pair.verify(matrix, self.config.residual_tolerance * scale)
    }

    fn solve(&self, matrix: &Matrix<f64>) -> Result<(Method, Roots)> {
        let cfg = &self.config;
        let n = matrix.rows();
        let a = matrix.as_slice();

        let method = match (cfg.strategy, n) {
            (Strategy::Iterative, _) => Method::ShiftedQr,
            (_, 1) => Method::Trivial,
            (_, 2) => Method::Quadratic,
            (_, 3) => Method::Cubic,
            (Strategy::ClosedForm, _) => {
                return Err(EigenError::InvalidInput(format!(
                    "Closed-form eigenvalues need a matrix of at most 3x3, got {}x{}",
                    n, n
                )))
            }
            (Strategy::Auto, _) => Method::ShiftedQr,
        };

        let roots = match method {
            Method::Trivial => Roots {
                roots: vec![Root::Real(a[0])],
                near_degenerate: false,
                iterations: 0,
            },
            Method::Quadratic => {
                poly::quadratic(a, cfg.discriminant_tolerance, cfg.degeneracy_tolerance)
            }
            Method::Cubic => poly::cubic(a, cfg.discriminant_tolerance, cfg.degeneracy_tolerance),
            Method::ShiftedQr => hessenberg::eigenvalues(
                a,
                n,
                cfg.max_iterations,
                cfg.discriminant_tolerance,
                cfg.degeneracy_tolerance,
            )?,
        };

        Ok((method, roots))
    }
}

/// Eigendecomposition with default tolerances
///
/// # Errors
///
/// See [`EigenDecomposer::decompose`].
pub fn decompose(matrix: &Matrix<f64>) -> Result<Decomposition> {
    EigenDecomposer::new().decompose(matrix)
}

/// Check `‖A·v − λ·v‖ / max(1, ‖v‖) ≤ tolerance`
///
/// Returns false when the shapes do not line up.
///
/// # Example
///
/// ```
/// use eigenbasis::{verify_eigenpair, Matrix, Vector};
///
/// let a = Matrix::from_rows(&[[4.0, 2.0], [1.0, 3.0]]).unwrap();
/// let v = Vector::from_slice(&[0.8944, 0.4472]);
/// assert!(verify_eigenpair(&a, 5.0, &v, 1e-4));
/// assert!(!verify_eigenpair(&a, 2.0, &v, 1e-4));
/// ```
pub fn verify_eigenpair<T: Scalar>(
    matrix: &Matrix<f64>,
    eigenvalue: impl Into<Complex64>,
    eigenvector: &Vector<T>,
    tolerance: f64,
) -> bool {
    if !matrix.is_square() || eigenvector.is_empty() || eigenvector.len() != matrix.cols() {
        return false;
    }

    let lambda = eigenvalue.into();
    let v = eigenvector.to_complex();
    let residual = match matrix
        .to_complex()
        .matvec(&v)
        .and_then(|av| av.sub(&v.scale(lambda)))
    {
        Ok(r) => r.norm(),
        Err(_) => return false,
    };

    residual / v.norm().max(1.0) <= tolerance
}

/// `P·D·P⁻¹` of a decomposition
///
/// # Errors
///
/// See [`Decomposition::reconstruct`].
pub fn reconstruct(decomposition: &Decomposition) -> Result<Matrix<f64>> {
    decomposition.reconstruct()
}

/// `P·Dⁿ·P⁻¹` of a decomposition
///
/// # Errors
///
/// See [`Decomposition::matrix_power`].
pub fn matrix_power(decomposition: &Decomposition, n: i32) -> Result<Matrix<f64>> {
    decomposition.matrix_power(n)
}

fn validate(matrix: &Matrix<f64>) -> Result<()> {
    if !matrix.is_square() {
        return Err(EigenError::InvalidInput(format!(
            "Matrix must be square for eigendecomposition, got {}x{}",
            matrix.rows(),
            matrix.cols()
        )));
    }

    if matrix.rows() == 0 {
        return Err(EigenError::InvalidInput(
            "Cannot compute eigendecomposition of empty matrix".to_string(),
        ));
    }

    if !matrix.is_finite() {
        return Err(EigenError::InvalidInput(
            "Matrix contains NaN or infinite entries".to_string(),
        ));
    }

    Ok(())
}

/// Real part descending, then imaginary part descending
fn descending(a: Complex64, b: Complex64) -> Ordering {
    b.re.partial_cmp(&a.re)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.im.partial_cmp(&a.im).unwrap_or(Ordering::Equal))
}

/// Group roots of the same kind lying within `tolerance` of each other
///
/// Returns each group's mean value and size, in order of first appearance,
/// and whether any group merged roots that were not exactly equal.
fn cluster(sorted: &[Root], tolerance: f64) -> (Vec<(Root, usize)>, bool) {
    let mut assigned = vec![false; sorted.len()];
    let mut clusters = Vec::new();
    let mut merged = false;

    for i in 0..sorted.len() {
        if assigned[i] {
            continue;
        }
        assigned[i] = true;
        let mut members = vec![sorted[i]];

        for j in (i + 1)..sorted.len() {
            if assigned[j] {
                continue;
            }
            let same_kind = matches!(
                (sorted[i], sorted[j]),
                (Root::Real(_), Root::Real(_)) | (Root::Complex(_), Root::Complex(_))
            );
            if same_kind && (sorted[i].value() - sorted[j].value()).norm() <= tolerance {
                assigned[j] = true;
                merged |= sorted[j].value() != sorted[i].value();
                members.push(sorted[j]);
            }
        }

        let k = members.len();
        let mean = members.iter().map(|r| r.value()).sum::<Complex64>() / k as f64;
        let root = match sorted[i] {
            Root::Real(_) => Root::Real(mean.re),
            Root::Complex(_) => Root::Complex(mean),
        };
        clusters.push((root, k));
    }

    (clusters, merged)
}

/// Orthonormal eigenvectors for `lambda`, falling back to inverse iteration
fn eigenspace<T: Scalar>(
    a: &Matrix<T>,
    lambda: T,
    method: Method,
    tolerance: f64,
    iterations: usize,
) -> Result<Vec<Vector<T>>> {
    let basis = if method == Method::Quadratic {
        nullspace::eigenvectors_2x2(a, lambda, tolerance)
    } else {
        nullspace::null_space(&a.shifted(lambda)?, tolerance)
    };

    if !basis.is_empty() {
        return Ok(basis);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!("empty null space, falling back to inverse iteration");

    nullspace::inverse_iteration(a, lambda, REFINEMENT_STEPS)
        .map(|v| vec![v])
        .map_err(|_| EigenError::NumericalFailure { iterations })
}

/// Exactly `multiplicity` phase-normalized vectors, repeating when the basis is short
fn fill<T: Scalar>(basis: Vec<Vector<T>>, multiplicity: usize) -> Vec<Vector<T>> {
    (0..multiplicity)
        .map(|i| normalize_phase(basis[i % basis.len()].clone()))
        .collect()
}

/// Accept `v` if it satisfies the eigen-relation, otherwise try to repair it once
fn self_check<T: Scalar>(
    matrix: &Matrix<f64>,
    a: &Matrix<T>,
    lambda: T,
    v: Vector<T>,
    tolerance: f64,
    iterations: usize,
) -> Result<Vector<T>> {
    if verify_eigenpair(matrix, lambda.to_complex(), &v, tolerance) {
        return Ok(v);
    }

    #[cfg(feature = "tracing")]
    tracing::warn!(%lambda, "eigenvector failed self-check, refining");

    let refined = nullspace::inverse_iteration(a, lambda, REFINEMENT_STEPS)
        .map(normalize_phase)
        .map_err(|_| EigenError::NumericalFailure { iterations })?;

    if verify_eigenpair(matrix, lambda.to_complex(), &refined, tolerance) {
        Ok(refined)
    } else {
        Err(EigenError::NumericalFailure { iterations })
    }
}

/// `P·diag(values)·P⁻¹`
fn similarity<T: Scalar>(p: &Matrix<T>, values: &[T]) -> Result<Matrix<T>> {
    let p_inv = p.inverse().map_err(|e| match e {
        EigenError::DivisionByZero => EigenError::NonDiagonalizable { determinant: 0.0 },
        other => other,
    })?;
    p.matmul(&Matrix::from_diagonal(values))?.matmul(&p_inv)
}
