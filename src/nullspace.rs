//! Eigenvector extraction once the eigenvalues are known
//!
//! For an eigenvalue λ the eigenvectors span the null space of `A − λI`.
//! General sizes use Gauss-Jordan elimination with full pivoting, treating
//! pivots at or below a tolerance as zero; the free columns of the reduced
//! form give a basis, which is then orthonormalized. 2×2 matrices read the
//! null vector straight off the dominant row of `A − λI`. When elimination
//! finds no null vector (λ slightly off), inverse iteration takes over.

use crate::{EigenError, Matrix, Result, Scalar, Vector};

/// Vectors whose norm drops below this during Gram-Schmidt are dependent
const DEPENDENCE_THRESHOLD: f64 = 1e-10;

/// Relative shift keeping `A − μI` invertible during inverse iteration
const INVERSE_ITERATION_OFFSET: f64 = 1e-10;

/// Orthonormal basis of the null space of a square matrix
///
/// `tolerance` is absolute: pivots with modulus at or below it are zero.
pub(crate) fn null_space<T: Scalar>(m: &Matrix<T>, tolerance: f64) -> Vec<Vector<T>> {
    let n = m.rows();
    debug_assert!(m.is_square());
    let mut a = m.as_slice().to_vec();
    let mut used = vec![false; n];
    let mut pivot_cols = Vec::with_capacity(n);

    for r in 0..n {
        // Full pivoting: largest remaining entry in an unused column
        let mut best = (r, 0, -1.0f64);
        for i in r..n {
            for j in (0..n).filter(|&j| !used[j]) {
                let modulus = a[i * n + j].modulus();
                if modulus > best.2 {
                    best = (i, j, modulus);
                }
            }
        }
        let (pr, pc, modulus) = best;
        if modulus <= tolerance {
            break;
        }

        if pr != r {
            for k in 0..n {
                a.swap(pr * n + k, r * n + k);
            }
        }

        let pivot = a[r * n + pc];
        for k in 0..n {
            a[r * n + k] = a[r * n + k] / pivot;
        }

        for i in (0..n).filter(|&i| i != r) {
            let factor = a[i * n + pc];
            if factor == T::zero() {
                continue;
            }
            for k in 0..n {
                a[i * n + k] = a[i * n + k] - factor * a[r * n + k];
            }
        }

        used[pc] = true;
        pivot_cols.push(pc);
    }

    let basis = (0..n)
        .filter(|&f| !used[f])
        .map(|free| {
            let mut v = vec![T::zero(); n];
            v[free] = T::one();
            for (row, &pc) in pivot_cols.iter().enumerate() {
                v[pc] = -a[row * n + free];
            }
            Vector::from_vec(v)
        })
        .collect();

    orthonormalize(basis)
}

/// Null vectors of `A − λI` for a 2×2 matrix
///
/// Returns both standard basis vectors when `A − λI` vanishes (A = λI),
/// otherwise the single vector orthogonal to its dominant row.
pub(crate) fn eigenvectors_2x2<T: Scalar>(
    m: &Matrix<T>,
    lambda: T,
    tolerance: f64,
) -> Vec<Vector<T>> {
    debug_assert_eq!(m.shape(), (2, 2));
    let a = m.as_slice();
    let (p, b, c, q) = (a[0] - lambda, a[1], a[2], a[3] - lambda);

    if [p, b, c, q].iter().all(|x| x.modulus() <= tolerance) {
        return vec![
            Vector::from_slice(&[T::one(), T::zero()]),
            Vector::from_slice(&[T::zero(), T::one()]),
        ];
    }

    let top = p.modulus().powi(2) + b.modulus().powi(2);
    let bottom = c.modulus().powi(2) + q.modulus().powi(2);
    let v = if top >= bottom {
        Vector::from_slice(&[b, -p])
    } else {
        Vector::from_slice(&[q, -c])
    };

    v.normalized().map(|v| vec![v]).unwrap_or_default()
}

/// Dominant eigenvector of `(A − μI)⁻¹` with μ just off `lambda`
///
/// # Errors
///
/// - `DivisionByZero` if the iterate collapses to zero
/// - `NumericalFailure` if no nearby shift gives an invertible matrix
pub(crate) fn inverse_iteration<T: Scalar>(
    m: &Matrix<T>,
    lambda: T,
    steps: usize,
) -> Result<Vector<T>> {
    let n = m.rows();
    let mut offset = INVERSE_ITERATION_OFFSET * lambda.modulus().max(1.0);

    let mut solver = None;
    for _ in 0..5 {
        match m.shifted(lambda + T::from_real(offset))?.inverse() {
            Ok(inv) => {
                solver = Some(inv);
                break;
            }
            Err(EigenError::DivisionByZero) => offset *= 10.0,
            Err(e) => return Err(e),
        }
    }
    let solver = solver.ok_or(EigenError::NumericalFailure { iterations: steps })?;

    // Deterministic start that is not orthogonal to any axis
    let mut x = Vector::from_vec(
        (0..n)
            .map(|i| T::from_real(1.0 + i as f64 / n as f64))
            .collect(),
    )
    .normalized()?;

    for _ in 0..steps {
        x = solver.matvec(&x)?.normalized()?;
    }

    Ok(x)
}

/// Modified Gram-Schmidt with re-orthogonalization, dropping dependent vectors
pub(crate) fn orthonormalize<T: Scalar>(vectors: Vec<Vector<T>>) -> Vec<Vector<T>> {
    let mut basis: Vec<Vector<T>> = Vec::with_capacity(vectors.len());

    for v in vectors {
        let original = v.norm();
        if original == 0.0 {
            continue;
        }
        let mut w = v;
        for _ in 0..2 {
            for u in &basis {
                let Ok(proj) = u.dot(&w) else { continue };
                if let Ok(next) = w.sub(&u.scale(proj)) {
                    w = next;
                }
            }
        }
        if w.norm() <= DEPENDENCE_THRESHOLD * original {
            continue;
        }
        if let Ok(unit) = w.normalized() {
            basis.push(unit);
        }
    }

    basis
}

/// Rotate `v` so its largest-modulus entry (first on ties) is real and positive
pub(crate) fn normalize_phase<T: Scalar>(v: Vector<T>) -> Vector<T> {
    let mut best: Option<T> = None;
    let mut best_mod = 0.0;
    for &x in v.iter() {
        let modulus = x.modulus();
        if modulus > best_mod {
            best = Some(x);
            best_mod = modulus;
        }
    }

    match best {
        Some(x) => v.scale(x.conjugate() * T::from_real(1.0 / best_mod)),
        None => v,
    }
}
