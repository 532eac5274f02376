//! Falsification Tests
//!
//! Each test states one claim about the decomposer and tries to break it.
//!
//! Section A: Eigen-relation and normalization
//! Section B: Determinism and ordering
//! Section C: Algebraic invariants
//! Section D: Solver agreement

use eigenbasis::{
    decompose, verify_eigenpair, Complex64, DecomposerConfig, EigenDecomposer, Eigenpair, Matrix,
    Method,
};
use proptest::prelude::*;

fn random_matrix(n: usize) -> impl Strategy<Value = Matrix<f64>> {
    prop::collection::vec(-10.0f64..10.0, n * n)
        .prop_map(move |data| Matrix::from_vec(n, n, data).expect("valid matrix"))
}

fn iterative() -> EigenDecomposer {
    EigenDecomposer::with_config(
        DecomposerConfig::new().with_strategy(eigenbasis::Strategy::Iterative),
    )
}

// =============================================================================
// SECTION A: Eigen-relation and normalization
// =============================================================================

/// Verification of a returned pair never flips to false on re-check
#[test]
fn test_verification_is_idempotent() {
    let a = Matrix::from_rows(&[[1.0, 2.0, 0.0], [0.0, 3.0, 1.0], [4.0, 0.0, -2.0]])
        .expect("square");
    let eigen = decompose(&a).expect("decompose failed");

    for pair in eigen.iter() {
        let first = pair.verify(&a, 1e-8);
        for _ in 0..100 {
            assert_eq!(pair.verify(&a, 1e-8), first);
        }
        assert!(first, "FALSIFIED: λ = {} fails its own check", pair.value());
    }
}

/// Eigenvector phase is fixed: largest entry real and positive
#[test]
fn test_eigenvector_phase_convention() {
    let a = Matrix::from_rows(&[
        [0.0, 1.0, 0.0, 0.0],
        [-4.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, -3.0, 1.0],
        [0.0, 0.0, 0.0, 2.0],
    ])
    .expect("square");
    let eigen = decompose(&a).expect("decompose failed");

    for pair in eigen.iter() {
        let v = pair.vector();
        let biggest = v
            .iter()
            .copied()
            .fold(Complex64::new(0.0, 0.0), |best, z| {
                if z.norm() > best.norm() {
                    z
                } else {
                    best
                }
            });
        assert!(biggest.re > 0.0, "FALSIFIED: {} has non-positive lead", v);
        assert!(biggest.im.abs() < 1e-12, "FALSIFIED: {} lead not real", v);
    }
}

/// Real eigenvalues come with real eigenvectors, complex ones with complex
#[test]
fn test_pair_kinds_match() {
    let a = Matrix::from_rows(&[[1.0, -5.0, 0.0], [5.0, 1.0, 0.0], [0.0, 0.0, 2.0]])
        .expect("square");
    let eigen = decompose(&a).expect("decompose failed");

    let kinds: Vec<bool> = eigen.iter().map(Eigenpair::is_real).collect();
    assert_eq!(kinds, vec![true, false, false]);
    assert_eq!(eigen.pairs()[0].imag(), 0.0);
    assert!((eigen.pairs()[1].imag() - 5.0).abs() < 1e-10);
    assert!((eigen.pairs()[2].imag() + 5.0).abs() < 1e-10);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// ‖v‖ = 1 for every returned eigenvector
    #[test]
    fn prop_unit_norm(a in (1usize..6).prop_flat_map(random_matrix)) {
        let eigen = decompose(&a).expect("decompose should succeed");
        for pair in eigen.iter() {
            prop_assert!((pair.vector().norm() - 1.0).abs() < 1e-9);
        }
    }

    /// verify_eigenpair accepts every pair decompose returns
    #[test]
    fn prop_returned_pairs_verify(a in random_matrix(3)) {
        let eigen = decompose(&a).expect("decompose failed");
        let tol = 1e-6 * a.max_modulus().max(1.0);
        for pair in eigen.iter() {
            prop_assert!(verify_eigenpair(&a, pair.value(), &pair.vector(), tol));
        }
    }
}

// =============================================================================
// SECTION B: Determinism and ordering
// =============================================================================

/// Identical input yields bit-identical output
#[test]
fn test_bit_exact_repeat() {
    let a = Matrix::from_rows(&[
        [3.0, 1.0, 4.0, 1.0, 5.0],
        [9.0, 2.0, 6.0, 5.0, 3.0],
        [5.0, 8.0, 9.0, 7.0, 9.0],
        [3.0, 2.0, 3.0, 8.0, 4.0],
        [6.0, 2.0, 6.0, 4.0, 3.0],
    ])
    .expect("square");

    let first = decompose(&a).expect("decompose failed");
    for _ in 0..50 {
        let again = decompose(&a).expect("decompose failed");
        for (x, y) in first.eigenvalues().iter().zip(again.eigenvalues()) {
            assert_eq!(x.re.to_bits(), y.re.to_bits());
            assert_eq!(x.im.to_bits(), y.im.to_bits());
        }
        assert_eq!(first, again);
    }
}

/// Conjugate pairs appear upper half-plane first
#[test]
fn test_conjugate_pair_order() {
    let a = Matrix::from_rows(&[[0.0, -1.0], [1.0, 0.0]]).expect("square");
    let eigen = decompose(&a).expect("decompose failed");
    let values = eigen.eigenvalues();
    assert!(values[0].im > 0.0);
    assert_eq!(values[1], values[0].conj());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Eigenvalues are sorted by real part, then imaginary part, descending
    #[test]
    fn prop_descending_order(a in (2usize..7).prop_flat_map(random_matrix)) {
        let eigen = decompose(&a).expect("decompose should succeed");
        for w in eigen.eigenvalues().windows(2) {
            prop_assert!(
                w[0].re > w[1].re || (w[0].re == w[1].re && w[0].im >= w[1].im),
                "{} before {}", w[0], w[1]
            );
        }
    }
}

// =============================================================================
// SECTION C: Algebraic invariants
// =============================================================================

/// Aⁿ·A⁻ⁿ = I
#[test]
fn test_negative_power_inverts_positive_power() {
    let a = Matrix::from_rows(&[[2.0, 1.0, 0.0], [1.0, 3.0, 1.0], [0.0, 1.0, 4.0]])
        .expect("square");
    let eigen = decompose(&a).expect("decompose failed");

    let forward = eigen.matrix_power(3).expect("diagonalizable");
    let backward = eigen.matrix_power(-3).expect("invertible");
    let product = forward.matmul(&backward).expect("square");
    assert!(product.approx_eq(&Matrix::identity(3), 1e-9));
}

/// A and Aᵀ share eigenvalues
#[test]
fn test_transpose_shares_spectrum() {
    let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 10.0]])
        .expect("square");
    let ours = decompose(&a).expect("decompose failed").eigenvalues();
    let theirs = decompose(&a.transpose())
        .expect("decompose failed")
        .eigenvalues();
    for (x, y) in ours.iter().zip(theirs) {
        assert!((x - y).norm() < 1e-9, "FALSIFIED: {} vs {}", x, y);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Eigenvalues of c·A are c times the eigenvalues of A
    #[test]
    fn prop_scaling(a in random_matrix(3), c in 0.5f64..4.0) {
        let base = decompose(&a).expect("decompose failed").eigenvalues();
        let scaled = decompose(&a.scale(c)).expect("decompose failed").eigenvalues();
        let tol = 1e-7 * c * a.max_modulus().max(1.0);
        for (x, y) in base.iter().zip(scaled) {
            prop_assert!((x * c - y).norm() < tol, "{} · {} vs {}", x, c, y);
        }
    }

    /// Shifting A by s·I shifts every eigenvalue by s
    #[test]
    fn prop_shift(a in random_matrix(4), s in -5.0f64..5.0) {
        let base = decompose(&a).expect("decompose should succeed");
        let shifted = decompose(&a.shifted(-s).expect("square")).expect("decompose should succeed");
        let tol = 1e-7 * (a.max_modulus() + s.abs()).max(1.0);
        for (x, y) in base.eigenvalues().iter().zip(shifted.eigenvalues()) {
            prop_assert!((x + s - y).norm() < tol, "{} + {} vs {}", x, s, y);
        }
    }
}

// =============================================================================
// SECTION D: Solver agreement
// =============================================================================

/// Closed form and shifted QR agree on 2×2 and 3×3 inputs
#[test]
fn test_rotation_solvers_agree() {
    let a = Matrix::from_rows(&[[0.0, -1.0], [1.0, 0.0]]).expect("square");
    let closed = decompose(&a).expect("decompose failed");
    let qr = iterative().decompose(&a).expect("decompose failed");

    assert_eq!(closed.method(), Method::Quadratic);
    assert_eq!(qr.method(), Method::ShiftedQr);
    for (x, y) in closed.eigenvalues().iter().zip(qr.eigenvalues()) {
        assert!((x - y).norm() < 1e-12);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_closed_form_matches_qr(a in (2usize..4).prop_flat_map(random_matrix)) {
        let closed = decompose(&a).expect("decompose failed");
        prop_assume!(!closed.is_near_degenerate());
        let qr = iterative().decompose(&a).expect("decompose failed");
        let tol = 1e-7 * a.max_modulus().max(1.0);
        for (x, y) in closed.eigenvalues().iter().zip(qr.eigenvalues()) {
            prop_assert!((x - y).norm() < tol, "{} vs {}", x, y);
        }
    }
}
