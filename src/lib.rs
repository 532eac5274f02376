//! Eigenbasis: eigendecomposition and diagonalization of small dense matrices
//!
//! **Eigenbasis** computes the eigenvalues and unit eigenvectors of a real
//! square matrix and uses the factorization `A = P·D·P⁻¹` to:
//!
//! 1. **Verify** every eigenpair against `‖A·v − λ·v‖`
//! 2. **Reconstruct** the input from its eigenbasis
//! 3. **Raise** the input to integer powers by powering the eigenvalues
//!
//! # Design Principles
//!
//! - **Explicit tolerances**: every numeric comparison reads a field of
//!   [`DecomposerConfig`], nothing hides behind a global epsilon
//! - **Explicit complex results**: real eigenvalues come back as
//!   [`Eigenpair::Real`], conjugate pairs as [`Eigenpair::Complex`]
//! - **Deterministic**: eigenvalues are ordered by real part, then imaginary
//!   part, both descending, and eigenvector phases are fixed
//! - **Pure**: no I/O, no shared state, every type is `Send + Sync`
//!
//! # Quick Start
//!
//! ```rust
//! use eigenbasis::{decompose, verify_eigenpair, Matrix};
//!
//! let a = Matrix::from_rows(&[[4.0, 2.0], [1.0, 3.0]]).unwrap();
//! let eigen = decompose(&a).unwrap();
//!
//! assert_eq!(eigen.real_eigenvalues().unwrap(), vec![5.0, 2.0]);
//! for pair in eigen.iter() {
//!     assert!(verify_eigenpair(&a, pair.value(), &pair.vector(), 1e-10));
//! }
//!
//! // A³ without two matrix multiplications
//! let cube = eigen.matrix_power(3).unwrap();
//! assert!(cube.approx_eq(&a.powi_by_multiplication(3).unwrap(), 1e-9));
//! ```
//!
//! # Feature Flags
//!
//! - `tracing`: emit spans and events for the solver stages via `tracing`

pub mod config;
pub mod eigen;
pub mod error;
mod hessenberg;
pub mod matrix;
mod nullspace;
mod poly;
pub mod scalar;
pub mod vector;

pub use config::{DecomposerConfig, Strategy};
pub use eigen::{
    decompose, matrix_power, reconstruct, verify_eigenpair, Decomposition, EigenDecomposer,
    Eigenpair, Method,
};
pub use error::{EigenError, Result};
pub use matrix::Matrix;
pub use num_complex::Complex64;
pub use scalar::Scalar;
pub use vector::Vector;
