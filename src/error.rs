//! Error types for eigenbasis operations

use thiserror::Error;

/// Result type for eigenbasis operations
pub type Result<T> = std::result::Result<T, EigenError>;

/// Errors that can occur during decomposition, reconstruction and powers
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EigenError {
    /// Invalid input (non-square, empty or non-finite matrix)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Size mismatch between operands
    #[error("Size mismatch: expected {expected}, got {actual}")]
    SizeMismatch {
        /// Expected size
        expected: usize,
        /// Actual size
        actual: usize,
    },

    /// Eigenvalue iteration did not converge
    #[error("Eigenvalue iteration failed to converge after {iterations} iterations")]
    NumericalFailure {
        /// Iterations spent before giving up
        iterations: usize,
    },

    /// Eigenvector matrix is singular, so `P × D × P⁻¹` does not exist
    #[error("Matrix is not diagonalizable: |det(P)| = {determinant:e}")]
    NonDiagonalizable {
        /// Magnitude of the eigenvector matrix determinant
        determinant: f64,
    },

    /// Division by zero (negative power of a zero eigenvalue, zero-vector normalization)
    #[error("Division by zero")]
    DivisionByZero,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_error() {
        let err = EigenError::InvalidInput("Matrix must be square".to_string());
        assert_eq!(err.to_string(), "Invalid input: Matrix must be square");
    }

    #[test]
    fn test_size_mismatch_error() {
        let err = EigenError::SizeMismatch {
            expected: 3,
            actual: 2,
        };
        assert_eq!(err.to_string(), "Size mismatch: expected 3, got 2");
    }

    #[test]
    fn test_numerical_failure_error() {
        let err = EigenError::NumericalFailure { iterations: 120 };
        assert_eq!(
            err.to_string(),
            "Eigenvalue iteration failed to converge after 120 iterations"
        );
    }

    #[test]
    fn test_non_diagonalizable_error() {
        let err = EigenError::NonDiagonalizable { determinant: 0.0 };
        assert!(err.to_string().starts_with("Matrix is not diagonalizable"));
    }

    #[test]
    fn test_division_by_zero_error() {
        let err = EigenError::DivisionByZero;
        assert_eq!(err.to_string(), "Division by zero");
    }

    #[test]
    fn test_error_equality() {
        let err1 = EigenError::NumericalFailure { iterations: 7 };
        let err2 = EigenError::NumericalFailure { iterations: 7 };
        assert_eq!(err1, err2);
        assert_ne!(err1, EigenError::DivisionByZero);
    }
}
