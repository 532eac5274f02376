//! Decomposer Configuration
//!
//! Every numeric comparison made by the decomposer is driven by an explicit
//! tolerance held here, so callers can tighten or loosen them per problem.
//!
//! # Examples
//!
//! ```
//! use eigenbasis::config::{DecomposerConfig, Strategy};
//!
//! // Tight tolerances for well-conditioned inputs
//! let strict = DecomposerConfig::strict();
//!
//! // Loose tolerances for noisy inputs
//! let relaxed = DecomposerConfig::relaxed();
//!
//! // Custom configuration using builder pattern
//! let custom = DecomposerConfig::new()
//!     .with_residual_tolerance(1e-6)
//!     .with_singularity_tolerance(1e-9)
//!     .with_max_iterations(100)
//!     .with_strategy(Strategy::Iterative)
//!     .build();
//! ```

/// Which eigenvalue solver to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Closed form for N ≤ 3, shifted QR above
    #[default]
    Auto,
    /// Quadratic/cubic formula only (N ≤ 3)
    ClosedForm,
    /// Hessenberg reduction + shifted QR for every N
    Iterative,
}

/// Tolerances and limits for [`EigenDecomposer`](crate::EigenDecomposer)
///
/// Tolerances are relative to `max(1, max|aᵢⱼ|)` unless stated otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecomposerConfig {
    /// Bound on `‖A·v − λ·v‖` accepted by the eigenpair self-check
    pub residual_tolerance: f64,
    /// `|det(P)|` at or below this means P is singular (absolute)
    pub singularity_tolerance: f64,
    /// Pivots at or below this count as zero during null-space extraction
    pub rank_tolerance: f64,
    /// Discriminants at or below this are snapped to repeated real roots
    pub discriminant_tolerance: f64,
    /// Discriminants (or eigenvalue gaps) at or below this flag the result near-degenerate
    pub degeneracy_tolerance: f64,
    /// QR iterations allowed per eigenvalue before giving up
    pub max_iterations: usize,
    /// Solver selection
    pub strategy: Strategy,
}

impl Default for DecomposerConfig {
    fn default() -> Self {
        Self {
            residual_tolerance: 1e-8,
            singularity_tolerance: 1e-10,
            rank_tolerance: 1e-8,
            discriminant_tolerance: 1e-14,
            degeneracy_tolerance: 1e-8,
            max_iterations: 60,
            strategy: Strategy::Auto,
        }
    }
}

/// Non-finite or non-positive tolerances collapse to machine epsilon
fn sanitize(tol: f64) -> f64 {
    if tol.is_finite() && tol > 0.0 {
        tol
    } else {
        f64::EPSILON
    }
}

impl DecomposerConfig {
    /// Create a configuration with default tolerances
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the eigenpair residual tolerance
    ///
    /// # Examples
    ///
    /// ```
    /// use eigenbasis::config::DecomposerConfig;
    ///
    /// let config = DecomposerConfig::new().with_residual_tolerance(1e-6);
    /// assert_eq!(config.residual_tolerance, 1e-6);
    ///
    /// // Invalid values collapse to machine epsilon
    /// let clamped = DecomposerConfig::new().with_residual_tolerance(-1.0);
    /// assert_eq!(clamped.residual_tolerance, f64::EPSILON);
    /// ```
    pub fn with_residual_tolerance(mut self, tol: f64) -> Self {
        self.residual_tolerance = sanitize(tol);
        self
    }

    /// Set the eigenvector-matrix singularity tolerance
    pub fn with_singularity_tolerance(mut self, tol: f64) -> Self {
        self.singularity_tolerance = sanitize(tol);
        self
    }

    /// Set the null-space rank tolerance
    pub fn with_rank_tolerance(mut self, tol: f64) -> Self {
        self.rank_tolerance = sanitize(tol);
        self
    }

    /// Set the repeated-root discriminant tolerance
    pub fn with_discriminant_tolerance(mut self, tol: f64) -> Self {
        self.discriminant_tolerance = sanitize(tol);
        self
    }

    /// Set the near-degeneracy flagging tolerance
    pub fn with_degeneracy_tolerance(mut self, tol: f64) -> Self {
        self.degeneracy_tolerance = sanitize(tol);
        self
    }

    /// Set the per-eigenvalue QR iteration cap (at least 1)
    ///
    /// # Examples
    ///
    /// ```
    /// use eigenbasis::config::DecomposerConfig;
    ///
    /// let config = DecomposerConfig::new().with_max_iterations(0);
    /// assert_eq!(config.max_iterations, 1);
    /// ```
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations.max(1);
        self
    }

    /// Set the solver strategy
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Finalize configuration (no-op, for builder pattern consistency)
    pub fn build(self) -> Self {
        self
    }

    /// Strict preset
    ///
    /// - 1e-12 residual tolerance
    /// - 1e-12 singularity tolerance
    /// - 1e-10 rank tolerance
    /// - 1e-15 discriminant tolerance
    /// - 1e-10 degeneracy tolerance
    ///
    /// # Examples
    ///
    /// ```
    /// use eigenbasis::config::DecomposerConfig;
    ///
    /// let config = DecomposerConfig::strict();
    /// assert_eq!(config.residual_tolerance, 1e-12);
    /// assert_eq!(config.max_iterations, 60);
    /// ```
    pub fn strict() -> Self {
        Self::new()
            .with_residual_tolerance(1e-12)
            .with_singularity_tolerance(1e-12)
            .with_rank_tolerance(1e-10)
            .with_discriminant_tolerance(1e-15)
            .with_degeneracy_tolerance(1e-10)
    }

    /// Relaxed preset
    ///
    /// - 1e-6 residual tolerance
    /// - 1e-8 singularity tolerance
    /// - 1e-6 rank tolerance
    /// - 1e-10 discriminant tolerance
    /// - 1e-6 degeneracy tolerance
    /// - 120 iterations per eigenvalue
    pub fn relaxed() -> Self {
        Self::new()
            .with_residual_tolerance(1e-6)
            .with_singularity_tolerance(1e-8)
            .with_rank_tolerance(1e-6)
            .with_discriminant_tolerance(1e-10)
            .with_degeneracy_tolerance(1e-6)
            .with_max_iterations(120)
    }
}
