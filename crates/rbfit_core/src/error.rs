//! Error types for RBFit
//!
//! Gantree: L0_Foundation → Errors
//!
//! Every fallible operation in the workspace returns [`RbResult`].

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use thiserror::Error;

/// Main error type for RBFit
/// Gantree: RbError // enum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RbError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// A result batch disagrees with the declared length sequence
    /// Gantree: ConfigurationMismatch{{circuits,lengths}} // 길이 불일치
    #[error(
        "The number of clifford lengths must match the number of results: \
         result has {circuits} circuits, expected {lengths}"
    )]
    ConfigurationMismatch { circuits: usize, lengths: usize },

    /// Invalid fitter or fit configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Result / Counts Errors
    // ========================================================================
    /// Circuit name does not follow `<type>_length_<k>_seed_<seed>`
    #[error("Invalid circuit name '{0}'")]
    InvalidCircuitName(String),

    /// Circuit not present in a result
    #[error("No counts for circuit '{0}'")]
    MissingCircuit(String),

    /// Invalid bitstring format
    #[error("Invalid bitstring '{0}': must contain only '0' and '1'")]
    InvalidBitstring(String),

    /// Qubit index beyond the width of a count key
    /// Gantree: QubitOutOfRange{{q,max}} // 큐비트 범위
    #[error("Qubit {qubit} out of range: bitstring has {width} bits")]
    QubitOutOfRange { qubit: usize, width: usize },

    /// Probability value out of range [0, 1]
    #[error("Invalid probability {0}: must be in range [0, 1]")]
    InvalidProbability(f64),

    /// No execution results have been added yet
    #[error("No results to analyse")]
    NoResults,

    // ========================================================================
    // Fit Errors
    // ========================================================================
    /// Not enough data points for the requested operation
    #[error("Insufficient data: need at least {needed} points, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Initial guess outside the parameter bounds
    #[error("Initial guess is infeasible: parameter {index} = {value} outside [{lower}, {upper}]")]
    InfeasibleGuess {
        index: usize,
        value: f64,
        lower: f64,
        upper: f64,
    },

    /// Residuals are NaN or infinite
    /// Gantree: NonFiniteResiduals // 비유한 잔차
    #[error("Residuals are not finite at iteration {iteration}")]
    NonFiniteResiduals { iteration: usize },

    /// Optimizer did not converge
    /// Gantree: ConvergenceFailed{{iters}} // 수렴 실패
    #[error("Fit did not converge after {iterations} iterations")]
    ConvergenceFailed { iterations: usize },

    /// Covariance matrix could not be computed
    #[error("Singular covariance: {0}")]
    SingularCovariance(String),

    /// A pattern has not been fitted yet
    #[error("No fit available for pattern {0}")]
    MissingFit(usize),

    /// Pattern index out of range
    #[error("Pattern {index} out of range: {count} patterns configured")]
    PatternOutOfRange { index: usize, count: usize },

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// File I/O error
    #[error("File error: {0}")]
    FileError(String),
}

/// Result type alias for RBFit operations
/// Gantree: RbResult<T> // type alias
pub type RbResult<T> = Result<T, RbError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for RbError {
    fn from(err: serde_json::Error) -> Self {
        RbError::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for RbError {
    fn from(err: std::io::Error) -> Self {
        RbError::FileError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl RbError {
    /// Check if error originates from the optimizer
    pub fn is_fit_error(&self) -> bool {
        matches!(
            self,
            RbError::InsufficientData { .. }
                | RbError::InfeasibleGuess { .. }
                | RbError::NonFiniteResiduals { .. }
                | RbError::ConvergenceFailed { .. }
                | RbError::SingularCovariance(_)
        )
    }

    /// Check if error is caused by inconsistent inputs or configuration
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            RbError::ConfigurationMismatch { .. }
                | RbError::InvalidConfig(_)
                | RbError::InvalidCircuitName(_)
                | RbError::PatternOutOfRange { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
