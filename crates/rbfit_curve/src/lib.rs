//! # RBFit Curve
//!
//! Bounded nonlinear least squares and the randomized-benchmarking decay
//! model `A·alpha^m + B`.
//!
//! ## Gantree Architecture
//!
//! ```text
//! rbfit_curve // L2: Curve fitting (완료)
//!     Model // 모델 + 감쇠 모델 (완료)
//!     FitOptions // 허용오차/경계 (완료)
//!     Convergence // 수렴 판단 (완료)
//!     Solver // 투영 LM (완료)
//!     SeedStatistics // 시드 통계 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use rbfit_curve::prelude::*;
//!
//! let lengths: Vec<f64> = (0..10).map(|i| (1 + 20 * i) as f64).collect();
//! let truth = DecayParams::new(0.5, 0.98, 0.5);
//! let survival = DecayModel.curve(&lengths, &truth);
//!
//! let fit = curve_fit(
//!     &DecayModel,
//!     &lengths,
//!     &survival,
//!     None,
//!     &[0.45, 0.99, 0.5],
//!     &FitOptions::default(),
//! )
//! .unwrap();
//!
//! assert!((fit.params[1] - 0.98).abs() < 1e-6);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Curve models (Gantree: L2_Curve → Model)
pub mod model;

/// Fit options (Gantree: L2_Curve → FitOptions)
pub mod options;

/// Convergence criteria (Gantree: L2_Curve → Convergence)
pub mod convergence;

/// Least-squares solver (Gantree: L2_Curve → Solver)
pub mod solver;

/// Seed-axis statistics (Gantree: L2_Curve → SeedStatistics)
pub mod stats;

// ============================================================================
// Re-exports
// ============================================================================

pub use convergence::{Convergence, Termination};
pub use model::{CurveModel, DecayModel, DecayParams};
pub use options::{Bounds, FitOptions};
pub use solver::{curve_fit, CurveFit};
pub use stats::{column_mean, column_std, usable_as_sigma};

// ============================================================================
// Prelude
// ============================================================================

/// Convenient imports for common use cases
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use rbfit_curve::prelude::*;
    //! ```

    pub use crate::convergence::Termination;
    pub use crate::model::{CurveModel, DecayModel, DecayParams};
    pub use crate::options::{Bounds, FitOptions};
    pub use crate::solver::{curve_fit, CurveFit};
    pub use crate::stats::{column_mean, column_std, usable_as_sigma};
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================
