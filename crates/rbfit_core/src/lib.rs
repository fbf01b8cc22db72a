//! # RBFit Core
//!
//! Core types, counts utilities, and execution results for randomized
//! benchmarking analysis.
//!
//! ## Gantree Architecture
//!
//! ```text
//! rbfit_core // L0+L1: Foundation + Results (완료)
//!     L0_Foundation // 기반 타입/상수/에러 (완료)
//!         CoreTypes // 핵심 타입 (완료)
//!         Constants // 피팅/이름 상수 (완료)
//!         Errors // 에러 타입 (완료)
//!     L1_Results // 실행 결과 (완료)
//!         CountsUtils // 병합/주변화 (완료)
//!         Pattern // 큐비트 패턴 (완료)
//!         CircuitName // 회로 이름 규약 (완료)
//!         ExperimentResult // 결과 컨테이너 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use rbfit_core::prelude::*;
//!
//! let mut result = ExperimentResult::default();
//! let mut counts = Counts::new();
//! counts.insert("00".to_string(), 900);
//! counts.insert("01".to_string(), 124);
//! result.push(CircuitName::new("rb", 0, 0).to_string(), counts);
//!
//! let merged = merge_counts([result.get_counts("rb_length_0_seed_0").unwrap()]);
//! let zeros = zero_count(&merged, &[0, 1]).unwrap();
//! assert_eq!(zeros, 900);
//! ```
//!
//! ## Parallel Patterns
//!
//! ```rust
//! use rbfit_core::prelude::*;
//!
//! // qubits 0,1 benchmarked together, qubit 2 on its own
//! let pattern = RbPattern::new(vec![vec![0, 1], vec![2]]);
//! assert_eq!(pattern.bit_range(1), 2..3);
//! assert_eq!(pattern.nrb(0), 4.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types (Gantree: L0_Foundation → CoreTypes)
pub mod types;

/// Constants (Gantree: L0_Foundation → Constants)
pub mod constants;

/// Error types (Gantree: L0_Foundation → Errors)
pub mod error;

/// Counts merge / marginalization (Gantree: L1_Results → CountsUtils)
pub mod counts;

/// Qubit patterns (Gantree: L1_Results → Pattern)
pub mod pattern;

/// Circuit naming contract (Gantree: L1_Results → CircuitName)
pub mod naming;

/// Execution results (Gantree: L1_Results → ExperimentResult)
pub mod result;

// ============================================================================
// Re-exports
// ============================================================================

pub use constants::{fit, naming as names};
pub use counts::{marginalize, merge_counts, total_shots, zero_count};
pub use error::{RbError, RbResult};
pub use naming::CircuitName;
pub use pattern::RbPattern;
pub use result::{CircuitResult, ExperimentResult, IntoResultBatch};
pub use types::{Bitstring, CliffordLength, Counts, Probability, QubitId, SeedId};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use rbfit_core::prelude::*;
    //! ```

    pub use crate::constants::{fit, naming as names};
    pub use crate::counts::{marginalize, merge_counts, total_shots, zero_count};
    pub use crate::error::{RbError, RbResult};
    pub use crate::naming::CircuitName;
    pub use crate::pattern::RbPattern;
    pub use crate::result::{CircuitResult, ExperimentResult, IntoResultBatch};
    pub use crate::types::{
        Bitstring, CliffordLength, Counts, Probability, QubitId, SeedId,
    };
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================
