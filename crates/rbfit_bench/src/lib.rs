//! # RBFit Bench
//!
//! Synthetic RB data, plot series export and fit reports.
//!
//! ## Gantree Architecture
//!
//! ```text
//! rbfit_bench // L4: Bench (완료)
//!     SyntheticRb // 합성 실행 결과 (완료)
//!         generate(seeds) -> Vec<ExperimentResult>
//!     PlotData // 플롯 시리즈 (완료)
//!         from_fitter / from_interleaved
//!     RbSummary // 결과 요약 (완료)
//!     Reporter // Markdown / JSON / CSV / Text (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use rbfit_bench::prelude::*;
//!
//! let lengths = vec![1, 10, 20, 50, 100, 150];
//! let gen = SyntheticRb::single_qubit(lengths.clone(), DecayParams::new(0.5, 0.98, 0.5))
//!     .unwrap()
//!     .with_shots(2000);
//!
//! let fitter = RbFitter::with_lengths(gen.generate(0..4).unwrap(), lengths).unwrap();
//!
//! let report = Reporter::to_markdown(&RbSummary::from_fitter(&fitter));
//! println!("{}", report);
//! ```
//!
//! ## Plot Export
//!
//! ```rust
//! use rbfit_bench::prelude::*;
//!
//! let lengths = vec![1, 10, 20, 50, 100];
//! let gen = SyntheticRb::single_qubit(lengths.clone(), DecayParams::new(0.5, 0.97, 0.5))
//!     .unwrap();
//! let fitter = RbFitter::with_lengths(gen.generate(0..3).unwrap(), lengths).unwrap();
//!
//! let plot = PlotData::from_fitter(&fitter, 0).unwrap();
//! assert_eq!(plot.series_of(SeriesKind::Scatter).count(), 3);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Synthetic data (Gantree: L4_Bench → Generators)
pub mod generators;

/// Plot series (Gantree: L4_Bench → PlotData)
pub mod plot;

/// Summaries (Gantree: L4_Bench → RbSummary)
pub mod summary;

/// Reporting (Gantree: L4_Bench → Reporter)
pub mod reporter;

// ============================================================================
// Re-exports
// ============================================================================

pub use generators::SyntheticRb;
pub use plot::{PlotData, Series, SeriesKind};
pub use reporter::{ReportFormat, Reporter};
pub use summary::{PatternSummary, RbSummary, SummaryStatistics};

// ============================================================================
// Prelude
// ============================================================================

// Convenient imports below
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use rbfit_bench::prelude::*;
    //! ```

    pub use crate::generators::SyntheticRb;
    pub use crate::plot::{PlotData, Series, SeriesKind};
    pub use crate::reporter::{ReportFormat, Reporter};
    pub use crate::summary::{PatternSummary, RbSummary, SummaryStatistics};
    pub use rbfit_fitters::prelude::*;
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================
