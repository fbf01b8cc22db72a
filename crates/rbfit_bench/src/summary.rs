//! Fit summaries for reporting
//!
//! Gantree: L4_Bench → RbSummary
//!
//! Flattens a fitter's per-pattern results into serializable rows.

use rbfit_core::QubitId;
use rbfit_fitters::{FitResult, InterleavedFitResult, InterleavedRbFitter, RbFitter};
use serde::{Deserialize, Serialize};

/// One pattern's outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternSummary {
    /// Pattern index
    pub pattern: usize,

    /// Qubits of the pattern
    pub qubits: Vec<QubitId>,

    /// Seeds contributing to the statistics
    pub num_seeds: usize,

    /// Standard (or reference) fit
    pub fit: Option<FitResult>,

    /// Fit of the interleaved sequence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interleaved_fit: Option<FitResult>,

    /// Interleaved gate estimate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<InterleavedFitResult>,
}

impl PatternSummary {
    /// Qubits as a space-separated list
    pub fn qubit_list(&self) -> String {
        self.qubits
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Error per Clifford of the reported gate
    ///
    /// The interleaved estimate when present, the plain fit otherwise.
    pub fn headline_epc(&self) -> Option<f64> {
        match (&self.estimate, &self.fit) {
            (Some(estimate), _) => Some(estimate.epc_est),
            (None, Some(fit)) => Some(fit.epc),
            (None, None) => None,
        }
    }
}

/// Report input for a whole experiment
/// Gantree: RbSummary // 결과 요약
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RbSummary {
    /// Experiment label
    pub experiment: String,

    /// Whether the rows carry interleaved estimates
    pub interleaved: bool,

    /// Per-pattern rows
    pub patterns: Vec<PatternSummary>,
}

impl RbSummary {
    /// Summarize a standard RB fitter
    pub fn from_fitter(fitter: &RbFitter) -> Self {
        let patterns = fitter
            .patterns()
            .iter()
            .enumerate()
            .map(|(i, qubits)| PatternSummary {
                pattern: i,
                qubits: qubits.to_vec(),
                num_seeds: fitter.seeds().len(),
                fit: fitter.fit().get(i).cloned().flatten(),
                interleaved_fit: None,
                estimate: None,
            })
            .collect();

        Self {
            experiment: fitter.experiment_type().unwrap_or("rb").to_string(),
            interleaved: false,
            patterns,
        }
    }

    /// Summarize an interleaved RB fitter
    pub fn from_interleaved(fitter: &InterleavedRbFitter) -> Self {
        let reference = fitter.reference();
        let interleaved = fitter.interleaved();

        let patterns = fitter
            .patterns()
            .iter()
            .enumerate()
            .map(|(i, qubits)| PatternSummary {
                pattern: i,
                qubits: qubits.to_vec(),
                num_seeds: reference.seeds().len().min(interleaved.seeds().len()),
                fit: reference.fit().get(i).cloned().flatten(),
                interleaved_fit: interleaved.fit().get(i).cloned().flatten(),
                estimate: fitter.fit_interleaved().get(i).cloned(),
            })
            .collect();

        Self {
            experiment: interleaved
                .experiment_type()
                .unwrap_or(rbfit_core::names::INTERLEAVED_TYPE)
                .to_string(),
            interleaved: true,
            patterns,
        }
    }

    /// Number of patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Aggregate figures
    pub fn statistics(&self) -> SummaryStatistics {
        SummaryStatistics::from_patterns(&self.patterns)
    }
}

/// Aggregate over the patterns of a summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Number of patterns
    pub count: usize,

    /// Patterns with a fit
    pub fitted: usize,

    /// Mean headline EPC over fitted patterns
    pub mean_epc: f64,

    /// Largest headline EPC
    pub max_epc: f64,

    /// Smallest headline EPC
    pub min_epc: f64,
}

impl SummaryStatistics {
    /// Compute from rows
    pub fn from_patterns(patterns: &[PatternSummary]) -> Self {
        let epcs: Vec<f64> = patterns
            .iter()
            .filter_map(PatternSummary::headline_epc)
            .collect();

        if epcs.is_empty() {
            return Self {
                count: patterns.len(),
                ..Default::default()
            };
        }

        Self {
            count: patterns.len(),
            fitted: epcs.len(),
            mean_epc: epcs.iter().sum::<f64>() / epcs.len() as f64,
            max_epc: epcs.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            min_epc: epcs.iter().cloned().fold(f64::INFINITY, f64::min),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
