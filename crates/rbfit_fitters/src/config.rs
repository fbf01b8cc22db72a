//! Fitter configuration
//!
//! Gantree: L3_Fitters → RbConfig
//!
//! Patterns, per-pattern Clifford lengths and the curve-fit options shared
//! by every fitter built from this configuration.

use rbfit_core::{CliffordLength, QubitId, RbError, RbPattern, RbResult};
use rbfit_curve::FitOptions;
use serde::{Deserialize, Serialize};
use std::fmt;

/// RB experiment configuration
/// Gantree: RbConfig // 피터 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RbConfig {
    // ========================================================================
    // Experiment Layout
    // ========================================================================
    /// Qubit patterns benchmarked in parallel
    /// Gantree: patterns: RbPattern // 기본값 [[0]]
    #[serde(default)]
    pub patterns: RbPattern,

    /// Clifford lengths per pattern
    pub lengths: Vec<Vec<CliffordLength>>,

    // ========================================================================
    // Fit Parameters
    // ========================================================================
    /// Curve-fit options
    #[serde(default)]
    pub fit: FitOptions,
}

impl RbConfig {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Configuration for the default pattern `[[0]]`
    pub fn new(lengths: Vec<Vec<CliffordLength>>) -> Self {
        Self {
            patterns: RbPattern::default(),
            lengths,
            fit: FitOptions::default(),
        }
    }

    /// Same length sequence for every pattern
    ///
    /// ```rust
    /// use rbfit_fitters::RbConfig;
    ///
    /// let config = RbConfig::uniform(vec![vec![0, 1], vec![2]], vec![1, 11, 21]);
    /// assert_eq!(config.lengths.len(), 2);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn uniform(patterns: Vec<Vec<QubitId>>, lengths: Vec<CliffordLength>) -> Self {
        let lengths = vec![lengths; patterns.len()];
        Self::new(lengths).with_patterns(patterns)
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set patterns
    pub fn with_patterns(mut self, patterns: impl Into<RbPattern>) -> Self {
        self.patterns = patterns.into();
        self
    }

    /// Set fit options
    pub fn with_fit_options(mut self, fit: FitOptions) -> Self {
        self.fit = fit;
        self
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Number of patterns
    pub fn num_patterns(&self) -> usize {
        self.patterns.len()
    }

    /// Number of circuits per seed (length points of pattern 0)
    pub fn num_lengths(&self) -> usize {
        self.lengths.first().map_or(0, |l| l.len())
    }

    /// Lengths of pattern `index` as floating-point abscissae
    pub fn xdata(&self, index: usize) -> Vec<f64> {
        self.lengths
            .get(index)
            .map(|l| l.iter().map(|&m| m as f64).collect())
            .unwrap_or_default()
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate configuration
    /// Gantree: validate(&self) -> Result // 검증
    pub fn validate(&self) -> Result<(), String> {
        self.patterns.validate()?;

        if self.lengths.len() != self.patterns.len() {
            return Err(format!(
                "{} length sequences for {} patterns",
                self.lengths.len(),
                self.patterns.len()
            ));
        }

        let expected = self.num_lengths();
        for (i, seq) in self.lengths.iter().enumerate() {
            if seq.is_empty() {
                return Err(format!("length sequence {} is empty", i));
            }
            if seq.len() != expected {
                return Err(format!(
                    "length sequence {} has {} points, expected {}",
                    i,
                    seq.len(),
                    expected
                ));
            }
            if seq.windows(2).any(|w| w[1] < w[0]) {
                return Err(format!("length sequence {} must be non-decreasing", i));
            }
        }

        self.fit.validate()
    }

    /// Validate, mapping failures to [`RbError::InvalidConfig`]
    pub fn check(&self) -> RbResult<()> {
        self.validate().map_err(RbError::InvalidConfig)
    }

    // ========================================================================
    // JSON I/O
    // ========================================================================

    /// Parse from JSON text
    pub fn from_json(json: &str) -> RbResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> RbResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for RbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RbConfig(patterns={}, lengths={}, {})",
            self.patterns,
            self.num_lengths(),
            self.fit
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
