//! Fit options
//!
//! Gantree: L2_Curve → FitOptions
//!
//! Optimizer limits, tolerances, and parameter bounds.

use rbfit_core::fit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Box constraints on fit parameters
/// Gantree: Bounds // 파라미터 경계
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Lower bound per parameter
    pub lower: Vec<f64>,

    /// Upper bound per parameter
    pub upper: Vec<f64>,
}

impl Bounds {
    /// Create bounds
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Self {
        Self { lower, upper }
    }

    /// Bounds of the RB decay model: A∈[-2,2], alpha∈[0,1], B∈[-2,2]
    pub fn rb_decay() -> Self {
        Self::new(fit::LOWER_BOUNDS.to_vec(), fit::UPPER_BOUNDS.to_vec())
    }

    /// Unbounded box for `n` parameters
    pub fn unbounded(n: usize) -> Self {
        Self::new(vec![f64::NEG_INFINITY; n], vec![f64::INFINITY; n])
    }

    /// Number of parameters covered
    pub fn len(&self) -> usize {
        self.lower.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    /// Whether `value` lies within the bounds of parameter `index`
    pub fn contains(&self, index: usize, value: f64) -> bool {
        value >= self.lower[index] && value <= self.upper[index]
    }

    /// Clamp a parameter value into its interval
    /// Gantree: project(index,value) -> f64 // 사영
    pub fn project(&self, index: usize, value: f64) -> f64 {
        value.clamp(self.lower[index], self.upper[index])
    }

    /// Validate ordering
    pub fn validate(&self) -> Result<(), String> {
        if self.lower.len() != self.upper.len() {
            return Err(format!(
                "bounds length mismatch: {} lower vs {} upper",
                self.lower.len(),
                self.upper.len()
            ));
        }
        for (i, (lo, hi)) in self.lower.iter().zip(&self.upper).enumerate() {
            if lo.is_nan() || hi.is_nan() || lo >= hi {
                return Err(format!("bounds of parameter {} must satisfy lower < upper", i));
            }
        }
        Ok(())
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::rb_decay()
    }
}

/// Nonlinear least-squares options
/// Gantree: FitOptions // 피팅 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitOptions {
    /// Maximum number of accepted-step iterations
    /// Gantree: max_iterations: usize // 최대 반복 (1000)
    pub max_iterations: usize,

    /// Relative cost-reduction tolerance
    pub ftol: f64,

    /// Relative step tolerance
    pub xtol: f64,

    /// Projected-gradient tolerance
    pub gtol: f64,

    /// Initial damping factor
    /// Gantree: initial_damping: f64 // 초기 감쇠
    pub initial_damping: f64,

    /// Parameter bounds
    pub bounds: Bounds,

    /// Decay parameter used when the data-driven guess is rejected
    pub default_alpha_guess: f64,
}

impl FitOptions {
    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set iteration limit
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set all three tolerances at once
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.ftol = tol;
        self.xtol = tol;
        self.gtol = tol;
        self
    }

    /// Set bounds
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate options
    /// Gantree: validate(&self) -> Result // 검증
    pub fn validate(&self) -> Result<(), String> {
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0".to_string());
        }

        for (name, tol) in [("ftol", self.ftol), ("xtol", self.xtol), ("gtol", self.gtol)] {
            if !(tol > 0.0 && tol < 1.0) {
                return Err(format!("{} must be in (0, 1), got {}", name, tol));
            }
        }

        if !(self.initial_damping > 0.0) {
            return Err(format!(
                "initial_damping must be > 0, got {}",
                self.initial_damping
            ));
        }

        if !(self.default_alpha_guess > 0.0 && self.default_alpha_guess < 1.0) {
            return Err(format!(
                "default_alpha_guess must be in (0, 1), got {}",
                self.default_alpha_guess
            ));
        }

        self.bounds.validate()
    }
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_iterations: fit::DEFAULT_MAX_ITERATIONS,
            ftol: fit::DEFAULT_FTOL,
            xtol: fit::DEFAULT_XTOL,
            gtol: fit::DEFAULT_GTOL,
            initial_damping: fit::DEFAULT_INITIAL_DAMPING,
            bounds: Bounds::default(),
            default_alpha_guess: fit::DEFAULT_ALPHA_GUESS,
        }
    }
}

impl fmt::Display for FitOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FitOptions(max_iter={}, ftol={:.0e}, xtol={:.0e}, gtol={:.0e})",
            self.max_iterations, self.ftol, self.xtol, self.gtol
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
