//! Curve models
//!
//! Gantree: L2_Curve → Model
//!
//! A model maps `(x, params)` to a prediction and supplies its analytic
//! gradient with respect to the parameters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Parametric curve with analytic derivatives
/// Gantree: CurveModel // 모델 인터페이스
pub trait CurveModel {
    /// Number of free parameters
    fn num_params(&self) -> usize;

    /// Evaluate the model at `x`
    fn eval(&self, x: f64, params: &[f64]) -> f64;

    /// Write ∂f/∂p_k at `x` into `grad`
    fn gradient(&self, x: f64, params: &[f64], grad: &mut [f64]);
}

/// Parameters of the decay `A·alpha^m + B`
/// Gantree: DecayParams // (A, alpha, B)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DecayParams {
    /// Amplitude (state preparation and measurement)
    pub a: f64,
    /// Decay parameter per Clifford
    pub alpha: f64,
    /// Asymptote
    pub b: f64,
}

impl DecayParams {
    /// Create parameters
    pub fn new(a: f64, alpha: f64, b: f64) -> Self {
        Self { a, alpha, b }
    }

    /// As `[A, alpha, B]`
    pub fn to_array(&self) -> [f64; 3] {
        [self.a, self.alpha, self.b]
    }

    /// From `[A, alpha, B]`; returns `None` unless exactly three values
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        match values {
            [a, alpha, b] => Some(Self::new(*a, *alpha, *b)),
            _ => None,
        }
    }
}

impl From<[f64; 3]> for DecayParams {
    fn from(p: [f64; 3]) -> Self {
        Self::new(p[0], p[1], p[2])
    }
}

impl fmt::Display for DecayParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A={:.6}, alpha={:.6}, B={:.6}", self.a, self.alpha, self.b)
    }
}

/// RB survival decay `f(m) = A·alpha^m + B`
/// Gantree: DecayModel // 지수 감쇠
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DecayModel;

impl DecayModel {
    /// Evaluate at a sequence length
    pub fn evaluate(&self, length: f64, params: &DecayParams) -> f64 {
        params.a * params.alpha.powf(length) + params.b
    }

    /// Evaluate at several sequence lengths
    pub fn curve(&self, lengths: &[f64], params: &DecayParams) -> Vec<f64> {
        lengths.iter().map(|&m| self.evaluate(m, params)).collect()
    }
}

impl CurveModel for DecayModel {
    fn num_params(&self) -> usize {
        3
    }

    fn eval(&self, x: f64, params: &[f64]) -> f64 {
        params[0] * params[1].powf(x) + params[2]
    }

    fn gradient(&self, x: f64, params: &[f64], grad: &mut [f64]) {
        let (a, alpha) = (params[0], params[1]);
        grad[0] = alpha.powf(x);
        // d/dalpha vanishes at x = 0; avoid 0 * alpha^-1 at alpha = 0
        grad[1] = if x == 0.0 {
            0.0
        } else {
            a * x * alpha.powf(x - 1.0)
        };
        grad[2] = 1.0;
    }
}

// ============================================================================
// Tests
// ============================================================================
