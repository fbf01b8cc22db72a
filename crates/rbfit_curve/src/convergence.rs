//! Convergence criteria for the least-squares optimizer
//!
//! Gantree: L2_Curve → Convergence
//!
//! Cost, step, and projected-gradient tests applied after every
//! accepted step.

use crate::options::{Bounds, FitOptions};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason the optimizer stopped
/// Gantree: Termination // 종료 사유
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Relative cost reduction fell below `ftol`
    CostTolerance,
    /// Relative step fell below `xtol`
    StepTolerance,
    /// Projected gradient fell below `gtol`
    GradientTolerance,
    /// Damping grew without finding a lower cost
    NoDescent,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Termination::CostTolerance => "ftol",
            Termination::StepTolerance => "xtol",
            Termination::GradientTolerance => "gtol",
            Termination::NoDescent => "no descent",
        };
        write!(f, "{}", s)
    }
}

/// Convergence checker
/// Gantree: Convergence // 수렴 판단
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Convergence {
    /// Relative cost tolerance
    pub ftol: f64,
    /// Relative step tolerance
    pub xtol: f64,
    /// Projected gradient tolerance
    pub gtol: f64,
}

impl Convergence {
    /// Create from fit options
    pub fn from_options(options: &FitOptions) -> Self {
        Self {
            ftol: options.ftol,
            xtol: options.xtol,
            gtol: options.gtol,
        }
    }

    /// `dF < ftol · F`
    /// Gantree: cost_condition(old,new) -> bool // 비용 조건
    pub fn cost_condition(&self, cost_old: f64, cost_new: f64) -> bool {
        cost_old - cost_new <= self.ftol * cost_old
    }

    /// `‖dx‖ < xtol · (xtol + ‖x‖)`
    /// Gantree: step_condition(x,x_new) -> bool // 스텝 조건
    pub fn step_condition(&self, x_old: &DVector<f64>, x_new: &DVector<f64>) -> bool {
        (x_new - x_old).norm() <= self.xtol * (self.xtol + x_old.norm())
    }

    /// `‖g‖∞ < gtol` on the gradient projected onto the feasible box
    /// Gantree: gradient_condition(g,x,bounds) -> bool // 기울기 조건
    pub fn gradient_condition(&self, descent: &DVector<f64>, x: &DVector<f64>, bounds: &Bounds) -> bool {
        projected(descent, x, bounds).amax() <= self.gtol
    }
}

/// Zero descent components that would push an active bound outward
fn projected(descent: &DVector<f64>, x: &DVector<f64>, bounds: &Bounds) -> DVector<f64> {
    DVector::from_iterator(
        descent.len(),
        descent.iter().enumerate().map(|(i, &g)| {
            let at_lower = x[i] <= bounds.lower[i] && g < 0.0;
            let at_upper = x[i] >= bounds.upper[i] && g > 0.0;
            if at_lower || at_upper {
                0.0
            } else {
                g
            }
        }),
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn conv() -> Convergence {
        Convergence::from_options(&FitOptions::default().with_tolerance(1e-6))
    }

    #[test]
    fn test_cost_condition() {
        let c = conv();
        assert!(c.cost_condition(1.0, 1.0 - 1e-9));
        assert!(!c.cost_condition(1.0, 0.5));
        // exact fit
        assert!(c.cost_condition(0.0, 0.0));
    }

    #[test]
    fn test_step_condition() {
        let c = conv();
        let x = DVector::from_vec(vec![1.0, 0.5, 0.2]);
        let tiny = DVector::from_vec(vec![1.0 + 1e-9, 0.5, 0.2]);
        let big = DVector::from_vec(vec![1.1, 0.5, 0.2]);
        assert!(c.step_condition(&x, &tiny));
        assert!(!c.step_condition(&x, &big));
    }

    #[test]
    fn test_gradient_projected_at_bound() {
        let c = conv();
        let bounds = Bounds::rb_decay();
        // alpha sits on its upper bound and the descent direction points outward
        let x = DVector::from_vec(vec![0.5, 1.0, 0.5]);
        let g = DVector::from_vec(vec![0.0, 0.3, 0.0]);
        assert!(c.gradient_condition(&g, &x, &bounds));

        // interior: same gradient is not converged
        let x = DVector::from_vec(vec![0.5, 0.9, 0.5]);
        assert!(!c.gradient_condition(&g, &x, &bounds));
    }

    #[test]
    fn test_termination_display() {
        assert_eq!(Termination::CostTolerance.to_string(), "ftol");
        assert_eq!(Termination::NoDescent.to_string(), "no descent");
    }
}
