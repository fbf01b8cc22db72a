//! Bounded nonlinear least squares
//!
//! Gantree: L2_Curve → Solver
//!
//! Projected Levenberg-Marquardt:
//!
//! ```text
//! minimize  ½ Σ ((y_i - f(x_i; p)) / σ_i)²   subject to  lower ≤ p ≤ upper
//! step:     (JᵀJ + λ·diag(JᵀJ)) δ = Jᵀr,   p ← clamp(p + δ)
//! ```
//!
//! The covariance follows the relative-sigma convention: the pseudo-inverse
//! of JᵀJ scaled by the reduced chi-square `Σr² / (m − n)`.

use crate::convergence::{Convergence, Termination};
use crate::model::CurveModel;
use crate::options::FitOptions;
use log::{debug, warn};
use nalgebra::{DMatrix, DVector};
use rbfit_core::{fit, RbError, RbResult};
use serde::{Deserialize, Serialize};

/// Smallest damping factor kept after successful steps
const MIN_DAMPING: f64 = 1e-12;

/// Floor for diagonal scaling of flat directions
const DIAG_FLOOR: f64 = 1e-12;

/// Outcome of a curve fit
/// Gantree: CurveFit // 피팅 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveFit {
    /// Optimal parameters
    pub params: Vec<f64>,

    /// One-sigma parameter uncertainties, `sqrt(diag(covariance))`
    pub params_err: Vec<f64>,

    /// Estimated parameter covariance (row-major, n×n)
    pub covariance: Vec<Vec<f64>>,

    /// Final cost `½ Σ r²`
    pub cost: f64,

    /// Accepted-step iterations used
    pub iterations: usize,

    /// Why the optimizer stopped
    pub termination: Termination,
}

/// Fit `model` to `(xdata, ydata)`
/// Gantree: curve_fit(model,x,y,sigma,p0,opts) -> Result<CurveFit> // 비선형 피팅
///
/// `sigma` weights each point by `1/σ_i`; `None` fits unweighted.
pub fn curve_fit<M: CurveModel>(
    model: &M,
    xdata: &[f64],
    ydata: &[f64],
    sigma: Option<&[f64]>,
    p0: &[f64],
    options: &FitOptions,
) -> RbResult<CurveFit> {
    options.validate().map_err(RbError::InvalidConfig)?;

    let n = model.num_params();
    let m = xdata.len();
    check_shapes(n, xdata, ydata, sigma, p0, options)?;

    let bounds = &options.bounds;
    for (i, &v) in p0.iter().enumerate() {
        if !bounds.contains(i, v) {
            return Err(RbError::InfeasibleGuess {
                index: i,
                value: v,
                lower: bounds.lower[i],
                upper: bounds.upper[i],
            });
        }
    }

    let weights: Vec<f64> = match sigma {
        Some(s) => s.iter().map(|&si| 1.0 / si).collect(),
        None => vec![1.0; m],
    };
    let problem = Problem {
        model,
        xdata,
        ydata,
        weights: &weights,
    };

    let conv = Convergence::from_options(options);
    let mut p = DVector::from_column_slice(p0);
    let mut r = problem.residuals(&p);
    if !is_finite(&r) {
        return Err(RbError::NonFiniteResiduals { iteration: 0 });
    }
    let mut cost = 0.5 * r.norm_squared();
    let mut lambda = options.initial_damping;

    debug!("curve_fit: m={}, n={}, p0={:?}, cost={:.6e}", m, n, p0, cost);

    for iteration in 1..=options.max_iterations {
        let j = problem.jacobian(&p);
        if !j.iter().all(|v| v.is_finite()) {
            return Err(RbError::NonFiniteResiduals { iteration });
        }
        let jtj = j.transpose() * &j;
        let descent = j.transpose() * &r;

        if conv.gradient_condition(&descent, &p, bounds) {
            return problem.finish(p, cost, iteration, Termination::GradientTolerance);
        }

        // inner loop: raise damping until a step lowers the cost
        loop {
            let mut lhs = jtj.clone();
            for i in 0..n {
                lhs[(i, i)] += lambda * jtj[(i, i)].max(DIAG_FLOOR);
            }

            let accepted = lhs.cholesky().and_then(|chol| {
                let step = chol.solve(&descent);
                let trial = DVector::from_iterator(
                    n,
                    (&p + &step)
                        .iter()
                        .enumerate()
                        .map(|(i, &v)| bounds.project(i, v)),
                );
                let r_trial = problem.residuals(&trial);
                let cost_trial = 0.5 * r_trial.norm_squared();
                (cost_trial.is_finite() && cost_trial < cost).then_some((trial, r_trial, cost_trial))
            });

            match accepted {
                Some((trial, r_trial, cost_trial)) => {
                    let cost_done = conv.cost_condition(cost, cost_trial);
                    let step_done = conv.step_condition(&p, &trial);

                    p = trial;
                    r = r_trial;
                    cost = cost_trial;
                    lambda = (lambda / 10.0).max(MIN_DAMPING);

                    if cost_done {
                        return problem.finish(p, cost, iteration, Termination::CostTolerance);
                    }
                    if step_done {
                        return problem.finish(p, cost, iteration, Termination::StepTolerance);
                    }
                    break;
                }
                None => {
                    lambda *= 10.0;
                    if lambda > fit::MAX_DAMPING {
                        return problem.finish(p, cost, iteration, Termination::NoDescent);
                    }
                }
            }
        }
    }

    Err(RbError::ConvergenceFailed {
        iterations: options.max_iterations,
    })
}

fn check_shapes(
    n: usize,
    xdata: &[f64],
    ydata: &[f64],
    sigma: Option<&[f64]>,
    p0: &[f64],
    options: &FitOptions,
) -> RbResult<()> {
    let m = xdata.len();
    if ydata.len() != m {
        return Err(RbError::InvalidConfig(format!(
            "xdata has {} points but ydata has {}",
            m,
            ydata.len()
        )));
    }
    if let Some(s) = sigma {
        if s.len() != m {
            return Err(RbError::InvalidConfig(format!(
                "sigma has {} entries, expected {}",
                s.len(),
                m
            )));
        }
    }
    if p0.len() != n || options.bounds.len() != n {
        return Err(RbError::InvalidConfig(format!(
            "model has {} parameters; got {} initial values and {} bounds",
            n,
            p0.len(),
            options.bounds.len()
        )));
    }
    if m < n {
        return Err(RbError::InsufficientData { needed: n, got: m });
    }
    Ok(())
}

fn is_finite(v: &DVector<f64>) -> bool {
    v.iter().all(|x| x.is_finite())
}

/// Weighted residual problem
struct Problem<'a, M> {
    model: &'a M,
    xdata: &'a [f64],
    ydata: &'a [f64],
    weights: &'a [f64],
}

impl<M: CurveModel> Problem<'_, M> {
    /// `r_i = w_i (y_i − f(x_i; p))`
    fn residuals(&self, p: &DVector<f64>) -> DVector<f64> {
        let params = p.as_slice();
        DVector::from_iterator(
            self.xdata.len(),
            self.xdata
                .iter()
                .zip(self.ydata)
                .zip(self.weights)
                .map(|((&x, &y), &w)| w * (y - self.model.eval(x, params))),
        )
    }

    /// `J_ik = w_i ∂f(x_i)/∂p_k`
    fn jacobian(&self, p: &DVector<f64>) -> DMatrix<f64> {
        let n = self.model.num_params();
        let params = p.as_slice();
        let mut j = DMatrix::zeros(self.xdata.len(), n);
        let mut grad = vec![0.0; n];
        for (i, (&x, &w)) in self.xdata.iter().zip(self.weights).enumerate() {
            self.model.gradient(x, params, &mut grad);
            for k in 0..n {
                j[(i, k)] = w * grad[k];
            }
        }
        j
    }

    fn finish(
        &self,
        p: DVector<f64>,
        cost: f64,
        iterations: usize,
        termination: Termination,
    ) -> RbResult<CurveFit> {
        let m = self.xdata.len();
        let n = p.len();
        let covariance = self.covariance(&p, cost)?;
        let params_err = (0..n).map(|k| covariance[(k, k)].sqrt()).collect();

        debug!(
            "curve_fit: stopped ({}) after {} iterations, cost={:.6e}, m={}",
            termination, iterations, cost, m
        );

        Ok(CurveFit {
            params: p.iter().copied().collect(),
            params_err,
            covariance: (0..n)
                .map(|row| (0..n).map(|col| covariance[(row, col)]).collect())
                .collect(),
            cost,
            iterations,
            termination,
        })
    }

    /// Pseudo-inverse of JᵀJ through the SVD of J, scaled by Σr²/(m−n)
    fn covariance(&self, p: &DVector<f64>, cost: f64) -> RbResult<DMatrix<f64>> {
        let m = self.xdata.len();
        let n = p.len();
        let svd = self.jacobian(p).svd(false, true);
        let v_t = svd
            .v_t
            .ok_or_else(|| RbError::SingularCovariance("SVD did not converge".to_string()))?;

        let s = &svd.singular_values;
        let threshold = f64::EPSILON * m.max(n) as f64 * s.max();
        let mut pcov = DMatrix::zeros(n, n);
        for (k, &sk) in s.iter().enumerate() {
            if sk > threshold {
                let v = v_t.row(k).transpose();
                pcov += &v * v.transpose() / (sk * sk);
            }
        }

        if m > n {
            pcov *= 2.0 * cost / (m - n) as f64;
        } else {
            warn!(
                "covariance of the parameters could not be estimated ({} points, {} parameters)",
                m, n
            );
            pcov.fill(f64::INFINITY);
        }
        Ok(pcov)
    }
}

// ============================================================================
// Tests
// ============================================================================
