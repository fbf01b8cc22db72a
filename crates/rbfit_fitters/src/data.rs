//! Survival data, statistics and fit records
//!
//! Gantree: L3_Fitters → Records
//!
//! Every record here is rebuilt wholesale by the fitter stage that owns it.

use rbfit_core::{RbError, RbResult};
use rbfit_curve::{column_mean, column_std, usable_as_sigma, DecayParams};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Raw Data
// ============================================================================

/// Ground-state survival probabilities
/// Gantree: SurvivalData // [pattern][seed][length]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurvivalData {
    values: Vec<Vec<Vec<f64>>>,
}

impl SurvivalData {
    /// Wrap a `[pattern][seed][length]` array
    pub fn new(values: Vec<Vec<Vec<f64>>>) -> Self {
        Self { values }
    }

    /// Number of patterns
    pub fn num_patterns(&self) -> usize {
        self.values.len()
    }

    /// Number of seeds
    pub fn num_seeds(&self) -> usize {
        self.values.first().map_or(0, |p| p.len())
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Seed rows of one pattern
    pub fn pattern(&self, index: usize) -> Option<&[Vec<f64>]> {
        self.values.get(index).map(|p| p.as_slice())
    }

    /// Single entry
    pub fn get(&self, pattern: usize, seed: usize, length: usize) -> Option<f64> {
        self.values.get(pattern)?.get(seed)?.get(length).copied()
    }

    /// Iterate over patterns
    pub fn iter(&self) -> impl Iterator<Item = &[Vec<f64>]> {
        self.values.iter().map(|p| p.as_slice())
    }

    /// Underlying array
    pub fn as_slice(&self) -> &[Vec<Vec<f64>>] {
        &self.values
    }
}

// ============================================================================
// Statistics
// ============================================================================

/// Mean and deviation across seeds, per length
/// Gantree: PatternStatistics // 평균/표준편차
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternStatistics {
    /// Mean survival per length
    pub mean: Vec<f64>,

    /// Population standard deviation per length; `None` with a single seed
    pub std: Option<Vec<f64>>,
}

impl PatternStatistics {
    /// Aggregate seed rows of one pattern
    /// Gantree: from_seed_rows(rows) -> Self // 시드 축 통계
    pub fn from_seed_rows(rows: &[Vec<f64>]) -> Self {
        let std = (rows.len() > 1).then(|| column_std(rows));
        Self {
            mean: column_mean(rows),
            std,
        }
    }

    /// Number of length points
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// Deviations usable as fit weights (all nonzero)
    pub fn sigma(&self) -> Option<&[f64]> {
        self.std
            .as_deref()
            .filter(|std| usable_as_sigma(std))
    }
}

// ============================================================================
// Fit Results
// ============================================================================

/// Decay fit of one pattern
/// Gantree: FitResult // 피팅 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    /// Fitted `(A, alpha, B)`
    pub params: DecayParams,

    /// One-sigma uncertainties of `(A, alpha, B)`
    pub params_err: DecayParams,

    /// Error per Clifford
    pub epc: f64,

    /// Uncertainty of `epc`
    pub epc_err: f64,
}

impl FitResult {
    /// Derive EPC from fitted parameters
    /// Gantree: from_params(nrb,params,err) -> Self // EPC 계산
    ///
    /// `epc = (nrb-1)/nrb · (1-alpha)`, `epc_err = epc · alpha_err/alpha`.
    pub fn from_params(nrb: f64, params: DecayParams, params_err: DecayParams) -> Self {
        let epc = (nrb - 1.0) / nrb * (1.0 - params.alpha);
        let epc_err = epc * params_err.alpha / params.alpha;
        Self {
            params,
            params_err,
            epc,
            epc_err,
        }
    }

    /// Build from raw optimizer vectors
    pub fn from_vectors(nrb: f64, params: &[f64], params_err: &[f64]) -> RbResult<Self> {
        let malformed = || {
            RbError::InvalidConfig(format!(
                "expected 3 fit parameters, got {} values and {} errors",
                params.len(),
                params_err.len()
            ))
        };
        let p = DecayParams::from_slice(params).ok_or_else(malformed)?;
        let e = DecayParams::from_slice(params_err).ok_or_else(malformed)?;
        Ok(Self::from_params(nrb, p, e))
    }

    /// Fitted decay parameter
    pub fn alpha(&self) -> f64 {
        self.params.alpha
    }

    /// Uncertainty of the decay parameter
    pub fn alpha_err(&self) -> f64 {
        self.params_err.alpha
    }
}

impl fmt::Display for FitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "alpha: {:.3}({:.1e}) EPC: {:.3e}({:.1e})",
            self.params.alpha, self.params_err.alpha, self.epc, self.epc_err
        )
    }
}

/// Joint estimate for the interleaved gate
/// Gantree: InterleavedFitResult // 인터리브 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterleavedFitResult {
    /// Reference decay parameter
    pub alpha: f64,
    /// Uncertainty of `alpha`
    pub alpha_err: f64,
    /// Interleaved decay parameter
    pub alpha_c: f64,
    /// Uncertainty of `alpha_c`
    pub alpha_c_err: f64,
    /// Estimated error of the interleaved gate
    pub epc_est: f64,
    /// Uncertainty of `epc_est`
    pub epc_est_err: f64,
    /// Systematic error bound
    pub systematic_err: f64,
    /// `epc_est - systematic_err`
    pub systematic_err_l: f64,
    /// `epc_est + systematic_err`
    pub systematic_err_r: f64,
}

impl InterleavedFitResult {
    /// Combine reference and interleaved decay rates
    /// Gantree: from_decay_rates(nrb,alpha,err,alpha_c,err_c) -> Self // 결합 추정
    ///
    /// ```text
    /// epc_est   = (nrb-1)/nrb · (1 - alpha_c/alpha)
    /// bound1    = (nrb-1)/nrb · (|alpha - alpha_c/alpha| + (1-alpha))
    /// bound2    = 2(nrb²-1)(1-alpha)/(alpha·nrb²) + 4·√(1-alpha)·√(nrb²-1)/alpha
    /// sys_err   = min(bound1, bound2)
    /// ```
    ///
    /// A NaN in either bound makes `systematic_err` NaN.
    pub fn from_decay_rates(
        nrb: f64,
        alpha: f64,
        alpha_err: f64,
        alpha_c: f64,
        alpha_c_err: f64,
    ) -> Self {
        let scale = (nrb - 1.0) / nrb;
        let nrb2 = nrb * nrb;

        let epc_est = scale * (1.0 - alpha_c / alpha);

        let bound1 = scale * ((alpha - alpha_c / alpha).abs() + (1.0 - alpha));
        let bound2 = 2.0 * (nrb2 - 1.0) * (1.0 - alpha) / (alpha * nrb2)
            + 4.0 * (1.0 - alpha).sqrt() * (nrb2 - 1.0).sqrt() / alpha;
        let systematic_err = if bound1.is_nan() || bound2.is_nan() {
            f64::NAN
        } else {
            bound1.min(bound2)
        };

        let rel_sq = (alpha_err / alpha).powi(2) + (alpha_c_err / alpha_c).powi(2);
        let epc_est_err = scale * (alpha_c / alpha) * rel_sq.sqrt();

        Self {
            alpha,
            alpha_err,
            alpha_c,
            alpha_c_err,
            epc_est,
            epc_est_err,
            systematic_err,
            systematic_err_l: epc_est - systematic_err,
            systematic_err_r: epc_est + systematic_err,
        }
    }

    /// Combine two pattern fits
    pub fn from_fits(nrb: f64, reference: &FitResult, interleaved: &FitResult) -> Self {
        Self::from_decay_rates(
            nrb,
            reference.alpha(),
            reference.alpha_err(),
            interleaved.alpha(),
            interleaved.alpha_err(),
        )
    }
}

impl fmt::Display for InterleavedFitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "alpha: {:.3}({:.1e}) alpha_c: {:.3e}({:.1e}) EPC_est: {:.3e}({:.1e})",
            self.alpha,
            self.alpha_err,
            self.alpha_c,
            self.alpha_c_err,
            self.epc_est,
            self.epc_est_err
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_survival_data_indexing() {
        let data = SurvivalData::new(vec![
            vec![vec![0.9, 0.8], vec![0.95, 0.7]],
            vec![vec![0.5, 0.4], vec![0.6, 0.3]],
        ]);
        assert_eq!(data.num_patterns(), 2);
        assert_eq!(data.num_seeds(), 2);
        assert_eq!(data.get(1, 0, 1), Some(0.4));
        assert_eq!(data.get(2, 0, 0), None);
        assert_eq!(data.pattern(0).map(|p| p.len()), Some(2));
    }

    #[test]
    fn test_statistics_single_seed_has_no_std() {
        let stats = PatternStatistics::from_seed_rows(&[vec![0.9, 0.8]]);
        assert_eq!(stats.mean, vec![0.9, 0.8]);
        assert!(stats.std.is_none());
        assert!(stats.sigma().is_none());
    }

    #[test]
    fn test_statistics_two_seeds() {
        let stats = PatternStatistics::from_seed_rows(&[vec![1.0, 0.8], vec![0.8, 0.8]]);
        let std = stats.std.clone().unwrap();
        assert_relative_eq!(std[0], 0.1, epsilon = 1e-12);
        assert_eq!(std[1], 0.0);
        // the zero deviation at the second length disables weighting
        assert!(stats.sigma().is_none());
    }

    #[test]
    fn test_epc_from_params() {
        let params = DecayParams::new(0.71936804, 0.98062119, 0.25803749);
        let err = DecayParams::new(0.0, 0.00046714, 0.0);
        let fit = FitResult::from_params(4.0, params, err);

        assert_relative_eq!(fit.epc, 0.014534107499999976, max_relative = 1e-12);
        assert_relative_eq!(fit.epc_err, 6.923634780470111e-06, max_relative = 1e-12);
        assert_eq!(fit.epc, 3.0 / 4.0 * (1.0 - fit.alpha()));
    }

    #[test]
    fn test_from_vectors_shape() {
        assert!(FitResult::from_vectors(2.0, &[0.5, 0.9, 0.5], &[0.0, 0.01, 0.0]).is_ok());
        assert!(FitResult::from_vectors(2.0, &[0.5, 0.9], &[0.0, 0.01, 0.0]).is_err());
    }

    #[test]
    fn test_interleaved_two_qubit_pattern() {
        let r = InterleavedFitResult::from_decay_rates(
            4.0,
            0.9707393978697902,
            0.0028343593038762326,
            0.9661036105117012,
            0.003096602375173838,
        );
        assert_relative_eq!(r.epc_est, 0.003581641505636224, max_relative = 1e-10);
        assert_relative_eq!(r.epc_est_err, 0.0032362911276774308, max_relative = 1e-10);
        assert_relative_eq!(r.systematic_err, 0.04030926168967841, max_relative = 1e-10);
        assert_relative_eq!(r.systematic_err_l, -0.03672762018404219, max_relative = 1e-10);
        assert_relative_eq!(r.systematic_err_r, 0.043890903195314634, max_relative = 1e-10);
    }

    #[test]
    fn test_interleaved_single_qubit_pattern() {
        let r = InterleavedFitResult::from_decay_rates(
            2.0,
            0.9953124384370953,
            0.0014841466685991903,
            0.9955519189829325,
            0.002194868426034655,
        );
        assert_relative_eq!(r.epc_est, -0.00012030420629183247, max_relative = 1e-9);
        assert_relative_eq!(r.epc_est_err, 0.001331116936065506, max_relative = 1e-10);
        assert_relative_eq!(r.systematic_err, 0.004807865769196562, max_relative = 1e-10);
        assert_relative_eq!(r.systematic_err_l, -0.0049281699754883945, max_relative = 1e-10);
        assert_relative_eq!(r.systematic_err_r, 0.00468756156290473, max_relative = 1e-10);
    }

    #[test]
    fn test_systematic_err_is_smaller_bound() {
        let (alpha, alpha_c, nrb) = (0.2_f64, 0.9_f64, 2.0_f64);
        let r = InterleavedFitResult::from_decay_rates(nrb, alpha, 0.01, alpha_c, 0.01);
        let b1 = (nrb - 1.0) / nrb * ((alpha - alpha_c / alpha).abs() + (1.0 - alpha));
        let b2 = 2.0 * (nrb * nrb - 1.0) * (1.0 - alpha) / (alpha * nrb * nrb)
            + 4.0 * (1.0 - alpha).sqrt() * (nrb * nrb - 1.0).sqrt() / alpha;
        assert_eq!(r.systematic_err, b1.min(b2));
        assert_eq!(r.systematic_err, b1);
    }

    #[test]
    fn test_systematic_err_nan_bound_propagates() {
        // 0/0 in bound1 while bound2 is +inf
        let r = InterleavedFitResult::from_decay_rates(2.0, 0.0, 0.01, 0.0, 0.01);
        assert!(r.systematic_err.is_nan());
        assert!(r.systematic_err_l.is_nan());
        assert!(r.systematic_err_r.is_nan());

        // sqrt of a negative in bound2 while bound1 is finite
        let r = InterleavedFitResult::from_decay_rates(2.0, 1.01, 0.01, 0.99, 0.01);
        assert!(r.systematic_err.is_nan());
    }

    #[test]
    fn test_display_labels() {
        let fit = FitResult::from_params(
            2.0,
            DecayParams::new(0.5, 0.99, 0.5),
            DecayParams::new(0.0, 0.001, 0.0),
        );
        assert_eq!(fit.to_string(), "alpha: 0.990(1.0e-3) EPC: 5.000e-3(5.1e-6)");
    }
}
