//! # RBFit Fitters
//!
//! Randomized-benchmarking analysis: counts → survival → statistics →
//! decay fit → error per Clifford, plus the interleaved estimator.
//!
//! ## Gantree Architecture
//!
//! ```text
//! rbfit_fitters // L3: Fitters (완료)
//!     RbConfig // 패턴/길이/피팅 설정 (완료)
//!     Records // 생존 확률, 통계, 피팅 결과 (완료)
//!         SurvivalData [pattern][seed][length]
//!         PatternStatistics mean, std
//!         FitResult params, params_err, epc, epc_err
//!         InterleavedFitResult epc_est, systematic_err
//!     Guess // 초기값 추정 (완료)
//!     RbFitterBase // 공통 인터페이스 (완료)
//!     RbFitter // 표준 RB (완료)
//!         add_data() → calc_data() → calc_statistics() → fit_data()
//!     InterleavedRbFitter // 인터리브 RB (완료)
//!         reference + interleaved → fit_interleaved()
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use rbfit_fitters::prelude::*;
//!
//! let lengths = vec![1, 21, 41, 61, 81];
//! let mut result = ExperimentResult::default();
//! for (k, &m) in lengths.iter().enumerate() {
//!     let zeros = (1000.0 * (0.5 * 0.98_f64.powi(m as i32) + 0.5)).round() as u64;
//!     let counts: Counts = [("0".to_string(), zeros), ("1".to_string(), 1000 - zeros)]
//!         .into_iter()
//!         .collect();
//!     result.push(CircuitName::new("rb", k, 0).to_string(), counts);
//! }
//!
//! let fitter = RbFitter::with_lengths(result, lengths).unwrap();
//! let fit = fitter.fit_pattern(0).unwrap();
//! println!("{}", fit);
//! assert!((fit.params.alpha - 0.98).abs() < 0.01);
//! ```
//!
//! ## Interleaved RB
//!
//! ```rust,ignore
//! use rbfit_fitters::prelude::*;
//!
//! let config = RbConfig::new(vec![lengths]);
//! let irb = InterleavedRbFitter::new(reference_results, interleaved_results, config)?;
//! let est = &irb.fit_interleaved()[0];
//! println!("{} in [{}, {}]", est.epc_est, est.systematic_err_l, est.systematic_err_r);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Configuration (Gantree: L3_Fitters → RbConfig)
pub mod config;

/// Data records (Gantree: L3_Fitters → Records)
pub mod data;

/// Initial guess (Gantree: L3_Fitters → Guess)
pub mod guess;

/// Shared interface (Gantree: L3_Fitters → RbFitterBase)
pub mod base;

/// Standard fitter (Gantree: L3_Fitters → RbFitter)
pub mod fitter;

/// Interleaved fitter (Gantree: L3_Fitters → InterleavedRbFitter)
pub mod interleaved;

// ============================================================================
// Re-exports
// ============================================================================

pub use base::{RbFitterBase, Sequence, SequencePair};
pub use config::RbConfig;
pub use data::{FitResult, InterleavedFitResult, PatternStatistics, SurvivalData};
pub use fitter::RbFitter;
pub use guess::initial_guess;
pub use interleaved::InterleavedRbFitter;

// ============================================================================
// Prelude
// ============================================================================

/// Convenient imports for common use cases
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use rbfit_fitters::prelude::*;
    //! ```

    pub use crate::base::{RbFitterBase, Sequence, SequencePair};
    pub use crate::config::RbConfig;
    pub use crate::data::{FitResult, InterleavedFitResult, PatternStatistics, SurvivalData};
    pub use crate::fitter::RbFitter;
    pub use crate::interleaved::InterleavedRbFitter;
    pub use rbfit_core::prelude::*;
    pub use rbfit_curve::{DecayModel, DecayParams, FitOptions};
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn rb_lengths() -> Vec<u64> {
        (0..10).map(|i| 1 + 20 * i).collect()
    }

    fn round_shots(shots: u64, p: f64) -> u64 {
        (shots as f64 * p).round() as u64
    }

    /// Single-qubit seed batch whose survival follows `0.5·alpha^m + 0.5 + offset`
    fn decay_batch(kind: &str, seed: SeedId, lengths: &[u64], alpha: f64, offset: f64) -> ExperimentResult {
        let shots = 100_000;
        let mut result = ExperimentResult::default();
        for (k, &m) in lengths.iter().enumerate() {
            let p = (0.5 * alpha.powf(m as f64) + 0.5 + offset).min(1.0);
            let zeros = round_shots(shots, p);
            let counts: Counts = [("0".to_string(), zeros), ("1".to_string(), shots - zeros)]
                .into_iter()
                .collect();
            result.push(CircuitName::new(kind, k, seed).to_string(), counts);
        }
        result
    }

    fn seed_batches(kind: &str, lengths: &[u64], alpha: f64) -> Vec<ExperimentResult> {
        [-0.003, 0.0, 0.004]
            .iter()
            .enumerate()
            .map(|(seed, &d)| decay_batch(kind, seed as SeedId, lengths, alpha, d))
            .collect()
    }

    #[test]
    fn test_recovers_single_qubit_decay() {
        let lengths = rb_lengths();
        let shots = 1_000_000;
        let mut result = ExperimentResult::default();
        for (k, &m) in lengths.iter().enumerate() {
            let zeros = round_shots(shots, 0.5 * 0.98_f64.powf(m as f64) + 0.5);
            let counts: Counts = [("0".to_string(), zeros), ("1".to_string(), shots - zeros)]
                .into_iter()
                .collect();
            result.push(CircuitName::new("rb", k, 7).to_string(), counts);
        }

        let fitter = RbFitter::with_lengths(result, lengths).unwrap();
        let fit = fitter.fit_pattern(0).unwrap();

        assert!(fitter.statistics()[0].std.is_none());
        assert_abs_diff_eq!(fit.params.alpha, 0.98, epsilon = 1e-4);
        assert_abs_diff_eq!(fit.params.b, 0.5, epsilon = 1e-3);
        assert_relative_eq!(fit.epc, 0.5 * (1.0 - fit.params.alpha), max_relative = 1e-14);
    }

    #[test]
    fn test_parallel_patterns_read_own_bits() {
        // pattern 0 = qubits {0, 1} on bits 0-1, pattern 1 = qubit 2 on bit 2
        let lengths: Vec<u64> = (0..10).map(|i| 1 + 10 * i).collect();
        let shots = 100_000;
        let mut result = ExperimentResult::default();
        let mut expected = (Vec::new(), Vec::new());

        for (k, &m) in lengths.iter().enumerate() {
            let p0 = 0.7 * 0.97_f64.powf(m as f64) + 0.25;
            let p1 = 0.45 * 0.99_f64.powf(m as f64) + 0.5;
            let n000 = round_shots(shots, p0 * p1);
            let n100 = round_shots(shots, p0 * (1.0 - p1));
            let n001 = round_shots(shots, (1.0 - p0) * p1);
            let n101 = shots - n000 - n100 - n001;
            let counts: Counts = [("000", n000), ("100", n100), ("001", n001), ("101", n101)]
                .iter()
                .map(|(key, n)| (key.to_string(), *n))
                .collect();
            result.push(CircuitName::new("rb", k, 0).to_string(), counts);

            expected.0.push((n000 + n100) as f64 / shots as f64);
            expected.1.push((n000 + n001) as f64 / shots as f64);
        }

        let config = RbConfig::uniform(vec![vec![0, 1], vec![2]], lengths);
        let fitter = RbFitter::new(result, config).unwrap();

        assert_eq!(fitter.raw_data().pattern(0).unwrap()[0], expected.0);
        assert_eq!(fitter.raw_data().pattern(1).unwrap()[0], expected.1);

        let two_qubit = fitter.fit_pattern(0).unwrap();
        let one_qubit = fitter.fit_pattern(1).unwrap();
        assert_abs_diff_eq!(two_qubit.params.alpha, 0.97, epsilon = 1e-3);
        assert_abs_diff_eq!(one_qubit.params.alpha, 0.99, epsilon = 1e-3);

        // nrb = 4 for the two-qubit pattern
        assert_eq!(two_qubit.epc, 3.0 / 4.0 * (1.0 - two_qubit.params.alpha));
        assert_eq!(one_qubit.epc, 1.0 / 2.0 * (1.0 - one_qubit.params.alpha));
    }

    #[test]
    fn test_seed_order_invariance() {
        let lengths = rb_lengths();
        let batches = seed_batches("rb", &lengths, 0.98);

        let forward = RbFitter::new(batches.clone(), RbConfig::new(vec![lengths.clone()])).unwrap();

        let mut reverse = RbFitter::empty(RbConfig::new(vec![lengths])).unwrap();
        for batch in batches.into_iter().rev() {
            reverse.add_data(batch, true).unwrap();
        }

        assert_eq!(forward.seeds(), &[0, 1, 2]);
        assert_eq!(reverse.seeds(), &[2, 1, 0]);

        let (f, r) = (&forward.statistics()[0], &reverse.statistics()[0]);
        for k in 0..f.len() {
            assert_relative_eq!(f.mean[k], r.mean[k], max_relative = 1e-12);
            assert_relative_eq!(
                f.std.as_ref().unwrap()[k],
                r.std.as_ref().unwrap()[k],
                max_relative = 1e-9
            );
        }

        let (f, r) = (forward.fit_pattern(0).unwrap(), reverse.fit_pattern(0).unwrap());
        assert_abs_diff_eq!(f.params.alpha, r.params.alpha, epsilon = 1e-8);
        assert_abs_diff_eq!(f.params.a, r.params.a, epsilon = 1e-6);
        assert_abs_diff_eq!(f.epc, r.epc, epsilon = 1e-8);
    }

    #[test]
    fn test_std_matches_direct_recomputation() {
        let lengths = rb_lengths();
        let fitter = RbFitter::new(
            seed_batches("rb", &lengths, 0.98),
            RbConfig::new(vec![lengths]),
        )
        .unwrap();

        let rows = fitter.raw_data().pattern(0).unwrap();
        let stats = &fitter.statistics()[0];
        for k in 0..stats.len() {
            let mean = rows.iter().map(|r| r[k]).sum::<f64>() / 3.0;
            let var = rows.iter().map(|r| (r[k] - mean).powi(2)).sum::<f64>() / 3.0;
            assert_relative_eq!(stats.std.as_ref().unwrap()[k], var.sqrt(), max_relative = 1e-12);
        }
    }

    #[test]
    fn test_fit_data_idempotent() {
        let lengths = rb_lengths();
        let mut fitter = RbFitter::new(
            seed_batches("rb", &lengths, 0.98),
            RbConfig::new(vec![lengths]),
        )
        .unwrap();

        fitter.fit_data().unwrap();
        let first = fitter.fit().to_vec();
        fitter.fit_data().unwrap();
        assert_eq!(fitter.fit(), &first[..]);
    }

    #[test]
    fn test_mismatched_batch_is_fatal() {
        let lengths = rb_lengths();
        let mut fitter = RbFitter::new(
            decay_batch("rb", 0, &lengths, 0.98, 0.0),
            RbConfig::new(vec![lengths.clone()]),
        )
        .unwrap();

        let short = decay_batch("rb", 1, &lengths[..5], 0.98, 0.0);
        let err = fitter.add_data(short, true).unwrap_err();
        assert!(err.is_configuration_error());
        assert_eq!(fitter.seeds(), &[0]);
    }

    #[test]
    fn test_interleaved_estimate() {
        let lengths = rb_lengths();
        let irb = InterleavedRbFitter::new(
            seed_batches("rb", &lengths, 0.985),
            seed_batches("rb_interleaved", &lengths, 0.975),
            RbConfig::new(vec![lengths]),
        )
        .unwrap();

        let est = &irb.fit_interleaved()[0];
        let alpha = irb.reference().fit_pattern(0).unwrap().params.alpha;
        let alpha_c = irb.interleaved().fit_pattern(0).unwrap().params.alpha;

        assert_eq!(est.alpha, alpha);
        assert_eq!(est.alpha_c, alpha_c);
        assert_eq!(est.epc_est, 0.5 * (1.0 - alpha_c / alpha));
        assert_abs_diff_eq!(est.epc_est, 0.5 * (1.0 - 0.975 / 0.985), epsilon = 1e-4);

        let bound1 = 0.5 * ((alpha - alpha_c / alpha).abs() + (1.0 - alpha));
        let bound2 = 2.0 * 3.0 * (1.0 - alpha) / (alpha * 4.0)
            + 4.0 * (1.0 - alpha).sqrt() * 3.0_f64.sqrt() / alpha;
        assert_relative_eq!(est.systematic_err, bound1.min(bound2), max_relative = 1e-12);
        assert_relative_eq!(est.systematic_err_l, est.epc_est - est.systematic_err);
        assert_relative_eq!(est.systematic_err_r, est.epc_est + est.systematic_err);
    }

    #[test]
    fn test_interleaved_incremental_matches_batch() {
        let lengths = rb_lengths();
        let reference = seed_batches("rb", &lengths, 0.985);
        let interleaved = seed_batches("rb_interleaved", &lengths, 0.975);
        let config = RbConfig::new(vec![lengths]);

        let all = InterleavedRbFitter::new(reference.clone(), interleaved.clone(), config.clone())
            .unwrap();

        let mut inc = InterleavedRbFitter::new(
            reference[0].clone(),
            interleaved[0].clone(),
            config,
        )
        .unwrap();
        inc.add_data(reference[1..].to_vec(), interleaved[1..].to_vec(), true)
            .unwrap();

        assert_eq!(inc.seeds(), all.seeds());
        assert_eq!(inc.fit_interleaved(), all.fit_interleaved());
    }

    // ------------------------------------------------------------------------
    // Reference statistics → guess → fit
    // ------------------------------------------------------------------------

    fn stats(mean: &[f64], std: &[f64]) -> PatternStatistics {
        PatternStatistics {
            mean: mean.to_vec(),
            std: Some(std.to_vec()),
        }
    }

    /// Same path as the fitter: data-driven guess, weighted decay fit, EPC
    fn fit_statistics(config: &RbConfig, index: usize, stats: &PatternStatistics) -> FitResult {
        let nrb = config.patterns.nrb(index);
        let guess = crate::initial_guess(
            stats,
            &config.lengths[index],
            nrb,
            config.fit.default_alpha_guess,
        );
        let fit = rbfit_curve::curve_fit(
            &DecayModel,
            &config.xdata(index),
            &stats.mean,
            stats.sigma(),
            &guess.to_array(),
            &config.fit,
        )
        .unwrap();
        FitResult::from_vectors(nrb, &fit.params, &fit.params_err).unwrap()
    }

    macro_rules! assert_close {
        ($a:expr, $b:expr) => {
            assert_relative_eq!($a, $b, max_relative = 1e-5, epsilon = 1e-8)
        };
    }

    struct ReferenceFit {
        stats: PatternStatistics,
        params: [f64; 3],
        params_err: [f64; 3],
        epc: f64,
        epc_err: f64,
    }

    #[test]
    fn test_reference_fits_from_statistics() {
        let lengths = |step: u64| -> Vec<u64> { (0..10).map(|i| step * (1 + 20 * i)).collect() };
        let cases = vec![
            (
                RbConfig::new(vec![lengths(1), lengths(2)]).with_patterns(vec![vec![0, 1], vec![2]]),
                vec![
                    ReferenceFit {
                        stats: stats(
                            &[
                                0.96367187, 0.73457031, 0.58066406, 0.4828125, 0.41035156,
                                0.34902344, 0.31210938, 0.2765625, 0.29453125, 0.27695313,
                            ],
                            &[
                                0.01013745, 0.0060955, 0.00678272, 0.01746491, 0.02015981,
                                0.02184184, 0.02340167, 0.02360293, 0.00874773, 0.01308156,
                            ],
                        ),
                        params: [0.71936804, 0.98062119, 0.25803749],
                        params_err: [0.0065886, 0.00046714, 0.00556488],
                        epc: 0.014534104912075935,
                        epc_err: 6.923601336318206e-06,
                    },
                    ReferenceFit {
                        stats: stats(
                            &[
                                0.98925781, 0.87734375, 0.78125, 0.73066406, 0.68496094,
                                0.64296875, 0.59238281, 0.57421875, 0.56074219, 0.54980469,
                            ],
                            &[
                                0.00276214, 0.01602991, 0.00768946, 0.01413015, 0.00820777,
                                0.01441348, 0.01272682, 0.01031649, 0.02103036, 0.01224408,
                            ],
                        ),
                        params: [0.49507094, 0.99354093, 0.50027262],
                        params_err: [0.0146191, 0.0004157, 0.01487439],
                        epc: 0.0032295343343508587,
                        epc_err: 1.3512528169626024e-06,
                    },
                ],
            ),
            (
                RbConfig::new(vec![lengths(1)]),
                vec![ReferenceFit {
                    stats: stats(
                        &[
                            0.99199219, 0.93867188, 0.87871094, 0.83945313, 0.79335937,
                            0.74785156, 0.73613281, 0.69414062, 0.67460937, 0.65664062,
                        ],
                        &[
                            0.00567416, 0.00791919, 0.01523437, 0.01462368, 0.01189002,
                            0.01445049, 0.00292317, 0.00317345, 0.00406888, 0.01504794,
                        ],
                    ),
                    params: [0.59599995, 0.99518211, 0.39866989],
                    params_err: [0.08843152, 0.00107311, 0.09074325],
                    epc: 0.0024089464034862673,
                    epc_err: 2.5975709525210163e-06,
                }],
            ),
        ];

        for (config, expected) in &cases {
            for (index, want) in expected.iter().enumerate() {
                let got = fit_statistics(config, index, &want.stats);
                for (g, w) in got.params.to_array().iter().zip(&want.params) {
                    assert_close!(*g, *w);
                }
                for (g, w) in got.params_err.to_array().iter().zip(&want.params_err) {
                    assert_close!(*g, *w);
                }
                assert_close!(got.epc, want.epc);
                assert_close!(got.epc_err, want.epc_err);
            }
        }
    }

    #[test]
    fn test_interleaved_estimates_from_statistics() {
        let config = RbConfig::new(vec![
            (0..10).map(|i| 1 + 10 * i).collect(),
            (0..10).map(|i| 3 + 30 * i).collect(),
        ])
        .with_patterns(vec![vec![0, 2], vec![1]]);

        let reference = [
            stats(
                &[0.9775, 0.79, 0.66, 0.5775, 0.5075, 0.4825, 0.4075, 0.3825, 0.3925, 0.325],
                &[0.0125, 0.02, 0.01, 0.0125, 0.0025, 0.0125, 0.0225, 0.0325, 0.0425, 0.0],
            ),
            stats(
                &[0.985, 0.9425, 0.8875, 0.8225, 0.775, 0.7875, 0.7325, 0.705, 0.69, 0.6175],
                &[0.005, 0.0125, 0.0025, 0.0025, 0.015, 0.0125, 0.0075, 0.01, 0.02, 0.0375],
            ),
        ];
        let interleaved = [
            stats(
                &[0.955, 0.7425, 0.635, 0.4875, 0.44, 0.3625, 0.3575, 0.2875, 0.2975, 0.3075],
                &[0.0, 0.0025, 0.015, 0.0075, 0.055, 0.0075, 0.0075, 0.0025, 0.0025, 0.0075],
            ),
            stats(
                &[0.9775, 0.85, 0.77, 0.7775, 0.6325, 0.615, 0.64, 0.6125, 0.535, 0.55],
                &[0.0075, 0.005, 0.01, 0.0025, 0.0175, 0.005, 0.01, 0.0075, 0.01, 0.005],
            ),
        ];
        // alpha, alpha_err, alpha_c, alpha_c_err, epc_est, epc_est_err, sys, sys_l, sys_r
        let expected = [
            [
                0.9707393978697902,
                0.0028343593038762326,
                0.9661036105117012,
                0.003096602375173838,
                0.003581641505636224,
                0.0032362911276774308,
                0.04030926168967841,
                -0.03672762018404219,
                0.043890903195314634,
            ],
            [
                0.9953124384370953,
                0.0014841466685991903,
                0.9955519189829325,
                0.002194868426034655,
                -0.00012030420629183247,
                0.001331116936065506,
                0.004807865769196562,
                -0.0049281699754883945,
                0.00468756156290473,
            ],
        ];

        for (index, want) in expected.iter().enumerate() {
            // a zero deviation anywhere falls back to an unweighted fit
            assert_eq!(reference[index].sigma().is_some(), index == 1);
            assert_eq!(interleaved[index].sigma().is_some(), index == 1);

            let est = InterleavedFitResult::from_fits(
                config.patterns.nrb(index),
                &fit_statistics(&config, index, &reference[index]),
                &fit_statistics(&config, index, &interleaved[index]),
            );
            let got = [
                est.alpha,
                est.alpha_err,
                est.alpha_c,
                est.alpha_c_err,
                est.epc_est,
                est.epc_est_err,
                est.systematic_err,
                est.systematic_err_l,
                est.systematic_err_r,
            ];
            for (g, w) in got.iter().zip(want) {
                assert_close!(*g, *w);
            }
        }
    }
}
