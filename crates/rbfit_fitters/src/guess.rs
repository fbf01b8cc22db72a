//! Initial guess for the decay fit
//!
//! Gantree: L3_Fitters → Guess
//!
//! Starts from the fully depolarized floor `B0 = 1/nrb` and solves for
//! `alpha0` from the first two length points.

use crate::data::PatternStatistics;
use log::warn;
use rbfit_core::CliffordLength;
use rbfit_curve::DecayParams;

/// Data-driven starting point for one pattern
/// Gantree: initial_guess(stats,lengths,nrb,default) -> DecayParams // 초기값
///
/// `alpha0 = ((y1-B0)/(y0-B0))^(1/(L1-L0))` is kept only when it is below 1;
/// otherwise `default_alpha` is used. `A0` is then chosen so the curve
/// passes through the first mean.
pub fn initial_guess(
    stats: &PatternStatistics,
    lengths: &[CliffordLength],
    nrb: f64,
    default_alpha: f64,
) -> DecayParams {
    let b0 = 1.0 / nrb;
    let Some(&y0) = stats.mean.first() else {
        return DecayParams::new(0.0, default_alpha, b0);
    };
    let l0 = lengths.first().copied().unwrap_or(0) as f64;

    let alpha0 = decay_estimate(stats, lengths, b0)
        .filter(|&a| a < 1.0)
        .unwrap_or_else(|| {
            warn!(
                "alpha guess rejected, falling back to {}",
                default_alpha
            );
            default_alpha
        });

    let a0 = (y0 - b0) / alpha0.powf(l0);
    DecayParams::new(a0, alpha0, b0)
}

/// `dy^(1/dL)` from the first two points, if defined
fn decay_estimate(stats: &PatternStatistics, lengths: &[CliffordLength], b0: f64) -> Option<f64> {
    let (&y0, &y1) = (stats.mean.first()?, stats.mean.get(1)?);
    let (&l0, &l1) = (lengths.first()?, lengths.get(1)?);
    if l1 <= l0 {
        return None;
    }
    let dy = (y1 - b0) / (y0 - b0);
    let alpha = dy.powf(1.0 / (l1 - l0) as f64);
    alpha.is_finite().then_some(alpha)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn stats(mean: Vec<f64>) -> PatternStatistics {
        PatternStatistics { mean, std: None }
    }

    #[test]
    fn test_exact_decay_is_recovered() {
        let (a, alpha, b) = (0.5, 0.98_f64, 0.5);
        let lengths = [1, 21, 41];
        let mean = lengths
            .iter()
            .map(|&m| a * alpha.powf(m as f64) + b)
            .collect();

        let guess = initial_guess(&stats(mean), &lengths, 2.0, 0.99);
        assert_relative_eq!(guess.alpha, alpha, max_relative = 1e-10);
        assert_relative_eq!(guess.a, a, max_relative = 1e-10);
        assert_eq!(guess.b, 0.5);
    }

    #[test]
    fn test_growth_falls_back() {
        // second point above the first gives dy > 1
        let guess = initial_guess(&stats(vec![0.8, 0.9]), &[1, 11], 2.0, 0.99);
        assert_eq!(guess.alpha, 0.99);
        assert_relative_eq!(guess.a, 0.3 / 0.99, max_relative = 1e-12);
    }

    #[test]
    fn test_negative_ratio_falls_back() {
        // first point below the floor, second above: fractional power of a negative number
        let guess = initial_guess(&stats(vec![0.2, 0.3]), &[1, 4], 4.0, 0.99);
        assert_eq!(guess.alpha, 0.99);
        assert_eq!(guess.b, 0.25);
    }

    #[test]
    fn test_repeated_length_falls_back() {
        let guess = initial_guess(&stats(vec![0.9, 0.85]), &[5, 5], 2.0, 0.97);
        assert_eq!(guess.alpha, 0.97);
    }

    #[test]
    fn test_single_point() {
        let guess = initial_guess(&stats(vec![0.9]), &[0], 2.0, 0.99);
        assert_eq!(guess.alpha, 0.99);
        assert_relative_eq!(guess.a, 0.4, max_relative = 1e-12);
    }
}
