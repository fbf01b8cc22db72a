//! Column statistics across repetitions
//!
//! Gantree: L2_Curve → SeedStatistics
//!
//! Rows are repetitions (seeds), columns are sequence lengths.

/// Per-column mean
/// Gantree: column_mean(rows) -> Vec<f64> // 평균
///
/// Non-finite entries propagate into the affected column.
pub fn column_mean(rows: &[Vec<f64>]) -> Vec<f64> {
    let Some(width) = rows.first().map(|r| r.len()) else {
        return Vec::new();
    };
    let n = rows.len() as f64;
    (0..width)
        .map(|col| rows.iter().map(|r| r[col]).sum::<f64>() / n)
        .collect()
}

/// Per-column population standard deviation (divisor `n`)
/// Gantree: column_std(rows) -> Vec<f64> // 표준편차
pub fn column_std(rows: &[Vec<f64>]) -> Vec<f64> {
    let means = column_mean(rows);
    let n = rows.len() as f64;
    means
        .iter()
        .enumerate()
        .map(|(col, &mean)| {
            let ss: f64 = rows.iter().map(|r| (r[col] - mean).powi(2)).sum();
            (ss / n).sqrt()
        })
        .collect()
}

/// Whether every entry can serve as a fit weight
///
/// A single zero deviation disables weighting for the whole fit.
pub fn usable_as_sigma(std: &[f64]) -> bool {
    std.iter().all(|&s| s != 0.0)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_column_mean() {
        let rows = vec![vec![1.0, 0.5], vec![0.8, 0.3]];
        let mean = column_mean(&rows);
        assert_relative_eq!(mean[0], 0.9);
        assert_relative_eq!(mean[1], 0.4);
    }

    #[test]
    fn test_column_std_population() {
        let rows = vec![vec![1.0], vec![0.8]];
        // population std of {1.0, 0.8} is 0.1
        assert_relative_eq!(column_std(&rows)[0], 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_single_row_std_is_zero() {
        let rows = vec![vec![0.7, 0.6]];
        assert_eq!(column_std(&rows), vec![0.0, 0.0]);
    }

    #[test]
    fn test_empty() {
        assert!(column_mean(&[]).is_empty());
        assert!(column_std(&[]).is_empty());
    }

    #[test]
    fn test_nan_propagates() {
        let rows = vec![vec![f64::NAN, 0.5], vec![0.4, 0.5]];
        let mean = column_mean(&rows);
        assert!(mean[0].is_nan());
        assert_eq!(mean[1], 0.5);
    }

    #[test]
    fn test_usable_as_sigma() {
        assert!(usable_as_sigma(&[0.01, 0.02]));
        assert!(!usable_as_sigma(&[0.01, 0.0]));
    }
}
