//! Plot series export
//!
//! Gantree: L4_Bench → PlotData
//!
//! Collects what an RB figure shows (per-seed points, the seed mean with
//! error bars, the fitted decay, and the annotation label) as plain
//! series. Rendering is left to the caller.

use rbfit_core::{RbError, RbResult};
use rbfit_fitters::{InterleavedRbFitter, RbFitter, Sequence};
use serde::{Deserialize, Serialize};

/// X axis label
pub const X_LABEL: &str = "Clifford Length";

/// Y axis label
pub const Y_LABEL: &str = "Ground State Population";

/// How a series is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesKind {
    /// Unconnected markers
    Scatter,
    /// Dashed line with error bars
    ErrorBar,
    /// Solid line
    Line,
}

/// One drawable series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Legend entry
    pub name: String,
    /// Drawing style
    pub kind: SeriesKind,
    /// Clifford lengths
    pub x: Vec<f64>,
    /// Values at `x`
    pub y: Vec<f64>,
    /// Error bar half-widths
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_err: Option<Vec<f64>>,
}

/// Everything one RB figure displays
/// Gantree: PlotData // 플롯 데이터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotData {
    /// Pattern the figure belongs to
    pub pattern: usize,
    /// X axis label
    pub x_label: String,
    /// Y axis label
    pub y_label: String,
    /// Series in drawing order
    pub series: Vec<Series>,
    /// Annotation box text (fit summary)
    pub label: Option<String>,
}

impl PlotData {
    fn empty(pattern: usize) -> Self {
        Self {
            pattern,
            x_label: X_LABEL.to_string(),
            y_label: Y_LABEL.to_string(),
            series: Vec::new(),
            label: None,
        }
    }

    // ========================================================================
    // Builders
    // ========================================================================

    /// Figure of one pattern of a standard RB fitter
    /// Gantree: from_fitter(fitter, pattern) -> PlotData // RB 플롯
    ///
    /// Requires computed statistics. The fit curve and label are present
    /// only if the pattern has been fitted.
    pub fn from_fitter(fitter: &RbFitter, pattern: usize) -> RbResult<Self> {
        let stats = pattern_statistics(fitter, pattern)?;
        let x = fitter.config().xdata(pattern);
        let mut plot = Self::empty(pattern);

        plot.push_seeds(fitter, pattern, "Seed", &x);
        plot.series.push(Series {
            name: "Mean".to_string(),
            kind: SeriesKind::ErrorBar,
            x: x.clone(),
            y: stats.mean.clone(),
            y_err: stats.std.clone(),
        });

        if let Some(fit) = fitter.fit().get(pattern).and_then(Option::as_ref) {
            plot.series.push(Series {
                name: "Fit".to_string(),
                kind: SeriesKind::Line,
                y: fitter.decay_model().curve(&x, &fit.params),
                x,
                y_err: None,
            });
            plot.label = Some(fit.to_string());
        }

        Ok(plot)
    }

    /// Figure of one pattern of an interleaved RB fitter
    ///
    /// Shows both sequences' seed points and fitted curves; the label
    /// carries the interleaved gate estimate.
    pub fn from_interleaved(fitter: &InterleavedRbFitter, pattern: usize) -> RbResult<Self> {
        let mut plot = Self::empty(pattern);

        for sequence in Sequence::ALL {
            let child = fitter.fitter(sequence);
            pattern_statistics(child, pattern)?;
            let x = child.config().xdata(pattern);
            plot.push_seeds(child, pattern, &sequence.to_string(), &x);

            if let Some(fit) = child.fit().get(pattern).and_then(Option::as_ref) {
                plot.series.push(Series {
                    name: sequence.to_string(),
                    kind: SeriesKind::Line,
                    y: child.decay_model().curve(&x, &fit.params),
                    x,
                    y_err: None,
                });
            }
        }

        plot.label = fitter
            .fit_interleaved()
            .get(pattern)
            .map(ToString::to_string);
        Ok(plot)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Series with the given name
    pub fn series_named(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Series of one drawing style
    pub fn series_of(&self, kind: SeriesKind) -> impl Iterator<Item = &Series> {
        self.series.iter().filter(move |s| s.kind == kind)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> RbResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn push_seeds(&mut self, fitter: &RbFitter, pattern: usize, prefix: &str, x: &[f64]) {
        let Some(rows) = fitter.raw_data().pattern(pattern) else {
            return;
        };
        for (seed, row) in fitter.seeds().iter().zip(rows) {
            self.series.push(Series {
                name: format!("{} {}", prefix, seed),
                kind: SeriesKind::Scatter,
                x: x.to_vec(),
                y: row.clone(),
                y_err: None,
            });
        }
    }
}

fn pattern_statistics(
    fitter: &RbFitter,
    pattern: usize,
) -> RbResult<&rbfit_fitters::PatternStatistics> {
    if pattern >= fitter.patterns().len() {
        return Err(RbError::PatternOutOfRange {
            index: pattern,
            count: fitter.patterns().len(),
        });
    }
    fitter.statistics().get(pattern).ok_or(RbError::NoResults)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::SyntheticRb;
    use rbfit_curve::DecayParams;
    use rbfit_fitters::RbConfig;

    fn fitted() -> RbFitter {
        let lengths = vec![1, 10, 20, 50, 100];
        let gen = SyntheticRb::single_qubit(lengths.clone(), DecayParams::new(0.5, 0.97, 0.5))
            .unwrap()
            .with_shots(4000);
        RbFitter::new(gen.generate(0..3).unwrap(), RbConfig::new(vec![lengths])).unwrap()
    }

    #[test]
    fn test_rb_plot_series() {
        let fitter = fitted();
        let plot = PlotData::from_fitter(&fitter, 0).unwrap();

        assert_eq!(plot.series_of(SeriesKind::Scatter).count(), 3);
        assert_eq!(plot.series_named("Seed 2").unwrap().y.len(), 5);

        let mean = plot.series_named("Mean").unwrap();
        assert_eq!(mean.x, vec![1.0, 10.0, 20.0, 50.0, 100.0]);
        assert_eq!(mean.y_err.as_ref().map(Vec::len), Some(5));

        let fit = plot.series_named("Fit").unwrap();
        assert!(fit.y.windows(2).all(|w| w[1] < w[0]));

        let label = plot.label.unwrap();
        assert!(label.starts_with("alpha: 0.9"));
        assert!(label.contains("EPC: "));
    }

    #[test]
    fn test_pattern_out_of_range() {
        let err = PlotData::from_fitter(&fitted(), 1).unwrap_err();
        assert!(matches!(err, RbError::PatternOutOfRange { index: 1, count: 1 }));
    }

    #[test]
    fn test_interleaved_plot() {
        let lengths = vec![1, 10, 20, 50, 100];
        let reference =
            SyntheticRb::single_qubit(lengths.clone(), DecayParams::new(0.5, 0.98, 0.5))
                .unwrap()
                .with_shots(4000);
        let interleaved =
            SyntheticRb::single_qubit(lengths.clone(), DecayParams::new(0.5, 0.96, 0.5))
                .unwrap()
                .with_shots(4000)
                .with_experiment_type("rb_interleaved")
                .with_rng_seed(7);

        let fitter = InterleavedRbFitter::new(
            reference.generate(0..2).unwrap(),
            interleaved.generate(0..2).unwrap(),
            RbConfig::new(vec![lengths]),
        )
        .unwrap();

        let plot = PlotData::from_interleaved(&fitter, 0).unwrap();
        assert_eq!(plot.series_of(SeriesKind::Scatter).count(), 4);
        assert_eq!(plot.series_of(SeriesKind::Line).count(), 2);
        assert!(plot.series_named("Standard RB 0").is_some());
        assert!(plot.series_named("Interleaved RB").is_some());
        assert!(plot.label.unwrap().contains("alpha_c: "));
    }

    #[test]
    fn test_plot_json() {
        let json = PlotData::from_fitter(&fitted(), 0).unwrap().to_json().unwrap();
        assert!(json.contains("\"x_label\": \"Clifford Length\""));
        assert!(json.contains("\"kind\": \"ErrorBar\""));
    }
}
