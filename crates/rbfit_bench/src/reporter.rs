//! Fit reporting
//!
//! Gantree: L4_Bench → Reporter
//!
//! Renders an [`RbSummary`] as Markdown, JSON, CSV or plain text.

use crate::summary::{PatternSummary, RbSummary};
use rbfit_fitters::FitResult;
use std::fmt::{self, Write};

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Markdown table
    Markdown,
    /// JSON
    Json,
    /// CSV
    Csv,
    /// Plain text summary
    Text,
}

/// Fit reporter
/// Gantree: Reporter // 결과 리포팅
pub struct Reporter;

impl Reporter {
    // ========================================================================
    // Format Converters
    // ========================================================================

    /// Generate report in specified format
    pub fn report(summary: &RbSummary, format: ReportFormat) -> String {
        match format {
            ReportFormat::Markdown => Self::to_markdown(summary),
            ReportFormat::Json => Self::to_json(summary),
            ReportFormat::Csv => Self::to_csv(summary),
            ReportFormat::Text => Self::to_text(summary),
        }
    }

    /// Convert summary to Markdown tables
    pub fn to_markdown(summary: &RbSummary) -> String {
        render(|output| {
            let stats = summary.statistics();

            writeln!(output, "# RB Fit Results: {}\n", summary.experiment)?;

            writeln!(output, "## Summary\n")?;
            writeln!(output, "- **Patterns**: {}", stats.count)?;
            writeln!(output, "- **Fitted**: {}", stats.fitted)?;
            if stats.fitted > 0 {
                writeln!(output, "- **Mean EPC**: {:.3e}", stats.mean_epc)?;
                writeln!(
                    output,
                    "- **EPC Range**: {:.3e} .. {:.3e}",
                    stats.min_epc, stats.max_epc
                )?;
            }
            writeln!(output)?;

            writeln!(output, "## Decay Fits\n")?;
            writeln!(
                output,
                "| Pattern | Qubits | Seeds | Sequence | A | alpha | B | EPC |"
            )?;
            writeln!(
                output,
                "|---------|--------|-------|----------|---|-------|---|-----|"
            )?;
            for row in &summary.patterns {
                for (sequence, fit) in fit_rows(row, summary.interleaved) {
                    match fit {
                        Some(fit) => writeln!(
                            output,
                            "| {} | {} | {} | {} | {:.4} | {:.5} ± {:.1e} | {:.4} | {:.3e} ± {:.1e} |",
                            row.pattern,
                            row.qubit_list(),
                            row.num_seeds,
                            sequence,
                            fit.params.a,
                            fit.params.alpha,
                            fit.params_err.alpha,
                            fit.params.b,
                            fit.epc,
                            fit.epc_err
                        )?,
                        None => writeln!(
                            output,
                            "| {} | {} | {} | {} | - | - | - | - |",
                            row.pattern,
                            row.qubit_list(),
                            row.num_seeds,
                            sequence
                        )?,
                    }
                }
            }

            if summary.interleaved {
                writeln!(output, "\n## Interleaved Gate Estimate\n")?;
                writeln!(
                    output,
                    "| Pattern | alpha_c | EPC_est | Systematic | Interval |"
                )?;
                writeln!(
                    output,
                    "|---------|---------|---------|------------|----------|"
                )?;
                for row in &summary.patterns {
                    if let Some(e) = &row.estimate {
                        writeln!(
                            output,
                            "| {} | {:.5} ± {:.1e} | {:.3e} ± {:.1e} | {:.3e} | [{:.3e}, {:.3e}] |",
                            row.pattern,
                            e.alpha_c,
                            e.alpha_c_err,
                            e.epc_est,
                            e.epc_est_err,
                            e.systematic_err,
                            e.systematic_err_l,
                            e.systematic_err_r
                        )?;
                    }
                }
            }

            Ok(())
        })
    }

    /// Convert summary to JSON
    pub fn to_json(summary: &RbSummary) -> String {
        let report = serde_json::json!({
            "experiment": summary.experiment,
            "statistics": summary.statistics(),
            "patterns": summary.patterns,
        });

        serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Convert summary to CSV
    ///
    /// One line per pattern and sequence; unfitted rows leave the
    /// numeric columns empty.
    pub fn to_csv(summary: &RbSummary) -> String {
        render(|output| {
            write!(
                output,
                "pattern,qubits,seeds,sequence,a,a_err,alpha,alpha_err,b,b_err,epc,epc_err"
            )?;
            if summary.interleaved {
                write!(
                    output,
                    ",alpha_c,alpha_c_err,epc_est,epc_est_err,systematic_err"
                )?;
            }
            writeln!(output)?;

            for row in &summary.patterns {
                for (sequence, fit) in fit_rows(row, summary.interleaved) {
                    write!(
                        output,
                        "{},{},{},{}",
                        row.pattern,
                        row.qubit_list(),
                        row.num_seeds,
                        sequence
                    )?;
                    match fit {
                        Some(f) => write!(
                            output,
                            ",{},{},{},{},{},{},{},{}",
                            f.params.a,
                            f.params_err.a,
                            f.params.alpha,
                            f.params_err.alpha,
                            f.params.b,
                            f.params_err.b,
                            f.epc,
                            f.epc_err
                        )?,
                        None => write!(output, ",,,,,,,,")?,
                    }
                    if summary.interleaved {
                        match &row.estimate {
                            Some(e) => write!(
                                output,
                                ",{},{},{},{},{}",
                                e.alpha_c, e.alpha_c_err, e.epc_est, e.epc_est_err, e.systematic_err
                            )?,
                            None => write!(output, ",,,,,")?,
                        }
                    }
                    writeln!(output)?;
                }
            }

            Ok(())
        })
    }

    /// Convert summary to plain text
    pub fn to_text(summary: &RbSummary) -> String {
        render(|output| {
            let stats = summary.statistics();
            let title = format!("RB Fit Results: {}", summary.experiment);

            writeln!(output, "{}", title)?;
            writeln!(output, "{}\n", "=".repeat(title.len()))?;

            writeln!(output, "Summary:")?;
            writeln!(output, "  Patterns: {}", stats.count)?;
            writeln!(output, "  Fitted: {}", stats.fitted)?;
            if stats.fitted > 0 {
                writeln!(output, "  Mean EPC: {:.3e}", stats.mean_epc)?;
                writeln!(output, "  Worst EPC: {:.3e}", stats.max_epc)?;
                writeln!(output, "  Best EPC: {:.3e}", stats.min_epc)?;
            }
            writeln!(output)?;

            writeln!(output, "Patterns:")?;
            for row in &summary.patterns {
                writeln!(
                    output,
                    "  [{}] qubits {} ({} seeds)",
                    row.pattern,
                    row.qubit_list(),
                    row.num_seeds
                )?;
                for (sequence, fit) in fit_rows(row, summary.interleaved) {
                    match fit {
                        Some(fit) => writeln!(output, "    {}: {}", sequence, fit)?,
                        None => writeln!(output, "    {}: not fitted", sequence)?,
                    }
                }
                if let Some(e) = &row.estimate {
                    writeln!(output, "    Estimate: {}", e)?;
                    writeln!(
                        output,
                        "    Systematic: {:.3e} [{:.3e}, {:.3e}]",
                        e.systematic_err, e.systematic_err_l, e.systematic_err_r
                    )?;
                }
            }

            Ok(())
        })
    }
}

/// Writes into a `String`, which cannot fail
fn render(f: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut output = String::new();
    let _ = f(&mut output);
    output
}

/// Fits shown for one pattern, labelled by sequence
fn fit_rows(row: &PatternSummary, interleaved: bool) -> Vec<(&'static str, Option<&FitResult>)> {
    if interleaved {
        vec![
            ("reference", row.fit.as_ref()),
            ("interleaved", row.interleaved_fit.as_ref()),
        ]
    } else {
        vec![("standard", row.fit.as_ref())]
    }
}

// ============================================================================
// Tests
// ============================================================================
