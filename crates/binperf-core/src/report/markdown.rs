//! Markdown report generation

use std::io::Write;

use crate::error::PerfResult;
use crate::perf::PerfIndicators;

use super::format::{to_percentage, trunc};

/// Thresholds listed in the sweep table of probabilistic runs
const SWEEP_STEP: usize = 10;

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Generate a Markdown report
    pub fn generate(perf: &PerfIndicators) -> PerfResult<String> {
        let mut md = String::new();

        md.push_str("# Performance Indicators\n\n");

        md.push_str("## Overview\n\n");
        md.push_str(&format!("- **Folds**: {}\n", perf.num_folds()));
        md.push_str(&format!("- **Model**: {}\n", perf.mode()));
        if perf.is_probabilistic() {
            md.push_str(&format!("- **Threshold**: {}%\n", perf.default_threshold()));
        }
        md.push('\n');

        md.push_str("## Summary\n\n");
        md.push_str("| Indicator | Mean | Std |\n|-----------|------|-----|\n");
        if let Ok(auc) = perf.auc_summary() {
            md.push_str(&format!(
                "| AUC | {} | {} |\n",
                to_percentage(auc.mean),
                trunc(auc.std)
            ));
        }
        for &indicator in perf.indicators() {
            let summary = perf.summary(indicator, None)?;
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                indicator.display_name(),
                to_percentage(summary.mean),
                trunc(summary.std)
            ));
        }
        md.push('\n');

        if perf.is_probabilistic() {
            md.push_str("## Threshold Sweep\n\n");
            md.push_str("| Threshold |");
            for indicator in perf.indicators() {
                md.push_str(&format!(" {} |", indicator.display_name()));
            }
            md.push_str("\n|-----------|");
            for _ in perf.indicators() {
                md.push_str("------|");
            }
            md.push('\n');

            for threshold in (0..=100u8).step_by(SWEEP_STEP) {
                md.push_str(&format!("| {threshold}% |"));
                for &indicator in perf.indicators() {
                    let mean = perf.get_mean(indicator, Some(threshold))?;
                    md.push_str(&format!(" {} |", to_percentage(mean)));
                }
                md.push('\n');
            }
            md.push('\n');
        }

        Ok(md)
    }

    /// Write the Markdown report to `writer`
    pub fn write<W: Write>(perf: &PerfIndicators, mut writer: W) -> PerfResult<()> {
        writer.write_all(Self::generate(perf)?.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}
