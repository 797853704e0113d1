//! Finalized performance indicators

use std::collections::BTreeMap;
use std::io::Write;

use super::stats::Summary;
use crate::error::{PerfError, PerfResult};
use crate::metrics::Indicator;
use crate::report::{CsvReporter, JsonReporter, MarkdownReporter};
use crate::table::{MetricTable, THRESHOLDS, ThresholdKey};

/// Mean/std summaries of a finished cross-validation run
///
/// Obtained from [`PerfAccumulator::finalize`](super::PerfAccumulator::finalize).
/// Threshold arguments default to the run's default threshold (50 unless
/// configured) and are ignored for hard-label runs.
#[derive(Debug, Clone)]
pub struct PerfIndicators {
    num_folds: usize,
    probabilistic: bool,
    default_threshold: u8,
    fold_auc: Option<Vec<f64>>,
    auc: Option<Summary>,
    table: MetricTable,
    summaries: BTreeMap<ThresholdKey, BTreeMap<Indicator, Summary>>,
}

impl PerfIndicators {
    pub(super) fn from_parts(
        num_folds: usize,
        probabilistic: bool,
        default_threshold: u8,
        fold_auc: Option<Vec<f64>>,
        table: MetricTable,
    ) -> Self {
        let auc = fold_auc.as_deref().map(Summary::population);

        let summaries = table
            .keys()
            .map(|key| {
                let per_indicator = table
                    .columns()
                    .iter()
                    .filter_map(|&indicator| {
                        let values = table.column(key, indicator)?;
                        Some((indicator, Summary::sample(&values)))
                    })
                    .collect();
                (key, per_indicator)
            })
            .collect();

        Self {
            num_folds,
            probabilistic,
            default_threshold,
            fold_auc,
            auc,
            table,
            summaries,
        }
    }

    /// Number of folds
    pub fn num_folds(&self) -> usize {
        self.num_folds
    }

    /// Whether the run swept thresholds
    pub fn is_probabilistic(&self) -> bool {
        self.probabilistic
    }

    /// Threshold used when a query does not name one
    pub fn default_threshold(&self) -> u8 {
        self.default_threshold
    }

    /// Whether AUC was tracked
    pub fn tracks_auc(&self) -> bool {
        self.auc.is_some()
    }

    /// Indicators stored for each fold
    pub fn indicators(&self) -> &'static [Indicator] {
        self.table.columns()
    }

    /// Mode name used in error messages
    pub fn mode(&self) -> &'static str {
        if self.probabilistic {
            "probabilistic"
        } else {
            "hard-label"
        }
    }

    fn key_for(&self, threshold: Option<u8>) -> PerfResult<ThresholdKey> {
        if !self.probabilistic {
            return Ok(ThresholdKey::Single);
        }
        let threshold = threshold.unwrap_or(self.default_threshold);
        if !THRESHOLDS.contains(&threshold) {
            return Err(PerfError::ThresholdOutOfRange(threshold));
        }
        Ok(ThresholdKey::Percent(threshold))
    }

    fn check_tracked(&self, indicator: Indicator) -> PerfResult<()> {
        if self.table.tracks(indicator) {
            Ok(())
        } else {
            Err(PerfError::UntrackedIndicator {
                indicator,
                mode: self.mode(),
            })
        }
    }

    /// Mean and std of an indicator at a threshold
    pub fn summary(&self, indicator: Indicator, threshold: Option<u8>) -> PerfResult<Summary> {
        self.check_tracked(indicator)?;
        let key = self.key_for(threshold)?;
        self.summaries
            .get(&key)
            .and_then(|s| s.get(&indicator))
            .copied()
            .ok_or(PerfError::UntrackedIndicator {
                indicator,
                mode: self.mode(),
            })
    }

    /// Mean of an indicator at a threshold
    pub fn get_mean(&self, indicator: Indicator, threshold: Option<u8>) -> PerfResult<f64> {
        Ok(self.summary(indicator, threshold)?.mean)
    }

    /// Standard deviation of an indicator at a threshold
    pub fn get_std(&self, indicator: Indicator, threshold: Option<u8>) -> PerfResult<f64> {
        Ok(self.summary(indicator, threshold)?.std)
    }

    /// Per-fold values of an indicator at a threshold
    pub fn fold_values(&self, indicator: Indicator, threshold: Option<u8>) -> PerfResult<Vec<f64>> {
        self.check_tracked(indicator)?;
        let key = self.key_for(threshold)?;
        self.table
            .column(key, indicator)
            .ok_or(PerfError::UntrackedIndicator {
                indicator,
                mode: self.mode(),
            })
    }

    pub fn get_false_alarm_rate(&self, threshold: Option<u8>) -> PerfResult<f64> {
        self.get_mean(Indicator::FalseAlarmRate, threshold)
    }

    /// Detection rate, the same quantity as recall
    pub fn get_detection_rate(&self, threshold: Option<u8>) -> PerfResult<f64> {
        self.get_mean(Indicator::Recall, threshold)
    }

    pub fn get_precision(&self, threshold: Option<u8>) -> PerfResult<f64> {
        self.get_mean(Indicator::Precision, threshold)
    }

    pub fn get_recall(&self, threshold: Option<u8>) -> PerfResult<f64> {
        self.get_mean(Indicator::Recall, threshold)
    }

    pub fn get_f_score(&self, threshold: Option<u8>) -> PerfResult<f64> {
        self.get_mean(Indicator::FScore, threshold)
    }

    /// Accuracy, only tracked for hard-label runs
    pub fn get_accuracy(&self, threshold: Option<u8>) -> PerfResult<f64> {
        self.get_mean(Indicator::Accuracy, threshold)
    }

    /// Mean AUC across folds
    pub fn get_auc(&self) -> PerfResult<f64> {
        Ok(self.auc_summary()?.mean)
    }

    /// Mean and population std of the per-fold AUC
    pub fn auc_summary(&self) -> PerfResult<Summary> {
        self.auc.ok_or(PerfError::AucNotTracked)
    }

    /// Per-fold AUC values, `None` when AUC is not tracked
    pub fn fold_auc(&self) -> Option<&[f64]> {
        self.fold_auc.as_deref()
    }

    /// Header of the tabular export
    pub fn csv_header(&self) -> [&'static str; 4] {
        CsvReporter::HEADER
    }

    /// `[auc, fscore, precision, recall]` at the default threshold
    pub fn csv_line(&self) -> PerfResult<[f64; 4]> {
        CsvReporter::line(self)
    }

    /// Write the header and the data row as CSV
    pub fn write_csv<W: Write>(&self, writer: W) -> PerfResult<()> {
        CsvReporter::write(self, writer)
    }

    /// Structured report as a JSON value
    pub fn to_json_value(&self) -> PerfResult<serde_json::Value> {
        JsonReporter::to_value(self)
    }

    /// Write the pretty-printed structured report
    pub fn write_json<W: Write>(&self, writer: W) -> PerfResult<()> {
        JsonReporter::write(self, writer)
    }

    /// Markdown summary at the default threshold
    pub fn to_markdown(&self) -> PerfResult<String> {
        MarkdownReporter::generate(self)
    }
}
