//! Per-fold accumulation of binary performance indicators

use tracing::{debug, warn};

use super::indicators::PerfIndicators;
use crate::config::PerfConfig;
use crate::error::{PerfError, PerfResult};
use crate::metrics::{FoldScores, Indicator, roc_auc};
use crate::predictions::{PredictionOutput, Predictions};
use crate::table::{DEFAULT_THRESHOLD, MetricTable, THRESHOLDS, ThresholdKey};

/// Accumulates indicators fold by fold until [`finalize`](Self::finalize)
///
/// Writing the same fold twice overwrites the earlier values. The
/// accumulator is not synchronised; shard per fold and [`merge`](Self::merge)
/// to compute folds in parallel.
#[derive(Debug, Clone)]
pub struct PerfAccumulator {
    num_folds: usize,
    probabilistic: bool,
    default_threshold: u8,
    fold_auc: Option<Vec<f64>>,
    table: MetricTable,
    filled: Vec<bool>,
}

impl PerfAccumulator {
    /// Create an accumulator for `num_folds` folds, with AUC tracking enabled
    pub fn new(num_folds: usize, probabilistic: bool) -> PerfResult<Self> {
        if num_folds == 0 {
            return Err(PerfError::NoFolds);
        }

        let table = if probabilistic {
            MetricTable::swept(&Indicator::PROBABILISTIC, num_folds)
        } else {
            MetricTable::single(&Indicator::HARD_LABELS, num_folds)
        };

        Ok(Self {
            num_folds,
            probabilistic,
            default_threshold: DEFAULT_THRESHOLD,
            fold_auc: Some(vec![0.0; num_folds]),
            table,
            filled: vec![false; num_folds],
        })
    }

    /// Create an accumulator from a run configuration
    pub fn from_config(config: &PerfConfig) -> PerfResult<Self> {
        config.validate()?;
        Self::new(config.num_folds, config.probabilistic)?
            .with_auc_tracking(config.track_auc)
            .with_default_threshold(config.default_threshold)
    }

    /// Enable or disable AUC tracking
    pub fn with_auc_tracking(mut self, track_auc: bool) -> Self {
        self.fold_auc = track_auc.then(|| vec![0.0; self.num_folds]);
        self
    }

    /// Threshold answered by queries that do not name one
    pub fn with_default_threshold(mut self, threshold: u8) -> PerfResult<Self> {
        if !THRESHOLDS.contains(&threshold) {
            return Err(PerfError::ThresholdOutOfRange(threshold));
        }
        self.default_threshold = threshold;
        Ok(self)
    }

    /// Number of folds
    pub fn num_folds(&self) -> usize {
        self.num_folds
    }

    /// Whether thresholds are swept
    pub fn is_probabilistic(&self) -> bool {
        self.probabilistic
    }

    /// Whether AUC is computed per fold
    pub fn tracks_auc(&self) -> bool {
        self.fold_auc.is_some()
    }

    /// Fold ids that have not received predictions yet
    pub fn missing_folds(&self) -> Vec<usize> {
        self.filled
            .iter()
            .enumerate()
            .filter(|(_, filled)| !**filled)
            .map(|(id, _)| id)
            .collect()
    }

    /// Record the predictions of one fold
    pub fn add_fold(&mut self, fold_id: usize, predictions: &Predictions) -> PerfResult<()> {
        if fold_id >= self.num_folds {
            return Err(PerfError::FoldOutOfRange {
                fold_id,
                num_folds: self.num_folds,
            });
        }
        predictions.validate()?;

        // A rejected fold must leave storage untouched
        match (&predictions.output, self.probabilistic) {
            (PredictionOutput::Probabilities(_), true) | (PredictionOutput::Labels { .. }, false) => {}
            (output, probabilistic) => {
                return Err(PerfError::PredictionKind {
                    expected: if probabilistic { "probabilities" } else { "labels" },
                    actual: output.kind(),
                });
            }
        }

        if let Some(fold_auc) = self.fold_auc.as_mut() {
            fold_auc[fold_id] = fold_roc_auc(fold_id, predictions);
        }

        match &predictions.output {
            PredictionOutput::Probabilities(probabilities) => {
                for threshold in THRESHOLDS {
                    let scores =
                        FoldScores::at_threshold(&predictions.ground_truth, probabilities, threshold);
                    self.table
                        .set_row(ThresholdKey::Percent(threshold), fold_id, &scores);
                }
            }
            PredictionOutput::Labels { labels, .. } => {
                let scores = FoldScores::from_labels(&predictions.ground_truth, labels, true);
                self.table.set_row(ThresholdKey::Single, fold_id, &scores);
            }
        }

        self.filled[fold_id] = true;
        debug!(
            fold_id,
            instances = predictions.num_instances(),
            positives = predictions.num_positives(),
            "Recorded fold"
        );
        Ok(())
    }

    /// Fold in the filled folds of another accumulator with the same shape
    ///
    /// Folds filled on both sides take the values from `other`.
    pub fn merge(&mut self, other: PerfAccumulator) -> PerfResult<()> {
        if other.num_folds != self.num_folds {
            return Err(PerfError::IncompatibleMerge(format!(
                "fold counts differ ({} vs {})",
                self.num_folds, other.num_folds
            )));
        }
        if other.probabilistic != self.probabilistic {
            return Err(PerfError::IncompatibleMerge(
                "probabilistic and hard-label runs".to_string(),
            ));
        }
        if other.tracks_auc() != self.tracks_auc() {
            return Err(PerfError::IncompatibleMerge(
                "AUC tracking differs".to_string(),
            ));
        }

        for fold_id in (0..other.num_folds).filter(|&id| other.filled[id]) {
            self.table.copy_row_from(&other.table, fold_id);
            if let (Some(ours), Some(theirs)) = (self.fold_auc.as_mut(), other.fold_auc.as_ref()) {
                ours[fold_id] = theirs[fold_id];
            }
            self.filled[fold_id] = true;
        }
        Ok(())
    }

    /// Reduce the folds to mean/std summaries
    ///
    /// Consumes the accumulator: no fold can be added afterwards, and the
    /// summaries are computed exactly once. Folds that never received
    /// predictions count as zero rows.
    pub fn finalize(self) -> PerfIndicators {
        let missing = self.missing_folds();
        if !missing.is_empty() {
            warn!(?missing, "Finalizing with folds that were never filled");
        }
        debug!(
            num_folds = self.num_folds,
            probabilistic = self.probabilistic,
            "Finalizing performance indicators"
        );
        PerfIndicators::from_parts(
            self.num_folds,
            self.probabilistic,
            self.default_threshold,
            self.fold_auc,
            self.table,
        )
    }
}

/// ROC AUC of one fold, 0 when undefined
fn fold_roc_auc(fold_id: usize, predictions: &Predictions) -> f64 {
    if predictions.num_instances() == 0 || predictions.num_positives() == 0 {
        return 0.0;
    }
    match roc_auc(&predictions.ground_truth, predictions.scores()) {
        Some(auc) if !auc.is_nan() => auc,
        _ => {
            warn!(fold_id, "AUC undefined for fold, recording 0");
            0.0
        }
    }
}
