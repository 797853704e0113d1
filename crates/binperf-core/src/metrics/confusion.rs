//! Binary confusion counts and the per-fold indicator policies

use std::fmt;

use super::Indicator;

/// 2x2 confusion counts with labels ordered `[true, false]`
///
/// `true` is the positive class. Rows are ground truth, columns predictions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BinaryConfusion {
    /// Positive instances predicted positive
    pub tp: usize,
    /// Negative instances predicted positive
    pub fp: usize,
    /// Positive instances predicted negative
    pub fn_: usize,
    /// Negative instances predicted negative
    pub tn: usize,
}

impl BinaryConfusion {
    /// Count outcomes over aligned ground truth and predicted labels
    ///
    /// Extra trailing values on either side are ignored; callers validate
    /// lengths beforehand.
    pub fn from_labels(ground_truth: &[bool], predicted: &[bool]) -> Self {
        let mut cm = Self::default();
        for (&truth, &pred) in ground_truth.iter().zip(predicted.iter()) {
            cm.record(truth, pred);
        }
        cm
    }

    /// Count one instance
    pub fn record(&mut self, truth: bool, predicted: bool) {
        match (truth, predicted) {
            (true, true) => self.tp += 1,
            (false, true) => self.fp += 1,
            (true, false) => self.fn_ += 1,
            (false, false) => self.tn += 1,
        }
    }

    /// Total number of counted instances
    pub fn total(&self) -> usize {
        self.tp + self.fp + self.fn_ + self.tn
    }

    /// Number of positive ground-truth instances
    pub fn positives(&self) -> usize {
        self.tp + self.fn_
    }

    /// Number of negative ground-truth instances
    pub fn negatives(&self) -> usize {
        self.fp + self.tn
    }

    /// TP / (TP + FP), 0 when nothing is predicted positive
    pub fn precision(&self) -> f64 {
        ratio(self.tp, self.tp + self.fp)
    }

    /// TP / (TP + FN), 0 when there are no positives
    pub fn recall(&self) -> f64 {
        ratio(self.tp, self.positives())
    }

    /// Binary F1 as 2TP / (2TP + FP + FN), 0 on a zero denominator
    pub fn f_score(&self) -> f64 {
        ratio(2 * self.tp, 2 * self.tp + self.fp + self.fn_)
    }

    /// (TP + TN) / total, 0 on empty input
    pub fn accuracy(&self) -> f64 {
        ratio(self.tp + self.tn, self.total())
    }

    /// FP / (FP + TN), 0 when there are no negative ground-truth instances
    pub fn false_alarm_rate(&self) -> f64 {
        ratio(self.fp, self.negatives())
    }
}

impl fmt::Display for BinaryConfusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>12} {:>8} {:>8}", "", "Pred T", "Pred F")?;
        writeln!(f, "{:>12} {:>8} {:>8}", "True T", self.tp, self.fn_)?;
        writeln!(f, "{:>12} {:>8} {:>8}", "True F", self.fp, self.tn)
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

/// Precision, recall and F-score with the degenerate-input guards
///
/// - Empty ground truth gives `(0, 0, 0)`.
/// - When some label value present in the ground truth never appears in the
///   predictions (constant predictions), precision and F-score are 0.
/// - Recall is 0 when the ground truth holds no positive instance.
pub fn precision_recall_fscore(ground_truth: &[bool], predicted: &[bool]) -> (f64, f64, f64) {
    BinaryConfusion::from_labels(ground_truth, predicted).guarded_scores()
}

impl BinaryConfusion {
    /// [`precision_recall_fscore`] over counts that are already tallied
    pub fn guarded_scores(&self) -> (f64, f64, f64) {
        if self.total() == 0 {
            return (0.0, 0.0, 0.0);
        }

        let predicted_has_true = self.tp + self.fp > 0;
        let predicted_has_false = self.fn_ + self.tn > 0;
        let uncovered = (self.positives() > 0 && !predicted_has_true)
            || (self.negatives() > 0 && !predicted_has_false);

        let (precision, f_score) = if uncovered {
            (0.0, 0.0)
        } else {
            (self.precision(), self.f_score())
        };

        (precision, self.recall(), f_score)
    }
}

/// Indicator values computed for one fold (and one threshold)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FoldScores {
    pub precision: f64,
    pub recall: f64,
    pub false_alarm_rate: f64,
    pub f_score: f64,
    /// Only computed for hard-label runs
    pub accuracy: Option<f64>,
}

impl FoldScores {
    /// Scores for hard predicted labels
    pub fn from_labels(ground_truth: &[bool], predicted: &[bool], with_accuracy: bool) -> Self {
        Self::from_confusion(&BinaryConfusion::from_labels(ground_truth, predicted), with_accuracy)
    }

    /// Scores from tallied counts; false-alarm rate is 0 with no predictions
    pub fn from_confusion(cm: &BinaryConfusion, with_accuracy: bool) -> Self {
        let (precision, recall, f_score) = cm.guarded_scores();
        let false_alarm_rate = if cm.total() == 0 {
            0.0
        } else {
            cm.false_alarm_rate()
        };
        let accuracy = with_accuracy.then(|| cm.accuracy());

        Self {
            precision,
            recall,
            false_alarm_rate,
            f_score,
            accuracy,
        }
    }

    /// Scores for labels derived as `probability > threshold / 100`
    pub fn at_threshold(ground_truth: &[bool], probabilities: &[f64], threshold: u8) -> Self {
        let cut = f64::from(threshold) / 100.0;
        let mut cm = BinaryConfusion::default();
        for (&truth, &p) in ground_truth.iter().zip(probabilities) {
            cm.record(truth, p > cut);
        }
        Self::from_confusion(&cm, false)
    }

    /// Value of one indicator, `None` for accuracy when it was not computed
    pub fn get(&self, indicator: Indicator) -> Option<f64> {
        match indicator {
            Indicator::Precision => Some(self.precision),
            Indicator::Recall => Some(self.recall),
            Indicator::FalseAlarmRate => Some(self.false_alarm_rate),
            Indicator::FScore => Some(self.f_score),
            Indicator::Accuracy => self.accuracy,
        }
    }
}
