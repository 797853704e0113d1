//! Named performance indicators

use serde::{Deserialize, Serialize};
use std::fmt;

/// A performance indicator stored per fold
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Indicator {
    /// Binary precision on the positive class
    #[serde(rename = "precision")]
    Precision,
    /// Binary recall on the positive class (detection rate)
    #[serde(rename = "recall")]
    Recall,
    /// False-positive rate, FP / (FP + TN)
    #[serde(rename = "false_positive")]
    FalseAlarmRate,
    /// Binary F1 score
    #[serde(rename = "f-score")]
    FScore,
    /// Fraction of correct hard predictions (hard-label runs only)
    #[serde(rename = "accuracy")]
    Accuracy,
}

impl Indicator {
    /// Columns stored for each threshold of a probabilistic run
    pub const PROBABILISTIC: [Indicator; 4] = [
        Indicator::Precision,
        Indicator::Recall,
        Indicator::FalseAlarmRate,
        Indicator::FScore,
    ];

    /// Columns stored for a hard-label run
    pub const HARD_LABELS: [Indicator; 5] = [
        Indicator::Precision,
        Indicator::Recall,
        Indicator::FalseAlarmRate,
        Indicator::FScore,
        Indicator::Accuracy,
    ];

    /// Report key for this indicator
    pub fn key(&self) -> &'static str {
        match self {
            Indicator::Precision => "precision",
            Indicator::Recall => "recall",
            Indicator::FalseAlarmRate => "false_positive",
            Indicator::FScore => "f-score",
            Indicator::Accuracy => "accuracy",
        }
    }

    /// Human-readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            Indicator::Precision => "Precision",
            Indicator::Recall => "Recall",
            Indicator::FalseAlarmRate => "False alarm rate",
            Indicator::FScore => "F-score",
            Indicator::Accuracy => "Accuracy",
        }
    }

    /// Parse from a report key or a loose spelling
    pub fn from_key(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "precision" => Some(Indicator::Precision),
            "recall" | "detection_rate" => Some(Indicator::Recall),
            "false_positive" | "false_alarm_rate" | "fpr" => Some(Indicator::FalseAlarmRate),
            "f-score" | "fscore" | "f1" => Some(Indicator::FScore),
            "accuracy" => Some(Indicator::Accuracy),
            _ => None,
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
