//! Structured (JSON) report
//!
//! Layout:
//! - `auc`: top-level leaf, present when AUC is tracked
//! - hard-label runs: one top-level leaf per indicator
//! - probabilistic runs: `thresholds`, an array of 101 objects (index =
//!   percent threshold) holding one leaf per indicator
//!
//! Each leaf is `{"mean": "<pct>%", "std": <4-decimal number>}`.

use std::collections::BTreeMap;
use std::io::Write;

use serde::{Deserialize, Serialize};

use super::format::{to_percentage, trunc};
use crate::error::PerfResult;
use crate::metrics::Indicator;
use crate::perf::{PerfIndicators, Summary};
use crate::table::THRESHOLDS;

/// Formatted mean/std leaf
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatEntry {
    /// Mean as a truncated percentage string
    pub mean: String,
    /// Standard deviation truncated to four decimals
    pub std: f64,
}

impl From<Summary> for StatEntry {
    fn from(summary: Summary) -> Self {
        Self {
            mean: to_percentage(summary.mean),
            std: trunc(summary.std),
        }
    }
}

/// Structured report document
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auc: Option<StatEntry>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<Vec<BTreeMap<Indicator, StatEntry>>>,

    #[serde(flatten)]
    pub indicators: BTreeMap<Indicator, StatEntry>,
}

impl JsonReport {
    /// Build the document from finalized indicators
    pub fn from_indicators(perf: &PerfIndicators) -> PerfResult<Self> {
        let auc = perf.auc_summary().ok().map(StatEntry::from);

        let leaves = |threshold: Option<u8>| -> PerfResult<BTreeMap<Indicator, StatEntry>> {
            perf.indicators()
                .iter()
                .map(|&indicator| Ok((indicator, perf.summary(indicator, threshold)?.into())))
                .collect()
        };

        if perf.is_probabilistic() {
            let thresholds = THRESHOLDS
                .map(|t| leaves(Some(t)))
                .collect::<PerfResult<Vec<_>>>()?;
            Ok(Self {
                auc,
                thresholds: Some(thresholds),
                indicators: BTreeMap::new(),
            })
        } else {
            Ok(Self {
                auc,
                thresholds: None,
                indicators: leaves(None)?,
            })
        }
    }
}

/// JSON report generator
pub struct JsonReporter;

impl JsonReporter {
    /// Report as a JSON value
    pub fn to_value(perf: &PerfIndicators) -> PerfResult<serde_json::Value> {
        Ok(serde_json::to_value(JsonReport::from_indicators(perf)?)?)
    }

    /// Pretty-printed report
    pub fn generate(perf: &PerfIndicators) -> PerfResult<String> {
        Ok(serde_json::to_string_pretty(&JsonReport::from_indicators(perf)?)?)
    }

    /// Write the pretty-printed report to `writer`
    pub fn write<W: Write>(perf: &PerfIndicators, mut writer: W) -> PerfResult<()> {
        serde_json::to_writer_pretty(&mut writer, &JsonReport::from_indicators(perf)?)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perf::PerfAccumulator;
    use crate::predictions::Predictions;
    use serde_json::json;

    #[test]
    fn test_hard_label_layout() {
        // TP=3, FP=1, FN=2, TN=1
        let mut acc = PerfAccumulator::new(1, false).unwrap();
        acc.add_fold(
            0,
            &Predictions::with_labels(
                vec![true, true, true, true, true, false, false],
                vec![true, true, true, false, false, true, false],
                vec![0.9, 0.8, 0.7, 0.3, 0.2, 0.6, 0.1],
            ),
        )
        .unwrap();
        let value = acc.finalize().to_json_value().unwrap();

        assert_eq!(value["precision"], json!({"mean": "75.0%", "std": 0.0}));
        assert_eq!(value["recall"]["mean"], "60.0%");
        assert_eq!(value["false_positive"]["mean"], "50.0%");
        assert!(value.get("accuracy").is_some());
        assert!(value.get("f-score").is_some());
        assert!(value.get("auc").is_some());
        assert!(value.get("thresholds").is_none());
        assert_eq!(value.as_object().unwrap().len(), 6);
    }

    #[test]
    fn test_probabilistic_layout() {
        let mut acc = PerfAccumulator::new(1, true).unwrap().with_auc_tracking(false);
        acc.add_fold(0, &Predictions::probabilistic(vec![true, false], vec![0.7, 0.2]))
            .unwrap();
        let value = acc.finalize().to_json_value().unwrap();

        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        let thresholds = value["thresholds"].as_array().unwrap();
        assert_eq!(thresholds.len(), 101);
        assert_eq!(thresholds[50]["recall"]["mean"], "100.0%");
        assert_eq!(thresholds[100]["recall"]["mean"], "0.0%");
        assert!(thresholds[50].get("accuracy").is_none());
        assert_eq!(thresholds[0].as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_std_truncated() {
        let mut acc = PerfAccumulator::new(3, false).unwrap();
        let good = Predictions::with_labels(vec![true, false], vec![true, false], vec![1.0, 0.0]);
        let bad = Predictions::with_labels(vec![true, false], vec![false, true], vec![0.0, 1.0]);
        acc.add_fold(0, &good).unwrap();
        acc.add_fold(1, &good).unwrap();
        acc.add_fold(2, &bad).unwrap();
        let value = acc.finalize().to_json_value().unwrap();

        // recall values [1, 1, 0]: mean 2/3, sample std sqrt(1/3)
        assert_eq!(value["recall"]["mean"], "66.66%");
        assert_eq!(value["recall"]["std"], 0.5773);
        // AUC values [1, 1, 0]: population std sqrt(2/9)
        assert_eq!(value["auc"]["std"], 0.4714);
    }
}
