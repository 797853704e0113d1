//! Per-fold prediction bundles
//!
//! A fold's predictions pair the ground-truth labels with either the
//! probabilities of a probabilistic model, or the hard labels and raw scores
//! of any other classifier.

use serde::{Deserialize, Serialize};

use crate::error::{PerfError, PerfResult};

/// Model output for one fold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionOutput {
    /// Probability of the positive class for each instance
    Probabilities(Vec<f64>),
    /// Hard predicted labels plus the (uncalibrated) scores used for AUC
    Labels { labels: Vec<bool>, scores: Vec<f64> },
}

impl PredictionOutput {
    /// Short name of the output kind
    pub fn kind(&self) -> &'static str {
        match self {
            PredictionOutput::Probabilities(_) => "probabilities",
            PredictionOutput::Labels { .. } => "labels",
        }
    }
}

/// Predictions and ground truth for the test instances of one fold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predictions {
    /// Ground-truth binary labels, aligned with the instances
    pub ground_truth: Vec<bool>,
    /// Model output
    pub output: PredictionOutput,
}

impl Predictions {
    /// Predictions of a probabilistic model
    pub fn probabilistic(ground_truth: Vec<bool>, probabilities: Vec<f64>) -> Self {
        Self {
            ground_truth,
            output: PredictionOutput::Probabilities(probabilities),
        }
    }

    /// Predictions of a model producing hard labels and scores
    pub fn with_labels(ground_truth: Vec<bool>, labels: Vec<bool>, scores: Vec<f64>) -> Self {
        Self {
            ground_truth,
            output: PredictionOutput::Labels { labels, scores },
        }
    }

    /// Number of instances in the fold
    pub fn num_instances(&self) -> usize {
        self.ground_truth.len()
    }

    /// Number of positive ground-truth instances
    pub fn num_positives(&self) -> usize {
        self.ground_truth.iter().filter(|&&t| t).count()
    }

    /// Whether the output holds probabilities
    pub fn is_probabilistic(&self) -> bool {
        matches!(self.output, PredictionOutput::Probabilities(_))
    }

    /// Scores ranked for AUC: probabilities, or the raw scores
    pub fn scores(&self) -> &[f64] {
        match &self.output {
            PredictionOutput::Probabilities(p) => p,
            PredictionOutput::Labels { scores, .. } => scores,
        }
    }

    /// Check that every output vector is aligned with the ground truth
    pub fn validate(&self) -> PerfResult<()> {
        let expected = self.ground_truth.len();
        let check = |field: &'static str, actual: usize| {
            if actual == expected {
                Ok(())
            } else {
                Err(PerfError::LengthMismatch {
                    field,
                    expected,
                    actual,
                })
            }
        };

        match &self.output {
            PredictionOutput::Probabilities(p) => check("probabilities", p.len()),
            PredictionOutput::Labels { labels, scores } => {
                check("labels", labels.len())?;
                check("scores", scores.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_aligned() {
        let p = Predictions::probabilistic(vec![true, false], vec![0.7, 0.1]);
        assert!(p.validate().is_ok());
        assert_eq!(p.num_instances(), 2);
        assert_eq!(p.num_positives(), 1);
        assert!(p.is_probabilistic());
    }

    #[test]
    fn test_validate_mismatched_scores() {
        let p = Predictions::with_labels(vec![true, false], vec![true, false], vec![0.3]);
        assert_eq!(
            p.validate(),
            Err(PerfError::LengthMismatch {
                field: "scores",
                expected: 2,
                actual: 1,
            })
        );
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = r#"{
            "ground_truth": [true, false, true],
            "output": {"labels": {"labels": [true, false, false], "scores": [2.1, -0.4, 0.3]}}
        }"#;
        let p: Predictions = serde_json::from_str(json).unwrap();
        assert!(!p.is_probabilistic());
        assert_eq!(p.scores(), &[2.1, -0.4, 0.3]);
        assert_eq!(p.output.kind(), "labels");
    }
}
