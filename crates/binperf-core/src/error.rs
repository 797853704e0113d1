//! Error types for performance indicator computation
//!
//! Degenerate statistical inputs (empty folds, no positives, no negatives) are
//! not errors: they produce zero-valued metrics. The variants below cover
//! caller contract violations and report/config IO failures.

use thiserror::Error;

use crate::metrics::Indicator;

/// Result type alias for binperf operations
pub type PerfResult<T> = Result<T, PerfError>;

/// Main error type for binperf
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PerfError {
    /// The accumulator was asked for zero folds
    #[error("Invalid fold count: at least one fold is required")]
    NoFolds,

    /// Fold id outside `[0, num_folds)`
    #[error("Fold {fold_id} out of range (num_folds = {num_folds})")]
    FoldOutOfRange { fold_id: usize, num_folds: usize },

    /// Threshold outside the 0..=100 percent range
    #[error("Threshold {0} out of range (expected 0..=100)")]
    ThresholdOutOfRange(u8),

    /// Ground truth and predictions are not aligned
    #[error("Length mismatch: {field} has {actual} values, ground truth has {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Probabilities fed to a hard-label run, or the reverse
    #[error("Prediction kind mismatch: expected {expected}, got {actual}")]
    PredictionKind {
        expected: &'static str,
        actual: &'static str,
    },

    /// Indicator not computed in this mode (accuracy on a probabilistic run)
    #[error("Indicator '{indicator}' is not tracked for {mode} models")]
    UntrackedIndicator {
        indicator: Indicator,
        mode: &'static str,
    },

    /// AUC requested but AUC tracking was disabled at construction
    #[error("AUC is not tracked by this run")]
    AucNotTracked,

    /// Two accumulators with different shapes were merged
    #[error("Cannot merge accumulators: {0}")]
    IncompatibleMerge(String),

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl PerfError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: None,
        }
    }

    /// Create a configuration error with context
    pub fn config_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Create an IO error tied to a path
    pub fn io_with_path(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Get the error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoFolds => "PERF_NO_FOLDS",
            Self::FoldOutOfRange { .. } => "PERF_FOLD_RANGE",
            Self::ThresholdOutOfRange(_) => "PERF_THRESHOLD_RANGE",
            Self::LengthMismatch { .. } => "PERF_LENGTH_MISMATCH",
            Self::PredictionKind { .. } => "PERF_PREDICTION_KIND",
            Self::UntrackedIndicator { .. } => "PERF_UNTRACKED_INDICATOR",
            Self::AucNotTracked => "PERF_AUC_NOT_TRACKED",
            Self::IncompatibleMerge(_) => "PERF_INCOMPATIBLE_MERGE",
            Self::Config { .. } => "PERF_CONFIG",
            Self::Io { .. } => "PERF_IO",
            Self::Json(_) => "PERF_JSON",
        }
    }

    /// Whether the error is a caller contract violation rather than an environment failure
    pub fn is_contract_violation(&self) -> bool {
        !matches!(self, Self::Config { .. } | Self::Io { .. } | Self::Json(_))
    }
}

impl From<std::io::Error> for PerfError {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
            path: None,
        }
    }
}

impl From<serde_json::Error> for PerfError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error.to_string())
    }
}
