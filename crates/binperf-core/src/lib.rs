//! Cross-validated performance indicators for binary classifiers
//!
//! This crate aggregates precomputed fold predictions into precision,
//! recall, false-alarm rate, F-score, accuracy and ROC AUC summaries.
//!
//! # Features
//!
//! - **Threshold sweep**: probabilistic models are scored at every percent
//!   threshold 0..=100
//! - **Degenerate-input guards**: empty folds, folds without positives or
//!   negatives and constant predictions yield 0 rather than NaN
//! - **Two-phase lifecycle**: [`PerfAccumulator`] collects folds,
//!   [`PerfIndicators`] answers queries once finalized
//! - **Reports**: structured JSON, a four-column CSV line and Markdown
//!
//! # Example
//!
//! ```rust
//! use binperf_core::{PerfAccumulator, Predictions};
//!
//! let mut acc = PerfAccumulator::new(2, true)?;
//! acc.add_fold(0, &Predictions::probabilistic(vec![true, false], vec![0.8, 0.3]))?;
//! acc.add_fold(1, &Predictions::probabilistic(vec![false, true], vec![0.1, 0.6]))?;
//!
//! let perf = acc.finalize();
//! assert_eq!(perf.get_recall(None)?, 1.0);
//! assert_eq!(perf.get_auc()?, 1.0);
//! # Ok::<(), binperf_core::PerfError>(())
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod perf;
pub mod predictions;
pub mod report;
pub mod table;

// Re-exports for convenience
pub use config::{LoggingConfig, PerfConfig, ReportConfig};
pub use error::{PerfError, PerfResult};
pub use metrics::{BinaryConfusion, FoldScores, Indicator, RocCurve, roc_auc, roc_curve};
pub use perf::{PerfAccumulator, PerfIndicators, Summary};
pub use predictions::{PredictionOutput, Predictions};
pub use report::{ReportFormat, generate_report, write_reports};
pub use table::{DEFAULT_THRESHOLD, MetricTable, THRESHOLDS, ThresholdKey};
