//! Binary classification metric primitives
//!
//! Provides the per-fold building blocks the accumulator relies on:
//! - Confusion counts over the label order `[true, false]`
//! - Precision, recall, F-score, accuracy and false-alarm rate with the
//!   zero-on-degenerate-input policies
//! - ROC curve and trapezoidal AUC

mod confusion;
mod indicator;
mod roc;

pub use confusion::{BinaryConfusion, FoldScores, precision_recall_fscore};
pub use indicator::Indicator;
pub use roc::{RocCurve, RocPoint, roc_auc, roc_curve};
