//! Cross-validation performance indicators
//!
//! [`PerfAccumulator`] collects per-fold indicators (and per-threshold ones
//! for probabilistic models). [`PerfAccumulator::finalize`] consumes it and
//! returns [`PerfIndicators`], which answers queries and feeds the reports.

mod accumulator;
mod indicators;
mod stats;

pub use accumulator::PerfAccumulator;
pub use indicators::PerfIndicators;
pub use stats::{Summary, mean, population_std, sample_std};
