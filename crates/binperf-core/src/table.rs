//! Fold x indicator tables keyed by an optional threshold dimension
//!
//! Probabilistic runs keep one table per percent threshold, hard-label runs
//! keep a single table under [`ThresholdKey::Single`]. Both shapes share the
//! same storage and lookup path.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use crate::metrics::{FoldScores, Indicator};

/// Percent thresholds swept for probabilistic models
pub const THRESHOLDS: RangeInclusive<u8> = 0..=100;

/// Threshold used by queries that do not name one
pub const DEFAULT_THRESHOLD: u8 = 50;

/// Key of one fold table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ThresholdKey {
    /// The only table of a hard-label run
    Single,
    /// Table for labels derived as `probability > percent / 100`
    Percent(u8),
}

/// Per-fold indicator values, one row per fold
#[derive(Clone, Debug)]
pub struct MetricTable {
    columns: &'static [Indicator],
    num_folds: usize,
    tables: BTreeMap<ThresholdKey, Vec<Vec<f64>>>,
}

impl MetricTable {
    /// Zero-initialised table for each key
    pub fn new(
        keys: impl IntoIterator<Item = ThresholdKey>,
        columns: &'static [Indicator],
        num_folds: usize,
    ) -> Self {
        let tables = keys
            .into_iter()
            .map(|key| (key, vec![vec![0.0; columns.len()]; num_folds]))
            .collect();
        Self {
            columns,
            num_folds,
            tables,
        }
    }

    /// One table per percent threshold 0..=100
    pub fn swept(columns: &'static [Indicator], num_folds: usize) -> Self {
        Self::new(THRESHOLDS.map(ThresholdKey::Percent), columns, num_folds)
    }

    /// A single un-thresholded table
    pub fn single(columns: &'static [Indicator], num_folds: usize) -> Self {
        Self::new([ThresholdKey::Single], columns, num_folds)
    }

    /// Stored indicators, in column order
    pub fn columns(&self) -> &'static [Indicator] {
        self.columns
    }

    /// Number of fold rows in every table
    pub fn num_folds(&self) -> usize {
        self.num_folds
    }

    /// Keys in ascending order (`Single` first, then thresholds)
    pub fn keys(&self) -> impl Iterator<Item = ThresholdKey> + '_ {
        self.tables.keys().copied()
    }

    /// Whether the table has a column for `indicator`
    pub fn tracks(&self, indicator: Indicator) -> bool {
        self.columns.contains(&indicator)
    }

    /// Overwrite row `fold_id` of table `key`
    ///
    /// Returns `false` when the key or fold does not exist. Indicators the
    /// scores do not carry are written as 0.
    pub fn set_row(&mut self, key: ThresholdKey, fold_id: usize, scores: &FoldScores) -> bool {
        let Some(row) = self
            .tables
            .get_mut(&key)
            .and_then(|rows| rows.get_mut(fold_id))
        else {
            return false;
        };
        for (cell, indicator) in row.iter_mut().zip(self.columns) {
            *cell = scores.get(*indicator).unwrap_or(0.0);
        }
        true
    }

    /// Copy a whole row from another table of the same shape
    pub(crate) fn copy_row_from(&mut self, other: &MetricTable, fold_id: usize) {
        for (key, rows) in self.tables.iter_mut() {
            if let Some(src) = other.tables.get(key).and_then(|r| r.get(fold_id)) {
                rows[fold_id].clone_from(src);
            }
        }
    }

    /// Values of `indicator` across folds in table `key`
    pub fn column(&self, key: ThresholdKey, indicator: Indicator) -> Option<Vec<f64>> {
        let idx = self.columns.iter().position(|c| *c == indicator)?;
        let rows = self.tables.get(&key)?;
        Some(rows.iter().map(|row| row[idx]).collect())
    }
}
