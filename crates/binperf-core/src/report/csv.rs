//! Tabular line export for aggregating runs in a spreadsheet

use std::io::Write;

use crate::error::PerfResult;
use crate::perf::PerfIndicators;

/// CSV line generator
pub struct CsvReporter;

impl CsvReporter {
    /// Fixed column order
    pub const HEADER: [&'static str; 4] = ["auc", "fscore", "precision", "recall"];

    /// Data row at the default threshold
    ///
    /// Fails when AUC is not tracked, since the column cannot be filled.
    pub fn line(perf: &PerfIndicators) -> PerfResult<[f64; 4]> {
        Ok([
            perf.get_auc()?,
            perf.get_f_score(None)?,
            perf.get_precision(None)?,
            perf.get_recall(None)?,
        ])
    }

    /// Header and data row
    pub fn generate(perf: &PerfIndicators) -> PerfResult<String> {
        let line = Self::line(perf)?;
        let row: Vec<String> = line.iter().map(|v| v.to_string()).collect();
        Ok(format!("{}\n{}\n", Self::HEADER.join(","), row.join(",")))
    }

    /// Write header and data row to `writer`
    pub fn write<W: Write>(perf: &PerfIndicators, mut writer: W) -> PerfResult<()> {
        writer.write_all(Self::generate(perf)?.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}
