//! Report generation for performance indicators
//!
//! Generates reports in various formats (JSON, CSV line, Markdown).

mod csv;
mod format;
mod json;
mod markdown;

pub use csv::CsvReporter;
pub use format::{to_percentage, trunc};
pub use json::{JsonReport, JsonReporter, StatEntry};
pub use markdown::MarkdownReporter;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::ReportConfig;
use crate::error::{PerfError, PerfResult};
use crate::perf::PerfIndicators;

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Csv,
    Markdown,
}

impl ReportFormat {
    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(ReportFormat::Json),
            "csv" => Some(ReportFormat::Csv),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            _ => None,
        }
    }
}

/// Generate a report in the specified format
pub fn generate_report(perf: &PerfIndicators, format: ReportFormat) -> PerfResult<String> {
    match format {
        ReportFormat::Json => JsonReporter::generate(perf),
        ReportFormat::Csv => CsvReporter::generate(perf),
        ReportFormat::Markdown => MarkdownReporter::generate(perf),
    }
}

/// Write every report configured in `config`, returning the written paths
pub fn write_reports(perf: &PerfIndicators, config: &ReportConfig) -> PerfResult<Vec<PathBuf>> {
    let targets = [
        (config.json_path.as_deref(), ReportFormat::Json),
        (config.csv_path.as_deref(), ReportFormat::Csv),
        (config.markdown_path.as_deref(), ReportFormat::Markdown),
    ];

    let mut written = Vec::new();
    for (path, format) in targets {
        let Some(path) = path else { continue };
        write_report(perf, format, path)?;
        written.push(path.to_path_buf());
    }
    Ok(written)
}

fn write_report(perf: &PerfIndicators, format: ReportFormat, path: &Path) -> PerfResult<()> {
    let io_err = |e: std::io::Error| PerfError::io_with_path(e.to_string(), path.display().to_string());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let file = File::create(path).map_err(io_err)?;
    let writer = BufWriter::new(file);

    match format {
        ReportFormat::Json => JsonReporter::write(perf, writer)?,
        ReportFormat::Csv => CsvReporter::write(perf, writer)?,
        ReportFormat::Markdown => MarkdownReporter::write(perf, writer)?,
    }

    info!(path = %path.display(), ?format, "Wrote performance report");
    Ok(())
}
