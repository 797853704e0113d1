//! Run configuration
//!
//! Configuration for one cross-validation evaluation run: the accumulator
//! shape, the reports to write and the logging setup.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PerfError, PerfResult};
use crate::table::DEFAULT_THRESHOLD;

/// Configuration for an evaluation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerfConfig {
    /// Number of cross-validation folds
    pub num_folds: usize,

    /// Whether the model outputs probabilities (enables the threshold sweep)
    pub probabilistic: bool,

    /// Whether AUC is computed per fold
    #[serde(default = "default_track_auc")]
    pub track_auc: bool,

    /// Threshold used by summaries that do not name one
    #[serde(default = "default_threshold")]
    pub default_threshold: u8,

    /// Report outputs
    #[serde(default)]
    pub report: ReportConfig,

    /// Logging setup
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_track_auc() -> bool {
    true
}

fn default_threshold() -> u8 {
    DEFAULT_THRESHOLD
}

impl PerfConfig {
    /// Create a config for `num_folds` folds
    pub fn new(num_folds: usize, probabilistic: bool) -> Self {
        Self {
            num_folds,
            probabilistic,
            track_auc: default_track_auc(),
            default_threshold: default_threshold(),
            report: ReportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Enable or disable AUC tracking
    pub fn with_auc(mut self, track_auc: bool) -> Self {
        self.track_auc = track_auc;
        self
    }

    /// Set the JSON report path
    pub fn with_json_report(mut self, path: impl Into<PathBuf>) -> Self {
        self.report.json_path = Some(path.into());
        self
    }

    /// Set the CSV report path
    pub fn with_csv_report(mut self, path: impl Into<PathBuf>) -> Self {
        self.report.csv_path = Some(path.into());
        self
    }

    /// Set the Markdown report path
    pub fn with_markdown_report(mut self, path: impl Into<PathBuf>) -> Self {
        self.report.markdown_path = Some(path.into());
        self
    }

    /// Set the logging configuration
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }

    /// Reject configurations the accumulator cannot be built from
    pub fn validate(&self) -> PerfResult<()> {
        if self.num_folds == 0 {
            return Err(PerfError::config_with_context(
                "num_folds must be > 0",
                "Validating run configuration",
            ));
        }
        if self.default_threshold > 100 {
            return Err(PerfError::config_with_context(
                format!("default_threshold {} exceeds 100", self.default_threshold),
                "Validating run configuration",
            ));
        }
        Ok(())
    }

    /// Load from a JSON, TOML or YAML file, chosen by extension
    pub fn load_from_file(path: &Path) -> PerfResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PerfError::io_with_path(
                format!("Failed to read config file: {}", e),
                path.display().to_string(),
            )
        })?;

        let config: PerfConfig = match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => toml::from_str(&content).map_err(|e| {
                PerfError::config_with_context(
                    format!("Failed to parse TOML config: {}", e),
                    format!("Deserializing TOML configuration from '{}'", path.display()),
                )
            })?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| {
                PerfError::config_with_context(
                    format!("Failed to parse YAML config: {}", e),
                    format!("Deserializing YAML configuration from '{}'", path.display()),
                )
            })?,
            _ => serde_json::from_str(&content).map_err(|e| {
                PerfError::config_with_context(
                    format!("Failed to parse JSON config: {}", e),
                    format!("Deserializing JSON configuration from '{}'", path.display()),
                )
            })?,
        };

        config.validate()?;
        Ok(config)
    }
}

/// Report outputs; unset paths are skipped
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Structured report
    pub json_path: Option<PathBuf>,
    /// Header plus one data row
    pub csv_path: Option<PathBuf>,
    /// Human-readable summary
    pub markdown_path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Whether to log to console
    pub log_to_console: bool,
    /// Log format (json, pretty, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_to_console: true,
            format: "pretty".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Merge with another logging config
    pub fn merge(&mut self, other: LoggingConfig) {
        if !other.level.is_empty() {
            self.level = other.level;
        }

        self.log_to_console = other.log_to_console;

        if !other.format.is_empty() {
            self.format = other.format;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_values() {
        let config = PerfConfig::new(5, true);
        assert!(config.track_auc);
        assert_eq!(config.default_threshold, 50);
        assert_eq!(config.report, ReportConfig::default());
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = PerfConfig::new(3, false)
            .with_auc(false)
            .with_json_report("perf.json")
            .with_csv_report("perf.csv");

        assert!(!config.track_auc);
        assert_eq!(config.report.json_path, Some(PathBuf::from("perf.json")));
        assert_eq!(config.report.csv_path, Some(PathBuf::from("perf.csv")));
        assert_eq!(config.report.markdown_path, None);
    }

    #[test]
    fn test_validate() {
        assert!(PerfConfig::new(0, false).validate().is_err());
        let mut config = PerfConfig::new(2, true);
        config.default_threshold = 120;
        assert!(matches!(config.validate(), Err(PerfError::Config { .. })));
    }

    #[test]
    fn test_load_from_json_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("run.json");
        fs::write(
            &path,
            r#"{"num_folds": 4, "probabilistic": true, "report": {"json_path": "out.json"}}"#,
        )
        .unwrap();

        let config = PerfConfig::load_from_file(&path).unwrap();
        assert_eq!(config.num_folds, 4);
        assert!(config.probabilistic);
        assert!(config.track_auc);
        assert_eq!(config.report.json_path, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_load_from_toml_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("run.toml");
        fs::write(
            &path,
            r#"
num_folds = 10
probabilistic = false
track_auc = false

[logging]
level = "debug"
log_to_console = true
format = "json"
"#,
        )
        .unwrap();

        let config = PerfConfig::load_from_file(&path).unwrap();
        assert_eq!(config.num_folds, 10);
        assert!(!config.track_auc);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_load_from_yaml_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("run.yaml");
        fs::write(&path, "num_folds: 2\nprobabilistic: true\ndefault_threshold: 30\n").unwrap();

        let config = PerfConfig::load_from_file(&path).unwrap();
        assert_eq!(config.default_threshold, 30);
    }

    #[test]
    fn test_load_missing_and_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.json");
        assert!(matches!(
            PerfConfig::load_from_file(&missing),
            Err(PerfError::Io { .. })
        ));

        let zero = temp_dir.path().join("zero.json");
        fs::write(&zero, r#"{"num_folds": 0, "probabilistic": true}"#).unwrap();
        assert!(matches!(
            PerfConfig::load_from_file(&zero),
            Err(PerfError::Config { .. })
        ));
    }

    #[test]
    fn test_logging_merge() {
        let mut config = LoggingConfig::default();
        config.merge(LoggingConfig {
            level: "debug".to_string(),
            log_to_console: false,
            format: String::new(),
        });
        assert_eq!(config.level, "debug");
        assert!(!config.log_to_console);
        assert_eq!(config.format, "pretty");
    }
}
