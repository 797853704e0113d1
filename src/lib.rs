//! Binperf - cross-validated performance indicators for binary classifiers
//!
//! Re-exports the indicator engine ([`binperf_core`]) and the validation
//! configuration registries ([`binperf_conf`]), and wires them together:
//! logging setup, accumulators sized from a [`TestConf`], and a one-call
//! evaluation that writes the configured reports.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use binperf_conf;
pub use binperf_core;

pub use binperf_conf::{
    AlertsArgs, AlertsConf, ClusteringConf, ClusteringConfRegistry, ConfError, TestConf,
    TestConfParams, TestConfRegistry, alerts_conf_from_args,
};
pub use binperf_core::{
    Indicator, LoggingConfig, PerfAccumulator, PerfConfig, PerfError, PerfIndicators,
    Predictions, ReportConfig, Summary,
};

/// Install a global `tracing` subscriber for `config`
///
/// `RUST_LOG` takes precedence over the configured level. Fails if a global
/// subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    if !config.log_to_console {
        return Ok(());
    }

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .with_context(|| format!("Invalid log level '{}'", config.level))?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match config.format.as_str() {
        "json" => builder.json().try_init(),
        "compact" => builder.compact().try_init(),
        "pretty" | "" => builder.pretty().try_init(),
        other => return Err(anyhow!("Unknown log format '{other}'")),
    };
    installed.map_err(|e| anyhow!("Failed to install subscriber: {e}"))
}

/// Accumulator with one fold per fold of the validation method
///
/// The fold count comes from `test_conf`; mode, AUC tracking and default
/// threshold come from `config`.
pub fn accumulator_for(test_conf: &TestConf, config: &PerfConfig) -> Result<PerfAccumulator> {
    let mut config = config.clone();
    config.num_folds = test_conf.num_folds();
    let acc = PerfAccumulator::from_config(&config)
        .with_context(|| format!("Building accumulator for {}", test_conf.type_tag()))?;
    info!(
        method = test_conf.method(),
        num_folds = config.num_folds,
        probabilistic = config.probabilistic,
        "Created performance accumulator"
    );
    Ok(acc)
}

/// Outcome of [`evaluate`]
#[derive(Debug)]
pub struct Evaluation {
    pub indicators: PerfIndicators,
    /// Report files written, in JSON, CSV, Markdown order
    pub reports: Vec<PathBuf>,
}

/// Accumulate `folds` in order, finalize and write the configured reports
///
/// `config.logging` is not read here: the global subscriber is installed
/// once per process, so call [`init_logging`] with it before evaluating.
pub fn evaluate<I>(config: &PerfConfig, folds: I) -> Result<Evaluation>
where
    I: IntoIterator<Item = Predictions>,
{
    let mut acc = PerfAccumulator::from_config(config).context("Invalid run configuration")?;
    for (fold_id, predictions) in folds.into_iter().enumerate() {
        acc.add_fold(fold_id, &predictions)
            .with_context(|| format!("Adding fold {fold_id}"))?;
    }

    let indicators = acc.finalize();
    let reports = binperf_core::write_reports(&indicators, &config.report)
        .context("Writing reports")?;
    info!(reports = reports.len(), "Evaluation complete");
    Ok(Evaluation {
        indicators,
        reports,
    })
}

/// Load fold predictions from a JSON array of [`Predictions`]
pub fn load_folds(path: &Path) -> Result<Vec<Predictions>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Reading fold predictions from '{}'", path.display()))?;
    let folds: Vec<Predictions> = serde_json::from_str(&content)
        .with_context(|| format!("Parsing fold predictions from '{}'", path.display()))?;
    Ok(folds)
}
