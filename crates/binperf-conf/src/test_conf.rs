//! Validation method configurations
//!
//! A test configuration says how a model is validated: k-fold cross
//! validation, a random or temporal split, or a separate validation dataset.
//! Each may carry an [`AlertsConf`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::alerts::AlertsConf;
use crate::error::{ConfError, ConfResult, require};
use crate::registry::{ConfEntry, ConfRegistry};

/// Seed used by random splits when none is given
pub const DEFAULT_SEED: u64 = 42;

/// K-fold cross validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvConf {
    pub num_folds: usize,
    #[serde(default)]
    pub alerts: Option<AlertsConf>,
}

/// Random train/test split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomSplitConf {
    /// Share of the instances held out, in (0, 1)
    pub test_size: f64,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub alerts: Option<AlertsConf>,
}

/// Split on timestamps, the most recent instances are held out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalSplitConf {
    pub test_size: f64,
    #[serde(default)]
    pub alerts: Option<AlertsConf>,
}

/// Validation on a separate dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationDatasetConf {
    pub test_dataset: String,
    #[serde(default)]
    pub alerts: Option<AlertsConf>,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

/// A validation method configuration, tagged with `__type__` when serialized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__type__")]
pub enum TestConf {
    #[serde(rename = "CvConf")]
    Cv(CvConf),
    #[serde(rename = "RandomSplitConf")]
    RandomSplit(RandomSplitConf),
    #[serde(rename = "TemporalSplitConf")]
    TemporalSplit(TemporalSplitConf),
    #[serde(rename = "ValidationDatasetConf")]
    ValidationDataset(ValidationDatasetConf),
}

impl TestConf {
    /// Registry name of the validation method
    pub fn method(&self) -> &'static str {
        match self {
            TestConf::Cv(_) => "cv",
            TestConf::RandomSplit(_) => "random_split",
            TestConf::TemporalSplit(_) => "temporal_split",
            TestConf::ValidationDataset(_) => "validation_dataset",
        }
    }

    /// `__type__` tag
    pub fn type_tag(&self) -> &'static str {
        match self {
            TestConf::Cv(_) => "CvConf",
            TestConf::RandomSplit(_) => "RandomSplitConf",
            TestConf::TemporalSplit(_) => "TemporalSplitConf",
            TestConf::ValidationDataset(_) => "ValidationDatasetConf",
        }
    }

    /// Number of folds evaluated, 1 for every method but cross validation
    pub fn num_folds(&self) -> usize {
        match self {
            TestConf::Cv(conf) => conf.num_folds,
            _ => 1,
        }
    }

    pub fn alerts(&self) -> Option<&AlertsConf> {
        match self {
            TestConf::Cv(conf) => conf.alerts.as_ref(),
            TestConf::RandomSplit(conf) => conf.alerts.as_ref(),
            TestConf::TemporalSplit(conf) => conf.alerts.as_ref(),
            TestConf::ValidationDataset(conf) => conf.alerts.as_ref(),
        }
    }

    /// Serialize with the `__type__` tag
    pub fn to_json(&self) -> ConfResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    fn validate(&self) -> ConfResult<()> {
        match self {
            TestConf::Cv(conf) if conf.num_folds < 2 => Err(ConfError::invalid(
                "CvConf",
                "num_folds",
                format!("{} folds, at least 2 are required", conf.num_folds),
            )),
            TestConf::RandomSplit(RandomSplitConf { test_size, .. }) => {
                check_test_size("RandomSplitConf", *test_size)
            }
            TestConf::TemporalSplit(TemporalSplitConf { test_size, .. }) => {
                check_test_size("TemporalSplitConf", *test_size)
            }
            TestConf::ValidationDataset(conf) if conf.test_dataset.trim().is_empty() => Err(
                ConfError::invalid("ValidationDatasetConf", "test_dataset", "must not be empty"),
            ),
            _ => Ok(()),
        }
    }
}

fn check_test_size(conf: &'static str, test_size: f64) -> ConfResult<()> {
    if test_size > 0.0 && test_size < 1.0 {
        Ok(())
    } else {
        Err(ConfError::invalid(
            conf,
            "test_size",
            format!("{test_size} is outside (0, 1)"),
        ))
    }
}

/// Explicit parameters for building a test configuration
///
/// Each method reads the fields it needs and ignores the others.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestConfParams {
    pub num_folds: Option<usize>,
    pub test_size: Option<f64>,
    pub seed: Option<u64>,
    pub test_dataset: Option<String>,
    pub alerts: Option<AlertsConf>,
}

fn validated(conf: TestConf) -> ConfResult<TestConf> {
    conf.validate()?;
    debug!(method = conf.method(), "Built test configuration");
    Ok(conf)
}

fn cv(params: &TestConfParams) -> ConfResult<TestConf> {
    validated(TestConf::Cv(CvConf {
        num_folds: require(&params.num_folds, "CvConf", "num_folds")?,
        alerts: params.alerts.clone(),
    }))
}

fn random_split(params: &TestConfParams) -> ConfResult<TestConf> {
    validated(TestConf::RandomSplit(RandomSplitConf {
        test_size: require(&params.test_size, "RandomSplitConf", "test_size")?,
        seed: params.seed.unwrap_or(DEFAULT_SEED),
        alerts: params.alerts.clone(),
    }))
}

fn temporal_split(params: &TestConfParams) -> ConfResult<TestConf> {
    validated(TestConf::TemporalSplit(TemporalSplitConf {
        test_size: require(&params.test_size, "TemporalSplitConf", "test_size")?,
        alerts: params.alerts.clone(),
    }))
}

fn validation_dataset(params: &TestConfParams) -> ConfResult<TestConf> {
    validated(TestConf::ValidationDataset(ValidationDatasetConf {
        test_dataset: require(&params.test_dataset, "ValidationDatasetConf", "test_dataset")?,
        alerts: params.alerts.clone(),
    }))
}

fn load(value: &Value) -> ConfResult<TestConf> {
    validated(serde_json::from_value(value.clone())?)
}

/// Registry of validation methods
pub type TestConfRegistry = ConfRegistry<TestConfParams, TestConf>;

impl TestConfRegistry {
    /// Registry with cross validation, both splits and the validation dataset
    pub fn with_builtins() -> Self {
        let builtins: [(&str, &'static str, fn(&TestConfParams) -> ConfResult<TestConf>); 4] = [
            ("cv", "CvConf", cv),
            ("random_split", "RandomSplitConf", random_split),
            ("temporal_split", "TemporalSplitConf", temporal_split),
            ("validation_dataset", "ValidationDatasetConf", validation_dataset),
        ];

        let mut registry = Self::new();
        for (name, type_tag, from_params) in builtins {
            registry.register(
                name,
                ConfEntry {
                    type_tag,
                    from_params,
                    from_json: load,
                },
            );
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params() -> TestConfParams {
        TestConfParams {
            num_folds: Some(5),
            test_size: Some(0.25),
            ..Default::default()
        }
    }

    #[test]
    fn test_builtin_names() {
        let registry = TestConfRegistry::with_builtins();
        assert_eq!(
            registry.names(),
            vec!["cv", "random_split", "temporal_split", "validation_dataset"]
        );
    }

    #[test]
    fn test_cv_from_param() {
        let registry = TestConfRegistry::with_builtins();
        let conf = registry.from_param("cv", &params()).unwrap();
        assert_eq!(conf.method(), "cv");
        assert_eq!(conf.num_folds(), 5);
        assert!(conf.alerts().is_none());
    }

    #[test]
    fn test_split_defaults_and_single_fold() {
        let registry = TestConfRegistry::with_builtins();
        let conf = registry.from_param("random_split", &params()).unwrap();
        assert_eq!(conf.num_folds(), 1);
        match conf {
            TestConf::RandomSplit(split) => {
                assert_eq!(split.seed, DEFAULT_SEED);
                assert_eq!(split.test_size, 0.25);
            }
            other => panic!("unexpected configuration: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_params() {
        let registry = TestConfRegistry::with_builtins();

        let one_fold = TestConfParams {
            num_folds: Some(1),
            ..Default::default()
        };
        assert!(matches!(
            registry.from_param("cv", &one_fold),
            Err(ConfError::InvalidParam { param: "num_folds", .. })
        ));

        let whole = TestConfParams {
            test_size: Some(1.0),
            ..Default::default()
        };
        assert!(registry.from_param("temporal_split", &whole).is_err());

        assert_eq!(
            registry.from_param("validation_dataset", &params()),
            Err(ConfError::MissingParam {
                conf: "ValidationDatasetConf",
                param: "test_dataset",
            })
        );
        assert_eq!(
            registry.from_param("unsupervised", &params()),
            Err(ConfError::Unknown("unsupervised".to_string()))
        );
    }

    #[test]
    fn test_json_carries_type_tag() {
        let registry = TestConfRegistry::with_builtins();
        let conf = registry
            .from_param(
                "validation_dataset",
                &TestConfParams {
                    test_dataset: Some("march".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        let value = conf.to_json().unwrap();
        assert_eq!(value["__type__"], "ValidationDatasetConf");
        assert_eq!(value["test_dataset"], "march");
        assert_eq!(registry.from_json(&value).unwrap(), conf);
    }

    #[test]
    fn test_from_json_validates() {
        let registry = TestConfRegistry::with_builtins();
        let conf = registry
            .from_json(&json!({"__type__": "RandomSplitConf", "test_size": 0.1}))
            .unwrap();
        assert_eq!(conf.type_tag(), "RandomSplitConf");

        assert!(matches!(
            registry.from_json(&json!({"__type__": "CvConf", "num_folds": 0})),
            Err(ConfError::InvalidParam { .. })
        ));
        assert!(matches!(
            registry.from_json(&json!({"__type__": "CvConf"})),
            Err(ConfError::Json(_))
        ));
    }
}
