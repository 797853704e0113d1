//! Clustering configurations used to group alerts

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfError, ConfResult, require};
use crate::registry::{ConfEntry, ConfRegistry};

/// Clustering algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClusteringAlgo {
    #[serde(rename = "KmeansConf")]
    Kmeans,
    #[serde(rename = "GaussianMixtureConf")]
    GaussianMixture,
}

impl ClusteringAlgo {
    /// Registry name
    pub fn name(&self) -> &'static str {
        match self {
            ClusteringAlgo::Kmeans => "kmeans",
            ClusteringAlgo::GaussianMixture => "gaussian_mixture",
        }
    }

    /// `__type__` tag
    pub fn type_tag(&self) -> &'static str {
        match self {
            ClusteringAlgo::Kmeans => "KmeansConf",
            ClusteringAlgo::GaussianMixture => "GaussianMixtureConf",
        }
    }
}

/// Clustering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringConf {
    #[serde(rename = "__type__")]
    pub algo: ClusteringAlgo,
    pub num_clusters: usize,
    /// Number of instances shown per cluster (all when unset)
    #[serde(default)]
    pub num_results: Option<usize>,
    /// Projection applied before clustering
    #[serde(default)]
    pub projection: Option<String>,
    /// Which instances are clustered ("all", "malicious", ...)
    #[serde(default = "default_label")]
    pub label: String,
}

fn default_label() -> String {
    "all".to_string()
}

/// Explicit parameters for building a clustering configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusteringParams {
    pub num_clusters: Option<usize>,
    pub num_results: Option<usize>,
    pub projection: Option<String>,
    pub label: Option<String>,
}

impl ClusteringConf {
    fn build(algo: ClusteringAlgo, params: &ClusteringParams) -> ConfResult<Self> {
        let conf = Self {
            algo,
            num_clusters: require(&params.num_clusters, algo.type_tag(), "num_clusters")?,
            num_results: params.num_results,
            projection: params.projection.clone(),
            label: params.label.clone().unwrap_or_else(default_label),
        };
        conf.validate()?;
        Ok(conf)
    }

    fn load(algo: ClusteringAlgo, value: &Value) -> ConfResult<Self> {
        let conf: Self = serde_json::from_value(value.clone())?;
        if conf.algo != algo {
            return Err(ConfError::Json(format!(
                "expected {}, found {}",
                algo.type_tag(),
                conf.algo.type_tag()
            )));
        }
        conf.validate()?;
        Ok(conf)
    }

    fn validate(&self) -> ConfResult<()> {
        if self.num_clusters == 0 {
            return Err(ConfError::invalid(
                self.algo.type_tag(),
                "num_clusters",
                "must be > 0",
            ));
        }
        Ok(())
    }
}

fn kmeans(params: &ClusteringParams) -> ConfResult<ClusteringConf> {
    ClusteringConf::build(ClusteringAlgo::Kmeans, params)
}

fn kmeans_json(value: &Value) -> ConfResult<ClusteringConf> {
    ClusteringConf::load(ClusteringAlgo::Kmeans, value)
}

fn gaussian_mixture(params: &ClusteringParams) -> ConfResult<ClusteringConf> {
    ClusteringConf::build(ClusteringAlgo::GaussianMixture, params)
}

fn gaussian_mixture_json(value: &Value) -> ConfResult<ClusteringConf> {
    ClusteringConf::load(ClusteringAlgo::GaussianMixture, value)
}

/// Registry of clustering configurations
pub type ClusteringConfRegistry = ConfRegistry<ClusteringParams, ClusteringConf>;

impl ClusteringConfRegistry {
    /// Registry with the built-in clustering algorithms
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(
            ClusteringAlgo::Kmeans.name(),
            ConfEntry {
                type_tag: ClusteringAlgo::Kmeans.type_tag(),
                from_params: kmeans,
                from_json: kmeans_json,
            },
        );
        registry.register(
            ClusteringAlgo::GaussianMixture.name(),
            ConfEntry {
                type_tag: ClusteringAlgo::GaussianMixture.type_tag(),
                from_params: gaussian_mixture,
                from_json: gaussian_mixture_json,
            },
        );
        registry
    }
}
