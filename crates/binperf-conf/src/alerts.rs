//! Alerts configuration: how detections are ranked and grouped

use serde::{Deserialize, Serialize};

use crate::clustering::{ClusteringConf, ClusteringConfRegistry, ClusteringParams};
use crate::error::{ConfError, ConfResult};

/// Alerts raised on the test set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertsConf {
    /// Number of top-scored alerts to display
    pub top_n_alerts: usize,
    /// Probability above which an instance raises an alert
    pub detection_threshold: f64,
    /// Optional grouping of the alerts
    #[serde(default)]
    pub clustering: Option<ClusteringConf>,
}

impl AlertsConf {
    /// Create an alerts configuration, validating the threshold
    pub fn new(
        top_n_alerts: usize,
        detection_threshold: f64,
        clustering: Option<ClusteringConf>,
    ) -> ConfResult<Self> {
        if !(0.0..=1.0).contains(&detection_threshold) {
            return Err(ConfError::invalid(
                "AlertsConf",
                "detection_threshold",
                format!("{detection_threshold} is outside [0, 1]"),
            ));
        }
        Ok(Self {
            top_n_alerts,
            detection_threshold,
            clustering,
        })
    }
}

/// Command-line style alert arguments
#[derive(Debug, Clone, PartialEq)]
pub struct AlertsArgs {
    pub top_n_alerts: usize,
    pub detection_threshold: f64,
    /// Registry name of the clustering algorithm, no clustering when unset
    pub clustering_algo: Option<String>,
    pub num_clusters: Option<usize>,
}

/// Build an alerts configuration, clustering every alert when an algorithm is named
pub fn alerts_conf_from_args(
    args: &AlertsArgs,
    clustering: &ClusteringConfRegistry,
) -> ConfResult<AlertsConf> {
    let clustering_conf = match &args.clustering_algo {
        Some(algo) => {
            let params = ClusteringParams {
                num_clusters: args.num_clusters,
                num_results: None,
                projection: None,
                label: Some("all".to_string()),
            };
            Some(clustering.from_param(algo, &params)?)
        }
        None => None,
    };
    AlertsConf::new(args.top_n_alerts, args.detection_threshold, clustering_conf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clustering::ClusteringAlgo;

    fn args() -> AlertsArgs {
        AlertsArgs {
            top_n_alerts: 100,
            detection_threshold: 0.8,
            clustering_algo: Some("kmeans".to_string()),
            num_clusters: Some(5),
        }
    }

    #[test]
    fn test_from_args_with_clustering() {
        let conf = alerts_conf_from_args(&args(), &ClusteringConfRegistry::with_builtins()).unwrap();
        assert_eq!(conf.top_n_alerts, 100);
        let clustering = conf.clustering.unwrap();
        assert_eq!(clustering.algo, ClusteringAlgo::Kmeans);
        assert_eq!(clustering.num_clusters, 5);
        assert_eq!(clustering.label, "all");
        assert_eq!(clustering.projection, None);
    }

    #[test]
    fn test_from_args_without_clustering() {
        let mut args = args();
        args.clustering_algo = None;
        let conf = alerts_conf_from_args(&args, &ClusteringConfRegistry::with_builtins()).unwrap();
        assert!(conf.clustering.is_none());
    }

    #[test]
    fn test_unknown_algo_and_bad_threshold() {
        let registry = ClusteringConfRegistry::with_builtins();
        let mut bad_algo = args();
        bad_algo.clustering_algo = Some("dbscan".to_string());
        assert_eq!(
            alerts_conf_from_args(&bad_algo, &registry),
            Err(ConfError::Unknown("dbscan".to_string()))
        );

        let mut bad_threshold = args();
        bad_threshold.detection_threshold = 1.5;
        assert!(matches!(
            alerts_conf_from_args(&bad_threshold, &registry),
            Err(ConfError::InvalidParam { .. })
        ));
    }
}
