//! Typed configuration registries for model validation
//!
//! Validation methods ([`TestConf`]) and alert clustering algorithms
//! ([`ClusteringConf`]) are built by name from explicit parameter structs, or
//! loaded from JSON documents tagged with `__type__`.
//!
//! ```
//! use binperf_conf::{TestConfParams, TestConfRegistry};
//!
//! let registry = TestConfRegistry::with_builtins();
//! let params = TestConfParams {
//!     num_folds: Some(4),
//!     ..Default::default()
//! };
//! let conf = registry.from_param("cv", &params).unwrap();
//! assert_eq!(conf.num_folds(), 4);
//! ```

pub mod alerts;
pub mod clustering;
pub mod error;
pub mod registry;
pub mod test_conf;

pub use alerts::{AlertsArgs, AlertsConf, alerts_conf_from_args};
pub use clustering::{ClusteringAlgo, ClusteringConf, ClusteringConfRegistry, ClusteringParams};
pub use error::{ConfError, ConfResult};
pub use registry::{ConfEntry, ConfRegistry, TYPE_KEY};
pub use test_conf::{
    CvConf, DEFAULT_SEED, RandomSplitConf, TemporalSplitConf, TestConf, TestConfParams,
    TestConfRegistry, ValidationDatasetConf,
};
