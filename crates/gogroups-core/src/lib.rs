pub mod app_config;
pub mod catalog;
pub mod config;
pub mod continents;
pub mod controller;
pub mod criteria;
pub mod error_log;
pub mod group;
pub mod map;
pub mod payload;
pub mod source;

pub use app_config::{AppConfig, Environment, ResponseShape};
pub use catalog::{load_catalog, parse_catalog, Catalog, CatalogFile};
pub use config::{load_app_config, load_app_config_from_env};
pub use continents::continent_for;
pub use controller::GroupListController;
pub use criteria::{FilterField, SearchCriteria};
pub use error_log::ErrorLog;
pub use group::GroupRecord;
pub use map::{Cluster, MapRenderer, Marker, MarkerMap};
pub use payload::GroupsPayload;
pub use source::DataSource;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read groups catalog {path}: {source}")]
    CatalogIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse groups catalog: {0}")]
    CatalogParse(#[from] serde_yaml::Error),
}
