//! Shared configuration and domain primitives for the adpulse workspace:
//! environment-based application config, the tracked-metric catalog, and
//! reporting date-range arithmetic.

mod app_config;
mod catalog;
mod config;
mod date_range;

pub use app_config::{AppConfig, Environment};
pub use catalog::{load_catalog, MetricCatalog, TrackedMetric};
pub use config::{load_app_config, load_app_config_from_env};
pub use date_range::{DateRange, DateRangeError, Preset};

use thiserror::Error;

/// Errors produced while loading application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read metric catalog at {path}: {source}")]
    CatalogIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse metric catalog: {0}")]
    CatalogParse(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}
