use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A single tracked metric: the vendor `action_type` key it is read from,
/// its tile label, and an optional label for the matching cost-per-unit tile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedMetric {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub cost_label: Option<String>,
}

/// Deployment-specific catalog of tracked metrics.
///
/// The set of action types a dashboard tracks varies per deployment, so the
/// mapping lives in `config/metrics.yaml` rather than in code. List order is
/// tile order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricCatalog {
    /// The `actions` entry that counts link clicks, feeding cost-per-click.
    #[serde(default = "default_link_click_action")]
    pub link_click_action: String,
    #[serde(default = "default_spend_label")]
    pub spend_label: String,
    #[serde(default = "default_cpc_label")]
    pub cpc_label: String,
    /// Tracked entries from the `actions` list field.
    #[serde(default)]
    pub actions: Vec<TrackedMetric>,
    /// Tracked entries from the `conversions` list field.
    #[serde(default)]
    pub conversions: Vec<TrackedMetric>,
}

fn default_link_click_action() -> String {
    "link_click".to_string()
}

fn default_spend_label() -> String {
    "Total Amount Spent".to_string()
}

fn default_cpc_label() -> String {
    "Cost per Link Click".to_string()
}

/// Load and validate the metric catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<MetricCatalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog: MetricCatalog = serde_yaml::from_str(&content)?;

    validate_catalog(&catalog)?;

    Ok(catalog)
}

fn validate_catalog(catalog: &MetricCatalog) -> Result<(), ConfigError> {
    if catalog.link_click_action.trim().is_empty() {
        return Err(ConfigError::Validation(
            "link_click_action must be non-empty".to_string(),
        ));
    }

    for (list, metrics) in [
        ("actions", &catalog.actions),
        ("conversions", &catalog.conversions),
    ] {
        let mut seen_keys = HashSet::new();

        for metric in metrics {
            if metric.key.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{list} entry has an empty key"
                )));
            }

            if metric.label.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{list} entry '{}' has an empty label",
                    metric.key
                )));
            }

            if metric
                .cost_label
                .as_ref()
                .is_some_and(|l| l.trim().is_empty())
            {
                return Err(ConfigError::Validation(format!(
                    "{list} entry '{}' has an empty cost_label",
                    metric.key
                )));
            }

            if !seen_keys.insert(metric.key.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate {list} key: '{}'",
                    metric.key
                )));
            }
        }
    }

    Ok(())
}
