use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let meta_access_token = require("ADPULSE_META_ACCESS_TOKEN")?;
    let meta_ad_account_id = require("ADPULSE_META_AD_ACCOUNT_ID")?;

    let env = parse_environment(&or_default("ADPULSE_ENV", "development"));

    let bind_addr = parse_addr("ADPULSE_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("ADPULSE_LOG_LEVEL", "info");
    let metrics_path = PathBuf::from(or_default("ADPULSE_METRICS_PATH", "./config/metrics.yaml"));

    let meta_api_version = or_default("ADPULSE_META_API_VERSION", "v21.0");
    let meta_base_url = or_default("ADPULSE_META_BASE_URL", "https://graph.facebook.com/");
    let meta_timeout_secs = parse_u64("ADPULSE_META_TIMEOUT_SECS", "30")?;
    let meta_max_retries = parse_u32("ADPULSE_META_MAX_RETRIES", "3")?;
    let meta_retry_backoff_base_ms = parse_u64("ADPULSE_META_RETRY_BACKOFF_BASE_MS", "1000")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        metrics_path,
        meta_access_token,
        meta_ad_account_id,
        meta_api_version,
        meta_base_url,
        meta_timeout_secs,
        meta_max_retries,
        meta_retry_backoff_base_ms,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated with valid defaults.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("ADPULSE_META_ACCESS_TOKEN", "test-token");
        m.insert("ADPULSE_META_AD_ACCOUNT_ID", "act_1234567890");
        m
    }

    #[test]
    fn parse_environment_test() {
        assert_eq!(parse_environment("test"), Environment::Test);
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("unknown"), Environment::Development);
    }

    #[test]
    fn build_app_config_fails_without_access_token() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "ADPULSE_META_ACCESS_TOKEN"),
            "expected MissingEnvVar(ADPULSE_META_ACCESS_TOKEN), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_without_ad_account_id() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("ADPULSE_META_ACCESS_TOKEN", "test-token");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "ADPULSE_META_AD_ACCOUNT_ID"),
            "expected MissingEnvVar(ADPULSE_META_AD_ACCOUNT_ID), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map = full_env();
        map.insert("ADPULSE_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ADPULSE_BIND_ADDR"),
            "expected InvalidEnvVar(ADPULSE_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_all_required_vars() {
        let map = full_env();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.meta_ad_account_id, "act_1234567890");
        assert_eq!(cfg.meta_api_version, "v21.0");
        assert_eq!(cfg.meta_base_url, "https://graph.facebook.com/");
        assert_eq!(cfg.meta_timeout_secs, 30);
        assert_eq!(cfg.meta_max_retries, 3);
        assert_eq!(cfg.meta_retry_backoff_base_ms, 1_000);
    }

    #[test]
    fn build_app_config_meta_timeout_override() {
        let mut map = full_env();
        map.insert("ADPULSE_META_TIMEOUT_SECS", "60");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.meta_timeout_secs, 60);
    }

    #[test]
    fn build_app_config_meta_timeout_invalid() {
        let mut map = full_env();
        map.insert("ADPULSE_META_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ADPULSE_META_TIMEOUT_SECS"),
            "expected InvalidEnvVar(ADPULSE_META_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_max_retries_override() {
        let mut map = full_env();
        map.insert("ADPULSE_META_MAX_RETRIES", "5");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.meta_max_retries, 5);
    }

    #[test]
    fn build_app_config_max_retries_invalid() {
        let mut map = full_env();
        map.insert("ADPULSE_META_MAX_RETRIES", "-1");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ADPULSE_META_MAX_RETRIES"),
            "expected InvalidEnvVar(ADPULSE_META_MAX_RETRIES), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_metrics_path_override() {
        let mut map = full_env();
        map.insert("ADPULSE_METRICS_PATH", "/etc/adpulse/metrics.yaml");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(
            cfg.metrics_path,
            std::path::PathBuf::from("/etc/adpulse/metrics.yaml")
        );
    }

    #[test]
    fn debug_output_redacts_access_token() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("test-token"), "token leaked: {debug}");
        assert!(debug.contains("[redacted]"));
    }
}
