use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub metrics_path: PathBuf,
    pub meta_access_token: String,
    pub meta_ad_account_id: String,
    pub meta_api_version: String,
    pub meta_base_url: String,
    pub meta_timeout_secs: u64,
    pub meta_max_retries: u32,
    pub meta_retry_backoff_base_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("metrics_path", &self.metrics_path)
            .field("meta_access_token", &"[redacted]")
            .field("meta_ad_account_id", &self.meta_ad_account_id)
            .field("meta_api_version", &self.meta_api_version)
            .field("meta_base_url", &self.meta_base_url)
            .field("meta_timeout_secs", &self.meta_timeout_secs)
            .field("meta_max_retries", &self.meta_max_retries)
            .field(
                "meta_retry_backoff_base_ms",
                &self.meta_retry_backoff_base_ms,
            )
            .finish()
    }
}
