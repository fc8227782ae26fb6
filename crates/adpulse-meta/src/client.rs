//! HTTP client for the Meta Marketing API insights endpoint.
//!
//! Wraps `reqwest` with Graph-specific error handling, access-token
//! management, and typed response deserialization. Non-2xx responses are
//! parsed as Graph error envelopes and surfaced as [`MetaError::Api`] or
//! [`MetaError::RateLimited`]; transient failures are retried with back-off.

use std::time::Duration;

use adpulse_core::DateRange;
use reqwest::{Client, StatusCode, Url};

use crate::error::MetaError;
use crate::retry::retry_with_backoff;
use crate::types::{ErrorEnvelope, InsightsRecord, InsightsResponse};

const DEFAULT_BASE_URL: &str = "https://graph.facebook.com/";

/// Insight fields requested for every range. The blended `cpc` comes along
/// for reference; the dashboard's link-click CPC is derived from `spend`.
const INSIGHT_FIELDS: &str =
    "spend,cpc,actions,cost_per_action_type,conversions,cost_per_conversion";

/// Graph throttling codes. Retrying these only extends the throttle window.
const RATE_LIMIT_CODES: [i64; 4] = [4, 17, 32, 613];

/// Settings for constructing a [`MetaClient`], sourced from `AppConfig`.
#[derive(Debug, Clone)]
pub struct MetaClientConfig {
    pub access_token: String,
    pub ad_account_id: String,
    pub api_version: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
}

impl MetaClientConfig {
    /// Extract the client settings from the application config.
    #[must_use]
    pub fn from_app_config(config: &adpulse_core::AppConfig) -> Self {
        Self {
            access_token: config.meta_access_token.clone(),
            ad_account_id: config.meta_ad_account_id.clone(),
            api_version: config.meta_api_version.clone(),
            timeout_secs: config.meta_timeout_secs,
            max_retries: config.meta_max_retries,
            retry_backoff_base_ms: config.meta_retry_backoff_base_ms,
        }
    }
}

/// Client for the Meta Marketing API insights endpoint.
///
/// Manages the HTTP client, access token, and base URL. Use
/// [`MetaClient::new`] for production or [`MetaClient::with_base_url`] to
/// point at a mock server in tests.
pub struct MetaClient {
    client: Client,
    access_token: String,
    ad_account_path: String,
    api_version: String,
    base_url: Url,
    max_retries: u32,
    retry_backoff_base_ms: u64,
}

impl MetaClient {
    /// Creates a new client pointed at the production Graph API.
    ///
    /// # Errors
    ///
    /// Returns [`MetaError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`MetaError::InvalidConfig`] for an empty token.
    pub fn new(config: &MetaClientConfig) -> Result<Self, MetaError> {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`MetaError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`MetaError::InvalidConfig`] if the token is empty
    /// or `base_url` is not a valid URL.
    pub fn with_base_url(config: &MetaClientConfig, base_url: &str) -> Result<Self, MetaError> {
        if config.access_token.trim().is_empty() {
            return Err(MetaError::InvalidConfig(
                "access token must be non-empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("adpulse/0.1 (ads-insights)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // Url::join appends the versioned path instead of replacing segments.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| MetaError::InvalidConfig(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            access_token: config.access_token.clone(),
            ad_account_path: normalize_account_id(&config.ad_account_id),
            api_version: config.api_version.clone(),
            base_url,
            max_retries: config.max_retries,
            retry_backoff_base_ms: config.retry_backoff_base_ms,
        })
    }

    /// Fetches account-level insights for one inclusive date range.
    ///
    /// Returns `Ok(None)` when the account had no delivery in the range (the
    /// API responds with an empty `data` array); callers treat that as an
    /// all-zero record.
    ///
    /// # Errors
    ///
    /// - [`MetaError::RateLimited`] on Graph throttling codes.
    /// - [`MetaError::Api`] on any other Graph error envelope.
    /// - [`MetaError::Http`] / [`MetaError::Status`] on network failure or an
    ///   unrecognisable non-2xx response (after transparent retries).
    /// - [`MetaError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn insights(&self, range: &DateRange) -> Result<Option<InsightsRecord>, MetaError> {
        let url = self.build_insights_url(range)?;
        retry_with_backoff(self.max_retries, self.retry_backoff_base_ms, || {
            self.insights_once(&url)
        })
        .await
    }

    /// Builds the versioned insights URL with percent-encoded query parameters.
    fn build_insights_url(&self, range: &DateRange) -> Result<Url, MetaError> {
        let path = format!("{}/{}/insights", self.api_version, self.ad_account_path);
        let mut url = self.base_url.join(&path).map_err(|e| {
            MetaError::InvalidConfig(format!("invalid insights path '{path}': {e}"))
        })?;

        let time_range = serde_json::json!({
            "since": range.since.to_string(),
            "until": range.until.to_string(),
        })
        .to_string();

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("fields", INSIGHT_FIELDS);
            pairs.append_pair("level", "account");
            pairs.append_pair("time_range", &time_range);
            pairs.append_pair("access_token", &self.access_token);
        }
        Ok(url)
    }

    /// Sends one GET request and parses either the insights envelope or the
    /// Graph error envelope.
    async fn insights_once(&self, url: &Url) -> Result<Option<InsightsRecord>, MetaError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(parse_error_body(status, &body));
        }

        let envelope: InsightsResponse =
            serde_json::from_str(&body).map_err(|e| MetaError::Deserialize {
                context: format!("insights({})", self.ad_account_path),
                source: e,
            })?;

        Ok(envelope.data.into_iter().next())
    }
}

/// Maps a non-2xx response to the error taxonomy.
///
/// Graph errors arrive as `{"error": {"message", "code", ...}}` regardless of
/// HTTP status; anything else (proxy HTML, truncated body) degrades to
/// [`MetaError::Status`] with a body snippet.
fn parse_error_body(status: StatusCode, body: &str) -> MetaError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let err = envelope.error;
            if RATE_LIMIT_CODES.contains(&err.code) {
                MetaError::RateLimited(err.message)
            } else {
                MetaError::Api {
                    code: err.code,
                    message: err.message,
                }
            }
        }
        Err(_) => MetaError::Status {
            status,
            body: body.chars().take(200).collect(),
        },
    }
}

/// Accepts an ad account id with or without the `act_` prefix and returns the
/// path segment form (`act_<digits>`).
fn normalize_account_id(raw: &str) -> String {
    let trimmed = raw.trim();
    let bare = trimmed.strip_prefix("act_").unwrap_or(trimmed);
    format!("act_{bare}")
}
