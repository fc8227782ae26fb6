use thiserror::Error;

/// Errors returned by the Meta Marketing API client.
#[derive(Debug, Error)]
pub enum MetaError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response whose body was not a Graph error envelope.
    #[error("HTTP status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Graph API throttling. Retrying into the same rate-limit window only
    /// extends it, so this is a hard stop.
    #[error("Meta API rate limited: {0}")]
    RateLimited(String),

    /// Any other Graph API error envelope (auth, permissions, bad request).
    #[error("Meta API error (code {code}): {message}")]
    Api { code: i64, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid client configuration (base URL, credentials).
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}
