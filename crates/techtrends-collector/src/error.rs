use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectorError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The source signalled that the request quota is used up (HTTP 429).
    #[error("quota exceeded at {url}")]
    QuotaExceeded { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl CollectorError {
    /// Returns `true` when the caller should back off before querying again.
    #[must_use]
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, CollectorError::QuotaExceeded { .. })
    }
}
