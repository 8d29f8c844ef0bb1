//! HTTP client for the Twitter/X v2 recent-search endpoint.
//!
//! Wraps `reqwest` with bearer authentication, query shaping, and typed
//! errors. HTTP 429 is surfaced as [`CollectorError::QuotaExceeded`] and is
//! never retried here; backing off is the collector's decision.

use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, StatusCode, Url};

use super::types::SearchResponse;
use crate::error::CollectorError;
use crate::source::{PostSource, RawPost};

const DEFAULT_BASE_URL: &str = "https://api.twitter.com/";
const SEARCH_PATH: &str = "2/tweets/search/recent";
const TWEET_FIELDS: &str = "created_at,public_metrics,author_id";

/// The endpoint rejects page sizes outside this range.
const MIN_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 100;

/// Client for Twitter/X recent search.
///
/// Use [`TwitterClient::new`] for production or
/// [`TwitterClient::with_base_url`] to point at a mock server in tests.
pub struct TwitterClient {
    client: Client,
    bearer_token: String,
    search_url: Url,
}

impl TwitterClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(bearer_token: &str, timeout_secs: u64) -> Result<Self, CollectorError> {
        Self::with_base_url(bearer_token, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`CollectorError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        bearer_token: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, CollectorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("techtrends/0.1")
            .build()?;

        // A single trailing slash keeps `join` appending rather than replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let search_url = Url::parse(&normalised)
            .and_then(|base| base.join(SEARCH_PATH))
            .map_err(|e| CollectorError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            bearer_token: bearer_token.to_owned(),
            search_url,
        })
    }

    /// Searches recent posts and returns at most `max_results` of them.
    ///
    /// `query` is sent verbatim, so operators such as `-is:retweet` and
    /// `lang:en` must already be part of it. The requested page size is
    /// clamped into the range the endpoint accepts and the response is
    /// truncated back to `max_results`.
    ///
    /// # Errors
    ///
    /// - [`CollectorError::QuotaExceeded`] on HTTP 429.
    /// - [`CollectorError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`CollectorError::Http`] on network failure.
    /// - [`CollectorError::Deserialize`] if the body is not the expected JSON.
    pub async fn search(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<RawPost>, CollectorError> {
        if max_results == 0 {
            return Ok(Vec::new());
        }

        let page_size = max_results.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE);
        let url = self.build_url(query, page_size);

        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(CollectorError::QuotaExceeded {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            return Err(CollectorError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| CollectorError::Deserialize {
                context: format!("recent search (query={query})"),
                source: e,
            })?;

        tracing::debug!(
            query,
            result_count = parsed.meta.as_ref().map_or(0, |m| m.result_count),
            "recent search returned"
        );

        let fetched_at = Utc::now();
        Ok(parsed
            .data
            .into_iter()
            .take(max_results as usize)
            .map(|tweet| tweet.into_raw_post(fetched_at))
            .collect())
    }

    fn build_url(&self, query: &str, page_size: u32) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("max_results", &page_size.to_string())
            .append_pair("tweet.fields", TWEET_FIELDS);
        url
    }
}

impl PostSource for TwitterClient {
    async fn search_recent(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<RawPost>, CollectorError> {
        self.search(query, max_results).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> TwitterClient {
        TwitterClient::with_base_url("test-bearer", 30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_targets_recent_search() {
        let client = test_client("https://api.twitter.com");
        let url = client.build_url("WebDev", 10);
        assert_eq!(
            url.as_str(),
            "https://api.twitter.com/2/tweets/search/recent?query=WebDev&max_results=10&tweet.fields=created_at%2Cpublic_metrics%2Cauthor_id"
        );
    }

    #[test]
    fn build_url_keeps_base_path_prefix() {
        let client = test_client("http://127.0.0.1:9999/proxy/");
        let url = client.build_url("AI", 10);
        assert_eq!(url.path(), "/proxy/2/tweets/search/recent");
    }

    #[test]
    fn build_url_encodes_query_operators() {
        let client = test_client("https://api.twitter.com");
        let url = client.build_url(r#""Artificial Intelligence" -is:retweet lang:en"#, 10);
        let query = url
            .query_pairs()
            .find(|(k, _)| k == "query")
            .map(|(_, v)| v.into_owned());
        assert_eq!(
            query.as_deref(),
            Some(r#""Artificial Intelligence" -is:retweet lang:en"#)
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = TwitterClient::with_base_url("t", 30, "not a url");
        assert!(matches!(result, Err(CollectorError::InvalidBaseUrl { .. })));
    }
}
