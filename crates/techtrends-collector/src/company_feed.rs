//! Company update feeds, the optional second post source.
//!
//! Unlike [`crate::TrendCollector`], a failure here is handled at the level
//! of the whole feed: the first error stops the loop and whatever was
//! gathered before it is returned. Feed posts are neither filtered nor
//! cleaned.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use techtrends_core::{PostRecord, Source};

use crate::error::CollectorError;

pub const DEFAULT_COMPANIES: [&str; 5] = ["microsoft", "google", "apple", "meta", "amazon"];

/// One entry of a company's update feed. Every field may be absent on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CompanyUpdate {
    #[serde(default)]
    pub text: Option<String>,
    /// Publication time in epoch milliseconds.
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub likes: Option<u64>,
}

impl CompanyUpdate {
    fn into_record(self, company: &str, fetched_at: DateTime<Utc>) -> PostRecord {
        PostRecord {
            source: Source::LinkedIn,
            topic: company.to_string(),
            content: self.text.unwrap_or_default(),
            timestamp: self
                .time
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .unwrap_or(fetched_at),
            engagement: self.likes.unwrap_or(0),
        }
    }
}

pub trait CompanyFeed {
    fn company_updates(
        &self,
        company: &str,
        max_results: u32,
    ) -> impl Future<Output = Result<Vec<CompanyUpdate>, CollectorError>> + Send;
}

/// HTTP company feed authenticated with the operator's username and password.
pub struct HttpCompanyFeed {
    client: Client,
    base_url: Url,
    username: String,
    password: String,
}

impl HttpCompanyFeed {
    /// # Errors
    ///
    /// Returns [`CollectorError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`CollectorError::InvalidBaseUrl`] if `base_url` does not
    /// parse as an absolute URL.
    pub fn new(
        base_url: &str,
        username: &str,
        password: &str,
        timeout_secs: u64,
    ) -> Result<Self, CollectorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("techtrends/0.1")
            .build()?;

        let parsed = Url::parse(base_url).map_err(|e| CollectorError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(CollectorError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            username: username.to_owned(),
            password: password.to_owned(),
        })
    }

    fn updates_url(&self, company: &str, max_results: u32) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["companies", company, "updates"]);
        }
        url.query_pairs_mut()
            .append_pair("count", &max_results.to_string());
        url
    }

    /// Fetches up to `max_results` updates for `company`.
    ///
    /// # Errors
    ///
    /// - [`CollectorError::QuotaExceeded`] on HTTP 429.
    /// - [`CollectorError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`CollectorError::Http`] on network failure.
    /// - [`CollectorError::Deserialize`] if the body is not a JSON array of updates.
    pub async fn fetch_updates(
        &self,
        company: &str,
        max_results: u32,
    ) -> Result<Vec<CompanyUpdate>, CollectorError> {
        let url = self.updates_url(company, max_results);
        let response = self
            .client
            .get(url.clone())
            .basic_auth(&self.username, Some(&self.password))
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
        let mut updates: Vec<CompanyUpdate> =
            serde_json::from_str(&body).map_err(|e| CollectorError::Deserialize {
                context: format!("company updates (company={company})"),
                source: e,
            })?;
        updates.truncate(max_results as usize);
        Ok(updates)
    }
}

impl CompanyFeed for HttpCompanyFeed {
    async fn company_updates(
        &self,
        company: &str,
        max_results: u32,
    ) -> Result<Vec<CompanyUpdate>, CollectorError> {
        self.fetch_updates(company, max_results).await
    }
}

/// Collects update posts for each company in order.
///
/// Stops at the first failing company, logging the error, and returns the
/// records gathered from the companies before it.
pub async fn collect_company_posts<F: CompanyFeed>(
    feed: &F,
    companies: &[&str],
    max_results: u32,
) -> Vec<PostRecord> {
    let mut posts = Vec::new();

    for company in companies {
        match feed.company_updates(company, max_results).await {
            Ok(updates) => {
                tracing::debug!(company, count = updates.len(), "collected company updates");
                let fetched_at = Utc::now();
                posts.extend(
                    updates
                        .into_iter()
                        .map(|update| update.into_record(company, fetched_at)),
                );
            }
            Err(e) => {
                tracing::warn!(
                    company,
                    error = %e,
                    "company feed failed, skipping remaining companies"
                );
                break;
            }
        }
    }

    posts
}
