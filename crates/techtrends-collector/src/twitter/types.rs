//! Wire types for the Twitter/X v2 recent-search endpoint.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::source::RawPost;

/// Envelope returned by `GET /2/tweets/search/recent`.
///
/// `data` is omitted entirely when nothing matched.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub(crate) data: Vec<Tweet>,
    #[serde(default)]
    pub(crate) meta: Option<SearchMeta>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchMeta {
    #[serde(default)]
    pub(crate) result_count: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Tweet {
    pub(crate) id: String,
    pub(crate) text: String,
    pub(crate) created_at: Option<DateTime<Utc>>,
    pub(crate) author_id: Option<String>,
    pub(crate) public_metrics: Option<PublicMetrics>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PublicMetrics {
    #[serde(default)]
    pub(crate) like_count: u64,
    #[serde(default)]
    pub(crate) retweet_count: u64,
}

impl Tweet {
    /// Converts to a [`RawPost`], stamping `fetched_at` when the API left
    /// out `created_at`.
    pub(crate) fn into_raw_post(self, fetched_at: DateTime<Utc>) -> RawPost {
        let metrics = self.public_metrics.unwrap_or_default();
        RawPost {
            id: self.id,
            text: self.text,
            created_at: self.created_at.unwrap_or(fetched_at),
            author_id: self.author_id,
            like_count: metrics.like_count,
            retweet_count: metrics.retweet_count,
        }
    }
}
