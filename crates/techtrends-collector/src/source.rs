//! The post-source seam between the collector and an external search API.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::error::CollectorError;

/// A post as returned by a source, before filtering and cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPost {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub author_id: Option<String>,
    pub like_count: u64,
    pub retweet_count: u64,
}

impl RawPost {
    /// Combined engagement: likes plus reshares.
    #[must_use]
    pub fn engagement(&self) -> u64 {
        self.like_count.saturating_add(self.retweet_count)
    }
}

/// A searchable source of recent posts.
pub trait PostSource {
    /// Returns up to `max_results` recent posts matching `query`, in the
    /// order the source ranks them.
    ///
    /// Implementations report an exhausted request quota as
    /// [`CollectorError::QuotaExceeded`] so the caller can back off.
    fn search_recent(
        &self,
        query: &str,
        max_results: u32,
    ) -> impl Future<Output = Result<Vec<RawPost>, CollectorError>> + Send;
}
