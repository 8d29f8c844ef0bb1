use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Platform a post was collected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    Twitter,
    LinkedIn,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Twitter => write!(f, "Twitter"),
            Source::LinkedIn => write!(f, "LinkedIn"),
        }
    }
}

/// A normalized post, ready for export or reporting.
///
/// `topic` holds the topic label for searched posts and the company name for
/// company-feed posts. `engagement` is the single combined count both the
/// exporter and the report read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub source: Source,
    pub topic: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub engagement: u64,
}
