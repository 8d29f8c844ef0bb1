//! Relevance filtering for fetched posts.

use std::sync::LazyLock;

use regex::Regex;

use crate::source::RawPost;

/// Phrases that mark a post as promotional. Matched against lowercased text.
const PROMO_PATTERNS: [&str; 6] = [
    "buy now",
    "click here",
    "limited time",
    "giveaway",
    "follow me",
    "check out my",
];

static PROMO_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = PROMO_PATTERNS
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&alternation).expect("valid promo regex")
});

/// Thresholds a post must meet to be kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelevanceFilter {
    /// Minimum `likes + retweets`.
    pub min_engagement: u64,
    /// Minimum raw text length in characters.
    pub min_length: usize,
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        Self {
            min_engagement: 10,
            min_length: 50,
        }
    }
}

impl RelevanceFilter {
    #[must_use]
    pub fn with_min_engagement(min_engagement: u64) -> Self {
        Self {
            min_engagement,
            ..Self::default()
        }
    }

    /// Returns `true` if the post clears the engagement and length
    /// thresholds and contains no promotional phrase.
    #[must_use]
    pub fn is_relevant(&self, post: &RawPost) -> bool {
        if post.engagement() < self.min_engagement {
            return false;
        }

        if post.text.chars().count() < self.min_length {
            return false;
        }

        !PROMO_RE.is_match(&post.text.to_lowercase())
    }
}

/// Checks a post against the default length threshold and the given
/// engagement threshold.
#[must_use]
pub fn is_relevant(post: &RawPost, min_engagement: u64) -> bool {
    RelevanceFilter::with_min_engagement(min_engagement).is_relevant(post)
}
