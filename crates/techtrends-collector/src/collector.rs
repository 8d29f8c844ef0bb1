//! Per-topic collection run.

use techtrends_core::{PostRecord, Source, Topic};

use crate::clean::clean_text;
use crate::rate_limit::{Clock, RateLimiter, TokioClock};
use crate::relevance::RelevanceFilter;
use crate::source::{PostSource, RawPost};

/// What happened when one topic was queried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicOutcome {
    Collected {
        topic: String,
        fetched: usize,
        kept: usize,
    },
    /// The source reported its quota exhausted; the topic yields nothing.
    QuotaExceeded { topic: String },
    Failed { topic: String, message: String },
}

impl TopicOutcome {
    #[must_use]
    pub fn topic(&self) -> &str {
        match self {
            TopicOutcome::Collected { topic, .. }
            | TopicOutcome::QuotaExceeded { topic }
            | TopicOutcome::Failed { topic, .. } => topic,
        }
    }
}

/// Records from one run plus one outcome per topic, in topic order.
#[derive(Debug, Clone, Default)]
pub struct CollectionRun {
    pub posts: Vec<PostRecord>,
    pub outcomes: Vec<TopicOutcome>,
}

/// Restricts a topic query to original (non-reshared) English posts.
#[must_use]
pub fn search_expression(query: &str) -> String {
    format!("{query} -is:retweet lang:en")
}

/// Queries a [`PostSource`] once per topic behind a [`RateLimiter`].
///
/// A failing topic never aborts the run: a quota signal triggers the
/// limiter's back-off and the next topic is tried, any other error is logged
/// and skipped.
pub struct TrendCollector<S, C = TokioClock> {
    source: S,
    topics: Vec<Topic>,
    limiter: RateLimiter<C>,
    filter: RelevanceFilter,
}

impl<S: PostSource, C: Clock> TrendCollector<S, C> {
    #[must_use]
    pub fn new(
        source: S,
        topics: Vec<Topic>,
        limiter: RateLimiter<C>,
        filter: RelevanceFilter,
    ) -> Self {
        Self {
            source,
            topics,
            limiter,
            filter,
        }
    }

    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    #[must_use]
    pub fn limiter(&self) -> &RateLimiter<C> {
        &self.limiter
    }

    /// Collects relevant, cleaned posts for every topic in declaration order.
    pub async fn collect(&mut self, max_results_per_topic: u32) -> Vec<PostRecord> {
        self.collect_run(max_results_per_topic).await.posts
    }

    /// Like [`Self::collect`], also reporting what happened to each topic.
    pub async fn collect_run(&mut self, max_results_per_topic: u32) -> CollectionRun {
        let mut run = CollectionRun::default();

        for topic in &self.topics {
            self.limiter.acquire().await;

            let expression = search_expression(&topic.query);
            let fetched = self
                .source
                .search_recent(&expression, max_results_per_topic)
                .await;

            let outcome = match fetched {
                Ok(raw_posts) => {
                    let fetched = raw_posts.len();
                    let before = run.posts.len();
                    run.posts.extend(
                        raw_posts
                            .iter()
                            .filter(|post| self.filter.is_relevant(post))
                            .map(|post| to_record(&topic.label, post)),
                    );
                    let kept = run.posts.len() - before;
                    tracing::debug!(topic = %topic.label, fetched, kept, "collected topic");
                    TopicOutcome::Collected {
                        topic: topic.label.clone(),
                        fetched,
                        kept,
                    }
                }
                Err(e) if e.is_quota_exceeded() => {
                    tracing::warn!(topic = %topic.label, "quota reached, skipping topic");
                    self.limiter.back_off_after_quota().await;
                    TopicOutcome::QuotaExceeded {
                        topic: topic.label.clone(),
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        topic = %topic.label,
                        error = %e,
                        "error fetching posts for topic"
                    );
                    TopicOutcome::Failed {
                        topic: topic.label.clone(),
                        message: e.to_string(),
                    }
                }
            };
            run.outcomes.push(outcome);
        }

        tracing::info!(
            topics = self.topics.len(),
            posts = run.posts.len(),
            "collection run finished"
        );
        run
    }
}

fn to_record(topic: &str, post: &RawPost) -> PostRecord {
    PostRecord {
        source: Source::Twitter,
        topic: topic.to_string(),
        content: clean_text(&post.text),
        timestamp: post.created_at,
        engagement: post.engagement(),
    }
}

#[cfg(test)]
#[path = "collector_test.rs"]
mod tests;
