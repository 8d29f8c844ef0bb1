//! Post collection for the tech trends collector.
//!
//! Queries a post source once per topic behind a rolling-window rate limiter,
//! keeps posts that pass the relevance filter, cleans their text, and renders
//! the resulting records into a grouped text report. A company-feed collector
//! is provided alongside but is not part of the per-topic run.

pub mod clean;
pub mod collector;
pub mod company_feed;
pub mod error;
pub mod rate_limit;
pub mod relevance;
pub mod report;
pub mod source;
pub mod twitter;

pub use clean::clean_text;
pub use collector::{CollectionRun, TopicOutcome, TrendCollector};
pub use company_feed::{
    collect_company_posts, CompanyFeed, CompanyUpdate, HttpCompanyFeed, DEFAULT_COMPANIES,
};
pub use error::CollectorError;
pub use rate_limit::{Clock, RateLimitPolicy, RateLimiter, TokioClock};
pub use relevance::{is_relevant, RelevanceFilter};
pub use report::format_report;
pub use source::{PostSource, RawPost};
pub use twitter::TwitterClient;

#[cfg(test)]
pub(crate) mod test_support;
