//! Command handlers: build the sources from config, run, export.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use techtrends_collector::{
    collect_company_posts, format_report, HttpCompanyFeed, RateLimitPolicy, RateLimiter,
    RelevanceFilter, TopicOutcome, TrendCollector, TwitterClient, DEFAULT_COMPANIES,
};
use techtrends_core::{default_topics, load_topics, AppConfig};

use crate::export::write_csv;

#[derive(Debug, Args, PartialEq, Eq)]
pub(crate) struct CollectArgs {
    /// Posts requested per topic
    #[arg(long, default_value_t = 5)]
    pub max_results: u32,

    /// Directory the CSV file is written to
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Also print the grouped text report
    #[arg(long)]
    pub report: bool,

    /// YAML file overriding the built-in topic map
    #[arg(long)]
    pub topics: Option<PathBuf>,
}

impl Default for CollectArgs {
    fn default() -> Self {
        Self {
            max_results: 5,
            output_dir: PathBuf::from("."),
            report: false,
            topics: None,
        }
    }
}

#[derive(Debug, Args, PartialEq, Eq)]
pub(crate) struct CompaniesArgs {
    /// Updates requested per company
    #[arg(long, default_value_t = 100)]
    pub max_results: u32,

    /// Directory the CSV file is written to
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,
}

pub(crate) fn rate_policy(config: &AppConfig) -> RateLimitPolicy {
    RateLimitPolicy {
        window: Duration::from_secs(config.rate_window_secs),
        max_requests: config.rate_max_requests,
        spacing: Duration::from_secs(config.rate_spacing_secs),
        ..RateLimitPolicy::default()
    }
}

/// Run the per-topic collection and export the kept posts.
///
/// # Errors
///
/// Returns an error if the bearer token is missing, the topics file is
/// invalid, the client cannot be built, or the CSV cannot be written.
/// Per-topic fetch failures are logged and never surface here.
pub(crate) async fn run_collect(config: &AppConfig, args: &CollectArgs) -> anyhow::Result<()> {
    let bearer = config.require_twitter_bearer()?;
    let topics = match &args.topics {
        Some(path) => load_topics(path)?,
        None => default_topics(),
    };

    let client =
        TwitterClient::with_base_url(bearer, config.request_timeout_secs, &config.twitter_base_url)
            .context("failed to build Twitter client")?;
    let mut collector = TrendCollector::new(
        client,
        topics,
        RateLimiter::new(rate_policy(config)),
        RelevanceFilter::with_min_engagement(config.min_engagement),
    );

    let run = collector.collect_run(args.max_results).await;

    for outcome in &run.outcomes {
        match outcome {
            TopicOutcome::Collected { .. } => {}
            TopicOutcome::QuotaExceeded { topic } => {
                println!("Rate limit reached for {topic}, skipped");
            }
            TopicOutcome::Failed { topic, message } => {
                println!("Error fetching tweets for {topic}: {message}");
            }
        }
    }

    let path = write_csv(&run.posts, &args.output_dir, &chrono::Local::now())?;
    tracing::info!(path = %path.display(), rows = run.posts.len(), "exported posts");
    println!("Collected {} trending tech items", run.posts.len());

    if args.report {
        print!("{}", format_report(&run.posts));
    }

    Ok(())
}

/// Run the company-feed collection and export its posts.
///
/// # Errors
///
/// Returns an error if the feed credentials are missing, the client cannot
/// be built, or the CSV cannot be written.
pub(crate) async fn run_companies(
    config: &AppConfig,
    args: &CompaniesArgs,
) -> anyhow::Result<()> {
    let (username, password) = config.require_linkedin_credentials()?;
    let feed = HttpCompanyFeed::new(
        &config.linkedin_base_url,
        username,
        password,
        config.request_timeout_secs,
    )
    .context("failed to build company feed client")?;

    let posts = collect_company_posts(&feed, &DEFAULT_COMPANIES, args.max_results).await;

    let path = write_csv(&posts, &args.output_dir, &chrono::Local::now())?;
    tracing::info!(path = %path.display(), rows = posts.len(), "exported company posts");
    println!("Collected {} company posts", posts.len());

    Ok(())
}
