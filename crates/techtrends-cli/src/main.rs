mod collect;
mod export;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::collect::{CollectArgs, CompaniesArgs};

#[derive(Debug, Parser)]
#[command(name = "techtrends")]
#[command(about = "Collect trending tech posts and export them to CSV")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search each tech topic, keep relevant posts, and export them (default)
    Collect(CollectArgs),
    /// Pull company update feeds and export them
    Companies(CompaniesArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = techtrends_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Collect(args)) => collect::run_collect(&config, &args).await,
        Some(Commands::Companies(args)) => collect::run_companies(&config, &args).await,
        None => collect::run_collect(&config, &CollectArgs::default()).await,
    }
}
