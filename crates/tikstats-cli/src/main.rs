use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tikstats_core::ProfileSnapshot;
use tikstats_scraper::{
    extract_profile_stats, extract_profile_stats_with, MarkupStrategy, ProfileClient,
    SummaryTextStrategy,
};

#[derive(Debug, Parser)]
#[command(name = "tikstats-cli")]
#[command(about = "Profile statistics and KPIs from public profile pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch a profile page and print its snapshot as JSON
    Profile {
        /// Profile handle, with or without the leading `@`
        username: String,
    },
    /// Parse a saved profile page and print its snapshot as JSON
    Parse {
        /// Path to the saved HTML
        file: PathBuf,
        /// How to read the follower/following/like counts
        #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
        strategy: StrategyArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    /// Pick from the markers present on the page
    Auto,
    /// `data-e2e` count elements
    Markup,
    /// Regex over the summary phrase
    Summary,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = tikstats_core::load_app_config_from_env()?;
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let snapshot = match cli.command {
        Commands::Profile { username } => {
            let client = ProfileClient::from_config(&config)?;
            tikstats_scraper::scrape_profile(&client, &username)
                .await
                .with_context(|| format!("failed to build snapshot for {username}"))?
        }
        Commands::Parse { file, strategy } => {
            let html = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            parse_saved_page(&html, strategy)
                .with_context(|| format!("failed to parse {}", file.display()))?
        }
    };

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn parse_saved_page(html: &str, strategy: StrategyArg) -> anyhow::Result<ProfileSnapshot> {
    let stats = match strategy {
        StrategyArg::Auto => extract_profile_stats(html)?,
        StrategyArg::Markup => extract_profile_stats_with(html, &MarkupStrategy)?,
        StrategyArg::Summary => extract_profile_stats_with(html, &SummaryTextStrategy)?,
    };
    tracing::debug!(views = stats.views, videos = stats.videos.len(), "parsed saved page");
    Ok(ProfileSnapshot::from_stats(stats)?)
}
