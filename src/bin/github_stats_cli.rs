use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use github_stats::config::StatsConfig;
use github_stats::github::GitHubClient;
use github_stats::{StatsOptions, StatsService};

#[derive(Parser)]
#[command(name = "github-stats-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "GitHub Stats CLI - collects a user's commits, pull requests, issues, reviews and stars and prints them as JSON"
)]
struct Cli {
    /// GitHub login of the user to collect stats for
    username: String,
    /// Count commits with the REST commit search instead of the contribution graph (exact but rate limited)
    #[arg(long)]
    include_all_commits: bool,
    /// Repository names to leave out of the star total - repeatable and comma separated
    #[arg(long, value_delimiter = ',')]
    exclude_repo: Vec<String>,
    /// Fetch the number of merged pull requests and the merged percentage
    #[arg(long)]
    include_merged_pull_requests: bool,
    /// Fetch the number of repository discussions started
    #[arg(long)]
    include_discussions: bool,
    /// Fetch the number of accepted discussion answers
    #[arg(long)]
    include_discussions_answers: bool,
    /// Sum commit contributions of every calendar year since 2008
    #[arg(long)]
    include_all_time_commits: bool,
    /// Follow repository pages past the first 100 repositories (overrides FETCH_MULTI_PAGE_STARS)
    #[arg(long)]
    fetch_multi_page_stars: bool,
    /// GitHub personal access token for API access (can also be set via GITHUB_TOKEN)
    #[arg(long)]
    github_token: Option<String>,
    /// Request timeout in seconds for GitHub API calls (default: 10 seconds)
    #[arg(long)]
    request_timeout: Option<u64>,
    /// Path of a TOML configuration file (default: <config dir>/github-stats/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("github_stats=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = StatsConfig::load(cli.config.as_deref())?;
    if cli.fetch_multi_page_stars {
        config.fetch_multi_page_stars = true;
    }
    if let Some(token) = cli.github_token {
        config.github_token = Some(token);
    }
    if let Some(timeout) = cli.request_timeout {
        config.request_timeout_secs = timeout;
    }

    let client = GitHubClient::from_config(&config)?;
    let service = StatsService::new(client, config.pagination());

    let options = StatsOptions {
        include_all_commits: cli.include_all_commits,
        exclude_repo: cli.exclude_repo,
        include_merged_pull_requests: cli.include_merged_pull_requests,
        include_discussions: cli.include_discussions,
        include_discussions_answers: cli.include_discussions_answers,
        include_all_time_commits: cli.include_all_time_commits,
    };

    let stats = service
        .fetch_stats(&cli.username, &options)
        .await
        .map_err(|e| anyhow::anyhow!("[{}] {}", e.error_type(), e))?;

    println!("{}", serde_json::to_string_pretty(&stats)?);

    Ok(())
}
