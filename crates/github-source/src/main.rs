//! GitHub event source binary.
//!
//! Serves the feed lifecycle API until terminated.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use github_source::{GitHubEventSource, GITHUB_API_URL};
use sources::{run_event_source, telemetry, ServerConfig};

/// GitHub pull request webhook event source.
#[derive(Parser)]
#[command(name = "github-source", version)]
#[command(about = "Register GitHub pull_request webhooks for event feeds")]
struct Cli {
    #[command(flatten)]
    server: ServerConfig,

    /// GitHub REST API base URL (or set `GITHUB_API_URL` env var).
    #[arg(long, env = "GITHUB_API_URL", default_value = GITHUB_API_URL)]
    github_api_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    telemetry::init(cli.server.log_format).context("Failed to initialize logging")?;

    info!(api_url = %cli.github_api_url, "Starting GitHub event source");

    let source = GitHubEventSource::with_api_url(cli.github_api_url);
    run_event_source(source, &cli.server)
        .await
        .context("Event source run-loop failed")?;

    info!("Done...");
    Ok(())
}
