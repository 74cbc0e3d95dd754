//! `feedboard` -- command-line client for the suggestion board, roadmap
//! and changelog.
//!
//! # Environment variables
//!
//! | Variable                         | Required | Default | Description                      |
//! |----------------------------------|----------|---------|----------------------------------|
//! | `FEEDBOARD_API_URL`              | yes      | --      | Backend project URL              |
//! | `FEEDBOARD_API_KEY`              | yes      | --      | Anonymous or service API key     |
//! | `FEEDBOARD_REQUEST_TIMEOUT_SECS` | no       | `30`    | Per-request HTTP timeout         |
//! | `FEEDBOARD_USER_EMAIL`           | no       | --      | Default voter for `vote`/`react` |

mod cli;
mod commands;
mod config;

use std::sync::Arc;

use clap::Parser;
use feedboard_db::{RestSource, SharedSource};
use feedboard_events::{LogNotifier, SharedNotifier};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::config::CliConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "feedboard=debug,feedboard_sync=debug,feedboard_db=debug"
    } else {
        "feedboard=info,feedboard_sync=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = CliConfig::from_env()?;
    tracing::debug!(api_url = %config.api_url, timeout_secs = config.request_timeout_secs, "Configuration loaded");

    let source: SharedSource = Arc::new(RestSource::new(&config.rest())?);
    let notifier: SharedNotifier = Arc::new(LogNotifier);

    let output = commands::run(cli.command, &config, source, notifier).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
