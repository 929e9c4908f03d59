mod aggregate;
mod config;
mod curation;
mod errors;
mod github;
mod merge;
mod models;
mod pipeline;
mod render;
mod resume;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (errors on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting profile updater v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Fetching {} repos for {}",
        if config.github_token.is_some() {
            "public and private"
        } else {
            "public"
        },
        config.github_username
    );

    pipeline::run_update(&config).await?;

    Ok(())
}
