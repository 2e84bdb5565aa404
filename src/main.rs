//! Vidscope - Video Forensics Search
//!
//! CLI entry point: search the detection index and print playable clip URLs.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod cli;
mod settings;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let cli = cli::Cli::parse();
    let settings = settings::load_config()?;

    let default_filter = format!(
        "vidscope={level},vidscope_core={level},vidscope_client={level}",
        level = settings.logging.level
    );
    let json = settings.logging.json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();

    debug!("Starting vidscope v{}", env!("CARGO_PKG_VERSION"));

    cli::run(cli, settings).await
}
