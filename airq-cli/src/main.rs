//! Binary crate for the `airq` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Setting up the tracing subscriber
//! - Human-friendly, color-tagged output formatting

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod output;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
