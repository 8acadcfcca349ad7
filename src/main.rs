//! CLI entry point for the METS page downloader.

use anyhow::{Context, Result};
use clap::Parser;
use mets_downloader_core::{HttpClient, Pipeline};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");
    info!(url = %args.mets_url, output_dir = %args.output_dir.display(), "METS downloader starting");

    let client = HttpClient::new().context("could not initialize HTTP client")?;
    let pipeline = Pipeline::new(client, args.output_dir.clone());

    // Diagnostics go to stdout as they happen; logs stay on stderr.
    let report = pipeline
        .run_with(&args.mets_url, |_, result| {
            if let Err(error) = result
                && let Some(line) = error.diagnostic()
            {
                println!("{line}");
            }
        })
        .await?;

    info!(
        references = report.references(),
        downloaded = report.downloaded(),
        skipped = report.skipped(),
        failed = report.failed(),
        "Download complete"
    );

    Ok(())
}
