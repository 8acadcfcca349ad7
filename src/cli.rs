//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;
use url::Url;

use mets_downloader_core::DEFAULT_OUTPUT_DIR;

/// Download every page of a digitized book in full resolution.
///
/// Reads the METS/MODS document at METS_URL, resolves the IIIF image service
/// of each page listed in its MAX file group and stores the largest JPEG
/// rendition. Pages whose file already exists are skipped, so an interrupted
/// run can simply be repeated.
#[derive(Parser, Debug)]
#[command(name = "mets-downloader")]
#[command(author, version, about)]
pub struct Args {
    /// URL of the METS/MODS container descriptor (http or https)
    #[arg(value_name = "METS_URL", value_parser = parse_http_url)]
    pub mets_url: String,

    /// Directory the page images are written to (created if missing)
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

fn parse_http_url(value: &str) -> Result<String, String> {
    let url = Url::parse(value).map_err(|e| format!("not a valid URL: {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(value.to_string()),
        scheme => Err(format!("scheme '{scheme}' is not supported, use http or https")),
    }
}
