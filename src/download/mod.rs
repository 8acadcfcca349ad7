//! HTTP fetching and file storage.
//!
//! This module provides the one network primitive every pipeline stage uses:
//! a GET that either yields the body or a structured [`DownloadError`].
//!
//! # Features
//!
//! - Text fetches for the METS document and IIIF descriptors
//! - Streaming downloads (memory-efficient for full-resolution scans)
//! - Staged writes: a download only appears under its final name when complete
//! - Configurable timeouts (30s connect, 5min read by default)
//!
//! # Example
//!
//! ```no_run
//! use mets_downloader_core::download::HttpClient;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new()?;
//! let bytes = client
//!     .download_to_path(
//!         "https://example.org/iiif/DMM_12345/full/max/0/default.jpg",
//!         Path::new("./DMM_12345.jpg"),
//!     )
//!     .await?;
//! println!("Downloaded {bytes} bytes");
//! # Ok(())
//! # }
//! ```

mod client;
pub mod constants;
mod error;
mod filename;

pub use client::HttpClient;
pub use error::DownloadError;
pub use filename::{last_path_segment, partial_path};

// No module-local Result aliases; signatures spell out `Result<T, DownloadError>`.
