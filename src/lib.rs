//! METS Downloader Core Library
//!
//! This library downloads every page scan of a digitized book. The book is
//! described by a METS/MODS document whose `MAX` file group points at one IIIF
//! image service per page; each page is fetched in its highest available
//! resolution and stored under the last path segment of its image id.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`download`] - HTTP client, staged file writes, download errors
//! - [`mets`] - Page reference extraction from METS documents
//! - [`iiif`] - IIIF descriptors, image formats and URL derivation
//! - [`pipeline`] - The sequential per-page batch run

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod download;
pub mod iiif;
pub mod mets;
pub mod pipeline;
mod user_agent;

// Re-export commonly used types
pub use download::{DownloadError, HttpClient};
pub use iiif::{ImageDescriptor, ImageFormat, ResolveError};
pub use mets::{MetsError, extract_page_references};
pub use pipeline::{
    DEFAULT_OUTPUT_DIR, PageError, PageFailure, PageOutcome, Pipeline, PipelineError,
    PipelineReport,
};
