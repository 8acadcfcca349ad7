//! IIIF Image API support.
//!
//! Each page reference from the METS document is the base URI of an IIIF
//! image service. Its `info.json` descriptor names the canonical image `id`,
//! from which the full-resolution rendition URL and the output filename are
//! derived:
//!
//! - descriptor: `{reference}/info.json`
//! - rendition: `{id}/full/max/0/default.{ext}`
//! - filename: `{last segment of id}.{ext}`

mod descriptor;
mod error;
mod format;
mod resolver;

pub use descriptor::{FULL_MAX_DEFAULT, INFO_JSON_SUFFIX, ImageDescriptor, info_url};
pub use error::ResolveError;
pub use format::ImageFormat;
pub use resolver::resolve_descriptor;
