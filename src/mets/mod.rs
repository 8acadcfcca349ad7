//! METS/MODS container descriptor handling.
//!
//! A digitized book is described by one METS document whose file section
//! lists, per rendition group, one `file` per page. The `MAX` group points at
//! the IIIF image service of every page scan; this module pulls those
//! pointers out in page order.

mod error;
mod extractor;

pub use error::MetsError;
pub use extractor::{METS_NS, XLINK_NS, extract_page_references};
