//! Error types for METS document parsing.

use thiserror::Error;

/// Errors that can occur while extracting page references from a METS document.
#[derive(Debug, Error)]
pub enum MetsError {
    /// The document is not well-formed XML.
    #[error("malformed METS document at byte {position}: {source}")]
    Xml {
        /// Byte offset at which the reader failed.
        position: u64,
        /// The underlying XML error.
        #[source]
        source: quick_xml::Error,
    },

    /// The document ended while elements were still open (truncated body).
    #[error("METS document ends with {open_elements} unclosed element(s)")]
    Unclosed {
        /// Number of elements left open at end of input.
        open_elements: usize,
    },

    /// The document contains no element at all (empty body, plain text, ...).
    #[error("METS document has no root element\n  Suggestion: check that the URL points to a METS/MODS XML file")]
    NoRootElement,
}

impl MetsError {
    /// Creates an XML syntax error at `position`.
    pub fn xml(position: u64, source: impl Into<quick_xml::Error>) -> Self {
        Self::Xml {
            position,
            source: source.into(),
        }
    }
}
