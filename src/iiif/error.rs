//! Error types for IIIF descriptor resolution.

use thiserror::Error;

use crate::download::DownloadError;

/// Errors that can occur while turning a page reference into an image descriptor.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The `info.json` document could not be fetched.
    #[error("could not fetch image descriptor {url}: {source}")]
    Fetch {
        /// The descriptor URL.
        url: String,
        /// The underlying fetch error.
        #[source]
        source: DownloadError,
    },

    /// The body is not JSON.
    #[error("image descriptor {url} is not valid JSON: {source}")]
    InvalidJson {
        /// The descriptor URL.
        url: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The body is JSON but not a descriptor object with a string `id`.
    #[error("image descriptor {url} has no usable id: {source}")]
    InvalidDescriptor {
        /// The descriptor URL.
        url: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The `id` has no last path segment to name the output file after.
    #[error("image id '{id}' has no usable last path segment")]
    InvalidIdentifier {
        /// The offending identifier.
        id: String,
    },
}

impl ResolveError {
    /// Creates a fetch error.
    pub fn fetch(url: impl Into<String>, source: DownloadError) -> Self {
        Self::Fetch {
            url: url.into(),
            source,
        }
    }

    /// Creates a JSON error, telling syntax problems apart from shape problems.
    pub fn json(url: impl Into<String>, source: serde_json::Error) -> Self {
        let url = url.into();
        if source.is_data() {
            Self::InvalidDescriptor { url, source }
        } else {
            Self::InvalidJson { url, source }
        }
    }

    /// Creates an invalid-identifier error.
    pub fn invalid_identifier(id: impl Into<String>) -> Self {
        Self::InvalidIdentifier { id: id.into() }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_json_syntax_error_is_invalid_json() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let error = ResolveError::json("https://example.org/p1/info.json", source);
        assert!(matches!(error, ResolveError::InvalidJson { .. }));
        assert!(error.to_string().contains("https://example.org/p1/info.json"));
    }

    #[test]
    fn test_json_data_error_is_invalid_descriptor() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct NeedsId {
            id: String,
        }
        let source = serde_json::from_str::<NeedsId>("{}").unwrap_err();
        let error = ResolveError::json("https://example.org/p1/info.json", source);
        assert!(matches!(error, ResolveError::InvalidDescriptor { .. }));
        assert!(error.to_string().contains("id"), "got: {error}");
    }

    #[test]
    fn test_invalid_identifier_display() {
        let error = ResolveError::invalid_identifier("https://example.org/iiif/..");
        assert!(error.to_string().contains("https://example.org/iiif/.."));
    }
}
