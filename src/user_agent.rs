//! User-Agent string sent with every request.
//!
//! Image servers of digitization projects log and sometimes throttle by
//! client; identifying the tool and where it lives keeps the traffic
//! attributable (RFC 9308).

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/fierce/mets-downloader";

/// Default User-Agent for document, descriptor and image requests.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("mets-downloader/{version} (iiif-page-fetcher; +{PROJECT_UA_URL})")
}
