//! Constants for the download module (timeouts, staging files).

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes for full-resolution scans).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Suffix of the staging file a download is streamed into before the rename.
pub const PARTIAL_SUFFIX: &str = ".part";
