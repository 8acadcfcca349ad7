//! Filename derivation and staging paths for downloads.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::constants::PARTIAL_SUFFIX;

/// Returns the last `/`-separated segment of `value`, ignoring trailing slashes.
///
/// Returns `None` when no segment remains or when the segment could escape the
/// output directory (`.`, `..`, backslashes, NUL).
///
/// ```
/// use mets_downloader_core::download::last_path_segment;
///
/// assert_eq!(
///     last_path_segment("https://example.org/iiif/DMM_12345"),
///     Some("DMM_12345")
/// );
/// assert_eq!(last_path_segment("https://example.org/iiif/p7/"), Some("p7"));
/// assert_eq!(last_path_segment(""), None);
/// ```
#[must_use]
pub fn last_path_segment(value: &str) -> Option<&str> {
    let segment = value.trim_end_matches('/').rsplit('/').next()?;
    let unsafe_segment = segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains(['\\', '\0']);
    (!unsafe_segment).then_some(segment)
}

/// Returns the staging path a download into `path` is written to first.
#[must_use]
pub fn partial_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_else(OsString::new);
    name.push(PARTIAL_SUFFIX);
    path.with_file_name(name)
}
