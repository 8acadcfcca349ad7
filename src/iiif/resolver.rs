//! Resolution of page references to image descriptors.

use tracing::{debug, instrument};

use super::descriptor::{ImageDescriptor, info_url};
use super::error::ResolveError;
use crate::download::HttpClient;

/// Fetches and parses the `info.json` descriptor of one page reference.
///
/// # Errors
///
/// Returns [`ResolveError::Fetch`] when the descriptor cannot be retrieved and
/// [`ResolveError::InvalidJson`] / [`ResolveError::InvalidDescriptor`] when
/// its body is unusable.
#[instrument(skip(client), fields(reference = %reference))]
pub async fn resolve_descriptor(
    client: &HttpClient,
    reference: &str,
) -> Result<ImageDescriptor, ResolveError> {
    let url = info_url(reference);
    let body = client
        .fetch_text(&url)
        .await
        .map_err(|e| ResolveError::fetch(&url, e))?;
    let descriptor = ImageDescriptor::from_json(&url, &body)?;
    debug!(id = %descriptor.id, extra_formats = ?descriptor.extra_formats, "resolved descriptor");
    Ok(descriptor)
}
