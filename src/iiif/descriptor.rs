//! IIIF image descriptors (`info.json`) and the URLs derived from them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use super::error::ResolveError;
use super::format::ImageFormat;
use crate::download::last_path_segment;

/// Path appended to a page reference to address its descriptor.
pub const INFO_JSON_SUFFIX: &str = "/info.json";

/// Region, size, rotation and quality of the full-resolution rendition:
/// whole image, maximum size, unrotated, default quality.
pub const FULL_MAX_DEFAULT: &str = "/full/max/0/default";

/// Builds the descriptor URL of a page reference.
///
/// ```
/// use mets_downloader_core::iiif::info_url;
///
/// assert_eq!(
///     info_url("https://example.org/iiif/DMM_12345"),
///     "https://example.org/iiif/DMM_12345/info.json"
/// );
/// ```
#[must_use]
pub fn info_url(reference: &str) -> String {
    format!("{reference}{INFO_JSON_SUFFIX}")
}

/// The parts of an IIIF `info.json` document this tool reads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawDescriptor")]
pub struct ImageDescriptor {
    /// Base URI of the image service (`@id` in Image API 2.x).
    pub id: String,

    /// Formats offered beyond the compliance level, as extensions.
    pub extra_formats: Vec<String>,
}

/// `info.json` as served. Only `id` must be well-formed; `@id` is consulted
/// when `id` is absent.
#[derive(Debug, Deserialize)]
struct RawDescriptor {
    #[serde(default)]
    id: Option<String>,

    #[serde(default, rename = "@id", deserialize_with = "lenient")]
    legacy_id: Option<String>,

    #[serde(default, rename = "extraFormats", deserialize_with = "lenient")]
    extra_formats: Vec<String>,
}

impl TryFrom<RawDescriptor> for ImageDescriptor {
    type Error = &'static str;

    fn try_from(raw: RawDescriptor) -> Result<Self, Self::Error> {
        let id = raw.id.or(raw.legacy_id).ok_or("missing field `id`")?;
        Ok(Self {
            id,
            extra_formats: raw.extra_formats,
        })
    }
}

/// Accepts any JSON value, falling back to `T::default()` when it does not
/// have the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

impl ImageDescriptor {
    /// Parses the body of the descriptor fetched from `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidJson`] for bodies that are not JSON and
    /// [`ResolveError::InvalidDescriptor`] when `id` is missing or not a string.
    pub fn from_json(url: &str, body: &str) -> Result<Self, ResolveError> {
        serde_json::from_str(body).map_err(|e| ResolveError::json(url, e))
    }

    /// URL of the full-resolution rendition in `format`.
    ///
    /// ```
    /// use mets_downloader_core::iiif::{ImageDescriptor, ImageFormat};
    ///
    /// let descriptor = ImageDescriptor {
    ///     id: "https://example.org/iiif/DMM_12345".to_string(),
    ///     extra_formats: Vec::new(),
    /// };
    /// assert_eq!(
    ///     descriptor.image_url(ImageFormat::Jpeg),
    ///     "https://example.org/iiif/DMM_12345/full/max/0/default.jpg"
    /// );
    /// ```
    #[must_use]
    pub fn image_url(&self, format: ImageFormat) -> String {
        format!("{}{FULL_MAX_DEFAULT}.{}", self.id, format.extension())
    }

    /// Local filename for the rendition: last path segment of `id` plus extension.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidIdentifier`] when `id` has no usable
    /// last segment.
    pub fn output_filename(&self, format: ImageFormat) -> Result<String, ResolveError> {
        let stem =
            last_path_segment(&self.id).ok_or_else(|| ResolveError::invalid_identifier(&self.id))?;
        Ok(format!("{stem}.{}", format.extension()))
    }

    /// Whether the server announces `format` in `extraFormats`.
    #[must_use]
    pub fn offers_extra(&self, format: ImageFormat) -> bool {
        self.extra_formats
            .iter()
            .any(|extension| ImageFormat::from_extension(extension) == Some(format))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const DESCRIPTOR_URL: &str = "https://example.org/iiif/DMM_12345/info.json";

    fn descriptor(id: &str) -> ImageDescriptor {
        ImageDescriptor {
            id: id.to_string(),
            extra_formats: Vec::new(),
        }
    }

    #[test]
    fn test_info_url_appends_suffix() {
        assert_eq!(
            info_url("https://example.org/iiif/DMM_12345"),
            "https://example.org/iiif/DMM_12345/info.json"
        );
    }

    #[test]
    fn test_info_url_is_plain_concatenation() {
        assert_eq!(info_url("A"), "A/info.json");
        assert_eq!(info_url("https://example.org/p/"), "https://example.org/p//info.json");
    }

    #[test]
    fn test_image_url_requests_full_max_default() {
        assert_eq!(
            descriptor("https://example.org/iiif/DMM_12345").image_url(ImageFormat::Jpeg),
            "https://example.org/iiif/DMM_12345/full/max/0/default.jpg"
        );
        assert_eq!(
            descriptor("A1").image_url(ImageFormat::Jpeg),
            "A1/full/max/0/default.jpg"
        );
    }

    #[test]
    fn test_output_filename_uses_last_segment() {
        assert_eq!(
            descriptor("https://example.org/iiif/DMM_12345")
                .output_filename(ImageFormat::Jpeg)
                .unwrap(),
            "DMM_12345.jpg"
        );
        assert_eq!(
            descriptor("B1").output_filename(ImageFormat::Jpeg).unwrap(),
            "B1.jpg"
        );
    }

    #[test]
    fn test_output_filename_rejects_unusable_id() {
        let result = descriptor("https://example.org/iiif/..").output_filename(ImageFormat::Jpeg);
        assert!(matches!(result, Err(ResolveError::InvalidIdentifier { .. })));

        let result = descriptor("").output_filename(ImageFormat::Jpeg);
        assert!(matches!(result, Err(ResolveError::InvalidIdentifier { .. })));
    }

    #[test]
    fn test_from_json_reads_image_api_3_descriptor() {
        let body = r#"{
            "@context": "http://iiif.io/api/image/3/context.json",
            "id": "https://example.org/iiif/DMM_12345",
            "type": "ImageService3",
            "protocol": "http://iiif.io/api/image",
            "profile": "level1",
            "width": 4000,
            "height": 6000,
            "extraFormats": ["tif", "png"]
        }"#;

        let parsed = ImageDescriptor::from_json(DESCRIPTOR_URL, body).unwrap();

        assert_eq!(parsed.id, "https://example.org/iiif/DMM_12345");
        assert!(parsed.offers_extra(ImageFormat::Tiff));
        assert!(!parsed.offers_extra(ImageFormat::Webp));
    }

    #[test]
    fn test_from_json_accepts_image_api_2_at_id() {
        let body = r#"{"@context": "http://iiif.io/api/image/2/context.json",
                       "@id": "https://example.org/iiif2/page_7",
                       "protocol": "http://iiif.io/api/image"}"#;

        let parsed = ImageDescriptor::from_json(DESCRIPTOR_URL, body).unwrap();

        assert_eq!(parsed.id, "https://example.org/iiif2/page_7");
        assert!(parsed.extra_formats.is_empty());
    }

    #[test]
    fn test_from_json_prefers_id_over_at_id() {
        let body = r#"{"@id": "https://example.org/iiif2/DMM_12345",
                       "id": "https://example.org/iiif/DMM_12345"}"#;

        let parsed = ImageDescriptor::from_json(DESCRIPTOR_URL, body).unwrap();

        assert_eq!(parsed.id, "https://example.org/iiif/DMM_12345");
    }

    #[test]
    fn test_from_json_ignores_malformed_at_id_when_id_present() {
        let body = r#"{"@id": 7, "id": "https://example.org/iiif/DMM_12345"}"#;

        let parsed = ImageDescriptor::from_json(DESCRIPTOR_URL, body).unwrap();

        assert_eq!(parsed.id, "https://example.org/iiif/DMM_12345");
    }

    #[test]
    fn test_from_json_tolerates_null_extra_formats() {
        let body = r#"{"id": "https://example.org/iiif/DMM_12345", "extraFormats": null}"#;

        let parsed = ImageDescriptor::from_json(DESCRIPTOR_URL, body).unwrap();

        assert_eq!(parsed.id, "https://example.org/iiif/DMM_12345");
        assert!(parsed.extra_formats.is_empty());
    }

    #[test]
    fn test_from_json_tolerates_scalar_extra_formats() {
        let body = r#"{"id": "https://example.org/iiif/DMM_12345", "extraFormats": "tif"}"#;

        let parsed = ImageDescriptor::from_json(DESCRIPTOR_URL, body).unwrap();

        assert_eq!(parsed.id, "https://example.org/iiif/DMM_12345");
        assert!(!parsed.offers_extra(ImageFormat::Tiff));
    }

    #[test]
    fn test_from_json_rejects_non_json() {
        let result = ImageDescriptor::from_json(DESCRIPTOR_URL, "<html>Not Found</html>");
        assert!(matches!(result, Err(ResolveError::InvalidJson { .. })));
    }

    #[test]
    fn test_from_json_rejects_missing_id() {
        let result = ImageDescriptor::from_json(DESCRIPTOR_URL, r#"{"width": 10}"#);
        assert!(matches!(result, Err(ResolveError::InvalidDescriptor { .. })));
    }

    #[test]
    fn test_from_json_rejects_non_string_id() {
        let result = ImageDescriptor::from_json(DESCRIPTOR_URL, r#"{"id": 42}"#);
        assert!(matches!(result, Err(ResolveError::InvalidDescriptor { .. })));
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        let result = ImageDescriptor::from_json(DESCRIPTOR_URL, "null");
        assert!(matches!(result, Err(ResolveError::InvalidDescriptor { .. })));
    }
}
