//! IIIF image formats and their MIME types.
//!
//! Table from IIIF Image API 3.0, section 4.5.

use std::fmt;

/// An output format an IIIF image server may offer.
///
/// Downloads always use [`ImageFormat::Jpeg`] (the default); the other
/// variants exist so `extraFormats` announcements can be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// `image/jpeg`
    #[default]
    Jpeg,
    /// `image/tiff`
    Tiff,
    /// `image/png`
    Png,
    /// `image/gif`
    Gif,
    /// `image/jp2`
    Jp2,
    /// `application/pdf`
    Pdf,
    /// `image/webp`
    Webp,
}

impl ImageFormat {
    /// Every known format, in table order.
    pub const ALL: [Self; 7] = [
        Self::Jpeg,
        Self::Tiff,
        Self::Png,
        Self::Gif,
        Self::Jp2,
        Self::Pdf,
        Self::Webp,
    ];

    /// Looks up a format by MIME type. Parameters and case are ignored.
    ///
    /// ```
    /// use mets_downloader_core::iiif::ImageFormat;
    ///
    /// assert_eq!(ImageFormat::from_mime("image/tiff"), Some(ImageFormat::Tiff));
    /// assert_eq!(ImageFormat::from_mime("text/html"), None);
    /// ```
    #[must_use]
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim();
        Self::ALL
            .into_iter()
            .find(|format| format.mime_type().eq_ignore_ascii_case(essence))
    }

    /// Looks up a format by its IIIF extension (`jpg`, `tif`, ...).
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.trim_start_matches('.');
        Self::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(extension))
    }

    /// MIME type of the format.
    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Tiff => "image/tiff",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Jp2 => "image/jp2",
            Self::Pdf => "application/pdf",
            Self::Webp => "image/webp",
        }
    }

    /// IIIF extension, without the leading dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Tiff => "tif",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Jp2 => "jp2",
            Self::Pdf => "pdf",
            Self::Webp => "webp",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
