//! Page download pipeline.
//!
//! Runs the whole batch for one METS document: fetch the document, extract
//! the page references, then for each reference resolve its IIIF descriptor
//! and store the full-resolution rendition.
//!
//! # Failure model
//!
//! Only problems with the document itself (unreachable, malformed) or with the
//! output directory end a run. Every per-page problem is recorded in the
//! [`PipelineReport`] and the next page is processed.
//!
//! # Idempotence
//!
//! A page whose output file already exists is skipped without any image
//! request. Downloads are staged under a `.part` name and only renamed into
//! place when complete, so an existing file always holds a finished download.
//!
//! # Example
//!
//! ```no_run
//! use mets_downloader_core::{HttpClient, Pipeline};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = Pipeline::new(HttpClient::new()?, "./scans");
//! let report = pipeline
//!     .run("https://digital.deutsches-museum.de/xml/metsmods/DMM_057003551532.xml")
//!     .await?;
//! println!(
//!     "downloaded {}, skipped {}, failed {}",
//!     report.downloaded(),
//!     report.skipped(),
//!     report.failed()
//! );
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::download::{DownloadError, HttpClient};
use crate::iiif::{ImageFormat, ResolveError, resolve_descriptor};
use crate::mets::{MetsError, extract_page_references};

/// Output directory used when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Errors that end a run before any page is processed.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The METS document could not be fetched.
    #[error("could not fetch METS document: {0}")]
    Document(#[source] DownloadError),

    /// The METS document could not be parsed.
    #[error("could not read METS document {url}: {source}")]
    Mets {
        /// The document URL.
        url: String,
        /// The underlying parse error.
        #[source]
        source: MetsError,
    },

    /// The output directory could not be created.
    #[error("could not create output directory {path}: {source}")]
    OutputDir {
        /// The directory path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Successful result of processing one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// The rendition was fetched and stored.
    Downloaded {
        /// Where the file was written.
        path: PathBuf,
        /// Bytes written.
        bytes: u64,
    },
    /// The output file already existed; nothing was fetched.
    Skipped {
        /// The existing file.
        path: PathBuf,
    },
}

/// Failure while processing one page.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// The descriptor could not be fetched or interpreted.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The image rendition could not be fetched.
    #[error("could not fetch {url} for {path}: {source}")]
    Image {
        /// The rendition URL.
        url: String,
        /// The intended output file.
        path: PathBuf,
        /// The underlying fetch error.
        #[source]
        source: DownloadError,
    },

    /// The image was fetched but could not be stored.
    #[error("could not write {path} from {url}: {source}")]
    Write {
        /// The rendition URL.
        url: String,
        /// The intended output file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: DownloadError,
    },
}

impl PageError {
    fn from_download(url: String, path: PathBuf, source: DownloadError) -> Self {
        if source.is_fetch_failure() {
            Self::Image { url, path, source }
        } else {
            Self::Write { url, path, source }
        }
    }

    /// Operator-facing line for failures of the image stage.
    ///
    /// Descriptor failures return `None`; they are reported through the log.
    #[must_use]
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            Self::Resolve(_) => None,
            Self::Image { url, .. } => Some(format!("Could not fetch {url}")),
            Self::Write { path, source, .. } => {
                Some(format!("Could not write {}: {source}", path.display()))
            }
        }
    }
}

/// A page that failed, with the reference it came from.
#[derive(Debug)]
pub struct PageFailure {
    /// The page reference from the METS document.
    pub reference: String,
    /// What went wrong.
    pub error: PageError,
}

/// Counts and failures of one run.
#[derive(Debug, Default)]
pub struct PipelineReport {
    references: usize,
    downloaded: usize,
    skipped: usize,
    failures: Vec<PageFailure>,
}

impl PipelineReport {
    /// Number of page references found in the document.
    #[must_use]
    pub fn references(&self) -> usize {
        self.references
    }

    /// Number of pages fetched and stored.
    #[must_use]
    pub fn downloaded(&self) -> usize {
        self.downloaded
    }

    /// Number of pages skipped because their file already existed.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of pages that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Failed pages, in document order.
    #[must_use]
    pub fn failures(&self) -> &[PageFailure] {
        &self.failures
    }

    /// Returns true when no page failed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, reference: &str, result: Result<PageOutcome, PageError>) {
        match result {
            Ok(PageOutcome::Downloaded { .. }) => self.downloaded += 1,
            Ok(PageOutcome::Skipped { .. }) => self.skipped += 1,
            Err(error) => self.failures.push(PageFailure {
                reference: reference.to_string(),
                error,
            }),
        }
    }
}

/// Sequential downloader for the pages of one METS document.
#[derive(Debug, Clone)]
pub struct Pipeline {
    client: HttpClient,
    output_dir: PathBuf,
    format: ImageFormat,
}

impl Pipeline {
    /// Creates a pipeline storing JPEG renditions in `output_dir`.
    #[must_use]
    pub fn new(client: HttpClient, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            output_dir: output_dir.into(),
            format: ImageFormat::default(),
        }
    }

    /// Directory the page files are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Format requested from the image server.
    #[must_use]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Runs the whole batch for the METS document at `mets_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] when the output directory cannot be created
    /// or the document cannot be fetched or parsed. Page failures are not
    /// errors; they are listed in the report.
    pub async fn run(&self, mets_url: &str) -> Result<PipelineReport, PipelineError> {
        self.run_with(mets_url, |_, _| {}).await
    }

    /// Like [`run`](Self::run), calling `on_page` after every page.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    #[instrument(skip(self, on_page), fields(output_dir = %self.output_dir.display()))]
    pub async fn run_with<F>(
        &self,
        mets_url: &str,
        on_page: F,
    ) -> Result<PipelineReport, PipelineError>
    where
        F: FnMut(&str, &Result<PageOutcome, PageError>),
    {
        let references = self.load_references(mets_url).await?;
        info!(references = references.len(), "loaded METS document");

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| PipelineError::OutputDir {
                path: self.output_dir.clone(),
                source,
            })?;

        Ok(self.process_references(&references, on_page).await)
    }

    /// Fetches the METS document and extracts its page references.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Document`] or [`PipelineError::Mets`].
    pub async fn load_references(&self, mets_url: &str) -> Result<Vec<String>, PipelineError> {
        let xml = self
            .client
            .fetch_text(mets_url)
            .await
            .map_err(PipelineError::Document)?;
        extract_page_references(&xml).map_err(|source| PipelineError::Mets {
            url: mets_url.to_string(),
            source,
        })
    }

    /// Processes `references` in order; no failure stops the loop.
    pub async fn process_references<F>(
        &self,
        references: &[String],
        mut on_page: F,
    ) -> PipelineReport
    where
        F: FnMut(&str, &Result<PageOutcome, PageError>),
    {
        let mut report = PipelineReport {
            references: references.len(),
            ..PipelineReport::default()
        };

        for (index, reference) in references.iter().enumerate() {
            debug!(page = index + 1, total = references.len(), %reference, "processing page");
            let result = self.process_reference(reference).await;
            if let Err(error) = &result {
                warn!(%reference, error = %error, "page failed, continuing");
            }
            on_page(reference, &result);
            report.record(reference, result);
        }

        info!(
            downloaded = report.downloaded(),
            skipped = report.skipped(),
            failed = report.failed(),
            "pages processed"
        );
        report
    }

    /// Resolves one page reference and stores its rendition unless present.
    ///
    /// # Errors
    ///
    /// Returns [`PageError`] describing the stage that failed.
    #[instrument(skip(self))]
    pub async fn process_reference(&self, reference: &str) -> Result<PageOutcome, PageError> {
        let descriptor = resolve_descriptor(&self.client, reference).await?;
        if self.format != ImageFormat::Tiff && descriptor.offers_extra(ImageFormat::Tiff) {
            debug!(id = %descriptor.id, "server also offers TIFF; keeping {}", self.format);
        }

        let filename = descriptor.output_filename(self.format)?;
        let path = self.output_dir.join(&filename);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            debug!(path = %path.display(), "already downloaded, skipping");
            return Ok(PageOutcome::Skipped { path });
        }

        let url = descriptor.image_url(self.format);
        match self.client.download_to_path(&url, &path).await {
            Ok(bytes) => Ok(PageOutcome::Downloaded { path, bytes }),
            Err(source) => Err(PageError::from_download(url, path, source)),
        }
    }
}
