use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
}

/// Trait for PDF decoding backends.
///
/// A backend only knows how to open a file as a document; page iteration
/// and text concatenation live in [`crate::Extractor`].
pub trait PdfBackend: Send + Sync {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Open and decode the file at `path`.
    fn open(&self, path: &Path) -> Result<Box<dyn PdfDocument>, BackendError>;
}

/// A decoded document, owned by a single extraction call.
pub trait PdfDocument {
    fn page_count(&self) -> Result<usize, BackendError>;

    /// Plain text of the page at `index` (0-based). Pages with no
    /// extractable text return an empty string, not an error.
    fn page_text(&self, index: usize) -> Result<String, BackendError>;
}
