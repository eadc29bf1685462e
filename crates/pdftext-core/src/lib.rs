use std::path::Path;

pub mod backend;
pub mod config_file;
pub mod extractor;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use backend::{BackendError, PdfBackend, PdfDocument};
pub use extractor::{DIAGNOSTIC_PREFIX, ExtractError, ExtractedText, Extractor, diagnostic};

/// Extract the text of every page of the PDF at `path` using `backend`.
///
/// Each page's text is followed by a newline, in page order. Any backend
/// failure aborts the whole call.
pub fn extract(path: &Path, backend: &dyn PdfBackend) -> Result<ExtractedText, ExtractError> {
    Extractor::new(backend).extract(path)
}

/// Extract text, or return a diagnostic string describing why it failed.
pub fn extract_or_diagnostic(path: &Path, backend: &dyn PdfBackend) -> String {
    Extractor::new(backend).extract_or_diagnostic(path)
}
