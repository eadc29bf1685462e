use std::fmt;
use std::path::Path;

use thiserror::Error;

use crate::backend::{BackendError, PdfBackend};

/// Prefix of the string returned in place of text when extraction fails.
pub const DIAGNOSTIC_PREFIX: &str = "Error reading PDF";

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Text of every page, each followed by a newline, in page order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    text: String,
    pages: usize,
}

impl ExtractedText {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Number of pages visited.
    pub fn page_count(&self) -> usize {
        self.pages
    }
}

impl fmt::Display for ExtractedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Drives a [`PdfBackend`] over one document.
pub struct Extractor<'a> {
    backend: &'a dyn PdfBackend,
}

impl<'a> Extractor<'a> {
    pub fn new(backend: &'a dyn PdfBackend) -> Self {
        Self { backend }
    }

    /// Open `path` and concatenate the text of all its pages.
    ///
    /// A failure on any page discards the pages already read.
    pub fn extract(&self, path: &Path) -> Result<ExtractedText, ExtractError> {
        tracing::debug!(backend = self.backend.name(), path = %path.display(), "opening document");
        let document = self.backend.open(path)?;
        let count = document.page_count()?;

        let mut text = String::new();
        for index in 0..count {
            let page_text = document.page_text(index)?;
            tracing::debug!(page = index, chars = page_text.chars().count(), "page extracted");
            text.push_str(&page_text);
            text.push('\n');
        }

        Ok(ExtractedText { text, pages: count })
    }

    /// Like [`extract`](Self::extract), but a failure is rendered as a
    /// diagnostic string instead of being returned as an error.
    pub fn extract_or_diagnostic(&self, path: &Path) -> String {
        match self.extract(path) {
            Ok(extracted) => extracted.into_string(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "extraction failed");
                diagnostic(&e)
            }
        }
    }
}

/// Format `err` as the string printed in place of extracted text.
pub fn diagnostic(err: &ExtractError) -> String {
    format!("{DIAGNOSTIC_PREFIX}: {err}")
}
