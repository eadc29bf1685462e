//! Test doubles: an in-memory backend for exercising the extractor without
//! a PDF decoder, and a generator for small real PDF files.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::backend::{BackendError, PdfBackend, PdfDocument};

/// What a [`MockDocument`] returns for one page.
#[derive(Clone, Debug)]
pub enum MockPage {
    /// The page yields this text.
    Text(String),
    /// Reading the page fails with an extraction error.
    Error(String),
}

impl MockPage {
    pub fn text(s: impl Into<String>) -> Self {
        MockPage::Text(s.into())
    }

    pub fn error(msg: impl Into<String>) -> Self {
        MockPage::Error(msg.into())
    }
}

/// A hand-rolled fake implementing [`PdfBackend`].
///
/// Every `open` hands out a fresh [`MockDocument`] over the same pages,
/// or fails with `OpenError` if built with [`failing_open`](MockBackend::failing_open).
/// Opens and page reads are counted across all documents.
pub struct MockBackend {
    pages: Vec<MockPage>,
    open_error: Option<String>,
    open_count: AtomicUsize,
    pages_read: Arc<AtomicUsize>,
}

impl MockBackend {
    pub fn with_pages(pages: Vec<MockPage>) -> Self {
        Self {
            pages,
            open_error: None,
            open_count: AtomicUsize::new(0),
            pages_read: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing_open(msg: impl Into<String>) -> Self {
        Self {
            open_error: Some(msg.into()),
            ..Self::with_pages(Vec::new())
        }
    }

    /// How many times `open()` has been called.
    pub fn open_count(&self) -> usize {
        self.open_count.load(Ordering::SeqCst)
    }

    /// How many `page_text()` calls have been made.
    pub fn pages_read(&self) -> usize {
        self.pages_read.load(Ordering::SeqCst)
    }
}

impl PdfBackend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn open(&self, _path: &Path) -> Result<Box<dyn PdfDocument>, BackendError> {
        self.open_count.fetch_add(1, Ordering::SeqCst);
        if let Some(msg) = &self.open_error {
            return Err(BackendError::OpenError(msg.clone()));
        }
        Ok(Box::new(MockDocument {
            pages: self.pages.clone(),
            pages_read: Arc::clone(&self.pages_read),
        }))
    }
}

pub struct MockDocument {
    pages: Vec<MockPage>,
    pages_read: Arc<AtomicUsize>,
}

impl PdfDocument for MockDocument {
    fn page_count(&self) -> Result<usize, BackendError> {
        Ok(self.pages.len())
    }

    fn page_text(&self, index: usize) -> Result<String, BackendError> {
        self.pages_read.fetch_add(1, Ordering::SeqCst);
        match self.pages.get(index) {
            Some(MockPage::Text(text)) => Ok(text.clone()),
            Some(MockPage::Error(msg)) => Err(BackendError::ExtractionError(msg.clone())),
            None => Err(BackendError::ExtractionError(format!(
                "page {index} out of range"
            ))),
        }
    }
}

/// Build a minimal, well-formed PDF with one page per entry in `pages`.
///
/// Each page sets its lines in Helvetica, one `Tj` per line. Text is
/// expected to be ASCII. An empty string produces a page with an empty content stream.
pub fn pdf_bytes(pages: &[&str]) -> Vec<u8> {
    let mut objects: Vec<String> = Vec::new();

    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", 4 + 2 * i))
        .collect();
    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        pages.len()
    ));
    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());

    for (i, text) in pages.iter().enumerate() {
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents {} 0 R \
             /Resources << /Font << /F1 3 0 R >> >> >>",
            5 + 2 * i
        ));
        let content = content_stream(text);
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ));
    }

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
    }

    let xref_offset = out.len();
    out.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
    out.push_str("0000000000 65535 f \n");
    for offset in offsets {
        out.push_str(&format!("{offset:010} 00000 n \n"));
    }
    out.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    ));
    out.into_bytes()
}

fn content_stream(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let shown: Vec<String> = text
        .lines()
        .map(|line| {
            let escaped = line
                .replace('\\', "\\\\")
                .replace('(', "\\(")
                .replace(')', "\\)");
            format!("({escaped}) Tj")
        })
        .collect();
    format!("BT /F1 12 Tf 14 TL 72 720 Td {} ET", shown.join(" T* "))
}
