// Native text layer extraction - Pure Rust via lopdf
use lopdf::Document;
use std::path::Path;

use super::backend::ExtractionBackend;
use crate::types::BackendError;

/// Load a PDF document using lopdf
pub fn load_pdf(path: &Path) -> Result<Document, BackendError> {
    Ok(Document::load(path)?)
}

/// Execute an operation with a PDF document
pub fn with_pdf<F, R>(path: &Path, f: F) -> Result<R, BackendError>
where
    F: FnOnce(&Document) -> Result<R, BackendError>,
{
    let document = load_pdf(path)?;
    f(&document)
}

/// Page count from the page tree.
pub fn get_page_count(path: &Path) -> Result<usize, BackendError> {
    with_pdf(path, |doc| Ok(doc.get_pages().len()))
}

/// Reads the embedded text layer. lopdf is linked in, so this backend is always
/// available; it fails per document on encrypted or structurally broken files.
#[derive(Debug, Default, Clone)]
pub struct NativeTextBackend;

impl NativeTextBackend {
    pub fn new() -> Self {
        Self
    }

    fn page_text(doc: &Document, page_number: u32) -> Result<String, BackendError> {
        Ok(doc.extract_text(&[page_number])?)
    }
}

impl ExtractionBackend for NativeTextBackend {
    fn name(&self) -> &'static str {
        "native"
    }

    fn page_count(&self, path: &Path) -> Result<usize, BackendError> {
        get_page_count(path)
    }

    fn extract_page(&self, path: &Path, page_index: usize) -> Result<String, BackendError> {
        with_pdf(path, |doc| {
            let count = doc.get_pages().len();
            if page_index >= count {
                return Err(BackendError::PageOutOfRange { index: page_index, count });
            }
            Self::page_text(doc, page_index as u32 + 1)
        })
    }

    // One load for the whole file instead of one per page
    fn extract_document(&self, path: &Path) -> Result<Vec<String>, BackendError> {
        with_pdf(path, |doc| {
            if doc.is_encrypted() {
                return Err(BackendError::Tool {
                    tool: "lopdf".to_string(),
                    message: "document is encrypted".to_string(),
                });
            }
            doc.get_pages()
                .keys()
                .map(|&page_number| Self::page_text(doc, page_number))
                .collect()
        })
    }
}
