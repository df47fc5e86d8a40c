// Layout-based extraction using pdftotext -layout
//
// pdftotext walks poppler's text boxes and lines in reading order, which copes
// with content streams that trip up the native text layer. Pages come back
// separated by form feeds.

use std::path::Path;
use std::process::Command;

use super::backend::{tool_available, tool_error, ExtractionBackend};
use crate::types::BackendError;

const PAGE_BREAK: char = '\u{000C}';

#[derive(Debug, Clone)]
pub struct LayoutBackend {
    bin: String,
}

impl Default for LayoutBackend {
    fn default() -> Self {
        Self::new("pdftotext")
    }
}

impl LayoutBackend {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    /// Run pdftotext over an optional 1-based page range and return stdout.
    fn run(&self, path: &Path, page: Option<usize>) -> Result<String, BackendError> {
        let mut cmd = Command::new(&self.bin);
        if let Some(page) = page {
            let page = page.to_string();
            cmd.args(["-f", page.as_str(), "-l", page.as_str()]);
        }
        let output = cmd.arg("-layout").arg(path).arg("-").output()?;

        if !output.status.success() {
            return Err(tool_error("pdftotext", &output.stderr));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Split pdftotext output into pages. pdftotext ends every page, including the
/// last, with a form feed.
pub fn split_pages(raw: &str) -> Vec<String> {
    let mut pages: Vec<String> = raw.split(PAGE_BREAK).map(str::to_string).collect();
    if pages.last().is_some_and(|p| p.trim().is_empty()) {
        pages.pop();
    }
    pages
}

impl ExtractionBackend for LayoutBackend {
    fn name(&self) -> &'static str {
        "layout"
    }

    fn is_available(&self) -> bool {
        tool_available(&self.bin, "-v")
    }

    fn page_count(&self, path: &Path) -> Result<usize, BackendError> {
        Ok(split_pages(&self.run(path, None)?).len())
    }

    fn extract_page(&self, path: &Path, page_index: usize) -> Result<String, BackendError> {
        let raw = self.run(path, Some(page_index + 1))?;
        Ok(split_pages(&raw).into_iter().next().unwrap_or_default())
    }

    fn extract_document(&self, path: &Path) -> Result<Vec<String>, BackendError> {
        Ok(split_pages(&self.run(path, None)?))
    }
}
