// Extraction backend capability - one trait, three strategies
use std::path::Path;
use std::process::Command;

use crate::types::BackendError;

/// A strategy that turns a PDF page into raw, uncleaned text.
///
/// Implementations must not hold process-wide state: the same backend may be
/// called from several documents at once.
pub trait ExtractionBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// Runtime capability probe. Unavailable backends are skipped, not errors.
    fn is_available(&self) -> bool {
        true
    }

    fn page_count(&self, path: &Path) -> Result<usize, BackendError>;

    /// Raw text of one zero-based page.
    fn extract_page(&self, path: &Path, page_index: usize) -> Result<String, BackendError>;

    /// Raw text of every page in order. Backends that can read the whole file
    /// in one pass should override this.
    fn extract_document(&self, path: &Path) -> Result<Vec<String>, BackendError> {
        let count = self.page_count(path)?;
        (0..count).map(|i| self.extract_page(path, i)).collect()
    }
}

/// True when `bin` can be spawned at all. Exit status is ignored because poppler
/// tools print their version to stderr and exit non-zero on `-v` in older releases.
pub fn tool_available(bin: &str, version_flag: &str) -> bool {
    let found = Command::new(bin).arg(version_flag).output().is_ok();
    if !found {
        log::debug!("{} not found on PATH", bin);
    }
    found
}

/// `Unavailable` when the runtime probe fails.
pub fn ensure_available(backend: &dyn ExtractionBackend) -> Result<(), BackendError> {
    if backend.is_available() {
        Ok(())
    } else {
        Err(BackendError::Unavailable(backend.name()))
    }
}

/// Turn a failed subprocess into a `BackendError::Tool`.
pub(crate) fn tool_error(tool: &str, stderr: &[u8]) -> BackendError {
    BackendError::Tool {
        tool: tool.to_string(),
        message: String::from_utf8_lossy(stderr).trim().to_string(),
    }
}
