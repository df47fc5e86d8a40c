// Page extractor - tiered fallback over extraction backends
//
// Tier order: native text layer, then layout analysis. Optical recognition is
// never a tier of its own; it only salvages individual native pages that came
// back (nearly) empty.

use once_cell::unsync::OnceCell;
use std::path::Path;
use std::time::Instant;

use super::backend::{ensure_available, ExtractionBackend};
use super::layout::LayoutBackend;
use super::native::NativeTextBackend;
use super::normalize::clean_page;
use super::optical::OpticalBackend;
use crate::config::{ExtractionConfig, OCR_MIN_CHARS};
use crate::types::{BackendError, Document, ExtractionError, Page};

pub struct PageExtractor {
    native: Option<Box<dyn ExtractionBackend>>,
    layout: Option<Box<dyn ExtractionBackend>>,
    optical: Option<Box<dyn ExtractionBackend>>,
    ocr_min_chars: usize,
}

impl PageExtractor {
    /// Build the stock backends for every tier the config enables.
    /// Availability is probed lazily at extraction time.
    pub fn new(config: &ExtractionConfig) -> Self {
        let native: Option<Box<dyn ExtractionBackend>> =
            config.native.then(|| Box::new(NativeTextBackend::new()) as _);
        let layout: Option<Box<dyn ExtractionBackend>> = config
            .layout
            .then(|| Box::new(LayoutBackend::new(config.pdftotext_bin.clone())) as _);
        let optical: Option<Box<dyn ExtractionBackend>> = config
            .optical
            .then(|| Box::new(OpticalBackend::from_config(config)) as _);

        Self {
            native,
            layout,
            optical,
            ocr_min_chars: config.ocr_min_chars,
        }
    }

    /// Build from explicit backends. `None` means the strategy is not linked in.
    pub fn with_backends(
        native: Option<Box<dyn ExtractionBackend>>,
        layout: Option<Box<dyn ExtractionBackend>>,
        optical: Option<Box<dyn ExtractionBackend>>,
    ) -> Self {
        Self {
            native,
            layout,
            optical,
            ocr_min_chars: OCR_MIN_CHARS,
        }
    }

    /// Extract one cleaned text string per page.
    ///
    /// Fails only with `NotFound` (bad path) or `ExtractionFailed` (no tier
    /// produced any page). Backend errors are recovered by falling through.
    pub fn extract(&self, path: &Path) -> Result<Document, ExtractionError> {
        if !path.is_file() {
            return Err(ExtractionError::NotFound(path.to_path_buf()));
        }
        let start = Instant::now();

        if let Some(native) = self.native.as_deref().filter(|b| usable(*b)) {
            match self.extract_native(native, path) {
                Ok(pages) if !pages.is_empty() => {
                    return Ok(finish(path, native.name(), pages, start));
                }
                Ok(_) => log::warn!("{} backend found no pages in {}", native.name(), path.display()),
                Err(e) => log::warn!(
                    "{} extraction failed for {}: {}; falling back",
                    native.name(),
                    path.display(),
                    e
                ),
            }
        }

        if let Some(layout) = self.layout.as_deref().filter(|b| usable(*b)) {
            match layout.extract_document(path) {
                Ok(raw) if !raw.is_empty() => {
                    let pages = raw.iter().map(|r| clean_page(r)).collect();
                    return Ok(finish(path, layout.name(), pages, start));
                }
                Ok(_) => log::warn!("{} backend found no pages in {}", layout.name(), path.display()),
                Err(e) => log::warn!("{} extraction failed for {}: {}", layout.name(), path.display(), e),
            }
        }

        Err(ExtractionError::ExtractionFailed { path: path.to_path_buf() })
    }

    fn extract_native(&self, native: &dyn ExtractionBackend, path: &Path) -> Result<Vec<String>, BackendError> {
        let raw_pages = native.extract_document(path)?;

        // OCR tools are only probed once a page actually needs salvage
        let ocr_ready = OnceCell::new();
        let pages = raw_pages
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                let raw = match self.optical.as_deref() {
                    Some(ocr)
                        if raw.trim().chars().count() < self.ocr_min_chars
                            && *ocr_ready.get_or_init(|| usable(ocr)) =>
                    {
                        salvage(ocr, path, index, &raw)
                    }
                    _ => raw,
                };
                clean_page(&raw)
            })
            .collect();
        Ok(pages)
    }
}

fn usable(backend: &dyn ExtractionBackend) -> bool {
    match ensure_available(backend) {
        Ok(()) => true,
        Err(e) => {
            log::info!("{}, skipping", e);
            false
        }
    }
}

/// Best-effort OCR of one page. Recognized text is appended after whatever the
/// native layer returned; any failure leaves the native text as it was.
fn salvage(ocr: &dyn ExtractionBackend, path: &Path, index: usize, native_raw: &str) -> String {
    log::debug!("page {} has too little text, trying {}", index + 1, ocr.name());
    match ocr.extract_page(path, index) {
        Ok(recognized) => {
            let recognized = recognized.trim();
            let mut raw = native_raw.trim().to_string();
            if !recognized.is_empty() {
                raw.push('\n');
                raw.push_str(recognized);
            }
            raw
        }
        Err(e) => {
            log::debug!("{} salvage failed on page {}: {}", ocr.name(), index + 1, e);
            native_raw.to_string()
        }
    }
}

fn finish(path: &Path, backend: &'static str, texts: Vec<String>, start: Instant) -> Document {
    log::info!(
        "extracted {} pages from {} with {} backend in {:?}",
        texts.len(),
        path.display(),
        backend,
        start.elapsed()
    );
    Document {
        source: path.to_path_buf(),
        pages: texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| Page::new(index, text))
            .collect(),
        backend,
    }
}
