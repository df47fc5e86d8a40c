// Optical recognition: render with pdftoppm, clean up with `image`, read with tesseract
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;
use tempfile::TempDir;

use super::backend::{tool_available, tool_error, ExtractionBackend};
use super::native::get_page_count;
use crate::config::{ExtractionConfig, OCR_DPI};
use crate::types::BackendError;

#[derive(Debug, Clone)]
pub struct OpticalBackend {
    pdftoppm_bin: String,
    tesseract_bin: String,
    dpi: u32,
    language: String,
}

impl Default for OpticalBackend {
    fn default() -> Self {
        Self {
            pdftoppm_bin: "pdftoppm".to_string(),
            tesseract_bin: "tesseract".to_string(),
            dpi: OCR_DPI,
            language: "eng".to_string(),
        }
    }
}

impl OpticalBackend {
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            pdftoppm_bin: config.pdftoppm_bin.clone(),
            tesseract_bin: config.tesseract_bin.clone(),
            dpi: config.ocr_dpi,
            language: config.ocr_language.clone(),
        }
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Rasterize pages into `dir` as PNG. `page` is 1-based; `None` renders all.
    /// Returns the images sorted by page (pdftoppm zero-pads the suffix).
    fn render(&self, path: &Path, page: Option<usize>, dir: &Path) -> Result<Vec<PathBuf>, BackendError> {
        let prefix = dir.join("page");
        let mut cmd = Command::new(&self.pdftoppm_bin);
        let dpi = self.dpi.to_string();
        cmd.arg("-png").args(["-r", dpi.as_str()]);
        if let Some(page) = page {
            let page = page.to_string();
            cmd.args(["-f", page.as_str(), "-l", page.as_str()]);
        }
        let output = cmd.arg(path).arg(&prefix).output()?;

        if !output.status.success() {
            return Err(tool_error("pdftoppm", &output.stderr));
        }

        let mut images: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("png"))
            .collect();
        images.sort();
        Ok(images)
    }

    /// Grayscale the rendered page and run tesseract on it.
    fn recognize(&self, image_path: &Path) -> Result<String, BackendError> {
        let gray_path = image_path.with_extension("gray.png");
        image::open(image_path)?.grayscale().save(&gray_path)?;

        let output = Command::new(&self.tesseract_bin)
            .arg(&gray_path)
            .arg("stdout")
            .args(["-l", self.language.as_str()])
            .output()?;

        if !output.status.success() {
            return Err(tool_error("tesseract", &output.stderr));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl ExtractionBackend for OpticalBackend {
    fn name(&self) -> &'static str {
        "optical"
    }

    fn is_available(&self) -> bool {
        tool_available(&self.pdftoppm_bin, "-v") && tool_available(&self.tesseract_bin, "--version")
    }

    fn page_count(&self, path: &Path) -> Result<usize, BackendError> {
        get_page_count(path)
    }

    fn extract_page(&self, path: &Path, page_index: usize) -> Result<String, BackendError> {
        let start = Instant::now();
        let temp_dir = TempDir::new()?;
        let images = self.render(path, Some(page_index + 1), temp_dir.path())?;
        let image = images.first().ok_or_else(|| BackendError::Tool {
            tool: "pdftoppm".to_string(),
            message: format!("no image rendered for page {}", page_index + 1),
        })?;

        let text = self.recognize(image)?;
        log::debug!(
            "OCR page {} at {} DPI: {} chars in {:?}",
            page_index + 1,
            self.dpi,
            text.len(),
            start.elapsed()
        );
        Ok(text)
    }

    fn extract_document(&self, path: &Path) -> Result<Vec<String>, BackendError> {
        let temp_dir = TempDir::new()?;
        let images = self.render(path, None, temp_dir.path())?;
        images.iter().map(|image| self.recognize(image)).collect()
    }
}
