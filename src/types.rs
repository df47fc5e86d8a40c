// Core types and error enums for docsum
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One page of cleaned text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Zero-based page index in the source document
    pub index: usize,
    pub text: String,
}

impl Page {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

/// An extracted document: ordered pages plus where they came from.
#[derive(Debug, Clone)]
pub struct Document {
    pub source: PathBuf,
    pub pages: Vec<Page>,
    /// Name of the backend tier that produced the pages
    pub backend: &'static str,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page texts in order, ready for the summarizer.
    pub fn page_texts(&self) -> Vec<String> {
        self.pages.iter().map(|p| p.text.clone()).collect()
    }

    /// File stem of the source, used as the report title and JSON `company` field.
    pub fn id(&self) -> String {
        document_id(&self.source)
    }
}

pub fn document_id(path: &std::path::Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

/// A scored sentence candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    pub text: String,
    pub score: f64,
    /// Lowercased, non-word runs collapsed to one space
    pub key: String,
}

/// Final output of a summarization run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub summary: String,
    pub key_points: Vec<String>,
}

impl SummaryResult {
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty() && self.key_points.is_empty()
    }
}

// Error types

/// Failure of a single backend. Never surfaces from `PageExtractor::extract`;
/// the extractor recovers from it by moving to the next tier.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("backend unavailable: {0}")]
    Unavailable(&'static str),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("{tool} failed: {message}")]
    Tool { tool: String, message: String },

    #[error("page {index} out of range ({count} pages)")]
    PageOutOfRange { index: usize, count: usize },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The two fatal outcomes of extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("no extraction strategy could read {}", .path.display())]
    ExtractionFailed { path: PathBuf },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid pattern for {name}: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_document_id_is_file_stem() {
        assert_eq!(document_id(Path::new("/tmp/reports/acme_2023.pdf")), "acme_2023");
        assert_eq!(document_id(Path::new("plain")), "plain");
    }

    #[test]
    fn test_summary_result_default_is_empty() {
        let result = SummaryResult::default();
        assert!(result.is_empty());
        assert_eq!(result.summary, "");
        assert!(result.key_points.is_empty());
    }

    #[test]
    fn test_not_found_message_names_path() {
        let err = ExtractionError::NotFound(PathBuf::from("missing.pdf"));
        assert!(err.to_string().contains("missing.pdf"));
    }
}
