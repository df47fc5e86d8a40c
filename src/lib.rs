//! docsum - local PDF summarizer
//!
//! Extracts page text through a native → layout fallback chain (with OCR
//! salvage for near-empty pages), then builds an extractive summary and ranked
//! key points with a deterministic heuristic scorer.

pub mod config;
pub mod pdf_extraction;
pub mod pipeline;
pub mod report;
pub mod summarizer;
pub mod types;

pub use config::AppConfig;
pub use pdf_extraction::{ExtractionBackend, PageExtractor};
pub use pipeline::{Pipeline, PipelineOutput};
pub use summarizer::Summarizer;
pub use types::{Document, ExtractionError, Page, PipelineError, SummaryResult};
