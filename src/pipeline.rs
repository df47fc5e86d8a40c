// Pipeline: PageExtractor -> Summarizer -> PipelineOutput
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::pdf_extraction::PageExtractor;
use crate::summarizer::Summarizer;
use crate::types::{Result, SummaryResult};

/// Everything a result consumer needs to render or store a run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub document_id: String,
    pub source: PathBuf,
    pub page_count: usize,
    pub backend: &'static str,
    #[serde(flatten)]
    pub result: SummaryResult,
}

/// Holds no per-run state, so one instance can serve many documents at once.
pub struct Pipeline {
    extractor: PageExtractor,
    summarizer: Summarizer,
}

impl Pipeline {
    pub fn new(extractor: PageExtractor, summarizer: Summarizer) -> Self {
        Self {
            extractor,
            summarizer,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(
            PageExtractor::new(&config.extraction),
            Summarizer::from_config(config)?,
        ))
    }

    pub fn run(&self, path: &Path) -> Result<PipelineOutput> {
        let document = self.extractor.extract(path)?;
        let result = self.summarizer.run(&document.page_texts());
        if result.is_empty() {
            log::warn!("{}: no sentence long enough to summarize", document.id());
        }

        log::info!(
            "{}: {} pages -> {} key points",
            document.id(),
            document.page_count(),
            result.key_points.len()
        );

        Ok(PipelineOutput {
            document_id: document.id(),
            source: document.source.clone(),
            page_count: document.page_count(),
            backend: document.backend,
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConfigError, ExtractionError, PipelineError};

    #[test]
    fn test_missing_file_surfaces_not_found() {
        let pipeline = Pipeline::from_config(&AppConfig::default()).unwrap();
        let err = pipeline.run(Path::new("/definitely/missing/report.pdf")).unwrap_err();
        assert!(matches!(err, PipelineError::Extraction(ExtractionError::NotFound(_))));
    }

    #[test]
    fn test_invalid_config_is_rejected_up_front() {
        let mut config = AppConfig::default();
        config.summarizer.chunk_size = 0;
        assert!(matches!(
            Pipeline::from_config(&config),
            Err(PipelineError::Config(ConfigError::Invalid(_)))
        ));
    }

    #[test]
    fn test_output_serializes_flat() {
        let output = PipelineOutput {
            document_id: "acme".to_string(),
            source: PathBuf::from("acme.pdf"),
            page_count: 2,
            backend: "native",
            result: SummaryResult {
                summary: "s".to_string(),
                key_points: vec!["k".to_string()],
            },
        };
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["summary"], "s");
        assert_eq!(json["key_points"][0], "k");
        assert_eq!(json["backend"], "native");
    }
}
