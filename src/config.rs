// Configuration for docsum: tiers, heuristic caps, scoring tables
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::types::ConfigError;

// Header/footer inspection window
pub const HEADER_FOOTER_MAX_LINES: usize = 4;

// Summarizer defaults
pub const CHUNK_SIZE: usize = 3;
pub const PER_CHUNK_TOP: usize = 7;
pub const KEY_POINT_CAP: usize = 12;
pub const SUMMARY_SENTENCES: usize = 8;
pub const LEAD_CHUNKS: usize = 3;
pub const MIN_SENTENCE_CHARS: usize = 30;

// Extraction defaults
pub const OCR_DPI: u32 = 200;
pub const OCR_MIN_CHARS: usize = 20;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub extraction: ExtractionConfig,
    pub summarizer: SummarizerConfig,
    pub scoring: ScoringConfig,
}

/// Which extraction tiers are enabled and how to reach their tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub native: bool,
    pub layout: bool,
    pub optical: bool,
    pub ocr_dpi: u32,
    /// Pages whose trimmed native text is shorter than this get OCR salvage
    pub ocr_min_chars: usize,
    pub ocr_language: String,
    pub pdftotext_bin: String,
    pub pdftoppm_bin: String,
    pub tesseract_bin: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            native: true,
            layout: true,
            optical: true,
            ocr_dpi: OCR_DPI,
            ocr_min_chars: OCR_MIN_CHARS,
            ocr_language: "eng".to_string(),
            pdftotext_bin: "pdftotext".to_string(),
            pdftoppm_bin: "pdftoppm".to_string(),
            tesseract_bin: "tesseract".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    pub chunk_size: usize,
    pub per_chunk_top: usize,
    pub key_point_cap: usize,
    pub summary_sentences: usize,
    pub lead_chunks: usize,
    pub min_sentence_chars: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
            per_chunk_top: PER_CHUNK_TOP,
            key_point_cap: KEY_POINT_CAP,
            summary_sentences: SUMMARY_SENTENCES,
            lead_chunks: LEAD_CHUNKS,
            min_sentence_chars: MIN_SENTENCE_CHARS,
        }
    }
}

/// A named keyword pattern. Matching is case-insensitive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopicPattern {
    pub name: String,
    pub pattern: String,
}

impl TopicPattern {
    pub fn new(name: &str, pattern: &str) -> Self {
        Self {
            name: name.to_string(),
            pattern: pattern.to_string(),
        }
    }
}

/// Pattern tables and weights for the sentence scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub ideal_words_min: usize,
    pub ideal_words_max: usize,
    pub ideal_length_bonus: f64,
    pub min_words_for_partial: usize,
    pub partial_length_bonus: f64,

    pub numeric_pattern: String,
    pub numeric_weight: f64,
    pub numeric_cap: f64,

    pub topics: Vec<TopicPattern>,
    pub topic_weight: f64,

    pub domain_signal_pattern: String,
    pub domain_signal_weight: f64,

    pub boilerplate_pattern: String,
    pub boilerplate_penalty: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            ideal_words_min: 12,
            ideal_words_max: 40,
            ideal_length_bonus: 1.0,
            min_words_for_partial: 8,
            partial_length_bonus: 0.5,

            numeric_pattern: r"\b\d[\d,.]*\b".to_string(),
            numeric_weight: 0.3,
            numeric_cap: 3.0,

            topics: vec![
                TopicPattern::new(
                    "financials",
                    "revenue|ebit|ebitda|pat|profit|loss|income|balance sheet|cash flow|financial highlight",
                ),
                TopicPattern::new("risks", "risk|outlook|challenge|headwind|uncertaint"),
                TopicPattern::new(
                    "strategy",
                    "strategy|strategic|priority|roadmap|growth|investment|innovation|market|product|segment",
                ),
            ],
            topic_weight: 0.7,

            domain_signal_pattern: concat!(
                r"yoy|year[- ]over[- ]year|qoq|quarter[- ]over[- ]quarter|guidance|margin|dividend",
                r"|order book|backlog|capex|capital expenditure|opex|operating expenditure|free cash"
            )
            .to_string(),
            domain_signal_weight: 0.6,

            boilerplate_pattern: "forward-looking|statutory|notes to accounts|auditor|secretarial"
                .to_string(),
            boilerplate_penalty: 0.8,
        }
    }
}

impl AppConfig {
    /// Load from an optional TOML file, then apply `DOCSUM_*` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_toml_str(&std::fs::read_to_string(p)?)?,
            None => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    fn apply_env(&mut self) {
        let ex = &mut self.extraction;
        if let Ok(bin) = env::var("DOCSUM_PDFTOTEXT") {
            ex.pdftotext_bin = bin;
        }
        if let Ok(bin) = env::var("DOCSUM_PDFTOPPM") {
            ex.pdftoppm_bin = bin;
        }
        if let Ok(bin) = env::var("DOCSUM_TESSERACT") {
            ex.tesseract_bin = bin;
        }
        if let Ok(lang) = env::var("DOCSUM_OCR_LANG") {
            ex.ocr_language = lang;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.summarizer;
        let caps = [
            ("chunk_size", s.chunk_size),
            ("per_chunk_top", s.per_chunk_top),
            ("key_point_cap", s.key_point_cap),
            ("summary_sentences", s.summary_sentences),
            ("lead_chunks", s.lead_chunks),
        ];
        for (name, value) in caps {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("summarizer.{name} must be > 0")));
            }
        }
        if self.extraction.ocr_dpi == 0 {
            return Err(ConfigError::Invalid("extraction.ocr_dpi must be > 0".to_string()));
        }
        Ok(())
    }
}
