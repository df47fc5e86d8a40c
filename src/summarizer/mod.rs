//! Heuristic extractive summarization
//!
//! Pages are grouped into chunks so every part of the document gets a chance
//! to contribute key points, then the chunk winners are ranked globally. The
//! narrative summary comes from the lead chunks only.

pub mod scorer;
pub mod segmenter;

use std::collections::HashSet;

pub use scorer::{ScoreBreakdown, SentenceScorer};
pub use segmenter::{dedup_key, SentenceSegmenter};

use crate::config::{AppConfig, SummarizerConfig};
use crate::types::{ConfigError, Sentence, SummaryResult};

const CHUNK_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone)]
pub struct Summarizer {
    config: SummarizerConfig,
    segmenter: SentenceSegmenter,
    scorer: SentenceScorer,
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new(SummarizerConfig::default(), SentenceScorer::default())
    }
}

impl Summarizer {
    /// Zero caps are raised to 1 so chunking can never stall.
    pub fn new(mut config: SummarizerConfig, scorer: SentenceScorer) -> Self {
        config.chunk_size = config.chunk_size.max(1);
        config.per_chunk_top = config.per_chunk_top.max(1);
        config.key_point_cap = config.key_point_cap.max(1);
        config.summary_sentences = config.summary_sentences.max(1);
        config.lead_chunks = config.lead_chunks.max(1);
        Self {
            segmenter: SentenceSegmenter::new(config.min_sentence_chars),
            config,
            scorer,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(
            config.summarizer.clone(),
            SentenceScorer::from_config(&config.scoring)?,
        ))
    }

    pub fn scorer(&self) -> &SentenceScorer {
        &self.scorer
    }

    /// Summarize cleaned page texts. An empty page list yields an empty result.
    pub fn run<S: AsRef<str>>(&self, pages: &[S]) -> SummaryResult {
        if pages.is_empty() {
            return SummaryResult::default();
        }

        let chunks: Vec<String> = pages
            .chunks(self.config.chunk_size)
            .map(|group| join_pages(group))
            .collect();

        // Chunk-local winners, pooled in chunk order
        let pool: Vec<Sentence> = chunks
            .iter()
            .flat_map(|chunk| self.pick_top_sentences(chunk, self.config.per_chunk_top))
            .collect();

        // Second pass over the pool: re-score and rank globally
        let mut ranked: Vec<Sentence> = dedup_sentences(pool)
            .into_iter()
            .map(|s| Sentence {
                score: self.scorer.score(&s.text),
                ..s
            })
            .collect();
        sort_by_score(&mut ranked);
        ranked.truncate(self.config.key_point_cap);

        let lead = chunks[..chunks.len().min(self.config.lead_chunks)].join(CHUNK_SEPARATOR);
        let summary = self
            .pick_top_sentences(&lead, self.config.summary_sentences)
            .into_iter()
            .map(|s| s.text)
            .collect::<Vec<_>>()
            .join(" ");

        log::debug!(
            "summarized {} pages in {} chunks: {} key points",
            pages.len(),
            chunks.len(),
            ranked.len()
        );

        SummaryResult {
            summary,
            key_points: ranked.into_iter().map(|s| s.text).collect(),
        }
    }

    /// Segment, dedup, score and keep the best `max` sentences of `text`.
    /// Ties keep their original order.
    pub fn pick_top_sentences(&self, text: &str, max: usize) -> Vec<Sentence> {
        let candidates = self
            .segmenter
            .segment(text)
            .into_iter()
            .map(|text| Sentence {
                key: dedup_key(&text),
                score: 0.0,
                text,
            })
            .collect();

        let mut scored: Vec<Sentence> = dedup_sentences(candidates)
            .into_iter()
            .map(|s| Sentence {
                score: self.scorer.score(&s.text),
                ..s
            })
            .collect();
        sort_by_score(&mut scored);
        scored.truncate(max);
        scored
    }
}

fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(|p| p.as_ref())
        .collect::<Vec<_>>()
        .join(CHUNK_SEPARATOR)
}

/// Keep the first sentence for each normalized key; drop empty keys.
pub fn dedup_sentences(sentences: Vec<Sentence>) -> Vec<Sentence> {
    let mut seen = HashSet::new();
    sentences
        .into_iter()
        .filter(|s| !s.key.is_empty() && seen.insert(s.key.clone()))
        .collect()
}

// Stable: equal scores keep their relative order
fn sort_by_score(sentences: &mut [Sentence]) {
    sentences.sort_by(|a, b| b.score.total_cmp(&a.score));
}
