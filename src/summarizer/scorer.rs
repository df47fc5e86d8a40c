// Heuristic sentence scorer driven by configurable pattern tables
use regex::{Regex, RegexBuilder};

use crate::config::ScoringConfig;
use crate::types::ConfigError;

/// Per-term contributions, so each weight can be checked on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub length: f64,
    pub numeric: f64,
    pub topical: f64,
    pub domain_signal: f64,
    /// Stored as a non-positive number
    pub boilerplate: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.length + self.numeric + self.topical + self.domain_signal + self.boilerplate
    }
}

#[derive(Debug, Clone)]
pub struct SentenceScorer {
    config: ScoringConfig,
    numeric: Regex,
    topics: Vec<(String, Regex)>,
    domain_signal: Regex,
    boilerplate: Regex,
}

impl Default for SentenceScorer {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default()).expect("built-in scoring patterns compile")
    }
}

fn compile(name: &str, pattern: &str) -> Result<Regex, ConfigError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| ConfigError::InvalidPattern {
            name: name.to_string(),
            source,
        })
}

impl SentenceScorer {
    pub fn from_config(config: &ScoringConfig) -> Result<Self, ConfigError> {
        let topics = config
            .topics
            .iter()
            .map(|t| Ok((t.name.clone(), compile(&t.name, &t.pattern)?)))
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Self {
            numeric: compile("numeric", &config.numeric_pattern)?,
            topics,
            domain_signal: compile("domain_signal", &config.domain_signal_pattern)?,
            boilerplate: compile("boilerplate", &config.boilerplate_pattern)?,
            config: config.clone(),
        })
    }

    pub fn score(&self, sentence: &str) -> f64 {
        self.breakdown(sentence).total()
    }

    pub fn breakdown(&self, sentence: &str) -> ScoreBreakdown {
        let c = &self.config;
        let words = sentence.split_whitespace().count();

        let length = if (c.ideal_words_min..=c.ideal_words_max).contains(&words) {
            c.ideal_length_bonus
        } else if words > c.min_words_for_partial {
            c.partial_length_bonus
        } else {
            0.0
        };

        let numerics = self.numeric.find_iter(sentence).count();
        let numeric = (c.numeric_weight * numerics as f64).min(c.numeric_cap);

        let topic_hits = self.topics.iter().filter(|(_, re)| re.is_match(sentence)).count();
        let topical = c.topic_weight * topic_hits as f64;

        let domain_signal = if self.domain_signal.is_match(sentence) {
            c.domain_signal_weight
        } else {
            0.0
        };

        let boilerplate = if self.boilerplate.is_match(sentence) {
            -c.boilerplate_penalty
        } else {
            0.0
        };

        ScoreBreakdown {
            length,
            numeric,
            topical,
            domain_signal,
            boilerplate,
        }
    }
}
