// Sentence segmentation on ASCII terminal punctuation
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::MIN_SENTENCE_CHARS;

// Terminal punctuation, whitespace, then something that can open a sentence.
// The whitespace is capture group 1 and is where the split happens.
static BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?](\s+)[A-Z0-9(]").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").unwrap());

/// Splits text into candidate sentences. Conservative: "e.g. the" and "3.5"
/// never split, irregular punctuation under-splits.
#[derive(Debug, Clone)]
pub struct SentenceSegmenter {
    min_chars: usize,
}

impl Default for SentenceSegmenter {
    fn default() -> Self {
        Self::new(MIN_SENTENCE_CHARS)
    }
}

impl SentenceSegmenter {
    pub fn new(min_chars: usize) -> Self {
        Self { min_chars }
    }

    pub fn segment(&self, text: &str) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut last = 0;
        for caps in BOUNDARY.captures_iter(text) {
            if let Some(gap) = caps.get(1) {
                pieces.push(&text[last..gap.start()]);
                last = gap.end();
            }
        }
        pieces.push(&text[last..]);

        pieces
            .into_iter()
            .map(collapse_whitespace)
            .filter(|s| s.chars().count() >= self.min_chars)
            .collect()
    }
}

pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Dedup key: lowercased, every run of non-word characters reduced to one space.
pub fn dedup_key(sentence: &str) -> String {
    NON_WORD
        .replace_all(&sentence.to_lowercase(), " ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_terminal_punctuation_before_capital() {
        let text = "Revenue increased sharply during the fiscal year. Operating costs were held flat across all regions! Will the trend continue into next year? (Management believes it will continue.)";
        let sentences = SentenceSegmenter::default().segment(text);
        assert_eq!(
            sentences,
            vec![
                "Revenue increased sharply during the fiscal year.",
                "Operating costs were held flat across all regions!",
                "Will the trend continue into next year?",
                "(Management believes it will continue.)",
            ]
        );
    }

    #[test]
    fn test_splits_before_digits() {
        let text = "The board approved a final payout for shareholders. 2023 was a record year for the whole group.";
        assert_eq!(SentenceSegmenter::default().segment(text).len(), 2);
    }

    #[test]
    fn test_no_split_on_decimals_or_lowercase_continuation() {
        let text = "Net margin reached 12.5 percent, i.e. the highest level recorded in the decade so far.";
        assert_eq!(SentenceSegmenter::default().segment(text), vec![text]);
    }

    #[test]
    fn test_drops_short_fragments_and_collapses_whitespace() {
        let text = "Too short. This sentence spans\n  several   lines of\ttext in the source.";
        assert_eq!(
            SentenceSegmenter::default().segment(text),
            vec!["This sentence spans several lines of text in the source."]
        );
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        assert!(SentenceSegmenter::default().segment("").is_empty());
        assert!(SentenceSegmenter::default().segment("   \n\n ").is_empty());
    }

    #[test]
    fn test_min_chars_is_configurable() {
        let seg = SentenceSegmenter::new(5);
        assert_eq!(seg.segment("Short one. Tiny two."), vec!["Short one.", "Tiny two."]);
    }

    #[test]
    fn test_dedup_key_normalization() {
        assert_eq!(dedup_key("  Revenue -- grew, 12%!  "), "revenue grew 12");
        assert_eq!(dedup_key("Revenue grew 12%."), dedup_key("REVENUE: grew (12%)"));
        assert_eq!(dedup_key("...!!!"), "");
    }
}
