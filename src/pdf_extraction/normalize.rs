// Page text cleanup: whitespace normalization and header/footer stripping
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::HEADER_FOOTER_MAX_LINES;

static LINE_ENDINGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\r").unwrap());
static TABS_NBSP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\t\u{00A0}]+").unwrap());
static BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

static PAGE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+\s*$").unwrap());
static BOILERPLATE_WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(page|annual report|confidential|draft)\b").unwrap());
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://").unwrap());

/// Unify line endings, squash tabs/NBSP runs to one space, cap blank runs at one
/// empty line, and trim the whole blob.
pub fn normalize_whitespace(raw: &str) -> String {
    let text = LINE_ENDINGS.replace_all(raw, "\n");
    let text = TABS_NBSP.replace_all(&text, " ");
    let text = BLANK_RUNS.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// True for lines that look like running headers or footers.
pub fn is_header_footer_line(line: &str) -> bool {
    line.trim().is_empty()
        || line.chars().count() <= 2
        || PAGE_NUMBER.is_match(line)
        || BOILERPLATE_WORDS.is_match(line)
        || URL.is_match(line)
}

/// Drop the top and/or bottom block of `HEADER_FOOTER_MAX_LINES` lines when every
/// line in that block is boilerplate. The two blocks are judged independently.
/// Pages of at most twice the block size are returned untouched.
pub fn strip_headers_footers(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() <= HEADER_FOOTER_MAX_LINES * 2 {
        return text.to_string();
    }

    let n = HEADER_FOOTER_MAX_LINES;
    let remove_top = lines[..n].iter().all(|l| is_header_footer_line(l));
    let remove_bottom = lines[lines.len() - n..].iter().all(|l| is_header_footer_line(l));

    let start = if remove_top { n } else { 0 };
    let end = if remove_bottom { lines.len() - n } else { lines.len() };

    lines[start..end].join("\n").trim().to_string()
}

/// Full per-page cleaning as applied by every extraction tier.
pub fn clean_page(raw: &str) -> String {
    strip_headers_footers(&normalize_whitespace(raw))
}
