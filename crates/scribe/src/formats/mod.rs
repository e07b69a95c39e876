// ABOUTME: Output format helpers shared by the converter and the Markdown cleaner.
// ABOUTME: Hosts line-level whitespace normalization and blank-line collapsing.

//! Markdown output formatting.
//!
//! The HTML-to-Markdown converter lives in [`markdown`]; this module keeps the
//! small text-normalization helpers that both the converter and the cleanup
//! passes build on.

pub mod markdown;

use once_cell::sync::Lazy;
use regex::Regex;

pub use markdown::html_to_markdown;

static HORIZONTAL_WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());
static BLANK_LINES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Normalize the inner text of a block element.
///
/// Trims every line, collapses runs of spaces and tabs to a single space and
/// trims the result. Newlines between lines are kept.
pub fn normalize_whitespace(text: &str) -> String {
    let trimmed_lines = text.split('\n').map(str::trim).collect::<Vec<_>>().join("\n");
    HORIZONTAL_WS_RE
        .replace_all(&trimmed_lines, " ")
        .trim()
        .to_string()
}

/// Collapse three or more consecutive newlines to exactly two.
pub fn collapse_blank_lines_to_two(text: &str) -> String {
    BLANK_LINES_RE.replace_all(text, "\n\n").into_owned()
}
