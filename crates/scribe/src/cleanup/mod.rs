// ABOUTME: Configurable Markdown hygiene passes (headings, lists, emphasis, code fences, tables).
// ABOUTME: HTML comments are shielded behind placeholders so no rule can alter them.

//! Markdown cleanup.
//!
//! Two independent pipelines live here:
//!
//! - [`remove_noise`] strips platform chrome and is always part of HTML
//!   conversion;
//! - [`cleanup_markdown`] runs the toggleable hygiene rules described by
//!   [`CleanupOptions`], in a fixed order, over any Markdown text.
//!
//! The [`batch`] submodule applies `cleanup_markdown` to files on disk.
//!
//! Known limitations of the emphasis rule: `__x__` becomes `_*x*_` rather than
//! bold, and underscores inside link URLs are rewritten too, so
//! `[link](https://x.com/a_b_c)` becomes `[link](https://x.com/a*b*c)`.

pub mod batch;
pub mod noise;

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

pub use noise::remove_noise;

/// Toggles for the hygiene rules of [`cleanup_markdown`].
///
/// Every rule is enabled by default. Deserialization is sparse: keys missing
/// from a config file keep their default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CleanupOptions {
    pub remove_multiple_newlines: bool,
    pub fix_heading_spacing: bool,
    pub fix_list_spacing: bool,
    pub remove_trailing_spaces: bool,
    pub fix_empty_links: bool,
    pub standardize_emphasis: bool,
    pub fix_code_blocks: bool,
    pub fix_table_formatting: bool,
    pub preserve_html_comments: bool,
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self {
            remove_multiple_newlines: true,
            fix_heading_spacing: true,
            fix_list_spacing: true,
            remove_trailing_spaces: true,
            fix_empty_links: true,
            standardize_emphasis: true,
            fix_code_blocks: true,
            fix_table_formatting: true,
            preserve_html_comments: true,
        }
    }
}

impl CleanupOptions {
    /// Options with every rule turned off.
    pub fn none() -> Self {
        Self {
            remove_multiple_newlines: false,
            fix_heading_spacing: false,
            fix_list_spacing: false,
            remove_trailing_spaces: false,
            fix_empty_links: false,
            standardize_emphasis: false,
            fix_code_blocks: false,
            fix_table_formatting: false,
            preserve_html_comments: false,
        }
    }

    /// Enable or disable a single rule.
    pub fn set(&mut self, rule: CleanupRule, enabled: bool) {
        *self.flag_mut(rule) = enabled;
    }

    /// Builder-style variant of [`set`](Self::set).
    pub fn with(mut self, rule: CleanupRule, enabled: bool) -> Self {
        self.set(rule, enabled);
        self
    }

    /// Returns true if the rule is enabled.
    pub fn is_enabled(&self, rule: CleanupRule) -> bool {
        match rule {
            CleanupRule::RemoveMultipleNewlines => self.remove_multiple_newlines,
            CleanupRule::FixHeadingSpacing => self.fix_heading_spacing,
            CleanupRule::FixListSpacing => self.fix_list_spacing,
            CleanupRule::RemoveTrailingSpaces => self.remove_trailing_spaces,
            CleanupRule::FixEmptyLinks => self.fix_empty_links,
            CleanupRule::StandardizeEmphasis => self.standardize_emphasis,
            CleanupRule::FixCodeBlocks => self.fix_code_blocks,
            CleanupRule::FixTableFormatting => self.fix_table_formatting,
            CleanupRule::PreserveHtmlComments => self.preserve_html_comments,
        }
    }

    fn flag_mut(&mut self, rule: CleanupRule) -> &mut bool {
        match rule {
            CleanupRule::RemoveMultipleNewlines => &mut self.remove_multiple_newlines,
            CleanupRule::FixHeadingSpacing => &mut self.fix_heading_spacing,
            CleanupRule::FixListSpacing => &mut self.fix_list_spacing,
            CleanupRule::RemoveTrailingSpaces => &mut self.remove_trailing_spaces,
            CleanupRule::FixEmptyLinks => &mut self.fix_empty_links,
            CleanupRule::StandardizeEmphasis => &mut self.standardize_emphasis,
            CleanupRule::FixCodeBlocks => &mut self.fix_code_blocks,
            CleanupRule::FixTableFormatting => &mut self.fix_table_formatting,
            CleanupRule::PreserveHtmlComments => &mut self.preserve_html_comments,
        }
    }
}

/// Names of the individual cleanup rules, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CleanupRule {
    PreserveHtmlComments,
    RemoveMultipleNewlines,
    FixHeadingSpacing,
    FixListSpacing,
    RemoveTrailingSpaces,
    FixEmptyLinks,
    StandardizeEmphasis,
    FixCodeBlocks,
    FixTableFormatting,
}

impl CleanupRule {
    pub const ALL: [CleanupRule; 9] = [
        CleanupRule::PreserveHtmlComments,
        CleanupRule::RemoveMultipleNewlines,
        CleanupRule::FixHeadingSpacing,
        CleanupRule::FixListSpacing,
        CleanupRule::RemoveTrailingSpaces,
        CleanupRule::FixEmptyLinks,
        CleanupRule::StandardizeEmphasis,
        CleanupRule::FixCodeBlocks,
        CleanupRule::FixTableFormatting,
    ];

    /// Kebab-case name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            CleanupRule::PreserveHtmlComments => "preserve-html-comments",
            CleanupRule::RemoveMultipleNewlines => "remove-multiple-newlines",
            CleanupRule::FixHeadingSpacing => "fix-heading-spacing",
            CleanupRule::FixListSpacing => "fix-list-spacing",
            CleanupRule::RemoveTrailingSpaces => "remove-trailing-spaces",
            CleanupRule::FixEmptyLinks => "fix-empty-links",
            CleanupRule::StandardizeEmphasis => "standardize-emphasis",
            CleanupRule::FixCodeBlocks => "fix-code-blocks",
            CleanupRule::FixTableFormatting => "fix-table-formatting",
        }
    }
}

impl fmt::Display for CleanupRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CleanupRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        CleanupRule::ALL
            .into_iter()
            .find(|rule| rule.name() == wanted)
            .ok_or_else(|| {
                let known = CleanupRule::ALL.map(CleanupRule::name).join(", ");
                format!("unknown cleanup rule '{}' (expected one of: {})", s, known)
            })
    }
}

static HTML_COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static MULTIPLE_NEWLINES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
// The text class excludes `#` so a spaced `## x` cannot backtrack into `# # x`.
static HEADING_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(#+)([^#\s])").unwrap());
static HEADING_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#+\s.+").unwrap());
static LIST_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(-|\*|\d+\.)[ \t]+").unwrap());
// `$` only matches before `\n`, so a CRLF line keeps its `\r`.
static TRAILING_SPACES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)[ \t]+(\r?)$").unwrap());
static EMPTY_LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\](\(.*?\))").unwrap());
static UNDERSCORE_EMPHASIS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"_([^_]+)_").unwrap());
static CODE_FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```([a-zA-Z]*)\n(.*?)```").unwrap());
static COMMENT_PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<!--SCRIBECOMMENT(\d+)-->").unwrap());
static TABLE_CELL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\|([^|]*)\|").unwrap());

/// Placeholder for the n-th shielded comment. Contains nothing any rule matches.
fn comment_placeholder(index: usize) -> String {
    format!("<!--SCRIBECOMMENT{}-->", index)
}

/// Apply the enabled hygiene rules to `content`.
///
/// Rules run in the order of [`CleanupRule::ALL`]; shielded HTML comments are
/// restored last and the whole result is trimmed. Same input and options
/// always give the same output.
pub fn cleanup_markdown(content: &str, options: &CleanupOptions) -> String {
    let mut comments: Vec<String> = Vec::new();
    let mut cleaned = if options.preserve_html_comments {
        HTML_COMMENT_RE
            .replace_all(content, |caps: &Captures| {
                comments.push(caps[0].to_string());
                comment_placeholder(comments.len() - 1)
            })
            .into_owned()
    } else {
        content.to_string()
    };

    if options.remove_multiple_newlines {
        cleaned = MULTIPLE_NEWLINES_RE.replace_all(&cleaned, "\n\n").into_owned();
    }

    if options.fix_heading_spacing {
        cleaned = HEADING_MARKER_RE.replace_all(&cleaned, "$1 $2").into_owned();
        cleaned = blank_line_after_headings(&cleaned);
    }

    if options.fix_list_spacing {
        cleaned = LIST_MARKER_RE.replace_all(&cleaned, "$1 ").into_owned();
    }

    if options.remove_trailing_spaces {
        cleaned = TRAILING_SPACES_RE.replace_all(&cleaned, "${1}").into_owned();
    }

    if options.fix_empty_links {
        cleaned = EMPTY_LINK_RE.replace_all(&cleaned, "[Link]$1").into_owned();
    }

    if options.standardize_emphasis {
        cleaned = UNDERSCORE_EMPHASIS_RE.replace_all(&cleaned, "*$1*").into_owned();
    }

    if options.fix_code_blocks {
        cleaned = CODE_FENCE_RE
            .replace_all(&cleaned, |caps: &Captures| {
                format!("```{}\n{}\n```", caps[1].to_lowercase(), caps[2].trim())
            })
            .into_owned();
    }

    if options.fix_table_formatting {
        cleaned = TABLE_CELL_RE
            .replace_all(&cleaned, |caps: &Captures| format!("|{}|", caps[1].trim()))
            .into_owned();
    }

    if !comments.is_empty() {
        cleaned = restore_comments(&cleaned, &comments);
    }

    cleaned.trim().to_string()
}

/// Put shielded comments back in a single pass, so placeholder text inside a
/// restored comment is never substituted again.
fn restore_comments(text: &str, comments: &[String]) -> String {
    COMMENT_PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| comments.get(index))
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Insert a blank line after a heading line directly followed by text.
fn blank_line_after_headings(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out = String::with_capacity(text.len() + 16);
    for (i, line) in lines.iter().enumerate() {
        out.push_str(line);
        if let Some(next) = lines.get(i + 1) {
            out.push('\n');
            if !next.is_empty() && HEADING_LINE_RE.is_match(line) {
                out.push('\n');
            }
        }
    }
    out
}
