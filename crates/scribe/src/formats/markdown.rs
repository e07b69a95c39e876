// ABOUTME: HTML-to-Markdown converter built as an ordered chain of regex rewrites.
// ABOUTME: Structural tags first, then generic tag stripping, entity decoding and noise removal.

//! HTML fragment to Markdown conversion.
//!
//! The converter is a fixed pipeline of whole-string rewrites. Order matters:
//!
//! 1. whitespace between adjacent tags is dropped;
//! 2. `div`/`span` wrappers are unwrapped (`</div>` becomes a newline);
//! 3. headings, paragraphs, lists, emphasis, links, images and `<br>` are
//!    turned into their Markdown form;
//! 4. every tag still left is replaced by a space;
//! 5. a fixed set of entities is decoded;
//! 6. site noise is removed and blank lines are collapsed.
//!
//! Structural rewrites must run before the generic tag strip or their markers
//! would be lost, and entities are decoded afterwards so that a decoded `&lt;`
//! can never be mistaken for a tag.
//!
//! Known limitations, kept on purpose:
//! - ordered and unordered lists both become `-` bullets;
//! - emphasis content is carried through as-is, nested tags are not resolved
//!   by the emphasis rewrite itself;
//! - anchors without `href` lose their link and keep only their text;
//! - `<img>` is only recognised when `src` comes before `alt`.
//!
//! Tag patterns require the tag name to end at whitespace or `>`, so `<p>`
//! never matches `<pre>` and `<i>` never matches `<img>`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{collapse_blank_lines_to_two, normalize_whitespace};
use crate::cleanup::noise::remove_noise;

static INTER_TAG_WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r">\s+<").unwrap());

static DIV_OPEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<div(?:\s[^>]*)?>").unwrap());
static DIV_CLOSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</div\s*>").unwrap());
static SPAN_OPEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<span(?:\s[^>]*)?>").unwrap());
static SPAN_CLOSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</span\s*>").unwrap());

// Index 0 is <h1>.
static HEADING_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    (1..=6)
        .map(|level| {
            Regex::new(&format!(r"(?i)<h{level}(?:\s[^>]*)?>(.*?)</h{level}\s*>")).unwrap()
        })
        .collect()
});

static PARAGRAPH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<p(?:\s[^>]*)?>(.*?)</p\s*>").unwrap());

static UNORDERED_LIST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<ul(?:\s[^>]*)?>(.*?)</ul\s*>").unwrap());
static ORDERED_LIST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<ol(?:\s[^>]*)?>(.*?)</ol\s*>").unwrap());
static LIST_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<li(?:\s[^>]*)?>(.*?)</li\s*>").unwrap());

static STRONG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<b(?:\s[^>]*)?>(.*?)</b\s*>|<strong(?:\s[^>]*)?>(.*?)</strong\s*>").unwrap()
});
static EMPHASIS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<i(?:\s[^>]*)?>(.*?)</i\s*>|<em(?:\s[^>]*)?>(.*?)</em\s*>").unwrap()
});

static ANCHOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<a\s[^>]*href="([^"]*)"[^>]*>(.*?)</a\s*>"#).unwrap());

static IMAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<img\s[^>]*src="([^"]*)"[^>]*alt="([^"]*)"[^>]*>"#).unwrap()
});

static LINE_BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());

static ANY_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

static ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(?:nbsp|amp|lt|gt|quot|#39|mdash|ndash);").unwrap());

/// Convert an article HTML fragment to Markdown.
///
/// Never fails: unbalanced or unknown markup degrades to plain text. Returns
/// an empty string when the fragment has no text content.
pub fn html_to_markdown(html: &str) -> String {
    let markdown = INTER_TAG_WS_RE.replace_all(html, "><");
    let markdown = unwrap_wrappers(&markdown);
    let markdown = convert_headings(&markdown);
    let markdown = convert_paragraphs(&markdown);
    let markdown = convert_lists(&markdown);
    let markdown = convert_emphasis(&markdown);
    let markdown = convert_links(&markdown);
    let markdown = convert_images(&markdown);
    let markdown = LINE_BREAK_RE.replace_all(&markdown, "\n");
    let markdown = ANY_TAG_RE.replace_all(&markdown, " ");
    let markdown = decode_entities(&markdown);
    let markdown = remove_noise(&markdown);

    collapse_blank_lines_to_two(&markdown).trim().to_string()
}

/// Drop `div`/`span` tags; a closing `div` ends a block.
fn unwrap_wrappers(html: &str) -> String {
    let out = DIV_OPEN_RE.replace_all(html, "");
    let out = DIV_CLOSE_RE.replace_all(&out, "\n");
    let out = SPAN_OPEN_RE.replace_all(&out, "");
    SPAN_CLOSE_RE.replace_all(&out, "").into_owned()
}

fn convert_headings(html: &str) -> String {
    let mut out = html.to_string();
    for (idx, re) in HEADING_RES.iter().enumerate() {
        let hashes = "#".repeat(idx + 1);
        out = re
            .replace_all(&out, |caps: &Captures| {
                format!("\n\n{} {}\n\n", hashes, normalize_whitespace(&caps[1]))
            })
            .into_owned();
    }
    out
}

fn convert_paragraphs(html: &str) -> String {
    PARAGRAPH_RE
        .replace_all(html, |caps: &Captures| {
            format!("\n\n{}\n\n", normalize_whitespace(&caps[1]))
        })
        .into_owned()
}

/// Lists lose their type: every item becomes a `-` bullet.
fn convert_lists(html: &str) -> String {
    let out = UNORDERED_LIST_RE.replace_all(html, "\n${1}\n");
    let out = ORDERED_LIST_RE.replace_all(&out, "\n${1}\n");
    LIST_ITEM_RE
        .replace_all(&out, |caps: &Captures| {
            format!("- {}\n", normalize_whitespace(&caps[1]))
        })
        .into_owned()
}

/// Wrap bold and italic content in asterisks without touching the content.
fn convert_emphasis(html: &str) -> String {
    let out = STRONG_RE.replace_all(html, |caps: &Captures| {
        format!("**{}**", either_group(caps))
    });
    EMPHASIS_RE
        .replace_all(&out, |caps: &Captures| format!("*{}*", either_group(caps)))
        .into_owned()
}

/// Content of whichever alternative matched in a two-tag pattern.
fn either_group<'h>(caps: &Captures<'h>) -> &'h str {
    caps.get(1)
        .or_else(|| caps.get(2))
        .map_or("", |m| m.as_str())
}

fn convert_links(html: &str) -> String {
    ANCHOR_RE
        .replace_all(html, |caps: &Captures| {
            format!("[{}]({})", normalize_whitespace(&caps[2]), &caps[1])
        })
        .into_owned()
}

fn convert_images(html: &str) -> String {
    IMAGE_RE
        .replace_all(html, |caps: &Captures| {
            format!("\n\n![{}]({})\n\n", &caps[2], &caps[1])
        })
        .into_owned()
}

/// Decode the fixed entity set in a single pass.
///
/// Anything else, including numeric entities other than `&#39;`, is left as
/// literal text. A decoded `&amp;` is never decoded a second time.
pub fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            match &caps[0] {
                "&nbsp;" => " ",
                "&amp;" => "&",
                "&lt;" => "<",
                "&gt;" => ">",
                "&quot;" => "\"",
                "&#39;" => "'",
                "&mdash;" => "\u{2014}",
                "&ndash;" => "\u{2013}",
                other => other,
            }
            .to_string()
        })
        .into_owned()
}
