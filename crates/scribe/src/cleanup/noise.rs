// ABOUTME: Removal of recurring platform chrome (share widgets, banners, tracking links) from Markdown.
// ABOUTME: Also spaces out emoji glued to words and normalizes whitespace.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::formats::collapse_blank_lines_to_two;

/// Patterns removed unconditionally, applied in this order.
const NOISE_PATTERNS: &[&str] = &[
    // attribution lines
    r"Source\s*:\s*[^\n]+",
    // share / listen widgets
    r"Share\s+More",
    r"Listen\s+Share",
    // self-referential tracking links; link text may hold one level of brackets (linked images)
    r"\[(?:[^\[\]]|\[[^\[\]]*\])*\]\(https?://[^)]+source=post_page[^)]*\)",
    // empty links
    r"\[\s*\]\([^)]*\)",
    // bare @mentions
    r"\[@[^\]]+\]",
    // bylines
    r"(?s)Published in.*?·",
    r"Open in app",
    r"Member-only story",
    // reading time
    r"\d+ min read",
];

static NOISE_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    NOISE_PATTERNS
        .iter()
        .map(|pattern| Regex::new(pattern).unwrap())
        .collect()
});

// U+FE0F (emoji presentation selector) belongs to the glyph before it.
static GLUED_BEFORE_EMOJI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\S)([🚀🤖🧠💻📱📰🌱🖍📔🖌]\x{FE0F}?)").unwrap());
static GLUED_AFTER_EMOJI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([🚀🤖🧠💻📱📰🌱🖍📔🖌]\x{FE0F}?)([^\s\x{FE0F}])").unwrap());

static SPACE_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r" +").unwrap());

/// Strip site noise from Markdown and normalize its whitespace.
///
/// Empty links are deleted outright here, unlike
/// [`cleanup_markdown`](super::cleanup_markdown) which relabels them.
pub fn remove_noise(markdown: &str) -> String {
    let mut cleaned = markdown.to_string();
    for re in NOISE_RES.iter() {
        cleaned = re.replace_all(&cleaned, "").into_owned();
    }

    let cleaned = space_out_emoji(&cleaned);
    normalize_spacing(&cleaned)
}

/// Insert a space between a listed emoji and a non-space neighbour.
pub fn space_out_emoji(text: &str) -> String {
    let out = GLUED_BEFORE_EMOJI_RE.replace_all(text, "$1 $2");
    GLUED_AFTER_EMOJI_RE
        .replace_all(&out, "$1 $2")
        .into_owned()
}

fn normalize_spacing(text: &str) -> String {
    let single_spaced = SPACE_RUN_RE.replace_all(text, " ");
    let trimmed_lines = single_spaced
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n");
    collapse_blank_lines_to_two(&trimmed_lines).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn removes_banners_and_reading_time() {
        let input = "Member-only story\n\nOpen in app\n\nTitle\n\n12 min read\n\nBody";
        assert_eq!(remove_noise(input), "Title\n\nBody");
    }

    #[test]
    fn removes_source_attribution_line() {
        let input = "Intro\nSource : Some Agency, 2023\nNext";
        assert_eq!(remove_noise(input), "Intro\n\nNext");
    }

    #[test]
    fn removes_share_widgets() {
        assert_eq!(remove_noise("Listen  Share\nText\nShare\nMore"), "Text");
    }

    #[test]
    fn deletes_empty_links() {
        assert_eq!(remove_noise("see []() here"), "see here");
        assert_eq!(remove_noise("see [ ](https://x.com) here"), "see here");
    }

    #[test]
    fn removes_mentions() {
        assert_eq!(remove_noise("by [@alice](https://medium.com/@alice)"), "by (https://medium.com/@alice)");
    }

    #[test]
    fn removes_tracking_links_only() {
        let input = "[keep](https://example.com) and [drop](https://medium.com/p/1?source=post_page---) end";
        assert_eq!(remove_noise(input), "[keep](https://example.com) and end");
    }

    #[test]
    fn removes_tracking_link_around_image() {
        let input = "a [![cover](https://img/x.png)](https://medium.com/p?source=post_page) b";
        assert_eq!(remove_noise(input), "a b");
    }

    #[test]
    fn removes_published_in_byline() {
        let input = "Published in\nBetter Programming · Jan 3\nBody";
        assert_eq!(remove_noise(input), "Jan 3\nBody");
    }

    #[test]
    fn spaces_emoji_from_words() {
        assert_eq!(remove_noise("Launch🚀now"), "Launch 🚀 now");
        assert_eq!(remove_noise("🤖Robots"), "🤖 Robots");
        assert_eq!(remove_noise("AI🧠"), "AI 🧠");
    }

    #[test]
    fn keeps_variation_selector_attached() {
        assert_eq!(remove_noise("Draw🖍\u{FE0F}it"), "Draw 🖍\u{FE0F} it");
        assert_eq!(remove_noise("Draw 🖍\u{FE0F} it"), "Draw 🖍\u{FE0F} it");
    }

    #[test]
    fn adjacent_emoji_are_separated() {
        assert_eq!(remove_noise("x🚀🤖"), "x 🚀 🤖");
    }

    #[test]
    fn unlisted_emoji_are_left_alone() {
        assert_eq!(remove_noise("ok👍fine"), "ok👍fine");
    }

    #[test]
    fn normalizes_whitespace() {
        assert_eq!(remove_noise("  a   b  \n   \n\n\n\n  c  "), "a b\n\nc");
    }

    #[test]
    fn idempotent_on_article_text() {
        let input = "Member-only story\n# Title🚀\n\n\n\nSome  text [x](https://a.b)\n5 min read";
        let once = remove_noise(input);
        assert_eq!(remove_noise(&once), once);
    }
}
