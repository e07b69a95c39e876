// ABOUTME: Reader for Medium posts and Medium-hosted publications.
// ABOUTME: Strips page chrome with dom_query, reads title/author/date and converts the article body.

use dom_query::Document;
use tracing::debug;
use url::Url;

use super::ArticleReader;
use crate::error::ScribeError;
use crate::formats::html_to_markdown;
use crate::result::{timestamp, Article, ArticleMetadata};

/// Page chrome removed before anything is read.
const REMOVE_SELECTORS: &[&str] = &[
    "script",
    "noscript",
    "style",
    ".metabar",
    ".postMetaInline",
    ".js-postShareWidget",
    ".progressiveMedia",
    ".graf-spacer",
    "pre[data-selectable-paragraph]",
    "span[data-selectable-paragraph]",
];

const AUTHOR_SELECTOR: &str = r#"a[rel="noopener follow"]"#;
const CONTENT_SELECTORS: &[&str] = &["article", ".section-content"];

const DEFAULT_TITLE: &str = "Untitled";
const DEFAULT_AUTHOR: &str = "Unknown";

#[derive(Debug, Clone)]
pub struct MediumReader {
    domains: Vec<String>,
}

impl MediumReader {
    pub fn new() -> Self {
        Self {
            domains: vec!["medium.com".to_string()],
        }
    }

    /// Also handle a custom publication domain (and its subdomains).
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domains.push(domain.into().trim().to_lowercase());
        self
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }
}

impl Default for MediumReader {
    fn default() -> Self {
        Self::new()
    }
}

fn first_text(doc: &Document, selector: &str) -> Option<String> {
    let text = doc.select(selector).first().text().trim().to_string();
    (!text.is_empty()).then_some(text)
}

impl ArticleReader for MediumReader {
    fn name(&self) -> &str {
        "medium"
    }

    fn can_handle(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        let host = host.to_lowercase();
        self.domains
            .iter()
            .any(|d| host == *d || host.ends_with(&format!(".{}", d)))
    }

    fn extract(&self, html: &str, source: &Url) -> Result<Article, ScribeError> {
        let doc = Document::from(html);
        for selector in REMOVE_SELECTORS {
            doc.select(selector).remove();
        }

        let title = first_text(&doc, "h1").unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let author = first_text(&doc, AUTHOR_SELECTOR).unwrap_or_else(|| DEFAULT_AUTHOR.to_string());
        let publish_date = doc
            .select("time")
            .first()
            .attr("datetime")
            .map(|d| d.to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(timestamp);
        debug!(%title, %author, %publish_date, "extracted metadata");

        let root = CONTENT_SELECTORS
            .iter()
            .map(|selector| doc.select(selector).first())
            .find(|sel| sel.exists())
            .ok_or_else(|| {
                ScribeError::extract(
                    source.as_str(),
                    "Extract",
                    Some(anyhow::anyhow!("could not extract article content")),
                )
            })?;

        let content = html_to_markdown(&root.inner_html());
        debug!(chars = content.len(), "converted article body");

        Ok(Article {
            metadata: ArticleMetadata {
                title,
                author,
                source: source.to_string(),
                publish_date,
                date_saved: timestamp(),
            },
            content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r#"<html><head><title>t</title><script>var x = 1;</script></head><body>
        <div class="metabar">Open in app</div>
        <article>
          <h1>My Post</h1>
          <a rel="noopener follow" href="/@ada">Ada Lovelace</a>
          <time datetime="2024-01-02T03:04:05.678Z">Jan 2</time>
          <div class="js-postShareWidget">Share</div>
          <p>Hello <b>world</b></p>
        </article>
        </body></html>"#;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn handles_medium_and_subdomains() {
        let reader = MediumReader::new();
        assert!(reader.can_handle(&url("https://medium.com/p/1")));
        assert!(reader.can_handle(&url("https://blog.Medium.com/p/1")));
        assert!(!reader.can_handle(&url("https://notmedium.com/p/1")));
        assert!(!reader.can_handle(&url("https://example.com/p/1")));
    }

    #[test]
    fn extra_domains_are_handled() {
        let reader = MediumReader::new().with_domain("betterprogramming.pub");
        assert!(reader.can_handle(&url("https://betterprogramming.pub/some-post")));
        assert_eq!(reader.domains().len(), 2);
    }

    #[test]
    fn extracts_metadata_and_body() {
        let source = url("https://medium.com/p/1");
        let article = MediumReader::new().extract(PAGE, &source).unwrap();

        assert_eq!(article.metadata.title, "My Post");
        assert_eq!(article.metadata.author, "Ada Lovelace");
        assert_eq!(article.metadata.publish_date, "2024-01-02T03:04:05.678Z");
        assert_eq!(article.metadata.source, "https://medium.com/p/1");
        assert!(article.content.contains("# My Post"), "{}", article.content);
        assert!(article.content.contains("Hello **world**"), "{}", article.content);
        assert!(!article.content.contains("Share"), "{}", article.content);
        assert!(!article.content.contains("var x"), "{}", article.content);
    }

    #[test]
    fn falls_back_to_section_content_and_defaults() {
        let html = r#"<div class="section-content"><p>Body text</p></div>"#;
        let article = MediumReader::new()
            .extract(html, &url("https://medium.com/p/2"))
            .unwrap();

        assert_eq!(article.metadata.title, "Untitled");
        assert_eq!(article.metadata.author, "Unknown");
        assert!(article.metadata.publish_date.ends_with('Z'));
        assert_eq!(article.content, "Body text");
    }

    #[test]
    fn missing_content_root_is_extract_error() {
        let err = MediumReader::new()
            .extract("<div><p>nothing</p></div>", &url("https://medium.com/p/3"))
            .unwrap_err();
        assert!(err.is_extract());
        assert!(err.to_string().contains("could not extract article content"));
    }
}
