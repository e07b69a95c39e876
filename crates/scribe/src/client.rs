// ABOUTME: The main Client struct for scribe that fetches, extracts and saves articles.
// ABOUTME: Provides parse_html() for local pages, async parse() for URLs and fetch_article() to save.

use std::path::Path;

use tracing::{debug, info};

use crate::cleanup::cleanup_markdown;
use crate::error::ScribeError;
use crate::options::{ClientBuilder, Options};
use crate::readers::{builtin_registry, ReaderRegistry};
use crate::resource::{fetch, validate_url, FetchOptions};
use crate::result::{Article, SavedArticle};
use crate::storage::save_article;

/// Article client: holds the HTTP client, reader registry and options.
#[derive(Debug, Clone)]
pub struct Client {
    opts: Options,
    http_client: reqwest::Client,
    registry: ReaderRegistry,
}

impl Client {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new Client with the given options.
    pub fn new(opts: Options) -> Result<Self, ScribeError> {
        let http_client = match opts.http_client.clone() {
            Some(client) => client,
            None => reqwest::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .map_err(|e| {
                    ScribeError::fetch(
                        "",
                        "BuildClient",
                        Some(anyhow::anyhow!("failed to build HTTP client: {}", e)),
                    )
                })?,
        };

        let registry = opts.registry.clone().unwrap_or_else(builtin_registry);

        Ok(Self {
            opts,
            http_client,
            registry,
        })
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    pub fn output_dir(&self) -> &Path {
        &self.opts.output_dir
    }

    /// Extract an article from HTML already in hand.
    ///
    /// `url` is the page's address; it selects the reader and becomes the
    /// `source` field. Nothing is fetched or written.
    pub fn parse_html(&self, html: &str, url: &str) -> Result<Article, ScribeError> {
        let parsed = validate_url(url, "ParseHtml")?;
        let reader = self.registry.require(&parsed)?;
        debug!(reader = reader.name(), url, "selected reader");

        let mut article = reader.extract(html, &parsed)?;
        if let Some(ref cleanup) = self.opts.cleanup {
            article.content = cleanup_markdown(&article.content, cleanup);
        }
        Ok(article)
    }

    /// Fetch the page at `url` and extract its article.
    pub async fn parse(&self, url: &str) -> Result<Article, ScribeError> {
        let parsed = validate_url(url, "Parse")?;
        // Fail before any network traffic when no reader applies.
        self.registry.require(&parsed)?;

        let fetch_opts = FetchOptions {
            headers: self.opts.headers.clone(),
            cookie: self.opts.cookie.clone(),
        };
        let fetched = fetch(&self.http_client, url, &fetch_opts).await?;
        self.parse_html(&fetched.text(), url)
    }

    /// Fetch, extract and save the article at `url` into the output directory.
    pub async fn fetch_article(&self, url: &str) -> Result<SavedArticle, ScribeError> {
        let article = self.parse(url).await?;
        let saved = save_article(&self.opts.output_dir, &article).await?;
        info!(title = %saved.metadata.title, path = %saved.file_path, "article saved");
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleanup::CleanupOptions;
    use crate::readers::MediumReader;
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const PAGE: &str = r#"<html><body><article><h1>Local Post</h1><p>Some _text_ here</p></article></body></html>"#;

    fn local_registry() -> ReaderRegistry {
        let mut registry = ReaderRegistry::new();
        registry.register(MediumReader::new().with_domain("127.0.0.1"));
        registry
    }

    #[test]
    fn parse_html_uses_matching_reader() {
        let client = Client::builder().build().unwrap();
        let article = client
            .parse_html(PAGE, "https://medium.com/p/local")
            .unwrap();
        assert_eq!(article.metadata.title, "Local Post");
        assert_eq!(article.content, "# Local Post\n\nSome _text_ here");
    }

    #[test]
    fn parse_html_applies_cleanup_when_configured() {
        let client = Client::builder()
            .cleanup(CleanupOptions::default())
            .build()
            .unwrap();
        let article = client
            .parse_html(PAGE, "https://medium.com/p/local")
            .unwrap();
        assert_eq!(article.content, "# Local Post\n\nSome *text* here");
    }

    #[test]
    fn cleanup_keeps_deep_heading_levels() {
        let page = "<article><h1>Top</h1><h2>Sub</h2><p>a _b_</p><h3>Deep</h3><p>c</p></article>";
        let client = Client::builder()
            .cleanup(CleanupOptions::default())
            .build()
            .unwrap();
        let article = client.parse_html(page, "https://medium.com/p/deep").unwrap();
        assert_eq!(article.content, "# Top\n\n## Sub\n\na *b*\n\n### Deep\n\nc");
    }

    #[test]
    fn parse_html_rejects_unsupported_and_invalid_urls() {
        let client = Client::builder().build().unwrap();
        let err = client.parse_html(PAGE, "https://example.com/a").unwrap_err();
        assert!(err.is_unsupported());
        let err = client.parse_html(PAGE, "nope").unwrap_err();
        assert!(err.is_invalid_url());
    }

    #[tokio::test]
    async fn fetch_article_saves_document() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/p/local").header("cookie", "sid=abc");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body(PAGE);
        });

        let dir = tempdir().unwrap();
        let client = Client::builder()
            .registry(local_registry())
            .cookie("sid=abc")
            .output_dir(dir.path())
            .build()
            .unwrap();

        let saved = client.fetch_article(&server.url("/p/local")).await.unwrap();
        mock.assert();

        assert_eq!(saved.file_name, "local-post.md");
        let body = std::fs::read_to_string(&saved.file_path).unwrap();
        assert!(body.starts_with("---\ntitle: Local Post\nauthor: Unknown\nsource: http://127.0.0.1:"));
        assert!(body.ends_with("---\n\n# Local Post\n\nSome _text_ here"));
    }

    #[tokio::test]
    async fn fetch_article_propagates_http_errors() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/p/gone");
            then.status(500);
        });

        let dir = tempdir().unwrap();
        let client = Client::builder()
            .registry(local_registry())
            .output_dir(dir.path())
            .build()
            .unwrap();

        let err = client.fetch_article(&server.url("/p/gone")).await.unwrap_err();
        mock.assert();
        assert!(err.is_fetch());
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[tokio::test]
    async fn parse_skips_network_for_unsupported_urls() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/p/x");
            then.status(200).body(PAGE);
        });

        let client = Client::builder().build().unwrap();
        let err = client.parse(&server.url("/p/x")).await.unwrap_err();
        assert!(err.is_unsupported());
        assert_eq!(mock.calls(), 0);
    }
}
