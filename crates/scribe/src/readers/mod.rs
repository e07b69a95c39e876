// ABOUTME: ArticleReader trait and the ReaderRegistry that picks a reader for a URL.
// ABOUTME: builtin_registry() returns the registry holding the Medium reader.

//! Site readers.
//!
//! A reader knows which URLs it handles and how to turn a fetched page into
//! an [`Article`]. The registry is an ordered list; the first reader whose
//! [`ArticleReader::can_handle`] returns true wins.

pub mod medium;

use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::error::ScribeError;
use crate::result::Article;

pub use medium::MediumReader;

/// Extracts an article from the HTML of a page on a supported site.
pub trait ArticleReader: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Returns true if this reader understands pages at `url`.
    fn can_handle(&self, url: &Url) -> bool;

    /// Extract metadata and Markdown body from a full HTML page.
    fn extract(&self, html: &str, source: &Url) -> Result<Article, ScribeError>;
}

/// Ordered collection of readers.
#[derive(Clone, Default)]
pub struct ReaderRegistry {
    readers: Vec<Arc<dyn ArticleReader>>,
}

impl fmt::Debug for ReaderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.readers.iter().map(|r| r.name()))
            .finish()
    }
}

impl ReaderRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a reader; earlier readers take precedence.
    pub fn register(&mut self, reader: impl ArticleReader + 'static) {
        self.readers.push(Arc::new(reader));
    }

    /// First reader that handles `url`.
    pub fn find(&self, url: &Url) -> Option<Arc<dyn ArticleReader>> {
        self.readers.iter().find(|r| r.can_handle(url)).cloned()
    }

    /// Like [`find`](Self::find) but returns an Unsupported error when nothing matches.
    pub fn require(&self, url: &Url) -> Result<Arc<dyn ArticleReader>, ScribeError> {
        self.find(url).ok_or_else(|| {
            ScribeError::unsupported(
                url.as_str(),
                "FindReader",
                Some(anyhow::anyhow!("no reader handles {}", url.host_str().unwrap_or(""))),
            )
        })
    }

    pub fn len(&self) -> usize {
        self.readers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readers.is_empty()
    }
}

/// Registry with every built-in reader.
pub fn builtin_registry() -> ReaderRegistry {
    let mut registry = ReaderRegistry::new();
    registry.register(MediumReader::new());
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::ArticleMetadata;

    struct FixedReader {
        name: &'static str,
        host: &'static str,
    }

    impl ArticleReader for FixedReader {
        fn name(&self) -> &str {
            self.name
        }

        fn can_handle(&self, url: &Url) -> bool {
            url.host_str() == Some(self.host)
        }

        fn extract(&self, _html: &str, source: &Url) -> Result<Article, ScribeError> {
            Ok(Article {
                metadata: ArticleMetadata {
                    title: self.name.to_string(),
                    author: String::new(),
                    source: source.to_string(),
                    publish_date: String::new(),
                    date_saved: String::new(),
                },
                content: String::new(),
            })
        }
    }

    #[test]
    fn first_matching_reader_wins() {
        let mut registry = ReaderRegistry::new();
        registry.register(FixedReader { name: "first", host: "a.test" });
        registry.register(FixedReader { name: "second", host: "a.test" });
        registry.register(FixedReader { name: "other", host: "b.test" });

        let url = Url::parse("https://a.test/post").unwrap();
        assert_eq!(registry.find(&url).unwrap().name(), "first");
        let url = Url::parse("https://b.test/post").unwrap();
        assert_eq!(registry.find(&url).unwrap().name(), "other");
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn require_reports_unsupported() {
        let registry = ReaderRegistry::new();
        assert!(registry.is_empty());
        let url = Url::parse("https://example.com/").unwrap();
        let err = registry.require(&url).err().unwrap();
        assert!(err.is_unsupported());
    }

    #[test]
    fn builtin_registry_handles_medium() {
        let registry = builtin_registry();
        let url = Url::parse("https://medium.com/@someone/post-123").unwrap();
        assert_eq!(registry.find(&url).unwrap().name(), "medium");
        assert_eq!(format!("{:?}", registry), "[\"medium\"]");
    }
}
