// ABOUTME: Article, ArticleMetadata and SavedArticle types produced by readers and storage.
// ABOUTME: Renders the front-matter header and the full saved document.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Metadata written to the front-matter header, in header order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleMetadata {
    pub title: String,
    pub author: String,
    pub source: String,
    pub publish_date: String,
    pub date_saved: String,
}

impl ArticleMetadata {
    /// Render the `---` delimited header, one `key: value` line per field.
    ///
    /// Values are written raw; no YAML quoting or escaping is applied.
    pub fn to_front_matter(&self) -> String {
        let lines = [
            ("title", &self.title),
            ("author", &self.author),
            ("source", &self.source),
            ("publishDate", &self.publish_date),
            ("dateSaved", &self.date_saved),
        ]
        .iter()
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect::<Vec<_>>()
        .join("\n");
        format!("---\n{}\n---", lines)
    }
}

/// An extracted article: metadata plus Markdown body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub metadata: ArticleMetadata,
    pub content: String,
}

impl Article {
    /// The document as saved to disk: front matter, a blank line, then the body.
    pub fn format_document(&self) -> String {
        format!("{}\n\n{}", self.metadata.to_front_matter(), self.content)
    }
}

/// Where an article was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedArticle {
    pub file_name: String,
    pub file_path: String,
    pub metadata: ArticleMetadata,
}

/// Current time as ISO-8601 UTC with millisecond precision.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Article {
        Article {
            metadata: ArticleMetadata {
                title: "Hello: World".to_string(),
                author: "Ada".to_string(),
                source: "https://medium.com/p/1".to_string(),
                publish_date: "2024-01-02T03:04:05.678Z".to_string(),
                date_saved: "2024-02-03T04:05:06.789Z".to_string(),
            },
            content: "# Hello\n\nBody".to_string(),
        }
    }

    #[test]
    fn front_matter_is_exact() {
        assert_eq!(
            sample().metadata.to_front_matter(),
            "---\ntitle: Hello: World\nauthor: Ada\nsource: https://medium.com/p/1\npublishDate: 2024-01-02T03:04:05.678Z\ndateSaved: 2024-02-03T04:05:06.789Z\n---"
        );
    }

    #[test]
    fn document_has_blank_line_after_header() {
        let doc = sample().format_document();
        assert!(doc.starts_with("---\ntitle: "));
        assert!(doc.ends_with("---\n\n# Hello\n\nBody"));
    }

    #[test]
    fn timestamp_has_millis_and_z() {
        let ts = timestamp();
        assert!(ts.ends_with('Z'), "{}", ts);
        assert_eq!(ts.len(), "2024-01-02T03:04:05.678Z".len());
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn metadata_serializes_camel_case() {
        let json = serde_json::to_value(&sample().metadata).unwrap();
        assert_eq!(json["publishDate"], "2024-01-02T03:04:05.678Z");
        assert_eq!(json["dateSaved"], "2024-02-03T04:05:06.789Z");
    }
}
