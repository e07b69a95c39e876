// ABOUTME: Saving, listing and deleting article files in the output directory.
// ABOUTME: File names are derived from the article title by sanitize_filename.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::cleanup::batch::is_markdown_file;
use crate::error::ScribeError;
use crate::result::{Article, SavedArticle};

/// Longest file stem produced by [`sanitize_filename`].
pub const MAX_FILENAME_LEN: usize = 200;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static DISALLOWED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9-]").unwrap());
static DASH_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").unwrap());

/// Turn a title into a file stem made of `[a-z0-9-]`.
///
/// Returns `untitled` when nothing usable is left.
pub fn sanitize_filename(title: &str) -> String {
    let lower = title.to_lowercase();
    let dashed = WHITESPACE_RE.replace_all(&lower, "-");
    let kept = DISALLOWED_RE.replace_all(&dashed, "");
    let collapsed = DASH_RUN_RE.replace_all(&kept, "-");
    // Only ASCII remains, so byte truncation is safe.
    let mut stem: String = collapsed.trim_matches('-').to_string();
    stem.truncate(MAX_FILENAME_LEN);
    let stem = stem.trim_end_matches('-');

    if stem.is_empty() {
        "untitled".to_string()
    } else {
        stem.to_string()
    }
}

/// Create the output directory (and parents) if missing.
pub async fn ensure_output_dir(dir: &Path) -> Result<(), ScribeError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| ScribeError::io(dir.display().to_string(), "EnsureOutputDir", e))
}

/// Write `article` to `<dir>/<sanitized title>.md`, replacing any existing file.
pub async fn save_article(dir: &Path, article: &Article) -> Result<SavedArticle, ScribeError> {
    ensure_output_dir(dir).await?;

    let file_name = format!("{}.md", sanitize_filename(&article.metadata.title));
    let file_path = dir.join(&file_name);
    tokio::fs::write(&file_path, article.format_document())
        .await
        .map_err(|e| ScribeError::io(file_path.display().to_string(), "SaveArticle", e))?;
    info!(path = %file_path.display(), "saved article");

    Ok(SavedArticle {
        file_name,
        file_path: file_path.display().to_string(),
        metadata: article.metadata.clone(),
    })
}

/// Sorted names of the Markdown files directly inside `dir`.
pub async fn list_articles(dir: &Path) -> Result<Vec<String>, ScribeError> {
    let target = dir.display().to_string();
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| ScribeError::io(&target, "ListArticles", e))?;

    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ScribeError::io(&target, "ListArticles", e))?
    {
        let path = entry.path();
        if path.is_file() && is_markdown_file(&path) {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

pub async fn delete_article(path: &Path) -> Result<(), ScribeError> {
    tokio::fs::remove_file(path)
        .await
        .map_err(|e| ScribeError::io(path.display().to_string(), "DeleteArticle", e))?;
    info!(path = %path.display(), "deleted article");
    Ok(())
}
