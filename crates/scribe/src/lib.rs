// ABOUTME: Main library entry point for scribe, an article-to-Markdown reader.
// ABOUTME: Re-exports the converter, the cleaner, the Client and its supporting types.

//! scribe - fetch web articles, convert them to Markdown and save them with
//! a front-matter header.
//!
//! The core is two pure functions: [`html_to_markdown`] turns an article HTML
//! fragment into Markdown, and [`cleanup_markdown`] applies configurable
//! hygiene rules to any Markdown text. [`Client`] wraps them with fetching,
//! site readers and storage.
//!
//! # Example
//!
//! ```no_run
//! use scribe::{Client, ScribeError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ScribeError> {
//!     let client = Client::builder().output_dir("./articles").build()?;
//!     let saved = client.fetch_article("https://medium.com/p/some-post").await?;
//!     println!("{}", saved.file_path);
//!     Ok(())
//! }
//! ```

pub mod cleanup;
pub mod client;
pub mod error;
pub mod formats;
pub mod options;
pub mod pipeline;
pub mod readers;
pub mod resource;
pub mod result;
pub mod storage;

pub use crate::cleanup::batch::{clean_directory, clean_file, clean_path, BatchReport};
pub use crate::cleanup::{cleanup_markdown, remove_noise, CleanupOptions, CleanupRule};
pub use crate::client::Client;
pub use crate::error::{ErrorCode, ScribeError};
pub use crate::formats::html_to_markdown;
pub use crate::options::{ClientBuilder, Options};
pub use crate::pipeline::{Pipeline, PipelineResult, SequentialPipeline};
pub use crate::readers::{builtin_registry, ArticleReader, MediumReader, ReaderRegistry};
pub use crate::result::{Article, ArticleMetadata, SavedArticle};
pub use crate::storage::sanitize_filename;
