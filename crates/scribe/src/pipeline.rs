// ABOUTME: Pipeline abstraction for processing batches of article URLs.
// ABOUTME: SequentialPipeline fetches and saves each URL in turn, one outcome per URL.

use tracing::warn;

use crate::client::Client;
use crate::error::ScribeError;
use crate::result::SavedArticle;

/// Outcome of processing one URL.
#[derive(Debug)]
pub struct PipelineResult {
    pub url: String,
    pub outcome: Result<SavedArticle, ScribeError>,
}

impl PipelineResult {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

#[allow(async_fn_in_trait)]
pub trait Pipeline {
    /// Process a single URL. Failures are reported in the result, never raised.
    async fn process(&self, url: &str) -> PipelineResult;

    /// Process every URL in order.
    async fn process_all<I, S>(&self, urls: I) -> Vec<PipelineResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut results = Vec::new();
        for url in urls {
            results.push(self.process(url.as_ref()).await);
        }
        results
    }
}

/// Runs URLs one after another through [`Client::fetch_article`].
#[derive(Debug, Clone)]
pub struct SequentialPipeline {
    client: Client,
}

impl SequentialPipeline {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl Pipeline for SequentialPipeline {
    async fn process(&self, url: &str) -> PipelineResult {
        let outcome = self.client.fetch_article(url).await;
        if let Err(ref e) = outcome {
            warn!(url, error = %e, "article failed");
        }
        PipelineResult {
            url: url.to_string(),
            outcome,
        }
    }
}
