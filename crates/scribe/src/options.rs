// ABOUTME: Configuration options for scribe including Options and the fluent ClientBuilder.
// ABOUTME: Defaults carry browser-like request headers and the ./articles output directory.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::cleanup::CleanupOptions;
use crate::client::Client;
use crate::error::ScribeError;
use crate::readers::ReaderRegistry;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
pub const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";
pub const DEFAULT_OUTPUT_DIR: &str = "./articles";

/// Configuration options for the scribe client.
#[derive(Debug, Clone)]
pub struct Options {
    pub timeout: Duration,
    pub user_agent: String,
    pub headers: HashMap<String, String>,
    /// Sent verbatim as the `Cookie` header when set.
    pub cookie: Option<String>,
    pub output_dir: PathBuf,
    /// When set, `cleanup_markdown` runs on every extracted body.
    pub cleanup: Option<CleanupOptions>,
    pub http_client: Option<reqwest::Client>,
    pub registry: Option<ReaderRegistry>,
}

impl Default for Options {
    fn default() -> Self {
        let mut headers = HashMap::new();
        headers.insert("Accept".to_string(), DEFAULT_ACCEPT.to_string());
        headers.insert(
            "Accept-Language".to_string(),
            DEFAULT_ACCEPT_LANGUAGE.to_string(),
        );
        Self {
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers,
            cookie: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            cleanup: None,
            http_client: None,
            registry: None,
        }
    }
}

/// Builder for constructing Client instances with custom configuration.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    opts: Options,
}

impl ClientBuilder {
    /// Create a new ClientBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Add a custom header to all requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Set the session cookie sent with every request.
    pub fn cookie(mut self, cookie: impl Into<String>) -> Self {
        self.opts.cookie = Some(cookie.into());
        self
    }

    /// Directory that saved articles are written to.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.opts.output_dir = dir.into();
        self
    }

    /// Run the Markdown cleaner over extracted articles.
    pub fn cleanup(mut self, options: CleanupOptions) -> Self {
        self.opts.cleanup = Some(options);
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Set a custom reader registry.
    pub fn registry(mut self, reg: ReaderRegistry) -> Self {
        self.opts.registry = Some(reg);
        self
    }

    /// Build the Client with the configured options.
    pub fn build(self) -> Result<Client, ScribeError> {
        Client::new(self.opts)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
