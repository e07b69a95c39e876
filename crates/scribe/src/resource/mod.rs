// ABOUTME: Resource handling module for fetching article pages over HTTP.
// ABOUTME: Applies request headers, rejects error statuses, limits body size and decodes charsets.

use std::collections::HashMap;

use bytes::Bytes;
use tracing::{debug, info};

use crate::error::ScribeError;

/// Maximum allowed content length (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

/// Options for fetching a resource.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub headers: HashMap<String, String>,
    pub cookie: Option<String>,
}

/// Result of a successful fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// Address after redirects.
    pub final_url: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchResult {
    /// Decode the body as text, using the charset from the content-type header or detection.
    pub fn text(&self) -> String {
        decode_body(&self.body, self.content_type.as_deref())
    }
}

/// Decode body bytes to a String using charset from content-type header or detection.
fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(ct) = content_type {
        if let Some(charset) = extract_charset(ct) {
            if let Some(encoding) = encoding_rs::Encoding::for_label(charset.as_bytes()) {
                let (decoded, _, _) = encoding.decode(body);
                return decoded.into_owned();
            }
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Extract charset value from Content-Type header.
fn extract_charset(content_type: &str) -> Option<String> {
    let lower = content_type.to_lowercase();
    for part in lower.split(';') {
        let trimmed = part.trim();
        if let Some(charset) = trimmed.strip_prefix("charset=") {
            let charset = charset.trim_matches('"').trim_matches('\'');
            return Some(charset.to_string());
        }
    }
    None
}

/// Parse and check that `url` is an absolute http(s) URL.
pub fn validate_url(url: &str, op: &str) -> Result<url::Url, ScribeError> {
    if url.is_empty() {
        return Err(ScribeError::invalid_url(url, op, None));
    }

    let parsed = url::Url::parse(url).map_err(|e| {
        ScribeError::invalid_url(url, op, Some(anyhow::anyhow!("invalid URL: {}", e)))
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ScribeError::invalid_url(
            url,
            op,
            Some(anyhow::anyhow!("scheme must be http or https")),
        ));
    }
    Ok(parsed)
}

/// Fetch a resource from the given URL.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
    opts: &FetchOptions,
) -> Result<FetchResult, ScribeError> {
    validate_url(url, "Fetch")?;
    info!(url, "fetching");

    let mut request = client.get(url);
    for (key, value) in &opts.headers {
        request = request.header(key, value);
    }
    if let Some(ref cookie) = opts.cookie {
        request = request.header(reqwest::header::COOKIE, cookie);
    }

    let response = request.send().await.map_err(|e| {
        ScribeError::fetch(url, "Fetch", Some(anyhow::anyhow!("request failed: {}", e)))
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScribeError::fetch(
            url,
            "Fetch",
            Some(anyhow::anyhow!("HTTP status {}", status.as_u16())),
        ));
    }

    // Check Content-Length header before reading body
    let content_length = response.content_length().or_else(|| {
        response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
    });

    if let Some(len) = content_length {
        if len as usize > MAX_CONTENT_LENGTH {
            return Err(ScribeError::fetch(
                url,
                "Fetch",
                Some(anyhow::anyhow!("content too large")),
            ));
        }
    }

    let final_url = response.url().to_string();
    if final_url != url {
        info!(url, final_url = %final_url, "followed redirect");
    }
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_lowercase());

    let body = response.bytes().await.map_err(|e| {
        ScribeError::fetch(
            url,
            "Fetch",
            Some(anyhow::anyhow!("failed to read body: {}", e)),
        )
    })?;

    if body.len() > MAX_CONTENT_LENGTH {
        return Err(ScribeError::fetch(
            url,
            "Fetch",
            Some(anyhow::anyhow!("content too large")),
        ));
    }

    debug!(url, bytes = body.len(), status = status.as_u16(), "fetched");
    Ok(FetchResult {
        final_url,
        content_type,
        body,
    })
}
