//! Page fetching from URLs, files, and stdin.
//!
//! Extraction works on an already rendered tree, so these helpers only feed
//! it HTML. A fetched page keeps its final URL and declared content type
//! because both take part in document classification.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use url::Url;

use crate::kind::is_pdf_content_type;
use crate::{PrecisError, Result};

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: "Mozilla/5.0 (compatible; Precis/0.1)".to_string() }
    }
}

/// A page retrieved over HTTP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// HTML body. Empty for PDF responses, whose bytes are never parsed.
    pub body: String,
    /// URL after redirects.
    pub url: String,
    /// The `Content-Type` response header, if any.
    pub content_type: Option<String>,
}

/// Fetches a page from a URL.
///
/// Redirects are followed and the configured timeout applies to the whole
/// request.
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<FetchedPage> {
    let parsed_url = Url::parse(url).map_err(|e| PrecisError::InvalidUrl(e.to_string()))?;

    if !matches!(parsed_url.scheme(), "http" | "https") {
        return Err(PrecisError::InvalidUrl("URL must use http:// or https://".to_string()));
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(PrecisError::HttpError)?;

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                PrecisError::Timeout { timeout: config.timeout }
            } else {
                PrecisError::HttpError(e)
            }
        })?;

    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let body = if content_type.as_deref().is_some_and(is_pdf_content_type) {
        debug!(url = %final_url, "pdf response, body skipped");
        String::new()
    } else {
        response.text().await?
    };

    Ok(FetchedPage { body, url: final_url, content_type })
}

/// Reads HTML content from a local file.
///
/// Callers should validate and sanitize the path when accepting user input.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(PrecisError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(PrecisError::from)
    }
}

/// Reads HTML content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(PrecisError::from)?;

    Ok(buffer)
}
