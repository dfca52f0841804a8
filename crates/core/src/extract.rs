//! The single extraction entry point.
//!
//! [`extract_article_text`] classifies the page, dispatches to the PDF,
//! platform or generic extractor, appends image captions and normalizes
//! whitespace. It never fails: empty results become
//! [`NO_CONTENT_SENTINEL`] and host faults become [`EXTRACTION_ERROR_SENTINEL`].

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::captions::captions;
use crate::config::ExtractConfig;
use crate::handle::DocumentHandle;
use crate::kind::{DocumentKind, classify};
use crate::locator::locate;
use crate::medium::{extract_medium, is_platform_host};
use crate::normalize::normalize;
use crate::pdf::extract_pdf;
use crate::Result;

/// Returned when no strategy finds usable text.
pub const NO_CONTENT_SENTINEL: &str = "Could not extract meaningful text from this page.";

/// Returned when the host fails while being queried.
pub const EXTRACTION_ERROR_SENTINEL: &str = "Error extracting text from this page.";

/// Extract the readable article text of a rendered page.
///
/// # Example
///
/// ```rust
/// use precis_core::{Document, ExtractConfig, extract_article_text};
///
/// let body = "Plenty of words about the subject at hand. ".repeat(6);
/// let html = format!("<html><body><article><p>{}</p></article></body></html>", body);
/// let doc = Document::parse(&html).unwrap().with_url("https://example.com/post");
///
/// let text = extract_article_text(&doc, &ExtractConfig::default());
/// assert!(text.starts_with("Plenty of words"));
/// ```
pub fn extract_article_text<D: DocumentHandle>(doc: &D, config: &ExtractConfig) -> String {
    match try_extract(doc, config) {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, url = doc.url().unwrap_or_default(), "text extraction failed");
            EXTRACTION_ERROR_SENTINEL.to_string()
        }
    }
}

fn try_extract<D: DocumentHandle>(doc: &D, config: &ExtractConfig) -> Result<String> {
    if classify(doc)? == DocumentKind::Pdf {
        debug!("document classified as pdf");
        return extract_pdf(doc, config);
    }

    let mut text = if is_platform_host(doc.url(), config) {
        debug!("using publishing platform extractor");
        extract_medium(doc, config)?
    } else {
        locate(doc, config)?
    };

    let captions = captions(doc, config)?;
    if !captions.is_empty() {
        text.push_str("\n\n");
        text.push_str(&captions);
    }

    let text = normalize(&text);
    if text.is_empty() {
        return Ok(NO_CONTENT_SENTINEL.to_string());
    }

    Ok(text)
}

/// A message sent across the extraction boundary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum ExtractRequest {
    #[serde(rename = "GET_ARTICLE_TEXT")]
    GetArticleText,
    #[serde(other)]
    Unknown,
}

/// The reply to [`ExtractRequest::GetArticleText`]; `text` is always present.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleTextResponse {
    pub text: String,
}

/// Answer a boundary message. Unrecognized kinds get no reply.
pub fn handle_request<D: DocumentHandle>(
    doc: &D, request: &ExtractRequest, config: &ExtractConfig,
) -> Option<ArticleTextResponse> {
    match request {
        ExtractRequest::GetArticleText => Some(ArticleTextResponse { text: extract_article_text(doc, config) }),
        ExtractRequest::Unknown => None,
    }
}
