//! Extraction for Medium-style publishing platforms.
//!
//! These pages wrap every paragraph in generated class names, so the generic
//! container selectors miss. The article body is instead the `section` holding
//! the most paragraphs.

use tracing::debug;
use url::Url;

use crate::config::ExtractConfig;
use crate::handle::{Candidate, DocumentHandle, NodeHandle};
use crate::locator::Strategy;
use crate::Result;

/// Returned when no platform strategy finds content.
pub const PLATFORM_SENTINEL: &str =
    "Could not extract content from this Medium article. The page structure may have changed.";

/// True when the page host contains one of the configured platform domains.
pub fn is_platform_host(url: Option<&str>, config: &ExtractConfig) -> bool {
    let Some(host) = url
        .and_then(|url| Url::parse(url).ok())
        .and_then(|url| url.host_str().map(str::to_lowercase))
    else {
        return false;
    };

    config.platform_hosts.iter().any(|platform| host.contains(platform.as_str()))
}

/// Extract a platform article: title heading plus the densest section.
pub fn extract_medium<D: DocumentHandle>(doc: &D, config: &ExtractConfig) -> Result<String> {
    let mut parts = Vec::new();

    if let Some(title) = doc.query("h1")? {
        let title = title.inner_text();
        let title = title.trim();
        if !title.is_empty() {
            parts.push(format!("# {}\n", title));
        }
    }

    let strategies: [Strategy<D>; 4] = [
        densest_section::<D>,
        platform_container::<D>,
        long_paragraphs::<D>,
        main_element::<D>,
    ];

    let mut body = None;
    for strategy in strategies {
        if let Some(text) = strategy(doc, config)? {
            body = Some(text);
            break;
        }
    }

    let Some(body) = body else {
        debug!("platform extraction found nothing");
        return Ok(PLATFORM_SENTINEL.to_string());
    };

    parts.push(body);
    Ok(parts.join("\n\n"))
}

/// The section with the most descendant paragraphs, first one on ties.
fn densest_section<D: DocumentHandle>(doc: &D, config: &ExtractConfig) -> Result<Option<String>> {
    let mut best = None;
    let mut max_paragraphs = 0;

    for section in doc.query_all("section")? {
        let paragraphs = section.count("p")?;
        if paragraphs > max_paragraphs {
            max_paragraphs = paragraphs;
            best = Some(section);
        }
    }

    if max_paragraphs <= config.min_section_paragraphs {
        return Ok(None);
    }

    debug!(paragraphs = max_paragraphs, "platform section selected");
    Ok(best.map(|section| section.inner_text()))
}

fn platform_container<D: DocumentHandle>(doc: &D, config: &ExtractConfig) -> Result<Option<String>> {
    for selector in &config.platform_selectors {
        if let Some(node) = doc.query(selector)? {
            let candidate = Candidate::new(node);
            if candidate.exceeds(config.min_platform_container_chars) {
                return Ok(Some(candidate.into_text()));
            }
        }
    }

    Ok(None)
}

fn long_paragraphs<D: DocumentHandle>(doc: &D, config: &ExtractConfig) -> Result<Option<String>> {
    let paragraphs: Vec<String> = doc
        .query_all("p")?
        .iter()
        .map(NodeHandle::inner_text)
        .filter(|text| text.trim().chars().count() > config.min_platform_paragraph_chars)
        .collect();

    if paragraphs.is_empty() {
        return Ok(None);
    }

    Ok(Some(paragraphs.join("\n\n")))
}

fn main_element<D: DocumentHandle>(doc: &D, config: &ExtractConfig) -> Result<Option<String>> {
    Ok(doc
        .query("main")?
        .map(Candidate::new)
        .filter(|candidate| candidate.exceeds(config.min_platform_container_chars))
        .map(Candidate::into_text))
}
