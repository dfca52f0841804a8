//! Generic content location cascade.
//!
//! Strategies run in order and the first to produce usable text wins:
//! 1. the first `article` element
//! 2. the first known content container (`.post-content`, `main`, ...)
//! 3. every substantial, non-noise paragraph joined with blank lines
//!
//! Later strategies never query the document once an earlier one succeeds.

use tracing::debug;

use crate::config::ExtractConfig;
use crate::handle::{Candidate, DocumentHandle, NodeHandle};
use crate::noise::is_noise;
use crate::Result;

/// A single location strategy. `Ok(None)` cedes to the next one.
pub type Strategy<D> = fn(&D, &ExtractConfig) -> Result<Option<String>>;

/// Run the generic cascade. Returns an empty string when nothing qualifies.
pub fn locate<D: DocumentHandle>(doc: &D, config: &ExtractConfig) -> Result<String> {
    let strategies: [(&str, Strategy<D>); 3] = [
        ("article", article_container::<D>),
        ("known container", known_container::<D>),
        ("paragraphs", filtered_paragraphs::<D>),
    ];

    for (name, strategy) in strategies {
        if let Some(text) = strategy(doc, config)? {
            debug!(strategy = name, chars = text.chars().count(), "content located");
            return Ok(text);
        }
    }

    debug!("no content strategy matched");
    Ok(String::new())
}

/// The first `article` element, if its rendered text is long enough.
pub fn article_container<D: DocumentHandle>(doc: &D, config: &ExtractConfig) -> Result<Option<String>> {
    Ok(doc
        .query("article")?
        .map(Candidate::new)
        .filter(|candidate| candidate.exceeds(config.min_container_chars))
        .map(Candidate::into_text))
}

/// The first known container that is long enough, in selector priority order.
pub fn known_container<D: DocumentHandle>(doc: &D, config: &ExtractConfig) -> Result<Option<String>> {
    for selector in &config.content_selectors {
        if let Some(node) = doc.query(selector)? {
            let candidate = Candidate::new(node);
            if candidate.exceeds(config.min_container_chars) {
                return Ok(Some(candidate.into_text()));
            }
        }
    }

    Ok(None)
}

/// Substantial paragraphs that are not page chrome, in document order.
pub fn filtered_paragraphs<D: DocumentHandle>(doc: &D, config: &ExtractConfig) -> Result<Option<String>> {
    let paragraphs: Vec<String> = doc
        .query_all("p")?
        .into_iter()
        .filter(|p| !is_noise(p))
        .map(|p| p.inner_text())
        .filter(|text| text.trim().chars().count() > config.min_paragraph_chars)
        .collect();

    if paragraphs.is_empty() {
        return Ok(None);
    }

    Ok(Some(paragraphs.join("\n\n")))
}
