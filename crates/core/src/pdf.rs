//! Text scraping for PDFs shown in an in-browser viewer.
//!
//! Nothing is rasterized. pdf.js style viewers render an invisible text layer
//! over each page; that layer is read when present, the viewer container
//! otherwise.

use tracing::debug;

use crate::config::ExtractConfig;
use crate::handle::{DocumentHandle, NodeHandle};
use crate::normalize::collapse_whitespace;
use crate::Result;

const TEXT_LAYER_SELECTOR: &str = ".textLayer, .pdf-text-layer, .textLayer div";

const VIEWER_SELECTOR: &str = "#viewer, .pdfViewer, .pdf-viewer";

/// Returned when the viewer exposes no text.
pub const PDF_SENTINEL: &str = "This appears to be a PDF document. For best results with PDFs, please use the \
     browser's built-in PDF viewer or try a different PDF viewing method. Some PDFs may not have extractable \
     text (like scanned images).";

/// Scrape the rendered text of a PDF viewer.
pub fn extract_pdf<D: DocumentHandle>(doc: &D, config: &ExtractConfig) -> Result<String> {
    let layers = node_texts(doc, TEXT_LAYER_SELECTOR, 0)?;
    if !layers.is_empty() {
        debug!(nodes = layers.len(), "pdf text layer found");
        return Ok(join_collapsed(&layers));
    }

    let viewers = node_texts(doc, VIEWER_SELECTOR, config.min_pdf_viewer_chars)?;
    if !viewers.is_empty() {
        debug!(nodes = viewers.len(), "pdf viewer text found");
        return Ok(join_collapsed(&viewers));
    }

    Ok(PDF_SENTINEL.to_string())
}

/// Trimmed text of every matching node longer than `min_chars`.
fn node_texts<D: DocumentHandle>(doc: &D, selector: &str, min_chars: usize) -> Result<Vec<String>> {
    Ok(doc
        .query_all(selector)?
        .iter()
        .map(|node| {
            let text = node.inner_text();
            if text.is_empty() { node.text_content() } else { text }
        })
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty() && text.chars().count() > min_chars)
        .collect())
}

fn join_collapsed(texts: &[String]) -> String {
    collapse_whitespace(&texts.join(" "))
}
