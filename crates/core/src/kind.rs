use url::Url;

use crate::handle::DocumentHandle;
use crate::Result;

/// What kind of page a document handle points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// A PDF rendered by an in-browser viewer.
    Pdf,
    /// Any ordinary article page.
    Generic,
}

const PDF_MIME: &str = "application/pdf";

/// URL prefixes of browser-internal pages that cannot be extracted.
const RESTRICTED_PREFIXES: [&str; 5] = ["chrome://", "chrome-extension://", "moz-extension://", "edge://", "about:"];

/// Classify a document. First match wins: `.pdf` URL path, PDF content type,
/// then an embedded PDF viewer node.
pub fn classify<D: DocumentHandle>(doc: &D) -> Result<DocumentKind> {
    if doc.url().is_some_and(has_pdf_path) {
        return Ok(DocumentKind::Pdf);
    }

    if doc.content_type().is_some_and(is_pdf_content_type) {
        return Ok(DocumentKind::Pdf);
    }

    if doc.query(r#"embed[type="application/pdf"]"#)?.is_some() {
        return Ok(DocumentKind::Pdf);
    }

    Ok(DocumentKind::Generic)
}

fn has_pdf_path(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().to_lowercase().ends_with(".pdf"),
        Err(_) => url.to_lowercase().ends_with(".pdf"),
    }
}

/// Compares the media type only, so `application/pdf; charset=binary` matches.
pub fn is_pdf_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(PDF_MIME))
}

/// Shown when asked to summarize a browser-internal page.
pub const RESTRICTED_PAGE_MESSAGE: &str =
    "Cannot summarize browser internal pages. Please navigate to a regular website.";

/// True for browser-internal pages that callers should refuse up front.
pub fn is_restricted_url(url: &str) -> bool {
    RESTRICTED_PREFIXES.iter().any(|prefix| url.starts_with(prefix))
}
