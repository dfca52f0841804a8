//! Scraper-backed document host.
//!
//! This module provides the [`Document`] and [`Element`] types, the concrete
//! [`DocumentHandle`] / [`NodeHandle`] implementation used by the CLI and the
//! server. A `Document` couples parsed HTML with the page URL and declared
//! content type that the extraction engine consults.
//!
//! # Example
//!
//! ```rust
//! use precis_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h1>Title</h1>
//!             <p class="content">Paragraph</p>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html).unwrap().with_url("https://example.com/post");
//! let paragraphs = doc.select("p.content").unwrap();
//! assert_eq!(paragraphs.len(), 1);
//! ```

use scraper::{Html, Selector};

use crate::handle::{DocumentHandle, NodeHandle};
use crate::render::render_text;
use crate::{PrecisError, Result};

/// A parsed HTML page together with where it came from.
///
/// # Example
///
/// ```rust
/// use precis_core::parse::Document;
///
/// let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
/// let doc = Document::parse(html).unwrap();
/// assert_eq!(doc.title(), Some("Test".to_string()));
/// ```
pub struct Document {
    html: Html,
    url: Option<String>,
    content_type: Option<String>,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// html5ever recovers from any malformed markup, so this only fails in
    /// the sense that the resulting tree may be sparse.
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html, url: None, content_type: None })
    }

    /// Records the page URL used for platform and PDF detection.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Records the declared content type (e.g. from a `Content-Type` header).
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`PrecisError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use precis_core::parse::Document;
    ///
    /// let html = r#"<p class="content">First</p><p class="content">Second</p>"#;
    /// let doc = Document::parse(html).unwrap();
    /// let elements = doc.select("p.content").unwrap();
    /// assert_eq!(elements.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Gets the title of the document.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
    }
}

impl DocumentHandle for Document {
    type Node<'a>
        = Element<'a>
    where
        Self: 'a;

    fn query(&self, selector: &str) -> Result<Option<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).next().map(|el| Element { element: el }))
    }

    fn query_all(&self, selector: &str) -> Result<Vec<Element<'_>>> {
        self.select(selector)
    }

    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| PrecisError::HtmlParseError(format!("Invalid selector {}: {}", selector, e)))
}

/// A wrapper around scraper's ElementRef.
///
/// # Example
///
/// ```rust
/// use precis_core::parse::Document;
/// use precis_core::handle::NodeHandle;
///
/// let html = r#"<img class="hero" alt="A lighthouse at dusk">"#;
/// let doc = Document::parse(html).unwrap();
/// let image = &doc.select("img").unwrap()[0];
///
/// assert_eq!(image.attr("alt"), Some("A lighthouse at dusk".to_string()));
/// assert_eq!(image.class_name(), "hero");
/// ```
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl NodeHandle for Element<'_> {
    fn inner_text(&self) -> String {
        render_text(self.element)
    }

    fn text_content(&self) -> String {
        self.element.text().collect()
    }

    fn class_name(&self) -> String {
        self.element.value().attr("class").unwrap_or_default().to_string()
    }

    fn id(&self) -> String {
        self.element.value().id().unwrap_or_default().to_string()
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.element.value().attr(name).map(str::to_string)
    }

    fn count(&self, selector: &str) -> Result<usize> {
        let sel = parse_selector(selector)?;
        Ok(self.element.select(&sel).count())
    }
}
