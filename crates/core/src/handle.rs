//! Read-only query capability over an already-rendered document tree.
//!
//! The extraction engine never owns a DOM. It asks a [`DocumentHandle`] for
//! nodes by CSS selector and reads text and attributes off the returned
//! [`NodeHandle`]s. [`crate::parse::Document`] is the scraper-backed
//! implementation; tests substitute synthetic trees.

use crate::Result;

/// A single node returned by a [`DocumentHandle`] query.
pub trait NodeHandle {
    /// Text as a reader would see it: hidden subtrees dropped, whitespace
    /// collapsed, block boundaries rendered as line breaks.
    fn inner_text(&self) -> String;

    /// Concatenation of every descendant text node, hidden or not.
    fn text_content(&self) -> String;

    /// The raw `class` attribute, or an empty string.
    fn class_name(&self) -> String;

    /// The raw `id` attribute, or an empty string.
    fn id(&self) -> String;

    /// The value of an arbitrary attribute.
    fn attr(&self, name: &str) -> Option<String>;

    /// Number of descendants matching `selector`.
    fn count(&self, selector: &str) -> Result<usize>;
}

/// Query operations over the rendered tree of the current page.
///
/// Implementations must return multi-node results in document order.
pub trait DocumentHandle {
    type Node<'a>: NodeHandle
    where
        Self: 'a;

    /// First node matching `selector` in document order.
    fn query(&self, selector: &str) -> Result<Option<Self::Node<'_>>>;

    /// Every node matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Result<Vec<Self::Node<'_>>>;

    /// The page URL, if known.
    fn url(&self) -> Option<&str>;

    /// The declared content type, if known.
    fn content_type(&self) -> Option<&str>;
}

/// A node paired with its rendered text, compared by text length only.
#[derive(Debug, Clone)]
pub struct Candidate<N> {
    pub node: N,
    pub text: String,
    pub length: usize,
}

impl<N: NodeHandle> Candidate<N> {
    pub fn new(node: N) -> Self {
        let text = node.inner_text();
        let length = text.chars().count();
        Self { node, text, length }
    }

    /// True when the rendered text is strictly longer than `min_chars`.
    pub fn exceeds(&self, min_chars: usize) -> bool {
        self.length > min_chars
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
