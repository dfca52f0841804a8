//! Synthetic document host for unit tests.
//!
//! Nodes are registered per selector string, so a test states exactly what
//! each query returns. Every query is logged for strategy-ordering checks.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::handle::{DocumentHandle, NodeHandle};
use crate::{PrecisError, Result};

#[derive(Debug, Clone, Default)]
pub struct FakeNode {
    text: String,
    raw_text: Option<String>,
    class_name: String,
    id: String,
    attrs: Vec<(String, String)>,
    counts: Vec<(String, usize)>,
}

impl FakeNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Default::default() }
    }

    pub fn with_raw_text(mut self, raw: impl Into<String>) -> Self {
        self.raw_text = Some(raw.into());
        self
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn with_count(mut self, selector: impl Into<String>, count: usize) -> Self {
        self.counts.push((selector.into(), count));
        self
    }
}

impl NodeHandle for FakeNode {
    fn inner_text(&self) -> String {
        self.text.clone()
    }

    fn text_content(&self) -> String {
        self.raw_text.clone().unwrap_or_else(|| self.text.clone())
    }

    fn class_name(&self) -> String {
        self.class_name.clone()
    }

    fn id(&self) -> String {
        self.id.clone()
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.attrs.iter().find(|(key, _)| key == name).map(|(_, value)| value.clone())
    }

    fn count(&self, selector: &str) -> Result<usize> {
        Ok(self
            .counts
            .iter()
            .find(|(key, _)| key == selector)
            .map_or(0, |(_, count)| *count))
    }
}

#[derive(Debug, Default)]
pub struct FakeDocument {
    nodes: HashMap<String, Vec<FakeNode>>,
    url: Option<String>,
    content_type: Option<String>,
    failing_selector: Option<String>,
    queries: RefCell<Vec<String>>,
}

impl FakeDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn node(mut self, selector: impl Into<String>, node: FakeNode) -> Self {
        self.nodes.entry(selector.into()).or_default().push(node);
        self
    }

    pub fn nodes(mut self, selector: impl Into<String>, nodes: impl IntoIterator<Item = FakeNode>) -> Self {
        self.nodes.entry(selector.into()).or_default().extend(nodes);
        self
    }

    /// Makes any query for `selector` fail like a broken host would.
    pub fn failing(mut self, selector: impl Into<String>) -> Self {
        self.failing_selector = Some(selector.into());
        self
    }

    pub fn queried(&self, selector: &str) -> bool {
        self.queries.borrow().iter().any(|q| q == selector)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }

    fn record(&self, selector: &str) -> Result<()> {
        self.queries.borrow_mut().push(selector.to_string());
        match &self.failing_selector {
            Some(failing) if failing == selector => {
                Err(PrecisError::HtmlParseError(format!("host rejected {}", selector)))
            }
            _ => Ok(()),
        }
    }
}

impl DocumentHandle for FakeDocument {
    type Node<'a>
        = FakeNode
    where
        Self: 'a;

    fn query(&self, selector: &str) -> Result<Option<FakeNode>> {
        self.record(selector)?;
        Ok(self.nodes.get(selector).and_then(|nodes| nodes.first()).cloned())
    }

    fn query_all(&self, selector: &str) -> Result<Vec<FakeNode>> {
        self.record(selector)?;
        Ok(self.nodes.get(selector).cloned().unwrap_or_default())
    }

    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }
}
