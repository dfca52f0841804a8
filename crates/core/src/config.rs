//! Explicit configuration values for extraction, summarization and export.
//!
//! Nothing in the engine reads global state: every threshold and selector
//! list lives in an [`ExtractConfig`], and the remote call is parameterised
//! by a [`SummaryConfig`].
//!
//! # Example
//!
//! ```rust
//! use precis_core::ExtractConfig;
//!
//! let config = ExtractConfig::builder()
//!     .min_container_chars(300)
//!     .max_captions(3)
//!     .platform_host("medium.com")
//!     .build();
//! assert_eq!(config.min_container_chars, 300);
//! ```

use crate::export::ExportFormat;

/// Content-container selectors tried, in order, after the `article` element.
pub const DEFAULT_CONTENT_SELECTORS: [&str; 9] = [
    ".post-content",
    ".entry-content",
    ".article-content",
    ".story-content",
    ".content",
    "[role=\"main\"]",
    "main",
    ".post-body",
    ".article-body",
];

/// Platform-specific containers tried when no `section` dominates.
pub const DEFAULT_PLATFORM_SELECTORS: [&str; 4] = [
    ".article-body",
    ".story-body",
    ".postArticle-content",
    "[data-testid=\"storyContent\"]",
];

/// Configuration for article text extraction.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// A container's rendered text must be longer than this (default: 200).
    pub min_container_chars: usize,

    /// A fallback paragraph's trimmed text must be longer than this (default: 20).
    pub min_paragraph_chars: usize,

    /// Known content containers, in priority order.
    pub content_selectors: Vec<String>,

    /// Hosts that get the publishing-platform extractor (default: `medium.com`).
    pub platform_hosts: Vec<String>,

    /// Platform containers, in priority order.
    pub platform_selectors: Vec<String>,

    /// A platform container's rendered text must be longer than this (default: 100).
    pub min_platform_container_chars: usize,

    /// A platform paragraph's trimmed text must be longer than this (default: 30).
    pub min_platform_paragraph_chars: usize,

    /// The densest `section` needs more paragraphs than this (default: 2).
    pub min_section_paragraphs: usize,

    /// A PDF viewer container's trimmed text must be longer than this (default: 50).
    pub min_pdf_viewer_chars: usize,

    /// Maximum number of image captions appended (default: 5).
    pub max_captions: usize,

    /// A caption's trimmed alt text must be longer than this (default: 5).
    pub min_caption_chars: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            min_container_chars: 200,
            min_paragraph_chars: 20,
            content_selectors: DEFAULT_CONTENT_SELECTORS.iter().map(|s| s.to_string()).collect(),
            platform_hosts: vec!["medium.com".to_string()],
            platform_selectors: DEFAULT_PLATFORM_SELECTORS.iter().map(|s| s.to_string()).collect(),
            min_platform_container_chars: 100,
            min_platform_paragraph_chars: 30,
            min_section_paragraphs: 2,
            min_pdf_viewer_chars: 50,
            max_captions: 5,
            min_caption_chars: 5,
        }
    }
}

impl ExtractConfig {
    /// Creates a new builder for ExtractConfig.
    pub fn builder() -> ExtractConfigBuilder {
        ExtractConfigBuilder::new()
    }
}

/// Builder for ExtractConfig.
pub struct ExtractConfigBuilder {
    config: ExtractConfig,
}

impl ExtractConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ExtractConfig::default() }
    }

    /// Sets the container length threshold.
    pub fn min_container_chars(mut self, value: usize) -> Self {
        self.config.min_container_chars = value;
        self
    }

    /// Sets the fallback paragraph length threshold.
    pub fn min_paragraph_chars(mut self, value: usize) -> Self {
        self.config.min_paragraph_chars = value;
        self
    }

    /// Replaces the known content-container selectors.
    pub fn content_selectors<I, S>(mut self, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.content_selectors = selectors.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a host that should use the publishing-platform extractor.
    pub fn platform_host(mut self, host: impl Into<String>) -> Self {
        let host = host.into();
        if !self.config.platform_hosts.contains(&host) {
            self.config.platform_hosts.push(host);
        }
        self
    }

    /// Sets the maximum number of image captions.
    pub fn max_captions(mut self, value: usize) -> Self {
        self.config.max_captions = value;
        self
    }

    /// Sets the PDF viewer container length threshold.
    pub fn min_pdf_viewer_chars(mut self, value: usize) -> Self {
        self.config.min_pdf_viewer_chars = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> ExtractConfig {
        self.config
    }
}

impl Default for ExtractConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters for the remote summarization call.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryConfig {
    /// Model name (default: `gemini-1.5-flash`).
    pub model: String,

    /// Sampling temperature (default: 0.2).
    pub temperature: f32,

    /// Article text is cut to this many characters before prompting (default: 20000).
    pub max_text_length: usize,

    /// Service base URL.
    pub endpoint: String,

    /// Request timeout in seconds (default: 30).
    pub timeout: u64,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-flash".to_string(),
            temperature: 0.2,
            max_text_length: 20_000,
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
            timeout: 30,
        }
    }
}

/// Default file names for exported summaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub txt_filename: String,
    pub md_filename: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { txt_filename: "summary.txt".to_string(), md_filename: "summary.md".to_string() }
    }
}

impl ExportConfig {
    /// File name used when an export names a format but no path.
    pub fn filename(&self, format: ExportFormat) -> &str {
        match format {
            ExportFormat::Text => &self.txt_filename,
            ExportFormat::Markdown => &self.md_filename,
        }
    }
}
