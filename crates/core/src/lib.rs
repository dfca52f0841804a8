//! Heuristic article text extraction for rendered web pages, plus the
//! summarization, settings and export pieces built around it.
//!
//! The engine reads an already rendered tree through [`DocumentHandle`] and
//! always answers with text: the article body, or a sentinel explaining why
//! nothing usable was found.
//!
//! ```rust
//! use precis_core::{Document, ExtractConfig, NO_CONTENT_SENTINEL, extract_article_text};
//!
//! let doc = Document::parse("<html><body><nav>Home</nav></body></html>").unwrap();
//! assert_eq!(extract_article_text(&doc, &ExtractConfig::default()), NO_CONTENT_SENTINEL);
//! ```

pub mod captions;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod handle;
pub mod kind;
pub mod locator;
pub mod medium;
pub mod noise;
pub mod normalize;
pub mod parse;
pub mod pdf;
pub mod render;
pub mod settings;
pub mod summarize;

#[cfg(test)]
mod fixture;

pub use config::{ExportConfig, ExtractConfig, ExtractConfigBuilder, SummaryConfig};
pub use error::{PrecisError, Result};
pub use export::{ExportFormat, export_markdown, export_text, is_exportable, write_export};
pub use extract::{
    ArticleTextResponse, EXTRACTION_ERROR_SENTINEL, ExtractRequest, NO_CONTENT_SENTINEL, extract_article_text,
    handle_request,
};
pub use fetch::{FetchConfig, FetchedPage, fetch_file, fetch_stdin, fetch_url};
pub use handle::{DocumentHandle, NodeHandle};
pub use kind::{DocumentKind, RESTRICTED_PAGE_MESSAGE, classify, is_restricted_url};
pub use medium::PLATFORM_SENTINEL;
pub use normalize::normalize;
pub use parse::{Document, Element};
pub use pdf::PDF_SENTINEL;
pub use settings::{API_KEY_ENV, Settings, mask_api_key, validate_api_key};
pub use summarize::{
    GeminiClient, INSUFFICIENT_TEXT_MESSAGE, MIN_SUMMARY_INPUT_CHARS, SummaryType, build_prompt, has_enough_text,
    summarize,
};
