//! Error types for Precis operations.
//!
//! This module defines the main error type [`PrecisError`]. Extraction itself
//! never surfaces these to callers (it degrades to sentinel text), but host
//! queries, fetching, the summarization call and settings persistence do.
//!
//! # Example
//!
//! ```rust
//! use precis_core::{PrecisError, Result};
//!
//! fn require_key(key: Option<&str>) -> Result<&str> {
//!     key.ok_or(PrecisError::MissingApiKey)
//! }
//! # assert!(require_key(None).is_err());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Precis operations.
///
/// # Example
///
/// ```rust
/// use precis_core::PrecisError;
///
/// let err = PrecisError::ApiError { status: 403, message: "API key not valid".to_string() };
/// assert!(err.to_string().contains("403"));
/// ```
#[derive(Error, Debug)]
pub enum PrecisError {
    /// HTTP request errors from reqwest.
    ///
    /// Wraps network errors, DNS failures, connection issues and other
    /// transport problems for both page fetching and the summarization call.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A host query failed, usually because a selector could not be parsed.
    #[error("Failed to query document: {0}")]
    HtmlParseError(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File write errors.
    #[error("Failed to write to file: {0}")]
    WriteError(#[from] std::io::Error),

    /// Settings could not be located or decoded.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// No API key is configured for the summarization service.
    #[error("API key not found. Set one with `precis key set <KEY>` or GEMINI_API_KEY")]
    MissingApiKey,

    /// The supplied API key was rejected before any request was made.
    #[error("Invalid API key: {0}")]
    InvalidApiKey(String),

    /// The summarization service answered with a non-success status.
    #[error("Summarization failed ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for PrecisError.
pub type Result<T> = std::result::Result<T, PrecisError>;
