//! Plain text and Markdown export of generated summaries.

use std::fs;
use std::path::Path;

use time::OffsetDateTime;
use time::macros::format_description;

use crate::summarize::SummaryType;
use crate::{PrecisError, Result};

/// Text that marks a result as a placeholder rather than a summary.
const PLACEHOLDERS: [&str; 2] = ["Select a summary type", "API key not found"];

const DEFAULT_SOURCE: &str = "Current webpage";

/// Whether the export format is chosen by file extension or explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Markdown,
}

impl ExportFormat {
    /// `.md` and `.markdown` mean Markdown, anything else plain text.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown") => Self::Markdown,
            _ => Self::Text,
        }
    }

    /// `txt`/`text` or `md`/`markdown`, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "txt" | "text" => Some(Self::Text),
            "md" | "markdown" => Some(Self::Markdown),
            _ => None,
        }
    }
}

/// False for empty results and placeholder messages.
pub fn is_exportable(summary: &str) -> bool {
    !summary.trim().is_empty() && !PLACEHOLDERS.iter().any(|p| summary.contains(p))
}

pub fn export_text(summary: &str) -> String {
    summary.to_string()
}

/// Markdown document with a metadata header followed by the summary.
pub fn export_markdown(
    summary: &str, summary_type: &SummaryType, generated_on: OffsetDateTime, source: Option<&str>,
) -> Result<String> {
    let date = generated_on
        .format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))
        .map_err(|e| PrecisError::ConfigError(format!("could not format export date: {}", e)))?;

    let mut md = String::from("# AI Summary\n\n");
    md.push_str(&format!("**Generated on:** {}\n", date));
    md.push_str(&format!("**Summary type:** {}\n", summary_type.title()));
    md.push_str(&format!("**Source:** {}\n\n", source.unwrap_or(DEFAULT_SOURCE)));
    md.push_str("---\n\n");
    md.push_str(summary);

    Ok(md)
}

/// Render `summary` in `format` and write it to `path`.
pub fn write_export(
    path: &Path, summary: &str, format: ExportFormat, summary_type: &SummaryType, source: Option<&str>,
) -> Result<()> {
    if !is_exportable(summary) {
        return Err(PrecisError::ConfigError("nothing to export".to_string()));
    }

    let content = match format {
        ExportFormat::Text => export_text(summary),
        ExportFormat::Markdown => {
            let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
            export_markdown(summary, summary_type, now, source)?
        }
    };

    fs::write(path, content)?;
    Ok(())
}
