use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex pattern"));

static BLANK_LINES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n").expect("Invalid blank line regex pattern"));

/// Canonicalize extracted text.
///
/// Whitespace runs (line breaks included) collapse to one space, runs of
/// three or more line-separator groups collapse to a single blank line, and
/// the result is trimmed. `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let collapsed = WHITESPACE_RE.replace_all(text, " ");
    let paragraphs = BLANK_LINES_RE.replace_all(&collapsed, "\n\n");
    paragraphs.trim().to_string()
}

/// Collapse whitespace runs to one space without trimming.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").into_owned()
}
