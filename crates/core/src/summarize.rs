//! AI summarization of extracted article text.
//!
//! The article text is truncated, wrapped in a prompt for the requested
//! [`SummaryType`] and sent to the Gemini `generateContent` endpoint.
//!
//! # Example
//!
//! ```rust
//! use precis_core::{SummaryConfig, SummaryType, build_prompt};
//!
//! let prompt = build_prompt("Some article text.", &"brief".parse().unwrap(), &SummaryConfig::default());
//! assert!(prompt.starts_with("Provide a brief summary"));
//! assert_eq!("key-insights".parse::<SummaryType>().unwrap(), SummaryType::KeyInsights);
//! ```

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::config::SummaryConfig;
use crate::{PrecisError, Result};

/// Extracted text shorter than this (after trimming) is not worth summarizing.
pub const MIN_SUMMARY_INPUT_CHARS: usize = 50;

/// Shown when the extracted text is too short to summarize.
pub const INSUFFICIENT_TEXT_MESSAGE: &str =
    "Could not extract meaningful text from this page. Make sure you're on a page with readable content.";

/// Returned when the service answers without any candidate text.
pub const EMPTY_SUMMARY: &str = "No summary available.";

/// The style of summary requested.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SummaryType {
    /// Two or three sentences.
    #[default]
    Brief,
    /// Every main point and key detail.
    Detailed,
    /// Five to seven bullet points.
    Bullets,
    /// A numbered list of insights.
    KeyInsights,
    /// Any other label; prompted with a generic summary request.
    Custom(String),
}

impl SummaryType {
    /// The kebab-case label this type is selected by.
    pub fn label(&self) -> &str {
        match self {
            Self::Brief => "brief",
            Self::Detailed => "detailed",
            Self::Bullets => "bullets",
            Self::KeyInsights => "key-insights",
            Self::Custom(label) => label,
        }
    }

    /// Human readable label: the first hyphen becomes a space and every word
    /// is capitalized, so `key-insights` reads `Key Insights`.
    pub fn title(&self) -> String {
        let label = self.label().replacen('-', " ", 1);
        let mut title = String::with_capacity(label.len());
        let mut prev_is_word = false;
        for c in label.chars() {
            let is_word = c.is_alphanumeric() || c == '_';
            if is_word && !prev_is_word {
                title.extend(c.to_uppercase());
            } else {
                title.push(c);
            }
            prev_is_word = is_word;
        }
        title
    }
}

impl FromStr for SummaryType {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "brief" => Self::Brief,
            "detailed" => Self::Detailed,
            "bullets" => Self::Bullets,
            "key-insights" => Self::KeyInsights,
            other => Self::Custom(other.to_string()),
        })
    }
}

impl From<String> for SummaryType {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(summary_type) => summary_type,
            Err(never) => match never {},
        }
    }
}

impl From<SummaryType> for String {
    fn from(value: SummaryType) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for SummaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// True when `text` carries enough content to be summarized.
pub fn has_enough_text(text: &str) -> bool {
    text.trim().chars().count() >= MIN_SUMMARY_INPUT_CHARS
}

/// Cut `text` to `max_chars` characters, marking the cut with `...`.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

/// Build the model prompt for `text`.
pub fn build_prompt(text: &str, summary_type: &SummaryType, config: &SummaryConfig) -> String {
    let text = truncate_text(text, config.max_text_length);

    match summary_type {
        SummaryType::Brief => {
            format!("Provide a brief summary of the following article in 2-3 sentences:\n\n{}", text)
        }
        SummaryType::Detailed => format!(
            "Provide a detailed summary of the following article, covering all main points and key details:\n\n{}",
            text
        ),
        SummaryType::Bullets => format!(
            "Summarize the following article in 5-7 key bullet points. Format your response exactly like this example:

• First key point about the topic
• Second important insight
• Third main finding or argument
• Fourth significant detail
• Fifth crucial point
• Sixth relevant information
• Seventh summary point

Make sure to use the bullet symbol (•) at the start of each line, followed by a space. Keep each point concise but informative.

Article text:
{}",
            text
        ),
        SummaryType::KeyInsights => format!(
            "Extract the key insights from the following article and present them in a structured format:

🔍 Key Insights:

1. [First major insight]
2. [Second important finding]
3. [Third significant point]
4. [Fourth key takeaway]
5. [Fifth important aspect]

Article text:
{}",
            text
        ),
        SummaryType::Custom(label) => {
            debug!(summary_type = %label, "unknown summary type, using generic prompt");
            format!("Summarize the following article:\n\n{}", text)
        }
    }
}

/// Undo UTF-8 read as Windows-1252 for the characters models commonly emit.
pub fn repair_mojibake(text: &str) -> String {
    text.replace("â€¢", "•")
        .replace("â€™", "'")
        .replace("â€œ", "\"")
        .replace("â€", "\"")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Deserialize)]
struct ResponseCandidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Pull the summary out of a successful response body.
fn parse_summary(body: &str) -> Result<String> {
    let response: GenerateResponse = serde_json::from_str(body)?;
    let summary = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| EMPTY_SUMMARY.to_string());

    Ok(repair_mojibake(&summary))
}

/// The service's own error message, or a generic one naming the status.
fn api_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .and_then(|error| error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("API request failed with status {}", status))
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: SummaryConfig,
}

impl GeminiClient {
    pub fn new(config: SummaryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(PrecisError::HttpError)?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    fn endpoint(&self, api_key: &str) -> Result<Url> {
        let base = self.config.endpoint.trim_end_matches('/');
        let mut url = Url::parse(&format!("{}/v1beta/models/{}:generateContent", base, self.config.model))
            .map_err(|e| PrecisError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut().append_pair("key", api_key);
        Ok(url)
    }

    /// Send `prompt` to the model and return the repaired response text.
    pub async fn generate(&self, prompt: &str, api_key: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: [RequestContent { parts: [RequestPart { text: prompt }] }],
            generation_config: GenerationConfig { temperature: self.config.temperature },
        };

        debug!(model = %self.config.model, prompt_chars = prompt.chars().count(), "requesting summary");

        let response = self
            .client
            .post(self.endpoint(api_key)?)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PrecisError::Timeout { timeout: self.config.timeout }
                } else {
                    PrecisError::HttpError(e)
                }
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(PrecisError::ApiError {
                status: status.as_u16(),
                message: api_error_message(status.as_u16(), &body),
            });
        }

        parse_summary(&body)
    }

    /// Summarize already extracted article text.
    pub async fn summarize(&self, text: &str, summary_type: &SummaryType, api_key: &str) -> Result<String> {
        let prompt = build_prompt(text, summary_type, &self.config);
        self.generate(&prompt, api_key).await
    }
}

/// One-shot summarization with a fresh client.
pub async fn summarize(text: &str, summary_type: &SummaryType, api_key: &str, config: &SummaryConfig) -> Result<String> {
    GeminiClient::new(config.clone())?.summarize(text, summary_type, api_key).await
}
