//! Persisted user settings: the API key and optional summary overrides.
//!
//! Settings live as JSON in `<config dir>/precis/settings.json`. The
//! `GEMINI_API_KEY` environment variable takes precedence over a stored key.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SummaryConfig;
use crate::{PrecisError, Result};

/// Environment variable consulted before the stored key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Gemini API keys start with this prefix.
const API_KEY_PREFIX: &str = "AIza";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gemini_api_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_text_length: Option<usize>,

    /// Service base URL, for proxies or a self-hosted gateway.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl Settings {
    /// `<config dir>/precis/settings.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("precis").join("settings.json"))
    }

    /// Load from the default location.
    pub fn load() -> Result<Self> {
        let path = Self::default_path()
            .ok_or_else(|| PrecisError::ConfigError("no configuration directory on this platform".to_string()))?;
        Self::load_from(&path)
    }

    /// Load from `path`. A missing file yields default settings.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| PrecisError::ConfigError(format!("{}: {}", path.display(), e)))
    }

    /// Save to the default location and return the path written.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::default_path()
            .ok_or_else(|| PrecisError::ConfigError("no configuration directory on this platform".to_string()))?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Validate and store an API key.
    pub fn set_api_key(&mut self, key: &str) -> Result<()> {
        self.gemini_api_key = Some(validate_api_key(key)?);
        Ok(())
    }

    /// The key to use: `env_key` when non-empty, else the stored key.
    pub fn api_key(&self, env_key: Option<&str>) -> Result<String> {
        env_key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .or_else(|| self.gemini_api_key.clone().filter(|key| !key.is_empty()))
            .ok_or(PrecisError::MissingApiKey)
    }

    /// Like [`Settings::api_key`], reading `GEMINI_API_KEY` from the environment.
    pub fn resolve_api_key(&self) -> Result<String> {
        self.api_key(std::env::var(API_KEY_ENV).ok().as_deref())
    }

    /// Overlay stored overrides onto `config`.
    pub fn apply(&self, mut config: SummaryConfig) -> SummaryConfig {
        if let Some(model) = &self.model {
            config.model.clone_from(model);
        }
        if let Some(temperature) = self.temperature {
            config.temperature = temperature;
        }
        if let Some(max_text_length) = self.max_text_length {
            config.max_text_length = max_text_length;
        }
        if let Some(endpoint) = &self.endpoint {
            config.endpoint.clone_from(endpoint);
        }
        config
    }
}

/// Trim `key` and check it looks like a Gemini key.
pub fn validate_api_key(key: &str) -> Result<String> {
    let key = key.trim();
    if key.is_empty() {
        return Err(PrecisError::InvalidApiKey("Please enter a valid API key".to_string()));
    }

    if !key.starts_with(API_KEY_PREFIX) {
        return Err(PrecisError::InvalidApiKey(
            "This doesn't look like a valid Gemini API key. Gemini API keys typically start with \"AIza\". \
             Please verify your API key."
                .to_string(),
        ));
    }

    Ok(key.to_string())
}

/// Show only the ends of a key.
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 8), tail)
}
