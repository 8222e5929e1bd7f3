//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Default endpoint for the generative-text provider
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default generative-text model
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
/// Default endpoint for the chat-completion provider
pub const DEFAULT_CHAT_ENDPOINT: &str = "https://burn.hair/v1";
/// Default chat-completion model
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o";

/// Gateway configuration, built once at startup and shared read-only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// API key for the primary provider
    pub gemini_api_key: String,
    /// Base URL of the primary provider
    pub gemini_endpoint: String,
    /// Primary model id
    pub gemini_model: String,
    /// Bearer token for the secondary provider
    pub chat_api_token: String,
    /// Base URL of the secondary provider
    pub chat_endpoint: String,
    /// Secondary model id
    pub chat_model: String,
    /// Per-request timeout; `None` leaves the transport default in place
    pub timeout_ms: Option<u64>,
    /// Treat empty/whitespace provider output as a failure (off: it counts as success)
    pub reject_empty_output: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: String::new(),
            gemini_endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            chat_api_token: String::new(),
            chat_endpoint: DEFAULT_CHAT_ENDPOINT.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            timeout_ms: None,
            reject_empty_output: false,
        }
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup; unparsable values warn and keep the default
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str, default: String| lookup(key).unwrap_or(default);

        let timeout_ms = match lookup("REQUEST_TIMEOUT_MS").as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => match value.parse::<u64>() {
                Ok(ms) => Some(ms),
                Err(e) => {
                    warn!("Ignoring REQUEST_TIMEOUT_MS={:?}: {}", value, e);
                    None
                }
            },
        };

        let reject_empty_output = match lookup("REJECT_EMPTY_OUTPUT") {
            None => defaults.reject_empty_output,
            Some(value) => parse_flag(&value).unwrap_or_else(|| {
                warn!("Ignoring REJECT_EMPTY_OUTPUT={:?}: expected a boolean", value);
                defaults.reject_empty_output
            }),
        };

        Self {
            gemini_api_key: text("GEMINI_API_KEY", defaults.gemini_api_key),
            gemini_endpoint: text("GEMINI_API_ENDPOINT", defaults.gemini_endpoint),
            gemini_model: text("GEMINI_MODEL", defaults.gemini_model),
            chat_api_token: text("BURN_HAIR_API_TOKEN", defaults.chat_api_token),
            chat_endpoint: text("CHAT_API_ENDPOINT", defaults.chat_endpoint),
            chat_model: text("CHAT_MODEL", defaults.chat_model),
            timeout_ms,
            reject_empty_output,
        }
    }

    /// Load from JSON file; absent keys take their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    ///
    /// Missing credentials only warn: they surface later as provider failures.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.gemini_endpoint.is_empty() || self.chat_endpoint.is_empty() {
            return Err(anyhow::anyhow!("Provider endpoints are required"));
        }

        if self.gemini_model.is_empty() || self.chat_model.is_empty() {
            return Err(anyhow::anyhow!("Provider models are required"));
        }

        if self.timeout_ms == Some(0) {
            return Err(anyhow::anyhow!("timeout_ms must be greater than 0"));
        }

        if self.gemini_api_key.is_empty() {
            warn!("GEMINI_API_KEY is not set, primary provider will fail");
        }

        if self.chat_api_token.is_empty() {
            warn!("BURN_HAIR_API_TOKEN is not set, fallback provider will fail");
        }

        Ok(())
    }
}

/// Usual boolean spellings, case-insensitive; `None` when unrecognized
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
