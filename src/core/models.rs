//! Core data models for translation

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::errors::{Result, TranslationError};

/// Position of the provider that produced a translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderRole {
    /// First provider in the chain
    Primary,
    /// Any provider after the first
    Fallback,
}

impl ProviderRole {
    /// Role for the provider at `index` in the fallback chain
    pub fn from_position(index: usize) -> Self {
        if index == 0 {
            ProviderRole::Primary
        } else {
            ProviderRole::Fallback
        }
    }
}

impl fmt::Display for ProviderRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderRole::Primary => write!(f, "primary"),
            ProviderRole::Fallback => write!(f, "fallback"),
        }
    }
}

/// Translation request
///
/// Fields are optional on the wire so that a missing field is reported as an
/// invalid request instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    /// Text to translate
    #[serde(default)]
    pub original_text: Option<String>,
    /// Language to translate into, free-form (e.g. "French")
    #[serde(default)]
    pub target_language: Option<String>,
}

impl TranslationRequest {
    /// Build a request with both fields present
    pub fn new(original_text: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            original_text: Some(original_text.into()),
            target_language: Some(target_language.into()),
        }
    }

    /// Returns `(original_text, target_language)` when both are non-empty
    pub fn validate(&self) -> Result<(&str, &str)> {
        match (
            self.original_text.as_deref(),
            self.target_language.as_deref(),
        ) {
            (Some(text), Some(lang)) if !text.is_empty() && !lang.is_empty() => Ok((text, lang)),
            _ => Err(TranslationError::InvalidRequest),
        }
    }
}

/// Translation result returned by the fallback chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    /// Source text, echoed unchanged
    pub original_text: String,
    /// Provider output, unmodified
    pub translated_text: String,
    /// Target language, echoed unchanged
    pub target_language: String,
    /// Which provider produced the translation
    pub provider: ProviderRole,
}

/// Result of a single-provider translation (no fallback, no provider tag)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleProviderResult {
    /// Source text, echoed unchanged
    pub original_text: String,
    /// Target language, echoed unchanged
    pub target_language: String,
    /// Provider output, unmodified
    pub translated_text: String,
}
