//! Custom error types for translation operations

use std::fmt;

use thiserror::Error;

/// Failure of a single provider attempt.
///
/// These carry the operator-side detail (status codes, upstream bodies, transport
/// messages). They are logged, never returned to HTTP callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderFailure {
    /// Credential for the provider is not configured
    #[error("Missing credential for provider {provider}")]
    MissingCredential {
        /// Provider name
        provider: String,
    },

    /// Transport-level failure (connect, timeout, broken body)
    #[error("Network error: {message}")]
    Network {
        /// Transport error text
        message: String,
    },

    /// Upstream answered with a non-2xx status
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, as received
        message: String,
    },

    /// Upstream answered 2xx but the payload did not have the expected shape
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// What was missing or malformed
        message: String,
    },

    /// Upstream returned an empty or whitespace-only translation
    #[error("Provider returned empty output")]
    EmptyOutput,
}

impl From<reqwest::Error> for ProviderFailure {
    fn from(err: reqwest::Error) -> Self {
        ProviderFailure::Network {
            message: err.to_string(),
        }
    }
}

/// One failed provider attempt inside a fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedAttempt {
    /// Name of the provider that was tried
    pub provider: String,
    /// Why it failed
    pub error: ProviderFailure,
}

impl fmt::Display for FailedAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.provider, self.error)
    }
}

/// Translation-related errors surfaced by the gateway
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Source text or target language missing/empty
    #[error("Text and target language are required")]
    InvalidRequest,

    /// Every provider in the chain failed
    #[error("Failed to translate text")]
    ProviderError {
        /// Per-provider detail, in attempt order
        attempts: Vec<FailedAttempt>,
    },

    /// Shared HTTP client could not be built
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl TranslationError {
    /// Operator-facing summary of the failed attempts, empty for other kinds
    pub fn diagnostics(&self) -> String {
        match self {
            TranslationError::ProviderError { attempts } => attempts
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
            _ => String::new(),
        }
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;
