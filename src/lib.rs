//! Translation Gateway - HTTP relay in front of language-model providers
//!
//! A translation request is validated, sent to a primary generative-text provider,
//! and retried once against a chat-completion provider if the primary fails.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;
pub mod providers;
pub mod server;

// Re-export key types for convenience
pub use crate::core::{
    config::GatewayConfig,
    errors::{FailedAttempt, ProviderFailure, TranslationError},
    gateway::TranslationGateway,
    models::{ProviderRole, SingleProviderResult, TranslationRequest, TranslationResult},
};

pub use crate::providers::{ChatCompletionTranslator, GeminiTranslator, TextTranslator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
