//! Translation gateway with sequential provider fallback

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::core::config::GatewayConfig;
use crate::core::errors::{FailedAttempt, ProviderFailure, Result, TranslationError};
use crate::core::models::{ProviderRole, SingleProviderResult, TranslationRequest, TranslationResult};
use crate::providers::{build_http_client, ChatCompletionTranslator, GeminiTranslator, TextTranslator};

/// Owns the provider chain and shapes results
#[derive(Clone)]
pub struct TranslationGateway {
    translators: Vec<Arc<dyn TextTranslator>>,
    reject_empty_output: bool,
}

impl std::fmt::Debug for TranslationGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationGateway")
            .field(
                "translators",
                &self.translators.iter().map(|t| t.name()).collect::<Vec<_>>(),
            )
            .field("reject_empty_output", &self.reject_empty_output)
            .finish()
    }
}

impl TranslationGateway {
    /// Create a gateway trying `translators` in order
    pub fn new(translators: Vec<Arc<dyn TextTranslator>>) -> Self {
        Self {
            translators,
            reject_empty_output: false,
        }
    }

    /// Whether empty/whitespace output counts as a provider failure
    pub fn with_empty_output_rejection(mut self, reject: bool) -> Self {
        self.reject_empty_output = reject;
        self
    }

    /// Wire the primary (Gemini) and fallback (chat completion) providers
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let client = build_http_client(config)?;

        let translators: Vec<Arc<dyn TextTranslator>> = vec![
            Arc::new(GeminiTranslator::from_config(client.clone(), config)),
            Arc::new(ChatCompletionTranslator::from_config(client, config)),
        ];

        Ok(Self::new(translators).with_empty_output_rejection(config.reject_empty_output))
    }

    /// Names of the providers, in attempt order
    pub fn provider_names(&self) -> Vec<&str> {
        self.translators.iter().map(|t| t.name()).collect()
    }

    /// Translate with fallback across the whole chain
    pub async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        let (text, target_language) = request.validate()?;

        let (index, translated_text) = self
            .try_in_order(&self.translators, text, target_language)
            .await?;

        Ok(TranslationResult {
            original_text: text.to_string(),
            translated_text,
            target_language: target_language.to_string(),
            provider: ProviderRole::from_position(index),
        })
    }

    /// Translate with the primary provider only, no fallback
    pub async fn translate_with_primary(
        &self,
        request: &TranslationRequest,
    ) -> Result<SingleProviderResult> {
        let (text, target_language) = request.validate()?;
        let primary = self.translators.first().map(std::slice::from_ref).unwrap_or(&[]);

        let (_, translated_text) = self.try_in_order(primary, text, target_language).await?;

        Ok(SingleProviderResult {
            original_text: text.to_string(),
            target_language: target_language.to_string(),
            translated_text,
        })
    }

    /// Try each translator in turn; the next is only called after the previous failed.
    ///
    /// Attempt detail goes to the log. The returned error keeps it for the operator,
    /// callers only ever see the error's display message.
    async fn try_in_order(
        &self,
        translators: &[Arc<dyn TextTranslator>],
        text: &str,
        target_language: &str,
    ) -> Result<(usize, String)> {
        let mut attempts = Vec::new();

        for (index, translator) in translators.iter().enumerate() {
            match self.attempt(translator.as_ref(), text, target_language).await {
                Ok(output) => {
                    if index > 0 {
                        info!(
                            "Translated with fallback provider {} after {} failed attempt(s)",
                            translator.name(),
                            attempts.len()
                        );
                    }
                    return Ok((index, output));
                }
                Err(e) => {
                    warn!("Provider {} failed: {}", translator.name(), e);
                    attempts.push(FailedAttempt {
                        provider: translator.name().to_string(),
                        error: e,
                    });
                }
            }
        }

        let err = TranslationError::ProviderError { attempts };
        error!("All providers failed: {}", err.diagnostics());
        Err(err)
    }

    async fn attempt(
        &self,
        translator: &dyn TextTranslator,
        text: &str,
        target_language: &str,
    ) -> std::result::Result<String, ProviderFailure> {
        let output = translator.translate(text, target_language).await?;

        if self.reject_empty_output && output.trim().is_empty() {
            return Err(ProviderFailure::EmptyOutput);
        }

        Ok(output)
    }
}
