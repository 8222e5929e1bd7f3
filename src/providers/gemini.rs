//! Primary provider: generative-text API driven by a single composed prompt

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{api_failure, read_json, TextTranslator};
use crate::core::config::GatewayConfig;
use crate::core::errors::ProviderFailure;
use crate::core::prompt::compose_prompt;

/// Gemini `generateContent` client
#[derive(Debug, Clone)]
pub struct GeminiTranslator {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl GeminiTranslator {
    /// Create a translator sharing `client`
    pub fn new(
        client: reqwest::Client,
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    /// Create from the gateway configuration
    pub fn from_config(client: reqwest::Client, config: &GatewayConfig) -> Self {
        Self::new(
            client,
            config.gemini_api_key.clone(),
            config.gemini_endpoint.clone(),
            config.gemini_model.clone(),
        )
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

/// Concatenated text parts of the first candidate
fn extract_text(json: &Value) -> Option<String> {
    let parts = json["candidates"].get(0)?["content"]["parts"].as_array()?;
    let texts: Vec<&str> = parts.iter().filter_map(|p| p["text"].as_str()).collect();

    if texts.is_empty() {
        None
    } else {
        Some(texts.concat())
    }
}

#[async_trait]
impl TextTranslator for GeminiTranslator {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderFailure> {
        if self.api_key.is_empty() {
            return Err(ProviderFailure::MissingCredential {
                provider: self.name().to_string(),
            });
        }

        let body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": compose_prompt(text, target_language) }]
            }]
        });

        debug!("Calling {} model {}", self.name(), self.model);

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_failure(response).await);
        }

        let json = read_json(response).await?;

        extract_text(&json).ok_or_else(|| ProviderFailure::InvalidResponse {
            message: "No candidate text in response".to_string(),
        })
    }
}
