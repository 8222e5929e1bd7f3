//! Secondary provider: OpenAI-style chat completion

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{api_failure, read_json, TextTranslator};
use crate::core::config::GatewayConfig;
use crate::core::errors::ProviderFailure;
use crate::core::prompt::translation_instruction;

/// Chat-completion client (system instruction + user text)
#[derive(Debug, Clone)]
pub struct ChatCompletionTranslator {
    client: reqwest::Client,
    api_token: String,
    endpoint: String,
    model: String,
}

impl ChatCompletionTranslator {
    /// Create a translator sharing `client`
    pub fn new(
        client: reqwest::Client,
        api_token: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_token: api_token.into(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    /// Create from the gateway configuration
    pub fn from_config(client: reqwest::Client, config: &GatewayConfig) -> Self {
        Self::new(
            client,
            config.chat_api_token.clone(),
            config.chat_endpoint.clone(),
            config.chat_model.clone(),
        )
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.endpoint.trim_end_matches('/'))
    }
}

fn extract_content(json: &Value) -> Option<String> {
    json["choices"]
        .get(0)
        .and_then(|c| c["message"]["content"].as_str())
        .map(|s| s.to_string())
}

#[async_trait]
impl TextTranslator for ChatCompletionTranslator {
    fn name(&self) -> &str {
        "chat-completion"
    }

    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderFailure> {
        if self.api_token.is_empty() {
            return Err(ProviderFailure::MissingCredential {
                provider: self.name().to_string(),
            });
        }

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": translation_instruction(target_language) },
                { "role": "user", "content": text }
            ]
        });

        debug!("Calling {} model {}", self.name(), self.model);

        let response = self
            .client
            .post(self.url())
            .header("Authorization", format!("Bearer {}", self.api_token))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_failure(response).await);
        }

        let json = read_json(response).await?;

        extract_content(&json).ok_or_else(|| ProviderFailure::InvalidResponse {
            message: "No choices[0].message.content in response".to_string(),
        })
    }
}
