//! Upstream language-model providers

pub mod chat;
pub mod gemini;

use async_trait::async_trait;
use std::time::Duration;

use crate::core::config::GatewayConfig;
use crate::core::errors::{ProviderFailure, Result};

pub use chat::ChatCompletionTranslator;
pub use gemini::GeminiTranslator;

/// A provider able to translate a text into a target language
#[async_trait]
pub trait TextTranslator: Send + Sync {
    /// Provider name used in logs
    fn name(&self) -> &str;

    /// Translate `text` into `target_language`, returning the raw provider output
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> std::result::Result<String, ProviderFailure>;
}

/// Build the HTTP client shared by all providers
pub fn build_http_client(config: &GatewayConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .pool_idle_timeout(Some(Duration::from_secs(30)))
        .pool_max_idle_per_host(10);

    if let Some(timeout_ms) = config.timeout_ms {
        builder = builder.timeout(Duration::from_millis(timeout_ms));
    }

    Ok(builder.build()?)
}

/// Turn a non-2xx response into an `Api` failure, consuming the body
async fn api_failure(response: reqwest::Response) -> ProviderFailure {
    let status = response.status().as_u16();
    let message = match response.text().await {
        Ok(body) => body,
        Err(e) => format!("<unreadable body: {}>", e),
    };
    ProviderFailure::Api { status, message }
}

/// Read a 2xx response body as JSON
async fn read_json(
    response: reqwest::Response,
) -> std::result::Result<serde_json::Value, ProviderFailure> {
    response.json().await.map_err(|e| {
        if e.is_decode() {
            ProviderFailure::InvalidResponse {
                message: e.to_string(),
            }
        } else {
            ProviderFailure::from(e)
        }
    })
}
