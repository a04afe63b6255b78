// Brand Factory Engine — OpenAI-Compatible Provider
// Handles: OpenAI, OpenRouter, Ollama, and any OpenAI-compatible REST API.
// Implements the TextGenerator trait with a single non-streaming
// /chat/completions call. Failures are surfaced, never retried.

use async_trait::async_trait;
use log::{error, info};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

use crate::atoms::error::{EngineError, EngineResult};
use crate::atoms::traits::TextGenerator;
use crate::atoms::types::{Message, ProviderConfig, ResponseFormat};

/// Cut `s` to at most `max_bytes` without splitting a UTF-8 character.
pub(crate) fn truncate_utf8(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Shared client factory for chat and transcription requests.
pub(crate) fn build_client(config: &ProviderConfig) -> EngineResult<Client> {
    Ok(Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(config.timeout_secs.max(1)))
        .build()?)
}

// ── OpenAI provider struct ─────────────────────────────────────────────────

pub struct OpenAiProvider {
    client: Client,
    name: &'static str,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiProvider {
    pub fn new(config: &ProviderConfig) -> EngineResult<Self> {
        Ok(OpenAiProvider {
            client: build_client(config)?,
            name: config.kind.name(),
            base_url: config.resolved_base_url(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    fn request_body(&self, messages: &[Message], format: ResponseFormat) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": messages,
        });
        if format == ResponseFormat::JsonObject {
            body["response_format"] = json!({"type": "json_object"});
        }
        body
    }

    /// Pull the assistant text out of a chat completion response.
    fn extract_content(v: &Value) -> EngineResult<String> {
        let choice = v["choices"]
            .get(0)
            .ok_or_else(|| EngineError::parse("completion has no choices"))?;
        choice["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| {
                let reason = choice["finish_reason"].as_str().unwrap_or("unknown");
                EngineError::parse(format!("completion has no text content (finish_reason={})", reason))
            })
    }
}

// ── TextGenerator implementation ───────────────────────────────────────────

#[async_trait]
impl TextGenerator for OpenAiProvider {
    fn name(&self) -> &str {
        self.name
    }

    async fn generate(&self, messages: &[Message], format: ResponseFormat) -> EngineResult<String> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = self.request_body(messages, format);

        info!(
            "[provider] {} request to {} model={} messages={} format={:?}",
            self.name,
            url,
            self.model,
            messages.len(),
            format
        );

        let mut req = self.client.post(&url).header("Content-Type", "application/json");
        if !self.api_key.is_empty() {
            req = req.header("Authorization", format!("Bearer {}", self.api_key));
        }

        let response = req
            .json(&body)
            .send()
            .await
            .map_err(|e| EngineError::service(self.name, format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            error!(
                "[provider] {} error {}: {}",
                self.name,
                status.as_u16(),
                truncate_utf8(&body_text, 500)
            );
            return Err(EngineError::service(
                self.name,
                format!("API error {}: {}", status.as_u16(), truncate_utf8(&body_text, 200)),
            ));
        }

        let v: Value = response
            .json()
            .await
            .map_err(|e| EngineError::parse(format!("completion is not JSON: {}", e)))?;
        Self::extract_content(&v)
    }
}
