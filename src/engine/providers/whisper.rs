// Brand Factory Engine — Whisper Transcription
// Multipart upload to the OpenAI-compatible /audio/transcriptions endpoint.

use async_trait::async_trait;
use log::{error, info};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;

use crate::atoms::error::{EngineError, EngineResult};
use crate::atoms::traits::AudioTranscriber;
use crate::atoms::types::{AudioClip, ProviderConfig};
use crate::engine::providers::openai::{build_client, truncate_utf8};

const SERVICE: &str = "whisper";

pub struct WhisperTranscriber {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    language: Option<String>,
}

impl WhisperTranscriber {
    pub fn new(config: &ProviderConfig) -> EngineResult<Self> {
        Ok(WhisperTranscriber {
            client: build_client(config)?,
            base_url: config.resolved_base_url(),
            api_key: config.api_key.clone(),
            model: config.transcription_model.clone(),
            language: config.language.clone().filter(|l| !l.trim().is_empty()),
        })
    }
}

#[async_trait]
impl AudioTranscriber for WhisperTranscriber {
    fn name(&self) -> &str {
        SERVICE
    }

    async fn transcribe(&self, clip: &AudioClip) -> EngineResult<String> {
        if clip.bytes.is_empty() {
            return Err(EngineError::validation("audio clip is empty"));
        }

        let file_part = Part::bytes(clip.bytes.clone())
            .file_name(clip.file_name.clone())
            .mime_str(clip.mime_type())
            .map_err(|e| EngineError::service(SERVICE, format!("MIME error: {}", e)))?;

        let mut form = Form::new().text("model", self.model.clone()).part("file", file_part);
        if let Some(lang) = &self.language {
            form = form.text("language", lang.clone());
        }

        info!(
            "[provider] whisper transcribing {} ({} bytes, model={})",
            clip.file_name,
            clip.bytes.len(),
            self.model
        );

        let resp = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url.trim_end_matches('/')))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|e| EngineError::service(SERVICE, format!("request failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            error!("[provider] whisper error {}: {}", status.as_u16(), truncate_utf8(&body, 500));
            return Err(EngineError::service(
                SERVICE,
                format!("API error {}: {}", status.as_u16(), truncate_utf8(&body, 200)),
            ));
        }

        let result: Value = resp
            .json()
            .await
            .map_err(|e| EngineError::parse(format!("transcription is not JSON: {}", e)))?;

        result["text"]
            .as_str()
            .map(|s| s.trim().to_string())
            .ok_or_else(|| EngineError::parse("transcription has no text"))
    }
}
