// Brand Factory Engine — Service Provider Registry
// Builds the concrete text-generation and transcription clients from
// configuration and hands them out type-erased behind Arc<dyn Trait>, so
// engine components never know which backend is in use.

pub mod openai;
pub mod whisper;

pub use openai::OpenAiProvider;
pub use whisper::WhisperTranscriber;

use std::sync::Arc;

use log::info;

use crate::atoms::error::{EngineError, EngineResult};
use crate::atoms::traits::{AudioTranscriber, TextGenerator};
use crate::atoms::types::{ProviderConfig, ProviderKind};

// ── Provider factory ───────────────────────────────────────────────────────

/// Reject configurations that cannot produce a working client.
fn check_config(config: &ProviderConfig) -> EngineResult<()> {
    if config.kind.requires_api_key() && config.api_key.trim().is_empty() {
        return Err(EngineError::config(format!(
            "provider '{}' needs an API key (set provider.api_key or OPENAI_API_KEY)",
            config.kind.name()
        )));
    }
    if config.resolved_base_url().trim().is_empty() {
        return Err(EngineError::config(format!(
            "provider '{}' needs provider.base_url",
            config.kind.name()
        )));
    }
    if config.model.trim().is_empty() {
        return Err(EngineError::config("provider.model must not be empty"));
    }
    Ok(())
}

/// Construct the text generator for a `ProviderConfig`.
///
/// Every supported kind speaks the OpenAI chat wire format, so one client
/// type covers them all; the kind only picks the base URL and key rules.
pub fn text_generator(config: &ProviderConfig) -> EngineResult<Arc<dyn TextGenerator>> {
    check_config(config)?;
    info!(
        "[provider] text generation via {} ({})",
        config.kind.name(),
        config.model
    );
    Ok(Arc::new(OpenAiProvider::new(config)?))
}

/// Construct the audio transcriber, if the backend offers one.
/// Ollama has no transcription endpoint, so audio turns are disabled there.
pub fn transcriber(config: &ProviderConfig) -> EngineResult<Option<Arc<dyn AudioTranscriber>>> {
    if config.kind == ProviderKind::Ollama {
        info!("[provider] ollama has no transcription endpoint; audio input disabled");
        return Ok(None);
    }
    check_config(config)?;
    if config.transcription_model.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(Arc::new(WhisperTranscriber::new(config)?)))
}
