// ── Brand Factory Atoms: Service Traits ────────────────────────────────────
// The two external collaborators. Engine components depend on these traits
// only; the concrete HTTP clients live in engine/providers.

use async_trait::async_trait;

use crate::atoms::error::EngineResult;
use crate::atoms::types::{AudioClip, Message, ResponseFormat};

/// Text-generation service: ordered role-tagged messages in, one text out.
/// With `ResponseFormat::JsonObject` the text must be a JSON object.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, messages: &[Message], format: ResponseFormat) -> EngineResult<String>;
}

/// Audio transcription service: an uploaded clip in, plain text out.
#[async_trait]
pub trait AudioTranscriber: Send + Sync {
    fn name(&self) -> &str;

    async fn transcribe(&self, clip: &AudioClip) -> EngineResult<String>;
}
