// ── Brand Factory Atoms: Pure Data Types ───────────────────────────────────
// Plain struct/enum definitions shared by the engine and commands.
// Atoms layer rule: no I/O, no side effects, no imports from engine/.

use std::fmt;

use brandfactory_core::{ChatRole, ChatTurn};
use serde::{Deserialize, Serialize};

use crate::atoms::constants::{
    DEFAULT_MODEL, DEFAULT_SCRIPT_TEMPLATE, DEFAULT_TIMEOUT_SECS, DEFAULT_TRANSCRIPTION_MODEL,
};

// ── Provider configuration ─────────────────────────────────────────────────

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    /// Falls back to the `OPENAI_API_KEY` environment variable when empty.
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: String,
    pub transcription_model: String,
    /// ISO-639-1 hint for transcription; auto-detected when unset.
    pub language: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::OpenAI,
            api_key: String::new(),
            base_url: None,
            model: DEFAULT_MODEL.to_string(),
            transcription_model: DEFAULT_TRANSCRIPTION_MODEL.to_string(),
            language: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ProviderConfig {
    pub fn resolved_base_url(&self) -> String {
        self.base_url
            .clone()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| self.kind.default_base_url().to_string())
    }

    /// API key with everything but the last four characters hidden.
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        match chars.len() {
            0 => "(not set)".to_string(),
            n if n <= 4 => "****".to_string(),
            n => format!("****{}", chars[n - 4..].iter().collect::<String>()),
        }
    }
}

// Hand-written so the key never reaches logs through `{:?}`.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field("api_key", &self.masked_api_key())
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("transcription_model", &self.transcription_model)
            .field("language", &self.language)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// OpenAI-compatible backends. All share the `/chat/completions` and
/// `/audio/transcriptions` wire format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    OpenAI,
    OpenRouter,
    Ollama,
    Custom,
}

impl ProviderKind {
    pub fn default_base_url(&self) -> &str {
        match self {
            ProviderKind::OpenAI => "https://api.openai.com/v1",
            ProviderKind::OpenRouter => "https://openrouter.ai/api/v1",
            ProviderKind::Ollama => "http://localhost:11434/v1",
            ProviderKind::Custom => "",
        }
    }

    /// Local backends run without a key.
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, ProviderKind::Ollama)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::OpenRouter => "openrouter",
            ProviderKind::Ollama => "ollama",
            ProviderKind::Custom => "custom",
        }
    }
}

// ── Operator configuration ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InterviewConfig {
    /// Extra discovery questions asked after the mandatory ones.
    pub custom_questions: Vec<String>,
    /// When false, custom questions are kept but left out of the prompt.
    pub use_custom_questions: bool,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self { custom_questions: Vec::new(), use_custom_questions: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// Must contain `{profile_str}` and `{idea_str}`.
    pub template: String,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self { template: DEFAULT_SCRIPT_TEMPLATE.to_string() }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    pub provider: ProviderConfig,
    pub interview: InterviewConfig,
    pub scripts: ScriptConfig,
}

// ── Service wire types ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

impl From<&ChatTurn> for Message {
    fn from(turn: &ChatTurn) -> Self {
        let role = match turn.role {
            ChatRole::User => Role::User,
            ChatRole::Assistant => Role::Assistant,
        };
        Self { role, content: turn.content.clone() }
    }
}

/// Whether the service must answer with a JSON object or free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Text,
    JsonObject,
}

/// An uploaded audio clip awaiting transcription.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl AudioClip {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), bytes }
    }

    /// MIME type from the file extension; unknown extensions are sent as mp3.
    pub fn mime_type(&self) -> &'static str {
        let ext = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "wav" => "audio/wav",
            "m4a" => "audio/mp4",
            "mp4" => "audio/mp4",
            "webm" => "audio/webm",
            "ogg" => "audio/ogg",
            _ => "audio/mpeg",
        }
    }
}
