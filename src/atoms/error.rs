// ── Brand Factory Atoms: Error Types ───────────────────────────────────────
// Single canonical error enum for the engine, built with `thiserror`.
//
// Design rules:
//   • Variants follow the operator-facing taxonomy: validation, not-found,
//     insufficient data, parse, service, snapshot format, configuration.
//   • Core data-model errors are flattened into the matching variant so
//     callers match on one enum.
//   • `EngineError` → `String` conversion goes through `Display` so command
//     boundaries can report it directly.
//   • No variant carries secret material (API keys) in its message.

use brandfactory_core::CoreError;
use thiserror::Error;

// ── Primary error enum ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum EngineError {
    /// A required input was empty or otherwise unusable.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Reference to a profile, topic or idea that does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: String, id: String },

    /// An operation was attempted before the data it needs exists
    /// (too-short interview, no brand DNA yet).
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// A service response was not in the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Text-generation or transcription service failure (network, auth,
    /// quota, malformed request). Never retried.
    #[error("Service error: {service}: {message}")]
    Service { service: String, message: String },

    /// A snapshot document could not be imported.
    #[error("Snapshot format error: {0}")]
    Format(String),

    /// Configuration file is invalid or a required setting is missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or OS-level I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failure on our own data.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP transport failure (reqwest layer).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

// ── Convenience constructors ───────────────────────────────────────────────

impl EngineError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn insufficient(message: impl Into<String>) -> Self {
        Self::InsufficientData(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Create a service error with the collaborator's name and a message.
    pub fn service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Service { service: service.into(), message: message.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ── Conversion: CoreError → EngineError ────────────────────────────────────

impl From<CoreError> for EngineError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Validation(msg) => EngineError::Validation(msg),
            CoreError::NotFound { kind, id } => EngineError::NotFound { kind: kind.to_string(), id },
            CoreError::Format(msg) => EngineError::Format(msg),
        }
    }
}

// ── Convenience alias ──────────────────────────────────────────────────────

/// All engine operations return this type.
/// At command boundaries, convert with `.map_err(|e| e.to_string())`.
pub type EngineResult<T> = Result<T, EngineError>;

// ── Conversion: EngineError → String ──────────────────────────────────────

impl From<EngineError> for String {
    fn from(e: EngineError) -> Self {
        e.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_flatten() {
        let e: EngineError = CoreError::not_found("topic", "topic-1").into();
        assert!(matches!(e, EngineError::NotFound { ref kind, ref id } if kind == "topic" && id == "topic-1"));
        assert_eq!(e.to_string(), "topic not found: topic-1");

        let e: EngineError = CoreError::validation("profile name must not be empty").into();
        assert!(matches!(e, EngineError::Validation(_)));

        let e: EngineError = CoreError::format("bad").into();
        assert!(matches!(e, EngineError::Format(_)));
    }

    #[test]
    fn service_error_message() {
        let e = EngineError::service("openai", "API error 429: quota");
        let s: String = e.into();
        assert_eq!(s, "Service error: openai: API error 429: quota");
    }
}
