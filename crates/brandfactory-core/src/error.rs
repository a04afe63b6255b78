// ── Brand Factory Core: Error Types ────────────────────────────────────────
// Errors raised by the pure data model. The engine flattens these into its
// own `EngineError` so callers see one taxonomy.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A required input was empty or otherwise unusable.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A profile, topic or idea id does not exist in the store.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// An imported snapshot is malformed or violates a store invariant.
    #[error("Snapshot format error: {0}")]
    Format(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound { kind, id: id.into() }
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
