// Brand Factory — library root.
//
// Layering (dependencies point downward only):
//   commands/  operator actions: resolve selection, delegate, report
//   engine/    interview, extraction, ideas, scripts, providers, config
//   atoms/     constants, error types, service traits, wire/config types
// The data model itself lives in the brandfactory-core crate.

pub mod atoms;
pub mod commands;
pub mod engine;

pub use atoms::error::{EngineError, EngineResult};
pub use atoms::traits::{AudioTranscriber, TextGenerator};
pub use atoms::types::{AudioClip, FactoryConfig, Message, ResponseFormat, Role};
pub use engine::state::FactoryState;
