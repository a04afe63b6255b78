//! # Brand Factory Core
//!
//! Data model and lifecycle of the Brand Factory state container.
//!
//! ```text
//! ProfileStore ── current_profile_id
//!   └── Profile ── dna, chat_history
//!         └── Topic
//!               └── Idea ── script
//! ```
//!
//! Everything here is synchronous and free of I/O. Network-backed operations
//! (interview turns, DNA extraction, idea and script generation) live in the
//! `brandfactory` engine and mutate these types only after a call succeeds.

pub mod error;
pub mod model;
pub mod navigation;
pub mod snapshot;
pub mod store;

pub use error::{CoreError, CoreResult};
pub use model::*;
pub use navigation::{IdeaRef, Navigation, Stage, TopicRef};
pub use snapshot::SnapshotSummary;
pub use store::ProfileStore;
