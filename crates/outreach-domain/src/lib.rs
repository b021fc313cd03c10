//! Outreach Domain Layer
//!
//! This crate holds the value types and trait seams shared by every other
//! crate in the workspace. It performs no I/O.
//!
//! ## Key Concepts
//!
//! - **ProspectQuery**: who to research, and how the emails should read
//! - **GenerationResult**: raw model text, token counts and opaque grounding metadata
//! - **EmailRecord**: one parsed email (subject + body), one per angle
//! - **Resource**: a deduplicated source citation recovered from grounding metadata
//! - **LogEntry**: one persisted generation request plus later human feedback
//!
//! ## Architecture
//!
//! - Pure data and validation only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for the generation gateway and the request log

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod email;
pub mod entry;
pub mod generation;
pub mod prospect;
pub mod resource;
pub mod traits;

// Re-exports for convenience
pub use email::{Angle, EmailRecord};
pub use entry::{
    EntryId, FeedbackRecord, InputSnapshot, LogEntry, OutputSnapshot, FEEDBACK_SLOTS,
};
pub use generation::{EffortLevel, GenerationResult, TokenUsage};
pub use prospect::{ProspectError, ProspectQuery};
pub use resource::Resource;
