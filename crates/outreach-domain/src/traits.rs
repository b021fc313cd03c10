//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{EffortLevel, EntryId, GenerationResult, LogEntry};

/// Trait for the search-grounded generative model
///
/// Implemented by the infrastructure layer (outreach-llm)
pub trait GenerationGateway {
    /// Error type for generation calls
    type Error;

    /// Generate a response for `prompt` with web search enabled
    ///
    /// Blocks for the duration of the call. Implementations do not retry.
    fn generate(&self, prompt: &str, effort: EffortLevel)
        -> Result<GenerationResult, Self::Error>;

    /// Name of the model behind this gateway
    fn model_name(&self) -> &str;
}

/// Trait for the append-only request log
///
/// Implemented by the infrastructure layer (outreach-store)
pub trait RequestLog {
    /// Error type for log operations
    type Error;

    /// Append an entry; returns its identifier
    fn append(&self, entry: &LogEntry) -> Result<EntryId, Self::Error>;

    /// Record what was actually sent for one email slot of an existing entry
    ///
    /// Returns `Ok(false)` when no entry has the given id.
    fn attach_feedback(&self, id: &EntryId, slot: usize, text: &str)
        -> Result<bool, Self::Error>;

    /// The last `limit` entries in append order (most recent last)
    fn recent(&self, limit: usize) -> Result<Vec<LogEntry>, Self::Error>;
}
