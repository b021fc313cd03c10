//! Result types for generation

use crate::parser::MAX_EMAILS;
use outreach_domain::{EmailRecord, EntryId, Resource, TokenUsage};

/// What happened when the request was written to the log
///
/// A failed write does not undo the generation: the emails are still
/// returned and the failure is reported separately.
#[derive(Debug, Clone, PartialEq)]
pub enum LogOutcome {
    /// Entry recorded under this id
    Recorded(EntryId),

    /// Entry could not be written
    Failed(String),
}

impl LogOutcome {
    /// The entry id, if the write succeeded
    pub fn entry_id(&self) -> Option<&EntryId> {
        match self {
            LogOutcome::Recorded(id) => Some(id),
            LogOutcome::Failed(_) => None,
        }
    }
}

/// Result of a successful generation request
#[derive(Debug, Clone)]
pub struct OutreachResult {
    /// Parsed emails in angle order; may hold fewer than three
    pub emails: Vec<EmailRecord>,

    /// Research sources, deduplicated by URL
    pub resources: Vec<Resource>,

    /// Token accounting for the call
    pub token_usage: TokenUsage,

    /// Model that produced the response
    pub model: String,

    /// Request log outcome
    pub log: LogOutcome,
}

impl OutreachResult {
    /// True when all requested emails were parsed
    pub fn is_complete(&self) -> bool {
        self.emails.len() == MAX_EMAILS
    }
}
