//! Request log entries and their identifiers

use crate::{EffortLevel, EmailRecord, ProspectQuery, Resource, TokenUsage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of feedback slots per entry, one per generated email
pub const FEEDBACK_SLOTS: usize = 3;

/// Identifier of a request log entry
///
/// Format: `YYYYMMDD_HHMMSS_ffffff_xxxxxxxx` (UTC, microseconds, 8 hex digits).
/// The time prefix makes identifiers sort chronologically as plain strings;
/// the random suffix keeps two entries created in the same microsecond apart.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Generate a fresh identifier from the current time
    ///
    /// # Examples
    ///
    /// ```
    /// use outreach_domain::EntryId;
    ///
    /// let a = EntryId::generate();
    /// let b = EntryId::generate();
    /// assert_ne!(a, b);
    /// ```
    pub fn generate() -> Self {
        Self::at(Utc::now())
    }

    /// Generate an identifier for a given instant
    pub fn at(instant: DateTime<Utc>) -> Self {
        let random = uuid::Uuid::now_v7().simple().to_string();
        let suffix = &random[random.len() - 8..];
        Self(format!("{}_{}", instant.format("%Y%m%d_%H%M%S_%6f"), suffix))
    }

    /// Wrap an existing identifier string (as read back from the log)
    pub fn from_string(s: &str) -> Result<Self, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Entry id must not be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of the request inputs
///
/// Absent optional fields are stored as empty strings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Prospect name
    pub person_name: String,
    /// LinkedIn URL
    #[serde(default)]
    pub linkedin_url: String,
    /// Company website
    #[serde(default)]
    pub company_website: String,
    /// X profile URL
    #[serde(default)]
    pub x_profile_url: String,
    /// Effective word limit
    #[serde(default)]
    pub word_limit: u32,
    /// Effort level used for generation
    #[serde(default)]
    pub thinking_level: EffortLevel,
    /// Past conversation transcript
    #[serde(default)]
    pub past_conversation: String,
    /// Custom style instructions
    #[serde(default)]
    pub custom_instructions: String,
}

impl InputSnapshot {
    /// Capture a query together with the effective word limit and effort
    pub fn capture(query: &ProspectQuery, word_limit: u32, effort: EffortLevel) -> Self {
        let text = |v: Option<&str>| v.unwrap_or_default().to_string();
        Self {
            person_name: query.person_name.trim().to_string(),
            linkedin_url: text(query.linkedin()),
            company_website: text(query.company()),
            x_profile_url: text(query.x_profile()),
            word_limit,
            thinking_level: effort,
            past_conversation: text(query.conversation()),
            custom_instructions: text(query.instructions()),
        }
    }
}

/// Snapshot of what the generation produced
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutputSnapshot {
    /// Parsed emails (at most three)
    #[serde(default)]
    pub generated_emails: Vec<EmailRecord>,
    /// Token accounting
    #[serde(default)]
    pub token_usage: TokenUsage,
    /// Research sources
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// Human feedback: which text was actually sent for each email slot
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// Text actually sent, per slot
    #[serde(default)]
    pub emails_actually_sent: [Option<String>; FEEDBACK_SLOTS],

    /// When each slot's feedback was recorded
    #[serde(default)]
    pub feedback_timestamps: [Option<DateTime<Utc>>; FEEDBACK_SLOTS],
}

impl FeedbackRecord {
    /// Record feedback for `slot`; returns false when the slot is out of range
    pub fn set(&mut self, slot: usize, text: impl Into<String>, at: DateTime<Utc>) -> bool {
        if slot >= FEEDBACK_SLOTS {
            return false;
        }
        self.emails_actually_sent[slot] = Some(text.into());
        self.feedback_timestamps[slot] = Some(at);
        true
    }

    /// Number of slots with feedback
    pub fn filled(&self) -> usize {
        self.emails_actually_sent.iter().filter(|s| s.is_some()).count()
    }
}

/// One persisted generation request
///
/// Core fields are written once; only `feedback` changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unique identifier
    pub id: EntryId,

    /// When the entry was created
    pub timestamp: DateTime<Utc>,

    /// Request inputs
    pub inputs: InputSnapshot,

    /// Generation outputs
    pub outputs: OutputSnapshot,

    /// Human feedback
    #[serde(default)]
    pub feedback: FeedbackRecord,
}

impl LogEntry {
    /// Create a new entry with a fresh id and empty feedback
    pub fn new(inputs: InputSnapshot, outputs: OutputSnapshot) -> Self {
        let timestamp = Utc::now();
        Self {
            id: EntryId::at(timestamp),
            timestamp,
            inputs,
            outputs,
            feedback: FeedbackRecord::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_entry_id_format() {
        let instant = Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();
        let id = EntryId::at(instant);
        assert!(id.as_str().starts_with("20250314_092653_000000_"));
        assert_eq!(id.as_str().len(), "20250314_092653_000000_".len() + 8);
    }

    #[test]
    fn test_entry_ids_unique_at_same_instant() {
        let instant = Utc::now();
        let a = EntryId::at(instant);
        let b = EntryId::at(instant);
        assert_ne!(a, b);
    }

    #[test]
    fn test_entry_id_from_string() {
        assert!(EntryId::from_string("").is_err());
        assert_eq!(
            EntryId::from_string(" 20240101_000000_000001 ").unwrap().as_str(),
            "20240101_000000_000001"
        );
    }

    #[test]
    fn test_feedback_slots() {
        let mut feedback = FeedbackRecord::default();
        assert!(feedback.set(1, "Hi there", Utc::now()));
        assert!(!feedback.set(3, "nope", Utc::now()));
        assert_eq!(feedback.emails_actually_sent[1].as_deref(), Some("Hi there"));
        assert!(feedback.feedback_timestamps[1].is_some());
        assert!(feedback.emails_actually_sent[0].is_none());
        assert_eq!(feedback.filled(), 1);
    }

    #[test]
    fn test_new_entry_serializes_three_empty_slots() {
        let entry = LogEntry::new(InputSnapshot::default(), OutputSnapshot::default());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json["feedback"]["emails_actually_sent"],
            serde_json::json!([null, null, null])
        );
        assert_eq!(json["id"], serde_json::json!(entry.id.as_str()));
    }

    #[test]
    fn test_capture_blanks_absent_fields() {
        let query = ProspectQuery::new(" Jane ").with_company_website("acme.com");
        let snapshot = InputSnapshot::capture(&query, 150, EffortLevel::High);
        assert_eq!(snapshot.person_name, "Jane");
        assert_eq!(snapshot.company_website, "acme.com");
        assert_eq!(snapshot.linkedin_url, "");
        assert_eq!(snapshot.word_limit, 150);
        assert_eq!(snapshot.thinking_level, EffortLevel::High);
    }
}
