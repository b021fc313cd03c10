//! Email module - parsed email variants

use serde::{Deserialize, Serialize};

/// The persuasive framing requested for each email slot, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Angle {
    /// Trends and challenges in the prospect's industry
    Industry,

    /// The prospect's company, products and initiatives
    Company,

    /// The prospect personally: role, posts, perspective
    Personal,
}

impl Angle {
    /// All angles in prompt order
    pub const ALL: [Angle; 3] = [Angle::Industry, Angle::Company, Angle::Personal];

    /// Angle for the email at `index` (0-based), if any
    pub fn for_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human-readable label
    pub fn as_str(&self) -> &'static str {
        match self {
            Angle::Industry => "industry",
            Angle::Company => "company",
            Angle::Personal => "personal",
        }
    }
}

/// One generated email
///
/// Created by the response parser and never mutated afterwards. The subject
/// is empty when the model's output carried no `SUBJECT:` marker.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmailRecord {
    /// Subject line (possibly empty)
    pub subject: String,

    /// Email body
    pub body: String,
}

impl EmailRecord {
    /// Create a new email record
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Full text in the form a user would paste into a mail client
    ///
    /// ```
    /// use outreach_domain::EmailRecord;
    ///
    /// let email = EmailRecord::new("Hello", "Body text");
    /// assert_eq!(email.to_plain_text(), "Subject: Hello\n\nBody text");
    /// ```
    pub fn to_plain_text(&self) -> String {
        format!("Subject: {}\n\n{}", self.subject, self.body)
    }
}
