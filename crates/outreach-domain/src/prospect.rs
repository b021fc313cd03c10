//! Prospect module - the inputs describing who to write to

use std::fmt;

/// Reasons a prospect query is rejected before any generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProspectError {
    /// The person's name is missing or blank
    MissingName,

    /// None of the reference URLs (LinkedIn, company site, X) was supplied
    MissingReference,
}

impl fmt::Display for ProspectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProspectError::MissingName => write!(f, "Please provide the person's name."),
            ProspectError::MissingReference => write!(
                f,
                "Please provide at least one of: LinkedIn URL, Company Website, or X Profile URL."
            ),
        }
    }
}

impl std::error::Error for ProspectError {}

/// Everything the user tells us about a prospect for a single request
///
/// Ephemeral: built per request, snapshotted into the request log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProspectQuery {
    /// Full name of the prospect (required)
    pub person_name: String,

    /// LinkedIn profile URL
    pub linkedin_url: Option<String>,

    /// Company website
    pub company_website: Option<String>,

    /// X (Twitter) profile URL
    pub x_profile_url: Option<String>,

    /// Transcript of earlier conversation with the prospect
    pub past_conversation: Option<String>,

    /// Free-text style instructions appended to the prompt
    pub custom_instructions: Option<String>,

    /// Target maximum words per email; `None` uses the generator default
    pub word_limit: Option<u32>,
}

impl ProspectQuery {
    /// Create a query for the named person with no references yet
    pub fn new(person_name: impl Into<String>) -> Self {
        Self {
            person_name: person_name.into(),
            ..Self::default()
        }
    }

    /// Set the LinkedIn profile URL
    pub fn with_linkedin(mut self, url: impl Into<String>) -> Self {
        self.linkedin_url = Some(url.into());
        self
    }

    /// Set the company website
    pub fn with_company_website(mut self, url: impl Into<String>) -> Self {
        self.company_website = Some(url.into());
        self
    }

    /// Set the X profile URL
    pub fn with_x_profile(mut self, url: impl Into<String>) -> Self {
        self.x_profile_url = Some(url.into());
        self
    }

    /// Attach a past conversation transcript
    pub fn with_past_conversation(mut self, transcript: impl Into<String>) -> Self {
        self.past_conversation = Some(transcript.into());
        self
    }

    /// Attach custom style instructions
    pub fn with_custom_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.custom_instructions = Some(instructions.into());
        self
    }

    /// Set the word limit
    pub fn with_word_limit(mut self, limit: u32) -> Self {
        self.word_limit = Some(limit);
        self
    }

    /// Trimmed LinkedIn URL, `None` when absent or blank
    pub fn linkedin(&self) -> Option<&str> {
        non_blank(&self.linkedin_url)
    }

    /// Trimmed company website, `None` when absent or blank
    pub fn company(&self) -> Option<&str> {
        non_blank(&self.company_website)
    }

    /// Trimmed X profile URL, `None` when absent or blank
    pub fn x_profile(&self) -> Option<&str> {
        non_blank(&self.x_profile_url)
    }

    /// Trimmed past conversation, `None` when absent or blank
    pub fn conversation(&self) -> Option<&str> {
        non_blank(&self.past_conversation)
    }

    /// Trimmed custom instructions, `None` when absent or blank
    pub fn instructions(&self) -> Option<&str> {
        non_blank(&self.custom_instructions)
    }

    /// Check the query invariant: a name plus at least one reference
    ///
    /// # Examples
    ///
    /// ```
    /// use outreach_domain::{ProspectError, ProspectQuery};
    ///
    /// let query = ProspectQuery::new("Jane Doe");
    /// assert_eq!(query.validate(), Err(ProspectError::MissingReference));
    ///
    /// let query = query.with_company_website("https://example.com");
    /// assert!(query.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), ProspectError> {
        if self.person_name.trim().is_empty() {
            return Err(ProspectError::MissingName);
        }
        if self.linkedin().is_none() && self.company().is_none() && self.x_profile().is_none() {
            return Err(ProspectError::MissingReference);
        }
        Ok(())
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
