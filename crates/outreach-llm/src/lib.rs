//! Outreach Generation Gateway Layer
//!
//! Implementations of the `GenerationGateway` trait from `outreach-domain`.
//!
//! # Gateways
//!
//! - `MockGateway`: Deterministic mock for testing
//! - `GeminiGateway`: Gemini `generateContent` with Google Search grounding
//!
//! # Examples
//!
//! ```
//! use outreach_llm::MockGateway;
//! use outreach_domain::EffortLevel;
//! use outreach_domain::traits::GenerationGateway;
//!
//! let gateway = MockGateway::new("---EMAIL 1---\nSUBJECT: Hi\n\nBody");
//! let result = gateway.generate("test prompt", EffortLevel::Low).unwrap();
//! assert!(result.text.contains("SUBJECT: Hi"));
//! ```

#![warn(missing_docs)]

pub mod gemini;

use outreach_domain::traits::GenerationGateway;
use outreach_domain::{EffortLevel, GenerationResult, TokenUsage};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;

pub use gemini::GeminiGateway;

/// Errors that can occur during generation calls
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or transport failure
    #[error("Communication error: {0}")]
    Communication(String),

    /// The API answered with a non-success status
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message reported by the API
        message: String,
    },

    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// No API key was configured
    #[error("API key not found: set the {0} environment variable")]
    MissingApiKey(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Mock gateway for deterministic testing
///
/// Returns a pre-configured response without making any network calls.
///
/// # Examples
///
/// ```
/// use outreach_llm::MockGateway;
/// use outreach_domain::EffortLevel;
/// use outreach_domain::traits::GenerationGateway;
///
/// let mut gateway = MockGateway::new("text").with_usage(100, 20, None);
/// gateway.fail_on("bad prompt");
///
/// let ok = gateway.generate("good prompt", EffortLevel::High).unwrap();
/// assert_eq!(ok.usage.total, 120);
/// assert!(gateway.generate("bad prompt", EffortLevel::Low).is_err());
/// assert_eq!(gateway.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockGateway {
    text: String,
    usage: TokenUsage,
    grounding_metadata: Option<serde_json::Value>,
    failing_prompts: HashSet<String>,
    fail_all: bool,
    call_count: Arc<AtomicUsize>,
}

impl MockGateway {
    /// Create a mock that answers every prompt with `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            usage: TokenUsage::default(),
            grounding_metadata: None,
            failing_prompts: HashSet::new(),
            fail_all: false,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock whose every call fails
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::new("")
        }
    }

    /// Set the token counts reported with each response
    pub fn with_usage(mut self, input: u64, output: u64, total: Option<u64>) -> Self {
        self.usage = TokenUsage::new(input, output, total);
        self
    }

    /// Set the grounding metadata returned with each response
    pub fn with_grounding(mut self, metadata: serde_json::Value) -> Self {
        self.grounding_metadata = Some(metadata);
        self
    }

    /// Configure to return an error for a specific prompt
    pub fn fail_on(&mut self, prompt: impl Into<String>) {
        self.failing_prompts.insert(prompt.into());
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl GenerationGateway for MockGateway {
    type Error = LlmError;

    fn generate(&self, prompt: &str, _effort: EffortLevel) -> Result<GenerationResult, Self::Error> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if self.fail_all || self.failing_prompts.contains(prompt) {
            return Err(LlmError::Other("Mock error".to_string()));
        }

        Ok(GenerationResult {
            text: self.text.clone(),
            usage: self.usage,
            grounding_metadata: self.grounding_metadata.clone(),
        })
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
