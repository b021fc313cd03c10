//! Error types for the CLI application.

use outreach_generator::GeneratorError;
use outreach_llm::LlmError;
use outreach_store::StoreError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generation request failed
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    /// Gateway call failed; carries a credential hint
    #[error("Generation failed: {message}. Check that {key_env} holds a valid API key.")]
    Gateway {
        /// Underlying failure
        message: String,
        /// Environment variable the key is read from
        key_env: String,
    },

    /// Gateway could not be constructed
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// Request log error
    #[error("Request log error: {0}")]
    Store(#[from] StoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No log entry with the given id
    #[error("Not found: {0}")]
    NotFound(String),
}
