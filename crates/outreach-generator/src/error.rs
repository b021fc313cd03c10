//! Error types for the Generator

use outreach_domain::ProspectError;
use thiserror::Error;

/// Errors that abort a generation request
///
/// Parsing and citation extraction never produce errors; they return
/// shorter results instead.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// Required prospect fields missing or out of range
    #[error("Validation error: {0}")]
    Validation(String),

    /// Knowledge document or settings missing or malformed
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The generation call failed (auth, network, quota)
    #[error("Generation failed: {0}")]
    Gateway(String),
}

impl From<ProspectError> for GeneratorError {
    fn from(e: ProspectError) -> Self {
        GeneratorError::Validation(e.to_string())
    }
}

impl From<toml::de::Error> for GeneratorError {
    fn from(e: toml::de::Error) -> Self {
        GeneratorError::Configuration(format!("Failed to parse TOML: {}", e))
    }
}
