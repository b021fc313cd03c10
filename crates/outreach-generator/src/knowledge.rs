//! Organization knowledge document
//!
//! The static description of the sender's organization that parameterizes
//! every prompt: overview, capabilities, specializations, value propositions
//! and website. Loaded fresh for each request.

use crate::error::GeneratorError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Root of the knowledge document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    /// The sending organization
    pub organization: Organization,
}

/// What we say about ourselves in outreach
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    /// Organization name
    pub name: String,

    /// One-paragraph description
    #[serde(default)]
    pub overview: String,

    /// Product capabilities
    #[serde(default)]
    pub key_capabilities: Vec<String>,

    /// Domains the organization specializes in
    #[serde(default)]
    pub specializations: Vec<String>,

    /// Value propositions for prospects
    #[serde(default)]
    pub value_propositions: Vec<String>,

    /// Contact details
    #[serde(default)]
    pub contact: Contact,
}

/// Contact details
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Contact {
    /// Public website
    #[serde(default)]
    pub website: Option<String>,
}

impl KnowledgeBase {
    /// Load the knowledge document from a TOML file
    ///
    /// A missing, unreadable or malformed document is a configuration error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GeneratorError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            GeneratorError::Configuration(format!(
                "Failed to read knowledge document '{}': {}",
                path.display(),
                e
            ))
        })?;

        let knowledge = Self::from_toml(&contents)?;
        debug!(
            "Loaded knowledge for '{}' ({} capabilities, {} value propositions)",
            knowledge.organization.name,
            knowledge.organization.key_capabilities.len(),
            knowledge.organization.value_propositions.len()
        );
        Ok(knowledge)
    }

    /// Parse the knowledge document from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, GeneratorError> {
        let knowledge: KnowledgeBase = toml::from_str(toml_str)?;
        if knowledge.organization.name.trim().is_empty() {
            return Err(GeneratorError::Configuration(
                "organization.name must not be empty".to_string(),
            ));
        }
        Ok(knowledge)
    }

    /// Website, if one is configured and non-blank
    pub fn website(&self) -> Option<&str> {
        self.organization
            .contact
            .website
            .as_deref()
            .map(str::trim)
            .filter(|w| !w.is_empty())
    }
}
