//! Configuration for the Generator

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the Generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Word limit used when the query does not set one
    pub default_word_limit: u32,

    /// Smallest word limit a query may request
    pub min_word_limit: u32,

    /// Largest word limit a query may request
    pub max_word_limit: u32,

    /// Path of the organization knowledge document (TOML)
    pub knowledge_path: PathBuf,
}

impl GeneratorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.min_word_limit == 0 {
            return Err("min_word_limit must be greater than 0".to_string());
        }
        if self.min_word_limit > self.max_word_limit {
            return Err("min_word_limit cannot exceed max_word_limit".to_string());
        }
        if !(self.min_word_limit..=self.max_word_limit).contains(&self.default_word_limit) {
            return Err(format!(
                "default_word_limit {} must lie within [{}, {}]",
                self.default_word_limit, self.min_word_limit, self.max_word_limit
            ));
        }
        if self.knowledge_path.as_os_str().is_empty() {
            return Err("knowledge_path must not be empty".to_string());
        }
        Ok(())
    }

    /// Use a different knowledge document
    pub fn with_knowledge_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.knowledge_path = path.into();
        self
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_word_limit: 200,
            min_word_limit: 50,
            max_word_limit: 500,
            knowledge_path: PathBuf::from("knowledge.toml"),
        }
    }
}
