//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use outreach_generator::GeneratorConfig;
use outreach_llm::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Output settings
    #[serde(default)]
    pub settings: Settings,

    /// Generation gateway settings
    #[serde(default)]
    pub gateway: GatewaySettings,

    /// File locations
    #[serde(default)]
    pub paths: Paths,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Entries shown by `history` when no limit is given
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Word limit used when `generate` is not given one
    #[serde(default = "default_word_limit")]
    pub default_word_limit: u32,

    /// Smallest word limit `generate` accepts
    #[serde(default = "default_min_word_limit")]
    pub min_word_limit: u32,

    /// Largest word limit `generate` accepts
    #[serde(default = "default_max_word_limit")]
    pub max_word_limit: u32,
}

/// Where and how the model is called.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewaySettings {
    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// File locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paths {
    /// Organization knowledge document
    #[serde(default = "default_knowledge_path")]
    pub knowledge: PathBuf,

    /// Request log
    #[serde(default = "default_log_path")]
    pub log: PathBuf,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".outreach").join("config.toml"))
    }

    /// Load configuration from `path`, writing defaults there if it does not exist.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load(path);
        }

        let config = Self::default();
        match config.save(path) {
            Ok(()) => debug!("Wrote default configuration to {}", path.display()),
            Err(e) => warn!("Could not write default configuration to {}: {}", path.display(), e),
        }
        Ok(config)
    }

    /// Load configuration from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Generator settings built from `[settings]` and `[paths]`.
    pub fn generator_config(&self) -> Result<GeneratorConfig> {
        let config = GeneratorConfig {
            default_word_limit: self.settings.default_word_limit,
            min_word_limit: self.settings.min_word_limit,
            max_word_limit: self.settings.max_word_limit,
            knowledge_path: self.paths.knowledge.clone(),
        };
        config.validate().map_err(CliError::Config)?;
        Ok(config)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_limit: default_history_limit(),
            default_word_limit: default_word_limit(),
            min_word_limit: default_min_word_limit(),
            max_word_limit: default_max_word_limit(),
        }
    }
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            knowledge: default_knowledge_path(),
            log: default_log_path(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_limit() -> usize {
    20
}

fn default_word_limit() -> u32 {
    GeneratorConfig::default().default_word_limit
}

fn default_min_word_limit() -> u32 {
    GeneratorConfig::default().min_word_limit
}

fn default_max_word_limit() -> u32 {
    GeneratorConfig::default().max_word_limit
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_knowledge_path() -> PathBuf {
    PathBuf::from("knowledge.toml")
}

fn default_log_path() -> PathBuf {
    PathBuf::from("outreach_log.jsonl")
}
