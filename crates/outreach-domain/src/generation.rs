//! Generation module - what the gateway hands back

use serde::{Deserialize, Serialize};

/// Thinking effort requested from the model
///
/// Trades latency for depth of reasoning:
/// - Low: faster responses
/// - High: more thorough research and personalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffortLevel {
    /// Fast, shallow reasoning
    #[default]
    Low,

    /// Slower, deeper reasoning
    High,
}

impl EffortLevel {
    /// Get the effort level name as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            EffortLevel::Low => "low",
            EffortLevel::High => "high",
        }
    }

    /// Parse an effort level from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(EffortLevel::Low),
            "high" => Some(EffortLevel::High),
            _ => None,
        }
    }
}

impl std::str::FromStr for EffortLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid effort level: {}", s))
    }
}

impl std::fmt::Display for EffortLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token accounting for one generation call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Prompt tokens
    pub input: u64,

    /// Generated tokens
    pub output: u64,

    /// Total billed tokens
    pub total: u64,
}

impl TokenUsage {
    /// Build token usage; `total` defaults to `input + output` when not reported
    ///
    /// ```
    /// use outreach_domain::TokenUsage;
    ///
    /// assert_eq!(TokenUsage::new(10, 5, None).total, 15);
    /// assert_eq!(TokenUsage::new(10, 5, Some(40)).total, 40);
    /// ```
    pub fn new(input: u64, output: u64, total: Option<u64>) -> Self {
        Self {
            input,
            output,
            total: total.unwrap_or_else(|| input.saturating_add(output)),
        }
    }
}

/// Raw output of the generation gateway
///
/// `grounding_metadata` has no guaranteed shape: it differs between API
/// versions and response variants, so it stays an untyped JSON value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenerationResult {
    /// Generated text
    pub text: String,

    /// Token counts
    pub usage: TokenUsage,

    /// Search grounding metadata, if the response carried any
    pub grounding_metadata: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effort_parsing() {
        assert_eq!(EffortLevel::parse("LOW"), Some(EffortLevel::Low));
        assert_eq!(EffortLevel::parse("high"), Some(EffortLevel::High));
        assert_eq!(EffortLevel::parse("medium"), None);
        assert!("extreme".parse::<EffortLevel>().is_err());
    }

    #[test]
    fn test_effort_serde_lowercase() {
        let json = serde_json::to_string(&EffortLevel::High).unwrap();
        assert_eq!(json, "\"high\"");
    }

    #[test]
    fn test_total_saturates() {
        let usage = TokenUsage::new(u64::MAX, 1, None);
        assert_eq!(usage.total, u64::MAX);
    }
}
