//! Gemini Gateway Implementation
//!
//! Calls the Gemini `generateContent` REST endpoint with the Google Search
//! tool enabled and a thinking level derived from the requested effort.
//!
//! # Features
//!
//! - Blocking HTTP communication (the request flow is synchronous)
//! - Configurable endpoint, model and timeout
//! - Grounding metadata passed through untouched as JSON
//!
//! Calls are not retried; a failed call surfaces to the user.
//!
//! # Examples
//!
//! ```no_run
//! use outreach_llm::GeminiGateway;
//!
//! let gateway = GeminiGateway::from_env("GEMINI_API_KEY").unwrap();
//! ```

use crate::LlmError;
use outreach_domain::traits::GenerationGateway;
use outreach_domain::{EffortLevel, GenerationResult, TokenUsage};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default Gemini API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Default timeout for a generation request. Search-grounded calls with high
/// thinking effort routinely take over a minute.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Gemini API gateway with search grounding
pub struct GeminiGateway {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    tools: Vec<Tool>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Tool {
    google_search: serde_json::Map<String, serde_json::Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    thinking_config: ThinkingConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_level: &'static str,
}

/// Response from the `generateContent` API (only the fields we read)
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    grounding_metadata: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: Option<u64>,
    #[serde(default)]
    candidates_token_count: Option<u64>,
    #[serde(default)]
    total_token_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl GeminiGateway {
    /// Create a new Gemini gateway
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API base URL (e.g., "https://generativelanguage.googleapis.com")
    /// - `model`: Model to use (e.g., "gemini-3-flash-preview")
    /// - `api_key`: Gemini API key
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, LlmError> {
        Self::with_timeout(endpoint, model, api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new Gemini gateway with an explicit request timeout
    pub fn with_timeout(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Communication(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Create a gateway with the default endpoint and model, reading the API
    /// key from the environment variable `var`
    pub fn from_env(var: &str) -> Result<Self, LlmError> {
        let api_key = std::env::var(var)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| LlmError::MissingApiKey(var.to_string()))?;
        Self::new(DEFAULT_ENDPOINT, DEFAULT_MODEL, api_key)
    }

    /// Full URL of the generateContent call
    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }

    fn request_body<'a>(prompt: &'a str, effort: EffortLevel) -> GenerateContentRequest<'a> {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            tools: vec![Tool {
                google_search: serde_json::Map::new(),
            }],
            generation_config: GenerationConfig {
                thinking_config: ThinkingConfig {
                    thinking_level: effort.as_str(),
                },
            },
        }
    }
}

/// Map a decoded API response into the domain result
fn into_generation_result(response: GenerateContentResponse) -> GenerationResult {
    let first = response.candidates.into_iter().next();

    let (text, grounding_metadata) = match first {
        Some(candidate) => {
            let text = candidate
                .content
                .map(|c| {
                    c.parts
                        .into_iter()
                        .filter(|p| p.thought != Some(true))
                        .filter_map(|p| p.text)
                        .collect::<String>()
                })
                .unwrap_or_default();
            let metadata = candidate.grounding_metadata.filter(|m| !m.is_null());
            (text, metadata)
        }
        None => (String::new(), None),
    };

    let usage = match response.usage_metadata {
        Some(u) => {
            let input = u.prompt_token_count.unwrap_or(0);
            let output = u.candidates_token_count.unwrap_or(0);
            TokenUsage::new(input, output, u.total_token_count)
        }
        None => TokenUsage::default(),
    };

    GenerationResult {
        text,
        usage,
        grounding_metadata,
    }
}

impl GenerationGateway for GeminiGateway {
    type Error = LlmError;

    fn generate(&self, prompt: &str, effort: EffortLevel) -> Result<GenerationResult, Self::Error> {
        let body = Self::request_body(prompt, effort);

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| LlmError::Communication(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiError>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let decoded: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let result = into_generation_result(decoded);
        debug!(
            "Generation succeeded: input_tokens={}, output_tokens={}, grounded={}",
            result.usage.input,
            result.usage.output,
            result.grounding_metadata.is_some()
        );

        Ok(result)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> GenerationResult {
        let response: GenerateContentResponse = serde_json::from_value(value).unwrap();
        into_generation_result(response)
    }

    #[test]
    fn test_gateway_creation() {
        let gateway = GeminiGateway::new("https://example.com/", "gemini-test", "key").unwrap();
        assert_eq!(gateway.endpoint, "https://example.com");
        assert_eq!(gateway.model_name(), "gemini-test");
        assert_eq!(
            gateway.url(),
            "https://example.com/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn test_missing_api_key() {
        let result = GeminiGateway::from_env("OUTREACH_TEST_KEY_THAT_IS_NEVER_SET");
        assert!(matches!(result, Err(LlmError::MissingApiKey(_))));
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(GeminiGateway::request_body("hello", EffortLevel::High)).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["tools"][0]["google_search"], json!({}));
        assert_eq!(body["generationConfig"]["thinkingConfig"]["thinkingLevel"], "high");
    }

    #[test]
    fn test_response_mapping() {
        let result = decode(json!({
            "candidates": [{
                "content": {"parts": [
                    {"text": "thinking...", "thought": true},
                    {"text": "---EMAIL 1---\n"},
                    {"text": "SUBJECT: Hi"}
                ]},
                "groundingMetadata": {"groundingChunks": [{"web": {"uri": "https://a.com"}}]}
            }],
            "usageMetadata": {"promptTokenCount": 120, "candidatesTokenCount": 30, "totalTokenCount": 400}
        }));

        assert_eq!(result.text, "---EMAIL 1---\nSUBJECT: Hi");
        assert_eq!(result.usage, TokenUsage { input: 120, output: 30, total: 400 });
        assert!(result.grounding_metadata.is_some());
    }

    #[test]
    fn test_response_mapping_missing_fields() {
        let result = decode(json!({
            "candidates": [{"content": {"parts": [{"text": "hi"}]}}],
            "usageMetadata": {"promptTokenCount": 7}
        }));
        assert_eq!(result.usage, TokenUsage { input: 7, output: 0, total: 7 });
        assert!(result.grounding_metadata.is_none());

        let empty = decode(json!({}));
        assert_eq!(empty.text, "");
        assert_eq!(empty.usage.total, 0);
    }

    #[test]
    fn test_unreachable_endpoint() {
        let gateway = GeminiGateway::with_timeout(
            "http://127.0.0.1:1",
            "gemini-test",
            "key",
            Duration::from_secs(2),
        )
        .unwrap();

        let result = gateway.generate("test", EffortLevel::Low);
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}
