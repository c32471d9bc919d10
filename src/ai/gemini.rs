//! Gemini API client

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GemcommitError, Result};

/// Gemini API base URL
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Sampling temperature for every request
const TEMPERATURE: f32 = 0.7;

/// Output budget for every request. Thinking models spend part of it
/// before any text is produced, so it is well above a commit's length.
const MAX_OUTPUT_TOKENS: u32 = 8192;

/// One generation call: what to ask and which model to ask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Full prompt text
    pub prompt: String,
    /// Model identifier, e.g. `gemini-2.5-flash`
    pub model: String,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: model.into(),
        }
    }
}

/// A hosted text-generation service.
///
/// Exactly one request per call: no retries, no streaming, no timeout.
#[async_trait(?Send)]
pub trait TextGenerator {
    /// Return the raw response text, or `GenerationFailed` with the cause
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

/// Gemini API client
pub struct GeminiClient {
    client: Client,
    api_key: SecretString,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(api_key: SecretString) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: GEMINI_API_BASE.to_string(),
        }
    }

    /// Point the client at a different API root (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait(?Send)]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let url = format!("{}/{}:generateContent", self.base_url, request.model);

        let request_body = GeminiRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(request.prompt.clone()),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        debug!(
            model = %request.model,
            prompt_chars = request.prompt.len(),
            "sending generateContent request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&request_body)
            .send()
            .await
            .map_err(|e| GemcommitError::GenerationFailed(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(GemcommitError::GenerationFailed(format!(
                "API error ({}): {}",
                status,
                error_text.trim()
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            GemcommitError::GenerationFailed(format!("Failed to parse response: {}", e))
        })?;

        let text = gemini_response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .filter(|text| !text.is_empty())
            .ok_or_else(|| {
                GemcommitError::GenerationFailed("Empty response from API".to_string())
            })?;

        debug!(response_chars = text.len(), "received generateContent response");
        Ok(text)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Gemini API Request/Response types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}
