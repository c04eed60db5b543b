/// LLM Client: the single point of entry for completion-service calls.
///
/// ARCHITECTURAL RULE: No other module may call the completion service directly.
/// All model interactions go through a `CompletionModel`; `GeminiClient` is the
/// production implementation.
///
/// One attempt per call. Retry policy belongs to callers.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

// Generation config is fixed: favour determinism, bound the reply length.
const TEMPERATURE: f64 = 0.7;
const TOP_K: u32 = 40;
const TOP_P: f64 = 0.95;
const MAX_OUTPUT_TOKENS: u32 = 2048;

#[derive(Debug, Error)]
pub enum LlmError {
    /// Non-success status from the service, or the transport itself failed.
    #[error("completion service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The service succeeded but produced no usable text.
    #[error("completion service returned no text")]
    EmptyResponse,
}

/// A text-completion backend: one prompt in, one raw completion out.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_k: u32,
    top_p: f64,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate's first part, if it is present and not blank.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    error: ServiceErrorBody,
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    message: String,
}

/// Pulls `error.message` out of a failure body, falling back to the raw body.
fn error_message(body: String) -> String {
    serde_json::from_str::<ServiceError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini client
// ────────────────────────────────────────────────────────────────────────────

/// Client for a `generateContent`-style endpoint. Cloning shares the
/// underlying connection pool.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_url: String, api_key: String, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT,
                    reqwest::header::HeaderValue::from_static("application/json"),
                );
                headers
            })
            .build()?;

        Ok(Self {
            client,
            api_url,
            api_key,
        })
    }
}

#[async_trait]
impl CompletionModel for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_k: TOP_K,
                top_p: TOP_P,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", &self.api_key)])
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::ServiceUnavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::ServiceUnavailable(e.to_string()))?;

        if !status.is_success() {
            warn!("Completion service returned {}: {}", status, body);
            return Err(LlmError::ServiceUnavailable(error_message(body)));
        }

        let parsed: GenerateResponse = serde_json::from_str(&body).map_err(|e| {
            warn!("Completion envelope could not be decoded: {e}");
            LlmError::EmptyResponse
        })?;

        let text = parsed.text().ok_or(LlmError::EmptyResponse)?;
        debug!("Completion received: {} chars", text.len());

        Ok(text.to_string())
    }
}
