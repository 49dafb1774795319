//! LLM Client: the single point of entry for all Gemini API calls.
//!
//! No other module may call the provider directly. The endpoint, model and
//! key come from `LlmConfig`, built once from process configuration at startup.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[cfg(test)]
pub mod fake_provider;

/// Returned in place of an answer when the provider response has no usable text.
pub const NO_OUTPUT_FALLBACK: &str = "No output found from Gemini.";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Provider settings. Never constructed from literals outside tests.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    /// Base URL without trailing slash, e.g. `https://generativelanguage.googleapis.com/v1beta`.
    pub base_url: String,
    pub temperature: f32,
    pub timeout: Duration,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(prompt: &'a str, temperature: f32) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig { temperature },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
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

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if present.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
    }
}

/// The single LLM client used by the scoring pipeline.
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    config: LlmConfig,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    /// Sends `prompt` as a single-turn request and returns the model's answer.
    ///
    /// Only transport failures are errors. Any response that does not carry
    /// `candidates[0].content.parts[0].text` yields [`NO_OUTPUT_FALLBACK`].
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = GenerateContentRequest::new(prompt, self.config.temperature);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Raw LLM response: {body}");

        if !status.is_success() {
            warn!("LLM API returned {status}; falling back to text extraction of the body");
        }

        Ok(extract_answer(&body))
    }
}

/// Pulls the answer text out of a raw `generateContent` response body.
pub fn extract_answer(body: &str) -> String {
    match serde_json::from_str::<GenerateContentResponse>(body) {
        Ok(parsed) => match parsed.text() {
            Some(text) => text.to_string(),
            None => {
                warn!("LLM response carried no candidate text");
                NO_OUTPUT_FALLBACK.to_string()
            }
        },
        Err(e) => {
            warn!("LLM response did not match the expected shape: {e}");
            NO_OUTPUT_FALLBACK.to_string()
        }
    }
}
