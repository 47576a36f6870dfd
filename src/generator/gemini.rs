//! Gemini backend for the generator boundary.
//!
//! Sends one `generateContent` call with a JSON response MIME type and the
//! structured prompt schema, and returns the text of the first candidate.

use super::{GeneratorError, StructuredGenerator};
use crate::config::Config;
use crate::error::{PromptsmithError, Result};
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const API_KEY_HEADER: &str = "x-goog-api-key";
const JSON_MIME_TYPE: &str = "application/json";

/// Connection settings for the Gemini backend.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Settings from config; the API key comes from the environment.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            api_key: config.api_key()?,
            model: config.model.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_seconds,
        })
    }
}

pub struct GeminiGenerator {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiGenerator {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                PromptsmithError::UserError(format!("failed to build HTTP client: {}", e))
            })?;
        Ok(Self { client, config })
    }

    fn build_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint, self.config.model
        )
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig<'a> {
    temperature: f32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: &'a Value,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

fn request_body<'a>(prompt_text: &'a str, schema: &'a Value, temperature: f32) -> GenerateRequest<'a> {
    GenerateRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![Part { text: prompt_text }],
        }],
        generation_config: GenerationConfig {
            temperature,
            response_mime_type: JSON_MIME_TYPE,
            response_schema: schema,
        },
    }
}

/// Pull the text payload out of a `generateContent` response body.
fn extract_text(body: &str) -> std::result::Result<String, GeneratorError> {
    let parsed: GenerateResponse = serde_json::from_str(body).map_err(|e| {
        GeneratorError::EmptyOrMalformedResponse(format!("unreadable response envelope: {}", e))
    })?;

    if let Some(error) = parsed.error {
        return Err(GeneratorError::TransportOrServiceError(format!(
            "Gemini API error: {}",
            error.message
        )));
    }

    let candidate = parsed.candidates.into_iter().next().ok_or_else(|| {
        GeneratorError::EmptyOrMalformedResponse("no candidates in response".to_string())
    })?;

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GeneratorError::EmptyOrMalformedResponse(format!(
            "candidate has no text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }

    Ok(text)
}

#[async_trait]
impl StructuredGenerator for GeminiGenerator {
    async fn generate_structured(
        &self,
        prompt_text: &str,
        schema: &Value,
        temperature: f32,
    ) -> std::result::Result<String, GeneratorError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_MIME_TYPE));
        let key = HeaderValue::from_str(&self.config.api_key).map_err(|e| {
            GeneratorError::TransportOrServiceError(format!("invalid API key header: {}", e))
        })?;
        headers.insert(API_KEY_HEADER, key);

        debug!(model = %self.config.model, "sending generateContent request");
        let response = self
            .client
            .post(self.build_url())
            .headers(headers)
            .json(&request_body(prompt_text, schema, temperature))
            .send()
            .await
            .map_err(|e| GeneratorError::TransportOrServiceError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GeneratorError::TransportOrServiceError(e.to_string()))?;

        if !status.is_success() {
            return Err(GeneratorError::TransportOrServiceError(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        extract_text(&body)
    }
}
