//! Schema-constrained generator client.
//!
//! The external text-generation service is consumed through one narrow
//! capability, [`StructuredGenerator::generate_structured`], which returns the
//! raw text payload or one of two failures. [`GeneratorClient`] builds the
//! instruction, attaches the output schema, and parses the payload strictly
//! into a [`StructuredPrompt`]. There are no retries at this layer.

mod gemini;
mod schema;

#[cfg(test)]
pub(crate) mod fake;

pub use gemini::{GeminiConfig, GeminiGenerator};
pub use schema::structured_prompt_schema;

use crate::config::Config;
use crate::error::Result;
use crate::request::{GenerationRequest, RequestBuilder};
use crate::structured::StructuredPrompt;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Failures of one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    /// The call could not complete (network, auth, rate limit, service error).
    #[error("generator service error: {0}")]
    TransportOrServiceError(String),

    /// The call completed but the payload was empty or not schema-conformant.
    #[error("malformed generator response: {0}")]
    EmptyOrMalformedResponse(String),
}

/// The external generation capability.
#[async_trait]
pub trait StructuredGenerator: Send + Sync {
    /// Generate text constrained to `schema` as a JSON response.
    async fn generate_structured(
        &self,
        prompt_text: &str,
        schema: &Value,
        temperature: f32,
    ) -> std::result::Result<String, GeneratorError>;
}

/// Builds instructions, calls the generator, and validates the result.
pub struct GeneratorClient {
    backend: Arc<dyn StructuredGenerator>,
    builder: RequestBuilder,
    schema: Value,
    temperature: f32,
}

impl GeneratorClient {
    pub fn new(
        backend: Arc<dyn StructuredGenerator>,
        builder: RequestBuilder,
        temperature: f32,
    ) -> Self {
        Self {
            backend,
            builder,
            schema: structured_prompt_schema(),
            temperature,
        }
    }

    /// Client for the configured Gemini backend and instruction template.
    pub fn from_config(config: &Config) -> Result<Self> {
        let backend = GeminiGenerator::new(GeminiConfig::from_config(config)?)?;
        let builder = RequestBuilder::from_config(config)?;
        Ok(Self::new(Arc::new(backend), builder, config.temperature))
    }

    /// Run one generation.
    ///
    /// A payload that does not parse into all six fields is a failure; no
    /// field is ever defaulted.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<StructuredPrompt> {
        let instruction = self.builder.build(request)?;

        info!(temperature = self.temperature, "requesting structured prompt");
        let payload = self
            .backend
            .generate_structured(&instruction, &self.schema, self.temperature)
            .await
            .inspect_err(|e| warn!(error = %e, "generator call failed"))?;

        let prompt = StructuredPrompt::from_payload(&payload)
            .inspect_err(|e| warn!(error = %e, "generator returned an unusable payload"))?;

        info!("structured prompt received");
        Ok(prompt)
    }
}
