//! Recording test double for the generator boundary.
//!
//! Returns a canned payload or error and records every call.

use super::{GeneratorError, StructuredGenerator};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

/// One recorded `generate_structured` call.
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub prompt_text: String,
    pub schema: Value,
    pub temperature: f32,
}

#[derive(Debug)]
pub(crate) struct FakeGenerator {
    response: Result<String, GeneratorError>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeGenerator {
    /// Fake that returns `payload` for every call.
    pub(crate) fn succeeding(payload: impl Into<String>) -> Self {
        Self {
            response: Ok(payload.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fake that fails every call with `error`.
    pub(crate) fn failing(error: GeneratorError) -> Self {
        Self {
            response: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl StructuredGenerator for FakeGenerator {
    async fn generate_structured(
        &self,
        prompt_text: &str,
        schema: &Value,
        temperature: f32,
    ) -> Result<String, GeneratorError> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt_text: prompt_text.to_string(),
            schema: schema.clone(),
            temperature,
        });
        self.response.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_calls_and_replays_response() {
        let fake = FakeGenerator::succeeding("{}");
        let out = fake
            .generate_structured("hello", &Value::Null, 0.5)
            .await
            .unwrap();

        assert_eq!(out, "{}");
        assert_eq!(fake.call_count(), 1);
        assert_eq!(fake.last_call().unwrap().prompt_text, "hello");
    }

    #[tokio::test]
    async fn failing_fake_returns_error() {
        let fake = FakeGenerator::failing(GeneratorError::TransportOrServiceError(
            "offline".to_string(),
        ));
        let err = fake
            .generate_structured("x", &Value::Null, 0.0)
            .await
            .unwrap_err();
        assert!(matches!(err, GeneratorError::TransportOrServiceError(_)));
    }
}
