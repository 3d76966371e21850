//! OpenAI implementation of the extractor trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use walk_stats::extractors::OpenAiExtractor;
//!
//! let extractor = OpenAiExtractor::from_env()?.with_model("gpt-4o-mini");
//! let entries = extractor.extract(&units).await?;
//! ```

use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient};
use serde_json::Value;
use tracing::debug;

use super::prompts::{format_extract_prompt, EXTRACT_STATS_PROMPT};
use crate::error::{Result, StatsError};
use crate::traits::StatExtractor;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Extracts stats with one JSON-mode chat completion per batch.
#[derive(Clone)]
pub struct OpenAiExtractor {
    client: OpenAIClient,
    model: String,
}

impl OpenAiExtractor {
    pub fn new(client: OpenAIClient) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Create from environment variable `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let client = OpenAIClient::from_env().map_err(|e| StatsError::Extraction(Box::new(e)))?;
        Ok(Self::new(client))
    }

    /// Set the chat model (default: gpt-4o-mini).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Pull the `results` array out of a JSON-mode reply.
pub fn parse_extraction_response(reply: Value) -> Result<Vec<Value>> {
    match reply {
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(results)) => Ok(results),
            Some(other) => Err(StatsError::MalformedResponse {
                reason: format!("\"results\" is not an array: {}", other),
            }),
            None => Err(StatsError::MalformedResponse {
                reason: "missing \"results\" field".to_string(),
            }),
        },
        other => Err(StatsError::MalformedResponse {
            reason: format!("expected a JSON object, got {}", other),
        }),
    }
}

#[async_trait]
impl StatExtractor for OpenAiExtractor {
    fn name(&self) -> &str {
        "openai"
    }

    async fn extract(&self, units: &[String]) -> Result<Vec<Value>> {
        let request = ChatRequest::new(&self.model)
            .message(Message::system(EXTRACT_STATS_PROMPT))
            .message(Message::user(format_extract_prompt(units)?))
            .temperature(0.0);

        let reply: Value = self
            .client
            .chat_json(request)
            .await
            .map_err(|e| StatsError::Extraction(Box::new(e)))?;

        let results = parse_extraction_response(reply)?;
        debug!(
            model = %self.model,
            units = units.len(),
            results = results.len(),
            "OpenAI extraction complete"
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn results_array_is_returned_in_order() {
        let reply = json!({"results": [{"date_label": "Oct 30"}, {"date_label": null}]});
        let results = parse_extraction_response(reply).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["date_label"], "Oct 30");
    }

    #[test]
    fn missing_results_is_malformed() {
        let err = parse_extraction_response(json!({"rows": []})).unwrap_err();
        assert!(matches!(err, StatsError::MalformedResponse { .. }));
    }

    #[test]
    fn non_array_results_is_malformed() {
        let err = parse_extraction_response(json!({"results": {"date_label": "Oct 30"}})).unwrap_err();
        assert!(matches!(err, StatsError::MalformedResponse { .. }));

        let err = parse_extraction_response(json!([1, 2])).unwrap_err();
        assert!(matches!(err, StatsError::MalformedResponse { .. }));
    }

    #[test]
    fn builder_sets_model() {
        let extractor = OpenAiExtractor::new(OpenAIClient::new("sk-test")).with_model("gpt-4o");
        assert_eq!(extractor.model(), "gpt-4o");
        assert_eq!(extractor.name(), "openai");
    }
}
