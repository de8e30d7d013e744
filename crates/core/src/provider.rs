//! Provider trait — the abstraction over the reasoning engine.
//!
//! A Provider takes an assembled prompt plus a fixed system instruction and
//! returns the engine's raw text. Nothing about the text is trusted: it goes
//! through the agent's output parser before anything acts on it.
//!
//! Implementations: OpenAI-compatible endpoints, scripted test providers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::ProviderError;

/// A single generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// The model to use (e.g., "gpt-4o-mini")
    pub model: String,

    /// The fixed instruction describing the reply format and tools
    pub system_instruction: String,

    /// The transcript so far, joined by newlines
    pub prompt: String,

    /// Temperature (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

fn default_temperature() -> f32 {
    0.7
}

/// A complete response from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// The raw generated text
    pub content: String,

    /// Which model actually responded (may differ from requested)
    pub model: String,

    /// Token usage statistics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl ProviderResponse {
    /// A bare text response with no usage information.
    pub fn text(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
            usage: None,
        }
    }
}

/// Token usage information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The core Provider trait.
///
/// The agent loop calls `complete()` once per iteration without knowing
/// which backend answers. A returned error is a gateway fault and ends the
/// run; providers must not retry on the loop's behalf.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a request and get the complete raw text back.
    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ProviderResponse, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_request_defaults() {
        let req: ProviderRequest = serde_json::from_value(serde_json::json!({
            "model": "gpt-4o-mini",
            "system_instruction": "Be terse",
            "prompt": "User request: hi",
        }))
        .unwrap();
        assert!((req.temperature - 0.7).abs() < f32::EPSILON);
        assert!(req.max_tokens.is_none());
    }

    #[test]
    fn text_response_has_no_usage() {
        let resp = ProviderResponse::text("Thought: ok", "mock-model");
        assert_eq!(resp.content, "Thought: ok");
        assert_eq!(resp.model, "mock-model");
        assert!(resp.usage.is_none());
    }
}
