//! OpenAI-compatible provider implementation.
//!
//! Works with: OpenAI, OpenRouter, DashScope, Ollama, vLLM, and any endpoint
//! exposing `/v1/chat/completions`.
//!
//! Each request sends the system instruction and the assembled transcript
//! as a two-message chat and returns the first choice's text. There is no
//! retry here: a failed call is a gateway fault for the whole run.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use wayfarer_core::error::ProviderError;
use wayfarer_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};

/// An OpenAI-compatible reasoning engine.
pub struct OpenAiCompatProvider {
    name: String,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    /// Create a new OpenAI-compatible provider.
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {e}")))?;

        Ok(Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Build the chat messages for a request.
    fn to_api_messages(request: &ProviderRequest) -> Vec<ApiMessage> {
        vec![
            ApiMessage {
                role: "system".into(),
                content: Some(request.system_instruction.clone()),
            },
            ApiMessage {
                role: "user".into(),
                content: Some(request.prompt.clone()),
            },
        ]
    }

    /// Build the JSON request body.
    fn to_body(request: &ProviderRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": request.model,
            "messages": Self::to_api_messages(request),
            "temperature": request.temperature,
            "stream": false,
        });

        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        body
    }
}

#[async_trait]
impl Provider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ProviderResponse, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = Self::to_body(&request);

        debug!(provider = %self.name, model = %request.model, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(ProviderError::RateLimited {
                retry_after_secs: 5,
            });
        }

        if status == 401 || status == 403 {
            return Err(ProviderError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Provider returned error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiResponse =
            response.json().await.map_err(|e| ProviderError::ApiError {
                status_code: 200,
                message: format!("Failed to parse response: {e}"),
            })?;

        parse_api_response(api_response, &request.model)
    }
}

/// Pull the first choice's text out of a decoded response.
fn parse_api_response(
    api_response: ApiResponse,
    requested_model: &str,
) -> Result<ProviderResponse, ProviderError> {
    let choice = api_response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::ApiError {
            status_code: 200,
            message: "No choices in response".into(),
        })?;

    let content = choice.message.content.ok_or(ProviderError::EmptyResponse)?;

    let usage = api_response.usage.map(|u| Usage {
        prompt_tokens: u.prompt_tokens,
        completion_tokens: u.completion_tokens,
        total_tokens: u.total_tokens,
    });

    Ok(ProviderResponse {
        content,
        model: api_response
            .model
            .unwrap_or_else(|| requested_model.to_string()),
        usage,
    })
}

// --- API wire types ---

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<ApiChoice>,
    #[serde(default)]
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ProviderRequest {
        ProviderRequest {
            model: "gpt-4o-mini".into(),
            system_instruction: "You are a travel assistant".into(),
            prompt: "User request: weather in Paris".into(),
            temperature: 0.2,
            max_tokens: Some(256),
        }
    }

    #[test]
    fn trailing_slash_trimmed() {
        let provider = OpenAiCompatProvider::new("custom", "http://host/v1/", "k").unwrap();
        assert_eq!(provider.base_url, "http://host/v1");
    }

    #[test]
    fn message_conversion() {
        let api_messages = OpenAiCompatProvider::to_api_messages(&request());
        assert_eq!(api_messages.len(), 2);
        assert_eq!(api_messages[0].role, "system");
        assert_eq!(api_messages[1].role, "user");
        assert_eq!(
            api_messages[1].content.as_deref(),
            Some("User request: weather in Paris")
        );
    }

    #[test]
    fn body_includes_optional_fields() {
        let body = OpenAiCompatProvider::to_body(&request());
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["stream"], false);
        assert_eq!(body["max_tokens"], 256);
    }

    #[test]
    fn body_carries_only_chat_fields() {
        let mut req = request();
        req.max_tokens = None;
        let body = OpenAiCompatProvider::to_body(&req);
        let mut keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["messages", "model", "stream", "temperature"]);
    }

    #[test]
    fn parse_first_choice() {
        let api: ApiResponse = serde_json::from_value(serde_json::json!({
            "model": "gpt-4o-mini-2024",
            "choices": [
                {"message": {"role": "assistant", "content": "Thought: hi\nAction: Finish[hello]"}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        }))
        .unwrap();
        let resp = parse_api_response(api, "gpt-4o-mini").unwrap();
        assert!(resp.content.starts_with("Thought: hi"));
        assert_eq!(resp.model, "gpt-4o-mini-2024");
        assert_eq!(resp.usage.unwrap().total_tokens, 15);
    }

    #[test]
    fn parse_empty_choices_is_error() {
        let api: ApiResponse =
            serde_json::from_value(serde_json::json!({"choices": []})).unwrap();
        assert!(matches!(
            parse_api_response(api, "m"),
            Err(ProviderError::ApiError { .. })
        ));
    }

    #[test]
    fn parse_null_content_is_empty_response() {
        let api: ApiResponse = serde_json::from_value(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": null}}]
        }))
        .unwrap();
        assert!(matches!(
            parse_api_response(api, "m"),
            Err(ProviderError::EmptyResponse)
        ));
    }
}
