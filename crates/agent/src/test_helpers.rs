//! Shared test helpers for loop tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use wayfarer_core::error::{ProviderError, ToolError};
use wayfarer_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use wayfarer_core::tool::{Tool, ToolArgs};

/// A mock provider that returns a sequence of scripted results.
///
/// Each call to `complete` returns the next result in the queue and records
/// the request it was sent. Panics if more calls are made than results provided.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<String, ProviderError>>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    pub fn new(responses: &[&str]) -> Self {
        Self::with_results(responses.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn with_results(script: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// The same response, `times` times over.
    pub fn repeating(response: &str, times: usize) -> Self {
        Self::new(&vec![response; times])
    }

    /// Number of `complete` calls made so far.
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Every assembled prompt sent, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.prompt.clone())
            .collect()
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request);
            requests.len()
        };
        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("ScriptedProvider: no response scripted for call #{call}"));

        next.map(|content| ProviderResponse {
            content,
            model: "scripted-model".into(),
            usage: Some(Usage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
        })
    }
}

/// Finishes immediately with the first line of whatever prompt it is sent.
pub struct PromptEchoProvider;

#[async_trait]
impl Provider for PromptEchoProvider {
    fn name(&self) -> &str {
        "prompt_echo"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        tokio::task::yield_now().await;
        let first_line = request.prompt.lines().next().unwrap_or_default();
        Ok(ProviderResponse::text(
            format!("Thought: echo\nAction: Finish[{first_line}]"),
            "echo-model",
        ))
    }
}

/// A tool that always fails.
pub struct FailingTool;

#[async_trait]
impl Tool for FailingTool {
    fn name(&self) -> &str {
        "flaky_lookup"
    }

    fn description(&self) -> &str {
        "Always fails"
    }

    fn parameters(&self) -> &[&str] {
        &["city"]
    }

    async fn execute(&self, _args: &ToolArgs) -> Result<String, ToolError> {
        Err(ToolError::ExecutionFailed {
            tool_name: "flaky_lookup".into(),
            reason: "upstream unavailable".into(),
        })
    }
}
