//! End-to-end integration tests for the Wayfarer agent.
//!
//! These tests exercise the full pipeline from a config file to an HTTP
//! response: config loading, the tool registry, the reason-then-act loop,
//! and the gateway router, with a scripted reasoning engine in place of the
//! network call.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use wayfarer_agent::{LoopOutcome, ReactAgent, UserPrompt};
use wayfarer_config::AppConfig;
use wayfarer_core::error::ProviderError;
use wayfarer_core::event::{DomainEvent, EventBus, RunStatus};
use wayfarer_core::provider::{Provider, ProviderRequest, ProviderResponse};
use wayfarer_gateway::{GatewayState, build_router};
use wayfarer_tools::default_registry;

// ── Mock Provider ────────────────────────────────────────────────────────

/// A mock provider that returns scripted responses in sequence.
struct ScriptedProvider {
    responses: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    fn new(responses: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.iter().map(|r| r.to_string()).collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        self.requests.lock().unwrap().push(request);
        let text = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("ScriptedProvider exhausted");
        Ok(ProviderResponse::text(text, "e2e-model"))
    }
}

fn load_config(toml: &str) -> AppConfig {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, toml).unwrap();
    AppConfig::load_from(&path).unwrap()
}

fn agent(config: &AppConfig, provider: Arc<ScriptedProvider>) -> ReactAgent {
    ReactAgent::from_config(config, provider, Arc::new(default_registry()))
}

async fn post_chat(agent: ReactAgent, config: &AppConfig, body: &str) -> (StatusCode, serde_json::Value) {
    let app = build_router(
        Arc::new(GatewayState {
            agent: Arc::new(agent),
        }),
        &config.gateway,
    );
    let request = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ── Full trip planning ───────────────────────────────────────────────────

#[tokio::test]
async fn weather_then_attractions_then_answer() {
    let config = AppConfig::default();
    let provider = ScriptedProvider::new(&[
        "Thought: First I need the weather in Paris.\nAction: get_weather(city=\"Paris\")",
        "Thought: Now I can look for attractions.\nAction: get_attraction(city=\"Paris\", weather=\"Heavy rain\")",
        "Thought: I can answer now.\nAction: Finish[It is raining, so visit the Louvre Museum.]",
    ]);

    let (status, json) = post_chat(
        agent(&config, provider.clone()),
        &config,
        r#"{"prompt": "What should I do in Paris today?"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["final_answer"], "It is raining, so visit the Louvre Museum.");

    let conversation = json["conversation"].as_array().unwrap();
    assert_eq!(conversation.len(), 6);
    assert!(conversation[1]["content"]
        .as_str()
        .unwrap()
        .starts_with("Observation: Paris: current weather is"));
    assert!(conversation[3]["content"]
        .as_str()
        .unwrap()
        .contains("Louvre Museum"));
    assert_eq!(
        conversation[5]["content"],
        "Task complete, final answer: It is raining, so visit the Louvre Museum."
    );

    let requests = provider.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests[0].system_instruction.contains("get_attraction(city: str, weather: str)"));
    assert!(requests[2].prompt.contains("Observation: Recommended indoor attractions in Paris"));
}

// ── Config drives the loop ───────────────────────────────────────────────

#[tokio::test]
async fn config_file_sets_budget_and_instruction() {
    let config = load_config(
        r#"
model = "travel-small"

[agent]
max_iterations = 2
system_prompt_override = "Answer travel questions tersely."
"#,
    );
    let provider = ScriptedProvider::new(&[
        "Thought: weather\nAction: get_weather(city=\"Oslo\")",
        "Thought: weather again\nAction: get_weather(city=\"Oslo\")",
    ]);

    let (status, json) = post_chat(
        agent(&config, provider.clone()),
        &config,
        r#"{"prompt": "Oslo?"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Processing timed out, please try again later");
    assert_eq!(json["conversation"].as_array().unwrap().len(), 4);

    let requests = provider.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].model, "travel-small");
    assert_eq!(requests[0].system_instruction, "Answer travel questions tersely.");
}

// ── Self-correction ──────────────────────────────────────────────────────

#[tokio::test]
async fn recovers_from_format_and_unknown_tool_errors() {
    let config = AppConfig::default();
    let provider = ScriptedProvider::new(&[
        "I think Tokyo is nice.",
        "Thought: book it\nAction: `book_hotel(city=\"Tokyo\")`",
        "Thought: use a real tool\nAction: get_weather(city=\"Tokyo\")",
        "Thought: done\nAction: Finish[Tokyo looks good.]",
    ]);
    let agent = agent(&config, provider.clone());

    let outcome = agent.run(&UserPrompt::new("Tokyo trip").unwrap()).await;
    let LoopOutcome::Completed { answer, conversation } = outcome else {
        panic!("expected Completed");
    };
    assert_eq!(answer, "Tokyo looks good.");
    assert_eq!(conversation.rounds(), 4);

    let prompts: Vec<String> = provider.requests().into_iter().map(|r| r.prompt).collect();
    assert!(prompts[1].ends_with("'Thought: ... Action: ...' format."));
    assert!(prompts[2].ends_with("Available tools: get_attraction, get_weather"));
    assert!(prompts[3].contains("Observation: Tokyo: current weather is"));
}

// ── Events ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn shared_event_bus_sees_whole_run() {
    let bus = Arc::new(EventBus::new(64));
    let mut rx = bus.subscribe();
    let provider = ScriptedProvider::new(&["Thought: easy\nAction: Finish[Go to Hyde Park]"]);
    let agent = agent(&AppConfig::default(), provider).with_event_bus(bus);

    let outcome = agent.run(&UserPrompt::new("London").unwrap()).await;
    assert_eq!(outcome.status(), RunStatus::Completed);

    let mut finished = None;
    while let Ok(event) = rx.try_recv() {
        if let DomainEvent::RunFinished { status, iterations, .. } = event.as_ref() {
            finished = Some((*status, *iterations));
        }
    }
    assert_eq!(finished, Some((RunStatus::Completed, 1)));
}
