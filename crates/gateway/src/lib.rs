//! HTTP gateway for Wayfarer.
//!
//! Exposes the agent over two endpoints:
//! - `POST /api/chat`: run one reason-then-act loop for a prompt
//! - `GET /api/health`: liveness probe, independent of the loop
//!
//! Every request gets its own loop run; the agent itself is shared read-only.

use axum::extract::DefaultBodyLimit;
use axum::extract::rejection::JsonRejection;
use axum::{
    Router,
    extract::State,
    http::{HeaderValue, Method, StatusCode, header},
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

use wayfarer_agent::{LoopOutcome, ReactAgent, UserPrompt};
use wayfarer_config::{AppConfig, GatewayConfig};
use wayfarer_core::message::ConversationRecord;

const INVALID_QUERY: &str = "Please provide a valid query";
const TIMED_OUT: &str = "Processing timed out, please try again later";

/// Shared application state for the gateway.
pub struct GatewayState {
    pub agent: Arc<ReactAgent>,
}

type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
///
/// Layers applied:
/// - CORS (any origin, or the configured list)
/// - Request body size limit (1 MB)
/// - HTTP trace logging
pub fn build_router(state: SharedState, config: &GatewayConfig) -> Router {
    Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/api/health", get(health_handler))
        .with_state(state)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(cors_layer(config))
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

fn cors_layer(config: &GatewayConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if config.cors_allow_any_origin {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}

/// Start the gateway HTTP server.
///
/// Builds the provider, tools, and agent once and shares them across requests.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let provider = wayfarer_providers::build_from_config(&config)?;
    let tools = Arc::new(wayfarer_tools::default_registry());
    let agent = Arc::new(ReactAgent::from_config(&config, provider, tools));
    let state = Arc::new(GatewayState { agent });

    let app = build_router(state, &config.gateway);

    info!(addr = %addr, model = %config.model, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Serialize, Deserialize)]
struct HealthResponse {
    status: String,
    message: String,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        message: "Service is running normally".into(),
    })
}

#[derive(Deserialize)]
struct ChatRequest {
    #[serde(default)]
    prompt: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct ChatResponse {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    final_answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    conversation: Option<ConversationRecord>,
}

impl ChatResponse {
    fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            final_answer: None,
            error: Some(error.into()),
            conversation: None,
        }
    }
}

async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> (StatusCode, Json<ChatResponse>) {
    let prompt = match payload {
        Ok(Json(request)) => UserPrompt::from_optional(request.prompt),
        Err(rejection) => {
            warn!(error = %rejection, "Rejected chat request body");
            let status = match rejection.status() {
                StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
                _ => StatusCode::BAD_REQUEST,
            };
            return (status, Json(ChatResponse::failure(INVALID_QUERY)));
        }
    };
    let Ok(prompt) = prompt else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ChatResponse::failure(INVALID_QUERY)),
        );
    };

    match state.agent.run(&prompt).await {
        LoopOutcome::Completed {
            answer,
            conversation,
        } => (
            StatusCode::OK,
            Json(ChatResponse {
                success: true,
                final_answer: Some(answer),
                error: None,
                conversation: Some(conversation),
            }),
        ),
        LoopOutcome::Exhausted { conversation } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ChatResponse {
                conversation: Some(conversation),
                ..ChatResponse::failure(TIMED_OUT)
            }),
        ),
        LoopOutcome::Faulted { error } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ChatResponse::failure(error.to_string())),
        ),
    }
}
