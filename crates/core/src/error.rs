//! Error types for the Wayfarer domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all Wayfarer operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Reasoning gateway errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Inbound request errors ---
    #[error("Input error: {0}")]
    Input(#[from] InputError),
}

// --- Bounded context errors ---

/// A fault raised by the reasoning gateway. Fatal to the run that hit it.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider returned no content")]
    EmptyResponse,
}

/// A fault raised while dispatching or running a tool.
///
/// The loop never propagates these; they are folded into the next
/// observation so the reasoning engine can react to them.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Tool execution failed: {tool_name}: {reason}")]
    ExecutionFailed { tool_name: String, reason: String },

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),
}

/// The inbound user request could not start a run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("prompt is missing or empty")]
    MissingPrompt,
}
