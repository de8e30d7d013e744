//! Loop controller — the Thought → Action → Observation cycle.
//!
//! Each run owns its transcript and conversation record; nothing is shared
//! between runs except the read-only provider, tool registry, and settings.
//!
//! Per iteration:
//! 1. Assemble the prompt from the transcript
//! 2. Call the reasoning gateway once (a fault ends the run)
//! 3. Isolate the first reasoning unit and record it
//! 4. Interpret its action: finish, dispatch a tool, or feed back a correction
//! 5. Record the observation and go again, up to the iteration budget

use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;
use wayfarer_config::AppConfig;
use wayfarer_core::error::{Error, InputError};
use wayfarer_core::event::{DomainEvent, EventBus, RunStatus};
use wayfarer_core::message::{ConversationRecord, Message};
use wayfarer_core::provider::{Provider, ProviderRequest};
use wayfarer_core::tool::{ToolArgs, ToolRegistry};

use crate::action::{Action, ActionInterpreter};
use crate::parser;
use crate::prompt;
use crate::transcript::Transcript;

/// Prefix of every observation line.
pub const OBSERVATION_PREFIX: &str = "Observation: ";

/// Prefix of the system note recorded when a run finishes.
pub const COMPLETION_NOTE: &str = "Task complete, final answer: ";

/// Immutable per-agent loop settings, handed to every run.
#[derive(Debug, Clone)]
pub struct LoopSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub max_iterations: usize,
    pub system_instruction: String,
}

impl LoopSettings {
    /// Capture settings from config; the instruction lists `tools` unless overridden.
    pub fn from_config(config: &AppConfig, tools: &ToolRegistry) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            max_iterations: config.agent.max_iterations,
            system_instruction: config
                .agent
                .system_prompt_override
                .clone()
                .unwrap_or_else(|| prompt::system_instruction(tools)),
        }
    }
}

/// A non-empty user question. The only way into [`ReactAgent::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPrompt(String);

impl UserPrompt {
    pub fn new(prompt: impl Into<String>) -> Result<Self, InputError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(InputError::MissingPrompt);
        }
        Ok(Self(prompt))
    }

    /// Accept an optional field from an inbound request.
    pub fn from_optional(prompt: Option<String>) -> Result<Self, InputError> {
        prompt.ok_or(InputError::MissingPrompt).and_then(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// How a run ended.
#[derive(Debug)]
pub enum LoopOutcome {
    /// The reasoning engine produced a final answer.
    Completed {
        answer: String,
        conversation: ConversationRecord,
    },
    /// The iteration budget ran out without a final answer.
    Exhausted { conversation: ConversationRecord },
    /// The reasoning gateway failed; the run was abandoned.
    Faulted { error: Error },
}

impl LoopOutcome {
    pub fn status(&self) -> RunStatus {
        match self {
            LoopOutcome::Completed { .. } => RunStatus::Completed,
            LoopOutcome::Exhausted { .. } => RunStatus::Exhausted,
            LoopOutcome::Faulted { .. } => RunStatus::Faulted,
        }
    }

    /// The conversation record, when the run produced one.
    pub fn conversation(&self) -> Option<&ConversationRecord> {
        match self {
            LoopOutcome::Completed { conversation, .. }
            | LoopOutcome::Exhausted { conversation } => Some(conversation),
            LoopOutcome::Faulted { .. } => None,
        }
    }
}

/// The reason-then-act agent.
pub struct ReactAgent {
    provider: Arc<dyn Provider>,
    tools: Arc<ToolRegistry>,
    settings: LoopSettings,
    event_bus: Arc<EventBus>,
}

impl ReactAgent {
    pub fn new(provider: Arc<dyn Provider>, tools: Arc<ToolRegistry>, settings: LoopSettings) -> Self {
        Self {
            provider,
            tools,
            settings,
            event_bus: Arc::new(EventBus::default()),
        }
    }

    /// Build an agent whose settings come from `config`.
    pub fn from_config(config: &AppConfig, provider: Arc<dyn Provider>, tools: Arc<ToolRegistry>) -> Self {
        let settings = LoopSettings::from_config(config, &tools);
        Self::new(provider, tools, settings)
    }

    /// Publish run events on a shared bus instead of a private one.
    pub fn with_event_bus(mut self, event_bus: Arc<EventBus>) -> Self {
        self.event_bus = event_bus;
        self
    }

    pub fn settings(&self) -> &LoopSettings {
        &self.settings
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }

    /// Run the loop for one prompt until it finishes, exhausts, or faults.
    pub async fn run(&self, prompt: &UserPrompt) -> LoopOutcome {
        let run_id = Uuid::new_v4().to_string();
        let max_iterations = self.settings.max_iterations;
        let interpreter = ActionInterpreter::new(&self.tools);
        let mut transcript = Transcript::seed(prompt.as_str());
        let mut conversation = ConversationRecord::new();

        info!(%run_id, max_iterations, provider = self.provider.name(), "Starting run");
        self.event_bus.publish(DomainEvent::RunStarted {
            run_id: run_id.clone(),
            prompt_preview: prompt.as_str().chars().take(80).collect(),
            timestamp: Utc::now(),
        });

        for iteration in 1..=max_iterations {
            debug!(%run_id, iteration, "Iteration started");

            let request = ProviderRequest {
                model: self.settings.model.clone(),
                system_instruction: self.settings.system_instruction.clone(),
                prompt: transcript.assemble(),
                temperature: self.settings.temperature,
                max_tokens: self.settings.max_tokens,
            };

            let response = match self.provider.complete(request).await {
                Ok(response) => response,
                Err(e) => {
                    error!(%run_id, iteration, error = %e, "Reasoning gateway failed");
                    self.finish(&run_id, RunStatus::Faulted, iteration);
                    return LoopOutcome::Faulted { error: e.into() };
                }
            };

            self.event_bus.publish(DomainEvent::ResponseGenerated {
                run_id: run_id.clone(),
                model: response.model.clone(),
                iteration,
                tokens_used: response.usage.as_ref().map(|u| u.total_tokens),
                timestamp: Utc::now(),
            });

            let utterance = select_utterance(&response.content);
            if utterance.len() != response.content.len() {
                debug!(%run_id, iteration, "Discarded over-generated output");
            }
            transcript.push(utterance);
            conversation.push(Message::assistant(utterance));

            let observation = match interpreter.interpret(utterance) {
                Action::Finish { answer } => {
                    info!(%run_id, iteration, "Run completed");
                    conversation.push(Message::system(format!("{COMPLETION_NOTE}{answer}")));
                    self.finish(&run_id, RunStatus::Completed, iteration);
                    return LoopOutcome::Completed {
                        answer,
                        conversation,
                    };
                }
                Action::ToolCall { name, args } => {
                    debug!(%run_id, iteration, tool = %name, "Dispatching tool");
                    self.dispatch(&run_id, &name, &args).await
                }
                Action::UnknownTool { name } => {
                    warn!(%run_id, iteration, tool = %name, "Action named an unknown tool");
                    interpreter.unknown_tool_message(&name)
                }
                Action::Malformed { reason } => {
                    warn!(%run_id, iteration, "Could not interpret action");
                    reason
                }
            };

            let line = format!("{OBSERVATION_PREFIX}{observation}");
            transcript.push(line.clone());
            conversation.push(Message::system(line));
        }

        warn!(%run_id, max_iterations, "Iteration budget exhausted without a final answer");
        self.finish(&run_id, RunStatus::Exhausted, max_iterations);
        LoopOutcome::Exhausted { conversation }
    }

    /// Run one tool call; faults become observation text.
    async fn dispatch(&self, run_id: &str, name: &str, args: &ToolArgs) -> String {
        let started = Instant::now();
        let result = self.tools.execute(name, args).await;
        let duration_ms = started.elapsed().as_millis() as u64;

        self.event_bus.publish(DomainEvent::ToolExecuted {
            run_id: run_id.to_string(),
            tool_name: name.to_string(),
            success: result.is_ok(),
            duration_ms,
            timestamp: Utc::now(),
        });

        match result {
            Ok(output) => output,
            Err(e) => {
                warn!(%run_id, tool = %name, error = %e, "Tool failed");
                format!("Error: tool '{name}' failed: {e}")
            }
        }
    }

    fn finish(&self, run_id: &str, status: RunStatus, iterations: usize) {
        self.event_bus.publish(DomainEvent::RunFinished {
            run_id: run_id.to_string(),
            status,
            iterations,
            timestamp: Utc::now(),
        });
    }
}

/// The text a run records and acts on for one gateway response.
///
/// Output that is exactly one unit is kept as-is, over-generated output is
/// cut down to its first unit, and output with no unit passes through.
fn select_utterance(raw: &str) -> &str {
    match parser::extract_unit(raw) {
        Ok(unit) if unit.is_exact() => raw,
        Ok(unit) => unit.text,
        Err(_) => raw,
    }
}
