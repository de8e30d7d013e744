//! Domain event system — lets hosts observe runs without coupling to the loop.
//!
//! The agent publishes an event at each notable step of a run. Subscribers
//! (logging sinks, dashboards, tests) filter for what they care about.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

/// How a run ended, as reported on the event bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    Exhausted,
    Faulted,
}

/// All domain events in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DomainEvent {
    /// A loop run started for a user prompt
    RunStarted {
        run_id: String,
        prompt_preview: String,
        timestamp: DateTime<Utc>,
    },

    /// The reasoning engine answered one iteration
    ResponseGenerated {
        run_id: String,
        model: String,
        iteration: usize,
        tokens_used: Option<u32>,
        timestamp: DateTime<Utc>,
    },

    /// A tool was executed
    ToolExecuted {
        run_id: String,
        tool_name: String,
        success: bool,
        duration_ms: u64,
        timestamp: DateTime<Utc>,
    },

    /// A loop run ended
    RunFinished {
        run_id: String,
        status: RunStatus,
        iterations: usize,
        timestamp: DateTime<Utc>,
    },
}

/// A broadcast-based event bus for domain events.
///
/// Uses `tokio::sync::broadcast` for multi-consumer pub/sub.
pub struct EventBus {
    sender: broadcast::Sender<Arc<DomainEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers.
    pub fn publish(&self, event: DomainEvent) {
        // No subscribers is fine
        let _ = self.sender.send(Arc::new(event));
    }

    /// Subscribe to receive events.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<DomainEvent>> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
