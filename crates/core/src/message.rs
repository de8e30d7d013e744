//! Conversation record types.
//!
//! The conversation record is what a run reports back to its caller: every
//! reasoning utterance the loop acted on, every observation it produced, and
//! the completion note. It grows in lockstep with the prompt transcript but
//! is kept separately because it is for display, not prompt assembly.

use serde::{Deserialize, Serialize};

/// Who produced a conversation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A reasoning/action utterance from the reasoning engine
    Assistant,
    /// An observation or note written by the loop
    System,
}

/// A single role-tagged entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create an assistant entry.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Create a system entry.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// Ordered, append-only record of a run, serialized as a plain array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationRecord {
    messages: Vec<Message>,
}

impl ConversationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Entries are never removed or reordered.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of reasoning/action rounds, i.e. assistant entries.
    pub fn rounds(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.role == Role::Assistant)
            .count()
    }
}
