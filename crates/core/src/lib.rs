//! # Wayfarer Core
//!
//! Domain types, traits, and error definitions for the Wayfarer
//! reason-then-act agent. This crate defines the boundaries every other
//! crate implements against: the reasoning gateway ([`Provider`]), the tool
//! capability ([`Tool`] and [`ToolRegistry`]), and the conversation record a
//! run reports back.
//!
//! Implementations live in their respective crates, so the loop can be
//! tested with scripted providers and in-test tools.

pub mod error;
pub mod event;
pub mod message;
pub mod provider;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{Error, InputError, ProviderError, ToolError};
pub use event::{DomainEvent, EventBus, RunStatus};
pub use message::{ConversationRecord, Message, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
pub use tool::{Tool, ToolArgs, ToolRegistry, required_arg};
