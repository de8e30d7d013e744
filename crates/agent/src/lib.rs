//! The reason-then-act loop for Wayfarer.
//!
//! The agent follows a **Thought → Action → Observation** cycle:
//!
//! 1. **Seed** a transcript with the user's request
//! 2. **Ask** the reasoning engine for one Thought/Action pair
//! 3. **Parse** the first reasoning unit out of its (possibly noisy) output
//! 4. **Act**: call a tool, or stop on `Finish[...]`
//! 5. **Observe**: append the result (or a correction) and loop back to step 2
//!
//! The loop stops at the first final answer or when the iteration budget is
//! spent. Only a reasoning-gateway fault ends a run early.

pub mod action;
pub mod parser;
pub mod prompt;
pub mod react;
pub mod transcript;

#[cfg(test)]
mod test_helpers;

pub use action::{Action, ActionClause, ActionInterpreter, ClauseError, FORMAT_CORRECTION};
pub use parser::{ReasoningUnit, UnitError, extract_unit};
pub use prompt::system_instruction;
pub use react::{LoopOutcome, LoopSettings, ReactAgent, UserPrompt};
pub use transcript::Transcript;
