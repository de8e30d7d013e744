//! Output parser — isolates one reasoning unit from raw engine output.
//!
//! Free-running generation often emits several Thought/Action rounds, or a
//! fabricated `Observation:`, in a single reply. Only the first complete
//! round is acted on; everything after it is discarded.
//!
//! Grammar (informal):
//! ```text
//! output     = preamble unit rest
//! preamble   = <any text not containing "Thought:">
//! unit       = "Thought:" reasoning "Action:" clause
//! reasoning  = <any text up to the first "Action:">
//! clause     = <any text up to the next line-leading MARKER, or end of input>
//! rest       = [NEWLINE WS* MARKER <any text>]
//! MARKER     = "Thought:" | "Action:" | "Observation:"
//! ```
//!
//! A marker only ends the clause when it opens a line (after optional
//! whitespace), so an inline mention of `Action:` inside a final answer
//! stays part of the unit.

use thiserror::Error;

pub const THOUGHT_MARKER: &str = "Thought:";
pub const ACTION_MARKER: &str = "Action:";
pub const OBSERVATION_MARKER: &str = "Observation:";

const MARKERS: [&str; 3] = [THOUGHT_MARKER, ACTION_MARKER, OBSERVATION_MARKER];

/// One "reasoning statement + action statement" span, borrowed from the raw output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReasoningUnit<'a> {
    /// The unit, from its `Thought:` marker to the end of its action clause.
    pub text: &'a str,
    /// The action clause: everything after `Action:` within the unit, trimmed.
    pub clause: &'a str,
    /// Text before the `Thought:` marker.
    pub leading: &'a str,
    /// Over-generated text after the unit.
    pub trailing: &'a str,
}

impl ReasoningUnit<'_> {
    /// Whether the raw output was exactly this unit, give or take whitespace.
    pub fn is_exact(&self) -> bool {
        self.leading.trim().is_empty() && self.trailing.trim().is_empty()
    }
}

/// Why no reasoning unit could be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UnitError {
    #[error("no 'Thought:' marker in output")]
    MissingThought,

    #[error("no 'Action:' marker after the thought")]
    MissingAction,
}

/// Extract the earliest, shortest well-formed reasoning unit from `raw`.
pub fn extract_unit(raw: &str) -> Result<ReasoningUnit<'_>, UnitError> {
    let start = raw.find(THOUGHT_MARKER).ok_or(UnitError::MissingThought)?;
    let reasoning_start = start + THOUGHT_MARKER.len();

    let action_at = raw[reasoning_start..]
        .find(ACTION_MARKER)
        .map(|offset| reasoning_start + offset)
        .ok_or(UnitError::MissingAction)?;
    let clause_start = action_at + ACTION_MARKER.len();

    let end = next_line_marker(raw, clause_start).unwrap_or(raw.len());
    let text = raw[start..end].trim_end();
    let clause = raw[clause_start..start + text.len()].trim();

    Ok(ReasoningUnit {
        text,
        clause,
        leading: &raw[..start],
        trailing: &raw[end..],
    })
}

/// Byte offset of the newline that opens the next marker line at or after `from`.
fn next_line_marker(raw: &str, from: usize) -> Option<usize> {
    raw[from..]
        .match_indices('\n')
        .map(|(offset, _)| from + offset)
        .find(|&newline| {
            let line = raw[newline + 1..].trim_start();
            MARKERS.iter().any(|marker| line.starts_with(marker))
        })
}
