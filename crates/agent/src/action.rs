//! Action interpreter — turns an action clause into a typed command.
//!
//! Grammar (informal):
//! ```text
//! clause   = ["`"] (finish | call) ["`"]
//! finish   = "Finish" WS* "[" answer "]"
//! answer   = <any text up to the LAST "]" in the clause>
//! call     = IDENT WS* "(" [arg ("," arg)* [","]] ")" <ignored>
//! arg      = IDENT WS* "=" WS* '"' <any text without '"'> '"'
//! IDENT    = (letter | "_") (letter | digit | "_")*
//! ```
//!
//! Argument values have no escape syntax: a value ends at the first `"`.
//! Every failure becomes [`Action::Malformed`] with a reason the reasoning
//! engine can read and correct on its next turn.

use thiserror::Error;
use wayfarer_core::tool::{ToolArgs, ToolRegistry};

use crate::parser::{self, UnitError};

/// Keyword that ends the loop with a final answer.
pub const FINISH_KEYWORD: &str = "Finish";

/// Observation sent back when the output has no usable Thought/Action pair.
pub const FORMAT_CORRECTION: &str = "Error: could not parse an Action field. Make sure your reply strictly follows the 'Thought: ... Action: ...' format.";

/// A typed command derived from one reasoning unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Invoke a registered tool.
    ToolCall { name: String, args: ToolArgs },
    /// Stop with a final answer.
    Finish { answer: String },
    /// The clause could not be understood; `reason` is fed back verbatim.
    Malformed { reason: String },
    /// The clause names a tool that is not registered.
    UnknownTool { name: String },
}

/// A syntactically valid clause, before the registry is consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionClause {
    Finish(String),
    Call { name: String, args: ToolArgs },
}

/// Syntax errors in an action clause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClauseError {
    #[error("the Action field is empty")]
    Empty,

    #[error("expected a tool name or Finish, found '{0}'")]
    ExpectedName(char),

    #[error("Finish must be followed by [final answer]")]
    FinishWithoutBracket,

    #[error("Finish[ is missing its closing ']'")]
    UnterminatedFinish,

    #[error("expected '(' after tool name '{0}'")]
    ExpectedOpenParen(String),

    #[error("expected an argument name in the call to '{0}'")]
    ExpectedArgName(String),

    #[error("expected '=' after argument '{0}'")]
    ExpectedEquals(String),

    #[error("the value of argument '{0}' must be a double-quoted string")]
    ExpectedQuotedValue(String),

    #[error("the value of argument '{0}' is missing its closing '\"'")]
    UnterminatedValue(String),

    #[error("expected ',' or ')' after argument '{0}'")]
    ExpectedSeparator(String),

    #[error("argument '{0}' is given more than once")]
    DuplicateArgument(String),

    #[error("the call to '{0}' is missing its closing ')'")]
    UnclosedCall(String),
}

/// Converts reasoning units into [`Action`]s against a fixed tool registry.
pub struct ActionInterpreter<'a> {
    tools: &'a ToolRegistry,
}

impl<'a> ActionInterpreter<'a> {
    pub fn new(tools: &'a ToolRegistry) -> Self {
        Self { tools }
    }

    /// Interpret a reasoning unit (or raw output when no unit was found).
    ///
    /// Text without a well-formed Thought/Action pair yields the format
    /// correction; never panics on arbitrary input.
    pub fn interpret(&self, text: &str) -> Action {
        let clause = match parser::extract_unit(text) {
            Ok(unit) => unit.clause,
            Err(UnitError::MissingThought | UnitError::MissingAction) => {
                return Action::Malformed {
                    reason: FORMAT_CORRECTION.to_string(),
                };
            }
        };

        match parse_clause(clause) {
            Ok(ActionClause::Finish(answer)) => Action::Finish { answer },
            Ok(ActionClause::Call { name, .. }) if !self.tools.contains(&name) => {
                Action::UnknownTool { name }
            }
            Ok(ActionClause::Call { name, args }) => Action::ToolCall { name, args },
            Err(e) => Action::Malformed {
                reason: format!(
                    "Error: could not parse the Action: {e}. Use function_name(arg_name=\"arg_value\") or {FINISH_KEYWORD}[final answer]."
                ),
            },
        }
    }

    /// Observation text for an action naming an unregistered tool.
    pub fn unknown_tool_message(&self, name: &str) -> String {
        format!(
            "Error: undefined tool '{name}'. Available tools: {}",
            self.tools.names().join(", ")
        )
    }
}

/// Parse an action clause into its syntactic form.
pub fn parse_clause(clause: &str) -> Result<ActionClause, ClauseError> {
    let clause = strip_backticks(clause.trim());
    let mut cursor = Cursor::new(clause);

    let name = match cursor.peek() {
        None => return Err(ClauseError::Empty),
        Some(c) => cursor.ident().ok_or(ClauseError::ExpectedName(c))?,
    };

    cursor.skip_ws();
    if name == FINISH_KEYWORD {
        if !cursor.eat('[') {
            return Err(ClauseError::FinishWithoutBracket);
        }
        let rest = cursor.rest();
        let close = rest.rfind(']').ok_or(ClauseError::UnterminatedFinish)?;
        return Ok(ActionClause::Finish(rest[..close].to_string()));
    }

    if !cursor.eat('(') {
        return Err(ClauseError::ExpectedOpenParen(name.to_string()));
    }
    let args = parse_args(&mut cursor, name)?;
    Ok(ActionClause::Call {
        name: name.to_string(),
        args,
    })
}

/// Parse `key="value"` pairs up to and including the closing `)`.
fn parse_args(cursor: &mut Cursor<'_>, tool: &str) -> Result<ToolArgs, ClauseError> {
    let mut args = ToolArgs::new();
    loop {
        cursor.skip_ws();
        if cursor.peek().is_none() {
            return Err(ClauseError::UnclosedCall(tool.to_string()));
        }
        if cursor.eat(')') {
            return Ok(args);
        }

        let key = cursor
            .ident()
            .ok_or_else(|| ClauseError::ExpectedArgName(tool.to_string()))?;
        cursor.skip_ws();
        if !cursor.eat('=') {
            return Err(ClauseError::ExpectedEquals(key.to_string()));
        }
        cursor.skip_ws();
        let value = cursor.quoted(key)?;
        if args.insert(key.to_string(), value.to_string()).is_some() {
            return Err(ClauseError::DuplicateArgument(key.to_string()));
        }

        cursor.skip_ws();
        if cursor.eat(',') {
            continue;
        }
        if cursor.eat(')') {
            return Ok(args);
        }
        if cursor.peek().is_none() {
            return Err(ClauseError::UnclosedCall(tool.to_string()));
        }
        return Err(ClauseError::ExpectedSeparator(key.to_string()));
    }
}

/// Drop a surrounding pair of code-span backticks, as in "`get_weather(...)`".
fn strip_backticks(clause: &str) -> &str {
    if clause.starts_with('`') {
        clause.trim_matches('`').trim()
    } else {
        clause
    }
}

// ─── Cursor ──────────────────────────────────────────────────────────

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn ident(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        let mut chars = rest.char_indices();
        match chars.next() {
            Some((_, c)) if c.is_alphabetic() || c == '_' => {}
            _ => return None,
        }
        let len = chars
            .find(|&(_, c)| !(c.is_alphanumeric() || c == '_'))
            .map_or(rest.len(), |(i, _)| i);
        self.pos += len;
        Some(&rest[..len])
    }

    fn quoted(&mut self, key: &str) -> Result<&'a str, ClauseError> {
        if !self.eat('"') {
            return Err(ClauseError::ExpectedQuotedValue(key.to_string()));
        }
        let rest = self.rest();
        let close = rest
            .find('"')
            .ok_or_else(|| ClauseError::UnterminatedValue(key.to_string()))?;
        self.pos += close + 1;
        Ok(&rest[..close])
    }
}
