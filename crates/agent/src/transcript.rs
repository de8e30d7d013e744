//! The append-only transcript a run rebuilds each prompt from.

/// Prefix for the seed line of every transcript.
pub const USER_REQUEST_PREFIX: &str = "User request: ";

/// Ordered dialogue lines: the user request, then utterances and observations.
///
/// Lines are never removed, reordered, or edited once pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    /// Start a transcript with the user's request.
    pub fn seed(prompt: &str) -> Self {
        Self {
            lines: vec![format!("{USER_REQUEST_PREFIX}{prompt}")],
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// The prompt for the next gateway call.
    pub fn assemble(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_with_user_request() {
        let transcript = Transcript::seed("weather in Paris?");
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.assemble(), "User request: weather in Paris?");
    }

    #[test]
    fn assemble_joins_in_order() {
        let mut transcript = Transcript::seed("q");
        transcript.push("Thought: a\nAction: get_weather(city=\"X\")");
        transcript.push("Observation: sunny");
        assert_eq!(
            transcript.assemble(),
            "User request: q\nThought: a\nAction: get_weather(city=\"X\")\nObservation: sunny"
        );
        assert_eq!(transcript.lines()[2], "Observation: sunny");
    }
}
