//! Tool trait — the abstraction over agent capabilities.
//!
//! A tool is anything that accepts named string arguments and returns a
//! string or a fault. Tools register by name in a [`ToolRegistry`]; the loop
//! dispatches through the registry and never names a concrete tool.

use async_trait::async_trait;
use std::collections::HashMap;
use crate::error::ToolError;

/// Named string arguments for a tool call, keyed by parameter name.
pub type ToolArgs = HashMap<String, String>;

/// The core Tool trait.
///
/// Implementations must be stateless from the loop's point of view: the
/// registry is shared read-only by concurrent runs.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name the reasoning engine calls this tool by.
    fn name(&self) -> &str;

    /// A description of what this tool does (rendered into the system instruction).
    fn description(&self) -> &str;

    /// Parameter names this tool accepts, in display order.
    fn parameters(&self) -> &[&str];

    /// Execute the tool with the given arguments.
    async fn execute(&self, args: &ToolArgs) -> std::result::Result<String, ToolError>;

    /// Call signature as shown to the reasoning engine, e.g. `get_weather(city: str)`.
    fn signature(&self) -> String {
        let params: Vec<String> = self
            .parameters()
            .iter()
            .map(|p| format!("{p}: str"))
            .collect();
        format!("{}({})", self.name(), params.join(", "))
    }
}

/// Look up a required argument, failing with `InvalidArguments` when absent.
pub fn required_arg<'a>(args: &'a ToolArgs, key: &str) -> std::result::Result<&'a str, ToolError> {
    args.get(key)
        .map(String::as_str)
        .ok_or_else(|| ToolError::InvalidArguments(format!("Missing '{key}' argument")))
}

/// A registry of available tools.
///
/// Built once at startup and then only read. The agent loop uses it to:
/// 1. Render the tool list into the system instruction
/// 2. Check whether an action names a known tool
/// 3. Execute tools when the reasoning engine requests them
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// Whether a tool with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Execute a tool by name.
    pub async fn execute(&self, name: &str, args: &ToolArgs) -> std::result::Result<String, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        tool.execute(args).await
    }

    /// List all registered tool names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// All registered tools, sorted by name.
    pub fn tools(&self) -> Vec<&dyn Tool> {
        self.names()
            .into_iter()
            .filter_map(|name| self.get(name))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A simple test tool for unit tests.
    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str { "echo" }
        fn description(&self) -> &str { "Echoes back the input" }
        fn parameters(&self) -> &[&str] { &["text"] }
        async fn execute(&self, args: &ToolArgs) -> std::result::Result<String, ToolError> {
            Ok(required_arg(args, "text")?.to_string())
        }
    }

    fn args(pairs: &[(&str, &str)]) -> ToolArgs {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn registry_register_and_lookup() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));
        assert!(registry.get("echo").is_some());
        assert!(registry.contains("echo"));
        assert!(registry.get("nonexistent").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn signature_lists_parameters() {
        assert_eq!(EchoTool.signature(), "echo(text: str)");
    }

    #[tokio::test]
    async fn registry_execute_tool() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));

        let output = registry
            .execute("echo", &args(&[("text", "hello world")]))
            .await
            .unwrap();
        assert_eq!(output, "hello world");
    }

    #[tokio::test]
    async fn registry_execute_missing_tool() {
        let registry = ToolRegistry::new();
        let err = registry.execute("nonexistent", &ToolArgs::new()).await.unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[tokio::test]
    async fn missing_required_argument() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));
        let err = registry.execute("echo", &ToolArgs::new()).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
