//! Tool registry - manages and dispatches tool calls
//!
//! Maps tool names to implementations and routes invocations to them.
//! Built once at startup and read-only afterwards; the loop controller
//! receives it by value, so tests can inject doubles.

use std::collections::{BTreeMap, HashMap};

use crate::core::Config;
use crate::tools::{AttractionsTool, Tool, WeatherTool};

/// Registry of available tools
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Create a registry with the built-in travel tools
    pub fn with_default_tools(config: &Config) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(WeatherTool::from_config(config)));
        registry.register(Box::new(AttractionsTool::from_config(config)));
        registry
    }

    /// Register a tool under its own name
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Check whether a tool is registered
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get registered tool names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Get tool count
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if no tools are registered
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Render the tool catalogue for the system prompt
    pub fn describe(&self) -> String {
        self.names()
            .into_iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| format!("- `{}`: {}", tool.usage(), tool.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Dispatch one invocation and return the observation text.
    ///
    /// Never fails: an unknown tool yields a fixed-format error
    /// observation, and a tool error is rendered into error text, so the
    /// loop always has something to feed back to the model.
    pub async fn dispatch(&self, tool_name: &str, arguments: &BTreeMap<String, String>) -> String {
        match self.tools.get(tool_name) {
            None => format!("error: undefined tool {}", tool_name),
            Some(tool) => match tool.call(arguments).await {
                Ok(observation) => observation,
                Err(e) => format!("error: {}", e),
            },
        }
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
    use crate::core::{Result, WayfareError};
    use async_trait::async_trait;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the text argument back"
        }

        fn usage(&self) -> &str {
            r#"echo(text="<text>")"#
        }

        async fn call(&self, args: &BTreeMap<String, String>) -> Result<String> {
            Ok(args.get("text").cloned().unwrap_or_default())
        }
    }

    struct BrokenTool;

    #[async_trait]
    impl Tool for BrokenTool {
        fn name(&self) -> &str {
            "broken"
        }

        fn description(&self) -> &str {
            "Always fails"
        }

        fn usage(&self) -> &str {
            "broken()"
        }

        async fn call(&self, _args: &BTreeMap<String, String>) -> Result<String> {
            Err(WayfareError::tool("backend unavailable"))
        }
    }

    #[tokio::test]
    async fn test_dispatch_registered_tool() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));

        let mut args = BTreeMap::new();
        args.insert("text".to_string(), "hello".to_string());
        assert_eq!(registry.dispatch("echo", &args).await, "hello");
    }

    #[tokio::test]
    async fn test_dispatch_undefined_tool() {
        let registry = ToolRegistry::new();
        let observation = registry.dispatch("get_weather", &BTreeMap::new()).await;
        assert_eq!(observation, "error: undefined tool get_weather");
    }

    #[tokio::test]
    async fn test_dispatch_renders_tool_error_as_observation() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(BrokenTool));

        let observation = registry.dispatch("broken", &BTreeMap::new()).await;
        assert!(observation.starts_with("error:"));
        assert!(observation.contains("backend unavailable"));
    }

    #[test]
    fn test_describe_lists_usage_and_description() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));

        let catalogue = registry.describe();
        assert!(catalogue.contains(r#"echo(text="<text>")"#));
        assert!(catalogue.contains("Echo the text argument back"));
    }

    #[test]
    fn test_names_sorted() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));
        registry.register(Box::new(BrokenTool));
        assert_eq!(registry.names(), vec!["broken", "echo"]);
    }
}
