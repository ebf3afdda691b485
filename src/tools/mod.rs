//! Tools module - tool trait, registry, and built-in tools

pub mod attractions;
pub mod registry;
pub mod weather;

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::core::Result;

pub use attractions::AttractionsTool;
pub use registry::ToolRegistry;
pub use weather::WeatherTool;

/// A named tool the model can invoke.
///
/// Arguments are untyped text pairs; each tool validates its own required
/// keys and reports missing ones as error text in the returned
/// observation. Backend failures (network, payload shape) come back as
/// errors and are rendered into error observations by the dispatcher.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name, as the model must spell it in an action
    fn name(&self) -> &str;

    /// One-line description for the system prompt
    fn description(&self) -> &str;

    /// Call syntax for the system prompt, e.g. `get_weather(city="<city>")`
    fn usage(&self) -> &str;

    /// Execute the tool with the parsed arguments
    async fn call(&self, args: &BTreeMap<String, String>) -> Result<String>;
}

/// Observation text for a required argument the model did not supply
pub(crate) fn missing_argument(tool: &str, key: &str) -> String {
    format!("error: missing required argument \"{}\" for {}", key, tool)
}
