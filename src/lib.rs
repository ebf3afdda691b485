//! Wayfare - a reason-then-act travel assistant agent
//!
//! A single-agent control loop: given a user request, it repeatedly queries
//! a chat model, interprets the reply as either a tool invocation or a
//! final answer, executes the tool, feeds the observation back into the
//! conversation, and repeats until the model finishes or the turn budget
//! runs out.
//!
//! # Architecture
//!
//! - **Core**: Configuration, error handling, and the retry policy
//! - **LLM**: Chat backend abstraction with an OpenAI-compatible client
//! - **Tools**: Tool trait, registry/dispatcher, and the travel tools
//! - **Agent**: Loop controller, directive grammar, conversation history
//! - **CLI**: Command-line interface and REPL
//!
//! # Usage
//!
//! ```rust,no_run
//! use wayfare::{ChatClient, Config, Controller, ToolRegistry};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::load();
//!     let provider = ChatClient::from_config(&config);
//!     let tools = ToolRegistry::with_default_tools(&config);
//!     let controller = Controller::new(config, provider, tools);
//!
//!     let answer = controller
//!         .process("What's the weather in Oslo, and what should I see there?")
//!         .await
//!         .unwrap();
//!     println!("{}", answer);
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod core;
pub mod llm;
pub mod tools;

// Re-export commonly used items
pub use agent::{Controller, Directive};
pub use cli::Repl;
pub use core::{Config, Result, WayfareError};
pub use llm::{ChatClient, LlmProvider};
pub use tools::{Tool, ToolRegistry};
