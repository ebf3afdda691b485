//! LLM module - chat backend abstraction
//!
//! Provider trait plus the OpenAI-compatible HTTP client.

pub mod client;
pub mod traits;

pub use client::ChatClient;
pub use traits::LlmProvider;
