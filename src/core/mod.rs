//! Core module - shared configuration, error handling, and retry policy

pub mod config;
pub mod error;
pub mod retry;

pub use config::{AgentConfig, Config, LlmConfig, RetryConfig, ToolsConfig};
pub use error::{Result, WayfareError};
