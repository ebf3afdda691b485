//! Custom error types for Wayfare
//!
//! Provides a unified error handling system across all modules.

use thiserror::Error;

/// Main error type for Wayfare operations
#[derive(Error, Debug)]
pub enum WayfareError {
    /// Chat service API errors (bad credentials, unknown model, ...)
    #[error("LLM service error: {0}")]
    Llm(String),

    /// Chat service temporarily unavailable (overload, outage)
    #[error("LLM service unavailable: {0}")]
    LlmUnavailable(String),

    /// Tool execution errors
    #[error("tool execution failed: {0}")]
    ToolExecution(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The model reply carried no recognizable action
    #[error("no action found")]
    NoActionFound,

    /// The reasoning loop ran out of turns before a final answer
    #[error("iteration budget exhausted")]
    TurnBudgetExhausted,

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error for other cases
    #[error("{0}")]
    Other(String),
}

/// Convenience Result type for Wayfare operations
pub type Result<T> = std::result::Result<T, WayfareError>;

impl WayfareError {
    /// Create an LLM service error
    pub fn llm(msg: impl Into<String>) -> Self {
        Self::Llm(msg.into())
    }

    /// Create a transient LLM service error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::LlmUnavailable(msg.into())
    }

    /// Whether retrying this error can plausibly succeed.
    ///
    /// Transport-level HTTP failures and server-side unavailability are
    /// transient; API rejections, parse failures, and everything else are
    /// permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::LlmUnavailable(_) => true,
            Self::Http(e) => match e.status() {
                Some(status) => {
                    status.is_server_error()
                        || status == reqwest::StatusCode::TOO_MANY_REQUESTS
                }
                // No status: connect, timeout, or body error, unless the
                // response failed to decode.
                None => !e.is_decode(),
            },
            _ => false,
        }
    }

    /// Create a tool execution error
    pub fn tool(msg: impl Into<String>) -> Self {
        Self::ToolExecution(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
