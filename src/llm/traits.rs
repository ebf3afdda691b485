//! LLM provider trait for abstracting chat backends
//!
//! The loop controller only ever sees this narrow interface, so hosted
//! APIs, local inference servers, and test doubles are interchangeable.

use async_trait::async_trait;

use crate::core::Result;

/// A chat-completion backend.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate one reply for the serialized conversation.
    ///
    /// `system_prompt` carries the fixed instructions; `prompt` is the
    /// replayed history. A service failure is returned as an error, never
    /// encoded into the reply text.
    async fn generate(&self, system_prompt: &str, prompt: &str) -> Result<String>;

    /// Get the provider name
    fn name(&self) -> &str;
}
