//! Chat completion client
//!
//! Async HTTP client for an OpenAI-compatible chat completions API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::core::{Config, Result, WayfareError};
use crate::llm::traits::LlmProvider;

/// Client for an OpenAI-compatible `/chat/completions` endpoint
#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    debug: bool,
}

/// Chat completion request
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

/// Message in a chat request
#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Chat completion response
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

/// One completion choice
#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

/// Message in a completion choice
#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatClient {
    /// Create a new chat client from configuration
    pub fn from_config(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.llm.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint: config.llm.endpoint.trim_end_matches('/').to_string(),
            model: config.llm.model.clone(),
            api_key: config.llm.api_key.clone(),
            debug: config.agent.debug,
        }
    }

    /// Get the configured model identifier
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Debug print if enabled
    fn debug_print(&self, label: &str, content: &str) {
        if self.debug {
            if content.len() > DEBUG_CLIP_BYTES {
                eprintln!("DEBUG {}: {}...", label, clip(content, DEBUG_CLIP_BYTES));
            } else {
                eprintln!("DEBUG {}: {}", label, content);
            }
        }
    }
}

const DEBUG_CLIP_BYTES: usize = 500;

/// Truncate to at most `limit` bytes without splitting a character
fn clip(content: &str, limit: usize) -> &str {
    if content.len() <= limit {
        return content;
    }
    let mut end = limit;
    while !content.is_char_boundary(end) {
        end -= 1;
    }
    &content[..end]
}

#[async_trait]
impl LlmProvider for ChatClient {
    async fn generate(&self, system_prompt: &str, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        self.debug_print("prompt", prompt);

        let url = format!("{}/chat/completions", self.endpoint);
        let mut builder = self.client.post(&url).json(&request);
        if let Some(ref key) = self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = format!("chat API returned {}: {}", status, body);
            // Server-side trouble is worth retrying; rejections like bad
            // credentials or an unknown model are not.
            return Err(
                if status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    WayfareError::unavailable(message)
                } else {
                    WayfareError::llm(message)
                },
            );
        }

        let parsed: ChatResponse = response.json().await?;
        let reply = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| WayfareError::llm("chat API returned an empty completion"))?;

        self.debug_print("reply", &reply);
        Ok(reply)
    }

    fn name(&self) -> &str {
        "openai-compatible"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "instructions",
                },
                ChatMessage {
                    role: "user",
                    content: "weather in Oslo",
                },
            ],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "weather in Oslo");
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "Thought: ok\nAction: finish(answer=\"done\")"}}
            ]
        }"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        let content = parsed.choices[0].message.content.as_deref().unwrap();
        assert!(content.contains("finish(answer="));
    }

    #[test]
    fn test_response_with_missing_content() {
        let body = r#"{"choices": [{"message": {"role": "assistant"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
    }

    #[test]
    fn test_clip_backs_off_to_char_boundary() {
        // Byte 500 falls inside the euro sign; the clip must not split it.
        let mut content = "a".repeat(499);
        content.push('€');
        let clipped = clip(&content, 500);
        assert_eq!(clipped.len(), 499);
        assert!(content.starts_with(clipped));
    }

    #[test]
    fn test_clip_passes_short_content_through() {
        assert_eq!(clip("short", 500), "short");
        let exact = "b".repeat(500);
        assert_eq!(clip(&exact, 500), exact);
    }

    #[test]
    fn test_debug_print_with_multibyte_content() {
        let mut config = Config::default();
        config.agent.debug = true;
        let client = ChatClient::from_config(&config);

        let mut content = "a".repeat(499);
        content.push('€');
        content.push_str(" and more text after the boundary");
        client.debug_print("reply", &content);
    }
}
