//! Configuration management for Wayfare
//!
//! Supports environment variables, config files, and runtime overrides.
//!
//! Config file location: ~/.config/wayfare/config.toml

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::core::error::{Result, WayfareError};

/// Main configuration for Wayfare
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Chat service configuration
    pub llm: LlmConfig,
    /// Agent loop configuration
    pub agent: AgentConfig,
    /// Retry policy for transient service failures
    #[serde(default)]
    pub retry: RetryConfig,
    /// Tool backend configuration
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// Chat completion service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API
    pub endpoint: String,
    /// Model identifier sent with every request
    pub model: String,
    /// API key (env: WAYFARE_API_KEY); optional for keyless endpoints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Agent behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Maximum reasoning loop turns per request
    /// Default: 5
    pub max_turns: usize,
    /// Whether to show debug output
    pub debug: bool,
    /// Extra text prepended to the system prompt
    pub system_preamble: Option<String>,
}

/// Retry policy for model and tool backends
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Additional attempts after the first failure
    /// Default: 2
    pub max_retries: u32,
    /// Base delay before the first retry, doubled per attempt
    pub base_delay_ms: u64,
}

/// Tool backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Request timeout for tool HTTP calls in seconds
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            agent: AgentConfig::default(),
            retry: RetryConfig::default(),
            tools: ToolsConfig::default(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: env::var("WAYFARE_ENDPOINT")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            model: env::var("WAYFARE_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            api_key: env::var("WAYFARE_API_KEY").ok(),
            timeout_secs: 60,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_turns: env::var("WAYFARE_MAX_TURNS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            debug: env::var("WAYFARE_DEBUG")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            system_preamble: None,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay_ms: 250,
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wayfare")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load() -> Self {
        // Try to load .env file if it exists
        let _ = dotenvy::dotenv();

        // Try to load from config file
        if let Ok(config) = Self::load_from_file() {
            return config;
        }

        // Fall back to defaults (which respect env vars)
        Self::default()
    }

    /// Load configuration from file only
    pub fn load_from_file() -> Result<Self> {
        let config_path = Self::config_file();

        if !config_path.exists() {
            return Err(WayfareError::config("Config file not found"));
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| WayfareError::config(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| WayfareError::config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir();
        let config_path = Self::config_file();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .map_err(|e| WayfareError::config(format!("Failed to create config dir: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| WayfareError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, content)
            .map_err(|e| WayfareError::config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Check if a config file exists
    pub fn config_exists() -> bool {
        Self::config_file().exists()
    }

    /// Delete the config file
    pub fn delete_config() -> Result<()> {
        let config_path = Self::config_file();
        if config_path.exists() {
            fs::remove_file(&config_path)
                .map_err(|e| WayfareError::config(format!("Failed to delete config: {}", e)))?;
        }
        Ok(())
    }

    /// Update the chat model
    pub fn set_model(&mut self, model: impl Into<String>) {
        self.llm.model = model.into();
    }

    /// Generate a default config file content for display
    pub fn default_config_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config)
            .unwrap_or_else(|_| String::from("# Error generating config"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.agent.max_turns, 5);
        assert_eq!(config.retry.max_retries, 2);
        assert_eq!(config.llm.timeout_secs, 60);
        assert_eq!(config.tools.timeout_secs, 10);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("endpoint"));
        assert!(toml_str.contains("max_turns"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.agent.max_turns = 7;
        config.set_model("test-model");

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.agent.max_turns, 7);
        assert_eq!(parsed.llm.model, "test-model");
    }

    #[test]
    fn test_config_dir() {
        let dir = Config::config_dir();
        assert!(dir.to_string_lossy().contains("wayfare"));
    }
}
