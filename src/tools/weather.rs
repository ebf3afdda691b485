//! Weather lookup tool
//!
//! Queries real weather via the wttr.in JSON API.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::core::retry::with_backoff;
use crate::core::{Config, Result, RetryConfig};
use crate::tools::{missing_argument, Tool};

/// Tool for looking up the current weather in a city
pub struct WeatherTool {
    client: Client,
    retry: RetryConfig,
}

impl WeatherTool {
    /// Create a weather tool from configuration
    pub fn from_config(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.tools.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            retry: config.retry.clone(),
        }
    }

    async fn fetch(&self, city: &str) -> Result<serde_json::Value> {
        let url = format!("https://wttr.in/{}?format=j1", city);
        let response = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response)
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Look up the current weather for a city"
    }

    fn usage(&self) -> &str {
        r#"get_weather(city="<city name>")"#
    }

    async fn call(&self, args: &BTreeMap<String, String>) -> Result<String> {
        let Some(city) = args.get("city") else {
            return Ok(missing_argument(self.name(), "city"));
        };

        let data = with_backoff(&self.retry, || self.fetch(city)).await?;

        Ok(render_current_conditions(city, &data).unwrap_or_else(|| {
            format!(
                "error: could not read weather data for {}, the city name may be invalid",
                city
            )
        }))
    }
}

/// Pull the current conditions out of a wttr.in `format=j1` payload.
///
/// Expected shape: `current_condition[0].weatherDesc[0].value` and
/// `current_condition[0].temp_C`.
fn render_current_conditions(city: &str, data: &serde_json::Value) -> Option<String> {
    let current = data.get("current_condition")?.get(0)?;
    let description = current
        .get("weatherDesc")?
        .get(0)?
        .get("value")?
        .as_str()?;
    let temp_c = current.get("temp_C")?.as_str()?;
    Some(format!("{}: {}, {}C", city, description, temp_c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_current_conditions() {
        let payload = json!({
            "current_condition": [{
                "weatherDesc": [{"value": "Sunny"}],
                "temp_C": "20"
            }]
        });
        assert_eq!(
            render_current_conditions("Oslo", &payload).unwrap(),
            "Oslo: Sunny, 20C"
        );
    }

    #[test]
    fn test_render_rejects_malformed_payload() {
        let payload = json!({"current_condition": []});
        assert!(render_current_conditions("Oslo", &payload).is_none());

        let payload = json!({"nearest_area": []});
        assert!(render_current_conditions("Oslo", &payload).is_none());
    }

    #[tokio::test]
    async fn test_missing_city_reported_inline() {
        let tool = WeatherTool::from_config(&Config::default());
        let observation = tool.call(&BTreeMap::new()).await.unwrap();
        assert_eq!(
            observation,
            "error: missing required argument \"city\" for get_weather"
        );
    }
}
