//! Attraction search tool
//!
//! Searches for sights to recommend in a city via the DuckDuckGo Instant
//! Answer API. The weather argument biases the query so the model can ask
//! for suggestions that fit the conditions it just observed.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::core::retry::with_backoff;
use crate::core::{Config, Result, RetryConfig};
use crate::tools::{missing_argument, Tool};

const SEARCH_ENDPOINT: &str = "https://api.duckduckgo.com/";
const MAX_SUGGESTIONS: usize = 5;

/// Tool for finding attractions in a city
pub struct AttractionsTool {
    client: Client,
    retry: RetryConfig,
}

/// Instant Answer API response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "AbstractText", default)]
    abstract_text: String,
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<RelatedTopic>,
}

/// One related topic; topic groups carry no text of their own
#[derive(Debug, Deserialize)]
struct RelatedTopic {
    #[serde(rename = "Text", default)]
    text: Option<String>,
}

impl AttractionsTool {
    /// Create an attractions tool from configuration
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

    async fn search(&self, query: &str) -> Result<SearchResponse> {
        let response = self
            .client
            .get(SEARCH_ENDPOINT)
            .query(&[("q", query), ("format", "json"), ("no_html", "1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response)
    }
}

#[async_trait]
impl Tool for AttractionsTool {
    fn name(&self) -> &str {
        "find_attractions"
    }

    fn description(&self) -> &str {
        "Search for recommended sights in a city, given the current weather"
    }

    fn usage(&self) -> &str {
        r#"find_attractions(city="<city name>", weather="<current weather>")"#
    }

    async fn call(&self, args: &BTreeMap<String, String>) -> Result<String> {
        let Some(city) = args.get("city") else {
            return Ok(missing_argument(self.name(), "city"));
        };
        let weather = args.get("weather").map(String::as_str).unwrap_or("");

        let query = if weather.is_empty() {
            format!("top sights in {}", city)
        } else {
            format!("top sights in {} {}", city, weather)
        };

        let response = with_backoff(&self.retry, || self.search(&query)).await?;
        Ok(render_suggestions(city, weather, &response))
    }
}

/// Render the search response as suggestion lines
fn render_suggestions(city: &str, weather: &str, response: &SearchResponse) -> String {
    let mut lines = Vec::new();

    if !response.abstract_text.is_empty() {
        lines.push(response.abstract_text.clone());
    }

    lines.extend(
        response
            .related_topics
            .iter()
            .filter_map(|topic| topic.text.as_deref())
            .take(MAX_SUGGESTIONS)
            .map(|text| format!("- {}", text)),
    );

    if lines.is_empty() {
        return format!("no attraction suggestions found for {}", city);
    }

    let header = if weather.is_empty() {
        format!("Suggested sights in {}:", city)
    } else {
        format!("Suggested sights in {} (weather: {}):", city, weather)
    };
    format!("{}\n{}", header, lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_with_abstract_and_topics() {
        let response = SearchResponse {
            abstract_text: "Oslo is the capital of Norway.".to_string(),
            related_topics: vec![
                RelatedTopic {
                    text: Some("Vigeland Park - sculpture park".to_string()),
                },
                RelatedTopic { text: None },
                RelatedTopic {
                    text: Some("Akershus Fortress - medieval castle".to_string()),
                },
            ],
        };

        let rendered = render_suggestions("Oslo", "sunny, 20C", &response);
        assert!(rendered.starts_with("Suggested sights in Oslo (weather: sunny, 20C):"));
        assert!(rendered.contains("Oslo is the capital of Norway."));
        assert!(rendered.contains("- Vigeland Park"));
        assert!(rendered.contains("- Akershus Fortress"));
    }

    #[test]
    fn test_render_empty_response() {
        let response = SearchResponse {
            abstract_text: String::new(),
            related_topics: Vec::new(),
        };
        assert_eq!(
            render_suggestions("Oslo", "", &response),
            "no attraction suggestions found for Oslo"
        );
    }

    #[test]
    fn test_suggestion_cap() {
        let response = SearchResponse {
            abstract_text: String::new(),
            related_topics: (0..10)
                .map(|i| RelatedTopic {
                    text: Some(format!("Sight {}", i)),
                })
                .collect(),
        };
        let rendered = render_suggestions("Oslo", "", &response);
        assert_eq!(rendered.matches("- Sight").count(), MAX_SUGGESTIONS);
    }

    #[tokio::test]
    async fn test_missing_city_reported_inline() {
        let tool = AttractionsTool::from_config(&Config::default());
        let observation = tool.call(&BTreeMap::new()).await.unwrap();
        assert_eq!(
            observation,
            "error: missing required argument \"city\" for find_attractions"
        );
    }
}
