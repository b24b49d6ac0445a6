//! Google Custom Search Client
//!
//! Calls the Custom Search JSON API. The engine ID is expected to restrict
//! results to cdc.gov and who.int.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::{GuidelineSearchClient, SearchHit, MAX_HITS};
use crate::error::{NavigatorError, Result};

const API_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Custom Search JSON API client
pub struct GoogleCustomSearchClient {
    http: reqwest::Client,
    api_key: Option<String>,
    engine_id: Option<String>,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

impl GoogleCustomSearchClient {
    /// Create a client. Credentials may be absent; queries will then fail
    /// with a `MissingCredential` error at call time.
    pub fn new(api_key: Option<String>, engine_id: Option<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            http,
            api_key,
            engine_id,
        }
    }
}

#[async_trait]
impl GuidelineSearchClient for GoogleCustomSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(NavigatorError::MissingCredential("SEARCH_API_KEY"))?;
        let engine_id = self
            .engine_id
            .as_deref()
            .ok_or(NavigatorError::MissingCredential("SEARCH_ENGINE_ID"))?;

        tracing::info!(query, "guideline search");

        let response = self
            .http
            .get(API_URL)
            .query(&[
                ("key", api_key),
                ("cx", engine_id),
                ("q", query),
                ("num", &MAX_HITS.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NavigatorError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| NavigatorError::Search(format!("invalid search response: {}", e)))?;

        Ok(parsed
            .items
            .into_iter()
            .map(|item| SearchHit {
                title: item.title,
                link: item.link,
                snippet: item.snippet,
            })
            .collect())
    }

    fn name(&self) -> &str {
        "GoogleCustomSearch"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_credentials_error_before_any_request() {
        let client = GoogleCustomSearchClient::new(None, Some("engine".into()));
        let result = client.search("measles vaccine").await;
        assert!(matches!(
            result,
            Err(NavigatorError::MissingCredential("SEARCH_API_KEY"))
        ));
    }

    #[test]
    fn test_response_parsing() {
        let body = serde_json::json!({
            "items": [
                {
                    "title": "Measles | CDC",
                    "link": "https://www.cdc.gov/measles/index.html",
                    "snippet": "Measles is a highly contagious virus..."
                }
            ]
        });

        let parsed: SearchResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].title, "Measles | CDC");
    }

    #[test]
    fn test_response_without_items_parses_empty() {
        let parsed: SearchResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(parsed.items.is_empty());
    }
}
