//! TuGo Travel Advisory Client
//!
//! Fetches advisory, health and safety information for a country from
//! TuGo's Travel Advisory API (targeted primarily to Canadian travellers).

use async_trait::async_trait;
use std::time::Duration;

use super::{country_slug, CountryAdvisory, TravelAdvisoryClient};
use crate::error::{NavigatorError, Result};

const API_BASE: &str = "https://api.tugo.com/v1/travelsafe/countries";
const AUTH_HEADER: &str = "X-Auth-API-Key";

/// TuGo API client
pub struct TugoClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl TugoClient {
    /// Create a client. A missing key yields a `MissingCredential` error
    /// at call time rather than at startup.
    pub fn new(api_key: Option<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            http,
            api_key,
            base_url: API_BASE.into(),
        }
    }

    /// Override the API base URL (for tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Normalise the raw response body into a [`CountryAdvisory`]
    fn normalize(country_input: &str, data: serde_json::Value) -> CountryAdvisory {
        let country_resolved = data
            .get("country")
            .and_then(|c| c.get("name"))
            .and_then(|n| n.as_str())
            .map(String::from);

        CountryAdvisory {
            country_input: country_input.to_string(),
            country_resolved,
            advisories: data.get("advisories").cloned(),
            health: data.get("health").cloned(),
            safety: data.get("safety").cloned(),
            entry_exit: data.get("entryExit").cloned(),
            sources: vec![
                "TuGo Travel Advisory API (targeted primarily to Canadian travellers)".into(),
            ],
        }
    }
}

#[async_trait]
impl TravelAdvisoryClient for TugoClient {
    async fn advisory(&self, country: &str) -> Result<CountryAdvisory> {
        if country.trim().is_empty() {
            return Err(NavigatorError::Advisory("country is required".into()));
        }

        let api_key = self
            .api_key
            .as_deref()
            .ok_or(NavigatorError::MissingCredential("TUGO_API_KEY"))?;

        let slug = country_slug(country);
        let url = format!("{}/{}", self.base_url, slug);

        tracing::info!(country = %slug, "fetching travel advisory");

        let response = self
            .http
            .get(&url)
            .header(AUTH_HEADER, api_key)
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

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| NavigatorError::Advisory(format!("failed to parse response: {}", e)))?;

        Ok(Self::normalize(country, data))
    }

    fn name(&self) -> &str {
        "TuGo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_country_is_rejected() {
        let client = TugoClient::new(Some("key".into()));
        let result = client.advisory("  ").await;
        assert!(matches!(result, Err(NavigatorError::Advisory(_))));
    }

    #[tokio::test]
    async fn test_missing_key_errors_before_any_request() {
        let client = TugoClient::new(None);
        let result = client.advisory("Kenya").await;
        assert!(matches!(
            result,
            Err(NavigatorError::MissingCredential("TUGO_API_KEY"))
        ));
    }

    #[test]
    fn test_normalize_extracts_sections() {
        let data = serde_json::json!({
            "country": {"name": "Kenya"},
            "advisories": {"description": "Exercise a high degree of caution"},
            "health": {"vaccines": ["yellow fever"]},
            "safety": {"crime": "Petty crime is common"},
            "entryExit": {"visa": "required"}
        });

        let advisory = TugoClient::normalize("kenya", data);
        assert_eq!(advisory.country_resolved.as_deref(), Some("Kenya"));
        assert!(advisory.advisories.is_some());
        assert!(advisory.health.is_some());
        assert!(advisory.safety.is_some());
        assert!(advisory.entry_exit.is_some());
        assert_eq!(advisory.sources.len(), 1);
    }

    #[test]
    fn test_normalize_tolerates_missing_sections() {
        let advisory = TugoClient::normalize("narnia", serde_json::json!({}));
        assert_eq!(advisory.country_input, "narnia");
        assert!(advisory.country_resolved.is_none());
        assert!(advisory.health.is_none());
    }
}
