//! Mock Advisory Client
//!
//! For testing and demo purposes. Returns realistic static advisories.

use async_trait::async_trait;

use super::{CountryAdvisory, TravelAdvisoryClient};
use crate::error::{NavigatorError, Result};

/// Mock advisory client with static data for a few destinations
pub struct MockAdvisoryClient;

impl Default for MockAdvisoryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAdvisoryClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TravelAdvisoryClient for MockAdvisoryClient {
    async fn advisory(&self, country: &str) -> Result<CountryAdvisory> {
        let slug = super::country_slug(country);

        let (name, health) = match slug.as_str() {
            "kenya" => (
                "Kenya",
                serde_json::json!({
                    "vaccines": ["yellow fever", "typhoid", "hepatitis A"],
                    "malaria": "Present in most regions below 2500m",
                    "water": "Drink bottled or boiled water"
                }),
            ),
            "japan" => (
                "Japan",
                serde_json::json!({
                    "vaccines": ["routine immunizations"],
                    "malaria": "Not present",
                    "water": "Tap water is safe"
                }),
            ),
            "costa-rica" => (
                "Costa Rica",
                serde_json::json!({
                    "vaccines": ["hepatitis A", "typhoid"],
                    "malaria": "Limited risk in some provinces",
                    "water": "Generally safe in urban areas"
                }),
            ),
            _ => {
                return Err(NavigatorError::Advisory(format!(
                    "no advisory data for '{}'",
                    country
                )))
            }
        };

        Ok(CountryAdvisory {
            country_input: country.to_string(),
            country_resolved: Some(name.to_string()),
            advisories: Some(serde_json::json!({
                "description": "Exercise normal security precautions"
            })),
            health: Some(health),
            safety: None,
            entry_exit: None,
            sources: vec!["Mock advisory data".into()],
        })
    }

    fn name(&self) -> &str {
        "MockAdvisory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_advisory_known_country() {
        let client = MockAdvisoryClient;
        let advisory = client.advisory("Kenya").await.unwrap();
        assert_eq!(advisory.country_resolved.as_deref(), Some("Kenya"));
        assert!(advisory.to_text().contains("yellow fever"));
    }

    #[tokio::test]
    async fn test_mock_advisory_unknown_country() {
        let client = MockAdvisoryClient;
        assert!(client.advisory("Atlantis").await.is_err());
    }
}
