//! Travel Advisory
//!
//! Destination-risk information from a travel advisory service,
//! normalised into a single structure agents can summarise.

mod mock;
mod tugo;

pub use mock::MockAdvisoryClient;
pub use tugo::TugoClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Normalised advisory for one destination country
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CountryAdvisory {
    /// Country as the caller supplied it
    pub country_input: String,

    /// Country name as the advisory service resolved it
    pub country_resolved: Option<String>,

    /// Official advisories (climate of risk, regional warnings)
    pub advisories: Option<serde_json::Value>,

    /// Health section (vaccines, outbreaks, food/water precautions)
    pub health: Option<serde_json::Value>,

    /// Safety and security section
    pub safety: Option<serde_json::Value>,

    /// Entry and exit requirements
    pub entry_exit: Option<serde_json::Value>,

    /// Human-readable provenance notes
    pub sources: Vec<String>,
}

impl CountryAdvisory {
    /// Render the advisory as text for the agent conversation
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        let name = self
            .country_resolved
            .as_deref()
            .unwrap_or(&self.country_input);
        out.push_str(&format!("Travel advisory for {}:\n", name));

        let sections: [(&str, &Option<serde_json::Value>); 4] = [
            ("Advisories", &self.advisories),
            ("Health", &self.health),
            ("Safety", &self.safety),
            ("Entry/Exit", &self.entry_exit),
        ];

        for (label, value) in sections {
            if let Some(value) = value {
                out.push_str(&format!("\n## {}\n{}\n", label, render_section(value)));
            }
        }

        if !self.sources.is_empty() {
            out.push_str(&format!("\nSources: {}\n", self.sources.join("; ")));
        }

        out
    }
}

/// Flatten a JSON section into readable lines
fn render_section(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(|item| format!("- {}", render_section(item)))
            .collect::<Vec<_>>()
            .join("\n"),
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{}: {}", k, render_section(v)))
            .collect::<Vec<_>>()
            .join("\n"),
        other => other.to_string(),
    }
}

/// Normalise a country name into the slug the advisory API expects
pub fn country_slug(country: &str) -> String {
    country.trim().to_lowercase().replace(' ', "-")
}

/// Travel advisory client trait (Strategy pattern)
#[async_trait]
pub trait TravelAdvisoryClient: Send + Sync {
    /// Fetch the advisory for a destination country
    async fn advisory(&self, country: &str) -> Result<CountryAdvisory>;

    /// Service name
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_slug() {
        assert_eq!(country_slug("Costa Rica"), "costa-rica");
        assert_eq!(country_slug("  Japan "), "japan");
        assert_eq!(country_slug("PERU"), "peru");
    }

    #[test]
    fn test_advisory_text_rendering() {
        let advisory = CountryAdvisory {
            country_input: "kenya".into(),
            country_resolved: Some("Kenya".into()),
            health: Some(serde_json::json!({
                "vaccines": ["yellow fever", "typhoid"],
                "malaria": "present in most regions"
            })),
            sources: vec!["TuGo Travel Advisory API".into()],
            ..Default::default()
        };

        let text = advisory.to_text();
        assert!(text.starts_with("Travel advisory for Kenya:"));
        assert!(text.contains("## Health"));
        assert!(text.contains("- yellow fever"));
        assert!(text.contains("Sources: TuGo Travel Advisory API"));
    }
}
