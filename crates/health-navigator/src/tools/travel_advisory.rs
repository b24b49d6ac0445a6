//! Travel Advisory Tool
//!
//! Exposes the TuGo country advisory API to agents.

use std::sync::Arc;

use async_trait::async_trait;

use agent_core::{
    tool::ParameterSchema,
    Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema,
};

use crate::advisory::TravelAdvisoryClient;

/// Tool for fetching official travel advisories for a destination country
pub struct TravelAdvisoryTool {
    advisory: Arc<dyn TravelAdvisoryClient>,
}

impl TravelAdvisoryTool {
    pub fn new(advisory: Arc<dyn TravelAdvisoryClient>) -> Self {
        Self { advisory }
    }
}

#[async_trait]
impl Tool for TravelAdvisoryTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "travel_advisory".into(),
            description: "Fetch official travel advisories for a destination country: health notices, safety and security, and entry/exit requirements. Input is a country name such as 'Kenya' or 'Costa Rica'.".into(),
            parameters: vec![ParameterSchema::required_string(
                "country",
                "Destination country name",
            )],
            category: Some("travel".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let country = call.str_arg("country").unwrap_or_default().trim().to_string();

        if country.is_empty() {
            return Ok(ToolResult::failure(
                "travel_advisory",
                "Error: no destination country was provided.",
            ));
        }

        match self.advisory.advisory(&country).await {
            Ok(advisory) => Ok(ToolResult::success("travel_advisory", advisory.to_text())),
            Err(e) => {
                tracing::warn!(country = %country, error = %e, "travel advisory lookup failed");
                Ok(ToolResult::failure(
                    "travel_advisory",
                    format!("Error fetching travel advisory for '{}': {}", country, e),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::MockAdvisoryClient;

    #[tokio::test]
    async fn test_known_country_returns_sections() {
        let tool = TravelAdvisoryTool::new(Arc::new(MockAdvisoryClient::new()));
        let call = ToolCall::with_arg("travel_advisory", "country", "Kenya");

        let result = tool.execute(&call).await.unwrap();
        assert!(result.success);
        assert!(result.output.contains("## Health"));
    }

    #[tokio::test]
    async fn test_missing_country_fails_without_calling_backend() {
        let tool = TravelAdvisoryTool::new(Arc::new(MockAdvisoryClient::new()));
        let call = ToolCall::with_arg("travel_advisory", "country", "   ");

        let result = tool.execute(&call).await.unwrap();
        assert!(!result.success);
        assert!(result.output.contains("no destination country"));
    }

    #[tokio::test]
    async fn test_unknown_country_reports_error_as_text() {
        let tool = TravelAdvisoryTool::new(Arc::new(MockAdvisoryClient::new()));
        let call = ToolCall::with_arg("travel_advisory", "country", "Atlantis");

        let result = tool.execute(&call).await.unwrap();
        assert!(!result.success);
        assert!(result.output.contains("Atlantis"));
    }
}
