//! Guideline Search Tool
//!
//! Searches CDC/WHO content through the restricted search engine. Used
//! for health guidance and misinformation checks.

use std::sync::Arc;

use async_trait::async_trait;

use agent_core::{
    tool::ParameterSchema,
    Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema,
};

use crate::search::{format_hits, GuidelineSearchClient};

/// Tool for searching official public-health guidance
pub struct GuidelineSearchTool {
    search: Arc<dyn GuidelineSearchClient>,
}

impl GuidelineSearchTool {
    pub fn new(search: Arc<dyn GuidelineSearchClient>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for GuidelineSearchTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "guideline_search".into(),
            description: "Search official CDC (cdc.gov) and WHO (who.int) content. Returns ranked results with source URLs. Use for health guidance and for verifying health claims.".into(),
            parameters: vec![ParameterSchema::required_string(
                "query",
                "Search query (e.g., 'measles vaccine schedule')",
            )],
            category: Some("health".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let query = call.str_arg("query").unwrap_or_default();

        match self.search.search(query).await {
            Ok(hits) => Ok(ToolResult::success("guideline_search", format_hits(&hits))),
            Err(e) => {
                tracing::warn!(error = %e, "guideline search failed");
                // Errors become observations, matching the black-box
                // query(text) -> text contract
                Ok(ToolResult::failure(
                    "guideline_search",
                    format!("Error during search: {}", e),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{MockSearchClient, NO_RESULTS_MESSAGE};

    #[tokio::test]
    async fn test_search_tool_formats_hits() {
        let tool = GuidelineSearchTool::new(Arc::new(MockSearchClient::new()));
        let call = ToolCall::with_arg("guideline_search", "query", "vaccines");

        let result = tool.execute(&call).await.unwrap();
        assert!(result.success);
        assert!(result.output.contains("Source URL: https://www.cdc.gov"));
    }

    #[tokio::test]
    async fn test_empty_results_return_fixed_message() {
        let tool = GuidelineSearchTool::new(Arc::new(MockSearchClient::empty()));
        let call = ToolCall::with_arg("guideline_search", "query", "nonexistent topic");

        let result = tool.execute(&call).await.unwrap();
        assert!(result.success);
        assert_eq!(result.output, NO_RESULTS_MESSAGE);
    }

    #[tokio::test]
    async fn test_backend_failure_is_reported_as_text() {
        let tool = GuidelineSearchTool::new(Arc::new(MockSearchClient::failing()));
        let call = ToolCall::with_arg("guideline_search", "query", "vaccines");

        let result = tool.execute(&call).await.unwrap();
        assert!(!result.success);
        assert!(result.output.contains("Error during search"));
    }
}
