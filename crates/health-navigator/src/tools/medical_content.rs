//! Medical Content Tool
//!
//! Retrieves short factual snippets from the medical content server.

use std::sync::Arc;

use async_trait::async_trait;

use agent_core::{
    tool::ParameterSchema,
    Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema,
};

use crate::content::MedicalContentClient;

/// Tool for looking up medical reference content by topic
pub struct MedicalContentTool {
    content: Arc<dyn MedicalContentClient>,
}

impl MedicalContentTool {
    pub fn new(content: Arc<dyn MedicalContentClient>) -> Self {
        Self { content }
    }
}

#[async_trait]
impl Tool for MedicalContentTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "medical_content".into(),
            description: "Look up a short factual snippet about a medical topic, condition, or medication from the medical content library.".into(),
            parameters: vec![ParameterSchema::required_string(
                "topic",
                "Medical topic to look up (e.g., 'kidney stones')",
            )],
            category: Some("health".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let topic = call.str_arg("topic").unwrap_or_default();

        match self.content.lookup(topic).await {
            Ok(text) => Ok(ToolResult::success("medical_content", text)),
            Err(e) => {
                tracing::warn!(topic, error = %e, "medical content lookup failed");
                Ok(ToolResult::failure(
                    "medical_content",
                    format!("Error looking up '{}': {}", topic, e),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MockContentClient;

    #[tokio::test]
    async fn test_lookup_returns_snippet() {
        let tool = MedicalContentTool::new(Arc::new(MockContentClient));
        let call = ToolCall::with_arg("medical_content", "topic", "hypertension");

        let result = tool.execute(&call).await.unwrap();
        assert!(result.success);
        assert!(result.output.contains("blood pressure"));
    }

    #[tokio::test]
    async fn test_unknown_topic_is_reported_as_text() {
        let tool = MedicalContentTool::new(Arc::new(MockContentClient));
        let call = ToolCall::with_arg("medical_content", "topic", "unicorn pox");

        let result = tool.execute(&call).await.unwrap();
        assert!(!result.success);
        assert!(result.output.contains("unicorn pox"));
    }
}
