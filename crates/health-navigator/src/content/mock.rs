//! Mock Content Client
//!
//! For testing and demo purposes. Returns short canned snippets.

use async_trait::async_trait;

use super::MedicalContentClient;
use crate::error::{NavigatorError, Result};

/// Mock content client with a few canned topics
pub struct MockContentClient;

#[async_trait]
impl MedicalContentClient for MockContentClient {
    async fn lookup(&self, topic: &str) -> Result<String> {
        let lowered = topic.to_lowercase();

        let snippet = if lowered.contains("kidney stone") {
            "Kidney stones are hard deposits of minerals and salts that form inside the kidneys. \
             Staying well hydrated reduces the risk of stone formation."
        } else if lowered.contains("hypertension") || lowered.contains("blood pressure") {
            "Hypertension is persistently elevated arterial blood pressure. Lifestyle measures \
             include reduced sodium intake, regular activity, and weight management."
        } else if lowered.contains("diabetes") {
            "Diabetes mellitus is a group of metabolic disorders characterized by elevated blood \
             glucose. Management combines diet, activity, monitoring, and clinician-guided treatment."
        } else {
            return Err(NavigatorError::Content(format!(
                "no content found for '{}'",
                topic
            )));
        };

        Ok(snippet.to_string())
    }

    fn name(&self) -> &str {
        "MockContent"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_topic() {
        let client = MockContentClient;
        let text = client.lookup("kidney stones").await.unwrap();
        assert!(text.contains("hydrated"));
    }

    #[tokio::test]
    async fn test_unknown_topic_errors() {
        let client = MockContentClient;
        assert!(client.lookup("unicorn pox").await.is_err());
    }
}
