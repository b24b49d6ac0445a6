//! Mock Search Client
//!
//! For testing and demo purposes. Returns canned CDC/WHO results.

use async_trait::async_trait;

use super::{GuidelineSearchClient, SearchHit};
use crate::error::{NavigatorError, Result};

/// Mock search client with static results
pub struct MockSearchClient {
    hits: Vec<SearchHit>,
    fail: bool,
}

impl Default for MockSearchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSearchClient {
    pub fn new() -> Self {
        Self {
            hits: vec![
                SearchHit {
                    title: "Vaccines and Immunizations | CDC".into(),
                    link: "https://www.cdc.gov/vaccines/index.html".into(),
                    snippet: "Recommended immunization schedules and vaccine safety information.".into(),
                },
                SearchHit {
                    title: "Vaccines and immunization | WHO".into(),
                    link: "https://www.who.int/health-topics/vaccines-and-immunization".into(),
                    snippet: "Immunization is a global health success story.".into(),
                },
            ],
            fail: false,
        }
    }

    /// Return no hits for every query
    pub fn empty() -> Self {
        Self {
            hits: Vec::new(),
            fail: false,
        }
    }

    /// Fail every query (for exercising error paths)
    pub fn failing() -> Self {
        Self {
            hits: Vec::new(),
            fail: true,
        }
    }

    pub fn with_hits(hits: Vec<SearchHit>) -> Self {
        Self { hits, fail: false }
    }
}

#[async_trait]
impl GuidelineSearchClient for MockSearchClient {
    async fn search(&self, _query: &str) -> Result<Vec<SearchHit>> {
        if self.fail {
            return Err(NavigatorError::Search("mock backend offline".into()));
        }
        Ok(self.hits.clone())
    }

    fn name(&self) -> &str {
        "MockSearch"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_search_returns_canned_hits() {
        let client = MockSearchClient::new();
        let hits = client.search("vaccines").await.unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits[0].link.contains("cdc.gov"));
    }

    #[tokio::test]
    async fn test_failing_mock_errors() {
        let client = MockSearchClient::failing();
        assert!(client.search("vaccines").await.is_err());
    }
}
