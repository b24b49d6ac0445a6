//! Guideline Search
//!
//! Domain-restricted text search over official public-health content.
//! The configured search engine limits results to cdc.gov and who.int.

mod google;
mod mock;

pub use google::GoogleCustomSearchClient;
pub use mock::MockSearchClient;

use async_trait::async_trait;

use crate::error::Result;

/// Number of hits requested per query
pub const MAX_HITS: usize = 5;

/// Message returned when the restricted engines find nothing
pub const NO_RESULTS_MESSAGE: &str = "No relevant information found on cdc.gov or who.int.";

/// One ranked search result
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

/// Search client trait (Strategy pattern)
///
/// Implement this for each search backend.
#[async_trait]
pub trait GuidelineSearchClient: Send + Sync {
    /// Run a query, returning up to [`MAX_HITS`] ranked hits
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;

    /// Backend name
    fn name(&self) -> &str;
}

/// Render hits in the fixed source/title/snippet block format agents expect
pub fn format_hits(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return NO_RESULTS_MESSAGE.to_string();
    }

    hits.iter()
        .map(|hit| {
            format!(
                "Source URL: {}\nTitle: {}\nSnippet: {}\n",
                hit.link, hit.title, hit.snippet
            )
        })
        .collect::<Vec<_>>()
        .join("\n---\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hits_empty_returns_no_results_message() {
        assert_eq!(format_hits(&[]), NO_RESULTS_MESSAGE);
    }

    #[test]
    fn test_format_hits_blocks_are_separated() {
        let hits = vec![
            SearchHit {
                title: "Measles vaccination".into(),
                link: "https://www.cdc.gov/measles/vaccination.html".into(),
                snippet: "Two doses of MMR vaccine...".into(),
            },
            SearchHit {
                title: "Measles fact sheet".into(),
                link: "https://www.who.int/news-room/fact-sheets/detail/measles".into(),
                snippet: "Measles is a highly contagious...".into(),
            },
        ];

        let text = format_hits(&hits);
        assert!(text.contains("Source URL: https://www.cdc.gov/measles/vaccination.html"));
        assert!(text.contains("\n---\n"));
        assert!(text.contains("Title: Measles fact sheet"));
    }
}
