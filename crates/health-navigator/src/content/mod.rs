//! Medical Content Lookup
//!
//! Short factual snippets from a medical content server, consumed as a
//! black-box `query(text) -> text` service.

mod http;
mod mock;

pub use http::ContentServerClient;
pub use mock::MockContentClient;

use async_trait::async_trait;

use crate::error::Result;

/// Medical content client trait (Strategy pattern)
#[async_trait]
pub trait MedicalContentClient: Send + Sync {
    /// Look up a topic, returning a short factual snippet
    async fn lookup(&self, topic: &str) -> Result<String>;

    /// Service name
    fn name(&self) -> &str;
}
