//! Content Server Client
//!
//! HTTP client for the medical content server.

use async_trait::async_trait;
use std::time::Duration;

use super::MedicalContentClient;
use crate::error::{NavigatorError, Result};

/// HTTP client for a content server exposing `GET /lookup?topic=...`
pub struct ContentServerClient {
    http: reqwest::Client,
    base_url: Option<String>,
}

impl ContentServerClient {
    /// Create a client. A missing base URL yields a `MissingCredential`
    /// error at call time.
    pub fn new(base_url: Option<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_default();

        Self { http, base_url }
    }
}

#[async_trait]
impl MedicalContentClient for ContentServerClient {
    async fn lookup(&self, topic: &str) -> Result<String> {
        let base_url = self
            .base_url
            .as_deref()
            .ok_or(NavigatorError::MissingCredential("MEDADAPT_URL"))?;

        let url = format!("{}/lookup", base_url.trim_end_matches('/'));

        tracing::info!(topic, "medical content lookup");

        let response = self
            .http
            .get(&url)
            .query(&[("topic", topic)])
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

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Err(NavigatorError::Content(format!(
                "no content found for '{}'",
                topic
            )));
        }

        Ok(text)
    }

    fn name(&self) -> &str {
        "ContentServer"
    }
}
