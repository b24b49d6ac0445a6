//! Error Types for the Health Navigator

use thiserror::Error;

pub type Result<T> = std::result::Result<T, NavigatorError>;

#[derive(Error, Debug)]
pub enum NavigatorError {
    #[error("Search error: {0}")]
    Search(String),

    #[error("Travel advisory error: {0}")]
    Advisory(String),

    #[error("Medical content error: {0}")]
    Content(String),

    #[error("Service returned HTTP {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("{0} not configured")]
    MissingCredential(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
