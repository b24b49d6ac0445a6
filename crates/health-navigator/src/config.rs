//! Environment Configuration
//!
//! All credentials and endpoints are consumed as opaque strings from the
//! environment. Missing variables degrade functionality (the affected
//! tool reports the problem at call time) but never abort startup.

/// Navigator configuration loaded from the environment
#[derive(Clone, Debug, Default)]
pub struct NavigatorConfig {
    /// Gemini API key
    pub google_api_key: Option<String>,

    /// Google Custom Search API key (engine restricted to cdc.gov/who.int)
    pub search_api_key: Option<String>,

    /// Custom Search engine ID
    pub search_engine_id: Option<String>,

    /// TuGo Travel Advisory API key
    pub tugo_api_key: Option<String>,

    /// Base URL of the medical content server
    pub medadapt_url: Option<String>,

    /// Gemini model to use for all agents
    pub gemini_model: String,
}

const DEFAULT_MODEL: &str = "gemini-2.5-flash";

impl NavigatorConfig {
    /// Load configuration from the environment. Call `dotenvy::dotenv()`
    /// beforehand if a `.env` file should be honored.
    pub fn from_env() -> Self {
        Self {
            google_api_key: read_var("GOOGLE_API_KEY"),
            search_api_key: read_var("SEARCH_API_KEY"),
            search_engine_id: read_var("SEARCH_ENGINE_ID"),
            tugo_api_key: read_var("TUGO_API_KEY"),
            medadapt_url: read_var("MEDADAPT_URL"),
            gemini_model: read_var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
        }
    }

    /// Names of required variables that are not set
    pub fn missing_vars(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.google_api_key.is_none() {
            missing.push("GOOGLE_API_KEY");
        }
        if self.search_api_key.is_none() {
            missing.push("SEARCH_API_KEY");
        }
        if self.search_engine_id.is_none() {
            missing.push("SEARCH_ENGINE_ID");
        }
        if self.tugo_api_key.is_none() {
            missing.push("TUGO_API_KEY");
        }
        missing
    }

    /// Log a warning for any missing variables; the process continues with
    /// degraded functionality.
    pub fn warn_missing(&self) {
        let missing = self.missing_vars();
        if !missing.is_empty() {
            tracing::warn!(
                missing = ?missing,
                "missing environment variables, continuing with degraded functionality"
            );
        }
    }
}

fn read_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
