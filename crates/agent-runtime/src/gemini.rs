//! Gemini LLM Provider
//!
//! Implementation of `LlmProvider` against the Gemini REST API
//! (`generateContent`). Retries transient HTTP failures (429/500/503/504)
//! a bounded number of times before surfacing the error.

use agent_core::{
    error::{AgentError, Result},
    message::{Message, Role},
    provider::{
        Completion, CompletionStream, FinishReason, GenerationOptions, LlmProvider, ModelInfo,
        ProviderInfo, StreamChunk, TokenUsage,
    },
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Retry policy for transient HTTP failures
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    /// Additional attempts after the first failure
    pub attempts: u32,

    /// Delay before each retry
    pub delay: Duration,

    /// HTTP status codes considered transient
    pub retry_statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 1,
            delay: Duration::ZERO,
            retry_statuses: vec![429, 500, 503, 504],
        }
    }
}

/// Gemini provider configuration
#[derive(Clone, Debug)]
pub struct GeminiConfig {
    /// API key for the Gemini API
    pub api_key: String,

    /// API base URL
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Retry policy for transient failures
    pub retry: RetryPolicy,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout_secs: 120,
            retry: RetryPolicy::default(),
        }
    }

    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GOOGLE_API_KEY")
            .map_err(|_| AgentError::Config("GOOGLE_API_KEY not set".into()))?;

        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var("GEMINI_BASE_URL") {
            config.base_url = base_url;
        }
        Ok(config)
    }
}

// Wire types for the generateContent API

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stop_sequences: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[derive(Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ApiModel>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiModel {
    name: String,
    display_name: Option<String>,
    input_token_limit: Option<u32>,
}

/// Gemini LLM provider
pub struct GeminiProvider {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    /// Create from configuration
    pub fn from_config(config: GeminiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AgentError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(GeminiConfig::from_env()?)
    }

    /// Convert agent messages to Gemini contents plus a system instruction
    fn convert_messages(messages: &[Message]) -> (Vec<Content>, Option<Content>) {
        let mut system_text = String::new();
        let mut contents = Vec::new();

        for message in messages {
            match message.role {
                Role::System => {
                    if !system_text.is_empty() {
                        system_text.push('\n');
                    }
                    system_text.push_str(&message.content);
                }
                Role::Assistant => contents.push(Content {
                    role: Some("model".into()),
                    parts: vec![Part {
                        text: Some(message.content.clone()),
                    }],
                }),
                // Tool results appear as user context
                Role::User | Role::Tool => contents.push(Content {
                    role: Some("user".into()),
                    parts: vec![Part {
                        text: Some(message.content.clone()),
                    }],
                }),
            }
        }

        let system_instruction = if system_text.is_empty() {
            None
        } else {
            Some(Content {
                role: None,
                parts: vec![Part {
                    text: Some(system_text),
                }],
            })
        };

        (contents, system_instruction)
    }

    /// Convert an API response to an agent completion
    fn convert_completion(response: GenerateContentResponse, model: &str) -> Result<Completion> {
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::Provider("response contained no candidates".into()))?;

        let content = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        let finish_reason = candidate.finish_reason.as_deref().map(|r| match r {
            "STOP" => FinishReason::Stop,
            "MAX_TOKENS" => FinishReason::Length,
            "SAFETY" | "RECITATION" | "BLOCKLIST" => FinishReason::ContentFilter,
            _ => FinishReason::Error,
        });

        Ok(Completion {
            content,
            model: model.to_string(),
            usage: response.usage_metadata.map(|u| TokenUsage {
                prompt_tokens: u.prompt_token_count,
                completion_tokens: u.candidates_token_count,
                total_tokens: u.total_token_count,
            }),
            truncated: finish_reason == Some(FinishReason::Length),
            finish_reason,
        })
    }

    fn build_request(
        messages: &[Message],
        options: &GenerationOptions,
    ) -> GenerateContentRequest {
        let (contents, system_instruction) = Self::convert_messages(messages);

        GenerateContentRequest {
            contents,
            system_instruction,
            generation_config: GenerationConfig {
                temperature: options.temperature,
                top_p: options.top_p,
                max_output_tokens: options.max_tokens,
                stop_sequences: options.stop_sequences.clone(),
            },
        }
    }

    /// POST generateContent, retrying transient statuses per the policy
    async fn generate(&self, request: &GenerateContentRequest, model: &str) -> Result<GenerateContentResponse> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, model
        );

        let mut attempt = 0;
        loop {
            let response = self
                .client
                .post(&url)
                .query(&[("key", self.config.api_key.as_str())])
                .json(request)
                .send()
                .await
                .map_err(|e| AgentError::ProviderUnavailable(e.to_string()))?;

            let status = response.status();

            if status.is_success() {
                return response
                    .json::<GenerateContentResponse>()
                    .await
                    .map_err(|e| AgentError::Provider(format!("invalid response body: {}", e)));
            }

            let transient = self.config.retry.retry_statuses.contains(&status.as_u16());
            if transient && attempt < self.config.retry.attempts {
                attempt += 1;
                tracing::warn!(status = %status, attempt, "transient Gemini error, retrying");
                tokio::time::sleep(self.config.retry.delay).await;
                continue;
            }

            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => AgentError::Auth(format!("Gemini returned {}", status)),
                429 => AgentError::RateLimited(body),
                _ => AgentError::Provider(format!("Gemini returned {}: {}", status, body)),
            });
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn info(&self) -> Result<ProviderInfo> {
        let models = self.list_models().await.unwrap_or_default();

        Ok(ProviderInfo {
            name: "Gemini".into(),
            version: None,
            models,
            supports_streaming: true,
            supports_tools: false, // tools are injected via prompt, not native function calling
        })
    }

    async fn health_check(&self) -> Result<bool> {
        match self.list_models().await {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::warn!("Gemini health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let request = Self::build_request(messages, options);
        let response = self.generate(&request, &options.model).await?;
        Self::convert_completion(response, &options.model)
    }

    async fn complete_stream(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<CompletionStream> {
        // Non-incremental: emits the full completion as a single chunk
        let completion = self.complete(messages, options).await?;
        let chunk = StreamChunk {
            delta: completion.content,
            done: true,
            usage: completion.usage,
        };
        Ok(Box::pin(futures::stream::once(async move { Ok(chunk) })))
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let url = format!("{}/models", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .send()
            .await
            .map_err(|e| AgentError::ProviderUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AgentError::ProviderUnavailable(format!(
                "Gemini returned {}",
                response.status()
            )));
        }

        let listing = response
            .json::<ListModelsResponse>()
            .await
            .map_err(|e| AgentError::Provider(e.to_string()))?;

        Ok(listing
            .models
            .into_iter()
            .map(|m| {
                // API names look like "models/gemini-2.5-flash"
                let id = m.name.strip_prefix("models/").unwrap_or(&m.name).to_string();
                ModelInfo {
                    name: m.display_name.unwrap_or_else(|| id.clone()),
                    id,
                    context_length: m.input_token_limit,
                    supports_vision: false,
                }
            })
            .collect())
    }

    fn estimate_tokens(&self, text: &str) -> u32 {
        // Gemini tokenization is roughly 4 chars per token
        (text.len() / 4) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_policy_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.attempts, 1);
        assert_eq!(policy.retry_statuses, vec![429, 500, 503, 504]);
    }

    #[test]
    fn test_message_conversion_splits_system_instruction() {
        let messages = vec![
            Message::system("You are a health navigator."),
            Message::user("Hello"),
            Message::assistant("Hi! How can I help?"),
            Message::tool("[Tool 'get_location' returned]\nNOT_SET", None),
        ];

        let (contents, system) = GeminiProvider::convert_messages(&messages);

        let system = system.expect("system instruction present");
        assert_eq!(
            system.parts[0].text.as_deref(),
            Some("You are a health navigator.")
        );

        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0].role.as_deref(), Some("user"));
        assert_eq!(contents[1].role.as_deref(), Some("model"));
        // Tool results appear as user context
        assert_eq!(contents[2].role.as_deref(), Some("user"));
    }

    #[test]
    fn test_completion_conversion() {
        let body = serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Stay hydrated."}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {
                "promptTokenCount": 12,
                "candidatesTokenCount": 4,
                "totalTokenCount": 16
            }
        });

        let response: GenerateContentResponse = serde_json::from_value(body).unwrap();
        let completion = GeminiProvider::convert_completion(response, "gemini-2.5-flash").unwrap();

        assert_eq!(completion.content, "Stay hydrated.");
        assert_eq!(completion.finish_reason, Some(FinishReason::Stop));
        assert!(!completion.truncated);
        assert_eq!(completion.usage.unwrap().total_tokens, 16);
    }

    #[test]
    fn test_empty_candidates_is_an_error() {
        let response: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({"candidates": []})).unwrap();

        let result = GeminiProvider::convert_completion(response, "gemini-2.5-flash");
        assert!(matches!(result, Err(AgentError::Provider(_))));
    }

    #[test]
    fn test_request_body_shape() {
        let messages = vec![
            Message::system("Be brief."),
            Message::user("Is this claim true?"),
        ];
        let options = GenerationOptions::default();

        let request = GeminiProvider::build_request(&messages, &options);
        let value = serde_json::to_value(&request).unwrap();

        assert!(value.get("systemInstruction").is_some());
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(
            value["generationConfig"]["maxOutputTokens"],
            serde_json::json!(2048)
        );
        // No stop sequences configured, so the field is omitted
        assert!(value["generationConfig"].get("stopSequences").is_none());
    }
}
