//! Test Support
//!
//! Deterministic provider implementations for exercising agents and
//! workflows without a live LLM backend. Used by this crate's tests and
//! by downstream crates' dev-dependencies.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AgentError, Result};
use crate::message::Message;
use crate::provider::{
    Completion, CompletionStream, FinishReason, GenerationOptions, LlmProvider, ModelInfo,
    ProviderInfo, StreamChunk,
};

/// Provider that replays a fixed script of completions in order
pub struct ScriptedProvider {
    script: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<&str>) -> Self {
        let mut script: Vec<String> = responses.into_iter().map(String::from).collect();
        script.reverse();
        Self {
            script: Mutex::new(script),
        }
    }

    /// Number of unconsumed scripted responses
    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn info(&self) -> Result<ProviderInfo> {
        Ok(ProviderInfo {
            name: "Scripted".into(),
            version: None,
            models: Vec::new(),
            supports_streaming: false,
            supports_tools: false,
        })
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    async fn complete(
        &self,
        _messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let content = self
            .script
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| AgentError::Provider("script exhausted".into()))?;

        Ok(Completion {
            content,
            model: options.model.clone(),
            usage: None,
            truncated: false,
            finish_reason: Some(FinishReason::Stop),
        })
    }

    async fn complete_stream(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<CompletionStream> {
        let completion = self.complete(messages, options).await?;
        let chunk = StreamChunk {
            delta: completion.content,
            done: true,
            usage: None,
        };
        Ok(Box::pin(futures::stream::once(async move { Ok(chunk) })))
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        Ok(Vec::new())
    }
}

/// Provider that echoes the last user message, prefixed with its name
///
/// Useful for workflow tests where each step should produce distinct,
/// predictable output.
pub struct EchoProvider {
    prefix: String,
}

impl EchoProvider {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

#[async_trait]
impl LlmProvider for EchoProvider {
    async fn info(&self) -> Result<ProviderInfo> {
        Ok(ProviderInfo {
            name: "Echo".into(),
            version: None,
            models: Vec::new(),
            supports_streaming: false,
            supports_tools: false,
        })
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let last_user = messages
            .iter()
            .rev()
            .find(|m| m.role == crate::message::Role::User)
            .map(|m| m.content.clone())
            .unwrap_or_default();

        Ok(Completion {
            content: format!("{}: {}", self.prefix, last_user),
            model: options.model.clone(),
            usage: None,
            truncated: false,
            finish_reason: Some(FinishReason::Stop),
        })
    }

    async fn complete_stream(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<CompletionStream> {
        let completion = self.complete(messages, options).await?;
        let chunk = StreamChunk {
            delta: completion.content,
            done: true,
            usage: None,
        };
        Ok(Box::pin(futures::stream::once(async move { Ok(chunk) })))
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        Ok(Vec::new())
    }
}
