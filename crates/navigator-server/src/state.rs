//! Application State

use std::sync::Arc;

use agent_core::{InMemoryMemoryStore, LlmProvider, SessionService};
use health_navigator::Navigator;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// LLM provider (Gemini)
    pub provider: Arc<dyn LlmProvider>,

    /// Assembled navigator: router, workflows, post-turn memory export
    pub navigator: Arc<Navigator>,

    /// Session store (also owned by the navigator)
    pub sessions: Arc<SessionService>,

    /// Long-term memory store, readable through the API
    pub memory: Arc<InMemoryMemoryStore>,
}
