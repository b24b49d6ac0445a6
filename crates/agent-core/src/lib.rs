//! # agent-core
//!
//! Core agent framework with provider-agnostic LLM abstraction, an
//! extensible tool system, session state, long-term memory snapshots,
//! and workflow orchestration.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Workflow (router)                        │
//! │  ┌───────────┐  ┌───────────┐  ┌──────────────────────────┐  │
//! │  │ Reasoning │  │   Tools   │  │   LlmProvider            │  │
//! │  │   Loop    │──│  Registry │──│   (Strategy)             │  │
//! │  └───────────┘  └───────────┘  └──────────────────────────┘  │
//! │        │                                                     │
//! │  ┌───────────────┐    post-turn    ┌──────────────────────┐  │
//! │  │ SessionService│ ───────────────▶│ MemorySnapshotExport │  │
//! │  └───────────────┘                 └──────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `LlmProvider` trait enables swapping between Gemini, Ollama, or any
//! other backend without changing agent logic. `SessionService` owns all
//! per-session key/value state; after each completed turn the orchestrator
//! invokes `MemorySnapshotExporter::export` to copy that state into the
//! memory store.

pub mod error;
pub mod memory;
pub mod message;
pub mod provider;
pub mod reasoning;
pub mod session;
pub mod testkit;
pub mod tool;
pub mod workflow;

pub use error::{AgentError, Result};
pub use memory::{InMemoryMemoryStore, MemoryRecord, MemorySnapshotExporter, MemoryStore};
pub use message::{Conversation, Message, Role};
pub use provider::LlmProvider;
pub use reasoning::{Agent, AgentBuilder, AgentConfig};
pub use session::{Session, SessionKey, SessionService};
pub use tool::{Tool, ToolCall, ToolRegistry, ToolResult, ToolSchema};
pub use workflow::{
    AgentStep, ParallelWorkflow, SequentialWorkflow, WorkflowNode, WorkflowTool,
};
