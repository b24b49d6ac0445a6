//! # health-navigator
//!
//! Health navigation agents built on `agent-core`: a router that
//! classifies each user request and delegates to a specialist:
//!
//! - **Misinformation checker** — verifies health claims against CDC and
//!   WHO content through a domain-restricted search engine.
//! - **Travel workflow** — trip intake, then CDC/WHO guidance and a
//!   structured travel advisory fetched concurrently, then a reconciled
//!   checklist.
//! - **Chronic condition workflow** — an education plan, nearby care
//!   options, and a combined summary, tailored to the user's saved
//!   location.
//! - **Prescription explainer** — plain-language medication and
//!   diagnosis explanations.
//!
//! External services sit behind client traits (`GuidelineSearchClient`,
//! `TravelAdvisoryClient`, `MedicalContentClient`) with HTTP and mock
//! implementations, so agents can be tested without network access.

pub mod advisory;
pub mod agents;
pub mod config;
pub mod content;
pub mod error;
pub mod prompts;
pub mod search;
pub mod tools;

pub use agents::{build_router, Navigator, NavigatorClients};
pub use config::NavigatorConfig;
pub use error::{NavigatorError, Result};
