//! health-navigator HTTP Server
//!
//! Axum-based server exposing the router agent over REST, plus
//! inspection endpoints for session state and long-term memory.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_core::{InMemoryMemoryStore, LlmProvider, SessionService};
use agent_runtime::GeminiProvider;
use health_navigator::{
    advisory::TugoClient,
    content::ContentServerClient,
    search::GoogleCustomSearchClient,
    Navigator, NavigatorClients, NavigatorConfig,
};

use crate::handlers::{chat_handler, health_check, memory_handler, session_state_handler};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let config = NavigatorConfig::from_env();
    config.warn_missing();

    // Initialize LLM provider
    let provider: Arc<dyn LlmProvider> = Arc::new(GeminiProvider::from_env()?);

    match provider.health_check().await {
        Ok(true) => tracing::info!("✓ Connected to Gemini"),
        Ok(false) | Err(_) => {
            tracing::warn!("⚠ Gemini not reachable - agent turns will fail");
            tracing::warn!("  Check GOOGLE_API_KEY and network access");
        }
    }

    // External service clients
    let clients = NavigatorClients {
        search: Arc::new(GoogleCustomSearchClient::new(
            config.search_api_key.clone(),
            config.search_engine_id.clone(),
        )),
        advisory: Arc::new(TugoClient::new(config.tugo_api_key.clone())),
        content: Arc::new(ContentServerClient::new(config.medadapt_url.clone())),
    };

    // Session and memory stores
    let sessions = Arc::new(SessionService::new());
    let memory = Arc::new(InMemoryMemoryStore::new());

    let navigator = Arc::new(Navigator::new(
        provider.clone(),
        clients,
        sessions.clone(),
        memory.clone(),
        config.gemini_model.clone(),
    ));

    let state = AppState {
        provider,
        navigator,
        sessions,
        memory,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/chat", post(chat_handler))
        .route(
            "/api/session/{user_id}/{session_id}/state",
            get(session_state_handler),
        )
        .route("/api/memory/{session_id}", get(memory_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 health-navigator server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                                  - Health check");
    tracing::info!("  POST /api/chat                                - Send message");
    tracing::info!("  GET  /api/session/{{user}}/{{session}}/state      - Session state");
    tracing::info!("  GET  /api/memory/{{session}}                    - Memory snapshot");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
