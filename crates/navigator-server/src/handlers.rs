//! HTTP Handlers

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agent_core::{MemoryStore, SessionKey};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub gemini_connected: bool,
    pub active_sessions: usize,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
    pub user_id: String,
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct SessionStateResponse {
    pub user_id: String,
    pub session_id: String,
    pub state: HashMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct MemoryResponse {
    pub session_id: String,
    pub entries: HashMap<String, String>,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let gemini_connected = state.provider.health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        gemini_connected,
        active_sessions: state.sessions.len(),
    })
}

/// Main chat endpoint
///
/// Runs one router turn for the session; the navigator snapshots the
/// session into long-term memory after the turn completes.
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    let user_id = payload.user_id.unwrap_or_else(|| "web-user".into());
    let key = match payload.session_id {
        Some(session_id) => SessionKey::new(user_id.clone(), session_id),
        None => SessionKey::generate(user_id.clone()),
    };

    let response = state
        .navigator
        .handle_turn(&key, &payload.message)
        .await
        .map_err(|e| {
            tracing::error!(session = %key, error = %e, "turn failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.user_message(),
                    code: "AGENT_ERROR".into(),
                }),
            )
        })?;

    Ok(Json(ChatResponse {
        message: response,
        user_id,
        session_id: key.session_id,
    }))
}

/// Inspect a session's key/value state
pub async fn session_state_handler(
    State(state): State<AppState>,
    Path((user_id, session_id)): Path<(String, String)>,
) -> Json<SessionStateResponse> {
    let key = SessionKey::new(user_id.clone(), session_id.clone());
    // Absent sessions read as empty, so this never 404s
    let snapshot = state.sessions.state_snapshot(&key);

    Json(SessionStateResponse {
        user_id,
        session_id,
        state: snapshot,
    })
}

/// Fetch the long-term memory record for a session
pub async fn memory_handler(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<MemoryResponse>, (StatusCode, Json<ErrorResponse>)> {
    let record = state.memory.get(&session_id).map_err(|e| {
        tracing::error!(session_id, error = %e, "memory read failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Memory store unavailable".into(),
                code: "MEMORY_ERROR".into(),
            }),
        )
    })?;

    match record {
        Some(record) => Ok(Json(MemoryResponse {
            session_id: record.session_id,
            entries: record.entries,
            saved_at: record.saved_at,
        })),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("No memory record for session '{}'", session_id),
                code: "MEMORY_NOT_FOUND".into(),
            }),
        )),
    }
}
