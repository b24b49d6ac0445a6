//! Session Management
//!
//! Sessions are identified by `(user_id, session_id)` and own a string
//! key/value state map plus the conversation history. The `SessionService`
//! is the single owned store for all sessions; callers hold it behind an
//! `Arc` rather than reaching for ambient globals.
//!
//! Absent sessions are never an error: reads on a session that was never
//! written behave as reads on an empty map.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::message::{Conversation, Message};

/// Identifies one user's ongoing conversational interaction
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey {
    pub user_id: String,
    pub session_id: String,
}

impl SessionKey {
    pub fn new(user_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            session_id: session_id.into(),
        }
    }

    /// Create a key with a freshly generated session ID
    pub fn generate(user_id: impl Into<String>) -> Self {
        Self::new(user_id, format!("session-{}", Uuid::new_v4()))
    }
}

impl std::fmt::Display for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.user_id, self.session_id)
    }
}

/// A complete session: state map plus conversation history
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// Owning user and session identifiers
    pub key: SessionKey,

    /// String key/value state (e.g., "user_location")
    pub state: HashMap<String, String>,

    /// Conversation history
    pub conversation: Conversation,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last activity timestamp
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(key: SessionKey) -> Self {
        let now = Utc::now();
        Self {
            key,
            state: HashMap::new(),
            conversation: Conversation::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Update the activity timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Owned in-process store for all sessions
///
/// Sessions are created on first write and live for the process lifetime.
/// The interior `RwLock` serializes writers, so concurrent `set_state`
/// calls to the same key resolve to one of the written values.
pub struct SessionService {
    sessions: RwLock<HashMap<SessionKey, Session>>,
}

impl Default for SessionService {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionService {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Read a state value. Absent session or absent key returns `None`.
    pub fn get_state(&self, key: &SessionKey, state_key: &str) -> Option<String> {
        let sessions = self.sessions.read().unwrap();
        sessions
            .get(key)
            .and_then(|s| s.state.get(state_key).cloned())
    }

    /// Write a state value, creating the session on first write.
    /// No validation of key or value content; last write wins.
    pub fn set_state(
        &self,
        key: &SessionKey,
        state_key: impl Into<String>,
        value: impl Into<String>,
    ) {
        let mut sessions = self.sessions.write().unwrap();
        let session = sessions
            .entry(key.clone())
            .or_insert_with(|| Session::new(key.clone()));
        session.state.insert(state_key.into(), value.into());
        session.touch();
    }

    /// Full copy of a session's state map at this point in time.
    /// An absent session yields an empty map rather than an error.
    pub fn state_snapshot(&self, key: &SessionKey) -> HashMap<String, String> {
        let sessions = self.sessions.read().unwrap();
        sessions
            .get(key)
            .map(|s| s.state.clone())
            .unwrap_or_default()
    }

    /// Copy of a session's conversation history (empty if absent)
    pub fn conversation(&self, key: &SessionKey) -> Conversation {
        let sessions = self.sessions.read().unwrap();
        sessions
            .get(key)
            .map(|s| s.conversation.clone())
            .unwrap_or_default()
    }

    /// Append a message to a session's conversation, creating the session
    /// if needed.
    pub fn push_message(&self, key: &SessionKey, message: Message) {
        let mut sessions = self.sessions.write().unwrap();
        let session = sessions
            .entry(key.clone())
            .or_insert_with(|| Session::new(key.clone()));
        session.conversation.push(message);
        session.touch();
    }

    /// Replace a session's conversation wholesale (used after a turn that
    /// ran on a working copy).
    pub fn replace_conversation(&self, key: &SessionKey, conversation: Conversation) {
        let mut sessions = self.sessions.write().unwrap();
        let session = sessions
            .entry(key.clone())
            .or_insert_with(|| Session::new(key.clone()));
        session.conversation = conversation;
        session.touch();
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.read().unwrap().len()
    }

    /// Check if no sessions exist
    pub fn is_empty(&self) -> bool {
        self.sessions.read().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_get_on_absent_session_returns_none() {
        let service = SessionService::new();
        let key = SessionKey::new("u1", "s1");

        assert!(service.get_state(&key, "user_location").is_none());
        assert!(service.state_snapshot(&key).is_empty());
    }

    #[test]
    fn test_set_creates_session_and_get_roundtrips() {
        let service = SessionService::new();
        let key = SessionKey::new("u1", "s1");

        service.set_state(&key, "user_location", "Austin, TX");

        assert_eq!(
            service.get_state(&key, "user_location").as_deref(),
            Some("Austin, TX")
        );
        assert_eq!(service.len(), 1);
    }

    #[test]
    fn test_last_write_wins() {
        let service = SessionService::new();
        let key = SessionKey::new("u1", "s1");

        service.set_state(&key, "user_location", "Tokyo");
        service.set_state(&key, "user_location", "Osaka");

        assert_eq!(
            service.get_state(&key, "user_location").as_deref(),
            Some("Osaka")
        );
    }

    #[test]
    fn test_sessions_are_isolated() {
        let service = SessionService::new();
        let k1 = SessionKey::new("u1", "s1");
        let k2 = SessionKey::new("u1", "s2");

        service.set_state(&k1, "user_location", "Tokyo");

        assert!(service.get_state(&k2, "user_location").is_none());
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let service = SessionService::new();
        let key = SessionKey::new("u1", "s1");

        service.set_state(&key, "user_location", "Tokyo");
        let snapshot = service.state_snapshot(&key);
        service.set_state(&key, "user_location", "Osaka");

        // The earlier snapshot is unaffected by later writes
        assert_eq!(snapshot.get("user_location").map(String::as_str), Some("Tokyo"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_concurrent_sets_resolve_to_one_written_value() {
        let service = Arc::new(SessionService::new());
        let key = SessionKey::new("u1", "s1");

        let mut handles = Vec::new();
        for i in 0..16 {
            let service = service.clone();
            let key = key.clone();
            handles.push(tokio::spawn(async move {
                service.set_state(&key, "user_location", format!("city-{}", i));
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let value = service.get_state(&key, "user_location").unwrap();
        assert!(value.starts_with("city-"));
    }
}
