//! Long-Term Memory
//!
//! An append-only store of session snapshots, keyed by session identifier.
//! After each completed turn the orchestrator invokes the
//! [`MemorySnapshotExporter`], which copies the session's full state map
//! into the store. Later snapshots for the same session overwrite earlier
//! ones; no history is retained.
//!
//! Export failures never fail the turn that triggered them: they are
//! logged and swallowed.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AgentError, Result};
use crate::session::{SessionKey, SessionService};

/// The most recent full snapshot of one session's state map
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Session this snapshot was taken from
    pub session_id: String,

    /// Complete copy of the session's state map at export time
    pub entries: HashMap<String, String>,

    /// When the snapshot was taken
    pub saved_at: DateTime<Utc>,
}

/// Store for session snapshots
pub trait MemoryStore: Send + Sync {
    /// Save a snapshot, overwriting any earlier record for the session
    fn save(&self, record: MemoryRecord) -> Result<()>;

    /// Fetch the current record for a session
    fn get(&self, session_id: &str) -> Result<Option<MemoryRecord>>;

    /// Number of sessions with a stored snapshot
    fn len(&self) -> usize;

    /// Check if no snapshots are stored
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory implementation of [`MemoryStore`]
pub struct InMemoryMemoryStore {
    records: RwLock<HashMap<String, MemoryRecord>>,
}

impl Default for InMemoryMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMemoryStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl MemoryStore for InMemoryMemoryStore {
    fn save(&self, record: MemoryRecord) -> Result<()> {
        let mut records = self.records.write().unwrap();
        records.insert(record.session_id.clone(), record);
        Ok(())
    }

    fn get(&self, session_id: &str) -> Result<Option<MemoryRecord>> {
        let records = self.records.read().unwrap();
        Ok(records.get(session_id).cloned())
    }

    fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }
}

/// Copies session state into the memory store after each completed turn
///
/// The orchestrator calls [`MemorySnapshotExporter::export`] with the
/// session key as its only input once the turn has finished. The copy is
/// idempotent: re-running it with unchanged session contents stores the
/// same record.
pub struct MemorySnapshotExporter {
    sessions: Arc<SessionService>,
    store: Arc<dyn MemoryStore>,
}

impl MemorySnapshotExporter {
    pub fn new(sessions: Arc<SessionService>, store: Arc<dyn MemoryStore>) -> Self {
        Self { sessions, store }
    }

    /// Post-turn hook: snapshot the session's state into the memory store.
    ///
    /// Any failure is logged and swallowed; the triggering turn is never
    /// failed or retried because of an export failure.
    pub fn export(&self, key: &SessionKey) {
        if let Err(e) = self.try_export(key) {
            tracing::warn!(session = %key, error = %e, "memory snapshot export failed");
        }
    }

    /// Fallible export, exposed so tests can observe the error path
    pub fn try_export(&self, key: &SessionKey) -> Result<()> {
        let entries = self.sessions.state_snapshot(key);
        let record = MemoryRecord {
            session_id: key.session_id.clone(),
            entries,
            saved_at: Utc::now(),
        };

        self.store
            .save(record)
            .map_err(|e| AgentError::Export(e.to_string()))?;

        tracing::debug!(session = %key, "session state exported to memory");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exporter_fixture() -> (Arc<SessionService>, Arc<InMemoryMemoryStore>, MemorySnapshotExporter) {
        let sessions = Arc::new(SessionService::new());
        let store = Arc::new(InMemoryMemoryStore::new());
        let exporter = MemorySnapshotExporter::new(sessions.clone(), store.clone());
        (sessions, store, exporter)
    }

    #[test]
    fn test_export_copies_full_state() {
        let (sessions, store, exporter) = exporter_fixture();
        let key = SessionKey::new("u1", "s1");

        sessions.set_state(&key, "user_location", "Tokyo");
        exporter.export(&key);

        let record = store.get("s1").unwrap().expect("record stored");
        assert_eq!(record.entries.len(), 1);
        assert_eq!(
            record.entries.get("user_location").map(String::as_str),
            Some("Tokyo")
        );
    }

    #[test]
    fn test_export_is_idempotent() {
        let (sessions, store, exporter) = exporter_fixture();
        let key = SessionKey::new("u1", "s1");

        sessions.set_state(&key, "user_location", "Tokyo");
        exporter.export(&key);
        let first = store.get("s1").unwrap().unwrap();

        exporter.export(&key);
        let second = store.get("s1").unwrap().unwrap();

        assert_eq!(first.entries, second.entries);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_export_of_unwritten_session_stores_empty_map() {
        let (_sessions, store, exporter) = exporter_fixture();
        let key = SessionKey::new("u1", "s2");

        exporter.export(&key);

        let record = store.get("s2").unwrap().expect("record stored");
        assert!(record.entries.is_empty());
    }

    #[test]
    fn test_later_snapshot_overwrites_earlier() {
        let (sessions, store, exporter) = exporter_fixture();
        let key = SessionKey::new("u1", "s1");

        sessions.set_state(&key, "user_location", "Tokyo");
        exporter.export(&key);

        sessions.set_state(&key, "user_location", "Osaka");
        sessions.set_state(&key, "travel_intent_summary", "two weeks in Kansai");
        exporter.export(&key);

        let record = store.get("s1").unwrap().unwrap();
        assert_eq!(record.entries.len(), 2);
        assert_eq!(
            record.entries.get("user_location").map(String::as_str),
            Some("Osaka")
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_snapshot_not_affected_by_later_session_writes() {
        let (sessions, store, exporter) = exporter_fixture();
        let key = SessionKey::new("u1", "s1");

        sessions.set_state(&key, "user_location", "Tokyo");
        exporter.export(&key);
        sessions.set_state(&key, "user_location", "Osaka");

        let record = store.get("s1").unwrap().unwrap();
        assert_eq!(
            record.entries.get("user_location").map(String::as_str),
            Some("Tokyo")
        );
    }

    struct FailingStore;

    impl MemoryStore for FailingStore {
        fn save(&self, _record: MemoryRecord) -> Result<()> {
            Err(AgentError::Other("store offline".into()))
        }

        fn get(&self, _session_id: &str) -> Result<Option<MemoryRecord>> {
            Ok(None)
        }

        fn len(&self) -> usize {
            0
        }
    }

    #[test]
    fn test_export_failure_is_swallowed() {
        let sessions = Arc::new(SessionService::new());
        let exporter = MemorySnapshotExporter::new(sessions.clone(), Arc::new(FailingStore));
        let key = SessionKey::new("u1", "s1");

        sessions.set_state(&key, "user_location", "Tokyo");

        // Must not panic or propagate
        exporter.export(&key);

        // The fallible path reports the failure
        let err = exporter.try_export(&key).unwrap_err();
        assert!(matches!(err, AgentError::Export(_)));
    }
}
