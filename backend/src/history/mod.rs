//! Payment history persistence
//!
//! An append-only, newest-first log of payment attempts, serialized as one
//! JSON list under a single well-known key in a key-value store. The store
//! behaves like the browser's local storage: per-client, survives process
//! restarts (file-backed variant), never shared between clients.

mod store;

pub use store::{InMemoryStore, JsonFileStore, KeyValueStore, StoreError};

use crate::models::history::HistoryRecord;
use tracing::warn;

/// Storage key the history list lives under.
pub const HISTORY_KEY: &str = "paymentHistory";

/// Append-only history log.
///
/// `append` is the only mutation; there is no update or delete. Iteration
/// order is newest first (records are prepended).
///
/// # Example
/// ```
/// use topup_simulator_core_rs::{HistoryStore, InMemoryStore};
///
/// let mut history = HistoryStore::new(Box::new(InMemoryStore::new()));
/// assert!(history.is_empty());
/// assert!(history.list().is_empty());
/// ```
pub struct HistoryStore {
    store: Box<dyn KeyValueStore>,
}

impl HistoryStore {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Append a record to the front of the log.
    pub fn append(&mut self, record: HistoryRecord) -> Result<(), StoreError> {
        let mut records = self.list();
        records.insert(0, record);
        let payload = serde_json::to_string(&records)?;
        self.store.set(HISTORY_KEY, payload)
    }

    /// All records, newest first.
    ///
    /// A missing or corrupt snapshot reads as an empty history; losing a
    /// demo log is not worth a hard failure.
    pub fn list(&self) -> Vec<HistoryRecord> {
        let Some(payload) = self.store.get(HISTORY_KEY) else {
            return Vec::new();
        };

        match serde_json::from_str(&payload) {
            Ok(records) => records,
            Err(err) => {
                warn!(error = %err, "corrupt history snapshot, starting empty");
                Vec::new()
            }
        }
    }

    /// Whether no attempt has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.list().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::history::RecordStatus;
    use crate::models::request::PaymentMethod;
    use chrono::Utc;

    fn record(id: &str) -> HistoryRecord {
        HistoryRecord {
            id: id.to_string(),
            amount: 100_00,
            fee: 5_00,
            total: 105_00,
            account_key: "76561197960435530".to_string(),
            nickname: "X".to_string(),
            email: "a@b.com".to_string(),
            date: Utc::now(),
            status: RecordStatus::Completed,
            method: PaymentMethod::Card,
            authorization_code: Some("AUTH_1".to_string()),
            decline_reason: None,
        }
    }

    #[test]
    fn test_append_prepends() {
        let mut history = HistoryStore::new(Box::new(InMemoryStore::new()));
        history.append(record("first")).unwrap();
        history.append(record("second")).unwrap();
        history.append(record("third")).unwrap();

        let ids: Vec<String> = history.list().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["third", "second", "first"]);
        assert!(!history.is_empty());
    }

    #[test]
    fn test_corrupt_snapshot_reads_empty() {
        let mut store = InMemoryStore::new();
        store.set(HISTORY_KEY, "{not json".to_string()).unwrap();

        let history = HistoryStore::new(Box::new(store));
        assert!(history.list().is_empty());
        assert!(history.is_empty());
    }

    #[test]
    fn test_append_recovers_from_corrupt_snapshot() {
        let mut store = InMemoryStore::new();
        store.set(HISTORY_KEY, "42".to_string()).unwrap();

        let mut history = HistoryStore::new(Box::new(store));
        history.append(record("fresh")).unwrap();
        assert_eq!(history.list().len(), 1);
    }
}
