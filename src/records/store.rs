//! The record store: owns the saved quotes for the process lifetime.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};

use super::record::{DEFAULT_RETENTION_DAYS, SavedRecord, decode_records};
use super::storage::KeyValueStorage;

/// Storage key holding the JSON array of saved quotes.
pub const RECORDS_KEY: &str = "deck-quotes";

/// Lifecycle phase of the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorePhase {
    /// Persisted data not read yet. Mutations are queued and nothing is
    /// written, so an empty list never overwrites stored quotes.
    Loading,
    /// Mutations are applied and persisted immediately.
    Ready,
}

/// Notification emitted after the store changes.
#[derive(Clone, Debug, PartialEq)]
pub enum StoreEvent {
    /// The persisted list was read. `expired` and `dropped` count records
    /// filtered out for age and for failing validation.
    Loaded {
        count: usize,
        expired: usize,
        dropped: usize,
    },
    Appended { id: i64 },
    Removed { id: i64 },
    Cleared,
    /// Writing the list failed; in-memory state is unaffected.
    PersistFailed { message: String },
}

/// What happened to a mutation's write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Persistence {
    /// The full list was written.
    Written,
    /// Queued until the initial load completes.
    Deferred,
    /// Nothing changed, nothing written.
    Unchanged,
    /// The write failed; a warning was logged.
    Failed,
}

#[derive(Debug)]
enum PendingMutation {
    Append(SavedRecord),
    Remove(i64),
    Clear,
}

/// Saved quote ledger backed by a key-value storage collaborator.
pub struct RecordStore<S: KeyValueStorage> {
    storage: S,
    key: String,
    retention_ms: i64,
    phase: StorePhase,
    records: Vec<SavedRecord>,
    pending: Vec<PendingMutation>,
    on_change: Option<Arc<dyn Fn(&StoreEvent) + Send + Sync>>,
}

impl<S: KeyValueStorage> RecordStore<S> {
    /// Create a store in the `Loading` phase with the default retention.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            key: RECORDS_KEY.to_string(),
            retention_ms: TimeDelta::days(i64::from(DEFAULT_RETENTION_DAYS)).num_milliseconds(),
            phase: StorePhase::Loading,
            records: Vec::new(),
            pending: Vec::new(),
            on_change: None,
        }
    }

    /// Keep records for `days` days instead of the default.
    pub fn with_retention_days(mut self, days: u32) -> Self {
        self.retention_ms = TimeDelta::days(i64::from(days)).num_milliseconds();
        self
    }

    /// Store the list under a different storage key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Set callback invoked after every change.
    pub fn set_on_change(&mut self, callback: impl Fn(&StoreEvent) + Send + Sync + 'static) {
        self.on_change = Some(Arc::new(callback));
    }

    pub fn phase(&self) -> StorePhase {
        self.phase
    }

    /// Records, newest first.
    pub fn records(&self) -> &[SavedRecord] {
        &self.records
    }

    pub fn get(&self, id: i64) -> Option<&SavedRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the storage collaborator.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Load persisted records as of the current time.
    pub fn load(&mut self) -> &[SavedRecord] {
        self.load_at(Utc::now().timestamp_millis())
    }

    /// Load persisted records as of `now_ms`.
    ///
    /// Records whose age is at least the retention window are skipped, the
    /// rest are sorted newest first. Unreadable data counts as empty. Any
    /// mutations queued while loading are then applied and written once.
    /// Calling this again re-reads storage.
    pub fn load_at(&mut self, now_ms: i64) -> &[SavedRecord] {
        let (mut records, dropped) = self.read_persisted();

        let before = records.len();
        records.retain(|r| r.age_ms(now_ms) < self.retention_ms);
        let expired = before - records.len();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        self.records = records;
        self.phase = StorePhase::Ready;

        tracing::info!(
            count = self.records.len(),
            expired,
            dropped,
            "Loaded saved quotes"
        );
        self.notify(StoreEvent::Loaded {
            count: self.records.len(),
            expired,
            dropped,
        });

        let pending = std::mem::take(&mut self.pending);
        if !pending.is_empty() {
            tracing::debug!(count = pending.len(), "Applying mutations queued during load");
            let mut changed = false;
            for mutation in pending {
                changed |= self.apply(mutation);
            }
            if changed {
                self.persist();
            }
        }

        &self.records
    }

    /// Add a record at the front of the list.
    pub fn append(&mut self, record: SavedRecord) -> Persistence {
        self.mutate(PendingMutation::Append(record))
    }

    /// Delete the record with `id`. No-op if absent.
    pub fn remove(&mut self, id: i64) -> Persistence {
        self.mutate(PendingMutation::Remove(id))
    }

    /// Delete every record.
    pub fn clear(&mut self) -> Persistence {
        self.mutate(PendingMutation::Clear)
    }

    fn mutate(&mut self, mutation: PendingMutation) -> Persistence {
        if self.phase == StorePhase::Loading {
            tracing::debug!(?mutation, "Store still loading, queueing mutation");
            self.pending.push(mutation);
            return Persistence::Deferred;
        }

        if !self.apply(mutation) {
            return Persistence::Unchanged;
        }
        self.persist()
    }

    /// Apply a mutation to the in-memory list. Returns whether it changed
    /// anything that must be written.
    fn apply(&mut self, mutation: PendingMutation) -> bool {
        match mutation {
            PendingMutation::Append(record) => {
                let id = record.id;
                self.records.insert(0, record);
                self.notify(StoreEvent::Appended { id });
                true
            }
            PendingMutation::Remove(id) => {
                let before = self.records.len();
                self.records.retain(|r| r.id != id);
                if self.records.len() == before {
                    tracing::debug!(id, "No saved quote to remove");
                    return false;
                }
                self.notify(StoreEvent::Removed { id });
                true
            }
            PendingMutation::Clear => {
                self.records.clear();
                self.notify(StoreEvent::Cleared);
                true
            }
        }
    }

    /// Write the whole list. Failures are logged and reported, never raised.
    fn persist(&mut self) -> Persistence {
        let written = serde_json::to_string(&self.records)
            .map_err(crate::error::StorageError::from)
            .and_then(|json| self.storage.write(&self.key, &json));

        match written {
            Ok(()) => {
                tracing::debug!(count = self.records.len(), "Persisted saved quotes");
                Persistence::Written
            }
            Err(e) => {
                tracing::warn!("Failed to persist saved quotes: {}", e);
                self.notify(StoreEvent::PersistFailed {
                    message: e.to_string(),
                });
                Persistence::Failed
            }
        }
    }

    fn read_persisted(&self) -> (Vec<SavedRecord>, usize) {
        let json = match self.storage.read(&self.key) {
            Ok(Some(json)) => json,
            Ok(None) => return (Vec::new(), 0),
            Err(e) => {
                tracing::warn!("Failed to read saved quotes, starting empty: {}", e);
                return (Vec::new(), 0);
            }
        };

        match decode_records(&json) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::warn!("Saved quotes are malformed, starting empty: {}", e);
                (Vec::new(), 0)
            }
        }
    }

    fn notify(&self, event: StoreEvent) {
        if let Some(ref on_change) = self.on_change {
            on_change(&event);
        }
    }
}
