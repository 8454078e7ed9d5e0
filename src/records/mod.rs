//! Saved quote ledger.
//!
//! Records are frozen snapshots of a calculation. The store keeps them in
//! memory, rewrites the whole list to a key-value storage collaborator on
//! every mutation, and drops records older than the retention window when
//! loading.

mod record;
mod storage;
mod store;

pub use record::{DEFAULT_RETENTION_DAYS, SavedRecord, decode_records};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{Persistence, RECORDS_KEY, RecordStore, StoreEvent, StorePhase};
