//! Deck board quantity, area and cost estimation with a saved-quote ledger.

pub mod board;
pub mod config;
pub mod error;
pub mod estimate;
pub mod export;
pub mod records;
pub mod units;

pub use board::BoardSpec;
pub use error::{ConfigError, EstimateError, ExportError, StorageError};
pub use estimate::{CalcMode, CalculationResult, compute};
pub use records::{RecordStore, SavedRecord};
