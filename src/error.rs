//! Error types for the estimator.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the board catalogue and calculation snapshots.
///
/// Unparseable numeric input is not an error: `compute` reports it as an
/// invalid result instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimateError {
    /// Board dimensions could not be parsed or were not positive.
    #[error("Invalid board spec '{input}': {reason}")]
    InvalidBoardSpec { input: String, reason: String },

    /// No catalogue entry with this name.
    #[error("Unknown board preset '{0}'")]
    UnknownPreset(String),

    /// Only valid calculation results can be saved.
    #[error("Cannot save an invalid calculation result")]
    InvalidResult,
}

impl EstimateError {
    /// Creates an InvalidBoardSpec error
    pub fn invalid_board(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidBoardSpec {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Errors from a key-value storage collaborator.
#[derive(Error, Debug)]
pub enum StorageError {
    /// File system failure.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Records could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend refused the write (e.g. quota exceeded).
    #[error("Storage rejected write for key '{key}': {message}")]
    Rejected { key: String, message: String },
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors from exporting a quote card.
#[derive(Error, Debug)]
pub enum ExportError {
    /// No stored record with this id.
    #[error("Quote {0} not found")]
    NotFound(i64),

    /// Writing the artifact failed.
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The system clipboard was unavailable or rejected the text.
    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

/// Errors from loading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config value: {0}")]
    Invalid(String),
}
