//! Quote card export.
//!
//! This module provides functionality to:
//! - Render a saved quote as a card
//! - Write the card to a file
//! - Copy the card to the clipboard for sharing

mod card;
mod clipboard;
mod file;

pub use card::QuoteCard;
pub use clipboard::{ClipboardExporter, copy_to_clipboard};
pub use file::TextCardExporter;

use std::path::PathBuf;

use crate::error::ExportError;
use crate::records::{KeyValueStorage, RecordStore};

/// What an export produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportArtifact {
    /// A card written to this path.
    File(PathBuf),
    /// The card text is on the system clipboard.
    Clipboard,
}

/// Turns a quote card into an artifact.
///
/// Exports are independent of each other and leave nothing behind on
/// failure.
pub trait CardExporter {
    fn export(&self, card: &QuoteCard) -> Result<ExportArtifact, ExportError>;
}

/// Export the stored quote with `id`.
pub fn export_record<S: KeyValueStorage>(
    store: &RecordStore<S>,
    id: i64,
    exporter: &dyn CardExporter,
) -> Result<ExportArtifact, ExportError> {
    let record = store.get(id).ok_or(ExportError::NotFound(id))?;
    let card = QuoteCard::from_record(record);

    match exporter.export(&card) {
        Ok(artifact) => {
            tracing::info!(id, ?artifact, "Exported quote card");
            Ok(artifact)
        }
        Err(e) => {
            tracing::warn!(id, "Quote card export failed: {}", e);
            Err(e)
        }
    }
}
