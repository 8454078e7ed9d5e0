//! Clipboard sharing of quote cards.

use arboard::Clipboard;

use super::{CardExporter, ExportArtifact, QuoteCard};
use crate::error::ExportError;

/// Copy text to the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<(), ExportError> {
    let mut clipboard = Clipboard::new()
        .map_err(|e| ExportError::Clipboard(format!("Failed to access clipboard: {}", e)))?;

    clipboard
        .set_text(text.to_string())
        .map_err(|e| ExportError::Clipboard(format!("Failed to copy to clipboard: {}", e)))
}

/// Shares a card by copying its text to the clipboard.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClipboardExporter;

impl CardExporter for ClipboardExporter {
    fn export(&self, card: &QuoteCard) -> Result<ExportArtifact, ExportError> {
        copy_to_clipboard(&card.to_text())?;
        Ok(ExportArtifact::Clipboard)
    }
}
