//! Text rendering of a saved quote.

use chrono::{DateTime, Local, Utc};

use crate::estimate::{format_area, format_price, format_quantity};
use crate::records::SavedRecord;

/// A rendered quote card.
#[derive(Clone, Debug, PartialEq)]
pub struct QuoteCard {
    pub id: i64,
    pub title: String,
    pub lines: Vec<String>,
}

impl QuoteCard {
    pub fn from_record(record: &SavedRecord) -> Self {
        let mut lines = vec![
            format!("Board: {}", record.spec),
            format!("Input: {}", record.input_label),
            format!("Boards: {}", format_quantity(record.total_quantity)),
            format!("Area: {}", format_area(record.total_area_m2)),
            format!("Unit price: {}", format_price(record.unit_price)),
            format!("Total: {}", format_price(record.total_price)),
        ];

        if let Some(saved) = DateTime::<Utc>::from_timestamp_millis(record.timestamp) {
            let local = saved.with_timezone(&Local);
            lines.push(format!("Saved: {}", local.format("%Y-%m-%d %H:%M")));
        }

        Self {
            id: record.id,
            title: record.title.clone(),
            lines,
        }
    }

    /// Plain-text form: title line followed by the detail lines.
    pub fn to_text(&self) -> String {
        let mut text = format!("Deck quote: {}\n", self.title);
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }

    /// File name used when the card is saved to disk.
    pub fn file_name(&self) -> String {
        format!("quote-{}.txt", self.id)
    }
}
