//! Deck material estimation.
//!
//! This module provides functionality to:
//! - Parse the raw quantity/area input typed by the user
//! - Compute board count, area and price for a board spec
//! - Format results for the display locale

mod engine;
mod format;
mod input;

pub use engine::{CalcMode, CalculationResult, compute};
pub use format::{format_area, format_plain, format_price, format_quantity};
pub use input::parse_input;
