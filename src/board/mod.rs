//! Deck board dimensions.
//!
//! This module provides:
//! - The `BoardSpec` dimension triple used by every calculation
//! - Parsing of free-form overrides such as `25x150x3000`
//! - The fixed catalogue of standard boards

mod catalogue;
mod spec;

pub use catalogue::{BoardPreset, preset, presets};
pub use spec::BoardSpec;
