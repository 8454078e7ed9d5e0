//! Fixed catalogue of standard deck boards.

use super::BoardSpec;
use crate::error::EstimateError;

/// A named catalogue entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardPreset {
    /// Stable identifier used on the command line and in config.
    pub name: &'static str,
    /// Human-readable material description.
    pub material: &'static str,
    pub spec: BoardSpec,
}

const PRESETS: &[BoardPreset] = &[
    BoardPreset {
        name: "wpc-25x150x3000",
        material: "WPC composite",
        spec: BoardSpec::new(25.0, 150.0, 3000.0),
    },
    BoardPreset {
        name: "wpc-25x140x2400",
        material: "WPC composite",
        spec: BoardSpec::new(25.0, 140.0, 2400.0),
    },
    BoardPreset {
        name: "wpc-23x145x3600",
        material: "WPC composite",
        spec: BoardSpec::new(23.0, 145.0, 3600.0),
    },
    BoardPreset {
        name: "ipe-19x95x2100",
        material: "Ipe hardwood",
        spec: BoardSpec::new(19.0, 95.0, 2100.0),
    },
    BoardPreset {
        name: "ipe-19x120x3000",
        material: "Ipe hardwood",
        spec: BoardSpec::new(19.0, 120.0, 3000.0),
    },
    BoardPreset {
        name: "pine-21x120x3600",
        material: "Treated pine",
        spec: BoardSpec::new(21.0, 120.0, 3600.0),
    },
    BoardPreset {
        name: "pine-30x140x3600",
        material: "Treated pine",
        spec: BoardSpec::new(30.0, 140.0, 3600.0),
    },
];

/// All catalogue entries, in display order.
pub fn presets() -> &'static [BoardPreset] {
    PRESETS
}

/// Look up a catalogue entry by name (case-insensitive).
pub fn preset(name: &str) -> Result<&'static BoardPreset, EstimateError> {
    let wanted = name.trim();
    PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| EstimateError::UnknownPreset(wanted.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_computable_and_unique() {
        let mut names: Vec<&str> = presets().iter().map(|p| p.name).collect();
        assert!(presets().iter().all(|p| p.spec.is_computable()));
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), presets().len());
    }

    #[test]
    fn test_lookup() {
        let p = preset("WPC-25x150x3000").unwrap();
        assert_eq!(p.spec, BoardSpec::new(25.0, 150.0, 3000.0));
        assert_eq!(
            preset("oak-1x1x1"),
            Err(EstimateError::UnknownPreset("oak-1x1x1".to_string()))
        );
    }
}
