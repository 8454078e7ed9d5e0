//! Board dimension triple and free-form parsing.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::EstimateError;
use crate::estimate::format_plain;

lazy_static! {
    /// Matches `thickness x width x length` in millimetres.
    /// Accepts `x`, `X`, `×` and `*` as separators, with optional whitespace.
    static ref BOARD_DIMENSIONS: Regex = Regex::new(
        r"^\s*(\d+(?:\.\d+)?)\s*[xX×*]\s*(\d+(?:\.\d+)?)\s*[xX×*]\s*(\d+(?:\.\d+)?)\s*$"
    ).unwrap();
}

/// Dimensions of a single deck board, all in millimetres.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSpec {
    pub thickness: f64,
    pub width: f64,
    pub length: f64,
}

impl BoardSpec {
    pub const fn new(thickness: f64, width: f64, length: f64) -> Self {
        Self {
            thickness,
            width,
            length,
        }
    }

    /// Parse a free-form override such as `25x150x3000` or `19.5 × 140 × 2400`.
    pub fn parse(input: &str) -> Result<Self, EstimateError> {
        let captures = BOARD_DIMENSIONS.captures(input).ok_or_else(|| {
            EstimateError::invalid_board(input, "expected THICKNESSxWIDTHxLENGTH in millimetres")
        })?;

        let mut dims = [0.0_f64; 3];
        for (i, name) in ["thickness", "width", "length"].into_iter().enumerate() {
            let value: f64 = captures[i + 1].parse().map_err(|_| {
                EstimateError::invalid_board(input, format!("{} is not a number", name))
            })?;
            if !value.is_finite() || value <= 0.0 {
                return Err(EstimateError::invalid_board(
                    input,
                    format!("{} must be positive", name),
                ));
            }
            dims[i] = value;
        }

        Ok(Self::new(dims[0], dims[1], dims[2]))
    }

    /// Whether width and length allow an area calculation.
    pub fn is_computable(&self) -> bool {
        self.width.is_finite() && self.length.is_finite() && self.width > 0.0 && self.length > 0.0
    }

    /// Auto-generated quote title, e.g. `25×150×3000`.
    pub fn title(&self) -> String {
        format!(
            "{}×{}×{}",
            format_plain(self.thickness),
            format_plain(self.width),
            format_plain(self.length)
        )
    }
}

impl std::fmt::Display for BoardSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} mm", self.title())
    }
}

impl std::str::FromStr for BoardSpec {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_separators() {
        let expected = BoardSpec::new(25.0, 150.0, 3000.0);
        assert_eq!(BoardSpec::parse("25x150x3000").unwrap(), expected);
        assert_eq!(BoardSpec::parse("25 X 150 X 3000").unwrap(), expected);
        assert_eq!(BoardSpec::parse("25×150×3000").unwrap(), expected);
        assert_eq!(BoardSpec::parse(" 25*150*3000 ").unwrap(), expected);
    }

    #[test]
    fn test_parse_decimal_dimensions() {
        let spec = BoardSpec::parse("19.5x140x2400").unwrap();
        assert_eq!(spec.thickness, 19.5);
        assert_eq!(spec.title(), "19.5×140×2400");
    }

    #[test]
    fn test_parse_rejects_zero_and_garbage() {
        assert!(matches!(
            BoardSpec::parse("25x0x3000"),
            Err(EstimateError::InvalidBoardSpec { .. })
        ));
        assert!(BoardSpec::parse("25x150").is_err());
        assert!(BoardSpec::parse("-25x150x3000").is_err());
        assert!(BoardSpec::parse("deck").is_err());
        assert!(BoardSpec::parse("").is_err());
    }

    #[test]
    fn test_is_computable() {
        assert!(BoardSpec::new(25.0, 150.0, 3000.0).is_computable());
        assert!(!BoardSpec::new(25.0, 0.0, 3000.0).is_computable());
        assert!(!BoardSpec::new(25.0, 150.0, -1.0).is_computable());
        // Thickness plays no part in area
        assert!(BoardSpec::new(0.0, 150.0, 3000.0).is_computable());
    }

    #[test]
    fn test_title_keeps_tiny_dimensions() {
        let spec = BoardSpec::new(0.00000000001, 150.0, 3000.0);
        assert_eq!(spec.title(), "0.00000000001×150×3000");
    }

    #[test]
    fn test_title() {
        assert_eq!(BoardSpec::new(25.0, 150.0, 3000.0).title(), "25×150×3000");
        assert_eq!(
            BoardSpec::new(25.0, 150.0, 3000.0).to_string(),
            "25×150×3000 mm"
        );
    }
}
