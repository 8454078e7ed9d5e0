//! Board count, area and price calculation.

use std::str::FromStr;

use super::format::format_plain;
use super::input::parse_input;
use crate::board::BoardSpec;
use crate::units::{PYEONG_TO_M2, mm2_to_m2, pyeong_to_m2};

/// Which quantity the user's input describes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CalcMode {
    /// Input is a board count, taken verbatim.
    #[default]
    ByQuantity,
    /// Input is a target area in square metres.
    ByAreaSquareMeters,
    /// Input is a target area in pyeong.
    ByAreaPyeong,
}

impl CalcMode {
    pub const ALL: [CalcMode; 3] = [
        Self::ByQuantity,
        Self::ByAreaSquareMeters,
        Self::ByAreaPyeong,
    ];

    /// Short name used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ByQuantity => "quantity",
            Self::ByAreaSquareMeters => "m2",
            Self::ByAreaPyeong => "pyeong",
        }
    }

    /// Unit appended to the echoed input.
    fn unit_label(&self) -> &'static str {
        match self {
            Self::ByQuantity => "boards",
            Self::ByAreaSquareMeters => "m²",
            Self::ByAreaPyeong => "pyeong",
        }
    }
}

impl std::fmt::Display for CalcMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalcMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quantity" | "qty" | "boards" => Ok(Self::ByQuantity),
            "m2" | "sqm" | "area" => Ok(Self::ByAreaSquareMeters),
            "pyeong" | "py" => Ok(Self::ByAreaPyeong),
            other => Err(format!(
                "unknown mode '{}' (expected quantity, m2 or pyeong)",
                other
            )),
        }
    }
}

/// Derived quantities for one set of inputs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CalculationResult {
    pub valid: bool,
    /// Face area of one board in m².
    pub area_per_board: f64,
    /// Price per m² of decking.
    pub price_per_area_unit: f64,
    pub price_per_pyeong: f64,
    /// Board count. Integral for the area modes; verbatim input for
    /// `ByQuantity`, which may be fractional.
    pub total_quantity: f64,
    /// Covered area in m².
    pub total_area: f64,
    pub total_price: f64,
    /// The input echoed with its unit, e.g. `5 m²`.
    pub input_label: String,
}

impl CalculationResult {
    /// The result for incomplete or unparseable input: all zeros.
    pub fn invalid() -> Self {
        Self::default()
    }
}

/// Compute board count, area and price.
///
/// Returns an invalid result (all zeros, empty label) when the input is not
/// a positive number, the board has no area, or the unit price is negative
/// or not finite. A zero unit price is valid.
/// Pure; safe to call on every keystroke.
pub fn compute(
    spec: &BoardSpec,
    unit_price: f64,
    mode: CalcMode,
    raw_input: &str,
) -> CalculationResult {
    let Some(input) = parse_input(raw_input) else {
        return CalculationResult::invalid();
    };
    if !spec.is_computable() || !unit_price.is_finite() || unit_price < 0.0 {
        return CalculationResult::invalid();
    }

    let area_per_board = mm2_to_m2(spec.width, spec.length);
    let price_per_area_unit = if unit_price > 0.0 && area_per_board > 0.0 {
        unit_price / area_per_board
    } else {
        0.0
    };
    let price_per_pyeong = price_per_area_unit * PYEONG_TO_M2;

    let (total_quantity, total_area) = match mode {
        CalcMode::ByQuantity => (input, input * area_per_board),
        CalcMode::ByAreaSquareMeters => {
            let count = boards_to_cover(input, area_per_board);
            (count, count * area_per_board)
        }
        CalcMode::ByAreaPyeong => {
            let count = boards_to_cover(pyeong_to_m2(input), area_per_board);
            (count, count * area_per_board)
        }
    };
    let total_price = total_quantity * unit_price;

    let result = CalculationResult {
        valid: true,
        area_per_board,
        price_per_area_unit,
        price_per_pyeong,
        total_quantity,
        total_area,
        total_price,
        input_label: format!("{} {}", format_plain(input), mode.unit_label()),
    };

    tracing::debug!(
        mode = %mode,
        input,
        quantity = result.total_quantity,
        area = result.total_area,
        price = result.total_price,
        "computed estimate"
    );

    result
}

/// Whole boards needed to cover `target_m2`. Partial boards are bought whole.
fn boards_to_cover(target_m2: f64, area_per_board: f64) -> f64 {
    (target_m2 / area_per_board).ceil()
}
