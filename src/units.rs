//! Area unit conversion.

/// Square metres in one pyeong.
pub const PYEONG_TO_M2: f64 = 3.305785;

/// Square millimetres in one square metre.
const MM2_PER_M2: f64 = 1_000_000.0;

/// Convert an area in pyeong to square metres.
pub fn pyeong_to_m2(pyeong: f64) -> f64 {
    pyeong * PYEONG_TO_M2
}

/// Convert an area in square metres to pyeong.
pub fn m2_to_pyeong(m2: f64) -> f64 {
    m2 / PYEONG_TO_M2
}

/// Face area of a rectangle given in millimetres, in square metres.
pub fn mm2_to_m2(width_mm: f64, length_mm: f64) -> f64 {
    (width_mm * length_mm) / MM2_PER_M2
}
