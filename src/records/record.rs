//! The saved quote snapshot and its persisted JSON form.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::board::BoardSpec;
use crate::error::EstimateError;
use crate::estimate::CalculationResult;

/// Days a saved quote survives before it is dropped at load time.
pub const DEFAULT_RETENTION_DAYS: u32 = 7;

/// A frozen snapshot of one calculation.
///
/// Totals are copied from the `CalculationResult` at creation time and never
/// recomputed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecord {
    /// Creation time in milliseconds since the Unix epoch.
    pub id: i64,
    pub title: String,
    pub spec: BoardSpec,
    pub input_label: String,
    pub total_quantity: f64,
    #[serde(rename = "totalAreaM2")]
    pub total_area_m2: f64,
    pub total_price: f64,
    pub unit_price: f64,
    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl SavedRecord {
    /// Snapshot a valid calculation result.
    ///
    /// A missing or blank title is replaced by the board's dimensions.
    /// Results carrying a non-finite total or price are rejected, since they
    /// could not be read back after persisting.
    pub fn from_result(
        spec: &BoardSpec,
        unit_price: f64,
        result: &CalculationResult,
        title: Option<&str>,
        now_ms: i64,
    ) -> Result<Self, EstimateError> {
        let totals = [
            result.total_quantity,
            result.total_area,
            result.total_price,
            unit_price,
        ];
        if !result.valid || !totals.iter().all(|n| n.is_finite()) {
            return Err(EstimateError::InvalidResult);
        }

        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| spec.title());

        Ok(Self {
            id: now_ms,
            title,
            spec: *spec,
            input_label: result.input_label.clone(),
            total_quantity: result.total_quantity,
            total_area_m2: result.total_area,
            total_price: result.total_price,
            unit_price,
            timestamp: now_ms,
        })
    }

    /// Age in milliseconds relative to `now_ms`.
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        now_ms.saturating_sub(self.timestamp)
    }

    /// Whether every numeric field holds a usable value.
    fn is_well_formed(&self) -> bool {
        let numbers = [
            self.spec.thickness,
            self.spec.width,
            self.spec.length,
            self.total_quantity,
            self.total_area_m2,
            self.total_price,
            self.unit_price,
        ];
        numbers.iter().all(|n| n.is_finite()) && self.spec.is_computable()
    }
}

/// Decode the persisted record array.
///
/// Unknown fields are ignored. A record that is missing a required field or
/// carries a non-finite number is dropped on its own; the rest survive.
/// Returns the surviving records and the number dropped, or an error if the
/// payload is not a JSON array at all.
pub fn decode_records(json: &str) -> Result<(Vec<SavedRecord>, usize), serde_json::Error> {
    let entries: Vec<Value> = serde_json::from_str(json)?;
    let total = entries.len();

    let records: Vec<SavedRecord> = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<SavedRecord>(entry) {
            Ok(record) if record.is_well_formed() => Some(record),
            Ok(record) => {
                tracing::warn!(id = record.id, "Dropping saved quote with invalid numbers");
                None
            }
            Err(e) => {
                tracing::warn!("Dropping malformed saved quote: {}", e);
                None
            }
        })
        .collect();

    let dropped = total - records.len();
    Ok((records, dropped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::{CalcMode, compute};

    fn deck() -> BoardSpec {
        BoardSpec::new(25.0, 150.0, 3000.0)
    }

    #[test]
    fn test_from_result_copies_totals() {
        let result = compute(&deck(), 15000.0, CalcMode::ByAreaSquareMeters, "5");
        let record =
            SavedRecord::from_result(&deck(), 15000.0, &result, Some("Backyard"), 1_700_000_000_000)
                .unwrap();

        assert_eq!(record.id, 1_700_000_000_000);
        assert_eq!(record.timestamp, record.id);
        assert_eq!(record.title, "Backyard");
        assert_eq!(record.input_label, "5 m²");
        assert_eq!(record.total_quantity, 12.0);
        assert_eq!(record.total_area_m2, result.total_area);
        assert_eq!(record.total_price, result.total_price);
        assert_eq!(record.unit_price, 15000.0);
    }

    #[test]
    fn test_blank_title_uses_board_dimensions() {
        let result = compute(&deck(), 15000.0, CalcMode::ByQuantity, "10");
        let untitled = SavedRecord::from_result(&deck(), 15000.0, &result, None, 1).unwrap();
        let blank = SavedRecord::from_result(&deck(), 15000.0, &result, Some("   "), 1).unwrap();
        assert_eq!(untitled.title, "25×150×3000");
        assert_eq!(blank.title, "25×150×3000");
    }

    #[test]
    fn test_invalid_result_rejected() {
        let result = compute(&deck(), 15000.0, CalcMode::ByQuantity, "");
        assert_eq!(
            SavedRecord::from_result(&deck(), 15000.0, &result, None, 1),
            Err(EstimateError::InvalidResult)
        );
    }

    #[test]
    fn test_non_finite_totals_rejected() {
        let result = compute(&deck(), 15000.0, CalcMode::ByQuantity, "10");
        let nan_total = CalculationResult {
            total_price: f64::NAN,
            ..result.clone()
        };
        assert_eq!(
            SavedRecord::from_result(&deck(), 15000.0, &nan_total, None, 1),
            Err(EstimateError::InvalidResult)
        );
        assert_eq!(
            SavedRecord::from_result(&deck(), f64::INFINITY, &result, None, 1),
            Err(EstimateError::InvalidResult)
        );
    }

    #[test]
    fn test_persisted_field_names() {
        let result = compute(&deck(), 15000.0, CalcMode::ByQuantity, "10");
        let record = SavedRecord::from_result(&deck(), 15000.0, &result, None, 42).unwrap();
        let value = serde_json::to_value(&record).unwrap();

        for field in [
            "id",
            "title",
            "spec",
            "inputLabel",
            "totalQuantity",
            "totalAreaM2",
            "totalPrice",
            "unitPrice",
            "timestamp",
        ] {
            assert!(value.get(field).is_some(), "missing {}", field);
        }
        assert_eq!(value["spec"]["width"], 150.0);
    }

    #[test]
    fn test_decode_drops_bad_entries_only() {
        let json = r#"[
            {"id": 2, "title": "ok", "spec": {"thickness": 25, "width": 150, "length": 3000},
             "inputLabel": "10 boards", "totalQuantity": 10, "totalAreaM2": 4.5,
             "totalPrice": 150000, "unitPrice": 15000, "timestamp": 2, "color": "teak"},
            {"id": 1, "title": "no price", "spec": {"thickness": 25, "width": 150, "length": 3000},
             "inputLabel": "10 boards", "totalQuantity": 10, "totalAreaM2": 4.5,
             "unitPrice": 15000, "timestamp": 1},
            {"id": 3, "title": "null area", "spec": {"thickness": 25, "width": 150, "length": 3000},
             "inputLabel": "10 boards", "totalQuantity": 10, "totalAreaM2": null,
             "totalPrice": 150000, "unitPrice": 15000, "timestamp": 3},
            {"id": 4, "title": "flat board", "spec": {"thickness": 25, "width": 0, "length": 3000},
             "inputLabel": "10 boards", "totalQuantity": 10, "totalAreaM2": 0,
             "totalPrice": 150000, "unitPrice": 15000, "timestamp": 4},
            "garbage"
        ]"#;

        let (records, dropped) = decode_records(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "ok");
        assert_eq!(dropped, 4);
    }

    #[test]
    fn test_decode_rejects_non_array() {
        assert!(decode_records("{\"id\": 1}").is_err());
        assert!(decode_records("not json").is_err());
    }
}
