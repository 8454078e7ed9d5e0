//! Parsing of the raw numeric input field.

/// Parse the user's quantity/area input.
///
/// Returns `Some(value)` only for a positive finite number. Surrounding
/// whitespace and `,` thousands separators are ignored, so `"1,200"` is
/// accepted while the field is being edited.
pub fn parse_input(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|&c| c != ',').collect();

    if cleaned.is_empty() || !is_plain_number(&cleaned) {
        return None;
    }

    let value: f64 = cleaned.parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Digits with at most one decimal point, optional leading sign.
///
/// Rejects forms `f64::from_str` would otherwise accept, such as `inf`,
/// `NaN` or `1e3`.
fn is_plain_number(input: &str) -> bool {
    let digits = input
        .strip_prefix('-')
        .or_else(|| input.strip_prefix('+'))
        .unwrap_or(input);

    !digits.is_empty()
        && digits.chars().any(|c| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.matches('.').count() <= 1
}
