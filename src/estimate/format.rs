//! Number formatting for the display locale.
//!
//! Uses `,` thousands separators and whole-won prices.

/// Format a number with no separators and no trailing zeros.
pub fn format_plain(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let formatted = format!("{:.10}", value);
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
        // Too small for ten places: fall back to the shortest exact form
        if trimmed == "0" || trimmed == "-0" {
            format!("{}", value)
        } else {
            trimmed.to_string()
        }
    }
}

/// Format a board count, e.g. `1,200` or `2.5`.
pub fn format_quantity(value: f64) -> String {
    let plain = format_plain(value);
    match plain.split_once('.') {
        Some((int_part, dec_part)) => format!("{}.{}", group_thousands(int_part), dec_part),
        None => group_thousands(&plain),
    }
}

/// Format an area in square metres with two decimals, e.g. `1,234.50 m²`.
pub fn format_area(m2: f64) -> String {
    let fixed = format!("{:.2}", m2);
    let grouped = match fixed.split_once('.') {
        Some((int_part, dec_part)) => format!("{}.{}", group_thousands(int_part), dec_part),
        None => group_thousands(&fixed),
    };
    format!("{} m²", grouped)
}

/// Format a price rounded to whole won, e.g. `₩345,000`.
pub fn format_price(value: f64) -> String {
    let rounded = format!("{:.0}", value);
    match rounded.strip_prefix('-') {
        Some(abs) => format!("-₩{}", group_thousands(abs)),
        None => format!("₩{}", group_thousands(&rounded)),
    }
}

/// Insert `,` every three digits of an integer string.
fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    let formatted: String = result.chars().rev().collect();
    format!("{}{}", sign, formatted)
}
