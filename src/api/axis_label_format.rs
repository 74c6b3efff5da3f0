use crate::core::primitives::round_to_places;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const DEGREE_CELSIUS: &str = "\u{b0}C";

/// Full English month name for a zero-based month index.
#[must_use]
pub fn month_name(month_index: usize) -> Option<&'static str> {
    MONTH_NAMES.get(month_index).copied()
}

/// Plain four-digit year, no grouping separators.
#[must_use]
pub fn format_year(year: i32) -> String {
    format!("{year:04}")
}

/// Fixed one-decimal label, rounding halves away from zero.
#[must_use]
pub fn format_one_decimal(value: f64) -> String {
    match round_to_places(value, 1, "label") {
        Ok(rounded) => {
            let text = format!("{rounded:.1}");
            // `-0.0` and friends collapse to an unsigned zero.
            if text == "-0.0" { "0.0".to_owned() } else { text }
        }
        Err(_) => format!("{value:.1}"),
    }
}

/// Variance label with an explicit `+` for non-negative offsets.
#[must_use]
pub fn format_signed_variance(variance: f64) -> String {
    let text = format_one_decimal(variance);
    if variance >= 0.0 && !text.starts_with('-') {
        format!("+{text}")
    } else {
        text
    }
}

#[must_use]
pub fn format_celsius(value: f64) -> String {
    format!("{}{DEGREE_CELSIUS}", format_one_decimal(value))
}
