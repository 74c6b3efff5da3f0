use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{HeatmapError, HeatmapResult};

/// Unix seconds of January 1st, 00:00 UTC of `year`.
pub fn year_start_unix_seconds(year: i32) -> HeatmapResult<f64> {
    let date = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| {
        HeatmapError::InvalidData(format!("year {year} is outside the supported calendar"))
    })?;
    let time = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap_or_default());
    Ok(time.timestamp_millis() as f64 / 1000.0)
}

/// Rounds to `places` decimals, ties away from zero, on the exact binary value.
///
/// Exact halves such as `0.25` round away from zero; everything else rounds
/// to the nearest representable tenth of the stored value.
pub fn round_to_places(value: f64, places: u32, field_name: &str) -> HeatmapResult<Decimal> {
    let decimal = Decimal::from_f64_retain(value)
        .or_else(|| Decimal::from_f64(value))
        .ok_or_else(|| {
            HeatmapError::InvalidData(format!("{field_name} cannot be represented as decimal"))
        })?;
    Ok(decimal.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero))
}

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> HeatmapResult<f64> {
    value.to_f64().ok_or_else(|| {
        HeatmapError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// One-decimal rounding used for the temperature extremes.
pub fn round_to_tenth(value: f64, field_name: &str) -> HeatmapResult<f64> {
    decimal_to_f64(round_to_places(value, 1, field_name)?, field_name)
}
