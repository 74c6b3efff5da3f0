use chrono::{DateTime, Datelike};

use crate::core::LinearScale;
use crate::core::primitives::year_start_unix_seconds;
use crate::error::{HeatmapError, HeatmapResult};

/// Horizontal year axis model.
///
/// Years are placed at the instant of their January 1st (UTC), so the mapping
/// is linear in time rather than in year number: leap years are slightly
/// wider than common years.
///
/// A single-year domain is accepted and collapses onto the start of the
/// range, which lets one-year datasets lay out as a single full-width column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearScale {
    min_year: i32,
    max_year: i32,
    width_px: f64,
    linear: Option<LinearScale>,
}

impl YearScale {
    pub fn new(min_year: i32, max_year: i32, width_px: f64) -> HeatmapResult<Self> {
        if min_year > max_year {
            return Err(HeatmapError::InvalidData(format!(
                "year domain is reversed: {min_year} > {max_year}"
            )));
        }
        if !width_px.is_finite() || width_px <= 0.0 {
            return Err(HeatmapError::InvalidData(
                "year scale width must be finite and > 0".to_owned(),
            ));
        }

        let linear = if min_year == max_year {
            None
        } else {
            Some(LinearScale::new(
                (
                    year_start_unix_seconds(min_year)?,
                    year_start_unix_seconds(max_year)?,
                ),
                (0.0, width_px),
            )?)
        };

        Ok(Self {
            min_year,
            max_year,
            width_px,
            linear,
        })
    }

    #[must_use]
    pub fn domain(self) -> (i32, i32) {
        (self.min_year, self.max_year)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (0.0, self.width_px)
    }

    #[must_use]
    pub fn is_single_year(self) -> bool {
        self.linear.is_none()
    }

    /// Number of whole years spanned by the domain, `0` for a single year.
    #[must_use]
    pub fn year_span(self) -> i32 {
        self.max_year - self.min_year
    }

    pub fn year_to_pixel(self, year: i32) -> HeatmapResult<f64> {
        match self.linear {
            Some(linear) => linear.map(year_start_unix_seconds(year)?),
            None => Ok(0.0),
        }
    }

    /// Calendar year of the instant under `pixel`.
    pub fn pixel_to_year(self, pixel: f64) -> HeatmapResult<i32> {
        let Some(linear) = self.linear else {
            if !pixel.is_finite() {
                return Err(HeatmapError::InvalidData("pixel must be finite".to_owned()));
            }
            return Ok(self.min_year);
        };

        let seconds = linear.invert(pixel)?;
        let time = DateTime::from_timestamp(seconds.floor() as i64, 0).ok_or_else(|| {
            HeatmapError::InvalidData(format!("pixel {pixel} maps outside the calendar"))
        })?;
        Ok(time.year())
    }
}
