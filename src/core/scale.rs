use crate::error::{HeatmapError, HeatmapResult};

/// Continuous affine mapping from a domain interval onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> HeatmapResult<Self> {
        let (domain_start, domain_end) = domain;
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(HeatmapError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        let (range_start, range_end) = range;
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(HeatmapError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Position of `value` inside the domain, `0` at the start and `1` at the end.
    ///
    /// Not clamped: values outside the domain extrapolate.
    #[must_use]
    pub fn normalize(self, value: f64) -> f64 {
        (value - self.domain_start) / (self.domain_end - self.domain_start)
    }

    pub fn map(self, value: f64) -> HeatmapResult<f64> {
        if !value.is_finite() {
            return Err(HeatmapError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = self.normalize(value);
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    pub fn invert(self, pixel: f64) -> HeatmapResult<f64> {
        if !pixel.is_finite() {
            return Err(HeatmapError::InvalidData("pixel must be finite".to_owned()));
        }

        let range_span = self.range_end - self.range_start;
        if range_span == 0.0 {
            return Ok(self.domain_start);
        }
        let normalized = (pixel - self.range_start) / range_span;
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }
}
