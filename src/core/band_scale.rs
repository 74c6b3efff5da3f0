use crate::error::{HeatmapError, HeatmapResult};

/// Ordinal scale splitting a pixel range into `count` uniform, unpadded bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    count: usize,
    range_start: f64,
    range_end: f64,
}

impl BandScale {
    pub fn new(count: usize, range: (f64, f64)) -> HeatmapResult<Self> {
        let (range_start, range_end) = range;
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(HeatmapError::InvalidData(
                "band scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            count,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn count(self) -> usize {
        self.count
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Width of every band; `0` when the scale has no slots.
    #[must_use]
    pub fn bandwidth(self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.range_end - self.range_start) / self.count as f64
    }

    /// Start offset of band `index`, `None` outside `0..count`.
    #[must_use]
    pub fn offset(self, index: usize) -> Option<f64> {
        (index < self.count).then(|| self.range_start + self.bandwidth() * index as f64)
    }

    #[must_use]
    pub fn band(self, index: usize) -> Option<(f64, f64)> {
        self.offset(index)
            .map(|offset| (offset, offset + self.bandwidth()))
    }

    #[must_use]
    pub fn center(self, index: usize) -> Option<f64> {
        self.offset(index)
            .map(|offset| offset + self.bandwidth() / 2.0)
    }

    /// Band containing `pixel`; band ends are half-open.
    #[must_use]
    pub fn index_at(self, pixel: f64) -> Option<usize> {
        let bandwidth = self.bandwidth();
        if !pixel.is_finite() || bandwidth <= 0.0 {
            return None;
        }
        let relative = (pixel - self.range_start) / bandwidth;
        if relative < 0.0 {
            return None;
        }
        let index = relative.floor() as usize;
        (index < self.count).then_some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::BandScale;

    #[test]
    fn twelve_month_bands_cover_plot_height() {
        let bands = BandScale::new(12, (0.0, 450.0)).expect("bands");
        assert_eq!(bands.bandwidth(), 37.5);
        assert_eq!(bands.band(0), Some((0.0, 37.5)));
        assert_eq!(bands.band(11), Some((412.5, 450.0)));
        assert_eq!(bands.band(12), None);
    }

    #[test]
    fn index_lookup_is_half_open() {
        let bands = BandScale::new(12, (0.0, 450.0)).expect("bands");
        assert_eq!(bands.index_at(0.0), Some(0));
        assert_eq!(bands.index_at(37.5), Some(1));
        assert_eq!(bands.index_at(450.0), None);
        assert_eq!(bands.index_at(-0.1), None);
    }

    #[test]
    fn empty_band_scale_has_no_bands() {
        let bands = BandScale::new(0, (0.0, 400.0)).expect("bands");
        assert_eq!(bands.bandwidth(), 0.0);
        assert_eq!(bands.center(0), None);
        assert_eq!(bands.index_at(10.0), None);
    }
}
