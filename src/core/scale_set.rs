use tracing::debug;

use crate::core::primitives::round_to_tenth;
use crate::core::{BandScale, Dataset, DivergingColorScale, LayoutConfig, YearScale};
use crate::error::{HeatmapError, HeatmapResult};
use crate::render::Color;

pub const MONTHS_PER_YEAR: usize = 12;

const MAX_LEGEND_TICKS: usize = 4_096;

/// Every scale derived from one dataset and layout.
///
/// Built once per dataset and never mutated; rebuilding is the only way to
/// reflect a new dataset or layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleSet {
    year_scale: YearScale,
    month_band: BandScale,
    color_scale: DivergingColorScale,
    legend_ticks: Vec<f64>,
    legend_band: BandScale,
    min_temp: f64,
    max_temp: f64,
    cell_width: f64,
    cell_height: f64,
}

impl ScaleSet {
    pub fn build(dataset: &Dataset, layout: LayoutConfig) -> HeatmapResult<Self> {
        let layout = layout.validate()?;

        let (min_year, max_year) = dataset.year_extent();
        let (min_variance, max_variance) = dataset.variance_extent();
        let base = dataset.base_temperature();
        let min_temp = round_to_tenth(base + min_variance, "minimum temperature")?;
        let max_temp = round_to_tenth(base + max_variance, "maximum temperature")?;

        let year_scale = YearScale::new(min_year, max_year, layout.plot_width_px)?;
        let cell_width = if year_scale.is_single_year() {
            layout.plot_width_px
        } else {
            layout.plot_width_px / f64::from(year_scale.year_span())
        };
        let cell_height = layout.cell_height_px();

        let month_band = BandScale::new(MONTHS_PER_YEAR, (0.0, layout.plot_height_px))?;
        let color_scale = DivergingColorScale::reversed(min_temp, max_temp)?;
        let legend_ticks = legend_ticks(min_temp, max_temp, layout.legend_step)?;
        let legend_band = BandScale::new(legend_ticks.len(), (0.0, layout.legend_width_px))?;

        debug!(
            min_year,
            max_year,
            min_temp,
            max_temp,
            cell_width,
            legend_ticks = legend_ticks.len(),
            "built scale set"
        );

        Ok(Self {
            year_scale,
            month_band,
            color_scale,
            legend_ticks,
            legend_band,
            min_temp,
            max_temp,
            cell_width,
            cell_height,
        })
    }

    #[must_use]
    pub fn year_scale(&self) -> YearScale {
        self.year_scale
    }

    #[must_use]
    pub fn month_band(&self) -> BandScale {
        self.month_band
    }

    #[must_use]
    pub fn color_scale(&self) -> DivergingColorScale {
        self.color_scale
    }

    #[must_use]
    pub fn legend_ticks(&self) -> &[f64] {
        &self.legend_ticks
    }

    /// Horizontal bands of the legend strip, one per legend tick.
    #[must_use]
    pub fn legend_band(&self) -> BandScale {
        self.legend_band
    }

    /// `(min, max)` absolute temperature, each rounded to one decimal.
    #[must_use]
    pub fn temperature_extent(&self) -> (f64, f64) {
        (self.min_temp, self.max_temp)
    }

    #[must_use]
    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    #[must_use]
    pub fn cell_height(&self) -> f64 {
        self.cell_height
    }

    #[must_use]
    pub fn fill_color(&self, absolute_temperature: f64) -> Color {
        self.color_scale.color(absolute_temperature)
    }

    /// Top-left corner of the cell for `(year, month_index)` in plot space.
    pub fn cell_origin(&self, year: i32, month_index: usize) -> HeatmapResult<(f64, f64)> {
        let x = self.year_scale.year_to_pixel(year)?;
        let y = self.month_band.offset(month_index).ok_or_else(|| {
            HeatmapError::InvalidData(format!("month index {month_index} is outside 0..12"))
        })?;
        Ok((x, y))
    }
}

/// Half-open arithmetic sequence `min, min + step, ...` strictly below `max`.
pub fn legend_ticks(min: f64, max: f64, step: f64) -> HeatmapResult<Vec<f64>> {
    if !min.is_finite() || !max.is_finite() {
        return Err(HeatmapError::InvalidData(
            "legend bounds must be finite".to_owned(),
        ));
    }
    if !step.is_finite() || step <= 0.0 {
        return Err(HeatmapError::InvalidData(
            "legend step must be finite and > 0".to_owned(),
        ));
    }

    let count = ((max - min) / step).ceil().max(0.0);
    if count > MAX_LEGEND_TICKS as f64 {
        return Err(HeatmapError::InvalidData(format!(
            "legend step {step} yields more than {MAX_LEGEND_TICKS} ticks"
        )));
    }

    Ok((0..count as usize)
        .map(|index| min + index as f64 * step)
        .filter(|tick| *tick < max)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::legend_ticks;

    #[test]
    fn legend_ticks_are_half_open() {
        let ticks = legend_ticks(2.0, 4.2, 1.1).expect("ticks");
        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks[0], 2.0);
        assert!(ticks[1] < 4.2);
    }

    #[test]
    fn flat_range_yields_no_ticks() {
        assert!(legend_ticks(8.0, 8.0, 1.1).expect("ticks").is_empty());
    }

    #[test]
    fn zero_step_is_rejected() {
        assert!(legend_ticks(1.0, 2.0, 0.0).is_err());
    }
}
