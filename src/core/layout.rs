use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HeatmapError, HeatmapResult};

/// Immutable geometry and styling knobs for one heat-map document.
///
/// This type is serializable so hosts can keep layout presets in JSON files;
/// every field falls back to its default when omitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Space reserved left of and below the grid for the axes.
    pub padding_px: f64,
    pub plot_width_px: f64,
    pub plot_height_px: f64,
    pub legend_width_px: f64,
    pub legend_height_px: f64,
    pub legend_swatch_height_px: f64,
    /// Increment between consecutive legend temperatures, in °C.
    pub legend_step: f64,
    /// Approximate number of ticks requested on the year axis.
    pub year_tick_count: usize,
    pub axis_tick_size_px: f64,
    pub legend_tick_size_px: f64,
    pub tick_padding_px: f64,
    /// Length of the end ticks drawn at both ends of an axis domain line.
    pub outer_tick_size_px: f64,
    pub axis_font_size_px: f64,
    pub title_font_size_px: f64,
    pub tooltip_opacity: f64,
    pub hover_stroke_width_px: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let padding_px = 100.0;
        let plot_width_px = 1400.0 - padding_px * 2.0;
        Self {
            padding_px,
            plot_width_px,
            plot_height_px: 550.0 - padding_px,
            legend_width_px: plot_width_px / 3.0,
            legend_height_px: 100.0,
            legend_swatch_height_px: 25.0,
            legend_step: 1.1,
            year_tick_count: 21,
            axis_tick_size_px: 10.0,
            legend_tick_size_px: 8.0,
            tick_padding_px: 5.0,
            outer_tick_size_px: 0.0,
            axis_font_size_px: 10.0,
            title_font_size_px: 24.0,
            tooltip_opacity: 0.85,
            hover_stroke_width_px: 1.0,
        }
    }
}

impl LayoutConfig {
    /// Sets the grid size and keeps the legend at a third of the grid width.
    #[must_use]
    pub fn with_plot_size(mut self, width_px: f64, height_px: f64) -> Self {
        self.plot_width_px = width_px;
        self.plot_height_px = height_px;
        self.legend_width_px = width_px / 3.0;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding_px: f64) -> Self {
        self.padding_px = padding_px;
        self
    }

    #[must_use]
    pub fn with_legend_step(mut self, legend_step: f64) -> Self {
        self.legend_step = legend_step;
        self
    }

    #[must_use]
    pub fn with_year_tick_count(mut self, year_tick_count: usize) -> Self {
        self.year_tick_count = year_tick_count;
        self
    }

    pub fn validate(self) -> HeatmapResult<Self> {
        for (name, value) in [
            ("plot_width_px", self.plot_width_px),
            ("plot_height_px", self.plot_height_px),
            ("legend_width_px", self.legend_width_px),
            ("legend_height_px", self.legend_height_px),
            ("legend_swatch_height_px", self.legend_swatch_height_px),
            ("legend_step", self.legend_step),
            ("axis_font_size_px", self.axis_font_size_px),
            ("title_font_size_px", self.title_font_size_px),
            ("hover_stroke_width_px", self.hover_stroke_width_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(HeatmapError::InvalidLayout(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }

        for (name, value) in [
            ("padding_px", self.padding_px),
            ("axis_tick_size_px", self.axis_tick_size_px),
            ("legend_tick_size_px", self.legend_tick_size_px),
            ("tick_padding_px", self.tick_padding_px),
            ("outer_tick_size_px", self.outer_tick_size_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(HeatmapError::InvalidLayout(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }

        if !self.tooltip_opacity.is_finite() || !(0.0..=1.0).contains(&self.tooltip_opacity) {
            return Err(HeatmapError::InvalidLayout(
                "`tooltip_opacity` must be in [0, 1]".to_owned(),
            ));
        }
        if self.year_tick_count == 0 {
            return Err(HeatmapError::InvalidLayout(
                "`year_tick_count` must be > 0".to_owned(),
            ));
        }
        if self.legend_swatch_height_px > self.legend_height_px {
            return Err(HeatmapError::InvalidLayout(
                "legend swatches must fit inside the legend height".to_owned(),
            ));
        }

        Ok(self)
    }

    pub fn from_json_str(input: &str) -> HeatmapResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| HeatmapError::InvalidLayout(format!("failed to parse layout json: {e}")))?;
        config.validate()
    }

    pub fn from_json_file(path: &Path) -> HeatmapResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            HeatmapError::InvalidLayout(format!(
                "failed to read layout `{}`: {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&raw)
    }

    pub fn to_json_pretty(self) -> HeatmapResult<String> {
        serde_json::to_string_pretty(&self).map_err(|e| {
            HeatmapError::InvalidLayout(format!("failed to serialize layout json: {e}"))
        })
    }

    /// Height of one month row.
    #[must_use]
    pub fn cell_height_px(self) -> f64 {
        self.plot_height_px / 12.0
    }
}
