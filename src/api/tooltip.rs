use serde::{Deserialize, Serialize};

use crate::core::LayoutConfig;

use super::CellMark;
use super::axis_label_format::{DEGREE_CELSIUS, format_celsius, format_signed_variance, month_name};

/// Tooltip presentation state, read by the frame builder.
///
/// The hidden state is the `Default` value; hovering never leaves residue
/// behind once the pointer leaves.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TooltipState {
    pub opacity: f64,
    /// Year of the hovered cell, exposed as the tooltip's `data-year`.
    pub year: Option<i32>,
    pub left: f64,
    pub top: f64,
    pub lines: Vec<String>,
}

impl TooltipState {
    #[must_use]
    pub fn hidden() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    /// Tooltip shown next to `mark`.
    #[must_use]
    pub fn for_mark(mark: &CellMark, layout: LayoutConfig) -> Self {
        Self {
            opacity: layout.tooltip_opacity,
            year: Some(mark.year),
            left: mark.x + mark.height * 2.0,
            top: mark.y + layout.padding_px - mark.height / 2.0,
            lines: tooltip_lines(mark),
        }
    }
}

/// `"<year> - <Month>"`, absolute temperature, signed variance.
#[must_use]
pub fn tooltip_lines(mark: &CellMark) -> Vec<String> {
    let month = month_name(mark.month_index).unwrap_or("?");
    vec![
        format!("{} - {month}", mark.year),
        format_celsius(mark.temperature),
        format!("{}{DEGREE_CELSIUS}", format_signed_variance(mark.variance)),
    ]
}
