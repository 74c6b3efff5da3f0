use std::collections::HashMap;

use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::core::{Dataset, RecordKey, ScaleSet};
use crate::error::HeatmapResult;
use crate::render::Color;

/// Desired grid mark for one record, in plot space (origin at the grid corner).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellMark {
    pub key: RecordKey,
    /// Zero-based month slot, as exposed through `data-month`.
    pub month_index: usize,
    pub year: i32,
    /// Absolute temperature (`base + variance`), as exposed through `data-temp`.
    pub temperature: f64,
    pub variance: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(skip)]
    pub fill: Color,
}

impl CellMark {
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Computes the full desired mark list for a dataset. Pure.
///
/// Fill colors are memoized per absolute temperature, so records sharing a
/// temperature always share a color.
pub fn build_cell_marks(dataset: &Dataset, scales: &ScaleSet) -> HeatmapResult<Vec<CellMark>> {
    let mut fills: HashMap<OrderedFloat<f64>, Color> = HashMap::new();
    let width = scales.cell_width();
    let height = scales.cell_height();

    dataset
        .records()
        .iter()
        .map(|record| {
            let temperature = dataset.absolute_temperature(*record);
            let month_index = record.month_index();
            let (x, y) = scales.cell_origin(record.year, month_index)?;
            let fill = *fills
                .entry(OrderedFloat(temperature))
                .or_insert_with(|| scales.fill_color(temperature));
            Ok(CellMark {
                key: record.key(),
                month_index,
                year: record.year,
                temperature,
                variance: record.variance,
                x,
                y,
                width,
                height,
                fill,
            })
        })
        .collect()
}
