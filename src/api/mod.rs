mod axis_label_format;
mod axis_ticks;
mod dataset_loader;
mod engine;
mod mark_builder;
mod render_frame_builder;
mod scene;
mod tooltip;

pub use axis_label_format::{
    DEGREE_CELSIUS, MONTH_NAMES, format_celsius, format_one_decimal, format_signed_variance,
    format_year, month_name,
};
pub use axis_ticks::{
    AxisId, AxisTick, AxisTickSet, HeatmapAxes, legend_axis_ticks, month_axis_ticks,
    nice_tick_step, year_axis_ticks,
};
pub use dataset_loader::{DatasetSource, LoaderConfig, REFERENCE_DATASET_URL, load_dataset};
pub use engine::HeatmapEngine;
pub use mark_builder::{CellMark, build_cell_marks};
pub use render_frame_builder::{DocumentGeometry, TITLE_TEXT};
pub use scene::{HeatmapScene, ScenePatch};
pub use tooltip::{TooltipState, tooltip_lines};

pub use crate::core::LayoutConfig;
