pub mod band_scale;
pub mod color_scale;
pub mod dataset;
pub mod layout;
pub mod primitives;
pub mod scale;
pub mod scale_set;
pub mod time_scale;
pub mod types;

pub use band_scale::BandScale;
pub use color_scale::{DivergingColorScale, interpolate_rd_yl_bu};
pub use dataset::{Dataset, DatasetDocument};
pub use layout::LayoutConfig;
pub use scale::LinearScale;
pub use scale_set::{MONTHS_PER_YEAR, ScaleSet, legend_ticks};
pub use time_scale::YearScale;
pub use types::{RecordKey, TemperatureRecord, Viewport};
