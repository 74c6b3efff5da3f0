//! heatmap-rs: monthly global temperature heat maps.
//!
//! The crate loads a monthly temperature-anomaly dataset, derives year, month
//! and color scales from it, and materializes a backend-agnostic frame of
//! grid cells, axes, legend and hover tooltip that renderers turn into
//! documents (SVG out of the box).

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{HeatmapEngine, LayoutConfig};
pub use error::{HeatmapError, HeatmapResult};
