mod frame;
mod null_renderer;
mod primitives;
mod svg_renderer;

pub use frame::{CellPrimitive, PrimitiveGroup, RenderFrame, TooltipPrimitive};
pub use null_renderer::NullRenderer;
pub use primitives::{Color, LinePrimitive, RectPrimitive, Stroke, TextHAlign, TextPrimitive};
pub use svg_renderer::{SvgRenderer, render_error_banner};

use crate::error::HeatmapResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from dataset, scale and hover logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> HeatmapResult<()>;
}
