use crate::error::HeatmapResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry
/// without producing a document.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub render_count: usize,
    pub last_cell_count: usize,
    pub last_outlined_count: usize,
    pub last_tooltip_visible: bool,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> HeatmapResult<()> {
        frame.validate()?;
        self.render_count += 1;
        self.last_cell_count = frame.cells.len();
        self.last_outlined_count = frame.outlined_cells().count();
        self.last_tooltip_visible = frame.tooltip.opacity > 0.0;
        Ok(())
    }
}
