use crate::core::Viewport;
use crate::error::{HeatmapError, HeatmapResult};
use crate::render::{LinePrimitive, RectPrimitive, TextPrimitive};

/// Grid cell draw command plus the machine-readable tags of its record.
#[derive(Debug, Clone, PartialEq)]
pub struct CellPrimitive {
    pub rect: RectPrimitive,
    pub month_index: usize,
    pub year: i32,
    pub temperature: f64,
}

/// Element group with a stable identifier (`x-axis`, `legend`, ...).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrimitiveGroup {
    pub id: String,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl PrimitiveGroup {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    pub fn validate(&self) -> HeatmapResult<()> {
        if self.id.is_empty() {
            return Err(HeatmapError::InvalidData(
                "primitive group id must not be empty".to_owned(),
            ));
        }
        for line in &self.lines {
            line.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        Ok(())
    }
}

/// Hover tooltip; `opacity == 0` means hidden.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipPrimitive {
    pub opacity: f64,
    pub year: Option<i32>,
    pub background: RectPrimitive,
    pub texts: Vec<TextPrimitive>,
}

/// Backend-agnostic scene for one heat-map draw pass, in document pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    /// Chart title.
    pub header: PrimitiveGroup,
    /// Year range subtitle and base temperature note.
    pub description: PrimitiveGroup,
    pub cells: Vec<CellPrimitive>,
    /// Year and month axes.
    pub axes: Vec<PrimitiveGroup>,
    /// Legend swatch strip.
    pub legend: PrimitiveGroup,
    /// Temperature axis drawn beneath the legend strip.
    pub legend_axis: PrimitiveGroup,
    pub tooltip: TooltipPrimitive,
}

impl RenderFrame {
    pub fn validate(&self) -> HeatmapResult<()> {
        if !self.viewport.is_valid() {
            return Err(HeatmapError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        self.header.validate()?;
        self.description.validate()?;
        for cell in &self.cells {
            cell.rect.validate()?;
            if !cell.temperature.is_finite() {
                return Err(HeatmapError::InvalidData(
                    "cell temperature must be finite".to_owned(),
                ));
            }
        }
        for axis in &self.axes {
            axis.validate()?;
        }
        self.legend.validate()?;
        self.legend_axis.validate()?;

        if !self.tooltip.opacity.is_finite() || !(0.0..=1.0).contains(&self.tooltip.opacity) {
            return Err(HeatmapError::InvalidData(
                "tooltip opacity must be in [0, 1]".to_owned(),
            ));
        }
        self.tooltip.background.validate()?;
        for text in &self.tooltip.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn axis(&self, id: &str) -> Option<&PrimitiveGroup> {
        self.axes
            .iter()
            .chain(std::iter::once(&self.legend_axis))
            .find(|group| group.id == id)
    }

    /// Cells drawn with an outline (the hovered cell, if any).
    pub fn outlined_cells(&self) -> impl Iterator<Item = &CellPrimitive> {
        self.cells.iter().filter(|cell| cell.rect.stroke.is_some())
    }
}
