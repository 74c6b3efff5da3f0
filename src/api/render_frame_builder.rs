use crate::core::{Dataset, LayoutConfig, ScaleSet, Viewport};
use crate::error::{HeatmapError, HeatmapResult};
use crate::render::{
    CellPrimitive, Color, LinePrimitive, PrimitiveGroup, RectPrimitive, RenderFrame, Stroke,
    TextHAlign, TextPrimitive, TooltipPrimitive,
};

use super::axis_label_format::{DEGREE_CELSIUS, month_name};
use super::axis_ticks::{AxisTickSet, ensure_tick_positions_finite};
use super::{HeatmapAxes, HeatmapScene, TooltipState};

pub const TITLE_TEXT: &str = "Monthly Global Temperature";
pub(super) const HEADER_HEIGHT_PX: f64 = 90.0;
/// The legend strip is pulled up into the bottom padding of the grid.
pub(super) const LEGEND_OVERLAP_PX: f64 = 30.0;
const TOOLTIP_LINE_HEIGHT_PX: f64 = 16.0;
const TOOLTIP_FONT_SIZE_PX: f64 = 12.0;
const TOOLTIP_PADDING_PX: f64 = 8.0;
const TOOLTIP_BACKGROUND: Color = Color::rgb(1.0, 1.0, 0.878);
const AXIS_COLOR: Color = Color::BLACK;
const TEXT_COLOR: Color = Color::rgb(0.133, 0.133, 0.133);

/// Document-space placement of the grid and legend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentGeometry {
    pub width: f64,
    pub height: f64,
    pub plot_origin: (f64, f64),
    pub legend_origin: (f64, f64),
}

impl DocumentGeometry {
    #[must_use]
    pub fn compute(layout: LayoutConfig, cell_width: f64) -> Self {
        let width = layout.padding_px + layout.plot_width_px + cell_width;
        let map_bottom = HEADER_HEIGHT_PX + layout.plot_height_px + layout.padding_px;
        let legend_top = map_bottom - LEGEND_OVERLAP_PX;
        Self {
            width,
            height: legend_top + layout.legend_height_px,
            plot_origin: (layout.padding_px, HEADER_HEIGHT_PX),
            legend_origin: ((width - layout.legend_width_px) / 2.0, legend_top),
        }
    }

    pub fn viewport(self) -> HeatmapResult<Viewport> {
        if !self.width.is_finite() || !self.height.is_finite() {
            return Err(HeatmapError::InvalidData(
                "document size must be finite".to_owned(),
            ));
        }
        let viewport = Viewport::new(self.width.ceil() as u32, self.height.ceil() as u32);
        if !viewport.is_valid() {
            return Err(HeatmapError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        Ok(viewport)
    }

    /// Converts a document-space point into plot space.
    #[must_use]
    pub fn to_plot_space(self, x: f64, y: f64) -> (f64, f64) {
        (x - self.plot_origin.0, y - self.plot_origin.1)
    }
}

/// Everything needed to materialize one frame.
pub(super) struct FrameInputs<'a> {
    pub dataset: &'a Dataset,
    pub scales: &'a ScaleSet,
    pub axes: &'a HeatmapAxes,
    pub scene: &'a HeatmapScene,
    pub tooltip: &'a TooltipState,
    pub layout: LayoutConfig,
}

pub(super) fn build_render_frame(inputs: &FrameInputs<'_>) -> HeatmapResult<RenderFrame> {
    let layout = inputs.layout;
    let geometry = DocumentGeometry::compute(layout, inputs.scales.cell_width());
    let viewport = geometry.viewport()?;

    Ok(RenderFrame {
        viewport,
        header: build_title(geometry, layout),
        description: build_description(inputs.dataset, inputs.scales, geometry),
        cells: build_cells(inputs.scene, layout, geometry),
        axes: vec![
            build_bottom_axis(
                &inputs.axes.year,
                (
                    geometry.plot_origin.0,
                    geometry.plot_origin.1 + layout.plot_height_px,
                ),
                layout.axis_tick_size_px,
                layout,
            )?,
            build_left_axis(&inputs.axes.month, geometry.plot_origin, layout)?,
        ],
        legend: build_legend(inputs.scales, geometry, layout),
        legend_axis: build_bottom_axis(
            &inputs.axes.legend,
            (
                geometry.legend_origin.0,
                geometry.legend_origin.1 + layout.legend_swatch_height_px,
            ),
            layout.legend_tick_size_px,
            layout,
        )?,
        tooltip: build_tooltip(inputs.tooltip, geometry),
    })
}

fn build_title(geometry: DocumentGeometry, layout: LayoutConfig) -> PrimitiveGroup {
    PrimitiveGroup::new("title").with_text(TextPrimitive::new(
        TITLE_TEXT,
        geometry.width / 2.0,
        36.0,
        layout.title_font_size_px,
        TEXT_COLOR,
        TextHAlign::Center,
    ))
}

fn build_description(
    dataset: &Dataset,
    scales: &ScaleSet,
    geometry: DocumentGeometry,
) -> PrimitiveGroup {
    let (min_year, max_year) = scales.year_scale().domain();
    let first_month = month_name(dataset.first_record().month_index()).unwrap_or_default();
    let last_month = month_name(dataset.last_record().month_index()).unwrap_or_default();
    let center = geometry.width / 2.0;

    PrimitiveGroup::new("description")
        .with_text(TextPrimitive::new(
            format!("From {first_month} {min_year} to {last_month} {max_year}"),
            center,
            62.0,
            16.0,
            TEXT_COLOR,
            TextHAlign::Center,
        ))
        .with_text(TextPrimitive::new(
            format!(
                "Base Temperature: {}{DEGREE_CELSIUS}",
                dataset.base_temperature()
            ),
            center,
            82.0,
            14.0,
            TEXT_COLOR,
            TextHAlign::Center,
        ))
}

fn build_cells(
    scene: &HeatmapScene,
    layout: LayoutConfig,
    geometry: DocumentGeometry,
) -> Vec<CellPrimitive> {
    let (origin_x, origin_y) = geometry.plot_origin;
    let highlighted = scene.highlighted();
    scene
        .marks()
        .map(|mark| {
            let mut rect = RectPrimitive::new(
                origin_x + mark.x,
                origin_y + mark.y,
                mark.width,
                mark.height,
                mark.fill,
            );
            if highlighted == Some(mark.key) {
                rect = rect.with_stroke(Stroke::new(layout.hover_stroke_width_px, Color::BLACK));
            }
            CellPrimitive {
                rect,
                month_index: mark.month_index,
                year: mark.year,
                temperature: mark.temperature,
            }
        })
        .collect()
}

/// Horizontal axis with ticks hanging below the domain line.
fn build_bottom_axis(
    set: &AxisTickSet,
    origin: (f64, f64),
    tick_size: f64,
    layout: LayoutConfig,
) -> HeatmapResult<PrimitiveGroup> {
    ensure_tick_positions_finite(set)?;
    let (ox, oy) = origin;
    let (start, end) = set.extent;
    let outer = layout.outer_tick_size_px;

    let mut group = PrimitiveGroup::new(set.axis.element_id()).with_line(LinePrimitive::new(
        ox + start,
        oy,
        ox + end,
        oy,
        1.0,
        AXIS_COLOR,
    ));
    if outer > 0.0 {
        group = group
            .with_line(LinePrimitive::new(ox + start, oy, ox + start, oy + outer, 1.0, AXIS_COLOR))
            .with_line(LinePrimitive::new(ox + end, oy, ox + end, oy + outer, 1.0, AXIS_COLOR));
    }

    let label_baseline = oy + tick_size + layout.tick_padding_px + layout.axis_font_size_px * 0.71;
    for tick in &set.ticks {
        let x = ox + tick.position;
        if tick_size > 0.0 {
            group = group.with_line(LinePrimitive::new(x, oy, x, oy + tick_size, 1.0, AXIS_COLOR));
        }
        group = group.with_text(TextPrimitive::new(
            tick.label.clone(),
            x,
            label_baseline,
            layout.axis_font_size_px,
            AXIS_COLOR,
            TextHAlign::Center,
        ));
    }
    Ok(group)
}

/// Vertical axis with ticks extending left of the domain line.
fn build_left_axis(
    set: &AxisTickSet,
    origin: (f64, f64),
    layout: LayoutConfig,
) -> HeatmapResult<PrimitiveGroup> {
    ensure_tick_positions_finite(set)?;
    let (ox, oy) = origin;
    let (start, end) = set.extent;
    let tick_size = layout.axis_tick_size_px;
    let outer = layout.outer_tick_size_px;

    let mut group = PrimitiveGroup::new(set.axis.element_id()).with_line(LinePrimitive::new(
        ox,
        oy + start,
        ox,
        oy + end,
        1.0,
        AXIS_COLOR,
    ));
    if outer > 0.0 {
        group = group
            .with_line(LinePrimitive::new(ox - outer, oy + start, ox, oy + start, 1.0, AXIS_COLOR))
            .with_line(LinePrimitive::new(ox - outer, oy + end, ox, oy + end, 1.0, AXIS_COLOR));
    }

    let label_x = ox - tick_size - layout.tick_padding_px;
    for tick in &set.ticks {
        let y = oy + tick.position;
        if tick_size > 0.0 {
            group = group.with_line(LinePrimitive::new(ox - tick_size, y, ox, y, 1.0, AXIS_COLOR));
        }
        group = group.with_text(TextPrimitive::new(
            tick.label.clone(),
            label_x,
            y + layout.axis_font_size_px * 0.32,
            layout.axis_font_size_px,
            AXIS_COLOR,
            TextHAlign::Right,
        ));
    }
    Ok(group)
}

/// One outlined swatch per legend temperature.
fn build_legend(scales: &ScaleSet, geometry: DocumentGeometry, layout: LayoutConfig) -> PrimitiveGroup {
    let bands = scales.legend_band();
    let (ox, oy) = geometry.legend_origin;

    scales
        .legend_ticks()
        .iter()
        .enumerate()
        .filter_map(|(index, tick)| Some((bands.offset(index)?, *tick)))
        .fold(PrimitiveGroup::new("legend"), |group, (offset, tick)| {
            group.with_rect(
                RectPrimitive::new(
                    ox + offset,
                    oy,
                    bands.bandwidth(),
                    layout.legend_swatch_height_px,
                    scales.fill_color(tick),
                )
                .with_stroke(Stroke::new(1.0, Color::BLACK)),
            )
        })
}

fn build_tooltip(state: &TooltipState, geometry: DocumentGeometry) -> TooltipPrimitive {
    if !state.is_visible() {
        return TooltipPrimitive {
            opacity: 0.0,
            year: None,
            background: RectPrimitive::new(0.0, 0.0, 0.0, 0.0, TOOLTIP_BACKGROUND),
            texts: Vec::new(),
        };
    }

    let left = state.left;
    let top = geometry.plot_origin.1 + state.top;
    let widest = state
        .lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let width = widest as f64 * TOOLTIP_FONT_SIZE_PX * 0.6 + TOOLTIP_PADDING_PX * 2.0;
    let height = state.lines.len() as f64 * TOOLTIP_LINE_HEIGHT_PX + TOOLTIP_PADDING_PX;

    TooltipPrimitive {
        opacity: state.opacity,
        year: state.year,
        background: RectPrimitive::new(left, top, width, height, TOOLTIP_BACKGROUND)
            .with_stroke(Stroke::new(1.0, Color::BLACK)),
        texts: state
            .lines
            .iter()
            .enumerate()
            .map(|(index, line)| {
                TextPrimitive::new(
                    line.clone(),
                    left + TOOLTIP_PADDING_PX,
                    top + TOOLTIP_LINE_HEIGHT_PX * (index + 1) as f64,
                    TOOLTIP_FONT_SIZE_PX,
                    TEXT_COLOR,
                    TextHAlign::Left,
                )
            })
            .collect(),
    }
}
