use std::fmt::Write as _;
use std::path::Path;

use tracing::debug;

use crate::core::Viewport;
use crate::error::{HeatmapError, HeatmapResult};
use crate::render::{
    CellPrimitive, Color, LinePrimitive, PrimitiveGroup, RectPrimitive, RenderFrame, Renderer,
    TextHAlign, TextPrimitive, TooltipPrimitive,
};

/// Serializes frames into standalone SVG documents.
///
/// Grid cells carry `class="cell"` plus `data-month`, `data-year` and
/// `data-temp` so documents can be inspected without comparing colors.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Document produced by the last successful render; empty before that.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }

    pub fn write_to(&self, path: &Path) -> HeatmapResult<()> {
        std::fs::write(path, &self.document).map_err(|e| {
            HeatmapError::InvalidData(format!("failed to write `{}`: {e}", path.display()))
        })
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> HeatmapResult<()> {
        frame.validate()?;
        let document = write_document(frame).map_err(map_fmt_error)?;
        debug!(
            bytes = document.len(),
            cells = frame.cells.len(),
            "rendered svg document"
        );
        self.document = document;
        Ok(())
    }
}

/// Standalone document shown instead of the heat map when loading fails.
#[must_use]
pub fn render_error_banner(viewport: Viewport, message: &str) -> String {
    let mut out = String::new();
    let width = viewport.width.max(1);
    let height = viewport.height.max(1);
    // Writing into a String cannot fail.
    let _ = write_header(&mut out, width, height);
    let _ = writeln!(
        out,
        r##"<g id="error-banner"><rect x="0" y="0" width="{width}" height="60" fill="#fde8e8" stroke="#b91c1c"/><text x="16" y="36" font-size="16" fill="#b91c1c">{}</text></g>"##,
        escape_text(&format!("Unable to render heat map: {message}"))
    );
    out.push_str("</svg>\n");
    out
}

fn write_document(frame: &RenderFrame) -> Result<String, std::fmt::Error> {
    let mut out = String::with_capacity(frame.cells.len() * 160 + 4096);
    write_header(&mut out, frame.viewport.width, frame.viewport.height)?;

    write_group(&mut out, &frame.header)?;
    write_group(&mut out, &frame.description)?;

    writeln!(out, r#"<g id="map">"#)?;
    for cell in &frame.cells {
        write_cell(&mut out, cell)?;
    }
    writeln!(out, "</g>")?;

    for axis in &frame.axes {
        write_group(&mut out, axis)?;
    }

    writeln!(out, r#"<g id="{}">"#, escape_attr(&frame.legend.id))?;
    write_group_body(&mut out, &frame.legend)?;
    write_group(&mut out, &frame.legend_axis)?;
    writeln!(out, "</g>")?;

    write_tooltip(&mut out, &frame.tooltip)?;
    out.push_str("</svg>\n");
    Ok(out)
}

fn write_header(out: &mut String, width: u32, height: u32) -> std::fmt::Result {
    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#)?;
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="sans-serif">"#
    )?;
    writeln!(out, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)
}

fn write_group(out: &mut String, group: &PrimitiveGroup) -> std::fmt::Result {
    writeln!(out, r#"<g id="{}">"#, escape_attr(&group.id))?;
    write_group_body(out, group)?;
    writeln!(out, "</g>")
}

fn write_group_body(out: &mut String, group: &PrimitiveGroup) -> std::fmt::Result {
    for rect in &group.rects {
        write_rect(out, rect, "")?;
    }
    for line in &group.lines {
        write_line(out, line)?;
    }
    for text in &group.texts {
        write_text(out, text)?;
    }
    Ok(())
}

fn write_cell(out: &mut String, cell: &CellPrimitive) -> std::fmt::Result {
    let tags = format!(
        r#" class="cell" data-month="{}" data-year="{}" data-temp="{}""#,
        cell.month_index, cell.year, cell.temperature
    );
    write_rect(out, &cell.rect, &tags)
}

fn write_rect(out: &mut String, rect: &RectPrimitive, extra_attrs: &str) -> std::fmt::Result {
    write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"{}"#,
        fmt_num(rect.x),
        fmt_num(rect.y),
        fmt_num(rect.width),
        fmt_num(rect.height),
        rect.fill.to_css(),
        opacity_attr("fill-opacity", rect.fill),
    )?;
    if let Some(stroke) = rect.stroke {
        write!(
            out,
            r#" stroke="{}" stroke-width="{}""#,
            stroke.color.to_css(),
            fmt_num(stroke.width)
        )?;
    }
    writeln!(out, "{extra_attrs}/>")
}

fn write_line(out: &mut String, line: &LinePrimitive) -> std::fmt::Result {
    writeln!(
        out,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
        fmt_num(line.x1),
        fmt_num(line.y1),
        fmt_num(line.x2),
        fmt_num(line.y2),
        line.color.to_css(),
        fmt_num(line.stroke_width),
    )
}

fn write_text(out: &mut String, text: &TextPrimitive) -> std::fmt::Result {
    let anchor = match text.h_align {
        TextHAlign::Left => "start",
        TextHAlign::Center => "middle",
        TextHAlign::Right => "end",
    };
    writeln!(
        out,
        r#"<text x="{}" y="{}" font-size="{}" fill="{}" text-anchor="{anchor}">{}</text>"#,
        fmt_num(text.x),
        fmt_num(text.y),
        fmt_num(text.font_size_px),
        text.color.to_css(),
        escape_text(&text.text),
    )
}

fn write_tooltip(out: &mut String, tooltip: &TooltipPrimitive) -> std::fmt::Result {
    write!(out, r#"<g id="tooltip" opacity="{}""#, fmt_num(tooltip.opacity))?;
    if let Some(year) = tooltip.year {
        write!(out, r#" data-year="{year}""#)?;
    }
    writeln!(out, ">")?;
    if tooltip.opacity > 0.0 {
        write_rect(out, &tooltip.background, "")?;
        for text in &tooltip.texts {
            write_text(out, text)?;
        }
    }
    writeln!(out, "</g>")
}

fn opacity_attr(name: &str, color: Color) -> String {
    if color.alpha < 1.0 {
        format!(r#" {name}="{}""#, fmt_num(color.alpha))
    } else {
        String::new()
    }
}

/// Pixel values with at most three decimals and no trailing zeros.
fn fmt_num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_owned();
    }
    format!("{rounded}")
}

fn escape_text(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn escape_attr(input: &str) -> String {
    escape_text(input).replace('"', "&quot;")
}

fn map_fmt_error(err: std::fmt::Error) -> HeatmapError {
    HeatmapError::InvalidData(format!("failed to format svg document: {err}"))
}
