use heatmap_rs::api::{HeatmapEngine, TITLE_TEXT};
use heatmap_rs::core::{Dataset, LayoutConfig, RecordKey, TemperatureRecord, Viewport};
use heatmap_rs::render::{SvgRenderer, render_error_banner};

fn sample_dataset() -> Dataset {
    Dataset::new(
        8.66,
        vec![
            TemperatureRecord::new(1900, 1, -1.5),
            TemperatureRecord::new(1900, 2, 1.2),
            TemperatureRecord::new(1901, 1, 0.4),
            TemperatureRecord::new(1901, 2, -0.2),
        ],
    )
    .expect("valid dataset")
}

fn rendered_engine() -> HeatmapEngine<SvgRenderer> {
    let mut engine =
        HeatmapEngine::new(SvgRenderer::new(), LayoutConfig::default()).expect("engine init");
    engine.set_dataset(sample_dataset()).expect("set dataset");
    engine.render().expect("render");
    engine
}

#[test]
fn document_exposes_required_element_ids() {
    let engine = rendered_engine();
    let doc = engine.renderer().document();

    for id in ["title", "description", "map", "x-axis", "y-axis", "legend", "legend-axis", "tooltip"] {
        assert!(doc.contains(&format!(r#"id="{id}""#)), "missing `{id}`");
    }
    assert!(doc.contains(TITLE_TEXT));
    assert!(doc.contains("From January 1900 to February 1901"));
    assert!(doc.contains("Base Temperature: 8.66\u{b0}C"));
    assert!(doc.trim_end().ends_with("</svg>"));
}

#[test]
fn cells_carry_data_attributes() {
    let engine = rendered_engine();
    let doc = engine.renderer().document();

    assert_eq!(doc.matches(r#"class="cell""#).count(), 4);
    assert!(doc.contains(r#"data-month="0" data-year="1900""#));
    assert!(doc.contains(r#"data-month="1" data-year="1901""#));
    assert_eq!(doc.matches("data-temp=").count(), 4);
}

#[test]
fn hover_outlines_cell_and_shows_tooltip() {
    let mut engine = rendered_engine();
    assert!(engine.renderer().document().contains(r#"<g id="tooltip" opacity="0">"#));

    engine
        .hover_cell(RecordKey::new(1900, 2))
        .expect("hover");
    engine.render().expect("render hovered");
    let doc = engine.renderer().document();

    assert!(doc.contains(r#"<g id="tooltip" opacity="0.85" data-year="1900">"#));
    assert!(doc.contains("1900 - February"));
    assert!(doc.contains("9.9\u{b0}C"));
    assert!(doc.contains("+1.2\u{b0}C"));
    let outlined_cells = doc
        .lines()
        .filter(|line| line.contains(r#"class="cell""#) && line.contains("stroke="))
        .count();
    assert_eq!(outlined_cells, 1);
}

#[test]
fn document_width_includes_trailing_cell() {
    let engine = rendered_engine();
    let geometry = engine.geometry().expect("geometry");
    let cell_width = engine.scales().expect("scales").cell_width();

    assert_eq!(geometry.width, 100.0 + 1200.0 + cell_width);
    let doc = engine.renderer().document();
    assert!(doc.contains(&format!(r#"width="{}""#, geometry.width.ceil() as u32)));
}

#[test]
fn error_banner_replaces_the_chart() {
    let doc = render_error_banner(Viewport::new(800, 80), "request failed");
    assert!(doc.contains(r#"id="error-banner""#));
    assert!(doc.contains("Unable to render heat map: request failed"));
    assert!(!doc.contains(r#"id="map""#));
}

#[test]
fn svg_can_be_written_to_disk() {
    let engine = rendered_engine();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("heatmap.svg");

    engine.renderer().write_to(&path).expect("write svg");
    let written = std::fs::read_to_string(&path).expect("read svg");
    assert_eq!(written, engine.renderer().document());
}
