use heatmap_rs::HeatmapError;
use heatmap_rs::api::{HeatmapEngine, LayoutConfig};
use heatmap_rs::render::NullRenderer;

#[test]
fn default_layout_matches_reference_geometry() {
    let layout = LayoutConfig::default();
    assert_eq!(layout.padding_px, 100.0);
    assert_eq!(layout.plot_width_px, 1200.0);
    assert_eq!(layout.plot_height_px, 450.0);
    assert_eq!(layout.legend_width_px, 400.0);
    assert_eq!(layout.legend_step, 1.1);
    assert_eq!(layout.cell_height_px(), 37.5);
    assert!(layout.validate().is_ok());
}

#[test]
fn json_round_trip_preserves_layout() {
    let layout = LayoutConfig::default()
        .with_plot_size(900.0, 360.0)
        .with_legend_step(0.5);
    let raw = layout.to_json_pretty().expect("serialize");
    let parsed = LayoutConfig::from_json_str(&raw).expect("parse");
    assert_eq!(parsed, layout);
    assert_eq!(parsed.legend_width_px, 300.0);
}

#[test]
fn partial_json_falls_back_to_defaults() {
    let parsed = LayoutConfig::from_json_str(r#"{"padding_px": 60.0}"#).expect("parse");
    assert_eq!(parsed.padding_px, 60.0);
    assert_eq!(parsed.plot_width_px, LayoutConfig::default().plot_width_px);
}

#[test]
fn invalid_values_are_rejected() {
    let cases = [
        LayoutConfig::default().with_plot_size(0.0, 450.0),
        LayoutConfig::default().with_plot_size(1200.0, f64::NAN),
        LayoutConfig::default().with_padding(-1.0),
        LayoutConfig::default().with_year_tick_count(0),
        LayoutConfig {
            tooltip_opacity: 1.5,
            ..LayoutConfig::default()
        },
        LayoutConfig {
            legend_swatch_height_px: 200.0,
            ..LayoutConfig::default()
        },
    ];
    for layout in cases {
        let err = layout.validate().expect_err("layout must be rejected");
        assert!(matches!(err, HeatmapError::InvalidLayout(_)));
    }
}

#[test]
fn malformed_json_is_a_layout_error() {
    let err = LayoutConfig::from_json_str("{").expect_err("bad json");
    assert!(matches!(err, HeatmapError::InvalidLayout(_)));
}

#[test]
fn layout_file_is_read_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("layout.json");
    std::fs::write(&path, r#"{"legend_step": 2.0}"#).expect("write layout");

    let layout = LayoutConfig::from_json_file(&path).expect("layout file");
    assert_eq!(layout.legend_step, 2.0);
}

#[test]
fn engine_refuses_invalid_layout() {
    let layout = LayoutConfig::default().with_legend_step(-1.0);
    assert!(HeatmapEngine::new(NullRenderer::default(), layout).is_err());
}
