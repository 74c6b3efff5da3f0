use heatmap_rs::api::{HeatmapEngine, TooltipState};
use heatmap_rs::core::{Dataset, LayoutConfig, RecordKey, TemperatureRecord};
use heatmap_rs::interaction::HoverTransition;
use heatmap_rs::render::NullRenderer;

fn three_year_dataset() -> Dataset {
    let records = (2000..=2002)
        .flat_map(|year| {
            (1..=12u8).map(move |month| {
                TemperatureRecord::new(year, month, f64::from(month) * 0.2 - 1.0)
            })
        })
        .collect();
    Dataset::new(8.66, records).expect("valid dataset")
}

fn loaded_engine() -> HeatmapEngine<NullRenderer> {
    let mut engine =
        HeatmapEngine::new(NullRenderer::default(), LayoutConfig::default()).expect("engine init");
    let patch = engine
        .set_dataset(three_year_dataset())
        .expect("set dataset");
    assert_eq!(patch.inserted.len(), 36);
    assert!(patch.updated.is_empty() && patch.removed.is_empty());
    engine
}

#[test]
fn hover_then_unhover_restores_default_presentation() {
    let mut engine = loaded_engine();
    let key = RecordKey::new(2001, 3);

    assert_eq!(
        engine.hover_cell(key).expect("hover"),
        HoverTransition::Entered(key)
    );
    assert_eq!(engine.hovered(), Some(key));
    assert!(engine.tooltip().is_visible());
    assert_eq!(engine.tooltip().year, Some(2001));
    assert_eq!(engine.tooltip().lines[0], "2001 - March");

    engine.render().expect("render hovered");
    assert_eq!(engine.renderer().last_outlined_count, 1);
    assert!(engine.renderer().last_tooltip_visible);

    assert_eq!(engine.unhover(), HoverTransition::Left(key));
    assert_eq!(engine.hovered(), None);
    assert_eq!(engine.tooltip(), &TooltipState::default());
    assert_eq!(engine.scene().highlighted(), None);

    engine.render().expect("render idle");
    assert_eq!(engine.renderer().render_count, 2);
    assert_eq!(engine.renderer().last_cell_count, 36);
    assert_eq!(engine.renderer().last_outlined_count, 0);
    assert!(!engine.renderer().last_tooltip_visible);
}

#[test]
fn hovering_a_missing_cell_is_an_error() {
    let mut engine = loaded_engine();
    assert!(engine.hover_cell(RecordKey::new(1999, 1)).is_err());
    assert_eq!(engine.hovered(), None);
}

#[test]
fn pointer_moves_hit_test_cells_in_document_space() {
    let mut engine = loaded_engine();
    let geometry = engine.geometry().expect("geometry");
    let (ox, oy) = geometry.plot_origin;

    let first = RecordKey::new(2000, 1);
    assert_eq!(
        engine.pointer_move(ox + 10.0, oy + 10.0).expect("move"),
        HoverTransition::Entered(first)
    );

    let second = RecordKey::new(2001, 2);
    assert_eq!(
        engine.pointer_move(ox + 700.0, oy + 42.5).expect("move"),
        HoverTransition::Switched {
            from: first,
            to: second
        }
    );
    assert_eq!(
        engine.pointer_move(ox + 701.0, oy + 43.0).expect("move"),
        HoverTransition::Unchanged
    );

    assert_eq!(
        engine.pointer_move(1.0, 1.0).expect("move"),
        HoverTransition::Left(second)
    );
    assert_eq!(engine.pointer_leave(), HoverTransition::Unchanged);
    assert!(!engine.tooltip().is_visible());
}

#[test]
fn reloading_a_dataset_clears_hover() {
    let mut engine = loaded_engine();
    engine
        .hover_cell(RecordKey::new(2002, 12))
        .expect("hover");

    let patch = engine
        .set_dataset(three_year_dataset())
        .expect("reload");
    assert!(patch.is_empty());
    assert_eq!(engine.hovered(), None);
    assert!(!engine.tooltip().is_visible());
}

#[test]
fn render_without_dataset_fails() {
    let mut engine =
        HeatmapEngine::new(NullRenderer::default(), LayoutConfig::default()).expect("engine init");
    assert!(engine.render().is_err());
    assert!(engine.pointer_move(10.0, 10.0).is_err());
    assert_eq!(engine.renderer().render_count, 0);
}

#[test]
fn frame_places_cells_at_plot_origin() {
    let engine = loaded_engine();
    let frame = engine.build_render_frame().expect("frame");
    let geometry = engine.geometry().expect("geometry");

    assert_eq!(frame.cells.len(), 36);
    let first = &frame.cells[0];
    assert_eq!(first.year, 2000);
    assert_eq!(first.month_index, 0);
    assert_eq!(first.rect.x, geometry.plot_origin.0);
    assert_eq!(first.rect.y, geometry.plot_origin.1);
    assert_eq!(first.rect.height, 37.5);
    assert!(frame.axis("x-axis").is_some());
    assert!(frame.axis("y-axis").is_some());
    assert!(frame.axis("legend-axis").is_some());
    assert_eq!(frame.tooltip.opacity, 0.0);
}
