use criterion::{Criterion, criterion_group, criterion_main};
use heatmap_rs::api::{HeatmapEngine, build_cell_marks};
use heatmap_rs::core::{Dataset, LayoutConfig, ScaleSet, TemperatureRecord, interpolate_rd_yl_bu};
use heatmap_rs::render::SvgRenderer;
use std::hint::black_box;

/// Same shape as the reference document: 1753-2015, twelve months each.
fn reference_sized_dataset() -> Dataset {
    let records = (1753..=2015)
        .flat_map(|year| {
            (1..=12u8).map(move |month| {
                let phase = f64::from(year - 1753) * 0.013 + f64::from(month) * 0.41;
                TemperatureRecord::new(year, month, phase.sin() * 2.5)
            })
        })
        .collect();
    Dataset::new(8.66, records).expect("valid generated dataset")
}

fn bench_palette_sampling(c: &mut Criterion) {
    c.bench_function("rd_yl_bu_sample_1k", |b| {
        b.iter(|| {
            for i in 0..1_000 {
                let _ = interpolate_rd_yl_bu(black_box(f64::from(i) / 1_000.0));
            }
        })
    });
}

fn bench_scale_set_build(c: &mut Criterion) {
    let dataset = reference_sized_dataset();
    let layout = LayoutConfig::default();

    c.bench_function("scale_set_build_3156", |b| {
        b.iter(|| {
            let _ = ScaleSet::build(black_box(&dataset), black_box(layout))
                .expect("scale set should build");
        })
    });
}

fn bench_cell_marks(c: &mut Criterion) {
    let dataset = reference_sized_dataset();
    let scales = ScaleSet::build(&dataset, LayoutConfig::default()).expect("scale set");

    c.bench_function("build_cell_marks_3156", |b| {
        b.iter(|| {
            let _ = build_cell_marks(black_box(&dataset), black_box(&scales))
                .expect("marks should build");
        })
    });
}

fn bench_svg_render(c: &mut Criterion) {
    let dataset = reference_sized_dataset();
    let mut engine =
        HeatmapEngine::new(SvgRenderer::new(), LayoutConfig::default()).expect("engine init");
    engine.set_dataset(dataset).expect("set dataset");

    c.bench_function("svg_render_3156", |b| {
        b.iter(|| {
            engine.render().expect("render should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_palette_sampling,
    bench_scale_set_build,
    bench_cell_marks,
    bench_svg_render
);
criterion_main!(benches);
