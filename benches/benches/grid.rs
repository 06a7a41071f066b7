// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use floorgrid_grid::{
    EnglishUnitNames, GridLevelSelector, GridLevelTable, GridStyle, LengthUnit, RecordingSurface,
    draw_grid, select_levels,
};
use floorgrid_view::{ViewTransform, Viewport, ZoomLimits};
use kurbo::{Size, Vec2};

const PIXELS_PER_CM: f64 = 63.0;

fn zoom_sweep(steps: u32) -> Vec<f64> {
    let min = PIXELS_PER_CM / 5_000.0;
    let max = PIXELS_PER_CM / 20.0;
    (0..=steps)
        .map(|i| min * (max / min).powf(f64::from(i) / f64::from(steps)))
        .collect()
}

fn bench_level_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid/select");

    // Hypothesis: the incremental selector is cheaper than a full scan for
    // smooth zooms, since most frames stay between two thresholds.
    let scales = zoom_sweep(1_000);
    group.throughput(Throughput::Elements(scales.len() as u64));
    for unit in [LengthUnit::Metric, LengthUnit::Imperial] {
        let table = GridLevelTable::for_unit(unit, 0.5 * PIXELS_PER_CM).unwrap();

        group.bench_with_input(BenchmarkId::new("full_scan", format!("{unit:?}")), &table, |b, table| {
            b.iter(|| {
                for &scale in &scales {
                    black_box(select_levels(table, scale));
                }
            });
        });

        group.bench_with_input(
            BenchmarkId::new("incremental", format!("{unit:?}")),
            &table,
            |b, table| {
                let mut selector = GridLevelSelector::new(table.clone());
                b.iter(|| {
                    for &scale in &scales {
                        black_box(selector.select(scale));
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid/draw");
    let limits = ZoomLimits::from_zoom_ratios(PIXELS_PER_CM, 20.0, 5_000.0).unwrap();
    let table = GridLevelTable::metric(0.5 * PIXELS_PER_CM).unwrap();
    let style = GridStyle::for_display(PIXELS_PER_CM, 1.0);

    for (w, h) in [(800.0, 600.0), (1_920.0, 1_080.0), (3_840.0, 2_160.0)] {
        let scale = PIXELS_PER_CM / 200.0;
        let mut viewport = Viewport::new(Size::new(w, h), limits, scale);
        viewport.set_transform(ViewTransform::new(scale, Vec2::new(w / 2.0, h / 2.0)));
        let lines = select_levels(&table, scale);

        group.bench_function(BenchmarkId::new("metric", format!("{w}x{h}")), |b| {
            let mut surface = RecordingSurface::new();
            b.iter(|| {
                surface.clear();
                draw_grid(
                    &mut surface,
                    &viewport,
                    &lines,
                    LengthUnit::Metric,
                    &EnglishUnitNames,
                    &style,
                );
                black_box(surface.ops().len());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_level_selection, bench_draw);
criterion_main!(benches);
