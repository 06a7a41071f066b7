// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `floorgrid_grid` crate.
//!
//! These sweep the level selector over the whole zoom range of both unit
//! systems and check the properties every frame relies on.

use floorgrid_grid::{
    EnglishUnitNames, GridLevelSelector, GridLevelTable, GridStyle, LengthUnit, RecordingSurface,
    draw_grid, format_distance, label_plan, select_levels,
};
use floorgrid_view::{ViewTransform, Viewport, ZoomLimits};
use kurbo::{Size, Vec2};

const PIXELS_PER_CM: f64 = 40.0;
const SHORTEST_SQUARE_PX: f64 = 0.5 * PIXELS_PER_CM;

fn tables() -> [GridLevelTable; 2] {
    [
        GridLevelTable::metric(SHORTEST_SQUARE_PX).unwrap(),
        GridLevelTable::imperial(SHORTEST_SQUARE_PX).unwrap(),
    ]
}

/// Scales from the farthest to the closest default zoom ratio.
fn scale_sweep() -> impl Iterator<Item = f64> {
    let min = PIXELS_PER_CM / 5_000.0;
    let max = PIXELS_PER_CM / 20.0;
    (0..=400).map(move |i| min * (max / min).powf(f64::from(i) / 400.0))
}

#[test]
fn zooming_in_never_coarsens_the_finest_level() {
    for table in tables() {
        let mut previous: Option<f64> = None;
        for scale in scale_sweep() {
            let lines = select_levels(&table, scale);
            let finest = lines.first().map(|l| l.spacing_cm);
            if let (Some(prev), Some(now)) = (previous, finest) {
                assert!(now <= prev, "finest spacing grew from {prev} to {now} at {scale}");
            }
            previous = finest.or(previous);
        }
    }
}

#[test]
fn consecutive_levels_are_aligned_and_far_apart() {
    for table in tables() {
        for scale in scale_sweep() {
            let lines = select_levels(&table, scale);
            assert!(!lines.is_empty(), "nothing shown at {scale}");
            assert!(lines.len() <= 3);
            for pair in lines.windows(2) {
                let (finer, coarser) = (pair[0].spacing, pair[1].spacing);
                assert!(coarser >= 3 * finer, "{finer} -> {coarser}");
                assert_eq!(coarser % finer, 0, "{finer} -> {coarser}");
                assert_eq!(coarser % lines[0].spacing, 0);
            }
            for line in &lines {
                assert!(line.spacing_px >= SHORTEST_SQUARE_PX * (1.0 - 1e-12));
            }
        }
    }
}

#[test]
fn incremental_selector_agrees_with_full_scan_in_both_directions() {
    for table in tables() {
        let mut selector = GridLevelSelector::new(table.clone());
        let scales: Vec<f64> = scale_sweep().collect();
        for &scale in scales.iter().chain(scales.iter().rev()) {
            assert_eq!(
                selector.select(scale),
                select_levels(&table, scale).as_slice(),
                "scale {scale}"
            );
        }
    }
}

#[test]
fn only_one_level_is_labeled() {
    let style = GridStyle::for_display(PIXELS_PER_CM, 1.0);
    for table in tables() {
        for scale in scale_sweep() {
            let lines = select_levels(&table, scale);
            let plan = label_plan(&lines, style.min_label_spacing_px);
            let labeled = plan.iter().filter(|d| d.stride().is_some()).count();
            assert!(labeled <= 1, "{labeled} labeled levels at {scale}");
        }
    }
}

#[test]
fn formatter_boundaries() {
    let names = EnglishUnitNames;
    let metric = |d| format_distance(d, LengthUnit::Metric, &names);
    let imperial = |d| format_distance(d, LengthUnit::Imperial, &names);

    assert_eq!(metric(0), "0 m");
    assert_eq!(metric(99), "99 cm");
    assert_eq!(metric(100), "1 m");
    assert_eq!(metric(99_999), "999 m");
    assert_eq!(metric(100_000), "1 km");

    assert_eq!(imperial(0), "0 yd");
    assert_eq!(imperial(92), "1 yd");
    assert_eq!(imperial(9_144), "100 yd");
    assert_eq!(imperial(160_934), "1 mi");
}

#[test]
fn drawing_a_selected_grid_labels_the_origin() {
    let limits = ZoomLimits::from_zoom_ratios(PIXELS_PER_CM, 20.0, 5_000.0).unwrap();
    let scale = PIXELS_PER_CM / 200.0;
    let mut viewport = Viewport::new(Size::new(800.0, 600.0), limits, scale);
    viewport.set_transform(ViewTransform::new(scale, Vec2::new(400.0, 300.0)));

    let table = GridLevelTable::metric(SHORTEST_SQUARE_PX).unwrap();
    let lines = select_levels(&table, viewport.scale());
    let mut surface = RecordingSurface::new();
    draw_grid(
        &mut surface,
        &viewport,
        &lines,
        LengthUnit::Metric,
        &EnglishUnitNames,
        &GridStyle::for_display(PIXELS_PER_CM, 1.0),
    );

    assert!(surface.lines().count() > 0);
    assert!(surface.lines().all(|(_, level)| level < lines.len()));
    assert!(surface.texts().any(|(text, _)| text == "0 m"));
}
