// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid line and label drawing.

use floorgrid_view::Viewport;
use kurbo::{Line, Point};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `floor` and `ceil`

use crate::labels::label_plan;
use crate::selector::{ActiveGridLine, MAX_GRID_LEVELS};
use crate::surface::{GridSurface, TextAlign};
use crate::units::{INCH_TO_CM, LengthUnit, UnitNames, format_length};

/// Device pixels per centimeter of a 160 dpi reference display.
pub const DEFAULT_PIXELS_PER_CM: f64 = 160.0 / INCH_TO_CM;

/// Reference label text size at a display density of 1.
pub const LABEL_TEXT_SIZE: f64 = 10.0;

/// Labels need at least this much screen distance between them, in centimeters.
pub const MIN_LABEL_SPACING_CM: f64 = 4.0;

/// Visual parameters of the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridStyle {
    /// Stroke width per shown level, finest first. Zero is a hairline.
    pub line_widths: [f64; MAX_GRID_LEVELS],
    /// Smallest on-screen label spacing in device pixels.
    pub min_label_spacing_px: f64,
    /// Label text size in device pixels.
    pub label_text_size: f64,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self::for_display(DEFAULT_PIXELS_PER_CM, 1.0)
    }
}

impl GridStyle {
    /// Style for a display with the given resolution and density factor.
    #[must_use]
    pub fn for_display(pixels_per_cm: f64, density: f64) -> Self {
        Self {
            line_widths: [0.0, 1.0, 1.0],
            min_label_spacing_px: MIN_LABEL_SPACING_CM * pixels_per_cm,
            label_text_size: LABEL_TEXT_SIZE * density,
        }
    }

    /// Stroke width of the level at `index`.
    #[must_use]
    pub fn line_width(&self, index: usize) -> f64 {
        self.line_widths
            .get(index)
            .or(self.line_widths.last())
            .copied()
            .unwrap_or(0.0)
    }
}

/// Draws the shown grid levels and their distance labels.
///
/// Every level is drawn as horizontal and vertical lines at world coordinates
/// `k * spacing_cm` covering the view. The one level chosen by
/// [`label_plan`] then gets two labels per labeled crossing: the x distance
/// right-aligned above-left of it, the y distance left-aligned below-right.
/// Labels grow upward on screen, so the y label shows the negated world y.
pub fn draw_grid<S: GridSurface + ?Sized>(
    surface: &mut S,
    viewport: &Viewport,
    lines: &[ActiveGridLine],
    unit: LengthUnit,
    names: &dyn UnitNames,
    style: &GridStyle,
) {
    let view = viewport.view_size();
    if lines.is_empty() || view.is_zero_area() {
        return;
    }
    let world = viewport.visible_world_rect();
    let plan = label_plan(lines, style.min_label_spacing_px);

    surface.save();
    for (level, line) in lines.iter().enumerate() {
        let width = style.line_width(level);
        let (kx0, kx1) = line_range(world.x0, world.x1, line.spacing_cm);
        for k in kx0..=kx1 {
            let x = viewport.world_to_view_point(world_point(k, 0, line.spacing_cm)).x;
            surface.draw_line(Line::new((x, 0.0), (x, view.height)), level, width);
        }
        let (ky0, ky1) = line_range(world.y0, world.y1, line.spacing_cm);
        for k in ky0..=ky1 {
            let y = viewport.world_to_view_point(world_point(0, k, line.spacing_cm)).y;
            surface.draw_line(Line::new((0.0, y), (view.width, y)), level, width);
        }
    }

    let labeled = plan
        .iter()
        .zip(lines)
        .find_map(|(density, line)| density.stride().map(|stride| (line, stride)));
    if let Some((line, stride)) = labeled {
        let ts = style.label_text_size;
        let (kx0, kx1) = line_range(world.x0, world.x1, line.spacing_cm);
        let (ky0, ky1) = line_range(world.y0, world.y1, line.spacing_cm);
        for ky in (ky0..=ky1).filter(|k| k.rem_euclid(stride) == 0) {
            let y_text = format_length(-world_point(0, ky, line.spacing_cm).y, unit, names);
            for kx in (kx0..=kx1).filter(|k| k.rem_euclid(stride) == 0) {
                let p = viewport.world_to_view_point(world_point(kx, ky, line.spacing_cm));
                let x_text = format_length(world_point(kx, 0, line.spacing_cm).x, unit, names);
                surface.draw_text(
                    &x_text,
                    Point::new(p.x - 0.4 * ts, p.y - 0.5 * ts),
                    TextAlign::Right,
                    ts,
                );
                surface.draw_text(
                    &y_text,
                    Point::new(p.x + 0.4 * ts, p.y + 1.2 * ts),
                    TextAlign::Left,
                    ts,
                );
            }
        }
    }
    surface.restore();
}

/// Inclusive range of line indices whose lines fall inside `[min, max]`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "visible line indices are bounded by view size over spacing"
)]
fn line_range(min: f64, max: f64, spacing_cm: f64) -> (i64, i64) {
    ((min / spacing_cm).ceil() as i64, (max / spacing_cm).floor() as i64)
}

fn world_point(kx: i64, ky: i64, spacing_cm: f64) -> Point {
    Point::new(kx as f64 * spacing_cm, ky as f64 * spacing_cm)
}
