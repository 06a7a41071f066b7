// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing seam between the grid and a 2D canvas.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::{Line, Point};

/// Horizontal text alignment relative to the text origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAlign {
    /// The origin is the left edge of the text.
    #[default]
    Left,
    /// The origin is the horizontal center of the text.
    Center,
    /// The origin is the right edge of the text.
    Right,
}

/// Minimal 2D canvas the grid draws into.
///
/// Coordinates are device pixels. Implementations map `level` (index into the
/// shown grid levels, finest first) to their own paint.
pub trait GridSurface {
    /// Saves the current canvas state.
    fn save(&mut self);

    /// Restores the most recently saved canvas state.
    fn restore(&mut self);

    /// Strokes a line. A `width` of zero requests a hairline.
    fn draw_line(&mut self, line: Line, level: usize, width: f64);

    /// Draws a single line of text with its baseline at `origin.y`.
    fn draw_text(&mut self, text: &str, origin: Point, align: TextAlign, size: f64);
}

/// An operation captured by [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceOp {
    /// [`GridSurface::save`]
    Save,
    /// [`GridSurface::restore`]
    Restore,
    /// [`GridSurface::draw_line`]
    Line {
        /// Line in device pixels.
        line: Line,
        /// Grid level index.
        level: usize,
        /// Stroke width.
        width: f64,
    },
    /// [`GridSurface::draw_text`]
    Text {
        /// Label text.
        text: String,
        /// Baseline origin.
        origin: Point,
        /// Alignment relative to `origin`.
        align: TextAlign,
        /// Text size in device pixels.
        size: f64,
    },
}

/// A [`GridSurface`] that records every operation in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    /// Creates an empty recording.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded operations.
    #[must_use]
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Takes the recorded operations, leaving the recording empty.
    pub fn take(&mut self) -> Vec<SurfaceOp> {
        core::mem::take(&mut self.ops)
    }

    /// Drops all recorded operations.
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Recorded lines with their level.
    pub fn lines(&self) -> impl Iterator<Item = (Line, usize)> {
        self.ops.iter().filter_map(|op| match op {
            SurfaceOp::Line { line, level, .. } => Some((*line, *level)),
            _ => None,
        })
    }

    /// Recorded texts with their origin.
    pub fn texts(&self) -> impl Iterator<Item = (&str, Point)> {
        self.ops.iter().filter_map(|op| match op {
            SurfaceOp::Text { text, origin, .. } => Some((text.as_str(), *origin)),
            _ => None,
        })
    }
}

impl GridSurface for RecordingSurface {
    fn save(&mut self) {
        self.ops.push(SurfaceOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(SurfaceOp::Restore);
    }

    fn draw_line(&mut self, line: Line, level: usize, width: f64) {
        self.ops.push(SurfaceOp::Line { line, level, width });
    }

    fn draw_text(&mut self, text: &str, origin: Point, align: TextAlign, size: f64) {
        self.ops.push(SurfaceOp::Text {
            text: text.to_string(),
            origin,
            align,
            size,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order_and_take_clears() {
        let mut surface = RecordingSurface::new();
        surface.save();
        surface.draw_line(Line::new((0.0, 0.0), (10.0, 0.0)), 1, 0.0);
        surface.draw_text("1 m", Point::new(3.0, 4.0), TextAlign::Right, 10.0);
        surface.restore();

        assert_eq!(surface.ops().len(), 4);
        assert_eq!(surface.ops()[0], SurfaceOp::Save);
        assert_eq!(surface.lines().count(), 1);
        assert_eq!(
            surface.texts().collect::<Vec<_>>(),
            [("1 m", Point::new(3.0, 4.0))]
        );

        let ops = surface.take();
        assert_eq!(ops.last(), Some(&SurfaceOp::Restore));
        assert!(surface.ops().is_empty());
    }
}
