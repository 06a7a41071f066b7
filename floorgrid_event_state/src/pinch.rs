// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-pointer pinch tracking.
//!
//! Each update reports the scale factor relative to the *previous* update
//! (current span / previous span) and the current focus (midpoint), which is
//! the shape a post-composing transform wants: `scale_about(factor, focus)`.
//! A consumer that refuses a step calls [`PinchState::reject_step`], and the
//! next step is measured from the last span it accepted instead.

use kurbo::Point;

/// A pinch step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchStep {
    /// Span ratio since the previous step.
    pub factor: f64,
    /// Midpoint of the two pointers.
    pub focus: Point,
}

/// Tracks the span and focus of a two-pointer pinch.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PinchState {
    prev_span: Option<f64>,
    /// Span before the last reported step, restored if that step is rejected.
    undo_span: Option<f64>,
    focus: Point,
}

impl PinchState {
    /// Starts a pinch with the two given pointers. Returns the focus.
    pub fn begin(&mut self, a: Point, b: Point) -> Point {
        self.prev_span = Some(a.distance(b));
        self.undo_span = None;
        self.focus = a.midpoint(b);
        self.focus
    }

    /// Updates the pinch with new pointer positions.
    ///
    /// Returns `None` when no pinch is active or the previous span is below
    /// `min_span`; the span is still recorded so the next step can proceed.
    pub fn update(&mut self, a: Point, b: Point, min_span: f64) -> Option<PinchStep> {
        let prev_span = self.prev_span?;
        let span = a.distance(b);
        self.prev_span = Some(span);
        self.focus = a.midpoint(b);
        if prev_span < min_span.max(f64::MIN_POSITIVE) {
            self.undo_span = None;
            return None;
        }
        self.undo_span = Some(prev_span);
        Some(PinchStep {
            factor: span / prev_span,
            focus: self.focus,
        })
    }

    /// Keeps the span from before the last reported step as the baseline.
    ///
    /// Does nothing if no step was reported since the last call.
    pub fn reject_step(&mut self) {
        if let Some(span) = self.undo_span.take() {
            self.prev_span = Some(span);
        }
    }

    /// Ends the pinch.
    pub fn end(&mut self) {
        self.prev_span = None;
        self.undo_span = None;
    }

    /// Returns `true` while a pinch is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.prev_span.is_some()
    }

    /// Returns the last focus point.
    #[must_use]
    pub fn focus(&self) -> Point {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::PinchState;

    #[test]
    fn factor_is_relative_to_previous_step() {
        let mut pinch = PinchState::default();
        let focus = pinch.begin(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert_eq!(focus, Point::new(50.0, 0.0));

        let step = pinch
            .update(Point::new(-50.0, 0.0), Point::new(150.0, 0.0), 1.0)
            .unwrap();
        assert_eq!(step.factor, 2.0);
        assert_eq!(step.focus, Point::new(50.0, 0.0));

        let step = pinch
            .update(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 1.0)
            .unwrap();
        assert_eq!(step.factor, 0.5);
    }

    #[test]
    fn degenerate_span_is_skipped() {
        let mut pinch = PinchState::default();
        pinch.begin(Point::new(5.0, 5.0), Point::new(5.0, 5.0));
        assert!(pinch.update(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 1.0).is_none());
        // The next step has a usable baseline again.
        let step = pinch
            .update(Point::new(0.0, 0.0), Point::new(20.0, 0.0), 1.0)
            .unwrap();
        assert_eq!(step.factor, 2.0);
    }

    #[test]
    fn rejected_steps_accumulate() {
        let mut pinch = PinchState::default();
        pinch.begin(Point::new(0.0, 0.0), Point::new(100.0, 0.0));

        let step = pinch
            .update(Point::new(0.0, 0.0), Point::new(110.0, 0.0), 1.0)
            .unwrap();
        assert!((step.factor - 1.1).abs() < 1e-12);
        pinch.reject_step();

        // Measured against the 100 px span, not the rejected 110 px one.
        let step = pinch
            .update(Point::new(0.0, 0.0), Point::new(120.0, 0.0), 1.0)
            .unwrap();
        assert!((step.factor - 1.2).abs() < 1e-12);

        // Accepted: the baseline moves on.
        let step = pinch
            .update(Point::new(0.0, 0.0), Point::new(60.0, 0.0), 1.0)
            .unwrap();
        assert_eq!(step.factor, 0.5);
        let step = pinch
            .update(Point::new(0.0, 0.0), Point::new(30.0, 0.0), 1.0)
            .unwrap();
        assert_eq!(step.factor, 0.5);

        // Only the last step can be rejected.
        pinch.reject_step();
        pinch.reject_step();
        let step = pinch
            .update(Point::new(0.0, 0.0), Point::new(120.0, 0.0), 1.0)
            .unwrap();
        assert_eq!(step.factor, 2.0);
    }

    #[test]
    fn inactive_pinch_reports_nothing() {
        let mut pinch = PinchState::default();
        assert!(!pinch.is_active());
        assert!(pinch.update(Point::ZERO, Point::new(1.0, 1.0), 1.0).is_none());
        pinch.begin(Point::ZERO, Point::new(2.0, 0.0));
        pinch.end();
        assert!(!pinch.is_active());
    }
}
