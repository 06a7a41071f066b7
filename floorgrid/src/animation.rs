// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fling and zoom animations over a shared grid transform snapshot.

use floorgrid_anim::{AnimatedValue, Easing, Fling, FlingConfig};
use floorgrid_view::ViewTransform;
use kurbo::{Point, Vec2};

/// Drives the grid transform from a snapshot taken when animations started.
///
/// Each frame recomputes `zoom(t) ∘ fling(t) ∘ snapshot` instead of
/// accumulating per-frame deltas. Starting another animation, or moving the
/// grid directly while one runs, rebases: the snapshot becomes the current
/// transform and the running animations continue relative to where they
/// are now.
#[derive(Clone, Debug)]
pub(crate) struct ViewAnimator {
    base: Option<ViewTransform>,
    fling: Fling,
    fling_origin: Vec2,
    zoom: AnimatedValue,
    /// Zoom value at the last rebase, `None` when the zoom does not contribute.
    zoom_origin: Option<f64>,
    zoom_focus: Point,
}

impl Default for ViewAnimator {
    fn default() -> Self {
        Self {
            base: None,
            fling: Fling::new(),
            fling_origin: Vec2::ZERO,
            zoom: AnimatedValue::new(Easing::DECELERATE),
            zoom_origin: None,
            zoom_focus: Point::ZERO,
        }
    }
}

impl ViewAnimator {
    pub(crate) fn is_running(&self) -> bool {
        !self.fling.is_finished() || !self.zoom.is_finished()
    }

    pub(crate) fn is_flinging(&self) -> bool {
        !self.fling.is_finished()
    }

    pub(crate) fn is_zooming(&self) -> bool {
        !self.zoom.is_finished()
    }

    /// Makes `current` the new snapshot if anything is running.
    pub(crate) fn rebase(&mut self, current: ViewTransform) {
        if !self.is_running() {
            self.base = None;
            return;
        }
        self.base = Some(current);
        self.fling_origin = self.fling.offset();
        self.zoom_origin = (!self.zoom.is_finished()).then(|| self.zoom.current());
    }

    pub(crate) fn start_fling(
        &mut self,
        now_ms: u64,
        velocity: Vec2,
        config: &FlingConfig,
        current: ViewTransform,
    ) {
        self.fling.start(now_ms, velocity, config);
        self.rebase(current);
        self.fling_origin = Vec2::ZERO;
    }

    /// Starts zooming by `factor` about `focus`.
    pub(crate) fn start_zoom(
        &mut self,
        now_ms: u64,
        focus: Point,
        factor: f64,
        duration_ms: u64,
        current: ViewTransform,
    ) {
        self.zoom.start(now_ms, 1.0, factor - 1.0, duration_ms);
        self.zoom_focus = focus;
        self.rebase(current);
    }

    /// Samples the animations at `now_ms`.
    ///
    /// Returns the transform to show, or `None` if nothing was animating.
    /// The snapshot is dropped once every animation has finished, so sampling
    /// the same time again returns `None` instead of reapplying the result.
    pub(crate) fn advance(&mut self, now_ms: u64) -> Option<ViewTransform> {
        let base = self.base?;
        self.fling.sample(now_ms);
        self.zoom.sample(now_ms);

        let mut current = base.then_translate(self.fling.offset() - self.fling_origin);
        if let Some(origin) = self.zoom_origin {
            current.scale_about(self.zoom.current() / origin, self.zoom_focus);
        }
        if !self.is_running() {
            self.base = None;
        }
        Some(current)
    }

    /// Stops all animations where they are and drops the snapshot.
    pub(crate) fn abort(&mut self) {
        self.fling.abort();
        self.zoom.abort();
        self.base = None;
        self.zoom_origin = None;
    }
}
