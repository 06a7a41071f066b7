// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};

use crate::limits::ZoomLimits;
use crate::transform::ViewTransform;

/// Grid viewport over the world plane.
///
/// `Viewport` tracks the device size of the view and a uniform pan+zoom
/// [`ViewTransform`] mapping world centimeters into device pixels.
/// It can be used to:
/// - Convert points and rectangles between world and view coordinates.
/// - Pan and zoom around a chosen anchor point within [`ZoomLimits`].
/// - Query the visible world region for culling or grid generation.
#[derive(Clone, Debug)]
pub struct Viewport {
    view_size: Size,
    transform: ViewTransform,
    limits: ZoomLimits,
}

impl Viewport {
    /// Creates a viewport with the given size, limits and initial scale.
    ///
    /// The initial scale is clamped into `limits`; the world origin maps to
    /// the view origin until the caller pans.
    #[must_use]
    pub fn new(view_size: Size, limits: ZoomLimits, initial_scale: f64) -> Self {
        Self {
            view_size,
            transform: ViewTransform::new(limits.clamp(initial_scale), Vec2::ZERO),
            limits,
        }
    }

    /// Returns the view size in device pixels.
    #[must_use]
    pub fn view_size(&self) -> Size {
        self.view_size
    }

    /// Sets the view size in device pixels.
    ///
    /// This does not change zoom or pan, but it changes the visible world region.
    pub fn set_view_size(&mut self, size: Size) {
        self.view_size = size;
    }

    /// Returns the view rectangle in device coordinates.
    #[must_use]
    pub fn view_rect(&self) -> Rect {
        self.view_size.to_rect()
    }

    /// Returns the current world-to-view transform.
    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    /// Replaces the world-to-view transform.
    ///
    /// Used to re-apply animation snapshots. The scale is expected to lie
    /// within the limits; it is clamped if it drifts outside by rounding.
    pub fn set_transform(&mut self, transform: ViewTransform) {
        let (scale, tx, ty) = transform.decompose();
        let clamped = self.limits.clamp(scale);
        self.transform = if clamped == scale {
            transform
        } else {
            ViewTransform::new(clamped, Vec2::new(tx, ty))
        };
    }

    /// Returns the current scale (device pixels per world centimeter).
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.transform.scale()
    }

    /// Returns the view position of the world origin.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.transform.translation()
    }

    /// Returns the zoom limits.
    #[must_use]
    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    /// Returns `true` if scaling by `factor` keeps the scale within the limits.
    #[must_use]
    pub fn can_scale_by(&self, factor: f64) -> bool {
        factor > 0.0 && self.limits.contains(self.scale() * factor)
    }

    /// Pans the view by a delta in view/device space.
    pub fn pan_by_view(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        self.transform.translate_by(delta);
    }

    /// Zooms by `factor` around an anchor point in view/device coordinates.
    ///
    /// The step is rejected, leaving the viewport unchanged, when the
    /// resulting scale would leave the zoom limits. Returns whether it applied.
    pub fn zoom_about_view_point(&mut self, anchor_view: Point, factor: f64) -> bool {
        if !self.can_scale_by(factor) {
            return false;
        }
        self.transform.scale_about(factor, anchor_view);
        true
    }

    /// Moves the view so that `world_pt` sits at the view center.
    pub fn center_on(&mut self, world_pt: Point) {
        let view_center = self.view_rect().center();
        let world_in_view = self.world_to_view_point(world_pt);
        self.pan_by_view(view_center - world_in_view);
    }

    /// Returns the visible world-space rectangle.
    #[must_use]
    pub fn visible_world_rect(&self) -> Rect {
        self.view_to_world_rect(self.view_rect())
    }

    /// Converts a world-space point into view/device coordinates.
    #[must_use]
    pub fn world_to_view_point(&self, pt: Point) -> Point {
        self.transform.map_point(pt)
    }

    /// Converts a view/device-space point into world coordinates.
    #[must_use]
    pub fn view_to_world_point(&self, pt: Point) -> Point {
        self.transform.inverse_map_point(pt)
    }

    /// Converts a view/device-space rectangle into world coordinates.
    #[must_use]
    pub fn view_to_world_rect(&self, rect: Rect) -> Rect {
        // A positive uniform scale never flips, so the corners map directly.
        Rect::from_points(
            self.view_to_world_point(rect.origin()),
            self.view_to_world_point(Point::new(rect.x1, rect.y1)),
        )
    }

    /// Snapshot of the current viewport state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewportDebugInfo {
        ViewportDebugInfo {
            view_size: self.view_size,
            visible_world_rect: self.visible_world_rect(),
            scale: self.scale(),
            offset: self.offset(),
            min_scale: self.limits.min_scale(),
            max_scale: self.limits.max_scale(),
        }
    }
}

/// Debug snapshot of a [`Viewport`] state.
#[derive(Clone, Copy, Debug)]
pub struct ViewportDebugInfo {
    /// Current view size in device pixels.
    pub view_size: Size,
    /// World-space rectangle currently visible through the view.
    pub visible_world_rect: Rect,
    /// Current scale in device pixels per world centimeter.
    pub scale: f64,
    /// View position of the world origin.
    pub offset: Vec2,
    /// Minimum scale.
    pub min_scale: f64,
    /// Maximum scale.
    pub max_scale: f64,
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size, Vec2};

    use super::Viewport;
    use crate::ZoomLimits;

    fn viewport() -> Viewport {
        Viewport::new(
            Size::new(800.0, 600.0),
            ZoomLimits::new(0.2, 50.0).unwrap(),
            1.0,
        )
    }

    #[test]
    fn basic_world_view_roundtrip() {
        let mut vp = viewport();
        vp.pan_by_view(Vec2::new(30.0, -12.0));

        let world_pt = Point::new(10.0, -5.0);
        let view_pt = vp.world_to_view_point(world_pt);
        let world_back = vp.view_to_world_point(view_pt);
        assert!((world_back.x - world_pt.x).abs() < 1e-9);
        assert!((world_back.y - world_pt.y).abs() < 1e-9);
    }

    #[test]
    fn zoom_about_anchor_keeps_anchor_fixed() {
        let mut vp = viewport();
        let anchor_view = vp.view_rect().center();
        let world_at_anchor_before = vp.view_to_world_point(anchor_view);

        assert!(vp.zoom_about_view_point(anchor_view, 2.0));
        let world_at_anchor_after = vp.view_to_world_point(anchor_view);

        assert!((world_at_anchor_after.x - world_at_anchor_before.x).abs() < 1e-9);
        assert!((world_at_anchor_after.y - world_at_anchor_before.y).abs() < 1e-9);
    }

    #[test]
    fn zoom_outside_limits_is_rejected() {
        let mut vp = viewport();
        let before = vp.transform();

        assert!(!vp.zoom_about_view_point(Point::new(5.0, 5.0), 60.0));
        assert!(!vp.zoom_about_view_point(Point::new(5.0, 5.0), 0.1));
        assert_eq!(vp.transform(), before);

        assert!(vp.zoom_about_view_point(Point::new(5.0, 5.0), 50.0));
        assert_eq!(vp.scale(), 50.0);
    }

    #[test]
    fn center_on_moves_point_to_view_center() {
        let mut vp = viewport();
        vp.center_on(Point::new(100.0, 200.0));
        let center = vp.world_to_view_point(Point::new(100.0, 200.0));
        assert!((center.x - 400.0).abs() < 1e-9);
        assert!((center.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn visible_rect_tracks_scale_and_debug_info() {
        let mut vp = viewport();
        vp.center_on(Point::ZERO);
        assert!(vp.zoom_about_view_point(vp.view_rect().center(), 2.0));

        let visible = vp.visible_world_rect();
        assert!((visible.width() - 400.0).abs() < 1e-9);
        assert!((visible.height() - 300.0).abs() < 1e-9);
        assert!((visible.center().x).abs() < 1e-9);

        let info = vp.debug_info();
        assert_eq!(info.scale, 2.0);
        assert!(info.min_scale <= info.max_scale);
        assert_eq!(info.visible_world_rect, visible);
    }
}
