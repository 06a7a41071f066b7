// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding between the grid and a background floor plan image.
//!
//! The floor plan is placed by three integers: the image pixel that sits at
//! the world origin and how many image pixels span ten meters. While the
//! user calibrates, gestures move a *virtual* transform instead of the grid,
//! and every step is read back into those integers.

use floorgrid_view::ViewTransform;
use kurbo::{Affine, Point, Vec2};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `round`

/// Fewest image pixels allowed per ten meters.
pub const MIN_TEN_METERS_IN_PIXELS: i32 = 200;

/// Most image pixels allowed per ten meters.
pub const MAX_TEN_METERS_IN_PIXELS: i32 = 10_000;

/// Centimeters in ten meters.
const TEN_METERS_CM: f64 = 1_000.0;

/// Which transform pointer gestures drive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BindingMode {
    /// Gestures pan and zoom the grid; the floor plan follows it.
    #[default]
    GridBound,
    /// Gestures move and rescale the floor plan under a fixed grid.
    FloorplanCalibration,
}

/// Placement of a floor plan image relative to the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloorPlanProperties {
    /// Image x coordinate placed at the world origin.
    pub px_center_x: i32,
    /// Image y coordinate placed at the world origin.
    pub px_center_y: i32,
    /// Image pixels spanning ten meters, in
    /// `[MIN_TEN_METERS_IN_PIXELS, MAX_TEN_METERS_IN_PIXELS]`.
    pub ten_meters_in_pixels: i32,
}

impl FloorPlanProperties {
    /// Creates properties, clamping the image scale into its allowed range.
    #[must_use]
    pub fn new(px_center_x: i32, px_center_y: i32, ten_meters_in_pixels: i32) -> Self {
        Self {
            px_center_x,
            px_center_y,
            ten_meters_in_pixels: clamp_ten_meters(ten_meters_in_pixels),
        }
    }

    /// Returns a copy with the image scale clamped into its allowed range.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self::new(self.px_center_x, self.px_center_y, self.ten_meters_in_pixels)
    }
}

fn clamp_ten_meters(value: i32) -> i32 {
    value.clamp(MIN_TEN_METERS_IN_PIXELS, MAX_TEN_METERS_IN_PIXELS)
}

fn ten_meters_in_range(value: f64) -> bool {
    (f64::from(MIN_TEN_METERS_IN_PIXELS)..=f64::from(MAX_TEN_METERS_IN_PIXELS)).contains(&value)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "saturating conversion of a rounded pixel coordinate"
)]
fn round_to_i32(value: f64) -> i32 {
    value.round() as i32
}

/// Floor plan placement plus the virtual transform used while calibrating.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloorplanBinding {
    properties: FloorPlanProperties,
    virtual_transform: ViewTransform,
    pending_ten_meters: f64,
}

impl FloorplanBinding {
    /// Binds a floor plan with the given placement.
    #[must_use]
    pub fn new(properties: FloorPlanProperties) -> Self {
        let properties = properties.clamped();
        Self {
            properties,
            virtual_transform: ViewTransform::IDENTITY,
            pending_ten_meters: f64::from(properties.ten_meters_in_pixels),
        }
    }

    /// Returns the current placement.
    #[must_use]
    pub fn properties(&self) -> FloorPlanProperties {
        self.properties
    }

    /// Replaces the placement, clamping the image scale.
    pub fn set_properties(&mut self, properties: FloorPlanProperties) {
        self.properties = properties.clamped();
        self.pending_ten_meters = f64::from(self.properties.ten_meters_in_pixels);
    }

    /// Returns the virtual transform gestures move during calibration.
    #[must_use]
    pub fn virtual_transform(&self) -> ViewTransform {
        self.virtual_transform
    }

    /// Image pixels to world-origin-relative device pixels at `grid_scale`.
    ///
    /// Translates the plan center to the origin, then scales ten meters of
    /// image onto ten meters of grid.
    #[must_use]
    pub fn base_transform(&self, grid_scale: f64) -> ViewTransform {
        let scale = TEN_METERS_CM * grid_scale / f64::from(self.properties.ten_meters_in_pixels);
        let center = Vec2::new(
            f64::from(self.properties.px_center_x),
            f64::from(self.properties.px_center_y),
        );
        ViewTransform::new(scale, -center * scale)
    }

    /// Image pixels to device pixels under the grid transform, without rotation.
    #[must_use]
    pub fn view_transform(&self, grid: &ViewTransform) -> ViewTransform {
        self.base_transform(grid.scale())
            .then_translate(grid.translation())
    }

    /// Image pixels to device pixels, rotated about the plan center.
    #[must_use]
    pub fn draw_transform(&self, grid: &ViewTransform, rotation_degrees: f64) -> Affine {
        let affine = self.view_transform(grid).to_affine();
        if rotation_degrees == 0.0 {
            affine
        } else {
            affine.then_rotate_about(rotation_degrees.to_radians(), grid.translation().to_point())
        }
    }

    /// Seeds the virtual transform from the current placement.
    pub fn begin_calibration(&mut self, grid: &ViewTransform) {
        self.virtual_transform = self.view_transform(grid);
        self.pending_ten_meters = f64::from(self.properties.ten_meters_in_pixels);
    }

    /// Resets the unrounded image scale at the start of a pinch.
    pub fn begin_pinch(&mut self) {
        self.pending_ten_meters = f64::from(self.properties.ten_meters_in_pixels);
    }

    /// Reads the virtual transform back into the placement.
    ///
    /// The plan center only changes when its rounded image coordinate does.
    /// With `also_rescale`, the image scale is recomputed too and clamped.
    /// Returns whether any property changed. The grid is never touched.
    pub fn apply_virtual_transform(&mut self, grid: &ViewTransform, also_rescale: bool) -> bool {
        let (scale, tx, ty) = self.virtual_transform.decompose();
        let shift = Vec2::new(tx, ty) - grid.translation();
        let old = self.properties;
        self.properties.px_center_x = round_to_i32(-shift.x / scale);
        self.properties.px_center_y = round_to_i32(-shift.y / scale);
        if also_rescale {
            self.pending_ten_meters = TEN_METERS_CM * grid.scale() / scale;
            self.properties.ten_meters_in_pixels =
                clamp_ten_meters(round_to_i32(self.pending_ten_meters));
        }
        let changed = self.properties != old;
        if changed {
            tracing::debug!(properties = ?self.properties, "floor plan properties changed");
        }
        changed
    }

    /// Drags the floor plan by `delta` device pixels.
    pub fn pan_by(&mut self, delta: Vec2, grid: &ViewTransform) -> bool {
        self.virtual_transform.translate_by(delta);
        self.apply_virtual_transform(grid, false)
    }

    /// Pinches the floor plan by `factor` about `focus`.
    ///
    /// Returns `None`, leaving everything untouched, if the image scale would
    /// leave its allowed range. Otherwise returns whether any property changed.
    pub fn pinch_by(&mut self, factor: f64, focus: Point, grid: &ViewTransform) -> Option<bool> {
        if !(factor.is_finite() && factor > 0.0) {
            return None;
        }
        let next = self.pending_ten_meters / factor;
        if !ten_meters_in_range(next) {
            tracing::trace!(next, "floor plan pinch rejected");
            return None;
        }
        self.pending_ten_meters = next;
        self.virtual_transform.scale_about(factor, focus);
        Some(self.apply_virtual_transform(grid, true))
    }
}
