// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Vec2};

/// Uniform scale + translation mapping world coordinates into view space.
///
/// A point `p` is mapped to `p * scale + translation`. Rotation and shear
/// are never represented; the only mutations are [`ViewTransform::scale_about`]
/// and [`ViewTransform::translate_by`], both of which post-compose onto the
/// current transform so accumulated pan/zoom history is preserved.
///
/// The scale is always strictly positive and finite. Operations that would
/// break this are a precondition violation: they assert in debug builds and
/// leave the transform unchanged in release builds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    scale: f64,
    translation: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translation: Vec2::ZERO,
    };

    /// Creates a transform from a scale and a translation.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `scale` is not strictly positive and finite.
    /// Release builds fall back to a scale of `1.0`.
    #[must_use]
    pub fn new(scale: f64, translation: Vec2) -> Self {
        debug_assert!(is_valid_scale(scale), "invalid transform scale {scale}");
        Self {
            scale: if is_valid_scale(scale) { scale } else { 1.0 },
            translation,
        }
    }

    /// Returns the uniform scale factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the translation (the view position of the world origin).
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    /// Splits the transform into `(scale, tx, ty)`.
    #[must_use]
    pub fn decompose(&self) -> (f64, f64, f64) {
        (self.scale, self.translation.x, self.translation.y)
    }

    /// Post-scales by `factor` around `focal` (in view space).
    ///
    /// The point currently mapped to `focal` stays mapped to `focal`.
    pub fn scale_about(&mut self, factor: f64, focal: Point) {
        let scale = self.scale * factor;
        debug_assert!(
            is_valid_scale(factor) && is_valid_scale(scale),
            "scale_about would produce invalid scale {scale} (factor {factor})"
        );
        if !is_valid_scale(factor) || !is_valid_scale(scale) {
            return;
        }
        let focal = focal.to_vec2();
        self.scale = scale;
        self.translation = (self.translation - focal) * factor + focal;
    }

    /// Post-translates by `delta` (in view space).
    pub fn translate_by(&mut self, delta: Vec2) {
        self.translation += delta;
    }

    /// Returns a copy scaled around `focal`; see [`ViewTransform::scale_about`].
    #[must_use]
    pub fn then_scale_about(mut self, factor: f64, focal: Point) -> Self {
        self.scale_about(factor, focal);
        self
    }

    /// Returns a copy translated by `delta`; see [`ViewTransform::translate_by`].
    #[must_use]
    pub fn then_translate(mut self, delta: Vec2) -> Self {
        self.translate_by(delta);
        self
    }

    /// Maps a world-space point into view space.
    #[must_use]
    pub fn map_point(&self, pt: Point) -> Point {
        Point::new(
            pt.x * self.scale + self.translation.x,
            pt.y * self.scale + self.translation.y,
        )
    }

    /// Maps a view-space point back into world space.
    #[must_use]
    pub fn inverse_map_point(&self, pt: Point) -> Point {
        Point::new(
            (pt.x - self.translation.x) / self.scale,
            (pt.y - self.translation.y) / self.scale,
        )
    }

    /// Returns the inverse transform (view space to world space).
    #[must_use]
    pub fn inverse(&self) -> Self {
        let inv = 1.0 / self.scale;
        Self {
            scale: inv,
            translation: -self.translation * inv,
        }
    }

    /// Converts into a Kurbo [`Affine`].
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.translation) * Affine::scale(self.scale)
    }

    /// Converts from a Kurbo [`Affine`], if it holds only a uniform positive
    /// scale and a translation.
    #[must_use]
    pub fn try_from_affine(affine: Affine) -> Option<Self> {
        let [a, b, c, d, e, f] = affine.as_coeffs();
        if b != 0.0 || c != 0.0 || a != d || !is_valid_scale(a) {
            return None;
        }
        Some(Self {
            scale: a,
            translation: Vec2::new(e, f),
        })
    }
}

/// Returns `true` for scales a [`ViewTransform`] may hold.
#[must_use]
pub fn is_valid_scale(scale: f64) -> bool {
    scale.is_finite() && scale > 0.0
}
