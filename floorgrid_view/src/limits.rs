// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::transform::is_valid_scale;

/// Allowed range of the grid scale (device pixels per world centimeter).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomLimits {
    min_scale: f64,
    max_scale: f64,
}

impl ZoomLimits {
    /// Creates limits from a minimum and maximum scale.
    ///
    /// The pair is normalized so that `min_scale <= max_scale`. Returns `None`
    /// if either bound is not strictly positive and finite.
    #[must_use]
    pub fn new(min_scale: f64, max_scale: f64) -> Option<Self> {
        if !is_valid_scale(min_scale) || !is_valid_scale(max_scale) {
            return None;
        }
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        Some(Self {
            min_scale,
            max_scale,
        })
    }

    /// Derives limits from zoom ratios on a display with `pixels_per_cm`.
    ///
    /// A zoom ratio `r` means one centimeter on screen shows `r` centimeters
    /// of the world, so the matching scale is `pixels_per_cm / r`. The
    /// `closest_ratio` gives the maximum scale and `farthest_ratio` the minimum.
    #[must_use]
    pub fn from_zoom_ratios(
        pixels_per_cm: f64,
        closest_ratio: f64,
        farthest_ratio: f64,
    ) -> Option<Self> {
        Self::new(
            scale_for_zoom_ratio(pixels_per_cm, farthest_ratio),
            scale_for_zoom_ratio(pixels_per_cm, closest_ratio),
        )
    }

    /// Returns the minimum scale.
    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    /// Returns the maximum scale.
    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Returns `true` if `scale` lies within the limits (inclusive).
    #[must_use]
    pub fn contains(&self, scale: f64) -> bool {
        scale >= self.min_scale && scale <= self.max_scale
    }

    /// Clamps `scale` into the limits.
    #[must_use]
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }
}

/// Converts a zoom ratio into a scale for a display with `pixels_per_cm`.
#[must_use]
pub fn scale_for_zoom_ratio(pixels_per_cm: f64, ratio: f64) -> f64 {
    pixels_per_cm / ratio
}
