// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Recognition thresholds for [`crate::GestureRecognizer`].
///
/// Distances are in device pixels, velocities in device pixels per second.
/// These are tuning constants, not part of any contract; hosts may adjust
/// them per platform and display density.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureConfig {
    /// Movement beyond this distance turns a press into a drag and cancels the tap.
    pub touch_slop: f64,
    /// Maximum time between the first tap's release and the second press.
    pub double_tap_timeout_ms: u64,
    /// Maximum distance between the two presses of a double tap.
    pub double_tap_slop: f64,
    /// Release speeds below this end a drag without a fling.
    pub min_fling_velocity: f64,
    /// Release speeds are clamped to this magnitude.
    pub max_fling_velocity: f64,
    /// Only samples this recent contribute to the release velocity.
    pub velocity_window_ms: u64,
    /// Pinch spans below this are too small to derive a stable scale factor.
    pub min_pinch_span: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            double_tap_timeout_ms: 300,
            double_tap_slop: 100.0,
            min_fling_velocity: 50.0,
            max_fling_velocity: 8_000.0,
            velocity_window_ms: 100,
            min_pinch_span: 1.0,
        }
    }
}
