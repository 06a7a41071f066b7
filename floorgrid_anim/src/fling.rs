// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inertial fling: a release velocity decaying to rest at constant deceleration.
//!
//! The fling reports an *offset from where it started*, so callers re-apply it
//! to a snapshot of the transform taken at release instead of accumulating
//! per-frame deltas.

use kurbo::Vec2;

use crate::easing::Easing;
use crate::value::AnimatedValue;

/// Tuning for [`Fling`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlingConfig {
    /// Deceleration in device pixels per second squared.
    pub deceleration: f64,
    /// Upper bound on the fling duration in milliseconds.
    pub max_duration_ms: u64,
}

impl Default for FlingConfig {
    fn default() -> Self {
        Self {
            deceleration: 2_000.0,
            max_duration_ms: 2_500,
        }
    }
}

/// A decelerating 2D offset animation seeded with a release velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fling {
    progress: AnimatedValue,
    distance: Vec2,
}

impl Default for Fling {
    fn default() -> Self {
        Self::new()
    }
}

impl Fling {
    /// Creates a finished fling.
    #[must_use]
    pub fn new() -> Self {
        Self {
            progress: AnimatedValue::new(Easing::DECELERATE),
            distance: Vec2::ZERO,
        }
    }

    /// Starts a fling at `now_ms` with `velocity` in device pixels per second.
    ///
    /// The fling travels until it comes to rest. Under quadratic deceleration
    /// the initial speed matches `velocity` and the total distance is
    /// `velocity * duration / 2`. A zero velocity leaves the fling finished.
    pub fn start(&mut self, now_ms: u64, velocity: Vec2, config: &FlingConfig) {
        let speed = velocity.hypot();
        if !speed.is_finite() || speed <= 0.0 || config.deceleration <= 0.0 {
            self.distance = Vec2::ZERO;
            self.progress.abort();
            return;
        }
        let max_secs = config.max_duration_ms as f64 / 1000.0;
        let duration_secs = (speed / config.deceleration).min(max_secs);
        self.distance = velocity * (duration_secs / 2.0);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "duration is bounded by max_duration_ms"
        )]
        let duration_ms = (duration_secs * 1000.0) as u64;
        self.progress.start(now_ms, 0.0, 1.0, duration_ms);
    }

    /// Advances to `now_ms`, returning the offset from the fling start.
    ///
    /// Returns `None` once the fling had already finished before this call.
    pub fn sample(&mut self, now_ms: u64) -> Option<Vec2> {
        self.progress.sample(now_ms).map(|p| self.distance * p)
    }

    /// Returns the offset the fling has at `now_ms`, without changing state.
    #[must_use]
    pub fn offset_at(&self, now_ms: u64) -> Vec2 {
        self.distance * self.progress.value_at(now_ms)
    }

    /// Returns the most recently sampled offset.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.distance * self.progress.current()
    }

    /// Returns the offset at which the fling comes to rest.
    #[must_use]
    pub fn final_offset(&self) -> Vec2 {
        self.distance
    }

    /// Returns the fling duration in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.progress.duration_ms()
    }

    /// Stops the fling where it is.
    pub fn abort(&mut self) {
        self.progress.abort();
    }

    /// Returns `true` once the fling has come to rest or was aborted.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.progress.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Vec2;

    use super::{Fling, FlingConfig};

    const CONFIG: FlingConfig = FlingConfig {
        deceleration: 1_000.0,
        max_duration_ms: 10_000,
    };

    #[test]
    fn fling_travels_half_velocity_times_duration() {
        let mut fling = Fling::new();
        fling.start(0, Vec2::new(1_000.0, 0.0), &CONFIG);

        assert_eq!(fling.duration_ms(), 1_000);
        assert!((fling.final_offset().x - 500.0).abs() < 1e-9);
        assert_eq!(fling.final_offset().y, 0.0);
    }

    #[test]
    fn offsets_grow_monotonically_and_settle() {
        let mut fling = Fling::new();
        fling.start(0, Vec2::new(-600.0, 800.0), &CONFIG);

        let mut prev = 0.0;
        for t in (0..=1_000).step_by(50) {
            let offset = fling.sample(t).unwrap();
            let travelled = offset.hypot();
            assert!(travelled >= prev);
            prev = travelled;
        }
        assert!(fling.is_finished());
        assert_eq!(fling.sample(1_100), None);
        assert_eq!(fling.offset_at(5_000), fling.final_offset());
    }

    #[test]
    fn duration_is_capped() {
        let mut fling = Fling::new();
        let config = FlingConfig {
            deceleration: 10.0,
            max_duration_ms: 300,
        };
        fling.start(0, Vec2::new(0.0, 1_000.0), &config);
        assert_eq!(fling.duration_ms(), 300);
        assert!((fling.final_offset().y - 150.0).abs() < 1e-9);
    }

    #[test]
    fn zero_velocity_does_not_start() {
        let mut fling = Fling::new();
        fling.start(0, Vec2::ZERO, &CONFIG);
        assert!(fling.is_finished());
    }

    #[test]
    fn abort_stops_sampling() {
        let mut fling = Fling::new();
        fling.start(0, Vec2::new(500.0, 0.0), &CONFIG);
        let at_100 = fling.sample(100).unwrap();
        fling.abort();
        assert_eq!(fling.sample(200), None);
        // The fling rests where it was last sampled.
        assert_eq!(fling.offset(), at_100);
    }
}
