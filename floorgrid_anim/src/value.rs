// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::easing::Easing;

/// Time-driven scalar interpolation from a start value by a delta.
///
/// Progress is a pure function of the sampled time against the stored start
/// time, so missed frames never cause drift: sampling `now` again always
/// yields the value that belongs to `now`.
///
/// ```
/// use floorgrid_anim::{AnimatedValue, Easing};
///
/// let mut zoom = AnimatedValue::new(Easing::Linear);
/// zoom.start(1_000, 1.0, 1.0, 500);
///
/// assert_eq!(zoom.sample(1_250), Some(1.5));
/// assert_eq!(zoom.sample(1_500), Some(2.0)); // last step, now finished
/// assert!(zoom.is_finished());
/// assert_eq!(zoom.sample(1_600), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimatedValue {
    easing: Easing,
    start_value: f64,
    delta_value: f64,
    duration_ms: u64,
    start_time_ms: u64,
    current: f64,
    finished: bool,
}

impl AnimatedValue {
    /// Creates a finished animation that will use `easing` once started.
    #[must_use]
    pub fn new(easing: Easing) -> Self {
        Self {
            easing,
            start_value: 0.0,
            delta_value: 0.0,
            duration_ms: 0,
            start_time_ms: 0,
            current: 0.0,
            finished: true,
        }
    }

    /// Starts animating from `start_value` to `start_value + delta_value`.
    pub fn start(&mut self, now_ms: u64, start_value: f64, delta_value: f64, duration_ms: u64) {
        self.start_value = start_value;
        self.delta_value = delta_value;
        self.duration_ms = duration_ms;
        self.start_time_ms = now_ms;
        self.current = start_value;
        self.finished = false;
    }

    /// Returns the value the animation has at `now_ms`, without changing state.
    #[must_use]
    pub fn value_at(&self, now_ms: u64) -> f64 {
        let progress = self.progress_at(now_ms);
        self.start_value + self.delta_value * self.easing.apply(progress)
    }

    /// Returns the linear progress in `[0, 1]` at `now_ms`.
    #[must_use]
    pub fn progress_at(&self, now_ms: u64) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(self.start_time_ms);
        if elapsed >= self.duration_ms {
            1.0
        } else {
            elapsed as f64 / self.duration_ms as f64
        }
    }

    /// Advances to `now_ms` and returns the new value.
    ///
    /// Returns `None` if the animation had already finished before this call.
    /// The call that reaches the end of the duration returns the final value
    /// and marks the animation finished.
    pub fn sample(&mut self, now_ms: u64) -> Option<f64> {
        if self.finished {
            return None;
        }
        self.current = self.value_at(now_ms);
        if self.progress_at(now_ms) >= 1.0 {
            self.current = self.final_value();
            self.finished = true;
        }
        Some(self.current)
    }

    /// Stops the animation where it is.
    pub fn abort(&mut self) {
        self.finished = true;
    }

    /// Stops the animation and jumps to its final value.
    pub fn force_finish(&mut self) {
        self.current = self.final_value();
        self.finished = true;
    }

    /// Returns `true` once the animation has finished or was aborted.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns the most recently sampled value.
    #[must_use]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Returns the value the animation ends at.
    #[must_use]
    pub fn final_value(&self) -> f64 {
        self.start_value + self.delta_value
    }

    /// Returns the start value.
    #[must_use]
    pub fn start_value(&self) -> f64 {
        self.start_value
    }

    /// Returns the time the animation was started at.
    #[must_use]
    pub fn start_time_ms(&self) -> u64 {
        self.start_time_ms
    }

    /// Returns the duration.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Returns the easing curve.
    #[must_use]
    pub fn easing(&self) -> Easing {
        self.easing
    }
}

#[cfg(test)]
mod tests {
    use super::AnimatedValue;
    use crate::Easing;

    #[test]
    fn new_value_is_finished() {
        let mut v = AnimatedValue::new(Easing::Linear);
        assert!(v.is_finished());
        assert_eq!(v.sample(10), None);
    }

    #[test]
    fn sample_tracks_wall_clock_not_call_count() {
        let mut v = AnimatedValue::new(Easing::Linear);
        v.start(100, 0.0, 10.0, 100);

        // Skipping frames lands on the same value as sampling every frame.
        assert_eq!(v.sample(175), Some(7.5));
        assert_eq!(v.sample(175), Some(7.5));
        assert_eq!(v.sample(150), Some(5.0));
    }

    #[test]
    fn sample_before_start_is_start_value() {
        let mut v = AnimatedValue::new(Easing::DECELERATE);
        v.start(1_000, 1.0, 1.0, 500);
        assert_eq!(v.sample(900), Some(1.0));
    }

    #[test]
    fn finishing_step_reports_final_value_once() {
        let mut v = AnimatedValue::new(Easing::DECELERATE);
        v.start(0, 1.0, -0.5, 40);

        assert_eq!(v.sample(1_000), Some(0.5));
        assert!(v.is_finished());
        assert_eq!(v.sample(1_000), None);
        assert_eq!(v.current(), 0.5);
    }

    #[test]
    fn zero_duration_finishes_on_first_sample() {
        let mut v = AnimatedValue::new(Easing::Linear);
        v.start(5, 2.0, 3.0, 0);
        assert_eq!(v.sample(5), Some(5.0));
        assert!(v.is_finished());
    }

    #[test]
    fn abort_keeps_current_and_force_finish_jumps() {
        let mut v = AnimatedValue::new(Easing::Linear);
        v.start(0, 0.0, 10.0, 100);
        v.sample(20);
        v.abort();
        assert!(v.is_finished());
        assert_eq!(v.current(), 2.0);

        v.start(0, 0.0, 10.0, 100);
        v.force_finish();
        assert_eq!(v.current(), 10.0);
    }
}
