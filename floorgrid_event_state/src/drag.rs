// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag state helper: movement deltas, total offsets and release velocity.
//!
//! ## Usage
//!
//! 1) Start a drag with [`DragState::start`], passing the press position and time.
//! 2) On each move, call [`DragState::update`] to get the delta since the last update.
//!    Use [`DragState::record`] instead when the movement should only count
//!    towards velocity (for example while still inside the touch slop).
//! 3) On release, read [`DragState::release_velocity`].
//! 4) End the drag with [`DragState::end`] to reset state.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use floorgrid_event_state::drag::DragState;
//!
//! let mut drag = DragState::default();
//!
//! drag.start(Point::new(10.0, 20.0), 0);
//! assert!(drag.is_dragging());
//!
//! let delta = drag.update(Point::new(15.0, 25.0), 10).unwrap();
//! assert_eq!(delta.x, 5.0);
//!
//! let total = drag.total_offset(Point::new(15.0, 25.0)).unwrap();
//! assert_eq!(total.y, 5.0);
//!
//! // 5 px in 10 ms is 500 px/s.
//! let v = drag.release_velocity(100);
//! assert!((v.x - 500.0).abs() < 1e-9);
//! ```

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Number of recent samples kept for velocity estimation.
const MAX_SAMPLES: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Sample {
    pos: Point,
    time_ms: u64,
}

/// Tracks drag state for move event processing.
#[derive(Debug, Clone, Default)]
pub struct DragState {
    /// Start position of the drag operation.
    pub start_pos: Option<Point>,
    /// Last position reported through [`DragState::update`].
    pub last_pos: Option<Point>,
    samples: SmallVec<[Sample; MAX_SAMPLES]>,
}

impl DragState {
    /// Start tracking a new drag operation from the given position.
    pub fn start(&mut self, pos: Point, time_ms: u64) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.samples.clear();
        self.push_sample(pos, time_ms);
    }

    /// Records a position for velocity estimation without moving `last_pos`.
    pub fn record(&mut self, pos: Point, time_ms: u64) {
        if self.start_pos.is_some() {
            self.push_sample(pos, time_ms);
        }
    }

    /// Update the drag state with a new position, returning the movement delta since last update.
    pub fn update(&mut self, pos: Point, time_ms: u64) -> Option<Vec2> {
        self.start_pos?;
        self.push_sample(pos, time_ms);
        self.last_pos.replace(pos).map(|last_pos| pos - last_pos)
    }

    /// Get total offset from drag start position.
    pub fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start_pos| current_pos - start_pos)
    }

    /// Estimates the pointer velocity in pixels per second.
    ///
    /// Only samples no older than `window_ms` before the newest sample are
    /// considered. Returns zero when there is not enough history.
    pub fn release_velocity(&self, window_ms: u64) -> Vec2 {
        let Some(newest) = self.samples.last() else {
            return Vec2::ZERO;
        };
        let oldest = self
            .samples
            .iter()
            .find(|s| newest.time_ms.saturating_sub(s.time_ms) <= window_ms)
            .unwrap_or(newest);
        let dt_ms = newest.time_ms.saturating_sub(oldest.time_ms);
        if dt_ms == 0 {
            return Vec2::ZERO;
        }
        (newest.pos - oldest.pos) * (1000.0 / dt_ms as f64)
    }

    /// End the current drag operation and reset state.
    pub fn end(&mut self) {
        self.start_pos = None;
        self.last_pos = None;
        self.samples.clear();
    }

    /// Returns `true` while a drag operation is active.
    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }

    fn push_sample(&mut self, pos: Point, time_ms: u64) {
        if self.samples.len() == MAX_SAMPLES {
            self.samples.remove(0);
        }
        self.samples.push(Sample { pos, time_ms });
    }
}
