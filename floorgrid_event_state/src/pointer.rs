// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw pointer events as delivered by the host.

use kurbo::Point;
use smallvec::SmallVec;

/// What happened to the pointer set in a [`PointerEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// A pointer touched down. It is the last entry of `pointers`.
    Down,
    /// One or more pointers moved.
    Move,
    /// A pointer lifted. It is the last entry of `pointers`.
    Up,
    /// The host aborted the pointer stream.
    Cancel,
}

/// A single raw pointer event.
///
/// `pointers` holds the position of every pointer in contact during the event
/// (device pixels). For [`PointerPhase::Down`] and [`PointerPhase::Up`] the
/// pointer that changed state is the last entry.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Event kind.
    pub phase: PointerPhase,
    /// Pointer positions in device pixels.
    pub pointers: SmallVec<[Point; 2]>,
    /// Host timestamp in milliseconds.
    pub timestamp_ms: u64,
}

impl PointerEvent {
    /// Creates an event from a pointer slice.
    #[must_use]
    pub fn new(phase: PointerPhase, pointers: &[Point], timestamp_ms: u64) -> Self {
        Self {
            phase,
            pointers: SmallVec::from_slice(pointers),
            timestamp_ms,
        }
    }

    /// Single pointer touching down at `pos`.
    #[must_use]
    pub fn down(pos: Point, timestamp_ms: u64) -> Self {
        Self::new(PointerPhase::Down, &[pos], timestamp_ms)
    }

    /// Single pointer moving to `pos`.
    #[must_use]
    pub fn moved(pos: Point, timestamp_ms: u64) -> Self {
        Self::new(PointerPhase::Move, &[pos], timestamp_ms)
    }

    /// Single pointer lifting at `pos`.
    #[must_use]
    pub fn up(pos: Point, timestamp_ms: u64) -> Self {
        Self::new(PointerPhase::Up, &[pos], timestamp_ms)
    }

    /// Stream cancellation.
    #[must_use]
    pub fn cancel(timestamp_ms: u64) -> Self {
        Self::new(PointerPhase::Cancel, &[], timestamp_ms)
    }

    /// Returns the first pointer, if any.
    #[must_use]
    pub fn primary(&self) -> Option<Point> {
        self.pointers.first().copied()
    }
}
