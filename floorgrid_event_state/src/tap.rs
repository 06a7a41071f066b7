// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tap and double-tap recognition.
//!
//! A press released without leaving the touch slop is a tap. A tap is only
//! *confirmed* as a single tap once it can no longer become the first half
//! of a double tap: either the double-tap window elapses (see
//! [`TapState::poll`]) or the next press arrives too late or too far away.
//!
//! A second press inside the window and the double-tap slop is reported as
//! a double tap immediately, on the press itself, at the first tap's
//! position. Its release does not produce another tap.

use kurbo::Point;
use smallvec::SmallVec;

use crate::config::GestureConfig;

/// Tap outcome reported by [`TapState`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TapEvent {
    /// A single tap that can no longer become a double tap.
    SingleTap(Point),
    /// The second press of a double tap.
    DoubleTap(Point),
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Press {
    pos: Point,
    /// Part of a double tap; its release is not a tap of its own.
    second_of_double: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PendingTap {
    pos: Point,
    up_time_ms: u64,
}

/// Tracks presses and releases to recognize taps and double taps.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TapState {
    press: Option<Press>,
    pending: Option<PendingTap>,
}

impl TapState {
    /// Creates an idle tap state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles a primary press.
    pub fn on_down(
        &mut self,
        pos: Point,
        time_ms: u64,
        config: &GestureConfig,
    ) -> SmallVec<[TapEvent; 2]> {
        let mut out = SmallVec::new();
        let mut second_of_double = false;
        if let Some(pending) = self.pending.take() {
            let in_time =
                time_ms.saturating_sub(pending.up_time_ms) <= config.double_tap_timeout_ms;
            let in_reach = (pos - pending.pos).hypot() <= config.double_tap_slop;
            if in_time && in_reach {
                second_of_double = true;
                out.push(TapEvent::DoubleTap(pending.pos));
            } else {
                out.push(TapEvent::SingleTap(pending.pos));
            }
        }
        self.press = Some(Press {
            pos,
            second_of_double,
        });
        out
    }

    /// Handles movement of the primary pointer; leaving the slop cancels the tap.
    pub fn on_move(&mut self, pos: Point, config: &GestureConfig) {
        if let Some(press) = self.press
            && (pos - press.pos).hypot() > config.touch_slop
        {
            self.press = None;
        }
    }

    /// Handles release of the primary pointer.
    ///
    /// Returns `true` if the release completed a tap that is now waiting for
    /// confirmation.
    pub fn on_up(&mut self, pos: Point, time_ms: u64, config: &GestureConfig) -> bool {
        self.on_move(pos, config);
        match self.press.take() {
            Some(press) if !press.second_of_double => {
                self.pending = Some(PendingTap {
                    pos: press.pos,
                    up_time_ms: time_ms,
                });
                true
            }
            _ => false,
        }
    }

    /// Confirms a pending tap once the double-tap window has elapsed.
    pub fn poll(&mut self, now_ms: u64, config: &GestureConfig) -> Option<TapEvent> {
        let pending = self.pending?;
        if now_ms.saturating_sub(pending.up_time_ms) > config.double_tap_timeout_ms {
            self.pending = None;
            Some(TapEvent::SingleTap(pending.pos))
        } else {
            None
        }
    }

    /// Forgets the current press, e.g. when it turned into a drag or pinch.
    ///
    /// A tap already waiting for confirmation is kept.
    pub fn cancel_press(&mut self) {
        self.press = None;
    }

    /// Forgets everything.
    pub fn reset(&mut self) {
        self.press = None;
        self.pending = None;
    }

    /// Returns `true` while a tap waits for confirmation.
    #[must_use]
    pub fn has_pending_tap(&self) -> bool {
        self.pending.is_some()
    }
}
