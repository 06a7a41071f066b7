// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture recognition over a raw pointer stream.
//!
//! [`GestureRecognizer`] combines [`DragState`], [`TapState`] and
//! [`PinchState`] into a single state machine that turns
//! [`PointerEvent`]s into [`Gesture`]s.

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::config::GestureConfig;
use crate::drag::DragState;
use crate::pinch::PinchState;
use crate::pointer::{PointerEvent, PointerPhase};
use crate::tap::{TapEvent, TapState};

/// A recognized gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    /// The first pointer touched down.
    Down {
        /// Press position.
        pos: Point,
    },
    /// The primary pointer moved beyond the touch slop, or kept moving after it.
    Drag {
        /// Movement since the previous drag step.
        delta: Vec2,
        /// Current pointer position.
        pos: Point,
    },
    /// The last pointer lifted without enough speed to fling.
    Release {
        /// Release position.
        pos: Point,
    },
    /// The last pointer lifted after a drag with residual velocity.
    Fling {
        /// Release velocity in pixels per second.
        velocity: Vec2,
    },
    /// A second pointer touched down.
    ///
    /// When two pointers land in the same event, a [`Gesture::Down`] for the
    /// first one precedes this.
    PinchBegin {
        /// Midpoint of the two pointers.
        focus: Point,
    },
    /// The two pinching pointers moved.
    Pinch {
        /// Span ratio since the previous pinch step.
        factor: f64,
        /// Midpoint of the two pointers.
        focus: Point,
    },
    /// One of the two pinching pointers lifted.
    PinchEnd,
    /// A tap that can no longer become a double tap.
    SingleTap {
        /// Tap position.
        pos: Point,
    },
    /// The second press of a double tap.
    DoubleTap {
        /// Position of the first tap.
        pos: Point,
    },
    /// The host cancelled the pointer stream.
    Cancel,
}

/// Batch of gestures produced by one pointer event.
pub type Gestures = SmallVec<[Gesture; 4]>;

impl From<TapEvent> for Gesture {
    fn from(event: TapEvent) -> Self {
        match event {
            TapEvent::SingleTap(pos) => Self::SingleTap { pos },
            TapEvent::DoubleTap(pos) => Self::DoubleTap { pos },
        }
    }
}

/// Turns raw pointer events into gestures.
///
/// Ordering guarantees within one batch:
/// - A tap confirmed or a double tap recognized by a press comes *before* that
///   press's [`Gesture::Down`].
/// - Every primary release yields exactly one of [`Gesture::Release`] or
///   [`Gesture::Fling`].
///
/// Single taps waiting for the double-tap window are confirmed through
/// [`GestureRecognizer::poll`], which hosts call once per frame.
#[derive(Clone, Debug, Default)]
pub struct GestureRecognizer {
    config: GestureConfig,
    drag: DragState,
    taps: TapState,
    pinch: PinchState,
    dragging: bool,
}

impl GestureRecognizer {
    /// Creates a recognizer with the given thresholds.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the recognition thresholds.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Replaces the recognition thresholds.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    /// Returns `true` while the primary pointer is dragging.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Returns `true` while two pointers are pinching.
    #[must_use]
    pub fn is_pinching(&self) -> bool {
        self.pinch.is_active()
    }

    /// Returns `true` while a tap waits for [`GestureRecognizer::poll`] to confirm it.
    #[must_use]
    pub fn has_pending_tap(&self) -> bool {
        self.taps.has_pending_tap()
    }

    /// Processes one pointer event.
    pub fn handle(&mut self, event: &PointerEvent) -> Gestures {
        let mut out = Gestures::new();
        let time = event.timestamp_ms;
        let pointers = event.pointers.as_slice();
        match event.phase {
            PointerPhase::Down => match pointers {
                [] => {}
                [pos] => {
                    out.extend(
                        self.taps
                            .on_down(*pos, time, &self.config)
                            .into_iter()
                            .map(Gesture::from),
                    );
                    self.pinch.end();
                    self.drag.start(*pos, time);
                    self.dragging = false;
                    out.push(Gesture::Down { pos: *pos });
                }
                [a, b, ..] => {
                    if !self.pinch.is_active() {
                        if !self.drag.is_dragging() {
                            // Both pointers landed together; this is still the first press.
                            out.push(Gesture::Down { pos: *a });
                        }
                        self.taps.cancel_press();
                        self.drag.end();
                        self.dragging = false;
                        let focus = self.pinch.begin(*a, *b);
                        tracing::trace!(?focus, "pinch begin");
                        out.push(Gesture::PinchBegin { focus });
                    }
                }
            },
            PointerPhase::Move => match pointers {
                [] => {}
                [pos] => self.move_primary(*pos, time, &mut out),
                [a, b, ..] => {
                    if let Some(step) = self.pinch.update(*a, *b, self.config.min_pinch_span) {
                        out.push(Gesture::Pinch {
                            factor: step.factor,
                            focus: step.focus,
                        });
                    }
                }
            },
            PointerPhase::Up => self.lift(pointers, time, &mut out),
            PointerPhase::Cancel => {
                self.reset();
                out.push(Gesture::Cancel);
            }
        }
        out
    }

    /// Tells the recognizer the consumer refused the last [`Gesture::Pinch`].
    ///
    /// The next pinch factor is then measured from the span before that step,
    /// so the refused part of the gesture is not lost.
    pub fn reject_pinch_step(&mut self) {
        self.pinch.reject_step();
    }

    /// Confirms a pending single tap once the double-tap window has passed.
    pub fn poll(&mut self, now_ms: u64) -> Option<Gesture> {
        self.taps.poll(now_ms, &self.config).map(Gesture::from)
    }

    /// Drops all tracking state, including a tap waiting for confirmation.
    pub fn reset(&mut self) {
        self.drag.end();
        self.taps.reset();
        self.pinch.end();
        self.dragging = false;
    }

    fn move_primary(&mut self, pos: Point, time: u64, out: &mut Gestures) {
        if !self.drag.is_dragging() {
            return;
        }
        self.taps.on_move(pos, &self.config);
        if !self.dragging {
            let travelled = self.drag.total_offset(pos).map_or(0.0, Vec2::hypot);
            if travelled <= self.config.touch_slop {
                self.drag.record(pos, time);
                return;
            }
            self.dragging = true;
            self.taps.cancel_press();
        }
        if let Some(delta) = self.drag.update(pos, time) {
            out.push(Gesture::Drag { delta, pos });
        }
    }

    fn lift(&mut self, pointers: &[Point], time: u64, out: &mut Gestures) {
        let Some((&lifted, remaining)) = pointers.split_last() else {
            return;
        };
        if self.pinch.is_active() {
            self.pinch.end();
            out.push(Gesture::PinchEnd);
            match remaining {
                [] => self.finish_primary(lifted, time, out),
                [pos] => {
                    // The remaining pointer keeps panning right away.
                    self.drag.start(*pos, time);
                    self.dragging = true;
                }
                [a, b, ..] => {
                    let focus = self.pinch.begin(*a, *b);
                    out.push(Gesture::PinchBegin { focus });
                }
            }
            return;
        }
        if remaining.is_empty() {
            self.finish_primary(lifted, time, out);
        }
    }

    fn finish_primary(&mut self, pos: Point, time: u64, out: &mut Gestures) {
        if self.dragging {
            self.drag.record(pos, time);
            let velocity = self.drag.release_velocity(self.config.velocity_window_ms);
            let speed = velocity.hypot();
            if speed >= self.config.min_fling_velocity {
                let velocity = if speed > self.config.max_fling_velocity {
                    velocity * (self.config.max_fling_velocity / speed)
                } else {
                    velocity
                };
                tracing::trace!(?velocity, "fling");
                out.push(Gesture::Fling { velocity });
            } else {
                out.push(Gesture::Release { pos });
            }
        } else {
            self.taps.on_up(pos, time, &self.config);
            out.push(Gesture::Release { pos });
        }
        self.drag.end();
        self.dragging = false;
    }
}
