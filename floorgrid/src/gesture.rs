// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture arbitration: which transform a gesture drives, and when running
//! animations are interrupted.

use floorgrid_event_state::{Gesture, GestureConfig, GestureRecognizer, PointerEvent};
use kurbo::{Point, Vec2};

use crate::floorplan::BindingMode;

/// What the next pointer-down does to a running zoom animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AbortPolicy {
    /// A pointer-down aborts the animation.
    Abort,
    /// The next pointer-down is let through once, then the policy becomes
    /// [`AbortPolicy::Abort`].
    SuppressOnce,
}

/// Interaction state of a [`GestureController`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureState {
    /// No gesture or animation in progress.
    #[default]
    Idle,
    /// A single pointer is panning.
    Dragging,
    /// Two pointers are pinching.
    PinchScaling,
    /// A fling animation is running.
    Flinging,
    /// A zoom animation is running.
    ZoomAnimating {
        /// How the next pointer-down treats the animation.
        abort: AbortPolicy,
    },
}

/// Operations a [`GestureController`] drives.
///
/// Implementors decide the mechanics of each operation; the controller
/// decides which operation a gesture maps to in the current mode. Every
/// method returning `bool` reports whether the gesture was handled.
pub trait GestureTarget {
    /// Returns the current binding mode.
    fn mode(&self) -> BindingMode;

    /// Drags the active transform by `delta` device pixels.
    fn pan_by(&mut self, delta: Vec2) -> bool;

    /// Prepares for a pinch.
    fn pinch_begin(&mut self);

    /// Scales the active transform about `focus`. Out-of-range steps are rejected.
    fn pinch_by(&mut self, factor: f64, focus: Point) -> bool;

    /// Starts a fling with `velocity` in device pixels per second.
    fn fling(&mut self, velocity: Vec2, now_ms: u64) -> bool;

    /// Starts the double-tap zoom about `focus`.
    fn double_tap_zoom(&mut self, focus: Point, now_ms: u64) -> bool;

    /// Handles a confirmed single tap.
    fn single_tap(&mut self, pos: Point) -> bool;

    /// Stops all running animations where they are.
    fn abort_animations(&mut self);

    /// Returns `true` while any transform animation runs.
    fn animations_running(&self) -> bool;
}

/// Routes recognized gestures to a [`GestureTarget`].
#[derive(Clone, Debug, Default)]
pub struct GestureController {
    recognizer: GestureRecognizer,
    state: GestureState,
}

impl GestureController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            recognizer: GestureRecognizer::new(config),
            state: GestureState::Idle,
        }
    }

    /// Returns the interaction state.
    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Returns `true` while a tap waits for the double-tap window to pass.
    #[must_use]
    pub fn has_pending_tap(&self) -> bool {
        self.recognizer.has_pending_tap()
    }

    /// Recognizes gestures in `event` and applies them to `target`.
    ///
    /// Returns `true` if any gesture derived from the event was handled.
    pub fn handle_pointer_event<T: GestureTarget + ?Sized>(
        &mut self,
        event: &PointerEvent,
        target: &mut T,
    ) -> bool {
        let now = event.timestamp_ms;
        let mut handled = false;
        for gesture in self.recognizer.handle(event) {
            handled |= self.apply(gesture, now, target);
        }
        handled
    }

    /// Confirms a single tap whose double-tap window has passed.
    pub fn poll<T: GestureTarget + ?Sized>(&mut self, now_ms: u64, target: &mut T) -> bool {
        match self.recognizer.poll(now_ms) {
            Some(gesture) => self.apply(gesture, now_ms, target),
            None => false,
        }
    }

    /// Marks an animation started outside of gesture handling.
    pub fn animation_started(&mut self) {
        if self.state == GestureState::Idle {
            self.state = GestureState::ZoomAnimating {
                abort: AbortPolicy::Abort,
            };
        }
    }

    /// Returns to [`GestureState::Idle`] once animations have finished.
    pub fn settle(&mut self, animations_running: bool) {
        if !animations_running
            && matches!(
                self.state,
                GestureState::Flinging | GestureState::ZoomAnimating { .. }
            )
        {
            self.state = GestureState::Idle;
        }
    }

    /// Forgets any gesture in progress.
    pub fn reset(&mut self) {
        self.recognizer.reset();
        self.state = GestureState::Idle;
    }

    fn apply<T: GestureTarget + ?Sized>(
        &mut self,
        gesture: Gesture,
        now_ms: u64,
        target: &mut T,
    ) -> bool {
        let mode = target.mode();
        match gesture {
            Gesture::Down { .. } => {
                if let GestureState::ZoomAnimating {
                    abort: AbortPolicy::SuppressOnce,
                } = self.state
                {
                    tracing::trace!("pointer down kept the zoom animation");
                    self.state = GestureState::ZoomAnimating {
                        abort: AbortPolicy::Abort,
                    };
                } else {
                    if target.animations_running() {
                        target.abort_animations();
                    }
                    self.state = GestureState::Idle;
                }
                true
            }
            Gesture::Drag { delta, .. } => {
                self.state = GestureState::Dragging;
                target.pan_by(delta)
            }
            Gesture::PinchBegin { .. } => {
                target.pinch_begin();
                self.state = GestureState::PinchScaling;
                true
            }
            Gesture::Pinch { factor, focus } => {
                let handled = target.pinch_by(factor, focus);
                if !handled {
                    self.recognizer.reject_pinch_step();
                }
                handled
            }
            Gesture::PinchEnd => {
                self.state = GestureState::Dragging;
                true
            }
            Gesture::Fling { velocity } => {
                self.state = if mode == BindingMode::GridBound && target.fling(velocity, now_ms) {
                    GestureState::Flinging
                } else {
                    self.after_release(target)
                };
                true
            }
            Gesture::Release { .. } => {
                self.state = self.after_release(target);
                true
            }
            Gesture::SingleTap { pos } => {
                if mode == BindingMode::FloorplanCalibration {
                    tracing::trace!(?pos, "single tap ignored while calibrating");
                    return false;
                }
                target.single_tap(pos)
            }
            Gesture::DoubleTap { pos } => {
                if mode == BindingMode::FloorplanCalibration {
                    tracing::trace!(?pos, "double tap ignored while calibrating");
                    return false;
                }
                if target.double_tap_zoom(pos, now_ms) {
                    self.state = GestureState::ZoomAnimating {
                        abort: AbortPolicy::SuppressOnce,
                    };
                    true
                } else {
                    false
                }
            }
            Gesture::Cancel => {
                self.state = GestureState::Idle;
                false
            }
        }
    }

    /// State after the last pointer lifted without a fling.
    ///
    /// A zoom started by a double tap may still be running under a drag.
    fn after_release<T: GestureTarget + ?Sized>(&self, target: &T) -> GestureState {
        match self.state {
            GestureState::Flinging | GestureState::Idle => self.state,
            _ if target.animations_running() => GestureState::ZoomAnimating {
                abort: AbortPolicy::Abort,
            },
            _ => GestureState::Idle,
        }
    }
}
