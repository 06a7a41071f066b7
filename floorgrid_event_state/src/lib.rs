// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floorgrid Event State: gesture recognition for pan/zoom viewports.
//!
//! This crate provides small, focused state machines that turn a raw pointer
//! stream into the gestures a pannable, zoomable view reacts to:
//!
//! - [`drag`]: movement deltas, total offsets and release velocity
//! - [`tap`]: single and double tap recognition with a confirmation window
//! - [`pinch`]: two-pointer span and focus tracking
//! - [`GestureRecognizer`]: all of the above combined behind one
//!   [`PointerEvent`] entry point, producing [`Gesture`]s
//!
//! The crate does not assume any particular windowing system. Hosts convert
//! their native touch or mouse events into [`PointerEvent`]s (positions in
//! device pixels, timestamps in milliseconds) and interpret the resulting
//! gestures themselves.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use floorgrid_event_state::{Gesture, GestureConfig, GestureRecognizer, PointerEvent};
//!
//! let mut recognizer = GestureRecognizer::new(GestureConfig::default());
//!
//! let p = Point::new(40.0, 40.0);
//! recognizer.handle(&PointerEvent::down(p, 0));
//! recognizer.handle(&PointerEvent::up(p, 60));
//!
//! // A second press inside the double-tap window is reported on the press.
//! let out = recognizer.handle(&PointerEvent::down(p, 160));
//! assert_eq!(out[0], Gesture::DoubleTap { pos: p });
//! assert_eq!(out[1], Gesture::Down { pos: p });
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod config;
pub mod drag;
pub mod pinch;
pub mod pointer;
mod recognizer;
pub mod tap;

pub use config::GestureConfig;
pub use pointer::{PointerEvent, PointerPhase};
pub use recognizer::{Gesture, GestureRecognizer, Gestures};
