// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floorgrid: a pannable, zoomable reference grid over a floor plan.
//!
//! [`ViewportEngine`] keeps a physically consistent mapping between device
//! pixels and real-world centimeters while the user drags, pinches, flings
//! and double taps. It ties together the leaf crates:
//!
//! - `floorgrid_view` for the grid transform and zoom limits,
//! - `floorgrid_event_state` for gesture recognition,
//! - `floorgrid_anim` for fling and zoom animations,
//! - `floorgrid_grid` for level selection, labels and drawing.
//!
//! Two [`BindingMode`]s decide what gestures move. In
//! [`BindingMode::GridBound`] they move the grid and the floor plan follows.
//! In [`BindingMode::FloorplanCalibration`] the grid stays put and the floor
//! plan is dragged and scaled under it; every step is read back into
//! [`FloorPlanProperties`] and reported to the floor plan listener.
//!
//! The engine never draws images itself. Hosts draw the floor plan with
//! [`ViewportEngine::floor_plan_transform`] and hand a [`GridSurface`]
//! implementation to [`ViewportEngine::render`] for the grid.
//!
//! ## Frame loop
//!
//! ```rust
//! use floorgrid::{EngineConfig, Layer, ViewportEngine};
//! use floorgrid_grid::RecordingSurface;
//! use kurbo::Size;
//!
//! let mut engine = ViewportEngine::new(EngineConfig::default()).unwrap();
//! engine.set_view_size(Size::new(640.0, 480.0));
//! let redraw = engine.redraw_signal();
//!
//! let mut surface = RecordingSurface::new();
//! let more = engine.on_animation_step(16);
//! engine.render(&mut surface);
//!
//! assert!(more, "the fade window asks for frames after the first one");
//! assert!(redraw.take());
//! assert!(surface.lines().count() > 0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.
//!
//! [`GridSurface`]: floorgrid_grid::GridSurface

#![no_std]

extern crate alloc;

mod animation;
mod config;
mod engine;
mod floorplan;
mod gesture;
mod layer;

pub use config::{ConfigError, EngineConfig};
pub use engine::ViewportEngine;
pub use floorplan::{
    BindingMode, FloorPlanProperties, FloorplanBinding, MAX_TEN_METERS_IN_PIXELS,
    MIN_TEN_METERS_IN_PIXELS,
};
pub use gesture::{AbortPolicy, GestureController, GestureState, GestureTarget};
pub use layer::{Layer, RedrawSignal};
