// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floorgrid View: the grid's world-to-screen mapping.
//!
//! This crate provides small, headless models of a pannable, zoomable view
//! over a world plane measured in centimeters, with view extents expressed in
//! device pixels. It focuses on:
//! - [`ViewTransform`]: a uniform scale + translation that is only ever
//!   post-composed (zoom about a point, translate), never replaced.
//! - [`ZoomLimits`]: the allowed scale range, optionally derived from
//!   "screen centimeter to world centimeter" zoom ratios.
//! - [`Viewport`]: view size + transform + limits, with coordinate conversion
//!   and limit-respecting zoom.
//!
//! It does **not** interpret pointer input or run animations. Callers are
//! expected to:
//! - Recognize gestures at a higher layer and translate them into
//!   [`Viewport::pan_by_view`] / [`Viewport::zoom_about_view_point`].
//! - Re-apply animation snapshots through [`Viewport::set_transform`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use floorgrid_view::{Viewport, ZoomLimits};
//!
//! let limits = ZoomLimits::new(0.2, 50.0).unwrap();
//! let mut view = Viewport::new(Size::new(800.0, 600.0), limits, 1.0);
//! view.center_on(Point::ZERO);
//!
//! // Zoom in 2x around a pointer position.
//! assert!(view.zoom_about_view_point(Point::new(100.0, 100.0), 2.0));
//!
//! // Rejected: would leave the zoom limits.
//! assert!(!view.zoom_about_view_point(Point::new(100.0, 100.0), 100.0));
//!
//! let world = view.view_to_world_point(Point::new(100.0, 100.0));
//! let back = view.world_to_view_point(world);
//! assert!((back.x - 100.0).abs() < 1e-9);
//! ```
//!
//! ## Design notes
//!
//! - Transforms are axis-aligned with a **uniform** scale; rotation is never
//!   represented in the grid transform.
//! - A non-positive or non-finite scale is a precondition violation. It is
//!   asserted in debug builds and the offending operation is dropped in
//!   release builds.
//!
//! This crate is `no_std`.

#![no_std]

mod limits;
mod transform;
mod viewport;

pub use limits::{ZoomLimits, scale_for_zoom_ratio};
pub use transform::{ViewTransform, is_valid_scale};
pub use viewport::{Viewport, ViewportDebugInfo};
