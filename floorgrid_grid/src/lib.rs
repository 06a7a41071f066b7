// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floorgrid Grid: an adaptive reference grid measured in real-world units.
//!
//! The grid shows one to three spacings at once, picked from a fixed table so
//! that lines are never crowded and coarse lines always coincide with fine
//! ones. The pieces are:
//!
//! - [`GridLevelTable`]: validated metric or imperial spacing tables, each
//!   entry with the grid scale (device pixels per cm) at which it appears.
//! - [`GridLevelSelector`]: picks the shown levels for a scale, rescanning the
//!   table only when a threshold is crossed.
//! - [`label_plan`]: decides which single level carries distance labels.
//! - [`format_distance`]: renders a distance in cm as `"3 m"`, `"20 yd"`, etc.
//!   through a pluggable [`UnitNames`] lookup.
//! - [`draw_grid`]: draws lines and labels into any [`GridSurface`].
//!
//! ## Minimal example
//!
//! ```rust
//! use floorgrid_grid::{GridLevelSelector, GridLevelTable};
//!
//! // Never draw grid squares narrower than 20 device pixels.
//! let table = GridLevelTable::metric(20.0).unwrap();
//! let mut selector = GridLevelSelector::new(table);
//!
//! let spacings: Vec<u32> = selector.select(2.0).iter().map(|l| l.spacing).collect();
//! assert_eq!(spacings, [10, 50, 200]);
//!
//! // Zooming out drops the finest level.
//! let spacings: Vec<u32> = selector.select(0.5).iter().map(|l| l.spacing).collect();
//! assert_eq!(spacings, [50, 200, 1000]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod draw;
mod labels;
mod levels;
mod selector;
mod surface;
mod units;

pub use draw::{
    DEFAULT_PIXELS_PER_CM, GridStyle, LABEL_TEXT_SIZE, MIN_LABEL_SPACING_CM, draw_grid,
};
pub use labels::{LabelDensity, label_plan};
pub use levels::{
    GridLevelSpec, GridLevelTable, GridTableError, IMPERIAL_SPACINGS_IN, METRIC_SPACINGS_CM,
};
pub use selector::{
    ActiveGridLine, ActiveGridLines, GridLevelSelector, MAX_GRID_LEVELS, select_levels,
};
pub use surface::{GridSurface, RecordingSurface, SurfaceOp, TextAlign};
pub use units::{
    EnglishUnitNames, INCH_TO_CM, LengthUnit, UnitName, UnitNames, format_distance, format_length,
};
