// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floorgrid Anim: wall-clock driven animation primitives.
//!
//! - [`AnimatedValue`]: a scalar moving from a start value by a delta over a
//!   fixed duration, shaped by an [`Easing`] curve.
//! - [`Fling`]: a 2D offset decelerating from a release velocity to rest.
//!
//! Both are sampled with the current time in milliseconds. The value is a
//! pure function of that time and the stored start time, so a host that
//! skips frames still lands on the right value, and sampling the same time
//! twice changes nothing. Aborting simply marks the animation finished.
//!
//! ```rust
//! use floorgrid_anim::{Easing, Fling, FlingConfig};
//! use kurbo::Vec2;
//!
//! let mut fling = Fling::new();
//! fling.start(0, Vec2::new(800.0, 0.0), &FlingConfig::default());
//! let early = fling.sample(100).unwrap();
//! let later = fling.sample(200).unwrap();
//! assert!(later.x > early.x);
//! assert!(Easing::DECELERATE.apply(0.25) > 0.25);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod easing;
pub mod fling;
mod value;

pub use easing::Easing;
pub use fling::{Fling, FlingConfig};
pub use value::AnimatedValue;
