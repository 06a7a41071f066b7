// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Which grid level carries distance labels.

use smallvec::SmallVec;

use crate::selector::{ActiveGridLine, MAX_GRID_LEVELS};

/// How densely a grid level is labeled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LabelDensity {
    /// No labels.
    #[default]
    None,
    /// A label at every line crossing.
    Every,
    /// A label at every second line, on even multiples of the spacing.
    EveryOther,
}

impl LabelDensity {
    /// Line index stride between labels, or `None` when unlabeled.
    #[must_use]
    pub fn stride(self) -> Option<i64> {
        match self {
            Self::None => None,
            Self::Every => Some(1),
            Self::EveryOther => Some(2),
        }
    }
}

/// Decides the label density of every shown level.
///
/// Levels are considered finest first. The first level whose spacing reaches
/// `min_label_spacing_px` is labeled at every line; failing that, a level
/// whose doubled spacing reaches it is labeled at every other line. Once a
/// level is labeled, all coarser levels stay unlabeled.
#[must_use]
pub fn label_plan(
    lines: &[ActiveGridLine],
    min_label_spacing_px: f64,
) -> SmallVec<[LabelDensity; MAX_GRID_LEVELS]> {
    let mut labeled = false;
    lines
        .iter()
        .map(|line| {
            if labeled {
                return LabelDensity::None;
            }
            let density = if line.spacing_px >= min_label_spacing_px {
                LabelDensity::Every
            } else if line.spacing_px * 2.0 >= min_label_spacing_px {
                LabelDensity::EveryOther
            } else {
                LabelDensity::None
            };
            labeled = density != LabelDensity::None;
            density
        })
        .collect()
}
