// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Candidate grid spacings and the scales at which they become visible.

use alloc::vec::Vec;
use core::fmt;

use crate::units::LengthUnit;

/// Metric grid spacings in centimeters, finest first.
pub const METRIC_SPACINGS_CM: [u32; 16] = [
    10, 20, 50, 100, 200, 500, 1_000, 2_000, 5_000, 10_000, 20_000, 50_000, 100_000, 200_000,
    500_000, 1_000_000,
];

/// Imperial grid spacings in inches, finest first.
///
/// 5 in, 1 ft, 1 yd, 2 yd, 5 yd, 10 yd, 20 yd, 50 yd, 100 yd, 200 yd,
/// 500 yd, 1000 yd, 1 mi, 2 mi, 5 mi.
pub const IMPERIAL_SPACINGS_IN: [u32; 15] = [
    5, 12, 36, 72, 180, 360, 720, 1_800, 3_600, 7_200, 18_000, 36_000, 63_360, 126_720, 316_800,
];

/// One candidate grid spacing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLevelSpec {
    /// Spacing in the table's natural unit (cm or inch).
    pub spacing: u32,
    /// The smallest grid scale (device pixels per cm) at which this spacing is drawn.
    pub min_scale: f64,
}

/// Why a [`GridLevelTable`] was rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GridTableError {
    /// The table has no entries.
    Empty,
    /// The entry at `index` has a zero spacing.
    ZeroSpacing {
        /// Offending entry.
        index: usize,
    },
    /// The entry at `index` is not coarser than its predecessor.
    SpacingNotIncreasing {
        /// Offending entry.
        index: usize,
    },
    /// The entry at `index` has a non-positive or non-finite threshold.
    InvalidThreshold {
        /// Offending entry.
        index: usize,
    },
    /// The entry at `index` becomes visible at a larger scale than its finer predecessor.
    ThresholdNotMonotonic {
        /// Offending entry.
        index: usize,
    },
}

impl fmt::Display for GridTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid level table is empty"),
            Self::ZeroSpacing { index } => write!(f, "grid level {index} has zero spacing"),
            Self::SpacingNotIncreasing { index } => {
                write!(
                    f,
                    "grid level {index} is not coarser than level {}",
                    index.saturating_sub(1)
                )
            }
            Self::InvalidThreshold { index } => {
                write!(f, "grid level {index} has a non-positive or non-finite threshold")
            }
            Self::ThresholdNotMonotonic { index } => write!(
                f,
                "grid level {index} needs a larger scale than the finer level {}",
                index.saturating_sub(1)
            ),
        }
    }
}

impl core::error::Error for GridTableError {}

/// An ordered, validated table of grid spacings for one unit system.
///
/// Entries are sorted finest first. Spacings strictly increase and
/// thresholds never increase, so once an entry is visible every coarser
/// entry is too.
#[derive(Clone, Debug, PartialEq)]
pub struct GridLevelTable {
    unit: LengthUnit,
    levels: Vec<GridLevelSpec>,
}

impl GridLevelTable {
    /// Validates and wraps a table.
    pub fn new(unit: LengthUnit, levels: Vec<GridLevelSpec>) -> Result<Self, GridTableError> {
        if levels.is_empty() {
            return Err(GridTableError::Empty);
        }
        for (index, level) in levels.iter().enumerate() {
            if level.spacing == 0 {
                return Err(GridTableError::ZeroSpacing { index });
            }
            if !(level.min_scale.is_finite() && level.min_scale > 0.0) {
                return Err(GridTableError::InvalidThreshold { index });
            }
            if let Some(prev) = index.checked_sub(1).and_then(|i| levels.get(i)) {
                if level.spacing <= prev.spacing {
                    return Err(GridTableError::SpacingNotIncreasing { index });
                }
                if level.min_scale > prev.min_scale {
                    return Err(GridTableError::ThresholdNotMonotonic { index });
                }
            }
        }
        Ok(Self { unit, levels })
    }

    /// Builds a table whose thresholds keep every drawn square at least
    /// `shortest_square_px` device pixels wide.
    pub fn from_spacings(
        unit: LengthUnit,
        spacings: &[u32],
        shortest_square_px: f64,
    ) -> Result<Self, GridTableError> {
        let levels = spacings
            .iter()
            .map(|&spacing| GridLevelSpec {
                spacing,
                min_scale: shortest_square_px / unit.natural_to_cm(f64::from(spacing)),
            })
            .collect();
        Self::new(unit, levels)
    }

    /// The built-in metric table.
    pub fn metric(shortest_square_px: f64) -> Result<Self, GridTableError> {
        Self::from_spacings(LengthUnit::Metric, &METRIC_SPACINGS_CM, shortest_square_px)
    }

    /// The built-in imperial table.
    pub fn imperial(shortest_square_px: f64) -> Result<Self, GridTableError> {
        Self::from_spacings(LengthUnit::Imperial, &IMPERIAL_SPACINGS_IN, shortest_square_px)
    }

    /// The built-in table for `unit`.
    pub fn for_unit(unit: LengthUnit, shortest_square_px: f64) -> Result<Self, GridTableError> {
        match unit {
            LengthUnit::Metric => Self::metric(shortest_square_px),
            LengthUnit::Imperial => Self::imperial(shortest_square_px),
        }
    }

    /// The unit system of the spacings.
    #[must_use]
    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// All entries, finest first.
    #[must_use]
    pub fn levels(&self) -> &[GridLevelSpec] {
        &self.levels
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always `false`; tables are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Returns the entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&GridLevelSpec> {
        self.levels.get(index)
    }

    /// Returns the spacing of entry `index` in centimeters.
    #[must_use]
    pub fn spacing_cm(&self, index: usize) -> Option<f64> {
        self.get(index)
            .map(|level| self.unit.natural_to_cm(f64::from(level.spacing)))
    }

    /// Returns `true` if entry `index` is visible at `scale`.
    #[must_use]
    pub fn is_visible(&self, index: usize, scale: f64) -> bool {
        self.get(index).is_some_and(|level| level.min_scale <= scale)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn builtin_tables_are_valid() {
        let metric = GridLevelTable::metric(20.0).unwrap();
        assert_eq!(metric.len(), 16);
        assert_eq!(metric.unit(), LengthUnit::Metric);
        // 20 px / 10 cm
        assert_eq!(metric.levels()[0].min_scale, 2.0);

        let imperial = GridLevelTable::imperial(20.0).unwrap();
        assert_eq!(imperial.len(), 15);
        assert!((imperial.spacing_cm(1).unwrap() - 30.48).abs() < 1e-12);
    }

    #[test]
    fn visibility_follows_threshold() {
        let table = GridLevelTable::metric(20.0).unwrap();
        assert!(!table.is_visible(0, 1.9));
        assert!(table.is_visible(0, 2.0));
        assert!(table.is_visible(1, 1.0));
        assert!(!table.is_visible(99, 1_000.0));
    }

    #[test]
    fn rejects_bad_tables() {
        assert_eq!(
            GridLevelTable::new(LengthUnit::Metric, vec![]),
            Err(GridTableError::Empty)
        );
        assert_eq!(
            GridLevelTable::from_spacings(LengthUnit::Metric, &[10, 0], 5.0),
            Err(GridTableError::ZeroSpacing { index: 1 })
        );
        assert_eq!(
            GridLevelTable::from_spacings(LengthUnit::Metric, &[10, 50, 20], 5.0),
            Err(GridTableError::SpacingNotIncreasing { index: 2 })
        );
        assert_eq!(
            GridLevelTable::metric(0.0),
            Err(GridTableError::InvalidThreshold { index: 0 })
        );
        let inverted = vec![
            GridLevelSpec {
                spacing: 10,
                min_scale: 1.0,
            },
            GridLevelSpec {
                spacing: 20,
                min_scale: 2.0,
            },
        ];
        assert_eq!(
            GridLevelTable::new(LengthUnit::Metric, inverted),
            Err(GridTableError::ThresholdNotMonotonic { index: 1 })
        );
    }

    #[test]
    fn errors_describe_the_entry() {
        let err = GridTableError::SpacingNotIncreasing { index: 3 };
        assert_eq!(alloc::format!("{err}"), "grid level 3 is not coarser than level 2");
    }
}
