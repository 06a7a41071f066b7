// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adaptive grid level selection.
//!
//! At any scale the grid shows between one and [`MAX_GRID_LEVELS`] spacings
//! from a [`GridLevelTable`]:
//!
//! - The finest visible table entry is always shown.
//! - A coarser visible entry is added when its spacing is an exact multiple of
//!   the finest shown spacing and at least three times the previously shown
//!   spacing. Entries failing either test are skipped.
//!
//! Because thresholds are monotonic, the shown set only changes when the
//! finest visible entry changes. [`GridLevelSelector`] exploits that and
//! only rescans the table at threshold crossings.

use smallvec::SmallVec;

use crate::levels::GridLevelTable;
use crate::units::LengthUnit;

/// The most grid levels shown at once.
pub const MAX_GRID_LEVELS: usize = 3;

/// A grid spacing that is currently shown.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveGridLine {
    /// Index of the entry in the [`GridLevelTable`].
    pub source_index: usize,
    /// Spacing in the table's natural unit (cm or inch).
    pub spacing: u32,
    /// Spacing in centimeters.
    pub spacing_cm: f64,
    /// Spacing in device pixels at the current scale.
    pub spacing_px: f64,
}

/// Shown grid levels, finest first.
pub type ActiveGridLines = SmallVec<[ActiveGridLine; MAX_GRID_LEVELS]>;

/// Selects the grid levels to show at `scale` with a full table scan.
#[must_use]
pub fn select_levels(table: &GridLevelTable, scale: f64) -> ActiveGridLines {
    let mut out = ActiveGridLines::new();
    scan(table, scale, 0, &mut out);
    out
}

fn scan(table: &GridLevelTable, scale: f64, start: usize, out: &mut ActiveGridLines) {
    out.clear();
    let unit = table.unit();
    let mut finest: Option<u32> = None;
    let mut last = 0_u32;
    for (source_index, level) in table.levels().iter().enumerate().skip(start) {
        if level.min_scale > scale {
            continue;
        }
        match finest {
            Some(finest) => {
                if level.spacing % finest != 0 {
                    continue;
                }
                if u64::from(level.spacing) < 3 * u64::from(last) {
                    continue;
                }
            }
            None => finest = Some(level.spacing),
        }
        last = level.spacing;
        let spacing_cm = unit.natural_to_cm(f64::from(level.spacing));
        out.push(ActiveGridLine {
            source_index,
            spacing: level.spacing,
            spacing_cm,
            spacing_px: scale * spacing_cm,
        });
        if out.len() == MAX_GRID_LEVELS {
            break;
        }
    }
}

/// Keeps the shown grid levels up to date as the scale changes.
#[derive(Clone, Debug)]
pub struct GridLevelSelector {
    table: GridLevelTable,
    active: ActiveGridLines,
    scale: f64,
}

impl GridLevelSelector {
    /// Creates a selector with nothing selected yet.
    #[must_use]
    pub fn new(table: GridLevelTable) -> Self {
        Self {
            table,
            active: ActiveGridLines::new(),
            scale: 0.0,
        }
    }

    /// The table levels are drawn from.
    #[must_use]
    pub fn table(&self) -> &GridLevelTable {
        &self.table
    }

    /// The unit system of the table.
    #[must_use]
    pub fn unit(&self) -> LengthUnit {
        self.table.unit()
    }

    /// Replaces the table and drops the current selection.
    pub fn set_table(&mut self, table: GridLevelTable) {
        self.table = table;
        self.active.clear();
    }

    /// Updates the selection for `scale` and returns it, finest first.
    pub fn select(&mut self, scale: f64) -> &[ActiveGridLine] {
        let mut start = 0;
        let mut reuse = false;
        if let Some(first) = self.active.first() {
            let index = first.source_index;
            if self.table.is_visible(index, scale) {
                // Reusable unless a finer entry became visible too.
                reuse = index == 0 || !self.table.is_visible(index - 1, scale);
            } else {
                start = index + 1;
            }
        }

        if reuse {
            for line in &mut self.active {
                line.spacing_px = scale * line.spacing_cm;
            }
        } else {
            let previous = self.active.first().map(|line| line.spacing);
            scan(&self.table, scale, start, &mut self.active);
            let finest = self.active.first().map(|line| line.spacing);
            if previous.is_some() && previous != finest {
                tracing::debug!(?previous, ?finest, scale, "grid level threshold crossed");
            }
        }
        self.scale = scale;
        &self.active
    }

    /// The current selection, finest first.
    #[must_use]
    pub fn active(&self) -> &[ActiveGridLine] {
        &self.active
    }

    /// The scale of the last [`GridLevelSelector::select`] call.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn spacings(lines: &[ActiveGridLine]) -> Vec<u32> {
        lines.iter().map(|l| l.spacing).collect()
    }

    // 0.5 cm at 40 px/cm.
    const SHORTEST: f64 = 20.0;

    #[test]
    fn metric_selection_skips_near_duplicates() {
        let table = GridLevelTable::metric(SHORTEST).unwrap();
        // 10 cm needs 2 px/cm.
        let lines = select_levels(&table, 2.0);
        assert_eq!(spacings(&lines), [10, 50, 200]);
        assert_eq!(lines[0].spacing_px, 20.0);
        assert_eq!(lines[2].spacing_px, 400.0);
    }

    #[test]
    fn imperial_accepts_exact_triple() {
        let table = GridLevelTable::imperial(SHORTEST).unwrap();
        // 12 in = 30.48 cm is visible, 5 in is not.
        let lines = select_levels(&table, 0.7);
        assert_eq!(spacings(&lines), [12, 36, 180]);
        assert!((lines[0].spacing_cm - 30.48).abs() < 1e-12);
    }

    #[test]
    fn selection_at_far_zoom_runs_out_of_levels() {
        let table = GridLevelTable::metric(SHORTEST).unwrap();
        let lines = select_levels(&table, SHORTEST / 500_000.0);
        assert_eq!(spacings(&lines), [500_000]);
        assert!(select_levels(&table, 1e-9).is_empty());
    }

    #[test]
    fn incremental_selection_matches_full_scan() {
        let table = GridLevelTable::metric(SHORTEST).unwrap();
        let mut selector = GridLevelSelector::new(table.clone());
        let mut scale = 4.0;
        for _ in 0..200 {
            let incremental = ActiveGridLines::from_slice(selector.select(scale));
            assert_eq!(incremental, select_levels(&table, scale), "scale {scale}");
            scale *= 0.95;
        }
        for _ in 0..200 {
            scale *= 1.07;
            let incremental = ActiveGridLines::from_slice(selector.select(scale));
            assert_eq!(incremental, select_levels(&table, scale), "scale {scale}");
        }
    }

    #[test]
    fn reuse_only_rescales_pixels() {
        let table = GridLevelTable::metric(SHORTEST).unwrap();
        let mut selector = GridLevelSelector::new(table);
        selector.select(2.0);
        let lines = selector.select(3.0);
        assert_eq!(spacings(lines), [10, 50, 200]);
        assert_eq!(lines[0].spacing_px, 30.0);
        assert_eq!(selector.scale(), 3.0);
    }

    #[test]
    fn changing_table_drops_selection() {
        let mut selector = GridLevelSelector::new(GridLevelTable::metric(SHORTEST).unwrap());
        selector.select(2.0);
        selector.set_table(GridLevelTable::imperial(SHORTEST).unwrap());
        assert!(selector.active().is_empty());
        assert_eq!(selector.unit(), LengthUnit::Imperial);
        assert_eq!(spacings(selector.select(0.7)), [12, 36, 180]);
    }
}
