// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Length units and human-readable distances.

use alloc::format;
use alloc::string::String;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `round`

/// Centimeters per inch.
pub const INCH_TO_CM: f64 = 2.54;

const CM_IN_METER: i64 = 100;
const CM_IN_KILOMETER: i64 = 100_000;
const CM_IN_FEET: f64 = 30.48;
const CM_IN_YARD: f64 = 91.44;
const CM_IN_MILE: f64 = 160_934.0;

/// The unit system the grid is laid out and labeled in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LengthUnit {
    /// Centimeters, meters and kilometers.
    #[default]
    Metric,
    /// Feet, yards and miles. Grid spacings are tabulated in inches.
    Imperial,
}

impl LengthUnit {
    /// Converts a spacing in this unit system's natural unit (cm or inch) to centimeters.
    #[must_use]
    pub fn natural_to_cm(self, natural: f64) -> f64 {
        match self {
            Self::Metric => natural,
            Self::Imperial => natural * INCH_TO_CM,
        }
    }
}

/// A unit name that appears in grid labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnitName {
    /// `cm`
    Centimeter,
    /// `m`
    Meter,
    /// `km`
    Kilometer,
    /// `ft`
    Foot,
    /// `yd`
    Yard,
    /// `mi`
    Mile,
}

/// Localized lookup of unit names.
///
/// The grid only ever asks for the six names in [`UnitName`]; hosts with a
/// string table implement this trait on top of it.
pub trait UnitNames {
    /// Returns the display name of `unit`.
    fn unit_name(&self, unit: UnitName) -> &str;
}

/// The built-in English abbreviations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EnglishUnitNames;

impl UnitNames for EnglishUnitNames {
    fn unit_name(&self, unit: UnitName) -> &str {
        match unit {
            UnitName::Centimeter => "cm",
            UnitName::Meter => "m",
            UnitName::Kilometer => "km",
            UnitName::Foot => "ft",
            UnitName::Yard => "yd",
            UnitName::Mile => "mi",
        }
    }
}

/// Formats a signed real-world distance for a grid label.
///
/// Metric distances are shown in the largest unit they reach, with the
/// quotient truncated toward zero (`99999` cm is `"999 m"`). Imperial
/// distances are converted to feet, yards or miles and rounded half away
/// from zero.
///
/// ```
/// use floorgrid_grid::{EnglishUnitNames, LengthUnit, format_distance};
///
/// assert_eq!(format_distance(250, LengthUnit::Metric, &EnglishUnitNames), "2 m");
/// assert_eq!(format_distance(-60, LengthUnit::Imperial, &EnglishUnitNames), "-2 ft");
/// ```
#[must_use]
pub fn format_distance(distance_cm: i64, unit: LengthUnit, names: &dyn UnitNames) -> String {
    match unit {
        LengthUnit::Metric => format_metric(distance_cm, names),
        LengthUnit::Imperial => format_imperial(distance_cm as f64, names),
    }
}

/// Formats a distance that need not be a whole number of centimeters.
///
/// Imperial grid lines sit at fractional centimeters, so the unit is picked
/// from the exact value: the 1 yard line (91.44 cm) reads `"1 yd"`, not the
/// `"3 ft"` that `format_distance(91, ..)` gives. Metric values are rounded
/// to whole centimeters first.
///
/// ```
/// use floorgrid_grid::{EnglishUnitNames, LengthUnit, format_length};
///
/// assert_eq!(format_length(91.44, LengthUnit::Imperial, &EnglishUnitNames), "1 yd");
/// assert_eq!(format_length(150.0, LengthUnit::Metric, &EnglishUnitNames), "1 m");
/// ```
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "grid label distances are far inside i64 range"
)]
pub fn format_length(distance_cm: f64, unit: LengthUnit, names: &dyn UnitNames) -> String {
    match unit {
        LengthUnit::Metric => format_metric(distance_cm.round() as i64, names),
        LengthUnit::Imperial => format_imperial(distance_cm, names),
    }
}

fn format_metric(distance_cm: i64, names: &dyn UnitNames) -> String {
    if distance_cm == 0 {
        return format!("0 {}", names.unit_name(UnitName::Meter));
    }
    let abs = distance_cm.unsigned_abs();
    if abs < CM_IN_METER.unsigned_abs() {
        format!("{distance_cm} {}", names.unit_name(UnitName::Centimeter))
    } else if abs < CM_IN_KILOMETER.unsigned_abs() {
        format!(
            "{} {}",
            distance_cm / CM_IN_METER,
            names.unit_name(UnitName::Meter)
        )
    } else {
        format!(
            "{} {}",
            distance_cm / CM_IN_KILOMETER,
            names.unit_name(UnitName::Kilometer)
        )
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "rounded label values are far inside i64 range"
)]
fn format_imperial(d: f64, names: &dyn UnitNames) -> String {
    if d == 0.0 {
        return format!("0 {}", names.unit_name(UnitName::Yard));
    }
    let abs = d.abs();
    let (value, name) = if abs < CM_IN_YARD {
        (d / CM_IN_FEET, UnitName::Foot)
    } else if abs < CM_IN_MILE {
        (d / CM_IN_YARD, UnitName::Yard)
    } else {
        (d / CM_IN_MILE, UnitName::Mile)
    };
    format!("{} {}", value.round() as i64, names.unit_name(name))
}
