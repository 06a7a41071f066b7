// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use floorgrid_anim::FlingConfig;
use floorgrid_event_state::GestureConfig;
use floorgrid_grid::{
    DEFAULT_PIXELS_PER_CM, GridStyle, GridTableError, LABEL_TEXT_SIZE, LengthUnit,
    MAX_GRID_LEVELS,
};
use floorgrid_view::{ZoomLimits, scale_for_zoom_ratio};

/// Engine construction parameters.
///
/// Zoom ratios describe how many real-world centimeters one centimeter of
/// screen shows: a smaller ratio is a closer zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Physical resolution of the display in device pixels per centimeter.
    pub pixels_per_cm: f64,
    /// Display density factor applied to label text.
    pub display_density: f64,
    /// Zoom ratio at startup.
    pub initial_zoom_ratio: f64,
    /// Closest allowed zoom ratio (maximum scale).
    pub closest_zoom_ratio: f64,
    /// Farthest allowed zoom ratio (minimum scale).
    pub farthest_zoom_ratio: f64,
    /// Grid squares narrower than this many screen centimeters are not drawn.
    pub shortest_grid_square_cm: f64,
    /// Labels closer than this many screen centimeters are thinned out.
    pub min_label_spacing_cm: f64,
    /// Stroke width per shown grid level, finest first.
    pub line_widths: [f64; MAX_GRID_LEVELS],
    /// Unit system at startup.
    pub length_unit: LengthUnit,
    /// Scale multiplier of a double-tap zoom.
    pub double_tap_zoom_factor: f64,
    /// Double taps only zoom while the scale is below this fraction of the maximum.
    pub double_tap_zoom_ceiling: f64,
    /// Duration of animated zooms.
    pub zoom_duration_ms: u64,
    /// Duration of floor plan rotations.
    pub rotation_duration_ms: u64,
    /// Frames keep being requested this long after the engine is first shown.
    pub fade_window_ms: u64,
    /// Gesture recognition thresholds.
    pub gestures: GestureConfig,
    /// Fling deceleration.
    pub fling: FlingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pixels_per_cm: DEFAULT_PIXELS_PER_CM,
            display_density: 1.0,
            initial_zoom_ratio: 200.0,
            closest_zoom_ratio: 20.0,
            farthest_zoom_ratio: 5_000.0,
            shortest_grid_square_cm: 0.5,
            min_label_spacing_cm: 4.0,
            line_widths: [0.0, 1.0, 1.0],
            length_unit: LengthUnit::Metric,
            double_tap_zoom_factor: 2.0,
            double_tap_zoom_ceiling: 0.9,
            zoom_duration_ms: 500,
            rotation_duration_ms: 1_000,
            fade_window_ms: 7_500,
            gestures: GestureConfig::default(),
            fling: FlingConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Checks the configuration for values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.pixels_per_cm) {
            return Err(ConfigError::InvalidPixelsPerCm(self.pixels_per_cm));
        }
        if !is_positive(self.display_density) {
            return Err(ConfigError::InvalidDisplayDensity(self.display_density));
        }
        if !is_positive(self.closest_zoom_ratio)
            || !is_positive(self.farthest_zoom_ratio)
            || self.closest_zoom_ratio > self.farthest_zoom_ratio
        {
            return Err(ConfigError::InvalidZoomRatios {
                closest: self.closest_zoom_ratio,
                farthest: self.farthest_zoom_ratio,
            });
        }
        if !is_positive(self.initial_zoom_ratio)
            || self.initial_zoom_ratio < self.closest_zoom_ratio
            || self.initial_zoom_ratio > self.farthest_zoom_ratio
        {
            return Err(ConfigError::InitialZoomOutOfRange(self.initial_zoom_ratio));
        }
        if !is_positive(self.shortest_grid_square_cm) {
            return Err(ConfigError::InvalidGridSquare(self.shortest_grid_square_cm));
        }
        if !is_positive(self.double_tap_zoom_factor) {
            return Err(ConfigError::InvalidZoomFactor(self.double_tap_zoom_factor));
        }
        Ok(())
    }

    /// Scale limits derived from the zoom ratios.
    pub fn zoom_limits(&self) -> Result<ZoomLimits, ConfigError> {
        ZoomLimits::from_zoom_ratios(
            self.pixels_per_cm,
            self.closest_zoom_ratio,
            self.farthest_zoom_ratio,
        )
        .ok_or(ConfigError::InvalidZoomRatios {
            closest: self.closest_zoom_ratio,
            farthest: self.farthest_zoom_ratio,
        })
    }

    /// Grid scale at startup.
    #[must_use]
    pub fn initial_scale(&self) -> f64 {
        scale_for_zoom_ratio(self.pixels_per_cm, self.initial_zoom_ratio)
    }

    /// Width of the narrowest drawn grid square in device pixels.
    #[must_use]
    pub fn shortest_grid_square_px(&self) -> f64 {
        self.shortest_grid_square_cm * self.pixels_per_cm
    }

    /// Grid drawing style for this display.
    #[must_use]
    pub fn grid_style(&self) -> GridStyle {
        GridStyle {
            line_widths: self.line_widths,
            min_label_spacing_px: self.min_label_spacing_cm * self.pixels_per_cm,
            label_text_size: LABEL_TEXT_SIZE * self.display_density,
        }
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Why an [`EngineConfig`] was rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// The display resolution is not strictly positive and finite.
    InvalidPixelsPerCm(f64),
    /// The display density is not strictly positive and finite.
    InvalidDisplayDensity(f64),
    /// The zoom ratios are non-positive or inverted.
    InvalidZoomRatios {
        /// Closest zoom ratio.
        closest: f64,
        /// Farthest zoom ratio.
        farthest: f64,
    },
    /// The initial zoom ratio lies outside the allowed ratios.
    InitialZoomOutOfRange(f64),
    /// The shortest grid square is not strictly positive and finite.
    InvalidGridSquare(f64),
    /// The double-tap zoom factor is not strictly positive and finite.
    InvalidZoomFactor(f64),
    /// A grid level table is malformed.
    GridTable(GridTableError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPixelsPerCm(v) => write!(f, "invalid display resolution {v} px/cm"),
            Self::InvalidDisplayDensity(v) => write!(f, "invalid display density {v}"),
            Self::InvalidZoomRatios { closest, farthest } => {
                write!(f, "invalid zoom ratios: closest {closest}, farthest {farthest}")
            }
            Self::InitialZoomOutOfRange(v) => {
                write!(f, "initial zoom ratio {v} is outside the allowed ratios")
            }
            Self::InvalidGridSquare(v) => write!(f, "invalid shortest grid square {v} cm"),
            Self::InvalidZoomFactor(v) => write!(f, "invalid double-tap zoom factor {v}"),
            Self::GridTable(err) => write!(f, "invalid grid table: {err}"),
        }
    }
}

impl core::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::GridTable(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GridTableError> for ConfigError {
    fn from(err: GridTableError) -> Self {
        Self::GridTable(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.validate(), Ok(()));
        let limits = config.zoom_limits().unwrap();
        assert!(limits.contains(config.initial_scale()));
        assert!((limits.max_scale() / limits.min_scale() - 250.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_inverted_ratios() {
        let config = EngineConfig {
            closest_zoom_ratio: 6_000.0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidZoomRatios { .. })
        ));
    }

    #[test]
    fn rejects_initial_zoom_outside_limits() {
        let config = EngineConfig {
            initial_zoom_ratio: 10.0,
            ..EngineConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InitialZoomOutOfRange(10.0))
        );
    }

    #[test]
    fn rejects_non_finite_resolution() {
        let config = EngineConfig {
            pixels_per_cm: f64::NAN,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPixelsPerCm(_))
        ));
    }

    #[test]
    fn grid_table_errors_keep_their_source() {
        use core::error::Error as _;

        let err = ConfigError::from(GridTableError::Empty);
        assert!(err.source().is_some());
        assert_eq!(
            alloc::format!("{err}"),
            "invalid grid table: grid level table is empty"
        );
    }

    #[test]
    fn style_follows_display() {
        let config = EngineConfig {
            pixels_per_cm: 50.0,
            display_density: 2.0,
            ..EngineConfig::default()
        };
        let style = config.grid_style();
        assert_eq!(style.min_label_spacing_px, 200.0);
        assert_eq!(style.label_text_size, 20.0);
        assert_eq!(config.shortest_grid_square_px(), 25.0);
    }
}
