// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::f64::consts::PI;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Easing curve mapping linear progress in `[0, 1]` to eased progress.
///
/// Every curve maps `0` to `0` and `1` to `1`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Easing {
    /// No easing.
    Linear,
    /// Starts fast and slows down towards the end.
    ///
    /// The curve is `1 - (1 - t)^(2 * factor)`. With a factor of `1.0` the
    /// value follows a constant deceleration, which is what fling uses.
    Decelerate {
        /// Strength of the deceleration; `1.0` is quadratic.
        factor: f64,
    },
    /// Starts and ends slowly, fastest in the middle (a cosine half-wave).
    #[default]
    AccelerateDecelerate,
}

impl Easing {
    /// Quadratic deceleration.
    pub const DECELERATE: Self = Self::Decelerate { factor: 1.0 };

    /// Applies the curve to `t`, which is clamped into `[0, 1]` first.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::Decelerate { factor } => {
                let rest = 1.0 - t;
                if factor == 1.0 {
                    1.0 - rest * rest
                } else {
                    1.0 - rest.powf(2.0 * factor)
                }
            }
            Self::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Easing;

    const CURVES: [Easing; 4] = [
        Easing::Linear,
        Easing::DECELERATE,
        Easing::Decelerate { factor: 2.5 },
        Easing::AccelerateDecelerate,
    ];

    #[test]
    fn curves_hit_endpoints() {
        for curve in CURVES {
            assert!(curve.apply(0.0).abs() < 1e-12, "{curve:?} at 0");
            assert!((curve.apply(1.0) - 1.0).abs() < 1e-12, "{curve:?} at 1");
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for curve in CURVES {
            let mut prev = curve.apply(0.0);
            for i in 1..=100 {
                let v = curve.apply(f64::from(i) / 100.0);
                assert!(v >= prev, "{curve:?} decreased at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        assert_eq!(Easing::Linear.apply(-3.0), 0.0);
        assert_eq!(Easing::Linear.apply(7.0), 1.0);
        assert_eq!(Easing::DECELERATE.apply(f64::NAN), 1.0);
    }

    #[test]
    fn decelerate_front_loads_progress() {
        assert!(Easing::DECELERATE.apply(0.5) > 0.5);
        assert!((Easing::AccelerateDecelerate.apply(0.5) - 0.5).abs() < 1e-12);
    }
}
