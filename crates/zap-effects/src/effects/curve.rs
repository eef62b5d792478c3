// effects/curve.rs
//
// Easing curves mapping linear effect progress onto eased progress.
// Pure math, no knowledge of nodes or effects.

use std::f32::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Maps normalized progress in [0, 1] to eased progress.
///
/// Every built-in curve is monotonic and maps 0 to 0 and 1 to 1, so an
/// effect at its boundaries lands exactly on its original or end state.
#[derive(Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Curve {
    /// Identity mapping.
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    SineIn,
    SineOut,
    SineInOut,
    ExpoIn,
    ExpoOut,
    /// Smoothstep: `3t² - 2t³`.
    Smooth,
    /// Caller-supplied mapping. Not representable in configuration files.
    #[serde(skip)]
    Custom(fn(f32) -> f32),
}

impl Curve {
    /// Eased value for progress `t`. Input is clamped to [0, 1].
    #[inline]
    pub fn transform(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Curve::Linear => t,
            Curve::QuadIn => t * t,
            Curve::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Curve::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Curve::CubicIn => t * t * t,
            Curve::CubicOut => 1.0 - (1.0 - t).powi(3),
            Curve::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Curve::SineIn => 1.0 - (t * PI / 2.0).cos(),
            Curve::SineOut => (t * PI / 2.0).sin(),
            Curve::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            // Exact endpoints; the closed forms miss 0 and 1 by ~0.001.
            Curve::ExpoIn => {
                if t == 0.0 { 0.0 } else { 2.0_f32.powf(10.0 * t - 10.0) }
            }
            Curve::ExpoOut => {
                if t == 1.0 { 1.0 } else { 1.0 - 2.0_f32.powf(-10.0 * t) }
            }
            Curve::Smooth => t * t * (3.0 - 2.0 * t),
            Curve::Custom(f) => f(t),
        }
    }
}

impl fmt::Debug for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Curve::Linear => f.write_str("Linear"),
            Curve::QuadIn => f.write_str("QuadIn"),
            Curve::QuadOut => f.write_str("QuadOut"),
            Curve::QuadInOut => f.write_str("QuadInOut"),
            Curve::CubicIn => f.write_str("CubicIn"),
            Curve::CubicOut => f.write_str("CubicOut"),
            Curve::CubicInOut => f.write_str("CubicInOut"),
            Curve::SineIn => f.write_str("SineIn"),
            Curve::SineOut => f.write_str("SineOut"),
            Curve::SineInOut => f.write_str("SineInOut"),
            Curve::ExpoIn => f.write_str("ExpoIn"),
            Curve::ExpoOut => f.write_str("ExpoOut"),
            Curve::Smooth => f.write_str("Smooth"),
            Curve::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUILT_IN: [Curve; 13] = [
        Curve::Linear,
        Curve::QuadIn,
        Curve::QuadOut,
        Curve::QuadInOut,
        Curve::CubicIn,
        Curve::CubicOut,
        Curve::CubicInOut,
        Curve::SineIn,
        Curve::SineOut,
        Curve::SineInOut,
        Curve::ExpoIn,
        Curve::ExpoOut,
        Curve::Smooth,
    ];

    #[test]
    fn linear_is_identity() {
        assert_eq!(Curve::Linear.transform(0.0), 0.0);
        assert_eq!(Curve::Linear.transform(0.25), 0.25);
        assert_eq!(Curve::Linear.transform(1.0), 1.0);
    }

    #[test]
    fn built_in_curves_hit_endpoints() {
        for curve in BUILT_IN {
            assert!(curve.transform(0.0).abs() < 1e-5, "{:?} at 0", curve);
            assert!((curve.transform(1.0) - 1.0).abs() < 1e-5, "{:?} at 1", curve);
        }
    }

    #[test]
    fn built_in_curves_are_monotonic() {
        for curve in BUILT_IN {
            let mut last = curve.transform(0.0);
            for step in 1..=100 {
                let v = curve.transform(step as f32 / 100.0);
                assert!(v + 1e-6 >= last, "{:?} decreased at step {}", curve, step);
                last = v;
            }
        }
    }

    #[test]
    fn quad_out_is_ahead_at_midpoint() {
        assert!(Curve::QuadOut.transform(0.5) > 0.5);
    }

    #[test]
    fn custom_curve_is_called_with_clamped_input() {
        fn square(t: f32) -> f32 {
            t * t
        }
        let curve = Curve::Custom(square);
        assert_eq!(curve.transform(0.5), 0.25);
        assert_eq!(curve.transform(2.0), 1.0);
    }

    #[test]
    fn deserializes_snake_case_names() {
        let curve: Curve = serde_json::from_str("\"quad_in_out\"").unwrap();
        assert!(matches!(curve, Curve::QuadInOut));
    }
}
