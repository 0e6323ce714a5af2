// extensions/easing.rs
//
// Easing curves for reaction stage transitions.
// No dependencies on atoms or reactions; just math over f32 and Vec3.

use std::f32::consts::PI;

use glam::Vec3;
use serde::Deserialize;

/// Easing function type. Configurable by name, e.g. `"cubic_in_out"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Slow start.
    QuadIn,
    /// Slow end.
    QuadOut,
    /// Slow start and end.
    QuadInOut,
    CubicIn,
    CubicOut,
    /// Stronger slow start and end. Closest to a heavily damped spring.
    CubicInOut,
    SineInOut,
    /// Overshoot then settle.
    BackOut,
}

impl Easing {
    /// Apply the easing function to a normalized time value `t` in [0, 1].
    /// Returns the eased value, typically in [0, 1] (BackOut overshoots).
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,

            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }

            Easing::CubicIn => t * t * t,
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }

            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,

            Easing::BackOut => {
                const C1: f32 = 1.70158;
                const C3: f32 = C1 + 1.0;
                1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
            }
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two positions.
#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

/// Interpolate a position with easing.
#[inline]
pub fn ease_vec3(a: Vec3, b: Vec3, t: f32, easing: Easing) -> Vec3 {
    lerp_vec3(a, b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 9] = [
        Easing::Linear,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
        Easing::SineInOut,
        Easing::BackOut,
    ];

    #[test]
    fn every_curve_hits_endpoints() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-5, "{:?} at 0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-5, "{:?} at 1", easing);
        }
    }

    #[test]
    fn cubic_in_out_is_symmetric() {
        let a = Easing::CubicInOut.apply(0.25);
        let b = Easing::CubicInOut.apply(0.75);
        assert!((a + b - 1.0).abs() < 1e-5);
        assert!((Easing::CubicInOut.apply(0.5) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn back_overshoots() {
        assert!(Easing::BackOut.apply(0.7) > 1.0);
    }

    #[test]
    fn ease_vec3_interpolates() {
        let p = ease_vec3(Vec3::ZERO, Vec3::new(2.0, -4.0, 0.0), 0.5, Easing::Linear);
        assert!((p - Vec3::new(1.0, -2.0, 0.0)).length() < 1e-5);
        assert!((ease(100.0, 200.0, 0.5, Easing::Linear) - 150.0).abs() < 1e-3);
    }

    #[test]
    fn parses_snake_case_names() {
        let e: Easing = serde_json::from_str("\"sine_in_out\"").unwrap();
        assert_eq!(e, Easing::SineInOut);
    }
}
