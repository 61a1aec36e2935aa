// extensions/easing.rs
//
// Interpolation helpers for smoothing and highlight animation.
// No dependencies on Entity/Scene, just math.

use std::f32::consts::PI;
use glam::Vec3;

/// Easing curve applied to a normalized time value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Slow end.
    CubicOut,
    /// Slow start and end.
    SineInOut,
}

impl Easing {
    /// Apply the easing curve to `t`, clamped to [0, 1].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicOut => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

/// Linearly interpolate between two values. `t = 0` gives `a`, `t = 1` gives `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_endpoints() {
        assert_eq!(Easing::Linear.apply(0.0), 0.0);
        assert_eq!(Easing::Linear.apply(1.0), 1.0);
        assert_eq!(Easing::Linear.apply(0.5), 0.5);
    }

    #[test]
    fn curves_hit_endpoints() {
        for easing in [Easing::CubicOut, Easing::SineInOut] {
            assert!(easing.apply(0.0).abs() < 1e-6);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn cubic_out_faster_start() {
        let mid = Easing::CubicOut.apply(0.5);
        assert!(mid > 0.5, "CubicOut at 0.5 should be > 0.5, got {}", mid);
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Easing::Linear.apply(-3.0), 0.0);
        assert_eq!(Easing::Linear.apply(7.0), 1.0);
    }

    #[test]
    fn lerp_never_overshoots_for_unit_t() {
        let v = lerp(100.0, 20.0, 0.1);
        assert!((v - 92.0).abs() < 1e-4);
        let p = lerp_vec3(Vec3::ZERO, Vec3::new(10.0, 0.0, -10.0), 0.5);
        assert_eq!(p, Vec3::new(5.0, 0.0, -5.0));
    }

    #[test]
    fn ease_interpolates() {
        let result = ease(100.0, 200.0, 0.5, Easing::Linear);
        assert!((result - 150.0).abs() < 0.001);
    }
}
