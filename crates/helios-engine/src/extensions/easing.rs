// extensions/easing.rs
//
// Interpolation helpers for smoothing toward moving targets.
// No dependencies on Entity/Scene, just math.

use glam::Vec3;

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two Vec3 values.
#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Clamp a per-frame approach factor into [0, 1].
/// 0 never moves, 1 snaps; anything in between closes that fraction of the
/// remaining gap every frame (exponential approach).
#[inline]
pub fn smoothing_factor(factor: f32) -> f32 {
    if factor.is_finite() {
        factor.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp(2.0, 6.0, 0.25), 3.0);
    }

    #[test]
    fn lerp_vec3_midpoint() {
        let m = lerp_vec3(Vec3::ZERO, Vec3::new(2.0, 4.0, -6.0), 0.5);
        assert_eq!(m, Vec3::new(1.0, 2.0, -3.0));
    }

    #[test]
    fn repeated_approach_converges_without_overshoot() {
        let mut x = 0.0;
        for _ in 0..200 {
            x = lerp(x, 10.0, 0.05);
            assert!(x <= 10.0);
        }
        assert!((x - 10.0).abs() < 1e-3);
    }

    #[test]
    fn smoothing_factor_clamps() {
        assert_eq!(smoothing_factor(-1.0), 0.0);
        assert_eq!(smoothing_factor(2.0), 1.0);
        assert_eq!(smoothing_factor(f32::NAN), 0.0);
        assert_eq!(smoothing_factor(0.1), 0.1);
    }
}
