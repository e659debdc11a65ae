//! Interpolation system for transform values.
//!
//! Every blend here is unclamped: progress values outside `[0, 1]`
//! extrapolate along the same line (or great arc, for quaternions).

use glam::{DQuat, DVec2, DVec3, DVec4};

/// Trait for types that can be interpolated between two values.
///
/// # Arguments
/// * `to` - Target value to interpolate towards
/// * `t` - Interpolation factor (0.0 = self, 1.0 = to)
pub trait Interpolate: Sized {
    /// Interpolate between self and another value.
    ///
    /// When t = 0.0, returns self.
    /// When t = 1.0, returns to.
    fn interpolate(&self, to: &Self, t: f64) -> Self;
}

/// Linear interpolation helper for f64 values.
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from * (1.0 - t) + to * t
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        lerp(*self, *to, t)
    }
}

impl Interpolate for DVec2 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        DVec2::new(lerp(self.x, to.x, t), lerp(self.y, to.y, t))
    }
}

impl Interpolate for DVec3 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        DVec3::new(lerp(self.x, to.x, t), lerp(self.y, to.y, t), lerp(self.z, to.z, t))
    }
}

impl Interpolate for DVec4 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        DVec4::new(
            lerp(self.x, to.x, t),
            lerp(self.y, to.y, t),
            lerp(self.z, to.z, t),
            lerp(self.w, to.w, t),
        )
    }
}

impl Interpolate for DQuat {
    /// Shortest-path spherical interpolation.
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        self.slerp(*to, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(3.0, 7.0, 0.0), 3.0);
        assert_eq!(lerp(3.0, 7.0, 1.0), 7.0);
        assert!(approx_eq(lerp(3.0, 7.0, 0.5), 5.0));
    }

    #[test]
    fn test_lerp_extrapolates() {
        assert!(approx_eq(lerp(0.0, 10.0, 1.5), 15.0));
        assert!(approx_eq(lerp(0.0, 10.0, -0.5), -5.0));
    }

    #[test]
    fn test_vec3_interpolate() {
        let from = DVec3::new(0.0, 10.0, -4.0);
        let to = DVec3::new(10.0, 20.0, 4.0);
        let mid = from.interpolate(&to, 0.5);
        assert!(approx_eq(mid.x, 5.0));
        assert!(approx_eq(mid.y, 15.0));
        assert!(approx_eq(mid.z, 0.0));
    }

    #[test]
    fn test_quat_interpolate_halfway() {
        let from = DQuat::IDENTITY;
        let to = DQuat::from_rotation_z(std::f64::consts::FRAC_PI_2);
        let mid = from.interpolate(&to, 0.5);
        let expected = DQuat::from_rotation_z(std::f64::consts::FRAC_PI_4);
        assert!(mid.abs_diff_eq(expected, 1e-9));
    }

    #[test]
    fn test_quat_interpolate_takes_short_path() {
        let from = DQuat::IDENTITY;
        // -q represents the same rotation as q
        let to = -DQuat::from_rotation_x(0.5);
        let mid = from.interpolate(&to, 0.5);
        let expected = DQuat::from_rotation_x(0.25);
        assert!(mid.abs_diff_eq(expected, 1e-9) || mid.abs_diff_eq(-expected, 1e-9));
    }
}
