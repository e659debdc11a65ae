//! Axis-angle rotations, as written in CSS `rotate3d()`.

use glam::{DQuat, DVec3};

/// A rotation of `angle` degrees about `axis`.
///
/// The axis is kept exactly as given; it is only normalized when converting
/// to a quaternion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisAngle {
    pub axis: DVec3,
    /// Rotation angle in degrees.
    pub angle: f64,
}

impl AxisAngle {
    pub fn new(axis: DVec3, angle: f64) -> Self {
        Self { axis, angle }
    }

    pub fn from_components(x: f64, y: f64, z: f64, angle: f64) -> Self {
        Self::new(DVec3::new(x, y, z), angle)
    }

    /// Unit quaternion for this rotation.
    ///
    /// A zero-length axis describes no rotation and maps to the identity.
    pub fn to_quaternion(&self) -> DQuat {
        let axis = self.axis.normalize_or_zero();
        if axis == DVec3::ZERO {
            return DQuat::IDENTITY;
        }
        DQuat::from_axis_angle(axis, self.angle.to_radians())
    }

    /// Axis-angle form of a unit quaternion, with the angle in degrees.
    pub fn from_quaternion(quaternion: DQuat) -> Self {
        let (axis, angle) = quaternion.to_axis_angle();
        Self::new(axis, angle.to_degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_quaternion_roundtrip() {
        let rotation = AxisAngle::from_components(0.0, 0.0, 1.0, 90.0);
        let back = AxisAngle::from_quaternion(rotation.to_quaternion());
        assert!(back.axis.abs_diff_eq(DVec3::Z, EPSILON));
        assert!((back.angle - 90.0).abs() < EPSILON);
    }

    #[test]
    fn test_axis_is_normalized_for_quaternion() {
        let long = AxisAngle::from_components(0.0, 3.0, 0.0, 45.0).to_quaternion();
        let unit = AxisAngle::from_components(0.0, 1.0, 0.0, 45.0).to_quaternion();
        assert!(long.abs_diff_eq(unit, EPSILON));
    }

    #[test]
    fn test_zero_axis_is_identity() {
        let q = AxisAngle::from_components(0.0, 0.0, 0.0, 30.0).to_quaternion();
        assert_eq!(q, DQuat::IDENTITY);
    }

    #[test]
    fn test_axis_kept_verbatim() {
        let rotation = AxisAngle::from_components(0.0, 0.0, 2.0, 10.0);
        assert_eq!(rotation.axis, DVec3::new(0.0, 0.0, 2.0));
    }
}
