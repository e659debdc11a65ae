//! Matrix decomposition and recomposition.
//!
//! Follows the "unmatrix" routine of the CSS Transforms Level 2
//! interpolation section, in the row layout used by browser engines.
//! Rows below are CSS rows (`m11 m12 m13`, ...), i.e. glam columns.

use glam::{DMat4, DQuat, DVec3, DVec4};

use crate::interpolate::Interpolate;
use crate::matrix::Matrix3d;

/// A 4x4 matrix factored into interpolable components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecomposedMatrix {
    pub translation: DVec3,
    pub scale: DVec3,
    /// Shear factors in `(xy, xz, yz)` order.
    pub skew: DVec3,
    /// The perspective row (`m14, m24, m34, m44` after normalization).
    pub perspective: DVec4,
    pub quaternion: DQuat,
}

impl Default for DecomposedMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl DecomposedMatrix {
    pub fn identity() -> Self {
        Self {
            translation: DVec3::ZERO,
            scale: DVec3::ONE,
            skew: DVec3::ZERO,
            perspective: DVec4::new(0.0, 0.0, 0.0, 1.0),
            quaternion: DQuat::IDENTITY,
        }
    }

    pub(crate) fn from_matrix(matrix: &Matrix3d) -> Option<Self> {
        let mut m = matrix.as_dmat4().to_cols_array_2d();

        if m[3][3] == 0.0 {
            return None;
        }

        // Normalize so that m44 == 1.
        let factor = 1.0 / m[3][3];
        for row in m.iter_mut() {
            for value in row.iter_mut() {
                *value *= factor;
            }
        }

        // Also serves as the singularity test for the upper 3x3.
        let mut perspective_matrix = m;
        perspective_matrix[0][3] = 0.0;
        perspective_matrix[1][3] = 0.0;
        perspective_matrix[2][3] = 0.0;
        perspective_matrix[3][3] = 1.0;
        let perspective_matrix = DMat4::from_cols_array_2d(&perspective_matrix);

        if perspective_matrix.determinant() == 0.0 {
            return None;
        }

        let perspective = if m[0][3] != 0.0 || m[1][3] != 0.0 || m[2][3] != 0.0 {
            let right_hand_side = DVec4::new(m[0][3], m[1][3], m[2][3], m[3][3]);
            perspective_matrix.inverse().transpose() * right_hand_side
        } else {
            DVec4::new(0.0, 0.0, 0.0, 1.0)
        };

        let translation = DVec3::new(m[3][0], m[3][1], m[3][2]);

        let mut row = [
            DVec3::new(m[0][0], m[0][1], m[0][2]),
            DVec3::new(m[1][0], m[1][1], m[1][2]),
            DVec3::new(m[2][0], m[2][1], m[2][2]),
        ];

        // X scale, then normalize the first row.
        let mut scale = DVec3::new(row[0].length(), 0.0, 0.0);
        row[0] /= scale.x;

        // XY shear, then make the second row orthogonal to the first.
        let mut skew = DVec3::new(row[0].dot(row[1]), 0.0, 0.0);
        row[1] -= row[0] * skew.x;

        scale.y = row[1].length();
        row[1] /= scale.y;
        skew.x /= scale.y;

        // XZ and YZ shears, orthogonalize the third row.
        skew.y = row[0].dot(row[2]);
        row[2] -= row[0] * skew.y;
        skew.z = row[1].dot(row[2]);
        row[2] -= row[1] * skew.z;

        scale.z = row[2].length();
        row[2] /= scale.z;
        skew.y /= scale.z;
        skew.z /= scale.z;

        // The rows are now orthonormal. A negative determinant means a
        // coordinate system flip.
        if row[0].dot(row[1].cross(row[2])) < 0.0 {
            scale = -scale;
            for r in row.iter_mut() {
                *r = -*r;
            }
        }

        let mut quaternion = DQuat::from_xyzw(
            0.5 * (1.0 + row[0].x - row[1].y - row[2].z).max(0.0).sqrt(),
            0.5 * (1.0 - row[0].x + row[1].y - row[2].z).max(0.0).sqrt(),
            0.5 * (1.0 - row[0].x - row[1].y + row[2].z).max(0.0).sqrt(),
            0.5 * (1.0 + row[0].x + row[1].y + row[2].z).max(0.0).sqrt(),
        );

        if row[2].y > row[1].z {
            quaternion.x = -quaternion.x;
        }
        if row[0].z > row[2].x {
            quaternion.y = -quaternion.y;
        }
        if row[1].x > row[0].y {
            quaternion.z = -quaternion.z;
        }

        Some(Self {
            translation,
            scale,
            skew,
            perspective,
            quaternion,
        })
    }

    /// Rebuild the matrix these components describe.
    pub fn recompose(&self) -> Matrix3d {
        let mut m = DMat4::IDENTITY.to_cols_array_2d();

        m[0][3] = self.perspective.x;
        m[1][3] = self.perspective.y;
        m[2][3] = self.perspective.z;
        m[3][3] = self.perspective.w;

        let t = self.translation;
        for col in 0..4 {
            m[3][col] += t.x * m[0][col] + t.y * m[1][col] + t.z * m[2][col];
        }

        let mut matrix = DMat4::from_cols_array_2d(&m);
        matrix *= DMat4::from_quat(self.quaternion);

        let mut shear = DMat4::IDENTITY;
        if self.skew.z != 0.0 {
            shear.z_axis.y = self.skew.z;
            matrix *= shear;
            shear.z_axis.y = 0.0;
        }
        if self.skew.y != 0.0 {
            shear.z_axis.x = self.skew.y;
            matrix *= shear;
            shear.z_axis.x = 0.0;
        }
        if self.skew.x != 0.0 {
            shear.y_axis.x = self.skew.x;
            matrix *= shear;
        }

        matrix.x_axis *= self.scale.x;
        matrix.y_axis *= self.scale.y;
        matrix.z_axis *= self.scale.z;

        Matrix3d::from_dmat4(matrix)
    }
}

impl Interpolate for DecomposedMatrix {
    /// Translation, scale, skew and perspective blend linearly; the rotation
    /// quaternion blends spherically.
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Self {
            translation: self.translation.interpolate(&to.translation, t),
            scale: self.scale.interpolate(&to.scale, t),
            skew: self.skew.interpolate(&to.skew, t),
            perspective: self.perspective.interpolate(&to.perspective, t),
            quaternion: self.quaternion.interpolate(&to.quaternion, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-4;

    fn assert_roundtrip(matrix: Matrix3d) {
        let decomposed = matrix.decompose().unwrap();
        let recomposed = decomposed.recompose();
        assert!(
            recomposed.approx_eq(&matrix, EPSILON),
            "expected {matrix}, got {recomposed}"
        );
    }

    #[test]
    fn test_decompose_identity() {
        let d = Matrix3d::IDENTITY.decompose().unwrap();
        assert_eq!(d, DecomposedMatrix::identity());
    }

    #[test]
    fn test_decompose_translate_scale() {
        let m = Matrix3d::translation(DVec3::new(10.0, 20.0, 30.0))
            .multiply(&Matrix3d::scale(DVec3::new(2.0, 3.0, 4.0)));
        let d = m.decompose().unwrap();
        assert!(d.translation.abs_diff_eq(DVec3::new(10.0, 20.0, 30.0), EPSILON));
        assert!(d.scale.abs_diff_eq(DVec3::new(2.0, 3.0, 4.0), EPSILON));
        assert!(d.skew.abs_diff_eq(DVec3::ZERO, EPSILON));
        assert!(d.quaternion.abs_diff_eq(DQuat::IDENTITY, EPSILON));
    }

    #[test]
    fn test_decompose_rotation_matches_quaternion() {
        let q = DQuat::from_axis_angle(DVec3::new(1.0, 2.0, 3.0).normalize(), 0.7);
        let d = Matrix3d::rotation(q).decompose().unwrap();
        assert!(d.quaternion.abs_diff_eq(q, EPSILON));
    }

    #[test]
    fn test_roundtrip_mixed() {
        let m = Matrix3d::translation(DVec3::new(5.0, -3.0, 2.0))
            .multiply(&Matrix3d::rotation(DQuat::from_rotation_y(0.4)))
            .multiply(&Matrix3d::skew(0.3, 0.1))
            .multiply(&Matrix3d::scale(DVec3::new(1.5, 0.5, 2.0)));
        assert_roundtrip(m);
    }

    #[test]
    fn test_roundtrip_perspective() {
        let m = Matrix3d::translation(DVec3::new(0.0, 0.0, 50.0))
            .multiply(&Matrix3d::perspective(200.0));
        assert_roundtrip(m);
    }

    #[test]
    fn test_roundtrip_mirror() {
        assert_roundtrip(Matrix3d::scale(DVec3::new(-1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_singular_matrix_is_not_decomposable() {
        assert!(Matrix3d::scale(DVec3::new(0.0, 1.0, 1.0)).decompose().is_none());

        let mut m = Matrix3d::IDENTITY;
        m.set(3, 3, 0.0);
        assert!(m.decompose().is_none());
    }

    #[test]
    fn test_interpolate_components() {
        let from = Matrix3d::translation(DVec3::ZERO).decompose().unwrap();
        let to = Matrix3d::translation(DVec3::new(100.0, 0.0, 0.0))
            .multiply(&Matrix3d::scale(DVec3::new(3.0, 3.0, 1.0)))
            .decompose()
            .unwrap();
        let mid = from.interpolate(&to, 0.5);
        assert!(mid.translation.abs_diff_eq(DVec3::new(50.0, 0.0, 0.0), EPSILON));
        assert!(mid.scale.abs_diff_eq(DVec3::new(2.0, 2.0, 1.0), EPSILON));
    }
}
