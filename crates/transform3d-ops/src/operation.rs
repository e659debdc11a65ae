//! Transform operations: the CSS transform functions as values.
//!
//! Each [`Operation`] knows its identity value, how to compare itself with
//! another operation, how to blend towards an operation of the same kind, and
//! how to turn itself into a 4x4 matrix or CSS text.

use std::fmt;

use glam::{DVec2, DVec3};
use tracing::debug;
use transform3d_math::{AxisAngle, DecomposedMatrix, EPSILON, Interpolate, Matrix3d, lerp};

/// Discriminant of an [`Operation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Translate,
    Scale,
    Rotate,
    Skew,
    Perspective,
    Matrix,
}

impl OperationKind {
    /// A fresh identity operation of this kind.
    ///
    /// Rotations use the `(1, 1, 1)` axis with a zero angle.
    pub fn identity(self) -> Operation {
        match self {
            Self::Translate => Operation::Translate(DVec3::ZERO),
            Self::Scale => Operation::Scale(DVec3::ONE),
            Self::Rotate => Operation::Rotate(AxisAngle::new(DVec3::ONE, 0.0)),
            Self::Skew => Operation::Skew(DVec2::ZERO),
            Self::Perspective => Operation::Perspective(0.0),
            Self::Matrix => Operation::Matrix(MatrixOperation::identity()),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Translate => "translate",
            Self::Scale => "scale",
            Self::Rotate => "rotate",
            Self::Skew => "skew",
            Self::Perspective => "perspective",
            Self::Matrix => "matrix",
        }
    }
}

/// A single transform function.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Offset in pixels.
    Translate(DVec3),
    Scale(DVec3),
    /// Rotation about an arbitrary axis, angle in degrees.
    Rotate(AxisAngle),
    /// `x` and `y` skew angles in degrees.
    Skew(DVec2),
    /// Distance from the viewer to the z=0 plane; zero disables perspective.
    Perspective(f64),
    Matrix(MatrixOperation),
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Translate(_) => OperationKind::Translate,
            Self::Scale(_) => OperationKind::Scale,
            Self::Rotate(_) => OperationKind::Rotate,
            Self::Skew(_) => OperationKind::Skew,
            Self::Perspective(_) => OperationKind::Perspective,
            Self::Matrix(_) => OperationKind::Matrix,
        }
    }

    /// Exact comparison against the identity value of this kind.
    ///
    /// `rotate3d(0, 0, 1, 0deg)` is *not* identity here: only the `(1, 1, 1)`
    /// axis with a zero angle is.
    pub fn is_identity(&self) -> bool {
        match self {
            Self::Matrix(matrix) => matrix.matrix().is_identity(),
            other => *other == other.kind().identity(),
        }
    }

    pub fn to_matrix(&self) -> Matrix3d {
        match self {
            Self::Translate(offset) => Matrix3d::translation(*offset),
            Self::Scale(factor) => Matrix3d::scale(*factor),
            Self::Rotate(rotation) => Matrix3d::rotation(rotation.to_quaternion()),
            Self::Skew(angles) => {
                Matrix3d::skew(angles.x.to_radians().tan(), angles.y.to_radians().tan())
            }
            Self::Perspective(length) => Matrix3d::perspective(*length),
            Self::Matrix(matrix) => *matrix.matrix(),
        }
    }

    /// Blend towards `to` by `t`.
    ///
    /// `t` is not clamped. Operations of different kinds have no blend of
    /// their own; they are blended as full matrices instead.
    pub fn blend(&self, to: &Operation, t: f64) -> Operation {
        match (self, to) {
            (Self::Translate(from), Self::Translate(to)) => Self::Translate(from.interpolate(to, t)),
            (Self::Scale(from), Self::Scale(to)) => Self::Scale(from.interpolate(to, t)),
            (Self::Rotate(from), Self::Rotate(to)) => Self::Rotate(blend_rotation(from, to, t)),
            (Self::Skew(from), Self::Skew(to)) => Self::Skew(from.interpolate(to, t)),
            (Self::Perspective(from), Self::Perspective(to)) => {
                Self::Perspective(lerp(*from, *to, t))
            }
            (Self::Matrix(from), Self::Matrix(to)) => Self::Matrix(from.blend(to, t)),
            (from, to) => {
                debug!(
                    from = from.kind().name(),
                    to = to.kind().name(),
                    "blending mismatched operations as matrices"
                );
                let from = MatrixOperation::new(from.to_matrix());
                let to = MatrixOperation::new(to.to_matrix());
                Self::Matrix(from.blend(&to, t))
            }
        }
    }
}

/// Rotation blend following Chromium's `TransformOperation::BlendedTransform`.
fn blend_rotation(from: &AxisAngle, to: &AxisAngle, t: f64) -> AxisAngle {
    if from.axis == to.axis {
        return AxisAngle::new(from.axis, lerp(from.angle, to.angle, t));
    }

    let from_length = from.axis.length();
    let to_length = to.axis.length();

    if from_length > EPSILON && to_length > EPSILON {
        let dot = from.axis.dot(to.axis);
        // Lengths, not squared lengths: only unit axes hit the exact test.
        let error = (1.0 - dot * dot / (from_length * to_length)).abs();
        if error < EPSILON {
            // Opposite axes: the same rotation has the opposite angle.
            let from_angle = if dot > 0.0 { from.angle } else { -from.angle };
            return AxisAngle::new(to.axis, lerp(from_angle, to.angle, t));
        }
    }

    let blended = from.to_quaternion().interpolate(&to.to_quaternion(), t);
    AxisAngle::from_quaternion(blended)
}

impl From<Matrix3d> for Operation {
    fn from(matrix: Matrix3d) -> Self {
        Self::Matrix(MatrixOperation::new(matrix))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Translate(v) => write!(f, "translate3d({}px, {}px, {}px)", v.x, v.y, v.z),
            Self::Scale(v) => write!(f, "scale3d({}, {}, {})", v.x, v.y, v.z),
            Self::Rotate(r) => write!(
                f,
                "rotate3d({}, {}, {}, {}deg)",
                r.axis.x, r.axis.y, r.axis.z, r.angle
            ),
            Self::Skew(v) => write!(f, "skewX({}) skewY({})", v.x, v.y),
            Self::Perspective(length) => write!(f, "perspective({length})"),
            Self::Matrix(matrix) => write!(f, "{}", matrix.matrix()),
        }
    }
}

/// A raw matrix operation.
///
/// The decomposition is computed once, on construction, and reused by every
/// blend. `None` means the matrix cannot be decomposed.
#[derive(Debug, Clone)]
pub struct MatrixOperation {
    matrix: Matrix3d,
    decomposed: Option<DecomposedMatrix>,
}

impl MatrixOperation {
    pub fn new(matrix: Matrix3d) -> Self {
        Self {
            matrix,
            decomposed: matrix.decompose(),
        }
    }

    pub fn identity() -> Self {
        Self {
            matrix: Matrix3d::IDENTITY,
            decomposed: Some(DecomposedMatrix::identity()),
        }
    }

    pub fn matrix(&self) -> &Matrix3d {
        &self.matrix
    }

    pub fn decomposed(&self) -> Option<&DecomposedMatrix> {
        self.decomposed.as_ref()
    }

    /// Blend the cached decompositions and recompose.
    ///
    /// If either side cannot be decomposed the result flips from `self` to
    /// `to` at the halfway point.
    pub fn blend(&self, to: &MatrixOperation, t: f64) -> MatrixOperation {
        match (&self.decomposed, &to.decomposed) {
            (Some(from), Some(target)) => {
                let decomposed = from.interpolate(target, t);
                Self {
                    matrix: decomposed.recompose(),
                    decomposed: Some(decomposed),
                }
            }
            _ => {
                debug!(t, "matrix not decomposable, using discrete interpolation");
                if t < 0.5 { self.clone() } else { to.clone() }
            }
        }
    }
}

impl PartialEq for MatrixOperation {
    fn eq(&self, other: &Self) -> bool {
        self.matrix == other.matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-4;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn rotate(x: f64, y: f64, z: f64, angle: f64) -> Operation {
        Operation::Rotate(AxisAngle::from_components(x, y, z, angle))
    }

    fn unwrap_rotate(op: Operation) -> AxisAngle {
        match op {
            Operation::Rotate(rotation) => rotation,
            other => panic!("expected rotate, got {other:?}"),
        }
    }

    #[test]
    fn test_identity_values() {
        for kind in [
            OperationKind::Translate,
            OperationKind::Scale,
            OperationKind::Rotate,
            OperationKind::Skew,
            OperationKind::Perspective,
            OperationKind::Matrix,
        ] {
            let identity = kind.identity();
            assert_eq!(identity.kind(), kind);
            assert!(identity.is_identity(), "{kind:?} identity");
            assert!(identity.to_matrix().is_identity(), "{kind:?} matrix");
        }
    }

    #[test]
    fn test_rotate_identity_is_axis_sensitive() {
        // Geometrically a no-op, but not the (1, 1, 1) axis.
        assert!(!rotate(0.0, 0.0, 1.0, 0.0).is_identity());
        assert!(rotate(0.0, 0.0, 1.0, 0.0).to_matrix().is_identity());
        assert!(rotate(1.0, 1.0, 1.0, 0.0).is_identity());
    }

    #[test]
    fn test_non_identity() {
        assert!(!Operation::Translate(DVec3::new(0.0, 1.0, 0.0)).is_identity());
        assert!(!Operation::Scale(DVec3::new(1.0, 1.0, 2.0)).is_identity());
        assert!(!Operation::Skew(DVec2::new(0.0, 5.0)).is_identity());
        assert!(!Operation::Perspective(100.0).is_identity());
        assert!(!Operation::from(Matrix3d::scale(DVec3::splat(2.0))).is_identity());
    }

    #[test]
    fn test_equality_is_per_kind() {
        assert_ne!(
            Operation::Translate(DVec3::ONE),
            Operation::Scale(DVec3::ONE)
        );
        assert_eq!(
            Operation::Skew(DVec2::new(1.0, 2.0)),
            Operation::Skew(DVec2::new(1.0, 2.0))
        );
    }

    #[test]
    fn test_blend_translate_and_scale() {
        let from = Operation::Translate(DVec3::ZERO);
        let to = Operation::Translate(DVec3::new(100.0, -50.0, 10.0));
        assert_eq!(
            from.blend(&to, 0.5),
            Operation::Translate(DVec3::new(50.0, -25.0, 5.0))
        );

        let from = Operation::Scale(DVec3::ONE);
        let to = Operation::Scale(DVec3::new(3.0, 3.0, 1.0));
        assert_eq!(
            from.blend(&to, 0.5),
            Operation::Scale(DVec3::new(2.0, 2.0, 1.0))
        );
    }

    #[test]
    fn test_blend_skew_and_perspective() {
        let from = Operation::Skew(DVec2::new(10.0, 20.0));
        let to = Operation::Skew(DVec2::new(30.0, 40.0));
        assert_eq!(from.blend(&to, 0.5), Operation::Skew(DVec2::new(20.0, 30.0)));

        let from = Operation::Perspective(100.0);
        let to = Operation::Perspective(200.0);
        assert_eq!(from.blend(&to, 0.25), Operation::Perspective(125.0));
    }

    #[test]
    fn test_blend_extrapolates() {
        let from = Operation::Translate(DVec3::ZERO);
        let to = Operation::Translate(DVec3::new(100.0, 0.0, 0.0));
        assert_eq!(
            from.blend(&to, 1.5),
            Operation::Translate(DVec3::new(150.0, 0.0, 0.0))
        );
        assert_eq!(
            from.blend(&to, -0.5),
            Operation::Translate(DVec3::new(-50.0, 0.0, 0.0))
        );
    }

    #[test]
    fn test_rotate_same_axis_blends_angle() {
        let from = rotate(0.0, 0.0, 1.0, 0.0);
        let to = rotate(0.0, 0.0, 1.0, 90.0);
        assert_eq!(from.blend(&to, 0.5), rotate(0.0, 0.0, 1.0, 45.0));
    }

    #[test]
    fn test_rotate_opposite_axes_flip_source_angle() {
        let from = rotate(0.0, 0.0, 1.0, 90.0);
        let to = rotate(0.0, 0.0, -1.0, 0.0);

        let mid = unwrap_rotate(from.blend(&to, 0.5));
        assert_eq!(mid.axis, DVec3::new(0.0, 0.0, -1.0));
        assert_eq!(mid.angle, -45.0);

        // At t=0 the blend still describes the source rotation.
        let start = from.blend(&to, 0.0);
        assert_eq!(start, rotate(0.0, 0.0, -1.0, -90.0));
        assert!(start.to_matrix().approx_eq(&from.to_matrix(), EPSILON));
    }

    #[test]
    fn test_rotate_nearly_parallel_axes_use_target_axis() {
        let from = rotate(0.0, 0.0, 1.0, 30.0);
        let to = rotate(0.0, 0.0, 1.00001, 60.0);
        let mid = unwrap_rotate(from.blend(&to, 0.5));
        assert_eq!(mid.axis, DVec3::new(0.0, 0.0, 1.00001));
        assert!(approx_eq(mid.angle, 45.0));
    }

    #[test]
    fn test_rotate_parallel_test_uses_lengths_not_squares() {
        // dot^2 / (|a| |b|) = 4 / 2, so these parallel axes take the
        // quaternion path and come back normalized.
        let from = rotate(0.0, 0.0, 2.0, 30.0);
        let to = rotate(0.0, 0.0, 1.0, 60.0);
        let mid = unwrap_rotate(from.blend(&to, 0.5));
        assert!(mid.axis.abs_diff_eq(DVec3::Z, EPSILON));
        assert!(approx_eq(mid.angle, 45.0));
    }

    #[test]
    fn test_rotate_different_axes_slerp() {
        let from = AxisAngle::from_components(1.0, 0.0, 0.0, 90.0);
        let to = AxisAngle::from_components(0.0, 1.0, 0.0, 90.0);
        let blended = Operation::Rotate(from).blend(&Operation::Rotate(to), 0.5);

        let expected = Matrix3d::rotation(from.to_quaternion().slerp(to.to_quaternion(), 0.5));
        assert!(blended.to_matrix().approx_eq(&expected, EPSILON));
    }

    #[test]
    fn test_matrix_blend_recomposes() {
        let from = Operation::from(Matrix3d::IDENTITY);
        let to = Operation::from(
            Matrix3d::translation(DVec3::new(100.0, 0.0, 0.0))
                .multiply(&Matrix3d::scale(DVec3::new(3.0, 3.0, 1.0))),
        );
        let mid = from.blend(&to, 0.5);
        let expected = Matrix3d::translation(DVec3::new(50.0, 0.0, 0.0))
            .multiply(&Matrix3d::scale(DVec3::new(2.0, 2.0, 1.0)));
        assert!(mid.to_matrix().approx_eq(&expected, EPSILON));

        // The blended decomposition is cached on the result.
        match mid {
            Operation::Matrix(matrix) => {
                let cached = matrix.decomposed().unwrap();
                assert!(cached.translation.abs_diff_eq(DVec3::new(50.0, 0.0, 0.0), EPSILON));
            }
            other => panic!("expected matrix, got {other:?}"),
        }
    }

    #[test]
    fn test_matrix_blend_discrete_when_not_decomposable() {
        let from = Operation::from(Matrix3d::scale(DVec3::new(0.0, 1.0, 1.0)));
        let to = Operation::from(Matrix3d::translation(DVec3::new(10.0, 0.0, 0.0)));
        assert_eq!(from.blend(&to, 0.25), from);
        assert_eq!(from.blend(&to, 0.5), to);
        assert_eq!(from.blend(&to, 0.75), to);
    }

    #[test]
    fn test_mismatched_blend_goes_through_matrices() {
        let from = Operation::Translate(DVec3::ZERO);
        let to = Operation::Scale(DVec3::ONE);
        let blended = from.blend(&to, 0.5);
        assert_eq!(blended.kind(), OperationKind::Matrix);
        assert!(blended.is_identity());
    }

    #[test]
    fn test_to_matrix() {
        let skew = Operation::Skew(DVec2::new(45.0, 0.0)).to_matrix();
        assert!(approx_eq(skew.get(1, 0), 1.0));
        assert_eq!(skew.get(0, 1), 0.0);

        let perspective = Operation::Perspective(500.0).to_matrix();
        assert!(approx_eq(perspective.get(2, 3), -0.002));

        let rotation = rotate(0.0, 0.0, 1.0, 90.0).to_matrix();
        assert!(approx_eq(rotation.get(0, 0), 0.0));
        assert!(approx_eq(rotation.get(0, 1), 1.0));
        assert!(approx_eq(rotation.get(1, 0), -1.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Operation::Translate(DVec3::new(10.0, 0.0, -2.5)).to_string(),
            "translate3d(10px, 0px, -2.5px)"
        );
        assert_eq!(
            Operation::Scale(DVec3::new(2.0, 2.0, 1.0)).to_string(),
            "scale3d(2, 2, 1)"
        );
        assert_eq!(rotate(0.0, 0.0, 1.0, 90.0).to_string(), "rotate3d(0, 0, 1, 90deg)");
        assert_eq!(
            Operation::Skew(DVec2::new(10.0, 0.0)).to_string(),
            "skewX(10) skewY(0)"
        );
        assert_eq!(Operation::Perspective(500.0).to_string(), "perspective(500)");
        assert_eq!(
            Operation::from(Matrix3d::IDENTITY).to_string(),
            "matrix3d(1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1)"
        );
    }

    #[test]
    fn test_nan_propagates() {
        let op = Operation::Translate(DVec3::new(f64::NAN, 0.0, 0.0));
        assert_ne!(op, op.clone());
        assert_eq!(op.to_string(), "translate3d(NaNpx, 0px, 0px)");
        assert!(op.to_matrix().get(3, 0).is_nan());
    }
}
