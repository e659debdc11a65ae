//! 4x4 transform matrix in CSS `matrix3d()` order.
//!
//! Entries are named the way CSS Transforms Level 2 names them:
//! ```text
//! matrix3d(m11, m12, m13, m14,
//!          m21, m22, m23, m24,
//!          m31, m32, m33, m34,
//!          m41, m42, m43, m44)
//! ```
//! `m41..m43` hold the translation and `m14..m34` the perspective column.
//! This is exactly glam's column-major storage, so `m{r}{c}` lives in
//! column `r - 1`, component `c - 1`.

use std::fmt;

use glam::{DMat4, DQuat, DVec3};

use crate::decompose::DecomposedMatrix;

/// A 4x4 transform matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3d(DMat4);

impl Default for Matrix3d {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix3d {
    pub const IDENTITY: Self = Self(DMat4::IDENTITY);

    /// Build from the 16 arguments of a CSS `matrix3d()` function.
    pub fn from_css_array(values: [f64; 16]) -> Self {
        Self(DMat4::from_cols_array(&values))
    }

    /// Build from the 6 arguments of a CSS `matrix()` function.
    pub fn from_2d(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self::from_css_array([
            a, b, 0.0, 0.0, //
            c, d, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            e, f, 0.0, 1.0,
        ])
    }

    pub fn from_dmat4(matrix: DMat4) -> Self {
        Self(matrix)
    }

    pub fn translation(offset: DVec3) -> Self {
        Self(DMat4::from_translation(offset))
    }

    pub fn scale(factor: DVec3) -> Self {
        Self(DMat4::from_scale(factor))
    }

    pub fn rotation(quaternion: DQuat) -> Self {
        Self(DMat4::from_quat(quaternion))
    }

    /// Shear matrix from the tangents of the two skew angles.
    pub fn skew(tan_x: f64, tan_y: f64) -> Self {
        let mut matrix = Self::IDENTITY;
        matrix.set(1, 0, tan_x);
        matrix.set(0, 1, tan_y);
        matrix
    }

    /// Perspective projection with the viewer `length` units away.
    ///
    /// A length of zero means no perspective and yields the identity.
    pub fn perspective(length: f64) -> Self {
        let mut matrix = Self::IDENTITY;
        if length != 0.0 {
            matrix.set(2, 3, -1.0 / length);
        }
        matrix
    }

    /// Read `m{row+1}{col+1}`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.0.col(row)[col]
    }

    /// Write `m{row+1}{col+1}`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.0.col_mut(row)[col] = value;
    }

    /// Compose `other` after `self` in CSS list order.
    ///
    /// `a.multiply(&b)` is the matrix of the transform list `a b`: points are
    /// mapped by `b` first, then by `a`.
    pub fn multiply(&self, other: &Self) -> Self {
        Self(self.0 * other.0)
    }

    pub fn is_identity(&self) -> bool {
        self.0 == DMat4::IDENTITY
    }

    /// Element-wise comparison within `epsilon`.
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.0.abs_diff_eq(other.0, epsilon)
    }

    pub fn determinant(&self) -> f64 {
        self.0.determinant()
    }

    pub fn to_css_array(&self) -> [f64; 16] {
        self.0.to_cols_array()
    }

    pub fn as_dmat4(&self) -> &DMat4 {
        &self.0
    }

    /// Factor into translation, scale, skew, perspective and rotation.
    ///
    /// Returns `None` for matrices that cannot be decomposed (`m44 == 0` or a
    /// singular upper 3x3).
    pub fn decompose(&self) -> Option<DecomposedMatrix> {
        DecomposedMatrix::from_matrix(self)
    }
}

impl From<DMat4> for Matrix3d {
    fn from(matrix: DMat4) -> Self {
        Self(matrix)
    }
}

impl fmt::Display for Matrix3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("matrix3d(")?;
        for (i, value) in self.to_css_array().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str(")")
    }
}
