//! Ordered transform lists with a CSS-like builder.
//!
//! # Usage
//!
//! ```
//! use transform3d_ops::TransformList;
//!
//! let from = TransformList::new().translate3d(10.0, 0.0, 0.0).scale(2.0);
//! assert_eq!(from.to_string(), "translate3d(10px, 0px, 0px) scale3d(2, 2, 1)");
//!
//! let to = TransformList::new().translate_x(50.0).scale(4.0);
//! let halfway = from.interpolation(&to).step(0.5);
//! assert_eq!(halfway.to_string(), "translate3d(30px, 0px, 0px) scale3d(3, 3, 1)");
//! ```

use std::fmt;

use glam::{DVec2, DVec3};
use transform3d_math::{AxisAngle, Matrix3d};

use crate::interpolation::InterpolationPlan;
use crate::operation::Operation;

/// An ordered list of transform operations.
///
/// Order matters both for composition and for matching two lists during
/// interpolation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformList {
    operations: Vec<Operation>,
}

impl TransformList {
    /// Create a new empty transform list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation, builder style.
    pub fn append(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    /// Append an operation in place.
    pub fn push(&mut self, operation: Operation) -> &mut Self {
        self.operations.push(operation);
        self
    }

    // matrix

    pub fn matrix3d(self, values: [f64; 16]) -> Self {
        self.append(Operation::from(Matrix3d::from_css_array(values)))
    }

    pub fn matrix(self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        self.append(Operation::from(Matrix3d::from_2d(a, b, c, d, e, f)))
    }

    // translate

    pub fn translate3d(self, x: f64, y: f64, z: f64) -> Self {
        self.append(Operation::Translate(DVec3::new(x, y, z)))
    }

    pub fn translate(self, x: f64, y: f64) -> Self {
        self.translate3d(x, y, 0.0)
    }

    pub fn translate_x(self, x: f64) -> Self {
        self.translate(x, 0.0)
    }

    pub fn translate_y(self, y: f64) -> Self {
        self.translate(0.0, y)
    }

    pub fn translate_z(self, z: f64) -> Self {
        self.translate3d(0.0, 0.0, z)
    }

    // scale

    pub fn scale3d(self, x: f64, y: f64, z: f64) -> Self {
        self.append(Operation::Scale(DVec3::new(x, y, z)))
    }

    /// Uniform 2D scale.
    pub fn scale(self, s: f64) -> Self {
        self.scale_xy(s, s)
    }

    pub fn scale_xy(self, x: f64, y: f64) -> Self {
        self.scale3d(x, y, 1.0)
    }

    pub fn scale_x(self, x: f64) -> Self {
        self.scale_xy(x, 1.0)
    }

    pub fn scale_y(self, y: f64) -> Self {
        self.scale_xy(1.0, y)
    }

    pub fn scale_z(self, z: f64) -> Self {
        self.scale3d(1.0, 1.0, z)
    }

    // rotate, angles in degrees

    pub fn rotate3d(self, x: f64, y: f64, z: f64, angle: f64) -> Self {
        self.append(Operation::Rotate(AxisAngle::from_components(x, y, z, angle)))
    }

    pub fn rotate(self, angle: f64) -> Self {
        self.rotate3d(0.0, 0.0, 1.0, angle)
    }

    pub fn rotate_x(self, angle: f64) -> Self {
        self.rotate3d(1.0, 0.0, 0.0, angle)
    }

    pub fn rotate_y(self, angle: f64) -> Self {
        self.rotate3d(0.0, 1.0, 0.0, angle)
    }

    pub fn rotate_z(self, angle: f64) -> Self {
        self.rotate3d(0.0, 0.0, 1.0, angle)
    }

    // skew, angles in degrees

    pub fn skew(self, x: f64, y: f64) -> Self {
        self.append(Operation::Skew(DVec2::new(x, y)))
    }

    pub fn skew_x(self, x: f64) -> Self {
        self.skew(x, 0.0)
    }

    pub fn skew_y(self, y: f64) -> Self {
        self.skew(0.0, y)
    }

    // perspective

    pub fn perspective(self, length: f64) -> Self {
        self.append(Operation::Perspective(length))
    }

    /// True when the list is empty or every operation is an identity.
    pub fn is_identity(&self) -> bool {
        self.operations.iter().all(Operation::is_identity)
    }

    /// Multiply every operation's matrix together, in list order.
    pub fn compose(&self) -> Matrix3d {
        self.operations
            .iter()
            .fold(Matrix3d::IDENTITY, |matrix, operation| {
                matrix.multiply(&operation.to_matrix())
            })
    }

    /// Plan an interpolation from this list to `to`.
    pub fn interpolation(&self, to: &TransformList) -> InterpolationPlan {
        InterpolationPlan::new(self, to)
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.operations.iter()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl FromIterator<Operation> for TransformList {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        Self {
            operations: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Operation>> for TransformList {
    fn from(operations: Vec<Operation>) -> Self {
        Self { operations }
    }
}

impl IntoIterator for TransformList {
    type Item = Operation;
    type IntoIter = std::vec::IntoIter<Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.into_iter()
    }
}

impl<'a> IntoIterator for &'a TransformList {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}

impl fmt::Display for TransformList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, operation) in self.operations.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{operation}")?;
        }
        Ok(())
    }
}
