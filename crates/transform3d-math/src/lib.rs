//! Matrix, vector and quaternion primitives for 3D CSS-style transforms.
//!
//! This crate provides:
//! - **Matrix3d**: a 4x4 matrix addressed in CSS `matrix3d()` order
//! - **Decomposition**: factoring a matrix into translation, scale, skew,
//!   perspective and a rotation quaternion, and recomposing it
//! - **AxisAngle**: `rotate3d()`-style rotations and their quaternion form
//! - **Interpolate**: linear / spherical blending of all of the above
//!
//! Vectors and quaternions are plain `glam` double precision types.

pub mod axis_angle;
pub mod decompose;
pub mod interpolate;
pub mod matrix;

pub use axis_angle::AxisAngle;
pub use decompose::DecomposedMatrix;
pub use glam::{DQuat, DVec2, DVec3, DVec4};
pub use interpolate::{Interpolate, lerp};
pub use matrix::Matrix3d;

/// Tolerance used when deciding whether two rotation axes are parallel.
pub const EPSILON: f64 = 1e-4;
