//! CSS-style 3D transform lists and their interpolation.
//!
//! This crate provides:
//! - **Operation**: translate / scale / rotate / skew / perspective / matrix
//!   values with identity, equality, blending and matrix conversion
//! - **TransformList**: an ordered list of operations with a CSS-like builder
//! - **InterpolationPlan**: the pairing of two lists, sampled with `step`
//!
//! # Architecture
//!
//! ```text
//! TransformList (from) ─┐
//!                       ├─ InterpolationPlan::new ─ step(t) ─> TransformList
//! TransformList (to) ───┘
//! ```

pub mod interpolation;
pub mod list;
pub mod operation;

pub use interpolation::{InterpolationPlan, PlanMatching};
pub use list::TransformList;
pub use operation::{MatrixOperation, Operation, OperationKind};

// Plans are sampled from several threads at once.
static_assertions::assert_impl_all!(Operation: Send, Sync, Clone);
static_assertions::assert_impl_all!(TransformList: Send, Sync, Clone);
static_assertions::assert_impl_all!(InterpolationPlan: Send, Sync, Clone);
