//! Interpolation between two transform lists.
//!
//! Implements the matching rules of CSS Transforms "Interpolation of
//! Transforms", as Chromium's `TransformOperations::BlendInternal` applies
//! them:
//!
//! ```text
//! from identity        -> identity ops shaped like `to`, pairwise
//! to identity          -> identity ops shaped like `from`, pairwise
//! same length, kinds   -> pairwise, identity ops adopt the other side's kind
//! anything else        -> one matrix op per side, decomposed matrix blend
//! ```
//!
//! The plan is built once; [`InterpolationPlan::step`] can then be sampled
//! at any progress without touching the plan.

use tracing::debug;

use crate::list::TransformList;
use crate::operation::{MatrixOperation, Operation};

/// How the two lists were paired up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanMatching {
    /// `from` was empty or all identity.
    FromIdentity,
    /// `to` was empty or all identity.
    ToIdentity,
    /// Same length lists matched index by index.
    Pairwise,
    /// Both lists collapsed to their composed matrices.
    MatrixFallback,
}

/// Paired operations ready to be sampled.
#[derive(Debug, Clone)]
pub struct InterpolationPlan {
    from: Vec<Operation>,
    to: Vec<Operation>,
    matching: PlanMatching,
}

impl InterpolationPlan {
    pub fn new(from: &TransformList, to: &TransformList) -> Self {
        let plan = if from.is_identity() {
            Self {
                from: identities_like(to),
                to: to.operations().to_vec(),
                matching: PlanMatching::FromIdentity,
            }
        } else if to.is_identity() {
            Self {
                from: from.operations().to_vec(),
                to: identities_like(from),
                matching: PlanMatching::ToIdentity,
            }
        } else if from.len() == to.len() {
            match match_pairwise(from, to) {
                Some(paired) => Self {
                    from: paired,
                    to: to.operations().to_vec(),
                    matching: PlanMatching::Pairwise,
                },
                None => Self::matrix_fallback(from, to),
            }
        } else {
            Self::matrix_fallback(from, to)
        };

        debug!(
            matching = ?plan.matching,
            len = plan.len(),
            from_len = from.len(),
            to_len = to.len(),
            "built transform interpolation plan"
        );
        plan
    }

    fn matrix_fallback(from: &TransformList, to: &TransformList) -> Self {
        Self {
            from: vec![Operation::Matrix(MatrixOperation::new(from.compose()))],
            to: vec![Operation::Matrix(MatrixOperation::new(to.compose()))],
            matching: PlanMatching::MatrixFallback,
        }
    }

    /// Sample the interpolation at `delta`.
    ///
    /// `0` and `1` return the planned endpoints verbatim. Other values,
    /// including ones outside `[0, 1]`, blend every pair whose endpoints
    /// differ and copy the ones that are equal.
    pub fn step(&self, delta: f64) -> TransformList {
        self.step_with(delta, Operation::blend)
    }

    fn step_with<F>(&self, delta: f64, blend: F) -> TransformList
    where
        F: Fn(&Operation, &Operation, f64) -> Operation,
    {
        if delta == 0.0 {
            return self.from.iter().cloned().collect();
        }
        if delta == 1.0 {
            return self.to.iter().cloned().collect();
        }

        self.from
            .iter()
            .zip(&self.to)
            .map(|(from, to)| {
                if from == to {
                    from.clone()
                } else {
                    blend(from, to, delta)
                }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.from.len()
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_empty()
    }

    pub fn matching(&self) -> PlanMatching {
        self.matching
    }

    pub fn is_fallback(&self) -> bool {
        self.matching == PlanMatching::MatrixFallback
    }

    pub fn from_operations(&self) -> &[Operation] {
        &self.from
    }

    pub fn to_operations(&self) -> &[Operation] {
        &self.to
    }
}

fn identities_like(list: &TransformList) -> Vec<Operation> {
    list.iter().map(|operation| operation.kind().identity()).collect()
}

/// Reconcile kinds index by index, or `None` if two non-identity operations
/// of different kinds meet.
///
/// When only `to` is the identity, `from` is reset to the identity of its
/// *own* kind, so the pair still differs in kind. Chromium does the same.
fn match_pairwise(from: &TransformList, to: &TransformList) -> Option<Vec<Operation>> {
    let mut paired = from.operations().to_vec();

    for (source, target) in paired.iter_mut().zip(to) {
        if source.kind() == target.kind() {
            continue;
        }
        if source.is_identity() {
            *source = target.kind().identity();
        } else if target.is_identity() {
            *source = source.kind().identity();
        } else {
            return None;
        }
    }

    Some(paired)
}
