//! Leaf nodes of the linear-operator IR.
//!
//! Canonicalization lowers each leaf into one [`LinOp`] tagged with the
//! leaf's shape and, for parameters and variables, its identity. The
//! downstream reduction pass keys on that identity to substitute numeric
//! values per solve without re-lowering the expression graph.

use ndarray::ArrayD;
use serde::{Deserialize, Serialize};

use crate::id::{fresh_id, LeafId};
use crate::shape::Shape;

/// The three leaf node kinds of the linear IR.
///
/// Composite operator nodes (sums, products, reshapes, ...) are produced by
/// the expression algebra above this layer and are out of scope here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LinOpKind {
    /// An unknown to be determined by the solver.
    Variable(LeafId),
    /// A named constant whose numeric value is substituted at solve time.
    Parameter(LeafId),
    /// A fixed dense value, baked in at lowering time.
    Constant(ArrayD<f64>),
}

/// One node of the linear-operator IR.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinOp {
    pub kind: LinOpKind,
    pub shape: Shape,
}

impl LinOp {
    pub fn variable(id: LeafId, shape: Shape) -> Self {
        LinOp {
            kind: LinOpKind::Variable(id),
            shape,
        }
    }

    pub fn parameter(id: LeafId, shape: Shape) -> Self {
        LinOp {
            kind: LinOpKind::Parameter(id),
            shape,
        }
    }

    /// A constant node; the shape is derived from the data.
    pub fn constant(data: ArrayD<f64>) -> Self {
        let shape = Shape::from(data.shape());
        LinOp {
            kind: LinOpKind::Constant(data),
            shape,
        }
    }

    /// The identity of the originating leaf, for nodes that carry one.
    /// Constant nodes are self-contained and have none.
    pub fn leaf_id(&self) -> Option<LeafId> {
        match &self.kind {
            LinOpKind::Variable(id) | LinOpKind::Parameter(id) => Some(*id),
            LinOpKind::Constant(_) => None,
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self.kind, LinOpKind::Variable(_))
    }

    pub fn is_parameter(&self) -> bool {
        matches!(self.kind, LinOpKind::Parameter(_))
    }

    pub fn is_constant(&self) -> bool {
        matches!(self.kind, LinOpKind::Constant(_))
    }
}

/// Constraint sense of a [`LinConstraint`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstrKind {
    Eq,
    Leq,
}

/// A constraint generated during canonicalization.
///
/// Leaves never generate constraints themselves; this type exists at the
/// boundary because the canonicalization contract returns a constraint list
/// and composite atoms above this layer do populate it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinConstraint {
    pub kind: ConstrKind,
    pub expr: LinOp,
    /// Identity of the constraint itself, drawn from the same allocator as
    /// leaf identities so dual values can be keyed uniformly.
    pub constr_id: LeafId,
    pub shape: Shape,
}

impl LinConstraint {
    pub fn eq(expr: LinOp) -> Self {
        let shape = expr.shape.clone();
        LinConstraint {
            kind: ConstrKind::Eq,
            expr,
            constr_id: fresh_id(),
            shape,
        }
    }

    pub fn leq(expr: LinOp) -> Self {
        let shape = expr.shape.clone();
        LinConstraint {
            kind: ConstrKind::Leq,
            expr,
            constr_id: fresh_id(),
            shape,
        }
    }
}
