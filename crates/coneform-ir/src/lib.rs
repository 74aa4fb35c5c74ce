//! # Coneform IR
//!
//! **Leaf expressions and linear-operator IR for the coneform
//! convex-modeling toolkit**
//!
//! This crate is the seam between the symbolic, user-facing expression
//! algebra and the strict numerical IR a solver backend consumes: the atomic
//! building blocks of an optimization problem (constants, parameters,
//! decision variables) and the protocol that lowers them into
//! linear-operator nodes for the conic-reduction pipeline.
//!
//! ## Core Components
//!
//! ### Leaves ([`Leaf`])
//! The childless nodes of an expression graph, a closed set of three
//! variants differing in who owns their value:
//! - [`Constant`]: value fixed at construction, immutable thereafter
//! - [`Parameter`]: value set and replaced by the user at any time between
//!   problem construction and solves
//! - [`Variable`]: value solver-owned, written only by a backend after a
//!   solve
//!
//! Every leaf carries a process-unique [`LeafId`], a [`Shape`], a validated
//! [`Attributes`] record, and a name used for diagnostics. Equality and
//! hashing are by identity only: two leaves with the same shape and value
//! are still distinct graph nodes.
//!
//! ### Attributes ([`Attributes`])
//! Declared mathematical properties (sign, symmetry, integrality,
//! definiteness) checked for mutual consistency exactly once, at leaf
//! construction. A leaf never exists in an inconsistent state; every later
//! value write is validated against the declared attributes and rejected
//! without mutating state on failure.
//!
//! ### Canonicalization ([`Leaf::canonicalize`], [`CanonTable`])
//! Lowering a leaf produces one [`LinOp`] node tagged with the leaf's shape
//! and identity, plus an always-empty constraint list (only composite atoms
//! generate constraints). Canonicalization is structural: a parameter
//! canonicalizes the same way with or without a value, so a problem can be
//! lowered once and re-solved many times while only parameter values change.
//! [`CanonTable`] is the consumer-side mapping from identity to node that
//! makes repeated lowerings dedup and per-solve value substitution possible;
//! its [`read_value`](CanonTable::read_value) is where a still-unset
//! parameter finally becomes a hard error.
//!
//! ## Quick Start
//!
//! ```rust
//! use coneform_ir::{Attributes, CanonTable, Leaf, Parameter};
//! use ndarray::arr1;
//!
//! // A nonnegative parameter; no value yet.
//! let param = Parameter::with_attributes(3, Attributes::new().with_nonneg())
//!     .unwrap()
//!     .named("weights");
//! assert!(param.value().is_none());
//!
//! // Canonicalize before any value exists.
//! let leaf = Leaf::from(param);
//! let mut table = CanonTable::new();
//! let node = table.intern(&leaf).clone();
//! assert_eq!(node.leaf_id(), Some(leaf.id()));
//!
//! // Supply a value later; the IR node is unchanged.
//! let mut param = match leaf {
//!     Leaf::Parameter(p) => p,
//!     _ => unreachable!(),
//! };
//! param.set_value(arr1(&[0.5, 1.0, 1.5]).into_dyn()).unwrap();
//! assert_eq!(table.intern(&Leaf::from(param)).clone(), node);
//! ```
//!
//! ## Architecture
//!
//! - **id**: leaf identities and the allocator that issues them
//! - **shape**: tensor shapes
//! - **attributes**: the declared-attribute record and its validator
//! - **value**: numeric validation of candidate values
//! - **leaf**: the three leaf variants and their capability surface
//! - **sparse**: CSC matrices for the gradient contract
//! - **lin_op**: leaf nodes of the linear-operator IR
//! - **canon**: the identity-to-node table for the reduction pipeline
//! - **error**: error types
//!
//! The expression algebra, the conic reduction pass and the solver backends
//! live in sibling crates and consume this one at the boundaries described
//! above.

mod attributes;
mod canon;
mod display;
mod error;
mod id;
mod leaf;
mod lin_op;
mod shape;
mod sparse;
mod value;

#[cfg(test)]
mod tests;

pub use attributes::Attributes;
pub use canon::CanonTable;
pub use error::IrError;
pub use id::{fresh_id, IdAllocator, LeafId};
pub use leaf::{Constant, Leaf, Parameter, Variable};
pub use lin_op::{ConstrKind, LinConstraint, LinOp, LinOpKind};
pub use shape::Shape;
pub use sparse::CscMatrix;
pub use value::checked_value;
