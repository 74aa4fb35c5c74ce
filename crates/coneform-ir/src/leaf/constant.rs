//! Constant leaves: fixed values baked into the expression graph.

use std::hash::{Hash, Hasher};

use ndarray::{arr0, ArrayD};
use serde::{Deserialize, Serialize};

use crate::id::{fresh_id, LeafId};
use crate::lin_op::{LinConstraint, LinOp};
use crate::shape::Shape;

/// A leaf whose value is fixed at construction and immutable thereafter.
///
/// Constants carry no declared attributes; their mathematical properties are
/// whatever the data exhibits, and reasoning about those belongs to the
/// expression algebra above this layer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Constant {
    id: LeafId,
    shape: Shape,
    name: String,
    value: ArrayD<f64>,
}

impl Constant {
    /// Wrap a dense array; the shape is derived from the data.
    pub fn new(value: ArrayD<f64>) -> Self {
        let id = fresh_id();
        Constant {
            id,
            shape: Shape::from(value.shape()),
            name: format!("const{}", id),
            value,
        }
    }

    /// A scalar constant.
    pub fn scalar(value: f64) -> Self {
        Self::new(arr0(value).into_dyn())
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn id(&self) -> LeafId {
        self.id
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fixed value. Always present.
    pub fn value(&self) -> &ArrayD<f64> {
        &self.value
    }

    /// Lower to a constant IR node. Leaves generate no constraints.
    pub fn canonicalize(&self) -> (LinOp, Vec<LinConstraint>) {
        (LinOp::constant(self.value.clone()), Vec::new())
    }
}

impl PartialEq for Constant {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Constant {}

impl Hash for Constant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
