//! Variable leaves: the unknowns a solve determines.

use std::hash::{Hash, Hasher};

use ndarray::ArrayD;
use serde::{Deserialize, Serialize};

use crate::attributes::Attributes;
use crate::error::IrError;
use crate::id::{fresh_id, LeafId};
use crate::lin_op::{LinConstraint, LinOp};
use crate::shape::Shape;

/// A leaf whose value is solver-owned: unset until a backend writes the
/// solution, never user-settable before a solve.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Variable {
    id: LeafId,
    shape: Shape,
    attributes: Attributes,
    name: String,
    value: Option<ArrayD<f64>>,
}

impl Variable {
    /// A variable with no declared attributes and a generated name.
    pub fn new(shape: impl Into<Shape>) -> Self {
        let id = fresh_id();
        Variable {
            id,
            shape: shape.into(),
            attributes: Attributes::default(),
            name: format!("var{}", id),
            value: None,
        }
    }

    /// A variable with declared attributes. Fails if the attributes are
    /// mutually inconsistent or inconsistent with the shape.
    pub fn with_attributes(
        shape: impl Into<Shape>,
        attributes: Attributes,
    ) -> Result<Self, IrError> {
        let shape = shape.into();
        attributes.validate(&shape)?;
        let id = fresh_id();
        Ok(Variable {
            id,
            shape,
            attributes,
            name: format!("var{}", id),
            value: None,
        })
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

    pub fn attributes(&self) -> Attributes {
        self.attributes
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The solution value, or `None` before any solve has written one.
    pub fn value(&self) -> Option<&ArrayD<f64>> {
        self.value.as_ref()
    }

    /// Backend-facing write of the solution. The shape must match; declared
    /// attributes are not re-checked, since solver output may sit within
    /// numerical tolerance of an attribute boundary and projection belongs to
    /// the reduction layer.
    pub fn save_solver_value(&mut self, value: ArrayD<f64>) -> Result<(), IrError> {
        if value.shape() != self.shape.dims() {
            return Err(IrError::ShapeMismatch {
                expected: self.shape.to_string(),
                actual: Shape::from(value.shape()).to_string(),
            });
        }
        self.value = Some(value);
        Ok(())
    }

    /// The identity derivative with respect to itself, on vectorized entries.
    pub fn self_gradient(&self) -> crate::sparse::CscMatrix {
        crate::sparse::CscMatrix::identity(self.shape.size())
    }

    /// Lower to a variable IR node keyed by this leaf's identity.
    pub fn canonicalize(&self) -> (LinOp, Vec<LinConstraint>) {
        (LinOp::variable(self.id, self.shape.clone()), Vec::new())
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
