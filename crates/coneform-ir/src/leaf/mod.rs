//! Leaves: the atomic nodes of the expression graph.
//!
//! A leaf has no children; composite expressions (built by the algebra layer
//! above this crate) own references to leaves and must treat identity, not
//! structural content, as the equality key. The three variants form a closed
//! set: every capability below is a compiler-checked exhaustive match, so a
//! fourth, unspecified variant cannot slip in behind the contracts.

mod constant;
mod parameter;
mod variable;

use std::collections::HashMap;

use ndarray::ArrayD;
use serde::{Deserialize, Serialize};

pub use constant::Constant;
pub use parameter::Parameter;
pub use variable::Variable;

use crate::attributes::Attributes;
use crate::id::LeafId;
use crate::lin_op::{LinConstraint, LinOp};
use crate::shape::Shape;
use crate::sparse::CscMatrix;

/// An atomic expression: a constant, a parameter, or a variable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Leaf {
    Constant(Constant),
    Parameter(Parameter),
    Variable(Variable),
}

impl Leaf {
    pub fn id(&self) -> LeafId {
        match self {
            Leaf::Constant(c) => c.id(),
            Leaf::Parameter(p) => p.id(),
            Leaf::Variable(v) => v.id(),
        }
    }

    pub fn shape(&self) -> &Shape {
        match self {
            Leaf::Constant(c) => c.shape(),
            Leaf::Parameter(p) => p.shape(),
            Leaf::Variable(v) => v.shape(),
        }
    }

    /// Declared attributes. Constants declare none.
    pub fn attributes(&self) -> Attributes {
        match self {
            Leaf::Constant(_) => Attributes::default(),
            Leaf::Parameter(p) => p.attributes(),
            Leaf::Variable(v) => v.attributes(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Leaf::Constant(c) => c.name(),
            Leaf::Parameter(p) => p.name(),
            Leaf::Variable(v) => v.name(),
        }
    }

    /// The current numeric value, or `None` if not yet determined.
    pub fn value(&self) -> Option<&ArrayD<f64>> {
        match self {
            Leaf::Constant(c) => Some(c.value()),
            Leaf::Parameter(p) => p.value(),
            Leaf::Variable(v) => v.value(),
        }
    }

    /// (Sub/super)gradient of this expression with respect to each variable
    /// it touches, keyed by identity.
    ///
    /// Constants and parameters are not differentiation targets and map to an
    /// empty gradient; a variable self-maps with an identity derivative on
    /// its vectorized entries.
    pub fn grad(&self) -> HashMap<LeafId, Option<CscMatrix>> {
        match self {
            Leaf::Constant(_) | Leaf::Parameter(_) => HashMap::new(),
            Leaf::Variable(v) => {
                let mut map = HashMap::new();
                map.insert(v.id(), Some(v.self_gradient()));
                map
            }
        }
    }

    /// The parameters referenced by this expression: itself for a parameter,
    /// empty otherwise.
    pub fn parameters(&self) -> Vec<&Parameter> {
        match self {
            Leaf::Parameter(p) => vec![p],
            Leaf::Constant(_) | Leaf::Variable(_) => Vec::new(),
        }
    }

    /// The variables referenced by this expression.
    pub fn variables(&self) -> Vec<&Variable> {
        match self {
            Leaf::Variable(v) => vec![v],
            Leaf::Constant(_) | Leaf::Parameter(_) => Vec::new(),
        }
    }

    /// The constants referenced by this expression.
    pub fn constants(&self) -> Vec<&Constant> {
        match self {
            Leaf::Constant(c) => vec![c],
            Leaf::Parameter(_) | Leaf::Variable(_) => Vec::new(),
        }
    }

    /// True when the expression does not depend on any variable. Parameters
    /// count as constant expressions: their value is fixed for the duration
    /// of any single solve.
    pub fn is_constant(&self) -> bool {
        !matches!(self, Leaf::Variable(_))
    }

    pub fn as_constant(&self) -> Option<&Constant> {
        match self {
            Leaf::Constant(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_parameter(&self) -> Option<&Parameter> {
        match self {
            Leaf::Parameter(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Leaf::Variable(v) => Some(v),
            _ => None,
        }
    }

    /// Lower this leaf to one IR node plus generated constraints. Leaves
    /// never generate constraints; the list is populated only by composite
    /// atoms above this layer.
    pub fn canonicalize(&self) -> (LinOp, Vec<LinConstraint>) {
        match self {
            Leaf::Constant(c) => c.canonicalize(),
            Leaf::Parameter(p) => p.canonicalize(),
            Leaf::Variable(v) => v.canonicalize(),
        }
    }
}

impl std::hash::Hash for Leaf {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl From<Constant> for Leaf {
    fn from(c: Constant) -> Self {
        Leaf::Constant(c)
    }
}

impl From<Parameter> for Leaf {
    fn from(p: Parameter) -> Self {
        Leaf::Parameter(p)
    }
}

impl From<Variable> for Leaf {
    fn from(v: Variable) -> Self {
        Leaf::Variable(v)
    }
}
