//! Display trait implementations for leaf and IR types.
//!
//! Leaf displays reconstruct a constructor-style description from the shape
//! and any non-default attributes. These strings are for diagnostics and IR
//! labeling only, never for persistence or equality.

use std::fmt;

use crate::leaf::{Constant, Leaf, Parameter, Variable};
use crate::lin_op::{ConstrKind, LinOp, LinOpKind};

fn write_ctor(
    f: &mut fmt::Formatter<'_>,
    ctor: &str,
    shape: &crate::shape::Shape,
    flags: &[&str],
) -> fmt::Result {
    write!(f, "{}({}", ctor, shape)?;
    for flag in flags {
        write!(f, ", {}", flag)?;
    }
    write!(f, ")")
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ctor(f, "Parameter", self.shape(), &self.attributes().flag_names())
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ctor(f, "Variable", self.shape(), &self.attributes().flag_names())
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ctor(f, "Constant", self.shape(), &[])
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leaf::Constant(c) => c.fmt(f),
            Leaf::Parameter(p) => p.fmt(f),
            Leaf::Variable(v) => v.fmt(f),
        }
    }
}

impl fmt::Display for LinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LinOpKind::Variable(id) => write!(f, "var[{}]{}", id, self.shape),
            LinOpKind::Parameter(id) => write!(f, "param[{}]{}", id, self.shape),
            LinOpKind::Constant(_) => write!(f, "const{}", self.shape),
        }
    }
}

impl fmt::Display for ConstrKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstrKind::Eq => write!(f, "=="),
            ConstrKind::Leq => write!(f, "<="),
        }
    }
}
