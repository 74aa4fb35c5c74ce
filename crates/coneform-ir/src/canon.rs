//! Canonicalization table: the reduction-pipeline side of the lowering
//! contract.
//!
//! The consumer of `canonicalize()` must keep a mapping from leaf identity to
//! the most recent IR node, so repeated canonicalizations of one leaf (the
//! same parameter appearing in several sub-expressions, or the same problem
//! re-lowered) dedup to a single unknown, and so parameter values can be
//! substituted per solve without re-walking the expression graph. This module
//! is that mapping.

use std::collections::HashMap;

use indexmap::IndexMap;
use ndarray::ArrayD;

use crate::error::IrError;
use crate::id::LeafId;
use crate::leaf::Leaf;
use crate::lin_op::LinOp;

/// Interning table from leaf identity to IR node.
///
/// Iteration order is insertion order, which keeps downstream traversal
/// deterministic across runs with the same construction order.
#[derive(Debug, Default)]
pub struct CanonTable {
    nodes: IndexMap<LeafId, LinOp>,
}

impl CanonTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonicalize `leaf` and record its node, or return the node already
    /// recorded for this identity. Two interns of the same leaf instance
    /// always yield the same node.
    pub fn intern(&mut self, leaf: &Leaf) -> &LinOp {
        self.nodes.entry(leaf.id()).or_insert_with(|| {
            let (node, constraints) = leaf.canonicalize();
            debug_assert!(constraints.is_empty(), "leaves generate no constraints");
            node
        })
    }

    /// The node recorded for `id`, if any.
    pub fn node(&self, id: LeafId) -> Option<&LinOp> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: LeafId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Recorded `(identity, node)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (LeafId, &LinOp)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    /// Solve-time read of a leaf's numeric value.
    ///
    /// A parameter or variable without a value fails with
    /// [`IrError::UnsetValue`], never a silent default. Constants always
    /// read.
    pub fn read_value(&self, leaf: &Leaf) -> Result<ArrayD<f64>, IrError> {
        leaf.value().cloned().ok_or_else(|| IrError::UnsetValue {
            leaf: leaf.name().to_string(),
        })
    }

    /// Collect the current values of all interned parameters among `leaves`,
    /// keyed by identity. Fails on the first parameter with no value; a
    /// failed collection substitutes nothing.
    pub fn parameter_values<'a>(
        &self,
        leaves: impl IntoIterator<Item = &'a Leaf>,
    ) -> Result<HashMap<LeafId, ArrayD<f64>>, IrError> {
        let mut values = HashMap::new();
        for leaf in leaves {
            if leaf.as_parameter().is_some() && self.contains(leaf.id()) {
                values.insert(leaf.id(), self.read_value(leaf)?);
            }
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::{Constant, Parameter, Variable};
    use ndarray::arr1;

    #[test]
    fn test_intern_dedups_by_identity() {
        let mut table = CanonTable::new();
        let leaf = Leaf::from(Parameter::new(3));

        let first = table.intern(&leaf).clone();
        let second = table.intern(&leaf).clone();
        assert_eq!(first, second);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_intern_before_and_after_value_set() {
        let mut table = CanonTable::new();
        let mut p = Parameter::new(2);

        let before = table.intern(&Leaf::from(p.clone())).clone();
        p.set_value(arr1(&[1.0, 2.0]).into_dyn()).unwrap();
        let after = table.intern(&Leaf::from(p)).clone();

        assert_eq!(before, after);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_distinct_leaves_get_distinct_nodes() {
        let mut table = CanonTable::new();
        let a = Leaf::from(Variable::new(2));
        let b = Leaf::from(Variable::new(2));

        table.intern(&a);
        table.intern(&b);
        assert_eq!(table.len(), 2);
        assert_ne!(
            table.node(a.id()).unwrap().leaf_id(),
            table.node(b.id()).unwrap().leaf_id()
        );
    }

    #[test]
    fn test_iteration_order_is_insertion_order() {
        let mut table = CanonTable::new();
        let leaves: Vec<Leaf> = (0..4).map(|_| Leaf::from(Variable::new(1))).collect();
        for leaf in &leaves {
            table.intern(leaf);
        }
        let order: Vec<LeafId> = table.iter().map(|(id, _)| id).collect();
        let expected: Vec<LeafId> = leaves.iter().map(|l| l.id()).collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn test_read_value_surfaces_unset() {
        let table = CanonTable::new();
        let unset = Leaf::from(Parameter::new(1).named("rho"));
        let err = table.read_value(&unset).unwrap_err();
        assert!(matches!(err, IrError::UnsetValue { ref leaf } if leaf.as_str() == "rho"));

        let constant = Leaf::from(Constant::scalar(2.0));
        assert!(table.read_value(&constant).is_ok());
    }

    #[test]
    fn test_parameter_values_substitution() {
        let mut table = CanonTable::new();
        let mut p = Parameter::new(2);
        p.set_value(arr1(&[1.0, 2.0]).into_dyn()).unwrap();
        let p = Leaf::from(p);
        let v = Leaf::from(Variable::new(2));
        table.intern(&p);
        table.intern(&v);

        let values = table.parameter_values([&p, &v]).unwrap();
        assert_eq!(values.len(), 1);
        assert!(values.contains_key(&p.id()));
    }

    #[test]
    fn test_parameter_values_fails_on_unset() {
        let mut table = CanonTable::new();
        let p = Leaf::from(Parameter::new(2));
        table.intern(&p);
        assert!(matches!(
            table.parameter_values([&p]),
            Err(IrError::UnsetValue { .. })
        ));
    }
}
