//! Parameter leaves: constants whose value is supplied after problem
//! creation.
//!
//! Parameters are the only handle for modifying a problem after it has been
//! built: canonicalize once, then sweep values through repeated solves (the
//! trade-off-curve workflow). Canonicalization is therefore a purely
//! structural operation here; it succeeds whether or not a value is set, and
//! a missing value only becomes an error when the solve pipeline reads it.

use std::hash::{Hash, Hasher};

use ndarray::ArrayD;
use serde::{Deserialize, Serialize};

use crate::attributes::Attributes;
use crate::error::IrError;
use crate::id::{fresh_id, LeafId};
use crate::lin_op::{LinConstraint, LinOp};
use crate::shape::Shape;
use crate::value::checked_value;

/// A leaf whose value may be set and replaced by the user at any time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Parameter {
    id: LeafId,
    shape: Shape,
    attributes: Attributes,
    name: String,
    value: Option<ArrayD<f64>>,
}

impl Parameter {
    /// A parameter with no declared attributes and a generated name.
    pub fn new(shape: impl Into<Shape>) -> Self {
        let id = fresh_id();
        Parameter {
            id,
            shape: shape.into(),
            attributes: Attributes::default(),
            name: format!("param{}", id),
            value: None,
        }
    }

    /// A parameter with declared attributes. Fails if the attributes are
    /// mutually inconsistent or inconsistent with the shape; no parameter
    /// exists on failure.
    pub fn with_attributes(
        shape: impl Into<Shape>,
        attributes: Attributes,
    ) -> Result<Self, IrError> {
        let shape = shape.into();
        attributes.validate(&shape)?;
        let id = fresh_id();
        Ok(Parameter {
            id,
            shape,
            attributes,
            name: format!("param{}", id),
            value: None,
        })
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set an initial value at construction time.
    pub fn with_value(mut self, value: ArrayD<f64>) -> Result<Self, IrError> {
        self.set_value(value)?;
        Ok(self)
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

    /// The current value, or `None` while unset.
    pub fn value(&self) -> Option<&ArrayD<f64>> {
        self.value.as_ref()
    }

    /// Validate `value` against the declared shape and attributes, then store
    /// it. On any failure the previously stored value is retained unchanged.
    pub fn set_value(&mut self, value: ArrayD<f64>) -> Result<(), IrError> {
        let accepted = checked_value(value, &self.shape, &self.attributes)?;
        self.value = Some(accepted);
        Ok(())
    }

    /// Unset the value. The next solve-time read will fail until a new value
    /// is supplied.
    pub fn clear_value(&mut self) {
        self.value = None;
    }

    /// Lower to a parameter IR node keyed by this leaf's identity. Succeeds
    /// whether or not a value is currently set.
    pub fn canonicalize(&self) -> (LinOp, Vec<LinConstraint>) {
        (LinOp::parameter(self.id, self.shape.clone()), Vec::new())
    }
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Parameter {}

impl Hash for Parameter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    #[test]
    fn test_new_parameter_has_no_value() {
        let p = Parameter::new(3);
        assert!(p.value().is_none());
        assert_eq!(p.shape(), &Shape::vector(3));
        assert_eq!(p.name(), format!("param{}", p.id()));
    }

    #[test]
    fn test_set_value_round_trip() {
        let mut p = Parameter::new(3);
        let v = arr1(&[1.0, 2.0, 3.0]).into_dyn();
        p.set_value(v.clone()).unwrap();
        assert_eq!(p.value(), Some(&v));
    }

    #[test]
    fn test_rejected_value_preserves_prior() {
        let mut p = Parameter::with_attributes((2, 2), Attributes::new().with_nonneg()).unwrap();
        let good = arr2(&[[1.0, 0.0], [0.0, 2.0]]).into_dyn();
        p.set_value(good.clone()).unwrap();

        let bad = arr2(&[[1.0, -1.0], [0.0, 2.0]]).into_dyn();
        let err = p.set_value(bad).unwrap_err();
        assert!(matches!(err, IrError::AttributeViolation { .. }));
        assert_eq!(p.value(), Some(&good));
    }

    #[test]
    fn test_rejected_value_on_unset_stays_unset() {
        let mut p = Parameter::with_attributes((2, 2), Attributes::new().with_nonneg()).unwrap();
        let bad = arr2(&[[1.0, -1.0], [0.0, 2.0]]).into_dyn();
        assert!(p.set_value(bad).is_err());
        assert!(p.value().is_none());
    }

    #[test]
    fn test_shape_mismatch_on_set() {
        let mut p = Parameter::new(3);
        let err = p.set_value(arr1(&[1.0, 2.0]).into_dyn()).unwrap_err();
        assert!(matches!(err, IrError::ShapeMismatch { .. }));
        assert!(p.value().is_none());
    }

    #[test]
    fn test_inconsistent_attributes_never_construct() {
        let attrs = Attributes::new().with_symmetric();
        assert!(Parameter::with_attributes((2, 3), attrs).is_err());
    }

    #[test]
    fn test_clear_value() {
        let mut p = Parameter::new(());
        p.set_value(ndarray::arr0(1.0).into_dyn()).unwrap();
        p.clear_value();
        assert!(p.value().is_none());
    }

    #[test]
    fn test_with_value_builder() {
        let p = Parameter::new(2)
            .with_value(arr1(&[1.0, 2.0]).into_dyn())
            .unwrap();
        assert!(p.value().is_some());
    }

    #[test]
    fn test_canonicalize_independent_of_value() {
        let mut p = Parameter::new(3);
        let (before, constraints) = p.canonicalize();
        assert!(constraints.is_empty());

        p.set_value(arr1(&[1.0, 2.0, 3.0]).into_dyn()).unwrap();
        let (after, _) = p.canonicalize();
        assert_eq!(before.leaf_id(), after.leaf_id());
        assert_eq!(before, after);
    }

    #[test]
    fn test_default_names_differ_in_suffix_only() {
        let a = Parameter::new(());
        let b = Parameter::new(());
        assert_ne!(a.id(), b.id());
        assert_ne!(a.name(), b.name());
        assert!(a.name().starts_with("param"));
        assert!(b.name().starts_with("param"));
    }
}
