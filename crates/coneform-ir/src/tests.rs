//! Unit tests for the leaf/IR layer.

use ndarray::{arr1, arr2};

use crate::{Attributes, CanonTable, Constant, IrError, Leaf, Parameter, Shape, Variable};

#[test]
fn test_parameter_lifecycle() {
    // Construct, read unset, set, read back.
    let mut p = Parameter::new(3);
    assert!(p.name().starts_with("param"));
    assert!(p.value().is_none());

    p.set_value(arr1(&[1.0, 2.0, 3.0]).into_dyn()).unwrap();
    assert_eq!(p.value().unwrap(), &arr1(&[1.0, 2.0, 3.0]).into_dyn());
}

#[test]
fn test_nonneg_parameter_rejects_negative_matrix() {
    let mut p = Parameter::with_attributes((2, 2), Attributes::new().with_nonneg()).unwrap();
    let err = p
        .set_value(arr2(&[[1.0, -1.0], [0.0, 2.0]]).into_dyn())
        .unwrap_err();
    assert!(matches!(err, IrError::AttributeViolation { .. }));
    assert!(p.value().is_none());
}

#[test]
fn test_identity_uniqueness_across_variants() {
    let leaves: Vec<Leaf> = vec![
        Leaf::from(Constant::scalar(1.0)),
        Leaf::from(Parameter::new(2)),
        Leaf::from(Variable::new(2)),
        Leaf::from(Parameter::new(2)),
    ];
    for (i, a) in leaves.iter().enumerate() {
        for b in leaves.iter().skip(i + 1) {
            assert_ne!(a.id(), b.id());
        }
    }
}

#[test]
fn test_default_names_share_prefix_distinct_suffix() {
    let a = Parameter::new(());
    let b = Parameter::new(());
    let suffix_a: u64 = a.name().strip_prefix("param").unwrap().parse().unwrap();
    let suffix_b: u64 = b.name().strip_prefix("param").unwrap().parse().unwrap();
    assert_ne!(suffix_a, suffix_b);
    assert_eq!(suffix_a, a.id().as_u64());
}

#[test]
fn test_canonicalize_then_solve_workflow() {
    // Build and lower the problem structure once, with no parameter value.
    let rho = Parameter::with_attributes((), Attributes::new().with_nonneg())
        .unwrap()
        .named("rho");
    let x = Variable::new(3).named("x");

    let rho = Leaf::from(rho);
    let x = Leaf::from(x);

    let mut table = CanonTable::new();
    table.intern(&rho);
    table.intern(&x);
    assert_eq!(table.len(), 2);

    // Solve-time read without a value is a hard error, not a default.
    assert!(matches!(
        table.read_value(&rho),
        Err(IrError::UnsetValue { .. })
    ));

    // Sweep values through repeated "solves" without re-lowering.
    let node_before = table.node(rho.id()).unwrap().clone();
    for trade_off in [0.1, 1.0, 10.0] {
        let mut p = rho.as_parameter().unwrap().clone();
        p.set_value(ndarray::arr0(trade_off).into_dyn()).unwrap();
        let swept = Leaf::from(p);
        assert_eq!(table.intern(&swept), &node_before);
        assert_eq!(
            table.read_value(&swept).unwrap()[ndarray::IxDyn(&[])],
            trade_off
        );
    }
}

#[test]
fn test_leaf_display_round_trips_attributes() {
    let p = Parameter::with_attributes(
        (2, 2),
        Attributes::new().with_symmetric(),
    )
    .unwrap();
    assert_eq!(Leaf::from(p).to_string(), "Parameter((2, 2), symmetric)");

    let v = Variable::new((3, 4));
    assert_eq!(Leaf::from(v).to_string(), "Variable((3, 4))");
}

#[test]
fn test_construction_failures_leave_nothing_behind() {
    // An inconsistent attribute set never produces a leaf.
    let bad = Attributes::new().with_nonneg().with_nonpos();
    assert!(Parameter::with_attributes(3, bad).is_err());
    assert!(Variable::with_attributes(3, bad).is_err());

    // A matrix attribute on a vector shape never produces a leaf.
    let symmetric = Attributes::new().with_symmetric();
    assert!(matches!(
        Parameter::with_attributes(3, symmetric),
        Err(IrError::AttributeShapeMismatch { .. })
    ));
}

#[test]
fn test_shape_and_attributes_immutable_after_construction() {
    let mut p = Parameter::with_attributes((2, 2), Attributes::new().with_psd()).unwrap();
    let shape = p.shape().clone();
    let attrs = p.attributes();

    // Failed and successful writes alike leave shape/attributes untouched.
    let _ = p.set_value(arr2(&[[1.0, 2.0], [2.0, 1.0]]).into_dyn());
    p.set_value(arr2(&[[2.0, 1.0], [1.0, 2.0]]).into_dyn())
        .unwrap();
    assert_eq!(p.shape(), &shape);
    assert_eq!(p.attributes(), attrs);
}

#[test]
fn test_serde_round_trip_of_ir_node() {
    let v = Variable::new((2, 2));
    let (node, _) = v.canonicalize();
    let json = serde_json::to_string(&node).unwrap();
    let decoded: crate::LinOp = serde_json::from_str(&json).unwrap();
    assert_eq!(node, decoded);
}

#[test]
fn test_variable_solution_read_back() {
    let mut x = Variable::new(2).named("x");
    let table = CanonTable::new();
    assert!(table.read_value(&Leaf::from(x.clone())).is_err());

    x.save_solver_value(arr1(&[0.25, 0.75]).into_dyn()).unwrap();
    let read = table.read_value(&Leaf::from(x)).unwrap();
    assert_eq!(read, arr1(&[0.25, 0.75]).into_dyn());
}

#[test]
fn test_scalar_shape_value() {
    let mut p = Parameter::new(());
    assert_eq!(p.shape(), &Shape::scalar());
    p.set_value(ndarray::arr0(4.2).into_dyn()).unwrap();
    assert_eq!(p.value().unwrap()[ndarray::IxDyn(&[])], 4.2);
}
