//! Error types for the leaf/IR layer.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IrError {
    #[error("Attributes '{first}' and '{second}' cannot both be declared")]
    AttributeConflict { first: String, second: String },
    #[error("Attribute '{attribute}' requires a square 2-D shape, got {shape}")]
    AttributeShapeMismatch { attribute: String, shape: String },
    #[error("Value shape {actual} does not match declared shape {expected}")]
    ShapeMismatch { expected: String, actual: String },
    #[error("Value violates declared attribute '{attribute}': {reason}")]
    AttributeViolation { attribute: String, reason: String },
    #[error("Value contains non-finite entries")]
    NonFiniteValue,
    #[error("Leaf '{leaf}' has no value set")]
    UnsetValue { leaf: String },
    #[error("Invalid CSC structure: {reason}")]
    InvalidSparseStructure { reason: String },
}
