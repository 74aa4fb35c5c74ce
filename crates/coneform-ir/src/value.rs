//! Numeric validation of candidate leaf values.
//!
//! Every write to a parameter's value slot goes through [`checked_value`]: a
//! pure function from a candidate array to either the accepted value or a
//! typed rejection. The caller swaps the stored value only on `Ok`, so a
//! failed write can never leave a partially validated value behind.

use ndarray::{ArrayD, ArrayView2, Ix2};

use crate::attributes::Attributes;
use crate::error::IrError;
use crate::shape::Shape;

/// Tolerance for integrality and booleanness checks.
const INT_TOL: f64 = 1e-8;
/// Relative tolerance for symmetry and diagonality checks.
const SYMMETRY_TOL: f64 = 1e-8;
/// Diagonal shift applied before the Cholesky-based definiteness check.
const DEFINITENESS_TOL: f64 = 1e-8;

/// Validate `candidate` against the declared shape and attributes and return
/// it unchanged on success.
pub fn checked_value(
    candidate: ArrayD<f64>,
    shape: &Shape,
    attrs: &Attributes,
) -> Result<ArrayD<f64>, IrError> {
    if candidate.shape() != shape.dims() {
        return Err(IrError::ShapeMismatch {
            expected: shape.to_string(),
            actual: Shape::from(candidate.shape()).to_string(),
        });
    }
    if candidate.iter().any(|v| !v.is_finite()) {
        return Err(IrError::NonFiniteValue);
    }
    if attrs.is_nonneg() && candidate.iter().any(|&v| v < 0.0) {
        return Err(violation("nonneg", "contains negative entries"));
    }
    if attrs.is_nonpos() && candidate.iter().any(|&v| v > 0.0) {
        return Err(violation("nonpos", "contains positive entries"));
    }
    if attrs.is_integral() && candidate.iter().any(|&v| (v - v.round()).abs() > INT_TOL) {
        return Err(violation("integer", "contains non-integral entries"));
    }
    if attrs.boolean
        && candidate
            .iter()
            .any(|&v| v.abs() > INT_TOL && (v - 1.0).abs() > INT_TOL)
    {
        return Err(violation("boolean", "contains entries other than 0 and 1"));
    }

    if attrs.requires_symmetry() {
        // Attribute validation already guaranteed a square 2-D shape.
        let matrix = candidate
            .view()
            .into_dimensionality::<Ix2>()
            .map_err(|_| violation("symmetric", "value is not a matrix"))?;
        if !is_symmetric(&matrix) {
            return Err(violation("symmetric", "value is not symmetric"));
        }
        if attrs.diag && !is_diagonal(&matrix) {
            return Err(violation("diag", "contains nonzero off-diagonal entries"));
        }
        if attrs.psd && !is_positive_semidefinite(&matrix) {
            return Err(violation("psd", "value is not positive semidefinite"));
        }
        if attrs.nsd {
            let negated = matrix.map(|v| -v);
            if !is_positive_semidefinite(&negated.view()) {
                return Err(violation("nsd", "value is not negative semidefinite"));
            }
        }
    }

    Ok(candidate)
}

fn violation(attribute: &str, reason: &str) -> IrError {
    IrError::AttributeViolation {
        attribute: attribute.to_string(),
        reason: reason.to_string(),
    }
}

fn magnitude(matrix: &ArrayView2<'_, f64>) -> f64 {
    matrix.iter().fold(1.0_f64, |acc, v| acc.max(v.abs()))
}

fn is_symmetric(matrix: &ArrayView2<'_, f64>) -> bool {
    let n = matrix.nrows();
    let tol = SYMMETRY_TOL * magnitude(matrix);
    for i in 0..n {
        for j in (i + 1)..n {
            if (matrix[[i, j]] - matrix[[j, i]]).abs() > tol {
                return false;
            }
        }
    }
    true
}

fn is_diagonal(matrix: &ArrayView2<'_, f64>) -> bool {
    let n = matrix.nrows();
    let tol = SYMMETRY_TOL * magnitude(matrix);
    for i in 0..n {
        for j in 0..n {
            if i != j && matrix[[i, j]].abs() > tol {
                return false;
            }
        }
    }
    true
}

/// Definiteness check via Cholesky factorization of the tolerance-shifted
/// matrix: `A + tol * scale * I` admits a factorization iff `A` is positive
/// semidefinite within tolerance. Assumes the input is symmetric.
fn is_positive_semidefinite(matrix: &ArrayView2<'_, f64>) -> bool {
    let n = matrix.nrows();
    let shift = DEFINITENESS_TOL * magnitude(matrix);
    let mut lower = vec![vec![0.0_f64; n]; n];
    for j in 0..n {
        let mut diag = matrix[[j, j]] + shift;
        for k in 0..j {
            diag -= lower[j][k] * lower[j][k];
        }
        if diag <= 0.0 {
            return false;
        }
        let pivot = diag.sqrt();
        lower[j][j] = pivot;
        for i in (j + 1)..n {
            let mut entry = matrix[[i, j]];
            for k in 0..j {
                entry -= lower[i][k] * lower[j][k];
            }
            lower[i][j] = entry / pivot;
        }
    }
    true
}
