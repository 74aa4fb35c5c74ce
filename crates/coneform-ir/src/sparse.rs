//! Compressed sparse column matrices.
//!
//! The gradient contract hands back CSC matrices: `grad()` maps each variable
//! identity to the (sub/super)gradient of the expression with respect to that
//! variable, with matrix expressions vectorized. For a leaf the only nonzero
//! gradient is a variable's derivative with respect to itself, which is the
//! identity matrix on its vectorized entries.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::IrError;

/// A column-compressed sparse matrix of `f64` entries.
///
/// Invariants checked by [`CscMatrix::new`]:
/// - `col_ptr` has `ncols + 1` entries, starts at 0, ends at `nnz`, and is
///   non-decreasing;
/// - `row_idx` and `values` have equal length;
/// - row indices are in bounds and strictly increasing within each column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CscMatrix {
    nrows: usize,
    ncols: usize,
    col_ptr: Vec<usize>,
    row_idx: Vec<usize>,
    values: Vec<f64>,
}

impl CscMatrix {
    pub fn new(
        nrows: usize,
        ncols: usize,
        col_ptr: Vec<usize>,
        row_idx: Vec<usize>,
        values: Vec<f64>,
    ) -> Result<Self, IrError> {
        if col_ptr.len() != ncols + 1 {
            return Err(structure(format!(
                "col_ptr has {} entries, expected {}",
                col_ptr.len(),
                ncols + 1
            )));
        }
        if col_ptr[0] != 0 {
            return Err(structure("col_ptr must start at 0".to_string()));
        }
        if row_idx.len() != values.len() {
            return Err(structure(format!(
                "row_idx has {} entries but values has {}",
                row_idx.len(),
                values.len()
            )));
        }
        if *col_ptr.last().unwrap_or(&0) != row_idx.len() {
            return Err(structure("col_ptr must end at nnz".to_string()));
        }
        for window in col_ptr.windows(2) {
            if window[1] < window[0] {
                return Err(structure("col_ptr must be non-decreasing".to_string()));
            }
        }
        for col in 0..ncols {
            let rows = &row_idx[col_ptr[col]..col_ptr[col + 1]];
            for (i, &row) in rows.iter().enumerate() {
                if row >= nrows {
                    return Err(structure(format!(
                        "row index {} out of bounds for {} rows",
                        row, nrows
                    )));
                }
                if i > 0 && rows[i - 1] >= row {
                    return Err(structure(format!(
                        "row indices not strictly increasing in column {}",
                        col
                    )));
                }
            }
        }
        Ok(CscMatrix {
            nrows,
            ncols,
            col_ptr,
            row_idx,
            values,
        })
    }

    /// The `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        CscMatrix {
            nrows: n,
            ncols: n,
            col_ptr: (0..=n).collect(),
            row_idx: (0..n).collect(),
            values: vec![1.0; n],
        }
    }

    /// An all-zero matrix with the given dimensions.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        CscMatrix {
            nrows,
            ncols,
            col_ptr: vec![0; ncols + 1],
            row_idx: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Entry at `(row, col)`, zero if not stored.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        let rows = &self.row_idx[self.col_ptr[col]..self.col_ptr[col + 1]];
        match rows.binary_search(&row) {
            Ok(pos) => self.values[self.col_ptr[col] + pos],
            Err(_) => 0.0,
        }
    }

    /// Densify. Intended for tests and diagnostics, not the solve path.
    pub fn to_dense(&self) -> Array2<f64> {
        let mut dense = Array2::zeros((self.nrows, self.ncols));
        for col in 0..self.ncols {
            for k in self.col_ptr[col]..self.col_ptr[col + 1] {
                dense[[self.row_idx[k], col]] = self.values[k];
            }
        }
        dense
    }
}

fn structure(reason: String) -> IrError {
    IrError::InvalidSparseStructure { reason }
}
