//! Declared mathematical attributes of a leaf.
//!
//! Attributes constrain which numeric values a leaf may legally hold (sign,
//! symmetry, integrality, definiteness). The full set is enumerated here as a
//! closed record rather than an open attribute map, so consistency checking
//! is exhaustive: every recognized combination is either accepted or rejected
//! at leaf construction, and no leaf ever exists with an inconsistent
//! attribute set.

use serde::{Deserialize, Serialize};

use crate::error::IrError;
use crate::shape::Shape;

/// The recognized attribute flags. All default to `false`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attributes {
    /// All entries are >= 0.
    pub nonneg: bool,
    /// All entries are <= 0.
    pub nonpos: bool,
    /// Square matrix equal to its transpose.
    pub symmetric: bool,
    /// Square matrix with zero off-diagonal entries.
    pub diag: bool,
    /// Symmetric positive semidefinite matrix.
    pub psd: bool,
    /// Symmetric negative semidefinite matrix.
    pub nsd: bool,
    /// Entries are 0 or 1.
    pub boolean: bool,
    /// Entries are integers.
    pub integer: bool,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nonneg(mut self) -> Self {
        self.nonneg = true;
        self
    }

    pub fn with_nonpos(mut self) -> Self {
        self.nonpos = true;
        self
    }

    pub fn with_symmetric(mut self) -> Self {
        self.symmetric = true;
        self
    }

    pub fn with_diag(mut self) -> Self {
        self.diag = true;
        self
    }

    pub fn with_psd(mut self) -> Self {
        self.psd = true;
        self
    }

    pub fn with_nsd(mut self) -> Self {
        self.nsd = true;
        self
    }

    pub fn with_boolean(mut self) -> Self {
        self.boolean = true;
        self
    }

    pub fn with_integer(mut self) -> Self {
        self.integer = true;
        self
    }

    /// True when no attribute is declared.
    pub fn is_default(&self) -> bool {
        *self == Attributes::default()
    }

    /// Entrywise nonnegativity is implied.
    pub fn is_nonneg(&self) -> bool {
        self.nonneg || self.boolean
    }

    /// Entrywise nonpositivity is implied.
    pub fn is_nonpos(&self) -> bool {
        self.nonpos
    }

    /// Entries must be integral.
    pub fn is_integral(&self) -> bool {
        self.integer || self.boolean
    }

    /// The value must be a symmetric matrix.
    pub fn requires_symmetry(&self) -> bool {
        self.symmetric || self.diag || self.psd || self.nsd
    }

    /// Names of the declared flags, in declaration order. Used for the
    /// constructor-style display of leaves.
    pub fn flag_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.nonneg {
            names.push("nonneg");
        }
        if self.nonpos {
            names.push("nonpos");
        }
        if self.symmetric {
            names.push("symmetric");
        }
        if self.diag {
            names.push("diag");
        }
        if self.psd {
            names.push("psd");
        }
        if self.nsd {
            names.push("nsd");
        }
        if self.boolean {
            names.push("boolean");
        }
        if self.integer {
            names.push("integer");
        }
        names
    }

    /// Check the declared flags for mutual consistency and consistency with
    /// the given shape. Runs exactly once, at leaf construction; a failure
    /// means the leaf is never created.
    pub fn validate(&self, shape: &Shape) -> Result<(), IrError> {
        if self.nonneg && self.nonpos {
            return Err(conflict("nonneg", "nonpos"));
        }
        if self.psd && self.nsd {
            return Err(conflict("psd", "nsd"));
        }
        if self.boolean && self.integer {
            return Err(conflict("boolean", "integer"));
        }
        if self.symmetric && self.diag {
            return Err(conflict("symmetric", "diag"));
        }
        // Definiteness speaks about the spectrum, not the entries; mixing it
        // with an entrywise sign declaration is rejected as inconsistent.
        if self.psd || self.nsd {
            let definite = if self.psd { "psd" } else { "nsd" };
            if self.nonneg {
                return Err(conflict(definite, "nonneg"));
            }
            if self.nonpos {
                return Err(conflict(definite, "nonpos"));
            }
        }
        for (name, declared) in [
            ("symmetric", self.symmetric),
            ("diag", self.diag),
            ("psd", self.psd),
            ("nsd", self.nsd),
        ] {
            if declared && !shape.is_square_matrix() {
                return Err(IrError::AttributeShapeMismatch {
                    attribute: name.to_string(),
                    shape: shape.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn conflict(first: &str, second: &str) -> IrError {
    IrError::AttributeConflict {
        first: first.to_string(),
        second: second.to_string(),
    }
}
