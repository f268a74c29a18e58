//! Representation tags for runtime-typed arrays
//!
//! Every array carries a [`Representation`]: a structural kind (scalar,
//! dense, sparse) crossed with a numeric [`Domain`] (real, complex). These
//! tags are what the dispatch layer keys kernels and conversions on.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric domain of an array's elements
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Domain {
    Real,
    Complex,
}

/// Structural kind of an array
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Structure {
    Scalar,
    Dense,
    Sparse,
}

/// Concrete runtime representation of a [`crate::NumericArray`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Representation {
    RealScalar,
    ComplexScalar,
    RealDense,
    ComplexDense,
    RealSparse,
    ComplexSparse,
}

impl Representation {
    /// Every representation, in ordinal order
    pub const ALL: [Representation; 6] = [
        Representation::RealScalar,
        Representation::ComplexScalar,
        Representation::RealDense,
        Representation::ComplexDense,
        Representation::RealSparse,
        Representation::ComplexSparse,
    ];

    /// Build a representation from its two components
    pub const fn new(structure: Structure, domain: Domain) -> Self {
        match (structure, domain) {
            (Structure::Scalar, Domain::Real) => Representation::RealScalar,
            (Structure::Scalar, Domain::Complex) => Representation::ComplexScalar,
            (Structure::Dense, Domain::Real) => Representation::RealDense,
            (Structure::Dense, Domain::Complex) => Representation::ComplexDense,
            (Structure::Sparse, Domain::Real) => Representation::RealSparse,
            (Structure::Sparse, Domain::Complex) => Representation::ComplexSparse,
        }
    }

    pub const fn domain(self) -> Domain {
        match self {
            Representation::RealScalar | Representation::RealDense | Representation::RealSparse => {
                Domain::Real
            }
            _ => Domain::Complex,
        }
    }

    pub const fn structure(self) -> Structure {
        match self {
            Representation::RealScalar | Representation::ComplexScalar => Structure::Scalar,
            Representation::RealDense | Representation::ComplexDense => Structure::Dense,
            Representation::RealSparse | Representation::ComplexSparse => Structure::Sparse,
        }
    }

    /// Same structural kind, complex domain
    pub const fn to_complex(self) -> Self {
        Representation::new(self.structure(), Domain::Complex)
    }

    /// Position in [`Representation::ALL`]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Representation::RealScalar => "RealScalar",
            Representation::ComplexScalar => "ComplexScalar",
            Representation::RealDense => "RealDense",
            Representation::ComplexDense => "ComplexDense",
            Representation::RealSparse => "RealSparse",
            Representation::ComplexSparse => "ComplexSparse",
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Row and column counts of an array
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Number of elements (rows × cols), `None` if it overflows `usize`
    pub const fn len(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// Number of elements, as an `InvalidArray` error naming `context` on overflow
    pub fn element_count(&self, context: &str) -> Result<usize> {
        self.len().ok_or_else(|| {
            Error::invalid_array(format!("Shape {self} overflows the element count of {context}"))
        })
    }

    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// True for 1×1 shapes, which broadcast in elementwise operations
    pub const fn is_single(&self) -> bool {
        self.rows == 1 && self.cols == 1
    }

    pub const fn transposed(&self) -> Self {
        Self::new(self.cols, self.rows)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}
