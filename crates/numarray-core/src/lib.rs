//! Core types for runtime-typed numeric arrays
//!
//! This crate provides the value layer every other numarray crate builds on:
//!
//! 1. **Array Type Model** - [`NumericArray`] over scalar, dense and sparse
//!    storage in the real and complex domains
//! 2. **Errors** - one [`Error`] type shared by dispatch and kernels
//! 3. **Checkers** - finiteness validation with located failures
//! 4. **Execution** - column-parallel scheduling for kernels
//!
//! # Storage Contracts
//!
//! - Dense buffers are column-major, `rows × cols` long
//! - Complex buffers are interleaved `(re, im)` pairs, exposed via
//!   `as_interleaved` for serialization layers
//! - Sparse arrays are compressed-sparse-column with strictly ascending rows
//!   per column
//! - Arrays are immutable; no two arrays share backing storage
//!
//! # Example
//!
//! ```rust
//! use numarray_core::{check_finite, NumericArray, Representation};
//!
//! let dense = NumericArray::dense(vec![1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();
//! assert_eq!(dense.representation(), Representation::RealDense);
//! assert!(check_finite(&dense).is_ok());
//! ```

pub mod array;
pub mod checkers;
pub mod dense;
pub mod error;
pub mod execution;
pub mod numeric;
pub mod sparse;
pub mod types;

// Re-export core types
pub use error::{Error, Result};

pub use array::{Matrix, MatrixRef, NumericArray};
pub use checkers::{check_finite, check_finite_with, locate_non_finite, InfLocation, ReportPolicy};
pub use dense::DenseMatrix;
pub use execution::{ExecutionContext, ExecutionStrategy, DEFAULT_PARALLEL_THRESHOLD};
pub use numeric::Element;
pub use sparse::SparseMatrix;
pub use types::{Domain, Representation, Shape, Structure};

pub use num_complex::Complex64;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        check_finite, Complex64, DenseMatrix, Domain, Element, Error, NumericArray,
        Representation, Result, Shape, SparseMatrix, Structure,
    };
}
