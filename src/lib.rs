//! # numarray
//!
//! Runtime dispatch and conversion engine for numeric arrays that may be
//! scalar, dense or sparse, and real or complex.
//!
//! ## Crates
//!
//! - [`core`] (`numarray-core`) - array representations, storage, errors,
//!   finiteness checkers and execution strategies
//! - [`kernels`] (`numarray-kernels`) - arithmetic, transcendental,
//!   structural and special-matrix kernels
//! - [`dispatch`] (`numarray-dispatch`) - converter graph, dispatch registry,
//!   resolver and the [`Engine`]
//!
//! ## Quick start
//!
//! ```rust
//! use numarray::prelude::*;
//!
//! let engine = Engine::new(EngineConfig::default()).unwrap();
//! let x = NumericArray::dense(vec![0.5, 2.0], 1, 2).unwrap();
//!
//! // |2.0| > 1 sends the whole array to the complex domain
//! let y = engine.apply(Operation::Atanh, &[&x]).unwrap();
//! assert_eq!(y.domain(), Domain::Complex);
//! ```

pub use numarray_core as core;
pub use numarray_dispatch as dispatch;
pub use numarray_kernels as kernels;

pub use numarray_core::{
    check_finite, check_finite_with, Complex64, DenseMatrix, Domain, Error, NumericArray,
    ReportPolicy, Representation, Result, Shape, SparseMatrix, Structure,
};
pub use numarray_dispatch::{Engine, EngineConfig};
pub use numarray_kernels::Operation;

/// Everything needed to build an engine and call it
pub mod prelude {
    pub use numarray_core::prelude::*;
    pub use numarray_core::{ExecutionStrategy, ReportPolicy};
    pub use numarray_dispatch::{Engine, EngineConfig};
    pub use numarray_kernels::Operation;
}
