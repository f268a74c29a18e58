//! Array kernels for numarray
//!
//! This crate implements the per-representation algorithms the dispatcher
//! selects between:
//!
//! - **Arithmetic** - `plus`, `minus`, `times`, `rdivide` with broadcasting
//!   and sparsity-pattern policies ([`arithmetic`])
//! - **Transcendental** - trigonometric, hyperbolic, exponential and root
//!   functions with whole-array complex promotion ([`transcendental`])
//! - **Structural** - `transpose`, `sparse`, `full`, `vertcat`, `horzcat`
//! - **Special matrices** - `rosser`
//!
//! Every kernel implements [`Kernel`] and is registered for concrete
//! operand representations by `numarray-dispatch`. Kernels never mutate
//! their inputs; dense work is split per column through the caller's
//! [`ExecutionContext`](numarray_core::ExecutionContext).
//!
//! # Example
//!
//! ```rust
//! use numarray_core::{Domain, ExecutionContext, NumericArray, SparseMatrix};
//! use numarray_kernels::{BinaryOp, ElementwiseKernel, Kernel};
//!
//! let s = SparseMatrix::new(vec![0, 1, 2], vec![0, 1], vec![4.0, 8.0], 2, 2).unwrap();
//! let d = NumericArray::dense(vec![2.0, 5.0, 3.0, 2.0], 2, 2).unwrap();
//!
//! let kernel = ElementwiseKernel::new(BinaryOp::Rdivide, Domain::Real);
//! let q = kernel
//!     .eval(&ExecutionContext::default(), &[&NumericArray::from(s), &d])
//!     .unwrap();
//! assert!(matches!(q, NumericArray::RealSparse(_)));
//! ```

pub mod arithmetic;
pub mod kernel;
pub mod operation;
pub mod special;
pub mod structural;
pub mod transcendental;

pub use arithmetic::{elementwise, BinaryOp, ElementwiseKernel};
pub use kernel::Kernel;
pub use operation::Operation;
pub use special::{rosser, RosserKernel};
pub use structural::StructuralKernel;
pub use transcendental::{UnaryFunction, UnaryKernel};
