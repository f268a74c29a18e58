//! Runtime dispatch for numarray
//!
//! Operations are resolved against the concrete representation of every
//! operand:
//!
//! 1. [`RegistryBuilder`] collects kernels keyed by [`OperationSignature`]
//! 2. [`ConverterGraphBuilder`] collects lossless widening converters
//! 3. [`Resolver`] precomputes, for every operand tuple, the kernel to run
//!    and the cheapest conversion path for each operand
//! 4. [`Engine`] ties the three together behind `apply`
//!
//! Everything is built once and immutable afterwards.
//!
//! # Example
//!
//! ```rust
//! use numarray_core::{NumericArray, Representation};
//! use numarray_dispatch::{Engine, EngineConfig};
//! use numarray_kernels::Operation;
//!
//! let engine = Engine::new(EngineConfig::default()).unwrap();
//! let s = NumericArray::sparse(vec![0, 1, 1], vec![0], vec![6.0], 2, 2).unwrap();
//! let k = NumericArray::from(3.0);
//!
//! let q = engine.apply(Operation::Rdivide, &[&s, &k]).unwrap();
//! assert_eq!(q.representation(), Representation::RealSparse);
//! assert_eq!(q.get(0, 0).map(|z| z.re), Some(2.0));
//! ```

pub mod config;
pub mod convert;
pub mod defaults;
pub mod engine;
pub mod registry;
pub mod resolver;

pub use config::EngineConfig;
pub use convert::{ConversionEdge, ConversionPath, ConverterGraph, ConverterGraphBuilder};
pub use defaults::{register_converters, register_defaults, register_kernels};
pub use engine::Engine;
pub use registry::{DispatchRegistry, OperationSignature, RegistryBuilder};
pub use resolver::{Resolution, Resolver};
