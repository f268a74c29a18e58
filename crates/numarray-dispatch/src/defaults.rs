//! Standard kernel and converter registrations
//!
//! [`register_defaults`] is the single, ordered start-up routine that fills a
//! fresh registry and converter graph. Converters run first so their
//! registration order settles equal-length path ties.

use crate::convert::ConverterGraphBuilder;
use crate::registry::RegistryBuilder;
use num_complex::Complex64;
use numarray_core::{
    DenseMatrix, Domain, Error, NumericArray, Representation, Result, SparseMatrix, Structure,
};
use numarray_kernels::{
    BinaryOp, ElementwiseKernel, Kernel, Operation, RosserKernel, StructuralKernel, UnaryFunction,
    UnaryKernel,
};
use std::sync::Arc;

const STRUCTURES: [Structure; 3] = [Structure::Scalar, Structure::Dense, Structure::Sparse];
const DOMAINS: [Domain; 2] = [Domain::Real, Domain::Complex];

/// Register the standard converters and kernels
///
/// # Errors
/// `Configuration` if either builder already holds a conflicting entry.
pub fn register_defaults(
    registry: &mut RegistryBuilder,
    graph: &mut ConverterGraphBuilder,
) -> Result<()> {
    register_converters(graph)?;
    register_kernels(registry)
}

/// Lossless widenings: real to complex, scalar to matrix, sparse to dense
pub fn register_converters(graph: &mut ConverterGraphBuilder) -> Result<()> {
    use Representation::*;

    graph
        .register(RealScalar, ComplexScalar, real_scalar_to_complex_scalar)?
        .register(RealScalar, RealDense, real_scalar_to_real_dense)?
        .register(RealScalar, RealSparse, real_scalar_to_real_sparse)?
        .register(RealScalar, ComplexSparse, real_scalar_to_complex_sparse)?
        .register(ComplexScalar, ComplexDense, complex_scalar_to_complex_dense)?
        .register(ComplexScalar, ComplexSparse, complex_scalar_to_complex_sparse)?
        .register(RealDense, ComplexDense, real_dense_to_complex_dense)?
        .register(RealSparse, RealDense, real_sparse_to_real_dense)?
        .register(RealSparse, ComplexSparse, real_sparse_to_complex_sparse)?
        .register(ComplexSparse, ComplexDense, complex_sparse_to_complex_dense)?;
    Ok(())
}

/// Every kernel, for every same-domain structural combination
pub fn register_kernels(registry: &mut RegistryBuilder) -> Result<()> {
    for domain in DOMAINS {
        for op in BinaryOp::ALL {
            let kernel: Arc<dyn Kernel> = Arc::new(ElementwiseKernel::new(op, domain));
            registry.register_all(kernel, binary_signatures(domain))?;
        }
    }

    for domain in DOMAINS {
        for function in UnaryFunction::ALL {
            let kernel: Arc<dyn Kernel> = Arc::new(UnaryKernel::new(function, domain));
            registry.register_all(kernel, unary_signatures(domain))?;
        }
    }

    for domain in DOMAINS {
        for op in [Operation::Transpose, Operation::Sparse, Operation::Full] {
            let kernel: Arc<dyn Kernel> = Arc::new(StructuralKernel::new(op, domain)?);
            registry.register_all(kernel, unary_signatures(domain))?;
        }
        for op in [Operation::Vertcat, Operation::Horzcat] {
            let kernel: Arc<dyn Kernel> = Arc::new(StructuralKernel::new(op, domain)?);
            registry.register_all(kernel, binary_signatures(domain))?;
        }
    }

    registry.register_all(Arc::new(RosserKernel), [Vec::new()])?;
    Ok(())
}

fn unary_signatures(domain: Domain) -> Vec<Vec<Representation>> {
    STRUCTURES
        .iter()
        .map(|&s| vec![Representation::new(s, domain)])
        .collect()
}

fn binary_signatures(domain: Domain) -> Vec<Vec<Representation>> {
    STRUCTURES
        .iter()
        .flat_map(|&a| {
            STRUCTURES
                .iter()
                .map(move |&b| vec![Representation::new(a, domain), Representation::new(b, domain)])
        })
        .collect()
}

fn mismatch(array: &NumericArray, target: Representation) -> Error {
    Error::unsupported("convert", &[array.representation(), target])
}

fn real_scalar_to_complex_scalar(array: &NumericArray) -> Result<NumericArray> {
    match array {
        NumericArray::RealScalar(v) => Ok(NumericArray::ComplexScalar(Complex64::new(*v, 0.0))),
        _ => Err(mismatch(array, Representation::ComplexScalar)),
    }
}

fn real_scalar_to_real_dense(array: &NumericArray) -> Result<NumericArray> {
    match array {
        NumericArray::RealScalar(v) => Ok(DenseMatrix::filled(*v, 1, 1).into()),
        _ => Err(mismatch(array, Representation::RealDense)),
    }
}

fn real_scalar_to_real_sparse(array: &NumericArray) -> Result<NumericArray> {
    match array {
        NumericArray::RealScalar(v) => {
            Ok(SparseMatrix::from_dense(&DenseMatrix::filled(*v, 1, 1)).into())
        }
        _ => Err(mismatch(array, Representation::RealSparse)),
    }
}

fn real_scalar_to_complex_sparse(array: &NumericArray) -> Result<NumericArray> {
    match array {
        NumericArray::RealScalar(v) => {
            let value = Complex64::new(*v, 0.0);
            Ok(SparseMatrix::from_dense(&DenseMatrix::filled(value, 1, 1)).into())
        }
        _ => Err(mismatch(array, Representation::ComplexSparse)),
    }
}

fn complex_scalar_to_complex_dense(array: &NumericArray) -> Result<NumericArray> {
    match array {
        NumericArray::ComplexScalar(v) => Ok(DenseMatrix::filled(*v, 1, 1).into()),
        _ => Err(mismatch(array, Representation::ComplexDense)),
    }
}

fn complex_scalar_to_complex_sparse(array: &NumericArray) -> Result<NumericArray> {
    match array {
        NumericArray::ComplexScalar(v) => {
            Ok(SparseMatrix::from_dense(&DenseMatrix::filled(*v, 1, 1)).into())
        }
        _ => Err(mismatch(array, Representation::ComplexSparse)),
    }
}

fn real_dense_to_complex_dense(array: &NumericArray) -> Result<NumericArray> {
    match array {
        NumericArray::RealDense(d) => Ok(d.to_complex().into()),
        _ => Err(mismatch(array, Representation::ComplexDense)),
    }
}

fn real_sparse_to_real_dense(array: &NumericArray) -> Result<NumericArray> {
    match array {
        NumericArray::RealSparse(s) => s.to_dense().map(Into::into),
        _ => Err(mismatch(array, Representation::RealDense)),
    }
}

fn real_sparse_to_complex_sparse(array: &NumericArray) -> Result<NumericArray> {
    match array {
        NumericArray::RealSparse(s) => Ok(s.to_complex().into()),
        _ => Err(mismatch(array, Representation::ComplexSparse)),
    }
}

fn complex_sparse_to_complex_dense(array: &NumericArray) -> Result<NumericArray> {
    match array {
        NumericArray::ComplexSparse(s) => s.to_dense().map(Into::into),
        _ => Err(mismatch(array, Representation::ComplexDense)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::ConverterGraph;

    fn defaults() -> (crate::DispatchRegistry, ConverterGraph) {
        let mut registry = RegistryBuilder::new();
        let mut graph = ConverterGraph::builder();
        register_defaults(&mut registry, &mut graph).unwrap();
        (registry.build(), graph.build())
    }

    #[test]
    fn test_kernel_counts() {
        let (registry, graph) = defaults();
        // arithmetic 4 x 9 x 2, unary 15 x 3 x 2, transpose/sparse/full 3 x 3 x 2,
        // concatenation 2 x 9 x 2, rosser 1
        assert_eq!(registry.len(), 72 + 90 + 18 + 36 + 1);
        assert_eq!(graph.edges().len(), 10);
    }

    #[test]
    fn test_registering_twice_fails() {
        let mut registry = RegistryBuilder::new();
        let mut graph = ConverterGraph::builder();
        register_defaults(&mut registry, &mut graph).unwrap();
        assert!(matches!(
            register_defaults(&mut registry, &mut graph),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_every_edge_is_a_widening() {
        let (_, graph) = defaults();
        for edge in graph.edges() {
            let (s, t) = (edge.source(), edge.target());
            assert!(s.domain() <= t.domain(), "{s} -> {t} narrows the domain");
            let (from, to) = (s.structure(), t.structure());
            assert!(from == Structure::Scalar || to != Structure::Scalar, "{s} -> {t}");
            assert!(!(from == Structure::Dense && to == Structure::Sparse), "{s} -> {t}");
        }
    }

    #[test]
    fn test_converters_preserve_values() {
        let (_, graph) = defaults();
        let s = NumericArray::sparse(vec![0, 1, 1], vec![1], vec![3.5], 2, 2).unwrap();
        for target in [
            Representation::RealDense,
            Representation::ComplexSparse,
            Representation::ComplexDense,
        ] {
            let out = graph.convert(&s, target).unwrap();
            assert_eq!(out.representation(), target);
            assert_eq!(out.shape(), s.shape());
            for r in 0..2 {
                for c in 0..2 {
                    assert_eq!(out.get(r, c), s.get(r, c));
                }
            }
        }

        let zero = graph.convert(&NumericArray::from(0.0), Representation::ComplexSparse).unwrap();
        match zero {
            NumericArray::ComplexSparse(z) => assert_eq!(z.nnz(), 0),
            other => panic!("Expected complex sparse, got {other:?}"),
        }
    }

    #[test]
    fn test_all_targets_reachable_from_real_scalar() {
        let (_, graph) = defaults();
        for target in Representation::ALL {
            assert!(graph.path(Representation::RealScalar, target).is_some(), "{target}");
        }
        assert_eq!(
            graph.path(Representation::RealScalar, Representation::ComplexDense).map(|p| p.cost()),
            Some(2)
        );
    }
}
