//! Shared utilities for dispatch integration tests

#![allow(dead_code)]

use numarray_core::{DenseMatrix, ExecutionStrategy, NumericArray, SparseMatrix};
use numarray_dispatch::{Engine, EngineConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub use approx::assert_relative_eq;

pub const SEED: u64 = 42;

pub fn engine() -> Engine {
    Engine::new(EngineConfig::default().with_execution(ExecutionStrategy::Sequential))
        .expect("default registrations are consistent")
}

/// Dense matrix with values in `range`
pub fn random_dense(
    rng: &mut ChaCha8Rng,
    rows: usize,
    cols: usize,
    range: (f64, f64),
) -> DenseMatrix<f64> {
    let data = (0..rows * cols).map(|_| rng.gen_range(range.0..range.1)).collect();
    DenseMatrix::new(data, rows, cols).expect("buffer matches shape")
}

/// Sparse matrix with roughly `density` of its entries stored
pub fn random_sparse(
    rng: &mut ChaCha8Rng,
    rows: usize,
    cols: usize,
    density: f64,
) -> SparseMatrix<f64> {
    let data = (0..rows * cols)
        .map(|_| {
            if rng.gen_bool(density) {
                rng.gen_range(1.0..10.0)
            } else {
                0.0
            }
        })
        .collect();
    SparseMatrix::from_dense(&DenseMatrix::new(data, rows, cols).expect("buffer matches shape"))
}

pub fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(SEED)
}

/// Element-wise comparison through the complex view
pub fn assert_arrays_close(actual: &NumericArray, expected: &NumericArray) {
    assert_eq!(actual.shape(), expected.shape());
    for c in 0..actual.cols() {
        for r in 0..actual.rows() {
            let (a, e) = (actual.get(r, c).unwrap(), expected.get(r, c).unwrap());
            assert_relative_eq!(a.re, e.re, epsilon = 1e-12, max_relative = 1e-12);
            assert_relative_eq!(a.im, e.im, epsilon = 1e-12, max_relative = 1e-12);
        }
    }
}
