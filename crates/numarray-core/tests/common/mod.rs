//! Shared utilities for integration tests

#![allow(dead_code)]

pub use approx::assert_relative_eq;
use proptest::prelude::*;

pub const EPSILON: f64 = 1e-12;

/// Shapes that hit the degenerate cases of CSC storage
pub fn edge_case_shapes() -> Vec<(usize, usize)> {
    vec![
        (0, 0), // Empty
        (0, 3), // No rows, col_ptr still cols + 1 long
        (3, 0), // No columns
        (1, 1), // Broadcastable
        (1, 5), // Row vector
        (5, 1), // Column vector
        (4, 4),
        (7, 3),
    ]
}

/// Column-major buffer of `rows × cols` values where roughly half are zero
pub fn sparse_pattern_strategy(max_dim: usize) -> impl Strategy<Value = (Vec<f64>, usize, usize)> {
    (0..=max_dim, 0..=max_dim).prop_flat_map(|(rows, cols)| {
        let value = prop_oneof![Just(0.0), -1e6..1e6f64];
        (prop::collection::vec(value, rows * cols), Just(rows), Just(cols))
    })
}
