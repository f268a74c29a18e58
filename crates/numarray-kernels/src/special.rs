//! Special matrices

use crate::kernel::Kernel;
use crate::operation::Operation;
use numarray_core::{DenseMatrix, ExecutionContext, NumericArray, Result};

const ROSSER: [[f64; 8]; 8] = [
    [611.0, 196.0, -192.0, 407.0, -8.0, -52.0, -49.0, 29.0],
    [196.0, 899.0, 113.0, -192.0, -71.0, -43.0, -8.0, -44.0],
    [-192.0, 113.0, 899.0, 196.0, 61.0, 49.0, 8.0, 52.0],
    [407.0, -192.0, 196.0, 611.0, 8.0, 44.0, 59.0, -23.0],
    [-8.0, -71.0, 61.0, 8.0, 411.0, -599.0, 208.0, 208.0],
    [-52.0, -43.0, 49.0, 44.0, -599.0, 411.0, 208.0, 208.0],
    [-49.0, -8.0, 8.0, 59.0, 208.0, 208.0, 99.0, -911.0],
    [29.0, -44.0, 52.0, -23.0, 208.0, 208.0, -911.0, 99.0],
];

/// The Rosser matrix, a classic symmetric eigenvalue test case
///
/// Its eigenvalues include a double root, three nearly equal roots, a zero
/// root and a pair of opposite-signed roots.
pub fn rosser() -> Result<DenseMatrix<f64>> {
    // Symmetric, so row-major rows are also the columns
    let data = ROSSER.iter().flatten().copied().collect();
    DenseMatrix::new(data, 8, 8)
}

/// Nullary kernel producing [`rosser`]
#[derive(Clone, Copy, Debug, Default)]
pub struct RosserKernel;

impl Kernel for RosserKernel {
    fn operation(&self) -> Operation {
        Operation::Rosser
    }

    fn eval(&self, _ctx: &ExecutionContext, _operands: &[&NumericArray]) -> Result<NumericArray> {
        rosser().map(NumericArray::from)
    }
}
