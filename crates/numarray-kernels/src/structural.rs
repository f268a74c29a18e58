//! Structural transforms
//!
//! Reshaping and storage changes that never touch values: transposition,
//! compression to sparse, expansion to dense and concatenation.
//! Concatenating two sparse operands, or a sparse with anything else, stays
//! sparse; all other combinations produce a dense result.

use crate::kernel::{typed_operand, unsupported_for, Kernel};
use crate::operation::Operation;
use num_complex::Complex64;
use numarray_core::{
    DenseMatrix, Domain, Element, Error, ExecutionContext, Matrix, MatrixRef, NumericArray,
    Result, SparseMatrix, Structure,
};

/// Transpose of any operand; scalars are their own transpose
pub fn transpose<T: Element>(input: MatrixRef<'_, T>) -> Matrix<T> {
    match input {
        MatrixRef::Scalar(v) => Matrix::Scalar(v),
        MatrixRef::Dense(d) => Matrix::Dense(d.transpose()),
        MatrixRef::Sparse(s) => Matrix::Sparse(s.transpose()),
    }
}

/// Compress to sparse storage, dropping explicit zeros of dense input
pub fn to_sparse<T: Element>(input: MatrixRef<'_, T>) -> SparseMatrix<T> {
    match input {
        MatrixRef::Scalar(v) => SparseMatrix::from_dense(&DenseMatrix::filled(v, 1, 1)),
        MatrixRef::Dense(d) => SparseMatrix::from_dense(d),
        MatrixRef::Sparse(s) => s.clone(),
    }
}

/// Expand to dense storage
///
/// # Errors
/// `InvalidArray` if the element count overflows.
pub fn to_full<T: Element>(input: MatrixRef<'_, T>) -> Result<DenseMatrix<T>> {
    input.to_dense()
}

/// Stack `top` above `bottom`
///
/// # Errors
/// `DimensionMismatch` if the column counts differ.
pub fn vertcat<T: Element>(top: MatrixRef<'_, T>, bottom: MatrixRef<'_, T>) -> Result<Matrix<T>> {
    let (a, b) = (top.shape(), bottom.shape());
    if a.cols != b.cols {
        return Err(Error::dimension_mismatch(Operation::Vertcat.name(), a, b));
    }
    let rows = stacked_extent(Operation::Vertcat, a.rows, b.rows)?;
    if is_sparse_pair(top, bottom) {
        let (top, bottom) = (to_sparse(top), to_sparse(bottom));
        let mut col_ptr = Vec::with_capacity(a.cols + 1);
        let mut row_idx = Vec::with_capacity(top.nnz() + bottom.nnz());
        let mut data = Vec::with_capacity(top.nnz() + bottom.nnz());
        col_ptr.push(0);
        for c in 0..a.cols {
            let (rows, values) = top.column(c);
            row_idx.extend_from_slice(rows);
            data.extend_from_slice(values);
            let (rows, values) = bottom.column(c);
            row_idx.extend(rows.iter().map(|r| r + a.rows));
            data.extend_from_slice(values);
            col_ptr.push(row_idx.len());
        }
        return SparseMatrix::new(col_ptr, row_idx, data, rows, a.cols).map(Matrix::Sparse);
    }

    let (top, bottom) = (top.to_dense()?, bottom.to_dense()?);
    let mut data = Vec::with_capacity(top.len() + bottom.len());
    for c in 0..a.cols {
        data.extend_from_slice(top.column(c));
        data.extend_from_slice(bottom.column(c));
    }
    DenseMatrix::new(data, rows, a.cols).map(Matrix::Dense)
}

/// Place `left` beside `right`
///
/// # Errors
/// `DimensionMismatch` if the row counts differ.
pub fn horzcat<T: Element>(left: MatrixRef<'_, T>, right: MatrixRef<'_, T>) -> Result<Matrix<T>> {
    let (a, b) = (left.shape(), right.shape());
    if a.rows != b.rows {
        return Err(Error::dimension_mismatch(Operation::Horzcat.name(), a, b));
    }
    let cols = stacked_extent(Operation::Horzcat, a.cols, b.cols)?;
    if is_sparse_pair(left, right) {
        let (left, right) = (to_sparse(left), to_sparse(right));
        let offset = left.nnz();
        let col_ptr: Vec<usize> = left
            .col_ptr()
            .iter()
            .copied()
            .chain(right.col_ptr()[1..].iter().map(|p| p + offset))
            .collect();
        let row_idx = [left.row_idx(), right.row_idx()].concat();
        let data = [left.data(), right.data()].concat();
        return SparseMatrix::new(col_ptr, row_idx, data, a.rows, cols).map(Matrix::Sparse);
    }

    // Column-major storage makes horizontal concatenation a buffer append
    let data = [left.to_dense()?.into_data(), right.to_dense()?.into_data()].concat();
    DenseMatrix::new(data, a.rows, cols).map(Matrix::Dense)
}

/// Combined extent along the concatenated axis
fn stacked_extent(operation: Operation, first: usize, second: usize) -> Result<usize> {
    first.checked_add(second).ok_or_else(|| {
        Error::invalid_array(format!("{operation} result extent {first} + {second} overflows"))
    })
}

fn is_sparse_pair<T: Element>(a: MatrixRef<'_, T>, b: MatrixRef<'_, T>) -> bool {
    a.structure() == Structure::Sparse || b.structure() == Structure::Sparse
}

/// Kernel for structural operations in one domain
#[derive(Clone, Copy, Debug)]
pub struct StructuralKernel {
    operation: Operation,
    domain: Domain,
}

impl StructuralKernel {
    /// # Errors
    /// `Configuration` if `operation` is not structural.
    pub fn new(operation: Operation, domain: Domain) -> Result<Self> {
        match operation {
            Operation::Transpose
            | Operation::Sparse
            | Operation::Full
            | Operation::Vertcat
            | Operation::Horzcat => Ok(Self { operation, domain }),
            other => Err(Error::Configuration(format!(
                "{other} is not a structural operation"
            ))),
        }
    }

    fn eval_in<T: Element>(&self, operands: &[&NumericArray]) -> Result<NumericArray> {
        let op = self.operation;
        let first = typed_operand::<T>(op, operands, 0)?;
        let result = match op {
            Operation::Transpose => transpose(first),
            Operation::Sparse => Matrix::Sparse(to_sparse(first)),
            Operation::Full => Matrix::Dense(to_full(first)?),
            Operation::Vertcat => vertcat(first, typed_operand::<T>(op, operands, 1)?)?,
            Operation::Horzcat => horzcat(first, typed_operand::<T>(op, operands, 1)?)?,
            _ => return Err(unsupported_for(op, operands)),
        };
        Ok(T::wrap(result))
    }
}

impl Kernel for StructuralKernel {
    fn operation(&self) -> Operation {
        self.operation
    }

    fn eval(&self, _ctx: &ExecutionContext, operands: &[&NumericArray]) -> Result<NumericArray> {
        match self.domain {
            Domain::Real => self.eval_in::<f64>(operands),
            Domain::Complex => self.eval_in::<Complex64>(operands),
        }
    }
}
