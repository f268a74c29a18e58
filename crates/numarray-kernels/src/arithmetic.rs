//! Elementwise arithmetic kernels
//!
//! `plus`, `minus`, `times` and `rdivide` share one structural policy:
//!
//! | Left \ Right | Scalar | Dense | Sparse |
//! |--------------|--------|-------|--------|
//! | **Scalar** | scalar | dense | dense (`times`: sparse) |
//! | **Dense** | dense | dense | dense (`times`: sparse) |
//! | **Sparse** | dense (`times`/`rdivide`: sparse) | dense (`times`/`rdivide`: sparse) | sparse |
//!
//! - Any 1×1 operand broadcasts over the other operand's shape; otherwise the
//!   shapes must be identical.
//! - `plus`/`minus` on two sparse operands store the union of both patterns;
//!   `times` stores their intersection.
//! - Sparse results that keep one operand's pattern compute only its stored
//!   entries. For `rdivide` this means `0/0` and `x/0` at unstored coordinates
//!   are never evaluated and stay absent.
//! - A 1×1 sparse operand facing a dense matrix broadcasts into a dense
//!   result.

use crate::kernel::{typed_operand, Kernel};
use crate::operation::Operation;
use num_complex::Complex64;
use numarray_core::{
    DenseMatrix, Domain, Element, Error, ExecutionContext, Matrix, MatrixRef, NumericArray,
    Result, Shape, SparseMatrix, Structure,
};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;

/// Elementwise binary operator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryOp {
    Plus,
    Minus,
    Times,
    Rdivide,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 4] = [
        BinaryOp::Plus,
        BinaryOp::Minus,
        BinaryOp::Times,
        BinaryOp::Rdivide,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            BinaryOp::Plus => "plus",
            BinaryOp::Minus => "minus",
            BinaryOp::Times => "times",
            BinaryOp::Rdivide => "rdivide",
        }
    }

    #[inline]
    pub fn apply<T: Element>(self, a: T, b: T) -> T {
        match self {
            BinaryOp::Plus => a + b,
            BinaryOp::Minus => a - b,
            BinaryOp::Times => a * b,
            BinaryOp::Rdivide => a / b,
        }
    }
}

/// Kernel for one arithmetic operator in one domain
#[derive(Clone, Copy, Debug)]
pub struct ElementwiseKernel {
    op: BinaryOp,
    domain: Domain,
}

impl ElementwiseKernel {
    pub fn new(op: BinaryOp, domain: Domain) -> Self {
        Self { op, domain }
    }

    pub fn op(&self) -> BinaryOp {
        self.op
    }

    fn eval_in<T: Element>(
        &self,
        ctx: &ExecutionContext,
        operands: &[&NumericArray],
    ) -> Result<NumericArray> {
        let operation = self.operation();
        let left = typed_operand::<T>(operation, operands, 0)?;
        let right = typed_operand::<T>(operation, operands, 1)?;
        tracing::trace!(
            op = self.op.name(),
            left = %left.shape(),
            right = %right.shape(),
            "elementwise"
        );
        elementwise(ctx, self.op, left, right).map(T::wrap)
    }
}

impl Kernel for ElementwiseKernel {
    fn operation(&self) -> Operation {
        self.op.into()
    }

    fn eval(&self, ctx: &ExecutionContext, operands: &[&NumericArray]) -> Result<NumericArray> {
        match self.domain {
            Domain::Real => self.eval_in::<f64>(ctx, operands),
            Domain::Complex => self.eval_in::<Complex64>(ctx, operands),
        }
    }
}

/// Apply `op` elementwise to two operands of the same domain
///
/// # Errors
/// `DimensionMismatch` if neither operand is 1×1 and the shapes differ.
pub fn elementwise<T: Element>(
    ctx: &ExecutionContext,
    op: BinaryOp,
    left: MatrixRef<'_, T>,
    right: MatrixRef<'_, T>,
) -> Result<Matrix<T>> {
    match (left, right) {
        (MatrixRef::Scalar(a), MatrixRef::Scalar(b)) => Ok(Matrix::Scalar(op.apply(a, b))),
        (MatrixRef::Sparse(a), MatrixRef::Sparse(b)) => sparse_sparse(ctx, op, a, b),
        (MatrixRef::Sparse(s), other) => match op {
            BinaryOp::Times | BinaryOp::Rdivide => keep_pattern(ctx, op, s, other, Side::Left),
            BinaryOp::Plus | BinaryOp::Minus => {
                dense_result(ctx, op, left, right).map(Matrix::Dense)
            }
        },
        (other, MatrixRef::Sparse(s)) => match op {
            BinaryOp::Times => keep_pattern(ctx, op, s, other, Side::Right),
            _ => dense_result(ctx, op, left, right).map(Matrix::Dense),
        },
        _ => dense_result(ctx, op, left, right).map(Matrix::Dense),
    }
}

/// Which side of the operator the sparse operand sits on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Result shape after broadcasting a 1×1 operand
fn broadcast_shape(op: BinaryOp, left: Shape, right: Shape) -> Result<Shape> {
    if left == right {
        Ok(left)
    } else if left.is_single() {
        Ok(right)
    } else if right.is_single() {
        Ok(left)
    } else {
        Err(Error::dimension_mismatch(op.name(), left, right))
    }
}

/// Operand of a computation evaluated at every coordinate
enum DenseOperand<'a, T: Element> {
    Broadcast(T),
    Full(Cow<'a, DenseMatrix<T>>),
}

impl<'a, T: Element> DenseOperand<'a, T> {
    /// `shape` is the result shape; any other shape must be 1×1
    fn new(matrix: MatrixRef<'a, T>, shape: Shape) -> Result<Self> {
        if matrix.shape() != shape {
            if let Some(v) = matrix.single_value() {
                return Ok(Self::Broadcast(v));
            }
        }
        Ok(match matrix {
            MatrixRef::Scalar(v) => Self::Broadcast(v),
            MatrixRef::Dense(d) => Self::Full(Cow::Borrowed(d)),
            MatrixRef::Sparse(s) => Self::Full(Cow::Owned(s.to_dense()?)),
        })
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> T {
        match self {
            Self::Broadcast(v) => *v,
            Self::Full(d) => d.data()[col * d.rows() + row],
        }
    }
}

fn dense_result<T: Element>(
    ctx: &ExecutionContext,
    op: BinaryOp,
    left: MatrixRef<'_, T>,
    right: MatrixRef<'_, T>,
) -> Result<DenseMatrix<T>> {
    let shape = broadcast_shape(op, left.shape(), right.shape())?;
    let work = shape.element_count(op.name())?;
    let lhs = DenseOperand::new(left, shape)?;
    let rhs = DenseOperand::new(right, shape)?;
    let columns = ctx.execute_batch(shape.cols, work, |c| {
        (0..shape.rows)
            .map(|r| op.apply(lhs.at(r, c), rhs.at(r, c)))
            .collect::<Vec<T>>()
    });
    DenseMatrix::new(columns.concat(), shape.rows, shape.cols)
}

/// Sparse result carrying `s`'s pattern, with a scalar or dense partner
///
/// A 1×1 sparse operand facing a matrix broadcasts into a dense result
/// instead.
fn keep_pattern<T: Element>(
    ctx: &ExecutionContext,
    op: BinaryOp,
    s: &SparseMatrix<T>,
    other: MatrixRef<'_, T>,
    side: Side,
) -> Result<Matrix<T>> {
    let (sparse_shape, other_shape) = (s.shape(), other.shape());
    if other.structure() != Structure::Scalar && sparse_shape.is_single() {
        let result = match side {
            Side::Left => dense_result(ctx, op, MatrixRef::Sparse(s), other)?,
            Side::Right => dense_result(ctx, op, other, MatrixRef::Sparse(s))?,
        };
        return Ok(Matrix::Dense(result));
    }
    if sparse_shape != other_shape && !other_shape.is_single() {
        return Err(match side {
            Side::Left => Error::dimension_mismatch(op.name(), sparse_shape, other_shape),
            Side::Right => Error::dimension_mismatch(op.name(), other_shape, sparse_shape),
        });
    }
    let partner = DenseOperand::new(other, sparse_shape)?;
    let result = match side {
        Side::Left => map_pattern(ctx, s, |r, c, v| op.apply(v, partner.at(r, c)))?,
        Side::Right => map_pattern(ctx, s, |r, c, v| op.apply(partner.at(r, c), v))?,
    };
    Ok(Matrix::Sparse(result))
}

fn sparse_sparse<T: Element>(
    ctx: &ExecutionContext,
    op: BinaryOp,
    a: &SparseMatrix<T>,
    b: &SparseMatrix<T>,
) -> Result<Matrix<T>> {
    let (left, right) = (a.shape(), b.shape());
    if left == right {
        let result = match op {
            BinaryOp::Plus | BinaryOp::Minus => merge_patterns(ctx, op, Pattern::Union, a, b)?,
            BinaryOp::Times => merge_patterns(ctx, op, Pattern::Intersection, a, b)?,
            BinaryOp::Rdivide => map_pattern(ctx, a, |r, c, v| op.apply(v, b.get(r, c)))?,
        };
        return Ok(Matrix::Sparse(result));
    }

    broadcast_shape(op, left, right)?;
    let result = match op {
        BinaryOp::Times if left.is_single() => {
            let k = a.get(0, 0);
            map_pattern(ctx, b, |_, _, v| op.apply(k, v))?
        }
        BinaryOp::Times | BinaryOp::Rdivide if right.is_single() => {
            let k = b.get(0, 0);
            map_pattern(ctx, a, |_, _, v| op.apply(v, k))?
        }
        _ => {
            let dense = dense_result(ctx, op, MatrixRef::Sparse(a), MatrixRef::Sparse(b))?;
            return Ok(Matrix::Dense(dense));
        }
    };
    Ok(Matrix::Sparse(result))
}

/// Apply `f(row, col, stored)` to every stored value, keeping the pattern
fn map_pattern<T: Element>(
    ctx: &ExecutionContext,
    s: &SparseMatrix<T>,
    f: impl Fn(usize, usize, T) -> T + Sync + Send,
) -> Result<SparseMatrix<T>> {
    let columns = ctx.execute_batch(s.cols(), s.nnz(), |c| {
        let (rows, values) = s.column(c);
        rows.iter()
            .zip(values)
            .map(|(&r, &v)| f(r, c, v))
            .collect::<Vec<T>>()
    });
    s.with_values(columns.concat())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pattern {
    Union,
    Intersection,
}

fn merge_patterns<T: Element>(
    ctx: &ExecutionContext,
    op: BinaryOp,
    pattern: Pattern,
    a: &SparseMatrix<T>,
    b: &SparseMatrix<T>,
) -> Result<SparseMatrix<T>> {
    let columns = ctx.execute_batch(a.cols(), a.nnz() + b.nnz(), |c| {
        merge_column(op, pattern, a.column(c), b.column(c))
    });

    let mut col_ptr = Vec::with_capacity(a.cols() + 1);
    let mut row_idx = Vec::new();
    let mut data = Vec::new();
    col_ptr.push(0);
    for (rows, values) in columns {
        row_idx.extend(rows);
        data.extend(values);
        col_ptr.push(row_idx.len());
    }
    SparseMatrix::new(col_ptr, row_idx, data, a.rows(), a.cols())
}

/// Two-pointer merge of one column of each operand
fn merge_column<T: Element>(
    op: BinaryOp,
    pattern: Pattern,
    (a_rows, a_values): (&[usize], &[T]),
    (b_rows, b_values): (&[usize], &[T]),
) -> (Vec<usize>, Vec<T>) {
    let union = pattern == Pattern::Union;
    let capacity = if union {
        a_rows.len() + b_rows.len()
    } else {
        a_rows.len().min(b_rows.len())
    };
    let mut rows = Vec::with_capacity(capacity);
    let mut values = Vec::with_capacity(capacity);

    let (mut i, mut j) = (0, 0);
    while i < a_rows.len() && j < b_rows.len() {
        match a_rows[i].cmp(&b_rows[j]) {
            Ordering::Less => {
                if union {
                    rows.push(a_rows[i]);
                    values.push(op.apply(a_values[i], T::zero()));
                }
                i += 1;
            }
            Ordering::Greater => {
                if union {
                    rows.push(b_rows[j]);
                    values.push(op.apply(T::zero(), b_values[j]));
                }
                j += 1;
            }
            Ordering::Equal => {
                rows.push(a_rows[i]);
                values.push(op.apply(a_values[i], b_values[j]));
                i += 1;
                j += 1;
            }
        }
    }
    if union {
        for k in i..a_rows.len() {
            rows.push(a_rows[k]);
            values.push(op.apply(a_values[k], T::zero()));
        }
        for k in j..b_rows.len() {
            rows.push(b_rows[k]);
            values.push(op.apply(T::zero(), b_values[k]));
        }
    }
    (rows, values)
}
