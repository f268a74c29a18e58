//! Unary elementwise functions with whole-array domain promotion
//!
//! Real inputs are evaluated by the real kernel unless *any* evaluated
//! element lies outside the function's real domain (`asin`, `acos`, `atanh`
//! need |x| ≤ 1, `acosh` needs x ≥ 1, `sqrt` needs x ≥ 0). In that case the
//! whole array is widened to complex, keeping its structure, and evaluated by
//! the complex kernel. Results never mix real and complex elements.
//!
//! On sparse inputs, functions with f(0) = 0 keep the input's pattern and only
//! evaluate stored values. The rest (`cos`, `cosh`, `exp`, `acos`, `acosh`)
//! produce a dense result over every element.

use crate::kernel::{typed_operand, Kernel};
use crate::operation::Operation;
use num_complex::Complex64;
use numarray_core::{
    DenseMatrix, Domain, Element, ExecutionContext, Matrix, MatrixRef, NumericArray, Result,
};
use serde::{Deserialize, Serialize};

/// Elementwise scalar function
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnaryFunction {
    Uminus,
    Sin,
    Cos,
    Tan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Asin,
    Acos,
    Atan,
    Asinh,
    Acosh,
    Atanh,
    Sqrt,
}

impl UnaryFunction {
    pub const ALL: [UnaryFunction; 15] = [
        UnaryFunction::Uminus,
        UnaryFunction::Sin,
        UnaryFunction::Cos,
        UnaryFunction::Tan,
        UnaryFunction::Sinh,
        UnaryFunction::Cosh,
        UnaryFunction::Tanh,
        UnaryFunction::Exp,
        UnaryFunction::Asin,
        UnaryFunction::Acos,
        UnaryFunction::Atan,
        UnaryFunction::Asinh,
        UnaryFunction::Acosh,
        UnaryFunction::Atanh,
        UnaryFunction::Sqrt,
    ];

    pub fn name(self) -> &'static str {
        self.operation().name()
    }

    pub const fn operation(self) -> Operation {
        match self {
            UnaryFunction::Uminus => Operation::Uminus,
            UnaryFunction::Sin => Operation::Sin,
            UnaryFunction::Cos => Operation::Cos,
            UnaryFunction::Tan => Operation::Tan,
            UnaryFunction::Sinh => Operation::Sinh,
            UnaryFunction::Cosh => Operation::Cosh,
            UnaryFunction::Tanh => Operation::Tanh,
            UnaryFunction::Exp => Operation::Exp,
            UnaryFunction::Asin => Operation::Asin,
            UnaryFunction::Acos => Operation::Acos,
            UnaryFunction::Atan => Operation::Atan,
            UnaryFunction::Asinh => Operation::Asinh,
            UnaryFunction::Acosh => Operation::Acosh,
            UnaryFunction::Atanh => Operation::Atanh,
            UnaryFunction::Sqrt => Operation::Sqrt,
        }
    }

    #[inline]
    pub fn real(self, x: f64) -> f64 {
        match self {
            UnaryFunction::Uminus => -x,
            UnaryFunction::Sin => x.sin(),
            UnaryFunction::Cos => x.cos(),
            UnaryFunction::Tan => x.tan(),
            UnaryFunction::Sinh => x.sinh(),
            UnaryFunction::Cosh => x.cosh(),
            UnaryFunction::Tanh => x.tanh(),
            UnaryFunction::Exp => x.exp(),
            UnaryFunction::Asin => x.asin(),
            UnaryFunction::Acos => x.acos(),
            UnaryFunction::Atan => x.atan(),
            UnaryFunction::Asinh => x.asinh(),
            UnaryFunction::Acosh => x.acosh(),
            UnaryFunction::Atanh => x.atanh(),
            UnaryFunction::Sqrt => x.sqrt(),
        }
    }

    #[inline]
    pub fn complex(self, z: Complex64) -> Complex64 {
        match self {
            UnaryFunction::Uminus => -z,
            UnaryFunction::Sin => z.sin(),
            UnaryFunction::Cos => z.cos(),
            UnaryFunction::Tan => z.tan(),
            UnaryFunction::Sinh => z.sinh(),
            UnaryFunction::Cosh => z.cosh(),
            UnaryFunction::Tanh => z.tanh(),
            UnaryFunction::Exp => z.exp(),
            UnaryFunction::Asin => z.asin(),
            UnaryFunction::Acos => z.acos(),
            UnaryFunction::Atan => z.atan(),
            UnaryFunction::Asinh => z.asinh(),
            UnaryFunction::Acosh => z.acosh(),
            UnaryFunction::Atanh => z.atanh(),
            UnaryFunction::Sqrt => z.sqrt(),
        }
    }

    /// True if the real result at `x` is not real-valued
    ///
    /// NaN never triggers promotion.
    #[inline]
    pub fn leaves_real_domain(self, x: f64) -> bool {
        match self {
            UnaryFunction::Asin | UnaryFunction::Acos | UnaryFunction::Atanh => x.abs() > 1.0,
            UnaryFunction::Acosh => x < 1.0,
            UnaryFunction::Sqrt => x < 0.0,
            _ => false,
        }
    }

    /// Whether the real domain is a strict subset of the reals
    pub const fn has_restricted_domain(self) -> bool {
        matches!(
            self,
            UnaryFunction::Asin
                | UnaryFunction::Acos
                | UnaryFunction::Atanh
                | UnaryFunction::Acosh
                | UnaryFunction::Sqrt
        )
    }

    /// f(0) = 0, so a sparse input keeps its pattern
    pub const fn preserves_zero(self) -> bool {
        !matches!(
            self,
            UnaryFunction::Cos
                | UnaryFunction::Cosh
                | UnaryFunction::Exp
                | UnaryFunction::Acos
                | UnaryFunction::Acosh
        )
    }
}

/// Kernel for one unary function in one domain
#[derive(Clone, Copy, Debug)]
pub struct UnaryKernel {
    function: UnaryFunction,
    domain: Domain,
}

impl UnaryKernel {
    pub fn new(function: UnaryFunction, domain: Domain) -> Self {
        Self { function, domain }
    }

    pub fn function(&self) -> UnaryFunction {
        self.function
    }
}

impl Kernel for UnaryKernel {
    fn operation(&self) -> Operation {
        self.function.operation()
    }

    fn eval(&self, ctx: &ExecutionContext, operands: &[&NumericArray]) -> Result<NumericArray> {
        let operation = self.operation();
        match self.domain {
            Domain::Real => {
                let input = typed_operand::<f64>(operation, operands, 0)?;
                apply_real(ctx, self.function, input)
            }
            Domain::Complex => {
                let input = typed_operand::<Complex64>(operation, operands, 0)?;
                Ok(Complex64::wrap(apply_complex(ctx, self.function, input)?))
            }
        }
    }
}

/// Evaluate `function` on a real array, promoting the whole array to complex
/// when any evaluated element leaves the real domain
pub fn apply_real(
    ctx: &ExecutionContext,
    function: UnaryFunction,
    input: MatrixRef<'_, f64>,
) -> Result<NumericArray> {
    if function.has_restricted_domain() && needs_promotion(function, input) {
        tracing::debug!(
            function = function.name(),
            shape = %input.shape(),
            "promoting to complex domain"
        );
        let promoted = match input {
            MatrixRef::Scalar(v) => Matrix::Scalar(v.to_complex()),
            MatrixRef::Dense(d) => Matrix::Dense(d.to_complex()),
            MatrixRef::Sparse(s) => Matrix::Sparse(s.to_complex()),
        };
        let view = match &promoted {
            Matrix::Scalar(v) => MatrixRef::Scalar(*v),
            Matrix::Dense(d) => MatrixRef::Dense(d),
            Matrix::Sparse(s) => MatrixRef::Sparse(s),
        };
        return apply_complex(ctx, function, view).map(Complex64::wrap);
    }
    evaluate(ctx, function.preserves_zero(), input, |x| function.real(x)).map(f64::wrap)
}

/// Evaluate `function` on a complex array
pub fn apply_complex(
    ctx: &ExecutionContext,
    function: UnaryFunction,
    input: MatrixRef<'_, Complex64>,
) -> Result<Matrix<Complex64>> {
    evaluate(ctx, function.preserves_zero(), input, |z| function.complex(z))
}

/// Scan every element the function will evaluate
fn needs_promotion(function: UnaryFunction, input: MatrixRef<'_, f64>) -> bool {
    let out = |x: &f64| function.leaves_real_domain(*x);
    match input {
        MatrixRef::Scalar(v) => out(&v),
        MatrixRef::Dense(d) => d.data().iter().any(out),
        MatrixRef::Sparse(s) => {
            s.data().iter().any(out)
                || (!function.preserves_zero() && out(&0.0) && s.has_implicit_zeros())
        }
    }
}

fn evaluate<T: Element>(
    ctx: &ExecutionContext,
    preserves_zero: bool,
    input: MatrixRef<'_, T>,
    f: impl Fn(T) -> T + Sync + Send,
) -> Result<Matrix<T>> {
    match input {
        MatrixRef::Scalar(v) => Ok(Matrix::Scalar(f(v))),
        MatrixRef::Dense(d) => map_dense(ctx, d, f).map(Matrix::Dense),
        MatrixRef::Sparse(s) if preserves_zero => {
            let columns = ctx.execute_batch(s.cols(), s.nnz(), |c| {
                s.column(c).1.iter().map(|&v| f(v)).collect::<Vec<T>>()
            });
            s.with_values(columns.concat()).map(Matrix::Sparse)
        }
        MatrixRef::Sparse(s) => map_dense(ctx, &s.to_dense()?, f).map(Matrix::Dense),
    }
}

fn map_dense<T: Element>(
    ctx: &ExecutionContext,
    d: &DenseMatrix<T>,
    f: impl Fn(T) -> T + Sync + Send,
) -> Result<DenseMatrix<T>> {
    let columns = ctx.execute_batch(d.cols(), d.len(), |c| {
        d.column(c).iter().map(|&v| f(v)).collect::<Vec<T>>()
    });
    DenseMatrix::new(columns.concat(), d.rows(), d.cols())
}
