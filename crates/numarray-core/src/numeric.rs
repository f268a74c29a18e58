//! Element trait over the two numeric domains
//!
//! Kernels are written once, generically over [`Element`], and instantiated
//! for `f64` (real domain) and [`Complex64`] (complex domain). The trait also
//! carries the bridge between a typed matrix and the runtime-typed
//! [`NumericArray`], so generic code can view an operand as its own element
//! type and wrap a typed result back up.

use crate::array::{Matrix, MatrixRef, NumericArray};
use crate::types::Domain;
use bytemuck::Pod;
use num_complex::Complex64;
use num_traits::{One, Zero};
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Base trait for element types that arrays can hold
pub trait Element:
    Pod
    + Zero
    + One
    + PartialEq
    + Debug
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// Domain tag for arrays of this element type
    const DOMAIN: Domain;

    /// False for Inf or NaN (in either component for complex values)
    fn is_finite(&self) -> bool;

    /// Widen to a complex value with zero imaginary part where needed
    fn to_complex(self) -> Complex64;

    /// View a runtime-typed array as a typed matrix of this element type
    ///
    /// Returns `None` when the array is in the other domain.
    fn view(array: &NumericArray) -> Option<MatrixRef<'_, Self>>;

    /// Wrap a typed matrix back into a runtime-typed array
    fn wrap(matrix: Matrix<Self>) -> NumericArray;
}

impl Element for f64 {
    const DOMAIN: Domain = Domain::Real;

    #[inline]
    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }

    #[inline]
    fn to_complex(self) -> Complex64 {
        Complex64::new(self, 0.0)
    }

    fn view(array: &NumericArray) -> Option<MatrixRef<'_, Self>> {
        match array {
            NumericArray::RealScalar(v) => Some(MatrixRef::Scalar(*v)),
            NumericArray::RealDense(d) => Some(MatrixRef::Dense(d)),
            NumericArray::RealSparse(s) => Some(MatrixRef::Sparse(s)),
            _ => None,
        }
    }

    fn wrap(matrix: Matrix<Self>) -> NumericArray {
        match matrix {
            Matrix::Scalar(v) => NumericArray::RealScalar(v),
            Matrix::Dense(d) => NumericArray::RealDense(d),
            Matrix::Sparse(s) => NumericArray::RealSparse(s),
        }
    }
}

impl Element for Complex64 {
    const DOMAIN: Domain = Domain::Complex;

    #[inline]
    fn is_finite(&self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }

    #[inline]
    fn to_complex(self) -> Complex64 {
        self
    }

    fn view(array: &NumericArray) -> Option<MatrixRef<'_, Self>> {
        match array {
            NumericArray::ComplexScalar(v) => Some(MatrixRef::Scalar(*v)),
            NumericArray::ComplexDense(d) => Some(MatrixRef::Dense(d)),
            NumericArray::ComplexSparse(s) => Some(MatrixRef::Sparse(s)),
            _ => None,
        }
    }

    fn wrap(matrix: Matrix<Self>) -> NumericArray {
        match matrix {
            Matrix::Scalar(v) => NumericArray::ComplexScalar(v),
            Matrix::Dense(d) => NumericArray::ComplexDense(d),
            Matrix::Sparse(s) => NumericArray::ComplexSparse(s),
        }
    }
}
