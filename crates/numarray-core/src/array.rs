//! The runtime-typed array value
//!
//! [`NumericArray`] is a closed sum over the six concrete representations.
//! Values are immutable: every operation allocates a fresh array, so any
//! array can be shared across threads and read without locking.

use crate::dense::DenseMatrix;
use crate::error::Result;
use crate::numeric::Element;
use crate::sparse::SparseMatrix;
use crate::types::{Domain, Representation, Shape, Structure};
use num_complex::Complex64;

/// A scalar, dense or sparse array over the real or complex domain
#[derive(Clone, Debug, PartialEq)]
pub enum NumericArray {
    RealScalar(f64),
    ComplexScalar(Complex64),
    RealDense(DenseMatrix<f64>),
    ComplexDense(DenseMatrix<Complex64>),
    RealSparse(SparseMatrix<f64>),
    ComplexSparse(SparseMatrix<Complex64>),
}

/// Borrowed, typed view of an array in one domain
#[derive(Clone, Copy, Debug)]
pub enum MatrixRef<'a, T: Element> {
    Scalar(T),
    Dense(&'a DenseMatrix<T>),
    Sparse(&'a SparseMatrix<T>),
}

/// Owned, typed array in one domain
#[derive(Clone, Debug, PartialEq)]
pub enum Matrix<T: Element> {
    Scalar(T),
    Dense(DenseMatrix<T>),
    Sparse(SparseMatrix<T>),
}

impl<'a, T: Element> MatrixRef<'a, T> {
    pub fn shape(&self) -> Shape {
        match self {
            MatrixRef::Scalar(_) => Shape::new(1, 1),
            MatrixRef::Dense(d) => d.shape(),
            MatrixRef::Sparse(s) => s.shape(),
        }
    }

    pub fn structure(&self) -> Structure {
        match self {
            MatrixRef::Scalar(_) => Structure::Scalar,
            MatrixRef::Dense(_) => Structure::Dense,
            MatrixRef::Sparse(_) => Structure::Sparse,
        }
    }

    /// The single value of a 1×1 operand, whatever its structure
    pub fn single_value(&self) -> Option<T> {
        match self {
            MatrixRef::Scalar(v) => Some(*v),
            MatrixRef::Dense(d) if d.shape().is_single() => d.get(0, 0),
            MatrixRef::Sparse(s) if s.shape().is_single() => Some(s.get(0, 0)),
            _ => None,
        }
    }

    /// Dense copy of the operand
    ///
    /// # Errors
    /// `InvalidArray` if a sparse operand's element count overflows.
    pub fn to_dense(&self) -> Result<DenseMatrix<T>> {
        match self {
            MatrixRef::Scalar(v) => Ok(DenseMatrix::filled(*v, 1, 1)),
            MatrixRef::Dense(d) => Ok((*d).clone()),
            MatrixRef::Sparse(s) => s.to_dense(),
        }
    }
}

impl NumericArray {
    /// Real dense array from a column-major buffer
    pub fn dense(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self> {
        Ok(Self::RealDense(DenseMatrix::new(data, rows, cols)?))
    }

    /// Complex dense array from an interleaved `(re, im)` column-major buffer
    pub fn complex_dense(interleaved: &[f64], rows: usize, cols: usize) -> Result<Self> {
        Ok(Self::ComplexDense(DenseMatrix::from_interleaved(
            interleaved,
            rows,
            cols,
        )?))
    }

    /// Real sparse array from CSC triples
    pub fn sparse(
        col_ptr: Vec<usize>,
        row_idx: Vec<usize>,
        data: Vec<f64>,
        rows: usize,
        cols: usize,
    ) -> Result<Self> {
        Ok(Self::RealSparse(SparseMatrix::new(
            col_ptr, row_idx, data, rows, cols,
        )?))
    }

    /// Complex sparse array from CSC triples with interleaved data
    pub fn complex_sparse(
        col_ptr: Vec<usize>,
        row_idx: Vec<usize>,
        interleaved: &[f64],
        rows: usize,
        cols: usize,
    ) -> Result<Self> {
        Ok(Self::ComplexSparse(SparseMatrix::from_interleaved(
            col_ptr,
            row_idx,
            interleaved,
            rows,
            cols,
        )?))
    }

    /// Scalar of the requested domain
    ///
    /// A real scalar keeps only the real part of `value`.
    pub fn scalar(value: Complex64, domain: Domain) -> Self {
        match domain {
            Domain::Real => Self::RealScalar(value.re),
            Domain::Complex => Self::ComplexScalar(value),
        }
    }

    pub fn representation(&self) -> Representation {
        match self {
            Self::RealScalar(_) => Representation::RealScalar,
            Self::ComplexScalar(_) => Representation::ComplexScalar,
            Self::RealDense(_) => Representation::RealDense,
            Self::ComplexDense(_) => Representation::ComplexDense,
            Self::RealSparse(_) => Representation::RealSparse,
            Self::ComplexSparse(_) => Representation::ComplexSparse,
        }
    }

    #[inline]
    pub fn domain(&self) -> Domain {
        self.representation().domain()
    }

    #[inline]
    pub fn structure(&self) -> Structure {
        self.representation().structure()
    }

    pub fn shape(&self) -> Shape {
        match self {
            Self::RealScalar(_) | Self::ComplexScalar(_) => Shape::new(1, 1),
            Self::RealDense(d) => d.shape(),
            Self::ComplexDense(d) => d.shape(),
            Self::RealSparse(s) => s.shape(),
            Self::ComplexSparse(s) => s.shape(),
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.shape().rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.shape().cols
    }

    /// Element at `(row, col)` widened to complex, or `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Complex64> {
        let shape = self.shape();
        if row >= shape.rows || col >= shape.cols {
            return None;
        }
        let value = match self {
            Self::RealScalar(v) => v.to_complex(),
            Self::ComplexScalar(v) => *v,
            Self::RealDense(d) => d.get(row, col)?.to_complex(),
            Self::ComplexDense(d) => d.get(row, col)?,
            Self::RealSparse(s) => s.get(row, col).to_complex(),
            Self::ComplexSparse(s) => s.get(row, col),
        };
        Some(value)
    }

    /// Typed view in the real domain
    pub fn as_real(&self) -> Option<MatrixRef<'_, f64>> {
        <f64 as Element>::view(self)
    }

    /// Typed view in the complex domain
    pub fn as_complex(&self) -> Option<MatrixRef<'_, Complex64>> {
        <Complex64 as Element>::view(self)
    }
}

impl From<f64> for NumericArray {
    fn from(value: f64) -> Self {
        Self::RealScalar(value)
    }
}

impl From<Complex64> for NumericArray {
    fn from(value: Complex64) -> Self {
        Self::ComplexScalar(value)
    }
}

impl<T: Element> From<DenseMatrix<T>> for NumericArray {
    fn from(dense: DenseMatrix<T>) -> Self {
        T::wrap(Matrix::Dense(dense))
    }
}

impl<T: Element> From<SparseMatrix<T>> for NumericArray {
    fn from(sparse: SparseMatrix<T>) -> Self {
        T::wrap(Matrix::Sparse(sparse))
    }
}

impl<T: Element> From<Matrix<T>> for NumericArray {
    fn from(matrix: Matrix<T>) -> Self {
        T::wrap(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_representation_of_each_variant() {
        let c = Complex64::new(1.0, 2.0);
        let cases = vec![
            (NumericArray::from(1.0), Representation::RealScalar),
            (NumericArray::from(c), Representation::ComplexScalar),
            (NumericArray::dense(vec![1.0; 4], 2, 2).unwrap(), Representation::RealDense),
            (
                NumericArray::complex_dense(&[1.0, 0.0], 1, 1).unwrap(),
                Representation::ComplexDense,
            ),
            (
                NumericArray::sparse(vec![0, 0], vec![], vec![], 3, 1).unwrap(),
                Representation::RealSparse,
            ),
            (
                NumericArray::complex_sparse(vec![0, 1], vec![0], &[0.0, 1.0], 1, 1).unwrap(),
                Representation::ComplexSparse,
            ),
        ];
        for (array, rep) in cases {
            assert_eq!(array.representation(), rep);
            assert_eq!(array.domain(), rep.domain());
            assert_eq!(array.structure(), rep.structure());
        }
    }

    #[test]
    fn test_scalar_constructor() {
        let v = Complex64::new(2.5, -1.0);
        assert_eq!(NumericArray::scalar(v, Domain::Complex), NumericArray::ComplexScalar(v));
        assert_eq!(NumericArray::scalar(v, Domain::Real), NumericArray::RealScalar(2.5));
        assert_eq!(NumericArray::from(2.5).shape(), Shape::new(1, 1));
    }

    #[test]
    fn test_get_widens_to_complex() {
        let a = NumericArray::dense(vec![1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();
        assert_eq!(a.get(1, 0), Some(Complex64::new(2.0, 0.0)));
        assert_eq!(a.get(2, 0), None);

        let s = NumericArray::sparse(vec![0, 1, 1], vec![1], vec![7.0], 2, 2).unwrap();
        assert_eq!(s.get(1, 0), Some(Complex64::new(7.0, 0.0)));
        assert_eq!(s.get(0, 1), Some(Complex64::new(0.0, 0.0)));
    }

    #[test]
    fn test_single_value_of_views() {
        let one_by_one = NumericArray::sparse(vec![0, 1], vec![0], vec![6.0], 1, 1).unwrap();
        assert_eq!(one_by_one.as_real().and_then(|v| v.single_value()), Some(6.0));

        let empty_single = NumericArray::sparse(vec![0, 0], vec![], vec![], 1, 1).unwrap();
        assert_eq!(empty_single.as_real().and_then(|v| v.single_value()), Some(0.0));

        let wide = NumericArray::dense(vec![1.0, 2.0], 1, 2).unwrap();
        assert_eq!(wide.as_real().and_then(|v| v.single_value()), None);
    }

    #[test]
    fn test_arrays_do_not_share_storage() {
        let a = DenseMatrix::new(vec![1.0, 2.0], 2, 1).unwrap();
        let wrapped = NumericArray::from(a.clone());
        let copy = wrapped.clone();
        match (&wrapped, &copy) {
            (NumericArray::RealDense(x), NumericArray::RealDense(y)) => {
                assert_ne!(x.data().as_ptr(), y.data().as_ptr());
            }
            _ => panic!("Wrong representation"),
        }
    }
}
