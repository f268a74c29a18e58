//! Dense column-major matrices
//!
//! A dense matrix stores `rows × cols` elements contiguously in column-major
//! order: element `(r, c)` lives at offset `c * rows + r`. Complex matrices
//! are laid out as interleaved `(re, im)` pairs, which [`DenseMatrix::as_interleaved`]
//! exposes without copying.

use crate::error::{Error, Result};
use crate::numeric::Element;
use crate::types::Shape;
use num_complex::Complex64;

/// Immutable dense matrix in column-major order
#[derive(Clone, Debug, PartialEq)]
pub struct DenseMatrix<T: Element = f64> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Element> DenseMatrix<T> {
    /// Create a dense matrix from a column-major buffer
    ///
    /// # Errors
    /// `InvalidArray` if `data.len() != rows * cols` or the product overflows.
    pub fn new(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        let expected = Shape::new(rows, cols).element_count("dense buffer")?;
        if data.len() != expected {
            return Err(Error::length_mismatch(expected, data.len(), "dense buffer"));
        }
        Ok(Self { data, rows, cols })
    }

    /// Caller guarantees `data.len() == rows * cols`
    pub(crate) fn from_parts(data: Vec<T>, rows: usize, cols: usize) -> Self {
        debug_assert_eq!(Some(data.len()), rows.checked_mul(cols));
        Self { data, rows, cols }
    }

    /// Create a dense matrix from row-major nested rows
    ///
    /// ```
    /// use numarray_core::DenseMatrix;
    ///
    /// let m = DenseMatrix::from_rows(&[vec![2.0, 3.0], vec![5.0, 2.0]]).unwrap();
    /// assert_eq!(m.data(), &[2.0, 5.0, 3.0, 2.0]);
    /// ```
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().position(|r| r.len() != n_cols) {
            return Err(Error::invalid_array(format!(
                "Row {bad} has {} columns, expected {n_cols}",
                rows[bad].len()
            )));
        }
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for c in 0..n_cols {
            data.extend(rows.iter().map(|row| row[c]));
        }
        Ok(Self {
            data,
            rows: n_rows,
            cols: n_cols,
        })
    }

    /// Matrix with every element set to `value`
    ///
    /// # Panics
    /// If `rows × cols` elements cannot be allocated.
    pub fn filled(value: T, rows: usize, cols: usize) -> Self {
        Self {
            data: vec![value; rows.saturating_mul(cols)],
            rows,
            cols,
        }
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::filled(T::zero(), rows, cols)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> Shape {
        Shape::new(self.rows, self.cols)
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Column-major backing buffer
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Element at `(row, col)`, or `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row < self.rows && col < self.cols {
            Some(self.data[col * self.rows + row])
        } else {
            None
        }
    }

    /// Contiguous slice holding column `col`
    ///
    /// # Panics
    /// If `col >= self.cols()`.
    pub fn column(&self, col: usize) -> &[T] {
        let start = col * self.rows;
        &self.data[start..start + self.rows]
    }

    /// Apply `f` to every element, producing a new matrix of the same shape
    pub fn map<U: Element>(&self, f: impl Fn(T) -> U) -> DenseMatrix<U> {
        DenseMatrix {
            data: self.data.iter().map(|&x| f(x)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Zero-imaginary-padded complex copy
    pub fn to_complex(&self) -> DenseMatrix<Complex64> {
        self.map(Element::to_complex)
    }

    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for r in 0..self.rows {
            data.extend((0..self.cols).map(|c| self.data[c * self.rows + r]));
        }
        Self {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }

    /// Iterate over `(row, col, value)` in column-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        let rows = self.rows.max(1);
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i % rows, i / rows, v))
    }
}

impl DenseMatrix<Complex64> {
    /// Create a complex matrix from an interleaved `(re, im)` buffer
    ///
    /// # Errors
    /// `InvalidArray` if `data.len() != 2 * rows * cols` or the product overflows.
    pub fn from_interleaved(data: &[f64], rows: usize, cols: usize) -> Result<Self> {
        let context = "interleaved complex buffer";
        let expected = Shape::new(rows, cols)
            .element_count(context)?
            .checked_mul(2)
            .ok_or_else(|| Error::invalid_array(format!("{rows}x{cols} {context} is too large")))?;
        if data.len() != expected {
            return Err(Error::length_mismatch(expected, data.len(), context));
        }
        let data = data
            .chunks_exact(2)
            .map(|pair| Complex64::new(pair[0], pair[1]))
            .collect();
        Ok(Self { data, rows, cols })
    }

    /// Interleaved `(re, im)` view of the buffer, length `2 * rows * cols`
    pub fn as_interleaved(&self) -> &[f64] {
        bytemuck::cast_slice(&self.data)
    }
}
