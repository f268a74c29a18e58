//! Compressed sparse column matrices
//!
//! Only explicitly stored entries are kept; everything else is an implicit
//! zero. Storage follows the usual CSC layout:
//!
//! - `col_ptr` has `cols + 1` entries, starts at 0, never decreases, and ends
//!   at the number of stored entries
//! - `row_idx[k]` is the row of stored entry `k`; within a column rows are
//!   strictly ascending
//! - `data[k]` is the value of stored entry `k`
//!
//! Kernels that preserve a sparsity pattern build their result with
//! [`SparseMatrix::with_values`], reusing the pattern of an input.

use crate::dense::DenseMatrix;
use crate::error::{Error, Result};
use crate::numeric::Element;
use crate::types::Shape;
use num_complex::Complex64;

/// Immutable compressed-sparse-column matrix
///
/// # Examples
///
/// ```
/// use numarray_core::SparseMatrix;
///
/// // [[4, 0],
/// //  [0, 8]]
/// let s = SparseMatrix::new(vec![0, 1, 2], vec![0, 1], vec![4.0, 8.0], 2, 2).unwrap();
/// assert_eq!(s.get(1, 1), 8.0);
/// assert_eq!(s.get(0, 1), 0.0); // implicit zero
/// assert_eq!(s.nnz(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SparseMatrix<T: Element = f64> {
    col_ptr: Vec<usize>,
    row_idx: Vec<usize>,
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Element> SparseMatrix<T> {
    /// Create a sparse matrix from CSC triples
    ///
    /// # Errors
    /// `InvalidArray` if any storage invariant is violated.
    pub fn new(
        col_ptr: Vec<usize>,
        row_idx: Vec<usize>,
        data: Vec<T>,
        rows: usize,
        cols: usize,
    ) -> Result<Self> {
        validate_pattern(&col_ptr, &row_idx, rows, cols)?;
        if data.len() != row_idx.len() {
            return Err(Error::length_mismatch(row_idx.len(), data.len(), "sparse data"));
        }
        Ok(Self {
            col_ptr,
            row_idx,
            data,
            rows,
            cols,
        })
    }

    /// Matrix with no stored entries
    ///
    /// # Panics
    /// If `cols + 1` column pointers cannot be allocated.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            col_ptr: vec![0; cols.saturating_add(1)],
            row_idx: Vec::new(),
            data: Vec::new(),
            rows,
            cols,
        }
    }

    /// Compress a dense matrix, storing only its nonzero elements
    pub fn from_dense(dense: &DenseMatrix<T>) -> Self {
        let rows = dense.rows();
        let cols = dense.cols();
        let mut col_ptr = Vec::with_capacity(cols + 1);
        let mut row_idx = Vec::new();
        let mut data = Vec::new();
        col_ptr.push(0);
        for c in 0..cols {
            for (r, &v) in dense.column(c).iter().enumerate() {
                if !v.is_zero() {
                    row_idx.push(r);
                    data.push(v);
                }
            }
            col_ptr.push(row_idx.len());
        }
        Self {
            col_ptr,
            row_idx,
            data,
            rows,
            cols,
        }
    }

    /// New matrix sharing this matrix's sparsity pattern with different values
    ///
    /// # Errors
    /// `InvalidArray` if `data.len() != self.nnz()`.
    pub fn with_values<U: Element>(&self, data: Vec<U>) -> Result<SparseMatrix<U>> {
        if data.len() != self.data.len() {
            return Err(Error::length_mismatch(self.data.len(), data.len(), "sparse data"));
        }
        Ok(SparseMatrix {
            col_ptr: self.col_ptr.clone(),
            row_idx: self.row_idx.clone(),
            data,
            rows: self.rows,
            cols: self.cols,
        })
    }

    /// Apply `f` to every stored value, keeping the pattern
    pub fn map_values<U: Element>(&self, f: impl Fn(T) -> U) -> SparseMatrix<U> {
        SparseMatrix {
            col_ptr: self.col_ptr.clone(),
            row_idx: self.row_idx.clone(),
            data: self.data.iter().map(|&x| f(x)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Zero-imaginary-padded complex copy with the same pattern
    pub fn to_complex(&self) -> SparseMatrix<Complex64> {
        self.map_values(Element::to_complex)
    }

    /// Expand to a dense matrix, filling implicit zeros
    ///
    /// # Errors
    /// `InvalidArray` if `rows × cols` overflows.
    pub fn to_dense(&self) -> Result<DenseMatrix<T>> {
        let len = self.shape().element_count("dense expansion")?;
        let mut data = vec![T::zero(); len];
        for (r, c, v) in self.iter() {
            data[c * self.rows + r] = v;
        }
        Ok(DenseMatrix::from_parts(data, self.rows, self.cols))
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

    /// Number of stored entries
    #[inline]
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn col_ptr(&self) -> &[usize] {
        &self.col_ptr
    }

    #[inline]
    pub fn row_idx(&self) -> &[usize] {
        &self.row_idx
    }

    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Fraction of elements that are implicit zeros
    pub fn sparsity(&self) -> f64 {
        let n = self.rows as f64 * self.cols as f64;
        if n == 0.0 {
            0.0
        } else {
            1.0 - (self.nnz() as f64 / n)
        }
    }

    /// True if at least one element is an implicit zero
    pub fn has_implicit_zeros(&self) -> bool {
        // An element count beyond usize::MAX always exceeds nnz
        self.shape().len().map_or(true, |n| self.nnz() < n)
    }

    /// Row indices and values stored in column `col`
    ///
    /// # Panics
    /// If `col >= self.cols()`.
    pub fn column(&self, col: usize) -> (&[usize], &[T]) {
        let range = self.col_ptr[col]..self.col_ptr[col + 1];
        (&self.row_idx[range.clone()], &self.data[range])
    }

    /// Value at `(row, col)`; zero when not stored or out of bounds
    pub fn get(&self, row: usize, col: usize) -> T {
        if col >= self.cols {
            return T::zero();
        }
        // Binary search since rows are sorted within a column
        let (rows, values) = self.column(col);
        match rows.binary_search(&row) {
            Ok(pos) => values[pos],
            Err(_) => T::zero(),
        }
    }

    /// True if `(row, col)` is explicitly stored
    pub fn contains(&self, row: usize, col: usize) -> bool {
        col < self.cols && self.column(col).0.binary_search(&row).is_ok()
    }

    /// Iterate over stored `(row, col, value)` entries in column-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        (0..self.cols).flat_map(move |c| {
            let (rows, values) = self.column(c);
            rows.iter().zip(values.iter()).map(move |(&r, &v)| (r, c, v))
        })
    }

    pub fn transpose(&self) -> Self {
        // Count entries per row of the input, which become columns of the output
        let mut col_ptr = vec![0usize; self.rows + 1];
        for &r in &self.row_idx {
            col_ptr[r + 1] += 1;
        }
        for i in 1..=self.rows {
            col_ptr[i] += col_ptr[i - 1];
        }

        let nnz = self.nnz();
        let mut row_idx = vec![0usize; nnz];
        let mut data = vec![T::zero(); nnz];
        let mut offset = col_ptr.clone();
        // Walking input columns in order keeps output rows ascending
        for (r, c, v) in self.iter() {
            let pos = offset[r];
            row_idx[pos] = c;
            data[pos] = v;
            offset[r] += 1;
        }

        Self {
            col_ptr,
            row_idx,
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }
}

impl SparseMatrix<Complex64> {
    /// Create a complex sparse matrix from an interleaved `(re, im)` data buffer
    pub fn from_interleaved(
        col_ptr: Vec<usize>,
        row_idx: Vec<usize>,
        data: &[f64],
        rows: usize,
        cols: usize,
    ) -> Result<Self> {
        if data.len() != 2 * row_idx.len() {
            return Err(Error::length_mismatch(
                2 * row_idx.len(),
                data.len(),
                "interleaved sparse data",
            ));
        }
        let data = data
            .chunks_exact(2)
            .map(|pair| Complex64::new(pair[0], pair[1]))
            .collect();
        Self::new(col_ptr, row_idx, data, rows, cols)
    }

    /// Interleaved `(re, im)` view of the stored values
    pub fn as_interleaved(&self) -> &[f64] {
        bytemuck::cast_slice(&self.data)
    }
}

fn validate_pattern(col_ptr: &[usize], row_idx: &[usize], rows: usize, cols: usize) -> Result<()> {
    let expected = cols
        .checked_add(1)
        .ok_or_else(|| Error::invalid_array(format!("{cols} columns is too many")))?;
    if col_ptr.len() != expected {
        return Err(Error::length_mismatch(expected, col_ptr.len(), "column pointer"));
    }
    if col_ptr[0] != 0 {
        return Err(Error::invalid_array(format!(
            "Column pointer must start at 0, got {}",
            col_ptr[0]
        )));
    }
    if col_ptr[cols] != row_idx.len() {
        return Err(Error::invalid_array(format!(
            "Column pointer ends at {} but {} row indices were given",
            col_ptr[cols],
            row_idx.len()
        )));
    }
    for c in 0..cols {
        let (start, end) = (col_ptr[c], col_ptr[c + 1]);
        if end < start || end > row_idx.len() {
            return Err(Error::invalid_array(format!(
                "Column pointer is not monotonic at column {c}"
            )));
        }
        let column = &row_idx[start..end];
        if let Some(&r) = column.iter().find(|&&r| r >= rows) {
            return Err(Error::invalid_array(format!(
                "Row index {r} out of bounds for {rows} rows in column {c}"
            )));
        }
        if column.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::invalid_array(format!(
                "Row indices in column {c} are not strictly ascending"
            )));
        }
    }
    Ok(())
}
