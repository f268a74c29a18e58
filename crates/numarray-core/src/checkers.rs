//! Finiteness checkers
//!
//! Post-condition validators that scan an array for Inf or NaN and report a
//! single offending coordinate. The canonical report is the first non-finite
//! value in column-major order (column outer, row inner). The legacy report,
//! kept for callers that must reproduce old coordinates, is the first
//! offending row of the *last* column containing a non-finite value.

use crate::array::{MatrixRef, NumericArray};
use crate::error::{Error, Result};
use crate::numeric::Element;
use serde::{Deserialize, Serialize};

/// Coordinate of a non-finite element
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InfLocation {
    pub row: usize,
    pub col: usize,
}

impl From<InfLocation> for Error {
    fn from(loc: InfLocation) -> Self {
        Error::NonFiniteResult {
            row: loc.row,
            col: loc.col,
        }
    }
}

/// Which offending coordinate a checker reports
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPolicy {
    /// First non-finite value in column-major scan order
    #[default]
    FirstOccurrence,
    /// First offending row within the last offending column
    LegacyLastColumn,
}

/// Locate a non-finite element without raising
pub fn locate_non_finite(array: &NumericArray, policy: ReportPolicy) -> Option<InfLocation> {
    match array {
        NumericArray::RealScalar(_) | NumericArray::RealDense(_) | NumericArray::RealSparse(_) => {
            array.as_real().and_then(|m| locate_in(m, policy))
        }
        _ => array.as_complex().and_then(|m| locate_in(m, policy)),
    }
}

/// Check that every element is finite, reporting the first offender
///
/// # Errors
/// `NonFiniteResult` carrying the offending coordinate.
///
/// ```
/// use numarray_core::{check_finite, Error, NumericArray};
///
/// let ok = NumericArray::dense(vec![1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();
/// assert!(check_finite(&ok).is_ok());
///
/// let bad = NumericArray::dense(vec![1.0, 2.0, f64::INFINITY, 4.0], 2, 2).unwrap();
/// assert!(matches!(check_finite(&bad), Err(Error::NonFiniteResult { row: 0, col: 1 })));
/// ```
pub fn check_finite(array: &NumericArray) -> Result<()> {
    check_finite_with(array, ReportPolicy::FirstOccurrence)
}

/// [`check_finite`] with an explicit report policy
pub fn check_finite_with(array: &NumericArray, policy: ReportPolicy) -> Result<()> {
    match locate_non_finite(array, policy) {
        Some(loc) => {
            tracing::debug!(row = loc.row, col = loc.col, "non-finite value located");
            Err(loc.into())
        }
        None => Ok(()),
    }
}

fn locate_in<T: Element>(matrix: MatrixRef<'_, T>, policy: ReportPolicy) -> Option<InfLocation> {
    match matrix {
        MatrixRef::Scalar(v) => (!v.is_finite()).then_some(InfLocation { row: 0, col: 0 }),
        MatrixRef::Dense(d) => {
            let columns = (0..d.cols()).map(|c| d.column(c).iter().position(|v| !v.is_finite()));
            pick(columns, policy)
        }
        MatrixRef::Sparse(s) => {
            let columns = (0..s.cols()).map(|c| {
                let (rows, values) = s.column(c);
                values.iter().position(|v| !v.is_finite()).map(|k| rows[k])
            });
            pick(columns, policy)
        }
    }
}

/// Choose a coordinate from per-column first offending rows
fn pick(columns: impl Iterator<Item = Option<usize>>, policy: ReportPolicy) -> Option<InfLocation> {
    let mut hits = columns
        .enumerate()
        .filter_map(|(col, row)| row.map(|row| InfLocation { row, col }));
    match policy {
        ReportPolicy::FirstOccurrence => hits.next(),
        ReportPolicy::LegacyLastColumn => hits.last(),
    }
}
