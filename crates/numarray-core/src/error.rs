//! Error types for numeric array operations
//!
//! Provides a unified error type for all numarray crates.

use crate::types::{Representation, Shape};
use thiserror::Error;

/// Core error type for array construction, dispatch and kernel execution
#[derive(Error, Debug)]
pub enum Error {
    /// An operand required by the operation is absent
    #[error("Null operand: argument {position} to {operation} is missing")]
    NullOperand { operation: String, position: usize },

    /// Operand shapes are incompatible for the requested operation
    #[error("Dimension mismatch in {operation}: {left} is incompatible with {right}")]
    DimensionMismatch {
        operation: String,
        left: Shape,
        right: Shape,
    },

    /// No kernel is reachable for these representations, even after conversion
    #[error("Unsupported operation: {operation} is not available for [{representations}]")]
    UnsupportedOperation {
        operation: String,
        representations: String,
    },

    /// A checker found Inf or NaN
    #[error("Non-finite value encountered at row {row}, column {col}")]
    NonFiniteResult { row: usize, col: usize },

    /// Array buffers violate the storage invariants
    #[error("Invalid array: {0}")]
    InvalidArray(String),

    /// Startup-time registration or configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for a missing operand (1-based position)
    pub fn null_operand(operation: &str, position: usize) -> Self {
        Self::NullOperand {
            operation: operation.to_string(),
            position,
        }
    }

    /// Create an error for incompatible operand shapes
    pub fn dimension_mismatch(operation: &str, left: Shape, right: Shape) -> Self {
        Self::DimensionMismatch {
            operation: operation.to_string(),
            left,
            right,
        }
    }

    /// Create an error for an operation with no reachable kernel
    pub fn unsupported(operation: &str, representations: &[Representation]) -> Self {
        let representations = representations
            .iter()
            .map(|r| r.name())
            .collect::<Vec<_>>()
            .join(", ");
        Self::UnsupportedOperation {
            operation: operation.to_string(),
            representations,
        }
    }

    /// Create an error for a buffer that breaks an invariant
    pub fn invalid_array(reason: impl Into<String>) -> Self {
        Self::InvalidArray(reason.into())
    }

    /// Create an error for a buffer whose length does not match the shape
    pub fn length_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidArray(format!(
            "Length mismatch in {context}: expected {expected}, got {actual}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::null_operand("rdivide", 2);
        assert_eq!(err.to_string(), "Null operand: argument 2 to rdivide is missing");

        let err = Error::dimension_mismatch("plus", Shape::new(2, 2), Shape::new(3, 2));
        assert_eq!(
            err.to_string(),
            "Dimension mismatch in plus: 2x2 is incompatible with 3x2"
        );

        let err = Error::unsupported(
            "vertcat",
            &[Representation::RealScalar, Representation::ComplexSparse],
        );
        assert_eq!(
            err.to_string(),
            "Unsupported operation: vertcat is not available for [RealScalar, ComplexSparse]"
        );

        let err = Error::NonFiniteResult { row: 3, col: 1 };
        assert_eq!(err.to_string(), "Non-finite value encountered at row 3, column 1");

        let err = Error::Configuration("duplicate kernel".to_string());
        assert_eq!(err.to_string(), "Configuration error: duplicate kernel");
    }

    #[test]
    fn test_dimension_mismatch_carries_both_shapes() {
        match Error::dimension_mismatch("times", Shape::new(1, 4), Shape::new(4, 1)) {
            Error::DimensionMismatch { operation, left, right } => {
                assert_eq!(operation, "times");
                assert_eq!(left, Shape::new(1, 4));
                assert_eq!(right, Shape::new(4, 1));
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_length_mismatch_message() {
        let err = Error::length_mismatch(6, 5, "dense buffer");
        assert_eq!(
            err.to_string(),
            "Invalid array: Length mismatch in dense buffer: expected 6, got 5"
        );
    }

    #[test]
    fn test_error_from_anyhow() {
        let anyhow_err = anyhow::anyhow!("decoder gave up");
        let err: Error = anyhow_err.into();

        match err {
            Error::Other(_) => {
                assert!(err.to_string().contains("decoder gave up"));
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_error_chaining() {
        fn inner_function() -> Result<()> {
            Err(Error::NonFiniteResult { row: 0, col: 2 })
        }

        fn outer_function() -> Result<()> {
            inner_function().map_err(|e| Error::Configuration(format!("while validating: {e}")))
        }

        let err = outer_function().unwrap_err();
        assert!(err.to_string().contains("while validating"));
        assert!(err.to_string().contains("row 0, column 2"));
    }
}
