//! Kernel trait
//!
//! A kernel is the implementation registered for one or more operation
//! signatures. By the time a kernel runs, the dispatcher has already converted
//! every operand to one of the representations the kernel was registered for,
//! so kernels only validate shapes, never representations they were not
//! registered under.

use crate::operation::Operation;
use numarray_core::{Element, Error, ExecutionContext, MatrixRef, NumericArray, Result};

/// Base trait for all array kernels
///
/// Kernels are stateless apart from their configuration and are shared
/// between threads behind `Arc<dyn Kernel>`.
pub trait Kernel: Send + Sync + std::fmt::Debug {
    /// The operation this kernel implements
    fn operation(&self) -> Operation;

    /// Evaluate the kernel on operands of a registered signature
    ///
    /// # Errors
    /// `DimensionMismatch` for incompatible shapes, `UnsupportedOperation`
    /// when called with operands outside its registration.
    fn eval(&self, ctx: &ExecutionContext, operands: &[&NumericArray]) -> Result<NumericArray>;

    /// Name of this kernel for debugging/logging
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Typed view of operand `index`
///
/// # Errors
/// `NullOperand` if it is missing, `UnsupportedOperation` if it lives in the
/// other domain.
pub fn typed_operand<'a, T: Element>(
    operation: Operation,
    operands: &[&'a NumericArray],
    index: usize,
) -> Result<MatrixRef<'a, T>> {
    let array: &'a NumericArray = operands
        .get(index)
        .copied()
        .ok_or_else(|| Error::null_operand(operation.name(), index + 1))?;
    T::view(array).ok_or_else(|| unsupported_for(operation, operands))
}

/// `UnsupportedOperation` naming the operands' representations
pub fn unsupported_for(operation: Operation, operands: &[&NumericArray]) -> Error {
    let representations: Vec<_> = operands.iter().map(|a| a.representation()).collect();
    Error::unsupported(operation.name(), &representations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn test_typed_operand_checks_domain() {
        let real = NumericArray::from(2.0);
        let operands = [&real];
        assert!(typed_operand::<f64>(Operation::Sin, &operands, 0).is_ok());
        assert!(matches!(
            typed_operand::<Complex64>(Operation::Sin, &operands, 0),
            Err(Error::UnsupportedOperation { .. })
        ));
    }

    #[test]
    fn test_typed_operand_missing_is_null() {
        let real = NumericArray::from(2.0);
        match typed_operand::<f64>(Operation::Plus, &[&real], 1) {
            Err(Error::NullOperand { operation, position }) => {
                assert_eq!(operation, "plus");
                assert_eq!(position, 2);
            }
            other => panic!("Unexpected result: {other:?}"),
        }
    }
}
