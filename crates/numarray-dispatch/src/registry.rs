//! Dispatch registry
//!
//! Maps an [`OperationSignature`] to exactly one kernel. The registry is
//! populated through [`RegistryBuilder`] during start-up and frozen by
//! [`RegistryBuilder::build`]; there is no way to add or replace entries
//! afterwards.

use numarray_core::{Error, Representation, Result};
use numarray_kernels::{Kernel, Operation};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// Registry key: an operation plus its ordered operand representations
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperationSignature {
    pub operation: Operation,
    pub operands: Vec<Representation>,
}

impl OperationSignature {
    pub fn new(operation: Operation, operands: impl Into<Vec<Representation>>) -> Self {
        Self {
            operation,
            operands: operands.into(),
        }
    }
}

impl fmt::Display for OperationSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.operation)?;
        for (i, rep) in self.operands.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{rep}")?;
        }
        f.write_str(")")
    }
}

/// Collects registrations, rejecting conflicts
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    kernels: HashMap<OperationSignature, Arc<dyn Kernel>>,
    verbose: bool,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log every registration at `info`
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Register `kernel` for `signature`
    ///
    /// # Errors
    /// `Configuration` if the signature is already taken, its arity does not
    /// match the operation, or the kernel implements a different operation.
    pub fn register(
        &mut self,
        signature: OperationSignature,
        kernel: Arc<dyn Kernel>,
    ) -> Result<&mut Self> {
        let operation = signature.operation;
        if signature.operands.len() != operation.arity() {
            return Err(Error::Configuration(format!(
                "{signature} has {} operands but {operation} takes {}",
                signature.operands.len(),
                operation.arity()
            )));
        }
        if kernel.operation() != operation {
            return Err(Error::Configuration(format!(
                "{} implements {} and cannot be registered for {signature}",
                kernel.name(),
                kernel.operation()
            )));
        }
        if self.kernels.contains_key(&signature) {
            return Err(Error::Configuration(format!(
                "Duplicate kernel registration for {signature}"
            )));
        }
        if self.verbose {
            tracing::info!(%signature, kernel = kernel.name(), "registered kernel");
        }
        self.kernels.insert(signature, kernel);
        Ok(self)
    }

    /// Register one kernel for several signatures of its operation
    pub fn register_all<I>(&mut self, kernel: Arc<dyn Kernel>, signatures: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Vec<Representation>>,
    {
        let operation = kernel.operation();
        for operands in signatures {
            self.register(OperationSignature::new(operation, operands), Arc::clone(&kernel))?;
        }
        Ok(self)
    }

    pub fn build(self) -> DispatchRegistry {
        let mut by_operation: BTreeMap<Operation, Vec<OperationSignature>> = BTreeMap::new();
        for signature in self.kernels.keys() {
            by_operation
                .entry(signature.operation)
                .or_default()
                .push(signature.clone());
        }
        for signatures in by_operation.values_mut() {
            signatures.sort();
        }
        DispatchRegistry {
            kernels: self.kernels,
            by_operation,
        }
    }
}

/// Immutable mapping from signature to kernel
#[derive(Debug)]
pub struct DispatchRegistry {
    kernels: HashMap<OperationSignature, Arc<dyn Kernel>>,
    by_operation: BTreeMap<Operation, Vec<OperationSignature>>,
}

impl DispatchRegistry {
    /// Exact-match lookup
    pub fn get(&self, signature: &OperationSignature) -> Option<&Arc<dyn Kernel>> {
        self.kernels.get(signature)
    }

    /// Registered signatures of `operation`, in sorted order
    pub fn signatures(&self, operation: Operation) -> &[OperationSignature] {
        self.by_operation
            .get(&operation)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Operations with at least one kernel, in sorted order
    pub fn operations(&self) -> impl Iterator<Item = Operation> + '_ {
        self.by_operation.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }
}
