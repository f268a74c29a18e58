//! Operation resolver
//!
//! For every registered operation the resolver precomputes, across every
//! tuple of operand representations of that operation's arity, which kernel
//! to run and how to convert each operand to reach it. Call-time dispatch is
//! a single table lookup.
//!
//! # Selection
//!
//! An exact registry match always wins. Otherwise every registered signature
//! of the operation is a candidate if each operand can reach the candidate's
//! representation through the converter graph. Candidates are ranked by:
//!
//! 1. total conversion cost (sum of path lengths)
//! 2. number of complex operands after conversion (fewer is better)
//! 3. number of dense operands after conversion (fewer is better)
//! 4. representation ordinals, for a deterministic final order

use crate::convert::{ConversionPath, ConverterGraph};
use crate::registry::{DispatchRegistry, OperationSignature};
use numarray_core::{Domain, Error, NumericArray, Representation, Result, Structure};
use numarray_kernels::{Kernel, Operation};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

/// How to run an operation on one tuple of operand representations
#[derive(Clone, Debug)]
pub struct Resolution {
    target: OperationSignature,
    kernel: Arc<dyn Kernel>,
    conversions: Vec<ConversionPath>,
}

impl Resolution {
    /// Signature of the kernel that runs
    pub fn target(&self) -> &OperationSignature {
        &self.target
    }

    pub fn kernel(&self) -> &Arc<dyn Kernel> {
        &self.kernel
    }

    /// Per-operand conversion paths, identity for operands used as-is
    pub fn conversions(&self) -> &[ConversionPath] {
        &self.conversions
    }

    pub fn cost(&self) -> usize {
        self.conversions.iter().map(ConversionPath::cost).sum()
    }

    /// No operand needs converting
    pub fn is_exact(&self) -> bool {
        self.conversions.iter().all(ConversionPath::is_identity)
    }

    /// Convert operands to the kernel's representations
    pub fn prepare<'a>(&self, operands: &[&'a NumericArray]) -> Result<Vec<Cow<'a, NumericArray>>> {
        operands
            .iter()
            .zip(&self.conversions)
            .map(|(&array, path)| {
                if path.is_identity() {
                    Ok(Cow::Borrowed(array))
                } else {
                    path.apply(array).map(Cow::Owned)
                }
            })
            .collect()
    }
}

/// Ranking key; smaller is better
type RankKey = (usize, usize, usize, Vec<usize>);

fn rank(cost: usize, targets: &[Representation]) -> RankKey {
    let complex = targets.iter().filter(|r| r.domain() == Domain::Complex).count();
    let dense = targets.iter().filter(|r| r.structure() == Structure::Dense).count();
    let ordinals = targets.iter().map(|r| r.ordinal()).collect();
    (cost, complex, dense, ordinals)
}

/// Precomputed resolution table
#[derive(Debug)]
pub struct Resolver {
    table: HashMap<OperationSignature, Resolution>,
    synthesized: usize,
}

impl Resolver {
    /// Resolve every representation tuple of every registered operation
    pub fn build(registry: &DispatchRegistry, graph: &ConverterGraph, verbose: bool) -> Self {
        let mut table = HashMap::new();
        let mut synthesized = 0;
        for operation in registry.operations() {
            for operands in representation_tuples(operation.arity()) {
                let requested = OperationSignature::new(operation, operands);
                let Some(resolution) = resolve_one(registry, graph, &requested) else {
                    continue;
                };
                if !resolution.is_exact() {
                    synthesized += 1;
                    if verbose {
                        tracing::info!(
                            %requested,
                            target = %resolution.target,
                            cost = resolution.cost(),
                            "synthesized resolution"
                        );
                    }
                }
                table.insert(requested, resolution);
            }
        }
        Self { table, synthesized }
    }

    /// Look up the resolution for `operation` on these representations
    ///
    /// # Errors
    /// `UnsupportedOperation` when no kernel is reachable.
    pub fn resolve(
        &self,
        operation: Operation,
        operands: &[Representation],
    ) -> Result<&Resolution> {
        let key = OperationSignature::new(operation, operands);
        self.table
            .get(&key)
            .ok_or_else(|| Error::unsupported(operation.name(), operands))
    }

    /// Number of resolvable signatures
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Number of resolutions that convert at least one operand
    pub fn synthesized(&self) -> usize {
        self.synthesized
    }
}

fn resolve_one(
    registry: &DispatchRegistry,
    graph: &ConverterGraph,
    requested: &OperationSignature,
) -> Option<Resolution> {
    if let Some(kernel) = registry.get(requested) {
        return Some(Resolution {
            target: requested.clone(),
            kernel: Arc::clone(kernel),
            conversions: vec![ConversionPath::identity(); requested.operands.len()],
        });
    }

    let mut best: Option<(RankKey, &OperationSignature, Vec<ConversionPath>)> = None;
    for candidate in registry.signatures(requested.operation) {
        let Some(paths) = requested
            .operands
            .iter()
            .zip(&candidate.operands)
            .map(|(&from, &to)| graph.path(from, to).cloned())
            .collect::<Option<Vec<_>>>()
        else {
            continue;
        };
        let cost = paths.iter().map(ConversionPath::cost).sum();
        let key = rank(cost, &candidate.operands);
        if best.as_ref().map_or(true, |(best_key, _, _)| key < *best_key) {
            best = Some((key, candidate, paths));
        }
    }

    let (_, target, conversions) = best?;
    let kernel = registry.get(target)?;
    Some(Resolution {
        target: target.clone(),
        kernel: Arc::clone(kernel),
        conversions,
    })
}

/// Every ordered tuple of `arity` representations
fn representation_tuples(arity: usize) -> Vec<Vec<Representation>> {
    (0..arity).fold(vec![Vec::new()], |tuples, _| {
        tuples
            .iter()
            .flat_map(|prefix| {
                Representation::ALL.iter().map(move |&rep| {
                    let mut tuple = prefix.clone();
                    tuple.push(rep);
                    tuple
                })
            })
            .collect()
    })
}
