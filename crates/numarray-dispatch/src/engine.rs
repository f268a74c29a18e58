//! Engine context object
//!
//! The [`Engine`] owns the frozen registry, converter graph and resolution
//! table. It is built once at start-up and shared by reference (or behind an
//! `Arc`) with every caller; nothing inside it changes after construction, so
//! concurrent calls need no locking.

use crate::config::EngineConfig;
use crate::convert::{ConverterGraph, ConverterGraphBuilder};
use crate::defaults::register_defaults;
use crate::registry::{DispatchRegistry, RegistryBuilder};
use crate::resolver::{Resolution, Resolver};
use numarray_core::{
    check_finite_with, Error, ExecutionContext, NumericArray, Representation, Result,
};
use numarray_kernels::Operation;
use tracing::{debug, info, instrument};

/// Runtime dispatch and conversion engine
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    registry: DispatchRegistry,
    graph: ConverterGraph,
    resolver: Resolver,
    context: ExecutionContext,
}

impl Engine {
    /// Engine with the standard kernels and converters
    ///
    /// # Errors
    /// `Configuration` if the standard registrations conflict.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let mut registry = RegistryBuilder::new().verbose(config.verbose);
        let mut graph = ConverterGraphBuilder::new();
        register_defaults(&mut registry, &mut graph)?;
        Ok(Self::from_parts(config, registry.build(), graph.build()))
    }

    /// Engine over caller-supplied registrations
    pub fn from_parts(
        config: EngineConfig,
        registry: DispatchRegistry,
        graph: ConverterGraph,
    ) -> Self {
        let resolver = Resolver::build(&registry, &graph, config.verbose);
        let context = config.execution_context();
        debug!(
            kernels = registry.len(),
            converters = graph.edges().len(),
            resolutions = resolver.len(),
            synthesized = resolver.synthesized(),
            "engine initialized"
        );
        if config.verbose {
            info!(
                kernels = registry.len(),
                converters = graph.edges().len(),
                resolutions = resolver.len(),
                execution = ?config.execution,
                "engine ready"
            );
        }
        Self {
            config,
            registry,
            graph,
            resolver,
            context,
        }
    }

    /// Apply `operation` to `operands`, converting them as needed
    ///
    /// # Errors
    /// - `NullOperand` if fewer operands than the operation's arity are given
    /// - `UnsupportedOperation` if no kernel is reachable for the operand
    ///   representations
    /// - `DimensionMismatch` from the kernel for incompatible shapes
    /// - `NonFiniteResult` when result checking is enabled
    #[instrument(skip(self, operands), fields(operation = %operation, n_operands = operands.len()))]
    pub fn apply(&self, operation: Operation, operands: &[&NumericArray]) -> Result<NumericArray> {
        let arity = operation.arity();
        if operands.len() < arity {
            return Err(Error::null_operand(operation.name(), operands.len() + 1));
        }
        let representations: Vec<Representation> =
            operands.iter().map(|a| a.representation()).collect();
        if operands.len() > arity {
            return Err(Error::unsupported(operation.name(), &representations));
        }

        let resolution = self.resolver.resolve(operation, &representations)?;
        if !resolution.is_exact() {
            debug!(target = %resolution.target(), cost = resolution.cost(), "converting operands");
        }
        let prepared = resolution.prepare(operands)?;
        let prepared: Vec<&NumericArray> = prepared.iter().map(|a| a.as_ref()).collect();

        let result = resolution.kernel().eval(&self.context, &prepared)?;
        if self.config.check_results {
            check_finite_with(&result, self.config.report_policy)?;
        }
        Ok(result)
    }

    /// [`apply`](Self::apply) with an operation selected by name
    ///
    /// # Errors
    /// `UnsupportedOperation` naming the operands' representations if `name`
    /// is not a known operation, otherwise as [`apply`](Self::apply).
    pub fn apply_named(&self, name: &str, operands: &[&NumericArray]) -> Result<NumericArray> {
        let operation = name.parse::<Operation>().map_err(|_| {
            let representations: Vec<Representation> =
                operands.iter().map(|a| a.representation()).collect();
            Error::unsupported(name, &representations)
        })?;
        self.apply(operation, operands)
    }

    /// [`apply`](Self::apply) for callers holding optional operands
    ///
    /// # Errors
    /// `NullOperand` naming the first missing operand (1-based).
    pub fn apply_nullable(
        &self,
        operation: Operation,
        operands: &[Option<&NumericArray>],
    ) -> Result<NumericArray> {
        let present = operands
            .iter()
            .enumerate()
            .map(|(i, a)| a.ok_or_else(|| Error::null_operand(operation.name(), i + 1)))
            .collect::<Result<Vec<_>>>()?;
        self.apply(operation, &present)
    }

    /// Convert `array` to `target` through the converter graph
    ///
    /// # Errors
    /// `UnsupportedOperation` when no conversion path exists.
    pub fn convert(&self, array: &NumericArray, target: Representation) -> Result<NumericArray> {
        self.graph.convert(array, target)
    }

    /// Run the finiteness checker with the configured report policy
    pub fn check_finite(&self, array: &NumericArray) -> Result<()> {
        check_finite_with(array, self.config.report_policy)
    }

    /// Precomputed resolution for these representations
    pub fn resolve(
        &self,
        operation: Operation,
        operands: &[Representation],
    ) -> Result<&Resolution> {
        self.resolver.resolve(operation, operands)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &DispatchRegistry {
        &self.registry
    }

    pub fn converter_graph(&self) -> &ConverterGraph {
        &self.graph
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }
}
