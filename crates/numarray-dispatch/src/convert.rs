//! Converter graph
//!
//! A directed graph over the six representations whose edges are pure,
//! unit-cost conversion functions. Shortest paths between every pair of
//! representations are computed once when the graph is built, by breadth
//! first search from each source; ties between equal-length paths go to the
//! edge registered first.

use numarray_core::{Error, NumericArray, Representation, Result};
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// Pure conversion between two representations
pub type ConvertFn = fn(&NumericArray) -> Result<NumericArray>;

/// One unit-cost conversion
#[derive(Clone, Copy)]
pub struct ConversionEdge {
    source: Representation,
    target: Representation,
    convert: ConvertFn,
}

impl ConversionEdge {
    pub fn new(source: Representation, target: Representation, convert: ConvertFn) -> Self {
        Self {
            source,
            target,
            convert,
        }
    }

    pub fn source(&self) -> Representation {
        self.source
    }

    pub fn target(&self) -> Representation {
        self.target
    }

    /// Convert `array`, which must have this edge's source representation
    pub fn apply(&self, array: &NumericArray) -> Result<NumericArray> {
        if array.representation() != self.source {
            return Err(Error::unsupported("convert", &[array.representation(), self.target]));
        }
        let converted = (self.convert)(array)?;
        if converted.representation() != self.target {
            return Err(Error::Configuration(format!(
                "Converter {} -> {} produced {}",
                self.source,
                self.target,
                converted.representation()
            )));
        }
        Ok(converted)
    }
}

impl fmt::Debug for ConversionEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// A chain of conversions; empty for the identity
#[derive(Clone, Debug, Default)]
pub struct ConversionPath {
    edges: Vec<ConversionEdge>,
}

impl ConversionPath {
    pub fn identity() -> Self {
        Self::default()
    }

    /// Number of edges, the path's conversion cost
    pub fn cost(&self) -> usize {
        self.edges.len()
    }

    pub fn is_identity(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edges(&self) -> &[ConversionEdge] {
        &self.edges
    }

    /// Run every edge in order
    pub fn apply(&self, array: &NumericArray) -> Result<NumericArray> {
        let mut edges = self.edges.iter();
        let Some(first) = edges.next() else {
            return Ok(array.clone());
        };
        edges.try_fold(first.apply(array)?, |current, edge| edge.apply(&current))
    }
}

impl fmt::Display for ConversionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.edges.first() {
            None => f.write_str("identity"),
            Some(first) => {
                write!(f, "{}", first.source)?;
                for edge in &self.edges {
                    write!(f, " -> {}", edge.target)?;
                }
                Ok(())
            }
        }
    }
}

/// Builder collecting conversion edges before the graph is frozen
#[derive(Debug, Default)]
pub struct ConverterGraphBuilder {
    edges: Vec<ConversionEdge>,
}

impl ConverterGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a conversion edge
    ///
    /// # Errors
    /// `Configuration` for a self-loop or a second edge between the same pair.
    pub fn register(
        &mut self,
        source: Representation,
        target: Representation,
        convert: ConvertFn,
    ) -> Result<&mut Self> {
        if source == target {
            return Err(Error::Configuration(format!(
                "Converter from {source} to itself"
            )));
        }
        if self.edges.iter().any(|e| e.source == source && e.target == target) {
            return Err(Error::Configuration(format!(
                "Duplicate converter {source} -> {target}"
            )));
        }
        self.edges.push(ConversionEdge::new(source, target, convert));
        Ok(self)
    }

    pub fn build(self) -> ConverterGraph {
        ConverterGraph::new(self.edges)
    }
}

/// Immutable graph of conversions with precomputed shortest paths
#[derive(Debug)]
pub struct ConverterGraph {
    edges: Vec<ConversionEdge>,
    paths: HashMap<(Representation, Representation), ConversionPath>,
}

impl ConverterGraph {
    pub fn builder() -> ConverterGraphBuilder {
        ConverterGraphBuilder::new()
    }

    fn new(edges: Vec<ConversionEdge>) -> Self {
        let mut paths = HashMap::new();
        for source in Representation::ALL {
            for (target, path) in shortest_paths(&edges, source) {
                paths.insert((source, target), path);
            }
        }
        Self { edges, paths }
    }

    pub fn edges(&self) -> &[ConversionEdge] {
        &self.edges
    }

    /// Shortest path from `source` to `target`, the identity when equal
    pub fn path(&self, source: Representation, target: Representation) -> Option<&ConversionPath> {
        self.paths.get(&(source, target))
    }

    /// Convert `array` to `target` along the shortest path
    ///
    /// # Errors
    /// `UnsupportedOperation` when `target` is unreachable.
    pub fn convert(&self, array: &NumericArray, target: Representation) -> Result<NumericArray> {
        let source = array.representation();
        self.path(source, target)
            .ok_or_else(|| Error::unsupported("convert", &[source, target]))?
            .apply(array)
    }
}

/// Breadth-first search from `source`, returning a path to every reachable
/// representation (including `source` itself)
fn shortest_paths(
    edges: &[ConversionEdge],
    source: Representation,
) -> Vec<(Representation, ConversionPath)> {
    let mut found: HashMap<Representation, ConversionPath> = HashMap::new();
    found.insert(source, ConversionPath::identity());
    let mut order = vec![source];
    let mut queue = VecDeque::from([source]);

    while let Some(current) = queue.pop_front() {
        let base = found[&current].clone();
        for edge in edges.iter().filter(|e| e.source == current) {
            if found.contains_key(&edge.target) {
                continue;
            }
            let mut path = base.clone();
            path.edges.push(*edge);
            found.insert(edge.target, path);
            order.push(edge.target);
            queue.push_back(edge.target);
        }
    }

    order
        .into_iter()
        .filter_map(|rep| found.remove(&rep).map(|path| (rep, path)))
        .collect()
}
