use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

/// Capability set the traversal needs from a directed graph: enumerate
/// vertices, enumerate outgoing edges, resolve an edge to its target,
/// and hand out a view with every edge reversed.
///
/// `vertices` and `outgoing_edges` must enumerate in a stable order;
/// that order is what makes recorded traces reproducible.
pub trait DirectedView {
    type Vertex: Clone + Eq + Hash + Ord;
    type Edge: Clone;
    type Transposed: DirectedView<Vertex = Self::Vertex>;

    fn vertices(&self) -> Box<dyn Iterator<Item = Self::Vertex> + '_>;

    fn outgoing_edges(&self, vertex: &Self::Vertex) -> Box<dyn Iterator<Item = Self::Edge> + '_>;

    fn edge_target(&self, edge: &Self::Edge) -> Self::Vertex;

    /// An equivalent view with identical vertices and every edge
    /// direction swapped. Self-loops and parallel edges are preserved.
    fn transpose(&self) -> Self::Transposed;

    /// Human-readable rendering of a vertex, used as trace payload.
    fn label(&self, vertex: &Self::Vertex) -> String;
}

/// Ordered adjacency-list graph. Vertices enumerate in key order,
/// outgoing edges in insertion order.
#[derive(Clone, Debug)]
pub struct AdjacencyGraph<V> {
    pub neighbors: BTreeMap<V, Vec<V>>,
}

impl<V> Default for AdjacencyGraph<V> {
    fn default() -> Self {
        Self {
            neighbors: BTreeMap::new(),
        }
    }
}

impl<V: Clone + Ord + Eq + Hash + fmt::Display> AdjacencyGraph<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, vertex: V) {
        self.neighbors.entry(vertex).or_insert_with(Vec::new);
    }

    pub fn add_edge(&mut self, from: V, to: V) {
        self.add_vertex(to.clone());
        self.neighbors.entry(from).or_insert_with(Vec::new).push(to);
    }

    pub fn add_edges(&mut self, from: V, to: impl IntoIterator<Item = V>) {
        for target in to {
            self.add_edge(from.clone(), target);
        }
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}

impl<V: Clone + Ord + Eq + Hash + fmt::Display> DirectedView for AdjacencyGraph<V> {
    type Vertex = V;
    type Edge = (V, V);
    type Transposed = AdjacencyGraph<V>;

    fn vertices(&self) -> Box<dyn Iterator<Item = V> + '_> {
        Box::new(self.neighbors.keys().cloned())
    }

    fn outgoing_edges(&self, vertex: &V) -> Box<dyn Iterator<Item = (V, V)> + '_> {
        match self.neighbors.get(vertex) {
            Some(targets) => {
                let source = vertex.clone();
                Box::new(targets.iter().map(move |target| (source.clone(), target.clone())))
            }
            None => Box::new(std::iter::empty()),
        }
    }

    fn edge_target(&self, edge: &(V, V)) -> V {
        edge.1.clone()
    }

    fn transpose(&self) -> AdjacencyGraph<V> {
        let mut reversed = AdjacencyGraph::new();
        for vertex in self.neighbors.keys() {
            reversed.add_vertex(vertex.clone());
        }
        for (source, targets) in &self.neighbors {
            for target in targets {
                reversed.add_edge(target.clone(), source.clone());
            }
        }
        reversed
    }

    fn label(&self, vertex: &V) -> String {
        vertex.to_string()
    }
}

/// petgraph interop: any `DiGraph` is usable as a view directly. The
/// transpose rebuilds the graph with every edge turned around; node
/// indices carry over unchanged.
impl<N, E> DirectedView for DiGraph<N, E>
where
    N: Clone + fmt::Display,
    E: Clone,
{
    type Vertex = NodeIndex;
    type Edge = EdgeIndex;
    type Transposed = DiGraph<N, E>;

    fn vertices(&self) -> Box<dyn Iterator<Item = NodeIndex> + '_> {
        Box::new(self.node_indices())
    }

    fn outgoing_edges(&self, vertex: &NodeIndex) -> Box<dyn Iterator<Item = EdgeIndex> + '_> {
        Box::new(self.edges(*vertex).map(|edge| edge.id()))
    }

    fn edge_target(&self, edge: &EdgeIndex) -> NodeIndex {
        // A foreign edge id resolves to the sentinel index, which the
        // traversal then rejects as an unknown vertex.
        self.edge_endpoints(*edge)
            .map_or_else(NodeIndex::end, |(_, target)| target)
    }

    fn transpose(&self) -> DiGraph<N, E> {
        let mut reversed = DiGraph::with_capacity(self.node_count(), self.edge_count());
        for node in self.node_indices() {
            reversed.add_node(self[node].clone());
        }
        for edge in self.edge_indices() {
            if let (Some((source, target)), Some(weight)) =
                (self.edge_endpoints(edge), self.edge_weight(edge))
            {
                reversed.add_edge(target, source, weight.clone());
            }
        }
        reversed
    }

    fn label(&self, vertex: &NodeIndex) -> String {
        self.node_weight(*vertex)
            .map_or_else(|| format!("#{}", vertex.index()), ToString::to_string)
    }
}
