use std::collections::{BTreeSet, HashMap, VecDeque};

use itertools::Itertools;
use log::debug;
use petgraph::graph::DiGraph;

use crate::dfs::{dfs_visit, DfsTarget, VertexState};
use crate::graph::DirectedView;
use crate::trace::{StepKind, TraceEvent, TraceRecorder, PHASE_TRANSPOSE};
use crate::SccResult;

/// Kosaraju strong-connectivity inspector over a borrowed graph view.
///
/// The two passes run exactly once, lazily, on the first query; the
/// partition is memoized and later queries return it without touching
/// the trace. Per-vertex state and the finish order live only for the
/// duration of the computation.
///
/// Not safe for concurrent use of one instance; run one inspector per
/// thread instead.
pub struct Kosaraju<'g, G: DirectedView> {
    graph: &'g G,
    components: Option<Vec<BTreeSet<G::Vertex>>>,
    recorder: TraceRecorder,
}

impl<'g, G: DirectedView> Kosaraju<'g, G> {
    /// The graph is taken up front; a `&G` cannot be absent, so there is
    /// no deferred construction failure.
    pub fn new(graph: &'g G) -> Self {
        Kosaraju {
            graph,
            components: None,
            recorder: TraceRecorder::new(),
        }
    }

    /// The partition into strongly connected sets, in second-pass
    /// discovery order (decreasing first-pass finish time).
    pub fn strongly_connected_sets(&mut self) -> SccResult<&[BTreeSet<G::Vertex>]> {
        if self.components.is_none() {
            let partition = self.compute()?;
            self.components = Some(partition);
        }
        Ok(self.components.as_deref().unwrap_or_default())
    }

    /// `true` iff the partition has exactly one set. A graph with no
    /// vertices has an empty partition and is not strongly connected.
    pub fn is_strongly_connected(&mut self) -> SccResult<bool> {
        Ok(self.strongly_connected_sets()?.len() == 1)
    }

    /// Snapshot of the step trace recorded so far.
    pub fn trace(&self) -> &[TraceEvent] {
        self.recorder.snapshot()
    }

    /// Consume the inspector, keeping only the trace.
    pub fn into_trace(self) -> Vec<TraceEvent> {
        self.recorder.into_events()
    }

    /// Component DAG: one node per strongly connected set, weighted with
    /// the set's index in the partition, and one edge per ordered pair
    /// of distinct sets joined by at least one original edge.
    pub fn condensation(&mut self) -> SccResult<DiGraph<usize, ()>> {
        self.strongly_connected_sets()?;
        let partition = self.components.as_deref().unwrap_or_default();

        let mut membership: HashMap<G::Vertex, usize> = HashMap::new();
        for (index, component) in partition.iter().enumerate() {
            for vertex in component {
                membership.insert(vertex.clone(), index);
            }
        }

        let mut dag = DiGraph::new();
        let nodes: Vec<_> = (0..partition.len()).map(|index| dag.add_node(index)).collect();

        let mut cross = Vec::new();
        for vertex in self.graph.vertices() {
            for edge in self.graph.outgoing_edges(&vertex) {
                let target = self.graph.edge_target(&edge);
                if let (Some(&from), Some(&to)) = (membership.get(&vertex), membership.get(&target))
                {
                    if from != to {
                        cross.push((from, to));
                    }
                }
            }
        }
        for (from, to) in cross.into_iter().unique() {
            dag.add_edge(nodes[from], nodes[to], ());
        }

        Ok(dag)
    }

    fn compute(&mut self) -> SccResult<Vec<BTreeSet<G::Vertex>>> {
        let graph = self.graph;

        let mut states: HashMap<G::Vertex, VertexState> = graph
            .vertices()
            .map(|vertex| (vertex, VertexState::Unvisited))
            .collect();
        let mut order: VecDeque<G::Vertex> = VecDeque::with_capacity(states.len());

        // First pass over the original view: one traversal per fresh
        // root, ordering all vertices by decreasing finish time.
        let mut group = 0;
        for root in graph.vertices() {
            if !matches!(states.get(&root), Some(VertexState::Unvisited)) {
                continue;
            }
            dfs_visit(
                graph,
                root,
                &mut states,
                &mut self.recorder,
                group,
                &mut DfsTarget::Order(&mut order),
            )?;
            group += 1;
        }

        let transposed = graph.transpose();

        for state in states.values_mut() {
            *state = VertexState::Unvisited;
        }

        // Finish order rendered bottom-of-stack first, one trailing
        // space, matching the renderer's expected input.
        let mut rendered = String::new();
        for vertex in order.iter().rev() {
            rendered.push_str(&graph.label(vertex));
            rendered.push(' ');
        }
        self.recorder
            .record(PHASE_TRANSPOSE, 0, StepKind::OrderStack, rendered);
        self.recorder
            .record(PHASE_TRANSPOSE, 0, StepKind::InverseGraph, "");

        // Second pass over the transpose, roots taken in decreasing
        // finish time; every traversal tree is one strongly connected
        // set.
        let mut partition = Vec::new();
        group = 0;
        for root in order {
            if !matches!(states.get(&root), Some(VertexState::Unvisited)) {
                continue;
            }
            let mut component = BTreeSet::new();
            dfs_visit(
                &transposed,
                root,
                &mut states,
                &mut self.recorder,
                group,
                &mut DfsTarget::Component(&mut component),
            )?;
            partition.push(component);
            group += 1;
        }

        self.recorder
            .record(PHASE_TRANSPOSE, 0, StepKind::InverseGraph, "");
        debug!("partitioned into {} strongly connected sets", partition.len());

        Ok(partition)
    }
}
