use std::collections::{BTreeSet, HashMap, VecDeque};

use log::debug;

use crate::graph::DirectedView;
use crate::trace::{StepKind, TraceRecorder, PHASE_FORWARD, PHASE_ROOT, PHASE_TRANSPOSE};
use crate::{SccError, SccResult};

/// Per-vertex traversal lifecycle. Transitions are monotonic within one
/// pass: `Unvisited -> Discovered -> Finished`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum VertexState {
    Unvisited,
    Discovered,
    Finished,
}

/// Explicit-stack frame. `Discover` stands in for a recursive call's
/// entry, `Finish` for its return point.
enum Frame<V> {
    Discover(V),
    Finish(V),
}

/// What a traversal produces: the pass-1 finish order, or the pass-2
/// component set being filled.
pub(crate) enum DfsTarget<'a, V> {
    Order(&'a mut VecDeque<V>),
    Component(&'a mut BTreeSet<V>),
}

/// One depth-first traversal from `root` over `view`, without native
/// recursion. A `Finish` marker is pushed under the successors of every
/// newly discovered vertex, so it pops only after the whole reachable
/// undiscovered subtree has been processed.
pub(crate) fn dfs_visit<G: DirectedView>(
    view: &G,
    root: G::Vertex,
    states: &mut HashMap<G::Vertex, VertexState>,
    recorder: &mut TraceRecorder,
    group: u32,
    target: &mut DfsTarget<'_, G::Vertex>,
) -> SccResult<()> {
    if matches!(target, DfsTarget::Order(_)) {
        debug!("dfs root {}", view.label(&root));
        recorder.record(PHASE_ROOT, group, StepKind::Dfs, view.label(&root));
    }

    let mut stack = vec![Frame::Discover(root)];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Discover(vertex) => {
                match states.get(&vertex) {
                    Some(VertexState::Unvisited) => {}
                    // pushed again through another in-edge; absorb
                    Some(_) => continue,
                    None => return Err(unknown(view, &vertex)),
                }
                states.insert(vertex.clone(), VertexState::Discovered);

                match target {
                    DfsTarget::Order(_) => {
                        debug!("visit {}", view.label(&vertex));
                        recorder.record(PHASE_FORWARD, group, StepKind::Visit, view.label(&vertex));
                    }
                    DfsTarget::Component(component) => {
                        debug!("visit {} (transpose)", view.label(&vertex));
                        recorder.record(PHASE_TRANSPOSE, group, StepKind::Visit, view.label(&vertex));
                        component.insert(vertex.clone());
                    }
                }

                stack.push(Frame::Finish(vertex.clone()));

                for edge in view.outgoing_edges(&vertex) {
                    let successor = view.edge_target(&edge);
                    match states.get(&successor) {
                        Some(VertexState::Unvisited) => stack.push(Frame::Discover(successor)),
                        Some(_) => {}
                        None => return Err(unknown(view, &successor)),
                    }
                }
            }
            Frame::Finish(vertex) => {
                states.insert(vertex.clone(), VertexState::Finished);
                if let DfsTarget::Order(order) = target {
                    debug!("finish {}", view.label(&vertex));
                    recorder.record(PHASE_FORWARD, group, StepKind::PushToOrder, view.label(&vertex));
                    order.push_front(vertex);
                }
            }
        }
    }

    Ok(())
}

fn unknown<G: DirectedView>(view: &G, vertex: &G::Vertex) -> SccError {
    SccError::UnknownVertex {
        label: view.label(vertex),
    }
}
