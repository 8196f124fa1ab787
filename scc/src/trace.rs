use std::fmt;

use serde::{Deserialize, Serialize};

/// Phase of a `dfs` root event (first pass).
pub const PHASE_ROOT: u8 = 0;
/// Phase of first-pass `visit` and `push2Stack` events.
pub const PHASE_FORWARD: u8 = 1;
/// Phase of second-pass visits and the bookkeeping events.
pub const PHASE_TRANSPOSE: u8 = 2;

/// Step tags of the renderer protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepKind {
    /// A first-pass traversal starts at a fresh root.
    #[serde(rename = "dfs")]
    Dfs,
    /// A vertex is discovered.
    #[serde(rename = "visit")]
    Visit,
    /// A vertex finished and was prepended to the finish order.
    #[serde(rename = "push2Stack")]
    PushToOrder,
    /// The complete finish order, rendered as one stack-like string.
    #[serde(rename = "kosarajuAlgStack")]
    OrderStack,
    /// The traversal switches to (and later leaves) the reversed view.
    #[serde(rename = "inverseGraph")]
    InverseGraph,
}

impl StepKind {
    pub fn tag(self) -> &'static str {
        match self {
            StepKind::Dfs => "dfs",
            StepKind::Visit => "visit",
            StepKind::PushToOrder => "push2Stack",
            StepKind::OrderStack => "kosarajuAlgStack",
            StepKind::InverseGraph => "inverseGraph",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One recorded algorithm step. `group` numbers the traversal tree the
/// step belongs to within its pass; it is diagnostic only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub phase: u8,
    pub group: u32,
    pub kind: StepKind,
    pub payload: String,
}

/// Append-only ordered log of trace events. Single writer, read after
/// the computation completes.
#[derive(Debug, Default)]
pub struct TraceRecorder {
    events: Vec<TraceEvent>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, phase: u8, group: u32, kind: StepKind, payload: impl Into<String>) {
        self.events.push(TraceEvent {
            phase,
            group,
            kind,
            payload: payload.into(),
        });
    }

    pub fn snapshot(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn into_events(self) -> Vec<TraceEvent> {
        self.events
    }
}
