//! Strongly connected components of a directed graph via two-pass
//! Kosaraju, recording a deterministic step trace that can drive an
//! external visualization renderer.

pub mod graph;
pub mod kosaraju;
pub mod trace;

mod dfs;

use thiserror::Error;

pub use graph::{AdjacencyGraph, DirectedView};
pub use kosaraju::Kosaraju;
pub use trace::{StepKind, TraceEvent, TraceRecorder};

/// Crate result type.
pub type SccResult<T> = Result<T, SccError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SccError {
    /// The view reported an edge whose target is missing from its own
    /// vertex enumeration.
    #[error("edge target {label} is not part of the graph")]
    UnknownVertex { label: String },
}
