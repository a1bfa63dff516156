//! kpaths - shortest and k-shortest directed paths
//!
//! This library computes single-source shortest paths (Dijkstra on a
//! decrease-key priority queue), the top-K shortest loopless paths between
//! two vertices (Yen's algorithm) and the top-K edge-independent shortest
//! paths (iterative suppression of previously found paths).
//!
//! Graphs are built incrementally through [`DirectedGraph`]. Path queries
//! never mutate the graph: the K-paths engines express their temporary
//! edge and vertex removals as an [`EdgeMask`] overlay.

pub mod algorithm;
pub mod data_structures;
pub mod graph;
pub mod web;

pub use algorithm::{
    dijkstra::Dijkstra, kisp::Kisp, yen::Yen, KShortestPathAlgorithm, KShortestPaths,
    ShortestPathAlgorithm, ShortestPathResult,
};
/// Re-export main types for convenient use
pub use graph::directed::DirectedGraph;
pub use graph::mask::{EdgeMask, MaskedGraph};

use std::fmt::Debug;

/// Error types for the library
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Vertex {0} is not found")]
    UnknownVertex(String),

    #[error("Negative weight {weight} from vertex {from} to vertex {to} is not allowed")]
    NegativeWeight { from: String, to: String, weight: f64 },

    #[error("Vertex {0} is duplicate")]
    DuplicateVertex(String),

    #[error("Edge from {0} to {1} is duplicate")]
    DuplicateEdge(String, String),

    #[error("Edge from {0} to {1} is not found")]
    EdgeNotFound(String, String),

    #[error("-inf weight is reserved for internal usage")]
    ReservedWeight,

    #[error("Edge from {from} to {to} is unrelated to the vertex {vertex}")]
    UnrelatedEdge {
        vertex: String,
        from: String,
        to: String,
    },

    #[error("Graph integrity violated: {0}")]
    IntegrityViolation(String),

    #[error("Key {0} is not in the priority queue")]
    KeyNotQueued(String),

    #[error("Decrease-key cannot raise the priority of key {0}")]
    PriorityIncrease(String),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Renders a vertex id for error messages.
pub(crate) fn describe<T: Debug + ?Sized>(value: &T) -> String {
    format!("{:?}", value)
}
