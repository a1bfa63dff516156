use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::graph::directed::DirectedGraph;
use crate::graph::Graph;

/// Graph type held by a session: string ids, `f64` weights, JSON payloads
pub type WebDigraph = DirectedGraph<String, f64, Value, Value>;

/// A vertex to insert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VertexRequest {
    pub id: String,
    #[serde(default)]
    pub payload: Value,
}

/// An edge to insert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRequest {
    pub from: String,
    pub to: String,
    pub weight: f64,
    #[serde(default)]
    pub payload: Value,
}

/// Initial contents of a new graph session
#[derive(Debug, Default, Deserialize)]
pub struct GraphRequest {
    #[serde(default)]
    pub vertices: Vec<VertexRequest>,
    #[serde(default)]
    pub edges: Vec<EdgeRequest>,
}

/// New weight for an existing edge
#[derive(Debug, Deserialize)]
pub struct WeightUpdateRequest {
    pub from: String,
    pub to: String,
    pub weight: f64,
}

/// Parameters for a single-source query
#[derive(Debug, Deserialize)]
pub struct ShortestPathRequest {
    pub source: String,
}

/// Parameters for a k-paths query
#[derive(Debug, Deserialize)]
pub struct KPathsRequest {
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    pub source: String,
    pub destination: String,
    #[serde(default = "default_k")]
    pub k: usize,
    #[serde(default)]
    pub parallel: bool,
}

fn default_algorithm() -> String { "yen".to_string() }
fn default_k() -> usize { 3 }

/// A vertex in a graph snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebVertex {
    pub id: String,
    pub payload: Value,
}

/// An edge in a graph snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebEdge {
    pub from: String,
    pub to: String,
    pub weight: f64,
    pub enabled: bool,
}

/// Snapshot of a session graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebGraph {
    pub vertices: Vec<WebVertex>,
    pub edges: Vec<WebEdge>,
}

impl From<&WebDigraph> for WebGraph {
    fn from(graph: &WebDigraph) -> Self {
        let vertices = graph
            .vertex_payloads()
            .map(|(id, payload)| WebVertex {
                id: id.clone(),
                payload: payload.clone(),
            })
            .collect();
        let edges = graph
            .edges()
            .map(|(from, to, weight, enabled)| WebEdge {
                from: from.clone(),
                to: to.clone(),
                weight,
                enabled,
            })
            .collect();
        WebGraph { vertices, edges }
    }
}

/// Result of a single-source query. Unreachable vertices map to `null`.
#[derive(Debug, Clone, Serialize)]
pub struct ShortestPathResponse {
    pub execution_id: Uuid,
    pub source: String,
    pub execution_time_ms: f64,
    pub reachable: usize,
    pub distances: BTreeMap<String, Option<f64>>,
    pub predecessors: BTreeMap<String, String>,
}

/// One rank of a k-paths answer
#[derive(Debug, Clone, Serialize)]
pub struct RankedPath {
    pub rank: usize,
    pub distance: Option<f64>,
    pub path: Option<Vec<String>>,
}

/// Result of a k-paths query
#[derive(Debug, Clone, Serialize)]
pub struct KPathsResponse {
    pub execution_id: Uuid,
    pub algorithm: String,
    pub source: String,
    pub destination: String,
    pub k: usize,
    pub parallel: bool,
    pub execution_time_ms: f64,
    pub found: usize,
    pub paths: Vec<RankedPath>,
}

/// Error response for API
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Session summary returned to clients
#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    pub id: Uuid,
    pub vertex_count: usize,
    pub edge_count: usize,
    pub queries: usize,
    pub created_at: DateTime<Utc>,
}

/// Session containing a graph and its query counter
#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub graph: WebDigraph,
    pub queries: usize,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(graph: WebDigraph) -> Self {
        Self {
            id: Uuid::new_v4(),
            graph,
            queries: 0,
            created_at: Utc::now(),
        }
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            id: self.id,
            vertex_count: self.graph.vertex_count(),
            edge_count: self.graph.edge_count(),
            queries: self.queries,
            created_at: self.created_at,
        }
    }
}
