use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use uuid::Uuid;

use crate::algorithm::dijkstra::Dijkstra;
use crate::algorithm::kisp::Kisp;
use crate::algorithm::yen::Yen;
use crate::algorithm::{KShortestPathAlgorithm, ShortestPathAlgorithm};
use crate::web::models::*;
use crate::{describe, Error};

/// Shared application state
#[derive(Clone, Default)]
pub struct AppState {
    pub sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the session map. A handler that panicked mid-request leaves the
    /// map itself consistent, so a poisoned lock is taken over as is.
    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Session>> {
        self.sessions.lock().unwrap_or_else(|poisoned| {
            log::warn!("Session store lock was poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }
}

/// Largest `k` accepted by the k-paths route
pub const MAX_K: usize = 1000;

/// Status code and body of a failed request
pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: &str, message: String) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            message,
        }),
    )
}

fn session_not_found(session_id: Uuid) -> ApiError {
    api_error(
        StatusCode::NOT_FOUND,
        "session_not_found",
        format!("Session {} not found", session_id),
    )
}

/// Maps a library error onto an HTTP status
pub fn engine_error(err: Error) -> ApiError {
    let (status, error) = match &err {
        Error::UnknownVertex(_) => (StatusCode::NOT_FOUND, "vertex_not_found"),
        Error::EdgeNotFound(..) => (StatusCode::NOT_FOUND, "edge_not_found"),
        Error::DuplicateVertex(_) | Error::DuplicateEdge(..) => {
            (StatusCode::CONFLICT, "duplicate_entity")
        }
        Error::NegativeWeight { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "negative_weight"),
        Error::IntegrityViolation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "integrity_violation"),
        Error::ReservedWeight | Error::UnrelatedEdge { .. } => {
            (StatusCode::BAD_REQUEST, "invalid_edge")
        }
        Error::KeyNotQueued(_) | Error::PriorityIncrease(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
        }
    };
    api_error(status, error, err.to_string())
}

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/graphs", post(create_graph))
        .route("/api/graphs/:session_id", get(get_graph))
        .route("/api/graphs/:session_id/vertices", post(add_vertex))
        .route(
            "/api/graphs/:session_id/vertices/:vertex_id",
            delete(delete_vertex),
        )
        .route(
            "/api/graphs/:session_id/edges",
            post(add_edge).put(update_edge),
        )
        .route(
            "/api/graphs/:session_id/edges/:from/:to",
            delete(delete_edge),
        )
        .route(
            "/api/graphs/:session_id/edges/:from/:to/disable",
            post(disable_edge),
        )
        .route("/api/graphs/:session_id/reset", post(reset_graph))
        .route("/api/graphs/:session_id/shortest-paths", post(shortest_paths))
        .route("/api/graphs/:session_id/k-paths", post(k_paths))
        .route("/api/sessions", get(list_sessions))
        .route("/api/health", get(health_check))
}

/// Build a graph from the request and open a session for it
pub async fn create_graph(
    State(state): State<AppState>,
    Json(request): Json<GraphRequest>,
) -> Result<(StatusCode, Json<SessionInfo>), ApiError> {
    let mut graph = WebDigraph::new();
    for vertex in request.vertices {
        graph.add_vertex(vertex.id, vertex.payload).map_err(engine_error)?;
    }
    for edge in request.edges {
        graph
            .add_edge(edge.from, edge.to, edge.weight, edge.payload)
            .map_err(engine_error)?;
    }

    let session = Session::new(graph);
    let info = session.info();
    log::info!(
        "Created session {} with {} vertices and {} edges",
        info.id,
        info.vertex_count,
        info.edge_count
    );
    state.lock().insert(session.id, session);

    Ok((StatusCode::CREATED, Json(info)))
}

/// Snapshot of a session graph
pub async fn get_graph(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<WebGraph>, ApiError> {
    let sessions = state.lock();
    let session = sessions
        .get(&session_id)
        .ok_or_else(|| session_not_found(session_id))?;
    Ok(Json(WebGraph::from(&session.graph)))
}

/// Add a vertex to a session graph
pub async fn add_vertex(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<VertexRequest>,
) -> Result<Json<SessionInfo>, ApiError> {
    let mut sessions = state.lock();
    let session = sessions
        .get_mut(&session_id)
        .ok_or_else(|| session_not_found(session_id))?;
    session
        .graph
        .add_vertex(request.id, request.payload)
        .map_err(engine_error)?;
    Ok(Json(session.info()))
}

/// Add an edge to a session graph
pub async fn add_edge(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<EdgeRequest>,
) -> Result<Json<SessionInfo>, ApiError> {
    let mut sessions = state.lock();
    let session = sessions
        .get_mut(&session_id)
        .ok_or_else(|| session_not_found(session_id))?;
    session
        .graph
        .add_edge(request.from, request.to, request.weight, request.payload)
        .map_err(engine_error)?;
    Ok(Json(session.info()))
}

/// Change the weight of an existing edge
pub async fn update_edge(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<WeightUpdateRequest>,
) -> Result<Json<SessionInfo>, ApiError> {
    let mut sessions = state.lock();
    let session = sessions
        .get_mut(&session_id)
        .ok_or_else(|| session_not_found(session_id))?;
    session
        .graph
        .update_edge_weight(&request.from, &request.to, request.weight)
        .map_err(engine_error)?;
    Ok(Json(session.info()))
}

/// Remove a vertex and every edge touching it
pub async fn delete_vertex(
    State(state): State<AppState>,
    Path((session_id, vertex_id)): Path<(Uuid, String)>,
) -> Result<Json<SessionInfo>, ApiError> {
    let mut sessions = state.lock();
    let session = sessions
        .get_mut(&session_id)
        .ok_or_else(|| session_not_found(session_id))?;
    session
        .graph
        .delete_vertex(&vertex_id)
        .ok_or_else(|| engine_error(Error::UnknownVertex(describe(&vertex_id))))?;
    Ok(Json(session.info()))
}

/// Remove a single edge
pub async fn delete_edge(
    State(state): State<AppState>,
    Path((session_id, from, to)): Path<(Uuid, String, String)>,
) -> Result<Json<SessionInfo>, ApiError> {
    let mut sessions = state.lock();
    let session = sessions
        .get_mut(&session_id)
        .ok_or_else(|| session_not_found(session_id))?;
    session
        .graph
        .delete_edge(&from, &to)
        .ok_or_else(|| engine_error(Error::EdgeNotFound(describe(&from), describe(&to))))?;
    Ok(Json(session.info()))
}

/// Exclude an edge from later queries until the graph is reset
pub async fn disable_edge(
    State(state): State<AppState>,
    Path((session_id, from, to)): Path<(Uuid, String, String)>,
) -> Result<Json<WebGraph>, ApiError> {
    let mut sessions = state.lock();
    let session = sessions
        .get_mut(&session_id)
        .ok_or_else(|| session_not_found(session_id))?;
    if !session.graph.disable_edge(&from, &to) {
        return Err(engine_error(Error::EdgeNotFound(describe(&from), describe(&to))));
    }
    Ok(Json(WebGraph::from(&session.graph)))
}

/// Enable every edge of a session graph again
pub async fn reset_graph(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<WebGraph>, ApiError> {
    let mut sessions = state.lock();
    let session = sessions
        .get_mut(&session_id)
        .ok_or_else(|| session_not_found(session_id))?;
    session.graph.reset();
    Ok(Json(WebGraph::from(&session.graph)))
}

/// Single-source shortest paths from `source`
pub async fn shortest_paths(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ShortestPathRequest>,
) -> Result<Json<ShortestPathResponse>, ApiError> {
    let mut sessions = state.lock();
    let session = sessions
        .get_mut(&session_id)
        .ok_or_else(|| session_not_found(session_id))?;

    let start_time = Instant::now();
    let result = Dijkstra::new()
        .compute_shortest_paths(&session.graph, &request.source)
        .map_err(engine_error)?;
    let execution_time = start_time.elapsed();
    session.queries += 1;

    let distances = result
        .distances
        .iter()
        .map(|(id, d)| (id.clone(), d.is_finite().then_some(*d)))
        .collect();
    let predecessors = result
        .predecessors
        .iter()
        .map(|(id, p)| (id.clone(), p.clone()))
        .collect();

    Ok(Json(ShortestPathResponse {
        execution_id: Uuid::new_v4(),
        source: request.source,
        execution_time_ms: execution_time.as_secs_f64() * 1000.0,
        reachable: result.reachable_count(),
        distances,
        predecessors,
    }))
}

/// Top-K paths between two vertices with Yen or Kisp
pub async fn k_paths(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<KPathsRequest>,
) -> Result<Json<KPathsResponse>, ApiError> {
    if request.k > MAX_K {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "invalid_k",
            format!("k must be at most {}, got {}", MAX_K, request.k),
        ));
    }

    let mut sessions = state.lock();
    let session = sessions
        .get_mut(&session_id)
        .ok_or_else(|| session_not_found(session_id))?;

    let engine: Box<dyn KShortestPathAlgorithm<String, f64, WebDigraph>> =
        match request.algorithm.as_str() {
            "yen" => Box::new(Yen::new().with_parallel(request.parallel)),
            "kisp" => Box::new(Kisp::new()),
            _ => {
                return Err(api_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_algorithm",
                    format!("Unknown algorithm: {}", request.algorithm),
                ));
            }
        };

    let start_time = Instant::now();
    let ranked = engine
        .k_shortest_paths(&session.graph, &request.source, &request.destination, request.k)
        .map_err(engine_error)?;
    let execution_time = start_time.elapsed();
    session.queries += 1;
    log::debug!(
        "{} found {} of {} paths in {:?}",
        engine.name(),
        ranked.found(),
        request.k,
        execution_time
    );

    let found = ranked.found();
    let paths = ranked
        .distances
        .into_iter()
        .zip(ranked.paths)
        .enumerate()
        .map(|(i, (distance, path))| RankedPath {
            rank: i + 1,
            distance: distance.is_finite().then_some(distance),
            path,
        })
        .collect();

    Ok(Json(KPathsResponse {
        execution_id: Uuid::new_v4(),
        algorithm: request.algorithm,
        source: request.source,
        destination: request.destination,
        k: request.k,
        parallel: request.parallel,
        execution_time_ms: execution_time.as_secs_f64() * 1000.0,
        found,
        paths,
    }))
}

/// List all active sessions
pub async fn list_sessions(State(state): State<AppState>) -> Json<Vec<SessionInfo>> {
    let sessions = state.lock();
    let mut infos: Vec<SessionInfo> = sessions.values().map(Session::info).collect();
    infos.sort_by_key(|info| info.created_at);
    Json(infos)
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
