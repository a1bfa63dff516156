use std::fmt::Debug;
use std::hash::Hash;
use num_traits::{Float, Zero};

/// Identity of a vertex: comparable, hashable and cheap enough to clone.
///
/// `Ord` keeps adjacency iteration (and therefore tie-breaking) deterministic.
pub trait VertexId: Clone + Eq + Ord + Hash + Debug + Send + Sync {}

impl<T> VertexId for T where T: Clone + Eq + Ord + Hash + Debug + Send + Sync {}

/// Floating point edge weight.
pub trait Weight: Float + Zero + Debug + Copy + Send + Sync + 'static {}

impl<T> Weight for T where T: Float + Zero + Debug + Copy + Send + Sync + 'static {}

/// Trait representing a weighted directed graph as seen by the path algorithms
pub trait Graph<Id, W>: Debug
where
    Id: VertexId,
    W: Weight,
{
    /// Returns the number of vertices in the graph
    fn vertex_count(&self) -> usize;

    /// Returns the number of edges in the graph
    fn edge_count(&self) -> usize;

    /// Returns an iterator over every vertex id
    fn vertices(&self) -> Box<dyn Iterator<Item = &Id> + '_>;

    /// Returns an iterator over the enabled outgoing edges from a vertex
    fn outgoing_edges(&self, vertex: &Id) -> Box<dyn Iterator<Item = (&Id, W)> + '_>;

    /// Returns an iterator over the enabled incoming edges to a vertex
    fn incoming_edges(&self, vertex: &Id) -> Box<dyn Iterator<Item = (&Id, W)> + '_>;

    /// Returns true if the vertex exists in the graph
    fn has_vertex(&self, vertex: &Id) -> bool;

    /// Returns true if there's an edge between the two vertices, enabled or not
    fn has_edge(&self, from: &Id, to: &Id) -> bool;

    /// Gets the weight of an edge if it exists, regardless of its enabled flag
    fn get_edge_weight(&self, from: &Id, to: &Id) -> Option<W>;

    /// Total weight along `path`.
    ///
    /// `-inf` for an empty path or one naming an unknown vertex, `+inf` when
    /// two consecutive vertices are not connected, 0 for a single vertex.
    fn path_weight(&self, path: &[Id]) -> W {
        let Some(first) = path.first() else {
            return W::neg_infinity();
        };
        if !self.has_vertex(first) {
            return W::neg_infinity();
        }

        let mut total = W::zero();
        for pair in path.windows(2) {
            if !self.has_vertex(&pair[1]) {
                return W::neg_infinity();
            }
            match self.get_edge_weight(&pair[0], &pair[1]) {
                Some(weight) => total = total + weight,
                None => return W::infinity(),
            }
        }
        total
    }
}

/// Capability interface for values that know their own id and adjacency,
/// used by [`DirectedGraph::add_vertex_with_edges`](super::DirectedGraph::add_vertex_with_edges).
pub trait VertexSource<Id, W> {
    /// The unique id of the vertex
    fn id(&self) -> Id;

    /// Every edge touching the vertex, as `(from, to, weight)`
    fn edges(&self) -> Vec<(Id, Id, W)>;
}
