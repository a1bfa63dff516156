use crate::graph::traits::{Graph, VertexId, Weight};
use std::collections::HashSet;
use std::fmt::Debug;

/// A set of edges and vertices to leave out of a path search.
///
/// Suppressing a vertex removes all of its outgoing edges from the view, the
/// same effect as [`DirectedGraph::disable_vertex`](super::DirectedGraph::disable_vertex),
/// but without touching the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeMask<Id>
where
    Id: VertexId,
{
    edges: HashSet<(Id, Id)>,
    vertices: HashSet<Id>,
}

impl<Id> Default for EdgeMask<Id>
where
    Id: VertexId,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Id> EdgeMask<Id>
where
    Id: VertexId,
{
    /// Creates an empty mask
    pub fn new() -> Self {
        EdgeMask {
            edges: HashSet::new(),
            vertices: HashSet::new(),
        }
    }

    /// Suppresses the edge `from -> to`
    pub fn suppress_edge(&mut self, from: Id, to: Id) {
        self.edges.insert((from, to));
    }

    /// Suppresses every outgoing edge of `vertex`
    pub fn suppress_vertex(&mut self, vertex: Id) {
        self.vertices.insert(vertex);
    }

    /// Suppresses every edge along `path`
    pub fn suppress_path_edges(&mut self, path: &[Id]) {
        for pair in path.windows(2) {
            self.suppress_edge(pair[0].clone(), pair[1].clone());
        }
    }

    /// Returns true if the edge is hidden by this mask
    pub fn is_suppressed(&self, from: &Id, to: &Id) -> bool {
        self.vertices.contains(from) || self.edges.contains(&(from.clone(), to.clone()))
    }

    /// Returns true if the vertex's outgoing edges are hidden
    pub fn is_vertex_suppressed(&self, vertex: &Id) -> bool {
        self.vertices.contains(vertex)
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty() && self.vertices.is_empty()
    }

    pub fn clear(&mut self) {
        self.edges.clear();
        self.vertices.clear();
    }
}

/// A read-only view of a graph with an [`EdgeMask`] applied on top
#[derive(Debug)]
pub struct MaskedGraph<'a, G, Id>
where
    Id: VertexId,
{
    inner: &'a G,
    mask: &'a EdgeMask<Id>,
}

impl<'a, G, Id> MaskedGraph<'a, G, Id>
where
    Id: VertexId,
{
    pub fn new(inner: &'a G, mask: &'a EdgeMask<Id>) -> Self {
        MaskedGraph { inner, mask }
    }
}

impl<'a, G, Id, W> Graph<Id, W> for MaskedGraph<'a, G, Id>
where
    G: Graph<Id, W>,
    Id: VertexId,
    W: Weight,
{
    fn vertex_count(&self) -> usize {
        self.inner.vertex_count()
    }

    fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    fn vertices(&self) -> Box<dyn Iterator<Item = &Id> + '_> {
        self.inner.vertices()
    }

    fn outgoing_edges(&self, vertex: &Id) -> Box<dyn Iterator<Item = (&Id, W)> + '_> {
        if self.mask.is_vertex_suppressed(vertex) {
            return Box::new(std::iter::empty());
        }
        let from = vertex.clone();
        Box::new(
            self.inner
                .outgoing_edges(vertex)
                .filter(move |(to, _)| !self.mask.is_suppressed(&from, to)),
        )
    }

    fn incoming_edges(&self, vertex: &Id) -> Box<dyn Iterator<Item = (&Id, W)> + '_> {
        let to = vertex.clone();
        Box::new(
            self.inner
                .incoming_edges(vertex)
                .filter(move |(from, _)| !self.mask.is_suppressed(from, &to)),
        )
    }

    fn has_vertex(&self, vertex: &Id) -> bool {
        self.inner.has_vertex(vertex)
    }

    fn has_edge(&self, from: &Id, to: &Id) -> bool {
        self.inner.has_edge(from, to)
    }

    fn get_edge_weight(&self, from: &Id, to: &Id) -> Option<W> {
        self.inner.get_edge_weight(from, to)
    }
}
