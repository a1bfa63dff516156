use crate::graph::traits::{Graph, VertexId, VertexSource, Weight};
use crate::{describe, Error, Result};
use std::collections::{BTreeMap, BTreeSet};

/// An edge as stored in the egress adjacency
#[derive(Debug, Clone)]
struct EdgeEntry<W, E> {
    weight: W,
    enabled: bool,
    payload: E,
}

/// A directed graph implementation using ordered adjacency maps
///
/// Vertices carry a caller payload `V`, edges a payload `E`. Each edge is
/// stored once in the egress map; the ingress map mirrors its key so both
/// directions can be walked, and every mutation updates the two together.
#[derive(Debug, Clone)]
pub struct DirectedGraph<Id, W = f64, V = (), E = ()>
where
    Id: VertexId,
    W: Weight,
{
    /// Vertex payloads by id
    vertices: BTreeMap<Id, V>,

    /// Outgoing edges for each vertex: from -> {to -> edge}
    egress: BTreeMap<Id, BTreeMap<Id, EdgeEntry<W, E>>>,

    /// Incoming edges for each vertex: to -> {from}
    ingress: BTreeMap<Id, BTreeSet<Id>>,
}

impl<Id, W, V, E> Default for DirectedGraph<Id, W, V, E>
where
    Id: VertexId,
    W: Weight,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Id, W, V, E> DirectedGraph<Id, W, V, E>
where
    Id: VertexId,
    W: Weight,
{
    /// Creates a new empty directed graph
    pub fn new() -> Self {
        DirectedGraph {
            vertices: BTreeMap::new(),
            egress: BTreeMap::new(),
            ingress: BTreeMap::new(),
        }
    }

    /// Adds a vertex with its payload. Fails if the id is already present.
    pub fn add_vertex(&mut self, id: Id, payload: V) -> Result<()> {
        if self.vertices.contains_key(&id) {
            return Err(Error::DuplicateVertex(describe(&id)));
        }

        self.egress.entry(id.clone()).or_default();
        self.ingress.entry(id.clone()).or_default();
        self.vertices.insert(id, payload);
        Ok(())
    }

    /// Adds a directed edge between two known vertices.
    pub fn add_edge(&mut self, from: Id, to: Id, weight: W, payload: E) -> Result<()> {
        if weight == W::neg_infinity() {
            return Err(Error::ReservedWeight);
        }
        self.require_vertex(&from)?;
        self.require_vertex(&to)?;
        if self.find_edge(&from, &to).is_some() {
            return Err(Error::DuplicateEdge(describe(&from), describe(&to)));
        }

        self.insert_edge(from, to, weight, payload);
        Ok(())
    }

    /// Updates the weight of an existing edge
    pub fn update_edge_weight(&mut self, from: &Id, to: &Id, weight: W) -> Result<()> {
        if weight == W::neg_infinity() {
            return Err(Error::ReservedWeight);
        }
        self.require_vertex(from)?;
        self.require_vertex(to)?;

        match self.egress.get_mut(from).and_then(|out| out.get_mut(to)) {
            Some(edge) => {
                edge.weight = weight;
                Ok(())
            }
            None => Err(Error::EdgeNotFound(describe(from), describe(to))),
        }
    }

    /// Weight of the edge `from -> to`, `+inf` when the vertices are not
    /// connected. Fails when either endpoint is unknown.
    pub fn edge_weight(&self, from: &Id, to: &Id) -> Result<W> {
        self.require_vertex(from)?;
        self.require_vertex(to)?;
        Ok(self
            .find_edge(from, to)
            .map_or_else(W::infinity, |edge| edge.weight))
    }

    /// Payload of a vertex
    pub fn vertex(&self, id: &Id) -> Result<&V> {
        self.vertices
            .get(id)
            .ok_or_else(|| Error::UnknownVertex(describe(id)))
    }

    /// Payload of the edge `from -> to`
    pub fn edge(&self, from: &Id, to: &Id) -> Result<&E> {
        self.require_vertex(from)?;
        self.require_vertex(to)?;
        self.find_edge(from, to)
            .map(|edge| &edge.payload)
            .ok_or_else(|| Error::EdgeNotFound(describe(from), describe(to)))
    }

    /// Removes a vertex together with every edge touching it and returns its
    /// payload. Returns `None` if the vertex is unknown.
    pub fn delete_vertex(&mut self, id: &Id) -> Option<V> {
        let payload = self.vertices.remove(id)?;

        if let Some(outgoing) = self.egress.remove(id) {
            for to in outgoing.keys() {
                if let Some(incoming) = self.ingress.get_mut(to) {
                    incoming.remove(id);
                }
            }
        }

        if let Some(incoming) = self.ingress.remove(id) {
            for from in &incoming {
                if let Some(outgoing) = self.egress.get_mut(from) {
                    outgoing.remove(id);
                }
            }
        }

        Some(payload)
    }

    /// Removes the edge `from -> to` and returns its payload
    pub fn delete_edge(&mut self, from: &Id, to: &Id) -> Option<E> {
        if !self.vertices.contains_key(from) || !self.vertices.contains_key(to) {
            return None;
        }

        let edge = self.egress.get_mut(from)?.remove(to)?;
        if let Some(incoming) = self.ingress.get_mut(to) {
            incoming.remove(from);
        }
        Some(edge.payload)
    }

    /// Adds a vertex that describes its own edges.
    ///
    /// Every declared edge must start or end at the vertex. Endpoints that
    /// are not vertices yet are accepted; [`check_integrity`](Self::check_integrity)
    /// reports them until they are added. A declared edge replaces an
    /// existing edge between the same pair.
    pub fn add_vertex_with_edges(&mut self, vertex: V) -> Result<()>
    where
        V: VertexSource<Id, W>,
        E: Default,
    {
        let id = vertex.id();
        if self.vertices.contains_key(&id) {
            return Err(Error::DuplicateVertex(describe(&id)));
        }

        let edges = vertex.edges();
        for (from, to, weight) in &edges {
            if *weight == W::neg_infinity() {
                return Err(Error::ReservedWeight);
            }
            if *from != id && *to != id {
                return Err(Error::UnrelatedEdge {
                    vertex: describe(&id),
                    from: describe(from),
                    to: describe(to),
                });
            }
        }

        self.egress.entry(id.clone()).or_default();
        self.ingress.entry(id.clone()).or_default();
        self.vertices.insert(id, vertex);
        for (from, to, weight) in edges {
            self.insert_edge(from, to, weight, E::default());
        }
        Ok(())
    }

    /// Checks that every edge connects known vertices and that the egress
    /// and ingress views agree.
    pub fn check_integrity(&self) -> Result<()> {
        for (from, outgoing) in &self.egress {
            self.require_known(from)?;
            for to in outgoing.keys() {
                self.require_known(to)?;
                if !self.ingress.get(to).is_some_and(|incoming| incoming.contains(from)) {
                    return Err(Error::IntegrityViolation(format!(
                        "edge {} -> {} is missing from the ingress view",
                        describe(from),
                        describe(to)
                    )));
                }
            }
        }

        for (to, incoming) in &self.ingress {
            self.require_known(to)?;
            for from in incoming {
                self.require_known(from)?;
                if self.find_edge(from, to).is_none() {
                    return Err(Error::IntegrityViolation(format!(
                        "edge {} -> {} is missing from the egress view",
                        describe(from),
                        describe(to)
                    )));
                }
            }
        }

        Ok(())
    }

    /// Disables the edge for further calculation. Returns false if there is no such edge.
    pub fn disable_edge(&mut self, from: &Id, to: &Id) -> bool {
        match self.egress.get_mut(from).and_then(|out| out.get_mut(to)) {
            Some(edge) => {
                edge.enabled = false;
                true
            }
            None => false,
        }
    }

    /// Disables every outgoing edge of the vertex
    pub fn disable_vertex(&mut self, id: &Id) -> bool {
        match self.egress.get_mut(id) {
            Some(outgoing) => {
                outgoing.values_mut().for_each(|edge| edge.enabled = false);
                true
            }
            None => false,
        }
    }

    /// Disables every vertex of the path
    pub fn disable_path(&mut self, path: &[Id]) {
        for id in path {
            self.disable_vertex(id);
        }
    }

    /// Enables all vertices and edges again
    pub fn reset(&mut self) {
        for outgoing in self.egress.values_mut() {
            outgoing.values_mut().for_each(|edge| edge.enabled = true);
        }
    }

    /// Enabled flag of the edge `from -> to`, `None` if there is no such edge
    pub fn is_edge_enabled(&self, from: &Id, to: &Id) -> Option<bool> {
        self.find_edge(from, to).map(|edge| edge.enabled)
    }

    /// Iterates over every vertex with its payload, in id order
    pub fn vertex_payloads(&self) -> impl Iterator<Item = (&Id, &V)> + '_ {
        self.vertices.iter()
    }

    /// Iterates over every edge as `(from, to, weight, enabled)`
    pub fn edges(&self) -> impl Iterator<Item = (&Id, &Id, W, bool)> + '_ {
        self.egress.iter().flat_map(|(from, outgoing)| {
            outgoing
                .iter()
                .map(move |(to, edge)| (from, to, edge.weight, edge.enabled))
        })
    }

    fn insert_edge(&mut self, from: Id, to: Id, weight: W, payload: E) {
        self.ingress
            .entry(to.clone())
            .or_default()
            .insert(from.clone());
        self.egress.entry(from).or_default().insert(
            to,
            EdgeEntry {
                weight,
                enabled: true,
                payload,
            },
        );
    }

    fn find_edge(&self, from: &Id, to: &Id) -> Option<&EdgeEntry<W, E>> {
        self.egress.get(from).and_then(|out| out.get(to))
    }

    fn require_vertex(&self, id: &Id) -> Result<()> {
        if self.vertices.contains_key(id) {
            Ok(())
        } else {
            Err(Error::UnknownVertex(describe(id)))
        }
    }

    fn require_known(&self, id: &Id) -> Result<()> {
        if self.vertices.contains_key(id) {
            Ok(())
        } else {
            Err(Error::IntegrityViolation(format!(
                "vertex {} is not found",
                describe(id)
            )))
        }
    }
}

impl<Id, W, V, E> Graph<Id, W> for DirectedGraph<Id, W, V, E>
where
    Id: VertexId,
    W: Weight,
    V: std::fmt::Debug,
    E: std::fmt::Debug,
{
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn edge_count(&self) -> usize {
        self.egress.values().map(|edges| edges.len()).sum()
    }

    fn vertices(&self) -> Box<dyn Iterator<Item = &Id> + '_> {
        Box::new(self.vertices.keys())
    }

    fn outgoing_edges(&self, vertex: &Id) -> Box<dyn Iterator<Item = (&Id, W)> + '_> {
        match self.egress.get(vertex) {
            Some(edges) => Box::new(
                edges
                    .iter()
                    .filter(|(_, edge)| edge.enabled)
                    .map(|(to, edge)| (to, edge.weight)),
            ),
            None => Box::new(std::iter::empty()),
        }
    }

    fn incoming_edges(&self, vertex: &Id) -> Box<dyn Iterator<Item = (&Id, W)> + '_> {
        match self.ingress.get(vertex) {
            Some(sources) => {
                let vertex = vertex.clone();
                Box::new(sources.iter().filter_map(move |from| {
                    self.egress
                        .get(from)
                        .and_then(|out| out.get(&vertex))
                        .filter(|edge| edge.enabled)
                        .map(|edge| (from, edge.weight))
                }))
            }
            None => Box::new(std::iter::empty()),
        }
    }

    fn has_vertex(&self, vertex: &Id) -> bool {
        self.vertices.contains_key(vertex)
    }

    fn has_edge(&self, from: &Id, to: &Id) -> bool {
        self.find_edge(from, to).is_some()
    }

    fn get_edge_weight(&self, from: &Id, to: &Id) -> Option<W> {
        self.find_edge(from, to).map(|edge| edge.weight)
    }
}
