use std::collections::HashMap;

use crate::graph::traits::{Graph, VertexId, Weight};
use crate::Result;

/// Result of a shortest path algorithm execution
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPathResult<Id, W>
where
    Id: VertexId,
    W: Weight,
{
    /// Distances from source to each known vertex, `+inf` when unreachable
    pub distances: HashMap<Id, W>,

    /// Predecessor of each reached vertex in the shortest path tree
    pub predecessors: HashMap<Id, Id>,

    /// Source vertex ID
    pub source: Id,
}

impl<Id, W> ShortestPathResult<Id, W>
where
    Id: VertexId,
    W: Weight,
{
    /// Distance to `target`, `+inf` if it is unknown or unreachable
    pub fn distance(&self, target: &Id) -> W {
        self.distances
            .get(target)
            .copied()
            .unwrap_or_else(W::infinity)
    }

    /// Predecessor of `target`, if defined
    pub fn predecessor(&self, target: &Id) -> Option<&Id> {
        self.predecessors.get(target)
    }

    /// Walks the predecessor chain back from `target` and returns the path in
    /// source-to-target order. `None` when the chain does not reach the source.
    pub fn path_to(&self, target: &Id) -> Option<Vec<Id>> {
        if !self.distance(target).is_finite() {
            return None;
        }

        let mut path = vec![target.clone()];
        let mut current = target;
        while let Some(previous) = self.predecessors.get(current) {
            // a predecessor chain longer than the vertex set means a cycle
            if path.len() > self.distances.len() {
                log::warn!("Cycle detected in path reconstruction at vertex {:?}", current);
                return None;
            }
            path.push(previous.clone());
            current = previous;
        }

        if *current != self.source {
            return None;
        }
        path.reverse();
        Some(path)
    }

    /// Number of vertices reached with a finite distance
    pub fn reachable_count(&self) -> usize {
        self.distances.values().filter(|d| d.is_finite()).count()
    }
}

/// Trait for single-source shortest path algorithms
pub trait ShortestPathAlgorithm<Id, W, G>
where
    Id: VertexId,
    W: Weight,
    G: Graph<Id, W>,
{
    /// Compute shortest paths from a source vertex to all other vertices
    fn compute_shortest_paths(&self, graph: &G, source: &Id) -> Result<ShortestPathResult<Id, W>>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    /// Get the shortest path from source to target as a sequence of vertices
    fn get_path(&self, result: &ShortestPathResult<Id, W>, target: &Id) -> Option<Vec<Id>> {
        result.path_to(target)
    }
}

/// Ranked output of a k-shortest-paths query
///
/// Both vectors have exactly `k` entries. A rank that could not be filled
/// has distance `+inf` and no path.
#[derive(Debug, Clone, PartialEq)]
pub struct KShortestPaths<Id, W> {
    pub distances: Vec<W>,
    pub paths: Vec<Option<Vec<Id>>>,
}

impl<Id, W> KShortestPaths<Id, W>
where
    Id: VertexId,
    W: Weight,
{
    /// `k` unfilled ranks
    pub fn unreachable(k: usize) -> Self {
        KShortestPaths {
            distances: vec![W::infinity(); k],
            paths: vec![None; k],
        }
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Number of ranks that hold a path
    pub fn found(&self) -> usize {
        self.paths.iter().filter(|p| p.is_some()).count()
    }

    /// Iterates over the filled ranks as `(distance, path)`
    pub fn iter(&self) -> impl Iterator<Item = (W, &[Id])> + '_ {
        self.distances
            .iter()
            .zip(&self.paths)
            .filter_map(|(d, p)| p.as_deref().map(|p| (*d, p)))
    }
}

/// Trait for algorithms returning the top `k` paths between two vertices
pub trait KShortestPathAlgorithm<Id, W, G>
where
    Id: VertexId,
    W: Weight,
    G: Graph<Id, W>,
{
    /// Compute up to `k` ranked paths from `source` to `destination`
    fn k_shortest_paths(
        &self,
        graph: &G,
        source: &Id,
        destination: &Id,
        k: usize,
    ) -> Result<KShortestPaths<Id, W>>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;
}
