//! Yen's algorithm for the top-K shortest loopless paths.
//!
//! Each round takes the last accepted path and, for every vertex on it
//! except the destination (the spur node), searches for a shortest path
//! from the spur node that leaves the accepted paths sharing the same root.
//! The root is the prefix of the last path up to and including the spur
//! node. Those searches are independent of each other: every one runs on
//! its own [`EdgeMask`], so they can be executed in parallel and the graph
//! itself is never modified.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use ordered_float::OrderedFloat;
use rayon::prelude::*;

use crate::algorithm::dijkstra::Dijkstra;
use crate::algorithm::{KShortestPathAlgorithm, KShortestPaths, ShortestPathAlgorithm};
use crate::graph::mask::EdgeMask;
use crate::graph::traits::{Graph, VertexId, Weight};
use crate::{describe, Error, Result};

/// A spur path waiting in the candidate pool
#[derive(Debug, Clone)]
struct Candidate<Id, W>
where
    W: Weight,
{
    weight: OrderedFloat<W>,
    path: Vec<Id>,
}

impl<Id: Ord, W: Weight> Ord for Candidate<Id, W> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| self.path.cmp(&other.path))
    }
}

impl<Id: Ord, W: Weight> PartialEq for Candidate<Id, W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<Id: Ord, W: Weight> Eq for Candidate<Id, W> {}

impl<Id: Ord, W: Weight> PartialOrd for Candidate<Id, W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Top-K loopless shortest paths (Yen's algorithm)
#[derive(Debug, Default, Clone)]
pub struct Yen {
    dijkstra: Dijkstra,
    /// Run the spur searches of a round on the rayon pool
    parallel: bool,
}

impl Yen {
    /// Creates a new Yen instance running spur searches sequentially
    pub fn new() -> Self {
        Yen {
            dijkstra: Dijkstra::new(),
            parallel: false,
        }
    }

    /// Enable or disable parallel spur searches
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Computes up to `k` loopless paths from `source` to `destination` in
    /// non-decreasing order of weight.
    ///
    /// Ranks that cannot be filled carry `+inf` and no path. Equal weights
    /// are ordered by comparing the paths vertex by vertex.
    ///
    /// # Errors
    ///
    /// `UnknownVertex` if either `source` or `destination` is not in the
    /// graph; an unreachable but known destination is not an error.
    /// `NegativeWeight` if a reachable edge is negative.
    pub fn compute<Id, W, G>(
        &self,
        graph: &G,
        source: &Id,
        destination: &Id,
        k: usize,
    ) -> Result<KShortestPaths<Id, W>>
    where
        Id: VertexId,
        W: Weight,
        G: Graph<Id, W> + Sync,
    {
        if !graph.has_vertex(source) {
            return Err(Error::UnknownVertex(describe(source)));
        }
        if !graph.has_vertex(destination) {
            return Err(Error::UnknownVertex(describe(destination)));
        }

        let first = self.dijkstra.compute_shortest_paths(graph, source)?;
        let mut ranked = KShortestPaths::unreachable(k);
        if k == 0 {
            return Ok(ranked);
        }

        let Some(first_path) = first.path_to(destination) else {
            log::debug!("Yen: {:?} is unreachable from {:?}", destination, source);
            return Ok(ranked);
        };

        let mut accepted: Vec<Vec<Id>> = vec![first_path];
        ranked.distances[0] = first.distance(destination);
        let mut pool: BTreeSet<Candidate<Id, W>> = BTreeSet::new();
        let mut seen: HashSet<Vec<Id>> = accepted.iter().cloned().collect();

        for rank in 1..k {
            let previous = &accepted[rank - 1];
            let spur_indices = 0..previous.len().saturating_sub(1);

            let spurs: Vec<Option<Candidate<Id, W>>> = if self.parallel {
                spur_indices
                    .into_par_iter()
                    .map(|i| self.spur_candidate(graph, &accepted, previous, i, destination))
                    .collect::<Result<_>>()?
            } else {
                spur_indices
                    .map(|i| self.spur_candidate(graph, &accepted, previous, i, destination))
                    .collect::<Result<_>>()?
            };

            for candidate in spurs.into_iter().flatten() {
                if seen.insert(candidate.path.clone()) {
                    log::trace!(
                        "Yen: candidate {:?} with weight {:?}",
                        candidate.path,
                        candidate.weight
                    );
                    pool.insert(candidate);
                }
            }

            let Some(best) = pool.pop_first() else {
                log::debug!("Yen: candidate pool exhausted after {} paths", rank);
                break;
            };
            log::debug!("Yen: rank {} is {:?} ({:?})", rank + 1, best.path, best.weight);
            ranked.distances[rank] = best.weight.into_inner();
            accepted.push(best.path);
        }

        for (slot, path) in ranked.paths.iter_mut().zip(accepted) {
            *slot = Some(path);
        }
        Ok(ranked)
    }

    /// Shortest deviation from `previous` at index `spur_index`, if any
    fn spur_candidate<Id, W, G>(
        &self,
        graph: &G,
        accepted: &[Vec<Id>],
        previous: &[Id],
        spur_index: usize,
        destination: &Id,
    ) -> Result<Option<Candidate<Id, W>>>
    where
        Id: VertexId,
        W: Weight,
        G: Graph<Id, W>,
    {
        let root = &previous[..=spur_index];
        let spur = &previous[spur_index];

        let mut mask = EdgeMask::new();
        for path in accepted {
            if path.len() > spur_index + 1 && path[..=spur_index] == *root {
                mask.suppress_edge(path[spur_index].clone(), path[spur_index + 1].clone());
            }
        }
        for vertex in &root[..spur_index] {
            mask.suppress_vertex(vertex.clone());
        }

        let result = self.dijkstra.compute_with_mask(graph, spur, &mask)?;
        let Some(spur_path) = result.path_to(destination) else {
            return Ok(None);
        };

        let weight = graph.path_weight(root) + result.distance(destination);
        let mut path = root[..spur_index].to_vec();
        path.extend(spur_path);
        Ok(Some(Candidate {
            weight: OrderedFloat(weight),
            path,
        }))
    }
}

impl<Id, W, G> KShortestPathAlgorithm<Id, W, G> for Yen
where
    Id: VertexId,
    W: Weight,
    G: Graph<Id, W> + Sync,
{
    fn name(&self) -> &'static str {
        "Yen"
    }

    fn k_shortest_paths(
        &self,
        graph: &G,
        source: &Id,
        destination: &Id,
        k: usize,
    ) -> Result<KShortestPaths<Id, W>> {
        self.compute(graph, source, destination, k)
    }
}
