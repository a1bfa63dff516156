use crate::algorithm::dijkstra::Dijkstra;
use crate::algorithm::{KShortestPathAlgorithm, KShortestPaths, ShortestPathAlgorithm};
use crate::graph::mask::EdgeMask;
use crate::graph::traits::{Graph, VertexId, Weight};
use crate::{describe, Error, Result};

/// Top-K independent shortest paths
///
/// Every rank is the shortest path that avoids all edges of the ranks before
/// it, so the returned paths are pairwise edge-disjoint. They may still
/// share vertices.
#[derive(Debug, Default, Clone)]
pub struct Kisp {
    dijkstra: Dijkstra,
}

impl Kisp {
    pub fn new() -> Self {
        Kisp {
            dijkstra: Dijkstra::new(),
        }
    }

    /// Computes up to `k` edge-disjoint paths from `source` to `destination`.
    ///
    /// Stops at the first rank whose destination is unreachable; that rank
    /// and all later ones carry `+inf` and no path. When `source` equals
    /// `destination` only rank 1 is filled, with the single-vertex path at
    /// weight 0, since that path has no edge to exclude.
    ///
    /// # Errors
    ///
    /// `UnknownVertex` if either `source` or `destination` is not in the
    /// graph, `NegativeWeight` if a reachable edge is negative.
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
        G: Graph<Id, W>,
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
        ranked.distances[0] = first.distance(destination);
        ranked.paths[0] = first.path_to(destination);

        let mut mask = EdgeMask::new();
        for rank in 1..k {
            // a single-vertex path has no edge to suppress and would repeat forever
            let Some(previous) = ranked.paths[rank - 1].as_deref().filter(|p| p.len() > 1) else {
                break;
            };
            mask.suppress_path_edges(previous);

            let result = self.dijkstra.compute_with_mask(graph, source, &mask)?;
            ranked.distances[rank] = result.distance(destination);
            ranked.paths[rank] = result.path_to(destination);
            log::debug!(
                "Kisp: rank {} is {:?} ({:?})",
                rank + 1,
                ranked.paths[rank],
                ranked.distances[rank]
            );
        }

        Ok(ranked)
    }
}

impl<Id, W, G> KShortestPathAlgorithm<Id, W, G> for Kisp
where
    Id: VertexId,
    W: Weight,
    G: Graph<Id, W>,
{
    fn name(&self) -> &'static str {
        "Kisp"
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
