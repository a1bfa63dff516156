use std::collections::HashMap;

use ordered_float::OrderedFloat;

use crate::algorithm::{ShortestPathAlgorithm, ShortestPathResult};
use crate::data_structures::IndexedPriorityQueue;
use crate::graph::mask::{EdgeMask, MaskedGraph};
use crate::graph::traits::{Graph, VertexId, Weight};
use crate::{describe, Error, Result};

/// Classic Dijkstra's algorithm implementation on a decrease-key queue
///
/// Only enabled edges are relaxed. An enabled edge with a negative weight
/// leaving a reachable vertex aborts the run with [`Error::NegativeWeight`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Dijkstra;

impl Dijkstra {
    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra
    }

    /// Runs the search on `graph` with everything in `mask` left out
    pub fn compute_with_mask<Id, W, G>(
        &self,
        graph: &G,
        source: &Id,
        mask: &EdgeMask<Id>,
    ) -> Result<ShortestPathResult<Id, W>>
    where
        Id: VertexId,
        W: Weight,
        G: Graph<Id, W>,
    {
        self.run(&MaskedGraph::new(graph, mask), source)
    }

    fn run<Id, W, G>(&self, graph: &G, source: &Id) -> Result<ShortestPathResult<Id, W>>
    where
        Id: VertexId,
        W: Weight,
        G: Graph<Id, W>,
    {
        if !graph.has_vertex(source) {
            return Err(Error::UnknownVertex(describe(source)));
        }

        let mut distances: HashMap<Id, W> = graph
            .vertices()
            .map(|v| (v.clone(), W::infinity()))
            .collect();
        let mut predecessors: HashMap<Id, Id> = HashMap::new();
        distances.insert(source.clone(), W::zero());

        let mut queue = IndexedPriorityQueue::new();
        queue.push(source.clone(), OrderedFloat(W::zero()));
        let mut settled = 0usize;

        while let Some((u, OrderedFloat(dist_u))) = queue.pop() {
            settled += 1;

            for (v, weight) in graph.outgoing_edges(&u) {
                if weight < W::zero() {
                    return Err(Error::NegativeWeight {
                        from: describe(&u),
                        to: describe(v),
                        weight: weight.to_f64().unwrap_or(f64::NAN),
                    });
                }

                let candidate = dist_u + weight;
                let current = distances.get(v).copied().unwrap_or_else(W::infinity);
                if candidate < current {
                    log::trace!("relax {:?} -> {:?}: {:?} -> {:?}", u, v, current, candidate);
                    distances.insert(v.clone(), candidate);
                    predecessors.insert(v.clone(), u.clone());
                    if queue.contains(v) {
                        queue.decrease_key(v, OrderedFloat(candidate))?;
                    } else {
                        queue.push(v.clone(), OrderedFloat(candidate));
                    }
                }
            }
        }

        log::debug!(
            "Dijkstra from {:?} settled {} of {} vertices",
            source,
            settled,
            graph.vertex_count()
        );

        Ok(ShortestPathResult {
            distances,
            predecessors,
            source: source.clone(),
        })
    }
}

impl<Id, W, G> ShortestPathAlgorithm<Id, W, G> for Dijkstra
where
    Id: VertexId,
    W: Weight,
    G: Graph<Id, W>,
{
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn compute_shortest_paths(&self, graph: &G, source: &Id) -> Result<ShortestPathResult<Id, W>> {
        self.run(graph, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DirectedGraph;

    fn diamond() -> DirectedGraph<char> {
        let mut graph = DirectedGraph::new();
        for v in ['a', 'b', 'c', 'd'] {
            graph.add_vertex(v, ()).unwrap();
        }
        graph.add_edge('a', 'b', 1.0, ()).unwrap();
        graph.add_edge('a', 'c', 4.0, ()).unwrap();
        graph.add_edge('b', 'c', 2.0, ()).unwrap();
        graph.add_edge('c', 'd', 1.0, ()).unwrap();
        graph
    }

    #[test]
    fn test_decrease_key_path() {
        let graph = diamond();
        let result = Dijkstra::new().compute_shortest_paths(&graph, &'a').unwrap();
        assert_eq!(result.distance(&'c'), 3.0);
        assert_eq!(result.predecessor(&'c'), Some(&'b'));
        assert_eq!(result.path_to(&'d'), Some(vec!['a', 'b', 'c', 'd']));
        assert_eq!(result.path_to(&'a'), Some(vec!['a']));
        assert_eq!(result.reachable_count(), 4);
    }

    #[test]
    fn test_mask_reroutes() {
        let graph = diamond();
        let mut mask = EdgeMask::new();
        mask.suppress_edge('b', 'c');
        let result = Dijkstra::new().compute_with_mask(&graph, &'a', &mask).unwrap();
        assert_eq!(result.distance(&'d'), 5.0);
        assert_eq!(result.path_to(&'d'), Some(vec!['a', 'c', 'd']));

        mask.suppress_vertex('a');
        let result = Dijkstra::new().compute_with_mask(&graph, &'a', &mask).unwrap();
        assert_eq!(result.distance(&'d'), f64::INFINITY);
        assert_eq!(result.path_to(&'d'), None);
        assert_eq!(result.predecessor(&'d'), None);
    }

    #[test]
    fn test_negative_edge_behind_unreachable_vertex_is_ignored() {
        let mut graph = diamond();
        graph.add_vertex('z', ()).unwrap();
        graph.add_edge('z', 'a', -3.0, ()).unwrap();
        let result = Dijkstra::new().compute_shortest_paths(&graph, &'a').unwrap();
        assert_eq!(result.distance(&'z'), f64::INFINITY);

        let err = Dijkstra::new().compute_shortest_paths(&graph, &'z').unwrap_err();
        assert!(matches!(err, Error::NegativeWeight { .. }));
    }
}
