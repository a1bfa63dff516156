use crate::graph::DirectedGraph;
use rand::prelude::*;

/// Generates a random directed graph with `n` vertices and roughly
/// `edge_factor * n` edges.
///
/// Weights are whole numbers in `1..=max_weight`, so path sums are exact.
/// Self-loops and duplicate edges are skipped.
pub fn random_graph<R: Rng + ?Sized>(
    n: usize,
    edge_factor: f64,
    max_weight: u32,
    rng: &mut R,
) -> DirectedGraph<usize> {
    assert!(max_weight > 0, "max_weight must be positive");

    let mut graph = DirectedGraph::new();
    for v in 0..n {
        // ids are fresh, insertion cannot collide
        let _ = graph.add_vertex(v, ());
    }
    if n < 2 {
        return graph;
    }

    let num_edges = (edge_factor * n as f64) as usize;
    for _ in 0..num_edges {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u != v {
            let weight = f64::from(rng.gen_range(1..=max_weight));
            // duplicates are rejected by the graph and simply dropped here
            let _ = graph.add_edge(u, v, weight, ());
        }
    }

    graph
}

/// Generates a `width * height` grid with unit-weight edges in both
/// directions between horizontal and vertical neighbours.
///
/// Vertex `(x, y)` has id `y * width + x`.
pub fn grid_graph(width: usize, height: usize) -> DirectedGraph<usize> {
    let mut graph = DirectedGraph::new();
    for v in 0..width * height {
        let _ = graph.add_vertex(v, ());
    }

    let index = |x: usize, y: usize| y * width + x;
    for y in 0..height {
        for x in 0..width {
            let current = index(x, y);
            if x + 1 < width {
                let _ = graph.add_edge(current, index(x + 1, y), 1.0, ());
                let _ = graph.add_edge(index(x + 1, y), current, 1.0, ());
            }
            if y + 1 < height {
                let _ = graph.add_edge(current, index(x, y + 1), 1.0, ());
                let _ = graph.add_edge(index(x, y + 1), current, 1.0, ());
            }
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_graph_is_well_formed() {
        let mut rng = StdRng::seed_from_u64(42);
        let graph = random_graph(50, 3.0, 9, &mut rng);
        assert_eq!(graph.vertex_count(), 50);
        assert!(graph.edge_count() > 0 && graph.edge_count() <= 150);
        assert!(graph.check_integrity().is_ok());
        for (from, to, weight, _) in graph.edges() {
            assert_ne!(from, to);
            assert!((1.0..=9.0).contains(&weight));
            assert_eq!(weight.fract(), 0.0);
        }
    }

    #[test]
    fn test_grid_graph_degrees() {
        let graph = grid_graph(3, 2);
        assert_eq!(graph.vertex_count(), 6);
        // 2 horizontal pairs per row, 3 vertical pairs, both directions
        assert_eq!(graph.edge_count(), 2 * (2 * 2 + 3));
        assert_eq!(graph.outgoing_edges(&0).count(), 2);
        assert_eq!(graph.outgoing_edges(&1).count(), 3);
    }
}
