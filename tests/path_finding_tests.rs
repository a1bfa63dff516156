use kpaths::algorithm::{KShortestPathAlgorithm, ShortestPathAlgorithm};
use kpaths::graph::{DirectedGraph, Graph};
use kpaths::{Dijkstra, Kisp, Yen};
use std::collections::HashMap;

// Test helper function to create a grid graph with 8-way moves
fn create_test_grid(width: usize, height: usize, blocked: &[(usize, usize)]) -> DirectedGraph<usize> {
    let mut graph = DirectedGraph::new();
    for vertex in 0..(width * height) {
        graph.add_vertex(vertex, ()).unwrap();
    }

    let directions = [
        // Cardinal directions (N, E, S, W)
        (0, -1, 1.0), (1, 0, 1.0), (0, 1, 1.0), (-1, 0, 1.0),
        // Diagonal directions (NE, SE, SW, NW)
        (1, -1, 1.4), (1, 1, 1.4), (-1, 1, 1.4), (-1, -1, 1.4),
    ];

    for y in 0..height {
        for x in 0..width {
            if blocked.contains(&(x, y)) {
                continue;
            }
            let vertex = y * width + x;
            for (dx, dy, cost) in directions {
                let nx = x as i32 + dx;
                let ny = y as i32 + dy;
                if nx >= 0 && ny >= 0 && nx < width as i32 && ny < height as i32 {
                    let (nx, ny) = (nx as usize, ny as usize);
                    if !blocked.contains(&(nx, ny)) {
                        graph.add_edge(vertex, ny * width + nx, cost, ()).unwrap();
                    }
                }
            }
        }
    }

    graph
}

fn assert_valid_path(graph: &DirectedGraph<usize>, path: &[usize], source: usize, target: usize) {
    assert_eq!(path[0], source, "Path should start at source");
    assert_eq!(path[path.len() - 1], target, "Path should end at target");
    for pair in path.windows(2) {
        assert!(graph.has_edge(&pair[0], &pair[1]), "Path should only use existing edges");
    }
}

#[test]
fn test_path_finding_simple_grid() {
    let graph = create_test_grid(10, 10, &[]);
    let (source, target) = (0, 99);

    let dijkstra = Dijkstra::new();
    let result = dijkstra.compute_shortest_paths(&graph, &source).unwrap();
    assert!((result.distance(&target) - 9.0 * 1.4).abs() < 1e-9, "Diagonal should be shortest");

    let path = <Dijkstra as ShortestPathAlgorithm<usize, f64, DirectedGraph<usize>>>::get_path(
        &dijkstra, &result, &target,
    )
    .expect("Dijkstra should construct a path");
    assert_valid_path(&graph, &path, source, target);
    assert_eq!(path.len(), 10);
}

#[test]
fn test_alternatives_around_obstacles() {
    // wall in column 5 with a gap at the bottom
    let wall: Vec<(usize, usize)> = (0..8).map(|y| (5, y)).collect();
    let graph = create_test_grid(10, 10, &wall);
    let (source, target) = (0, 9);

    let yen = Yen::new().with_parallel(true);
    let ranked = yen.k_shortest_paths(&graph, &source, &target, 4).unwrap();
    assert_eq!(ranked.found(), 4, "Yen should find alternatives around the wall");

    let direct = Dijkstra::new().compute_shortest_paths(&graph, &source).unwrap();
    assert!((ranked.distances[0] - direct.distance(&target)).abs() < 1e-9);

    for (distance, path) in ranked.iter() {
        assert_valid_path(&graph, path, source, target);
        assert!((graph.path_weight(path) - distance).abs() < 1e-9);
        // every route has to pass below the wall
        assert!(path.iter().any(|v| v / 10 >= 8), "Path should use the gap");
    }
    assert!(ranked.distances.windows(2).all(|w| w[0] <= w[1] + 1e-9));
}

#[test]
fn test_city_route_alternatives() {
    let width = 25;
    let height = 18;
    let buildings = [
        (3, 3), (4, 3), (5, 3),
        (3, 4), (4, 4), (5, 4),
        (3, 5), (4, 5), (5, 5),
        (10, 10), (11, 10), (12, 10),
        (10, 11), (11, 11), (12, 11),
        (10, 12), (11, 12), (12, 12),
    ];
    let graph = create_test_grid(width, height, &buildings);

    let locations = HashMap::from([
        ("home", (0, 0)),
        ("work", (20, 15)),
        ("gym", (15, 8)),
        ("park", (8, 12)),
    ]);

    let yen = Yen::new();
    let kisp = Kisp::new();
    for (from_name, &(fx, fy)) in &locations {
        for (to_name, &(tx, ty)) in &locations {
            if from_name == to_name {
                continue;
            }
            let source = fy * width + fx;
            let target = ty * width + tx;

            let ranked = yen.compute(&graph, &source, &target, 3).unwrap();
            assert_eq!(ranked.found(), 3, "Should find 3 routes from {} to {}", from_name, to_name);
            for (_, path) in ranked.iter() {
                assert_valid_path(&graph, path, source, target);
            }

            let independent = kisp.compute(&graph, &source, &target, 2).unwrap();
            assert_eq!(independent.found(), 2, "Should find 2 independent routes from {} to {}", from_name, to_name);
            assert!((independent.distances[0] - ranked.distances[0]).abs() < 1e-9);
            for (_, path) in independent.iter() {
                assert_valid_path(&graph, path, source, target);
            }
        }
    }
}
