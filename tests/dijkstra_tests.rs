use kpaths::algorithm::ShortestPathAlgorithm;
use kpaths::graph::{DirectedGraph, Graph};
use kpaths::{Dijkstra, EdgeMask, Error};

const EDGES: &[(&str, &str, f64)] = &[
    ("S", "B", 14.0),
    ("A", "S", 15.0),
    ("B", "S", 14.0),
    ("C", "S", 9.0),
    ("A", "B", 5.0),
    ("A", "D", 20.0),
    ("A", "T", 44.0),
    ("B", "A", 5.0),
    ("B", "D", 30.0),
    ("B", "E", 18.0),
    ("C", "E", 24.0),
    ("D", "A", 20.0),
    ("D", "B", 30.0),
    ("D", "E", 2.0),
    ("D", "F", 11.0),
    ("D", "T", 16.0),
    ("E", "B", 18.0),
    ("E", "C", 24.0),
    ("E", "D", 2.0),
    ("E", "F", 6.0),
    ("E", "T", 19.0),
    ("F", "D", 11.0),
    ("F", "E", 6.0),
    ("F", "T", 6.0),
    ("T", "A", 44.0),
    ("T", "D", 16.0),
    ("T", "E", 19.0),
    ("T", "F", 6.0),
];

// Eight named junctions with mostly symmetric roads
fn road_network() -> DirectedGraph<&'static str> {
    let mut graph = DirectedGraph::new();
    for v in ["S", "A", "B", "C", "D", "E", "F", "T"] {
        graph.add_vertex(v, ()).unwrap();
    }
    for &(from, to, weight) in EDGES {
        graph.add_edge(from, to, weight, ()).unwrap();
    }
    graph
}

#[test]
fn test_distances_and_predecessors() {
    let graph = road_network();
    let result = Dijkstra::new().compute_shortest_paths(&graph, &"S").unwrap();

    let expected = [
        ("S", 0.0, None),
        ("B", 14.0, Some("S")),
        ("A", 19.0, Some("B")),
        ("E", 32.0, Some("B")),
        ("D", 34.0, Some("E")),
        ("F", 38.0, Some("E")),
        ("T", 44.0, Some("F")),
        ("C", 56.0, Some("E")),
    ];
    for (vertex, distance, predecessor) in expected {
        assert_eq!(result.distance(&vertex), distance, "distance of {}", vertex);
        assert_eq!(result.predecessor(&vertex).copied(), predecessor, "predecessor of {}", vertex);
    }
    assert_eq!(result.path_to(&"T"), Some(vec!["S", "B", "E", "F", "T"]));
    assert_eq!(result.reachable_count(), 8);
}

#[test]
fn test_disabled_edges_are_skipped() {
    let mut graph = road_network();
    assert!(graph.disable_edge(&"A", &"B"));
    assert!(graph.disable_edge(&"E", &"F"));

    let result = Dijkstra::new().compute_shortest_paths(&graph, &"S").unwrap();
    assert_eq!(result.distance(&"F"), 45.0);
    assert_eq!(result.predecessor(&"F"), Some(&"D"));
    assert_eq!(result.distance(&"T"), 50.0);
    assert_eq!(result.predecessor(&"T"), Some(&"D"));
    assert_eq!(result.distance(&"A"), 19.0);

    graph.reset();
    let result = Dijkstra::new().compute_shortest_paths(&graph, &"S").unwrap();
    assert_eq!(result.distance(&"T"), 44.0);
}

#[test]
fn test_mask_matches_disabling() {
    let graph = road_network();
    let mut mask = EdgeMask::new();
    mask.suppress_edge("A", "B");
    mask.suppress_edge("E", "F");

    let masked = Dijkstra::new().compute_with_mask(&graph, &"S", &mask).unwrap();
    let mut disabled = graph.clone();
    disabled.disable_edge(&"A", &"B");
    disabled.disable_edge(&"E", &"F");
    let expected = Dijkstra::new().compute_shortest_paths(&disabled, &"S").unwrap();

    assert_eq!(masked, expected);
    assert_eq!(graph.is_edge_enabled(&"E", &"F"), Some(true));
}

#[test]
fn test_equal_routes_keep_first_settled_predecessor() {
    // S -> A and S -> B cost the same as going through B to A
    let mut graph = DirectedGraph::new();
    for v in ["S", "A", "B"] {
        graph.add_vertex(v, ()).unwrap();
    }
    graph.add_edge("S", "A", 10.0, ()).unwrap();
    graph.add_edge("S", "B", 10.0, ()).unwrap();
    graph.add_edge("B", "A", 5.0, ()).unwrap();

    let result = Dijkstra::new().compute_shortest_paths(&graph, &"S").unwrap();
    assert_eq!(result.distance(&"B"), 10.0);
    assert_eq!(result.distance(&"A"), 10.0);
    assert_eq!(result.predecessor(&"A"), Some(&"S"));
}

#[test]
fn test_unknown_source() {
    let graph = road_network();
    let err = Dijkstra::new().compute_shortest_paths(&graph, &"X").unwrap_err();
    assert_eq!(err, Error::UnknownVertex("\"X\"".to_string()));
}

#[test]
fn test_negative_weight_reachable() {
    let mut graph = road_network();
    graph.update_edge_weight(&"D", &"E", -2.0).unwrap();

    let err = Dijkstra::new().compute_shortest_paths(&graph, &"S").unwrap_err();
    match err {
        Error::NegativeWeight { from, to, weight } => {
            assert_eq!(from, "\"D\"");
            assert_eq!(to, "\"E\"");
            assert_eq!(weight, -2.0);
        }
        other => panic!("unexpected error {:?}", other),
    }

    // a disabled negative edge is never relaxed
    graph.disable_edge(&"D", &"E");
    assert!(Dijkstra::new().compute_shortest_paths(&graph, &"S").is_ok());
}

#[test]
fn test_isolated_vertex_is_unreachable() {
    let mut graph = road_network();
    graph.add_vertex("X", ()).unwrap();

    let result = Dijkstra::new().compute_shortest_paths(&graph, &"S").unwrap();
    assert_eq!(result.distance(&"X"), f64::INFINITY);
    assert_eq!(result.predecessor(&"X"), None);
    assert_eq!(result.path_to(&"X"), None);

    let result = Dijkstra::new().compute_shortest_paths(&graph, &"X").unwrap();
    assert_eq!(result.reachable_count(), 1);
    assert_eq!(graph.vertex_count(), 9);
}
