use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use kpaths::algorithm::{KShortestPathAlgorithm, ShortestPathAlgorithm};
use kpaths::graph::generators::random_graph;
use kpaths::graph::{DirectedGraph, Graph};
use kpaths::{Dijkstra, Kisp, Yen};

// Runs a k-paths engine once and reports how many ranks it filled
fn benchmark_k_paths<A>(
    name: &str,
    algorithm: &A,
    graph: &DirectedGraph<usize>,
    source: usize,
    destination: usize,
    k: usize,
) -> Duration
where
    A: KShortestPathAlgorithm<usize, f64, DirectedGraph<usize>>,
{
    let start = Instant::now();
    let result = algorithm.k_shortest_paths(graph, &source, &destination, k);
    let duration = start.elapsed();

    match result {
        Ok(ranked) => println!("  - {}: {} of {} paths in {:?}", name, ranked.found(), k, duration),
        Err(err) => println!("  - {}: failed with {}", name, err),
    }
    duration
}

fn main() {
    env_logger::init();

    let graph_sizes = [1_000, 5_000, 20_000, 50_000];
    let edge_factor = 4.0;
    let k = 10;
    let mut rng = StdRng::seed_from_u64(42);

    println!("=====================================================");
    println!("Benchmark: Yen (sequential / parallel) vs Kisp, K = {}", k);
    println!("Edge factor: {} edges per vertex (on average)", edge_factor);
    println!("=====================================================");

    let dijkstra = Dijkstra::new();
    let yen = Yen::new();
    let yen_parallel = Yen::new().with_parallel(true);
    let kisp = Kisp::new();

    let mut results = Vec::new();

    for &size in &graph_sizes {
        println!("\nGenerating random graph with {} vertices...", size);
        let graph = random_graph(size, edge_factor, 100, &mut rng);
        println!("Graph has {} vertices and {} edges", graph.vertex_count(), graph.edge_count());

        // the farthest reachable vertex gives the longest root paths
        let source = 0;
        let Ok(tree) = dijkstra.compute_shortest_paths(&graph, &source) else {
            continue;
        };
        let Some(destination) = tree
            .distances
            .iter()
            .filter(|(_, d)| d.is_finite())
            .max_by(|a, b| a.1.total_cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(v, _)| *v)
        else {
            continue;
        };
        println!("Routing {} -> {} ({} reachable)", source, destination, tree.reachable_count());

        let yen_time = benchmark_k_paths("Yen", &yen, &graph, source, destination, k);
        let parallel_time =
            benchmark_k_paths("Yen (parallel)", &yen_parallel, &graph, source, destination, k);
        let kisp_time = benchmark_k_paths("Kisp", &kisp, &graph, source, destination, k);

        println!(
            "Speedup - parallel Yen vs sequential Yen: {:.2}x",
            yen_time.as_secs_f64() / parallel_time.as_secs_f64()
        );
        results.push((size, yen_time, parallel_time, kisp_time));
    }

    println!("\n=====================================================");
    println!("Summary of Results");
    println!("=====================================================");
    println!(
        "{:<10} | {:<12} | {:<12} | {:<12} | {:<10}",
        "Vertices", "Yen (ms)", "Yen-Par (ms)", "Kisp (ms)", "SpeedUp"
    );
    println!("-----------------------------------------------------");

    for (size, yen_time, parallel_time, kisp_time) in &results {
        println!(
            "{:<10} | {:<12} | {:<12} | {:<12} | {:<10.2}",
            size,
            yen_time.as_millis(),
            parallel_time.as_millis(),
            kisp_time.as_millis(),
            yen_time.as_secs_f64() / parallel_time.as_secs_f64()
        );
    }
}
