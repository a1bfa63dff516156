use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use kpaths::algorithm::ShortestPathAlgorithm;
use kpaths::graph::generators::{grid_graph, random_graph};
use kpaths::{Dijkstra, Kisp, Yen};

fn bench_dijkstra(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra");
    let mut rng = StdRng::seed_from_u64(1);
    for &n in &[1_000usize, 10_000] {
        let graph = random_graph(n, 4.0, 100, &mut rng);
        group.bench_with_input(BenchmarkId::from_parameter(n), &graph, |b, graph| {
            b.iter(|| Dijkstra::new().compute_shortest_paths(graph, black_box(&0)))
        });
    }
    group.finish();
}

fn bench_yen(c: &mut Criterion) {
    let mut group = c.benchmark_group("yen");
    group.sample_size(20);
    let graph = grid_graph(30, 30);
    let destination = 30 * 30 - 1;
    for &k in &[2usize, 8, 16] {
        group.bench_with_input(BenchmarkId::new("sequential", k), &k, |b, &k| {
            b.iter(|| Yen::new().compute(&graph, black_box(&0), &destination, k))
        });
        group.bench_with_input(BenchmarkId::new("parallel", k), &k, |b, &k| {
            b.iter(|| {
                Yen::new()
                    .with_parallel(true)
                    .compute(&graph, black_box(&0), &destination, k)
            })
        });
    }
    group.finish();
}

fn bench_kisp(c: &mut Criterion) {
    let mut group = c.benchmark_group("kisp");
    let graph = grid_graph(30, 30);
    let destination = 30 * 30 - 1;
    for &k in &[2usize, 4] {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            b.iter(|| Kisp::new().compute(&graph, black_box(&0), &destination, k))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_dijkstra, bench_yen, bench_kisp);
criterion_main!(benches);
