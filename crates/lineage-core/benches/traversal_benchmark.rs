//! Benchmarks for lineage layering and depth-first enumeration.
//!
//! Measures:
//! - `compute_layers` on wide and deep derivation DAGs
//! - `enumerate` tree unrolling with re-converging paths
//! - `GraphModel` construction

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lineage_core::graph::{
    compute_layers, enumerate, Direction, EntityNode, GraphModel, TraversalOptions,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Random derivation DAG: each node derives from up to `fan_in` earlier nodes.
fn random_dag(nodes: usize, fan_in: usize, seed: u64) -> GraphModel {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = GraphModel::builder();
    for i in 0..nodes {
        builder
            .add_node(EntityNode::new(&format!("S-{i}")))
            .expect("unique id");
    }
    for child in 1..nodes {
        let parents = rng.gen_range(1..=fan_in);
        for _ in 0..parents {
            let parent = rng.gen_range(0..child);
            builder
                .link(&format!("S-{parent}"), &format!("S-{child}"))
                .expect("both nodes exist");
        }
    }
    builder.build()
}

fn bench_compute_layers(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_layers");
    for &nodes in &[1_000usize, 10_000, 50_000] {
        let graph = random_dag(nodes, 3, 42);
        let options = TraversalOptions::specific(20, 20);
        group.throughput(Throughput::Elements(nodes as u64));
        group.bench_with_input(BenchmarkId::new("descendants", nodes), &graph, |b, graph| {
            b.iter(|| {
                black_box(compute_layers(
                    graph,
                    black_box("S-0"),
                    Direction::Child,
                    &options,
                ))
            });
        });
        let last = format!("S-{}", nodes - 1);
        group.bench_with_input(BenchmarkId::new("ancestors", nodes), &graph, |b, graph| {
            b.iter(|| {
                black_box(compute_layers(
                    graph,
                    black_box(&last),
                    Direction::Parent,
                    &options,
                ))
            });
        });
    }
    group.finish();
}

fn bench_enumerate(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumerate");
    let graph = random_dag(2_000, 2, 7);
    for &max_distance in &[2usize, 4, 6] {
        group.bench_with_input(
            BenchmarkId::new("ancestors", max_distance),
            &max_distance,
            |b, &max_distance| {
                b.iter(|| {
                    black_box(enumerate(
                        &graph,
                        black_box("S-1999"),
                        Direction::Parent,
                        max_distance,
                    ))
                });
            },
        );
    }
    group.finish();
}

fn bench_build_model(c: &mut Criterion) {
    c.bench_function("graph_model_build_10k", |b| {
        b.iter(|| black_box(random_dag(10_000, 3, 1)));
    });
}

criterion_group!(
    benches,
    bench_compute_layers,
    bench_enumerate,
    bench_build_model
);
criterion_main!(benches);
