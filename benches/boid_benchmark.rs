/*
 * Boid Simulation Benchmark
 *
 * This file contains benchmarks for the boid simulation to compare the
 * quadtree against brute-force neighbor search. It measures building the
 * quadtree, querying it, and the overall update step.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nannou::prelude::*;
use quadtree_boids::{
    IndexedPoint, NeighborSearch, QuadTree, Rectangle, Simulation, SimulationParams,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

const SIZES: [usize; 4] = [100, 500, 1000, 2000];

fn random_positions(n: usize, params: &SimulationParams) -> Vec<Point2> {
    let mut rng = StdRng::seed_from_u64(n as u64);
    let bounds = params.world_bounds();
    (0..n)
        .map(|_| {
            pt2(
                rng.gen_range(bounds.left()..bounds.right()),
                rng.gen_range(bounds.bottom()..bounds.top()),
            )
        })
        .collect()
}

fn build_tree(positions: &[Point2], params: &SimulationParams) -> QuadTree {
    let mut tree = QuadTree::new(params.world_bounds(), params.tree_capacity);
    for (i, &position) in positions.iter().enumerate() {
        tree.insert(IndexedPoint::new(position, i));
    }
    tree
}

// Benchmark building the quadtree from scratch
fn bench_quadtree_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_build");
    let params = SimulationParams::default();

    for num_boids in SIZES.iter() {
        let positions = random_positions(*num_boids, &params);
        group.bench_with_input(BenchmarkId::from_parameter(num_boids), &positions, |b, positions| {
            b.iter(|| black_box(build_tree(positions, &params)));
        });
    }

    group.finish();
}

// Benchmark one neighborhood query per boid
fn bench_quadtree_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_query");
    let params = SimulationParams::default();

    for num_boids in SIZES.iter() {
        let positions = random_positions(*num_boids, &params);
        let tree = build_tree(&positions, &params);

        group.bench_with_input(BenchmarkId::from_parameter(num_boids), &positions, |b, positions| {
            let mut found = Vec::new();
            b.iter(|| {
                for &position in positions {
                    found.clear();
                    let window = Rectangle::around(position, params.distance_visible / 2.0);
                    tree.query_into(&window, &mut found);
                    black_box(found.len());
                }
            });
        });
    }

    group.finish();
}

// Benchmark the overall update step with each neighbor search
fn bench_update_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_step");

    for search in [NeighborSearch::QuadTree, NeighborSearch::BruteForce] {
        for num_boids in SIZES.iter() {
            let params = SimulationParams {
                num_boids: *num_boids,
                rng_seed: Some(7),
                neighbor_search: search,
                ..SimulationParams::default()
            };

            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", search), num_boids),
                &params,
                |b, params| {
                    let mut sim = match Simulation::new(params.clone()) {
                        Ok(sim) => sim,
                        Err(err) => panic!("invalid benchmark params: {}", err),
                    };
                    b.iter(|| black_box(sim.step()));
                },
            );
        }
    }

    group.finish();
}

// Configure the benchmarks
criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_quadtree_build, bench_quadtree_query, bench_update_step
}

criterion_main!(benches);
