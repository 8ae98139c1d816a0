/*
 * Simulation Module
 *
 * This module drives the flock one frame at a time:
 * 1. Rebuild the quadtree from the current boid positions
 * 2. For every boid, query a window around it and split the candidates into
 *    close and far neighbors by true distance
 * 3. Apply separation to close neighbors, cohesion and alignment to far ones,
 *    then boundary steering and integration
 *
 * Every boid reads the state of the flock as it was at the start of the
 * frame. New boids are computed from the old slice into a fresh vector and
 * swapped in once all of them are done, so iteration order never matters and
 * the update can optionally run in parallel.
 */

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

use crate::boid::Boid;
use crate::debug::{DebugInfo, NeighborCounts};
use crate::geometry::{IndexedPoint, Rectangle};
use crate::input::{handle_events, InputEvent, LoopControl};
use crate::params::{NeighborSearch, ParamsError, SimulationParams};
use crate::quadtree::QuadTree;
use crate::renderer::{draw_frame, Canvas};

pub struct Simulation {
    boids: Vec<Boid>,
    params: SimulationParams,
    rng: StdRng,
    debug_info: DebugInfo,
}

// Reusable per-worker buffers for neighbor lookups
#[derive(Default)]
struct NeighborScratch {
    candidates: Vec<usize>,
    close: Vec<usize>,
    far: Vec<usize>,
}

impl Simulation {
    /// Create a simulation with `params.num_boids` randomly placed boids.
    pub fn new(params: SimulationParams) -> Result<Self, ParamsError> {
        params.validate()?;

        let mut rng = match params.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let boids = (0..params.num_boids)
            .map(|_| Boid::random(&mut rng, &params))
            .collect();

        info!(
            boids = params.num_boids,
            width = params.world_width,
            height = params.world_height,
            capacity = params.tree_capacity,
            seed = ?params.rng_seed,
            "Created simulation"
        );

        Ok(Self {
            boids,
            params,
            rng,
            debug_info: DebugInfo::default(),
        })
    }

    /// Create a simulation from an explicit flock. `num_boids` is taken from
    /// the flock rather than from `params`.
    pub fn with_boids(mut params: SimulationParams, boids: Vec<Boid>) -> Result<Self, ParamsError> {
        params.validate()?;
        params.num_boids = boids.len();

        let rng = match params.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            boids,
            params,
            rng,
            debug_info: DebugInfo::default(),
        })
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn debug_info(&self) -> &DebugInfo {
        &self.debug_info
    }

    pub fn debug_info_mut(&mut self) -> &mut DebugInfo {
        &mut self.debug_info
    }

    /// Replace the parameters, growing or shrinking the flock to match
    /// `num_boids`. Invalid parameters leave the simulation untouched.
    pub fn set_params(&mut self, params: SimulationParams) -> Result<(), ParamsError> {
        params.validate()?;

        let num_boids = params.num_boids;
        self.params = params;

        if num_boids != self.boids.len() {
            info!(from = self.boids.len(), to = num_boids, "Resizing flock");
            let rng = &mut self.rng;
            let params = &self.params;
            self.boids
                .resize_with(num_boids, || Boid::random(rng, params));
        }

        Ok(())
    }

    // Scatter the whole flock again
    pub fn reset(&mut self) {
        info!(boids = self.params.num_boids, "Resetting flock");
        let rng = &mut self.rng;
        let params = &self.params;
        self.boids = (0..params.num_boids)
            .map(|_| Boid::random(rng, params))
            .collect();
        self.debug_info.frames_simulated = 0;
    }

    /// Build a quadtree over the current boid positions.
    pub fn build_index(&self) -> QuadTree {
        let mut tree = QuadTree::new(self.params.world_bounds(), self.params.tree_capacity)
            .with_max_depth(self.params.max_tree_depth);

        for (i, boid) in self.boids.iter().enumerate() {
            tree.insert(IndexedPoint::new(boid.position, i));
        }

        tree
    }

    /// Advance the flock by one frame.
    ///
    /// Returns the quadtree built for this frame so the caller can draw it;
    /// it is `None` when brute-force search is selected.
    pub fn step(&mut self) -> Option<QuadTree> {
        let started = Instant::now();

        let tree = match self.params.neighbor_search {
            NeighborSearch::QuadTree => Some(self.build_index()),
            NeighborSearch::BruteForce => None,
        };

        let boids = &self.boids;
        let params = &self.params;
        let index = tree.as_ref();

        let results: Vec<(Boid, NeighborCounts)> = if params.enable_parallel {
            (0..boids.len())
                .into_par_iter()
                .map_init(NeighborScratch::default, |scratch, i| {
                    advance_boid(boids, i, index, params, scratch)
                })
                .collect()
        } else {
            let mut scratch = NeighborScratch::default();
            (0..boids.len())
                .map(|i| advance_boid(boids, i, index, params, &mut scratch))
                .collect()
        };

        let mut counts = NeighborCounts::default();
        let next: Vec<Boid> = results
            .into_iter()
            .map(|(boid, boid_counts)| {
                counts = counts + boid_counts;
                boid
            })
            .collect();

        let num_boids = next.len();
        self.boids = next;
        self.record_stats(tree.as_ref(), counts, num_boids, started);

        tree
    }

    fn record_stats(
        &mut self,
        tree: Option<&QuadTree>,
        counts: NeighborCounts,
        num_boids: usize,
        started: Instant,
    ) {
        let info = &mut self.debug_info;

        match tree {
            Some(tree) => {
                info.tree_nodes = tree.node_count();
                info.tree_depth = tree.max_depth_reached();
                info.indexed_points = tree.len();
                info.dropped_points = num_boids.saturating_sub(info.indexed_points);
            }
            None => {
                info.tree_nodes = 0;
                info.tree_depth = 0;
                info.indexed_points = 0;
                info.dropped_points = 0;
            }
        }

        info.record_neighbors(counts, num_boids);
        info.step_time = started.elapsed();
        info.frames_simulated += 1;

        debug!(
            frame = info.frames_simulated,
            nodes = info.tree_nodes,
            depth = info.tree_depth,
            dropped = info.dropped_points,
            candidates = info.candidates_per_boid,
            close = info.close_pairs,
            far = info.far_pairs,
            step_us = info.step_time.as_micros() as u64,
            "Stepped flock"
        );
    }

    /// Draw the flock, with an optional quadtree overlay, and present.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, quadtree: Option<&QuadTree>) {
        draw_frame(canvas, &self.boids, quadtree);
    }

    /// Run one iteration of the frame loop: handle input, step unless paused,
    /// draw. Returns [`LoopControl::Exit`] without drawing on quit or escape.
    pub fn frame<C, I>(&mut self, events: I, canvas: &mut C) -> LoopControl
    where
        C: Canvas + ?Sized,
        I: IntoIterator<Item = InputEvent>,
    {
        if handle_events(events) == LoopControl::Exit {
            info!(frames = self.debug_info.frames_simulated, "Exit requested");
            return LoopControl::Exit;
        }

        let tree = if self.params.pause_simulation {
            self.params.show_quadtree.then(|| self.build_index())
        } else {
            self.step()
        };

        let overlay = if self.params.show_quadtree {
            tree.as_ref()
        } else {
            None
        };
        self.draw(canvas, overlay);

        LoopControl::Continue
    }
}

/// Split `candidates` into close (`0 < d < distance_separation`) and far
/// (`distance_separation <= d < distance_visible`) neighbors of `agent`.
/// Anything at distance zero, including the agent itself, and anything at or
/// beyond `distance_visible` lands in neither list.
pub fn classify_neighbors(
    boids: &[Boid],
    agent: usize,
    candidates: &[usize],
    params: &SimulationParams,
    close: &mut Vec<usize>,
    far: &mut Vec<usize>,
) {
    close.clear();
    far.clear();

    let position = boids[agent].position;
    for &other in candidates {
        let d = position.distance(boids[other].position);

        if !(d > 0.0 && d < params.distance_visible) {
            continue;
        }

        if d < params.distance_separation {
            close.push(other);
        } else {
            far.push(other);
        }
    }
}

// Compute the next state of one boid from the pre-frame flock
fn advance_boid(
    boids: &[Boid],
    agent: usize,
    tree: Option<&QuadTree>,
    params: &SimulationParams,
    scratch: &mut NeighborScratch,
) -> (Boid, NeighborCounts) {
    scratch.candidates.clear();
    match tree {
        Some(tree) => {
            let window = Rectangle::around(boids[agent].position, params.distance_visible / 2.0);
            tree.query_into(&window, &mut scratch.candidates);
        }
        None => scratch.candidates.extend(0..boids.len()),
    }

    classify_neighbors(
        boids,
        agent,
        &scratch.candidates,
        params,
        &mut scratch.close,
        &mut scratch.far,
    );

    let mut boid = boids[agent].clone();
    boid.begin_frame();
    boid.separate(boids, &scratch.close, params);
    boid.cohere(boids, &scratch.far, params);
    boid.align(boids, &scratch.far, params);
    boid.keep_in_bounds(params);
    boid.update_position(params);

    let counts = NeighborCounts {
        candidates: scratch.candidates.len(),
        close: scratch.close.len(),
        far: scratch.far.len(),
    };

    (boid, counts)
}
