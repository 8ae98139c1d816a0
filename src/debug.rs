/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * and per-frame statistics displayed in the UI.
 *
 * Includes metrics for:
 * - FPS (frames per second) and frame time
 * - Quadtree shape (nodes, depth, indexed and dropped points)
 * - Neighbor query cost (candidates per boid, classified pairs)
 */

use std::time::Duration;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub step_time: Duration,
    pub frames_simulated: u64,
    pub tree_nodes: usize,
    pub tree_depth: usize,
    pub indexed_points: usize,
    pub dropped_points: usize,
    pub candidates_per_boid: f32,
    pub close_pairs: usize,
    pub far_pairs: usize,
}

// Neighbor totals accumulated while stepping the boids
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NeighborCounts {
    pub candidates: usize,
    pub close: usize,
    pub far: usize,
}

impl std::ops::Add for NeighborCounts {
    type Output = NeighborCounts;

    fn add(self, other: NeighborCounts) -> NeighborCounts {
        NeighborCounts {
            candidates: self.candidates + other.candidates,
            close: self.close + other.close,
            far: self.far + other.far,
        }
    }
}

impl DebugInfo {
    pub fn record_neighbors(&mut self, counts: NeighborCounts, num_boids: usize) {
        self.candidates_per_boid = if num_boids > 0 {
            counts.candidates as f32 / num_boids as f32
        } else {
            0.0
        };
        self.close_pairs = counts.close;
        self.far_pairs = counts.far;
    }
}
