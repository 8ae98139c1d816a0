/*
 * Simulation Parameters Module
 *
 * This module defines the tunable constants of the simulation and the
 * SimulationParams struct that carries them into the orchestrator. The
 * constants are the defaults; the UI may adjust a copy at runtime.
 */

use thiserror::Error;

use crate::geometry::Rectangle;

pub const NUM_BOIDS: usize = 800;
pub const WORLD_WIDTH: f32 = 800.0;
pub const WORLD_HEIGHT: f32 = 800.0;

// Quadtree
pub const TREE_CAPACITY: usize = 16;
pub const MAX_TREE_DEPTH: usize = 16;

// Perception
pub const DISTANCE_VISIBLE: f32 = 20.0;
pub const DISTANCE_SEPARATION: f32 = 8.0;

// Flocking rule weights
pub const MAX_SPEED: f32 = 2.0;
pub const COHERENCE_FACTOR: f32 = 0.01;
pub const ALIGNMENT_FACTOR: f32 = 0.05;
pub const SEPARATION_FACTOR: f32 = 0.1;
pub const SEPARATION_MULTIPLIER: f32 = 8.0;

// Boundary steering and speed damping
pub const MARGIN_FRACTION: f32 = 0.05;
pub const TURN_FACTOR: f32 = 0.1;
pub const DAMPING_FACTOR: f32 = 0.9;

/// How candidate neighbors are found for each boid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NeighborSearch {
    /// Query the per-frame quadtree with a window around the boid.
    #[default]
    QuadTree,
    /// Compare against every other boid.
    BruteForce,
}

/// Errors reported by [`SimulationParams::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("world dimensions must be positive, got {width}x{height}")]
    InvalidWorldSize { width: f32, height: f32 },
    #[error("quadtree capacity must be at least 1")]
    ZeroCapacity,
    #[error("distance_visible ({visible}) must be positive and at least distance_separation ({separation})")]
    InvalidDistances { visible: f32, separation: f32 },
    #[error("max_speed must be positive, got {0}")]
    InvalidMaxSpeed(f32),
    #[error("damping_factor must be in (0, 1), got {0}")]
    InvalidDamping(f32),
    #[error("margin_fraction must be in [0, 0.5), got {0}")]
    InvalidMargin(f32),
    #[error("{0} must be finite")]
    NonFinite(&'static str),
}

// Parameters for the simulation, adjustable via UI
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationParams {
    pub num_boids: usize,
    pub world_width: f32,
    pub world_height: f32,
    pub tree_capacity: usize,
    pub max_tree_depth: usize,
    pub distance_visible: f32,
    pub distance_separation: f32,
    pub max_speed: f32,
    pub coherence_factor: f32,
    pub alignment_factor: f32,
    pub separation_factor: f32,
    pub separation_multiplier: f32,
    pub margin_fraction: f32,
    pub turn_factor: f32,
    pub damping_factor: f32,
    pub rng_seed: Option<u64>,
    pub neighbor_search: NeighborSearch,
    pub enable_parallel: bool,
    pub show_quadtree: bool,
    pub pause_simulation: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_boids: NUM_BOIDS,
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            tree_capacity: TREE_CAPACITY,
            max_tree_depth: MAX_TREE_DEPTH,
            distance_visible: DISTANCE_VISIBLE,
            distance_separation: DISTANCE_SEPARATION,
            max_speed: MAX_SPEED,
            coherence_factor: COHERENCE_FACTOR,
            alignment_factor: ALIGNMENT_FACTOR,
            separation_factor: SEPARATION_FACTOR,
            separation_multiplier: SEPARATION_MULTIPLIER,
            margin_fraction: MARGIN_FRACTION,
            turn_factor: TURN_FACTOR,
            damping_factor: DAMPING_FACTOR,
            rng_seed: None,
            neighbor_search: NeighborSearch::QuadTree,
            enable_parallel: false,
            show_quadtree: true,
            pause_simulation: false,
        }
    }
}

impl SimulationParams {
    /// The simulation domain, centered on the origin.
    pub fn world_bounds(&self) -> Rectangle {
        Rectangle::new(0.0, 0.0, self.world_width / 2.0, self.world_height / 2.0)
    }

    // Distance from an edge at which boids start turning back
    pub fn margin(&self) -> f32 {
        self.world_width * self.margin_fraction
    }

    pub fn turn(&self) -> f32 {
        self.max_speed * self.turn_factor
    }

    /// Check that the parameters describe a runnable simulation.
    ///
    /// Factors must also keep forces bounded; that is not checked here
    /// beyond rejecting non-finite values.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let factors = [
            ("coherence_factor", self.coherence_factor),
            ("alignment_factor", self.alignment_factor),
            ("separation_factor", self.separation_factor),
            ("separation_multiplier", self.separation_multiplier),
            ("turn_factor", self.turn_factor),
        ];
        if let Some((name, _)) = factors.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ParamsError::NonFinite(*name));
        }

        if !(self.world_width > 0.0 && self.world_height > 0.0)
            || !self.world_width.is_finite()
            || !self.world_height.is_finite()
        {
            return Err(ParamsError::InvalidWorldSize {
                width: self.world_width,
                height: self.world_height,
            });
        }

        if self.tree_capacity == 0 {
            return Err(ParamsError::ZeroCapacity);
        }

        if !(self.distance_separation > 0.0 && self.distance_visible >= self.distance_separation)
            || !self.distance_visible.is_finite()
        {
            return Err(ParamsError::InvalidDistances {
                visible: self.distance_visible,
                separation: self.distance_separation,
            });
        }

        if !(self.max_speed > 0.0) || !self.max_speed.is_finite() {
            return Err(ParamsError::InvalidMaxSpeed(self.max_speed));
        }

        if !(self.damping_factor > 0.0 && self.damping_factor < 1.0) {
            return Err(ParamsError::InvalidDamping(self.damping_factor));
        }

        if !(self.margin_fraction >= 0.0 && self.margin_fraction < 0.5) {
            return Err(ParamsError::InvalidMargin(self.margin_fraction));
        }

        Ok(())
    }

    // Get parameter ranges for UI sliders
    pub fn get_num_boids_range() -> std::ops::RangeInclusive<usize> {
        10..=5000
    }

    pub fn get_max_speed_range() -> std::ops::RangeInclusive<f32> {
        0.5..=10.0
    }

    pub fn get_factor_range() -> std::ops::RangeInclusive<f32> {
        0.0..=0.5
    }

    pub fn get_distance_range() -> std::ops::RangeInclusive<f32> {
        1.0..=100.0
    }

    pub fn get_capacity_range() -> std::ops::RangeInclusive<usize> {
        1..=64
    }
}
