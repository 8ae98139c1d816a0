/*
 * Quadtree Boid Simulation - Module Definitions
 *
 * This file defines the module structure for the boid simulation.
 * The simulation core (geometry, quadtree, boid, simulation) has no window
 * dependency beyond nannou's vector and color types; app, ui and renderer
 * wire it to a nannou window.
 */

// Re-export key components for easier access
pub use boid::Boid;
pub use debug::DebugInfo;
pub use geometry::{IndexedPoint, Quadrant, Rectangle};
pub use input::{InputEvent, LoopControl};
pub use params::{NeighborSearch, ParamsError, SimulationParams};
pub use quadtree::QuadTree;
pub use renderer::Canvas;
pub use simulation::{classify_neighbors, Simulation};

// Define modules
pub mod app;
pub mod boid;
pub mod debug;
pub mod geometry;
pub mod input;
pub mod params;
pub mod quadtree;
pub mod renderer;
pub mod simulation;
pub mod ui;

// Constants
pub const BOID_RADIUS: f32 = 2.0;
