/*
 * Quadtree Boid Simulation
 *
 * This application simulates the flocking behavior of birds (boids) based on three main rules:
 * 1. Separation: Avoid crowding neighbors
 * 2. Alignment: Steer towards the average heading of neighbors
 * 3. Cohesion: Steer towards the average position of neighbors
 *
 * Neighbors are found through a quadtree rebuilt every frame. Press Escape or
 * close the window to quit. Set RUST_LOG=debug for per-frame statistics.
 */

use anyhow::{Context, Result};
use quadtree_boids::{app, SimulationParams};
use tracing::info;

fn main() -> Result<()> {
    init_tracing();

    let params = SimulationParams::default();
    params
        .validate()
        .context("default simulation parameters are invalid")?;
    info!(?params, "Starting quadtree boid simulation");

    nannou::app(app::model).update(app::update).run();
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
