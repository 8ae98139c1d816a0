/*
 * Boid Module
 *
 * This module defines the Boid struct and its behavior.
 * Each boid follows three main rules:
 * 1. Separation: Avoid crowding neighbors
 * 2. Alignment: Steer towards the average heading of neighbors
 * 3. Cohesion: Steer towards the average position of neighbors
 *
 * Rules never touch velocity or position directly. They add into
 * `velocity_buffer`, which update_position() commits once per frame.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::params::SimulationParams;

#[derive(Clone, Debug, PartialEq)]
pub struct Boid {
    pub position: Point2,
    pub velocity: Vec2,
    pub velocity_buffer: Vec2,
    pub color: Rgb<u8>,
}

impl Boid {
    pub fn new(position: Point2, velocity: Vec2, color: Rgb<u8>) -> Self {
        Self {
            position,
            velocity,
            velocity_buffer: velocity,
            color,
        }
    }

    // Random position inside the world, random velocity and color
    pub fn random<R: Rng>(rng: &mut R, params: &SimulationParams) -> Self {
        let bounds = params.world_bounds();
        let x = rng.gen_range(bounds.left()..bounds.right());
        let y = rng.gen_range(bounds.bottom()..bounds.top());

        let vx = rng.gen_range(-params.max_speed..=params.max_speed);
        let vy = rng.gen_range(-params.max_speed..=params.max_speed);

        let color = rgb(
            rng.gen_range(50..=255),
            rng.gen_range(50..=255),
            rng.gen_range(50..=255),
        );

        Self::new(pt2(x, y), vec2(vx, vy), color)
    }

    // Start a new frame with the buffer matching the committed velocity
    pub fn begin_frame(&mut self) {
        self.velocity_buffer = self.velocity;
    }

    /// Steer towards the center of mass of the neighbors.
    pub fn cohere(&mut self, boids: &[Boid], neighbors: &[usize], params: &SimulationParams) {
        if neighbors.is_empty() {
            return;
        }

        let mut center_of_mass = Vec2::ZERO;
        for &i in neighbors {
            center_of_mass += boids[i].position;
        }
        center_of_mass /= neighbors.len() as f32;

        let direction_to_center = center_of_mass - self.position;
        self.velocity_buffer += direction_to_center * params.coherence_factor;
    }

    /// Steer towards the average velocity of the neighbors.
    pub fn align(&mut self, boids: &[Boid], neighbors: &[usize], params: &SimulationParams) {
        if neighbors.is_empty() {
            return;
        }

        let mut average_velocity = Vec2::ZERO;
        for &i in neighbors {
            average_velocity += boids[i].velocity;
        }
        average_velocity /= neighbors.len() as f32;

        let adjustment = average_velocity - self.velocity;
        self.velocity_buffer += adjustment * params.alignment_factor;
    }

    /// Steer away from neighbors closer than `distance_separation`.
    ///
    /// Neighbors at distance zero are skipped, so a boid passed its own
    /// index contributes nothing.
    pub fn separate(&mut self, boids: &[Boid], neighbors: &[usize], params: &SimulationParams) {
        if neighbors.is_empty() {
            return;
        }

        let mut move_away = Vec2::ZERO;
        for &i in neighbors {
            let other = &boids[i];
            let d = self.position.distance(other.position);

            if d > 0.0 && d < params.distance_separation {
                move_away += (self.position - other.position) / d;
            }
        }

        self.velocity_buffer +=
            params.separation_multiplier * (move_away * params.separation_factor);
    }

    /// Nudge the boid back towards the interior when it is within the margin
    /// of an edge. This is soft steering; boids can still leave the world.
    pub fn keep_in_bounds(&mut self, params: &SimulationParams) {
        let bounds = params.world_bounds();
        let margin = params.margin();
        let turn = params.turn();

        if self.position.x < bounds.left() + margin {
            self.velocity_buffer.x += turn;
        }
        if self.position.x > bounds.right() - margin {
            self.velocity_buffer.x -= turn;
        }
        if self.position.y < bounds.bottom() + margin {
            self.velocity_buffer.y += turn;
        }
        if self.position.y > bounds.top() - margin {
            self.velocity_buffer.y -= turn;
        }
    }

    /// Dampen the buffer once if it is faster than `max_speed`.
    ///
    /// This scales by `damping_factor` rather than clamping, so a fast boid
    /// slows over several frames instead of snapping to the limit.
    pub fn limit_speed(&mut self, params: &SimulationParams) {
        if self.velocity_buffer.length() > params.max_speed {
            self.velocity_buffer *= params.damping_factor;
        }
    }

    // Commit the buffer and move
    pub fn update_position(&mut self, params: &SimulationParams) {
        self.limit_speed(params);
        self.velocity = self.velocity_buffer;
        self.position += self.velocity;
    }
}
