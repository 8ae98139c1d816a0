/*
 * Renderer Module
 *
 * This module handles the rendering of the boid simulation.
 * The simulation only talks to a Canvas: one circle per boid, optionally one
 * outline per quadtree node, then present. NannouCanvas is the window-backed
 * implementation used by the application.
 */

use nannou::prelude::*;
use tracing::error;

use crate::boid::Boid;
use crate::geometry::Rectangle;
use crate::quadtree::QuadTree;
use crate::BOID_RADIUS;

/// Drawing surface consumed by the simulation.
pub trait Canvas {
    fn draw_circle(&mut self, center: Point2, radius: f32, color: Rgb<u8>);

    fn draw_rect_outline(&mut self, rect: &Rectangle);

    fn present(&mut self);
}

// Draw one frame: quadtree overlay (if any), then every boid, then present
pub fn draw_frame<C: Canvas + ?Sized>(canvas: &mut C, boids: &[Boid], quadtree: Option<&QuadTree>) {
    if let Some(tree) = quadtree {
        tree.for_each_node(&mut |node: &QuadTree| canvas.draw_rect_outline(node.boundary()));
    }

    for boid in boids {
        canvas.draw_circle(boid.position, BOID_RADIUS, boid.color);
    }

    canvas.present();
}

/// Canvas backed by a nannou window frame.
///
/// World coordinates are centered on the origin with `+y` up, which is the
/// same convention nannou uses for window coordinates.
pub struct NannouCanvas<'a, 'f> {
    app: &'a App,
    frame: &'a Frame<'f>,
    draw: Draw,
}

impl<'a, 'f> NannouCanvas<'a, 'f> {
    pub fn new(app: &'a App, frame: &'a Frame<'f>) -> Self {
        let draw = app.draw();
        draw.background().color(BLACK);
        Self { app, frame, draw }
    }
}

impl Canvas for NannouCanvas<'_, '_> {
    fn draw_circle(&mut self, center: Point2, radius: f32, color: Rgb<u8>) {
        self.draw.ellipse().xy(center).radius(radius).color(color);
    }

    fn draw_rect_outline(&mut self, rect: &Rectangle) {
        self.draw
            .rect()
            .x_y(rect.x, rect.y)
            .w_h(rect.width(), rect.height())
            .no_fill()
            .stroke_weight(1.0)
            .stroke(rgb(100u8, 100, 0));
    }

    fn present(&mut self) {
        if let Err(err) = self.draw.to_frame(self.app, self.frame) {
            error!(?err, "failed to render frame");
        }
    }
}
