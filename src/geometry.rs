/*
 * Geometry Module
 *
 * This module defines the geometric primitives used by the quadtree:
 * an axis-aligned rectangle stored as center + half extents, and a point
 * snapshot that remembers which boid it was taken from.
 */

use nannou::prelude::*;

/// One of the four quadrants a rectangle is split into. North is `+y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthWest,
        Quadrant::NorthEast,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];

    // Position of this quadrant in a child array
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Axis-aligned rectangle described by its center and half extents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub half_width: f32,
    pub half_height: f32,
}

impl Rectangle {
    /// Negative half extents are clamped to zero.
    pub fn new(x: f32, y: f32, half_width: f32, half_height: f32) -> Self {
        Self {
            x,
            y,
            half_width: half_width.max(0.0),
            half_height: half_height.max(0.0),
        }
    }

    // Square window centered on a point
    pub fn around(center: Point2, half_extent: f32) -> Self {
        Self::new(center.x, center.y, half_extent, half_extent)
    }

    pub fn left(&self) -> f32 {
        self.x - self.half_width
    }

    pub fn right(&self) -> f32 {
        self.x + self.half_width
    }

    pub fn bottom(&self) -> f32 {
        self.y - self.half_height
    }

    pub fn top(&self) -> f32 {
        self.y + self.half_height
    }

    pub fn width(&self) -> f32 {
        self.half_width * 2.0
    }

    pub fn height(&self) -> f32 {
        self.half_height * 2.0
    }

    pub fn center(&self) -> Point2 {
        pt2(self.x, self.y)
    }

    /// Half-open containment: the left and bottom edges are inside, the right
    /// and top edges are not. A point on the edge shared by two sibling
    /// quadrants therefore belongs to exactly one of them.
    #[inline]
    pub fn contains(&self, point: Point2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.bottom()
            && point.y < self.top()
    }

    /// Closed separating-axis test; rectangles that only touch intersect.
    #[inline]
    pub fn intersects(&self, other: &Rectangle) -> bool {
        !(other.left() > self.right()
            || other.right() < self.left()
            || other.bottom() > self.top()
            || other.top() < self.bottom())
    }

    // Child rectangle covering one quadrant of this one
    pub fn quadrant(&self, quadrant: Quadrant) -> Rectangle {
        let hw = self.half_width / 2.0;
        let hh = self.half_height / 2.0;

        match quadrant {
            Quadrant::NorthWest => Rectangle::new(self.x - hw, self.y + hh, hw, hh),
            Quadrant::NorthEast => Rectangle::new(self.x + hw, self.y + hh, hw, hh),
            Quadrant::SouthWest => Rectangle::new(self.x - hw, self.y - hh, hw, hh),
            Quadrant::SouthEast => Rectangle::new(self.x + hw, self.y - hh, hw, hh),
        }
    }
}

/// A boid position captured when the index was built, paired with the
/// boid's slot in the simulation's boid vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndexedPoint {
    pub position: Point2,
    pub agent: usize,
}

impl IndexedPoint {
    pub fn new(position: Point2, agent: usize) -> Self {
        Self { position, agent }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let rect = Rectangle::new(0.0, 0.0, 10.0, 10.0);

        assert!(rect.contains(pt2(-10.0, -10.0)));
        assert!(rect.contains(pt2(9.999, 9.999)));
        assert!(!rect.contains(pt2(10.0, 0.0)));
        assert!(!rect.contains(pt2(0.0, 10.0)));
        assert!(!rect.contains(pt2(-10.001, 0.0)));
    }

    #[test]
    fn shared_edge_point_belongs_to_one_quadrant() {
        let rect = Rectangle::new(0.0, 0.0, 8.0, 8.0);
        let on_edges = [pt2(0.0, 0.0), pt2(0.0, 4.0), pt2(-4.0, 0.0), pt2(3.0, 0.0)];

        for point in on_edges {
            let owners = Quadrant::ALL
                .iter()
                .filter(|&&q| rect.quadrant(q).contains(point))
                .count();
            assert_eq!(owners, 1, "point {:?} claimed by {} quadrants", point, owners);
        }
    }

    #[test]
    fn quadrants_tile_the_parent() {
        let rect = Rectangle::new(100.0, -50.0, 40.0, 20.0);
        let nw = rect.quadrant(Quadrant::NorthWest);
        let se = rect.quadrant(Quadrant::SouthEast);

        assert_eq!(nw, Rectangle::new(80.0, -40.0, 20.0, 10.0));
        assert_eq!(se, Rectangle::new(120.0, -60.0, 20.0, 10.0));

        let area: f32 = Quadrant::ALL
            .iter()
            .map(|&q| rect.quadrant(q))
            .map(|r| r.width() * r.height())
            .sum();
        assert_eq!(area, rect.width() * rect.height());
    }

    #[test]
    fn intersects_counts_touching_edges() {
        let a = Rectangle::new(0.0, 0.0, 5.0, 5.0);

        assert!(a.intersects(&Rectangle::new(10.0, 0.0, 5.0, 5.0)));
        assert!(a.intersects(&Rectangle::new(2.0, 2.0, 1.0, 1.0)));
        assert!(!a.intersects(&Rectangle::new(10.1, 0.0, 5.0, 5.0)));
        assert!(!a.intersects(&Rectangle::new(0.0, -20.0, 5.0, 5.0)));
    }

    #[test]
    fn negative_extents_are_clamped() {
        let rect = Rectangle::new(1.0, 2.0, -3.0, 4.0);
        assert_eq!(rect.half_width, 0.0);
        assert_eq!(rect.half_height, 4.0);
        // zero-width rectangles contain nothing
        assert!(!rect.contains(pt2(1.0, 2.0)));
    }
}
