/*
 * Quadtree Module
 *
 * This module defines the QuadTree used for neighbor lookups. The simulation
 * space is split recursively into four quadrants whenever a leaf fills up,
 * so a range query only visits nodes near the query window instead of
 * comparing every pair of boids.
 *
 * The tree is rebuilt from scratch every frame and holds a snapshot of the
 * boid positions taken at insertion time.
 */

use tracing::trace;

use crate::geometry::{IndexedPoint, Quadrant, Rectangle};
use crate::params::MAX_TREE_DEPTH;

pub struct QuadTree {
    boundary: Rectangle,
    capacity: usize,
    max_depth: usize,
    depth: usize,
    points: Vec<IndexedPoint>,
    // Either no children (leaf) or exactly four, indexed by Quadrant
    children: Option<Box<[QuadTree; 4]>>,
}

impl QuadTree {
    pub fn new(boundary: Rectangle, capacity: usize) -> Self {
        Self::node(boundary, capacity, MAX_TREE_DEPTH, 0)
    }

    /// Limit how deep the tree may subdivide. Nodes at `max_depth` keep
    /// accepting points past `capacity`, which stops runaway subdivision
    /// when many boids share one position.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    fn node(boundary: Rectangle, capacity: usize, max_depth: usize, depth: usize) -> Self {
        Self {
            boundary,
            capacity,
            max_depth,
            depth,
            points: Vec::with_capacity(capacity),
            children: None,
        }
    }

    /// Insert a point, returning whether it was stored.
    ///
    /// A leaf below capacity appends the point without checking containment.
    /// Points that reach a subdivided node and fall outside every child are
    /// dropped silently.
    pub fn insert(&mut self, point: IndexedPoint) -> bool {
        if self.children.is_none()
            && (self.points.len() < self.capacity || self.depth >= self.max_depth)
        {
            self.points.push(point);
            return true;
        }

        if self.children.is_none() {
            self.subdivide();
        }

        self.insert_into_children(point)
    }

    // Split into four children and push the held points down into them
    fn subdivide(&mut self) {
        let depth = self.depth + 1;
        let children = Quadrant::ALL.map(|quadrant| {
            QuadTree::node(
                self.boundary.quadrant(quadrant),
                self.capacity,
                self.max_depth,
                depth,
            )
        });
        self.children = Some(Box::new(children));

        for point in std::mem::take(&mut self.points) {
            self.insert_into_children(point);
        }
    }

    fn insert_into_children(&mut self, point: IndexedPoint) -> bool {
        let Some(children) = self.children.as_deref_mut() else {
            return false;
        };

        match children
            .iter_mut()
            .find(|child| child.boundary.contains(point.position))
        {
            Some(child) => child.insert(point),
            None => {
                trace!(
                    agent = point.agent,
                    x = point.position.x,
                    y = point.position.y,
                    "point outside quadtree domain dropped"
                );
                false
            }
        }
    }

    /// Collect the agents held by every node whose rectangle intersects
    /// `window`. Individual points are not tested against the window.
    pub fn query(&self, window: &Rectangle) -> Vec<usize> {
        let mut found = Vec::new();
        self.query_into(window, &mut found);
        found
    }

    /// Same as [`QuadTree::query`] but appends into a caller-owned buffer.
    pub fn query_into(&self, window: &Rectangle, found: &mut Vec<usize>) {
        if !self.boundary.intersects(window) {
            return;
        }

        found.extend(self.points.iter().map(|point| point.agent));

        if let Some(children) = self.children.as_deref() {
            for child in children {
                child.query_into(window, found);
            }
        }
    }

    pub fn boundary(&self) -> &Rectangle {
        &self.boundary
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    // Points held directly by this node (always empty once subdivided)
    pub fn points(&self) -> &[IndexedPoint] {
        &self.points
    }

    pub fn children(&self) -> Option<&[QuadTree; 4]> {
        self.children.as_deref()
    }

    pub fn child(&self, quadrant: Quadrant) -> Option<&QuadTree> {
        self.children().map(|children| &children[quadrant.index()])
    }

    pub fn is_subdivided(&self) -> bool {
        self.children.is_some()
    }

    /// Number of points stored in this node and all of its descendants.
    pub fn len(&self) -> usize {
        let mut total = 0;
        self.for_each_node(&mut |node: &QuadTree| total += node.points.len());
        total
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.for_each_node(&mut |_: &QuadTree| count += 1);
        count
    }

    pub fn max_depth_reached(&self) -> usize {
        let mut deepest = 0;
        self.for_each_node(&mut |node: &QuadTree| deepest = deepest.max(node.depth));
        deepest
    }

    /// Visit this node and every descendant in pre-order.
    pub fn for_each_node<F>(&self, f: &mut F)
    where
        F: FnMut(&QuadTree),
    {
        f(self);
        if let Some(children) = self.children.as_deref() {
            for child in children {
                child.for_each_node(f);
            }
        }
    }
}
