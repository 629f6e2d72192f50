//! Shape registry: the committed shapes of a canvas.

use crate::shapes::{Shape, ShapeId};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All committed shapes, keyed by ID, with their draw order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShapeRegistry {
    /// All shapes, keyed by ID.
    shapes: HashMap<ShapeId, Shape>,
    /// Z-order of shapes (back to front).
    z_order: Vec<ShapeId>,
}

impl ShapeRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a shape under a freshly generated ID and return that ID.
    ///
    /// Any ID the shape already carries is replaced, so two inserts of the
    /// same value never collide.
    pub fn insert(&mut self, mut shape: Shape) -> ShapeId {
        shape.regenerate_id();
        let id = shape.id();
        self.z_order.push(id);
        self.shapes.insert(id, shape);
        id
    }

    /// Replace the geometry of an existing shape.
    /// Returns false (and changes nothing) if the ID is unknown or the IDs differ.
    pub fn update(&mut self, shape: Shape) -> bool {
        match self.shapes.get_mut(&shape.id()) {
            Some(existing) => {
                *existing = shape;
                true
            }
            None => false,
        }
    }

    /// Remove every shape.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.z_order.clear();
    }

    /// Get a shape by ID.
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Get a mutable reference to a shape by ID.
    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    /// Check whether a shape with this ID exists.
    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    /// Get shapes in z-order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Front-most shape at a point.
    pub fn topmost_at_point(&self, point: Point, tolerance: f64) -> Option<ShapeId> {
        self.z_order.iter().rev().copied().find(|id| {
            self.shapes
                .get(id)
                .is_some_and(|s| s.hit_test(point, tolerance))
        })
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Serialize the shapes, in draw order, to JSON for inspection.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let ordered: Vec<&Shape> = self.shapes_ordered().collect();
        serde_json::to_string_pretty(&ordered)
    }
}
