//! Circle shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Circle as KurboCircle, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A circle centered at `position`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: ShapeId,
    /// Center point.
    pub position: Point,
    /// Radius.
    pub radius: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Circle {
    /// Create a new circle.
    pub fn new(position: Point, radius: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            radius,
            style: ShapeStyle::default(),
        }
    }

    /// Get as a kurbo Circle.
    pub fn as_kurbo(&self) -> KurboCircle {
        KurboCircle::new(self.position, self.radius.abs())
    }
}

impl ShapeTrait for Circle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let r = self.radius.abs();
        Rect::new(
            self.position.x - r,
            self.position.y - r,
            self.position.x + r,
            self.position.y + r,
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let half_sw = self.style.stroke_width / 2.0;
        let dist = point.distance(self.position);
        let r = self.radius.abs();
        if dist > r + tolerance + half_sw {
            return false;
        }
        if self.style.fill_color.is_some() {
            return true;
        }
        // Outline only: reject if inside inner circle
        dist >= (r - tolerance - half_sw).max(0.0)
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_creation() {
        let circle = Circle::new(Point::new(50.0, 50.0), 30.0);
        assert!((circle.position.x - 50.0).abs() < f64::EPSILON);
        assert!((circle.radius - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test_center() {
        let circle = Circle::new(Point::new(50.0, 50.0), 30.0);
        assert!(circle.hit_test(Point::new(50.0, 50.0), 0.0));
    }

    #[test]
    fn test_hit_test_edge() {
        let circle = Circle::new(Point::new(0.0, 0.0), 10.0);
        assert!(circle.hit_test(Point::new(10.0, 0.0), 0.0));
        assert!(!circle.hit_test(Point::new(15.0, 0.0), 0.0));
    }

    #[test]
    fn test_outline_hit_test() {
        let mut circle = Circle::new(Point::new(0.0, 0.0), 10.0);
        circle.style.fill_color = None;
        assert!(circle.hit_test(Point::new(10.0, 0.0), 1.0));
        assert!(!circle.hit_test(Point::new(0.0, 0.0), 1.0));
    }

    #[test]
    fn test_bounds() {
        let circle = Circle::new(Point::new(50.0, 50.0), 30.0);
        let bounds = circle.bounds();
        assert!((bounds.x0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 80.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 80.0).abs() < f64::EPSILON);
    }
}
