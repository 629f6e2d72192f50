//! Rectangle shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{Affine, BezPath, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A rectangle anchored at `position`.
///
/// `width` and `height` are signed: a negative value extends the rectangle
/// left of / above the anchor, which renders as a mirrored rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Anchor corner.
    pub position: Point,
    /// Signed width.
    pub width: f64,
    /// Signed height.
    pub height: f64,
    /// Rotation angle in radians (around center).
    #[serde(default)]
    pub rotation: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            rotation: 0.0,
            style: ShapeStyle::default(),
        }
    }

    /// Get the rectangle as a normalized kurbo Rect (before rotation).
    pub fn as_rect(&self) -> Rect {
        Rect::from_points(self.position, self.position + Vec2::new(self.width, self.height))
    }

    /// Transform from the unrotated frame to world coordinates.
    fn rotation_affine(&self) -> Affine {
        Affine::rotate_about(self.rotation, self.as_rect().center())
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let local = self.rotation_affine().inverse() * point;
        let rect = self.as_rect();
        if self.style.fill_color.is_some() {
            // Filled: hit anywhere inside
            rect.inflate(tolerance, tolerance).contains(local)
        } else {
            // Outline only: hit on the border
            let reach = tolerance + self.style.stroke_width / 2.0;
            let outer = rect.inflate(reach, reach);
            let inner = rect.inflate(-reach, -reach);
            outer.contains(local) && !inner.contains(local)
        }
    }

    fn to_path(&self) -> BezPath {
        let mut path = self.as_rect().to_path(0.1);
        if self.rotation != 0.0 {
            path.apply_affine(self.rotation_affine());
        }
        path
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
    fn test_rectangle_creation() {
        let rect = Rectangle::new(Point::new(10.0, 20.0), 100.0, 50.0);
        assert!((rect.position.x - 10.0).abs() < f64::EPSILON);
        assert!((rect.position.y - 20.0).abs() < f64::EPSILON);
        assert!((rect.width - 100.0).abs() < f64::EPSILON);
        assert!((rect.height - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_size_is_mirrored() {
        let rect = Rectangle::new(Point::new(50.0, 30.0), -40.0, -20.0);
        let bounds = rect.bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 50.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 30.0).abs() < f64::EPSILON);
        // Data is kept signed, not clamped
        assert!((rect.width + 40.0).abs() < f64::EPSILON);
        assert!(rect.hit_test(Point::new(20.0, 20.0), 0.0));
    }

    #[test]
    fn test_hit_test() {
        let rect = Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0);
        assert!(rect.hit_test(Point::new(50.0, 50.0), 0.0));
        assert!(!rect.hit_test(Point::new(150.0, 50.0), 0.0));
        assert!(rect.hit_test(Point::new(105.0, 50.0), 10.0)); // Within tolerance
    }

    #[test]
    fn test_outline_hit_test() {
        let mut rect = Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0);
        rect.style.fill_color = None;
        assert!(rect.hit_test(Point::new(0.0, 50.0), 2.0));
        assert!(!rect.hit_test(Point::new(50.0, 50.0), 2.0));
    }

    #[test]
    fn test_rotated_hit_test() {
        let mut rect = Rectangle::new(Point::new(0.0, 40.0), 100.0, 20.0);
        rect.rotation = std::f64::consts::FRAC_PI_2;
        // Now a vertical bar around (50, 50)
        assert!(rect.hit_test(Point::new(50.0, 5.0), 0.0));
        assert!(!rect.hit_test(Point::new(5.0, 50.0), 0.0));
    }

    #[test]
    fn test_bounds() {
        let rect = Rectangle::new(Point::new(10.0, 20.0), 100.0, 50.0);
        let bounds = rect.bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 110.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 70.0).abs() < f64::EPSILON);
    }
}
