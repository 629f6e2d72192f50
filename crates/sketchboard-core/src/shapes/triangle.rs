//! Triangle shape (a regular polygon with three sides).

use super::{ShapeId, ShapeStyle, ShapeTrait, point_to_polyline_dist};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Size};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};
use uuid::Uuid;

/// A regular polygon centered at `position`, pointing up.
///
/// `radius` is the circumradius and drives the geometry; `width` and
/// `height` are kept equal to `2 * radius` and describe the transform frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub(crate) id: ShapeId,
    /// Center point.
    pub position: Point,
    /// Frame width.
    pub width: f64,
    /// Frame height.
    pub height: f64,
    /// Circumradius.
    pub radius: f64,
    /// Number of sides.
    pub sides: u32,
    /// Rotation angle in radians (around center).
    #[serde(default)]
    pub rotation: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Triangle {
    /// Number of sides for a triangle.
    pub const SIDES: u32 = 3;

    /// Create a new triangle with the given circumradius.
    pub fn new(position: Point, radius: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width: radius * 2.0,
            height: radius * 2.0,
            radius,
            sides: Self::SIDES,
            rotation: 0.0,
            style: ShapeStyle::default(),
        }
    }

    /// Set the circumradius, keeping the frame in sync.
    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
        self.width = radius * 2.0;
        self.height = radius * 2.0;
    }

    /// Polygon vertices in world coordinates.
    pub fn vertices(&self) -> Vec<Point> {
        let sides = self.sides.max(3);
        (0..sides)
            .map(|k| {
                let angle = -FRAC_PI_2 + self.rotation + TAU * k as f64 / sides as f64;
                Point::new(
                    self.position.x + self.radius * angle.cos(),
                    self.position.y + self.radius * angle.sin(),
                )
            })
            .collect()
    }
}

impl ShapeTrait for Triangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_center_size(self.position, Size::new(self.width.abs(), self.height.abs()))
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let path = self.to_path();
        if self.style.fill_color.is_some() && path.contains(point) {
            return true;
        }
        let mut outline = self.vertices();
        if let Some(&first) = outline.first() {
            outline.push(first);
        }
        point_to_polyline_dist(point, &outline) <= tolerance + self.style.stroke_width / 2.0
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let vertices = self.vertices();
        let Some((&first, rest)) = vertices.split_first() else {
            return path;
        };
        path.move_to(first);
        for &v in rest {
            path.line_to(v);
        }
        path.close_path();
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
    fn test_triangle_creation() {
        let tri = Triangle::new(Point::new(0.0, 0.0), 1.0);
        assert_eq!(tri.sides, 3);
        assert!((tri.width - 2.0).abs() < f64::EPSILON);
        assert!((tri.height - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_radius_updates_frame() {
        let mut tri = Triangle::new(Point::new(0.0, 0.0), 1.0);
        tri.set_radius(5.0);
        assert!((tri.width - 10.0).abs() < f64::EPSILON);
        assert!((tri.height - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_apex_points_up() {
        let tri = Triangle::new(Point::new(10.0, 10.0), 5.0);
        let apex = tri.vertices()[0];
        assert!((apex.x - 10.0).abs() < 1e-9);
        assert!((apex.y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_hit_test() {
        let tri = Triangle::new(Point::new(0.0, 0.0), 10.0);
        assert!(tri.hit_test(Point::new(0.0, 0.0), 0.0));
        // Outside the polygon but inside the frame corner
        assert!(!tri.hit_test(Point::new(-9.0, -9.0), 0.0));
    }

    #[test]
    fn test_bounds() {
        let tri = Triangle::new(Point::new(50.0, 50.0), 10.0);
        let bounds = tri.bounds();
        assert!((bounds.x0 - 40.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 60.0).abs() < f64::EPSILON);
    }
}
