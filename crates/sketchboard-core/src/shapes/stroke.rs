//! Freehand pen stroke.

use super::{ShapeId, ShapeStyle, ShapeTrait, point_to_polyline_dist};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A freehand stroke (ordered series of points).
///
/// Points are stored as captured; `position` is an offset applied on top of
/// them, so dragging a stroke never rewrites its points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub(crate) id: ShapeId,
    /// Offset applied to every point.
    #[serde(default)]
    pub position: Point,
    /// Points in capture order.
    pub points: Vec<Point>,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Stroke {
    /// Start a stroke at a single point.
    pub fn new(start: Point) -> Self {
        Self::from_points(vec![start])
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            position: Point::ZERO,
            points,
            style: ShapeStyle::pen(),
        }
    }

    /// Add a point to the stroke.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the stroke has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points with the offset applied.
    pub fn world_points(&self) -> Vec<Point> {
        let offset = self.offset();
        self.points.iter().map(|p| *p + offset).collect()
    }

    fn offset(&self) -> Vec2 {
        self.position.to_vec2()
    }
}

impl ShapeTrait for Stroke {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let points = self.world_points();
        let Some((&first, rest)) = points.split_first() else {
            return Rect::ZERO;
        };
        rest.iter()
            .fold(Rect::from_points(first, first), |acc, p| acc.union_pt(*p))
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let points = self.world_points();
        if points.is_empty() {
            return false;
        }
        point_to_polyline_dist(point, &points) <= tolerance + self.style.stroke_width / 2.0
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let points = self.world_points();
        let Some((&first, rest)) = points.split_first() else {
            return path;
        };
        path.move_to(first);
        if rest.is_empty() {
            // Zero-length segment so round caps still draw a dot
            path.line_to(first);
        }
        for &point in rest {
            path.line_to(point);
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
    fn test_stroke_starts_with_one_point() {
        let stroke = Stroke::new(Point::new(3.0, 4.0));
        assert_eq!(stroke.len(), 1);
        assert_eq!(stroke.position, Point::ZERO);
    }

    #[test]
    fn test_add_points() {
        let mut stroke = Stroke::new(Point::new(0.0, 0.0));
        stroke.add_point(Point::new(10.0, 10.0));
        stroke.add_point(Point::new(10.0, 10.0));
        // Duplicates are kept
        assert_eq!(stroke.len(), 3);
    }

    #[test]
    fn test_bounds_with_offset() {
        let mut stroke = Stroke::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 50.0),
            Point::new(50.0, 100.0),
        ]);
        stroke.position = Point::new(10.0, 20.0);

        let bounds = stroke.bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 110.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test() {
        let stroke = Stroke::from_points(vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);

        assert!(stroke.hit_test(Point::new(50.0, 0.0), 5.0));
        assert!(!stroke.hit_test(Point::new(50.0, 20.0), 5.0));
    }

    #[test]
    fn test_single_point_path_is_drawable() {
        let stroke = Stroke::new(Point::new(5.0, 5.0));
        assert_eq!(stroke.to_path().elements().len(), 2);
    }
}
