//! Shape definitions for the canvas.

mod circle;
mod rectangle;
mod stroke;
mod triangle;

pub use circle::Circle;
pub use rectangle::Rectangle;
pub use stroke::Stroke;
pub use triangle::Triangle;

use kurbo::{BezPath, Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid color '{0}': expected #rgb, #rrggbb or #rrggbbaa")]
pub struct ColorParseError(pub String);

/// Serializable color representation (RGBA8).
///
/// Serialized as a CSS-style hex string (`#CCC`, `#cccccc`, `#ccccccff`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    /// Light gray used as the default shape fill (`#CCC`).
    pub fn light_gray() -> Self {
        Self::new(204, 204, 204, 255)
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for SerializableColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.is_ascii() {
            return Err(err());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| err())
        };
        match hex.len() {
            3 => {
                // #rgb -> #rrggbb
                let r = channel(0..1)? * 17;
                let g = channel(1..2)? * 17;
                let b = channel(2..3)? * 17;
                Ok(Self::new(r, g, b, 255))
            }
            6 => Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, 255)),
            8 => Ok(Self::new(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for SerializableColor {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SerializableColor> for String {
    fn from(color: SerializableColor) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for SerializableColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Style properties for shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Fill color (None = no fill).
    pub fill_color: Option<SerializableColor>,
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width.
    pub stroke_width: f64,
}

impl ShapeStyle {
    /// Style for freehand strokes: no fill, thick black line.
    pub fn pen() -> Self {
        Self {
            fill_color: None,
            stroke_color: SerializableColor::black(),
            stroke_width: 5.0,
        }
    }

    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    /// Get the fill color as a peniko Color.
    pub fn fill(&self) -> Option<Color> {
        self.fill_color.map(|c| c.into())
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill_color: Some(SerializableColor::light_gray()),
            stroke_color: SerializableColor::black(),
            stroke_width: 1.0,
        }
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    point.distance(a + seg * t)
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    if let [only] = points {
        return point.distance(*only);
    }
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the unrotated frame of the shape in world coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point (in world coordinates) hits this shape.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Get the path representation for rendering, in world coordinates.
    fn to_path(&self) -> BezPath;

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// The shape's position (its `x`/`y` on the stage).
    fn position(&self) -> Point;

    /// Move the shape so its position becomes `position`.
    fn set_position(&mut self, position: Point);
}

/// Discriminant of [`Shape`], for callers that only care about the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Triangle,
    Stroke,
}

/// Enum wrapper for all shape types (for serialization).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Rectangle(Rectangle),
    Circle(Circle),
    Triangle(Triangle),
    Stroke(Stroke),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Rectangle(s) => s.id(),
            Shape::Circle(s) => s.id(),
            Shape::Triangle(s) => s.id(),
            Shape::Stroke(s) => s.id(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Triangle(_) => ShapeKind::Triangle,
            Shape::Stroke(_) => ShapeKind::Stroke,
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rectangle(s) => s.bounds(),
            Shape::Circle(s) => s.bounds(),
            Shape::Triangle(s) => s.bounds(),
            Shape::Stroke(s) => s.bounds(),
        }
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Shape::Rectangle(s) => s.hit_test(point, tolerance),
            Shape::Circle(s) => s.hit_test(point, tolerance),
            Shape::Triangle(s) => s.hit_test(point, tolerance),
            Shape::Stroke(s) => s.hit_test(point, tolerance),
        }
    }

    pub fn to_path(&self) -> BezPath {
        match self {
            Shape::Rectangle(s) => s.to_path(),
            Shape::Circle(s) => s.to_path(),
            Shape::Triangle(s) => s.to_path(),
            Shape::Stroke(s) => s.to_path(),
        }
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Rectangle(s) => s.style(),
            Shape::Circle(s) => s.style(),
            Shape::Triangle(s) => s.style(),
            Shape::Stroke(s) => s.style(),
        }
    }

    pub fn position(&self) -> Point {
        match self {
            Shape::Rectangle(s) => s.position(),
            Shape::Circle(s) => s.position(),
            Shape::Triangle(s) => s.position(),
            Shape::Stroke(s) => s.position(),
        }
    }

    pub fn set_position(&mut self, position: Point) {
        match self {
            Shape::Rectangle(s) => s.set_position(position),
            Shape::Circle(s) => s.set_position(position),
            Shape::Triangle(s) => s.set_position(position),
            Shape::Stroke(s) => s.set_position(position),
        }
    }

    /// Assign a fresh unique identifier.
    /// Used when a drawn shape is committed to the registry.
    pub fn regenerate_id(&mut self) {
        let new_id = Uuid::new_v4();
        match self {
            Shape::Rectangle(s) => s.id = new_id,
            Shape::Circle(s) => s.id = new_id,
            Shape::Triangle(s) => s.id = new_id,
            Shape::Stroke(s) => s.id = new_id,
        }
    }

    /// Get the rotation angle in radians (0 for shapes that don't support rotation).
    pub fn rotation(&self) -> f64 {
        match self {
            Shape::Rectangle(r) => r.rotation,
            Shape::Triangle(t) => t.rotation,
            _ => 0.0,
        }
    }

    /// Set the rotation angle in radians. Ignored by shapes without rotation.
    pub fn set_rotation(&mut self, rotation: f64) {
        match self {
            Shape::Rectangle(r) => r.rotation = rotation,
            Shape::Triangle(t) => t.rotation = rotation,
            _ => {}
        }
    }

    /// Check if this shape supports rotation.
    pub fn supports_rotation(&self) -> bool {
        matches!(self, Shape::Rectangle(_) | Shape::Triangle(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_hex() {
        let color: SerializableColor = "#CCC".parse().unwrap();
        assert_eq!(color, SerializableColor::light_gray());
        let color: SerializableColor = "#000".parse().unwrap();
        assert_eq!(color, SerializableColor::black());
    }

    #[test]
    fn test_parse_long_hex() {
        let color: SerializableColor = "#3b82f6".parse().unwrap();
        assert_eq!(color, SerializableColor::new(59, 130, 246, 255));
        let color: SerializableColor = "#3b82f680".parse().unwrap();
        assert_eq!(color.a, 128);
    }

    #[test]
    fn test_parse_invalid() {
        assert!("CCC".parse::<SerializableColor>().is_err());
        assert!("#CC".parse::<SerializableColor>().is_err());
        assert!("#GGG".parse::<SerializableColor>().is_err());
        assert!("#ééé".parse::<SerializableColor>().is_err());
    }

    #[test]
    fn test_color_serializes_as_hex() {
        let json = serde_json::to_string(&SerializableColor::light_gray()).unwrap();
        assert_eq!(json, "\"#cccccc\"");
        let back: SerializableColor = serde_json::from_str("\"#CCC\"").unwrap();
        assert_eq!(back, SerializableColor::light_gray());
    }

    #[test]
    fn test_peniko_conversion() {
        let color: Color = SerializableColor::new(10, 20, 30, 255).into();
        let back: SerializableColor = color.into();
        assert_eq!(back, SerializableColor::new(10, 20, 30, 255));
    }

    #[test]
    fn test_default_style() {
        let style = ShapeStyle::default();
        assert_eq!(style.fill_color, Some(SerializableColor::light_gray()));
        assert_eq!(style.stroke_color, SerializableColor::black());
        assert!(ShapeStyle::pen().fill_color.is_none());
    }

    #[test]
    fn test_polyline_distance_single_point() {
        let d = point_to_polyline_dist(Point::new(3.0, 4.0), &[Point::ZERO]);
        assert!((d - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shape_tagged_serialization() {
        let shape = Shape::Circle(Circle::new(Point::new(1.0, 2.0), 3.0));
        let json = serde_json::to_value(&shape).unwrap();
        assert_eq!(json["type"], "circle");
        assert_eq!(json["radius"], 3.0);
    }
}
