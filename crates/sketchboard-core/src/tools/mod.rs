//! Tool system: the available tools and the in-progress drawing buffer.

use crate::config::CanvasConfig;
use crate::shapes::{Circle, Rectangle, Shape, ShapeStyle, Stroke, Triangle};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// No tool active.
    None,
    /// Select, move and transform existing shapes.
    #[default]
    Select,
    Rectangle,
    Circle,
    Triangle,
    /// Freehand pen.
    Pen,
}

impl ToolKind {
    /// Whether a pointer-down with this tool starts a drawing gesture.
    pub fn starts_drawing(self) -> bool {
        self != ToolKind::Select
    }

    /// Whether this tool produces a shape.
    pub fn creates_shape(self) -> bool {
        matches!(
            self,
            ToolKind::Rectangle | ToolKind::Circle | ToolKind::Triangle | ToolKind::Pen
        )
    }
}

/// The single in-progress shape of a drawing gesture.
///
/// Lives only between pointer-down and pointer-up; the shape it holds has
/// not been assigned a registry identifier yet.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingBuffer {
    /// Tool that started the gesture.
    tool: ToolKind,
    /// Pointer position at pointer-down.
    anchor: Point,
    /// Shape being drawn.
    shape: Shape,
}

impl DrawingBuffer {
    /// Initial rectangle size.
    pub const RECT_SIZE: f64 = 1.0;
    /// Initial circle radius.
    pub const CIRCLE_RADIUS: f64 = 2.0;
    /// Initial triangle circumradius.
    pub const TRIANGLE_RADIUS: f64 = 1.0;

    /// Start a buffer for `tool` anchored at `anchor`.
    /// Returns None for tools that don't draw.
    pub fn begin(tool: ToolKind, anchor: Point, config: &CanvasConfig) -> Option<Self> {
        let shape_style = ShapeStyle {
            fill_color: Some(config.fill_color),
            stroke_color: config.stroke_color,
            stroke_width: config.stroke_width,
        };
        let shape = match tool {
            ToolKind::Rectangle => {
                let mut rect = Rectangle::new(anchor, Self::RECT_SIZE, Self::RECT_SIZE);
                rect.style = shape_style;
                Shape::Rectangle(rect)
            }
            ToolKind::Circle => {
                let mut circle = Circle::new(anchor, Self::CIRCLE_RADIUS);
                circle.style = shape_style;
                Shape::Circle(circle)
            }
            ToolKind::Triangle => {
                let mut triangle = Triangle::new(anchor, Self::TRIANGLE_RADIUS);
                triangle.style = shape_style;
                Shape::Triangle(triangle)
            }
            ToolKind::Pen => {
                let mut stroke = Stroke::new(anchor);
                stroke.style = ShapeStyle {
                    fill_color: None,
                    stroke_color: config.stroke_color,
                    stroke_width: config.pen_stroke_width,
                };
                Shape::Stroke(stroke)
            }
            ToolKind::Select | ToolKind::None => return None,
        };
        Some(Self { tool, anchor, shape })
    }

    /// Recompute the buffered geometry for the current pointer position.
    pub fn update(&mut self, current: Point) {
        let anchor = self.anchor;
        match &mut self.shape {
            Shape::Rectangle(rect) => {
                // Signed: dragging up/left flips the rectangle
                rect.width = current.x - anchor.x;
                rect.height = current.y - anchor.y;
            }
            Shape::Circle(circle) => {
                circle.radius = anchor.distance(current);
            }
            Shape::Triangle(triangle) => {
                triangle.set_radius(anchor.distance(current));
            }
            Shape::Stroke(stroke) => {
                stroke.add_point(current);
            }
        }
    }

    /// Tool that started the gesture.
    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Pointer position at pointer-down.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// The shape as drawn so far.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Consume the buffer, yielding the shape to commit.
    pub fn into_shape(self) -> Shape {
        self.shape
    }
}
