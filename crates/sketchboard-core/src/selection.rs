//! Selection handles and shape manipulation (move, resize, rotate).

use crate::shapes::{Shape, ShapeId, Stroke};
use kurbo::{Affine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// Distance from the top edge to the rotation handle (in world units).
pub const ROTATE_HANDLE_OFFSET: f64 = 25.0;

/// Smallest frame side a resize can produce.
const MIN_SIZE: f64 = 1.0;

/// Type of selection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// Corner handle for resizing.
    Corner(Corner),
    /// Rotation handle (positioned above the shape).
    Rotate,
}

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// The diagonally opposite corner, which stays fixed during a resize.
    pub fn opposite(self) -> Self {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomLeft => Corner::TopRight,
            Corner::BottomRight => Corner::TopLeft,
        }
    }

    /// Position of this corner on a rectangle.
    pub fn of(self, rect: Rect) -> Point {
        match self {
            Corner::TopLeft => Point::new(rect.x0, rect.y0),
            Corner::TopRight => Point::new(rect.x1, rect.y0),
            Corner::BottomLeft => Point::new(rect.x0, rect.y1),
            Corner::BottomRight => Point::new(rect.x1, rect.y1),
        }
    }
}

/// A selection handle with its position and type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Position in world coordinates.
    pub position: Point,
    /// Handle type.
    pub kind: HandleKind,
}

impl Handle {
    /// Create a new handle.
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a point (in world coordinates) hits this handle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }
}

/// Get the transform handles for a shape.
///
/// Rectangles and triangles get four corners plus rotation; circles and
/// strokes get four corners only.
pub fn get_handles(shape: &Shape) -> Vec<Handle> {
    frame_handles(shape.bounds(), shape.rotation(), shape.supports_rotation())
}

/// Corner handles for a frame rotated about its center, optionally with a
/// rotation handle above the top edge.
pub fn frame_handles(bounds: Rect, rotation: f64, rotatable: bool) -> Vec<Handle> {
    let center = bounds.center();
    let half_w = bounds.width() / 2.0;
    let half_h = bounds.height() / 2.0;
    let (sin_r, cos_r) = rotation.sin_cos();

    let rotate_point = |dx: f64, dy: f64| -> Point {
        Point::new(
            center.x + dx * cos_r - dy * sin_r,
            center.y + dx * sin_r + dy * cos_r,
        )
    };

    let mut handles = vec![
        Handle::new(rotate_point(-half_w, -half_h), HandleKind::Corner(Corner::TopLeft)),
        Handle::new(rotate_point(half_w, -half_h), HandleKind::Corner(Corner::TopRight)),
        Handle::new(rotate_point(-half_w, half_h), HandleKind::Corner(Corner::BottomLeft)),
        Handle::new(rotate_point(half_w, half_h), HandleKind::Corner(Corner::BottomRight)),
    ];
    if rotatable {
        handles.push(Handle::new(
            rotate_point(0.0, -half_h - ROTATE_HANDLE_OFFSET),
            HandleKind::Rotate,
        ));
    }
    handles
}

/// Find which handle (if any) is hit at the given point.
pub fn hit_test_handles(handles: &[Handle], point: Point, tolerance: f64) -> Option<HandleKind> {
    handles
        .iter()
        .find(|handle| handle.hit_test(point, tolerance))
        .map(|handle| handle.kind)
}

/// What a manipulation acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManipulationTarget {
    /// A committed shape.
    Shape(ShapeId),
    /// The image overlay.
    Overlay,
}

/// State of an active drag on a shape or the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct ManipulationState {
    /// What is being manipulated.
    pub target: ManipulationTarget,
    /// The handle being dragged (None = moving the whole item).
    pub handle: Option<HandleKind>,
    /// Starting point of the drag.
    pub start_point: Point,
    /// Current point of the drag.
    pub current_point: Point,
}

impl ManipulationState {
    /// Create a new manipulation state.
    pub fn new(target: ManipulationTarget, handle: Option<HandleKind>, start_point: Point) -> Self {
        Self {
            target,
            handle,
            start_point,
            current_point: start_point,
        }
    }

    /// Get the drag delta.
    pub fn delta(&self) -> Vec2 {
        self.current_point - self.start_point
    }

    /// Whether the pointer moved at all since the drag started.
    pub fn has_moved(&self) -> bool {
        self.delta().hypot2() > 0.0
    }
}

/// Resize a frame by dragging `corner` by `delta`, keeping the opposite corner fixed.
///
/// The result is normalized; dragging past the fixed corner flips the frame
/// to the other side rather than inverting it.
pub fn resize_frame(bounds: Rect, corner: Corner, delta: Vec2, keep_aspect_ratio: bool) -> Rect {
    let fixed = corner.opposite().of(bounds);
    let moved = corner.of(bounds) + delta;
    let d = moved - fixed;

    let (width, height) = if keep_aspect_ratio {
        let aspect = bounds.width().max(0.1) / bounds.height().max(0.1);
        let width = d.x.abs().max(d.y.abs() * aspect).max(MIN_SIZE);
        (width, width / aspect)
    } else {
        (d.x.abs().max(MIN_SIZE), d.y.abs().max(MIN_SIZE))
    };

    Rect::from_points(fixed, fixed + Vec2::new(width.copysign(d.x), height.copysign(d.y)))
}

/// Resize a frame rotated by `rotation` about its center.
///
/// `delta` is in world coordinates. It is turned into the frame's local axes
/// before resizing, and the result is shifted so the opposite corner stays
/// where it was on screen.
pub fn resize_rotated_frame(
    bounds: Rect,
    rotation: f64,
    corner: Corner,
    delta: Vec2,
    keep_aspect_ratio: bool,
) -> Rect {
    if rotation == 0.0 {
        return resize_frame(bounds, corner, delta, keep_aspect_ratio);
    }
    let (sin_r, cos_r) = rotation.sin_cos();
    let local_delta = Vec2::new(delta.x * cos_r + delta.y * sin_r, delta.y * cos_r - delta.x * sin_r);
    let frame = resize_frame(bounds, corner, local_delta, keep_aspect_ratio);

    // The fixed corner is a corner of both frames in local coordinates
    let fixed = corner.opposite().of(bounds);
    let before = Affine::rotate_about(rotation, bounds.center()) * fixed;
    let after = Affine::rotate_about(rotation, frame.center()) * fixed;
    frame + (before - after)
}

/// Apply a handle manipulation to a shape.
/// Returns the modified shape.
/// `keep_aspect_ratio`: if true, maintains aspect ratio during corner resize.
pub fn apply_manipulation(
    shape: &Shape,
    handle: Option<HandleKind>,
    delta: Vec2,
    keep_aspect_ratio: bool,
) -> Shape {
    let mut shape = shape.clone();

    match handle {
        None => {
            let position = shape.position() + delta;
            shape.set_position(position);
        }
        Some(HandleKind::Corner(corner)) => {
            let bounds = shape.bounds();
            let rotation = shape.rotation();
            match &mut shape {
                Shape::Rectangle(rect) => {
                    let frame = resize_rotated_frame(bounds, rotation, corner, delta, keep_aspect_ratio);
                    rect.position = Point::new(frame.x0, frame.y0);
                    rect.width = frame.width();
                    rect.height = frame.height();
                }
                Shape::Circle(circle) => {
                    // Circles stay round
                    let frame = resize_frame(bounds, corner, delta, true);
                    circle.position = frame.center();
                    circle.radius = frame.width() / 2.0;
                }
                Shape::Triangle(triangle) => {
                    let frame = resize_rotated_frame(bounds, rotation, corner, delta, true);
                    triangle.position = frame.center();
                    triangle.set_radius(frame.width() / 2.0);
                }
                Shape::Stroke(stroke) => {
                    let frame = resize_frame(bounds, corner, delta, keep_aspect_ratio);
                    scale_stroke(stroke, bounds, frame);
                }
            }
        }
        Some(HandleKind::Rotate) => {
            // Rotation is handled separately via apply_rotation
        }
    }

    shape
}

/// Map a stroke's points from its current bounds onto a new frame.
fn scale_stroke(stroke: &mut Stroke, bounds: Rect, frame: Rect) {
    let scale_x = frame.width() / bounds.width().max(MIN_SIZE);
    let scale_y = frame.height() / bounds.height().max(MIN_SIZE);
    let offset = stroke.position.to_vec2();

    for point in &mut stroke.points {
        let world = *point + offset;
        let scaled = Point::new(
            frame.x0 + (world.x - bounds.x0) * scale_x,
            frame.y0 + (world.y - bounds.y0) * scale_y,
        );
        *point = scaled - offset;
    }
}

/// Angle that points the rotation handle of a frame centered at `center` toward `cursor`.
/// `snap_to_15deg`: if true, snap to 15° increments.
pub fn rotation_towards(center: Point, cursor: Point, snap_to_15deg: bool) -> f64 {
    let dx = cursor.x - center.x;
    let dy = cursor.y - center.y;
    // Offset so 0 points up
    let mut angle = dy.atan2(dx) + FRAC_PI_2;

    if snap_to_15deg {
        let snap_angle = PI / 12.0;
        angle = (angle / snap_angle).round() * snap_angle;
    }
    angle
}

/// Apply rotation to a shape, returning the new angle in radians.
/// Shapes that don't rotate are left unchanged and report 0.
pub fn apply_rotation(shape: &mut Shape, cursor: Point, snap_to_15deg: bool) -> f64 {
    if !shape.supports_rotation() {
        return 0.0;
    }
    let angle = rotation_towards(shape.bounds().center(), cursor, snap_to_15deg);
    shape.set_rotation(angle);
    angle
}
