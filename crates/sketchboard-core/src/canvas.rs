//! Canvas state and the named actions that mutate it.

use crate::config::CanvasConfig;
use crate::overlay::{ImageFile, ImageOverlay, OverlayError};
use crate::registry::ShapeRegistry;
use crate::selection::{Corner, HandleKind, apply_manipulation, apply_rotation};
use crate::shapes::{Circle, Rectangle, Shape, ShapeId, Stroke, Triangle};
use crate::tools::ToolKind;
use kurbo::{Point, Vec2};

/// Tool and selection state of the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionState {
    /// Active tool.
    pub tool: ToolKind,
    /// True between pointer-down and pointer-up of a drawing gesture.
    pub is_drawing: bool,
    /// Currently selected shape.
    pub selected: Option<ShapeId>,
}

/// The canvas: committed shapes, interaction state and the image overlay.
///
/// All mutation goes through the action methods below.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    registry: ShapeRegistry,
    interaction: InteractionState,
    overlay: ImageOverlay,
    config: CanvasConfig,
}

impl Canvas {
    /// Create an empty canvas with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty canvas with the given configuration.
    pub fn with_config(config: CanvasConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    pub fn overlay(&self) -> &ImageOverlay {
        &self.overlay
    }

    /// Mutable access for overlay transforms.
    pub fn overlay_mut(&mut self) -> &mut ImageOverlay {
        &mut self.overlay
    }

    pub fn tool(&self) -> ToolKind {
        self.interaction.tool
    }

    pub fn is_drawing(&self) -> bool {
        self.interaction.is_drawing
    }

    pub fn selected(&self) -> Option<ShapeId> {
        self.interaction.selected
    }

    // --- Tool/interaction actions ---

    pub fn select_tool(&mut self, tool: ToolKind) {
        if self.interaction.tool != tool {
            log::debug!("Tool changed: {:?} -> {:?}", self.interaction.tool, tool);
        }
        self.interaction.tool = tool;
    }

    pub fn set_is_drawing(&mut self, is_drawing: bool) {
        self.interaction.is_drawing = is_drawing;
    }

    /// Select a shape, replacing any previous selection.
    /// Returns false (and keeps the current selection) if the ID is unknown.
    pub fn select_shape(&mut self, id: ShapeId) -> bool {
        if !self.registry.contains(id) {
            return false;
        }
        self.interaction.selected = Some(id);
        true
    }

    pub fn clear_selection(&mut self) {
        self.interaction.selected = None;
    }

    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.interaction.selected == Some(id)
    }

    // --- Shape actions ---

    /// Move a shape's position to `(x, y)`.
    /// Unknown IDs are ignored and return false.
    pub fn move_shape(&mut self, id: ShapeId, x: f64, y: f64) -> bool {
        match self.registry.get_mut(id) {
            Some(shape) => {
                shape.set_position(Point::new(x, y));
                true
            }
            None => {
                log::trace!("move_shape: no shape {id}");
                false
            }
        }
    }

    /// Resize a shape by dragging one of its corner handles.
    pub fn resize_shape(&mut self, id: ShapeId, corner: Corner, delta: Vec2, keep_aspect_ratio: bool) -> bool {
        let Some(shape) = self.registry.get(id) else {
            return false;
        };
        let resized = apply_manipulation(shape, Some(HandleKind::Corner(corner)), delta, keep_aspect_ratio);
        self.registry.update(resized)
    }

    /// Rotate a shape so its rotation handle points at `cursor`.
    /// Returns the new angle, or None for unknown IDs.
    pub fn rotate_shape(&mut self, id: ShapeId, cursor: Point, snap_to_15deg: bool) -> Option<f64> {
        let shape = self.registry.get_mut(id)?;
        Some(apply_rotation(shape, cursor, snap_to_15deg))
    }

    pub fn create_rectangle(&mut self, rect: Rectangle) -> ShapeId {
        self.insert(Shape::Rectangle(rect))
    }

    pub fn create_circle(&mut self, circle: Circle) -> ShapeId {
        self.insert(Shape::Circle(circle))
    }

    pub fn create_triangle(&mut self, triangle: Triangle) -> ShapeId {
        self.insert(Shape::Triangle(triangle))
    }

    pub fn create_pen(&mut self, stroke: Stroke) -> ShapeId {
        self.insert(Shape::Stroke(stroke))
    }

    fn insert(&mut self, shape: Shape) -> ShapeId {
        let kind = shape.kind();
        let id = self.registry.insert(shape);
        log::debug!("Committed {kind:?} {id}");
        id
    }

    /// Remove every shape and restore the default interaction state.
    /// The image overlay is left alone; see [`Canvas::clear_image`].
    pub fn reset(&mut self) {
        log::debug!("Canvas reset ({} shapes removed)", self.registry.len());
        self.registry.clear();
        self.interaction = InteractionState::default();
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.registry.get(id)
    }

    /// Shapes in draw order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.registry.shapes_ordered()
    }

    /// Front-most shape under `point`.
    pub fn shape_at(&self, point: Point) -> Option<ShapeId> {
        self.registry.topmost_at_point(point, self.config.hit_tolerance)
    }

    // --- Overlay actions ---

    /// Load the first of the picked files as the overlay image.
    pub fn upload_image(&mut self, files: &[ImageFile]) -> Result<bool, OverlayError> {
        self.overlay.load_files(files, &self.config)
    }

    /// Mark the overlay as selected for transforming.
    pub fn select_image(&mut self) -> bool {
        self.overlay.select()
    }

    pub fn deselect_image(&mut self) {
        self.overlay.deselect();
    }

    pub fn clear_image(&mut self) {
        self.overlay.clear();
    }

    /// Overlay hit test with the configured tolerance.
    pub fn image_at(&self, point: Point) -> bool {
        self.overlay.hit_test(point, self.config.hit_tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas_with_rect() -> (Canvas, ShapeId) {
        let mut canvas = Canvas::new();
        let id = canvas.create_rectangle(Rectangle::new(Point::new(10.0, 10.0), 40.0, 20.0));
        (canvas, id)
    }

    #[test]
    fn test_defaults() {
        let canvas = Canvas::new();
        assert_eq!(canvas.tool(), ToolKind::Select);
        assert!(!canvas.is_drawing());
        assert!(canvas.selected().is_none());
        assert!(canvas.registry().is_empty());
    }

    #[test]
    fn test_select_is_exclusive() {
        let (mut canvas, a) = canvas_with_rect();
        let b = canvas.create_circle(Circle::new(Point::ZERO, 5.0));

        assert!(canvas.select_shape(a));
        assert!(canvas.select_shape(b));
        assert!(canvas.is_selected(b));
        assert!(!canvas.is_selected(a));

        canvas.clear_selection();
        assert!(canvas.selected().is_none());
    }

    #[test]
    fn test_select_unknown_keeps_selection() {
        let (mut canvas, a) = canvas_with_rect();
        canvas.select_shape(a);
        assert!(!canvas.select_shape(uuid::Uuid::new_v4()));
        assert_eq!(canvas.selected(), Some(a));
    }

    #[test]
    fn test_move_shape() {
        let (mut canvas, id) = canvas_with_rect();
        assert!(canvas.move_shape(id, 100.0, 200.0));
        assert_eq!(canvas.shape(id).map(Shape::position), Some(Point::new(100.0, 200.0)));
    }

    #[test]
    fn test_move_unknown_is_noop() {
        let (mut canvas, id) = canvas_with_rect();
        let before: Vec<Shape> = canvas.shapes_ordered().cloned().collect();
        assert!(!canvas.move_shape(uuid::Uuid::new_v4(), 1.0, 1.0));
        let after: Vec<Shape> = canvas.shapes_ordered().cloned().collect();
        assert_eq!(before, after);
        assert!(canvas.shape(id).is_some());
    }

    #[test]
    fn test_create_keeps_fields_verbatim() {
        let mut canvas = Canvas::new();
        let mut rect = Rectangle::new(Point::new(50.0, 30.0), -40.0, -20.0);
        rect.rotation = 0.5;
        let id = canvas.create_rectangle(rect);
        let Some(Shape::Rectangle(stored)) = canvas.shape(id) else {
            panic!("Expected Rectangle");
        };
        assert!((stored.width + 40.0).abs() < f64::EPSILON);
        assert!((stored.height + 20.0).abs() < f64::EPSILON);
        assert!((stored.rotation - 0.5).abs() < f64::EPSILON);
        assert_eq!(stored.id, id);
    }

    #[test]
    fn test_resize_and_rotate() {
        let (mut canvas, id) = canvas_with_rect();
        assert!(canvas.resize_shape(id, Corner::BottomRight, Vec2::new(10.0, 10.0), false));
        assert_eq!(canvas.shape(id).map(Shape::bounds), Some(kurbo::Rect::new(10.0, 10.0, 60.0, 40.0)));

        let angle = canvas.rotate_shape(id, Point::new(200.0, 25.0), false).unwrap();
        assert!((angle - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
        assert!(canvas.rotate_shape(uuid::Uuid::new_v4(), Point::ZERO, false).is_none());
        assert!(!canvas.resize_shape(uuid::Uuid::new_v4(), Corner::TopLeft, Vec2::ZERO, false));
    }

    #[test]
    fn test_reset() {
        let (mut canvas, id) = canvas_with_rect();
        canvas.select_shape(id);
        canvas.select_tool(ToolKind::Pen);
        canvas.set_is_drawing(true);

        canvas.reset();

        assert!(canvas.registry().is_empty());
        assert_eq!(canvas.interaction(), InteractionState::default());
    }

    #[test]
    fn test_shape_at_prefers_front() {
        let (mut canvas, back) = canvas_with_rect();
        let front = canvas.create_rectangle(Rectangle::new(Point::new(20.0, 15.0), 10.0, 10.0));
        assert_eq!(canvas.shape_at(Point::new(25.0, 20.0)), Some(front));
        assert_eq!(canvas.shape_at(Point::new(12.0, 12.0)), Some(back));
        assert_eq!(canvas.shape_at(Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn test_select_image_without_image() {
        let mut canvas = Canvas::new();
        assert!(!canvas.select_image());
        assert!(!canvas.upload_image(&[]).unwrap());
    }
}
