//! Gesture handling: turns pointer events into drawing and transform actions.

use crate::canvas::Canvas;
use crate::input::{Modifiers, PointerEvent};
use crate::overlay::{ImageOverlay, OverlayImage};
use crate::selection::{
    HandleKind, ManipulationState, ManipulationTarget, apply_manipulation, apply_rotation, get_handles,
    hit_test_handles,
};
use crate::shapes::{Shape, ShapeId};
use crate::tools::DrawingBuffer;
use kurbo::Point;

/// Drives a [`Canvas`] from pointer events.
///
/// Holds the transient state of the current gesture: at most one drawing
/// buffer, or one manipulation of a committed shape or the overlay.
#[derive(Debug, Clone, Default)]
pub struct GestureHandler {
    buffer: Option<DrawingBuffer>,
    manipulation: Option<ManipulationState>,
    modifiers: Modifiers,
}

impl GestureHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch a pointer event. Returns the ID of a shape committed by it.
    pub fn handle_event(&mut self, canvas: &mut Canvas, event: PointerEvent) -> Option<ShapeId> {
        match event {
            PointerEvent::Down { position, modifiers } => {
                self.pointer_down(canvas, position, modifiers);
                None
            }
            PointerEvent::Move { position } => {
                self.pointer_move(canvas, position);
                None
            }
            PointerEvent::Up { position, modifiers } => self.pointer_up(canvas, position, modifiers),
            PointerEvent::Click { position } => {
                self.click(canvas, position);
                None
            }
        }
    }

    pub fn pointer_down(&mut self, canvas: &mut Canvas, position: Point, modifiers: Modifiers) {
        self.modifiers = modifiers;
        if let Some(stale) = self.buffer.take() {
            log::debug!("Discarding unfinished {:?} buffer", stale.tool());
        }
        self.manipulation = None;

        let tool = canvas.tool();
        if !tool.starts_drawing() {
            self.begin_manipulation(canvas, position);
            return;
        }

        canvas.set_is_drawing(true);
        self.buffer = DrawingBuffer::begin(tool, position, canvas.config());
        if self.buffer.is_some() {
            log::trace!("Started {tool:?} at ({}, {})", position.x, position.y);
        }
    }

    pub fn pointer_move(&mut self, canvas: &mut Canvas, position: Point) {
        if let Some(manipulation) = &mut self.manipulation {
            manipulation.current_point = position;
            return;
        }
        if !canvas.is_drawing() {
            return;
        }
        if self.discard_if_stale(canvas) {
            return;
        }
        if let Some(buffer) = &mut self.buffer {
            buffer.update(position);
            log::trace!("Updated {:?} buffer to ({}, {})", buffer.tool(), position.x, position.y);
        }
    }

    /// Finish the gesture. Returns the ID of the committed shape, if any.
    pub fn pointer_up(&mut self, canvas: &mut Canvas, position: Point, modifiers: Modifiers) -> Option<ShapeId> {
        self.modifiers = modifiers;
        if let Some(mut manipulation) = self.manipulation.take() {
            manipulation.current_point = position;
            self.commit_manipulation(canvas, &manipulation);
            return None;
        }

        let was_drawing = canvas.is_drawing();
        canvas.set_is_drawing(false);
        if !was_drawing {
            // The canvas was reset mid-gesture
            if let Some(buffer) = self.buffer.take() {
                log::debug!("Discarding {:?} buffer, canvas is no longer drawing", buffer.tool());
            }
            return None;
        }
        if self.discard_if_stale(canvas) {
            return None;
        }
        let buffer = self.buffer.take()?;
        let id = match buffer.into_shape() {
            Shape::Rectangle(rect) => canvas.create_rectangle(rect),
            Shape::Circle(circle) => canvas.create_circle(circle),
            Shape::Triangle(triangle) => canvas.create_triangle(triangle),
            Shape::Stroke(stroke) => canvas.create_pen(stroke),
        };
        Some(id)
    }

    /// Resolve a click: the front-most shape wins, then the overlay, and a
    /// click on empty canvas clears both selections.
    pub fn click(&mut self, canvas: &mut Canvas, position: Point) {
        if let Some(id) = canvas.shape_at(position) {
            canvas.select_shape(id);
        } else if canvas.image_at(position) {
            canvas.select_image();
        } else {
            canvas.clear_selection();
            canvas.deselect_image();
        }
    }

    /// Shape being drawn, for live preview.
    pub fn preview(&self) -> Option<&Shape> {
        self.buffer.as_ref().map(DrawingBuffer::shape)
    }

    /// Committed shape as it would look if the current drag ended here.
    pub fn manipulation_preview(&self, canvas: &Canvas) -> Option<Shape> {
        let manipulation = self.manipulation.as_ref()?;
        let ManipulationTarget::Shape(id) = manipulation.target else {
            return None;
        };
        let shape = canvas.shape(id)?;
        Some(match manipulation.handle {
            Some(HandleKind::Rotate) => {
                let mut shape = shape.clone();
                apply_rotation(&mut shape, manipulation.current_point, self.modifiers.shift);
                shape
            }
            handle => apply_manipulation(shape, handle, manipulation.delta(), self.modifiers.shift),
        })
    }

    /// Overlay image as it would look if the current drag ended here.
    pub fn overlay_preview(&self, canvas: &Canvas) -> Option<OverlayImage> {
        let manipulation = self.manipulation.as_ref()?;
        if manipulation.target != ManipulationTarget::Overlay {
            return None;
        }
        let mut overlay = canvas.overlay().clone();
        apply_to_overlay(&mut overlay, manipulation, self.modifiers.shift);
        overlay.image().cloned()
    }

    pub fn manipulation(&self) -> Option<&ManipulationState> {
        self.manipulation.as_ref()
    }

    pub fn has_buffer(&self) -> bool {
        self.buffer.is_some()
    }

    /// No gesture in progress.
    pub fn is_idle(&self) -> bool {
        self.buffer.is_none() && self.manipulation.is_none()
    }

    fn discard_if_stale(&mut self, canvas: &Canvas) -> bool {
        let stale = self
            .buffer
            .as_ref()
            .is_some_and(|buffer| buffer.tool() != canvas.tool());
        if stale {
            if let Some(buffer) = self.buffer.take() {
                log::debug!(
                    "Discarding {:?} buffer after switch to {:?}",
                    buffer.tool(),
                    canvas.tool()
                );
            }
        }
        stale
    }

    fn begin_manipulation(&mut self, canvas: &mut Canvas, position: Point) {
        if canvas.is_drawing() {
            log::trace!("Ignoring drag while drawing");
            return;
        }
        let tolerance = canvas.config().handle_tolerance;

        // Handles of the current selection take priority over shape bodies
        if let Some(id) = canvas.selected() {
            if let Some(shape) = canvas.shape(id) {
                if let Some(kind) = hit_test_handles(&get_handles(shape), position, tolerance) {
                    self.start(ManipulationTarget::Shape(id), Some(kind), position);
                    return;
                }
            }
        }
        if let Some(kind) = hit_test_handles(&canvas.overlay().handles(), position, tolerance) {
            self.start(ManipulationTarget::Overlay, Some(kind), position);
            return;
        }

        if let Some(id) = canvas.shape_at(position) {
            canvas.select_shape(id);
            self.start(ManipulationTarget::Shape(id), None, position);
        } else if canvas.image_at(position) {
            canvas.select_image();
            self.start(ManipulationTarget::Overlay, None, position);
        }
    }

    fn start(&mut self, target: ManipulationTarget, handle: Option<HandleKind>, position: Point) {
        log::trace!("Begin {handle:?} on {target:?}");
        self.manipulation = Some(ManipulationState::new(target, handle, position));
    }

    fn commit_manipulation(&self, canvas: &mut Canvas, manipulation: &ManipulationState) {
        let keep_aspect_ratio = self.modifiers.shift;
        match manipulation.target {
            ManipulationTarget::Shape(id) => match manipulation.handle {
                None => {
                    if !manipulation.has_moved() {
                        return;
                    }
                    if let Some(position) = canvas.shape(id).map(|s| s.position() + manipulation.delta()) {
                        canvas.move_shape(id, position.x, position.y);
                    }
                }
                Some(HandleKind::Corner(corner)) => {
                    canvas.resize_shape(id, corner, manipulation.delta(), keep_aspect_ratio);
                }
                Some(HandleKind::Rotate) => {
                    canvas.rotate_shape(id, manipulation.current_point, keep_aspect_ratio);
                }
            },
            ManipulationTarget::Overlay => {
                apply_to_overlay(canvas.overlay_mut(), manipulation, keep_aspect_ratio);
            }
        }
    }
}

fn apply_to_overlay(overlay: &mut ImageOverlay, manipulation: &ManipulationState, shift: bool) {
    match manipulation.handle {
        None => {
            if let Some(position) = overlay.image().map(|image| image.position + manipulation.delta()) {
                overlay.move_to(position);
            }
        }
        Some(HandleKind::Corner(corner)) => {
            overlay.resize(corner, manipulation.delta(), shift);
        }
        Some(HandleKind::Rotate) => {
            overlay.rotate(manipulation.current_point, shift);
        }
    }
}
