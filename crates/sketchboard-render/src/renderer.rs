//! Renderer trait abstraction.

use kurbo::Size;
use peniko::Color;
use sketchboard_core::canvas::Canvas;
use sketchboard_core::gesture::GestureHandler;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// In-progress gesture, for drawing and drag previews.
    pub gestures: Option<&'a GestureHandler>,
    /// Viewport size in pixels.
    pub viewport_size: Size,
    /// Background color.
    pub background_color: Color,
    /// Selection highlight color.
    pub selection_color: Color,
    /// Side length of a transform handle.
    pub handle_size: f64,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(canvas: &'a Canvas, viewport_size: Size) -> Self {
        Self {
            canvas,
            gestures: None,
            viewport_size,
            background_color: Color::from_rgba8(255, 255, 255, 255),
            selection_color: Color::from_rgba8(0, 161, 255, 255), // Blue
            handle_size: 10.0,
        }
    }

    /// Context sized to the canvas's configured stage.
    pub fn for_stage(canvas: &'a Canvas) -> Self {
        let config = canvas.config();
        Self::new(canvas, Size::new(config.stage_width, config.stage_height))
    }

    /// Include the previews of an in-progress gesture.
    pub fn with_gestures(mut self, gestures: &'a GestureHandler) -> Self {
        self.gestures = Some(gestures);
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the output for a frame from scratch.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
