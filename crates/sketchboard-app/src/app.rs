//! Application state: a canvas, its gesture handler and the UI action dispatch.

use crate::ui::{Script, UiAction};
use sketchboard_core::canvas::Canvas;
use sketchboard_core::config::CanvasConfig;
use sketchboard_core::gesture::GestureHandler;
use sketchboard_core::overlay::ImageFile;
use sketchboard_render::{RenderContext, Renderer, SvgRenderer};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid script: {0}")]
    Script(#[from] serde_json::Error),
}

/// The headless application.
#[derive(Debug, Default)]
pub struct App {
    canvas: Canvas,
    gestures: GestureHandler,
}

impl App {
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            canvas: Canvas::with_config(config),
            gestures: GestureHandler::new(),
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn gestures(&self) -> &GestureHandler {
        &self.gestures
    }

    /// Apply a single UI action.
    ///
    /// A rejected image upload leaves the canvas unchanged and is not an
    /// error; only files that can't be read are.
    pub fn apply(&mut self, action: &UiAction) -> Result<(), AppError> {
        if let Some(event) = action.pointer_event() {
            if let Some(id) = self.gestures.handle_event(&mut self.canvas, event) {
                log::info!("Created shape {id}");
            }
            return Ok(());
        }

        match action {
            UiAction::SelectTool { tool } => self.canvas.select_tool(*tool),
            UiAction::UploadImage { paths } => {
                let files = paths.iter().map(|p| read_image(p)).collect::<Result<Vec<_>, _>>()?;
                if let Err(e) = self.canvas.upload_image(&files) {
                    log::warn!("Image upload ignored: {e}");
                }
            }
            UiAction::TransformImage => {
                if !self.canvas.select_image() {
                    log::warn!("No image to transform");
                }
            }
            UiAction::Clear => {
                self.canvas.reset();
                log::info!("Canvas cleared");
            }
            UiAction::ClearImage => self.canvas.clear_image(),
            UiAction::PointerDown { .. }
            | UiAction::PointerMove { .. }
            | UiAction::PointerUp { .. }
            | UiAction::Click { .. } => {}
        }
        Ok(())
    }

    /// Apply every action of a script in order.
    pub fn run_script(&mut self, script: &Script) -> Result<(), AppError> {
        log::debug!("Replaying {} actions", script.actions.len());
        for action in &script.actions {
            self.apply(action)?;
        }
        Ok(())
    }

    /// Render the current frame, including any in-progress gesture.
    pub fn render_svg(&self) -> String {
        let mut renderer = SvgRenderer::new();
        let ctx = RenderContext::for_stage(&self.canvas).with_gestures(&self.gestures);
        renderer.build_scene(&ctx);
        renderer.take_svg()
    }

    /// Committed shapes as JSON, in draw order.
    pub fn shapes_json(&self) -> Result<String, AppError> {
        Ok(self.canvas.registry().to_json()?)
    }
}

/// Load a script file.
pub fn load_script(path: &Path) -> Result<Script, AppError> {
    let json = std::fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Script::from_json(&json)?)
}

fn read_image(path: &Path) -> Result<ImageFile, AppError> {
    let data = std::fs::read(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(ImageFile::new(name, data))
}
